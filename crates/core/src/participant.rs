//! Participant details collected in the booking form.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;

/// Optional leading `+`, then 10 to 15 digits.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("phone regex is valid"));

/// One participant's contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ParticipantDetails {
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    pub name: String,
    #[validate(email(message = "email is not a valid address"))]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone_number: String,
}

/// Strip the separators people commonly type into phone numbers.
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect()
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(&normalize_phone(phone)) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("phone_number must have 10 to 15 digits".into());
        Err(err)
    }
}

impl ParticipantDetails {
    /// Trimmed copy with a normalized phone number.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone_number: normalize_phone(self.phone_number.trim()),
        }
    }
}

/// Render `validator` errors as one message naming every offending field.
pub fn describe_errors(prefix: &str, errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let detail = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map_or_else(|| e.code.to_string(), ToString::to_string)
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("{prefix}{field}: {detail}")
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

/// Validate the participant list of a booking of `party_size`.
///
/// At least one participant (the lead contact) is required and no more
/// records than the party size are accepted.
pub fn validate_participants(
    participants: &[ParticipantDetails],
    party_size: i32,
) -> Result<(), CoreError> {
    if participants.is_empty() {
        return Err(CoreError::Validation(
            "participants: at least one participant is required".to_string(),
        ));
    }
    if participants.len() > usize::try_from(party_size).unwrap_or(0) {
        return Err(CoreError::Validation(format!(
            "participants: {} records given for a party of {party_size}",
            participants.len()
        )));
    }
    for (i, participant) in participants.iter().enumerate() {
        participant.validate().map_err(|e| {
            CoreError::Validation(describe_errors(&format!("participants[{i}]."), &e))
        })?;
    }
    Ok(())
}
