//! Email delivery via SMTP.
//!
//! [`EmailDelivery`] wraps the `lettre` async SMTP transport to send
//! plain-text booking emails. Configuration is loaded from environment
//! variables; if `SMTP_HOST` is not set, [`EmailConfig::from_env`] returns
//! `None` and no mailer should be constructed.

use bucketlist_core::formatting::{format_amount, format_booking_date, format_slot_window};

use crate::booking::BookingConfirmed;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "bookings@bucketlistt.com";

/// Configuration for the SMTP email delivery service.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set.
    ///
    /// | Variable        | Required | Default                    |
    /// |-----------------|----------|----------------------------|
    /// | `SMTP_HOST`     | yes      |                            |
    /// | `SMTP_PORT`     | no       | `587`                      |
    /// | `SMTP_FROM`     | no       | `bookings@bucketlistt.com` |
    /// | `SMTP_USER`     | no       |                            |
    /// | `SMTP_PASSWORD` | no       |                            |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Subject and plain-text body of a booking confirmation.
pub fn render_booking_confirmation(booking: &BookingConfirmed) -> (String, String) {
    let subject = format!(
        "Booking confirmed: {} ({})",
        booking.experience_title, booking.reference
    );
    let body = format!(
        "Hi {name},\n\n\
         Your booking is confirmed.\n\n\
         Reference:    {reference}\n\
         Experience:   {experience}\n\
         Activity:     {activity}\n\
         Date:         {date}\n\
         Time:         {window}\n\
         Participants: {participants}\n\
         Total:        {total}\n\n\
         Please carry this reference with you on the day.\n\n\
         Team bucketlistt",
        name = booking.contact_name,
        reference = booking.reference,
        experience = booking.experience_title,
        activity = booking.activity_name,
        date = format_booking_date(booking.booking_date),
        window = format_slot_window(booking.start_time, booking.end_time),
        participants = booking.participants,
        total = format_amount(booking.total_amount, &booking.currency),
    );
    (subject, body)
}

// ---------------------------------------------------------------------------
// EmailDelivery
// ---------------------------------------------------------------------------

/// Sends booking emails via SMTP.
pub struct EmailDelivery {
    config: EmailConfig,
}

impl EmailDelivery {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Send the confirmation email to the booking's contact address.
    pub async fn send_booking_confirmation(
        &self,
        booking: &BookingConfirmed,
    ) -> Result<(), EmailError> {
        let (subject, body) = render_booking_confirmation(booking);
        self.send(&booking.contact_email, subject, body).await?;
        tracing::info!(
            to = %booking.contact_email,
            reference = %booking.reference,
            "Booking confirmation email sent"
        );
        Ok(())
    }

    async fn send(&self, to_email: &str, subject: String, body: String) -> Result<(), EmailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;

    fn confirmed() -> BookingConfirmed {
        BookingConfirmed {
            booking_id: 1,
            reference: "BKL-7QK2MZP4".to_string(),
            contact_name: "Asha Rao".to_string(),
            contact_email: "asha@example.com".to_string(),
            experience_title: "Rafting in Rishikesh".to_string(),
            activity_name: "16 km run".to_string(),
            booking_date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
            participants: 3,
            total_amount: 449_750,
            currency: "INR".to_string(),
            is_offline: false,
        }
    }

    #[test]
    fn confirmation_mentions_reference_and_formatted_values() {
        let (subject, body) = render_booking_confirmation(&confirmed());
        assert_eq!(subject, "Booking confirmed: Rafting in Rishikesh (BKL-7QK2MZP4)");
        assert!(body.starts_with("Hi Asha Rao,"));
        assert!(body.contains("Tue, 20 Oct 2026"));
        assert!(body.contains("09:00 AM - 11:30 AM"));
        assert!(body.contains("₹4,497.50"));
        assert!(body.contains("Participants: 3"));
    }

    #[test]
    fn email_error_display_build() {
        let err = EmailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }

    #[test]
    fn email_error_display_address() {
        let addr_err: Result<lettre::Address, _> = "not-an-email".parse();
        let err = EmailError::Address(addr_err.unwrap_err());
        assert!(err.to_string().contains("Email address parse error"));
    }
}
