//! Display formatting for amounts, dates and slot windows.
//!
//! These strings end up in confirmation emails and API responses meant for
//! direct display.

use chrono::{NaiveDate, NaiveTime};

use crate::types::MinorAmount;

/// Format an amount in minor units for display.
///
/// INR uses the rupee sign and Indian digit grouping (`₹1,23,456.50`); other
/// currencies are prefixed with their code and grouped in thousands
/// (`USD 1,234.00`). Whole amounts omit the fractional part for INR.
pub fn format_amount(amount: MinorAmount, currency: &str) -> String {
    let negative = amount < 0;
    let abs = amount.unsigned_abs();
    let major = abs / 100;
    let minor = abs % 100;
    let sign = if negative { "-" } else { "" };

    if currency.eq_ignore_ascii_case("INR") {
        let grouped = group_indian(major);
        if minor == 0 {
            format!("{sign}₹{grouped}")
        } else {
            format!("{sign}₹{grouped}.{minor:02}")
        }
    } else {
        let grouped = group_thousands(major);
        format!("{sign}{} {grouped}.{minor:02}", currency.to_uppercase())
    }
}

/// `1234567` -> `12,34,567`.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// `1234567` -> `1,234,567`.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `Tue, 20 Oct 2026`.
pub fn format_booking_date(date: NaiveDate) -> String {
    date.format("%a, %d %b %Y").to_string()
}

/// `09:00 AM - 11:30 AM`.
pub fn format_slot_window(start: NaiveTime, end: NaiveTime) -> String {
    format!("{} - {}", start.format("%I:%M %p"), end.format("%I:%M %p"))
}
