//! Common validation utilities.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Optional leading `+`, then digits with spaces or dashes, 8 to 20 chars.
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9][0-9 \-]{6,18}[0-9]$").unwrap();
}

/// Validates that a text field is not only whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates a phone number such as `+62 812-3456-7890` or `08123456789`.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_REGEX.is_match(phone.trim()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_format");
        err.message = Some("Phone number must contain 8-20 digits, spaces or dashes".into());
        Err(err)
    }
}

/// Validates a payroll period written as `YYYY-MM`.
pub fn validate_period(period: &str) -> Result<(), ValidationError> {
    let valid = period.len() == 7
        && NaiveDate::parse_from_str(&format!("{}-01", period), "%Y-%m-%d").is_ok();
    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("period_format");
        err.message = Some("Period must be formatted as YYYY-MM".into());
        Err(err)
    }
}

/// Validates that a score is a finite number between 0 and 100.
pub fn validate_score(score: f64) -> Result<(), ValidationError> {
    if score.is_finite() && (0.0..=100.0).contains(&score) {
        Ok(())
    } else {
        let mut err = ValidationError::new("score_range");
        err.message = Some("Score must be between 0 and 100".into());
        Err(err)
    }
}

/// Validates that a monetary amount is finite and non-negative.
pub fn validate_amount(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("amount_range");
        err.message = Some("Amount must be a non-negative number".into());
        Err(err)
    }
}

/// Validates that `end` does not fall before `start`.
pub fn validate_date_order(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end >= start {
        Ok(())
    } else {
        let mut err = ValidationError::new("date_order");
        err.message = Some("End date must not be before start date".into());
        Err(err)
    }
}
