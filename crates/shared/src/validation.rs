//! Common validation utilities.

use chrono::{Datelike, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

/// Earliest acquisition year accepted for an asset.
const MIN_ACQUISITION_YEAR: i32 = 1900;

lazy_static! {
    /// Barcodes and room codes: letters, digits and `-_./`, no whitespace.
    pub static ref CODE_REGEX: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._/\-]*$").unwrap();
}

/// Validates that a monetary amount is finite and non-negative.
pub fn validate_non_negative_amount(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("amount_range");
        err.message = Some("Amount must be a non-negative number".into());
        Err(err)
    }
}

/// Validates an acquisition year: not before 1900 and not after next year.
pub fn validate_acquisition_year(year: i32) -> Result<(), ValidationError> {
    let max_year = Utc::now().year() + 1;
    if (MIN_ACQUISITION_YEAR..=max_year).contains(&year) {
        Ok(())
    } else {
        let mut err = ValidationError::new("year_range");
        err.message = Some(
            format!(
                "Year must be between {} and {}",
                MIN_ACQUISITION_YEAR, max_year
            )
            .into(),
        );
        Err(err)
    }
}

/// Validates that a string is not only whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_accepts_zero_and_positive() {
        assert!(validate_non_negative_amount(0.0).is_ok());
        assert!(validate_non_negative_amount(1_500_000.0).is_ok());
    }

    #[test]
    fn test_amount_rejects_negative_and_nan() {
        assert!(validate_non_negative_amount(-0.01).is_err());
        assert!(validate_non_negative_amount(f64::NAN).is_err());
        assert!(validate_non_negative_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn test_acquisition_year_bounds() {
        let this_year = Utc::now().year();
        assert!(validate_acquisition_year(1900).is_ok());
        assert!(validate_acquisition_year(this_year).is_ok());
        assert!(validate_acquisition_year(this_year + 1).is_ok());
        assert!(validate_acquisition_year(1899).is_err());
        assert!(validate_acquisition_year(this_year + 2).is_err());
    }

    #[test]
    fn test_not_blank() {
        assert!(validate_not_blank("Meja").is_ok());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("").is_err());
    }

    #[test]
    fn test_code_regex() {
        assert!(CODE_REGEX.is_match("BRC-1"));
        assert!(CODE_REGEX.is_match("LAB.KOM/01"));
        assert!(CODE_REGEX.is_match("R1"));
        assert!(!CODE_REGEX.is_match("BRC 1"));
        assert!(!CODE_REGEX.is_match("-leading"));
        assert!(!CODE_REGEX.is_match(""));
    }

    #[test]
    fn test_error_messages_are_set() {
        let err = validate_non_negative_amount(-1.0).unwrap_err();
        assert!(err.message.unwrap().contains("non-negative"));
    }
}
