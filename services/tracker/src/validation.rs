//! Input validation utilities
//!
//! Form fields arrive as strings; parse failures become flash codes so
//! the handler can redirect back to the submitting form instead of
//! failing the request.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use crate::flash::Flash;

/// Format accepted for expiry dates
pub const EXPIRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate username shape
pub fn validate_username(username: &str) -> Result<(), Flash> {
    if username.is_empty() || username.len() > 32 {
        return Err(Flash::InvalidUsername);
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err(Flash::InvalidUsername);
    }

    Ok(())
}

/// Validate password
///
/// Only non-emptiness is checked. Passwords are deliberately kept
/// plaintext and unhardened in this system.
pub fn validate_password(password: &str) -> Result<(), Flash> {
    if password.is_empty() {
        return Err(Flash::InvalidPassword);
    }

    Ok(())
}

/// Parse a price form field
///
/// Negative prices are accepted; non-negativity is a convention, not a
/// constraint.
pub fn parse_price(price: &str) -> Result<f64, Flash> {
    price.trim().parse().map_err(|_| Flash::InvalidPrice)
}

/// Parse an expiry date form field in YYYY-MM-DD format
pub fn parse_expiry_date(expiry_date: &str) -> Result<NaiveDate, Flash> {
    NaiveDate::parse_from_str(expiry_date.trim(), EXPIRY_DATE_FORMAT)
        .map_err(|_| Flash::InvalidExpiryDate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username_accepts_simple_names() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("user_42").is_ok());
    }

    #[test]
    fn test_validate_username_rejects_bad_shapes() {
        assert_eq!(validate_username(""), Err(Flash::InvalidUsername));
        assert_eq!(validate_username("has space"), Err(Flash::InvalidUsername));
        assert_eq!(
            validate_username(&"x".repeat(33)),
            Err(Flash::InvalidUsername)
        );
    }

    #[test]
    fn test_validate_password_requires_non_empty() {
        assert!(validate_password("pw1").is_ok());
        assert_eq!(validate_password(""), Err(Flash::InvalidPassword));
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("3.5"), Ok(3.5));
        assert_eq!(parse_price(" 4 "), Ok(4.0));
        assert_eq!(parse_price("cheap"), Err(Flash::InvalidPrice));
        assert_eq!(parse_price(""), Err(Flash::InvalidPrice));
    }

    #[test]
    fn test_parse_expiry_date() {
        assert_eq!(
            parse_expiry_date("2025-01-01"),
            Ok(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        );
        assert_eq!(
            parse_expiry_date("01/01/2025"),
            Err(Flash::InvalidExpiryDate)
        );
        assert_eq!(
            parse_expiry_date("2025-13-01"),
            Err(Flash::InvalidExpiryDate)
        );
    }
}
