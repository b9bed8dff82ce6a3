use std::fmt;

use serde::Serialize;

use crate::domains::auth::errors::AuthError;

/// Canonical phone identity: `+` followed by 7 to 15 digits (E.164
/// style, first digit nonzero).
///
/// All OTP and session state is keyed by this form; anything that does
/// not parse is rejected before touching a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

const MIN_DIGITS: usize = 7;
const MAX_DIGITS: usize = 15;

impl PhoneNumber {
    pub fn parse(raw: &str) -> Result<Self, AuthError> {
        let trimmed = raw.trim();

        let digits = match trimmed.strip_prefix('+') {
            Some(rest) => rest,
            None => return Err(AuthError::InvalidIdentity(trimmed.to_string())),
        };

        if digits.len() < MIN_DIGITS
            || digits.len() > MAX_DIGITS
            || !digits.chars().all(|c| c.is_ascii_digit())
            || digits.starts_with('0')
        {
            return Err(AuthError::InvalidIdentity(trimmed.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last four digits, used for default display names.
    pub fn suffix(&self) -> &str {
        let digits = &self.0[1..];
        &digits[digits.len().saturating_sub(4)..]
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_numbers() {
        assert!(PhoneNumber::parse("+919999999999").is_ok());
        assert!(PhoneNumber::parse("+15551234567").is_ok());
        // Minimum and maximum digit counts
        assert!(PhoneNumber::parse("+1234567").is_ok());
        assert!(PhoneNumber::parse("+123456789012345").is_ok());
    }

    #[test]
    fn test_invalid_numbers() {
        // Missing plus
        assert!(PhoneNumber::parse("919999999999").is_err());
        // Leading zero after plus
        assert!(PhoneNumber::parse("+0919999999").is_err());
        // Too short / too long
        assert!(PhoneNumber::parse("+123456").is_err());
        assert!(PhoneNumber::parse("+1234567890123456").is_err());
        // Non-digits
        assert!(PhoneNumber::parse("+91-9999-99999").is_err());
        assert!(PhoneNumber::parse("user@example.com").is_err());
        assert!(PhoneNumber::parse("").is_err());
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let phone = PhoneNumber::parse("  +919999999999 ").unwrap();
        assert_eq!(phone.as_str(), "+919999999999");
    }

    #[test]
    fn test_suffix() {
        let phone = PhoneNumber::parse("+919999912345").unwrap();
        assert_eq!(phone.suffix(), "2345");
    }
}
