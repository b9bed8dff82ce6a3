use chrono::{DateTime, Duration, Utc};

use super::phone::PhoneNumber;

/// Codes expire five minutes after issuance.
pub const OTP_TTL_MINUTES: i64 = 5;
/// Failed verifications allowed per issued code.
pub const OTP_ATTEMPTS: u32 = 3;
/// Code length in digits.
pub const OTP_DIGITS: usize = 6;

/// A single outstanding OTP for one identity.
///
/// At most one record exists per phone number; issuing a new code
/// overwrites the previous record wholesale, invalidating it. Records are
/// deleted on successful verification, on detected expiry and on attempt
/// exhaustion. The code itself must never appear in logs or responses.
#[derive(Debug, Clone)]
pub struct OtpRecord {
    pub identity: PhoneNumber,
    pub code: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub attempts_remaining: u32,
}

impl OtpRecord {
    pub fn new(identity: PhoneNumber, code: String, issued_at: DateTime<Utc>) -> Self {
        Self {
            identity,
            code,
            issued_at,
            expires_at: issued_at + Duration::minutes(OTP_TTL_MINUTES),
            attempts_remaining: OTP_ATTEMPTS,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
