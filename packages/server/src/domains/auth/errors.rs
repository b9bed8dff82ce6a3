use thiserror::Error;

/// Auth failures surfaced to clients.
///
/// Every variant maps to a stable wire code via [`AuthError::code`] so the
/// UI can distinguish "resend OTP" from "wait and retry" situations.
/// Validation (`InvalidIdentity`) is rejected before the store is touched;
/// state errors are surfaced verbatim and never retried here; delivery
/// failure is infrastructure and deliberately separate from OTP-record
/// validity.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid identity: {0}")]
    InvalidIdentity(String),

    #[error("no OTP issued or already consumed")]
    NotFound,

    #[error("OTP expired")]
    Expired,

    #[error("too many failed attempts")]
    TooManyAttempts,

    #[error("invalid code, {attempts_remaining} attempt(s) remaining")]
    InvalidCode { attempts_remaining: u32 },

    #[error("OTP delivery failed")]
    Delivery(#[source] anyhow::Error),
}

impl AuthError {
    /// Stable error code used in JSON responses.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidIdentity(_) => "InvalidIdentity",
            AuthError::NotFound => "NotFound",
            AuthError::Expired => "Expired",
            AuthError::TooManyAttempts => "TooManyAttempts",
            AuthError::InvalidCode { .. } => "InvalidCode",
            AuthError::Delivery(_) => "DeliveryFailed",
        }
    }

    pub fn attempts_remaining(&self) -> Option<u32> {
        match self {
            AuthError::InvalidCode { attempts_remaining } => Some(*attempts_remaining),
            _ => None,
        }
    }
}
