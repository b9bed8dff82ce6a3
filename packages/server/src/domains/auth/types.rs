//! Auth wire types.
//!
//! The OTP endpoint takes a tagged sum over the two actions; anything
//! without a recognized `action` is rejected at deserialization, before
//! any component runs.

use serde::{Deserialize, Serialize};

use super::directory::Role;
use super::session::Session;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OtpRequest {
    Send { identity: String },
    Verify { identity: String, code: String },
}

#[derive(Debug, Serialize)]
pub struct OtpSendResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct SessionPayload {
    pub token: String,
    pub identity: String,
    pub name: String,
    pub role: Role,
}

impl From<Session> for SessionPayload {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            identity: session.identity.to_string(),
            name: session.name,
            role: session.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OtpVerifyResponse {
    pub success: bool,
    pub session: SessionPayload,
}

/// Error body shared by the auth and consultation endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts_remaining: Option<u32>,
}

impl ErrorBody {
    pub fn new(error: &'static str) -> Self {
        Self {
            success: false,
            error,
            attempts_remaining: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_request_parses() {
        let send: OtpRequest =
            serde_json::from_str(r#"{"action":"send","identity":"+919999999999"}"#).unwrap();
        assert!(matches!(send, OtpRequest::Send { .. }));

        let verify: OtpRequest = serde_json::from_str(
            r#"{"action":"verify","identity":"+919999999999","code":"123456"}"#,
        )
        .unwrap();
        assert!(matches!(verify, OtpRequest::Verify { .. }));
    }

    #[test]
    fn test_unknown_action_rejected() {
        let result: Result<OtpRequest, _> =
            serde_json::from_str(r#"{"action":"resend","identity":"+919999999999"}"#);
        assert!(result.is_err());

        let result: Result<OtpRequest, _> =
            serde_json::from_str(r#"{"identity":"+919999999999"}"#);
        assert!(result.is_err());
    }
}
