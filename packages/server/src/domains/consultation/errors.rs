use thiserror::Error;

use super::models::ConsultationStatus;

/// Consultation failures. `Forbidden` is deliberately distinct from
/// `InvalidTransition` so a client can tell "wrong actor" from "wrong
/// state"; failed transitions are always reported, never swallowed.
#[derive(Debug, Error)]
pub enum ConsultationError {
    #[error("consultation not found")]
    NotFound,

    #[error("cannot {action} a consultation in status {from}")]
    InvalidTransition {
        from: ConsultationStatus,
        action: &'static str,
    },

    #[error("actor is not the assigned expert")]
    Forbidden,
}

impl ConsultationError {
    /// Stable error code used in JSON responses.
    pub fn code(&self) -> &'static str {
        match self {
            ConsultationError::NotFound => "NotFound",
            ConsultationError::InvalidTransition { .. } => "InvalidTransition",
            ConsultationError::Forbidden => "Forbidden",
        }
    }
}
