//! Auth domain - phone OTP authentication and sessions
//!
//! Flow: route handler → `OtpIssuer::issue` writes a record and hands the
//! code to the delivery channel; `OtpVerifier::verify` consumes the record
//! and the handler then mints a session via `SessionStore`.
//!
//! Responsibilities:
//! - Canonical phone identities
//! - OTP issue/verify with a fixed attempt budget and 5 minute TTL
//! - Opaque session tokens bound to identity and role
//! - Role lookup against the configured directory

pub mod directory;
pub mod errors;
pub mod issuer;
pub mod models;
pub mod session;
pub mod store;
pub mod types;
pub mod verifier;

pub use directory::{Role, RoleDirectory};
pub use errors::AuthError;
pub use issuer::{OtpIssued, OtpIssuer};
pub use models::{OtpRecord, PhoneNumber, OTP_ATTEMPTS, OTP_DIGITS, OTP_TTL_MINUTES};
pub use session::{Session, SessionStore};
pub use store::OtpStore;
pub use verifier::OtpVerifier;
