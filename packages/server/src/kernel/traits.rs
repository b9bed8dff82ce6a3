// Trait definitions for dependency injection
//
// Infrastructure traits only - no business logic. The OTP components
// depend on these abstractions so tests can swap in doubles.

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::auth::PhoneNumber;

/// Out-of-band delivery of an issued OTP code.
///
/// Implementations must not block or corrupt store state on failure; the
/// issuer commits the record before calling this.
#[async_trait]
pub trait BaseOtpDelivery: Send + Sync {
    async fn deliver_otp(&self, identity: &PhoneNumber, code: &str) -> Result<()>;
}
