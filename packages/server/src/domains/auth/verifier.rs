use std::sync::Arc;

use tracing::info;

use crate::common::Clock;

use super::errors::AuthError;
use super::models::PhoneNumber;
use super::store::OtpStore;

/// Verifies submitted codes against the store.
///
/// The whole decision runs under the store lock, so two concurrent
/// verifications for one identity serialize: at most one can consume the
/// code, and every failed attempt is counted exactly once.
pub struct OtpVerifier {
    store: Arc<OtpStore>,
    clock: Arc<dyn Clock>,
}

impl OtpVerifier {
    pub fn new(store: Arc<OtpStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Check `submitted_code` for `raw_identity`; returns the verified
    /// identity on success.
    ///
    /// Check order is significant: expiry and attempt exhaustion are
    /// evaluated before the code comparison, so a correct-but-stale code
    /// is rejected as `Expired`, never accepted. A mismatch costs one
    /// attempt; the record is deleted on success, on expiry and when the
    /// budget runs out.
    pub async fn verify(
        &self,
        raw_identity: &str,
        submitted_code: &str,
    ) -> Result<PhoneNumber, AuthError> {
        let identity = PhoneNumber::parse(raw_identity)?;
        let now = self.clock.now();

        let result = self
            .store
            .update(&identity, |slot| {
                let record = match slot.as_mut() {
                    Some(record) => record,
                    None => return Err(AuthError::NotFound),
                };

                if record.is_expired(now) {
                    *slot = None;
                    return Err(AuthError::Expired);
                }

                if record.attempts_remaining == 0 {
                    *slot = None;
                    return Err(AuthError::TooManyAttempts);
                }

                if record.code != submitted_code {
                    record.attempts_remaining -= 1;
                    if record.attempts_remaining == 0 {
                        *slot = None;
                        return Err(AuthError::TooManyAttempts);
                    }
                    return Err(AuthError::InvalidCode {
                        attempts_remaining: record.attempts_remaining,
                    });
                }

                // Match: single use, consume the record
                *slot = None;
                Ok(())
            })
            .await;

        match result {
            Ok(()) => {
                info!(identity = %identity, "OTP verified");
                Ok(identity)
            }
            Err(e) => Err(e),
        }
    }
}
