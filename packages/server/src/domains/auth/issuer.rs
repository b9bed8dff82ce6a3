use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::Rng;
use tracing::{info, warn};

use crate::common::Clock;
use crate::kernel::BaseOtpDelivery;

use super::errors::AuthError;
use super::models::{OtpRecord, PhoneNumber, OTP_DIGITS};
use super::store::OtpStore;

/// What the caller learns about an issued OTP. The code itself only
/// travels to the delivery channel.
#[derive(Debug, Clone)]
pub struct OtpIssued {
    pub identity: PhoneNumber,
    pub expires_at: DateTime<Utc>,
}

/// Issues OTP codes: validate, generate, commit, deliver - in that order.
pub struct OtpIssuer {
    store: Arc<OtpStore>,
    clock: Arc<dyn Clock>,
    delivery: Arc<dyn BaseOtpDelivery>,
}

impl OtpIssuer {
    pub fn new(
        store: Arc<OtpStore>,
        clock: Arc<dyn Clock>,
        delivery: Arc<dyn BaseOtpDelivery>,
    ) -> Self {
        Self {
            store,
            clock,
            delivery,
        }
    }

    /// Issue a fresh OTP for `raw_identity`.
    ///
    /// Overwrites any outstanding record for the identity, invalidating a
    /// previously sent code. The record is committed before delivery is
    /// attempted: if the gateway fails, the caller gets
    /// [`AuthError::Delivery`] but the code stays verifiable for clients
    /// that received it through a fallback channel.
    pub async fn issue(&self, raw_identity: &str) -> Result<OtpIssued, AuthError> {
        let identity = PhoneNumber::parse(raw_identity)?;

        let code = generate_code();
        let record = OtpRecord::new(identity.clone(), code.clone(), self.clock.now());
        let expires_at = record.expires_at;

        self.store.insert(record).await;
        info!(identity = %identity, "OTP issued");

        if let Err(e) = self.delivery.deliver_otp(&identity, &code).await {
            warn!(identity = %identity, error = %e, "OTP delivery failed, record kept");
            return Err(AuthError::Delivery(e));
        }

        Ok(OtpIssued {
            identity,
            expires_at,
        })
    }
}

/// Uniformly random code of [`OTP_DIGITS`] digits from the OS CSPRNG,
/// left-padded with zeros.
fn generate_code() -> String {
    let code: u32 = OsRng.gen_range(0..1_000_000);
    format!("{:0width$}", code, width = OTP_DIGITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_shape() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), OTP_DIGITS);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
