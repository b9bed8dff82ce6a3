//! Test doubles for trait dependencies.
//!
//! Public (not `cfg(test)`) so the integration suites under `tests/`
//! can use them too.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::common::Clock;
use crate::domains::auth::PhoneNumber;
use crate::kernel::traits::BaseOtpDelivery;

/// Settable clock for expiry tests.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }

    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + delta;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Records delivered codes instead of calling the gateway; can be told
/// to fail to exercise the delivery-failure path.
#[derive(Default)]
pub struct MockOtpDelivery {
    sent: Mutex<Vec<(String, String)>>,
    failing: AtomicBool,
}

impl MockOtpDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All `(identity, code)` pairs delivered so far.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// The most recently delivered code for `identity`.
    pub fn last_code_for(&self, identity: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == identity)
            .map(|(_, code)| code.clone())
    }
}

#[async_trait]
impl BaseOtpDelivery for MockOtpDelivery {
    async fn deliver_otp(&self, identity: &PhoneNumber, code: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((identity.to_string(), code.to_string()));
        if self.failing.load(Ordering::SeqCst) {
            return Err(anyhow!("gateway unavailable"));
        }
        Ok(())
    }
}
