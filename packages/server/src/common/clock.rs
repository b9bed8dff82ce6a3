//! Injectable time source.
//!
//! OTP expiry and `updated_at` stamping depend on wall time, so the
//! clock is a trait dependency rather than a direct `Utc::now()` call.
//! Production uses [`SystemClock`]; tests use the manual clock from
//! `kernel::test_dependencies`.

use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time from the OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
