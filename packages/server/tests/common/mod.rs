//! Shared test harness: wired ServerDeps with the kernel test doubles
//! (manual clock, recording delivery channel).

use std::sync::Arc;

use server_core::domains::auth::RoleDirectory;
use server_core::kernel::test_dependencies::{ManualClock, MockOtpDelivery};
use server_core::kernel::ServerDeps;

pub struct TestHarness {
    pub deps: Arc<ServerDeps>,
    pub clock: Arc<ManualClock>,
    pub delivery: Arc<MockOtpDelivery>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_directory(RoleDirectory::default())
    }

    pub fn with_directory(directory: RoleDirectory) -> Self {
        let clock = Arc::new(ManualClock::default());
        let delivery = Arc::new(MockOtpDelivery::new());
        let deps = Arc::new(ServerDeps::new(
            clock.clone(),
            delivery.clone(),
            directory,
        ));
        Self {
            deps,
            clock,
            delivery,
        }
    }

    /// The code most recently delivered to `identity`; panics if none was
    /// sent (tests always issue first).
    pub fn delivered_code(&self, identity: &str) -> String {
        self.delivery
            .last_code_for(identity)
            .expect("no OTP delivered for identity")
    }
}
