//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! One periodic job: evicting expired OTP records. This is garbage
//! collection only - expiry is also enforced lazily at verification
//! time, so a missed run never affects correctness.

use std::sync::Arc;

use anyhow::Result;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::kernel::ServerDeps;

/// Start all scheduled tasks
pub async fn start_scheduler(deps: Arc<ServerDeps>) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    // OTP sweep - runs every minute
    let sweep_deps = deps.clone();
    let sweep_job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let deps = sweep_deps.clone();
        Box::pin(async move {
            let purged = deps.otp_store.purge_expired(deps.clock.now()).await;
            if purged > 0 {
                tracing::info!(purged, "evicted expired OTP records");
            }
        })
    })?;

    scheduler.add(sweep_job).await?;
    scheduler.start().await?;

    Ok(scheduler)
}
