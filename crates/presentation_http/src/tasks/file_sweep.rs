//! Stale file sweep task
//!
//! Periodically removes staged uploads and produced downloads older than the
//! configured age, so abandoned batches do not fill the disk.

use std::time::Duration;

use storage::FileStore;
use tracing::{debug, info};

/// Spawn a background task that periodically sweeps old files.
///
/// Returns a `JoinHandle` that can be used to abort the task when shutting
/// down.
pub fn spawn_file_sweep_task(
    store: FileStore,
    max_age: Duration,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    info!(
        max_age_secs = max_age.as_secs(),
        interval_secs = interval.as_secs(),
        "Starting file sweep task"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // Don't run immediately on startup
        ticker.tick().await;

        loop {
            ticker.tick().await;
            debug!("Running file sweep");
            store.cleanup_old_files(max_age).await;
        }
    })
}
