//! Cache Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::TtlCache;

/// Spawns a task that sweeps expired entries out of `cache` every `interval`.
///
/// The task is attached to the cache, so `TtlCache::destroy` aborts it. It also
/// checks the destroyed flag on every tick and exits on its own once set. The
/// sweep only bounds memory; reads never depend on it having run.
///
/// # Returns
/// A JoinHandle for the spawned task, finished immediately if the cache was
/// already destroyed.
pub fn spawn_sweep_task<V>(cache: Arc<TtlCache<V>>, interval: Duration) -> JoinHandle<()>
where
    V: Send + 'static,
{
    let sweeper = Arc::clone(&cache);
    let handle = tokio::spawn(async move {
        info!(
            "Starting cache sweep task with interval of {} ms",
            interval.as_millis()
        );

        loop {
            tokio::time::sleep(interval).await;

            if sweeper.is_destroyed() {
                debug!("Cache destroyed, sweep task exiting");
                break;
            }

            let removed = sweeper.sweep_expired();

            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    });

    cache.attach_sweeper(handle.abort_handle());
    handle
}
