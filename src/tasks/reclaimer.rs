//! TTL Reclaimer Task
//!
//! Background task that periodically removes expired cache entries. It is a
//! safety net: `get` checks expiry on its own and never waits for a sweep.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::error::{CacheError, Result};

/// Handle to a running reclaimer task.
///
/// Cancellation is observed only between sweeps, so a sweep that has
/// started always runs to completion under the store lock.
#[derive(Debug)]
pub struct Reclaimer {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Reclaimer {
    /// Spawns a task on the current Tokio runtime that purges expired
    /// entries every `interval`. The first sweep happens one interval
    /// after spawning.
    ///
    /// # Errors
    /// - `CacheError::InvalidConfig` if `interval` is zero
    /// - `CacheError::RuntimeUnavailable` outside a Tokio runtime
    pub fn spawn(store: Arc<Mutex<CacheStore>>, interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(CacheError::InvalidConfig(
                "sweep interval must be non-zero".to_string(),
            ));
        }
        let runtime = Handle::try_current().map_err(|_| CacheError::RuntimeUnavailable)?;

        let token = CancellationToken::new();
        let handle = runtime.spawn(run(store, interval, token.clone()));

        Ok(Self { token, handle })
    }

    /// Requests the task to stop. No sweep starts after this returns.
    pub fn stop(&self) {
        self.token.cancel();
    }

    /// True until `stop` is called or the task exits.
    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled() && !self.handle.is_finished()
    }

    /// Stops the task and waits for it to exit.
    pub async fn shutdown(self) {
        self.token.cancel();
        if let Err(err) = self.handle.await {
            warn!(error = %err, "TTL reclaimer terminated abnormally");
        }
    }
}

async fn run(store: Arc<Mutex<CacheStore>>, interval: Duration, token: CancellationToken) {
    info!(
        "Starting TTL reclaimer with interval of {} ms",
        interval.as_millis()
    );

    let start = tokio::time::Instant::now() + interval;
    let mut ticker = tokio::time::interval_at(start, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {
                let removed = store.lock().purge_expired(Instant::now());

                if removed > 0 {
                    info!("TTL sweep: removed {} expired entries", removed);
                } else {
                    debug!("TTL sweep: no expired entries found");
                }
            }
        }
    }

    info!("TTL reclaimer stopped");
}
