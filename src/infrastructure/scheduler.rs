//! Fixed-interval background jobs.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, warn};

/// A job re-run every `period` until stopped.
///
/// The first run happens one period after spawning. A run that overlaps
/// the next tick delays it; missed ticks are skipped rather than replayed,
/// so runs never overlap. Dropping the task stops it.
pub struct PeriodicTask {
    name: String,
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl PeriodicTask {
    /// Spawn `job` on the current tokio runtime.
    pub fn spawn<F, Fut>(name: impl Into<String>, period: Duration, mut job: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let name = name.into();
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let task_name = name.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    result = shutdown_rx.changed() => {
                        if result.is_err() || *shutdown_rx.borrow() {
                            debug!(task = %task_name, "Periodic task stopping");
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        job().await;
                    }
                }
            }
        });

        Self {
            name,
            shutdown,
            handle,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Signal the task to stop after its current run.
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task to exit. Call [`stop`](Self::stop) first.
    pub async fn join(self) {
        let Self {
            name,
            shutdown: _shutdown,
            handle,
        } = self;
        if let Err(err) = handle.await {
            warn!(task = %name, error = %err, "Periodic task panicked");
        }
    }
}
