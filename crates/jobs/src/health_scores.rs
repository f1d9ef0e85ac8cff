use mydns_application::use_cases::RunHealthMaintenanceUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Periodically recomputes upstream health scores.
///
/// Runs are sequential: a tick that fires while a run is still in progress is
/// delayed, never overlapped.
pub struct HealthScoreJob {
    maintenance: Arc<RunHealthMaintenanceUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl HealthScoreJob {
    pub fn new(maintenance: Arc<RunHealthMaintenanceUseCase>) -> Self {
        Self {
            maintenance,
            interval_secs: 300,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Spawns the loop; the first run happens immediately.
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        info!(
            interval_secs = self.interval_secs,
            "Starting health score job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("HealthScoreJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let scores = self.maintenance.execute().await;
                        debug!(providers = scores.len(), "Health score run completed");
                    }
                }
            }
        })
    }
}
