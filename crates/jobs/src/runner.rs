use crate::HealthScoreJob;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Owns the lifetime of the background jobs.
///
/// Every job is spawned under a child of one shutdown token; [`shutdown`]
/// cancels that token and waits for each job to leave its loop.
///
/// [`shutdown`]: JobRunner::shutdown
pub struct JobRunner {
    shutdown: CancellationToken,
    running: Vec<(&'static str, JoinHandle<()>)>,
}

impl JobRunner {
    pub fn new(shutdown: CancellationToken) -> Self {
        Self {
            shutdown,
            running: Vec::new(),
        }
    }

    pub fn spawn_health_scores(&mut self, job: HealthScoreJob) {
        let job = job.with_cancellation(self.shutdown.child_token());
        self.running.push(("health_scores", Arc::new(job).start()));
    }

    /// Runs `tick` every `every` until shutdown. The first tick fires after
    /// one full period.
    pub fn spawn_periodic<F>(&mut self, name: &'static str, every: Duration, mut tick: F)
    where
        F: FnMut() + Send + 'static,
    {
        let token = self.shutdown.child_token();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + every, every);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => tick(),
                }
            }
            debug!(job = name, "Periodic job stopped");
        });
        self.running.push((name, handle));
    }

    pub fn running(&self) -> usize {
        self.running.len()
    }

    /// Cancels every job and waits for them to finish.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        for (name, handle) in self.running {
            if let Err(e) = handle.await {
                warn!(job = name, error = %e, "Background job ended abnormally");
            }
        }
        info!("All background jobs stopped");
    }
}
