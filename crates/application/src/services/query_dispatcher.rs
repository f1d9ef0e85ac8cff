use crate::ports::{DohTransport, TelemetrySink};
use bytes::Bytes;
use mydns_domain::{
    Dataset, DomainError, Endpoint, ErrorCategory, ErrorEvent, Family, TelemetryEvent, UsageEvent,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

/// Request attributes attached to every telemetry event of a dispatch.
#[derive(Debug, Clone)]
pub struct DispatchContext {
    pub family: Family,
    pub dataset: Dataset,
}

/// The first successful upstream reply.
#[derive(Debug, Clone)]
pub struct UpstreamAnswer {
    pub provider: Arc<str>,
    pub body: Bytes,
}

type RaceResult = Result<UpstreamAnswer, DomainError>;

/// Shared completion state of one race. The sender is taken at most once.
struct RaceState {
    remaining: AtomicUsize,
    signal: Mutex<Option<oneshot::Sender<RaceResult>>>,
}

impl RaceState {
    fn resolve(&self, result: RaceResult) -> bool {
        let sender = match self.signal.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        match sender {
            Some(tx) => tx.send(result).is_ok(),
            None => false,
        }
    }
}

/// Races one query against several upstreams; the first HTTP 200 wins.
pub struct QueryDispatcher {
    transport: Arc<dyn DohTransport>,
    telemetry: Arc<dyn TelemetrySink>,
    deadline: Duration,
}

impl QueryDispatcher {
    pub fn new(
        transport: Arc<dyn DohTransport>,
        telemetry: Arc<dyn TelemetrySink>,
        deadline: Duration,
    ) -> Self {
        Self {
            transport,
            telemetry,
            deadline,
        }
    }

    pub async fn dispatch(
        &self,
        targets: Vec<Endpoint>,
        query: Bytes,
        context: &DispatchContext,
    ) -> Result<UpstreamAnswer, DomainError> {
        let attempts = targets.len();
        if attempts == 0 {
            return Err(DomainError::AllUpstreamsFailed { attempts: 0 });
        }

        let (tx, rx) = oneshot::channel();
        let race = Arc::new(RaceState {
            remaining: AtomicUsize::new(attempts),
            signal: Mutex::new(Some(tx)),
        });

        let handles: Vec<AbortHandle> = targets
            .into_iter()
            .map(|endpoint| {
                let transport = Arc::clone(&self.transport);
                let telemetry = Arc::clone(&self.telemetry);
                let race = Arc::clone(&race);
                let query = query.clone();
                let context = context.clone();

                tokio::spawn(async move {
                    let outcome = match transport.exchange(&endpoint, query).await {
                        Ok(reply) if reply.is_ok() => Ok(UpstreamAnswer {
                            provider: Arc::clone(&endpoint.hostname),
                            body: reply.body,
                        }),
                        Ok(reply) => Err(DomainError::UpstreamHttp {
                            provider: endpoint.hostname.to_string(),
                            status: reply.status,
                        }),
                        Err(e) => Err(e),
                    };

                    match outcome {
                        Ok(answer) => {
                            if !race.resolve(Ok(answer)) {
                                debug!(provider = %endpoint.hostname, "Late upstream answer discarded");
                            }
                        }
                        Err(err) => {
                            let category = err.upstream_category().unwrap_or(ErrorCategory::Fetch);
                            warn!(
                                provider = %endpoint.hostname,
                                category = %category,
                                error = %err,
                                "Upstream attempt failed"
                            );
                            telemetry.record(TelemetryEvent::Error(ErrorEvent {
                                provider: Arc::clone(&endpoint.hostname),
                                category,
                                family: context.family,
                                dataset: context.dataset,
                            }));

                            if race.remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
                                race.resolve(Err(DomainError::AllUpstreamsFailed { attempts }));
                            }
                        }
                    }
                })
                .abort_handle()
            })
            .collect();

        let result = match tokio::time::timeout(self.deadline, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(DomainError::AllUpstreamsFailed { attempts }),
            Err(_) => {
                for handle in &handles {
                    handle.abort();
                }
                warn!(
                    attempts,
                    deadline_ms = self.deadline.as_millis() as u64,
                    "Upstream race deadline exceeded"
                );
                Err(DomainError::DeadlineExceeded(self.deadline.as_millis() as u64))
            }
        };

        if let Ok(answer) = &result {
            debug!(provider = %answer.provider, family = %context.family, "Upstream race won");
            self.telemetry.record(TelemetryEvent::Usage(UsageEvent {
                provider: Arc::clone(&answer.provider),
                family: context.family.clone(),
                dataset: context.dataset,
            }));
        }

        result
    }
}
