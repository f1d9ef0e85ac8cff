use super::store::InMemoryTelemetryStore;
use mydns_domain::TelemetryEvent;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

const MAX_BATCH: usize = 256;

/// Background task draining emitted telemetry into the store.
///
/// The task ends once every emitter is dropped and the channel is empty.
pub struct TelemetryRecorder {
    store: Arc<InMemoryTelemetryStore>,
}

impl TelemetryRecorder {
    pub fn new(store: Arc<InMemoryTelemetryStore>) -> Self {
        Self { store }
    }

    pub fn start(self, mut rx: mpsc::UnboundedReceiver<TelemetryEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!("Telemetry recorder started");
            let mut batch = Vec::with_capacity(MAX_BATCH);

            while let Some(event) = rx.recv().await {
                batch.push(event);
                while batch.len() < MAX_BATCH {
                    match rx.try_recv() {
                        Ok(event) => batch.push(event),
                        Err(_) => break,
                    }
                }

                debug!(events = batch.len(), "Recording telemetry batch");
                self.store.append(std::mem::take(&mut batch)).await;
            }

            info!("Telemetry recorder stopped");
        })
    }
}
