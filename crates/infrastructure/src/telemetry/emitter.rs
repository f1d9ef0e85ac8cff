use mydns_application::ports::TelemetrySink;
use mydns_domain::TelemetryEvent;
use tokio::sync::mpsc;

/// Non-blocking telemetry emitter.
///
/// Events go through an unbounded channel to a [`TelemetryRecorder`] task.
/// Sending never awaits; if the emitter is disabled or the channel is closed
/// the event is dropped.
///
/// [`TelemetryRecorder`]: super::TelemetryRecorder
#[derive(Clone)]
pub struct TelemetryEmitter {
    sender: Option<mpsc::UnboundedSender<TelemetryEvent>>,
}

impl TelemetryEmitter {
    pub fn new_disabled() -> Self {
        Self { sender: None }
    }

    /// Creates an enabled emitter and the receiver for the consumer task.
    pub fn new_enabled() -> (Self, mpsc::UnboundedReceiver<TelemetryEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { sender: Some(tx) }, rx)
    }

    pub fn emit(&self, event: TelemetryEvent) {
        if let Some(ref tx) = self.sender {
            let _ = tx.send(event);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }
}

impl TelemetrySink for TelemetryEmitter {
    fn record(&self, event: TelemetryEvent) {
        self.emit(event);
    }
}

impl Default for TelemetryEmitter {
    fn default() -> Self {
        Self::new_disabled()
    }
}

impl std::fmt::Debug for TelemetryEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryEmitter")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
