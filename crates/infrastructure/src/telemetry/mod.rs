pub mod emitter;
pub mod recorder;
pub mod store;

pub use emitter::TelemetryEmitter;
pub use recorder::TelemetryRecorder;
pub use store::InMemoryTelemetryStore;
