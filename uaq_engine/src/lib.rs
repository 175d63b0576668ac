// Internal modules
pub mod api;
pub mod config;
pub mod error;
pub mod execution;

// Re-export key types for library consumers
pub use api::{MemorySink, ReportDelivery, ReportSink, SubmitOutcome, Submitter};
pub use config::EngineConfig;
pub use error::{EngineError, SamplingError};
pub use execution::{DrainStats, ExecutionEngine, QueuedRequest, RequestState, WorkQueue};
