//! Queue-driven request execution

mod engine;
mod queue;
pub mod sampling;

pub use engine::{DrainStats, ExecutionEngine};
pub use queue::{QueuedRequest, RequestState, WorkQueue};
