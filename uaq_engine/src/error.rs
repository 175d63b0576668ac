//! Engine and sampling errors

use thiserror::Error;
use uaq_compiler::logging::{codes, Code};
use uaq_compiler::ValidationError;

/// Errors from sampling detection and refinement
#[derive(Debug, Error)]
pub enum SamplingError {
    #[error("Sampling markers missing or malformed: {reason}")]
    MalformedMarkers { reason: String },

    #[error("Date range of {days} day(s) is too narrow to refine")]
    CannotRefine { days: i64 },

    #[error(transparent)]
    Rebuild(#[from] ValidationError),
}

impl SamplingError {
    pub fn error_code(&self) -> Code {
        match self {
            SamplingError::MalformedMarkers { .. } => codes::sampling::MALFORMED_MARKERS,
            SamplingError::CannotRefine { .. } => codes::sampling::CANNOT_REFINE,
            SamplingError::Rebuild(err) => err.error_code(),
        }
    }
}

/// Fatal errors that stop a queue drain
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Sampling(#[from] SamplingError),

    #[error("Submission failed: {reason}")]
    SubmissionFailed { reason: String },

    #[error("Submission retries exhausted after {attempts} attempt(s): {reason}")]
    RetriesExhausted { attempts: u32, reason: String },

    #[error("Work queue exceeded {limit} entries")]
    QueueOverflow { limit: usize },
}

impl EngineError {
    pub fn error_code(&self) -> Code {
        match self {
            EngineError::Sampling(err) => err.error_code(),
            EngineError::SubmissionFailed { .. } => codes::engine::SUBMISSION_FAILED,
            EngineError::RetriesExhausted { .. } => codes::engine::RETRIES_EXHAUSTED,
            EngineError::QueueOverflow { .. } => codes::system::INTERNAL_ERROR,
        }
    }
}
