//! Document parsing errors

use crate::logging::{codes, Code};
use crate::syntax::ExpressionError;
use crate::validation::ValidationError;
use thiserror::Error;

/// Errors raised while turning a query document into value objects
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Required field '{field}' is missing")]
    MissingField { field: String },

    #[error("Field '{field}' has wrong type; expected {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("Field '{field}' is not an ISO-8601 date: '{value}'")]
    InvalidDate { field: String, value: String },

    #[error("Unknown column kind '{kind}'")]
    UnknownKind { kind: String },

    #[error("Unknown sampling level '{name}'")]
    UnknownSamplingLevel { name: String },

    #[error("Document is not valid JSON: {reason}")]
    InvalidDocument { reason: String },

    #[error("Could not read '{path}': {reason}")]
    Read { path: String, reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Expression(#[from] ExpressionError),
}

impl DocumentError {
    pub fn error_code(&self) -> Code {
        match self {
            DocumentError::MissingField { .. } => codes::document::MISSING_FIELD,
            DocumentError::WrongType { .. } => codes::document::WRONG_TYPE,
            DocumentError::InvalidDate { .. } => codes::document::INVALID_DATE,
            DocumentError::UnknownKind { .. } => codes::document::UNKNOWN_KIND,
            DocumentError::UnknownSamplingLevel { .. } => codes::document::UNKNOWN_SAMPLING_LEVEL,
            DocumentError::InvalidDocument { .. } => codes::document::INVALID_DOCUMENT,
            DocumentError::Read { .. } => codes::document::INVALID_DOCUMENT,
            DocumentError::Validation(err) => err.error_code(),
            DocumentError::Expression(err) => err.error_code(),
        }
    }
}
