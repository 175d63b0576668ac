//! Filter-expression parse errors

use crate::lexical::LexerError;
use crate::logging::{codes, Code};
use crate::utils::Span;
use thiserror::Error;

/// Errors raised while turning an expression string into a filter
#[derive(Debug, Clone, Error)]
pub enum ExpressionError {
    /// The expression does not match the comparison/membership grammar.
    /// `fragment` quotes the offending text so the message stands alone.
    #[error("Malformed filter expression near '{fragment}': {reason}")]
    Parse {
        fragment: String,
        reason: String,
        span: Span,
    },

    /// The operator lexed fine but matches no known operator alias
    #[error("Unknown operator '{token}'")]
    UnknownOperator { token: String, span: Span },
}

impl ExpressionError {
    pub fn error_code(&self) -> Code {
        match self {
            ExpressionError::Parse { .. } => codes::expression::MALFORMED_EXPRESSION,
            ExpressionError::UnknownOperator { .. } => codes::expression::UNKNOWN_OPERATOR,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ExpressionError::Parse { span, .. } => *span,
            ExpressionError::UnknownOperator { span, .. } => *span,
        }
    }

    /// Wrap a lexer failure, quoting the offending fragment of `source`
    pub fn from_lexer(err: LexerError, source: &str) -> Self {
        let span = err.span();
        ExpressionError::Parse {
            fragment: span.fragment(source).to_string(),
            reason: err.to_string(),
            span,
        }
    }
}
