//! Filter-expression parsing

mod error;
mod parser;

pub use error::ExpressionError;
pub use parser::{parse_expression, FilterExpression, Operand, Rhs};
