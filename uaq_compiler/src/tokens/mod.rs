//! Token types for filter-expression lexing

mod token;

pub use token::{Keyword, Token};
