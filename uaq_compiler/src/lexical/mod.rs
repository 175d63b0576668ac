//! Lexical analysis of filter expressions

mod analyzer;

pub use analyzer::{tokenize, LexerError};
