//! Model construction validation

mod error;

pub use error::{len_between, ValidationError};
