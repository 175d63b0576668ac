//! Query document reading and field access

pub mod case;
mod error;
mod source;
pub mod value;

pub use case::{camel_to_snake_case, snake_to_camel_case};
pub use error::DocumentError;
pub use source::{load_documents, read_documents};
