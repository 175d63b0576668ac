// Internal modules
pub mod config;
pub mod document;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod syntax;
pub mod tokens;
pub mod utils;
pub mod validation;

// Re-export key types for library consumers
pub use config::{CompilerPreferences, EnginePreferences, Preferences};
pub use document::DocumentError;
pub use model::{
    Column, ColumnKind, DateRange, Filter, FilterKind, FilterOperator, KeyRequestPair,
    QueryOptions, Request, RequestBatch, RequestKey, SamplingLevel,
};
pub use pipeline::{compile_documents, compile_file, compile_str, CompileOutcome, PipelineError};
pub use validation::ValidationError;
