//! Immutable, validated query value objects
//!
//! Everything here is built once from a document (or from refinement) and
//! never mutated afterwards; narrowing a request always constructs new
//! instances.

mod batch;
mod column;
mod date_range;
mod filter;
mod operator;
mod options;
mod request;
mod sampling;

pub use batch::{KeyRequestPair, RequestBatch};
pub use column::{Column, ColumnKind};
pub use date_range::DateRange;
pub use filter::{Filter, FilterKind, FilterValue};
pub use operator::{AliasedEnum, FilterOperator, Representation, WireLiteral};
pub use options::QueryOptions;
pub use request::{CohortGroup, Request, RequestKey, Segment};
pub use sampling::SamplingLevel;
