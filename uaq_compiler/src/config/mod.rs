//! Configuration for the UAQ compiler and engine
//!
//! `constants` holds compile-time limits; `runtime` holds the TOML-loaded
//! preference structs that may override the tunable ones.

pub mod constants;
pub mod runtime;

pub use runtime::{CompilerPreferences, EnginePreferences, PreferenceError, Preferences};
