//! Runtime preferences loaded from TOML
//!
//! Replaces ad-hoc mutable option bags with explicit, validated structs. All
//! fields have defaults matching the compile-time constants, so an empty
//! preference file (or none at all) yields standard behavior.

use crate::config::constants::compile_time::{batch, engine, sampling};
use crate::logging::codes;
use serde::Deserialize;
use thiserror::Error;

/// Preference loading / validation errors
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Preference file is not valid TOML: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },

    #[error("Invalid preference '{name}': {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

impl PreferenceError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            PreferenceError::Parse { .. } => codes::preferences::PREFERENCE_PARSE_FAILURE,
            PreferenceError::InvalidValue { .. } => codes::preferences::INVALID_PREFERENCE_VALUE,
        }
    }
}

/// Compiler-side preferences
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerPreferences {
    /// Maximum requests per serialized API call batch
    pub max_batch_size: usize,
}

impl Default for CompilerPreferences {
    fn default() -> Self {
        Self {
            max_batch_size: batch::DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

impl CompilerPreferences {
    pub fn validate(&self) -> Result<(), PreferenceError> {
        if self.max_batch_size == 0 {
            return Err(PreferenceError::InvalidValue {
                name: "max_batch_size",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Engine-side preferences
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EnginePreferences {
    /// Submission attempts per request before the drain stops
    pub max_submit_attempts: u32,
    /// Refinement correction ratio numerator
    pub correction_numerator: u64,
    /// Refinement correction ratio denominator
    pub correction_denominator: u64,
    /// Emit sampled responses to the sink before refinement
    pub debug_sampling: bool,
}

impl Default for EnginePreferences {
    fn default() -> Self {
        Self {
            max_submit_attempts: engine::DEFAULT_MAX_SUBMIT_ATTEMPTS,
            correction_numerator: sampling::CORRECTION_NUMERATOR,
            correction_denominator: sampling::CORRECTION_DENOMINATOR,
            debug_sampling: false,
        }
    }
}

impl EnginePreferences {
    pub fn validate(&self) -> Result<(), PreferenceError> {
        if self.max_submit_attempts == 0 {
            return Err(PreferenceError::InvalidValue {
                name: "max_submit_attempts",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.correction_numerator == 0 || self.correction_denominator == 0 {
            return Err(PreferenceError::InvalidValue {
                name: "correction",
                reason: "ratio components must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Full preference document: `[compiler]` and `[engine]` tables
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Preferences {
    pub compiler: CompilerPreferences,
    pub engine: EnginePreferences,
}

impl Preferences {
    /// Parse preferences from a TOML string and validate every value
    pub fn from_toml_str(input: &str) -> Result<Self, PreferenceError> {
        let prefs: Preferences = toml::from_str(input)?;
        prefs.validate()?;
        Ok(prefs)
    }

    pub fn validate(&self) -> Result<(), PreferenceError> {
        self.compiler.validate()?;
        self.engine.validate()?;
        Ok(())
    }
}
