//! Engine runtime configuration

use uaq_compiler::config::constants::compile_time::{engine, sampling};
use uaq_compiler::EnginePreferences;

/// Resolved engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Submissions allowed per request before the drain stops
    pub max_submit_attempts: u32,
    /// Refinement correction ratio (numerator / denominator)
    pub correction_numerator: u64,
    pub correction_denominator: u64,
    /// Also emit sampled responses to the sink before refining them
    pub debug_sampling: bool,
    /// Hard cap on queued requests
    pub max_queue_length: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_submit_attempts: engine::DEFAULT_MAX_SUBMIT_ATTEMPTS,
            correction_numerator: sampling::CORRECTION_NUMERATOR,
            correction_denominator: sampling::CORRECTION_DENOMINATOR,
            debug_sampling: false,
            max_queue_length: engine::MAX_QUEUE_LENGTH,
        }
    }
}

impl From<&EnginePreferences> for EngineConfig {
    fn from(prefs: &EnginePreferences) -> Self {
        Self {
            max_submit_attempts: prefs.max_submit_attempts,
            correction_numerator: prefs.correction_numerator,
            correction_denominator: prefs.correction_denominator,
            debug_sampling: prefs.debug_sampling,
            max_queue_length: engine::MAX_QUEUE_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.max_submit_attempts, 3);
        assert_eq!(config.correction_numerator, 4);
        assert_eq!(config.correction_denominator, 3);
        assert!(!config.debug_sampling);
    }

    #[test]
    fn test_from_preferences() {
        let prefs = EnginePreferences {
            max_submit_attempts: 5,
            debug_sampling: true,
            ..Default::default()
        };
        let config = EngineConfig::from(&prefs);
        assert_eq!(config.max_submit_attempts, 5);
        assert!(config.debug_sampling);
        assert_eq!(config.correction_numerator, 4);
    }
}
