//! Environment-driven logging configuration
//!
//! Controls the minimum level and output format of the global logging
//! service. Read once per call so tests can flip the environment.

use super::events::LogLevel;

/// Environment variable selecting the minimum log level
pub const LOG_LEVEL_VAR: &str = "UAQ_LOG_LEVEL";

/// Environment variable selecting structured (JSON) output
pub const LOG_FORMAT_VAR: &str = "UAQ_LOG_FORMAT";

/// Minimum level to emit; defaults to Info
pub fn get_min_log_level() -> LogLevel {
    match std::env::var(LOG_LEVEL_VAR) {
        Ok(value) => parse_level(&value).unwrap_or(LogLevel::Info),
        Err(_) => LogLevel::Info,
    }
}

/// Whether to emit structured JSON log lines
pub fn use_structured_logging() -> bool {
    matches!(
        std::env::var(LOG_FORMAT_VAR).as_deref(),
        Ok("json") | Ok("JSON") | Ok("structured")
    )
}

/// Validate the logging environment configuration
pub fn validate_config() -> Result<(), String> {
    if let Ok(value) = std::env::var(LOG_LEVEL_VAR) {
        if parse_level(&value).is_none() {
            return Err(format!(
                "{} must be one of error|warn|info|debug, got '{}'",
                LOG_LEVEL_VAR, value
            ));
        }
    }
    Ok(())
}

/// One-line summary of the active logging configuration
pub fn get_config_summary() -> String {
    format!(
        "log level: {}, structured: {}",
        get_min_log_level().as_str(),
        use_structured_logging()
    )
}

fn parse_level(value: &str) -> Option<LogLevel> {
    match value.to_ascii_lowercase().as_str() {
        "error" => Some(LogLevel::Error),
        "warn" | "warning" => Some(LogLevel::Warning),
        "info" => Some(LogLevel::Info),
        "debug" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_names() {
        assert_eq!(parse_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_level("WARN"), Some(LogLevel::Warning));
        assert_eq!(parse_level("nope"), None);
    }

    #[test]
    fn test_config_summary_mentions_level() {
        assert!(get_config_summary().contains("log level"));
    }
}
