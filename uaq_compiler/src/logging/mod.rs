//! Global logging module for the UAQ compiler and engine
//!
//! Provides thread-safe global logging with document-aware batch processing
//! and a clean macro interface.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

// Re-export main types
pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static DOCUMENT_CONTEXT: RefCell<Option<DocumentContext>> = const { RefCell::new(None) };
}

/// Identifies which input document the current thread is processing
#[derive(Debug, Clone)]
pub struct DocumentContext {
    pub document_index: usize,
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized")?;

    // Validate error code system
    let test_codes = ["ERR001", "E020", "E030", "E070"];
    for &code in &test_codes {
        if codes::get_description(code) == "Unknown error" {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    let event = events::LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    );
    logging_service.log_event(event);

    Ok(())
}

/// Initialize with custom service (primarily for testing)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

/// Check if global logging is initialized
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

// ============================================================================
// GLOBAL ACCESS
// ============================================================================

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// DOCUMENT CONTEXT MANAGEMENT
// ============================================================================

/// Set document context for current thread
pub fn set_document_context(document_index: usize) {
    DOCUMENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(DocumentContext { document_index });
    });
}

/// Clear document context for current thread
pub fn clear_document_context() {
    DOCUMENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with document context
pub fn with_document_context<F, R>(document_index: usize, f: F) -> R
where
    F: FnOnce() -> R,
{
    set_document_context(document_index);
    let result = f();
    clear_document_context();
    result
}

/// Get current document context (used by macros)
pub fn get_current_document_context() -> Option<DocumentContext> {
    DOCUMENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<crate::utils::Span>,
    context: Vec<(&str, &str)>,
) {
    let mut event = LogEvent::error(code, message);

    if let Some(s) = span {
        event = event.with_span(s);
    }

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    if let Some(doc_ctx) = get_current_document_context() {
        event = event.with_context("document", &doc_ctx.document_index.to_string());
    }

    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    let mut event = LogEvent::success(code, message);

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    if let Some(doc_ctx) = get_current_document_context() {
        event = event.with_context("document", &doc_ctx.document_index.to_string());
    }

    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

/// Log info with context (used by log_info! macro)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    let mut event = LogEvent::info(message);

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    if let Some(doc_ctx) = get_current_document_context() {
        event = event.with_context("document", &doc_ctx.document_index.to_string());
    }

    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

// ============================================================================
// SAFE FALLBACK LOGGING
// ============================================================================

/// Safe error logging (won't panic if uninitialized)
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_context_management() {
        assert!(get_current_document_context().is_none());

        set_document_context(3);
        let context = get_current_document_context();
        assert!(context.is_some());
        assert_eq!(context.unwrap().document_index, 3);

        clear_document_context();
        assert!(get_current_document_context().is_none());
    }

    #[test]
    fn test_with_document_context() {
        let result = with_document_context(7, || {
            let context = get_current_document_context();
            assert!(context.is_some());
            assert_eq!(context.unwrap().document_index, 7);
            42
        });

        assert_eq!(result, 42);
        assert!(get_current_document_context().is_none());
    }

    #[test]
    fn test_safe_logging_without_init() {
        safe_log_error(codes::system::INTERNAL_ERROR, "Test error");
        // Should not panic even if global logging is not initialized
    }
}
