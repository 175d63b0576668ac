//! Consolidated error codes and classification system
//!
//! Single source of truth for all error and success codes used across the
//! compiler and engine, together with their behavioral metadata.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Filter-expression lexing and parsing error codes
pub mod expression {
    use super::Code;

    pub const INVALID_CHARACTER: Code = Code::new("E020");
    pub const UNTERMINATED_STRING: Code = Code::new("E021");
    pub const INVALID_NUMBER: Code = Code::new("E022");
    pub const IDENTIFIER_TOO_LONG: Code = Code::new("E023");
    pub const EXPRESSION_TOO_LONG: Code = Code::new("E024");
    pub const MALFORMED_EXPRESSION: Code = Code::new("E025");
    pub const UNKNOWN_OPERATOR: Code = Code::new("E026");
}

/// Document parsing error codes
pub mod document {
    use super::Code;

    pub const MISSING_FIELD: Code = Code::new("E030");
    pub const WRONG_TYPE: Code = Code::new("E031");
    pub const INVALID_DATE: Code = Code::new("E032");
    pub const UNKNOWN_KIND: Code = Code::new("E033");
    pub const UNKNOWN_SAMPLING_LEVEL: Code = Code::new("E034");
    pub const INVALID_DOCUMENT: Code = Code::new("E035");
}

/// Model construction / validation error codes
pub mod validation {
    use super::Code;

    pub const RANGE_ORDER: Code = Code::new("E040");
    pub const LENGTH_OUT_OF_BOUNDS: Code = Code::new("E041");
    pub const DAY_INDEX_OUT_OF_RANGE: Code = Code::new("E042");
}

/// Runtime preference error codes
pub mod preferences {
    use super::Code;

    pub const PREFERENCE_PARSE_FAILURE: Code = Code::new("E060");
    pub const INVALID_PREFERENCE_VALUE: Code = Code::new("E061");
}

/// Sampling resolver error codes
pub mod sampling {
    use super::Code;

    pub const MALFORMED_MARKERS: Code = Code::new("E070");
    pub const CANNOT_REFINE: Code = Code::new("E071");
}

/// Execution engine error codes
pub mod engine {
    use super::Code;

    pub const SUBMISSION_FAILED: Code = Code::new("E080");
    pub const RETRIES_EXHAUSTED: Code = Code::new("E081");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("S000");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("S001");
    pub const EXPRESSION_PARSED: Code = Code::new("S002");
    pub const DOCUMENT_PARSED: Code = Code::new("S003");
    pub const BATCH_SERIALIZED: Code = Code::new("S004");
    pub const COMPILE_COMPLETE: Code = Code::new("S005");
    pub const REPORT_ACCEPTED: Code = Code::new("S006");
    pub const REFINEMENT_QUEUED: Code = Code::new("S007");
    pub const DRAIN_COMPLETE: Code = Code::new("S008");
}

// ============================================================================
// CODE METADATA REGISTRY
// ============================================================================

/// Behavioral metadata for a code
#[derive(Debug, Clone)]
pub struct CodeMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub recoverable: bool,
    pub description: &'static str,
}

fn metadata_registry() -> &'static HashMap<&'static str, CodeMetadata> {
    static REGISTRY: OnceLock<HashMap<&'static str, CodeMetadata>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let entries = [
            CodeMetadata {
                code: "ERR001",
                category: "system",
                recoverable: false,
                description: "Internal error",
            },
            CodeMetadata {
                code: "ERR002",
                category: "system",
                recoverable: false,
                description: "Initialization failure",
            },
            CodeMetadata {
                code: "E020",
                category: "expression",
                recoverable: true,
                description: "Invalid character in filter expression",
            },
            CodeMetadata {
                code: "E021",
                category: "expression",
                recoverable: true,
                description: "Unterminated string literal",
            },
            CodeMetadata {
                code: "E022",
                category: "expression",
                recoverable: true,
                description: "Invalid number literal",
            },
            CodeMetadata {
                code: "E023",
                category: "expression",
                recoverable: true,
                description: "Identifier exceeds length limit",
            },
            CodeMetadata {
                code: "E024",
                category: "expression",
                recoverable: true,
                description: "Filter expression exceeds length limit",
            },
            CodeMetadata {
                code: "E025",
                category: "expression",
                recoverable: true,
                description: "Malformed filter expression",
            },
            CodeMetadata {
                code: "E026",
                category: "expression",
                recoverable: true,
                description: "Operator token has no known alias",
            },
            CodeMetadata {
                code: "E030",
                category: "document",
                recoverable: true,
                description: "Required document field missing",
            },
            CodeMetadata {
                code: "E031",
                category: "document",
                recoverable: true,
                description: "Document field has wrong type",
            },
            CodeMetadata {
                code: "E032",
                category: "document",
                recoverable: true,
                description: "Date is not ISO-8601 (YYYY-MM-DD)",
            },
            CodeMetadata {
                code: "E033",
                category: "document",
                recoverable: true,
                description: "Unknown column or filter kind tag",
            },
            CodeMetadata {
                code: "E034",
                category: "document",
                recoverable: true,
                description: "Unknown sampling level name",
            },
            CodeMetadata {
                code: "E035",
                category: "document",
                recoverable: true,
                description: "Document is not valid JSON/JSONL",
            },
            CodeMetadata {
                code: "E040",
                category: "validation",
                recoverable: false,
                description: "Date range start is after end",
            },
            CodeMetadata {
                code: "E041",
                category: "validation",
                recoverable: false,
                description: "Collection length outside allowed bounds",
            },
            CodeMetadata {
                code: "E042",
                category: "validation",
                recoverable: false,
                description: "Day index outside date range",
            },
            CodeMetadata {
                code: "E060",
                category: "preferences",
                recoverable: false,
                description: "Preference file is not valid TOML",
            },
            CodeMetadata {
                code: "E061",
                category: "preferences",
                recoverable: false,
                description: "Preference value outside allowed bounds",
            },
            CodeMetadata {
                code: "E070",
                category: "sampling",
                recoverable: false,
                description: "Sampling markers missing or malformed",
            },
            CodeMetadata {
                code: "E071",
                category: "sampling",
                recoverable: false,
                description: "Date range too narrow to refine",
            },
            CodeMetadata {
                code: "E080",
                category: "engine",
                recoverable: false,
                description: "Submission collaborator reported a fatal error",
            },
            CodeMetadata {
                code: "E081",
                category: "engine",
                recoverable: false,
                description: "Submission retry attempts exhausted",
            },
        ];
        entries
            .into_iter()
            .map(|meta| (meta.code, meta))
            .collect()
    })
}

/// Get human-readable description for a code
pub fn get_description(code: &str) -> &'static str {
    metadata_registry()
        .get(code)
        .map(|meta| meta.description)
        .unwrap_or("Unknown error")
}

/// Get category for a code
pub fn get_category(code: &str) -> &'static str {
    metadata_registry()
        .get(code)
        .map(|meta| meta.category)
        .unwrap_or("unknown")
}

/// Whether processing can continue past this error (per-document isolation)
pub fn is_recoverable(code: &str) -> bool {
    metadata_registry()
        .get(code)
        .map(|meta| meta.recoverable)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_display() {
        assert_eq!(expression::MALFORMED_EXPRESSION.to_string(), "E025");
    }

    #[test]
    fn test_metadata_lookup() {
        assert_eq!(
            get_description("E026"),
            "Operator token has no known alias"
        );
        assert_eq!(get_category("E070"), "sampling");
        assert!(is_recoverable("E030"));
        assert!(!is_recoverable("E081"));
    }

    #[test]
    fn test_unknown_code_falls_back() {
        assert_eq!(get_description("E999"), "Unknown error");
        assert!(!is_recoverable("E999"));
    }
}
