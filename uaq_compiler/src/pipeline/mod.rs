//! Document compilation pipeline
//!
//! Drives documents through parse, group, and serialize stages. Documents
//! fail fast individually but never abort their siblings; every failure is
//! logged and collected alongside the compiled output.

use crate::config::{CompilerPreferences, PreferenceError};
use crate::document::{read_documents, DocumentError};
use crate::logging::codes;
use crate::model::{KeyRequestPair, Request, RequestBatch};
use crate::{log_error, log_info, log_success};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Fatal pipeline errors; per-document failures are collected instead
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Preferences(#[from] PreferenceError),

    #[error(transparent)]
    Source(#[from] DocumentError),
}

/// A document that failed to compile, with its input position
#[derive(Debug)]
pub struct DocumentFailure {
    pub index: usize,
    pub error: DocumentError,
}

/// Counts from one compile run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileStats {
    pub documents: usize,
    pub compiled: usize,
    pub failed: usize,
    pub groups: usize,
    pub payloads: usize,
}

/// Output of a compile run: the grouped batch, its serialized payloads, and
/// any per-document failures
#[derive(Debug)]
pub struct CompileOutcome {
    pub batch: RequestBatch,
    pub pairs: Vec<KeyRequestPair>,
    pub failures: Vec<DocumentFailure>,
    pub stats: CompileStats,
}

/// Compile a sequence of documents into serialized request batches
pub fn compile_documents(docs: &[Value], prefs: &CompilerPreferences) -> CompileOutcome {
    log_info!("Compiling documents", "count" => docs.len());

    let mut batch = RequestBatch::new(prefs.max_batch_size);
    let mut failures = Vec::new();

    for (index, doc) in docs.iter().enumerate() {
        let parsed = crate::logging::with_document_context(index, || Request::from_doc(doc));
        match parsed {
            Ok(request) => {
                batch.insert(request);
                crate::logging::with_document_context(index, || {
                    log_success!(codes::success::DOCUMENT_PARSED, "Document parsed");
                });
            }
            Err(error) => {
                crate::logging::with_document_context(index, || {
                    log_error!(error.error_code(), &error.to_string(), "stage" => "parse");
                });
                failures.push(DocumentFailure { index, error });
            }
        }
    }

    let pairs = batch.to_request();
    log_success!(codes::success::BATCH_SERIALIZED, "Batch serialized",
        "groups" => batch.group_count(),
        "payloads" => pairs.len()
    );

    let stats = CompileStats {
        documents: docs.len(),
        compiled: batch.request_count(),
        failed: failures.len(),
        groups: batch.group_count(),
        payloads: pairs.len(),
    };

    log_success!(codes::success::COMPILE_COMPLETE, "Compile complete",
        "documents" => stats.documents,
        "compiled" => stats.compiled,
        "failed" => stats.failed
    );

    CompileOutcome {
        batch,
        pairs,
        failures,
        stats,
    }
}

/// Compile documents from JSONL or JSON text
pub fn compile_str(
    input: &str,
    prefs: &CompilerPreferences,
) -> Result<CompileOutcome, PipelineError> {
    prefs.validate()?;
    let docs = read_documents(input)?;
    Ok(compile_documents(&docs, prefs))
}

/// Compile documents from a file path
pub fn compile_file(
    path: &Path,
    prefs: &CompilerPreferences,
) -> Result<CompileOutcome, PipelineError> {
    prefs.validate()?;
    let docs = crate::document::load_documents(path)?;
    Ok(compile_documents(&docs, prefs))
}
