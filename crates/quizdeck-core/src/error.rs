//! Error types for ingestion and quiz generation.
//!
//! `GeneratorError` is defined here so the quiz assembler can downcast and
//! classify generator failures for logging without string matching. None of
//! these variants ever escape `build_quiz`; they only decide what gets logged
//! before falling back.

use thiserror::Error;

/// Errors surfaced by the CSV ingestion parser.
///
/// This is the only error the core ever reports to a caller: quiz assembly
/// absorbs every failure into the fallback path.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input had fewer than two non-blank lines (header + one data row).
    #[error("input must contain a header row and at least one data row")]
    MissingData,

    /// Every data row was rejected.
    #[error("no usable rows found for columns '{term}' and '{definition}' ({skipped} rows skipped)")]
    NoCards {
        term: String,
        definition: String,
        skipped: usize,
    },
}

/// Errors that can occur when calling a quiz generator backend.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl GeneratorError {
    /// Returns `true` if this error is a configuration problem rather than a
    /// transient transport condition.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            GeneratorError::AuthenticationFailed(_) | GeneratorError::ModelNotFound(_)
        )
    }
}
