// src/services/errors.rs
use thiserror::Error;

/// Errors surfaced by the extraction pipeline. Every variant is fatal to the
/// current invocation: the dispatcher stops at the first failure and leaves
/// retry decisions to whatever triggered the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Transient I/O failure: {0}")]
    TransientIo(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Detection service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Detection quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Malformed entity from detection service: {0}")]
    MalformedEntity(String),

    #[error("Write throttled: {0}")]
    Throttled(String),

    #[error("Write validation failed: {0}")]
    ValidationFailed(String),
}
