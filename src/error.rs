// ⚠️ Directory Errors
//
// Per-key fetch failures are data (collected into an `AggregationResult`);
// only the variants of `DirectoryError` abort a whole call.

use crate::context::CancelReason;
use crate::identifier::IdentifierError;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Structural violation of the identifier or country-code format
    #[error("malformed identifier: {0}")]
    MalformedIdentifier(#[from] IdentifierError),

    /// The initiating context ended before or during dispatch
    #[error("request aborted: {0}")]
    Cancelled(CancelReason),

    #[error("the SWIFT code {0} already exists")]
    AlreadyExists(String),

    #[error("the SWIFT code {0} does not exist")]
    NotFound(String),

    /// Backend failure outside of a per-key fetch (scan, put, delete, ...)
    #[error("store error: {0:#}")]
    Store(#[from] anyhow::Error),
}

// ============================================================================
// FETCH FAILURES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FetchCause {
    /// The key was scanned but had no record at fetch time
    NotFound,
    Timeout(Duration),
    Cancelled(CancelReason),
    Backend(String),
    /// The fetch task panicked or was aborted
    Aborted(String),
}

impl fmt::Display for FetchCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchCause::NotFound => f.write_str("record not found"),
            FetchCause::Timeout(limit) => write!(f, "timed out after {}ms", limit.as_millis()),
            FetchCause::Cancelled(reason) => write!(f, "{}", reason),
            FetchCause::Backend(message) => f.write_str(message),
            FetchCause::Aborted(message) => write!(f, "fetch task aborted: {}", message),
        }
    }
}

/// One candidate that could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub identifier: String,
    pub cause: FetchCause,
}

impl FetchFailure {
    pub fn new(identifier: impl Into<String>, cause: FetchCause) -> Self {
        FetchFailure {
            identifier: identifier.into(),
            cause,
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to fetch bank data for key {}: {}",
            self.identifier, self.cause
        )
    }
}
