//! Error types for varmap operations
//!
//! Two layers:
//! - [`StoreError`]: what a graph store backend reports for a single call.
//!   Only [`StoreError::Unavailable`] is transient and eligible for retry.
//! - [`VarmapError`]: what the library surfaces to callers. Store errors
//!   that survive the retry policy end the run.
//!
//! Malformed discovery events are not errors at this level: ingestion rejects
//! them, logs them and keeps going (see [`crate::ingest::IngestReport`]).

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single graph store call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Backend not reachable or not ready yet
    #[error("graph store unavailable during {operation}: {message}")]
    Unavailable { operation: String, message: String },

    /// Backend rejected the call
    #[error("graph store error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn unavailable(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unavailable {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. })
    }
}

/// Main error type for varmap operations
#[derive(Debug, Error)]
pub enum VarmapError {
    /// Retry budget exhausted while the store stayed unavailable
    #[error("graph store still unavailable after {attempts} attempt(s) of {operation}")]
    StoreUnavailable {
        operation: String,
        attempts: u32,
        #[source]
        source: StoreError,
    },

    /// Non-transient store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A discovery event that cannot be applied
    #[error("malformed discovery event: {message}")]
    MalformedEvent { message: String },

    /// An output artifact could not be written
    #[error("failed to write {}: {source}", .path.display())]
    ExportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl VarmapError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedEvent {
            message: message.into(),
        }
    }

    pub fn export_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ExportWrite {
            path: path.into(),
            source,
        }
    }

    /// Errors that abort the whole run
    pub fn is_fatal(&self) -> bool {
        !matches!(self, VarmapError::MalformedEvent { .. })
    }
}

pub type Result<T> = std::result::Result<T, VarmapError>;
