//! Bounded retry around graph store calls.
//!
//! ```rust
//! use varmap::config::RetryConfig;
//! use varmap::errors::StoreError;
//! use varmap::resilience::with_retry;
//!
//! let mut calls = 0;
//! let value = with_retry(&RetryConfig::immediate(3), "lookup", || {
//!     calls += 1;
//!     if calls < 3 {
//!         Err(StoreError::unavailable("lookup", "not ready"))
//!     } else {
//!         Ok(42)
//!     }
//! })
//! .unwrap();
//! assert_eq!(value, 42);
//! ```

use crate::config::RetryConfig;
use crate::errors::{StoreError, VarmapError};

/// Run `op`, retrying transient store failures per `config`.
///
/// Non-transient failures are returned immediately. When every attempt failed
/// with [`StoreError::Unavailable`], the result is a fatal
/// [`VarmapError::StoreUnavailable`].
pub fn with_retry<T, F>(config: &RetryConfig, operation: &str, mut op: F) -> Result<T, VarmapError>
where
    F: FnMut() -> Result<T, StoreError>,
{
    let mut attempt = 1;
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() => {
                if !config.should_retry(attempt) {
                    tracing::error!(
                        operation,
                        attempts = attempt,
                        "graph store unavailable, giving up"
                    );
                    return Err(VarmapError::StoreUnavailable {
                        operation: operation.to_string(),
                        attempts: attempt,
                        source: err,
                    });
                }
                tracing::warn!(
                    operation,
                    attempt,
                    max_attempts = config.effective_attempts(),
                    "Waiting for graph store to be ready: {}",
                    err
                );
                std::thread::sleep(config.delay());
                attempt += 1;
            }
            Err(err) => return Err(VarmapError::Store(err)),
        }
    }
}
