//! Retry configuration for graph store calls.
//!
//! A store backend may be slow to come up (a database container still
//! starting, for instance). Every store call is retried on
//! [`crate::errors::StoreError::Unavailable`] with a fixed delay, up to a fixed
//! number of attempts; once exhausted, the run aborts.
//!
//! # Configuration Example
//!
//! ```toml
//! [retry]
//! max_attempts = 10
//! delay_ms = 5000
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounded retry policy with a fixed inter-attempt delay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total number of attempts, the first one included (default: 10)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay between two attempts in milliseconds (default: 5000)
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
        }
    }
}

impl RetryConfig {
    /// A single attempt, no retry.
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            delay_ms: 0,
        }
    }

    /// Retry without sleeping between attempts.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            delay_ms: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Attempts actually made; a zero budget still makes one attempt.
    pub fn effective_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Whether another attempt may follow attempt number `attempt` (1-indexed).
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.effective_attempts()
    }
}

fn default_max_attempts() -> u32 {
    10
}

fn default_delay_ms() -> u64 {
    5000
}
