//! Error types for the lrukit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned by fallible constructors when cache
//!   configuration parameters are out of range (zero capacity, capacity at
//!   or above the configured limit).
//! - [`InvariantError`]: Returned by `check_invariants` methods when the
//!   index/ledger pair has desynchronized. This indicates a bug in the
//!   orchestrator, not a recoverable runtime condition.
//!
//! A cache miss is never an error; `get` signals it with `None`.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::error::ConfigError;
//! use lrukit::policy::lru::LruCache;
//!
//! let cache: Result<LruCache<u64, i32>, ConfigError> = LruCache::try_new(100);
//! assert!(cache.is_ok());
//!
//! // Out-of-range capacity is caught without panicking.
//! let bad = LruCache::<u64, i32>::try_new(0);
//! assert_eq!(bad.unwrap_err(), ConfigError::ZeroCapacity);
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced only at construction time; no partial cache is created on
/// failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Capacity must be at least 1.
    ZeroCapacity,
    /// Capacity must be strictly below the configured limit.
    CapacityTooLarge {
        /// The rejected capacity.
        capacity: usize,
        /// The exclusive upper bound in effect.
        limit: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCapacity => write!(f, "capacity must be at least 1"),
            ConfigError::CapacityTooLarge { capacity, limit } => {
                write!(f, "capacity {capacity} must be below the limit {limit}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by [`LruCache::check_invariants`](crate::policy::lru::LruCache::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_zero_capacity() {
        assert_eq!(ConfigError::ZeroCapacity.to_string(), "capacity must be at least 1");
    }

    #[test]
    fn config_display_capacity_too_large() {
        let err = ConfigError::CapacityTooLarge {
            capacity: 3000,
            limit: 3000,
        };
        assert_eq!(err.to_string(), "capacity 3000 must be below the limit 3000");
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("index/ledger length mismatch");
        assert_eq!(err.to_string(), "index/ledger length mismatch");
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("stale handle");
        assert_eq!(err.message(), "stale handle");
    }

    #[test]
    fn invariant_clone_and_eq() {
        let a = InvariantError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }
}
