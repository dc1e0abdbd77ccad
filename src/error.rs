//! Error types for the cache crate
//!
//! Cache operations themselves never fail: a missing or expired key is a
//! plain `None`. Errors only surface while building a cache, its background
//! tasks, or the configuration they read.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache construction and configuration.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A background task was requested outside of a tokio runtime
    #[error("No tokio runtime available to spawn the background task")]
    NoRuntime,

    /// An environment variable holds a value that cannot be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Computing a refreshed value panicked or was cancelled
    #[error("Value computation failed: {0}")]
    Compute(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache crate.
pub type Result<T> = std::result::Result<T, CacheError>;
