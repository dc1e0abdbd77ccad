//! TTL Cache - in-process key/value caches with time-based expiration
//!
//! Provides lazily expiring and background-swept caches, plus a periodically
//! refreshed single-value cache served by the demo HTTP binary.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{GcTtlCache, LazyTtlCache, SimpleCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::RefreshingValue;
