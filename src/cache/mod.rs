//! Cache Module
//!
//! Provides in-memory key/value caches with optional TTL expiration.
//!
//! # Variants
//! - [`SimpleCache`]: no expiration
//! - [`LazyTtlCache`]: expiry checked on read only
//! - [`GcTtlCache`]: expiry checked on read and by a background sweep

mod entry;
mod gc;
mod lazy;
mod simple;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use gc::GcTtlCache;
pub use lazy::LazyTtlCache;
pub use simple::SimpleCache;
pub use store::EntryMap;
