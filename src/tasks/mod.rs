//! Background Tasks Module
//!
//! Contains the cancellable periodic tasks used by the caches.
//!
//! # Tasks
//! - TTL Sweep: Removes expired entries from a `GcTtlCache` at a fixed interval
//! - Value Refresh: Recomputes a `RefreshingValue` at a fixed interval

mod refresh;
mod sweep;

pub use refresh::RefreshingValue;
pub use sweep::{spawn_sweep_task, SweepHandle};
