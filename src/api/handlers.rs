//! API Handlers
//!
//! HTTP request handlers for each demo server endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, Json};
use rand::Rng;

use crate::config::Config;
use crate::error::Result;
use crate::models::{CalcResponse, HealthResponse};
use crate::tasks::RefreshingValue;

/// Upper bound (exclusive) of the simulated calculation result.
pub const CALC_RESULT_BOUND: u32 = 1000;

/// Application state shared across all handlers.
///
/// Holds the refreshed calculation behind an `Arc` so every clone of the
/// state reads the same value and the refresh task stops only when the last
/// clone goes away.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Periodically recomputed calculation result
    pub calc: Arc<RefreshingValue<u32>>,
}

impl AppState {
    /// Creates a new AppState around an already running refreshing value.
    pub fn new(calc: RefreshingValue<u32>) -> Self {
        Self {
            calc: Arc::new(calc),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Runs the first calculation before returning, so the server never
    /// answers without a value.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let delay = config.calc_delay;
        let calc =
            RefreshingValue::spawn(move || slow_calculation(delay), config.refresh_interval)
                .await?;
        Ok(Self::new(calc))
    }
}

/// Stand-in for an expensive computation: blocks for `delay`, then returns a
/// random number below [`CALC_RESULT_BOUND`].
pub fn slow_calculation(delay: Duration) -> u32 {
    std::thread::sleep(delay);
    rand::thread_rng().gen_range(0..CALC_RESULT_BOUND)
}

/// Handler for GET /calc
///
/// Returns the cached result without waiting for a computation.
pub async fn calc_handler(State(state): State<AppState>) -> Json<CalcResponse> {
    Json(CalcResponse::new(state.calc.get()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
