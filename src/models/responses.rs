//! Response DTOs for the demo server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Response body for the calc endpoint (GET /calc)
#[derive(Debug, Clone, Serialize)]
pub struct CalcResponse {
    /// Most recently computed result
    pub result: u32,
}

impl CalcResponse {
    /// Creates a new CalcResponse
    pub fn new(result: u32) -> Self {
        Self { result }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
