//! Response models for the demo server API
//!
//! This module defines the DTOs serialized into HTTP response bodies.

pub mod responses;

pub use responses::{CalcResponse, HealthResponse};
