//! Middleware for the tkv API.

pub mod metrics;
pub mod tracing_layer;
