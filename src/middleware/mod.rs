//! HTTP middleware for Catalog Core

pub mod metrics;

pub use metrics::ObservabilityLayer;
