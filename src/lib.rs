//! Catalog Core - Product Catalog Backend
//!
//! This crate provides the data-access core of the product catalog: a bounded
//! connection pool, a query executor, entity repositories for products and
//! navigation pages, the product detail aggregation, and the multi-table
//! delete coordinator, all served over a small REST API.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
