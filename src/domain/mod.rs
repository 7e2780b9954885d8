//! Domain models for Catalog Core

pub mod common;
pub mod page;
pub mod product;

pub use common::*;
pub use page::*;
pub use product::*;
