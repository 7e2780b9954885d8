//! REST API handlers and shared response types

pub mod category;
pub mod health;
pub mod metrics;
pub mod page;
pub mod product;
pub mod route;
pub mod slider;
pub mod specification;

use crate::domain::StringUuid;
use serde::{Deserialize, Serialize};

/// Success response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Message response (for delete, etc.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `?id=` on product lookups
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: i64,
}

/// `{ "id": ... }` body of single-row deletes
#[derive(Debug, Deserialize)]
pub struct IdBody {
    pub id: i64,
}

/// Optional `?nodeGuid=` narrowing navigation reads to one page
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeGuidQuery {
    pub node_guid: Option<StringUuid>,
}
