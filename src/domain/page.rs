//! Navigation tree models: pages, routes and categories

use super::common::{StringUuid, StyleDocument};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Navigation root entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Page {
    pub node_guid: StringUuid,
    pub page_name: String,
    pub path: String,
    pub route_type: String,
    pub app_screen_name: String,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            node_guid: StringUuid::new_v4(),
            page_name: String::new(),
            path: String::new(),
            route_type: String::new(),
            app_screen_name: String::new(),
        }
    }
}

/// Route registered under a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Route {
    pub node_guid: StringUuid,
    pub path: String,
    pub route_type: String,
    pub app_screen_name: String,
}

/// Category shown on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Category {
    pub node_guid: StringUuid,
    pub name: String,
    pub icon: Option<String>,
    pub styles: Option<StyleDocument>,
}

/// Rows removed by a page delete
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDeleteReport {
    pub routes_deleted: u64,
    pub categories_deleted: u64,
    pub pages_deleted: u64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageInput {
    #[validate(length(min = 1, max = 255))]
    pub page_name: String,
    #[validate(length(min = 1, max = 255))]
    pub path: String,
    #[validate(length(min = 1, max = 50))]
    pub route_type: String,
    #[validate(length(min = 1, max = 100))]
    pub app_screen_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePageInput {
    pub node_guid: StringUuid,
    #[validate(length(min = 1, max = 255))]
    pub page_name: String,
    #[validate(length(min = 1, max = 255))]
    pub path: String,
    #[validate(length(min = 1, max = 50))]
    pub route_type: String,
    #[validate(length(min = 1, max = 100))]
    pub app_screen_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRouteInput {
    pub node_guid: StringUuid,
    #[validate(length(min = 1, max = 255))]
    pub path: String,
    #[validate(length(min = 1, max = 50))]
    pub route_type: String,
    #[validate(length(min = 1, max = 100))]
    pub app_screen_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryInput {
    pub node_guid: StringUuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 255))]
    pub icon: Option<String>,
    pub styles: Option<StyleDocument>,
}

/// Replaces the categories stored under one page
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryInput {
    pub node_guid: StringUuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 255))]
    pub icon: Option<String>,
    pub styles: Option<StyleDocument>,
}
