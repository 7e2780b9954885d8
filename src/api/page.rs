//! Page API handlers

use crate::api::{NodeGuidQuery, SuccessResponse};
use crate::domain::{CreatePageInput, StringUuid, UpdatePageInput};
use crate::error::Result;
use crate::state::HasServices;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeGuidBody {
    pub node_guid: StringUuid,
}

/// One page when `nodeGuid` is given, otherwise every page
pub async fn get<S: HasServices>(
    State(state): State<S>,
    Query(query): Query<NodeGuidQuery>,
) -> Result<Response> {
    match query.node_guid {
        Some(node_guid) => {
            let page = state.navigation_service().get_page(node_guid).await?;
            Ok(Json(SuccessResponse::new(page)).into_response())
        }
        None => {
            let pages = state.navigation_service().list_pages().await?;
            Ok(Json(SuccessResponse::new(pages)).into_response())
        }
    }
}

pub async fn create<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<CreatePageInput>,
) -> Result<impl IntoResponse> {
    let page = state.navigation_service().create_page(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(page))))
}

pub async fn update<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<UpdatePageInput>,
) -> Result<impl IntoResponse> {
    let page = state.navigation_service().update_page(input).await?;
    Ok(Json(SuccessResponse::new(page)))
}

/// Delete a page with its routes and categories
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    Json(body): Json<NodeGuidBody>,
) -> Result<impl IntoResponse> {
    let report = state.write_coordinator().delete_page(body.node_guid).await?;
    Ok(Json(SuccessResponse::new(report)))
}
