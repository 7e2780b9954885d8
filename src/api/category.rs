//! Category API handlers

use crate::api::{NodeGuidQuery, SuccessResponse};
use crate::domain::{CreateCategoryInput, UpdateCategoryInput};
use crate::error::Result;
use crate::state::HasServices;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn list<S: HasServices>(
    State(state): State<S>,
    Query(query): Query<NodeGuidQuery>,
) -> Result<impl IntoResponse> {
    let categories = state
        .navigation_service()
        .list_categories(query.node_guid)
        .await?;
    Ok(Json(SuccessResponse::new(categories)))
}

pub async fn create<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<CreateCategoryInput>,
) -> Result<impl IntoResponse> {
    let category = state.navigation_service().create_category(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(category))))
}

pub async fn update<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<UpdateCategoryInput>,
) -> Result<impl IntoResponse> {
    let categories = state.navigation_service().update_category(input).await?;
    Ok(Json(SuccessResponse::new(categories)))
}
