//! Specification API handlers

use crate::api::{IdBody, MessageResponse, SuccessResponse};
use crate::domain::{CreateSpecificationInput, UpdateSpecificationInput};
use crate::error::Result;
use crate::state::HasServices;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductIdQuery {
    pub product_id: i64,
}

/// List the specifications of one product
pub async fn list<S: HasServices>(
    State(state): State<S>,
    Query(query): Query<ProductIdQuery>,
) -> Result<impl IntoResponse> {
    let specifications = state
        .product_service()
        .list_specifications(query.product_id)
        .await?;
    Ok(Json(SuccessResponse::new(specifications)))
}

pub async fn create<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<CreateSpecificationInput>,
) -> Result<impl IntoResponse> {
    let specification = state.product_service().add_specification(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(specification))))
}

pub async fn update<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<UpdateSpecificationInput>,
) -> Result<impl IntoResponse> {
    let specification = state.product_service().update_specification(input).await?;
    Ok(Json(SuccessResponse::new(specification)))
}

pub async fn delete<S: HasServices>(
    State(state): State<S>,
    Json(body): Json<IdBody>,
) -> Result<impl IntoResponse> {
    state.product_service().remove_specification(body.id).await?;
    Ok(Json(MessageResponse::new("Specification deleted successfully")))
}
