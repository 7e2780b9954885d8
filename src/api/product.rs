//! Product API handlers

use crate::api::{IdBody, IdQuery, MessageResponse, SuccessResponse};
use crate::domain::{CreateProductInput, UpdateProductInput};
use crate::error::{AppError, Result};
use crate::state::HasServices;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

/// `{ "id": [...] }` body of a batch delete. Members are checked by the
/// write coordinator, so anything JSON is accepted here.
#[derive(Debug, Deserialize)]
pub struct IdListBody {
    pub id: serde_json::Value,
}

/// List products
pub async fn list<S: HasServices>(State(state): State<S>) -> Result<impl IntoResponse> {
    let products = state.product_service().list().await?;
    Ok(Json(SuccessResponse::new(products)))
}

/// Get product by ID
pub async fn get<S: HasServices>(
    State(state): State<S>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse> {
    let product = state.product_service().get(query.id).await?;
    Ok(Json(SuccessResponse::new(product)))
}

/// Get a product with its slider and specifications
pub async fn get_detail<S: HasServices>(
    State(state): State<S>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse> {
    let view = state
        .product_detail_service()
        .get_product_detail(query.id)
        .await?;
    Ok(Json(SuccessResponse::new(view)))
}

/// Create product
pub async fn create<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<CreateProductInput>,
) -> Result<impl IntoResponse> {
    let product = state.product_service().create(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(product))))
}

/// Update product
pub async fn update<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<UpdateProductInput>,
) -> Result<impl IntoResponse> {
    let product = state.product_service().update(input).await?;
    Ok(Json(SuccessResponse::new(product)))
}

/// Delete product with its slider and specifications
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    Json(body): Json<IdBody>,
) -> Result<impl IntoResponse> {
    state.write_coordinator().delete_product(body.id).await?;
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

/// Delete a batch of products
pub async fn delete_list<S: HasServices>(
    State(state): State<S>,
    Json(body): Json<IdListBody>,
) -> Result<impl IntoResponse> {
    let values = body.id.as_array().ok_or_else(|| {
        AppError::InvalidInput("Invalid input: ids should be an array of numbers.".to_string())
    })?;
    let report = state.write_coordinator().delete_product_list(values).await?;
    Ok(Json(SuccessResponse::new(report)))
}
