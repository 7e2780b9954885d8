//! Product image slider API handlers

use crate::api::{IdBody, MessageResponse, SuccessResponse};
use crate::domain::{CreateSliderInput, UpdateSliderInput};
use crate::error::Result;
use crate::state::HasServices;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

pub async fn create<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<CreateSliderInput>,
) -> Result<impl IntoResponse> {
    let slider = state.product_service().add_slider(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(slider))))
}

pub async fn update<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<UpdateSliderInput>,
) -> Result<impl IntoResponse> {
    let slider = state.product_service().update_slider(input).await?;
    Ok(Json(SuccessResponse::new(slider)))
}

pub async fn delete<S: HasServices>(
    State(state): State<S>,
    Json(body): Json<IdBody>,
) -> Result<impl IntoResponse> {
    state.product_service().remove_slider(body.id).await?;
    Ok(Json(MessageResponse::new("Slider deleted successfully")))
}
