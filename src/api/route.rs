//! Route API handlers

use crate::api::{NodeGuidQuery, SuccessResponse};
use crate::domain::CreateRouteInput;
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
    let routes = state.navigation_service().list_routes(query.node_guid).await?;
    Ok(Json(SuccessResponse::new(routes)))
}

pub async fn create<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<CreateRouteInput>,
) -> Result<impl IntoResponse> {
    let route = state.navigation_service().create_route(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(route))))
}
