use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::models::{Avanue, AvanueAdd, AvanueDetail, AvanueUpdate, Message};
use crate::routes::error::ApiError;
use crate::services::AvanueService;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/avanues", get(list_avanues).post(create_avanue))
        .route(
            "/avanues/{id}",
            get(get_avanue).patch(update_avanue).delete(delete_avanue),
        )
}

async fn list_avanues(State(state): State<AppState>) -> Result<Json<Vec<Avanue>>, ApiError> {
    let mut conn = state.pool.acquire().await?;
    let avanues = AvanueService::new(&mut conn).list_avanues().await?;
    Ok(Json(avanues))
}

/// GET /avanues/{id} - Venue with the shows it hosts.
async fn get_avanue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AvanueDetail>, ApiError> {
    let mut conn = state.pool.acquire().await?;
    let avanue = AvanueService::new(&mut conn).get_avanue(id).await?;
    Ok(Json(avanue))
}

async fn create_avanue(
    State(state): State<AppState>,
    Json(req): Json<AvanueAdd>,
) -> Result<(StatusCode, Json<Avanue>), ApiError> {
    let mut tx = state.pool.begin().await?;
    let avanue = AvanueService::new(&mut tx).enroll_avanue(req).await?;
    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(avanue)))
}

async fn update_avanue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<AvanueUpdate>,
) -> Result<Json<Avanue>, ApiError> {
    let mut tx = state.pool.begin().await?;
    let avanue = AvanueService::new(&mut tx).update_avanue(id, req).await?;
    tx.commit().await?;
    Ok(Json(avanue))
}

/// DELETE /avanues/{id} - Hosted shows are kept, with their venue cleared.
async fn delete_avanue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Message>, ApiError> {
    let mut tx = state.pool.begin().await?;
    let message = AvanueService::new(&mut tx).delete_avanue(id).await?;
    tx.commit().await?;
    Ok(Json(message))
}
