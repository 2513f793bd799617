use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};

use crate::models::Message;
use crate::routes::error::ApiError;
use crate::services::RelationManager;
use crate::state::AppState;

/// Relationship writes read a counter or a reference and then write it back,
/// so the write lock is taken up front. A competing request waits on the
/// busy timeout and then sees the committed state.
const BEGIN_IMMEDIATE: &str = "BEGIN IMMEDIATE";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shows/{id}/customers/{customer_id}",
            post(enroll_customer_to_show).delete(remove_customer_from_show),
        )
        .route(
            "/avanues/{id}/shows/{show_id}",
            post(enroll_show_to_avanue).delete(delete_show_from_avanue),
        )
}

/// POST /shows/{show_id}/customers/{customer_id} - Admit a customer to a show.
async fn enroll_customer_to_show(
    State(state): State<AppState>,
    Path((show_id, customer_id)): Path<(i64, i64)>,
) -> Result<Json<Message>, ApiError> {
    let mut tx = state.pool.begin_with(BEGIN_IMMEDIATE).await?;
    let message = RelationManager::new(&mut tx)
        .enroll_customer_to_show(customer_id, show_id)
        .await?;
    tx.commit().await?;
    Ok(Json(message))
}

/// DELETE /shows/{show_id}/customers/{customer_id}
async fn remove_customer_from_show(
    State(state): State<AppState>,
    Path((show_id, customer_id)): Path<(i64, i64)>,
) -> Result<Json<Message>, ApiError> {
    let mut tx = state.pool.begin_with(BEGIN_IMMEDIATE).await?;
    let message = RelationManager::new(&mut tx)
        .remove_customer_from_show(customer_id, show_id)
        .await?;
    tx.commit().await?;
    Ok(Json(message))
}

/// POST /avanues/{avanue_id}/shows/{show_id} - Host a show at a venue.
async fn enroll_show_to_avanue(
    State(state): State<AppState>,
    Path((avanue_id, show_id)): Path<(i64, i64)>,
) -> Result<Json<Message>, ApiError> {
    let mut tx = state.pool.begin_with(BEGIN_IMMEDIATE).await?;
    let message = RelationManager::new(&mut tx)
        .enroll_show_to_avanue(show_id, avanue_id)
        .await?;
    tx.commit().await?;
    Ok(Json(message))
}

/// DELETE /avanues/{avanue_id}/shows/{show_id}
async fn delete_show_from_avanue(
    State(state): State<AppState>,
    Path((avanue_id, show_id)): Path<(i64, i64)>,
) -> Result<Json<Message>, ApiError> {
    let mut tx = state.pool.begin_with(BEGIN_IMMEDIATE).await?;
    let message = RelationManager::new(&mut tx)
        .delete_show_from_avanue(show_id, avanue_id)
        .await?;
    tx.commit().await?;
    Ok(Json(message))
}
