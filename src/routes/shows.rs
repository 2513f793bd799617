use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::models::{Message, Show, ShowAdd, ShowDetail, ShowUpdate};
use crate::routes::error::ApiError;
use crate::services::ShowService;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shows", get(list_shows).post(create_show))
        .route(
            "/shows/{id}",
            get(get_show).patch(update_show).delete(delete_show),
        )
}

async fn list_shows(State(state): State<AppState>) -> Result<Json<Vec<Show>>, ApiError> {
    let mut conn = state.pool.acquire().await?;
    let shows = ShowService::new(&mut conn).list_shows().await?;
    Ok(Json(shows))
}

async fn get_show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ShowDetail>, ApiError> {
    let mut conn = state.pool.acquire().await?;
    let show = ShowService::new(&mut conn).get_show(id).await?;
    Ok(Json(show))
}

async fn create_show(
    State(state): State<AppState>,
    Json(req): Json<ShowAdd>,
) -> Result<(StatusCode, Json<Show>), ApiError> {
    let mut tx = state.pool.begin().await?;
    let show = ShowService::new(&mut tx).enroll_show(req).await?;
    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(show)))
}

async fn update_show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ShowUpdate>,
) -> Result<Json<Show>, ApiError> {
    let mut tx = state.pool.begin().await?;
    let show = ShowService::new(&mut tx).update_show(id, req).await?;
    tx.commit().await?;
    Ok(Json(show))
}

async fn delete_show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Message>, ApiError> {
    let mut tx = state.pool.begin().await?;
    let message = ShowService::new(&mut tx).delete_show(id).await?;
    tx.commit().await?;
    Ok(Json(message))
}
