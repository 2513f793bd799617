use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::models::{Customer, CustomerAdd, CustomerDetail, CustomerUpdate, Message};
use crate::routes::error::ApiError;
use crate::services::CustomerService;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route(
            "/customers/{id}",
            get(get_customer)
                .patch(update_customer)
                .delete(delete_customer),
        )
}

/// GET /customers
async fn list_customers(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, ApiError> {
    let mut conn = state.pool.acquire().await?;
    let customers = CustomerService::new(&mut conn).list_customers().await?;
    Ok(Json(customers))
}

/// GET /customers/{id} - Customer with the shows they attend.
async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CustomerDetail>, ApiError> {
    let mut conn = state.pool.acquire().await?;
    let customer = CustomerService::new(&mut conn).get_customer(id).await?;
    Ok(Json(customer))
}

/// POST /customers
async fn create_customer(
    State(state): State<AppState>,
    Json(req): Json<CustomerAdd>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let mut tx = state.pool.begin().await?;
    let customer = CustomerService::new(&mut tx).enroll_customer(req).await?;
    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// PATCH /customers/{id}
async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<CustomerUpdate>,
) -> Result<Json<Customer>, ApiError> {
    let mut tx = state.pool.begin().await?;
    let customer = CustomerService::new(&mut tx)
        .update_customer(id, req)
        .await?;
    tx.commit().await?;
    Ok(Json(customer))
}

/// DELETE /customers/{id}
async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Message>, ApiError> {
    let mut tx = state.pool.begin().await?;
    let message = CustomerService::new(&mut tx).delete_customer(id).await?;
    tx.commit().await?;
    Ok(Json(message))
}
