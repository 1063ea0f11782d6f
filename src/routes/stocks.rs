use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Review, ReviewInput, ReviewPage};
use crate::services::review_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_review))
        .route("/", get(list_reviews))
        .route("/:id", put(update_review))
        .route("/:id", delete(delete_review))
}

#[derive(Debug, Deserialize)]
struct PaginationParams {
    page: Option<i64>,
    limit: Option<i64>,
}

async fn create_review(
    State(state): State<AppState>,
    Json(input): Json<ReviewInput>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    info!("POST /api/stocks - Creating review for {}", input.date);
    let review = review_service::create_review(&state.pool, &input)
        .await
        .map_err(|e| {
            error!("Failed to create review for {}: {}", input.date, e);
            e
        })?;
    Ok((StatusCode::CREATED, Json(review)))
}

async fn list_reviews(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ReviewPage>, AppError> {
    info!(
        "GET /api/stocks - Listing reviews (page={:?}, limit={:?})",
        params.page, params.limit
    );
    let page = review_service::list_reviews(&state.pool, params.page, params.limit)
        .await
        .map_err(|e| {
            error!("Failed to list reviews: {}", e);
            e
        })?;
    Ok(Json(page))
}

async fn update_review(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(input): Json<ReviewInput>,
) -> Result<Json<Review>, AppError> {
    info!("PUT /api/stocks/{} - Updating review", id);
    let review = review_service::update_review(&state.pool, id, &input)
        .await
        .map_err(|e| {
            error!("Failed to update review {}: {}", id, e);
            e
        })?;
    Ok(Json(review))
}

async fn delete_review(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    info!("DELETE /api/stocks/{} - Deleting review", id);
    review_service::delete_review(&state.pool, id)
        .await
        .map_err(|e| {
            error!("Failed to delete review {}: {}", id, e);
            e
        })?;
    Ok(StatusCode::NO_CONTENT)
}
