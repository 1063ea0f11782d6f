use sqlx::PgPool;
use tracing::error;
use uuid::Uuid;

use crate::db::review_queries;
use crate::errors::{is_unique_violation, AppError};
use crate::models::{PageMeta, Review, ReviewInput, ReviewPage};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 100;

/// Finiteness check on the four prices. Presence and numeric type are already
/// guaranteed by deserialization; NaN/infinity can still arrive through
/// non-JSON callers of this layer.
pub fn validate_input(input: &ReviewInput) -> Result<(), AppError> {
    let prices = [
        ("open", input.open),
        ("high", input.high),
        ("low", input.low),
        ("close", input.close),
    ];
    for (name, value) in prices {
        if !value.is_finite() {
            return Err(AppError::Validation(format!(
                "{name} must be a finite number"
            )));
        }
    }
    Ok(())
}

pub async fn create_review(pool: &PgPool, input: &ReviewInput) -> Result<Review, AppError> {
    validate_input(input)?;

    // Friendly pre-check; the UNIQUE constraint on date is the authoritative
    // guard against the concurrent-create race.
    if review_queries::fetch_by_date(pool, input.date).await?.is_some() {
        return Err(AppError::Validation(format!(
            "a review for {} already exists",
            input.date
        )));
    }

    review_queries::insert(pool, input).await.map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Validation(format!("a review for {} already exists", input.date))
        } else {
            error!("Failed to insert review for {}: {}", input.date, e);
            AppError::Db(e)
        }
    })
}

pub async fn list_reviews(
    pool: &PgPool,
    page: Option<i64>,
    limit: Option<i64>,
) -> Result<ReviewPage, AppError> {
    let (page, limit) = normalize_page_params(page, limit);
    let offset = page_offset(page, limit);

    let data = review_queries::fetch_page(pool, limit, offset).await?;
    let total = review_queries::count_all(pool).await?;

    Ok(ReviewPage {
        data,
        pagination: PageMeta { total, page, limit },
    })
}

pub async fn update_review(
    pool: &PgPool,
    id: Uuid,
    input: &ReviewInput,
) -> Result<Review, AppError> {
    validate_input(input)?;

    if review_queries::fetch_by_id(pool, id).await?.is_none() {
        return Err(AppError::NotFound(format!("review {id} not found")));
    }

    // Moving a review onto another review's date is a duplicate too.
    if let Some(existing) = review_queries::fetch_by_date(pool, input.date).await? {
        if existing.id != id {
            return Err(AppError::Validation(format!(
                "a review for {} already exists",
                input.date
            )));
        }
    }

    let updated = review_queries::update(pool, id, input).await.map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Validation(format!("a review for {} already exists", input.date))
        } else {
            error!("Failed to update review {}: {}", id, e);
            AppError::Db(e)
        }
    })?;

    updated.ok_or_else(|| AppError::NotFound(format!("review {id} not found")))
}

pub async fn delete_review(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let removed = review_queries::delete(pool, id).await?;
    if removed == 0 {
        return Err(AppError::NotFound(format!("review {id} not found")));
    }
    Ok(())
}

/// Defaults and lower-bound clamping for the list query parameters.
pub fn normalize_page_params(page: Option<i64>, limit: Option<i64>) -> (i64, i64) {
    let page = page.unwrap_or(DEFAULT_PAGE).max(1);
    let limit = limit.unwrap_or(DEFAULT_LIMIT).max(1);
    (page, limit)
}

/// Row offset for a page. Both values are caller-supplied, so the arithmetic
/// saturates instead of overflowing; a saturated offset is simply past the
/// last row and yields an empty page.
pub fn page_offset(page: i64, limit: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(limit)
}
