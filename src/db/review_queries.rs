use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Review, ReviewInput};

const REVIEW_COLUMNS: &str = "id, date, open, high, low, close, created_at";

pub async fn insert(pool: &PgPool, input: &ReviewInput) -> Result<Review, sqlx::Error> {
    sqlx::query_as::<_, Review>(&format!(
        "INSERT INTO reviews (id, date, open, high, low, close)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {REVIEW_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(input.date)
    .bind(input.open)
    .bind(input.high)
    .bind(input.low)
    .bind(input.close)
    .fetch_one(pool)
    .await
}

pub async fn fetch_page(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>(&format!(
        "SELECT {REVIEW_COLUMNS}
         FROM reviews
         ORDER BY date DESC
         LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews")
        .fetch_one(pool)
        .await
}

pub async fn fetch_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>(&format!(
        "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_by_date(
    pool: &PgPool,
    date: NaiveDate,
) -> Result<Option<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>(&format!(
        "SELECT {REVIEW_COLUMNS} FROM reviews WHERE date = $1"
    ))
    .bind(date)
    .fetch_optional(pool)
    .await
}

/// Full-replace update. Returns None when the id does not exist.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    input: &ReviewInput,
) -> Result<Option<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>(&format!(
        "UPDATE reviews
         SET date = $2, open = $3, high = $4, low = $5, close = $6
         WHERE id = $1
         RETURNING {REVIEW_COLUMNS}"
    ))
    .bind(id)
    .bind(input.date)
    .bind(input.open)
    .bind(input.high)
    .bind(input.low)
    .bind(input.close)
    .fetch_optional(pool)
    .await
}

/// Physical delete. Returns the number of rows removed (0 or 1).
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
