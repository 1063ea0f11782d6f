use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Review, ReviewInput, ReviewPage};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("no review selected")]
    NoSelection,
}

/// Backend seam for the page controller. The HTTP implementation talks to the
/// canonical API; tests substitute an in-memory fake.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    async fn list_page(&self, page: i64, limit: i64) -> Result<ReviewPage, ClientError>;

    async fn create(&self, input: &ReviewInput) -> Result<Review, ClientError>;

    async fn update(&self, id: Uuid, input: &ReviewInput) -> Result<Review, ClientError>;

    async fn delete(&self, id: Uuid) -> Result<(), ClientError>;
}

pub struct HttpReviewApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpReviewApi {
    /// `base_url` is the server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, suffix: &str) -> String {
        format!("{}/api/stocks{}", self.base_url, suffix)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// Pulls the `{"error": ...}` message out of a non-success response.
async fn error_from_response(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();
    let message = match response.json::<ApiErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => "unexpected server response".to_string(),
    };
    ClientError::Status { status, message }
}

#[async_trait]
impl ReviewApi for HttpReviewApi {
    async fn list_page(&self, page: i64, limit: i64) -> Result<ReviewPage, ClientError> {
        let response = self
            .http
            .get(self.endpoint(""))
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(response.json::<ReviewPage>().await?)
    }

    async fn create(&self, input: &ReviewInput) -> Result<Review, ClientError> {
        let response = self
            .http
            .post(self.endpoint(""))
            .json(input)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(response.json::<Review>().await?)
    }

    async fn update(&self, id: Uuid, input: &ReviewInput) -> Result<Review, ClientError> {
        let response = self
            .http
            .put(self.endpoint(&format!("/{id}")))
            .json(input)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(response.json::<Review>().await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.endpoint(&format!("/{id}")))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }
}
