//! HTTP-facing error type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog::CatalogError;
use recommender::RecommenderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// No live session under this id (never created, or evicted)
    #[error("Session {0} not found")]
    SessionNotFound(String),

    /// A form selection is not a member of its axis
    #[error("Invalid selection: {0}")]
    InvalidSelection(#[from] CatalogError),

    #[error(transparent)]
    Recommender(#[from] RecommenderError),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidSelection(_) => StatusCode::BAD_REQUEST,
            AppError::Recommender(RecommenderError::Untrained) => StatusCode::CONFLICT,
            AppError::Recommender(_) | AppError::Unexpected(_) => {
                tracing::error!("Internal Server Error: {:?}", self);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
                    .into_response();
            }
        };
        (status, self.to_string()).into_response()
    }
}
