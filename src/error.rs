use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// A required piece of configuration (database target, upstream
    /// credential) is missing.
    #[error("{0}")]
    ConfigMissing(String),

    #[error("{0}")]
    Validation(String),

    /// An external lookup service answered with a non-success status.
    #[error("{message}")]
    UpstreamGateway { message: String, status: u16 },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// Transport-level failure talking to an external service.
    #[error("{0}")]
    Upstream(#[from] reqwest::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ConfigMissing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamGateway { .. } => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        error!("request failed: {}", self);

        // Gateway errors carry the upstream status alongside the message.
        let body = match &self {
            AppError::UpstreamGateway {
                status: upstream, ..
            } => json!({
                "error": self.to_string(),
                "status": upstream,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;
