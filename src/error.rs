use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

// Type alias for Result with our AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Failures that end a request with an error status.
///
/// Form posts never produce one of these: their failures become an error
/// flash and a redirect.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database unavailable: {0}")]
    DatabaseUnavailable(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::DatabaseUnavailable(e) => {
                tracing::warn!("Database unavailable: {}", e);
                (StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
            }
        };

        (status, error_message).into_response()
    }
}
