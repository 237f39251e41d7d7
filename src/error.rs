use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Message returned to clients when the metadata API rejects a request
pub const UPSTREAM_ERROR_MESSAGE: &str = "Failed to fetch data from the metadata API.";

/// Message returned to clients for local or transport failures
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

/// Proxy-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Metadata API returned status {status} for {operation}")]
    Upstream { status: u16, operation: &'static str },

    #[error("HTTP client error: {0}")]
    HttpClient(reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Request URLs carry the API key in their query string, so they are stripped
/// before the error can be displayed or logged.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::HttpClient(err.without_url())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Upstream { status, .. } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                UPSTREAM_ERROR_MESSAGE.to_string(),
            ),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::HttpClient(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "Proxy request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
