use axum::{
    response::{IntoResponse, Response},
    Json,
    http::StatusCode,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

/// Failures of the parse service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to fetch page: {0}")]
    FetchError(String),

    #[error("Error parsing content: {0}")]
    ParseError(String),

    #[error("{0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::FetchError(_) => StatusCode::BAD_GATEWAY,
            AppError::ParseError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::FetchError(msg)
            | AppError::ParseError(msg)
            | AppError::InvalidUrl(msg)
            | AppError::ConfigError(msg) => msg,
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Failures seen by the front end when calling the parse service.
///
/// Transport errors, non-success statuses and unreadable bodies all collapse
/// into the same message; the cause is only logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to parse recipe")]
    ParseFailed,
}
