use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Errors surfaced to gateway clients. Every variant maps to exactly one
/// status code and a `{"error": "..."}` JSON body.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("query parameter is required")]
    MissingParameter,
    #[error("query parameter cannot be empty")]
    EmptyParameter,
    #[error("{0}")]
    InvalidCategory(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    RateLimited(String),
    #[error("{0}")]
    Unavailable(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_)
            | ApiError::MissingParameter
            | ApiError::EmptyParameter
            | ApiError::InvalidCategory(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match status.as_u16() {
            400..=499 => tracing::warn!(status = status.as_u16(), error = %self, "client error"),
            500..=599 => tracing::error!(status = status.as_u16(), error = %self, "upstream error"),
            _ => {}
        }

        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
