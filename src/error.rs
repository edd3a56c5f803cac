use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::models::ChatResponse;

pub const NO_MESSAGE: &str = "No message provided.";

/// Errors that reach the HTTP layer. Everything else degrades to a
/// conversational 200 reply.
#[derive(Debug)]
pub enum AppError {
    /// Body was not the expected JSON shape.
    MalformedBody(String),
    /// `message` missing, null, empty or only whitespace.
    MissingMessage,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::MalformedBody(detail) = &self {
            warn!("Rejected chat request body: {}", detail);
        }

        // The chat UI reads the same shape for errors as for answers.
        (StatusCode::BAD_REQUEST, Json(ChatResponse::plain(NO_MESSAGE))).into_response()
    }
}

/// Result type for application handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_variants_are_bad_request() {
        let missing = AppError::MissingMessage.into_response();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

        let malformed = AppError::MalformedBody("expected value".to_string()).into_response();
        assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
    }
}
