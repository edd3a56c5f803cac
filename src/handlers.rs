use crate::app::AppState;
use crate::chat;
use crate::error::{AppError, AppResult};
use crate::models::{ChatRequest, ChatResponse, HealthResponse};
use axum::{
    extract::{Json, State, rejection::JsonRejection},
    response::Json as ResponseJson,
};
use tracing::{debug, info};

/// Health check handler
/// Returns the service status and health information
pub async fn health_check() -> AppResult<ResponseJson<HealthResponse>> {
    debug!("Health check endpoint called");

    let response = HealthResponse::ok();

    info!("Health check successful");
    Ok(ResponseJson(response))
}

/// Chat handler
/// Accepts `{"message": ...}` and answers with a sentence and a weather category
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<ResponseJson<ChatResponse>> {
    let Json(payload) = payload.map_err(|e| AppError::MalformedBody(e.body_text()))?;
    let message = payload.message().ok_or(AppError::MissingMessage)?;

    info!("Chat endpoint called with message: {}", message);

    let response = chat::answer(message, state.source.as_ref(), state.scan_mode).await;

    info!(
        "Answered with category {:?}: {}",
        response.weather_category, response.response
    );
    Ok(ResponseJson(response))
}
