use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Errors a pipeline stage can surface. Everything else degrades locally.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The generative service call itself failed. Never retried by the pipeline.
    #[error("generative service call failed: {0}")]
    ServiceFailure(#[from] LlmError),

    /// Skill selection found no usable object in the model output.
    #[error("malformed selection response: {0}")]
    MalformedSelectionResponse(String),
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Malformed LLM output: {0}")]
    MalformedLlmOutput(String),
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::ServiceFailure(e) => AppError::Llm(e.to_string()),
            PipelineError::MalformedSelectionResponse(msg) => AppError::MalformedLlmOutput(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::MalformedLlmOutput(msg) => {
                tracing::error!("Malformed LLM output: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MALFORMED_LLM_OUTPUT",
                    "The AI response could not be interpreted; try regenerating".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
