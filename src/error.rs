// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ChatResponse;

pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Only POST requests allowed";
pub const MISSING_QUESTION_MESSAGE: &str = "Missing \"question\" in request body";
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Request body too large";
pub const NO_TEXT_MESSAGE: &str = "Error: No text in response";
pub const INTERNAL_ERROR_MESSAGE: &str = "An error occurred while processing the chat message.";

/// Errors surfaced at the HTTP boundary. Every variant renders as
/// `{ "response": <message> }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("request body too large")]
    PayloadTooLarge,

    #[error("provider reply carried no text")]
    NoText,

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn missing_question() -> Self {
        AppError::BadRequest(MISSING_QUESTION_MESSAGE.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE.to_string())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                PAYLOAD_TOO_LARGE_MESSAGE.to_string(),
            ),
            AppError::NoText => (StatusCode::BAD_REQUEST, NO_TEXT_MESSAGE.to_string()),
            AppError::Internal(cause) => {
                tracing::error!(error = %cause, "error in AI chat function");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ChatResponse { response: message })).into_response()
    }
}
