use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, SESSION_HEADER},
    services::chat::send_message,
    state::SharedState,
};

/// `POST /api/response`: relay one question to the caller's conversation.
pub async fn response_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(AppError::PayloadTooLarge);
        }
        // An unparseable body has no question in it either.
        Err(_) => return Err(AppError::missing_question()),
    };
    let question = payload.question().ok_or_else(AppError::missing_question)?;

    let requested = headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok());
    let (session_id, session) = state.sessions.resolve(requested).await;

    let text = send_message(state.provider.as_ref(), &session, question)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or(AppError::NoText)?;
    state.sessions.keep(&session_id, &session).await;

    Ok((
        [(SESSION_HEADER, session_id)],
        Json(ChatResponse { response: text }),
    ))
}

/// Any method other than POST on the response endpoint.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
