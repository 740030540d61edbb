// src/services/chat.rs
use super::provider::{ChatProvider, ProviderError};
use super::session_manager::SessionHandle;

/// Send one question through a conversation.
///
/// The session stays locked for the whole round trip, so two requests on
/// the same conversation never interleave. History only grows when the
/// provider actually answered with text.
pub async fn send_message(
    provider: &dyn ChatProvider,
    session: &SessionHandle,
    question: &str,
) -> Result<Option<String>, ProviderError> {
    let mut session = session.lock().await;

    tracing::info!(session_id = %session.id, question, "sending message");
    let reply = provider.send_message(&session.history, question).await?;
    tracing::debug!(session_id = %session.id, reply = ?reply.text, "received response");

    if let Some(text) = &reply.text {
        session.record_exchange(question, text.clone());
    }
    Ok(reply.text)
}
