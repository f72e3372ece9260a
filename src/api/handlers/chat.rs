use crate::{
    AppState,
    types::{AppError, ChatHistoryResponse, ChatRequest, ChatResponse, Result},
    utils::time::{iso_timestamp, round_to},
};
use axum::{Json, extract::State};
use chrono::Local;
use std::time::Duration;
use tokio::time::Instant;

/// Chat with the assistant
///
/// Sleeps for a random "thinking" delay, then answers from the keyword rules.
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Chat response", body = ChatResponse),
        (status = 400, description = "Empty message")
    ),
    tag = "chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    if payload.message.trim().is_empty() {
        tracing::warn!("Rejected chat request with empty message");
        return Err(AppError::InvalidInput(
            "Message cannot be empty".to_string(),
        ));
    }

    let config = state.config_manager.config();
    let random = state.random.as_ref();

    let (min_delay, max_delay) = config.chat.delay_range_secs();
    let started = Instant::now();
    tokio::time::sleep(Duration::from_secs_f64(random.uniform(min_delay, max_delay))).await;
    let processing_time = started.elapsed().as_secs_f64();

    let reply = state.assistant.reply(
        &payload.message,
        payload.remembered_context(),
        config.chat.context_preview_chars,
        &Local::now(),
        random,
    );

    tracing::debug!(
        rule = reply.rule.unwrap_or("fallback"),
        processing_time,
        "Chat reply selected"
    );

    Ok(Json(ChatResponse {
        reply: reply.text,
        timestamp: iso_timestamp(),
        processing_time: round_to(processing_time, 3),
        confidence: state.assistant.confidence(random),
    }))
}

/// Recent chat history (not recorded yet, always empty)
#[utoipa::path(
    get,
    path = "/api/chat/history",
    responses(
        (status = 200, description = "Chat history placeholder", body = ChatHistoryResponse)
    ),
    tag = "chat"
)]
pub async fn chat_history() -> Json<ChatHistoryResponse> {
    Json(ChatHistoryResponse {
        history: Vec::new(),
        total_messages: 0,
        message: "Chat history feature coming soon!".to_string(),
    })
}
