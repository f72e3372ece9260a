//! Memory toggle handlers.

use crate::{
    AppState,
    memory::toggle_message,
    types::{
        AppError, ConversationsQuery, ConversationsResponse, MemoryClearResponse,
        MemoryStatusResponse, MemoryToggleRequest, MemoryToggleResponse, Result,
    },
    utils::time::iso_timestamp,
};
use axum::{
    Json,
    extract::{Query, State},
};

/// Turn memory on or off
#[utoipa::path(
    post,
    path = "/api/memory/toggle",
    request_body = MemoryToggleRequest,
    responses(
        (status = 200, description = "Memory toggled", body = MemoryToggleResponse),
        (status = 500, description = "Memory state could not be updated")
    ),
    tag = "memory"
)]
pub async fn toggle_memory(
    State(state): State<AppState>,
    Json(payload): Json<MemoryToggleRequest>,
) -> Result<Json<MemoryToggleResponse>> {
    state.memory.toggle(payload.enabled).map_err(|e| {
        tracing::error!(error = %e, "Memory toggle failed");
        AppError::Internal(format!("Failed to toggle memory: {e}"))
    })?;

    tracing::info!(
        user_id = payload.user_id_or_default(),
        enabled = payload.enabled,
        "Memory toggled"
    );

    Ok(Json(MemoryToggleResponse {
        status: "success".to_string(),
        enabled: payload.enabled,
        message: toggle_message(payload.enabled),
        timestamp: iso_timestamp(),
    }))
}

/// Current memory state
#[utoipa::path(
    get,
    path = "/api/memory/status",
    responses(
        (status = 200, description = "Memory status", body = MemoryStatusResponse)
    ),
    tag = "memory"
)]
pub async fn memory_status(State(state): State<AppState>) -> Json<MemoryStatusResponse> {
    let snapshot = state.memory.snapshot();
    let config = state.config_manager.config();

    Json(MemoryStatusResponse {
        enabled: snapshot.enabled,
        memory_size: snapshot.memory_size,
        last_updated: snapshot.last_updated_or_never(),
        retention_policy: config.memory.retention_policy.clone(),
    })
}

/// Forget all stored conversations
#[utoipa::path(
    post,
    path = "/api/memory/clear",
    responses(
        (status = 200, description = "Memory cleared", body = MemoryClearResponse)
    ),
    tag = "memory"
)]
pub async fn clear_memory(State(state): State<AppState>) -> Json<MemoryClearResponse> {
    state.memory.clear();
    tracing::info!("Memory cleared");

    Json(MemoryClearResponse {
        status: "success".to_string(),
        message: "Memory cleared successfully".to_string(),
        timestamp: iso_timestamp(),
    })
}

/// Most recent remembered conversations
#[utoipa::path(
    get,
    path = "/api/memory/conversations",
    params(ConversationsQuery),
    responses(
        (status = 200, description = "Recent conversations", body = ConversationsResponse)
    ),
    tag = "memory"
)]
pub async fn list_conversations(
    State(state): State<AppState>,
    Query(query): Query<ConversationsQuery>,
) -> Json<ConversationsResponse> {
    let limit = query.limit.unwrap_or_else(|| {
        let default = state.config_manager.config().memory.default_conversation_limit;
        i64::try_from(default).unwrap_or(i64::MAX)
    });
    let recent = state.memory.recent(limit);

    Json(ConversationsResponse {
        showing: recent.entries.len(),
        conversations: recent.entries,
        total: recent.total,
        memory_enabled: recent.enabled,
    })
}
