use crate::system::PlatformInfo;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ============= Chat Types =============

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// A missing key means enabled; an explicit `null` means not enabled.
    #[serde(default = "default_memory_enabled")]
    pub memory_enabled: Option<bool>,
}

fn default_memory_enabled() -> Option<bool> {
    Some(true)
}

impl ChatRequest {
    /// Context to echo back, if memory is on for this request and context is non-empty.
    pub fn remembered_context(&self) -> Option<&str> {
        if self.memory_enabled != Some(true) {
            return None;
        }
        self.context.as_deref().filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub reply: String,
    pub timestamp: String,
    /// Seconds spent "thinking", rounded to milliseconds
    pub processing_time: f64,
    pub confidence: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatHistoryResponse {
    pub history: Vec<ConversationEntry>,
    pub total_messages: usize,
    pub message: String,
}

/// One remembered exchange. Nothing records these yet, so every list of them is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConversationEntry {
    pub user_message: String,
    pub reply: String,
    pub timestamp: String,
}

// ============= Memory Types =============

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemoryToggleRequest {
    pub enabled: bool,
    #[serde(default = "default_user_id")]
    pub user_id: Option<String>,
}

/// User id assumed when a toggle request names none.
pub const DEFAULT_USER_ID: &str = "default";

fn default_user_id() -> Option<String> {
    Some(DEFAULT_USER_ID.to_string())
}

impl MemoryToggleRequest {
    /// The requesting user; a missing or `null` id both mean [`DEFAULT_USER_ID`].
    pub fn user_id_or_default(&self) -> &str {
        self.user_id.as_deref().unwrap_or(DEFAULT_USER_ID)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MemoryToggleResponse {
    pub status: String,
    pub enabled: bool,
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MemoryStatusResponse {
    pub enabled: bool,
    pub memory_size: usize,
    /// Timestamp of the last toggle or clear, or `"Never"`
    pub last_updated: String,
    pub retention_policy: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MemoryClearResponse {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConversationsQuery {
    /// Number of most recent entries to return. 0 returns all of them; a
    /// negative value skips that many of the oldest entries instead.
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConversationsResponse {
    pub conversations: Vec<ConversationEntry>,
    pub total: usize,
    pub memory_enabled: bool,
    pub showing: usize,
}

// ============= System Types =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SystemStats {
    pub cpu: String,
    pub ram: String,
    pub disk: String,
    pub uptime: String,
    pub platform: String,
    /// Toolchain the server was built with, under the field name existing clients read.
    #[serde(rename = "python_version")]
    pub runtime_version: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DetailedSystemStats {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub disk_percent: f64,
    pub uptime_seconds: f64,
    pub platform_info: PlatformInfo,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentScores {
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SystemHealth {
    pub status: String,
    pub health_score: f64,
    pub components: ComponentScores,
    pub recommendations: Vec<String>,
    pub timestamp: String,
}

// ============= Shell Types =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EndpointDirectory {
    pub chat: String,
    pub memory: String,
    pub system: String,
    pub health: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiInfo {
    pub name: String,
    pub version: String,
    pub endpoints: EndpointDirectory,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (axum::http::StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
