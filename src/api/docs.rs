//! OpenAPI document for every route.

use crate::api::handlers;
use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "JoeyAi API",
        version = "1.0.0",
        description = "Advanced AI Assistant Backend"
    ),
    paths(
        handlers::chat::chat,
        handlers::chat::chat_history,
        handlers::memory::toggle_memory,
        handlers::memory::memory_status,
        handlers::memory::clear_memory,
        handlers::memory::list_conversations,
        handlers::system::system_stats,
        handlers::system::detailed_stats,
        handlers::system::system_health,
        handlers::meta::health,
        handlers::meta::api_info,
    ),
    tags(
        (name = "chat", description = "Canned assistant replies"),
        (name = "memory", description = "Memory toggle state"),
        (name = "system", description = "Placeholder system statistics"),
        (name = "meta", description = "Liveness and endpoint directory")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/chat",
            "/api/chat/history",
            "/api/memory/toggle",
            "/api/memory/status",
            "/api/memory/clear",
            "/api/memory/conversations",
            "/api/system/stats",
            "/api/system/detailed",
            "/api/system/health",
            "/health",
            "/api",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_schemas_collected() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.expect("components").schemas;
        assert!(schemas.contains_key("ChatRequest"));
        assert!(schemas.contains_key("SystemStats"));
        assert!(schemas.contains_key("PlatformInfo"));
    }
}
