use crate::{
    API_VERSION, APP_NAME,
    types::{ApiInfo, AppError, EndpointDirectory, HealthResponse, Result},
};
use axum::{Json, response::Html};
use std::path::PathBuf;

/// Process liveness
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    ),
    tag = "meta"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: format!("{APP_NAME} server is running"),
        version: API_VERSION.to_string(),
    })
}

/// Endpoint directory
#[utoipa::path(
    get,
    path = "/api",
    responses(
        (status = 200, description = "API information", body = ApiInfo)
    ),
    tag = "meta"
)]
pub async fn api_info() -> Json<ApiInfo> {
    Json(ApiInfo {
        name: format!("{APP_NAME} API"),
        version: API_VERSION.to_string(),
        endpoints: EndpointDirectory {
            chat: "/api/chat".to_string(),
            memory: "/api/memory/toggle".to_string(),
            system: "/api/system/stats".to_string(),
            health: "/health".to_string(),
        },
    })
}

/// Frontend entry page, read from disk on every request
pub async fn index(path: PathBuf) -> Result<Html<String>> {
    let page = tokio::fs::read_to_string(&path).await.map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "Entry page unavailable");
        AppError::NotFound("index.html".to_string())
    })?;

    Ok(Html(page))
}
