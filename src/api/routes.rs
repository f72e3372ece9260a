use crate::AppState;
use crate::api::{docs, handlers};
use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// Static asset folders under the frontend directory, each served at `/<name>`.
pub const STATIC_DIRS: [&str; 3] = ["styles", "scripts", "assets"];

/// Routes mounted under `/api`.
pub fn create_router() -> Router<AppState> {
    Router::new()
        // Chat
        .route("/chat", post(handlers::chat::chat))
        .route("/chat/history", get(handlers::chat::chat_history))
        // Memory
        .route("/memory/toggle", post(handlers::memory::toggle_memory))
        .route("/memory/status", get(handlers::memory::memory_status))
        .route("/memory/clear", post(handlers::memory::clear_memory))
        .route(
            "/memory/conversations",
            get(handlers::memory::list_conversations),
        )
        // System
        .route("/system/stats", get(handlers::system::system_stats))
        .route("/system/detailed", get(handlers::system::detailed_stats))
        .route("/system/health", get(handlers::system::system_health))
        // Docs
        .route("/openapi.json", get(docs::openapi_json))
}

/// The complete application: API, liveness, frontend files, CORS and tracing.
///
/// Frontend files are served from the directory configured when the app is
/// built; config reloads do not move them.
pub fn create_app(state: AppState) -> Router {
    let frontend_dir = state.config_manager.config().frontend.dir.clone();
    let index_page = frontend_dir.join("index.html");

    let mut app = Router::new()
        .route(
            "/",
            get(move || handlers::meta::index(index_page.clone())),
        )
        .route("/health", get(handlers::meta::health))
        .route("/api", get(handlers::meta::api_info))
        .nest("/api", create_router());

    for dir in STATIC_DIRS {
        app = app.nest_service(&format!("/{dir}"), ServeDir::new(frontend_dir.join(dir)));
    }

    #[cfg(feature = "swagger-ui")]
    {
        use utoipa::OpenApi;
        app = app.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        );
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    )
    .with_state(state)
}
