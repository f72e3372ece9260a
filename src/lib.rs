//! # JoeyAi - demonstration assistant backend
//!
//! A small HTTP server that behaves like an AI assistant without doing any
//! inference: chat replies come from a keyword rule list, the "memory" is a
//! flag held in process, and system statistics are placeholders apart from
//! uptime and the platform strings.
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use joeyai::{AppState, JoeyConfig, JoeyConfigManager};
//! use std::sync::Arc;
//!
//! let config_manager = Arc::new(JoeyConfigManager::from_config(JoeyConfig::default()));
//! let app = joeyai::api::routes::create_app(AppState::new(config_manager));
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//! axum::serve(listener, app).await?;
//! ```
//!
//! ## Modules
//!
//! - [`api`] - Route handlers, router assembly and the OpenAPI document
//! - [`assistant`] - Keyword reply rules and the injectable random source
//! - [`memory`] - The in-process memory toggle state
//! - [`system`] - Uptime and platform descriptors
//! - [`types`] - Request/response bodies and error handling
//! - [`utils`] - TOML configuration and time formatting

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Canned reply engine.
pub mod assistant;
/// Command line interface for the server binary.
pub mod cli;
/// Memory toggle state.
pub mod memory;
/// Uptime and platform information.
pub mod system;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration and time utilities.
pub mod utils;

pub use assistant::{Assistant, RandomSource, SeededRandom, ThreadRandom};
pub use memory::MemoryStore;
pub use system::PlatformInfo;
pub use types::{AppError, Result};
pub use utils::toml_config::{JoeyConfig, JoeyConfigManager};

use std::sync::Arc;
use std::time::SystemTime;

/// Product name reported by `/health` and `/api`.
pub const APP_NAME: &str = "JoeyAi";

/// API version reported by `/health` and `/api`.
pub const API_VERSION: &str = "1.0.0";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// TOML-based configuration with hot-reload support
    pub config_manager: Arc<JoeyConfigManager>,
    /// Memory toggle state, one per application instance
    pub memory: Arc<MemoryStore>,
    /// Keyword reply engine
    pub assistant: Arc<Assistant>,
    /// Source of reply choices, delays and confidence scores
    pub random: Arc<dyn RandomSource>,
    /// Host descriptors detected at startup
    pub platform: Arc<PlatformInfo>,
    /// Reference point for uptime
    pub started_at: SystemTime,
}

impl AppState {
    /// Build state from configuration. A configured `chat.seed` selects a
    /// [`SeededRandom`]; otherwise replies use [`ThreadRandom`].
    pub fn new(config_manager: Arc<JoeyConfigManager>) -> Self {
        let config = config_manager.config();

        let random: Arc<dyn RandomSource> = match config.chat.seed {
            Some(seed) => Arc::new(SeededRandom::new(seed)),
            None => Arc::new(ThreadRandom),
        };

        Self {
            memory: Arc::new(MemoryStore::new(config.memory.enabled_by_default)),
            assistant: Arc::new(Assistant::default()),
            random,
            platform: Arc::new(PlatformInfo::detect()),
            started_at: SystemTime::now(),
            config_manager,
        }
    }

    /// Replace the random source
    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    /// Replace the uptime reference point
    pub fn with_started_at(mut self, started_at: SystemTime) -> Self {
        self.started_at = started_at;
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config_manager", &self.config_manager)
            .field("memory", &self.memory)
            .field("platform", &self.platform)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}
