//! TOML-based configuration for JoeyAi
//!
//! Every section of `joeyai.toml` is optional; missing keys fall back to the
//! defaults below.
//!
//! # Hot Reloading
//!
//! Configuration changes are detected and applied at runtime. Handlers read
//! the current snapshot through [`JoeyConfigManager::config`] on every request.

use arc_swap::ArcSwap;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Upper bound on the simulated thinking delay.
pub const MAX_CHAT_DELAY_MS: u64 = 60_000;

/// Quiet period after a file event before the config is re-read.
const RELOAD_DEBOUNCE: Duration = Duration::from_millis(300);

/// Root configuration structure loaded from joeyai.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JoeyConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub frontend: FrontendConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub memory: MemoryConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// `tracing` filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

// ============= Frontend Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// Directory holding index.html and the styles/, scripts/ and assets/ folders
    #[serde(default = "default_frontend_dir")]
    pub dir: PathBuf,
}

fn default_frontend_dir() -> PathBuf {
    PathBuf::from("frontend")
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            dir: default_frontend_dir(),
        }
    }
}

// ============= Chat Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// How much of the request context is echoed back in the reply
    #[serde(default = "default_context_preview_chars")]
    pub context_preview_chars: usize,

    /// Pins the random source so replies and scores are reproducible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_min_delay_ms() -> u64 {
    100
}

fn default_max_delay_ms() -> u64 {
    500
}

fn default_context_preview_chars() -> usize {
    50
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            context_preview_chars: default_context_preview_chars(),
            seed: None,
        }
    }
}

impl ChatConfig {
    /// Delay bounds in seconds.
    pub fn delay_range_secs(&self) -> (f64, f64) {
        (
            self.min_delay_ms as f64 / 1000.0,
            self.max_delay_ms as f64 / 1000.0,
        )
    }
}

// ============= Memory Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_enabled_by_default")]
    pub enabled_by_default: bool,

    #[serde(default = "default_retention_policy")]
    pub retention_policy: String,

    #[serde(default = "default_conversation_limit")]
    pub default_conversation_limit: usize,
}

fn default_enabled_by_default() -> bool {
    true
}

fn default_retention_policy() -> String {
    "Session-based (demo mode)".to_string()
}

fn default_conversation_limit() -> usize {
    10
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            enabled_by_default: default_enabled_by_default(),
            retention_policy: default_retention_policy(),
            default_conversation_limit: default_conversation_limit(),
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Watch error: {0}")]
    WatchError(#[from] notify::Error),
}

impl JoeyConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: JoeyConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let chat = &self.chat;
        if chat.min_delay_ms > chat.max_delay_ms {
            return Err(ConfigError::ValidationError(format!(
                "chat.min_delay_ms ({}) must not exceed chat.max_delay_ms ({})",
                chat.min_delay_ms, chat.max_delay_ms
            )));
        }
        if chat.max_delay_ms > MAX_CHAT_DELAY_MS {
            return Err(ConfigError::ValidationError(format!(
                "chat.max_delay_ms ({}) must be at most {}",
                chat.max_delay_ms, MAX_CHAT_DELAY_MS
            )));
        }
        if chat.context_preview_chars == 0 {
            return Err(ConfigError::ValidationError(
                "chat.context_preview_chars must be greater than 0".to_string(),
            ));
        }
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.host must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Render the configuration back to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// ============= Hot Reloading Configuration Manager =============

/// Thread-safe configuration manager with hot reloading support
pub struct JoeyConfigManager {
    config: Arc<ArcSwap<JoeyConfig>>,
    config_path: Option<PathBuf>,
    watcher: RwLock<Option<RecommendedWatcher>>,
}

impl JoeyConfigManager {
    /// Create a configuration manager backed by a file on disk
    pub fn new<P: AsRef<Path>>(path: P, config: JoeyConfig) -> Result<Self, ConfigError> {
        // Absolute path for reliable file watching
        let path = path.as_ref();
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(ConfigError::ReadError)?
                .join(path)
        };

        Ok(Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            config_path: Some(path),
            watcher: RwLock::new(None),
        })
    }

    /// Create a config manager directly from a config, with no file behind it
    pub fn from_config(config: JoeyConfig) -> Self {
        Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            config_path: None,
            watcher: RwLock::new(None),
        }
    }

    /// Get the current configuration (lockless read)
    pub fn config(&self) -> Arc<JoeyConfig> {
        self.config.load_full()
    }

    /// Path of the backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Manually reload the configuration from disk
    pub fn reload(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.config_path else {
            return Ok(());
        };
        info!("Reloading configuration from {:?}", path);

        let new_config = JoeyConfig::load(path)?;
        self.config.store(Arc::new(new_config));

        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Start watching the backing file for changes
    pub fn start_watching(&self) -> Result<(), ConfigError> {
        let Some(config_path) = self.config_path.clone() else {
            warn!("No configuration file to watch");
            return Ok(());
        };

        let (tx, mut rx) = mpsc::unbounded_channel::<()>();
        let config_arc = Arc::clone(&self.config);

        let watched_file = config_path.clone();
        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            match res {
                Ok(event) => {
                    let touches_config = event
                        .paths
                        .iter()
                        .any(|p| p.file_name() == watched_file.file_name());
                    if touches_config && (event.kind.is_modify() || event.kind.is_create()) {
                        // Debounced in the receiver
                        let _ = tx.send(());
                    }
                }
                Err(e) => {
                    error!("Config watcher error: {:?}", e);
                }
            }
        })?;

        // The file may not exist yet, so watch its directory
        if let Some(parent) = config_path.parent() {
            watcher.watch(parent, RecursiveMode::NonRecursive)?;
        }

        *self.watcher.write() = Some(watcher);

        tokio::spawn(async move {
            // Ends once the watcher, and with it the sender, is dropped
            while rx.recv().await.is_some() {
                // Wait for the burst of saves to settle, then load the last one
                tokio::time::sleep(RELOAD_DEBOUNCE).await;
                while rx.try_recv().is_ok() {}

                match JoeyConfig::load(&config_path) {
                    Ok(new_config) => {
                        config_arc.store(Arc::new(new_config));
                        info!("Configuration hot-reloaded successfully");
                    }
                    Err(e) => {
                        warn!(
                            "Failed to hot-reload config: {}. Keeping previous config.",
                            e
                        );
                    }
                }
            }
        });

        info!("Configuration hot-reload watcher started");
        Ok(())
    }

    /// Whether a file watcher is active
    pub fn is_watching(&self) -> bool {
        self.watcher.read().is_some()
    }

    /// Stop watching for configuration changes
    pub fn stop_watching(&self) {
        *self.watcher.write() = None;
        info!("Configuration hot-reload watcher stopped");
    }
}

impl std::fmt::Debug for JoeyConfigManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JoeyConfigManager")
            .field("config_path", &self.config_path)
            .field("watching", &self.is_watching())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn create_test_config() -> String {
        r#"
[server]
host = "0.0.0.0"
port = 9000
log_level = "debug"
log_format = "json"

[frontend]
dir = "./web"

[chat]
min_delay_ms = 0
max_delay_ms = 10
context_preview_chars = 20
seed = 7

[memory]
enabled_by_default = false
retention_policy = "Forget everything"
default_conversation_limit = 5
"#
        .to_string()
    }

    #[test]
    fn test_parse_full_config() {
        let config = JoeyConfig::parse(&create_test_config()).expect("valid config");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.frontend.dir, PathBuf::from("./web"));
        assert_eq!(config.chat.seed, Some(7));
        assert_eq!(config.chat.context_preview_chars, 20);
        assert!(!config.memory.enabled_by_default);
        assert_eq!(config.memory.default_conversation_limit, 5);
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = JoeyConfig::parse("").expect("empty config is valid");

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.log_format, LogFormat::Pretty);
        assert_eq!(config.chat.min_delay_ms, 100);
        assert_eq!(config.chat.max_delay_ms, 500);
        assert_eq!(config.chat.context_preview_chars, 50);
        assert!(config.chat.seed.is_none());
        assert!(config.memory.enabled_by_default);
        assert_eq!(config.memory.retention_policy, "Session-based (demo mode)");
        assert_eq!(config.memory.default_conversation_limit, 10);
    }

    #[test]
    fn test_delay_range_secs() {
        let chat = ChatConfig::default();
        assert_eq!(chat.delay_range_secs(), (0.1, 0.5));
    }

    #[test]
    fn test_inverted_delay_range_rejected() {
        let result = JoeyConfig::parse("[chat]\nmin_delay_ms = 600\nmax_delay_ms = 100\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_excessive_delay_rejected() {
        let result = JoeyConfig::parse("[chat]\nmax_delay_ms = 120000\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_zero_context_preview_rejected() {
        let result = JoeyConfig::parse("[chat]\ncontext_preview_chars = 0\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let result = JoeyConfig::parse("[server]\nlog_format = \"xml\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = JoeyConfig::load("/nonexistent/joeyai.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_from_file_and_reload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", create_test_config()).unwrap();

        let config = JoeyConfig::load(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);

        let manager = JoeyConfigManager::new(file.path(), config).unwrap();
        assert_eq!(manager.config().chat.seed, Some(7));

        fs::write(file.path(), "[server]\nport = 9100\n").unwrap();
        manager.reload().unwrap();
        assert_eq!(manager.config().server.port, 9100);
        assert!(manager.config().chat.seed.is_none());
    }

    #[test]
    fn test_reload_keeps_previous_config_on_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "[server]\nport = 9200\n").unwrap();

        let manager =
            JoeyConfigManager::new(file.path(), JoeyConfig::load(file.path()).unwrap()).unwrap();

        fs::write(file.path(), "[chat]\nmin_delay_ms = 9\nmax_delay_ms = 1\n").unwrap();
        assert!(manager.reload().is_err());
        assert_eq!(manager.config().server.port, 9200);
    }

    #[test]
    fn test_from_config_reload_is_noop() {
        let manager = JoeyConfigManager::from_config(JoeyConfig::default());
        assert!(manager.path().is_none());
        manager.reload().unwrap();
        assert_eq!(manager.config().server.port, 8000);
    }

    async fn wait_for_port(manager: &JoeyConfigManager, port: u16) -> bool {
        for _ in 0..40 {
            if manager.config().server.port == port {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        false
    }

    #[tokio::test]
    async fn test_watcher_applies_last_of_rapid_saves() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("joeyai.toml");
        fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let manager = JoeyConfigManager::new(&path, JoeyConfig::load(&path).unwrap()).unwrap();
        manager.start_watching().unwrap();
        assert!(manager.is_watching());
        tokio::time::sleep(Duration::from_millis(200)).await;

        fs::write(&path, "[server]\nport = 9001\n").unwrap();
        tokio::time::sleep(Duration::from_millis(250)).await;
        fs::write(&path, "[server]\nport = 9002\n").unwrap();

        assert!(wait_for_port(&manager, 9002).await, "second save never applied");

        // Later events from the same saves must not roll it back
        tokio::time::sleep(Duration::from_millis(800)).await;
        assert_eq!(manager.config().server.port, 9002);
        manager.stop_watching();
    }

    #[tokio::test]
    async fn test_watcher_keeps_config_on_invalid_save() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("joeyai.toml");
        fs::write(&path, "[server]\nport = 9300\n").unwrap();

        let manager = JoeyConfigManager::new(&path, JoeyConfig::load(&path).unwrap()).unwrap();
        manager.start_watching().unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        fs::write(&path, "[chat]\nmin_delay_ms = 9\nmax_delay_ms = 1\n").unwrap();
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(manager.config().server.port, 9300);
        manager.stop_watching();
    }

    #[tokio::test]
    async fn test_stop_watching_ignores_later_saves() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("joeyai.toml");
        fs::write(&path, "[server]\nport = 9400\n").unwrap();

        let manager = JoeyConfigManager::new(&path, JoeyConfig::load(&path).unwrap()).unwrap();
        manager.start_watching().unwrap();
        manager.stop_watching();
        assert!(!manager.is_watching());

        fs::write(&path, "[server]\nport = 9401\n").unwrap();
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(manager.config().server.port, 9400);
    }

    #[test]
    fn test_from_config_has_nothing_to_watch() {
        let manager = JoeyConfigManager::from_config(JoeyConfig::default());
        assert!(!manager.is_watching());
    }

    #[test]
    fn test_round_trip_to_toml() {
        let config = JoeyConfig::parse(&create_test_config()).unwrap();
        let rendered = config.to_toml().unwrap();
        let reparsed = JoeyConfig::parse(&rendered).unwrap();
        assert_eq!(reparsed.server.port, 9000);
        assert_eq!(reparsed.memory.retention_policy, "Forget everything");
    }
}
