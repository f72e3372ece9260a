//! Configuration and time helpers.

/// Local-time formatting shared by every handler.
pub mod time;
/// TOML configuration with hot reload.
pub mod toml_config;
