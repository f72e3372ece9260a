//! Colored terminal output for the JoeyAi CLI.

use crate::utils::toml_config::{JoeyConfig, LogFormat};
use owo_colors::OwoColorize;

/// Output style configuration
#[derive(Debug, Clone, Copy)]
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self { colored: true }
    }

    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the startup banner
    pub fn banner(&self) {
        let art = r#"
      _                   _    _
     | | ___   ___ _   _ / \  (_)
  _  | |/ _ \ / _ \ | | / _ \ | |
 | |_| | (_) |  __/ |_| / ___ \| |
  \___/ \___/ \___|\__, /_/   \_\_|
                   |___/"#;
        let tagline = format!(
            "   Demonstration assistant backend v{}",
            env!("CARGO_PKG_VERSION")
        );

        if self.colored {
            println!("{}", art.bright_magenta().bold());
            println!("{}\n", tagline.bright_white());
        } else {
            println!("{}", art);
            println!("{}\n", tagline);
        }
    }

    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Print the effective configuration, one section per header
    pub fn config_summary(&self, config: &JoeyConfig) {
        self.header("Server");
        self.kv("address", &config.bind_addr());
        self.kv("log level", &config.server.log_level);
        self.kv(
            "log format",
            match config.server.log_format {
                LogFormat::Pretty => "pretty",
                LogFormat::Json => "json",
            },
        );

        self.header("Frontend");
        self.kv("directory", &config.frontend.dir.display().to_string());

        self.header("Chat");
        self.kv(
            "thinking delay",
            &format!(
                "{}-{} ms",
                config.chat.min_delay_ms, config.chat.max_delay_ms
            ),
        );
        self.kv(
            "context preview",
            &format!("{} chars", config.chat.context_preview_chars),
        );
        self.kv(
            "random seed",
            &config
                .chat
                .seed
                .map(|s| s.to_string())
                .unwrap_or_else(|| "none (OS entropy)".to_string()),
        );

        self.header("Memory");
        self.kv("enabled at start", &config.memory.enabled_by_default.to_string());
        self.kv("retention policy", &config.memory.retention_policy);
        self.kv(
            "conversation limit",
            &config.memory.default_conversation_limit.to_string(),
        );
    }

    pub fn newline(&self) {
        println!();
    }
}
