//! CLI module for JoeyAi
//!
//! Command-line parsing for the joeyai-server binary, using clap for
//! arguments and owo-colors for terminal output.

pub mod output;

use crate::utils::toml_config::JoeyConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// JoeyAi - demonstration assistant backend
///
/// Serves canned chat replies, an in-memory memory toggle and placeholder
/// system statistics over HTTP.
#[derive(Parser, Debug)]
#[command(
    name = "joeyai-server",
    version,
    about = "JoeyAi - demonstration assistant backend",
    after_help = "EXAMPLES:\n    \
                  joeyai-server                        # Start with joeyai.toml (or defaults)\n    \
                  joeyai-server --port 9000            # Override the listen port\n    \
                  joeyai-server config --validate      # Check the configuration file\n    \
                  joeyai-server --config my.toml config --full"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "joeyai.toml", global = true)]
    pub config: PathBuf,

    /// Listen address, overrides server.host
    #[arg(long, env = "JOEYAI_HOST", global = true)]
    pub host: Option<String>,

    /// Listen port, overrides server.port
    #[arg(long, env = "JOEYAI_PORT", global = true)]
    pub port: Option<u16>,

    /// Frontend directory, overrides frontend.dir
    #[arg(long, global = true)]
    pub frontend_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the effective configuration
    Config {
        /// Print the full configuration as TOML
        #[arg(short = 'f', long)]
        full: bool,

        /// Only validate the configuration file
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_overrides(&self, config: &mut JoeyConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dir) = &self.frontend_dir {
            config.frontend.dir = dir.clone();
        }
        if self.verbose {
            config.server.log_level = "debug".to_string();
        }
    }
}
