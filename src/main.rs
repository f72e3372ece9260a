use anyhow::Context;
use joeyai::{
    AppState, JoeyConfig, JoeyConfigManager,
    api::routes::create_app,
    cli::{Cli, Commands, output::Output},
    utils::toml_config::{LogFormat, ServerConfig},
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    if let Some(Commands::Config { full, validate }) = &cli.command {
        return run_config_command(&cli, &output, *full, *validate);
    }

    let config_found = cli.config.exists();
    let mut config = if config_found {
        JoeyConfig::load(&cli.config)
            .with_context(|| format!("Failed to load {}", cli.config.display()))?
    } else {
        JoeyConfig::default()
    };
    cli.apply_overrides(&mut config);
    config.validate().context("Invalid configuration")?;

    init_tracing(&config.server);
    output.banner();

    let config_manager = if config_found {
        let manager = JoeyConfigManager::new(&cli.config, config.clone())?;
        if let Err(e) = manager.start_watching() {
            warn!("Config hot reload disabled: {}", e);
        }
        manager
    } else {
        warn!(
            "Config file {} not found, using defaults",
            cli.config.display()
        );
        JoeyConfigManager::from_config(config.clone())
    };
    let config_manager = Arc::new(config_manager);

    let state = AppState::new(Arc::clone(&config_manager));
    info!(
        platform = %state.platform.system,
        memory_enabled = state.memory.is_enabled(),
        "Application state ready"
    );

    let frontend_dir = &config.frontend.dir;
    if !frontend_dir.join("index.html").exists() {
        warn!(
            "No index.html under {}; the entry page will return 404",
            frontend_dir.display()
        );
    }

    let app = create_app(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    output.success(&format!("Listening on http://{}", addr));
    output.info(&format!("API directory at http://{}/api", addr));
    output.newline();
    info!(%addr, "JoeyAi server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if config_manager.is_watching() {
        config_manager.stop_watching();
    }
    info!("JoeyAi server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    match server.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn run_config_command(cli: &Cli, output: &Output, full: bool, validate: bool) -> anyhow::Result<()> {
    let mut config = if cli.config.exists() {
        match JoeyConfig::load(&cli.config) {
            Ok(config) => config,
            Err(e) => {
                output.error(&format!("{}: {}", cli.config.display(), e));
                return Err(e.into());
            }
        }
    } else {
        output.warning(&format!(
            "{} not found, showing defaults",
            cli.config.display()
        ));
        JoeyConfig::default()
    };
    cli.apply_overrides(&mut config);

    if validate {
        if let Err(e) = config.validate() {
            output.error(&e.to_string());
            return Err(e.into());
        }
        output.success("Configuration is valid");
        return Ok(());
    }

    if full {
        println!("{}", config.to_toml()?);
    } else {
        output.config_summary(&config);
        output.newline();
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
