mod api;
mod cleanup_task;
mod game_session_manager;
mod pages;
mod server_config;
mod web_server;

use std::path::PathBuf;

use clap::Parser;
use common::config::ConfigManager;
use common::{log, logger};

use cleanup_task::CleanupTask;
use game_session_manager::{GameSessionManager, SessionSettings};
use server_config::{ServerConfig, DEFAULT_CONFIG_PATH};
use web_server::build_router;

#[derive(Parser)]
#[command(name = "snake_server", about = "Grid snake game server with a JSON API")]
struct Args {
    /// YAML config file; defaults are used when it does not exist
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Overrides `bind_address` from the config file
    #[arg(long)]
    bind: Option<String>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Writes the default config to `--config` and exits
    #[arg(long)]
    write_default_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager: ConfigManager<_, ServerConfig> = ConfigManager::from_yaml_file(&args.config);

    if args.write_default_config {
        config_manager.set_config(&ServerConfig::default())?;
        log!("Default config written to {}", args.config.display());
        return Ok(());
    }

    let mut config = config_manager.get_config()?;
    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }

    let session_manager = GameSessionManager::new(SessionSettings {
        grid_width: config.grid_width,
        grid_height: config.grid_height,
        max_sessions: config.max_sessions,
    });

    let cleanup_task = CleanupTask::new(
        session_manager.clone(),
        config.cleanup_interval(),
        config.session_timeout(),
    );
    tokio::spawn(async move {
        cleanup_task.run().await;
    });

    let app = build_router(session_manager, config.static_files_path.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    log!(
        "Snake server listening on {} ({}x{} grid, static files from {})",
        config.bind_address,
        config.grid_width,
        config.grid_height,
        config.static_files_path.display()
    );

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        log!("Shutdown signal received");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    log!("Server shut down gracefully");

    Ok(())
}
