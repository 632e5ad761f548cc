// Dashboard API server entry point.
//
// Startup sequence:
// 1. Initialize tracing
// 2. Load config (copying defaults on first run)
// 3. Build the dataset from the configured source
// 4. Serve the API until Ctrl+C

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use diamond_core::config;
use diamond_server::dataset::Dataset;
use diamond_server::{build_router, AppState};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "diamond-server", about = "Serve league stats over HTTP")]
struct Args {
    /// Directory holding config/ and defaults/
    #[arg(long, default_value = ".")]
    config: PathBuf,

    /// Overrides `server.port`
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let args = Args::parse();
    info!("diamond-server v{} starting up", env!("CARGO_PKG_VERSION"));

    let config = config::load_config_at(&args.config).context("failed to load configuration")?;
    info!(
        "Config loaded: team={}, season={}, source={:?}",
        config.team.name, config.team.season, config.server.source
    );

    let dataset = Dataset::from_config(&config, &args.config)
        .await
        .context("failed to build dataset")?;

    let state = AppState::new(dataset, config.leaders.clone());
    let app = build_router(state);

    let port = args.port.unwrap_or(config.server.port);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("diamond-server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl+C: {}", e);
    }
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("diamond_server=info,tower_http=info,warn")),
        )
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
