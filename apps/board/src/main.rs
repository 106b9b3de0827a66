mod board;
mod config;
mod errors;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::board::ingest::FileSelection;
use crate::board::{Command, JobBoard};
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Board v{}", env!("CARGO_PKG_VERSION"));

    let board = seed_board(&config).await;

    let state = AppState::new(board, config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.bind_addr, config.port).parse()?;
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the starting board, ingesting `JOB_BOARD_SEED_FILE` when configured.
/// A bad seed file is logged and the board starts empty.
async fn seed_board(config: &Config) -> JobBoard {
    let mut board = JobBoard::new();

    let Some(path) = &config.seed_file else {
        return board;
    };

    let selection = FileSelection::from_path(path).await;
    match board.dispatch(Command::Ingest(selection)) {
        Ok(_) => info!(path = %path.display(), "Seed file loaded"),
        Err(e) => warn!(path = %path.display(), error = %e, "Seed file rejected; starting empty"),
    }

    board
}
