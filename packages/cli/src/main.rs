// ABOUTME: Stockroom server binary
// ABOUTME: Loads configuration, opens the database, and serves the HTTP API

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::Method;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stockroom_inventory::DbState;

mod config;
mod routes;

use config::Config;

/// Stockroom inventory service
#[derive(Parser, Debug)]
#[command(name = "stockroom", about = "Stockroom inventory service")]
#[command(version)]
struct Cli {
    /// Listen port (overrides STOCKROOM_API_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// SQLite database path (overrides STOCKROOM_DB_PATH)
    #[arg(long)]
    db_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(path) = cli.db_path {
        config.database_path = Some(path);
    }

    let db = DbState::init_with_path(config.database_path.clone()).await?;

    // Create CORS layer
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<axum::http::HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let app = routes::create_router(db)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Stockroom server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
