//! fitlog API server
//!
//! A thin HTTP backend for the fitlog fitness tracker. Profiles, diet
//! logs, and workout feedback are persisted to flat CSV table files;
//! diet/workout recommendations are proxied to an external ML service.
//!
//! # Configuration
//!
//! Environment variables:
//! - `FITLOG_PORT`: Port to listen on (default: 8080)
//! - `FITLOG_DATA_DIR`: Directory holding the table files
//!   (default: `<platform data dir>/fitlog`)
//! - `FITLOG_ML_URL`: Base URL of the recommendation service
//!   (default: `http://127.0.0.1:5001`)
//!
//! CLI flags override both the config file and the environment.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod models;
mod server;
mod store;

use config::Config;
use db::{DietRepository, FeedbackRepository, ProfileRepository};
use models::{DIET_COLUMNS, FEEDBACK_COLUMNS, PROFILE_COLUMNS};
use server::{AppState, RecommendClient};
use store::Table;

#[derive(Parser)]
#[command(name = "fitlog-server")]
#[command(version)]
#[command(about = "HTTP API server for the fitlog fitness tracker", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Directory holding the table files
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fitlog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config)?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    std::fs::create_dir_all(&config.data_dir)?;
    tracing::info!("Data directory: {}", config.data_dir.display());

    // Open every table up front: files are created (or their headers
    // verified) deterministically, and a schema mismatch aborts
    // startup instead of failing mid-request.
    let profiles = ProfileRepository::new(Table::open(
        config.data_dir.join("profile.csv"),
        PROFILE_COLUMNS,
    )?);
    let diets = DietRepository::new(Table::open(
        config.data_dir.join("diet_logs.csv"),
        DIET_COLUMNS,
    )?);
    let feedback = FeedbackRepository::new(Table::open(
        config.data_dir.join("feedback_logs.csv"),
        FEEDBACK_COLUMNS,
    )?);

    tracing::info!("Recommendation service: {}", config.ml_base_url);

    let state = AppState {
        profiles: Arc::new(profiles),
        diets: Arc::new(diets),
        feedback: Arc::new(feedback),
        recommender: Arc::new(RecommendClient::new(config.ml_base_url.clone())),
    };

    let app = server::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
