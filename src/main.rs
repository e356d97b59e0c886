//! Bitword - daily Bitcoin terminology word game.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use bitword::{AppState, GameRepository, router};
use clap::Parser;
use cli::{Cli, Command};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            host,
            port,
            db_path,
        } => run_server(host, port, db_path).await,
        Command::Seed { db_path } => run_seed(db_path),
    }
}

/// Run the HTTP game server
async fn run_server(host: String, port: u16, db_path: String) -> Result<()> {
    info!(%host, port, %db_path, "Starting bitword server");

    let repository = GameRepository::new(db_path)?;
    repository.apply_migrations()?;
    repository.ensure_seeded()?;

    let app = router(AppState::new(repository));

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    info!("Server ready at http://{}:{}/", host, port);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Apply migrations and seed the term catalog
fn run_seed(db_path: String) -> Result<()> {
    info!(%db_path, "Seeding database");

    let repository = GameRepository::new(db_path)?;
    repository.apply_migrations()?;
    repository.ensure_seeded()?;

    info!("Seed complete");
    Ok(())
}
