use anyhow::Context;
use clap::Parser;
use trivia_api::db::{establish_connection, run_migrations};
use trivia_api::settings::Settings;
use trivia_api::server::app::run_server;
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Overrides the configured SQLite database path
    #[clap(long)]
    db_path: Option<String>,
    /// Overrides the configured listen port
    #[clap(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load().context("Failed to load settings")?;
    init_tracing(&settings.log);
    if let Some(path) = cli.db_path {
        settings.database.path = path;
    }
    if let Some(port) = cli.port {
        settings.server.port = port;
    }

    let pool = establish_connection(&settings.database.path)
        .await
        .with_context(|| format!("Cannot open database {}", settings.database.path))?;

    tracing::info!("Running db migrations...");
    run_migrations(&pool).await?;

    run_server(pool, &settings.server.address()).await
}
