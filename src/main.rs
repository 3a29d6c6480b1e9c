//! Bibliotek - Library Management CLI
//!
//! Interactive terminal front end for a library: account registration and
//! login for patrons and workers, catalog entry and loan records.

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bibliotek::{
    config::AppConfig,
    repository::Repository,
    services::Services,
    session::{Session, StdConsole},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("bibliotek={}", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Bibliotek v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    tracing::info!("Connected to database");

    // Apply the baseline schema
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository);

    let mut session = Session::new(StdConsole, services);
    session.run().await?;

    Ok(())
}
