use anyhow::Context;
use car_registry_api::app::build_router;
use car_registry_api::config::{Config, RepositoryBackend};
use car_registry_api::constants::{API_NAME, DEFAULT_MAX_CONNECTIONS};
use car_registry_api::repository::{LocalCarRepository, PgCarRepository};
use car_registry_api::service::CarService;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Invalid configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "{} Starting Car Registry API server on port {}",
        API_NAME,
        config.server_port
    );

    let service = match config.repository_backend {
        RepositoryBackend::Postgres => {
            let options = config
                .pg_connect_options()
                .context("Invalid DATABASE_URL")?;

            let pool = PgPoolOptions::new()
                .max_connections(DEFAULT_MAX_CONNECTIONS)
                .connect_with(options)
                .await
                .context("Failed to connect to database")?;

            tracing::info!(
                "{} Connected to database (search_path={})",
                API_NAME,
                config.search_path()
            );

            let repository = PgCarRepository::new(pool);
            repository
                .ensure_schema(&config.database_schema)
                .await
                .context("Failed to prepare database schema")?;

            CarService::new(repository)
        }
        RepositoryBackend::Memory => {
            tracing::warn!("{} Using in-memory car store; data will not survive restarts", API_NAME);
            CarService::new(LocalCarRepository::new())
        }
    };

    let app = build_router(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("{} Server listening on {}", API_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("{} Server stopped", API_NAME);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("{} Failed to listen for shutdown signal: {}", API_NAME, e);
        std::future::pending::<()>().await;
    }
}
