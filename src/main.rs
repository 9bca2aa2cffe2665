//! Blogful server. Reads `APP_ENV`, `DATABASE_URL`, `PORT` (and `.env`); without a
//! database URL it serves from the in-memory row store.

use blogful::{
    build_app, ensure_database_exists, ensure_tables, AppConfig, AppState, MemoryRowStore,
    PgRowStore, RowStore,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_directives())),
        )
        .init();

    let store: Arc<dyn RowStore> = match &config.database_url {
        Some(database_url) => {
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;
            ensure_tables(&pool).await?;
            Arc::new(PgRowStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using the in-memory row store");
            Arc::new(MemoryRowStore::new())
        }
    };

    let port = config.port;
    let mode = config.mode;
    let app = build_app(AppState::new(store, config));
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(?mode, "listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
