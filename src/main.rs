use std::sync::Arc;

use anyhow::Context;
use movie_api::{AppState, config::Config, db, routes, store::MovieStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movie_api=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let db = db::connect(&config.database_url, config.db_max_connections, config.db_acquire_timeout)
        .await
        .with_context(|| format!("connecting to {}", config.database_url))?;

    let state = Arc::new(AppState { config: config.clone(), movies: Arc::new(MovieStore::new(db)) });

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
