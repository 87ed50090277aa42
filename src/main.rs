use std::sync::Arc;

use rental_api::{
    config::Config,
    db::{create_pool, create_redis_client, run_migrations, Cache},
    repositories::PgStore,
    routes::{create_router, AppState},
    services::RecommendationEngine,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rental_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url, config.database_max_connections).await?;
    if config.run_migrations {
        run_migrations(&pool).await?;
    }

    let mut store = PgStore::new(pool);
    let mut cache_handle = None;
    if let Some(redis_url) = &config.redis_url {
        let (cache, handle) = Cache::new(create_redis_client(redis_url)?);
        store = store.with_layout_cache(cache, config.layout_cache_ttl);
        cache_handle = Some(handle);
        tracing::info!(ttl = config.layout_cache_ttl, "Layout caching enabled");
    }

    let engine = RecommendationEngine::with_store(Arc::new(store));
    let app = create_router(Arc::new(AppState::new(engine)));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(%address, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_handle {
        handle.shutdown().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
