use application::CatalogApp;
use config::Config;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("api_server=debug,domain=debug,tower_http=debug")),
        )
        .init();

    info!("🚀 Starting Catalog API Server");

    // Load configuration from environment
    let config = Config::from_env(None)?;
    info!("💾 Using database: {}", config.database_url);

    let catalog_app = Arc::new(CatalogApp::new_with_config(&config)?);
    let app = api_server::router(catalog_app);

    let bind_address = config.api_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("🌐 API Server listening on http://{}", bind_address);
    info!("📖 API Documentation:");
    info!("   GET    /{{resource}}        - List user, item, orders");
    info!("   GET    /item?minPrice=&maxPrice= - Items within a price range");
    info!("   GET    /{{resource}}/:id    - Fetch one row");
    info!("   POST   /{{resource}}        - Create a row");
    info!("   PUT    /{{resource}}/:id    - Partial update (PATCH also accepted)");
    info!("   DELETE /{{resource}}/:id    - Delete a row");
    info!("   GET    /stats             - Market summary");
    info!("   GET    /health            - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Shutting down Catalog API Server");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
