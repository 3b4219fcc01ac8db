use std::sync::Arc;
use std::time::Duration;

use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::MongoDocumentStore;
use database::{DocumentStore, TenantPath};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    let tenant = TenantPath::new(config.tenant_id.as_str())?;
    info!(
        tenant = %tenant,
        database = config.mongodb.database(),
        "Connecting to document store"
    );

    let store: Arc<dyn DocumentStore> =
        Arc::new(MongoDocumentStore::connect(&config.mongodb, tenant).await?);
    info!("Document store connection verified");

    let state = AppState {
        config,
        store: Arc::clone(&store),
    };

    // Build router with API routes
    let api_routes = api::routes(&state);

    // Create a router with OpenAPI docs
    let router = create_router::<openapi::ApiDoc>(api_routes, &state.config.cors)?;

    // Merge health endpoints
    let app = router.merge(health_router(state.config.app));

    info!("Starting Workshop API with production-ready shutdown (30s timeout)");

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing document store connections");
            store.close().await;
            info!("Document store closed");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Workshop API shutdown complete");
    Ok(())
}
