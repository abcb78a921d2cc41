use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{debug, info, trace};

use crate::config::initialize_app_state_with_url;
use crate::router::create_router;

pub async fn serve(database_url: &str, bind_address: &str) -> Result<()> {
    trace!("Entering serve function");
    info!("AgriVerse service starting up");
    debug!("Database URL: {}", database_url);
    debug!("Bind address: {}", bind_address);

    let state = initialize_app_state_with_url(database_url)
        .await
        .context("Failed to initialize application state")?;
    debug!("Application state initialized successfully");

    let app = create_router(state);
    debug!("Router created successfully");

    let listener = TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("Failed to bind to address {}", bind_address))?;

    info!("AgriVerse API server running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    axum::serve(listener, app).await.context("Server error")?;

    info!("Server shutdown gracefully");
    Ok(())
}
