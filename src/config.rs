use anyhow::{Context, Result};
use moka::future::Cache;
use sea_orm::Database;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::auth::AuthKeys;
use crate::schemas::AppState;

/// Fallback signing secret for local development only.
const DEV_JWT_SECRET: &str = "agriverse-dev-secret-change-me";

/// Initialize application configuration and state
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    // Connect to database
    tracing::info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;

    // Cache for the activity feed. Entries expire on their own; new
    // predictions also invalidate the owner's entry eagerly.
    let cache = Cache::builder()
        .max_capacity(1000)
        .time_to_live(Duration::from_secs(60)) // 1 minute
        .build();

    let auth = Arc::new(load_auth_keys()?);

    let forecaster =
        Arc::new(forecast::default_forecaster().context("Failed to load production models")?);

    Ok(AppState {
        db,
        cache,
        auth,
        forecaster,
    })
}

/// Build token signing keys from the environment.
pub fn load_auth_keys() -> Result<AuthKeys> {
    let secret = match std::env::var("AGRIVERSE_JWT_SECRET") {
        Ok(value) if !value.is_empty() => value,
        _ => {
            warn!("AGRIVERSE_JWT_SECRET is not set, using the built-in development secret");
            DEV_JWT_SECRET.to_string()
        }
    };

    let ttl_hours = match std::env::var("AGRIVERSE_TOKEN_TTL_HOURS") {
        Ok(value) => value
            .parse::<i64>()
            .context("AGRIVERSE_TOKEN_TTL_HOURS must be an integer number of hours")?,
        Err(_) => 24,
    };
    anyhow::ensure!(ttl_hours > 0, "AGRIVERSE_TOKEN_TTL_HOURS must be positive");

    Ok(AuthKeys::new(
        secret.as_bytes(),
        chrono::Duration::hours(ttl_hours),
    ))
}
