use common::{ActivityRecord, PredictionResult};
use forecast::ProductionForecaster;
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::auth::AuthKeys;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Cache for expensive operations
    pub cache: Cache<String, CachedData>,
    /// JWT signing and verification keys
    pub auth: Arc<AuthKeys>,
    /// Fitted production models, parsed once at startup
    pub forecaster: Arc<ProductionForecaster>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Activity(Vec<ActivityRecord>),
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Registers the bearer token scheme referenced by protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::auth::signup,
        crate::handlers::auth::login,
        crate::handlers::auth::logout,
        crate::handlers::auth::me,
        crate::handlers::profiles::get_my_profile,
        crate::handlers::profiles::upsert_my_profile,
        crate::handlers::profiles::set_my_role,
        crate::handlers::prediction::predict_production,
        crate::handlers::prediction::get_recent_activity,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            crate::handlers::auth::SignupRequest,
            crate::handlers::auth::LoginRequest,
            crate::handlers::auth::AuthSessionResponse,
            crate::handlers::auth::IdentityResponse,
            crate::handlers::profiles::UpsertProfileRequest,
            crate::handlers::profiles::SetRoleRequest,
            crate::handlers::profiles::ProfileResponse,
            crate::handlers::prediction::PredictionRequest,
            PredictionResult,
            ActivityRecord,
            ApiResponse<String>,
            ApiResponse<crate::handlers::auth::AuthSessionResponse>,
            ApiResponse<crate::handlers::auth::IdentityResponse>,
            ApiResponse<crate::handlers::profiles::ProfileResponse>,
            ApiResponse<Vec<ActivityRecord>>,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Signup, login, logout and session introspection"),
        (name = "profiles", description = "Per-user profile and role onboarding"),
        (name = "prediction", description = "Paddy production forecasts and recent activity"),
    ),
    info(
        title = "AgriVerse API",
        description = "Sri Lankan paddy production forecast service - season-aware harvest and production predictions with per-user history",
        version = "0.1.0",
        contact(
            name = "AgriVerse Team",
            email = "contact@agriverse.lk"
        ),
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
