use crate::handlers::{
    auth::{login, logout, me, signup},
    health::health_check,
    prediction::{get_recent_activity, predict_production},
    profiles::{get_my_profile, set_my_role, upsert_my_profile},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Account lifecycle
        .route("/api/v1/auth/signup", post(signup))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/logout", post(logout))
        .route("/api/v1/auth/me", get(me))
        // Profile and role onboarding
        .route("/api/v1/profiles/me", get(get_my_profile))
        .route("/api/v1/profiles/me", put(upsert_my_profile))
        .route("/api/v1/profiles/me/role", post(set_my_role))
        // Forecasts
        .route("/api/v1/production/predict", post(predict_production))
        .route("/api/v1/activity", get(get_recent_activity))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
