//! Transport-layer types shared between backend and frontend: auth and
//! profile payloads, the prediction wire shapes and the domain enums they
//! carry. These structs mirror the backend handlers' request/response
//! payloads so the frontend can deserialize API responses without
//! duplicating shapes.

mod domain;

pub use domain::{District, Role, Season};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
/// Note: The backend has its own definition in agriverse/src/schemas.rs with
/// the same field names. We mirror it here for the frontend to reuse.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

/// Error response wrapper used by the backend (mirrors backend).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Machine-readable error code
    pub code: String,
    /// Always false
    pub success: bool,
}

// ===================== Auth =====================

/// Request body for registering a new account (mirrors backend).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for signing in (mirrors backend).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued on successful signup or login. The token goes into the
/// Authorization header of subsequent requests.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AuthSession {
    pub uid: String,
    pub email: String,
    pub name: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// The signed-in user as reported by `GET /auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct IdentityDto {
    pub uid: String,
    pub email: String,
    pub name: String,
}

// ===================== Profiles =====================

/// Create-if-absent payload for the caller's profile (mirrors backend).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UpsertProfileRequest {
    pub email: String,
    pub name: String,
}

/// One-shot role assignment payload (mirrors backend).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SetRoleRequest {
    pub role: Role,
}

/// Profile response model (mirrors backend ProfileResponse).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ProfileDto {
    pub uid: String,
    pub email: String,
    pub name: String,
    pub role: Option<Role>,
    pub role_set_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// ===================== Prediction =====================

/// Body of `POST /production/predict`. Season and district travel as raw
/// strings: the endpoint validates them, callers do not.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PredictionRequest {
    pub year: i32,
    pub season: String,
    pub district: String,
    /// Sown extent in hectares.
    pub sown_hect: f64,
    /// Prior-season yield for the district.
    pub previous_yield: f64,
    /// Prior-season total production for the district.
    pub previous_production: f64,
}

/// Forecast returned by the prediction endpoint. Served bare, without the
/// ApiResponse envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PredictionResult {
    /// Estimated harvested extent in hectares.
    pub predicted_harvested_extent: f64,
    /// Estimated total production in metric tons.
    pub predicted_total_production: f64,
}

/// One row of the recent-activity feed (mirrors backend).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ActivityRecord {
    pub id: i32,
    pub year: i32,
    pub season: String,
    pub district: String,
    pub predicted_production: f64,
    pub created_at: DateTime<Utc>,
}
