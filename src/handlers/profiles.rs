use axum::{extract::State, http::StatusCode, response::Json};
use chrono::{DateTime, Utc};
use common::Role;
use model::entities::profile;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

use crate::auth::AuthUser;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Create-if-absent payload for the caller's profile
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpsertProfileRequest {
    pub email: String,
    pub name: String,
}

/// One-shot role assignment payload
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SetRoleRequest {
    /// One of: farmer, researcher, officer, admin
    pub role: String,
}

/// Profile response model
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub uid: String,
    pub email: String,
    pub name: String,
    /// Unset until onboarding confirms a role
    pub role: Option<String>,
    pub role_set_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<profile::Model> for ProfileResponse {
    fn from(model: profile::Model) -> Self {
        Self {
            uid: model.uid,
            email: model.email,
            name: model.name,
            role: model.role,
            role_set_at: model.role_set_at,
            created_at: model.created_at,
        }
    }
}

fn database_error(context: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("Internal server error while {}", context),
            code: "DATABASE_ERROR".to_string(),
            success: false,
        }),
    )
}

fn profile_not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Profile does not exist for this account".to_string(),
            code: "PROFILE_NOT_FOUND".to_string(),
            success: false,
        }),
    )
}

/// Get the caller's profile
#[utoipa::path(
    get,
    path = "/api/v1/profiles/me",
    tag = "profiles",
    responses(
        (status = 200, description = "Profile retrieved successfully", body = ApiResponse<ProfileResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Profile not created yet", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[instrument(skip(state))]
pub async fn get_my_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<ProfileResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_my_profile function for uid: {}", user.uid);

    match profile::Entity::find_by_id(&user.uid).one(&state.db).await {
        Ok(Some(profile_model)) => {
            debug!("Profile found for uid: {}", user.uid);
            let response = ApiResponse {
                data: ProfileResponse::from(profile_model),
                message: "Profile retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            debug!("No profile yet for uid: {}", user.uid);
            Err(profile_not_found())
        }
        Err(db_error) => {
            error!("Failed to load profile for {}: {}", user.uid, db_error);
            Err(database_error("loading the profile"))
        }
    }
}

/// Create the caller's profile if it does not exist yet
#[utoipa::path(
    put,
    path = "/api/v1/profiles/me",
    tag = "profiles",
    request_body = UpsertProfileRequest,
    responses(
        (status = 200, description = "Profile created or refreshed", body = ApiResponse<ProfileResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[instrument(skip(state, request))]
pub async fn upsert_my_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<UpsertProfileRequest>,
) -> Result<Json<ApiResponse<ProfileResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering upsert_my_profile function for uid: {}", user.uid);

    let existing = match profile::Entity::find_by_id(&user.uid).one(&state.db).await {
        Ok(found) => found,
        Err(db_error) => {
            error!("Failed to look up profile for {}: {}", user.uid, db_error);
            return Err(database_error("saving the profile"));
        }
    };

    match existing {
        Some(profile_model) => {
            // Refresh contact fields only. Role and its timestamp belong to
            // the one-shot role endpoint.
            let mut profile_active: profile::ActiveModel = profile_model.into();
            profile_active.email = Set(request.email.clone());
            profile_active.name = Set(request.name.clone());

            match profile_active.update(&state.db).await {
                Ok(updated) => {
                    debug!("Profile refreshed for uid: {}", user.uid);
                    Ok(Json(ApiResponse {
                        data: ProfileResponse::from(updated),
                        message: "Profile updated successfully".to_string(),
                        success: true,
                    }))
                }
                Err(db_error) => {
                    error!("Failed to update profile for {}: {}", user.uid, db_error);
                    Err(database_error("saving the profile"))
                }
            }
        }
        None => {
            let new_profile = profile::ActiveModel {
                uid: Set(user.uid.clone()),
                email: Set(request.email.clone()),
                name: Set(request.name.clone()),
                role: Set(None),
                role_set_at: Set(None),
                created_at: Set(Utc::now()),
            };

            match new_profile.insert(&state.db).await {
                Ok(created) => {
                    info!("Profile created for uid: {}", user.uid);
                    Ok(Json(ApiResponse {
                        data: ProfileResponse::from(created),
                        message: "Profile created successfully".to_string(),
                        success: true,
                    }))
                }
                Err(db_error) => {
                    error!("Failed to create profile for {}: {}", user.uid, db_error);
                    Err(database_error("saving the profile"))
                }
            }
        }
    }
}

/// Assign the caller's role, once
#[utoipa::path(
    post,
    path = "/api/v1/profiles/me/role",
    tag = "profiles",
    request_body = SetRoleRequest,
    responses(
        (status = 200, description = "Role assigned successfully", body = ApiResponse<ProfileResponse>),
        (status = 400, description = "Unknown role", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Profile not created yet", body = ErrorResponse),
        (status = 409, description = "Role already set", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[instrument(skip(state))]
pub async fn set_my_role(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<SetRoleRequest>,
) -> Result<Json<ApiResponse<ProfileResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering set_my_role function for uid: {}", user.uid);
    debug!("Role assignment request: {}", request.role);

    let role = match Role::from_str(&request.role) {
        Ok(role) => role,
        Err(_) => {
            warn!("Rejecting unknown role '{}' for uid: {}", request.role, user.uid);
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!(
                        "Role '{}' is not one of: farmer, researcher, officer, admin",
                        request.role
                    ),
                    code: "INVALID_ROLE".to_string(),
                    success: false,
                }),
            ));
        }
    };

    // Conditional update so two concurrent confirmations cannot both win:
    // only the row with a NULL role is touched.
    let update_result = profile::Entity::update_many()
        .col_expr(profile::Column::Role, Expr::value(role.as_str()))
        .col_expr(profile::Column::RoleSetAt, Expr::value(Utc::now()))
        .filter(profile::Column::Uid.eq(&user.uid))
        .filter(profile::Column::Role.is_null())
        .exec(&state.db)
        .await;

    match update_result {
        Ok(result) if result.rows_affected == 1 => {
            info!("Role '{}' assigned to uid: {}", role.as_str(), user.uid);
        }
        Ok(_) => {
            // Nothing matched: either no profile row, or the role is taken.
            return match profile::Entity::find_by_id(&user.uid).one(&state.db).await {
                Ok(Some(profile_model)) => {
                    warn!(
                        "Role already set for uid: {} (currently '{}')",
                        user.uid,
                        profile_model.role.as_deref().unwrap_or_default()
                    );
                    Err((
                        StatusCode::CONFLICT,
                        Json(ErrorResponse {
                            error: "A role has already been set for this account".to_string(),
                            code: "ROLE_ALREADY_SET".to_string(),
                            success: false,
                        }),
                    ))
                }
                Ok(None) => {
                    debug!("Role assignment without a profile for uid: {}", user.uid);
                    Err(profile_not_found())
                }
                Err(db_error) => {
                    error!("Failed to inspect profile for {}: {}", user.uid, db_error);
                    Err(database_error("assigning the role"))
                }
            };
        }
        Err(db_error) => {
            error!("Failed to assign role for {}: {}", user.uid, db_error);
            return Err(database_error("assigning the role"));
        }
    }

    match profile::Entity::find_by_id(&user.uid).one(&state.db).await {
        Ok(Some(profile_model)) => Ok(Json(ApiResponse {
            data: ProfileResponse::from(profile_model),
            message: "Role assigned successfully".to_string(),
            success: true,
        })),
        Ok(None) => {
            error!("Profile vanished after role assignment for uid: {}", user.uid);
            Err(database_error("assigning the role"))
        }
        Err(db_error) => {
            error!("Failed to reload profile for {}: {}", user.uid, db_error);
            Err(database_error("assigning the role"))
        }
    }
}
