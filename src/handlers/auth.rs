use axum::{extract::State, http::HeaderMap, http::StatusCode, response::Json};
use chrono::{DateTime, Utc};
use model::entities::{session, user};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::{bearer_token, hash_password, verify_password};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for registering a new account
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SignupRequest {
    /// Display name
    pub name: String,
    /// Email address (must be unique)
    pub email: String,
    /// Password, at least 6 characters
    pub password: String,
}

/// Request body for signing in
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued on successful signup or login
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthSessionResponse {
    pub uid: String,
    pub email: String,
    pub name: String,
    /// Bearer token for subsequent requests
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// The signed-in user behind a valid token
#[derive(Debug, Serialize, ToSchema)]
pub struct IdentityResponse {
    pub uid: String,
    pub email: String,
    pub name: String,
}

impl From<user::Model> for IdentityResponse {
    fn from(model: user::Model) -> Self {
        Self {
            uid: model.uid,
            email: model.email,
            name: model.name,
        }
    }
}

/// Opens a session row for the user and signs a token bound to it.
async fn open_session(
    state: &AppState,
    uid: &str,
    name: &str,
) -> Result<(String, DateTime<Utc>), (StatusCode, Json<ErrorResponse>)> {
    let session_id = Uuid::new_v4().to_string();

    let (token, expires_at) = match state.auth.issue(uid, name, &session_id) {
        Ok(issued) => issued,
        Err(e) => {
            error!("Failed to sign token for user {}: {}", uid, e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to issue authentication token".to_string(),
                    code: "TOKEN_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    let new_session = session::ActiveModel {
        id: Set(session_id.clone()),
        user_id: Set(uid.to_string()),
        issued_at: Set(Utc::now()),
        expires_at: Set(expires_at),
        revoked: Set(false),
    };

    trace!("Inserting session {} for user {}", session_id, uid);
    match new_session.insert(&state.db).await {
        Ok(_) => Ok((token, expires_at)),
        Err(db_error) => {
            error!("Failed to persist session for user {}: {}", uid, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to open a session".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created successfully", body = ApiResponse<AuthSessionResponse>),
        (status = 400, description = "Password too weak", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthSessionResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering signup function");
    debug!("Registering account for email: {}", request.email);

    // Same rule the signup form enforces, counted in characters.
    if request.password.chars().count() < 6 {
        warn!("Rejecting signup with too short a password");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Password must be at least 6 characters".to_string(),
                code: "WEAK_PASSWORD".to_string(),
                success: false,
            }),
        ));
    }

    let email = request.email.trim().to_lowercase();

    let password_hash = match hash_password(&request.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash password: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to process credentials".to_string(),
                    code: "INTERNAL_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    let uid = Uuid::new_v4().to_string();
    let new_user = user::ActiveModel {
        uid: Set(uid.clone()),
        email: Set(email.clone()),
        name: Set(request.name.clone()),
        password_hash: Set(password_hash),
        created_at: Set(Utc::now()),
    };

    trace!("Attempting to insert new user into database");
    match new_user.insert(&state.db).await {
        Ok(user_model) => {
            info!(
                "Account created successfully with uid: {}, email: {}",
                user_model.uid, user_model.email
            );

            let (token, expires_at) = open_session(&state, &user_model.uid, &user_model.name).await?;
            let response = ApiResponse {
                data: AuthSessionResponse {
                    uid: user_model.uid,
                    email: user_model.email,
                    name: user_model.name,
                    token,
                    expires_at,
                },
                message: "Account created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create account for '{}': {}", email, db_error);

            // Handle specific database errors
            match db_error {
                DbErr::Exec(ref exec_err) => {
                    // Check for unique constraint violations
                    let error_msg = exec_err.to_string().to_lowercase();
                    if error_msg.contains("unique") || error_msg.contains("constraint") {
                        Err((
                            StatusCode::CONFLICT,
                            Json(ErrorResponse {
                                error: format!("Email '{}' is already registered", email),
                                code: "EMAIL_ALREADY_REGISTERED".to_string(),
                                success: false,
                            }),
                        ))
                    } else {
                        Err((
                            StatusCode::INTERNAL_SERVER_ERROR,
                            Json(ErrorResponse {
                                error: "Failed to create account due to database constraint".to_string(),
                                code: "DATABASE_CONSTRAINT_ERROR".to_string(),
                                success: false,
                            }),
                        ))
                    }
                }
                _ => Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Internal server error while creating account".to_string(),
                        code: "DATABASE_ERROR".to_string(),
                        success: false,
                    }),
                )),
            }
        }
    }
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in successfully", body = ApiResponse<AuthSessionResponse>),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthSessionResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering login function");
    let email = request.email.trim().to_lowercase();
    debug!("Login attempt for email: {}", email);

    // Unknown email and wrong password answer identically.
    let invalid_credentials = || {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Invalid email or password".to_string(),
                code: "INVALID_CREDENTIALS".to_string(),
                success: false,
            }),
        )
    };

    let user_model = match user::Entity::find()
        .filter(user::Column::Email.eq(&email))
        .one(&state.db)
        .await
    {
        Ok(Some(found)) => found,
        Ok(None) => {
            warn!("Login attempt for unknown email");
            return Err(invalid_credentials());
        }
        Err(db_error) => {
            error!("Failed to look up account '{}': {}", email, db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while signing in".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    if !verify_password(&request.password, &user_model.password_hash) {
        warn!("Login attempt with wrong password for uid: {}", user_model.uid);
        return Err(invalid_credentials());
    }

    let (token, expires_at) = open_session(&state, &user_model.uid, &user_model.name).await?;
    info!("User {} signed in successfully", user_model.uid);

    let response = ApiResponse {
        data: AuthSessionResponse {
            uid: user_model.uid,
            email: user_model.email,
            name: user_model.name,
            token,
            expires_at,
        },
        message: "Signed in successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Sign out, revoking the session behind the presented token
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Signed out successfully", body = ApiResponse<String>),
        (status = 401, description = "Missing or unverifiable token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[instrument(skip(state, headers))]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering logout function");

    // Deliberately not the AuthUser extractor: a second logout with an
    // already-revoked token must still answer 200.
    let Some(token) = bearer_token(&headers) else {
        warn!("Logout attempt without bearer token");
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Authentication required".to_string(),
                code: "MISSING_TOKEN".to_string(),
                success: false,
            }),
        ));
    };

    let claims = match state.auth.verify(token) {
        Ok(claims) => claims,
        Err(e) => {
            debug!("Logout attempt with unverifiable token: {}", e);
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Invalid authentication token".to_string(),
                    code: "INVALID_TOKEN".to_string(),
                    success: false,
                }),
            ));
        }
    };

    match session::Entity::find_by_id(&claims.sid).one(&state.db).await {
        Ok(Some(session_model)) if !session_model.revoked => {
            let mut session_active: session::ActiveModel = session_model.into();
            session_active.revoked = Set(true);

            if let Err(db_error) = session_active.update(&state.db).await {
                error!("Failed to revoke session {}: {}", claims.sid, db_error);
                return Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Failed to revoke session".to_string(),
                        code: "DATABASE_ERROR".to_string(),
                        success: false,
                    }),
                ));
            }
            info!("Session {} revoked for user {}", claims.sid, claims.sub);
        }
        Ok(Some(_)) => {
            debug!("Session {} was already revoked", claims.sid);
        }
        Ok(None) => {
            debug!("Logout for unknown session {}", claims.sid);
        }
        Err(db_error) => {
            error!("Failed to look up session {}: {}", claims.sid, db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to revoke session".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    }

    let response = ApiResponse {
        data: "Session revoked".to_string(),
        message: "Signed out successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Report the identity behind the presented token
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Identity retrieved successfully", body = ApiResponse<IdentityResponse>),
        (status = 401, description = "Missing, expired or revoked token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    user: crate::auth::AuthUser,
) -> Result<Json<ApiResponse<IdentityResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering me function for uid: {}", user.uid);

    match user::Entity::find_by_id(&user.uid).one(&state.db).await {
        Ok(Some(user_model)) => {
            debug!("Identity resolved for uid: {}", user_model.uid);
            let response = ApiResponse {
                data: IdentityResponse::from(user_model),
                message: "Identity retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            // Session outlived its account; treat the token as dead.
            warn!("Session {} points at a deleted user {}", user.session_id, user.uid);
            Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Session has been revoked".to_string(),
                    code: "SESSION_REVOKED".to_string(),
                    success: false,
                }),
            ))
        }
        Err(db_error) => {
            error!("Failed to load user {}: {}", user.uid, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while resolving identity".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}
