//! Token issuing, password hashing and the request extractors that gate
//! protected endpoints. Sessions are server-side rows; a JWT is only honored
//! while its session row exists and is not revoked.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap, StatusCode};
use axum::Json;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use model::entities::session;
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error, trace, warn};

use crate::schemas::{AppState, ErrorResponse};

/// JWT claims carried by every issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    /// Display name at issue time.
    pub name: String,
    /// Session row id, checked against revocation on every request.
    pub sid: String,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiry, seconds since epoch.
    pub exp: i64,
}

/// HS256 signing material plus the configured token lifetime.
pub struct AuthKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl fmt::Debug for AuthKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Key material stays out of logs.
        f.debug_struct("AuthKeys")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl AuthKeys {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Signs a token for the given user and session, returning it together
    /// with its expiry timestamp.
    pub fn issue(
        &self,
        uid: &str,
        name: &str,
        session_id: &str,
    ) -> Result<(String, DateTime<Utc>), jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: uid.to_string(),
            name: name.to_string(),
            sid: session_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        Ok((token, expires_at))
    }

    /// Verifies signature and expiry. Session revocation is checked
    /// separately because logout must accept already-revoked tokens.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// Hashes a password into an Argon2id PHC string.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};

    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2::Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Checks a password against a stored PHC string. An unparseable hash
/// counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    PasswordHash::new(hash)
        .map(|parsed| {
            argon2::Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Pulls the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// The verified caller of a protected endpoint.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub uid: String,
    pub name: String,
    pub session_id: String,
}

type AuthRejection = (StatusCode, Json<ErrorResponse>);

fn unauthorized(error: &str, code: &str) -> AuthRejection {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: error.to_string(),
            code: code.to_string(),
            success: false,
        }),
    )
}

/// Verifies the bearer token and its session row. Shared by [`AuthUser`]
/// and [`MaybeAuthUser`].
async fn authenticate(token: &str, state: &AppState) -> Result<AuthUser, AuthRejection> {
    trace!("Authenticating bearer token");

    let claims = match state.auth.verify(token) {
        Ok(claims) => claims,
        Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
            debug!("Rejecting expired token");
            return Err(unauthorized("Session has expired", "SESSION_EXPIRED"));
        }
        Err(e) => {
            debug!("Rejecting invalid token: {}", e);
            return Err(unauthorized("Invalid authentication token", "INVALID_TOKEN"));
        }
    };

    match session::Entity::find_by_id(&claims.sid).one(&state.db).await {
        Ok(Some(row)) if !row.revoked => {
            trace!("Session {} accepted for user {}", claims.sid, claims.sub);
            Ok(AuthUser {
                uid: claims.sub,
                name: claims.name,
                session_id: claims.sid,
            })
        }
        Ok(Some(_)) => {
            debug!("Rejecting revoked session {}", claims.sid);
            Err(unauthorized("Session has been revoked", "SESSION_REVOKED"))
        }
        Ok(None) => {
            warn!("Token carried unknown session id {}", claims.sid);
            Err(unauthorized("Session has been revoked", "SESSION_REVOKED"))
        }
        Err(e) => {
            error!("Failed to look up session {}: {}", claims.sid, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to verify session".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(&parts.headers) else {
            debug!("Rejecting request without bearer token");
            return Err(unauthorized("Authentication required", "MISSING_TOKEN"));
        };
        authenticate(token, state).await
    }
}

/// Optional authentication for endpoints that serve anonymous callers too.
/// No Authorization header yields `None`; a header that fails verification
/// is still an error rather than silent anonymity.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

#[axum::async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match bearer_token(&parts.headers) {
            None => Ok(MaybeAuthUser(None)),
            Some(token) => authenticate(token, state).await.map(|user| MaybeAuthUser(Some(user))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn keys() -> AuthKeys {
        AuthKeys::new(b"test-secret-key", Duration::hours(24))
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let keys = keys();
        let (token, expires_at) = keys.issue("user-1", "Amara", "sess-1").unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.name, "Amara");
        assert_eq!(claims.sid, "sess-1");
        assert_eq!(claims.exp, expires_at.timestamp());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        // Issue a token that expired two hours ago, beyond validation leeway.
        let stale = AuthKeys::new(b"test-secret-key", Duration::hours(-2));
        let (token, _) = stale.issue("user-1", "Amara", "sess-1").unwrap();

        let err = keys().verify(&token).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ExpiredSignature));
    }

    #[test]
    fn test_verify_rejects_foreign_signature() {
        let other = AuthKeys::new(b"a-different-secret", Duration::hours(24));
        let (token, _) = other.issue("user-1", "Amara", "sess-1").unwrap();

        assert!(keys().verify(&token).is_err());
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert_ne!(hash, "correct horse battery");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse battery", &hash));
        assert!(!verify_password("wrong password", &hash));
    }

    #[test]
    fn test_verify_password_tolerates_garbage_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));
        assert_eq!(bearer_token(&headers), None);
    }
}
