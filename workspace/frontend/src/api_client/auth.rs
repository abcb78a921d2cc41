use common::{AuthSession, IdentityDto, LoginRequest, SignupRequest};

use crate::api_client::{self, ApiError};

/// Register a new account. The returned session is already signed in.
pub async fn signup(request: &SignupRequest) -> Result<AuthSession, ApiError> {
    log::debug!("Signing up new account: {}", request.email);
    let result = api_client::post("/auth/signup", request, None).await;
    match &result {
        Ok(session) => {
            log::info!("Account created for {} (uid {})", session.email, session.uid)
        }
        Err(e) => log::error!("Signup failed for '{}': {}", request.email, e),
    }
    result
}

/// Exchange credentials for a bearer token.
pub async fn login(request: &LoginRequest) -> Result<AuthSession, ApiError> {
    log::debug!("Signing in: {}", request.email);
    let result = api_client::post("/auth/login", request, None).await;
    match &result {
        Ok(session) => log::info!("Signed in as {} (uid {})", session.email, session.uid),
        Err(e) => log::warn!("Sign-in failed for '{}': {}", request.email, e),
    }
    result
}

/// Revoke the server-side session behind the token.
pub async fn logout(token: &str) -> Result<String, ApiError> {
    log::trace!("Revoking server session");
    let result = api_client::post_empty("/auth/logout", Some(token)).await;
    match &result {
        Ok(_) => log::info!("Server session revoked"),
        Err(e) => log::warn!("Server-side sign-out failed: {}", e),
    }
    result
}

/// Ask the server who the token belongs to.
pub async fn me(token: &str) -> Result<IdentityDto, ApiError> {
    log::trace!("Validating stored session");
    let result = api_client::get("/auth/me", Some(token)).await;
    match &result {
        Ok(identity) => log::info!("Session belongs to {} (uid {})", identity.email, identity.uid),
        Err(e) => log::debug!("Session validation failed: {}", e),
    }
    result
}
