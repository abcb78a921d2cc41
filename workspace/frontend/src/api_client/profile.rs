use common::{ProfileDto, Role, SetRoleRequest, UpsertProfileRequest};

use crate::api_client::{self, ApiError};

/// Fetch the caller's profile. A missing profile surfaces as
/// `RemoteService { status: 404 }`; onboarding creates it then.
pub async fn get_my_profile(token: &str) -> Result<ProfileDto, ApiError> {
    log::trace!("Fetching own profile");
    let result = api_client::get("/profiles/me", Some(token)).await;
    match &result {
        Ok(profile) => log::info!(
            "Fetched profile for uid {} (role: {:?})",
            profile.uid,
            profile.role
        ),
        Err(e) => log::debug!("Profile fetch failed: {}", e),
    }
    result
}

/// Create the caller's profile if absent, otherwise refresh its contact
/// fields. Never touches the role.
pub async fn upsert_my_profile(
    token: &str,
    request: &UpsertProfileRequest,
) -> Result<ProfileDto, ApiError> {
    log::debug!("Upserting profile for {}", request.email);
    let result = api_client::put("/profiles/me", request, Some(token)).await;
    match &result {
        Ok(profile) => log::info!("Profile ready for uid {}", profile.uid),
        Err(e) => log::error!("Profile upsert failed: {}", e),
    }
    result
}

/// One-shot role assignment. The server answers 409 when a role is
/// already set.
pub async fn set_my_role(token: &str, role: Role) -> Result<ProfileDto, ApiError> {
    log::debug!("Assigning role: {}", role);
    let result = api_client::post("/profiles/me/role", &SetRoleRequest { role }, Some(token)).await;
    match &result {
        Ok(profile) => log::info!("Role {:?} assigned to uid {}", profile.role, profile.uid),
        Err(e) => log::error!("Role assignment failed: {}", e),
    }
    result
}
