//! One-time role assignment after signup, with a login-time backfill
//! for accounts that never finished it.

pub mod role_modal;

pub use role_modal::RoleModal;

use common::UpsertProfileRequest;

use crate::api_client::{profile, ApiError};
use crate::session::Identity;

/// Decide whether the account still owes onboarding a role. A missing
/// profile is created on the spot; profiles are lazy, signup does not
/// write one.
pub async fn needs_role_assignment(token: &str, identity: &Identity) -> Result<bool, ApiError> {
    match profile::get_my_profile(token).await {
        Ok(profile) => Ok(profile.role.is_none()),
        Err(ApiError::RemoteService { status: 404 }) => {
            log::info!("No profile yet for uid {}, creating one", identity.uid);
            let created = profile::upsert_my_profile(
                token,
                &UpsertProfileRequest {
                    email: identity.email.clone(),
                    name: identity.name.clone(),
                },
            )
            .await?;
            Ok(created.role.is_none())
        }
        Err(err) => Err(err),
    }
}
