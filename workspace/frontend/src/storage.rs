//! Persistence for the signed-in session. Only the uid and the bearer
//! token are stored; identity details are re-fetched on restore so a
//! stale snapshot can never outlive the server-side session.

use web_sys::Storage;

const UID_KEY: &str = "agriverse_uid";
const TOKEN_KEY: &str = "agriverse_token";

/// Credential pair persisted across page loads.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredCredentials {
    pub uid: String,
    pub token: String,
}

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Read the persisted credentials. Both keys must be present; a half
/// pair is treated as absent.
pub fn load_credentials() -> Option<StoredCredentials> {
    let storage = local_storage()?;
    let uid = storage.get_item(UID_KEY).ok().flatten()?;
    let token = storage.get_item(TOKEN_KEY).ok().flatten()?;
    if uid.is_empty() || token.is_empty() {
        return None;
    }
    Some(StoredCredentials { uid, token })
}

/// Persist the credentials. A missing or full storage area degrades to
/// an in-memory session; signing in must not fail over it.
pub fn save_credentials(uid: &str, token: &str) {
    let Some(storage) = local_storage() else {
        log::warn!("localStorage unavailable, session will not survive a reload");
        return;
    };
    if storage.set_item(UID_KEY, uid).is_err() || storage.set_item(TOKEN_KEY, token).is_err() {
        log::warn!("Failed to persist session credentials");
    }
}

/// Remove the persisted credentials.
pub fn clear_credentials() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(UID_KEY);
        let _ = storage.remove_item(TOKEN_KEY);
    }
}

/// The bearer token alone, for request helpers.
pub fn bearer_token() -> Option<String> {
    load_credentials().map(|credentials| credentials.token)
}
