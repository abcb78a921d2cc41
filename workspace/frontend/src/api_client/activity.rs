use common::ActivityRecord;

use crate::api_client::{self, ApiError};

/// Fetch the caller's most recent predictions, newest first. The server
/// default of five rows is what the dashboard wants, so no limit is sent.
pub async fn get_recent_activity(token: &str) -> Result<Vec<ActivityRecord>, ApiError> {
    log::trace!("Fetching recent activity");
    let result = api_client::get("/activity", Some(token)).await;
    match &result {
        Ok(records) => log::info!("Fetched {} activity records", records.len()),
        Err(e) => log::error!("Failed to fetch recent activity: {}", e),
    }
    result
}
