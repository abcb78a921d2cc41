//! HTTP client for the backend API. Requests that carry the `ApiResponse`
//! envelope go through the generic helpers here; the prediction endpoint
//! has its own client in [`prediction`] because its contract differs.

pub mod activity;
pub mod auth;
pub mod prediction;
pub mod profile;

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use common::{ApiResponse, ErrorResponse};

use crate::settings;

/// Client-side failure classification. `Display` is user-facing copy;
/// pages map variants to context-specific wording where needed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server refused the credentials or the bearer token.
    #[error("Your session is not valid. Please sign in again.")]
    Authentication,
    /// The server answered with a non-2xx status. Carries the status
    /// code only; the body is not part of this variant.
    #[error("The service could not complete the request (HTTP {status}).")]
    RemoteService { status: u16 },
    /// The request never produced a response (connection refused, DNS,
    /// CORS preflight rejection).
    #[error("Could not reach the server. Check your connection and try again.")]
    Network,
    /// A response arrived but its body did not match the expected shape.
    #[error("The server sent a response that could not be read.")]
    Decode,
}

pub(crate) fn api_base() -> String {
    settings::get_settings().api_base_url()
}

pub(crate) fn request_url(endpoint: &str) -> String {
    format!("{}{}", api_base(), endpoint)
}

/// Header value carried by an authenticated request. `None` means no
/// Authorization header at all, never an empty one.
fn bearer_header(token: Option<&str>) -> Option<String> {
    token.map(|token| format!("Bearer {token}"))
}

/// Attach the bearer token when one is given.
pub(crate) fn with_bearer(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match bearer_header(token) {
        Some(value) => builder.header("Authorization", &value),
        None => builder,
    }
}

/// Unwrap an enveloped response into its `data` field.
async fn into_data<T>(method: &str, endpoint: &str, response: Response) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de>,
{
    if response.status() == 401 {
        // The body often carries a machine code (SESSION_EXPIRED,
        // INVALID_CREDENTIALS, ...); it is worth a log line but callers
        // only see the classification.
        match response.json::<ErrorResponse>().await {
            Ok(err) => log::warn!(
                "{} {} - Authentication rejected: {} ({})",
                method,
                endpoint,
                err.error,
                err.code
            ),
            Err(_) => log::warn!("{} {} - Authentication rejected", method, endpoint),
        }
        return Err(ApiError::Authentication);
    }

    if !response.ok() {
        let status = response.status();
        match response.json::<ErrorResponse>().await {
            Ok(err) => log::error!(
                "{} {} - API error {}: {} ({})",
                method,
                endpoint,
                status,
                err.error,
                err.code
            ),
            Err(_) => log::error!("{} {} - HTTP error: {}", method, endpoint, status),
        }
        return Err(ApiError::RemoteService { status });
    }

    log::trace!("{} {} - Response received, parsing JSON", method, endpoint);
    let envelope: ApiResponse<T> = response.json().await.map_err(|e| {
        log::error!("{} {} - Failed to parse response: {}", method, endpoint, e);
        ApiError::Decode
    })?;

    log::info!("{} {} - Success", method, endpoint);
    Ok(envelope.data)
}

/// Common GET request handler
pub async fn get<T>(endpoint: &str, token: Option<&str>) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de>,
{
    let url = request_url(endpoint);
    log::debug!("GET request to: {}", url);

    let response = with_bearer(Request::get(&url), token)
        .send()
        .await
        .map_err(|e| {
            log::error!("GET {} - Request failed: {}", endpoint, e);
            ApiError::Network
        })?;

    into_data("GET", endpoint, response).await
}

/// Common POST request handler
pub async fn post<T, B>(endpoint: &str, body: &B, token: Option<&str>) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de>,
    B: Serialize,
{
    let url = request_url(endpoint);
    log::debug!("POST request to: {}", url);

    let response = with_bearer(Request::post(&url), token)
        .json(body)
        .map_err(|e| {
            log::error!("POST {} - Failed to serialize request: {}", endpoint, e);
            ApiError::Decode
        })?
        .send()
        .await
        .map_err(|e| {
            log::error!("POST {} - Request failed: {}", endpoint, e);
            ApiError::Network
        })?;

    into_data("POST", endpoint, response).await
}

/// POST without a body, for endpoints that act on the bearer token alone.
pub async fn post_empty<T>(endpoint: &str, token: Option<&str>) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de>,
{
    let url = request_url(endpoint);
    log::debug!("POST request to: {}", url);

    let response = with_bearer(Request::post(&url), token)
        .send()
        .await
        .map_err(|e| {
            log::error!("POST {} - Request failed: {}", endpoint, e);
            ApiError::Network
        })?;

    into_data("POST", endpoint, response).await
}

/// Common PUT request handler
pub async fn put<T, B>(endpoint: &str, body: &B, token: Option<&str>) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de>,
    B: Serialize,
{
    let url = request_url(endpoint);
    log::debug!("PUT request to: {}", url);

    let response = with_bearer(Request::put(&url), token)
        .json(body)
        .map_err(|e| {
            log::error!("PUT {} - Failed to serialize request: {}", endpoint, e);
            ApiError::Decode
        })?
        .send()
        .await
        .map_err(|e| {
            log::error!("PUT {} - Request failed: {}", endpoint, e);
            ApiError::Network
        })?;

    into_data("PUT", endpoint, response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_is_user_facing() {
        assert_eq!(
            ApiError::RemoteService { status: 503 }.to_string(),
            "The service could not complete the request (HTTP 503)."
        );
        assert_eq!(
            ApiError::Network.to_string(),
            "Could not reach the server. Check your connection and try again."
        );
        assert!(!ApiError::Decode.to_string().contains("serde"));
    }

    #[test]
    fn test_remote_service_carries_only_the_status() {
        let err = ApiError::RemoteService { status: 409 };
        assert_eq!(err, ApiError::RemoteService { status: 409 });
        assert_ne!(err, ApiError::RemoteService { status: 500 });
    }

    #[test]
    fn test_no_token_means_no_authorization_header() {
        assert_eq!(bearer_header(None), None);
    }

    #[test]
    fn test_token_formats_as_bearer_scheme() {
        assert_eq!(
            bearer_header(Some("abc.def.ghi")),
            Some("Bearer abc.def.ghi".to_string())
        );
    }
}
