//! Client for the production forecast endpoint. Unlike the rest of the
//! API this endpoint serves its result bare, without the `ApiResponse`
//! envelope, and its error bodies are not read: the status code is the
//! whole failure contract. It therefore bypasses the generic helpers.

use gloo_net::http::Request;

use common::{PredictionRequest, PredictionResult};

use crate::api_client::{request_url, with_bearer, ApiError};

/// Client-side view of a forecast: the two predicted figures plus the
/// request fields echoed back for the display layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub year: i32,
    pub season: String,
    pub district: String,
    /// Estimated harvested extent in hectares.
    pub harvested_extent: f64,
    /// Estimated total production in metric tons.
    pub total_production: f64,
}

/// Issue the single POST for a forecast. No retry, no caching, and no
/// validation of the field values; callers own both validation and the
/// decision to retry. Values travel exactly as given.
pub async fn predict_production(
    request: &PredictionRequest,
    token: Option<&str>,
) -> Result<Forecast, ApiError> {
    let url = request_url("/production/predict");
    log::debug!(
        "POST request to: {} ({} {} {})",
        url,
        request.year,
        request.season,
        request.district
    );

    let response = with_bearer(Request::post(&url), token)
        .json(request)
        .map_err(|e| {
            log::error!("POST /production/predict - Failed to serialize request: {}", e);
            ApiError::Decode
        })?
        .send()
        .await
        .map_err(|e| {
            log::error!("POST /production/predict - Request failed: {}", e);
            ApiError::Network
        })?;

    if let Some(err) = classify_status(response.status()) {
        log::error!("POST /production/predict - HTTP error: {}", response.status());
        return Err(err);
    }

    let body = response.text().await.map_err(|e| {
        log::error!("POST /production/predict - Failed to read response body: {}", e);
        ApiError::Network
    })?;

    let forecast = parse_forecast(request, &body)?;
    log::info!(
        "POST /production/predict - Success ({:.1} ha, {:.1} MT)",
        forecast.harvested_extent,
        forecast.total_production
    );
    Ok(forecast)
}

/// A non-2xx status is the error itself; the body stays unread.
fn classify_status(status: u16) -> Option<ApiError> {
    if (200..300).contains(&status) {
        None
    } else {
        Some(ApiError::RemoteService { status })
    }
}

/// Decode the bare wire result and normalize it with the request echo.
fn parse_forecast(request: &PredictionRequest, body: &str) -> Result<Forecast, ApiError> {
    let result: PredictionResult = serde_json::from_str(body).map_err(|e| {
        log::error!("POST /production/predict - Failed to parse response: {}", e);
        ApiError::Decode
    })?;

    Ok(Forecast {
        year: request.year,
        season: request.season.clone(),
        district: request.district.clone(),
        harvested_extent: result.predicted_harvested_extent,
        total_production: result.predicted_total_production,
    })
}
