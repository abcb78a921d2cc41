use axum::{extract::Query, extract::State, http::StatusCode, response::Json};
use axum_valid::Valid;
use chrono::Utc;
use common::{ActivityRecord, District, PredictionResult, Season};
use forecast::ForecastInput;
use model::entities::prediction_record;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::auth::{AuthUser, MaybeAuthUser};
use crate::schemas::{ApiResponse, AppState, CachedData, ErrorResponse};

/// Activity feed entries kept per response unless the caller asks otherwise.
const DEFAULT_ACTIVITY_LIMIT: u64 = 5;

/// Request body for a production forecast. Season and district arrive as
/// raw strings and are validated here, not by the caller.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PredictionRequest {
    /// Cultivation year
    pub year: i32,
    /// Exactly "Maha" or "Yala"
    pub season: String,
    /// District name, matched case-insensitively
    pub district: String,
    /// Sown extent in hectares
    pub sown_hect: f64,
    /// Prior-season yield for the district
    pub previous_yield: f64,
    /// Prior-season total production for the district
    pub previous_production: f64,
}

/// Query parameters for the recent-activity feed
#[derive(Debug, Deserialize, Serialize, ToSchema, IntoParams, Validate)]
pub struct ActivityQuery {
    /// Number of records to return (default 5)
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<u64>,
}

fn validation_error(error: String, code: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error,
            code: code.to_string(),
            success: false,
        }),
    )
}

/// Forecast harvested extent and total production for a season
#[utoipa::path(
    post,
    path = "/api/v1/production/predict",
    tag = "prediction",
    request_body = PredictionRequest,
    responses(
        (status = 200, description = "Forecast computed successfully", body = PredictionResult),
        (status = 400, description = "Unknown season or district", body = ErrorResponse),
        (status = 401, description = "Invalid token (anonymous requests are fine, bad tokens are not)", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security((), ("bearer_token" = []))
)]
#[instrument(skip(state))]
pub async fn predict_production(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<PredictionResult>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering predict_production function");
    debug!(
        "Forecast request: year={}, season={}, district={}",
        request.year, request.season, request.district
    );

    // Season spelling is strict: the form sends canonical values and any
    // other casing is a caller bug worth surfacing.
    let season = match Season::from_str(&request.season) {
        Ok(season) => season,
        Err(_) => {
            warn!("Rejecting forecast with unknown season '{}'", request.season);
            return Err(validation_error(
                "Invalid season. Use 'Yala' or 'Maha'.".to_string(),
                "INVALID_SEASON",
            ));
        }
    };

    let district = match District::from_str(&request.district) {
        Ok(district) => district,
        Err(_) => {
            warn!("Rejecting forecast with unknown district '{}'", request.district);
            return Err(validation_error(
                format!("District '{}' not found.", request.district),
                "UNKNOWN_DISTRICT",
            ));
        }
    };

    let input = ForecastInput {
        year: request.year,
        season,
        district,
        sown_hect: request.sown_hect,
        previous_yield: request.previous_yield,
        previous_production: request.previous_production,
    };

    let forecast = match state.forecaster.forecast(&input) {
        Ok(forecast) => forecast,
        Err(e) => {
            error!("Forecast computation failed: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to compute the forecast".to_string(),
                    code: "FORECAST_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    info!(
        "Forecast for {} {} {}: extent={}, production={}",
        request.year,
        season.as_str(),
        district.as_str(),
        forecast.harvested_extent,
        forecast.total_production
    );

    // Authenticated forecasts become history. A failed insert must not
    // cost the caller their result.
    if let Some(user) = user {
        let record = prediction_record::ActiveModel {
            user_id: Set(user.uid.clone()),
            year: Set(request.year),
            season: Set(season.as_str().to_string()),
            district: Set(district.as_str().to_string()),
            sown_hect: Set(request.sown_hect),
            previous_yield: Set(request.previous_yield),
            previous_production: Set(request.previous_production),
            predicted_extent: Set(forecast.harvested_extent),
            predicted_production: Set(forecast.total_production),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        match record.insert(&state.db).await {
            Ok(saved) => {
                debug!("Recorded prediction {} for user {}", saved.id, user.uid);
                state.cache.invalidate(&format!("activity_{}", user.uid)).await;
            }
            Err(db_error) => {
                warn!("Failed to record prediction for user {}: {}", user.uid, db_error);
            }
        }
    }

    // Served bare, without the ApiResponse envelope.
    Ok(Json(PredictionResult {
        predicted_harvested_extent: forecast.harvested_extent,
        predicted_total_production: forecast.total_production,
    }))
}

/// Get the caller's most recent predictions
#[utoipa::path(
    get,
    path = "/api/v1/activity",
    tag = "prediction",
    params(ActivityQuery),
    responses(
        (status = 200, description = "Recent activity retrieved successfully", body = ApiResponse<Vec<ActivityRecord>>),
        (status = 400, description = "Limit out of range", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[instrument(skip(state))]
pub async fn get_recent_activity(
    State(state): State<AppState>,
    user: AuthUser,
    Valid(Query(query)): Valid<Query<ActivityQuery>>,
) -> Result<Json<ApiResponse<Vec<ActivityRecord>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_recent_activity function for uid: {}", user.uid);

    let limit = query.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);
    let cache_key = format!("activity_{}", user.uid);

    // Only the default-sized feed is cached; explicit limits go straight
    // to the database.
    if limit == DEFAULT_ACTIVITY_LIMIT {
        if let Some(CachedData::Activity(records)) = state.cache.get(&cache_key).await {
            debug!("Returning cached activity for uid: {}", user.uid);
            return Ok(Json(ApiResponse {
                data: records,
                message: "Recent activity retrieved from cache".to_string(),
                success: true,
            }));
        }
    }

    let rows = match prediction_record::Entity::find()
        .filter(prediction_record::Column::UserId.eq(&user.uid))
        .order_by_desc(prediction_record::Column::Id)
        .limit(limit)
        .all(&state.db)
        .await
    {
        Ok(rows) => rows,
        Err(db_error) => {
            error!("Failed to load activity for {}: {}", user.uid, db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while loading activity".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    debug!("Retrieved {} activity records for uid: {}", rows.len(), user.uid);
    let records: Vec<ActivityRecord> = rows
        .into_iter()
        .map(|row| ActivityRecord {
            id: row.id,
            year: row.year,
            season: row.season,
            district: row.district,
            predicted_production: row.predicted_production,
            created_at: row.created_at,
        })
        .collect();

    if limit == DEFAULT_ACTIVITY_LIMIT {
        state
            .cache
            .insert(cache_key, CachedData::Activity(records.clone()))
            .await;
    }

    Ok(Json(ApiResponse {
        data: records,
        message: "Recent activity retrieved successfully".to_string(),
        success: true,
    }))
}
