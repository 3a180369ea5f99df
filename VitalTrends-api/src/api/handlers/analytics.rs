use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use tracing::{debug, instrument, warn};
use validator::Validate;

use vital_trends_domain::entities::conversions::convert_to_domain_reading;

use crate::api::handlers::reject_payload;
use crate::api::routes::AppState;
use crate::entities::analytics::{
    first_non_finite, AverageRequest, AverageResponse, InsightsResponse, TrendRequest,
    TrendResponse,
};
use crate::entities::common::ErrorResponse;
use crate::entities::health_log::HealthLogRecord;

fn ensure_finite(values: &[f64]) -> Result<(), ErrorResponse> {
    match first_non_finite(values) {
        Some(index) => {
            warn!("Rejected non-finite value at index {}", index);
            Err(ErrorResponse::validation_error(
                "values must be finite numbers",
                Some(serde_json::json!({ "field": "values", "index": index })),
            ))
        }
        None => Ok(()),
    }
}

/// Classify the direction of a single series
#[utoipa::path(
    post,
    path = "/api/v1/analytics/trend",
    request_body = TrendRequest,
    responses(
        (status = 200, description = "Trend computed", body = TrendResponse),
        (status = 400, description = "Invalid values", body = ErrorResponse),
    ),
    tag = "analytics"
)]
#[instrument(skip(state, payload))]
pub async fn compute_trend(
    State(state): State<AppState>,
    payload: Result<Json<TrendRequest>, JsonRejection>,
) -> Result<Json<TrendResponse>, ErrorResponse> {
    let Json(request) = payload.map_err(reject_payload)?;
    request.validate()?;
    ensure_finite(&request.values)?;

    let trend = state
        .reports
        .compute_trend(&request.values, request.most_recent_first);

    debug!("Trend over {} values: {}", request.values.len(), trend);
    Ok(Json(TrendResponse { trend }))
}

/// Advisory insights for a single health log
#[utoipa::path(
    post,
    path = "/api/v1/analytics/insights",
    request_body = HealthLogRecord,
    responses(
        (status = 200, description = "Insights generated", body = InsightsResponse),
        (status = 400, description = "Invalid health log", body = ErrorResponse),
    ),
    tag = "analytics"
)]
#[instrument(skip(state, payload))]
pub async fn generate_insights(
    State(state): State<AppState>,
    payload: Result<Json<HealthLogRecord>, JsonRejection>,
) -> Result<Json<InsightsResponse>, ErrorResponse> {
    let Json(record) = payload.map_err(reject_payload)?;
    record.validate()?;

    let reading = convert_to_domain_reading(record.into(), Utc::now())?;
    let insights = state.reports.generate_insights(&reading).messages();

    Ok(Json(InsightsResponse { insights }))
}

/// Rounded mean of a series
#[utoipa::path(
    post,
    path = "/api/v1/analytics/average",
    request_body = AverageRequest,
    responses(
        (status = 200, description = "Average computed", body = AverageResponse),
        (status = 400, description = "Invalid values", body = ErrorResponse),
        (status = 404, description = "No values to average", body = ErrorResponse),
    ),
    tag = "analytics"
)]
#[instrument(skip(state, payload))]
pub async fn compute_average(
    State(state): State<AppState>,
    payload: Result<Json<AverageRequest>, JsonRejection>,
) -> Result<Json<AverageResponse>, ErrorResponse> {
    let Json(request) = payload.map_err(reject_payload)?;
    request.validate()?;
    ensure_finite(&request.values)?;

    let average = state.reports.average(&request.values)?;

    Ok(Json(AverageResponse { average }))
}
