use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use tracing::{error, info, instrument, warn};
use validator::Validate;

use vital_trends_domain::entities::conversions::{convert_to_domain_series, RawHealthLog};
use vital_trends_domain::entities::{AdvancedReport, ReadingSeries};
use vital_trends_domain::services::{SummaryError, SummaryInput};

use crate::api::handlers::reject_payload;
use crate::api::routes::AppState;
use crate::entities::common::ErrorResponse;
use crate::entities::health_log::{
    AdvancedReportRequest, HealthLogRecord, SummaryRequest, SummaryResponse,
};

/// Largest number of logs accepted in one request
pub const MAX_LOGS_PER_REQUEST: usize = 1000;

/// Map request logs to a newest-first domain series
pub(crate) fn logs_to_series(logs: Vec<HealthLogRecord>) -> Result<ReadingSeries, ErrorResponse> {
    if logs.len() > MAX_LOGS_PER_REQUEST {
        return Err(ErrorResponse::validation_error(
            &format!("At most {} logs can be analysed per request", MAX_LOGS_PER_REQUEST),
            Some(serde_json::json!({ "field": "logs", "count": logs.len() })),
        ));
    }

    let raw_logs = logs.into_iter().map(RawHealthLog::from).collect();

    convert_to_domain_series(raw_logs, Utc::now()).map_err(|e| {
        warn!("Rejected health log: {}", e);
        ErrorResponse::from(e)
    })
}

/// Generate an advanced report over the most recent health logs
#[utoipa::path(
    post,
    path = "/api/v1/health-logs/advanced-report",
    request_body = AdvancedReportRequest,
    responses(
        (status = 200, description = "Report generated", body = AdvancedReport),
        (status = 400, description = "Invalid health log", body = ErrorResponse),
        (status = 404, description = "No health logs to analyze", body = ErrorResponse),
    ),
    tag = "reports"
)]
#[instrument(skip(state, payload))]
pub async fn generate_advanced_report(
    State(state): State<AppState>,
    payload: Result<Json<AdvancedReportRequest>, JsonRejection>,
) -> Result<Json<AdvancedReport>, ErrorResponse> {
    let Json(request) = payload.map_err(reject_payload)?;
    info!("Generating advanced report from {} logs", request.logs.len());

    request.validate()?;
    let series = logs_to_series(request.logs)?;

    let report = state.reports.generate_report(&series).map_err(|e| {
        info!("Advanced report not generated: {}", e);
        ErrorResponse::from(e)
    })?;

    info!(
        "Advanced report generated over {} readings",
        report.reading_count
    );
    Ok(Json(report))
}

/// Generate a narrative markdown summary of the most recent health logs
#[utoipa::path(
    post,
    path = "/api/v1/health-logs/summary",
    request_body = SummaryRequest,
    responses(
        (status = 200, description = "Summary generated", body = SummaryResponse),
        (status = 400, description = "Invalid health log", body = ErrorResponse),
        (status = 404, description = "No health logs to summarise", body = ErrorResponse),
        (status = 500, description = "Summary generation failed", body = ErrorResponse),
    ),
    tag = "reports"
)]
#[instrument(skip(state, payload))]
pub async fn generate_summary(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Result<Json<SummaryResponse>, ErrorResponse> {
    let Json(request) = payload.map_err(reject_payload)?;
    info!("Generating health summary from {} logs", request.logs.len());

    request.validate()?;
    let subject = request.subject;
    let series = logs_to_series(request.logs)?;

    let report = state.reports.generate_report(&series)?;
    let input = SummaryInput { subject, report };

    let summary = state.summaries.generate(&input).await.map_err(|e| {
        if let SummaryError::Generation(_) = &e {
            error!("Error generating health summary: {}", e);
        }
        ErrorResponse::from(e)
    })?;

    Ok(Json(SummaryResponse { summary }))
}
