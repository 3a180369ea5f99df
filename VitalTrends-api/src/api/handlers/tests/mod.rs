
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use vital_trends_domain::testing::{MockHealthService, MockReportService, StubSummaryGenerator};

use crate::api::routes::{create_app_with_services, AppState};
use crate::config::AppConfig;

/// State backed by the mock report service and a canned summary
pub(super) fn mock_state(reports: MockReportService) -> AppState {
    AppState {
        reports: Arc::new(reports),
        summaries: Arc::new(StubSummaryGenerator::returning("# Summary")),
    }
}

/// Router with the given state and an all-healthy health service
pub(super) fn test_app(state: AppState) -> Router {
    create_app_with_services(
        &AppConfig::default(),
        state,
        Arc::new(MockHealthService::new()),
    )
}

/// Send a JSON POST and decode the JSON response
pub(super) async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

/// A health log in the wire format
pub(super) fn log_json(date: &str, systolic: u16, diastolic: u16, glucose: u16, heart_rate: u16) -> Value {
    serde_json::json!({
        "date": date,
        "blood_pressure_systolic": systolic,
        "blood_pressure_diastolic": diastolic,
        "glucose_level": glucose,
        "heart_rate": heart_rate
    })
}
