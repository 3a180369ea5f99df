use axum::{
    http::HeaderValue,
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, warn};

use vital_trends_domain::health::HealthServiceTrait;
use vital_trends_domain::services::{
    HealthReportServiceTrait, ReportService, ReportSettings, SummaryGenerator,
    TemplateSummaryGenerator,
};

use crate::api::handlers::{analytics, health, reports};
use crate::config::AppConfig;
use crate::openapi::configure_swagger_routes;

/// Report service type for dependency injection
pub type ReportServiceRef = Arc<dyn HealthReportServiceTrait + Send + Sync>;

/// Summary generator type for dependency injection
pub type SummaryGeneratorRef = Arc<dyn SummaryGenerator + Send + Sync>;

/// Services shared by the analytics handlers
#[derive(Clone)]
pub struct AppState {
    pub reports: ReportServiceRef,
    pub summaries: SummaryGeneratorRef,
}

impl AppState {
    /// Build the default services for the given configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            reports: Arc::new(ReportService::new(ReportSettings::with_window_size(
                config.report_window_size,
            ))),
            summaries: Arc::new(TemplateSummaryGenerator::new()),
        }
    }
}

/// Create the application router
pub fn create_app(config: &AppConfig) -> Router {
    create_app_with_services(config, AppState::from_config(config), health::create_health_service())
}

/// Create the application router around the given services
pub fn create_app_with_services(
    config: &AppConfig,
    state: AppState,
    health_service: Arc<dyn HealthServiceTrait + Send + Sync>,
) -> Router {
    debug!("Creating application router");

    let api_routes = Router::new()
        .route("/health-logs/advanced-report", post(reports::generate_advanced_report))
        .route("/health-logs/summary", post(reports::generate_summary))
        .route("/analytics/trend", post(analytics::compute_trend))
        .route("/analytics/insights", post(analytics::generate_insights))
        .route("/analytics/average", post(analytics::compute_average))
        .with_state(state);

    debug!("API routes configured");

    // Set up public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .layer(Extension(health_service))
        .layer(Extension(health::AppEnvironment(config.environment.clone())));

    debug!("Public routes configured");

    let app = Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes);

    // Configure the Swagger UI using the helper function
    let app = add_swagger_ui(app);

    debug!("Swagger UI merged");

    app.layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

/// CORS policy from configuration, any origin when none is configured
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    match config.cors_allow_origin.as_deref() {
        None => layer.allow_origin(Any),
        Some(origin) => match HeaderValue::from_str(origin) {
            Ok(value) => layer.allow_origin(value),
            Err(e) => {
                warn!("Ignoring invalid CORS_ALLOW_ORIGIN {:?}: {}", origin, e);
                layer.allow_origin(Any)
            }
        },
    }
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    app.merge(configure_swagger_routes())
}
