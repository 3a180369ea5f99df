use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Report endpoints
        crate::api::handlers::reports::generate_advanced_report,
        crate::api::handlers::reports::generate_summary,

        // Analytics endpoints
        crate::api::handlers::analytics::compute_trend,
        crate::api::handlers::analytics::generate_insights,
        crate::api::handlers::analytics::compute_average
    ),
    components(
        schemas(
            // Entities
            crate::entities::health_log::HealthLogRecord,
            crate::entities::health_log::AdvancedReportRequest,
            crate::entities::health_log::SummaryRequest,
            crate::entities::health_log::SummaryResponse,
            crate::entities::analytics::TrendRequest,
            crate::entities::analytics::TrendResponse,
            crate::entities::analytics::InsightsResponse,
            crate::entities::analytics::AverageRequest,
            crate::entities::analytics::AverageResponse,
            crate::entities::common::ErrorResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus,

            // Domain report schemas
            vital_trends_domain::entities::AdvancedReport,
            vital_trends_domain::entities::Reading,
            vital_trends_domain::entities::DateRange,
            vital_trends_domain::entities::VitalAverages,
            vital_trends_domain::entities::VitalTrends,
            vital_trends_domain::entities::Trend,
            vital_trends_domain::entities::InsightReport,
            vital_trends_domain::entities::BloodPressureLevel,
            vital_trends_domain::entities::GlucoseLevel,
            vital_trends_domain::entities::HeartRateLevel
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "reports", description = "Advanced reports and narrative summaries over health logs"),
        (name = "analytics", description = "Trend, insight and average calculations")
    ),
    info(
        title = "VitalTrends API",
        version = "0.1.0",
        description = "API for analysing vital sign trends and producing health insights",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_doc_generation() {
        let openapi = ApiDoc::openapi();

        // Verify basic info fields are set correctly
        assert_eq!(openapi.info.title, "VitalTrends API");
        assert_eq!(openapi.info.version, "0.1.0");

        let tags = openapi.tags.as_ref().unwrap();
        assert!(tags.iter().any(|tag| tag.name == "reports"));
        assert!(tags.iter().any(|tag| tag.name == "analytics"));

        // Verify paths are defined for our endpoints
        for path in [
            "/health",
            "/api/v1/health-logs/advanced-report",
            "/api/v1/health-logs/summary",
            "/api/v1/analytics/trend",
            "/api/v1/analytics/insights",
            "/api/v1/analytics/average",
        ] {
            assert!(openapi.paths.paths.contains_key(path), "missing path {}", path);
        }
    }

    #[test]
    fn test_report_schemas_are_registered() {
        let openapi = ApiDoc::openapi();
        let schemas = &openapi.components.as_ref().unwrap().schemas;

        assert!(schemas.contains_key("AdvancedReport"));
        assert!(schemas.contains_key("HealthLogRecord"));
        assert!(schemas.contains_key("ErrorResponse"));
    }
}
