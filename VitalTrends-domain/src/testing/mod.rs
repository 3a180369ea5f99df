// Testing utilities and mock implementations for the domain layer
// This module is only available when the "mock" feature is enabled

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::entities::insight::InsightReport;
use crate::entities::reading::{Reading, ReadingSeries};
use crate::entities::report::AdvancedReport;
use crate::entities::trend::Trend;
use crate::errors::AnalyticsError;
use crate::health::{ComponentStatus, HealthComponent, HealthServiceTrait, SystemHealth};
use crate::services::report::{HealthReportServiceTrait, ReportService, ReportSettings};
use crate::services::summary::{SummaryError, SummaryGenerator, SummaryInput};

/// Fixed start date used by the fixtures
pub fn fixture_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Build a reading, panicking on invalid values since fixtures are test-only
pub fn reading(timestamp: DateTime<Utc>, systolic: u16, diastolic: u16, glucose: u16, heart_rate: u16) -> Reading {
    Reading::new(timestamp, systolic, diastolic, glucose, heart_rate)
        .unwrap_or_else(|e| panic!("invalid fixture reading: {}", e))
}

/// One reading per day from chronological systolic values; other vitals normal
pub fn daily_systolic_series(systolic: &[u16]) -> ReadingSeries {
    let start = fixture_start();
    let readings = systolic
        .iter()
        .enumerate()
        .map(|(day, &value)| reading(start + Duration::days(day as i64), value, 80, 95, 72))
        .collect();
    ReadingSeries::from_unordered(readings)
}

/// Mock implementation of the HealthReportServiceTrait for testing
///
/// Delegates to the real service unless configured to fail.
#[derive(Debug, Clone, Default)]
pub struct MockReportService {
    inner: ReportService,
    fixed_trend: Option<Trend>,
    fail_with: Option<AnalyticsError>,
}

impl MockReportService {
    /// Create a new mock report service
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the window size of the wrapped service
    pub fn with_settings(mut self, settings: ReportSettings) -> Self {
        self.inner = ReportService::new(settings);
        self
    }

    /// Always answer trend queries with this trend
    pub fn with_fixed_trend(mut self, trend: Trend) -> Self {
        self.fixed_trend = Some(trend);
        self
    }

    /// Fail report generation and averaging with this error
    pub fn with_failure(mut self, error: AnalyticsError) -> Self {
        self.fail_with = Some(error);
        self
    }
}

impl HealthReportServiceTrait for MockReportService {
    fn compute_trend(&self, values: &[f64], most_recent_first: bool) -> Trend {
        self.fixed_trend
            .unwrap_or_else(|| self.inner.compute_trend(values, most_recent_first))
    }

    fn generate_insights(&self, latest: &Reading) -> InsightReport {
        self.inner.generate_insights(latest)
    }

    fn average(&self, values: &[f64]) -> Result<i64, AnalyticsError> {
        match &self.fail_with {
            Some(error) => Err(error.clone()),
            None => self.inner.average(values),
        }
    }

    fn generate_report(&self, series: &ReadingSeries) -> Result<AdvancedReport, AnalyticsError> {
        match &self.fail_with {
            Some(error) => Err(error.clone()),
            None => self.inner.generate_report(series),
        }
    }

    fn settings(&self) -> ReportSettings {
        self.inner.settings()
    }
}

/// Summary generator returning canned text or a canned failure
#[derive(Debug, Clone)]
pub struct StubSummaryGenerator {
    response: Result<String, String>,
}

impl StubSummaryGenerator {
    /// Always return this summary
    pub fn returning(summary: &str) -> Self {
        Self {
            response: Ok(summary.to_string()),
        }
    }

    /// Always fail with this message
    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
        }
    }
}

#[async_trait]
impl SummaryGenerator for StubSummaryGenerator {
    async fn generate(&self, _input: &SummaryInput) -> Result<String, SummaryError> {
        self.response.clone().map_err(SummaryError::Generation)
    }
}

/// Health service with configurable components
#[derive(Debug, Clone)]
pub struct MockHealthService {
    components: HashMap<String, HealthComponent>,
}

impl Default for MockHealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHealthService {
    /// All components healthy
    pub fn new() -> Self {
        let mut components = HashMap::new();
        components.insert(
            "analytics".to_string(),
            HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
        );
        Self { components }
    }

    /// Add or replace a component
    pub fn with_component(mut self, name: &str, status: ComponentStatus, details: Option<String>) -> Self {
        self.components
            .insert(name.to_string(), HealthComponent { status, details });
        self
    }
}

#[async_trait]
impl HealthServiceTrait for MockHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        SystemHealth::from_components(self.components.clone())
    }

    async fn check_analytics_status(&self) -> Result<(), String> {
        match self.components.get("analytics") {
            Some(component) if component.status == ComponentStatus::Unhealthy => Err(component
                .details
                .clone()
                .unwrap_or_else(|| "Analytics self-check failed".to_string())),
            _ => Ok(()),
        }
    }
}
