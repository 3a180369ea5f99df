use chrono::Utc;
use tracing::debug;

use crate::entities::insight::InsightReport;
use crate::entities::reading::{Reading, ReadingSeries};
use crate::entities::report::AdvancedReport;
use crate::entities::trend::Trend;
use crate::errors::AnalyticsError;
use crate::services::{insights, statistics, trends};

/// Number of most recent readings analysed by default
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Settings for report generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSettings {
    /// How many of the most recent readings a report covers
    pub window_size: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl ReportSettings {
    /// Settings with a custom window, clamped to at least one reading
    pub fn with_window_size(window_size: usize) -> Self {
        Self {
            window_size: window_size.max(1),
        }
    }
}

/// Trait for health analytics operations
///
/// Every operation is a pure function of its arguments, so one instance can
/// be shared between concurrent requests.
pub trait HealthReportServiceTrait {
    /// Trend of a series of values
    fn compute_trend(&self, values: &[f64], most_recent_first: bool) -> Trend;

    /// Insights for a single reading
    fn generate_insights(&self, latest: &Reading) -> InsightReport;

    /// Rounded mean of a series of values
    fn average(&self, values: &[f64]) -> Result<i64, AnalyticsError>;

    /// Full report over the most recent readings of a series
    fn generate_report(&self, series: &ReadingSeries) -> Result<AdvancedReport, AnalyticsError>;

    /// Window size reports are generated with
    fn settings(&self) -> ReportSettings;
}

/// Default report service
#[derive(Debug, Clone, Default)]
pub struct ReportService {
    settings: ReportSettings,
}

impl ReportService {
    /// Create a new report service
    pub fn new(settings: ReportSettings) -> Self {
        Self { settings }
    }
}

impl HealthReportServiceTrait for ReportService {
    fn compute_trend(&self, values: &[f64], most_recent_first: bool) -> Trend {
        trends::compute_trend(values, most_recent_first)
    }

    fn generate_insights(&self, latest: &Reading) -> InsightReport {
        insights::generate_insights(latest)
    }

    fn average(&self, values: &[f64]) -> Result<i64, AnalyticsError> {
        statistics::average(values)
    }

    fn generate_report(&self, series: &ReadingSeries) -> Result<AdvancedReport, AnalyticsError> {
        let window = series.most_recent(self.settings.window_size);
        let date_range = window.date_range().ok_or(AnalyticsError::EmptySeries)?;

        debug!(
            total = series.len(),
            analysed = window.len(),
            "Generating advanced report"
        );

        let averages = statistics::compute_averages(&window)?;
        let trends = trends::analyze_trends(&window);
        let insight_levels = insights::generate_insights_for_series(&window)?;

        Ok(AdvancedReport {
            reading_count: window.len(),
            insights: insight_levels.messages(),
            readings: window.into_inner(),
            date_range,
            averages,
            trends,
            insight_levels,
            generated_at: Utc::now(),
        })
    }

    fn settings(&self) -> ReportSettings {
        self.settings
    }
}

/// Create a report service with default settings
pub fn create_default_report_service() -> impl HealthReportServiceTrait + Send + Sync {
    ReportService::default()
}
