use chrono::{DateTime, Utc};
use serde::Serialize;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use crate::entities::insight::InsightReport;
use crate::entities::reading::{DateRange, Reading};
use crate::entities::trend::VitalTrends;

/// Rounded mean of each vital over the analysis window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct VitalAverages {
    pub systolic: i64,
    pub diastolic: i64,
    pub glucose: i64,
    pub heart_rate: i64,
}

/// Trends, insights and averages over the most recent readings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AdvancedReport {
    /// Analysed readings, newest first
    pub readings: Vec<Reading>,

    /// Dates of the oldest and newest analysed readings
    pub date_range: DateRange,

    pub averages: VitalAverages,

    pub trends: VitalTrends,

    /// Classified insights for the latest reading
    #[serde(skip)]
    pub insight_levels: InsightReport,

    /// Advisory strings: blood pressure, glucose, heart rate
    pub insights: Vec<String>,

    /// Number of readings analysed
    pub reading_count: usize,

    /// When the report was assembled
    pub generated_at: DateTime<Utc>,
}

impl AdvancedReport {
    /// The reading the insights were derived from
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.first()
    }
}
