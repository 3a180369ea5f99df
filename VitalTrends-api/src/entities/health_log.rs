use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use vital_trends_domain::entities::conversions::RawHealthLog;

/// Public representation of a stored health log
///
/// Vitals are accepted as plain JSON numbers and checked when mapped to a
/// domain reading, so a malformed value is reported as a validation error
/// naming the field instead of a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct HealthLogRecord {
    /// Identifier of the stored log
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    /// When the log was recorded. Defaults to the request time if not provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,

    /// Systolic blood pressure in mmHg
    #[schema(example = 120)]
    pub blood_pressure_systolic: f64,

    /// Diastolic blood pressure in mmHg
    #[schema(example = 80)]
    pub blood_pressure_diastolic: f64,

    /// Blood glucose in mg/dL
    #[schema(example = 95)]
    pub glucose_level: f64,

    /// Heart rate in beats per minute
    #[schema(example = 72)]
    pub heart_rate: f64,

    /// Optional notes about the log
    #[validate(length(max = 1000, message = "Notes cannot exceed 1000 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<HealthLogRecord> for RawHealthLog {
    fn from(record: HealthLogRecord) -> Self {
        RawHealthLog {
            id: record.id,
            date: record.date,
            blood_pressure_systolic: record.blood_pressure_systolic,
            blood_pressure_diastolic: record.blood_pressure_diastolic,
            glucose_level: record.glucose_level,
            heart_rate: record.heart_rate,
            notes: record.notes,
        }
    }
}

/// Request payload for an advanced report
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AdvancedReportRequest {
    /// Health logs to analyse, in any order
    #[validate]
    pub logs: Vec<HealthLogRecord>,
}

/// Request payload for a narrative health summary
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SummaryRequest {
    /// Display name used in the summary heading
    #[validate(length(max = 100, message = "Subject cannot exceed 100 characters"))]
    #[serde(default)]
    pub subject: Option<String>,

    /// Health logs to summarise, in any order
    #[validate]
    pub logs: Vec<HealthLogRecord>,
}

/// Narrative health summary
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SummaryResponse {
    /// Markdown summary
    pub summary: String,
}
