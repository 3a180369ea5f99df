use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use vital_trends_domain::entities::trend::Trend;

fn default_most_recent_first() -> bool {
    true
}

/// Request payload for a single-series trend
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct TrendRequest {
    /// Readings of one vital
    #[validate(length(max = 1000, message = "At most 1000 values can be analysed per request"))]
    pub values: Vec<f64>,

    /// Whether `values` starts with the newest reading (default: true)
    #[serde(default = "default_most_recent_first")]
    pub most_recent_first: bool,
}

/// Trend of a single series
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrendResponse {
    pub trend: Trend,
}

/// Advisory strings for a single reading
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InsightsResponse {
    /// Blood pressure, glucose and heart rate advice, in that order
    pub insights: Vec<String>,
}

/// Request payload for an average
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AverageRequest {
    #[validate(length(max = 1000, message = "At most 1000 values can be averaged per request"))]
    pub values: Vec<f64>,
}

/// Rounded average of a series
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AverageResponse {
    /// Mean rounded to the nearest integer, ties away from zero
    pub average: i64,
}

/// Position of the first non-finite value, if any
pub fn first_non_finite(values: &[f64]) -> Option<usize> {
    values.iter().position(|value| !value.is_finite())
}
