use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Direction of a vital over the analysis window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Regression slope above the threshold
    Increasing,
    /// Regression slope below the negative threshold
    Decreasing,
    /// Too little data or a slope within the threshold
    Stable,
}

impl Trend {
    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One trend per vital
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct VitalTrends {
    pub systolic: Trend,
    pub diastolic: Trend,
    pub glucose: Trend,
    pub heart_rate: Trend,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Trend::Increasing).unwrap(), "\"increasing\"");
        assert_eq!(serde_json::to_string(&Trend::Stable).unwrap(), "\"stable\"");
        assert_eq!(Trend::Decreasing.to_string(), "decreasing");
    }

    #[test]
    fn test_vital_trends_uses_camel_case_keys() {
        let trends = VitalTrends {
            systolic: Trend::Increasing,
            diastolic: Trend::Stable,
            glucose: Trend::Decreasing,
            heart_rate: Trend::Stable,
        };
        let json = serde_json::to_value(trends).unwrap();
        assert_eq!(json["heartRate"], "stable");
        assert_eq!(json["glucose"], "decreasing");
    }
}
