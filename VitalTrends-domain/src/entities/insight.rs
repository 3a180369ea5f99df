use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Blood pressure level against the reference range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum BloodPressureLevel {
    /// Systolic <= 90 or diastolic <= 60
    Low,
    Normal,
    /// Systolic >= 140 or diastolic >= 90
    Elevated,
}

impl BloodPressureLevel {
    pub fn advisory(self) -> &'static str {
        match self {
            BloodPressureLevel::Elevated => {
                "Your blood pressure is elevated. Consider reducing sodium intake, staying active, and consulting your doctor."
            }
            BloodPressureLevel::Low => {
                "Your blood pressure is lower than normal. Stay hydrated and consult your doctor if you feel dizzy or faint."
            }
            BloodPressureLevel::Normal => "Your blood pressure is within the normal range. Keep it up!",
        }
    }
}

/// Blood glucose level against the reference range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum GlucoseLevel {
    Normal,
    /// 100 to 125 mg/dL
    PreDiabetic,
    /// 126 mg/dL and above
    Diabetic,
}

impl GlucoseLevel {
    pub fn advisory(self) -> &'static str {
        match self {
            GlucoseLevel::Diabetic => {
                "Your glucose level is in the diabetic range. Please consult your doctor about managing your blood sugar."
            }
            GlucoseLevel::PreDiabetic => {
                "Your glucose level is in the pre-diabetic range. Consider dietary changes and regular exercise."
            }
            GlucoseLevel::Normal => "Your glucose level is within the normal range.",
        }
    }
}

/// Heart rate level against the reference range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum HeartRateLevel {
    /// Below 60 bpm
    Low,
    Normal,
    /// 100 bpm and above
    Elevated,
}

impl HeartRateLevel {
    pub fn advisory(self) -> &'static str {
        match self {
            HeartRateLevel::Elevated => {
                "Your resting heart rate is elevated. Consider stress reduction techniques and consult your doctor if it persists."
            }
            HeartRateLevel::Low => {
                "Your heart rate is lower than normal. This can be normal for athletes, but consult your doctor if you feel unwell."
            }
            HeartRateLevel::Normal => "Your heart rate is within the normal range.",
        }
    }
}

/// Insights derived from the most recent reading
///
/// Always three entries, in the order blood pressure, glucose, heart rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    pub blood_pressure: BloodPressureLevel,
    pub glucose: GlucoseLevel,
    pub heart_rate: HeartRateLevel,
}

impl InsightReport {
    /// Advisory strings in fixed order
    pub fn messages(&self) -> Vec<String> {
        vec![
            self.blood_pressure.advisory().to_string(),
            self.glucose.advisory().to_string(),
            self.heart_rate.advisory().to_string(),
        ]
    }
}
