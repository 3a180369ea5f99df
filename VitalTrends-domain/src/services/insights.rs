use crate::entities::insight::{BloodPressureLevel, GlucoseLevel, HeartRateLevel, InsightReport};
use crate::entities::reading::{Reading, ReadingSeries};
use crate::errors::AnalyticsError;

/// Classify blood pressure; the elevated check takes precedence over low
pub fn classify_blood_pressure(systolic: u16, diastolic: u16) -> BloodPressureLevel {
    if systolic >= 140 || diastolic >= 90 {
        BloodPressureLevel::Elevated
    } else if systolic <= 90 || diastolic <= 60 {
        BloodPressureLevel::Low
    } else {
        BloodPressureLevel::Normal
    }
}

/// Classify fasting blood glucose (mg/dL)
pub fn classify_glucose(glucose: u16) -> GlucoseLevel {
    if glucose >= 126 {
        GlucoseLevel::Diabetic
    } else if glucose >= 100 {
        GlucoseLevel::PreDiabetic
    } else {
        GlucoseLevel::Normal
    }
}

/// Classify resting heart rate (bpm)
pub fn classify_heart_rate(heart_rate: u16) -> HeartRateLevel {
    if heart_rate >= 100 {
        HeartRateLevel::Elevated
    } else if heart_rate < 60 {
        HeartRateLevel::Low
    } else {
        HeartRateLevel::Normal
    }
}

/// Generate insights for a single reading
pub fn generate_insights(latest: &Reading) -> InsightReport {
    InsightReport {
        blood_pressure: classify_blood_pressure(latest.systolic(), latest.diastolic()),
        glucose: classify_glucose(latest.glucose()),
        heart_rate: classify_heart_rate(latest.heart_rate()),
    }
}

/// Generate insights for the most recent reading of a series
pub fn generate_insights_for_series(series: &ReadingSeries) -> Result<InsightReport, AnalyticsError> {
    series
        .latest()
        .map(generate_insights)
        .ok_or(AnalyticsError::EmptySeries)
}
