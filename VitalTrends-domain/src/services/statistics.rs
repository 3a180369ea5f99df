use crate::entities::reading::{ReadingSeries, VitalSign};
use crate::entities::report::VitalAverages;
use crate::errors::AnalyticsError;

/// Arithmetic mean rounded to the nearest integer
///
/// Ties round away from zero (`f64::round`), and every average in the crate
/// goes through this function so the rule is applied uniformly. An empty
/// slice is an error rather than NaN, and so is a mean outside the `i64`
/// range.
pub fn average(values: &[f64]) -> Result<i64, AnalyticsError> {
    if values.is_empty() {
        return Err(AnalyticsError::EmptySeries);
    }

    let rounded = mean(values).round();
    if !rounded.is_finite() || rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
        return Err(AnalyticsError::invalid(
            "values",
            "average is outside the representable range",
        ));
    }

    Ok(rounded as i64)
}

/// Mean of a non-empty slice, rescaled when the plain sum overflows
fn mean(values: &[f64]) -> f64 {
    let count = values.len() as f64;
    let sum: f64 = values.iter().sum();
    if sum.is_finite() {
        return sum / count;
    }

    let scale = values.iter().fold(0.0_f64, |max, value| max.max(value.abs()));
    if !scale.is_finite() || scale == 0.0 {
        return sum / count;
    }

    let scaled: f64 = values.iter().map(|value| value / scale).sum();
    scaled / count * scale
}

/// Average of each vital across the whole series
pub fn compute_averages(series: &ReadingSeries) -> Result<VitalAverages, AnalyticsError> {
    let average_of = |vital: VitalSign| average(&series.values(vital));

    Ok(VitalAverages {
        systolic: average_of(VitalSign::Systolic)?,
        diastolic: average_of(VitalSign::Diastolic)?,
        glucose: average_of(VitalSign::Glucose)?,
        heart_rate: average_of(VitalSign::HeartRate)?,
    })
}
