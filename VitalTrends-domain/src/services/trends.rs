use crate::entities::reading::{ReadingSeries, VitalSign};
use crate::entities::trend::{Trend, VitalTrends};

/// Slope (units per reading) a series must exceed to count as a trend
///
/// Deliberately coarse so that day-to-day noise reads as stable.
pub const SLOPE_THRESHOLD: f64 = 0.5;

/// Least-squares slope of values indexed 0, 1, 2, ... in chronological order
///
/// Returns `None` when there are fewer than two values, where no line can be
/// fitted. Sums are accumulated left to right in `f64` so the result is
/// reproducible. Values large enough to overflow the sums are refitted at a
/// reduced scale, so the sign of the slope survives even when its magnitude
/// is infinite.
pub fn regression_slope(chronological: &[f64]) -> Option<f64> {
    if chronological.len() < 2 {
        return None;
    }

    let slope = fit_slope(chronological, 1.0)?;
    if slope.is_finite() {
        return Some(slope);
    }

    let scale = chronological
        .iter()
        .fold(0.0_f64, |max, value| max.max(value.abs()));
    if !scale.is_finite() || scale == 0.0 {
        return Some(slope);
    }

    fit_slope(chronological, scale).map(|scaled| scaled * scale)
}

fn fit_slope(chronological: &[f64], scale: f64) -> Option<f64> {
    let n = chronological.len() as f64;
    let mut sum_x = 0.0_f64;
    let mut sum_y = 0.0_f64;
    let mut sum_xy = 0.0_f64;
    let mut sum_x2 = 0.0_f64;

    for (index, &value) in chronological.iter().enumerate() {
        let x = index as f64;
        let y = value / scale;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator.abs() < f64::EPSILON {
        return None;
    }

    Some((n * sum_xy - sum_x * sum_y) / denominator)
}

/// Classify a slope against the fixed threshold
pub fn classify_slope(slope: f64) -> Trend {
    if slope > SLOPE_THRESHOLD {
        Trend::Increasing
    } else if slope < -SLOPE_THRESHOLD {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

/// Compute the trend of a series of readings
///
/// When `most_recent_first` is set the values are reversed into chronological
/// order before fitting; fitting newest-first data would invert the sign.
pub fn compute_trend(values: &[f64], most_recent_first: bool) -> Trend {
    let slope = if most_recent_first {
        let chronological: Vec<f64> = values.iter().rev().copied().collect();
        regression_slope(&chronological)
    } else {
        regression_slope(values)
    };

    slope.map_or(Trend::Stable, classify_slope)
}

/// Trend of every vital in a newest-first series
pub fn analyze_trends(series: &ReadingSeries) -> VitalTrends {
    let trend_of = |vital: VitalSign| compute_trend(&series.values(vital), true);

    VitalTrends {
        systolic: trend_of(VitalSign::Systolic),
        diastolic: trend_of(VitalSign::Diastolic),
        glucose: trend_of(VitalSign::Glucose),
        heart_rate: trend_of(VitalSign::HeartRate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::reading::Reading;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_insufficient_data_is_stable() {
        assert_eq!(compute_trend(&[], true), Trend::Stable);
        assert_eq!(compute_trend(&[], false), Trend::Stable);
        assert_eq!(compute_trend(&[142.0], true), Trend::Stable);
        assert_eq!(regression_slope(&[142.0]), None);
    }

    #[test]
    fn test_rising_over_time_from_newest_first_input() {
        // Chronologically 110, 115, 120, 125, 130
        let newest_first = [130.0, 125.0, 120.0, 115.0, 110.0];
        assert_eq!(compute_trend(&newest_first, true), Trend::Increasing);

        let slope = regression_slope(&[110.0, 115.0, 120.0, 125.0, 130.0]).unwrap();
        assert!((slope - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_falling_over_time_from_newest_first_input() {
        // Chronologically 130, 125, 118, 112, 110
        let newest_first = [110.0, 112.0, 118.0, 125.0, 130.0];
        assert_eq!(compute_trend(&newest_first, true), Trend::Decreasing);

        let slope = regression_slope(&[130.0, 125.0, 118.0, 112.0, 110.0]).unwrap();
        assert!((slope + 5.3).abs() < 1e-9);
    }

    #[test]
    fn test_flat_series_is_stable() {
        assert_eq!(compute_trend(&[100.0, 101.0, 99.0, 100.0, 100.0], true), Trend::Stable);
    }

    #[test]
    fn test_order_flag_flips_direction() {
        let values = [100.0, 102.0, 104.0, 106.0, 108.0];
        assert_eq!(compute_trend(&values, false), Trend::Increasing);
        assert_eq!(compute_trend(&values, true), Trend::Decreasing);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // Slope of exactly 0.5 stays stable
        assert_eq!(classify_slope(0.5), Trend::Stable);
        assert_eq!(classify_slope(-0.5), Trend::Stable);
        assert_eq!(classify_slope(0.51), Trend::Increasing);
        assert_eq!(classify_slope(-0.51), Trend::Decreasing);
        assert_eq!(compute_trend(&[100.0, 100.5], false), Trend::Stable);
        assert_eq!(compute_trend(&[100.0, 101.0], false), Trend::Increasing);
    }

    #[test]
    fn test_huge_values_keep_their_direction() {
        // These sums overflow f64 when fitted directly
        let rising = [-1e308, 0.0, 1e308];
        let slope = regression_slope(&rising).unwrap();
        assert!(slope.is_finite());
        assert_eq!(compute_trend(&rising, false), Trend::Increasing);
        assert_eq!(compute_trend(&rising, true), Trend::Decreasing);

        let flat = [1e308, 1e308, 1e308];
        assert!(!regression_slope(&flat).unwrap().is_nan());
        assert_eq!(compute_trend(&flat, true), Trend::Stable);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let values = [118.0, 123.0, 121.0, 127.0, 119.0];
        let first = regression_slope(&values).unwrap();
        let second = regression_slope(&values).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(compute_trend(&values, true), compute_trend(&values, true));
    }

    #[test]
    fn test_analyze_trends_per_vital() {
        let base = Utc.with_ymd_and_hms(2024, 1, 10, 7, 0, 0).unwrap();
        // Systolic rising, glucose falling, the rest flat
        let readings = (0..5)
            .map(|day| {
                Reading::new(
                    base + Duration::days(day),
                    110 + 5 * day as u16,
                    80,
                    140 - 6 * day as u16,
                    70,
                )
                .unwrap()
            })
            .collect();
        let series = ReadingSeries::from_unordered(readings);

        let trends = analyze_trends(&series);
        assert_eq!(trends.systolic, Trend::Increasing);
        assert_eq!(trends.diastolic, Trend::Stable);
        assert_eq!(trends.glucose, Trend::Decreasing);
        assert_eq!(trends.heart_rate, Trend::Stable);
    }
}
