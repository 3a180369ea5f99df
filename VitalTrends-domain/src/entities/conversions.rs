use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::reading::{Reading, ReadingSeries};
use crate::errors::AnalyticsError;

// Conversion functions from loosely typed health log payloads into domain readings
// These functions follow the pattern convert_to_[target_layer]_[model_name]

/// A health log as supplied by the data layer or an API client
///
/// Numeric fields are plain JSON numbers and may hold anything; they are
/// checked when converted into a [`Reading`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawHealthLog {
    pub id: Option<Uuid>,
    pub date: Option<DateTime<Utc>>,
    pub blood_pressure_systolic: f64,
    pub blood_pressure_diastolic: f64,
    pub glucose_level: f64,
    pub heart_rate: f64,
    pub notes: Option<String>,
}

/// Check a raw vital and narrow it to `u16`
///
/// Rejects non-finite, fractional, non-positive and out-of-range values
/// rather than letting them reach the analyzers.
pub fn parse_vital(field: &'static str, value: f64) -> Result<u16, AnalyticsError> {
    if !value.is_finite() {
        return Err(AnalyticsError::invalid(field, "must be a finite number"));
    }
    if value.fract() != 0.0 {
        return Err(AnalyticsError::invalid(field, "must be a whole number"));
    }
    if value < 1.0 {
        return Err(AnalyticsError::invalid(field, "must be greater than zero"));
    }
    if value > f64::from(u16::MAX) {
        return Err(AnalyticsError::invalid(
            field,
            format!("must not exceed {}", u16::MAX),
        ));
    }
    Ok(value as u16)
}

/// Convert a raw health log into a domain reading
///
/// `received_at` stands in for a missing `date`, matching how a log created
/// without a date is stamped with the current time.
pub fn convert_to_domain_reading(
    raw: RawHealthLog,
    received_at: DateTime<Utc>,
) -> Result<Reading, AnalyticsError> {
    let systolic = parse_vital("blood_pressure_systolic", raw.blood_pressure_systolic)?;
    let diastolic = parse_vital("blood_pressure_diastolic", raw.blood_pressure_diastolic)?;
    let glucose = parse_vital("glucose_level", raw.glucose_level)?;
    let heart_rate = parse_vital("heart_rate", raw.heart_rate)?;

    let reading = Reading::new(
        raw.date.unwrap_or(received_at),
        systolic,
        diastolic,
        glucose,
        heart_rate,
    )?;

    Ok(reading.with_notes(raw.notes))
}

/// Convert a batch of raw logs into a newest-first series
///
/// Fails on the first invalid log; nothing partial is returned.
pub fn convert_to_domain_series(
    raw_logs: Vec<RawHealthLog>,
    received_at: DateTime<Utc>,
) -> Result<ReadingSeries, AnalyticsError> {
    let readings = raw_logs
        .into_iter()
        .map(|raw| convert_to_domain_reading(raw, received_at))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ReadingSeries::from_unordered(readings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw_log(systolic: f64, glucose: f64) -> RawHealthLog {
        RawHealthLog {
            id: None,
            date: Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()),
            blood_pressure_systolic: systolic,
            blood_pressure_diastolic: 80.0,
            glucose_level: glucose,
            heart_rate: 72.0,
            notes: Some("After breakfast".to_string()),
        }
    }

    #[test]
    fn test_convert_to_domain_reading() {
        let reading = convert_to_domain_reading(raw_log(121.0, 98.0), Utc::now()).unwrap();

        assert_eq!(reading.systolic(), 121);
        assert_eq!(reading.diastolic(), 80);
        assert_eq!(reading.glucose(), 98);
        assert_eq!(reading.heart_rate(), 72);
        assert_eq!(reading.notes(), Some("After breakfast"));
        assert_eq!(
            reading.timestamp(),
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_missing_date_uses_received_time() {
        let received_at = Utc.with_ymd_and_hms(2024, 6, 2, 12, 0, 0).unwrap();
        let raw = RawHealthLog {
            date: None,
            ..raw_log(120.0, 90.0)
        };

        let reading = convert_to_domain_reading(raw, received_at).unwrap();
        assert_eq!(reading.timestamp(), received_at);
    }

    #[test]
    fn test_parse_vital_rejects_bad_values() {
        assert!(parse_vital("heart_rate", f64::NAN).unwrap_err().to_string().contains("finite"));
        assert!(parse_vital("heart_rate", f64::INFINITY).is_err());
        assert!(parse_vital("heart_rate", 72.5).unwrap_err().to_string().contains("whole number"));
        assert!(parse_vital("heart_rate", 0.0).unwrap_err().to_string().contains("greater than zero"));
        assert!(parse_vital("heart_rate", -12.0).is_err());
        assert!(parse_vital("heart_rate", 70_000.0).unwrap_err().to_string().contains("exceed"));
        assert_eq!(parse_vital("heart_rate", 1.0).unwrap(), 1);
    }

    #[test]
    fn test_convert_names_offending_field() {
        let err = convert_to_domain_reading(raw_log(120.0, 0.0), Utc::now()).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::invalid("glucose_level", "must be greater than zero")
        );
    }

    #[test]
    fn test_convert_to_domain_series_orders_and_fails_fast() {
        let earlier = RawHealthLog {
            date: Some(Utc.with_ymd_and_hms(2024, 4, 30, 9, 30, 0).unwrap()),
            ..raw_log(110.0, 90.0)
        };
        let series = convert_to_domain_series(vec![earlier, raw_log(130.0, 90.0)], Utc::now()).unwrap();
        assert_eq!(series.latest().map(|r| r.systolic()), Some(130));

        let result = convert_to_domain_series(vec![raw_log(130.0, 90.0), raw_log(f64::NAN, 90.0)], Utc::now());
        assert!(result.is_err());
    }
}
