use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use crate::errors::AnalyticsError;

/// The four numeric vitals tracked per reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VitalSign {
    /// Systolic blood pressure in mmHg
    Systolic,
    /// Diastolic blood pressure in mmHg
    Diastolic,
    /// Blood glucose in mg/dL
    Glucose,
    /// Heart rate in beats per minute
    HeartRate,
}

impl VitalSign {
    /// Unit the vital is recorded in
    pub fn unit(self) -> &'static str {
        match self {
            VitalSign::Systolic | VitalSign::Diastolic => "mmHg",
            VitalSign::Glucose => "mg/dL",
            VitalSign::HeartRate => "bpm",
        }
    }
}

/// A single vitals observation
///
/// Fields are private so a reading cannot change after [`Reading::new`]
/// has checked it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Reading {
    /// When the observation was recorded
    timestamp: DateTime<Utc>,

    /// Systolic blood pressure (mmHg)
    systolic: u16,

    /// Diastolic blood pressure (mmHg)
    diastolic: u16,

    /// Blood glucose (mg/dL)
    glucose: u16,

    /// Heart rate (bpm)
    heart_rate: u16,

    /// Optional free-text notes
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl Reading {
    /// Create a reading, rejecting any vital that is zero
    pub fn new(
        timestamp: DateTime<Utc>,
        systolic: u16,
        diastolic: u16,
        glucose: u16,
        heart_rate: u16,
    ) -> Result<Self, AnalyticsError> {
        for (field, value) in [
            ("systolic", systolic),
            ("diastolic", diastolic),
            ("glucose", glucose),
            ("heart_rate", heart_rate),
        ] {
            if value == 0 {
                return Err(AnalyticsError::invalid(field, "must be greater than zero"));
            }
        }

        Ok(Self {
            timestamp,
            systolic,
            diastolic,
            glucose,
            heart_rate,
            notes: None,
        })
    }

    /// Attach notes to the reading
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn systolic(&self) -> u16 {
        self.systolic
    }

    pub fn diastolic(&self) -> u16 {
        self.diastolic
    }

    pub fn glucose(&self) -> u16 {
        self.glucose
    }

    pub fn heart_rate(&self) -> u16 {
        self.heart_rate
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Value of one vital
    pub fn value(&self, vital: VitalSign) -> u16 {
        match vital {
            VitalSign::Systolic => self.systolic,
            VitalSign::Diastolic => self.diastolic,
            VitalSign::Glucose => self.glucose,
            VitalSign::HeartRate => self.heart_rate,
        }
    }
}

/// Calendar span covered by a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct DateRange {
    /// Date of the oldest reading
    pub start: NaiveDate,
    /// Date of the newest reading
    pub end: NaiveDate,
}

/// Readings for one subject, ordered newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingSeries {
    readings: Vec<Reading>,
}

impl ReadingSeries {
    /// Wrap readings that the caller already ordered newest first
    pub fn from_newest_first(readings: Vec<Reading>) -> Self {
        Self { readings }
    }

    /// Order readings newest first by timestamp
    ///
    /// The sort is stable, so readings sharing a timestamp keep their
    /// relative input order.
    pub fn from_unordered(mut readings: Vec<Reading>) -> Self {
        readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Self { readings }
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// The most recent reading, if any
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.readings.iter()
    }

    /// Keep only the `count` most recent readings
    pub fn most_recent(&self, count: usize) -> ReadingSeries {
        let end = count.min(self.readings.len());
        Self {
            readings: self.readings[..end].to_vec(),
        }
    }

    /// Values of one vital, newest first
    pub fn values(&self, vital: VitalSign) -> Vec<f64> {
        self.readings
            .iter()
            .map(|reading| f64::from(reading.value(vital)))
            .collect()
    }

    /// Dates of the oldest and newest readings
    pub fn date_range(&self) -> Option<DateRange> {
        let newest = self.readings.first()?;
        let oldest = self.readings.last()?;
        Some(DateRange {
            start: oldest.timestamp.date_naive(),
            end: newest.timestamp.date_naive(),
        })
    }

    pub fn into_inner(self) -> Vec<Reading> {
        self.readings
    }
}
