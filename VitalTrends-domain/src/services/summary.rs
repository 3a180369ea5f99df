//! Narrative health summaries
//!
//! Summary generation sits behind [`SummaryGenerator`] so a language-model
//! backed generator can be injected where the deterministic template is not
//! enough. Nothing here holds a global client.

use std::cmp::Ordering;
use std::fmt::Write as _;

use async_trait::async_trait;
use thiserror::Error;

use crate::entities::reading::VitalSign;
use crate::entities::report::{AdvancedReport, VitalAverages};
use crate::entities::trend::Trend;
use crate::errors::AnalyticsError;

/// Inclusive bounds shown to the reader as the normal range of a vital
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceRange {
    pub min: u16,
    pub max: u16,
}

impl ReferenceRange {
    /// Whether `value` lies within the bounds
    pub fn contains(&self, value: i64) -> bool {
        self.position(value) == Ordering::Equal
    }

    /// `Less` below the range, `Greater` above it, `Equal` within
    pub fn position(&self, value: i64) -> Ordering {
        if value < i64::from(self.min) {
            Ordering::Less
        } else if value > i64::from(self.max) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

pub const SYSTOLIC_RANGE: ReferenceRange = ReferenceRange { min: 90, max: 120 };
pub const DIASTOLIC_RANGE: ReferenceRange = ReferenceRange { min: 60, max: 80 };
pub const GLUCOSE_RANGE: ReferenceRange = ReferenceRange { min: 70, max: 99 };
pub const HEART_RATE_RANGE: ReferenceRange = ReferenceRange { min: 60, max: 100 };

const RECOMMENDATIONS: [&str; 5] = [
    "Continue regular monitoring of vital signs",
    "Maintain a balanced diet low in sodium and refined sugars",
    "Exercise for at least 30 minutes daily",
    "Stay well-hydrated throughout the day",
    "Consider scheduling a follow-up with a healthcare provider",
];

const DISCLAIMER: &str =
    "This report is generated based on limited data and should not replace professional medical advice.";

/// Summary generation errors
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The underlying report could not be produced
    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),

    /// The generator failed to produce text
    #[error("Summary generation failed: {0}")]
    Generation(String),
}

/// Everything a generator needs to write a summary
#[derive(Debug, Clone)]
pub struct SummaryInput {
    /// Display name of the person the readings belong to
    pub subject: Option<String>,
    pub report: AdvancedReport,
}

/// Trait for producing a narrative summary from a report
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SummaryGenerator {
    /// Render a markdown summary
    async fn generate(&self, input: &SummaryInput) -> Result<String, SummaryError>;
}

/// Deterministic markdown summary built from fixed templates
#[derive(Debug, Clone, Default)]
pub struct TemplateSummaryGenerator;

impl TemplateSummaryGenerator {
    pub fn new() -> Self {
        Self
    }

    fn status_label(normal: bool) -> &'static str {
        if normal {
            "(Normal)"
        } else {
            "(Outside normal range)"
        }
    }

    fn trend_phrase(trend: Trend) -> &'static str {
        match trend {
            Trend::Increasing => "trending up",
            Trend::Decreasing => "trending down",
            Trend::Stable => "holding steady",
        }
    }

    /// Assessment sentences comparing the averaged vitals with the reference ranges
    fn assessment(averages: &VitalAverages) -> [&'static str; 3] {
        let systolic = SYSTOLIC_RANGE.position(averages.systolic);
        let diastolic = DIASTOLIC_RANGE.position(averages.diastolic);

        let blood_pressure = if systolic == Ordering::Greater || diastolic == Ordering::Greater {
            "The blood pressure readings are elevated and warrant monitoring."
        } else if systolic == Ordering::Less || diastolic == Ordering::Less {
            "The blood pressure readings are lower than normal and warrant monitoring."
        } else {
            "The blood pressure readings are within normal range."
        };
        let glucose = match GLUCOSE_RANGE.position(averages.glucose) {
            Ordering::Greater => "The blood sugar levels are elevated. Consider dietary adjustments.",
            Ordering::Less => "The blood sugar levels are lower than normal. Consider dietary adjustments.",
            Ordering::Equal => "The blood sugar levels are within acceptable range.",
        };
        let heart_rate = match HEART_RATE_RANGE.position(averages.heart_rate) {
            Ordering::Greater => "The heart rate is elevated. Consider stress reduction techniques.",
            Ordering::Less => "The heart rate is lower than normal. Consider consulting a healthcare provider.",
            Ordering::Equal => "The heart rate is within normal parameters.",
        };

        [blood_pressure, glucose, heart_rate]
    }

    /// Render the summary as markdown
    pub fn render(&self, input: &SummaryInput) -> Result<String, SummaryError> {
        let mut out = String::new();
        Self::write_markdown(&mut out, input)?;
        Ok(out)
    }

    fn write_markdown(out: &mut String, input: &SummaryInput) -> Result<(), SummaryError> {
        let report = &input.report;
        let latest = report.latest().ok_or(AnalyticsError::EmptySeries)?;
        let subject = input.subject.as_deref().map(str::trim).filter(|name| !name.is_empty());
        let blood_pressure_normal = SYSTOLIC_RANGE.contains(i64::from(latest.systolic()))
            && DIASTOLIC_RANGE.contains(i64::from(latest.diastolic()));

        let write = |out: &mut String| -> std::fmt::Result {
            match subject {
                Some(name) => writeln!(out, "# Health Report for {}", name)?,
                None => writeln!(out, "# Health Report")?,
            }
            writeln!(out)?;
            writeln!(out, "## Summary")?;
            let whose = subject.map(|name| format!(" for {}", name)).unwrap_or_default();
            writeln!(
                out,
                "This report analyzes the health metrics{} based on {} recorded entries ({} to {}).",
                whose, report.reading_count, report.date_range.start, report.date_range.end
            )?;
            writeln!(out)?;
            writeln!(out, "## Latest Measurements")?;
            writeln!(
                out,
                "- **Blood Pressure**: {}/{} {} {}",
                latest.systolic(),
                latest.diastolic(),
                VitalSign::Systolic.unit(),
                Self::status_label(blood_pressure_normal)
            )?;
            writeln!(
                out,
                "- **Blood Sugar**: {} {} {}",
                latest.glucose(),
                VitalSign::Glucose.unit(),
                Self::status_label(GLUCOSE_RANGE.contains(i64::from(latest.glucose())))
            )?;
            writeln!(
                out,
                "- **Heart Rate**: {} {} {}",
                latest.heart_rate(),
                VitalSign::HeartRate.unit(),
                Self::status_label(HEART_RATE_RANGE.contains(i64::from(latest.heart_rate())))
            )?;
            writeln!(out, "- **Date Recorded**: {}", latest.timestamp().format("%Y-%m-%d %H:%M UTC"))?;
            writeln!(out)?;
            writeln!(out, "## Normal Ranges")?;
            writeln!(
                out,
                "- **Blood Pressure**: {}-{}/{}-{} mmHg",
                SYSTOLIC_RANGE.min, SYSTOLIC_RANGE.max, DIASTOLIC_RANGE.min, DIASTOLIC_RANGE.max
            )?;
            writeln!(out, "- **Blood Sugar**: {}-{} mg/dL", GLUCOSE_RANGE.min, GLUCOSE_RANGE.max)?;
            writeln!(out, "- **Heart Rate**: {}-{} bpm", HEART_RATE_RANGE.min, HEART_RATE_RANGE.max)?;
            writeln!(out)?;
            writeln!(out, "## Historical Trends")?;
            writeln!(
                out,
                "Average blood pressure is {}/{} mmHg (systolic {}, diastolic {}), average blood sugar is {} mg/dL ({}), and average heart rate is {} bpm ({}).",
                report.averages.systolic,
                report.averages.diastolic,
                Self::trend_phrase(report.trends.systolic),
                Self::trend_phrase(report.trends.diastolic),
                report.averages.glucose,
                Self::trend_phrase(report.trends.glucose),
                report.averages.heart_rate,
                Self::trend_phrase(report.trends.heart_rate),
            )?;
            writeln!(out)?;
            writeln!(out, "## Assessment")?;
            for sentence in Self::assessment(&report.averages) {
                writeln!(out, "{}", sentence)?;
            }
            writeln!(out)?;
            writeln!(out, "## Insights")?;
            for insight in &report.insights {
                writeln!(out, "- {}", insight)?;
            }
            writeln!(out)?;
            writeln!(out, "## Recommendations")?;
            for (index, recommendation) in RECOMMENDATIONS.iter().enumerate() {
                writeln!(out, "{}. {}", index + 1, recommendation)?;
            }
            writeln!(out)?;
            writeln!(out, "## Disclaimer")?;
            write!(out, "{}", DISCLAIMER)
        };

        write(out).map_err(|e| SummaryError::Generation(e.to_string()))
    }
}

#[async_trait]
impl SummaryGenerator for TemplateSummaryGenerator {
    async fn generate(&self, input: &SummaryInput) -> Result<String, SummaryError> {
        self.render(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::reading::{Reading, ReadingSeries};
    use crate::services::report::{HealthReportServiceTrait, ReportService};
    use chrono::{Duration, TimeZone, Utc};

    fn sample_report(systolic: &[u16], glucose: u16) -> AdvancedReport {
        let base = Utc.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap();
        let readings = systolic
            .iter()
            .enumerate()
            .map(|(day, &value)| {
                Reading::new(base + Duration::days(day as i64), value, 78, glucose, 74).unwrap()
            })
            .collect();
        ReportService::default()
            .generate_report(&ReadingSeries::from_unordered(readings))
            .unwrap()
    }

    #[tokio::test]
    async fn test_template_summary_sections() {
        let input = SummaryInput {
            subject: Some("Alex".to_string()),
            report: sample_report(&[128, 132, 138, 142, 146], 104),
        };

        let summary = TemplateSummaryGenerator::new().generate(&input).await.unwrap();

        assert!(summary.starts_with("# Health Report for Alex"));
        assert!(summary.contains("based on 5 recorded entries (2024-07-01 to 2024-07-05)"));
        assert!(summary.contains("- **Blood Pressure**: 146/78 mmHg (Outside normal range)"));
        assert!(summary.contains("- **Blood Sugar**: 104 mg/dL (Outside normal range)"));
        assert!(summary.contains("- **Heart Rate**: 74 bpm (Normal)"));
        assert!(summary.contains("- **Blood Pressure**: 90-120/60-80 mmHg"));
        assert!(summary.contains("systolic trending up"));
        assert!(summary.contains("The blood sugar levels are elevated."));
        assert!(summary.contains("1. Continue regular monitoring of vital signs"));
        assert!(summary.ends_with(DISCLAIMER));
    }

    #[tokio::test]
    async fn test_template_summary_defaults_subject() {
        let input = SummaryInput {
            subject: None,
            report: sample_report(&[118], 90),
        };

        let summary = TemplateSummaryGenerator::new().generate(&input).await.unwrap();
        assert!(summary.starts_with("# Health Report\n"));
        assert!(summary.contains("This report analyzes the health metrics based on 1 recorded entries"));
        assert!(!summary.contains(" for you"));
        assert!(summary.contains("The blood pressure readings are within normal range."));
        assert!(summary.contains("The heart rate is within normal parameters."));
    }

    #[test]
    fn test_labels_follow_reference_ranges() {
        let base = Utc.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap();
        let readings = vec![Reading::new(base, 130, 85, 65, 70).unwrap()];
        let input = SummaryInput {
            subject: Some("Robin".to_string()),
            report: ReportService::default()
                .generate_report(&ReadingSeries::from_unordered(readings))
                .unwrap(),
        };

        let summary = TemplateSummaryGenerator::new().render(&input).unwrap();

        assert!(summary.contains("- **Blood Pressure**: 130/85 mmHg (Outside normal range)"));
        assert!(summary.contains("- **Blood Sugar**: 65 mg/dL (Outside normal range)"));
        assert!(summary.contains("- **Heart Rate**: 70 bpm (Normal)"));
        assert!(summary.contains("The blood pressure readings are elevated and warrant monitoring."));
        assert!(summary.contains("The blood sugar levels are lower than normal."));
        assert!(summary.contains("The heart rate is within normal parameters."));
    }

    #[test]
    fn test_reference_range_bounds_are_inclusive() {
        assert!(SYSTOLIC_RANGE.contains(90));
        assert!(SYSTOLIC_RANGE.contains(120));
        assert_eq!(SYSTOLIC_RANGE.position(89), Ordering::Less);
        assert_eq!(SYSTOLIC_RANGE.position(121), Ordering::Greater);
        assert!(!GLUCOSE_RANGE.contains(100));
    }

    #[test]
    fn test_render_is_deterministic() {
        let input = SummaryInput {
            subject: Some("Sam".to_string()),
            report: sample_report(&[120, 121, 119], 95),
        };
        let generator = TemplateSummaryGenerator::new();
        assert_eq!(generator.render(&input).unwrap(), generator.render(&input).unwrap());
    }

    #[tokio::test]
    async fn test_generator_can_be_mocked() {
        let mut generator = MockSummaryGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_| Err(SummaryError::Generation("model unavailable".to_string())));

        let input = SummaryInput {
            subject: None,
            report: sample_report(&[120], 95),
        };
        let err = generator.generate(&input).await.unwrap_err();
        assert_eq!(err.to_string(), "Summary generation failed: model unavailable");
    }
}
