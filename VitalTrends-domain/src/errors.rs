use thiserror::Error;

/// Errors surfaced by the analytics core
///
/// Fewer than two points is not an error for trend computation: the trend is
/// simply `Stable`. Only an empty series or a malformed reading is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// No readings were supplied where at least one is required
    #[error("No health logs found to analyze")]
    EmptySeries,

    /// A raw value could not be mapped to a valid reading
    #[error("Invalid reading: {field} {reason}")]
    InvalidReading {
        /// Name of the offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

impl AnalyticsError {
    /// Build an invalid reading error for a field
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        AnalyticsError::InvalidReading {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AnalyticsError::EmptySeries.to_string(),
            "No health logs found to analyze"
        );

        let err = AnalyticsError::invalid("glucose_level", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Invalid reading: glucose_level must be greater than zero"
        );
    }
}
