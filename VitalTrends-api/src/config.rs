//! Application configuration
//!
//! Values come from the process environment, after `.env` has been loaded by
//! the binary. Unparseable values fall back to their defaults with a warning
//! so a typo never prevents the server from starting.

use thiserror::Error;
use tracing::warn;

use vital_trends_domain::services::report::DEFAULT_WINDOW_SIZE;

/// Default port the server listens on
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("Invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration of the API server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind on all interfaces
    pub port: u16,

    /// Deployment environment reported by the health check
    pub environment: String,

    /// How many of the most recent logs a report analyses
    pub report_window_size: usize,

    /// Allowed CORS origin; any origin when unset
    pub cors_allow_origin: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            environment: "development".to_string(),
            report_window_size: DEFAULT_WINDOW_SIZE,
            cors_allow_origin: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = parse_or_default(&lookup, "PORT", defaults.port, |value| {
            value.parse::<u16>().map_err(|e| e.to_string())
        });

        let report_window_size = parse_or_default(
            &lookup,
            "REPORT_WINDOW_SIZE",
            defaults.report_window_size,
            |value| match value.parse::<usize>() {
                Ok(0) => Err("must be at least 1".to_string()),
                Ok(size) => Ok(size),
                Err(e) => Err(e.to_string()),
            },
        );

        let environment = lookup("APP_ENV")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.environment);

        let cors_allow_origin = lookup("CORS_ALLOW_ORIGIN")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty() && value != "*");

        Self {
            port,
            environment,
            report_window_size,
            cors_allow_origin,
        }
    }
}

/// Parse a variable, logging and falling back to `default` when it is invalid
fn parse_or_default<T, L, P>(lookup: &L, name: &'static str, default: T, parse: P) -> T
where
    L: Fn(&str) -> Option<String>,
    P: Fn(&str) -> Result<T, String>,
{
    match parse_var(lookup, name, parse) {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(e) => {
            warn!("{}; using default", e);
            default
        }
    }
}

fn parse_var<T, L, P>(lookup: &L, name: &'static str, parse: P) -> Result<Option<T>, ConfigError>
where
    L: Fn(&str) -> Option<String>,
    P: Fn(&str) -> Result<T, String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };

    parse(raw.trim())
        .map(Some)
        .map_err(|reason| ConfigError::InvalidValue {
            name,
            value: raw,
            reason,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.port, 3000);
        assert_eq!(config.report_window_size, 5);
    }

    #[test]
    fn test_reads_all_values() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("APP_ENV", "production"),
            ("REPORT_WINDOW_SIZE", "7"),
            ("CORS_ALLOW_ORIGIN", "https://app.example.com"),
        ]));

        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, "production");
        assert_eq!(config.report_window_size, 7);
        assert_eq!(config.cors_allow_origin.as_deref(), Some("https://app.example.com"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "not-a-port"),
            ("REPORT_WINDOW_SIZE", "0"),
            ("CORS_ALLOW_ORIGIN", "*"),
        ]));

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.report_window_size, DEFAULT_WINDOW_SIZE);
        assert!(config.cors_allow_origin.is_none());
    }

    #[test]
    fn test_parse_var_reports_name_and_value() {
        let lookup = lookup_from(&[("PORT", "70000")]);
        let err = parse_var(&lookup, "PORT", |v| v.parse::<u16>().map_err(|e| e.to_string())).unwrap_err();
        assert!(err.to_string().starts_with("Invalid value for PORT: \"70000\""));
    }
}
