//! Domain layer health check functionality
//! This module provides health check services for the application

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use tracing::warn;

use crate::entities::reading::{Reading, ReadingSeries};
use crate::entities::trend::Trend;
use crate::services::report::{HealthReportServiceTrait, ReportService};

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is functioning but with reduced performance
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

impl SystemHealth {
    /// Build system health from components; the worst component wins
    pub fn from_components(components: HashMap<String, HealthComponent>) -> Self {
        let status = if components.values().any(|c| c.status == ComponentStatus::Unhealthy) {
            SystemStatus::Unhealthy
        } else if components.values().any(|c| c.status == ComponentStatus::Degraded) {
            SystemStatus::Degraded
        } else {
            SystemStatus::Healthy
        };

        Self { status, components }
    }
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;

    /// Check the analytics core against known results
    /// Returns Ok(()) when every check matches, or a description of the first mismatch
    async fn check_analytics_status(&self) -> Result<(), String>;
}

/// Run the analytics core on a fixed series and compare with known answers
///
/// The series rises by 5 mmHg systolic per day, so the trend must be
/// increasing and the average 120.
pub fn check_analytics_status() -> Result<(), String> {
    let base = Utc
        .with_ymd_and_hms(2024, 1, 1, 8, 0, 0)
        .single()
        .ok_or_else(|| "Could not build self-check timestamp".to_string())?;

    let readings = (0..5)
        .map(|day| Reading::new(base + Duration::days(day), 110 + 5 * day as u16, 80, 95, 70))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("Could not build self-check readings: {}", e))?;

    let service = ReportService::default();
    let report = service
        .generate_report(&ReadingSeries::from_unordered(readings))
        .map_err(|e| format!("Report generation failed: {}", e))?;

    if report.trends.systolic != Trend::Increasing {
        return Err(format!("Expected increasing systolic trend, got {}", report.trends.systolic));
    }
    if report.averages.systolic != 120 {
        return Err(format!("Expected systolic average 120, got {}", report.averages.systolic));
    }
    if report.insights.len() != 3 {
        return Err(format!("Expected 3 insights, got {}", report.insights.len()));
    }
    if service.average(&[]).is_ok() {
        return Err("Average of an empty series must be an error".to_string());
    }

    Ok(())
}

/// Get overall system health
pub async fn get_system_health() -> SystemHealth {
    let analytics_component = match check_analytics_status() {
        Ok(()) => HealthComponent {
            status: ComponentStatus::Healthy,
            details: None,
        },
        Err(e) => {
            warn!("Analytics self-check failed: {}", e);
            HealthComponent {
                status: ComponentStatus::Unhealthy,
                details: Some(e),
            }
        }
    };

    SystemHealth::from_components(
        vec![("analytics".to_string(), analytics_component)]
            .into_iter()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analytics_self_check_passes() {
        assert_eq!(check_analytics_status(), Ok(()));
    }

    #[tokio::test]
    async fn test_get_system_health() {
        let health = get_system_health().await;
        assert_eq!(health.status, SystemStatus::Healthy);
        assert!(health.components.contains_key("analytics"));
    }

    #[test]
    fn test_worst_component_wins() {
        let mut components = HashMap::new();
        components.insert(
            "analytics".to_string(),
            HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
        );
        components.insert(
            "summary".to_string(),
            HealthComponent {
                status: ComponentStatus::Degraded,
                details: Some("Slow responses".to_string()),
            },
        );
        assert_eq!(SystemHealth::from_components(components.clone()).status, SystemStatus::Degraded);

        components.insert(
            "api".to_string(),
            HealthComponent {
                status: ComponentStatus::Unhealthy,
                details: None,
            },
        );
        assert_eq!(SystemHealth::from_components(components).status, SystemStatus::Unhealthy);
    }
}
