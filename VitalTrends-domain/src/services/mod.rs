pub mod insights;
pub mod report;
pub mod statistics;
pub mod summary;
pub mod trends;

// Domain services
// This module contains the analytics implementations.

// Re-export service traits and factory functions
pub use report::{create_default_report_service, HealthReportServiceTrait, ReportService, ReportSettings};
pub use summary::{SummaryGenerator, SummaryError, SummaryInput, TemplateSummaryGenerator};
