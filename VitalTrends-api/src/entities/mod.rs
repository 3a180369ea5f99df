// Public entities for the VitalTrends API
// This module contains data structures that are shared across the application boundary

// Health log records and report requests
pub mod health_log;

// Single-series analytics requests and responses
pub mod analytics;

// Common entities for error handling
pub mod common;
