// VitalTrends Domain
// This crate contains the analytics logic for the VitalTrends application

// Services that implement the analytics
pub mod services;

// Domain entities
pub mod entities;

// Domain errors
pub mod errors;

// Health checks and system status
pub mod health;

// Testing utilities - only available with mock feature
#[cfg(feature = "mock")]
pub mod testing;

pub use errors::AnalyticsError;
