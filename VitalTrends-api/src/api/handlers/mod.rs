pub mod analytics;
pub mod health;
pub mod reports;

use axum::extract::rejection::JsonRejection;
use tracing::warn;

use crate::entities::common::ErrorResponse;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use analytics::{compute_average, compute_trend, generate_insights};
pub use health::health_check;
pub use reports::{generate_advanced_report, generate_summary};

/// Log a malformed body and turn it into a `bad_request` error
pub(crate) fn reject_payload(rejection: JsonRejection) -> ErrorResponse {
    warn!("Rejected request body: {}", rejection.body_text());
    ErrorResponse::from(rejection)
}
