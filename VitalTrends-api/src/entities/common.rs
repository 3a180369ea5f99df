use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidationErrors;

use vital_trends_domain::errors::AnalyticsError;
use vital_trends_domain::services::SummaryError;

/// Error response format for API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code - machine-readable identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a validation error response
    pub fn validation_error(message: &str, details: Option<serde_json::Value>) -> Self {
        Self {
            error: "validation_error".to_string(),
            message: message.to_string(),
            details,
        }
    }

    /// Create a bad request error response
    pub fn bad_request(message: &str) -> Self {
        Self {
            error: "bad_request".to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// Create a no data error response
    pub fn no_data() -> Self {
        Self {
            error: "no_data".to_string(),
            message: AnalyticsError::EmptySeries.to_string(),
            details: None,
        }
    }

    /// Create an internal error response
    pub fn internal_error(message: &str) -> Self {
        Self {
            error: "internal_error".to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// HTTP status for the error code
    pub fn status(&self) -> StatusCode {
        match self.error.as_str() {
            "no_data" => StatusCode::NOT_FOUND,
            "validation_error" | "bad_request" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<AnalyticsError> for ErrorResponse {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::EmptySeries => ErrorResponse::no_data(),
            AnalyticsError::InvalidReading { field, .. } => ErrorResponse::validation_error(
                &err.to_string(),
                Some(serde_json::json!({ "field": field })),
            ),
        }
    }
}

impl From<SummaryError> for ErrorResponse {
    fn from(err: SummaryError) -> Self {
        match err {
            SummaryError::Analytics(inner) => inner.into(),
            SummaryError::Generation(_) => ErrorResponse::internal_error("Failed to generate health summary"),
        }
    }
}

impl From<JsonRejection> for ErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        ErrorResponse::bad_request(&rejection.body_text())
    }
}

impl From<ValidationErrors> for ErrorResponse {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, errors)| {
                let error_msgs: Vec<String> = errors
                    .iter()
                    .map(|err| match &err.message {
                        Some(msg) => msg.to_string(),
                        None => format!("Invalid {}", field),
                    })
                    .collect();
                format!("{}: {}", field, error_msgs.join(", "))
            })
            .collect::<Vec<String>>()
            .join("; ");

        let message = if message.is_empty() {
            "Request validation failed".to_string()
        } else {
            message
        };

        ErrorResponse::validation_error(&message, serde_json::to_value(&errors).ok())
    }
}
