//! Axum-specific error types and mappings.
//!
//! Maps [`SynthesisFailure`] and request-validation problems to HTTP status
//! codes and a single JSON body shape.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use vocalis_core::SynthesisFailure;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A classified synthesis failure.
    #[error(transparent)]
    Synthesis(#[from] SynthesisFailure),

    /// Request parameters missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HttpError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Synthesis(failure) => match failure {
                SynthesisFailure::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                SynthesisFailure::InvalidInput { .. } => StatusCode::BAD_REQUEST,
                SynthesisFailure::SynthesisError { .. }
                | SynthesisFailure::SynthesisIncomplete => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable error type discriminant, if this error has one.
    pub const fn error_type(&self) -> Option<&'static str> {
        match self {
            Self::Synthesis(failure) => Some(failure.kind()),
            Self::Validation(_) => Some("VALIDATION_ERROR"),
            Self::Internal(_) => None,
        }
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
    /// Stable error type discriminant for client-side handling
    #[serde(skip_serializing_if = "Option::is_none", rename = "type")]
    error_type: Option<&'static str>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
            status: status.as_u16(),
            error_type: self.error_type(),
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn failures_map_to_distinct_statuses() {
        let cases = [
            (
                HttpError::from(SynthesisFailure::ServiceUnavailable),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                HttpError::from(SynthesisFailure::InvalidInput {
                    reference: PathBuf::from("input.wav"),
                }),
                StatusCode::BAD_REQUEST,
            ),
            (
                HttpError::from(SynthesisFailure::SynthesisError {
                    detail: "boom".to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                HttpError::from(SynthesisFailure::SynthesisIncomplete),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                HttpError::Validation("missing text".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status_code(), expected, "{err}");
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn synthesis_message_is_passed_through() {
        let err = HttpError::from(SynthesisFailure::SynthesisIncomplete);
        assert_eq!(err.to_string(), "Speech file generation failed.");
        assert_eq!(err.error_type(), Some("SYNTHESIS_INCOMPLETE"));
        assert_eq!(HttpError::Internal("x".to_string()).error_type(), None);
    }
}
