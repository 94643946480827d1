//! API error types with IntoResponse
//!
//! Every error renders as `{"success": false, "error": <code>, "message": <text>}`.
//! Causes are logged, never echoed to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::models::ValidationError;
use crate::store::StoreError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request (400)
    BadRequest { reason: String },

    /// Resource, page or route not found (404)
    NotFound { what: String },

    /// Validation failure or a store failure inside a write/query (422)
    Unprocessable { reason: String },

    /// Quiz candidate pool is exhausted (422)
    NoCandidates,

    /// Route exists but not for this method (405)
    MethodNotAllowed,

    /// Unexpected failure (500, logged)
    Internal { message: String },
}

impl ApiError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Collapse any failure into a 422.
    pub fn unprocessable(cause: impl std::fmt::Display) -> Self {
        Self::Unprocessable {
            reason: cause.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable { .. } | Self::NoCandidates => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "Bad Request",
            Self::NotFound { .. } => "Not Found",
            Self::MethodNotAllowed => "Method Not Allowed",
            Self::Unprocessable { .. } | Self::NoCandidates => "Unable To Process",
            Self::Internal { .. } => "Internal Server Error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::BadRequest { reason } => tracing::warn!("Bad request: {}", reason),
            Self::NotFound { what } => tracing::debug!("Not found: {}", what),
            Self::MethodNotAllowed => {}
            Self::Unprocessable { reason } => tracing::warn!("Unprocessable: {}", reason),
            Self::NoCandidates => tracing::debug!("Quiz has no remaining questions"),
            Self::Internal { message } => tracing::error!("Internal error: {}", message),
        }

        let status = self.status();
        let body = json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.message()
        });

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::unprocessable(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { resource, id } => Self::NotFound {
                what: format!("{} '{}'", resource, id),
            },
            _ => Self::Internal {
                message: e.to_string(),
            },
        }
    }
}
