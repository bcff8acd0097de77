//! JSON error responses for the HTTP API.

use crate::error::AppError;
use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::fmt;
use tracing::error;

/// Shape of the error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// `{estado: "error", mensaje, tipo_error}`, used by the Spanish endpoints.
    Estado,
    /// `{success: false, error, error_type}`, used by chat and Direct Line.
    Success,
}

#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
    pub error_type: &'static str,
    pub envelope: Envelope,
    /// Extra fields merged into the body.
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(status_code: StatusCode, error_type: &'static str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code,
            error_type,
            envelope: Envelope::Estado,
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "ValidationError", message)
    }

    /// Maps the application taxonomy onto HTTP statuses.
    pub fn from_app(err: &AppError) -> Self {
        let status_code = match err {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status_code.is_server_error() {
            error!("Request failed ({}): {}", err.kind(), err);
        }
        Self::new(status_code, err.kind(), err.message())
    }

    pub fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_status(mut self, status_code: StatusCode) -> Self {
        self.status_code = status_code;
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Body for a malformed JSON request.
    pub fn from_json_rejection(rejection: JsonRejection) -> Self {
        Self::bad_request(format!("Cuerpo JSON inválido: {}", rejection.body_text()))
    }

    /// Multipart failures keep the status axum assigned (413 for oversize bodies).
    pub fn from_multipart(err: MultipartError) -> Self {
        let status_code = err.status();
        let error_type = if status_code == StatusCode::PAYLOAD_TOO_LARGE {
            "PayloadTooLarge"
        } else {
            "ValidationError"
        };
        Self::new(status_code, error_type, err.body_text())
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::from_app(&err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = match self.envelope {
            Envelope::Estado => json!({
                "estado": "error",
                "mensaje": self.message,
                "tipo_error": self.error_type,
            }),
            Envelope::Success => json!({
                "success": false,
                "error": self.message,
                "error_type": self.error_type,
            }),
        };

        if let (Some(Value::Object(extra)), Value::Object(map)) = (self.details, &mut body) {
            map.extend(extra);
        }

        (self.status_code, Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
