//! Response envelopes and the service-error to status mapping.
//!
//! # Invariants
//! - `error_response` is the only place a `ServiceError` becomes a status.
//! - Error bodies are plain messages; success bodies are JSON.

use catalog_core::ServiceError;
use log::error;
use serde::Serialize;

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;
pub const STATUS_NO_CONTENT: u16 = 204;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_CONFLICT: u16 = 409;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Status code plus body produced for one boundary call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// Serializes `value` as the body with `status`.
    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self { status, body },
            Err(err) => internal_error(&err.to_string()),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: STATUS_NO_CONTENT,
            body: String::new(),
        }
    }

    /// Returns whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Maps a service failure to its boundary status and body.
///
/// - NotFound -> 404, InvalidInput -> 400, Conflict -> 409, with the message
///   as body.
/// - Unexpected -> 500 with `An internal error occurred: <message>`.
pub fn error_response(err: &ServiceError) -> ApiResponse {
    match err {
        ServiceError::NotFound(message) => plain(STATUS_NOT_FOUND, message),
        ServiceError::InvalidInput(message) => plain(STATUS_BAD_REQUEST, message),
        ServiceError::Conflict(message) => plain(STATUS_CONFLICT, message),
        ServiceError::Unexpected { message, .. } => internal_error(message),
    }
}

fn plain(status: u16, message: &str) -> ApiResponse {
    ApiResponse {
        status,
        body: message.to_string(),
    }
}

fn internal_error(message: &str) -> ApiResponse {
    error!("event=api_response module=api status=error http_status={STATUS_INTERNAL_ERROR} error={message}");
    ApiResponse {
        status: STATUS_INTERNAL_ERROR,
        body: format!("An internal error occurred: {message}"),
    }
}
