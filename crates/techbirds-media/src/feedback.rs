//! Turning raw service failures into the one line the user sees.

use techbirds_api_client::ApiError;
use techbirds_core::{ErrorMetadata, FailureKind, LogLevel};

const GENERIC_LIST_ERROR: &str = "Failed to load media";

/// Message for a failed listing: the server's message, then the raw error, then a generic line.
pub fn list_error_message(err: &ApiError) -> String {
    if let Some(message) = err.server_message() {
        return message.to_string();
    }
    let raw = err.to_string();
    if raw.trim().is_empty() {
        GENERIC_LIST_ERROR.to_string()
    } else {
        raw
    }
}

/// Message for a failed mutation (upload, update, delete), keyed by status.
///
/// Bad requests surface the server's payload. Server and transport failures
/// fall back to the raw text. Every other kind has a fixed message.
pub fn mutation_error_message(err: &ApiError) -> String {
    let kind = err.kind();
    let detail = err
        .server_message()
        .map(str::to_string)
        .or_else(|| match err {
            ApiError::Status { .. } if kind == FailureKind::BadRequest => None,
            _ => Some(err.to_string()),
        });

    match (kind, detail) {
        (FailureKind::BadRequest, Some(detail)) => format!("Bad request: {}", detail),
        (kind, Some(detail)) if kind.surfaces_server_message() => {
            format!("{}: {}", kind.client_message(), detail)
        }
        (kind, _) => kind.client_message(),
    }
}

/// Log a failed operation at the level its kind asks for.
pub fn log_failure(operation: &str, err: &ApiError) {
    let kind = err.kind();
    match kind.log_level() {
        LogLevel::Debug => {
            tracing::debug!(operation, code = kind.error_code(), error = %err, "Media operation failed")
        }
        LogLevel::Warn => {
            tracing::warn!(operation, code = kind.error_code(), error = %err, "Media operation failed")
        }
        LogLevel::Error => {
            tracing::error!(operation, code = kind.error_code(), error = %err, "Media operation failed")
        }
    }
}
