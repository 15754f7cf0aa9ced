//! Error taxonomy module
//!
//! The backend owns validation, so the client only needs to know what kind of
//! failure happened in order to tell the user something useful. `FailureKind`
//! classifies a failed call by HTTP status (or the absence of one, for transport
//! failures) and describes how each kind should be presented.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like permission problems
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for presenting a failure to the user.
pub trait ErrorMetadata {
    /// HTTP status code that produced this failure, if any
    fn http_status_code(&self) -> Option<u16>;

    /// Machine-readable error code (e.g., "PAYLOAD_TOO_LARGE")
    fn error_code(&self) -> &'static str;

    /// Whether retrying the same call can succeed
    fn is_recoverable(&self) -> bool;

    /// Default user-facing message
    fn client_message(&self) -> String;

    /// Log level for this failure
    fn log_level(&self) -> LogLevel;
}

/// Client-side classification of a failed service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FailureKind {
    #[error("Bad request")]
    BadRequest,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Permission denied")]
    Forbidden,

    #[error("Resource not found")]
    NotFound,

    #[error("Operation not supported by the backend")]
    NotSupported,

    #[error("File too large")]
    PayloadTooLarge,

    #[error("Unsupported file type")]
    UnsupportedMediaType,

    #[error("Server error")]
    Server,

    #[error("Network error")]
    Network,
}

impl FailureKind {
    /// Classify an HTTP status. Anything outside the known client errors is a server error.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => FailureKind::BadRequest,
            401 => FailureKind::Unauthorized,
            403 => FailureKind::Forbidden,
            404 => FailureKind::NotFound,
            405 => FailureKind::NotSupported,
            413 => FailureKind::PayloadTooLarge,
            415 => FailureKind::UnsupportedMediaType,
            _ => FailureKind::Server,
        }
    }

    /// Kinds whose message should carry the server's own explanation.
    pub fn surfaces_server_message(&self) -> bool {
        matches!(
            self,
            FailureKind::BadRequest | FailureKind::Server | FailureKind::Network
        )
    }
}

/// Static metadata per kind: (status, code, recoverable, message, log_level).
fn failure_static_metadata(
    kind: &FailureKind,
) -> (Option<u16>, &'static str, bool, &'static str, LogLevel) {
    match kind {
        FailureKind::BadRequest => (
            Some(400),
            "BAD_REQUEST",
            false,
            "Bad request: the server rejected the submitted data",
            LogLevel::Debug,
        ),
        FailureKind::Unauthorized => (
            Some(401),
            "UNAUTHORIZED",
            false,
            "Authentication required. Please sign in again",
            LogLevel::Debug,
        ),
        FailureKind::Forbidden => (
            Some(403),
            "FORBIDDEN",
            false,
            "Permission denied. You are not allowed to perform this action",
            LogLevel::Warn,
        ),
        FailureKind::NotFound => (
            Some(404),
            "NOT_FOUND",
            false,
            "Resource not found",
            LogLevel::Debug,
        ),
        FailureKind::NotSupported => (
            Some(405),
            "NOT_SUPPORTED",
            false,
            "This operation is not supported by the backend",
            LogLevel::Warn,
        ),
        FailureKind::PayloadTooLarge => (
            Some(413),
            "PAYLOAD_TOO_LARGE",
            false,
            "File too large. Choose a smaller file and try again",
            LogLevel::Debug,
        ),
        FailureKind::UnsupportedMediaType => (
            Some(415),
            "UNSUPPORTED_MEDIA_TYPE",
            false,
            "Unsupported file type",
            LogLevel::Debug,
        ),
        FailureKind::Server => (
            None,
            "SERVER_ERROR",
            true,
            "Server error. Please try again later",
            LogLevel::Error,
        ),
        FailureKind::Network => (
            None,
            "NETWORK_ERROR",
            true,
            "Network error. Check your connection and try again",
            LogLevel::Error,
        ),
    }
}

impl ErrorMetadata for FailureKind {
    fn http_status_code(&self) -> Option<u16> {
        failure_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        failure_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        failure_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        failure_static_metadata(self).3.to_string()
    }

    fn log_level(&self) -> LogLevel {
        failure_static_metadata(self).4
    }
}
