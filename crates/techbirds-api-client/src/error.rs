//! Raw failures of the media service client.
//!
//! The client never classifies or rewrites a failure; it hands the status, the
//! server's message and the raw body to the caller, which decides what the user sees.

use techbirds_core::FailureKind;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("API request failed with status {status}: {body}")]
    Status {
        status: u16,
        /// `message` (or `error`) field of a JSON error body
        message: Option<String>,
        body: String,
    },

    /// The request never produced a response.
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Failed to parse response as JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ApiError {
    /// Build a status error, extracting the server message from a JSON body when present.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        ApiError::Status {
            status,
            message: extract_server_message(&body),
            body,
        }
    }

    pub fn transport(context: &str, source: reqwest::Error) -> Self {
        ApiError::Transport {
            message: format!("{}: {}", context, source),
            source: Some(source),
        }
    }

    /// Transport failure without an underlying reqwest error (e.g. from test doubles).
    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Transport {
            message: message.into(),
            source: None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Status { status, .. } => FailureKind::from_status(*status),
            ApiError::Transport { .. } => FailureKind::Network,
            ApiError::Decode(_) => FailureKind::Server,
            ApiError::InvalidInput(_) => FailureKind::BadRequest,
        }
    }
}

/// Accepts `{"message": "..."}`, `{"message": ["a", "b"]}`, `{"error": "..."}`
/// and `{"error": {"message": "..."}}`.
fn extract_server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    let from_field = |v: &serde_json::Value| -> Option<String> {
        match v {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            serde_json::Value::Array(parts) => {
                let joined = parts
                    .iter()
                    .filter_map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                (!joined.is_empty()).then_some(joined)
            }
            _ => None,
        }
    };

    value
        .get("message")
        .and_then(from_field)
        .or_else(|| value.get("error").and_then(from_field))
        .or_else(|| {
            value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(from_field)
        })
}
