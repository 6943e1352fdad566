//! Client error types.
//!
//! Every failure surfaced by the HTTP pipeline is normalized here so
//! callers never branch on raw response shapes.

use thiserror::Error;

/// Fallback text when neither the server nor the transport supplied one.
const GENERIC_MESSAGE: &str = "request failed";

/// Errors surfaced by the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Terminal authentication failure. Stored auth state has already been
    /// cleared; callers should navigate to the login entry point.
    #[error("session expired")]
    SessionExpired,

    /// Normalized server-reported error.
    #[error("{message}")]
    Api {
        /// HTTP status, when a response was received.
        status: Option<u16>,
        /// Best-available human-readable message.
        message: String,
        /// Field-level errors from the error envelope, if any.
        errors: Vec<String>,
        /// Raw response payload, when it parsed as JSON.
        body: Option<serde_json::Value>,
    },

    /// Transport-level failure (connect, timeout, body read).
    #[error("transport error")]
    Transport(#[from] reqwest::Error),

    /// Local fault: storage, configuration, decoding.
    #[error("internal client error")]
    Internal(#[from] anyhow::Error),
}

impl ClientError {
    /// Best human-readable text for display: the server message when
    /// present, then the transport error text, then a generic fallback.
    pub fn message(&self) -> String {
        match self {
            ClientError::SessionExpired => "session expired".to_string(),
            ClientError::Api { message, .. } if !message.is_empty() => message.clone(),
            ClientError::Api { .. } => GENERIC_MESSAGE.to_string(),
            ClientError::Transport(e) => e.to_string(),
            ClientError::Internal(e) => e.to_string(),
        }
    }

    /// HTTP status of the failed response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => *status,
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias using ClientError.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn api_error_prefers_server_message() {
        let err = ClientError::Api {
            status: Some(422),
            message: "Validation failed".to_string(),
            errors: vec!["name is required".to_string()],
            body: None,
        };
        assert_eq!(err.message(), "Validation failed");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn empty_server_message_falls_back_to_generic() {
        let err = ClientError::Api {
            status: Some(500),
            message: String::new(),
            errors: Vec::new(),
            body: None,
        };
        assert_eq!(err.message(), GENERIC_MESSAGE);
    }

    #[test]
    fn session_expired_has_no_status() {
        assert_eq!(ClientError::SessionExpired.status(), None);
    }
}
