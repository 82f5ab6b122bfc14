//! Error types for the dashboard API client.
//!
//! # Design
//! Non-2xx responses all land in `Http` with the status line and raw body;
//! its message is the single formatted string the UI shows. Transport
//! failures keep the underlying error as their source so nothing is lost on
//! the way to the caller.

use thiserror::Error;

/// Errors returned by the fetch wrapper and the typed API functions.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status outside 200..=299.
    #[error("{status} {status_text}{}", body_suffix(.body))]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The request never produced a response (DNS, refused connection, ...).
    #[error("{0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A 2xx body could not be decoded into the expected view model.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(" - {body}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, status_text: &str, body: &str) -> ApiError {
        ApiError::Http {
            status,
            status_text: status_text.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn http_error_with_body() {
        let err = http(404, "Not Found", "not found");
        assert_eq!(err.to_string(), "404 Not Found - not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn http_error_without_body() {
        let err = http(500, "Internal Server Error", "");
        assert_eq!(err.to_string(), "500 Internal Server Error");
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_not_found());
    }

    #[test]
    fn transport_error_keeps_source_message() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err = ApiError::Transport(Box::new(io));
        assert_eq!(err.to_string(), "connection refused");
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.status(), None);
    }
}
