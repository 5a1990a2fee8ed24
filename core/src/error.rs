//! Error types for the books client.
//!
//! # Design
//! `ApiError` covers everything that can go wrong once a response exists:
//! a non-2xx status or a body that does not deserialize. `TransportError`
//! covers the cases where no response exists at all. `FetchError` joins both
//! for the async fetcher, and its `Display` output is the user-facing message
//! the view state shows.

use thiserror::Error;

use crate::config::{DESKTOP_BASE_URL, EMULATOR_BASE_URL};

/// Errors returned by `LibrosClient::parse_*` methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status outside 200..=299.
    #[error("Error: {status} - {reason}")]
    Http {
        status: u16,
        reason: String,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("invalid response body: {0}")]
    Deserialization(String),
}

impl ApiError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Deserialization(_) => None,
        }
    }
}

/// Network-level faults raised before any response is received.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("could not connect: {0}")]
    Connect(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("{0}")]
    Other(String),
}

/// Everything a single fetch attempt can fail with.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(
        "Connection error: {0}\n\nCheck the server is reachable:\n\
         1. The API is running at {desktop}\n\
         2. The emulator uses {emulator}",
        desktop = DESKTOP_BASE_URL,
        emulator = EMULATOR_BASE_URL
    )]
    Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_shows_code_and_reason() {
        let err = ApiError::Http {
            status: 503,
            reason: "Service Unavailable".to_string(),
            body: String::new(),
        };
        assert_eq!(err.to_string(), "Error: 503 - Service Unavailable");
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn transport_error_names_both_addresses() {
        let err = FetchError::from(TransportError::Connect("connection refused".to_string()));
        let msg = err.to_string();
        assert!(msg.contains("connection refused"));
        assert!(msg.contains("http://localhost:8080"));
        assert!(msg.contains("http://10.0.2.2:8080"));
        assert!(msg.contains("reachable"));
    }

    #[test]
    fn api_error_passes_through_fetch_error() {
        let err = FetchError::from(ApiError::Deserialization("expected array".to_string()));
        assert_eq!(err.to_string(), "invalid response body: expected array");
    }
}
