//! Client error types
//!
//! Defines all errors that can occur between the client and the notes API.

use thiserror::Error;

/// Message shown when the request never produced a response
pub const NETWORK_ERROR: &str = "Network error";

/// Message shown for failures without a readable error body
pub const REQUEST_FAILED: &str = "Request failed";

/// Structured error code the API may attach to plan-limit failures
pub const NOTE_LIMIT_CODE: &str = "NOTE_LIMIT_REACHED";

/// Wording the API uses for plan-limit failures when no code is sent
const NOTE_LIMIT_PHRASE: &str = "Note limit reached";

/// Errors that can occur in the client
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request could not be sent or no response arrived
    #[error("Network error")]
    Network(#[source] reqwest::Error),

    /// The server answered with a non-success status
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        code: Option<String>,
    },

    /// A success response whose body could not be decoded
    #[error("Invalid response: {0}")]
    Decode(String),

    /// A payload was expected but the server sent 204 No Content
    #[error("Empty response from server")]
    EmptyResponse,

    /// Durable session storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Serialization/deserialization of stored data failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// True when the server rejected a create because the plan is full
    pub fn is_note_limit(&self) -> bool {
        match self {
            ClientError::Api { message, code, .. } => match code {
                Some(code) => code == NOTE_LIMIT_CODE,
                None => message.contains(NOTE_LIMIT_PHRASE),
            },
            _ => false,
        }
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(message: &str, code: Option<&str>) -> ClientError {
        ClientError::Api {
            status: 403,
            message: message.to_string(),
            code: code.map(str::to_string),
        }
    }

    #[test]
    fn test_api_error_displays_server_message() {
        let err = api_error("Invalid credentials", None);
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_note_limit_detection() {
        assert!(api_error("Note limit reached. Upgrade to Pro.", None).is_note_limit());
        assert!(api_error("Plan is full", Some(NOTE_LIMIT_CODE)).is_note_limit());
        assert!(!api_error("Note limit reached", Some("FORBIDDEN")).is_note_limit());
        assert!(!api_error("Title is required", None).is_note_limit());
        assert!(!ClientError::EmptyResponse.is_note_limit());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ClientError = io_err.into();
        assert!(matches!(err, ClientError::Storage(_)));
    }
}
