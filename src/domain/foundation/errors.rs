//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Transport errors
    TransportError,
    ConnectionClosed,

    // Decoding errors
    DecodeError,

    // Collaborator errors
    ApiError,
    SessionMissing,

    // Infrastructure errors
    StorageError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::TransportError => "TRANSPORT_ERROR",
            ErrorCode::ConnectionClosed => "CONNECTION_CLOSED",
            ErrorCode::DecodeError => "DECODE_ERROR",
            ErrorCode::ApiError => "API_ERROR",
            ErrorCode::SessionMissing => "SESSION_MISSING",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Error carried across the core's seams.
///
/// Handlers and fetchers return this; the dispatcher and scheduler log it
/// and keep going, so one failing consumer never blocks the others.
#[derive(Debug, Clone, Error)]
#[error("{code}: {message}")]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
}

impl DomainError {
    /// Creates a new domain error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Convenience constructor for internal errors.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_message() {
        let err = DomainError::new(ErrorCode::ApiError, "fetch failed");
        assert_eq!(format!("{}", err), "API_ERROR: fetch failed");
    }

    #[test]
    fn error_codes_render_screaming_snake() {
        assert_eq!(format!("{}", ErrorCode::TransportError), "TRANSPORT_ERROR");
        assert_eq!(format!("{}", ErrorCode::DecodeError), "DECODE_ERROR");
    }
}
