use std::io;
use thiserror::Error;

/// Reasons an address is rejected as a leap-second announcement
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeError {
    /// Top nibble is not the class-E sentinel
    #[error("not an announcement: address is outside the reserved range")]
    BadFormat,

    /// CRC-8 residue mismatch
    #[error("checksum mismatch: announcement is corrupt or forged")]
    IntegrityFailure,

    /// Checksum is fine but the delta field holds the reserved code
    #[error("illegal delta code")]
    IllegalDelta,
}

impl DecodeError {
    /// Numeric status used by the reference tool (-1, -2, -3)
    pub fn code(&self) -> i32 {
        match self {
            DecodeError::BadFormat => -1,
            DecodeError::IntegrityFailure => -2,
            DecodeError::IllegalDelta => -3,
        }
    }
}

/// Custom error types for leap-second lookups
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Address error: {0}")]
    Address(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Resolve error: {0}")]
    Resolve(String),

    #[error("No announcement: {0}")]
    NoAnnouncement(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new address error
    pub fn address(msg: impl Into<String>) -> Self {
        Error::Address(msg.into())
    }

    /// Creates a new encode error
    pub fn encode(msg: impl Into<String>) -> Self {
        Error::Encode(msg.into())
    }

    /// Creates a new resolve error
    pub fn resolve(msg: impl Into<String>) -> Self {
        Error::Resolve(msg.into())
    }

    /// Creates a new no-announcement error
    pub fn no_announcement(msg: impl Into<String>) -> Self {
        Error::NoAnnouncement(msg.into())
    }

    /// Creates a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Returns the decode failure, if that is what this error wraps
    pub fn as_decode(&self) -> Option<DecodeError> {
        match self {
            Error::Decode(kind) => Some(*kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::config("empty fqdn");
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.to_string(), "Configuration error: empty fqdn");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::Other, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));

        let err: Error = DecodeError::IllegalDelta.into();
        assert_eq!(err.as_decode(), Some(DecodeError::IllegalDelta));
        assert_eq!(Error::resolve("timeout").as_decode(), None);
    }

    #[test]
    fn test_decode_codes() {
        assert_eq!(DecodeError::BadFormat.code(), -1);
        assert_eq!(DecodeError::IntegrityFailure.code(), -2);
        assert_eq!(DecodeError::IllegalDelta.code(), -3);
    }
}
