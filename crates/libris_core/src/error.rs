//! Error types for Libris core.
//!
//! Expected negative outcomes (duplicate identifiers, missing records,
//! unavailable items) are not errors: the store reports them through `bool`
//! and `Option` returns. `LibraryError` covers I/O, encoding and contract
//! violations only.

use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Errors that can occur in Libris core operations.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Snapshot body could not be encoded.
    #[error("encoding failed: {message}")]
    Encode {
        /// Description of the encoding error.
        message: String,
    },

    /// Snapshot body could not be decoded.
    #[error("decoding failed: {message}")]
    Decode {
        /// Description of the decoding error.
        message: String,
    },

    /// Invalid snapshot format or version.
    #[error("invalid snapshot format: {message}")]
    InvalidFormat {
        /// Description of the format issue.
        message: String,
    },

    /// Snapshot digest does not match its contents.
    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Digest stored in the file (hex).
        expected: String,
        /// Digest computed over the file contents (hex).
        actual: String,
    },

    /// The operation is not supported by this handle.
    #[error("unsupported operation: {operation}")]
    UnsupportedOperation {
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// A required argument was missing or malformed.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the problem.
        message: String,
    },
}

impl LibraryError {
    /// Creates an encoding error.
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Creates a decoding error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Creates an unsupported operation error.
    pub fn unsupported(operation: &'static str) -> Self {
        Self::UnsupportedOperation { operation }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            LibraryError::invalid_format("bad magic").to_string(),
            "invalid snapshot format: bad magic"
        );
        assert_eq!(
            LibraryError::unsupported("remove").to_string(),
            "unsupported operation: remove"
        );
    }

    #[test]
    fn io_error_converts() {
        let err: LibraryError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, LibraryError::Io(_)));
    }
}
