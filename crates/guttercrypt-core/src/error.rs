//! Error types for Guttercrypt core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to exit codes and user-facing messages.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for Guttercrypt operations.
pub type Result<T> = std::result::Result<T, GutterError>;

/// Core error type for Guttercrypt operations.
#[derive(Debug, Error)]
pub enum GutterError {
    /// The vault directory already exists
    #[error("Vault already exists at {}", .0.display())]
    AlreadyExists(PathBuf),

    /// No vault directory or no encrypted payload
    #[error("No vault found")]
    NoVault,

    /// Authentication failed while opening a vault or memory payload.
    ///
    /// Covers both a wrong passphrase and tampered data; the two are
    /// deliberately indistinguishable.
    #[error("Incorrect passphrase")]
    WrongPassphrase,

    /// Envelope could not be opened (tag mismatch or malformed structure)
    #[error("Decryption failed")]
    DecryptionFailed,

    /// A source or target document is missing
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Note index outside the stored list
    #[error("Index {index} out of range ({len} notes stored)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The metadata sidecar is absent and no passphrase was supplied
    #[error("Passphrase required to read vault contents")]
    PassphraseRequired,

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Encryption-side failure (randomness, cipher setup)
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Storage layout error
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl GutterError {
    /// Collapse an envelope-level failure into the passphrase error seen by callers.
    pub(crate) fn into_auth_failure(self) -> Self {
        match self {
            GutterError::DecryptionFailed => GutterError::WrongPassphrase,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decryption_failure_maps_to_wrong_passphrase() {
        let err = GutterError::DecryptionFailed.into_auth_failure();
        assert!(matches!(err, GutterError::WrongPassphrase));
    }

    #[test]
    fn test_other_errors_pass_through() {
        let err = GutterError::NoVault.into_auth_failure();
        assert!(matches!(err, GutterError::NoVault));
    }

    #[test]
    fn test_index_message() {
        let err = GutterError::IndexOutOfRange { index: 5, len: 3 };
        assert_eq!(err.to_string(), "Index 5 out of range (3 notes stored)");
    }
}
