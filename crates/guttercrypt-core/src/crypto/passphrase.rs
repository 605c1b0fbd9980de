//! Passphrase validation.
//!
//! Applied to new passphrases before anything is sealed with them.

use crate::error::{GutterError, Result};

/// Validate that a new passphrase is usable.
///
/// # Requirements
///
/// - Not empty or only whitespace
///
/// # Examples
///
/// ```
/// use guttercrypt_core::crypto::validate_passphrase;
///
/// assert!(validate_passphrase("meow meow meow").is_ok());
/// assert!(validate_passphrase("   ").is_err());
/// ```
pub fn validate_passphrase(passphrase: &str) -> Result<()> {
    if passphrase.trim().is_empty() {
        return Err(GutterError::InvalidInput(
            "Passphrase cannot be empty".to_string(),
        ));
    }
    Ok(())
}
