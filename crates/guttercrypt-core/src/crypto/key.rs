//! Key derivation using PBKDF2-HMAC-SHA512.
//!
//! Passphrases are stretched with a deliberately slow, iterated KDF so that
//! offline guessing against a stolen envelope is expensive.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use zeroize::ZeroizeOnDrop;

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Length of derived key in bytes (256-bit AES key).
pub const KEY_LENGTH: usize = 32;

/// Length of the random salt stored in every envelope.
pub const SALT_LENGTH: usize = 32;

/// A cryptographic key derived from a passphrase.
///
/// Key material is zeroized from memory when dropped. A key lives for one
/// encrypt or decrypt call and is never cached.
#[derive(ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from a passphrase and salt.
///
/// Deterministic: the same passphrase and salt always produce the same key.
///
/// # Examples
///
/// ```
/// use guttercrypt_core::crypto::{derive_key, SALT_LENGTH};
///
/// let salt = [7u8; SALT_LENGTH];
/// let key = derive_key(b"my-passphrase", &salt);
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(passphrase: &[u8], salt: &[u8; SALT_LENGTH]) -> DerivedKey {
    let mut key = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha512>(passphrase, salt, PBKDF2_ITERATIONS, &mut key);
    DerivedKey { key }
}
