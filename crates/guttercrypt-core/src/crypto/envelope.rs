//! Authenticated encryption envelope.
//!
//! An envelope is the self-describing result of one AES-256-GCM encryption:
//!
//! ```text
//! salt (32) | nonce (16) | auth tag (16) | ciphertext (variable)
//! ```
//!
//! On disk the envelope is stored as a single line of standard base64.
//! Every seal draws a fresh salt and nonce, so the derived key differs per
//! envelope and a nonce is never reused under the same key.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::AesGcm;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::key::{derive_key, SALT_LENGTH};
use crate::error::{GutterError, Result};

/// Length of the GCM nonce in bytes.
pub const NONCE_LENGTH: usize = 16;

/// Length of the GCM authentication tag in bytes.
pub const TAG_LENGTH: usize = 16;

/// Fixed-size prefix preceding the ciphertext.
pub const HEADER_LENGTH: usize = SALT_LENGTH + NONCE_LENGTH + TAG_LENGTH;

/// AES-256-GCM with a 128-bit nonce.
type Cipher = AesGcm<Aes256, U16>;

/// A sealed payload: salt, nonce, tag and ciphertext.
#[derive(Clone, PartialEq, Eq)]
pub struct Envelope {
    salt: [u8; SALT_LENGTH],
    nonce: [u8; NONCE_LENGTH],
    tag: [u8; TAG_LENGTH],
    ciphertext: Vec<u8>,
}

impl Envelope {
    /// Encrypt `plaintext` under a key derived from `passphrase`.
    pub fn seal(plaintext: &[u8], passphrase: &[u8]) -> Result<Self> {
        let mut salt = [0u8; SALT_LENGTH];
        let mut nonce = [0u8; NONCE_LENGTH];
        getrandom::getrandom(&mut salt)
            .map_err(|e| GutterError::Crypto(format!("Failed to generate salt: {}", e)))?;
        getrandom::getrandom(&mut nonce)
            .map_err(|e| GutterError::Crypto(format!("Failed to generate nonce: {}", e)))?;

        let key = derive_key(passphrase, &salt);
        let cipher = Cipher::new(GenericArray::from_slice(key.as_bytes()));

        let mut ciphertext = plaintext.to_vec();
        let tag = cipher
            .encrypt_in_place_detached(GenericArray::from_slice(&nonce), b"", &mut ciphertext)
            .map_err(|e| GutterError::Crypto(format!("Encryption failed: {}", e)))?;

        let mut tag_bytes = [0u8; TAG_LENGTH];
        tag_bytes.copy_from_slice(tag.as_slice());

        Ok(Self {
            salt,
            nonce,
            tag: tag_bytes,
            ciphertext,
        })
    }

    /// Verify and decrypt the envelope.
    ///
    /// The tag is checked before any plaintext is released. Any failure is
    /// reported as [`GutterError::DecryptionFailed`] with no further detail.
    pub fn open(&self, passphrase: &[u8]) -> Result<Vec<u8>> {
        let key = derive_key(passphrase, &self.salt);
        let cipher = Cipher::new(GenericArray::from_slice(key.as_bytes()));

        let mut buffer = self.ciphertext.clone();
        cipher
            .decrypt_in_place_detached(
                GenericArray::from_slice(&self.nonce),
                b"",
                &mut buffer,
                GenericArray::from_slice(&self.tag),
            )
            .map_err(|_| GutterError::DecryptionFailed)?;

        Ok(buffer)
    }

    /// Serialize as `salt‖nonce‖tag‖ciphertext`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LENGTH + self.ciphertext.len());
        out.extend_from_slice(&self.salt);
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.tag);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Parse the binary form. Input shorter than the header is malformed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LENGTH {
            return Err(GutterError::DecryptionFailed);
        }

        let (salt, rest) = bytes.split_at(SALT_LENGTH);
        let (nonce, rest) = rest.split_at(NONCE_LENGTH);
        let (tag, ciphertext) = rest.split_at(TAG_LENGTH);

        let mut envelope = Self {
            salt: [0u8; SALT_LENGTH],
            nonce: [0u8; NONCE_LENGTH],
            tag: [0u8; TAG_LENGTH],
            ciphertext: ciphertext.to_vec(),
        };
        envelope.salt.copy_from_slice(salt);
        envelope.nonce.copy_from_slice(nonce);
        envelope.tag.copy_from_slice(tag);
        Ok(envelope)
    }

    /// Base64 text form used for the on-disk artifacts.
    pub fn encode(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Parse the base64 text form; surrounding whitespace is ignored.
    pub fn decode(text: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(text.trim())
            .map_err(|_| GutterError::DecryptionFailed)?;
        Self::from_bytes(&bytes)
    }

    pub fn salt(&self) -> &[u8; SALT_LENGTH] {
        &self.salt
    }

    pub fn nonce(&self) -> &[u8; NONCE_LENGTH] {
        &self.nonce
    }
}

impl std::fmt::Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("ciphertext_len", &self.ciphertext.len())
            .finish_non_exhaustive()
    }
}

/// Encrypt `plaintext` into the base64 envelope text.
///
/// # Examples
///
/// ```
/// use guttercrypt_core::crypto::{decrypt, encrypt};
///
/// let sealed = encrypt(b"API_KEY=abc", "correct horse").unwrap();
/// assert_eq!(decrypt(&sealed, "correct horse").unwrap(), b"API_KEY=abc");
/// ```
pub fn encrypt(plaintext: &[u8], passphrase: &str) -> Result<String> {
    Ok(Envelope::seal(plaintext, passphrase.as_bytes())?.encode())
}

/// Decrypt base64 envelope text.
///
/// # Errors
///
/// Returns [`GutterError::DecryptionFailed`] if the passphrase is wrong,
/// the data was altered, or the text is not a well-formed envelope.
pub fn decrypt(data: &str, passphrase: &str) -> Result<Vec<u8>> {
    Envelope::decode(data)?.open(passphrase.as_bytes())
}

/// Decrypt envelope text read straight from disk.
///
/// Bytes that are not text are a malformed envelope.
pub fn decrypt_bytes(data: &[u8], passphrase: &str) -> Result<Vec<u8>> {
    let text = std::str::from_utf8(data).map_err(|_| GutterError::DecryptionFailed)?;
    decrypt(text, passphrase)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSPHRASE: &str = "test-passphrase-secure-123";

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let plaintext = b"DATABASE_URL=postgres://localhost\nAPI_KEY=abc123\n";

        let sealed = encrypt(plaintext, PASSPHRASE).unwrap();
        let opened = decrypt(&sealed, PASSPHRASE).unwrap();

        assert_eq!(opened, plaintext);
    }

    #[test]
    fn test_empty_plaintext_round_trip() {
        let sealed = encrypt(b"", PASSPHRASE).unwrap();
        assert_eq!(decrypt(&sealed, PASSPHRASE).unwrap(), b"");
    }

    #[test]
    fn test_binary_plaintext_round_trip() {
        let plaintext: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let sealed = encrypt(&plaintext, PASSPHRASE).unwrap();
        assert_eq!(decrypt(&sealed, PASSPHRASE).unwrap(), plaintext);
    }

    #[test]
    fn test_layout_sizes() {
        let envelope = Envelope::seal(b"12345", PASSPHRASE.as_bytes()).unwrap();
        let bytes = envelope.to_bytes();
        assert_eq!(bytes.len(), HEADER_LENGTH + 5);
        assert_eq!(&bytes[..SALT_LENGTH], envelope.salt());
        assert_eq!(
            &bytes[SALT_LENGTH..SALT_LENGTH + NONCE_LENGTH],
            envelope.nonce()
        );
    }

    #[test]
    fn test_wrong_passphrase_fails() {
        let sealed = encrypt(b"secret data", "correct-passphrase-123").unwrap();
        let result = decrypt(&sealed, "wrong-passphrase-456");
        assert!(matches!(result, Err(GutterError::DecryptionFailed)));
    }

    #[test]
    fn test_tampered_tag_fails() {
        let envelope = Envelope::seal(b"important secret", PASSPHRASE.as_bytes()).unwrap();
        let mut bytes = envelope.to_bytes();
        bytes[SALT_LENGTH + NONCE_LENGTH] ^= 0x01;

        let tampered = Envelope::from_bytes(&bytes).unwrap();
        assert!(matches!(
            tampered.open(PASSPHRASE.as_bytes()),
            Err(GutterError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_every_tag_and_ciphertext_bit_is_authenticated() {
        let envelope = Envelope::seal(b"K=V", PASSPHRASE.as_bytes()).unwrap();
        let bytes = envelope.to_bytes();

        for index in SALT_LENGTH + NONCE_LENGTH..bytes.len() {
            for bit in 0..8 {
                let mut flipped = bytes.clone();
                flipped[index] ^= 1 << bit;
                let tampered = Envelope::from_bytes(&flipped).unwrap();
                assert!(
                    tampered.open(PASSPHRASE.as_bytes()).is_err(),
                    "bit {} of byte {} was not detected",
                    bit,
                    index
                );
            }
        }
    }

    #[test]
    fn test_truncated_envelope_is_malformed() {
        let envelope = Envelope::seal(b"data", PASSPHRASE.as_bytes()).unwrap();
        let bytes = envelope.to_bytes();
        let result = Envelope::from_bytes(&bytes[..HEADER_LENGTH - 1]);
        assert!(matches!(result, Err(GutterError::DecryptionFailed)));
    }

    #[test]
    fn test_invalid_base64_is_malformed() {
        let result = decrypt("not base64 at all!!", PASSPHRASE);
        assert!(matches!(result, Err(GutterError::DecryptionFailed)));
    }

    #[test]
    fn test_decode_ignores_trailing_newline() {
        let sealed = encrypt(b"A=1", PASSPHRASE).unwrap();
        let with_newline = format!("{}\n", sealed);
        assert_eq!(decrypt(&with_newline, PASSPHRASE).unwrap(), b"A=1");
    }

    #[test]
    fn test_same_input_produces_distinct_envelopes() {
        let first = Envelope::seal(b"same plaintext", PASSPHRASE.as_bytes()).unwrap();
        let second = Envelope::seal(b"same plaintext", PASSPHRASE.as_bytes()).unwrap();

        assert_ne!(first.salt(), second.salt());
        assert_ne!(first.nonce(), second.nonce());
        assert_ne!(first.encode(), second.encode());
    }

    #[test]
    fn test_envelope_does_not_contain_plaintext() {
        let sealed = encrypt(b"marker: PLAINTEXT_MARKER_123", PASSPHRASE).unwrap();
        let raw = STANDARD.decode(&sealed).unwrap();
        let haystack = String::from_utf8_lossy(&raw);
        assert!(!haystack.contains("PLAINTEXT_MARKER_123"));
        assert!(!sealed.contains("PLAINTEXT_MARKER_123"));
    }

    #[test]
    fn test_debug_hides_contents() {
        let envelope = Envelope::seal(b"top secret", PASSPHRASE.as_bytes()).unwrap();
        let debug_output = format!("{:?}", envelope);
        assert!(debug_output.contains("ciphertext_len"));
        assert!(!debug_output.contains(&hex::encode(envelope.salt())));
    }
}
