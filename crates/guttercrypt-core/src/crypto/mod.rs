//! Cryptographic operations for Guttercrypt.
//!
//! - **PBKDF2-HMAC-SHA512**: iterated key derivation from the passphrase
//! - **AES-256-GCM**: authenticated encryption of every payload
//!
//! ## Security Model
//!
//! - Fresh 32-byte salt and 16-byte nonce per envelope
//! - Derived keys zeroized on drop and never cached
//! - Wrong passphrase and tampered data are indistinguishable to callers
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the encrypted vault or memory file
//! - Offline brute-force attacks on the passphrase
//! - Silent modification of encrypted artifacts
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - The plaintext document left on disk after `inject` or `unlock`

pub mod envelope;
pub mod key;
pub mod passphrase;

pub use envelope::{decrypt, decrypt_bytes, encrypt, Envelope, HEADER_LENGTH, NONCE_LENGTH, TAG_LENGTH};
pub use key::{derive_key, DerivedKey, KEY_LENGTH, PBKDF2_ITERATIONS, SALT_LENGTH};
pub use passphrase::validate_passphrase;
