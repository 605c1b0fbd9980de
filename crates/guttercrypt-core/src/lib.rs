//! # Guttercrypt Core
//!
//! Passphrase-encrypted storage engine for Guttercrypt, a local secrets
//! manager for `.env` files with an encrypted note and conversation log.
//!
//! This crate holds the engine independent of the CLI: nothing here prompts,
//! prints, or talks to the network.
//!
//! ## Architecture
//!
//! - **crypto**: PBKDF2 key derivation and the AES-256-GCM envelope
//! - **vault**: encrypted secret document plus plaintext key-name sidecar
//! - **memory**: encrypted notes and bounded conversation history
//! - **settings**: local JSON project settings
//! - **artifacts**: verbatim artifact bundle for remote sync
//! - **fs**: crash-safe writes
//!
//! Every operation is synchronous and performs a complete
//! load/decrypt/mutate/encrypt/write cycle. There is no file locking:
//! concurrent processes on the same project race, and the last writer wins.

pub mod artifacts;
pub mod config;
pub mod crypto;
pub mod error;
pub mod fs;
pub mod memory;
pub mod settings;
pub mod vault;

pub use config::StoreConfig;
pub use error::{GutterError, Result};
pub use memory::{build_prompt_context, Exchange, Memory, MemoryStore, Note};
pub use settings::ProjectSettings;
pub use vault::{KeyListing, KeySource, VaultMeta, VaultStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
