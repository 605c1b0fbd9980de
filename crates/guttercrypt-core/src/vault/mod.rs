//! Encrypted secret document store.
//!
//! The vault is one envelope holding the exact bytes of a document
//! (usually a `.env` file) plus a plaintext [`VaultMeta`] sidecar listing
//! key names. Every operation is a full load/decrypt/write cycle.
//!
//! Lifecycle: `Absent -> create -> Empty -> store -> Populated -> destroy -> Absent`.

mod meta;

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::crypto::{decrypt_bytes, encrypt};
use crate::error::{GutterError, Result};
use crate::fs::{ensure_vault_dir, write_atomic};

pub use meta::{extract_keys, VaultMeta, META_FORMAT_VERSION};

/// Where a key listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// Read from the plaintext sidecar; no passphrase needed
    Metadata,
    /// Recovered by decrypting the payload
    Decrypted,
}

/// Result of [`VaultStore::list_keys`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyListing {
    pub keys: Vec<String>,
    pub raw_text: bool,
    pub source: KeySource,
}

/// Store for the encrypted secret document of one project.
#[derive(Debug, Clone)]
pub struct VaultStore {
    config: StoreConfig,
}

impl VaultStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Whether the vault directory exists (created, possibly empty).
    pub fn is_initialized(&self) -> bool {
        self.config.vault_dir().is_dir()
    }

    /// Whether an encrypted payload exists.
    pub fn exists(&self) -> bool {
        self.is_initialized() && self.config.vault_file().is_file()
    }

    /// Create the empty vault directory.
    ///
    /// # Errors
    ///
    /// [`GutterError::AlreadyExists`] if the directory is already there.
    pub fn create(&self) -> Result<()> {
        let dir = self.config.vault_dir();
        if dir.exists() {
            return Err(GutterError::AlreadyExists(dir));
        }
        fs::create_dir_all(&dir)?;
        debug!(path = %dir.display(), "created vault directory");
        Ok(())
    }

    /// Encrypt `plaintext`, replacing any prior payload and sidecar.
    ///
    /// Returns the number of key names recorded in the sidecar.
    pub fn store(&self, plaintext: &[u8], passphrase: &str) -> Result<usize> {
        self.store_document(plaintext, passphrase, None)
    }

    /// Read a document from disk and store it.
    ///
    /// Relative paths resolve against the project directory.
    pub fn store_file(&self, path: impl AsRef<Path>, passphrase: &str) -> Result<usize> {
        let source = path.as_ref();
        let full_path = self.config.resolve(source);
        if !full_path.is_file() {
            return Err(GutterError::FileNotFound(full_path));
        }
        let contents = fs::read(&full_path)?;
        self.store_document(
            &contents,
            passphrase,
            Some(source.to_string_lossy().to_string()),
        )
    }

    /// Store free-form text; the sidecar records no key names.
    pub fn store_raw_text(&self, text: &str, passphrase: &str) -> Result<()> {
        self.ensure_dir()?;
        let sealed = encrypt(text.as_bytes(), passphrase)?;
        self.remove_meta()?;
        write_atomic(&self.config.vault_file(), sealed.as_bytes())?;
        self.write_meta(&VaultMeta::for_raw_text())?;
        debug!("stored raw text in vault");
        Ok(())
    }

    fn store_document(
        &self,
        plaintext: &[u8],
        passphrase: &str,
        source_file: Option<String>,
    ) -> Result<usize> {
        self.ensure_dir()?;
        let meta = VaultMeta::for_document(&String::from_utf8_lossy(plaintext), source_file);
        let sealed = encrypt(plaintext, passphrase)?;

        // A sidecar left from the previous payload must not outlive it.
        self.remove_meta()?;
        write_atomic(&self.config.vault_file(), sealed.as_bytes())?;
        self.write_meta(&meta)?;

        debug!(keys = meta.key_count, "stored document in vault");
        Ok(meta.key_count)
    }

    /// Decrypt and return the stored document.
    ///
    /// # Errors
    ///
    /// - [`GutterError::NoVault`] if no payload exists
    /// - [`GutterError::WrongPassphrase`] if verification fails
    pub fn inject(&self, passphrase: &str) -> Result<Vec<u8>> {
        let payload = self.read_payload()?;
        decrypt_bytes(&payload, passphrase).map_err(GutterError::into_auth_failure)
    }

    /// Decrypt the stored document and write it to `path`.
    ///
    /// Nothing is written unless decryption succeeds.
    pub fn inject_to(&self, path: impl AsRef<Path>, passphrase: &str) -> Result<()> {
        let plaintext = self.inject(passphrase)?;
        let target = self.config.resolve(path);
        write_atomic(&target, &plaintext)?;
        debug!(path = %target.display(), "restored document from vault");
        Ok(())
    }

    /// Restore the plaintext document. Same operation as [`VaultStore::inject_to`].
    pub fn unlock(&self, path: impl AsRef<Path>, passphrase: &str) -> Result<()> {
        self.inject_to(path, passphrase)
    }

    /// Delete the plaintext document, leaving only the encrypted copy.
    ///
    /// # Errors
    ///
    /// - [`GutterError::FileNotFound`] if the document is not on disk
    /// - [`GutterError::NoVault`] if there is no payload to fall back on
    pub fn lock(&self, path: impl AsRef<Path>) -> Result<()> {
        let target = self.config.resolve(path);
        if !target.is_file() {
            return Err(GutterError::FileNotFound(target));
        }
        if !self.exists() {
            return Err(GutterError::NoVault);
        }
        fs::remove_file(&target)?;
        debug!(path = %target.display(), "removed plaintext document");
        Ok(())
    }

    /// List stored key names.
    ///
    /// The sidecar is used when present. Otherwise the payload is decrypted
    /// with `passphrase` and parsed with the same rule as the sidecar.
    ///
    /// # Errors
    ///
    /// - [`GutterError::PassphraseRequired`] if the sidecar is absent and no passphrase given
    /// - [`GutterError::NoVault`] if neither sidecar nor payload exists
    /// - [`GutterError::WrongPassphrase`] if decryption fails
    pub fn list_keys(&self, passphrase: Option<&str>) -> Result<KeyListing> {
        if let Some(meta) = self.read_meta()? {
            return Ok(KeyListing {
                keys: meta.keys,
                raw_text: meta.raw_text,
                source: KeySource::Metadata,
            });
        }

        let payload = self.read_payload()?;
        let passphrase = passphrase.ok_or(GutterError::PassphraseRequired)?;
        let plaintext = decrypt_bytes(&payload, passphrase).map_err(GutterError::into_auth_failure)?;

        Ok(KeyListing {
            keys: extract_keys(&String::from_utf8_lossy(&plaintext)),
            raw_text: false,
            source: KeySource::Decrypted,
        })
    }

    /// Read the sidecar, treating an unreadable one as absent.
    pub fn read_meta(&self) -> Result<Option<VaultMeta>> {
        let path = self.config.meta_file();
        if !path.is_file() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        match serde_json::from_str::<VaultMeta>(&contents) {
            Ok(meta) => Ok(Some(meta)),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring unreadable vault metadata");
                Ok(None)
            }
        }
    }

    /// Remove the vault directory and everything in it.
    pub fn destroy(&self) -> Result<()> {
        let dir = self.config.vault_dir();
        if !dir.exists() {
            return Err(GutterError::NoVault);
        }
        fs::remove_dir_all(&dir)?;
        debug!(path = %dir.display(), "destroyed vault directory");
        Ok(())
    }

    fn read_payload(&self) -> Result<Vec<u8>> {
        let path = self.config.vault_file();
        if !path.is_file() {
            return Err(GutterError::NoVault);
        }
        Ok(fs::read(path)?)
    }

    fn write_meta(&self, meta: &VaultMeta) -> Result<()> {
        let json = serde_json::to_string_pretty(meta)?;
        write_atomic(&self.config.meta_file(), json.as_bytes())?;
        Ok(())
    }

    fn remove_meta(&self) -> Result<()> {
        match fs::remove_file(self.config.meta_file()) {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }

    fn ensure_dir(&self) -> Result<()> {
        ensure_vault_dir(&self.config.vault_dir())
    }
}
