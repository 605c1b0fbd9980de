//! Opaque artifact bundle for remote sync.
//!
//! Sync moves the encrypted payloads and the metadata sidecar verbatim. It
//! never decrypts or reinterprets them; what is collected here is exactly
//! what `restore_artifacts` writes back.

use std::fs;

use tracing::debug;

use crate::config::{StoreConfig, MEMORY_FILE, META_FILE, VAULT_FILE};
use crate::error::{GutterError, Result};
use crate::fs::{ensure_vault_dir, write_atomic};

/// A syncable file inside the vault directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Vault,
    Meta,
    Memory,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [ArtifactKind::Vault, ArtifactKind::Meta, ArtifactKind::Memory];

    pub fn file_name(self) -> &'static str {
        match self {
            ArtifactKind::Vault => VAULT_FILE,
            ArtifactKind::Meta => META_FILE,
            ArtifactKind::Memory => MEMORY_FILE,
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.file_name() == name)
    }
}

/// One artifact's name and verbatim contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub contents: String,
}

/// Read every present artifact.
///
/// # Errors
///
/// [`GutterError::NoVault`] if the vault payload is missing; the sidecar
/// and memory are optional.
pub fn collect_artifacts(config: &StoreConfig) -> Result<Vec<Artifact>> {
    if !config.vault_file().is_file() {
        return Err(GutterError::NoVault);
    }

    let mut artifacts = Vec::new();
    for kind in ArtifactKind::ALL {
        let path = config.vault_dir().join(kind.file_name());
        if path.is_file() {
            artifacts.push(Artifact {
                kind,
                contents: fs::read_to_string(&path)?,
            });
        }
    }
    debug!(count = artifacts.len(), "collected artifacts for sync");
    Ok(artifacts)
}

/// Write artifacts back verbatim, replacing local copies.
///
/// Returns the kinds that were written, in input order.
pub fn restore_artifacts(config: &StoreConfig, artifacts: &[Artifact]) -> Result<Vec<ArtifactKind>> {
    let dir = config.vault_dir();
    ensure_vault_dir(&dir)?;

    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = dir.join(artifact.kind.file_name());
        write_atomic(&path, artifact.contents.as_bytes())?;
        written.push(artifact.kind);
    }
    debug!(count = written.len(), "restored artifacts from sync");
    Ok(written)
}
