//! Store configuration and artifact layout.
//!
//! Every store is constructed from an explicit [`StoreConfig`]; nothing in
//! the engine consults the working directory or environment variables.

use std::path::{Path, PathBuf};

/// Name of the hidden project-local directory.
pub const VAULT_DIR: &str = ".guttercrypt";
/// Encrypted secret document.
pub const VAULT_FILE: &str = "vault.enc";
/// Plaintext key-name sidecar.
pub const META_FILE: &str = "vault.meta";
/// Encrypted notes and conversation history.
pub const MEMORY_FILE: &str = "memory.enc";
/// Local JSON settings.
pub const SETTINGS_FILE: &str = "config";
/// Upper bound on retained conversation exchanges.
pub const MAX_CONVERSATIONS: usize = 20;

/// Where a project's artifacts live and how the stores behave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    project_dir: PathBuf,
    dir_name: String,
    max_conversations: usize,
}

impl StoreConfig {
    /// Configuration for the given project directory with default layout.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            dir_name: VAULT_DIR.to_string(),
            max_conversations: MAX_CONVERSATIONS,
        }
    }

    /// Override the hidden directory name.
    pub fn with_dir_name(mut self, name: impl Into<String>) -> Self {
        self.dir_name = name.into();
        self
    }

    /// Override the conversation history bound.
    pub fn with_max_conversations(mut self, max: usize) -> Self {
        self.max_conversations = max;
        self
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn max_conversations(&self) -> usize {
        self.max_conversations
    }

    /// The hidden directory holding every artifact.
    pub fn vault_dir(&self) -> PathBuf {
        self.project_dir.join(&self.dir_name)
    }

    pub fn vault_file(&self) -> PathBuf {
        self.vault_dir().join(VAULT_FILE)
    }

    pub fn meta_file(&self) -> PathBuf {
        self.vault_dir().join(META_FILE)
    }

    pub fn memory_file(&self) -> PathBuf {
        self.vault_dir().join(MEMORY_FILE)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.vault_dir().join(SETTINGS_FILE)
    }

    /// Resolve a user-supplied document path against the project directory.
    ///
    /// Absolute paths are returned unchanged.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_dir.join(path)
        }
    }
}
