//! Encrypted note and conversation log.
//!
//! Memory is independent of the vault: it may be absent, empty or populated.
//! Absence loads as an empty memory. The whole document is re-encrypted on
//! every mutation.

mod prompt;

use std::fs;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::StoreConfig;
use crate::crypto::{decrypt_bytes, encrypt};
use crate::error::{GutterError, Result};
use crate::fs::{ensure_vault_dir, write_atomic};

pub use prompt::build_prompt_context;

/// Current memory schema version.
pub const MEMORY_FORMAT_VERSION: u32 = 1;

fn default_format_version() -> u32 {
    MEMORY_FORMAT_VERSION
}

/// Something the user asked to be remembered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// One question/answer pair from the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    pub question: String,
    pub answer: String,
    pub asked_at: DateTime<Utc>,
}

/// Decrypted memory document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub conversations: Vec<Exchange>,
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            format_version: MEMORY_FORMAT_VERSION,
            notes: Vec::new(),
            conversations: Vec::new(),
        }
    }
}

impl Memory {
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.conversations.is_empty()
    }

    pub fn push_note(&mut self, text: impl Into<String>) {
        self.notes.push(Note {
            text: text.into(),
            created_at: Utc::now(),
        });
    }

    /// Remove the note at `index`, keeping the order of the rest.
    pub fn remove_note(&mut self, index: usize) -> Result<Note> {
        if index >= self.notes.len() {
            return Err(GutterError::IndexOutOfRange {
                index,
                len: self.notes.len(),
            });
        }
        Ok(self.notes.remove(index))
    }

    /// Append an exchange, then drop the oldest until at most `max` remain.
    pub fn push_conversation(
        &mut self,
        question: impl Into<String>,
        answer: impl Into<String>,
        max: usize,
    ) {
        self.conversations.push(Exchange {
            question: question.into(),
            answer: answer.into(),
            asked_at: Utc::now(),
        });
        if self.conversations.len() > max {
            let excess = self.conversations.len() - max;
            self.conversations.drain(..excess);
        }
    }
}

/// Store for the encrypted memory artifact of one project.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    config: StoreConfig,
}

impl MemoryStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Whether a memory artifact exists on disk.
    pub fn exists(&self) -> bool {
        self.config.memory_file().is_file()
    }

    /// Load and decrypt memory; a missing artifact is an empty memory.
    ///
    /// # Errors
    ///
    /// [`GutterError::WrongPassphrase`] if the artifact cannot be opened or
    /// its contents are not a memory document.
    pub fn load(&self, passphrase: &str) -> Result<Memory> {
        let path = self.config.memory_file();
        if !path.is_file() {
            return Ok(Memory::default());
        }

        let payload = fs::read(&path)?;
        let plaintext = decrypt_bytes(&payload, passphrase).map_err(GutterError::into_auth_failure)?;
        let memory = serde_json::from_slice(&plaintext).map_err(|_| GutterError::WrongPassphrase)?;
        Ok(memory)
    }

    /// Encrypt and replace the memory artifact.
    pub fn save(&self, memory: &Memory, passphrase: &str) -> Result<()> {
        ensure_vault_dir(&self.config.vault_dir())?;
        let plaintext = serde_json::to_vec(memory)?;
        let sealed = encrypt(&plaintext, passphrase)?;
        write_atomic(&self.config.memory_file(), sealed.as_bytes())?;
        debug!(
            notes = memory.notes.len(),
            conversations = memory.conversations.len(),
            "saved memory"
        );
        Ok(())
    }

    /// Stored notes in insertion order.
    pub fn notes(&self, passphrase: &str) -> Result<Vec<Note>> {
        Ok(self.load(passphrase)?.notes)
    }

    pub fn add_note(&self, text: &str, passphrase: &str) -> Result<()> {
        let mut memory = self.load(passphrase)?;
        memory.push_note(text);
        self.save(&memory, passphrase)
    }

    /// Remove the note at zero-based `index`.
    ///
    /// Nothing is written when the index is invalid.
    pub fn remove_note(&self, index: usize, passphrase: &str) -> Result<Note> {
        let mut memory = self.load(passphrase)?;
        let removed = memory.remove_note(index)?;
        self.save(&memory, passphrase)?;
        Ok(removed)
    }

    /// Record an exchange, keeping only the most recent `max_conversations`.
    pub fn add_conversation(&self, question: &str, answer: &str, passphrase: &str) -> Result<()> {
        let mut memory = self.load(passphrase)?;
        memory.push_conversation(question, answer, self.config.max_conversations());
        self.save(&memory, passphrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const PASSPHRASE: &str = "test-passphrase-secure-123";

    #[test]
    fn test_push_conversation_evicts_oldest_first() {
        let mut memory = Memory::default();
        for i in 0..25 {
            memory.push_conversation(format!("q{}", i), format!("a{}", i), 20);
        }

        assert_eq!(memory.conversations.len(), 20);
        let questions: Vec<&str> = memory
            .conversations
            .iter()
            .map(|c| c.question.as_str())
            .collect();
        let expected: Vec<String> = (5..25).map(|i| format!("q{}", i)).collect();
        assert_eq!(questions, expected);
    }

    #[test]
    fn test_notes_are_never_evicted() {
        let mut memory = Memory::default();
        for i in 0..50 {
            memory.push_note(format!("note {}", i));
            memory.push_conversation("q", "a", 2);
        }
        assert_eq!(memory.notes.len(), 50);
        assert_eq!(memory.conversations.len(), 2);
    }

    #[test]
    fn test_remove_note_in_memory() {
        let mut memory = Memory::default();
        for text in ["a", "b", "c"] {
            memory.push_note(text);
        }

        let removed = memory.remove_note(1).unwrap();
        assert_eq!(removed.text, "b");
        let texts: Vec<&str> = memory.notes.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "c"]);

        assert!(matches!(
            memory.remove_note(5),
            Err(GutterError::IndexOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn test_load_absent_is_empty_success() {
        let dir = tempdir().unwrap();
        let store = MemoryStore::new(StoreConfig::new(dir.path()));

        assert!(!store.exists());
        let memory = store.load(PASSPHRASE).unwrap();
        assert!(memory.notes.is_empty());
        assert!(memory.conversations.is_empty());
        assert!(!store.exists());
    }

    #[test]
    fn test_empty_is_distinct_from_absent() {
        let dir = tempdir().unwrap();
        let store = MemoryStore::new(StoreConfig::new(dir.path()));

        store.save(&Memory::default(), PASSPHRASE).unwrap();
        assert!(store.exists());
        assert!(store.load(PASSPHRASE).unwrap().is_empty());
        assert!(matches!(
            store.load("wrong"),
            Err(GutterError::WrongPassphrase)
        ));
    }

    #[test]
    fn test_reads_document_without_format_version() {
        let json = r#"{"notes":[{"text":"hi","createdAt":"2025-05-01T10:00:00.000Z"}],"conversations":[]}"#;
        let memory: Memory = serde_json::from_str(json).unwrap();
        assert_eq!(memory.format_version, MEMORY_FORMAT_VERSION);
        assert_eq!(memory.notes[0].text, "hi");
    }

    #[test]
    fn test_exchange_json_field_names() {
        let mut memory = Memory::default();
        memory.push_conversation("why?", "because", 20);
        let json = serde_json::to_string(&memory).unwrap();
        assert!(json.contains("\"askedAt\""));
        assert!(json.contains("\"question\":\"why?\""));
        assert!(json.contains("\"formatVersion\":1"));
    }
}
