//! Plaintext metadata sidecar for the vault.
//!
//! The sidecar records key *names* so `list` works without a passphrase.
//! It never contains values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current sidecar schema version.
pub const META_FORMAT_VERSION: u32 = 1;

/// Unencrypted description of the stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultMeta {
    #[serde(alias = "version")]
    pub format_version: u32,
    pub stored_at: DateTime<Utc>,
    pub source_file: Option<String>,
    pub key_count: usize,
    pub keys: Vec<String>,
    #[serde(default)]
    pub raw_text: bool,
}

impl VaultMeta {
    /// Build metadata for an env-style document.
    pub fn for_document(contents: &str, source_file: Option<String>) -> Self {
        let keys = extract_keys(contents);
        Self {
            format_version: META_FORMAT_VERSION,
            stored_at: Utc::now(),
            source_file,
            key_count: keys.len(),
            keys,
            raw_text: false,
        }
    }

    /// Build metadata for free-form text (no key names are recorded).
    pub fn for_raw_text() -> Self {
        Self {
            format_version: META_FORMAT_VERSION,
            stored_at: Utc::now(),
            source_file: None,
            key_count: 0,
            keys: Vec::new(),
            raw_text: true,
        }
    }
}

/// Extract key names from `KEY=VALUE` lines.
///
/// Blank lines and `#` comments are skipped; each remaining line contributes
/// the trimmed text before its first `=` (the whole line if there is none).
/// Empty names are dropped. Order follows the document.
pub fn extract_keys(contents: &str) -> Vec<String> {
    contents
        .split('\n')
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|line| line.split('=').next().unwrap_or_default().trim())
        .filter(|key| !key.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_keys_skips_comments_and_blanks() {
        let keys = extract_keys("A=1\n# comment\n\nB=2\nNOVALUE\n");
        assert_eq!(keys, vec!["A", "B", "NOVALUE"]);
    }

    #[test]
    fn test_extract_keys_trims_and_handles_crlf() {
        let keys = extract_keys("  SPACED = value \r\nexport_ok=1\r\n   # indented comment\r\n");
        assert_eq!(keys, vec!["SPACED", "export_ok"]);
    }

    #[test]
    fn test_extract_keys_splits_on_first_equals() {
        let keys = extract_keys("URL=postgres://u:p@h/db?x=y\n");
        assert_eq!(keys, vec!["URL"]);
    }

    #[test]
    fn test_extract_keys_drops_empty_names() {
        let keys = extract_keys("=orphan\n  =  \nKEY=1");
        assert_eq!(keys, vec!["KEY"]);
    }

    #[test]
    fn test_meta_for_document_counts_keys() {
        let meta = VaultMeta::for_document("A=1\n# comment\n\nB=2\nNOVALUE\n", Some(".env".into()));
        assert_eq!(meta.key_count, 3);
        assert_eq!(meta.keys.len(), meta.key_count);
        assert_eq!(meta.source_file.as_deref(), Some(".env"));
        assert!(!meta.raw_text);
    }

    #[test]
    fn test_meta_json_shape_has_no_values() {
        let meta = VaultMeta::for_document("TOKEN=super-secret-value\n", None);
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("\"formatVersion\":1"));
        assert!(json.contains("\"keyCount\":1"));
        assert!(json.contains("\"sourceFile\":null"));
        assert!(!json.contains("super-secret-value"));
    }

    #[test]
    fn test_meta_reads_legacy_version_field() {
        let json = r#"{
            "version": 1,
            "storedAt": "2025-01-02T03:04:05.678Z",
            "sourceFile": ".env",
            "keyCount": 2,
            "keys": ["A", "B"]
        }"#;
        let meta: VaultMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.format_version, 1);
        assert_eq!(meta.keys, vec!["A", "B"]);
        assert!(!meta.raw_text);
    }

    #[test]
    fn test_raw_text_meta() {
        let meta = VaultMeta::for_raw_text();
        assert!(meta.raw_text);
        assert!(meta.keys.is_empty());
        assert_eq!(meta.key_count, 0);
        assert!(meta.source_file.is_none());
    }
}
