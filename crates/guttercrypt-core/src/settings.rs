//! Local project settings.
//!
//! A small unencrypted JSON file next to the vault holding the assistant
//! provider choice, optional API keys and the linked sync gist.

use std::fs;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::fs::{ensure_vault_dir, write_atomic};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gist_id: Option<String>,
}

impl ProjectSettings {
    /// Load settings; a missing or unparsable file yields defaults.
    pub fn load(config: &StoreConfig) -> Result<Self> {
        let path = config.settings_file();
        if !path.is_file() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)?;
        match serde_json::from_str(&contents) {
            Ok(settings) => Ok(settings),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring unreadable settings");
                Ok(Self::default())
            }
        }
    }

    /// Write settings, creating the vault directory if needed.
    pub fn save(&self, config: &StoreConfig) -> Result<()> {
        ensure_vault_dir(&config.vault_dir())?;
        let json = serde_json::to_string_pretty(self)?;
        write_atomic(&config.settings_file(), json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_settings_are_default() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::new(dir.path());
        assert_eq!(ProjectSettings::load(&config).unwrap(), ProjectSettings::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::new(dir.path());
        let settings = ProjectSettings {
            ai_provider: Some("gemini".to_string()),
            gist_id: Some("abc123".to_string()),
            ..Default::default()
        };

        settings.save(&config).unwrap();
        let loaded = ProjectSettings::load(&config).unwrap();
        assert_eq!(loaded, settings);

        let raw = fs::read_to_string(config.settings_file()).unwrap();
        assert!(raw.contains("\"gistId\": \"abc123\""));
        assert!(!raw.contains("geminiApiKey"));
    }

    #[test]
    fn test_unparsable_settings_are_default() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::new(dir.path());
        fs::create_dir_all(config.vault_dir()).unwrap();
        fs::write(config.settings_file(), "not json").unwrap();

        assert_eq!(ProjectSettings::load(&config).unwrap(), ProjectSettings::default());
    }

    #[test]
    fn test_unknown_fields_are_tolerated() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::new(dir.path());
        fs::create_dir_all(config.vault_dir()).unwrap();
        fs::write(
            config.settings_file(),
            r#"{"geminiApiKey":"k","theme":"neon"}"#,
        )
        .unwrap();

        let settings = ProjectSettings::load(&config).unwrap();
        assert_eq!(settings.gemini_api_key.as_deref(), Some("k"));
    }
}
