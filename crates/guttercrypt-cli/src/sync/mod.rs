//! Remote sync through a secret GitHub gist.
//!
//! Artifacts travel verbatim in both directions; nothing here decrypts
//! them. There is no merge: push overwrites the gist, pull overwrites the
//! local files.

mod gist;

use std::process::Command;

use secrecy::SecretString;
use thiserror::Error;
use tracing::debug;

use guttercrypt_core::artifacts::{collect_artifacts, restore_artifacts, ArtifactKind};
use guttercrypt_core::{GutterError, ProjectSettings, StoreConfig};

use crate::constants::env;

pub use gist::{GistClient, GistRef};

/// Sync failures.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("no GitHub token available")]
    NoToken,

    #[error("no gist linked")]
    NoGistLinked,

    #[error("gist not found")]
    GistNotFound,

    #[error("GitHub authentication failed")]
    AuthFailed,

    #[error("gist does not contain a vault")]
    NotAVaultGist,

    #[error("network error: {0}")]
    Network(String),

    #[error("GitHub API error: HTTP {status}")]
    Api { status: u16 },

    #[error(transparent)]
    Core(#[from] GutterError),
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        SyncError::Network(err.to_string())
    }
}

/// Resolve a GitHub token.
///
/// Order: `GITHUB_TOKEN`, `GH_TOKEN`, settings `githubToken`, then the
/// `gh auth token` command.
pub fn resolve_token(settings: &ProjectSettings) -> Result<SecretString, SyncError> {
    [env::GITHUB_TOKEN, env::GH_TOKEN]
        .into_iter()
        .find_map(|name| std::env::var(name).ok().filter(|t| !t.trim().is_empty()))
        .or_else(|| settings.github_token.clone().filter(|t| !t.trim().is_empty()))
        .or_else(gh_cli_token)
        .map(SecretString::from)
        .ok_or(SyncError::NoToken)
}

fn gh_cli_token() -> Option<String> {
    let output = Command::new("gh").args(["auth", "token"]).output().ok()?;
    if !output.status.success() {
        debug!("gh auth token unavailable");
        return None;
    }
    let token = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!token.is_empty()).then_some(token)
}

/// Result of a push.
#[derive(Debug)]
pub struct PushOutcome {
    pub gist: GistRef,
    pub created: bool,
}

/// Upload local artifacts.
///
/// Creates a gist when none is linked and records its id in `settings`;
/// the caller persists the settings.
pub fn push(
    client: &GistClient,
    config: &StoreConfig,
    settings: &mut ProjectSettings,
) -> Result<PushOutcome, SyncError> {
    let artifacts = collect_artifacts(config)?;
    match settings.gist_id.as_deref() {
        Some(gist_id) => Ok(PushOutcome {
            gist: client.update(gist_id, &artifacts)?,
            created: false,
        }),
        None => {
            let gist = client.create(&artifacts)?;
            settings.gist_id = Some(gist.id.clone());
            Ok(PushOutcome {
                gist,
                created: true,
            })
        }
    }
}

/// Download artifacts from the linked gist, overwriting local copies.
pub fn pull(
    client: &GistClient,
    config: &StoreConfig,
    settings: &ProjectSettings,
) -> Result<Vec<ArtifactKind>, SyncError> {
    let gist_id = settings.gist_id.as_deref().ok_or(SyncError::NoGistLinked)?;
    let artifacts = client.fetch(gist_id)?;
    Ok(restore_artifacts(config, &artifacts)?)
}

/// Verify `gist_id` holds a vault and record it in `settings`.
pub fn link(
    client: &GistClient,
    gist_id: &str,
    settings: &mut ProjectSettings,
) -> Result<(), SyncError> {
    client.verify(gist_id)?;
    settings.gist_id = Some(gist_id.to_string());
    Ok(())
}
