//! GitHub Gist REST client.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use guttercrypt_core::artifacts::{Artifact, ArtifactKind};
use guttercrypt_core::VERSION;

use super::SyncError;

const GIST_API: &str = "https://api.github.com/gists";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const GIST_DESCRIPTION: &str = "guttercrypt vault sync";

/// Identity of a created or updated gist.
#[derive(Debug, Clone, Deserialize)]
pub struct GistRef {
    pub id: String,
    pub html_url: String,
}

#[derive(Debug, Serialize)]
struct FileContent<'a> {
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateGist<'a> {
    description: &'a str,
    public: bool,
    files: HashMap<&'static str, FileContent<'a>>,
}

#[derive(Debug, Serialize)]
struct UpdateGist<'a> {
    files: HashMap<&'static str, FileContent<'a>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GistFile {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    truncated: bool,
    #[serde(default)]
    raw_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GistDetails {
    #[serde(default)]
    files: HashMap<String, GistFile>,
}

/// Map a non-success status.
pub(crate) fn status_error(status: u16) -> SyncError {
    match status {
        404 => SyncError::GistNotFound,
        401 | 403 => SyncError::AuthFailed,
        _ => SyncError::Api { status },
    }
}

fn files_payload(artifacts: &[Artifact]) -> HashMap<&'static str, FileContent<'_>> {
    artifacts
        .iter()
        .map(|a| {
            (
                a.kind.file_name(),
                FileContent {
                    content: &a.contents,
                },
            )
        })
        .collect()
}

/// Whether the gist carries a vault payload.
pub(crate) fn is_vault_gist(details: &GistDetails) -> bool {
    details
        .files
        .contains_key(ArtifactKind::Vault.file_name())
}

pub struct GistClient {
    client: Client,
    token: SecretString,
    api_base: String,
}

impl GistClient {
    pub fn new(token: SecretString) -> Result<Self, SyncError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(format!("guttercrypt/{}", VERSION))
            .build()?;
        Ok(Self {
            client,
            token,
            api_base: GIST_API.to_string(),
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(
                "Authorization",
                format!("token {}", self.token.expose_secret()),
            )
            .header("Accept", "application/vnd.github+json")
    }

    fn check(response: Response) -> Result<Response, SyncError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(status_error(status.as_u16()))
        }
    }

    /// Create a secret gist holding `artifacts`.
    pub fn create(&self, artifacts: &[Artifact]) -> Result<GistRef, SyncError> {
        let body = CreateGist {
            description: GIST_DESCRIPTION,
            public: false,
            files: files_payload(artifacts),
        };
        debug!(files = artifacts.len(), "creating gist");
        let response = self
            .authorized(self.client.post(&self.api_base))
            .json(&body)
            .send()?;
        Ok(Self::check(response)?.json()?)
    }

    /// Replace the artifact files of an existing gist.
    pub fn update(&self, gist_id: &str, artifacts: &[Artifact]) -> Result<GistRef, SyncError> {
        let body = UpdateGist {
            files: files_payload(artifacts),
        };
        debug!(gist_id, files = artifacts.len(), "updating gist");
        let response = self
            .authorized(self.client.patch(format!("{}/{}", self.api_base, gist_id)))
            .json(&body)
            .send()?;
        Ok(Self::check(response)?.json()?)
    }

    fn details(&self, gist_id: &str) -> Result<GistDetails, SyncError> {
        let response = self
            .authorized(self.client.get(format!("{}/{}", self.api_base, gist_id)))
            .send()?;
        Ok(Self::check(response)?.json()?)
    }

    /// Fail with [`SyncError::NotAVaultGist`] unless the gist holds a vault.
    pub fn verify(&self, gist_id: &str) -> Result<(), SyncError> {
        if is_vault_gist(&self.details(gist_id)?) {
            Ok(())
        } else {
            Err(SyncError::NotAVaultGist)
        }
    }

    /// Download every recognised artifact in the gist.
    ///
    /// Files the API truncates are fetched in full from their raw URL.
    pub fn fetch(&self, gist_id: &str) -> Result<Vec<Artifact>, SyncError> {
        let mut details = self.details(gist_id)?;
        let mut artifacts = Vec::new();
        for kind in ArtifactKind::ALL {
            let Some(file) = details.files.remove(kind.file_name()) else {
                continue;
            };
            let contents = match (file.truncated, file.raw_url, file.content) {
                (true, Some(raw_url), _) => {
                    let response = self.authorized(self.client.get(raw_url)).send()?;
                    Self::check(response)?.text()?
                }
                (_, _, Some(content)) => content,
                _ => continue,
            };
            artifacts.push(Artifact { kind, contents });
        }
        debug!(gist_id, files = artifacts.len(), "fetched gist");
        Ok(artifacts)
    }
}
