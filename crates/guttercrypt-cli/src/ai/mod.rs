//! KatBot's brain: pluggable chat-completion providers.
//!
//! The vault engine never talks to a provider. The CLI builds the system
//! prompt (persona plus memory context), hands it to an [`Assistant`] and
//! records the exchange afterwards.

mod gemini;
mod openai;
mod session;

use std::str::FromStr;
use std::time::Duration;

use reqwest::blocking::Client;
use secrecy::SecretString;
use thiserror::Error;

use guttercrypt_core::ProjectSettings;

use crate::constants::env;

pub use gemini::GeminiAssistant;
pub use openai::OpenAiAssistant;
pub use session::{ask, system_prompt, AskOutcome};

/// HTTP timeout for provider calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// KatBot persona.
pub const SYSTEM_PROMPT: &str = "You are KatBot, a sarcastic punk cat who is also a CLI secrets management expert.
You help developers with .env files, encryption, secrets management, and security best practices.
Your personality: snarky, blunt, uses cat puns, but genuinely helpful underneath the attitude.
Keep responses concise and practical. Use occasional emoji. Never reveal actual secret values.
You speak in lowercase mostly, like you can't be bothered with shift keys.";

/// Assistant failures.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("no API key configured")]
    NoApiKey,

    #[error("unknown provider: {0}")]
    NoProvider(String),

    #[error("provider rejected the API key")]
    AuthFailed,

    #[error("network error: {0}")]
    Network(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        AiError::Network(err.to_string())
    }
}

/// Map a non-success HTTP status to an error.
pub(crate) fn status_error(status: u16, message: String) -> AiError {
    match status {
        401 | 403 => AiError::AuthFailed,
        _ => AiError::Api { status, message },
    }
}

pub(crate) fn http_client() -> Result<Client, AiError> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// A chat-completion backend.
pub trait Assistant {
    /// Provider name for display.
    fn name(&self) -> &str;

    /// Answer `question` under the given system instruction.
    fn complete(&self, system: &str, question: &str) -> Result<String, AiError>;
}

/// Supported providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Gemini,
    OpenAi,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
        }
    }

    fn env_var(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => env::GEMINI_API_KEY,
            ProviderKind::OpenAi => env::OPENAI_API_KEY,
        }
    }

    fn settings_key<'s>(&self, settings: &'s ProjectSettings) -> Option<&'s str> {
        match self {
            ProviderKind::Gemini => settings.gemini_api_key.as_deref(),
            ProviderKind::OpenAi => settings.openai_api_key.as_deref(),
        }
    }

    /// Resolve from settings; no choice means Gemini.
    pub fn from_settings(settings: &ProjectSettings) -> Result<Self, AiError> {
        match settings.ai_provider.as_deref() {
            None => Ok(Self::default()),
            Some(name) => name.parse(),
        }
    }

    /// API key from the environment, then settings.
    pub fn api_key(&self, settings: &ProjectSettings) -> Option<SecretString> {
        std::env::var(self.env_var())
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                self.settings_key(settings)
                    .filter(|key| !key.trim().is_empty())
                    .map(str::to_string)
            })
            .map(SecretString::from)
    }

    /// Store `key` in the settings slot for this provider.
    pub fn set_key(&self, settings: &mut ProjectSettings, key: String) {
        match self {
            ProviderKind::Gemini => settings.gemini_api_key = Some(key),
            ProviderKind::OpenAi => settings.openai_api_key = Some(key),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = AiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAi),
            _ => Err(AiError::NoProvider(s.to_string())),
        }
    }
}

/// Build the configured assistant.
pub fn resolve_assistant(settings: &ProjectSettings) -> Result<Box<dyn Assistant>, AiError> {
    let kind = ProviderKind::from_settings(settings)?;
    let api_key = kind.api_key(settings).ok_or(AiError::NoApiKey)?;
    let assistant: Box<dyn Assistant> = match kind {
        ProviderKind::Gemini => Box::new(GeminiAssistant::new(api_key)?),
        ProviderKind::OpenAi => Box::new(OpenAiAssistant::new(api_key)?),
    };
    Ok(assistant)
}
