//! CLI error types for structured error handling.
//!
//! Typed errors map to specific exit codes. Errors raised by the core,
//! the assistant and the sync client are classified here so every command
//! can simply propagate with `?`.

use std::fmt;

use guttercrypt_core::GutterError;

use crate::ai::AiError;
use crate::constants::exit_codes;
use crate::sync::SyncError;

/// CLI-specific errors with associated exit codes.
#[derive(Debug, Clone)]
pub enum CliError {
    /// Resource not found (vault, document, linked gist)
    NotFound {
        message: String,
        hint: Option<String>,
    },

    /// Authentication failed (wrong passphrase, too many attempts, remote auth)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),

    /// Vault already exists
    AlreadyExists { message: String, hint: String },

    /// Network or remote API failure
    Network(String),

    /// Anything else, reported with exit code 1
    General(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CliError {}

impl CliError {
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn auth_failed(message: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: None,
        }
    }

    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            CliError::NotFound { message, .. }
            | CliError::AuthFailed { message, .. }
            | CliError::AlreadyExists { message, .. } => message,
            CliError::InvalidInput(message)
            | CliError::Network(message)
            | CliError::General(message) => message,
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            CliError::NotFound { hint, .. } | CliError::AuthFailed { hint, .. } => hint.as_deref(),
            CliError::AlreadyExists { hint, .. } => Some(hint),
            _ => None,
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::AlreadyExists { .. } => exit_codes::ALREADY_EXISTS,
            CliError::Network(_) => exit_codes::NETWORK,
            CliError::General(_) => 1,
        }
    }

    /// Classify an error from a command handler.
    ///
    /// Walks the chain looking for a typed error; anything unrecognised
    /// becomes [`CliError::General`].
    pub fn classify(err: &anyhow::Error) -> CliError {
        for cause in err.chain() {
            if let Some(cli) = cause.downcast_ref::<CliError>() {
                return cli.clone();
            }
            if let Some(core) = cause.downcast_ref::<GutterError>() {
                return CliError::from(core);
            }
            if let Some(ai) = cause.downcast_ref::<AiError>() {
                return CliError::from(ai);
            }
            if let Some(sync) = cause.downcast_ref::<SyncError>() {
                return CliError::from(sync);
            }
        }
        CliError::General(err.to_string())
    }
}

impl From<&GutterError> for CliError {
    fn from(err: &GutterError) -> Self {
        match err {
            GutterError::NoVault => CliError::not_found(
                "no vault here.",
                "Hint: run `guttercrypt init` first, genius.",
            ),
            GutterError::AlreadyExists(_) => CliError::AlreadyExists {
                message: "vault already exists here.".to_string(),
                hint: "Hint: want me to torch it? `guttercrypt nuke`".to_string(),
            },
            GutterError::WrongPassphrase | GutterError::DecryptionFailed => {
                CliError::auth_failed("wrong passphrase. nice try though.")
            }
            GutterError::PassphraseRequired => CliError::auth_failed_with_hint(
                "vault metadata is missing and i need the passphrase to peek inside.",
                "Hint: set GUTTERCRYPT_PASSPHRASE or run from a terminal.",
            ),
            GutterError::FileNotFound(path) => CliError::NotFound {
                message: format!(
                    "can't find '{}'. give me something to eat, meatbag.",
                    path.display()
                ),
                hint: None,
            },
            GutterError::IndexOutOfRange { index, len } => CliError::InvalidInput(format!(
                "there is no note #{}. you have {} note{}.",
                index + 1,
                len,
                if *len == 1 { "" } else { "s" }
            )),
            GutterError::InvalidInput(message) => CliError::InvalidInput(message.clone()),
            other => CliError::General(other.to_string()),
        }
    }
}

impl From<&AiError> for CliError {
    fn from(err: &AiError) -> Self {
        match err {
            AiError::NoApiKey => CliError::NotFound {
                message: "KatBot's brain isn't connected.".to_string(),
                hint: Some(
                    "Hint: set GEMINI_API_KEY or run `guttercrypt config api-key <KEY>`."
                        .to_string(),
                ),
            },
            AiError::NoProvider(name) => CliError::InvalidInput(format!(
                "unknown AI provider '{}'. pick gemini or openai.",
                name
            )),
            AiError::AuthFailed => CliError::auth_failed_with_hint(
                "the AI provider rejected your API key.",
                "Hint: check the key with `guttercrypt config show`.",
            ),
            AiError::Network(message) => {
                CliError::Network(format!("KatBot's brain glitched: {}", message))
            }
            AiError::Api { status, message } => CliError::Network(format!(
                "KatBot's brain glitched: HTTP {} {}",
                status, message
            )),
        }
    }
}

impl From<&SyncError> for CliError {
    fn from(err: &SyncError) -> Self {
        match err {
            SyncError::NoToken => CliError::auth_failed_with_hint(
                "no GitHub token found.",
                "Hint: set GITHUB_TOKEN, or log in with `gh auth login`.",
            ),
            SyncError::NoGistLinked => CliError::not_found(
                "no gist linked to this vault.",
                "Hint: run `guttercrypt sync push` or `guttercrypt sync link <GIST_ID>`.",
            ),
            SyncError::GistNotFound => CliError::NotFound {
                message: "that gist doesn't exist. or it's hiding from you.".to_string(),
                hint: None,
            },
            SyncError::AuthFailed => CliError::auth_failed_with_hint(
                "GitHub said no. your token is bad or lacks the gist scope.",
                "Hint: create a token with the `gist` scope.",
            ),
            SyncError::NotAVaultGist => CliError::invalid_input(
                "that gist has no vault.enc in it. not one of mine.",
            ),
            SyncError::Network(message) => {
                CliError::Network(format!("couldn't reach GitHub: {}", message))
            }
            SyncError::Api { status } => {
                CliError::Network(format!("GitHub API error: HTTP {}", status))
            }
            SyncError::Core(core) => CliError::from(core),
        }
    }
}
