//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, clap usage errors)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (vault, document, linked gist).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong passphrase, too many attempts, remote auth).
    pub const AUTH_FAILED: i32 = 5;

    /// Vault already exists.
    pub const ALREADY_EXISTS: i32 = 6;

    /// Network or remote API failure.
    pub const NETWORK: i32 = 7;
}

/// Document used by file commands when none is given.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Phrase that must be typed to confirm `nuke`.
pub const NUKE_PHRASE: &str = "burn it down";

/// Passphrase attempts allowed when prompting interactively.
pub const MAX_PASSPHRASE_ATTEMPTS: u32 = 3;

pub mod env {
    pub const PASSPHRASE: &str = "GUTTERCRYPT_PASSPHRASE";
    pub const LOG: &str = "GUTTERCRYPT_LOG";
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
    pub const GH_TOKEN: &str = "GH_TOKEN";
}
