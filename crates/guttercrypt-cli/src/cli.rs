use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use guttercrypt_core::VERSION;

use crate::constants::DEFAULT_ENV_FILE;

/// Guttercrypt - local secrets manager for .env files, guarded by a cat
#[derive(Parser)]
#[command(name = "guttercrypt")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Project directory holding the .guttercrypt vault
    #[arg(short, long, global = true, env = "GUTTERCRYPT_DIR")]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Arguments for the `store` command
#[derive(Args)]
pub struct StoreArgs {
    /// Document to encrypt
    #[arg(value_name = "FILE", default_value = DEFAULT_ENV_FILE)]
    pub file: PathBuf,

    /// Store free-form text instead of a file
    #[arg(long, value_name = "TEXT", conflicts_with = "file")]
    pub text: Option<String>,
}

/// Arguments for commands that target a plaintext document
#[derive(Args)]
pub struct FileArgs {
    /// Plaintext document
    #[arg(value_name = "FILE", default_value = DEFAULT_ENV_FILE)]
    pub file: PathBuf,
}

/// Arguments for the `nuke` command
#[derive(Args)]
pub struct NukeArgs {
    /// Skip the confirmation phrase
    #[arg(long)]
    pub yes: bool,
}

/// Arguments for the `ask` command
#[derive(Args)]
pub struct AskArgs {
    /// Question for KatBot
    #[arg(value_name = "QUESTION", required = true, num_args = 1..)]
    pub question: Vec<String>,

    /// Ask without reading or recording memory
    #[arg(long)]
    pub no_memory: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty vault in the project directory
    Init,

    /// Encrypt a document (default .env) into the vault
    #[command(visible_alias = "eat")]
    Store(StoreArgs),

    /// Decrypt the vault into a document without touching the vault
    Inject(FileArgs),

    /// List stored key names (never values)
    #[command(visible_alias = "ls")]
    List,

    /// Delete the plaintext document; the encrypted copy stays
    Lock(FileArgs),

    /// Restore the plaintext document from the vault
    Unlock(FileArgs),

    /// Destroy the vault and everything in it
    Nuke(NukeArgs),

    /// Manage encrypted notes for KatBot
    Note {
        #[command(subcommand)]
        command: NoteSubcommand,
    },

    /// Ask KatBot a question
    Ask(AskArgs),

    /// Sync encrypted artifacts through a secret GitHub gist
    Sync {
        #[command(subcommand)]
        command: SyncSubcommand,
    },

    /// Show or change project settings
    Config {
        #[command(subcommand)]
        command: ConfigSubcommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Meow
    #[command(hide = true)]
    Meow,
}

#[derive(Subcommand)]
pub enum NoteSubcommand {
    /// Remember something
    Add {
        /// Note text
        #[arg(value_name = "TEXT", required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Show stored notes
    List,

    /// Forget a note by its number
    #[command(visible_alias = "rm")]
    Remove {
        /// Note number as shown by `note list`
        #[arg(value_name = "N")]
        number: usize,
    },
}

#[derive(Subcommand)]
pub enum SyncSubcommand {
    /// Upload encrypted artifacts, creating a secret gist if needed
    Push,

    /// Download encrypted artifacts from the linked gist
    Pull,

    /// Link an existing vault gist to this project
    Link {
        /// Gist identifier
        #[arg(value_name = "GIST_ID")]
        gist_id: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current settings (secrets masked)
    Show,

    /// Choose the assistant provider
    Provider {
        /// Provider name (gemini, openai)
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Save an API key for the selected provider
    ApiKey {
        /// API key
        #[arg(value_name = "KEY")]
        key: String,
    },
}
