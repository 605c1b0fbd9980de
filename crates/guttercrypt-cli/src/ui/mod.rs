//! UI primitives for the Guttercrypt CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, color, unicode, quiet)
//! - **Mode**: Output mode resolution (plain, pretty)
//! - **Theme**: Badges and the KatBot palette
//! - **Render**: Badges, key-value lines, hints, tables, errors
//! - **Progress**: Spinner for network calls
//! - **Voice**: KatBot's messages
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::{badge, say, voice, Badge, UiContext};
//!
//! let ui = UiContext::from_env(cli.no_color, cli.quiet);
//! say(&ui, &badge(&ui, Badge::Ok, &voice::stored(count)));
//! ```

mod context;
pub mod mode;
pub mod progress;
pub mod render;
pub mod theme;
pub mod voice;

// Re-export core types at module level
pub use context::UiContext;
pub use theme::Badge;

// Re-export commonly used render functions
pub use render::{
    badge, bullets, hint, kv, print_error, print_warning, say, simple_table,
};

pub use progress::Spinner;
