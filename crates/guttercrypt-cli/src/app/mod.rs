//! Application-level utilities for the Guttercrypt CLI.
//!
//! This module provides:
//! - Store configuration and settings resolution
//! - Passphrase handling with retry logic

mod context;
mod passphrase;

pub use context::AppContext;
pub use passphrase::{new_passphrase, with_passphrase};
