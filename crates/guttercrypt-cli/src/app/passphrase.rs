//! Passphrase acquisition and retry logic.

use dialoguer::Password;
use zeroize::Zeroizing;

use guttercrypt_core::crypto::validate_passphrase;
use guttercrypt_core::GutterError;

use crate::constants::{env, MAX_PASSPHRASE_ATTEMPTS};
use crate::errors::CliError;
use crate::ui::{voice, UiContext};

/// Passphrase from `GUTTERCRYPT_PASSPHRASE`, if set and not blank.
fn env_passphrase() -> Option<Zeroizing<String>> {
    std::env::var(env::PASSPHRASE)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(Zeroizing::new)
}

fn no_tty_error() -> anyhow::Error {
    CliError::auth_failed_with_hint(
        "no passphrase provided and no TTY available.",
        "Hint: set GUTTERCRYPT_PASSPHRASE.",
    )
    .into()
}

fn prompt(ui: &UiContext) -> anyhow::Result<Zeroizing<String>> {
    if !ui.is_interactive() {
        return Err(no_tty_error());
    }
    let passphrase = Password::new()
        .with_prompt(voice::passphrase_prompt())
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))?;
    Ok(Zeroizing::new(passphrase))
}

/// Obtain a passphrase for encrypting new content.
///
/// Interactive prompts ask twice. The result is validated.
pub fn new_passphrase(ui: &UiContext) -> anyhow::Result<Zeroizing<String>> {
    let passphrase = match env_passphrase() {
        Some(passphrase) => passphrase,
        None => {
            if !ui.is_interactive() {
                return Err(no_tty_error());
            }
            let value = Password::new()
                .with_prompt(voice::passphrase_prompt())
                .with_confirmation(voice::passphrase_confirm(), voice::passphrase_mismatch())
                .interact()
                .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))?;
            Zeroizing::new(value)
        }
    };
    validate_passphrase(passphrase.as_str())?;
    Ok(passphrase)
}

/// Run `op` with a passphrase, retrying interactively on a wrong one.
///
/// The environment passphrase gets a single attempt. Interactive prompting
/// allows [`MAX_PASSPHRASE_ATTEMPTS`]. Returns the operation's result and the
/// passphrase that opened it, for follow-up writes.
pub fn with_passphrase<T, F>(ui: &UiContext, mut op: F) -> anyhow::Result<(T, Zeroizing<String>)>
where
    F: FnMut(&str) -> guttercrypt_core::Result<T>,
{
    if let Some(passphrase) = env_passphrase() {
        let value = op(passphrase.as_str())?;
        return Ok((value, passphrase));
    }

    let mut attempts: u32 = 0;
    loop {
        attempts += 1;
        let passphrase = prompt(ui)?;
        match op(passphrase.as_str()) {
            Ok(value) => return Ok((value, passphrase)),
            Err(GutterError::WrongPassphrase) => {
                let remaining = MAX_PASSPHRASE_ATTEMPTS.saturating_sub(attempts);
                if remaining == 0 {
                    return Err(CliError::auth_failed_with_hint(
                        "Too many failed passphrase attempts.",
                        "Hint: if you forgot your passphrase, the vault cannot be recovered.",
                    )
                    .into());
                }
                eprintln!(
                    "Incorrect passphrase. {} attempt{} remaining.",
                    remaining,
                    if remaining == 1 { "" } else { "s" }
                );
            }
            Err(err) => return Err(err.into()),
        }
    }
}
