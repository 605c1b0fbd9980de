use std::io::IsTerminal;

use dialoguer::Input;

use guttercrypt_core::{GutterError, VaultStore};

use crate::app::{new_passphrase, with_passphrase, AppContext};
use crate::cli::{FileArgs, NukeArgs, StoreArgs};
use crate::constants::NUKE_PHRASE;
use crate::errors::CliError;
use crate::ui::{badge, bullets, say, voice, Badge};

/// Vault with an encrypted payload, or `NoVault`.
fn existing_vault(ctx: &AppContext) -> anyhow::Result<VaultStore> {
    let vault = ctx.vault()?;
    if !vault.exists() {
        return Err(GutterError::NoVault.into());
    }
    Ok(vault)
}

pub fn handle_init(ctx: &AppContext) -> anyhow::Result<()> {
    ctx.vault()?.create()?;
    let ui = ctx.ui();
    say(ui, &badge(ui, Badge::Cat, &voice::vault_created()));
    Ok(())
}

pub fn handle_store(ctx: &AppContext, args: &StoreArgs) -> anyhow::Result<()> {
    let vault = ctx.vault()?;
    if !vault.is_initialized() {
        return Err(GutterError::NoVault.into());
    }
    let ui = ctx.ui();

    // Check the source before asking for a passphrase.
    if args.text.is_none() {
        let source = vault.config().resolve(&args.file);
        if !source.is_file() {
            return Err(GutterError::FileNotFound(args.file.clone()).into());
        }
    }

    let passphrase = new_passphrase(ui)?;
    let message = match &args.text {
        Some(text) => {
            vault.store_raw_text(text, &passphrase)?;
            voice::stored_text()
        }
        None => voice::stored(vault.store_file(&args.file, &passphrase)?),
    };

    say(ui, &badge(ui, Badge::Ok, &message));
    Ok(())
}

pub fn handle_inject(ctx: &AppContext, args: &FileArgs) -> anyhow::Result<()> {
    let vault = existing_vault(ctx)?;
    let ui = ctx.ui();
    with_passphrase(ui, |passphrase| vault.inject_to(&args.file, passphrase))?;
    say(ui, &badge(ui, Badge::Ok, &voice::injected(&args.file)));
    Ok(())
}

pub fn handle_unlock(ctx: &AppContext, args: &FileArgs) -> anyhow::Result<()> {
    let vault = existing_vault(ctx)?;
    let ui = ctx.ui();
    with_passphrase(ui, |passphrase| vault.unlock(&args.file, passphrase))?;
    say(ui, &badge(ui, Badge::Ok, &voice::unlocked(&args.file)));
    Ok(())
}

pub fn handle_lock(ctx: &AppContext, args: &FileArgs) -> anyhow::Result<()> {
    let vault = existing_vault(ctx)?;
    let ui = ctx.ui();
    match vault.lock(&args.file) {
        Ok(()) => {
            say(ui, &badge(ui, Badge::Ok, &voice::locked(&args.file)));
            Ok(())
        }
        Err(GutterError::FileNotFound(_)) => Err(CliError::NotFound {
            message: voice::lock_missing(&args.file),
            hint: None,
        }
        .into()),
        Err(err) => Err(err.into()),
    }
}

pub fn handle_list(ctx: &AppContext) -> anyhow::Result<()> {
    let vault = ctx.vault()?;
    let listing = match vault.list_keys(None) {
        Ok(listing) => listing,
        Err(GutterError::PassphraseRequired) => {
            with_passphrase(ctx.ui(), |passphrase| vault.list_keys(Some(passphrase)))?.0
        }
        Err(err) => return Err(err.into()),
    };

    let ui = ctx.ui();
    if listing.raw_text {
        println!("{}", badge(ui, Badge::Cat, &voice::list_raw_text()));
    } else if listing.keys.is_empty() {
        println!("{}", badge(ui, Badge::Warn, &voice::list_empty()));
    } else {
        say(ui, &badge(ui, Badge::Cat, &voice::list_header()));
        println!("{}", bullets(ui, &listing.keys));
    }
    Ok(())
}

pub fn handle_nuke(ctx: &AppContext, args: &NukeArgs) -> anyhow::Result<()> {
    let vault = ctx.vault()?;
    if !vault.is_initialized() {
        return Err(GutterError::NoVault.into());
    }
    let ui = ctx.ui();

    if !args.yes {
        if !std::io::stdin().is_terminal() {
            return Err(CliError::invalid_input(
                "refusing to nuke without confirmation. pass --yes if you mean it.",
            )
            .into());
        }
        println!("{}", badge(ui, Badge::Err, &voice::nuke_confirm(NUKE_PHRASE)));
        let answer: String = Input::new()
            .with_prompt("\u{1F525}")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))?;
        if answer.trim().to_lowercase() != NUKE_PHRASE {
            say(ui, &badge(ui, Badge::Cat, &voice::nuke_cancelled()));
            return Ok(());
        }
    }

    vault.destroy()?;
    say(ui, &badge(ui, Badge::Err, &voice::nuked()));
    Ok(())
}
