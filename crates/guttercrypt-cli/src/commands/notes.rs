use guttercrypt_core::Note;

use crate::app::{new_passphrase, with_passphrase, AppContext};
use crate::cli::NoteSubcommand;
use crate::errors::CliError;
use crate::ui::{badge, say, simple_table, voice, Badge};

pub fn handle_note(ctx: &AppContext, command: &NoteSubcommand) -> anyhow::Result<()> {
    match command {
        NoteSubcommand::Add { text } => handle_add(ctx, &text.join(" ")),
        NoteSubcommand::List => handle_list(ctx),
        NoteSubcommand::Remove { number } => handle_remove(ctx, *number),
    }
}

fn handle_add(ctx: &AppContext, text: &str) -> anyhow::Result<()> {
    if text.trim().is_empty() {
        return Err(CliError::invalid_input("empty note. what am i supposed to remember, nothing?").into());
    }
    let store = ctx.memory()?;
    let ui = ctx.ui();

    // First note creates the memory file, so the passphrase is new.
    let (total, _) = if store.exists() {
        with_passphrase(ui, |passphrase| {
            store.add_note(text, passphrase)?;
            Ok(store.notes(passphrase)?.len())
        })?
    } else {
        let passphrase = new_passphrase(ui)?;
        store.add_note(text, &passphrase)?;
        (1, passphrase)
    };

    say(ui, &badge(ui, Badge::Cat, &voice::note_added(total)));
    Ok(())
}

fn handle_list(ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.memory()?;
    let ui = ctx.ui();
    if !store.exists() {
        println!("{}", badge(ui, Badge::Cat, &voice::notes_empty()));
        return Ok(());
    }

    let (notes, _) = with_passphrase(ui, |passphrase| store.notes(passphrase))?;
    if notes.is_empty() {
        println!("{}", badge(ui, Badge::Cat, &voice::notes_empty()));
        return Ok(());
    }

    println!("{}", simple_table(ui, &["#", "Note", "Added"], &note_rows(&notes)));
    Ok(())
}

fn note_rows(notes: &[Note]) -> Vec<Vec<String>> {
    notes
        .iter()
        .enumerate()
        .map(|(i, note)| {
            vec![
                (i + 1).to_string(),
                note.text.clone(),
                note.created_at.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect()
}

fn handle_remove(ctx: &AppContext, number: usize) -> anyhow::Result<()> {
    if number == 0 {
        return Err(CliError::invalid_input("notes are numbered from 1, nerd.").into());
    }
    let store = ctx.memory()?;
    let (removed, _) = with_passphrase(ctx.ui(), |passphrase| {
        store.remove_note(number - 1, passphrase)
    })?;

    let ui = ctx.ui();
    say(ui, &badge(ui, Badge::Cat, &voice::note_removed(&removed.text)));
    Ok(())
}
