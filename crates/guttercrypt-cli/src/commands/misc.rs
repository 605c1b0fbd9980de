use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::Cli;
use crate::ui::theme::{styled, styles};
use crate::ui::{badge, hint, voice, Badge, UiContext};

pub fn handle_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "guttercrypt", &mut std::io::stdout());
    Ok(())
}

pub fn handle_meow(ui: &UiContext) -> anyhow::Result<()> {
    println!("{}", badge(ui, Badge::Cat, voice::meow()));
    println!("{}", styled(voice::CAT, styles::pink(), ui.color));
    Ok(())
}

/// Shown when no subcommand is given.
pub fn handle_banner(ui: &UiContext) -> anyhow::Result<()> {
    println!(
        "{}",
        badge(ui, Badge::Cat, "guttercrypt: local secrets manager. no cloud, no bs.")
    );
    println!("{}", hint(ui, "guttercrypt --help"));
    Ok(())
}
