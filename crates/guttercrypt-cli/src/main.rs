//! Guttercrypt CLI - local secrets manager for .env files
//!
//! Encrypts project documents into a `.guttercrypt` vault, keeps KatBot's
//! encrypted memory, and syncs both through a secret gist.

mod ai;
mod app;
mod cli;
mod commands;
mod constants;
mod errors;
mod sync;
mod ui;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{ask, config, misc, notes, sync as sync_cmd, vault};
use crate::constants::env;
use crate::errors::CliError;
use crate::ui::print_error;

fn init_tracing() {
    let filter = EnvFilter::try_from_env(env::LOG).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        tracing::debug!(error = ?e, "command failed");
        let err = CliError::classify(&e);
        print_error(ctx.ui(), err.message(), err.hint());
        std::process::exit(err.exit_code());
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init) => vault::handle_init(ctx),
        Some(Commands::Store(args)) => vault::handle_store(ctx, args),
        Some(Commands::Inject(args)) => vault::handle_inject(ctx, args),
        Some(Commands::List) => vault::handle_list(ctx),
        Some(Commands::Lock(args)) => vault::handle_lock(ctx, args),
        Some(Commands::Unlock(args)) => vault::handle_unlock(ctx, args),
        Some(Commands::Nuke(args)) => vault::handle_nuke(ctx, args),
        Some(Commands::Note { command }) => notes::handle_note(ctx, command),
        Some(Commands::Ask(args)) => ask::handle_ask(ctx, args),
        Some(Commands::Sync { command }) => sync_cmd::handle_sync(ctx, command),
        Some(Commands::Config { command }) => config::handle_config(ctx, command),
        Some(Commands::Completions { shell }) => misc::handle_completions(*shell),
        Some(Commands::Meow) => misc::handle_meow(ctx.ui()),
        None => misc::handle_banner(ctx.ui()),
    }
}
