use guttercrypt_core::Memory;
use tracing::debug;

use crate::ai::{self, resolve_assistant};
use crate::app::{with_passphrase, AppContext};
use crate::cli::AskArgs;
use crate::ui::theme::{styled, styles};
use crate::ui::{badge, print_warning, voice, Badge, Spinner};

pub fn handle_ask(ctx: &AppContext, args: &AskArgs) -> anyhow::Result<()> {
    let question = args.question.join(" ");
    let ui = ctx.ui();
    let assistant = resolve_assistant(ctx.settings()?)?;
    debug!(provider = assistant.name(), "assistant resolved");

    let store = ctx.memory()?;
    let use_memory = !args.no_memory && store.exists();
    let loaded: Option<(Memory, _)> = if use_memory {
        Some(with_passphrase(ui, |passphrase| store.load(passphrase))?)
    } else {
        None
    };

    let outcome = {
        let _spinner = Spinner::start(ui, &voice::thinking());
        ai::ask(
            assistant.as_ref(),
            &question,
            loaded
                .as_ref()
                .map(|(memory, passphrase)| (&store, memory, passphrase.as_str())),
        )?
    };

    let prefix = badge(ui, Badge::Cat, "");
    println!("{} {}", prefix, styled(&outcome.response, styles::neon(), ui.color));

    if let Some(err) = outcome.memory_warning {
        print_warning(ui, &voice::memory_not_saved(&err.to_string()));
    }
    Ok(())
}
