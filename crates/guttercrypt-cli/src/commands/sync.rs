use crate::app::AppContext;
use crate::cli::SyncSubcommand;
use crate::sync::{self, resolve_token, GistClient, SyncError};
use crate::ui::{badge, say, voice, Badge, Spinner};

pub fn handle_sync(ctx: &AppContext, command: &SyncSubcommand) -> anyhow::Result<()> {
    match command {
        SyncSubcommand::Push => handle_push(ctx),
        SyncSubcommand::Pull => handle_pull(ctx),
        SyncSubcommand::Link { gist_id } => handle_link(ctx, gist_id),
    }
}

fn client(ctx: &AppContext) -> anyhow::Result<GistClient> {
    let token = resolve_token(ctx.settings()?)?;
    Ok(GistClient::new(token)?)
}

fn handle_push(ctx: &AppContext) -> anyhow::Result<()> {
    let client = client(ctx)?;
    let mut settings = ctx.settings()?.clone();
    let ui = ctx.ui();

    let outcome = {
        let _spinner = Spinner::start(ui, "shipping vault");
        sync::push(&client, ctx.store_config()?, &mut settings)?
    };
    if outcome.created {
        ctx.save_settings(&settings)?;
    }

    say(ui, &badge(ui, Badge::Ok, &voice::pushed(outcome.created, &outcome.gist.html_url)));
    Ok(())
}

fn handle_pull(ctx: &AppContext) -> anyhow::Result<()> {
    let settings = ctx.settings()?;
    if settings.gist_id.is_none() {
        return Err(SyncError::NoGistLinked.into());
    }
    let client = client(ctx)?;
    let ui = ctx.ui();

    let written = {
        let _spinner = Spinner::start(ui, "fetching vault");
        sync::pull(&client, ctx.store_config()?, settings)?
    };

    let names: Vec<&str> = written.iter().map(|kind| kind.file_name()).collect();
    say(ui, &badge(ui, Badge::Ok, &voice::pulled(&names)));
    Ok(())
}

fn handle_link(ctx: &AppContext, gist_id: &str) -> anyhow::Result<()> {
    let client = client(ctx)?;
    let mut settings = ctx.settings()?.clone();
    let ui = ctx.ui();

    {
        let _spinner = Spinner::start(ui, "sniffing gist");
        sync::link(&client, gist_id, &mut settings)?;
    }
    ctx.save_settings(&settings)?;

    say(ui, &badge(ui, Badge::Ok, &voice::linked(gist_id)));
    Ok(())
}
