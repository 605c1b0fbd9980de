use crate::ai::ProviderKind;
use crate::app::AppContext;
use crate::cli::ConfigSubcommand;
use crate::ui::{badge, kv, say, Badge};

pub fn handle_config(ctx: &AppContext, command: &ConfigSubcommand) -> anyhow::Result<()> {
    match command {
        ConfigSubcommand::Show => handle_show(ctx),
        ConfigSubcommand::Provider { name } => handle_provider(ctx, name),
        ConfigSubcommand::ApiKey { key } => handle_api_key(ctx, key),
    }
}

/// Show the first and last few characters of a secret.
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

fn show_secret(value: Option<&str>) -> String {
    value.map(mask).unwrap_or_else(|| "(not set)".to_string())
}

fn handle_show(ctx: &AppContext) -> anyhow::Result<()> {
    let settings = ctx.settings()?;
    let ui = ctx.ui();
    let provider = settings
        .ai_provider
        .clone()
        .unwrap_or_else(|| ProviderKind::default().as_str().to_string());

    let lines = [
        kv(ui, "AI provider", &provider),
        kv(ui, "Gemini API key", &show_secret(settings.gemini_api_key.as_deref())),
        kv(ui, "OpenAI API key", &show_secret(settings.openai_api_key.as_deref())),
        kv(ui, "GitHub token", &show_secret(settings.github_token.as_deref())),
        kv(
            ui,
            "Gist",
            settings.gist_id.as_deref().unwrap_or("(not linked)"),
        ),
    ];
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

fn handle_provider(ctx: &AppContext, name: &str) -> anyhow::Result<()> {
    let kind: ProviderKind = name.parse()?;
    let mut settings = ctx.settings()?.clone();
    settings.ai_provider = Some(kind.as_str().to_string());
    ctx.save_settings(&settings)?;

    let ui = ctx.ui();
    say(
        ui,
        &badge(ui, Badge::Ok, &format!("KatBot now thinks with {}.", kind.as_str())),
    );
    Ok(())
}

fn handle_api_key(ctx: &AppContext, key: &str) -> anyhow::Result<()> {
    let mut settings = ctx.settings()?.clone();
    let kind = ProviderKind::from_settings(&settings)?;
    kind.set_key(&mut settings, key.trim().to_string());
    ctx.save_settings(&settings)?;

    let ui = ctx.ui();
    say(
        ui,
        &badge(
            ui,
            Badge::Warn,
            &format!(
                "{} API key saved in plaintext project config. keep it out of git.",
                kind.as_str()
            ),
        ),
    );
    Ok(())
}
