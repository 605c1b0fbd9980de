//! Application context for the Guttercrypt CLI.
//!
//! Provides a unified context that combines CLI arguments with a lazily
//! resolved store configuration and project settings.

use once_cell::unsync::OnceCell;

use guttercrypt_core::{MemoryStore, ProjectSettings, StoreConfig, VaultStore};

use crate::cli::Cli;
use crate::ui::UiContext;

/// Application context that bundles CLI args with configuration.
///
/// This avoids repeatedly resolving the project directory and reloading
/// settings while threading them through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    ui: UiContext,
    store_config: OnceCell<StoreConfig>,
    settings: OnceCell<ProjectSettings>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            ui: UiContext::from_env(cli.no_color, cli.quiet),
            store_config: OnceCell::new(),
            settings: OnceCell::new(),
        }
    }

    pub fn ui(&self) -> &UiContext {
        &self.ui
    }

    /// Store configuration for `--dir`, or the current directory.
    pub fn store_config(&self) -> anyhow::Result<&StoreConfig> {
        self.store_config.get_or_try_init(|| {
            let project_dir = match &self.cli.dir {
                Some(dir) => dir.clone(),
                None => std::env::current_dir()?,
            };
            Ok(StoreConfig::new(project_dir))
        })
    }

    pub fn vault(&self) -> anyhow::Result<VaultStore> {
        Ok(VaultStore::new(self.store_config()?.clone()))
    }

    pub fn memory(&self) -> anyhow::Result<MemoryStore> {
        Ok(MemoryStore::new(self.store_config()?.clone()))
    }

    /// Project settings, loaded lazily.
    pub fn settings(&self) -> anyhow::Result<&ProjectSettings> {
        self.settings
            .get_or_try_init(|| Ok(ProjectSettings::load(self.store_config()?)?))
    }

    /// Persist updated settings.
    ///
    /// The cached copy is not refreshed; commands save settings as their
    /// last step.
    pub fn save_settings(&self, settings: &ProjectSettings) -> anyhow::Result<()> {
        settings.save(self.store_config()?)?;
        Ok(())
    }
}
