//! Config command implementation.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Subcommand};
use colored::Colorize;

use blogdash_core::ServiceUrl;

use crate::cli::GlobalOptions;
use crate::output;
use crate::settings::storage;

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Show the effective settings and where each one comes from
    Show,

    /// Persist --service and/or --timeout-secs
    Set,

    /// Remove the settings file
    Clear,
}

pub fn run(cmd: ConfigCommand, global: &GlobalOptions) -> Result<()> {
    match cmd.command {
        ConfigSubcommand::Show => show(global),
        ConfigSubcommand::Set => set(global),
        ConfigSubcommand::Clear => clear(),
    }
}

fn show(global: &GlobalOptions) -> Result<()> {
    let resolved = super::resolve(global)?;
    let stored = storage::load_settings()?;

    output::field(
        "Service",
        &format!("{} ({})", resolved.service, resolved.service_source),
    );
    output::field(
        "Timeout",
        &format!("{}s ({})", resolved.timeout.as_secs(), resolved.timeout_source),
    );
    if let Some(updated) = stored.updated_at {
        output::field("Saved", &updated.format("%Y-%m-%d %H:%M:%S UTC").to_string());
    }
    Ok(())
}

fn set(global: &GlobalOptions) -> Result<()> {
    if global.service.is_none() && global.timeout_secs.is_none() {
        anyhow::bail!("Nothing to set. Pass --service and/or --timeout-secs.");
    }

    let mut settings = storage::load_settings()?;

    if let Some(raw) = &global.service {
        let url = ServiceUrl::new(raw).context("Invalid service URL")?;
        settings.service = Some(url.to_string());
    }
    if let Some(secs) = global.timeout_secs {
        if secs == 0 {
            anyhow::bail!("Timeout must be at least 1 second");
        }
        settings.timeout_secs = Some(secs);
    }
    settings.updated_at = Some(Utc::now());

    let path = storage::save_settings(&settings).context("Failed to save settings")?;
    output::success("Settings saved");
    output::field("File", &path.display().to_string());
    Ok(())
}

fn clear() -> Result<()> {
    if storage::clear_settings()? {
        output::success("Settings cleared");
    } else {
        eprintln!("{}", "No settings saved.".dimmed());
    }
    Ok(())
}
