//! Settings storage in the user data directory.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use super::Settings;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Get the settings file path.
fn settings_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "blogdash").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("settings.json"))
}

/// Save settings to disk.
pub fn save_settings(settings: &Settings) -> Result<PathBuf> {
    let path = settings_path()?;
    let json = serde_json::to_string_pretty(settings)?;

    fs::write(&path, &json).context("Failed to write settings file")?;

    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(path)
}

/// Load settings from disk, or defaults if none were saved.
pub fn load_settings() -> Result<Settings> {
    let path = settings_path()?;

    if !path.exists() {
        return Ok(Settings::default());
    }

    let json = fs::read_to_string(&path).context("Failed to read settings file")?;
    serde_json::from_str(&json).with_context(|| format!("Invalid settings file {}", path.display()))
}

/// Remove the settings file. Returns false if there was none.
pub fn clear_settings() -> Result<bool> {
    let path = settings_path()?;

    if !path.exists() {
        return Ok(false);
    }

    fs::remove_file(&path).context("Failed to remove settings file")?;
    Ok(true)
}
