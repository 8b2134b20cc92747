use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::config::ConfigManager;

fn default_remote_url() -> String {
    "https://jsonplaceholder.typicode.com/posts".to_string()
}

fn default_interval_secs() -> u64 {
    30
}

/// Sync settings stored in config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSettings {
    /// URL of the remote quote endpoint
    #[serde(default = "default_remote_url")]
    pub remote_url: String,

    /// Seconds between reconciliation passes in watch mode
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for SyncSettings {
    fn default() -> Self {
        SyncSettings {
            remote_url: default_remote_url(),
            interval_secs: default_interval_secs(),
        }
    }
}

impl SyncSettings {
    /// Load settings from file, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        let settings_path = Self::settings_path()?;

        if !settings_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&settings_path).with_context(|| {
            format!("Failed to read settings file: {}", settings_path.display())
        })?;

        let settings: SyncSettings =
            toml::from_str(&content).context("Failed to parse settings file")?;

        Ok(settings)
    }

    /// Save settings to file
    pub fn save(&self) -> Result<()> {
        let settings_path = Self::settings_path()?;

        if let Some(parent) = settings_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;

        fs::write(&settings_path, content).with_context(|| {
            format!("Failed to write settings file: {}", settings_path.display())
        })?;

        Ok(())
    }

    fn settings_path() -> Result<PathBuf> {
        ConfigManager::settings_path()
    }
}

/// Update the sync settings
pub fn update_settings(remote_url: Option<String>, interval_secs: Option<u64>) -> Result<()> {
    let mut settings = SyncSettings::load()?;

    if let Some(url) = remote_url {
        settings.remote_url = url;
        println!(
            "{}",
            format!("Set remote URL to {}", settings.remote_url).green()
        );
    }

    if let Some(secs) = interval_secs {
        settings.interval_secs = secs;
        println!("{}", format!("Set sync interval to {secs}s").green());
    }

    settings.save()?;
    println!("{}", "Settings saved successfully!".green().bold());

    Ok(())
}

/// Show the current sync settings
pub fn show_settings() -> Result<()> {
    let settings = SyncSettings::load()?;

    println!("{}", "Current Sync Settings:".bold());
    println!("  {}: {}", "Remote URL".cyan(), settings.remote_url);
    println!("  {}: {}s", "Sync interval".cyan(), settings.interval_secs);

    Ok(())
}
