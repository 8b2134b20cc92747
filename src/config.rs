use anyhow::{Context, Result};
use std::path::PathBuf;

/// Cross-platform configuration directory manager
pub struct ConfigManager;

impl ConfigManager {
    /// Get the main configuration directory path following platform conventions:
    /// - Linux: $XDG_CONFIG_HOME/quote-sync or ~/.config/quote-sync
    /// - macOS: ~/Library/Application Support/quote-sync
    /// - Windows: %APPDATA%\quote-sync
    pub fn config_dir() -> Result<PathBuf> {
        #[cfg(target_os = "linux")]
        {
            // Follow XDG Base Directory Specification
            if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
                Ok(PathBuf::from(xdg_config).join("quote-sync"))
            } else {
                let home = dirs::home_dir().context("Failed to get home directory")?;
                Ok(home.join(".config").join("quote-sync"))
            }
        }

        #[cfg(target_os = "macos")]
        {
            let home = dirs::home_dir().context("Failed to get home directory")?;
            Ok(home
                .join("Library")
                .join("Application Support")
                .join("quote-sync"))
        }

        #[cfg(target_os = "windows")]
        {
            Ok(dirs::config_dir()
                .context("Failed to get Windows config directory")?
                .join("quote-sync"))
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        {
            let home = dirs::home_dir().context("Failed to get home directory")?;
            Ok(home.join(".quote-sync"))
        }
    }

    /// Get the durable key-value storage directory
    pub fn storage_dir() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("storage"))
    }

    /// Get the sync settings file path (config.toml)
    pub fn settings_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Get the log file path
    pub fn log_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("quote-sync.log"))
    }

    /// Ensure the configuration directory exists
    pub fn ensure_config_dir() -> Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir).with_context(|| {
            format!("Failed to create config directory: {}", config_dir.display())
        })?;
        Ok(config_dir)
    }

    /// Ensure the durable storage directory exists
    pub fn ensure_storage_dir() -> Result<PathBuf> {
        let storage_dir = Self::storage_dir()?;
        std::fs::create_dir_all(&storage_dir).with_context(|| {
            format!(
                "Failed to create storage directory: {}",
                storage_dir.display()
            )
        })?;
        Ok(storage_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paths() {
        // Just ensure they don't panic and return valid paths
        let config_dir = ConfigManager::config_dir().unwrap();
        assert!(config_dir.to_string_lossy().contains("quote-sync"));

        let storage = ConfigManager::storage_dir().unwrap();
        assert!(storage.to_string_lossy().contains("storage"));

        let settings = ConfigManager::settings_path().unwrap();
        assert!(settings.to_string_lossy().contains("config.toml"));

        let log = ConfigManager::log_file_path().unwrap();
        assert!(log.to_string_lossy().contains("quote-sync.log"));
    }
}
