use crate::models::Settings;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Environment variable holding the Steam Web API key
pub const API_KEY_VAR: &str = "STEAM_WEB_API_KEY";

/// Configuration manager for the settings file and API key.
///
/// Manages:
/// - Settings (`Settings.yaml`): Steam directories, output file, endpoints
/// - API key: `STEAM_WEB_API_KEY` from the environment, a `.env` in the working
///   directory, or a `.env` inside the config directory
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
    env_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// Nothing is created on disk until settings are saved.
    ///
    /// # Arguments
    /// * `config_dir` - Directory containing configuration files (e.g., "Workshop Viewer Data")
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Self {
        let config_dir = config_dir.as_ref().to_path_buf();

        Self {
            settings_path: config_dir.join("Settings.yaml"),
            env_path: config_dir.join(".env"),
            config_dir,
        }
    }

    /// Load the settings file.
    ///
    /// # Returns
    /// The loaded Settings, or defaults if the file doesn't exist
    pub fn load_settings(&self) -> Result<Settings> {
        if !self.settings_path.exists() {
            tracing::warn!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
            return Ok(Settings::default());
        }

        let file_contents = fs::read_to_string(&self.settings_path)
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?;

        let settings: Settings = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::info!("Loaded settings from {}", self.settings_path);
        Ok(settings)
    }

    /// Save the settings file.
    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir).with_context(|| {
                format!("Failed to create config directory: {}", self.config_dir)
            })?;
        }

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Resolve the Steam Web API key.
    ///
    /// Loads `.env` from the working directory into the process environment first,
    /// then reads [`API_KEY_VAR`]. Falls back to a `.env` in the config directory.
    /// Emptiness is checked later by [`AppConfig`](crate::models::AppConfig).
    pub fn load_api_key(&self) -> Result<Option<String>> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Failed to load .env file: {}", e);
            }
        }

        if let Ok(key) = std::env::var(API_KEY_VAR) {
            return Ok(Some(key));
        }

        self.api_key_from_env_file()
    }

    /// Read the API key from the config directory's `.env` without touching the
    /// process environment.
    pub fn api_key_from_env_file(&self) -> Result<Option<String>> {
        if !self.env_path.exists() {
            return Ok(None);
        }

        let entries = dotenvy::from_path_iter(&self.env_path)
            .with_context(|| format!("Failed to open env file: {}", self.env_path))?;

        for entry in entries {
            let (name, value) =
                entry.with_context(|| format!("Failed to parse env file: {}", self.env_path))?;
            if name == API_KEY_VAR {
                tracing::debug!("Read API key from {}", self.env_path);
                return Ok(Some(value));
            }
        }

        Ok(None)
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Get the settings file path.
    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = ConfigManager::new(&config_path);
        (manager, temp_dir)
    }

    #[test]
    fn test_load_save_settings() {
        let (manager, _temp_dir) = create_test_config_manager();

        let mut settings = Settings::default();
        settings.viewer.output_file = "addons.txt".to_string();
        manager.save_settings(&settings).unwrap();

        let loaded = manager.load_settings().unwrap();
        assert_eq!(loaded.viewer.output_file, "addons.txt");
    }

    #[test]
    fn test_env_file_key() {
        let (manager, _temp_dir) = create_test_config_manager();
        fs::write(
            manager.config_dir().join(".env"),
            "OTHER=1\nSTEAM_WEB_API_KEY=abc123\n",
        )
        .unwrap();

        let key = manager.api_key_from_env_file().unwrap();
        assert_eq!(key.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_env_file_missing() {
        let (manager, _temp_dir) = create_test_config_manager();
        assert_eq!(manager.api_key_from_env_file().unwrap(), None);
    }
}
