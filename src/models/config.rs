use crate::error::WorkshopError;
use crate::models::Platform;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const DEFAULT_APP_DETAILS_URL: &str = "https://store.steampowered.com/api/appdetails";
pub const DEFAULT_FILE_DETAILS_URL: &str =
    "https://api.steampowered.com/ISteamRemoteStorage/GetPublishedFileDetails/v1/";

/// Settings file structure for `Settings.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(rename = "Viewer_Settings", default)]
    pub viewer: ViewerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerSettings {
    /// Default Steam install root per platform
    #[serde(rename = "Steam Directories", default = "default_steam_dirs")]
    pub steam_dirs: IndexMap<Platform, String>,

    #[serde(rename = "Output File", default = "default_output_file")]
    pub output_file: String,

    #[serde(rename = "App Details URL", default = "default_app_details_url")]
    pub app_details_url: String,

    #[serde(rename = "File Details URL", default = "default_file_details_url")]
    pub file_details_url: String,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,

    #[serde(rename = "Pause On Exit", default = "default_pause_on_exit")]
    pub pause_on_exit: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            steam_dirs: default_steam_dirs(),
            output_file: default_output_file(),
            app_details_url: default_app_details_url(),
            file_details_url: default_file_details_url(),
            debug_mode: false,
            pause_on_exit: true,
        }
    }
}

fn default_steam_dirs() -> IndexMap<Platform, String> {
    let mut dirs = IndexMap::new();
    dirs.insert(
        Platform::Windows,
        "C:\\Program Files (x86)\\Steam".to_string(),
    );
    dirs.insert(
        Platform::Macos,
        "~/Library/Application Support/Steam".to_string(),
    );
    dirs.insert(Platform::Linux, "~/.steam/steam".to_string());
    dirs
}

fn default_output_file() -> String {
    "output.txt".to_string()
}

fn default_app_details_url() -> String {
    DEFAULT_APP_DETAILS_URL.to_string()
}

fn default_file_details_url() -> String {
    DEFAULT_FILE_DETAILS_URL.to_string()
}

fn default_pause_on_exit() -> bool {
    true
}

/// Immutable runtime configuration, built once at startup.
///
/// Holds the loaded settings, the detected platform and the Steam Web API key.
/// Passed by reference to the directory resolver and the metadata client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub settings: ViewerSettings,
    pub platform: Platform,
    api_key: String,
}

impl AppConfig {
    /// Assemble the runtime configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WorkshopError::MissingCredential`] if the key is absent or blank.
    pub fn from_parts(
        settings: ViewerSettings,
        platform: Platform,
        api_key: Option<String>,
    ) -> Result<Self, WorkshopError> {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(WorkshopError::MissingCredential)?;

        Ok(Self {
            settings,
            platform,
            api_key,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}
