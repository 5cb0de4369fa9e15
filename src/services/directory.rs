//! Steam directory resolution.
//!
//! Works out where the workshop content for a game lives on disk:
//! - the Steam install root (platform default, or a user override)
//! - the library folder the game is installed in, read from `steamapps/libraryfolders.vdf`
//! - the `steamapps/workshop/content/<app id>` directory inside that library
//!
//! Paths are assembled as strings with the platform's own separator so that a
//! Windows root such as `C:\Program Files (x86)\Steam` is extended with backslashes.

use crate::error::{Result, WorkshopError};
use crate::models::{AppConfig, LibraryFolder, Platform};
use camino::Utf8PathBuf;
use std::path::Path;

/// Install root used when the settings carry nothing for the platform
const FALLBACK_INSTALL_ROOT: &str = "~/.steam/steam";

/// Resolves install roots, library folders and workshop content directories.
pub struct DirectoryResolver<'a> {
    config: &'a AppConfig,
}

impl<'a> DirectoryResolver<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    /// Warning shown to the user when the default root is only a guess.
    pub fn platform_warning(&self) -> Option<String> {
        match self.config.platform {
            Platform::Unknown => Some(format!(
                "Unsupported operating system \"{}\"; the default Steam directory may be wrong",
                std::env::consts::OS
            )),
            _ => None,
        }
    }

    /// Default install root for the current platform, `~` not yet expanded.
    pub fn default_install_root(&self) -> String {
        let dirs = &self.config.settings.steam_dirs;
        match dirs.get(&self.config.platform) {
            Some(root) => root.clone(),
            None => {
                tracing::warn!(
                    "No Steam directory configured for platform {}, assuming {}",
                    self.config.platform,
                    FALLBACK_INSTALL_ROOT
                );
                dirs.get(&Platform::Linux)
                    .cloned()
                    .unwrap_or_else(|| FALLBACK_INSTALL_ROOT.to_string())
            }
        }
    }

    /// Pick the install root: a non-blank override wins, otherwise the default.
    pub fn install_root(&self, user_override: Option<&str>) -> String {
        let root = match user_override.map(str::trim).filter(|s| !s.is_empty()) {
            Some(custom) => {
                tracing::info!("Using user supplied Steam directory: {}", custom);
                custom.to_string()
            }
            None => self.default_install_root(),
        };
        expand_home(&root)
    }

    /// Path of Steam's library index under `root`.
    pub fn library_index_path(&self, root: &str) -> String {
        self.config
            .platform
            .join(root, &["steamapps", "libraryfolders.vdf"])
    }

    /// Library folders listed in the index under `root`, keyed by position.
    ///
    /// A missing or unreadable index yields an empty list; the caller then
    /// treats the install root itself as the only library.
    pub fn library_folders(&self, root: &str) -> Vec<LibraryFolder> {
        let index_path = self.library_index_path(root);
        let paths = match steamlocate::SteamDir::from_dir(Path::new(root))
            .and_then(|steam_dir| steam_dir.library_paths())
        {
            Ok(paths) => paths,
            Err(e) => {
                tracing::warn!("Could not read library index {}: {}", index_path, e);
                return Vec::new();
            }
        };

        let folders: Vec<LibraryFolder> = paths
            .into_iter()
            .enumerate()
            .filter_map(|(index, path)| match Utf8PathBuf::try_from(path) {
                Ok(path) => Some(LibraryFolder {
                    key: index.to_string(),
                    path: path.into_string(),
                }),
                Err(e) => {
                    tracing::warn!("Skipping non UTF-8 library path: {:?}", e.as_path());
                    None
                }
            })
            .collect();
        tracing::debug!("Found {} library folders in {}", folders.len(), index_path);
        folders
    }

    /// Workshop content directory for `app_id` inside `library`.
    pub fn content_dir(&self, library: &str, app_id: u32) -> Utf8PathBuf {
        let app_id = app_id.to_string();
        Utf8PathBuf::from(self.config.platform.join(
            library,
            &["steamapps", "workshop", "content", &app_id],
        ))
    }

    /// Like [`content_dir`](Self::content_dir) but requires the directory to exist.
    ///
    /// # Errors
    ///
    /// [`WorkshopError::DirectoryNotFound`] when nothing is on disk at the path.
    pub fn resolve_content_dir(&self, library: &str, app_id: u32) -> Result<Utf8PathBuf> {
        let dir = self.content_dir(library, app_id);
        if !dir.exists() {
            return Err(WorkshopError::DirectoryNotFound {
                game_id: app_id,
                path: dir,
            });
        }
        tracing::info!("Workshop content directory: {}", dir);
        Ok(dir)
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> String {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => rest,
        _ => return path.to_string(),
    };

    match directories::BaseDirs::new() {
        Some(base) => format!("{}{}", base.home_dir().to_string_lossy(), rest),
        None => {
            tracing::warn!("Could not determine home directory, leaving {} as is", path);
            path.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ViewerSettings;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(platform: Platform) -> AppConfig {
        AppConfig::from_parts(
            ViewerSettings::default(),
            platform,
            Some("test-key".to_string()),
        )
        .unwrap()
    }

    const LIBRARY_INDEX: &str = r#"
"libraryfolders"
{
	"0"
	{
		"path"		"{main}"
		"label"		""
		"contentid"		"4211386394158301264"
		"totalsize"		"0"
		"update_clean_bytes_tally"		"0"
		"time_last_update_corruption"		"0"
		"apps"
		{
			"400"		"4342335983"
		}
	}
	"1"
	{
		"path"		"{extra}"
		"label"		""
		"contentid"		"6703935862513591522"
		"totalsize"		"1000000000"
		"update_clean_bytes_tally"		"0"
		"time_last_update_corruption"		"0"
		"apps"
		{
		}
	}
}
"#;

    #[test]
    fn test_library_folders_keyed_by_position() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("Steam");
        let extra = temp_dir.path().join("SteamLibrary");
        fs::create_dir_all(root.join("steamapps")).unwrap();
        fs::create_dir_all(&extra).unwrap();
        let root = root.to_str().unwrap();
        let extra = extra.to_str().unwrap();
        fs::write(
            Path::new(root).join("steamapps/libraryfolders.vdf"),
            LIBRARY_INDEX
                .replace("{main}", root)
                .replace("{extra}", extra),
        )
        .unwrap();

        let config = config_for(Platform::Linux);
        let folders = DirectoryResolver::new(&config).library_folders(root);
        assert_eq!(folders.len(), 2);
        assert_eq!(folders[0].key, "0");
        assert_eq!(folders[0].path, root);
        assert_eq!(folders[1].key, "1");
        assert_eq!(folders[1].path, extra);
    }

    #[test]
    fn test_missing_install_root_has_no_libraries() {
        let config = config_for(Platform::Linux);
        let resolver = DirectoryResolver::new(&config);
        assert!(resolver.library_folders("/does/not/exist").is_empty());
    }

    #[test]
    fn test_windows_content_dir() {
        let config = config_for(Platform::Windows);
        let resolver = DirectoryResolver::new(&config);
        let dir = resolver.content_dir("C:\\Program Files (x86)\\Steam", 400);
        assert_eq!(
            dir.as_str(),
            "C:\\Program Files (x86)\\Steam\\steamapps\\workshop\\content\\400"
        );
    }

    #[test]
    fn test_override_wins_over_default() {
        let config = config_for(Platform::Windows);
        let resolver = DirectoryResolver::new(&config);
        assert_eq!(resolver.install_root(Some("  D:\\Steam  ")), "D:\\Steam");
        assert_eq!(
            resolver.install_root(Some("")),
            "C:\\Program Files (x86)\\Steam"
        );
        assert_eq!(resolver.install_root(None), "C:\\Program Files (x86)\\Steam");
    }

    #[test]
    fn test_unknown_platform_gets_default_and_warning() {
        let config = config_for(Platform::Unknown);
        let resolver = DirectoryResolver::new(&config);
        assert_eq!(resolver.default_install_root(), "~/.steam/steam");
        assert!(resolver.platform_warning().is_some());
        assert!(DirectoryResolver::new(&config_for(Platform::Linux))
            .platform_warning()
            .is_none());
    }

    #[test]
    fn test_missing_content_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_for(Platform::Linux);
        let resolver = DirectoryResolver::new(&config);

        let err = resolver
            .resolve_content_dir(temp_dir.path().to_str().unwrap(), 400)
            .unwrap_err();
        assert!(matches!(err, WorkshopError::DirectoryNotFound { game_id: 400, .. }));
    }

    #[test]
    fn test_existing_content_dir() {
        let temp_dir = TempDir::new().unwrap();
        let content = temp_dir.path().join("steamapps/workshop/content/400");
        fs::create_dir_all(&content).unwrap();

        let config = config_for(Platform::Linux);
        let resolver = DirectoryResolver::new(&config);
        let dir = resolver
            .resolve_content_dir(temp_dir.path().to_str().unwrap(), 400)
            .unwrap();
        assert!(dir.ends_with("400"));
    }

    #[test]
    fn test_expand_home_leaves_other_paths() {
        assert_eq!(expand_home("/opt/steam"), "/opt/steam");
        assert_eq!(expand_home("~user/steam"), "~user/steam");
        if directories::BaseDirs::new().is_some() {
            assert!(!expand_home("~/.steam/steam").starts_with('~'));
        }
    }
}
