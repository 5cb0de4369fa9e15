//! Data models for the workshop viewer.
//!
//! - [`Platform`]: Operating system family, decides path separators and default Steam roots
//! - [`Settings`]: User settings loaded from `Settings.yaml`
//! - [`AppConfig`]: Immutable runtime configuration (settings + platform + API key)
//! - [`GameRecord`], [`MetadataResult`]: Results of the Steam Web API lookups
//! - [`LibraryFolder`]: Entry from Steam's `libraryfolders.vdf`

pub mod config;
pub mod metadata;
pub mod platform;

pub use config::{AppConfig, Settings, ViewerSettings};
pub use metadata::{ContentId, GameRecord, LibraryFolder, MetadataResult};
pub use platform::Platform;
