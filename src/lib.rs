// Workshop Viewer - list locally installed Steam Workshop addons for a game
//
// This is the library crate containing the directory resolution, Steam Web API
// lookups and report rendering. The binary crate (main.rs) provides the console entry point.

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod session;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use error::WorkshopError;
pub use models::{AppConfig, GameRecord, MetadataResult, Platform, Settings};
pub use session::{Session, SessionOutcome};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
