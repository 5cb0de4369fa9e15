//! Workshop Viewer - lists every Steam Workshop addon installed locally for a game.
//!
//! # Execution Flow
//!
//! 1. Load `Settings.yaml` from the config directory (defaults when absent)
//! 2. Resolve the Steam Web API key; stop before touching the disk if there is none
//! 3. Initialize logging → logs/workshop-viewer.<date>
//! 4. Run an interactive [`Session`]: install root, library, Game ID, file logging
//! 5. Print the addon report, optionally writing it to `output.txt`
//! 6. Wait for Enter so the console window stays open
//!
//! # Configuration Files
//!
//! Expected in `Workshop Viewer Data/` (or `--config-dir`):
//! - `Settings.yaml`: Steam directories per platform, output file, API endpoints
//! - `.env` (optional): `STEAM_WEB_API_KEY=...`, also read from the working directory

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use workshop_viewer::services::SteamWebClient;
use workshop_viewer::session::{ConsolePrompter, wait_for_exit};
use workshop_viewer::{
    APP_NAME, AppConfig, ConfigManager, Platform, Session, SessionOutcome, VERSION,
};

#[derive(Debug, Parser)]
#[command(
    name = "workshop-viewer",
    version,
    about = "List locally installed Steam Workshop addons for a game"
)]
struct Cli {
    /// Directory holding Settings.yaml and an optional .env
    #[arg(long, value_name = "PATH", default_value = "Workshop Viewer Data")]
    config_dir: Utf8PathBuf,

    /// Verbose diagnostics on the console and in the log file
    #[arg(long)]
    debug: bool,

    /// Exit without waiting for Enter
    #[arg(long)]
    no_pause: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::new(&cli.config_dir);
    let settings = config_manager.load_settings()?;
    let debug_mode = cli.debug || settings.viewer.debug_mode;

    let platform = Platform::current();
    let api_key = config_manager.load_api_key()?;
    let config = AppConfig::from_parts(settings.viewer, platform, api_key)
        .context("Cannot query Steam without an API key")?;

    let _guard =
        workshop_viewer::logging::setup_logging_with_console("logs", APP_NAME, debug_mode, true)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);
    tracing::info!("Detected platform: {}", platform);

    let client = SteamWebClient::new(&config).context("Failed to create HTTP client")?;
    let mut prompter = ConsolePrompter::stdio();

    let outcome = {
        let mut session = Session::new(&config, &client, &mut prompter, std::io::stdout());
        let outcome = session.run();
        session.metrics().log_summary();
        outcome
    };

    match outcome {
        Ok(SessionOutcome::Completed(summary)) => {
            tracing::info!(
                "Listed {} addons for {} ({} failed)",
                summary.addons,
                summary.game.display_name,
                summary.failed.len()
            );
            if config.settings.pause_on_exit && !cli.no_pause {
                wait_for_exit(&mut prompter);
            }
            Ok(())
        }
        Ok(SessionOutcome::Cancelled) => Ok(()),
        Err(e) => {
            tracing::error!("{}", e);
            Err(e).context("Session aborted")
        }
    }
}
