//! Session controller - runs one viewer session from prompts to report.
//!
//! # Flow
//!
//! 1. Ask for an install root override (blank keeps the platform default)
//! 2. Pick a Steam library folder from `libraryfolders.vdf` when there is more than one
//! 3. Ask for the Game ID and resolve the workshop content directory
//! 4. Ask whether to log to a file, confirming overwrite of an existing one
//! 5. List installed addons; with none, print a header-only report and stop
//! 6. Look up the game name, then every addon in one batched request
//! 7. Print the report to the console and, if requested, the log file
//!
//! Any [`WorkshopError`] ends the session at the step that raised it, before
//! anything is rendered. Declining the overwrite prompt ends it cleanly with
//! [`SessionOutcome::Cancelled`].

pub mod prompt;

pub use prompt::{ConsolePrompter, Prompter, parse_game_id, parse_yes_no};

use crate::error::{Result, WorkshopError};
use crate::metrics::SessionMetrics;
use crate::models::{AppConfig, GameRecord};
use crate::services::metadata::verify_coverage;
use crate::services::{
    DirectoryResolver, Report, ReportRenderer, WorkshopApi, list_content_ids, timestamp_now,
};
use camino::Utf8PathBuf;
use std::io::Write;
use std::time::Instant;

/// Counts from a completed session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub game: GameRecord,
    pub addons: usize,
    pub failed: Vec<String>,
    pub log_path: Option<Utf8PathBuf>,
}

/// How a session ended without error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed(ReportSummary),
    /// The user declined to overwrite the existing log file
    Cancelled,
}

pub struct Session<'a, A: WorkshopApi, P: Prompter, W: Write> {
    config: &'a AppConfig,
    api: &'a A,
    prompter: P,
    console: W,
    metrics: SessionMetrics,
}

impl<'a, A: WorkshopApi, P: Prompter, W: Write> Session<'a, A, P, W> {
    pub fn new(config: &'a AppConfig, api: &'a A, prompter: P, console: W) -> Self {
        Self {
            config,
            api,
            prompter,
            console,
            metrics: SessionMetrics::new(),
        }
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    pub fn console(&self) -> &W {
        &self.console
    }

    pub fn run(&mut self) -> Result<SessionOutcome> {
        let resolver = DirectoryResolver::new(self.config);

        if let Some(warning) = resolver.platform_warning() {
            tracing::warn!("{}", warning);
            self.prompter.say(&format!("Warning: {}", warning))?;
        }

        let default_root = resolver.default_install_root();
        let root_answer = self.prompter.ask(&format!(
            "Steam directory (leave blank for {}): ",
            default_root
        ))?;
        let root = resolver.install_root(Some(&root_answer));
        let library = self.select_library(&resolver, &root)?;

        let app_id = parse_game_id(&self.prompter.ask("Game ID: ")?)?;
        let content_dir = resolver.resolve_content_dir(&library, app_id)?;

        let log_path = match self.confirm_log_file()? {
            LogChoice::ConsoleOnly => None,
            LogChoice::File(path) => Some(path),
            LogChoice::Declined => {
                tracing::info!("Overwrite declined, exiting");
                self.prompter.say("Exiting...")?;
                return Ok(SessionOutcome::Cancelled);
            }
        };

        let ids = list_content_ids(&content_dir)?;
        self.metrics.record_found(ids.len());

        if ids.is_empty() {
            tracing::info!("No addons installed for game {}", app_id);
            let game = GameRecord::unresolved(app_id);
            let report = Report::empty(&game, &timestamp_now());
            ReportRenderer::new(&mut self.console, log_path.clone()).render(&report)?;
            return Ok(SessionOutcome::Completed(ReportSummary {
                game,
                addons: 0,
                failed: Vec::new(),
                log_path,
            }));
        }

        let started = Instant::now();
        let game = self.api.game_record(app_id)?;
        self.metrics.record_request(started.elapsed());
        tracing::info!("Game {} is \"{}\"", app_id, game.display_name);

        let started = Instant::now();
        let results = self.api.file_details(&ids)?;
        self.metrics.record_request(started.elapsed());
        verify_coverage(&ids, &results)?;
        self.metrics.record_results(&results);

        let report = Report::build(&game, &results, &timestamp_now());
        ReportRenderer::new(&mut self.console, log_path.clone()).render(&report)?;

        Ok(SessionOutcome::Completed(ReportSummary {
            game,
            addons: results.len(),
            failed: report.failed_ids().to_vec(),
            log_path,
        }))
    }

    /// Choose the library folder holding the game.
    ///
    /// Without a readable index the install root is the only library.
    fn select_library(&mut self, resolver: &DirectoryResolver<'_>, root: &str) -> Result<String> {
        let folders = resolver.library_folders(root);
        if folders.len() <= 1 {
            return Ok(folders
                .into_iter()
                .next()
                .map(|f| f.path)
                .unwrap_or_else(|| root.to_string()));
        }

        self.prompter.say(
            "Type the identifier associated with the Steam library folder your game is installed in:",
        )?;
        for folder in &folders {
            self.prompter
                .say(&format!("({}) {}", folder.key, folder.path))?;
        }

        let choice = self.prompter.ask("Library ID: ")?;
        let selected = folders
            .into_iter()
            .find(|f| f.key == choice.trim())
            .map(|f| f.path);
        selected.ok_or(WorkshopError::InvalidInput(choice))
    }

    /// Ask whether to log to a file, confirming overwrite of an existing one.
    fn confirm_log_file(&mut self) -> Result<LogChoice> {
        let wants_file = parse_yes_no(&self.prompter.ask(
            "Would you like to log all addons to a file? Recommended if you have a large amount of addons. [Y/n] ",
        )?)?;
        if !wants_file {
            return Ok(LogChoice::ConsoleOnly);
        }

        let path = Utf8PathBuf::from(&self.config.settings.output_file);
        if path.is_file() {
            let overwrite = parse_yes_no(&self.prompter.ask(&format!(
                "The {} file already exists, overwrite it? [Y/n] ",
                path
            ))?)?;
            if !overwrite {
                return Ok(LogChoice::Declined);
            }
        }

        Ok(LogChoice::File(path))
    }
}

enum LogChoice {
    ConsoleOnly,
    File(Utf8PathBuf),
    Declined,
}

/// Final dismiss prompt so console windows stay open.
pub fn wait_for_exit<P: Prompter>(prompter: &mut P) {
    if let Err(e) = prompter.ask("Press Enter to exit... ") {
        tracing::debug!("Exit prompt ended early: {}", e);
    }
}
