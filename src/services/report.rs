use crate::error::Result;
use crate::models::{ContentId, GameRecord, MetadataResult};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::File;
use std::io::{BufWriter, Write};

/// Text report for one viewer run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    header: String,
    items: Vec<String>,
    failed: Vec<ContentId>,
}

impl Report {
    /// Build the report from lookup results, in the order given.
    pub fn build(game: &GameRecord, results: &[MetadataResult], timestamp: &str) -> Self {
        let items = results.iter().map(render_item).collect();
        let failed = results
            .iter()
            .filter(|r| r.is_error())
            .map(|r| r.id().to_string())
            .collect();

        Self {
            header: render_header(game, timestamp),
            items,
            failed,
        }
    }

    /// Header-only report for a game with no installed addons.
    pub fn empty(game: &GameRecord, timestamp: &str) -> Self {
        Self::build(game, &[], timestamp)
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn failed_ids(&self) -> &[ContentId] {
        &self.failed
    }

    /// Every line of the report, as written to each sink.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.items.len() + 3);
        lines.push(self.header.clone());
        lines.extend(self.items.iter().cloned());
        if !self.failed.is_empty() {
            lines.push("There were errors when requesting the following addons:".to_string());
            lines.push(format!("{:?}", self.failed));
        }
        lines
    }
}

/// Local time in `YYYY-MM-DD HH:MM:SS.ffffff` form.
pub fn timestamp_now() -> String {
    chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.6f")
        .to_string()
}

pub fn render_header(game: &GameRecord, timestamp: &str) -> String {
    format!(
        "{} Local Workshop Addon List - {}",
        game.display_name, timestamp
    )
}

pub fn render_item(result: &MetadataResult) -> String {
    match result {
        MetadataResult::Ok { id, title } => format!("{} ({})", title, id),
        MetadataResult::Error { id, result_code } => format!(
            "Error while processing addon with ID {}. Steam error code {}",
            id, result_code
        ),
    }
}

/// Writes reports to the console and, when enabled, to a log file.
///
/// The log file is created, written and flushed within a single
/// [`render`](Self::render) call and closed when it returns, on success or error.
pub struct ReportRenderer<W: Write> {
    console: W,
    log_path: Option<Utf8PathBuf>,
}

impl<W: Write> ReportRenderer<W> {
    pub fn new(console: W, log_path: Option<Utf8PathBuf>) -> Self {
        Self { console, log_path }
    }

    pub fn log_path(&self) -> Option<&Utf8Path> {
        self.log_path.as_deref()
    }

    pub fn render(&mut self, report: &Report) -> Result<()> {
        let mut log_file = match &self.log_path {
            Some(path) => Some(BufWriter::new(File::create(path)?)),
            None => None,
        };

        for line in report.lines() {
            writeln!(self.console, "{}", line)?;
            if let Some(file) = log_file.as_mut() {
                writeln!(file, "{}", line)?;
            }
        }

        if let Some(mut file) = log_file {
            file.flush()?;
        }

        if let Some(path) = &self.log_path {
            writeln!(self.console, "Contents have been logged to {}.", path)?;
            tracing::info!("Report written to {}", path);
        }
        self.console.flush()?;
        Ok(())
    }

    pub fn into_console(self) -> W {
        self.console
    }
}
