use camino::Utf8PathBuf;
use thiserror::Error;

/// Fatal conditions that abort a viewer session.
///
/// Per-addon lookup failures are not errors at this level; they are carried as
/// [`MetadataResult::Error`](crate::models::MetadataResult::Error) and reported
/// in the trailing summary.
#[derive(Error, Debug)]
pub enum WorkshopError {
    #[error(
        "No Steam Web API key was provided. Set STEAM_WEB_API_KEY in the environment or a \".env\" file"
    )]
    MissingCredential,

    #[error("\"{0}\" is not a valid response")]
    InvalidInput(String),

    #[error("Workshop directory for game {game_id} does not exist. Directory: {path}")]
    DirectoryNotFound { game_id: u32, path: Utf8PathBuf },

    #[error("Request to Steam Web API failed: {0}")]
    RemoteLookupFailed(String),

    #[error("Malformed response from Steam Web API: {0}")]
    MalformedResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for WorkshopError {
    fn from(err: reqwest::Error) -> Self {
        WorkshopError::RemoteLookupFailed(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WorkshopError>;
