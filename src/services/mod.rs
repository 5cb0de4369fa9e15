//! Services module - the steps of a viewer run.
//!
//! # Components
//!
//! - [`DirectoryResolver`]: Finds the Steam install root, the library folder and the
//!   workshop content directory for a game
//! - [`list_content_ids`]: Lists the addon directories installed for the game
//! - [`WorkshopApi`] / [`SteamWebClient`]: Game name lookup and the batched addon lookup
//! - [`Report`] / [`ReportRenderer`]: Report text and its console/file output
//!
//! None of these prompt the user; that is left to [`Session`](crate::session::Session).

pub mod directory;
pub mod enumerator;
pub mod metadata;
pub mod report;

pub use directory::{DirectoryResolver, expand_home};
pub use enumerator::list_content_ids;
pub use metadata::{
    SteamWebClient, WorkshopApi, parse_app_details, parse_file_details, verify_coverage,
};
pub use report::{Report, ReportRenderer, timestamp_now};
