/// Name of one installed workshop addon directory (its published file ID).
pub type ContentId = String;

/// Game whose workshop content is being listed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub app_id: u32,
    pub display_name: String,
}

impl GameRecord {
    /// Record used when no store lookup was made.
    pub fn unresolved(app_id: u32) -> Self {
        Self {
            app_id,
            display_name: format!("App {}", app_id),
        }
    }
}

/// Outcome of the metadata lookup for a single addon
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataResult {
    Ok { id: ContentId, title: String },
    Error { id: ContentId, result_code: i32 },
}

impl MetadataResult {
    pub fn id(&self) -> &str {
        match self {
            MetadataResult::Ok { id, .. } | MetadataResult::Error { id, .. } => id,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, MetadataResult::Error { .. })
    }
}

/// A Steam library folder listed in `libraryfolders.vdf`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryFolder {
    pub key: String,
    pub path: String,
}
