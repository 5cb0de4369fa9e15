use crate::error::Result;
use crate::models::ContentId;
use camino::Utf8Path;
use std::fs;

/// List the addon IDs installed under a workshop content directory.
///
/// Every immediate subdirectory is one addon, named by its published file ID.
/// Symlinks to directories count as addons. Plain files are ignored.
/// Order follows the filesystem and is not sorted.
/// An empty directory yields an empty list.
pub fn list_content_ids(content_dir: &Utf8Path) -> Result<Vec<ContentId>> {
    let mut ids = Vec::new();

    for entry in fs::read_dir(content_dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let is_dir = if file_type.is_symlink() {
            // Dangling links are not addons
            fs::metadata(entry.path()).is_ok_and(|meta| meta.is_dir())
        } else {
            file_type.is_dir()
        };
        if !is_dir {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => ids.push(name),
            Err(name) => {
                tracing::warn!("Skipping non UTF-8 directory name: {:?}", name);
            }
        }
    }

    tracing::info!("Found {} installed addons in {}", ids.len(), content_dir);
    Ok(ids)
}
