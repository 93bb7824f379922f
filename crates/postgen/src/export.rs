//! Plain-text export of a post, named after the target platform.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::PostError;
use crate::prompt::Platform;

/// MIME type of every export.
pub const EXPORT_MIME: &str = "text/plain";

/// A post ready to be downloaded or written to disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    pub mime: &'static str,
    pub body: String,
}

/// File name used for a platform's export, e.g. `post-LinkedIn.txt`.
pub fn export_file_name(platform: Platform) -> String {
    format!("post-{platform}.txt")
}

/// Package `text` for download. Fails when there is nothing to export.
pub fn export_post(text: &str, platform: Platform) -> Result<Export, PostError> {
    if text.trim().is_empty() {
        return Err(PostError::InvalidInput("no post to export yet".into()));
    }
    Ok(Export {
        file_name: export_file_name(platform),
        mime: EXPORT_MIME,
        body: text.to_string(),
    })
}

impl Export {
    /// Write the export into `dir` and return the full path.
    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.body)?;
        info!("exported post to {}", path.display());
        Ok(path)
    }
}
