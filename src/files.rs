//! Manuscript file selection. Only metadata is read; contents never are.

use std::path::Path;

use tracing::debug;

use crate::error::AxonError;
use crate::wizard::FileRef;

pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "tex"];
pub const MAX_FILE_BYTES: u64 = 50 * 1024 * 1024;

/// Supplies the name and size of a selected file.
pub trait FileProvider {
    fn select(&self, path: &Path) -> Result<FileRef, AxonError>;
}

/// Selects files from the local filesystem.
pub struct LocalFileProvider;

impl FileProvider for LocalFileProvider {
    fn select(&self, path: &Path) -> Result<FileRef, AxonError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AxonError::RejectedFile(format!("{} has no file name", path.display())))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AxonError::RejectedFile(format!(
                "{name}: supported formats are PDF, DOC, DOCX, TEX"
            )));
        }

        let size_bytes = std::fs::metadata(path)?.len();
        if size_bytes > MAX_FILE_BYTES {
            return Err(AxonError::RejectedFile(format!("{name}: larger than 50MB")));
        }

        debug!(name, size_bytes, "manuscript file selected");
        Ok(FileRef::new(name, size_bytes))
    }
}
