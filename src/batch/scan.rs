//! Non-recursive directory listing filtered by extension.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::batch::error::{BatchError, Result};
use crate::batch::paths::has_extension;

#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Matching regular files, sorted by file name
    pub candidates: Vec<PathBuf>,
    /// Every entry in the directory, sorted by name
    pub entries: Vec<String>,
}

pub fn scan_dir(dir: &Path, extension: &str) -> Result<ScanResult> {
    let read_dir = |source| BatchError::ReadDir { path: dir.to_path_buf(), source };

    let mut result = ScanResult::default();
    for entry in std::fs::read_dir(dir).map_err(read_dir)? {
        let entry = entry.map_err(read_dir)?;
        let path = entry.path();
        result.entries.push(entry.file_name().to_string_lossy().into_owned());
        if path.is_file() && has_extension(&path, extension) {
            result.candidates.push(path);
        }
    }

    result.entries.sort();
    result.candidates.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    debug!(
        dir = %dir.display(),
        entries = result.entries.len(),
        candidates = result.candidates.len(),
        "Scanned directory"
    );
    Ok(result)
}
