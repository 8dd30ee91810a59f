use std::path::{Path, PathBuf};

/// Raw extension matched when none is given.
pub const DEFAULT_EXTENSION: &str = "nef";

/// Where to look for RAW files and where to put the JPEGs.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    /// Defaults to `input_dir` when unset
    pub output_dir: Option<PathBuf>,
    /// Matched case-insensitively, without the dot
    pub extension: String,
}

impl BatchConfig {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: None,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_extension(mut self, extension: impl AsRef<str>) -> Self {
        self.extension = extension.as_ref().trim_start_matches('.').to_string();
        self
    }

    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(self.input_dir.as_path())
    }

    /// Upper-case extension used in progress messages, e.g. `NEF`.
    pub fn label(&self) -> String {
        self.extension.to_ascii_uppercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    pub name: String,
    pub error: String,
}

/// Tally of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub converted: usize,
    pub failed: Vec<FailedFile>,
}

impl BatchReport {
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    pub fn total(&self) -> usize {
        self.converted + self.failed.len()
    }
}
