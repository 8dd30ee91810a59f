//! Naming of converted files.

use std::path::{Path, PathBuf};

/// Extension given to every converted file.
pub const OUTPUT_EXTENSION: &str = "jpg";

/// `photo.NEF` -> `photo.jpg`, in the same directory.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}
