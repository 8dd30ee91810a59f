//! Output path derivation and extension matching.

use std::path::{Path, PathBuf};

pub use crate::image_pipeline::{default_output_path, OUTPUT_EXTENSION};

/// Where the converted copy of `input` goes inside `output_dir`.
pub fn output_path_in(output_dir: &Path, input: &Path) -> PathBuf {
    match default_output_path(input).file_name() {
        Some(name) => output_dir.join(name),
        None => output_dir.join(format!("output.{}", OUTPUT_EXTENSION)),
    }
}

/// ASCII case-insensitive extension check; `ext` may carry a leading dot.
pub fn has_extension(path: &Path, ext: &str) -> bool {
    let ext = ext.trim_start_matches('.');
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_lands_in_output_dir() {
        let out = output_path_in(Path::new("/exports"), Path::new("/photos/Trip pics/IMG_7.Nef"));
        assert_eq!(out, PathBuf::from("/exports/IMG_7.jpg"));
    }

    #[test]
    fn output_path_matches_pipeline_default_name() {
        let input = Path::new("/photos/DSC_0001.NEF");
        let in_place = default_output_path(input);
        assert_eq!(output_path_in(Path::new("/photos"), input), in_place);
        assert_eq!(in_place.extension().and_then(|e| e.to_str()), Some(OUTPUT_EXTENSION));
    }

    #[test]
    fn extension_match_ignores_case() {
        for name in ["a.nef", "a.NEF", "a.Nef", "a.nEf"] {
            assert!(has_extension(Path::new(name), "nef"), "{name}");
        }
        assert!(has_extension(Path::new("a.NEF"), ".nef"));
    }

    #[test]
    fn extension_match_rejects_others() {
        assert!(!has_extension(Path::new("a.jpg"), "nef"));
        assert!(!has_extension(Path::new("a.nef.bak"), "nef"));
        assert!(!has_extension(Path::new("nef"), "nef"));
        assert!(!has_extension(Path::new("a.nefx"), "nef"));
    }
}
