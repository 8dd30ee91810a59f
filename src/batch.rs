//! Batch conversion of a folder of RAW files
//!
//! Scans a directory for files with a given extension, converts each one and
//! reports per-file results plus a final tally. A failing file never stops the batch.

mod error;
pub mod paths;
pub mod scan;
mod runner;
mod types;

pub use error::{BatchError, Result};
pub use paths::{default_output_path, has_extension, output_path_in};
pub use runner::{BatchOutcome, BatchRunner, FileConverter};
pub use scan::{scan_dir, ScanResult};
pub use types::{BatchConfig, BatchReport, FailedFile};
