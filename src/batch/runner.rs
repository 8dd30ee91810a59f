use std::any::Any;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::batch::error::{BatchError, Result};
use crate::batch::paths::output_path_in;
use crate::batch::scan::{scan_dir, ScanResult};
use crate::batch::types::{BatchConfig, BatchReport, FailedFile};
use crate::image_pipeline::{ConversionError, JpegWriter, RawImageReader, RawToJpegPipeline};

/// Number of directory entries listed when nothing matched.
const DIAGNOSTIC_SAMPLE: usize = 5;

/// Converts one file; the seam the batch loop drives.
pub trait FileConverter {
    fn convert(&self, input: &Path, output: &Path) -> std::result::Result<(), ConversionError>;
}

impl<R: RawImageReader, W: JpegWriter> FileConverter for RawToJpegPipeline<R, W> {
    fn convert(&self, input: &Path, output: &Path) -> std::result::Result<(), ConversionError> {
        self.convert_file(input, output).map(|_| ())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The folder held no matching files
    NoMatches { total_entries: usize },
    Completed(BatchReport),
}

pub struct BatchRunner<C: FileConverter> {
    converter: C,
    config: BatchConfig,
}

/// Text of a panic payload raised with `panic!("...")` or `panic!("{}", x)`.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl<C: FileConverter> BatchRunner<C> {
    pub fn new(converter: C, config: BatchConfig) -> Self {
        Self { converter, config }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Runs the batch, writing progress lines to `out`.
    ///
    /// Per-file failures are reported and counted; only directory or
    /// reporting problems end the run early.
    #[instrument(skip(self, out), fields(input = %self.config.input_dir.display()))]
    pub fn run(&self, out: &mut dyn Write) -> Result<BatchOutcome> {
        let input_dir = &self.config.input_dir;
        let output_dir = self.config.output_dir();
        let label = self.config.label();

        let scan = scan_dir(input_dir, &self.config.extension)?;

        std::fs::create_dir_all(output_dir).map_err(|source| BatchError::CreateOutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        if scan.candidates.is_empty() {
            self.report_no_matches(&scan, &label, out)?;
            return Ok(BatchOutcome::NoMatches { total_entries: scan.entries.len() });
        }

        writeln!(out, "Found {} {} files. Converting...", scan.candidates.len(), label)?;
        info!(count = scan.candidates.len(), output = %output_dir.display(), "Starting batch");

        let mut report = BatchReport::default();
        for input in &scan.candidates {
            let output = output_path_in(output_dir, input);
            let input_name = file_name(input);

            // decoder and codec crates can panic on malformed input, keep it to this file
            let result = panic::catch_unwind(AssertUnwindSafe(|| self.converter.convert(input, &output)))
                .unwrap_or_else(|payload| Err(ConversionError::Panicked(panic_message(&*payload))));

            match result {
                Ok(()) => {
                    writeln!(out, "✓ {} -> {}", input_name, file_name(&output))?;
                    report.converted += 1;
                }
                Err(e) => {
                    warn!(file = %input_name, error = %e, "Conversion failed");
                    writeln!(out, "✗ Failed: {} - {}", input_name, e)?;
                    report.failed.push(FailedFile { name: input_name, error: e.to_string() });
                }
            }
        }

        writeln!(out)?;
        writeln!(
            out,
            "Done! ✓ {} converted, ✗ {} failed",
            report.converted,
            report.failed_count()
        )?;
        info!(converted = report.converted, failed = report.failed_count(), "Batch complete");

        Ok(BatchOutcome::Completed(report))
    }

    fn report_no_matches(&self, scan: &ScanResult, label: &str, out: &mut dyn Write) -> Result<()> {
        debug!("No candidates, listing directory contents");
        writeln!(out, "No {} files found in {}", label, self.config.input_dir.display())?;
        writeln!(out, "Checking directory contents...")?;
        writeln!(out, "Total files: {}", scan.entries.len())?;
        for name in scan.entries.iter().take(DIAGNOSTIC_SAMPLE) {
            writeln!(out, "  - {}", name)?;
        }
        Ok(())
    }
}
