use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use raw2jpeg::batch::{BatchOutcome, BatchRunner};
use raw2jpeg::cli::{self, Cli};
use raw2jpeg::image_pipeline::RawToJpegPipeline;
use raw2jpeg::logger::{self, info};

fn main() -> ExitCode {
    logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = cli::exit_code_for(&e);
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(cli::FAILURE_EXIT_CODE)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.conversion_config();
    info!("Quality: {}", config.quality.value());
    info!("Demosaic: {:?}", config.demosaic);
    info!(
        "Orientation: {}",
        if config.apply_orientation { "applied" } else { "ignored" }
    );

    let runner = BatchRunner::new(RawToJpegPipeline::new(config), cli.batch_config());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = runner
        .run(&mut out)
        .with_context(|| format!("converting {}", cli.input_folder.display()))?;

    if let BatchOutcome::Completed(report) = outcome {
        info!(converted = report.converted, failed = report.failed_count(), "Finished");
    }
    Ok(())
}
