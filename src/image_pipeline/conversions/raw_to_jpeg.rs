use tracing::{debug, info, instrument, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    conversions::output::default_output_path,
    conversions::timing::{PipelineTimings, Timer},
    debayer::CpuDebayer,
    raw::{RawImageReader, RawLoaderReader},
    jpeg::{JpegWriter, StandardJpegWriter, ConversionConfig},
};

pub struct RawToJpegPipeline<R: RawImageReader, W: JpegWriter> {
    reader: R,
    debayer: CpuDebayer,
    writer: W,
    config: ConversionConfig,
}

impl RawToJpegPipeline<RawLoaderReader, StandardJpegWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self::with_custom(RawLoaderReader, StandardJpegWriter, config)
    }
}

impl<R: RawImageReader, W: JpegWriter> RawToJpegPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            debayer: CpuDebayer::new(),
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize, cpp: usize) -> Result<()> {
        let min = self.config.demosaic.min_size();
        if cpp == 1 && (width < min || height < min) {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!(
                    "Image dimensions {}x{} exceed maximum {}",
                    width, height, max
                );
                return Err(ConversionError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    fn run_steps(&self, input_data: &[u8], output: &mut dyn Write, timings: &mut PipelineTimings) -> Result<()> {
        let raw_image = {
            let _span = tracing::info_span!("decode_raw").entered();
            let timer = Timer::start("decode_raw");
            let raw_image = self.reader.read_raw(input_data)?;
            let (name, duration) = timer.stop();
            timings.add_step(name, duration);
            raw_image
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = raw_image.width,
                height = raw_image.height
            ).entered();
            self.validate_dimensions(raw_image.width, raw_image.height, raw_image.cpp)?;
        }

        let rgb_image = {
            let _span = tracing::info_span!("demosaic").entered();
            let timer = Timer::start("demosaic");
            let rgb_image = self.debayer.process(&raw_image, self.config.demosaic)?;
            let (name, duration) = timer.stop();
            timings.add_step(name, duration);
            rgb_image
        };

        {
            let _span = tracing::info_span!("encode_jpeg").entered();
            let timer = Timer::start("encode_jpeg");
            self.writer.write_jpeg(&rgb_image, output, &self.config)?;
            let (name, duration) = timer.stop();
            timings.add_step(name, duration);
        }

        info!(
            width = raw_image.width,
            height = raw_image.height,
            "Conversion complete"
        );
        Ok(())
    }

    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<()> {
        self.convert_with_timings(input_data, output).map(|_| ())
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert_with_timings(&self, input_data: &[u8], output: &mut dyn Write) -> Result<PipelineTimings> {
        info!("Starting RAW to JPEG conversion");
        let mut timings = PipelineTimings::new();
        self.run_steps(input_data, output, &mut timings)?;
        Ok(timings)
    }

    /// Converts `input_path` into a JPEG at `output_path`.
    ///
    /// The output file is only created once encoding has succeeded.
    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<PipelineTimings> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let mut timings = PipelineTimings::new();

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            let timer = Timer::start("read_input_file");
            let data = std::fs::read(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?;
            let (name, duration) = timer.stop();
            timings.add_step(name, duration);
            data
        };

        let mut encoded = Vec::new();
        self.run_steps(&input_data, &mut encoded, &mut timings)?;

        {
            let _span = tracing::info_span!("write_output_file").entered();
            let timer = Timer::start("write_output_file");
            std::fs::write(output_path, &encoded).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;
            let (name, duration) = timer.stop();
            timings.add_step(name, duration);
        }

        debug!("{}", timings.summary());
        Ok(timings)
    }

    /// Converts `input_path` next to itself, swapping its extension for `.jpg`.
    pub fn convert_file_default<P: AsRef<Path>>(&self, input_path: P) -> Result<PathBuf> {
        let input_path = input_path.as_ref();
        let output_path = default_output_path(input_path);
        self.convert_file(input_path, &output_path)?;
        Ok(output_path)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}
