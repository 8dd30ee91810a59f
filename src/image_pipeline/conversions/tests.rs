#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use crate::image_pipeline::common::error::{Result, ConversionError};
    use crate::image_pipeline::conversions::RawToJpegPipeline;
    use crate::image_pipeline::debayer::{DemosaicMethod, RgbImageData};
    use crate::image_pipeline::jpeg::{ConversionConfig, JpegWriter, StandardJpegWriter};
    use crate::image_pipeline::raw::{CfaPattern, RawImageData, RawImageReader};

    struct MockReader {
        should_fail: bool,
        mock_data: Option<RawImageData>,
    }

    impl MockReader {
        fn ok() -> Self {
            Self { should_fail: false, mock_data: None }
        }

        fn with(data: RawImageData) -> Self {
            Self { should_fail: false, mock_data: Some(data) }
        }
    }

    impl RawImageReader for MockReader {
        fn read_raw(&self, _data: &[u8]) -> Result<RawImageData> {
            if self.should_fail {
                return Err(ConversionError::DecodeError("Mock decode error".to_string()));
            }
            Ok(self.mock_data.clone().unwrap_or_else(|| {
                RawImageData::bayer(16, 16, vec![1000u16; 16 * 16], 12, CfaPattern::Rggb)
            }))
        }
    }

    struct MockWriter {
        should_fail: bool,
        written_data: Arc<Mutex<Vec<RgbImageData>>>,
    }

    impl MockWriter {
        fn recording() -> (Self, Arc<Mutex<Vec<RgbImageData>>>) {
            let written = Arc::new(Mutex::new(Vec::new()));
            (Self { should_fail: false, written_data: written.clone() }, written)
        }
    }

    impl JpegWriter for MockWriter {
        fn write_jpeg(&self, image: &RgbImageData, output: &mut dyn Write, _config: &ConversionConfig) -> Result<()> {
            if self.should_fail {
                return Err(ConversionError::EncodeError("Mock encode error".to_string()));
            }
            output.write_all(b"jpeg")?;
            self.written_data.lock().unwrap().push(image.clone());
            Ok(())
        }
    }

    fn bayer(width: usize, height: usize) -> RawImageData {
        RawImageData::bayer(width, height, vec![512u16; width * height], 12, CfaPattern::Rggb)
    }

    #[test]
    fn test_successful_conversion() {
        let (writer, written) = MockWriter::recording();
        let pipeline = RawToJpegPipeline::with_custom(MockReader::ok(), writer, ConversionConfig::default());

        let mut output = Cursor::new(Vec::new());
        let result = pipeline.convert(b"fake raw data", &mut output);

        assert!(result.is_ok());
        let written = written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].data.len(), 16 * 16 * 3);
        assert_eq!(output.into_inner(), b"jpeg");
    }

    #[test]
    fn test_reader_failure() {
        let (writer, written) = MockWriter::recording();
        let reader = MockReader { should_fail: true, mock_data: None };
        let pipeline = RawToJpegPipeline::with_custom(reader, writer, ConversionConfig::default());

        let mut output = Cursor::new(Vec::new());
        let result = pipeline.convert(b"fake raw data", &mut output);

        assert!(matches!(result.unwrap_err(), ConversionError::DecodeError(_)));
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_writer_failure() {
        let writer = MockWriter { should_fail: true, written_data: Arc::new(Mutex::new(Vec::new())) };
        let pipeline = RawToJpegPipeline::with_custom(MockReader::ok(), writer, ConversionConfig::default());

        let mut output = Cursor::new(Vec::new());
        let result = pipeline.convert(b"fake raw data", &mut output);

        assert!(matches!(result.unwrap_err(), ConversionError::EncodeError(_)));
    }

    #[test]
    fn test_dimension_validation_success() {
        let (writer, _) = MockWriter::recording();
        let config = ConversionConfig::builder()
            .validate_dimensions(true)
            .max_dimension(Some(2000))
            .build();
        let pipeline = RawToJpegPipeline::with_custom(MockReader::with(bayer(64, 48)), writer, config);

        let result = pipeline.convert(b"fake raw data", &mut Cursor::new(Vec::new()));

        assert!(result.is_ok());
    }

    #[test]
    fn test_dimension_validation_failure() {
        let (writer, written) = MockWriter::recording();
        let mut oversized = bayer(2, 2);
        oversized.width = 10000;
        oversized.height = 10000;
        let config = ConversionConfig::builder()
            .validate_dimensions(true)
            .max_dimension(Some(5000))
            .build();
        let pipeline = RawToJpegPipeline::with_custom(MockReader::with(oversized), writer, config);

        let result = pipeline.convert(b"fake raw data", &mut Cursor::new(Vec::new()));

        assert!(matches!(result.unwrap_err(), ConversionError::InvalidDimensions(10000, 10000)));
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_dimension_validation_disabled() {
        let (writer, _) = MockWriter::recording();
        let config = ConversionConfig::builder()
            .validate_dimensions(false)
            .max_dimension(Some(100))
            .build();
        let pipeline = RawToJpegPipeline::with_custom(MockReader::with(bayer(300, 4)), writer, config);

        let result = pipeline.convert(b"fake raw data", &mut Cursor::new(Vec::new()));

        assert!(result.is_ok());
    }

    #[test]
    fn test_tiny_bayer_frame_rejected_without_validation() {
        let (writer, _) = MockWriter::recording();
        let config = ConversionConfig::builder().validate_dimensions(false).build();
        let pipeline = RawToJpegPipeline::with_custom(MockReader::with(bayer(1, 8)), writer, config);

        let result = pipeline.convert(b"fake raw data", &mut Cursor::new(Vec::new()));

        assert!(matches!(result.unwrap_err(), ConversionError::InvalidDimensions(1, 8)));
    }

    #[test]
    fn test_cubic_minimum_reported_as_invalid_dimensions() {
        let (writer, _) = MockWriter::recording();
        let config = ConversionConfig::builder().demosaic(DemosaicMethod::Cubic).build();
        let pipeline = RawToJpegPipeline::with_custom(MockReader::with(bayer(7, 3)), writer, config);

        let result = pipeline.convert(b"fake raw data", &mut Cursor::new(Vec::new()));

        assert!(matches!(result.unwrap_err(), ConversionError::InvalidDimensions(7, 3)));
    }

    #[test]
    fn test_linear_accepts_two_by_two() {
        let (writer, written) = MockWriter::recording();
        let pipeline = RawToJpegPipeline::with_custom(MockReader::with(bayer(2, 2)), writer, ConversionConfig::default());

        pipeline.convert(b"fake raw data", &mut Cursor::new(Vec::new())).unwrap();

        assert_eq!(written.lock().unwrap()[0].data.len(), 2 * 2 * 3);
    }

    /// Records the name of every span opened while it is the default subscriber.
    struct SpanNames(Arc<Mutex<Vec<&'static str>>>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for SpanNames {
        fn on_new_span(
            &self,
            attrs: &tracing::span::Attributes<'_>,
            _id: &tracing::span::Id,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            self.0.lock().unwrap().push(attrs.metadata().name());
        }
    }

    #[test]
    fn test_convert_opens_one_conversion_span() {
        use tracing_subscriber::layer::SubscriberExt;

        let names = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(SpanNames(names.clone()));
        let (writer, _) = MockWriter::recording();
        let pipeline = RawToJpegPipeline::with_custom(MockReader::ok(), writer, ConversionConfig::default());

        tracing::subscriber::with_default(subscriber, || {
            pipeline.convert(b"fake raw data", &mut Cursor::new(Vec::new())).unwrap();
        });

        let names = names.lock().unwrap();
        assert_eq!(names.iter().filter(|n| **n == "convert_with_timings").count(), 1);
        assert!(!names.contains(&"convert"));
        assert!(names.contains(&"decode_raw"));
        assert!(names.contains(&"encode_jpeg"));
    }

    #[test]
    fn test_timings_cover_each_step() {
        let (writer, _) = MockWriter::recording();
        let pipeline = RawToJpegPipeline::with_custom(MockReader::ok(), writer, ConversionConfig::default());

        let timings = pipeline.convert_with_timings(b"fake raw data", &mut Cursor::new(Vec::new())).unwrap();

        let names: Vec<&str> = timings.steps().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["decode_raw", "demosaic", "encode_jpeg"]);
    }

    #[test]
    fn test_convert_file_writes_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("DSC_0001.NEF");
        let output = dir.path().join("DSC_0001.jpg");
        std::fs::write(&input, b"fake raw data").unwrap();

        let pipeline = RawToJpegPipeline::with_custom(MockReader::ok(), StandardJpegWriter, ConversionConfig::default());
        let timings = pipeline.convert_file(&input, &output).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        assert!(timings.get_step("read_input_file").is_some());
        assert!(timings.get_step("write_output_file").is_some());
    }

    #[test]
    fn test_failed_conversion_leaves_no_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.nef");
        let output = dir.path().join("broken.jpg");
        std::fs::write(&input, b"fake raw data").unwrap();

        let (writer, _) = MockWriter::recording();
        let reader = MockReader { should_fail: true, mock_data: None };
        let pipeline = RawToJpegPipeline::with_custom(reader, writer, ConversionConfig::default());

        assert!(pipeline.convert_file(&input, &output).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let (writer, _) = MockWriter::recording();
        let pipeline = RawToJpegPipeline::with_custom(MockReader::ok(), writer, ConversionConfig::default());

        let result = pipeline.convert_file(dir.path().join("nope.nef"), dir.path().join("nope.jpg"));

        assert!(matches!(result.unwrap_err(), ConversionError::InputReadError(_)));
    }

    #[test]
    fn test_convert_file_default_swaps_extension() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("holiday.NEF");
        std::fs::write(&input, b"fake raw data").unwrap();

        let (writer, _) = MockWriter::recording();
        let pipeline = RawToJpegPipeline::with_custom(MockReader::ok(), writer, ConversionConfig::default());
        let output = pipeline.convert_file_default(&input).unwrap();

        assert_eq!(output, dir.path().join("holiday.jpg"));
        assert_eq!(std::fs::read(&output).unwrap(), b"jpeg");
    }

    #[test]
    fn test_set_config_replaces_settings() {
        let (writer, _) = MockWriter::recording();
        let mut pipeline = RawToJpegPipeline::with_custom(MockReader::ok(), writer, ConversionConfig::default());
        pipeline.set_config(ConversionConfig::builder().apply_orientation(false).build());
        assert!(!pipeline.config().apply_orientation);
    }
}
