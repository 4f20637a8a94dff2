//! Host boundary
//!
//! Borrows the host's input bytes for the duration of one call, runs
//! decode → modality transform → range scan → rasterize, and hands back an
//! owned RGBA buffer with scalar metadata in host-safe integer types.
//!
//! Extrema are always passed through [`FrameMetadata::marshal`]: the
//! numeric type produced by the scan (unsigned 16-bit, float, ...) never
//! crosses the boundary as-is.

use serde::Serialize;
use tracing::debug;

use crate::dicom::{DecodedFrame, DicomDecoder, FrameDecoder, ModalityGrid};
use crate::error::{ConversionError, Result};
use crate::image::sample::MAX_HOST_SAFE_INT;
use crate::image::{IntensityRange, Parallelism, RgbaBuffer, Sample, SampleGrid, rasterize, scan_range};
use crate::timing::{Pass, TimingSink, timed};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub parallelism: Parallelism,
}

impl ConvertOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }
}

/// Scalars returned next to the pixel buffer
///
/// `min_value`/`max_value` lie within `±(2^53 - 1)` so a JavaScript number
/// holds them exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameMetadata {
    pub min_value: i64,
    pub max_value: i64,
    pub width: u32,
    pub height: u32,
}

impl FrameMetadata {
    /// Normalize scan results to boundary-safe integers
    ///
    /// # Errors
    ///
    /// `BoundaryMarshal` if an extremum has no integer value within the
    /// host-safe range, or a dimension does not fit `u32`
    pub fn marshal<T: Sample>(range: &IntensityRange<T>, width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            min_value: host_int("minValue", range.min)?,
            max_value: host_int("maxValue", range.max)?,
            width: host_dimension("width", width)?,
            height: host_dimension("height", height)?,
        })
    }
}

fn host_int<T: Sample>(field: &'static str, value: T) -> Result<i64> {
    value
        .to_host_int()
        .filter(|v| (-MAX_HOST_SAFE_INT..=MAX_HOST_SAFE_INT).contains(v))
        .ok_or_else(|| ConversionError::BoundaryMarshal {
            field,
            value: value.to_string(),
        })
}

fn host_dimension(field: &'static str, value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| ConversionError::BoundaryMarshal {
        field,
        value: value.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub buffer: RgbaBuffer,
    pub metadata: FrameMetadata,
}

/// Conversion pipeline with a pluggable decoder and optional timing sink
pub struct Converter<'a, D = DicomDecoder> {
    decoder: D,
    options: ConvertOptions,
    sink: Option<&'a mut dyn TimingSink>,
}

impl Converter<'static, DicomDecoder> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            decoder: DicomDecoder,
            options: ConvertOptions::default(),
            sink: None,
        }
    }
}

impl Default for Converter<'static, DicomDecoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, D: FrameDecoder> Converter<'a, D> {
    #[must_use]
    pub fn with_decoder<E: FrameDecoder>(self, decoder: E) -> Converter<'a, E> {
        Converter {
            decoder,
            options: self.options,
            sink: self.sink,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_timing_sink<'b>(self, sink: &'b mut dyn TimingSink) -> Converter<'b, D> {
        Converter {
            decoder: self.decoder,
            options: self.options,
            sink: Some(sink),
        }
    }

    #[must_use]
    pub fn options(&self) -> ConvertOptions {
        self.options
    }

    /// Decode `bytes` into the stored values of one frame
    ///
    /// # Errors
    ///
    /// `Decode` if the decoder rejects the input
    pub fn decode(&mut self, bytes: &[u8]) -> Result<DecodedFrame> {
        let decoder = &self.decoder;
        Ok(timed(&mut self.sink, Pass::Decode, || decoder.decode(bytes))?)
    }

    /// Rescale, normalize and rasterize an already decoded frame
    ///
    /// # Errors
    ///
    /// `EmptyInput`, `NonFiniteSample` or `BoundaryMarshal`
    pub fn convert_frame(&mut self, frame: DecodedFrame) -> Result<ConversionResult> {
        let DecodedFrame { grid, rescale, .. } = frame;
        let decoder = &self.decoder;
        let samples = timed(&mut self.sink, Pass::ModalityTransform, || {
            decoder.apply_modality_transform(grid, rescale)
        });

        match &samples {
            ModalityGrid::Integer(grid) => run_core(grid, self.options, &mut self.sink),
            ModalityGrid::Real(grid) => run_core(grid, self.options, &mut self.sink),
        }
    }

    /// Full conversion of one host buffer
    ///
    /// # Errors
    ///
    /// Any [`ConversionError`]; no partial result is produced
    pub fn convert(&mut self, bytes: &[u8]) -> Result<ConversionResult> {
        let frame = self.decode(bytes)?;
        self.convert_frame(frame)
    }
}

fn run_core<T: Sample>(
    grid: &SampleGrid<T>,
    options: ConvertOptions,
    sink: &mut Option<&mut dyn TimingSink>,
) -> Result<ConversionResult> {
    let range = timed(sink, Pass::RangeScan, || scan_range(grid, options.parallelism))?;
    let metadata = FrameMetadata::marshal(&range, grid.width(), grid.height())?;
    let buffer = timed(sink, Pass::Rasterize, || rasterize(grid, &range, options.parallelism));

    debug!(
        width = metadata.width,
        height = metadata.height,
        min = metadata.min_value,
        max = metadata.max_value,
        flat = range.is_flat(),
        "converted frame"
    );

    Ok(ConversionResult { buffer, metadata })
}

/// Convert an already decoded grid, skipping the decoder
///
/// # Errors
///
/// `EmptyInput`, `NonFiniteSample` or `BoundaryMarshal`
pub fn convert_grid<T: Sample>(grid: &SampleGrid<T>, options: &ConvertOptions) -> Result<ConversionResult> {
    run_core(grid, *options, &mut None)
}

/// Convert one DICOM stream with default options
///
/// # Errors
///
/// Any [`ConversionError`]
pub fn convert_bytes(bytes: &[u8]) -> Result<ConversionResult> {
    Converter::new().convert(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dicom::fixtures::DicomFixture;
    use crate::error::DecodeError;
    use crate::timing::PassTimings;
    use crate::types::{BitDepth, Dimensions, PixelRepresentation, RescaleParams, TransferSyntax};
    use crate::dicom::{FrameInfo, PhotometricInterpretation};
    use assert_matches::assert_matches;

    const EXPECTED_2X2: [u8; 16] = [
        0, 0, 0, 255, //
        85, 85, 85, 255, //
        170, 170, 170, 255, //
        255, 255, 255, 255,
    ];

    #[test]
    fn test_convert_grid_scenario() {
        let grid = SampleGrid::from_rows([[10, 20], [30, 40]]).unwrap();
        let result = convert_grid(&grid, &ConvertOptions::default()).unwrap();

        assert_eq!(result.buffer.as_bytes(), &EXPECTED_2X2);
        assert_eq!(
            result.metadata,
            FrameMetadata {
                min_value: 10,
                max_value: 40,
                width: 2,
                height: 2,
            }
        );
    }

    #[test]
    fn test_convert_bytes_scenario() {
        let bytes = DicomFixture::u16_frame(2, 2, &[10, 20, 30, 40]).build();
        let result = convert_bytes(&bytes).unwrap();

        assert_eq!(result.buffer.as_bytes(), &EXPECTED_2X2);
        assert_eq!(result.metadata.min_value, 10);
        assert_eq!(result.metadata.max_value, 40);
        assert_eq!(result.metadata.width, 2);
        assert_eq!(result.metadata.height, 2);
    }

    #[test]
    fn test_rescale_shifts_reported_extrema() {
        let bytes = DicomFixture::u16_frame(2, 1, &[0, 4095])
            .rescale(1.0, -1024.0)
            .build();
        let result = convert_bytes(&bytes).unwrap();

        assert_eq!(result.metadata.min_value, -1024);
        assert_eq!(result.metadata.max_value, 3071);
        assert_eq!(result.buffer.as_bytes(), &[0, 0, 0, 255, 255, 255, 255, 255]);
    }

    #[test]
    fn test_fractional_rescale_truncates_extrema() {
        let bytes = DicomFixture::i16_frame(3, 1, &[-3, 0, 5])
            .rescale(0.5, 0.0)
            .build();
        let result = convert_bytes(&bytes).unwrap();

        // -1.5 and 2.5 truncate toward zero
        assert_eq!(result.metadata.min_value, -1);
        assert_eq!(result.metadata.max_value, 2);
        // 1.5 / 4.0 * 255 = 95.625
        assert_eq!(result.buffer.pixel(1, 0), Some([96, 96, 96, 255]));
    }

    #[test]
    fn test_non_dicom_input_is_decode_error() {
        let err = convert_bytes(b"definitely not a dicom file").unwrap_err();
        assert_matches!(err, ConversionError::Decode(DecodeError::Read(_)));
    }

    #[test]
    fn test_single_pixel_flat_policy() {
        let grid = SampleGrid::new(1, 1, vec![60_000_u16]).unwrap();
        let result = convert_grid(&grid, &ConvertOptions::default()).unwrap();
        assert_eq!(result.buffer.as_bytes(), &[0, 0, 0, 255]);
        assert_eq!(result.metadata.min_value, 60_000);
        assert_eq!(result.metadata.max_value, 60_000);
    }

    #[test]
    fn test_empty_grid_has_no_result() {
        let grid = SampleGrid::<i32>::new(5, 0, Vec::new()).unwrap();
        assert_matches!(
            convert_grid(&grid, &ConvertOptions::default()),
            Err(ConversionError::EmptyInput { width: 5, height: 0 })
        );
    }

    #[test]
    fn test_unsafe_extremum_fails_marshal() {
        let grid = SampleGrid::new(2, 1, vec![0.0_f64, 1e17]).unwrap();
        assert_matches!(
            convert_grid(&grid, &ConvertOptions::default()),
            Err(ConversionError::BoundaryMarshal { field: "maxValue", .. })
        );

        let edge = IntensityRange::new(-(MAX_HOST_SAFE_INT as f64), MAX_HOST_SAFE_INT as f64);
        let metadata = FrameMetadata::marshal(&edge, 1, 1).unwrap();
        assert_eq!(metadata.min_value, -MAX_HOST_SAFE_INT);
        assert_eq!(metadata.max_value, MAX_HOST_SAFE_INT);
    }

    #[test]
    fn test_metadata_serializes_camel_case() {
        let metadata = FrameMetadata {
            min_value: -5,
            max_value: 9,
            width: 3,
            height: 4,
        };
        let json = serde_json::to_string(&metadata).unwrap();
        assert_eq!(json, r#"{"minValue":-5,"maxValue":9,"width":3,"height":4}"#);
    }

    #[test]
    fn test_timing_sink_sees_each_pass_once() {
        let bytes = DicomFixture::u16_frame(2, 2, &[10, 20, 30, 40]).build();
        let mut timings = PassTimings::new();
        Converter::new()
            .with_timing_sink(&mut timings)
            .convert(&bytes)
            .unwrap();

        let passes: Vec<Pass> = timings.steps().iter().map(|(p, _)| *p).collect();
        assert_eq!(
            passes,
            vec![Pass::Decode, Pass::ModalityTransform, Pass::RangeScan, Pass::Rasterize]
        );
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let samples: Vec<i32> = (0..300 * 200).map(|i| (i * 13) % 4096 - 1024).collect();
        let grid = SampleGrid::new(300, 200, samples).unwrap();

        let sequential = convert_grid(&grid, &ConvertOptions::new().with_parallelism(Parallelism::Sequential)).unwrap();
        let parallel = convert_grid(&grid, &ConvertOptions::new().with_parallelism(Parallelism::Rows)).unwrap();
        assert_eq!(sequential, parallel);
    }

    /// Decoder returning a fixed frame, to exercise the seam
    struct FixedDecoder(SampleGrid<i32>, RescaleParams);

    impl FrameDecoder for FixedDecoder {
        fn decode(&self, _bytes: &[u8]) -> Result<DecodedFrame, DecodeError> {
            Ok(DecodedFrame {
                grid: self.0.clone(),
                rescale: self.1,
                info: FrameInfo {
                    dimensions: Dimensions::new(self.0.height() as u16, self.0.width() as u16),
                    bit_depth: BitDepth::new(16, 16),
                    pixel_representation: PixelRepresentation::Signed,
                    photometric_interpretation: PhotometricInterpretation::Monochrome2,
                    samples_per_pixel: 1,
                    number_of_frames: 1,
                    transfer_syntax: TransferSyntax::new(String::new(), "test".to_string()),
                    modality: None,
                },
            })
        }
    }

    #[test]
    fn test_custom_decoder() {
        let grid = SampleGrid::from_rows([[1, 2], [3, 4]]).unwrap();
        let mut converter = Converter::new().with_decoder(FixedDecoder(grid, RescaleParams::new(10.0, 0.0)));
        let result = converter.convert(&[]).unwrap();

        assert_eq!(result.metadata.min_value, 10);
        assert_eq!(result.metadata.max_value, 40);
        assert_eq!(result.buffer.as_bytes(), &EXPECTED_2X2);
    }
}
