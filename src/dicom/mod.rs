//! DICOM decoding collaborator
//!
//! Turns an in-memory DICOM stream into the stored values of its first
//! frame and the rescale parameters of the modality LUT. Container parsing
//! and codec work is delegated to the `dicom` crate.

mod frame;
pub mod modality;
mod parser;
mod photometric;
mod pixel_data;
mod validation;

#[cfg(test)]
pub(crate) mod fixtures;

pub use frame::{DecodedFrame, FrameInfo};
pub use modality::{ModalityGrid, apply_modality_transform};
pub use photometric::PhotometricInterpretation;

use dicom::object::DefaultDicomObject;
use tracing::debug;

use crate::error::DecodeError;
use crate::image::SampleGrid;
use crate::types::RescaleParams;

const PREAMBLE_LEN: usize = 128;
const MAGIC: &[u8; 4] = b"DICM";

/// Source of decoded frames for the conversion pipeline
pub trait FrameDecoder {
    /// Decode the first frame of `bytes`
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` if the input cannot be parsed or its pixel
    /// layout is not single-channel grayscale
    fn decode(&self, bytes: &[u8]) -> Result<DecodedFrame, DecodeError>;

    /// Convert stored values to modality units
    fn apply_modality_transform(&self, grid: SampleGrid<i32>, rescale: RescaleParams) -> ModalityGrid {
        apply_modality_transform(grid, rescale)
    }
}

/// [`FrameDecoder`] for DICOM Part 10 streams, with or without preamble
#[derive(Debug, Clone, Copy, Default)]
pub struct DicomDecoder;

impl FrameDecoder for DicomDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedFrame, DecodeError> {
        let obj = open_dicom_bytes(bytes)?;
        extract_frame(&obj)
    }
}

/// Parse a DICOM stream held in memory
///
/// # Errors
///
/// Returns `DecodeError::Read` if the stream is not valid DICOM
pub fn open_dicom_bytes(bytes: &[u8]) -> Result<DefaultDicomObject, DecodeError> {
    // The reader expects the stream to start at the magic code
    let stream = match bytes.get(PREAMBLE_LEN..PREAMBLE_LEN + MAGIC.len()) {
        Some(magic) if magic == MAGIC => &bytes[PREAMBLE_LEN..],
        _ => bytes,
    };

    Ok(dicom::object::from_reader(stream)?)
}

/// Extract the first frame's stored values and metadata
///
/// # Errors
///
/// Returns `DecodeError` for missing tags, unsupported layouts or pixel
/// data that cannot be decoded
pub fn extract_frame(obj: &DefaultDicomObject) -> Result<DecodedFrame, DecodeError> {
    let dimensions = parser::extract_dimensions(obj)?;
    let bit_depth = parser::extract_bit_depth(obj)?;
    let samples_per_pixel = parser::extract_samples_per_pixel(obj);
    let photometric_interpretation = parser::extract_photometric_interpretation(obj);

    validation::validate_frame_layout(&photometric_interpretation, samples_per_pixel, bit_depth)?;

    let info = FrameInfo {
        dimensions,
        bit_depth,
        pixel_representation: parser::extract_pixel_representation(obj),
        photometric_interpretation,
        samples_per_pixel,
        number_of_frames: parser::extract_number_of_frames(obj),
        transfer_syntax: parser::extract_transfer_syntax(obj),
        modality: parser::extract_modality(obj),
    };
    let rescale = parser::extract_rescale_params(obj);

    if info.number_of_frames > 1 {
        debug!(frames = info.number_of_frames, "multi-frame stream, decoding frame 0 only");
    }

    let bytes = pixel_data::extract_pixel_bytes(obj)?;
    let samples = pixel_data::frame_samples(
        &bytes,
        dimensions.pixel_count(),
        bit_depth,
        info.pixel_representation,
    )?;

    let grid = SampleGrid::new(usize::from(dimensions.cols), usize::from(dimensions.rows), samples)
        .map_err(|e| DecodeError::PixelData(e.to_string()))?;

    debug!(
        dimensions = %dimensions,
        bit_depth = %bit_depth,
        transfer_syntax = %info.transfer_syntax.uid,
        rescale = %rescale,
        "decoded frame"
    );

    Ok(DecodedFrame { grid, rescale, info })
}
