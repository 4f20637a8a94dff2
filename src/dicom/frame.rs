//! Decoded frame and its descriptive metadata

use std::fmt;

use super::photometric::PhotometricInterpretation;
use crate::image::SampleGrid;
use crate::types::{BitDepth, Dimensions, PixelRepresentation, RescaleParams, TransferSyntax};

/// Tags read while decoding, kept for diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInfo {
    pub dimensions: Dimensions,
    pub bit_depth: BitDepth,
    pub pixel_representation: PixelRepresentation,
    pub photometric_interpretation: PhotometricInterpretation,
    pub samples_per_pixel: u16,
    /// Frames in the stream; only the first is decoded
    pub number_of_frames: u32,
    pub transfer_syntax: TransferSyntax,
    pub modality: Option<String>,
}

impl fmt::Display for FrameInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(modality) = &self.modality {
            writeln!(f, "{:20}: {}", "Modality", modality)?;
        }
        writeln!(
            f,
            "{:20}: {}x{} [{}]",
            "Dimensions", self.dimensions, self.samples_per_pixel, self.photometric_interpretation
        )?;
        writeln!(
            f,
            "{:20}: {} {}",
            "Bit Depth", self.bit_depth, self.pixel_representation
        )?;
        if self.number_of_frames > 1 {
            writeln!(f, "{:20}: 1 of {}", "Frames", self.number_of_frames)?;
        }
        write!(f, "{:20}: {}", "Transfer Syntax", self.transfer_syntax)
    }
}

/// Stored values of one frame plus the rescale that turns them into
/// modality units
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFrame {
    pub grid: SampleGrid<i32>,
    pub rescale: RescaleParams,
    pub info: FrameInfo,
}
