//! Error types for decoding and conversion

use thiserror::Error;

/// The decoder collaborator could not turn the input into a sample grid
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Input is not a readable DICOM stream
    #[error("Not a readable DICOM stream: {0}")]
    Read(#[from] dicom::object::ReadError),

    #[error("Missing or invalid {0} tag")]
    MissingTag(&'static str),

    /// Pixel data is present but could not be decoded
    #[error("Failed to decode pixel data: {0}")]
    PixelData(String),

    #[error("Unsupported pixel layout: {0}")]
    Unsupported(String),

    /// Frame needs more bytes than the pixel data holds
    #[error("Pixel data truncated: expected {expected} bytes for first frame, got {actual}")]
    Truncated { expected: usize, actual: usize },
}

/// Failure of a single frame conversion
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Grid has no rows or no columns
    #[error("Sample grid is empty ({width}x{height})")]
    EmptyInput { width: usize, height: usize },

    /// Scalar metadata is not representable as a host integer
    #[error("{field} = {value} cannot be represented as a host-safe integer")]
    BoundaryMarshal { field: &'static str, value: String },

    #[error("Sample grid {width}x{height} needs {expected} samples, got {actual}")]
    ShapeMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Row {row} has {actual} samples, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// NaN or infinite float sample
    #[error("Sample at index {index} is not finite")]
    NonFiniteSample { index: usize },
}

pub type Result<T, E = ConversionError> = std::result::Result<T, E>;
