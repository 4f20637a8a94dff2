pub mod bridge;
pub mod dicom;
pub mod error;
pub mod image;
pub mod timing;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod display;
#[cfg(feature = "cli")]
pub mod logger;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export the conversion entry points
pub use bridge::{ConversionResult, ConvertOptions, Converter, FrameMetadata, convert_bytes, convert_grid};
pub use dicom::{DicomDecoder, FrameDecoder};
pub use error::{ConversionError, DecodeError};
pub use image::{Parallelism, RgbaBuffer, SampleGrid};
pub use timing::{Pass, PassTimings, TimingSink, TracingSink};
