//! DICOM pixel data extraction
//!
//! Produces the stored values of the first frame as `i32`, handling
//! compression, bits stored and pixel representation.

use dicom::object::DefaultDicomObject;
use dicom::pixeldata::PixelDecoder;
use dicom_dictionary_std::tags;

use crate::error::DecodeError;
use crate::types::{BitDepth, PixelRepresentation};

/// Pixel bytes of the whole object in native byte order
///
/// The reader converts OW/OB values to native order for every transfer
/// syntax, so big-endian streams need no extra handling here.
pub fn extract_pixel_bytes(obj: &DefaultDicomObject) -> Result<Vec<u8>, DecodeError> {
    if obj.get(tags::PIXEL_DATA).is_none() {
        return Err(DecodeError::MissingTag("Pixel Data"));
    }

    let decoded = obj
        .decode_pixel_data()
        .map_err(|e| DecodeError::PixelData(e.to_string()))?;

    Ok(decoded.data().to_vec())
}

/// Convert the first `count` native-order samples of `bytes` to `i32`
///
/// Bits above Bits Stored are masked off; signed samples are sign-extended
/// from the stored width.
///
/// # Errors
///
/// `Truncated` if `bytes` holds fewer than `count` samples, `Unsupported`
/// for unsigned 32-bit values above `i32::MAX`
pub fn frame_samples(
    bytes: &[u8],
    count: usize,
    bit_depth: BitDepth,
    representation: PixelRepresentation,
) -> Result<Vec<i32>, DecodeError> {
    let bytes_per_sample = bit_depth.bytes_per_sample();
    let expected = count * bytes_per_sample;
    let frame = bytes.get(..expected).ok_or(DecodeError::Truncated {
        expected,
        actual: bytes.len(),
    })?;

    let stored = u32::from(bit_depth.stored.min(bit_depth.allocated));
    let mask = if stored >= 32 { u32::MAX } else { (1_u32 << stored) - 1 };
    let to_sample = |raw: u32| -> Result<i32, DecodeError> {
        let raw = raw & mask;
        match representation {
            PixelRepresentation::Signed => Ok(sign_extend(raw, stored)),
            PixelRepresentation::Unsigned => i32::try_from(raw).map_err(|_| {
                DecodeError::Unsupported(format!("unsigned sample {raw} exceeds the 32-bit signed range"))
            }),
        }
    };

    match bytes_per_sample {
        1 => frame.iter().map(|&b| to_sample(u32::from(b))).collect(),
        2 => frame
            .chunks_exact(2)
            .map(|c| to_sample(u32::from(u16::from_ne_bytes([c[0], c[1]]))))
            .collect(),
        4 => frame
            .chunks_exact(4)
            .map(|c| to_sample(u32::from_ne_bytes([c[0], c[1], c[2], c[3]])))
            .collect(),
        _ => Err(DecodeError::Unsupported(format!("bit depth {bit_depth}"))),
    }
}

#[inline]
fn sign_extend(raw: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((raw << shift) as i32) >> shift
}
