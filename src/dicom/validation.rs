use super::photometric::PhotometricInterpretation;
use crate::error::DecodeError;
use crate::types::BitDepth;

#[inline]
pub fn validate_grayscale(
    photometric_interpretation: &PhotometricInterpretation,
    samples_per_pixel: u16,
) -> Result<(), DecodeError> {
    if samples_per_pixel != 1 || !photometric_interpretation.is_grayscale() {
        return Err(DecodeError::Unsupported(format!(
            "{photometric_interpretation} with {samples_per_pixel} samples per pixel \
             (expected single-sample MONOCHROME1/MONOCHROME2)"
        )));
    }

    Ok(())
}

#[inline]
pub fn validate_bit_depth(bit_depth: BitDepth) -> Result<(), DecodeError> {
    if !bit_depth.is_valid() {
        return Err(DecodeError::Unsupported(format!(
            "bit depth {bit_depth} (expected 8, 16, or 32 bits allocated)"
        )));
    }

    Ok(())
}

/// Zero-sized frames pass here and are rejected by the range scanner
pub fn validate_frame_layout(
    photometric_interpretation: &PhotometricInterpretation,
    samples_per_pixel: u16,
    bit_depth: BitDepth,
) -> Result<(), DecodeError> {
    validate_grayscale(photometric_interpretation, samples_per_pixel)?;
    validate_bit_depth(bit_depth)?;
    Ok(())
}
