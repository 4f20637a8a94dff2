use crate::error::DecodeError;
use crate::types::{BitDepth, Dimensions, PixelRepresentation, RescaleParams, TransferSyntax};
use dicom::encoding::TransferSyntaxIndex;
use dicom::object::DefaultDicomObject;
use dicom::transfer_syntax::TransferSyntaxRegistry;
use dicom_dictionary_std::tags;

use super::photometric::PhotometricInterpretation;

pub fn extract_dimensions(obj: &DefaultDicomObject) -> Result<Dimensions, DecodeError> {
    let rows = obj
        .get(tags::ROWS)
        .and_then(|e| e.to_int::<u16>().ok())
        .ok_or(DecodeError::MissingTag("Rows"))?;

    let cols = obj
        .get(tags::COLUMNS)
        .and_then(|e| e.to_int::<u16>().ok())
        .ok_or(DecodeError::MissingTag("Columns"))?;

    Ok(Dimensions::new(rows, cols))
}

pub fn extract_rescale_params(obj: &DefaultDicomObject) -> RescaleParams {
    // Optional tags, mostly present on CT/PET
    let slope = obj
        .get(tags::RESCALE_SLOPE)
        .and_then(|e| e.to_float64().ok())
        .filter(|s| s.is_finite() && *s != 0.0)
        .unwrap_or(1.0);

    let intercept = obj
        .get(tags::RESCALE_INTERCEPT)
        .and_then(|e| e.to_float64().ok())
        .filter(|i| i.is_finite())
        .unwrap_or(0.0);

    RescaleParams::new(slope, intercept)
}

#[inline]
pub fn extract_number_of_frames(obj: &DefaultDicomObject) -> u32 {
    obj.get(tags::NUMBER_OF_FRAMES)
        .and_then(|e| e.to_int::<u32>().ok())
        .unwrap_or(1)
}

#[inline]
pub fn extract_samples_per_pixel(obj: &DefaultDicomObject) -> u16 {
    obj.get(tags::SAMPLES_PER_PIXEL)
        .and_then(|e| e.to_int::<u16>().ok())
        .unwrap_or(1)
}

pub fn extract_bit_depth(obj: &DefaultDicomObject) -> Result<BitDepth, DecodeError> {
    let allocated = obj
        .get(tags::BITS_ALLOCATED)
        .and_then(|e| e.to_int::<u16>().ok())
        .ok_or(DecodeError::MissingTag("Bits Allocated"))?;

    // Bits Stored defaults to the allocated width
    let stored = obj
        .get(tags::BITS_STORED)
        .and_then(|e| e.to_int::<u16>().ok())
        .unwrap_or(allocated);

    Ok(BitDepth::new(allocated, stored))
}

pub fn extract_pixel_representation(obj: &DefaultDicomObject) -> PixelRepresentation {
    match obj
        .get(tags::PIXEL_REPRESENTATION)
        .and_then(|e| e.to_int::<u16>().ok())
    {
        Some(1) => PixelRepresentation::Signed,
        _ => PixelRepresentation::Unsigned,
    }
}

pub fn extract_photometric_interpretation(obj: &DefaultDicomObject) -> PhotometricInterpretation {
    obj.get(tags::PHOTOMETRIC_INTERPRETATION)
        .and_then(|e| e.value().to_str().ok())
        .map_or(PhotometricInterpretation::Monochrome2, |s| {
            PhotometricInterpretation::from(s.as_ref())
        })
}

pub fn extract_transfer_syntax(obj: &DefaultDicomObject) -> TransferSyntax {
    let uid = obj
        .meta()
        .transfer_syntax()
        .trim_end_matches('\0')
        .to_string();
    let name = TransferSyntaxRegistry
        .get(&uid)
        .map_or_else(|| "Unknown".to_string(), |ts| ts.name().to_string());

    TransferSyntax::new(uid, name)
}

pub fn extract_modality(obj: &DefaultDicomObject) -> Option<String> {
    obj.get(tags::MODALITY)
        .and_then(|e| e.value().to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
