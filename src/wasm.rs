//! JavaScript bindings
//!
//! `convertDicom(bytes)` borrows the caller's `Uint8Array` for the duration
//! of the call and returns a `DisplayFrame` that owns the RGBA pixels.
//! `takePixels()` moves them out as a `Uint8ClampedArray` ready for
//! `new ImageData(pixels, width, height)`.

use wasm_bindgen::Clamped;
use wasm_bindgen::prelude::*;

use crate::bridge::{ConvertOptions, Converter, FrameMetadata};
use crate::image::Parallelism;

#[wasm_bindgen]
pub struct DisplayFrame {
    pixels: Vec<u8>,
    metadata: FrameMetadata,
}

#[wasm_bindgen]
impl DisplayFrame {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.metadata.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.metadata.height
    }

    /// Smallest modality value, exact as a JS number
    #[wasm_bindgen(getter, js_name = minValue)]
    pub fn min_value(&self) -> f64 {
        self.metadata.min_value as f64
    }

    #[wasm_bindgen(getter, js_name = maxValue)]
    pub fn max_value(&self) -> f64 {
        self.metadata.max_value as f64
    }

    /// Move the pixel buffer out; later calls return an empty array
    #[wasm_bindgen(js_name = takePixels)]
    pub fn take_pixels(&mut self) -> Clamped<Vec<u8>> {
        Clamped(std::mem::take(&mut self.pixels))
    }

    /// `{ minValue, maxValue, width, height }` as a plain object
    pub fn metadata(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.metadata).map_err(|e| JsError::new(&e.to_string()))
    }
}

/// Convert a DICOM byte buffer to an RGBA display frame
///
/// Throws on any decode or conversion failure; no partial frame is
/// returned.
#[wasm_bindgen(js_name = convertDicom)]
pub fn convert_dicom(bytes: &[u8]) -> Result<DisplayFrame, JsError> {
    // No thread pool in the browser
    let options = ConvertOptions::new().with_parallelism(Parallelism::Sequential);
    let result = Converter::new()
        .with_options(options)
        .convert(bytes)
        .map_err(|e| JsError::new(&e.to_string()))?;

    Ok(DisplayFrame {
        pixels: result.buffer.into_vec(),
        metadata: result.metadata,
    })
}
