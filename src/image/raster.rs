//! Grayscale to interleaved RGBA expansion
//!
//! The output is consumed by the host without re-ordering, so row-major
//! order is part of the contract: pixel `(row, col)` starts at byte
//! `4 * (row * width + col)`.

use super::{IntensityRange, Normalizer, Parallelism, SampleGrid, sample::Sample};

pub const OPAQUE: u8 = 255;

/// Flat RGBA8 pixel buffer, `4 * width * height` bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbaBuffer {
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Length in bytes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// RGBA bytes of one pixel
    #[must_use]
    pub fn pixel(&self, col: usize, row: usize) -> Option<[u8; 4]> {
        if col >= self.width || row >= self.height {
            return None;
        }
        let offset = 4 * (row * self.width + col);
        self.data
            .get(offset..offset + 4)
            .and_then(|px| px.try_into().ok())
    }
}

/// Normalize every sample of `grid` and expand it to `[d, d, d, 255]`
///
/// `range` must come from a completed scan of the same grid.
pub fn rasterize<T: Sample>(
    grid: &SampleGrid<T>,
    range: &IntensityRange<T>,
    parallelism: Parallelism,
) -> RgbaBuffer {
    let normalizer = Normalizer::new(range);
    let mut data = vec![0_u8; grid.samples().len() * 4];

    if normalizer.is_flat() {
        for px in data.chunks_exact_mut(4) {
            px[3] = OPAQUE;
        }
    } else {
        match parallelism {
            Parallelism::Sequential => fill_pixels(&mut data, grid.samples(), &normalizer),
            Parallelism::Rows => fill_rows_parallel(&mut data, grid, &normalizer),
        }
    }

    RgbaBuffer {
        width: grid.width(),
        height: grid.height(),
        data,
    }
}

/// `out.len()` must be `4 * samples.len()`
#[inline]
fn fill_pixels<T: Sample>(out: &mut [u8], samples: &[T], normalizer: &Normalizer<T>) {
    debug_assert_eq!(out.len(), samples.len() * 4);
    for (px, &value) in out.chunks_exact_mut(4).zip(samples) {
        let gray = normalizer.intensity(value);
        px.copy_from_slice(&[gray, gray, gray, OPAQUE]);
    }
}

#[cfg(feature = "parallel")]
fn fill_rows_parallel<T: Sample>(out: &mut [u8], grid: &SampleGrid<T>, normalizer: &Normalizer<T>) {
    use rayon::prelude::*;

    if grid.is_empty() {
        return;
    }

    // Each task owns a disjoint block of whole rows
    let samples_per_task = super::rows_per_task(grid.width()) * grid.width();
    out.par_chunks_mut(samples_per_task * 4)
        .zip(grid.samples().par_chunks(samples_per_task))
        .for_each(|(block, samples)| fill_pixels(block, samples, normalizer));
}

#[cfg(not(feature = "parallel"))]
fn fill_rows_parallel<T: Sample>(out: &mut [u8], grid: &SampleGrid<T>, normalizer: &Normalizer<T>) {
    fill_pixels(out, grid.samples(), normalizer);
}
