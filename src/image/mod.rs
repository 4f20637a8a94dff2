//! Intensity normalization and RGBA rasterization
//!
//! Two read-only passes over one frame: [`scan_range`] finds the exact
//! extrema, then [`rasterize`] maps every sample onto `0..=255` and expands
//! it to opaque gray RGBA. The scan must finish before rasterization starts.

mod grid;
mod normalization;
mod range;
mod raster;
pub mod sample;

pub use grid::SampleGrid;
pub use normalization::Normalizer;
pub use range::{IntensityRange, scan_range};
pub use raster::{OPAQUE, RgbaBuffer, rasterize};
pub use sample::Sample;

/// How the scan and rasterize passes walk the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parallelism {
    /// One thread, one linear pass
    Sequential,
    /// Blocks of whole rows on the rayon pool (sequential without the
    /// `parallel` feature)
    Rows,
}

impl Default for Parallelism {
    fn default() -> Self {
        if cfg!(feature = "parallel") {
            Self::Rows
        } else {
            Self::Sequential
        }
    }
}

/// Minimum samples handed to one rayon task
const MIN_SAMPLES_PER_TASK: usize = 16 * 1024;

#[cfg_attr(not(feature = "parallel"), allow(dead_code))]
#[inline]
fn rows_per_task(width: usize) -> usize {
    MIN_SAMPLES_PER_TASK.div_ceil(width.max(1)).max(1)
}
