//! Exact intensity range of a sample grid

use super::{Parallelism, SampleGrid, sample::Sample};
use crate::error::{ConversionError, Result};

/// Smallest and largest sample of a frame, `min <= max`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: Sample> IntensityRange<T> {
    #[must_use]
    pub fn new(min: T, max: T) -> Self {
        debug_assert!(min <= max, "inverted range {min}..{max}");
        Self { min, max }
    }

    /// Constant image: every sample has the same value
    #[inline]
    #[must_use]
    pub fn is_flat(&self) -> bool {
        T::span(self.min, self.max).is_none()
    }
}

/// Scan every sample of `grid` once and return its exact extrema
///
/// # Errors
///
/// `EmptyInput` if the grid has no rows or columns, `NonFiniteSample` for
/// the first NaN or infinite float sample
pub fn scan_range<T: Sample>(
    grid: &SampleGrid<T>,
    parallelism: Parallelism,
) -> Result<IntensityRange<T>> {
    if grid.is_empty() {
        return Err(ConversionError::EmptyInput {
            width: grid.width(),
            height: grid.height(),
        });
    }

    let (min, max) = match parallelism {
        Parallelism::Sequential => scan_slice(grid.samples(), 0)?,
        Parallelism::Rows => scan_rows_parallel(grid)?,
    };

    Ok(IntensityRange::new(min, max))
}

/// `base` is the flat index of `samples[0]`, for error reporting
#[inline]
fn scan_slice<T: Sample>(samples: &[T], base: usize) -> Result<(T, T)> {
    let Some(&first) = samples.first() else {
        return Err(ConversionError::EmptyInput {
            width: 0,
            height: 0,
        });
    };

    let mut min = first;
    let mut max = first;
    for (idx, &value) in samples.iter().enumerate() {
        if !value.is_finite() {
            return Err(ConversionError::NonFiniteSample { index: base + idx });
        }
        if value < min {
            min = value;
        } else if value > max {
            max = value;
        }
    }

    Ok((min, max))
}

#[cfg(feature = "parallel")]
fn scan_rows_parallel<T: Sample>(grid: &SampleGrid<T>) -> Result<(T, T)> {
    use rayon::prelude::*;

    let chunk_len = super::rows_per_task(grid.width()) * grid.width();

    grid.samples()
        .par_chunks(chunk_len)
        .enumerate()
        .map(|(chunk_idx, chunk)| scan_slice(chunk, chunk_idx * chunk_len))
        // Keep the leftmost error so both modes report the same index
        .reduce_with(|left, right| match (left, right) {
            (Ok((lmin, lmax)), Ok((rmin, rmax))) => Ok((
                if rmin < lmin { rmin } else { lmin },
                if rmax > lmax { rmax } else { lmax },
            )),
            (Err(e), _) | (Ok(_), Err(e)) => Err(e),
        })
        .unwrap_or_else(|| scan_slice(grid.samples(), 0))
}

#[cfg(not(feature = "parallel"))]
fn scan_rows_parallel<T: Sample>(grid: &SampleGrid<T>) -> Result<(T, T)> {
    scan_slice(grid.samples(), 0)
}
