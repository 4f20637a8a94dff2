//! Row-major sample grid

use crate::error::{ConversionError, Result};

/// One decoded frame: `height` rows of `width` samples, stored flat in
/// row-major order
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid<T> {
    width: usize,
    height: usize,
    samples: Vec<T>,
}

impl<T> SampleGrid<T> {
    /// Wrap a flat row-major sample vector
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `samples.len() != width * height`
    pub fn new(width: usize, height: usize, samples: Vec<T>) -> Result<Self> {
        let expected = width.checked_mul(height).ok_or(ConversionError::ShapeMismatch {
            width,
            height,
            expected: usize::MAX,
            actual: samples.len(),
        })?;

        if samples.len() != expected {
            return Err(ConversionError::ShapeMismatch {
                width,
                height,
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Flatten nested rows
    ///
    /// # Errors
    ///
    /// Returns `RaggedRows` if any row length differs from the first row
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Result<Self>
    where
        R: AsRef<[T]>,
        T: Copy,
    {
        let mut width = None;
        let mut height = 0;
        let mut samples = Vec::new();

        for (row_idx, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            let expected = *width.get_or_insert(row.len());
            if row.len() != expected {
                return Err(ConversionError::RaggedRows {
                    row: row_idx,
                    expected,
                    actual: row.len(),
                });
            }
            samples.extend_from_slice(row);
            height += 1;
        }

        Ok(Self {
            width: width.unwrap_or(0),
            height,
            samples,
        })
    }

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

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    #[must_use]
    pub fn samples(&self) -> &[T] {
        &self.samples
    }

    #[inline]
    #[must_use]
    pub fn get(&self, col: usize, row: usize) -> Option<&T> {
        if col >= self.width {
            return None;
        }
        self.samples.get(row * self.width + col)
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact panics on 0
        self.samples.chunks_exact(self.width.max(1))
    }

    /// Apply `f` to every sample, keeping the shape
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> SampleGrid<U> {
        SampleGrid {
            width: self.width,
            height: self.height,
            samples: self.samples.into_iter().map(f).collect(),
        }
    }

    /// Like [`map`](Self::map), but gives up on the first `None`
    pub fn try_map<U>(&self, f: impl FnMut(&T) -> Option<U>) -> Option<SampleGrid<U>> {
        Some(SampleGrid {
            width: self.width,
            height: self.height,
            samples: self.samples.iter().map(f).collect::<Option<Vec<U>>>()?,
        })
    }

    #[must_use]
    pub fn into_samples(self) -> Vec<T> {
        self.samples
    }
}
