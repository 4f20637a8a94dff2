use super::{range::IntensityRange, sample::Sample};

/// Linear map from a frame's intensity range onto `0..=255`
///
/// A flat range (constant image) maps every sample to 0.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<T: Sample> {
    min: T,
    span: Option<T::Span>,
}

impl<T: Sample> Normalizer<T> {
    #[must_use]
    pub fn new(range: &IntensityRange<T>) -> Self {
        Self {
            min: range.min,
            span: T::span(range.min, range.max),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.span.is_none()
    }

    /// Display intensity of one sample, clamped to `0..=255`
    #[inline(always)]
    #[must_use]
    pub fn intensity(&self, value: T) -> u8 {
        match self.span {
            Some(span) => value.scale(self.min, span),
            None => 0,
        }
    }
}
