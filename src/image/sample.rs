//! Numeric sample types accepted by the conversion pipeline

use std::fmt::{Debug, Display};

/// Largest magnitude an IEEE-754 double holds exactly (`2^53 - 1`).
///
/// JavaScript numbers are doubles, so extrema outside this range would
/// silently lose precision on the host side.
pub const MAX_HOST_SAFE_INT: i64 = (1_i64 << 53) - 1;

/// A single pixel value of a decoded frame
///
/// Integer samples normalize with `i64` intermediates, float samples with
/// `f64`. The span between min and max is computed once per frame
/// (`span`) and reused for every sample (`scale`).
pub trait Sample: Copy + PartialOrd + Debug + Display + Send + Sync + 'static {
    /// Precomputed `max - min`
    type Span: Copy + Debug + Send + Sync;

    /// Returns `None` when the range is flat (`min == max`)
    fn span(min: Self, max: Self) -> Option<Self::Span>;

    /// Map `self` from `[min, min + span]` to `0..=255`, rounding half up
    fn scale(self, min: Self, span: Self::Span) -> u8;

    #[inline(always)]
    fn is_finite(self) -> bool {
        true
    }

    /// Integer value of `self` for the host, if one exists.
    ///
    /// Floats truncate toward zero. Does not check the host-safe range.
    fn to_host_int(self) -> Option<i64>;
}

macro_rules! impl_integer_sample {
    ($($t:ty),* $(,)?) => {
        $(
            impl Sample for $t {
                type Span = i64;

                #[inline(always)]
                fn span(min: Self, max: Self) -> Option<i64> {
                    let span = i64::from(max) - i64::from(min);
                    (span > 0).then_some(span)
                }

                #[inline(always)]
                fn scale(self, min: Self, span: i64) -> u8 {
                    // offset <= 2^32 so offset * 510 stays far below i64::MAX
                    let offset = (i64::from(self) - i64::from(min)).clamp(0, span);
                    ((offset * 510 + span) / (2 * span)) as u8
                }

                #[inline]
                fn to_host_int(self) -> Option<i64> {
                    Some(i64::from(self))
                }
            }
        )*
    };
}

/// `max - min` of a float range
///
/// Ranges wider than `f64::MAX` are stored with both ends halved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatSpan {
    width: f64,
    halved: bool,
}

impl FloatSpan {
    #[inline]
    fn new(min: f64, max: f64) -> Option<Self> {
        let width = max - min;
        if width.is_finite() {
            (width > 0.0).then_some(Self { width, halved: false })
        } else {
            let width = max * 0.5 - min * 0.5;
            (width > 0.0).then_some(Self { width, halved: true })
        }
    }

    #[inline(always)]
    fn scale(self, value: f64, min: f64) -> u8 {
        let offset = if self.halved {
            value * 0.5 - min * 0.5
        } else {
            value - min
        };
        let scaled = if offset > f64::MAX / 255.0 {
            offset / self.width * 255.0
        } else {
            offset * 255.0 / self.width
        };
        scaled.round().clamp(0.0, 255.0) as u8
    }
}

macro_rules! impl_float_sample {
    ($($t:ty),* $(,)?) => {
        $(
            impl Sample for $t {
                type Span = FloatSpan;

                #[inline(always)]
                fn span(min: Self, max: Self) -> Option<FloatSpan> {
                    FloatSpan::new(f64::from(min), f64::from(max))
                }

                #[inline(always)]
                fn scale(self, min: Self, span: FloatSpan) -> u8 {
                    span.scale(f64::from(self), f64::from(min))
                }

                #[inline(always)]
                fn is_finite(self) -> bool {
                    <$t>::is_finite(self)
                }

                #[inline]
                fn to_host_int(self) -> Option<i64> {
                    let value = f64::from(self);
                    if !value.is_finite() {
                        return None;
                    }
                    let truncated = value.trunc();
                    // i64::MIN is exactly representable, i64::MAX is not
                    (truncated >= i64::MIN as f64 && truncated < i64::MAX as f64)
                        .then_some(truncated as i64)
                }
            }
        )*
    };
}

impl_integer_sample!(u8, u16, i16, u32, i32);
impl_float_sample!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_scale_rounds_half_up() {
        let span = i32::span(10, 40).unwrap();
        assert_eq!(10_i32.scale(10, span), 0);
        assert_eq!(20_i32.scale(10, span), 85);
        assert_eq!(30_i32.scale(10, span), 170);
        assert_eq!(40_i32.scale(10, span), 255);

        // 1 * 255 / 2 = 127.5 rounds up
        let span = u8::span(0, 2).unwrap();
        assert_eq!(1_u8.scale(0, span), 128);
    }

    #[test]
    fn test_flat_span_is_none() {
        assert!(u16::span(7, 7).is_none());
        assert!(f64::span(-1.5, -1.5).is_none());
    }

    #[test]
    fn test_extreme_i32_range_does_not_overflow() {
        let span = i32::span(i32::MIN, i32::MAX).unwrap();
        assert_eq!(i32::MIN.scale(i32::MIN, span), 0);
        assert_eq!(i32::MAX.scale(i32::MIN, span), 255);
        assert_eq!(0_i32.scale(i32::MIN, span), 128);
    }

    #[test]
    fn test_u32_full_range() {
        let span = u32::span(0, u32::MAX).unwrap();
        assert_eq!(u32::MAX.scale(0, span), 255);
    }

    #[test]
    fn test_float_scale_matches_integer_policy() {
        let span = f64::span(10.0, 40.0).unwrap();
        assert_eq!(20.0_f64.scale(10.0, span), 85);
        assert_eq!(40.0_f64.scale(10.0, span), 255);

        let span = f32::span(0.0, 2.0).unwrap();
        assert_eq!(1.0_f32.scale(0.0, span), 128);
    }

    #[test]
    fn test_float_range_wider_than_f64_max() {
        let span = f64::span(-1e308, 1e308).unwrap();
        assert_eq!((-1e308_f64).scale(-1e308, span), 0);
        assert_eq!(1e308_f64.scale(-1e308, span), 255);

        let span = f64::span(-f64::MAX, f64::MAX).unwrap();
        assert_eq!(f64::MAX.scale(-f64::MAX, span), 255);
        assert_eq!((-f64::MAX).scale(-f64::MAX, span), 0);
        assert_eq!(0.0_f64.scale(-f64::MAX, span), 128);
    }

    #[test]
    fn test_float_offset_near_f64_max() {
        let span = f64::span(0.0, f64::MAX).unwrap();
        assert_eq!(f64::MAX.scale(0.0, span), 255);
        assert_eq!((f64::MAX * 0.5).scale(0.0, span), 128);
    }

    #[test]
    fn test_float_host_int_truncates_toward_zero() {
        assert_eq!(12.9_f64.to_host_int(), Some(12));
        assert_eq!((-12.9_f64).to_host_int(), Some(-12));
        assert_eq!(f64::NAN.to_host_int(), None);
        assert_eq!(f32::INFINITY.to_host_int(), None);
        assert_eq!(1e300_f64.to_host_int(), None);
    }

    #[test]
    fn test_float_finiteness() {
        assert!(1.0_f32.is_finite());
        assert!(!Sample::is_finite(f64::NAN));
        assert!(Sample::is_finite(5_u16));
    }
}
