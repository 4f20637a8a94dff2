//! Modality LUT: rescale slope/intercept

use crate::image::SampleGrid;
use crate::types::RescaleParams;

/// Samples after the modality transform
///
/// Integral rescales whose results fit `i32` stay integer; anything else
/// becomes `f64`.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalityGrid {
    Integer(SampleGrid<i32>),
    Real(SampleGrid<f64>),
}

impl ModalityGrid {
    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            Self::Integer(grid) => grid.width(),
            Self::Real(grid) => grid.width(),
        }
    }

    #[must_use]
    pub fn height(&self) -> usize {
        match self {
            Self::Integer(grid) => grid.height(),
            Self::Real(grid) => grid.height(),
        }
    }

    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(_))
    }
}

/// Apply `value * slope + intercept` to every stored value
pub fn apply_modality_transform(grid: SampleGrid<i32>, rescale: RescaleParams) -> ModalityGrid {
    if rescale.is_identity() {
        return ModalityGrid::Integer(grid);
    }

    if rescale.is_integral() {
        // Exact for |x| < 2^63; larger values saturate and fail the checks below
        let slope = rescale.slope as i64;
        let intercept = rescale.intercept as i64;
        let rescaled = grid.try_map(|&v| {
            i64::from(v)
                .checked_mul(slope)?
                .checked_add(intercept)
                .and_then(|x| i32::try_from(x).ok())
        });
        if let Some(rescaled) = rescaled {
            return ModalityGrid::Integer(rescaled);
        }
    }

    ModalityGrid::Real(grid.map(|v| rescale.apply(v)))
}
