//! Photometric interpretation (color space)

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotometricInterpretation {
    /// Grayscale, min value = white
    Monochrome1,
    /// Grayscale, min value = black
    Monochrome2,
    /// Anything that is not single-channel grayscale (RGB, YBR_*, PALETTE COLOR, ...)
    Other(String),
}

impl From<&str> for PhotometricInterpretation {
    fn from(s: &str) -> Self {
        match s.trim_end_matches(['\0', ' ']).trim() {
            "MONOCHROME1" => Self::Monochrome1,
            "MONOCHROME2" => Self::Monochrome2,
            other => Self::Other(other.to_string()),
        }
    }
}

impl PhotometricInterpretation {
    #[inline]
    #[must_use]
    pub fn is_grayscale(&self) -> bool {
        matches!(self, Self::Monochrome1 | Self::Monochrome2)
    }
}

impl fmt::Display for PhotometricInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monochrome1 => write!(f, "MONOCHROME1"),
            Self::Monochrome2 => write!(f, "MONOCHROME2"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}
