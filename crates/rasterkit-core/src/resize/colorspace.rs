//! Working colourspace for resampling.
//!
//! Values are normalised to `[0, 1]`. Linear mode runs them through the
//! IEC 61966-2-1 piecewise sRGB curve from `linear_srgb`, which clamps its
//! input to `[0, 1]`, so kernel overshoot never leaves the byte range.

use linear_srgb::default::{linear_to_srgb, srgb_to_linear};
use serde::{Deserialize, Serialize};

/// Numeric domain the filter runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Colorspace {
    /// Decode to linear light, filter, re-encode.
    #[default]
    Linear,
    /// Filter the encoded values directly.
    Srgb,
}

impl Colorspace {
    /// Map an encoded colour value into this working space.
    #[inline]
    pub(crate) fn decode(self, v: f32) -> f32 {
        match self {
            Colorspace::Linear => srgb_to_linear(v),
            Colorspace::Srgb => v,
        }
    }

    /// Map a working-space colour value back to encoded form.
    #[inline]
    pub(crate) fn encode(self, v: f32) -> f32 {
        match self {
            Colorspace::Linear => linear_to_srgb(v),
            Colorspace::Srgb => v,
        }
    }
}
