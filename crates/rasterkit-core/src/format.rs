//! Pixel format model.
//!
//! A [`PixelFormat`] fixes the number of channels in a pixel and the order
//! those channels appear in memory. Everything else (channel count, alpha
//! presence, byte offsets of each colour component) is derived from the
//! format by exhaustive matches, so there is no second copy of this
//! information that could drift out of sync.
//!
//! Formats with four channels fall into three groups:
//! - true alpha: `Rgba`, `Bgra`, `Abgr`, `Argb`
//! - padding that carries no meaning: `Rgbx`, `Bgrx`, `Xbgr`, `Xrgb`
//! - `Cmyk`, which has neither RGB components nor alpha

use serde::{Deserialize, Serialize};

use crate::error::RasterError;

/// Channel layout of an 8-bit pixel.
///
/// The numeric codes follow libjpeg-turbo's `TJPF_*` constants, which is
/// the numbering raw buffers usually arrive with from codec collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PixelFormat {
    Rgb = 0,
    Bgr = 1,
    Rgbx = 2,
    Bgrx = 3,
    Xbgr = 4,
    Xrgb = 5,
    Gray = 6,
    Rgba = 7,
    Bgra = 8,
    Abgr = 9,
    Argb = 10,
    Cmyk = 11,
}

impl PixelFormat {
    /// Every format, in code order.
    pub const ALL: [PixelFormat; 12] = [
        PixelFormat::Rgb,
        PixelFormat::Bgr,
        PixelFormat::Rgbx,
        PixelFormat::Bgrx,
        PixelFormat::Xbgr,
        PixelFormat::Xrgb,
        PixelFormat::Gray,
        PixelFormat::Rgba,
        PixelFormat::Bgra,
        PixelFormat::Abgr,
        PixelFormat::Argb,
        PixelFormat::Cmyk,
    ];

    /// Number of bytes per pixel.
    #[inline]
    pub fn channel_count(self) -> usize {
        match self {
            PixelFormat::Gray => 1,
            PixelFormat::Rgb | PixelFormat::Bgr => 3,
            PixelFormat::Rgbx
            | PixelFormat::Bgrx
            | PixelFormat::Xbgr
            | PixelFormat::Xrgb
            | PixelFormat::Rgba
            | PixelFormat::Bgra
            | PixelFormat::Abgr
            | PixelFormat::Argb
            | PixelFormat::Cmyk => 4,
        }
    }

    /// True only for formats whose fourth channel is real alpha.
    #[inline]
    pub fn has_alpha(self) -> bool {
        self.alpha_index().is_some()
    }

    /// Byte offset of the alpha channel within a pixel.
    #[inline]
    pub fn alpha_index(self) -> Option<usize> {
        match self {
            PixelFormat::Rgba | PixelFormat::Bgra => Some(3),
            PixelFormat::Abgr | PixelFormat::Argb => Some(0),
            _ => None,
        }
    }

    /// Byte offsets of the red, green and blue components within a pixel.
    ///
    /// `None` for `Gray` and `Cmyk`, which have no RGB components.
    #[inline]
    pub fn rgb_offsets(self) -> Option<[usize; 3]> {
        match self {
            PixelFormat::Rgb | PixelFormat::Rgbx | PixelFormat::Rgba => Some([0, 1, 2]),
            PixelFormat::Bgr | PixelFormat::Bgrx | PixelFormat::Bgra => Some([2, 1, 0]),
            PixelFormat::Xbgr | PixelFormat::Abgr => Some([3, 2, 1]),
            PixelFormat::Xrgb | PixelFormat::Argb => Some([1, 2, 3]),
            PixelFormat::Gray | PixelFormat::Cmyk => None,
        }
    }

    /// The `TJPF_*` style numeric code of this format.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for PixelFormat {
    type Error = RasterError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        PixelFormat::ALL
            .get(code as usize)
            .copied()
            .ok_or(RasterError::UnknownPixelFormat(code))
    }
}
