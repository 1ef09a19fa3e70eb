//! Exact quarter-turn rotations and EXIF orientation undo.
//!
//! These are pure pixel permutations: every output byte is a copy of some
//! input byte, so they are lossless and need no resampling.
//!
//! See <https://www.impulseadventure.com/photo/exif-orientation.html> for
//! pictures of the eight EXIF orientations.

use serde::{Deserialize, Serialize};

use crate::error::{RasterError, Result};
use crate::image::Image;

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// Parse an EXIF orientation code. `None` outside 1-8.
    pub fn from_exif(value: u16) -> Option<Self> {
        match value {
            1 => Some(Orientation::Normal),
            2 => Some(Orientation::FlipHorizontal),
            3 => Some(Orientation::Rotate180),
            4 => Some(Orientation::FlipVertical),
            5 => Some(Orientation::Transpose),
            6 => Some(Orientation::Rotate90CW),
            7 => Some(Orientation::Transverse),
            8 => Some(Orientation::Rotate270CW),
            _ => None,
        }
    }

    /// The EXIF tag value (1-8).
    pub fn exif_value(self) -> u16 {
        self as u16
    }

    /// Returns true if this orientation swaps width and height dimensions.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }
}

/// One of the three lossless rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QuarterTurn {
    Clockwise,
    Half,
    CounterClockwise,
}

impl QuarterTurn {
    /// Output dimensions for a `width x height` source.
    pub(crate) fn output_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        match self {
            QuarterTurn::Half => (width, height),
            QuarterTurn::Clockwise | QuarterTurn::CounterClockwise => (height, width),
        }
    }
}

/// Write the rotated `src` into `dst`.
///
/// The caller guarantees matching channel counts and that `dst` has
/// [`QuarterTurn::output_dimensions`].
pub(crate) fn rotate_exact_into(src: &Image<'_>, dst: &mut Image<'_>, turn: QuarterTurn) {
    let nchan = src.channel_count();
    let src_w = src.width() as usize;
    let src_h = src.height() as usize;
    for y in 0..dst.height() as usize {
        for (x, out) in dst.row_mut(y).chunks_exact_mut(nchan).enumerate() {
            let (sx, sy) = match turn {
                QuarterTurn::Clockwise => (y, src_h - 1 - x),
                QuarterTurn::Half => (src_w - 1 - x, src_h - 1 - y),
                QuarterTurn::CounterClockwise => (src_w - 1 - y, x),
            };
            out.copy_from_slice(src.pixel(sx, sy));
        }
    }
}

fn rotate_exact(src: &Image<'_>, turn: QuarterTurn) -> Result<Image<'static>> {
    let (width, height) = turn.output_dimensions(src.width(), src.height());
    let mut dst = Image::new(width, height, src.format())?.with_premultiplied(src.is_premultiplied());
    rotate_exact_into(src, &mut dst, turn);
    Ok(dst)
}

/// Rotate 90 degrees clockwise into a new image.
pub fn rotate90_cw(src: &Image<'_>) -> Result<Image<'static>> {
    rotate_exact(src, QuarterTurn::Clockwise)
}

/// Rotate 180 degrees into a new image.
pub fn rotate180(src: &Image<'_>) -> Result<Image<'static>> {
    rotate_exact(src, QuarterTurn::Half)
}

/// Rotate 90 degrees counter-clockwise into a new image.
pub fn rotate90_ccw(src: &Image<'_>) -> Result<Image<'static>> {
    rotate_exact(src, QuarterTurn::CounterClockwise)
}

/// Rewrite pixels so the EXIF orientation tag can be dropped.
///
/// After this, stored orientation equals display orientation. Only the
/// pure rotations are supported:
/// - 3: 180 degrees, same dimensions
/// - 6: 90 degrees clockwise, width and height swap
/// - 8: 90 degrees counter-clockwise, width and height swap
///
/// # Errors
///
/// [`RasterError::UnsupportedOrientation`] for every other code, including
/// the mirrored orientations 2, 4, 5 and 7.
pub fn unrotate_exif(orientation: u16, src: &Image<'_>) -> Result<Image<'static>> {
    let turn = match Orientation::from_exif(orientation) {
        Some(Orientation::Rotate180) => QuarterTurn::Half,
        Some(Orientation::Rotate90CW) => QuarterTurn::Clockwise,
        Some(Orientation::Rotate270CW) => QuarterTurn::CounterClockwise,
        _ => return Err(RasterError::UnsupportedOrientation(orientation)),
    };
    rotate_exact(src, turn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PixelFormat;

    /// 3x2 gray image:
    /// ```text
    /// 1 2 3
    /// 4 5 6
    /// ```
    fn sample() -> Image<'static> {
        Image::from_vec(3, 2, PixelFormat::Gray, vec![1, 2, 3, 4, 5, 6]).unwrap()
    }

    #[test]
    fn test_orientation_from_exif() {
        assert_eq!(Orientation::from_exif(1), Some(Orientation::Normal));
        assert_eq!(Orientation::from_exif(6), Some(Orientation::Rotate90CW));
        assert_eq!(Orientation::from_exif(0), None);
        assert_eq!(Orientation::from_exif(9), None);
        assert_eq!(Orientation::Rotate270CW.exif_value(), 8);
    }

    #[test]
    fn test_orientation_swaps_dimensions() {
        assert!(!Orientation::Normal.swaps_dimensions());
        assert!(!Orientation::Rotate180.swaps_dimensions());
        assert!(Orientation::Rotate90CW.swaps_dimensions());
        assert!(Orientation::Rotate270CW.swaps_dimensions());
        assert!(Orientation::Transpose.swaps_dimensions());
    }

    #[test]
    fn test_unrotate_3() {
        let out = unrotate_exif(3, &sample()).unwrap();
        assert_eq!(out.dimensions(), (3, 2));
        assert_eq!(out.pixels(), &[6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_unrotate_6() {
        let out = unrotate_exif(6, &sample()).unwrap();
        assert_eq!(out.dimensions(), (2, 3));
        // 4 1
        // 5 2
        // 6 3
        assert_eq!(out.pixels(), &[4, 1, 5, 2, 6, 3]);
    }

    #[test]
    fn test_unrotate_8() {
        let out = unrotate_exif(8, &sample()).unwrap();
        assert_eq!(out.dimensions(), (2, 3));
        // 3 6
        // 2 5
        // 1 4
        assert_eq!(out.pixels(), &[3, 6, 2, 5, 1, 4]);
    }

    #[test]
    fn test_unrotate_rejects_mirrored_and_invalid() {
        for code in [0u16, 1, 2, 4, 5, 7, 9, 300] {
            assert_eq!(
                unrotate_exif(code, &sample()).unwrap_err(),
                RasterError::UnsupportedOrientation(code)
            );
        }
    }

    #[test]
    fn test_unrotate_keeps_channels_together() {
        let src = Image::from_vec(2, 1, PixelFormat::Rgb, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let out = unrotate_exif(6, &src).unwrap();
        assert_eq!(out.dimensions(), (1, 2));
        assert_eq!(out.pixels(), &[1, 2, 3, 4, 5, 6]);

        let out = unrotate_exif(8, &src).unwrap();
        assert_eq!(out.pixels(), &[4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn test_unrotate_reads_strided_source() {
        let mut bytes = vec![1, 2, 3, 0, 4, 5, 6, 0];
        let src = Image::wrap_strided(3, 2, PixelFormat::Gray, &mut bytes, 4).unwrap();
        let out = unrotate_exif(3, &src).unwrap();
        assert_eq!(out.pixels(), &[6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_unrotate_preserves_premultiplied_flag() {
        let src = Image::new(2, 3, PixelFormat::Rgba).unwrap().with_premultiplied(true);
        assert!(unrotate_exif(8, &src).unwrap().is_premultiplied());
    }

    #[test]
    fn test_helpers_match_exif_codes() {
        let src = sample();
        assert_eq!(rotate90_cw(&src).unwrap().pixels(), unrotate_exif(6, &src).unwrap().pixels());
        assert_eq!(rotate90_ccw(&src).unwrap().pixels(), unrotate_exif(8, &src).unwrap().pixels());
        assert_eq!(rotate180(&src).unwrap().pixels(), unrotate_exif(3, &src).unwrap().pixels());
    }

    #[test]
    fn test_four_clockwise_turns_is_identity() {
        let src = sample();
        let mut out = src.clone_owned();
        for _ in 0..4 {
            out = rotate90_cw(&out).unwrap();
        }
        assert_eq!(out.dimensions(), src.dimensions());
        assert_eq!(out.pixels(), src.pixels());
    }
}
