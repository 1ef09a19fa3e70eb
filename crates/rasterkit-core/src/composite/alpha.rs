//! Alpha compositing: matte, premultiply, unpremultiply.
//!
//! All arithmetic is in the 0-255 integer domain with floor division.
//! These functions trust [`Image::is_premultiplied`]; a flag that does not
//! describe the pixels produces wrong colours, not an error.

use crate::error::{RasterError, Result};
use crate::image::Image;

/// Blend an alpha image onto the solid colour `(r, g, b)` in place.
///
/// Per colour channel, with alpha `a`:
/// - premultiplied: `out = c + bg * (255 - a) / 255`
/// - straight: `out = (c * a + bg * (255 - a)) / 255`
///
/// Alpha becomes 255 everywhere.
///
/// # Errors
///
/// [`RasterError::UnsupportedFormat`] unless the format has true alpha.
pub fn matte(img: &mut Image<'_>, r: u8, g: u8, b: u8) -> Result<()> {
    let format = img.format();
    let (Some(alpha_index), Some(offsets)) = (format.alpha_index(), format.rgb_offsets()) else {
        return Err(RasterError::UnsupportedFormat {
            format,
            operation: "matte",
        });
    };

    let background = [u32::from(r), u32::from(g), u32::from(b)];
    let premultiplied = img.is_premultiplied();
    for y in 0..img.height() as usize {
        for px in img.row_mut(y).chunks_exact_mut(4) {
            let a = u32::from(px[alpha_index]);
            let inv = 255 - a;
            for (&offset, &bg) in offsets.iter().zip(&background) {
                let c = u32::from(px[offset]);
                let v = if premultiplied {
                    c + bg * inv / 255
                } else {
                    (c * a + bg * inv) / 255
                };
                px[offset] = v.min(255) as u8;
            }
            px[alpha_index] = 255;
        }
    }
    Ok(())
}

/// Scale colour channels by `alpha / 255` in place and set the flag.
///
/// No-op when already premultiplied or when the format has no alpha.
/// Colour under zero alpha is lost for good.
pub fn premultiply(img: &mut Image<'_>) {
    let format = img.format();
    let (Some(alpha_index), Some(offsets)) = (format.alpha_index(), format.rgb_offsets()) else {
        return;
    };
    if img.is_premultiplied() {
        return;
    }

    for y in 0..img.height() as usize {
        for px in img.row_mut(y).chunks_exact_mut(4) {
            let a = u32::from(px[alpha_index]);
            for &offset in &offsets {
                px[offset] = (u32::from(px[offset]) * a / 255) as u8;
            }
        }
    }
    img.set_premultiplied(true);
}

/// Divide colour channels by `alpha / 255` in place and clear the flag.
///
/// Rounds to nearest and saturates at 255; fully transparent pixels become
/// black. No-op when not premultiplied or when the format has no alpha.
pub fn unpremultiply(img: &mut Image<'_>) {
    let format = img.format();
    let (Some(alpha_index), Some(offsets)) = (format.alpha_index(), format.rgb_offsets()) else {
        return;
    };
    if !img.is_premultiplied() {
        return;
    }

    for y in 0..img.height() as usize {
        for px in img.row_mut(y).chunks_exact_mut(4) {
            let a = u32::from(px[alpha_index]);
            for &offset in &offsets {
                px[offset] = if a == 0 {
                    0
                } else {
                    ((u32::from(px[offset]) * 255 + a / 2) / a).min(255) as u8
                };
            }
        }
    }
    img.set_premultiplied(false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PixelFormat;

    fn rgba(pixels: &[[u8; 4]]) -> Image<'static> {
        Image::from_vec(pixels.len() as u32, 1, PixelFormat::Rgba, pixels.concat()).unwrap()
    }

    #[test]
    fn test_matte_transparent_pixel_takes_background() {
        let mut img = rgba(&[[12, 200, 99, 0]]);
        matte(&mut img, 255, 0, 0).unwrap();
        assert_eq!(img.pixels(), &[255, 0, 0, 255]);
    }

    #[test]
    fn test_matte_opaque_pixel_unchanged() {
        let mut img = rgba(&[[12, 200, 99, 255]]);
        matte(&mut img, 255, 255, 255).unwrap();
        assert_eq!(img.pixels(), &[12, 200, 99, 255]);
    }

    #[test]
    fn test_matte_straight_half_alpha_floors() {
        let mut img = rgba(&[[200, 100, 0, 128]]);
        matte(&mut img, 0, 0, 255).unwrap();
        // (200*128 + 0)/255 = 100, (100*128)/255 = 50, (0 + 255*127)/255 = 127
        assert_eq!(img.pixels(), &[100, 50, 127, 255]);
    }

    #[test]
    fn test_matte_premultiplied() {
        let mut img = rgba(&[[100, 50, 0, 128]]).with_premultiplied(true);
        matte(&mut img, 0, 0, 255).unwrap();
        // 100 + 0, 50 + 0, 0 + 255*127/255 = 127
        assert_eq!(img.pixels(), &[100, 50, 127, 255]);
    }

    #[test]
    fn test_matte_uses_channel_order() {
        let mut img = Image::from_vec(1, 1, PixelFormat::Argb, vec![0, 1, 2, 3]).unwrap();
        matte(&mut img, 10, 20, 30).unwrap();
        assert_eq!(img.pixels(), &[255, 10, 20, 30]);
    }

    #[test]
    fn test_matte_rejects_non_alpha_formats() {
        for format in [PixelFormat::Rgb, PixelFormat::Rgbx, PixelFormat::Gray, PixelFormat::Cmyk] {
            let mut img = Image::new(2, 2, format).unwrap();
            img.pixels_mut().fill(3);
            let err = matte(&mut img, 1, 2, 3).unwrap_err();
            assert_eq!(
                err,
                RasterError::UnsupportedFormat {
                    format,
                    operation: "matte"
                }
            );
            assert!(img.pixels().iter().all(|&b| b == 3));
        }
    }

    #[test]
    fn test_premultiply() {
        let mut img = rgba(&[[255, 128, 10, 128], [77, 77, 77, 0], [9, 8, 7, 255]]);
        premultiply(&mut img);
        assert!(img.is_premultiplied());
        assert_eq!(
            img.pixels(),
            &[128, 64, 5, 128, 0, 0, 0, 0, 9, 8, 7, 255]
        );
    }

    #[test]
    fn test_premultiply_is_idempotent() {
        let mut once = rgba(&[[255, 128, 10, 128], [200, 100, 50, 17]]);
        premultiply(&mut once);
        let mut twice = once.clone();
        premultiply(&mut twice);
        assert_eq!(once.pixels(), twice.pixels());
        assert!(twice.is_premultiplied());
    }

    #[test]
    fn test_premultiply_without_alpha_is_noop() {
        let mut img = Image::from_vec(1, 1, PixelFormat::Rgbx, vec![200, 100, 50, 0]).unwrap();
        premultiply(&mut img);
        assert_eq!(img.pixels(), &[200, 100, 50, 0]);
        assert!(!img.is_premultiplied());
    }

    #[test]
    fn test_premultiply_alpha_first() {
        let mut img = Image::from_vec(1, 1, PixelFormat::Abgr, vec![51, 255, 255, 255]).unwrap();
        premultiply(&mut img);
        assert_eq!(img.pixels(), &[51, 51, 51, 51]);
    }

    #[test]
    fn test_unpremultiply() {
        let mut img = rgba(&[[128, 64, 5, 128], [3, 3, 3, 0], [9, 8, 7, 255]]).with_premultiplied(true);
        unpremultiply(&mut img);
        assert!(!img.is_premultiplied());
        assert_eq!(
            img.pixels(),
            &[255, 128, 10, 128, 0, 0, 0, 0, 9, 8, 7, 255]
        );
    }
}
