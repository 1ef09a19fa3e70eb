//! Channel-format conversions.
//!
//! All conversions allocate a new owned image and leave the source alone.
//! Channel order is taken from [`PixelFormat::rgb_offsets`], so a BGRA pixel
//! lands in an RGB image with red and blue in the right places.

use crate::error::{RasterError, Result};
use crate::format::PixelFormat;
use crate::image::Image;

fn offsets_for(format: PixelFormat, operation: &'static str) -> Result<[usize; 3]> {
    format
        .rgb_offsets()
        .ok_or(RasterError::UnsupportedFormat { format, operation })
}

/// Convert to a 3-channel RGB image, discarding alpha or padding.
///
/// A 3-channel input is deep-cloned unchanged (BGR stays BGR). Gray is
/// replicated into all three components. Colour stays premultiplied if
/// it was, which is the same as matting onto black.
///
/// # Errors
///
/// [`RasterError::UnsupportedFormat`] for CMYK.
pub fn to_rgb(img: &Image<'_>) -> Result<Image<'static>> {
    if img.channel_count() == 3 {
        return Ok(img.clone_owned());
    }

    let (width, height) = img.dimensions();
    let mut dst = Image::new(width, height, PixelFormat::Rgb)?;
    if img.format() == PixelFormat::Gray {
        for y in 0..height as usize {
            for (out, &g) in dst.row_mut(y).chunks_exact_mut(3).zip(img.row(y)) {
                out.fill(g);
            }
        }
        return Ok(dst);
    }

    let [r, g, b] = offsets_for(img.format(), "to_rgb")?;
    let nchan = img.channel_count();
    for y in 0..height as usize {
        for (out, px) in dst.row_mut(y).chunks_exact_mut(3).zip(img.row(y).chunks_exact(nchan)) {
            out[0] = px[r];
            out[1] = px[g];
            out[2] = px[b];
        }
    }
    Ok(dst)
}

/// Convert to a 1-channel gray image.
///
/// Colour inputs use integer Rec.601 luma weights (77, 150, 29) / 256.
///
/// # Errors
///
/// [`RasterError::UnsupportedFormat`] for CMYK.
pub fn to_gray(img: &Image<'_>) -> Result<Image<'static>> {
    if img.format() == PixelFormat::Gray {
        return Ok(img.clone_owned());
    }

    let [r, g, b] = offsets_for(img.format(), "to_gray")?;
    let nchan = img.channel_count();
    let (width, height) = img.dimensions();
    let mut dst = Image::new(width, height, PixelFormat::Gray)?;
    for y in 0..height as usize {
        for (out, px) in dst.row_mut(y).iter_mut().zip(img.row(y).chunks_exact(nchan)) {
            let luma = 77 * u32::from(px[r]) + 150 * u32::from(px[g]) + 29 * u32::from(px[b]);
            *out = ((luma + 128) >> 8) as u8;
        }
    }
    Ok(dst)
}

/// Convert to a 4-channel RGBA image.
///
/// Inputs without alpha get the constant `alpha`. Inputs with alpha keep
/// their own (reordered into RGBA) along with the premultiplied flag.
///
/// # Errors
///
/// [`RasterError::UnsupportedFormat`] for CMYK.
pub fn to_rgba(img: &Image<'_>, alpha: u8) -> Result<Image<'static>> {
    let (width, height) = img.dimensions();
    let nchan = img.channel_count();
    let mut dst = Image::new(width, height, PixelFormat::Rgba)?;

    if img.format() == PixelFormat::Gray {
        for y in 0..height as usize {
            for (out, &g) in dst.row_mut(y).chunks_exact_mut(4).zip(img.row(y)) {
                out.copy_from_slice(&[g, g, g, alpha]);
            }
        }
        return Ok(dst);
    }

    let [r, g, b] = offsets_for(img.format(), "to_rgba")?;
    let alpha_index = img.format().alpha_index();
    for y in 0..height as usize {
        for (out, px) in dst.row_mut(y).chunks_exact_mut(4).zip(img.row(y).chunks_exact(nchan)) {
            let a = alpha_index.map_or(alpha, |i| px[i]);
            out.copy_from_slice(&[px[r], px[g], px[b], a]);
        }
    }
    dst.set_premultiplied(alpha_index.is_some() && img.is_premultiplied());
    Ok(dst)
}
