//! Resize dispatch.
//!
//! This module decides *how* an image is fed to the resampling kernel; the
//! kernel itself lives behind [`Resampler`].
//!
//! # Algorithm
//!
//! 1. Pick a [`ResampleLayout`] from the source format and premultiplied
//!    flag, and a [`Colorspace`] from [`ResizeParams::cheap_srgb_filter`].
//! 2. Split the source into one normalised `f32` plane per channel. Colour
//!    planes hold premultiplied working-space values:
//!    - straight alpha: `decode(c) * a`
//!    - premultiplied, sRGB mode: `c` as stored
//!    - premultiplied, linear mode: `decode(c / a) * a`
//!
//!    Alpha, padding and CMYK planes are copied as plain values.
//! 3. Resample every plane. Nothing is written until all planes succeed.
//! 4. Divide colour by the resampled alpha, re-encode, and store in the
//!    source's premultiplication convention.
//!
//! Destination bytes follow the source layout; the destination format
//! only has to agree on channel count.

mod colorspace;
mod kernel;
mod layout;

pub use colorspace::Colorspace;
pub use kernel::{EdgeMode, ImageResampler, Plane, ResampleFilter, Resampler};
pub use layout::{ChannelRole, ResampleLayout};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RasterError, Result};
use crate::image::Image;

/// Tuning for [`resize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeParams {
    pub edge: EdgeMode,
    pub filter: ResampleFilter,
    /// Filter encoded sRGB bytes directly instead of linear light.
    ///
    /// Faster and usually indistinguishable on photographs; darkens
    /// high-contrast edges slightly.
    pub cheap_srgb_filter: bool,
}

impl ResizeParams {
    pub fn colorspace(&self) -> Colorspace {
        if self.cheap_srgb_filter {
            Colorspace::Srgb
        } else {
            Colorspace::Linear
        }
    }
}

/// Resample `src` to fill `dst` with the built-in [`ImageResampler`].
///
/// # Errors
///
/// - [`RasterError::InvalidDimensions`] if `dst` or `src` has a zero side
/// - [`RasterError::ChannelMismatch`] if the channel counts differ
/// - [`RasterError::Resample`] if the kernel refuses (e.g. a non-clamp edge)
///
/// `dst` is untouched on every error.
pub fn resize(src: &Image<'_>, dst: &mut Image<'_>, params: Option<&ResizeParams>) -> Result<()> {
    resize_with(&ImageResampler, src, dst, params)
}

/// [`resize`] with a caller-supplied kernel.
pub fn resize_with(
    resampler: &dyn Resampler,
    src: &Image<'_>,
    dst: &mut Image<'_>,
    params: Option<&ResizeParams>,
) -> Result<()> {
    if dst.is_empty() {
        return Err(RasterError::InvalidDimensions {
            width: dst.width(),
            height: dst.height(),
        });
    }
    if src.is_empty() {
        return Err(RasterError::InvalidDimensions {
            width: src.width(),
            height: src.height(),
        });
    }
    if src.channel_count() != dst.channel_count() {
        return Err(RasterError::ChannelMismatch {
            src: src.channel_count(),
            dst: dst.channel_count(),
        });
    }

    let params = params.copied().unwrap_or_default();
    let layout = ResampleLayout::for_image(src.format(), src.is_premultiplied());
    let colorspace = params.colorspace();
    debug!(
        ?layout,
        ?colorspace,
        filter = ?params.filter,
        edge = ?params.edge,
        src_width = src.width(),
        src_height = src.height(),
        dst_width = dst.width(),
        dst_height = dst.height(),
        "resize"
    );

    let planes = split_planes(src, layout, colorspace);
    let resampled = planes
        .iter()
        .map(|plane| resampler.resample(plane, dst.width(), dst.height(), params.filter, params.edge))
        .collect::<Result<Vec<_>>>()?;

    let expected = dst.width() as usize * dst.height() as usize;
    if let Some(bad) = resampled.iter().find(|p| p.data.len() != expected) {
        return Err(RasterError::Resample(format!(
            "kernel returned {} samples, expected {}",
            bad.data.len(),
            expected
        )));
    }

    merge_planes(&resampled, dst, layout, colorspace);
    if layout.alpha_index().is_some() {
        dst.set_premultiplied(src.is_premultiplied());
    }
    Ok(())
}

/// Allocate a `width x height` image of the source's format and resize
/// into it.
pub fn resize_new(
    src: &Image<'_>,
    width: u32,
    height: u32,
    params: Option<&ResizeParams>,
) -> Result<Image<'static>> {
    let mut dst = Image::new(width, height, src.format())?;
    resize(src, &mut dst, params)?;
    Ok(dst)
}

/// Calculate dimensions to fit within `max_edge` while preserving aspect ratio.
///
/// Images that already fit are returned unchanged. The short side never
/// rounds down to zero.
pub fn fit_within(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    if width <= max_edge && height <= max_edge {
        return (width, height);
    }

    let ratio = f64::from(width) / f64::from(height);
    if width >= height {
        // Landscape or square: constrain by width
        let new_height = (f64::from(max_edge) / ratio).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        // Portrait: constrain by height
        let new_width = (f64::from(max_edge) * ratio).round() as u32;
        (new_width.max(1), max_edge)
    }
}

#[inline]
fn unit(v: u8) -> f32 {
    f32::from(v) / 255.0
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn split_planes(src: &Image<'_>, layout: ResampleLayout, colorspace: Colorspace) -> Vec<Plane> {
    let nchan = layout.channel_count();
    let alpha_index = layout.alpha_index();
    let premultiplied = layout.is_premultiplied();
    let mut planes: Vec<Plane> = (0..nchan)
        .map(|_| Plane::new(src.width(), src.height()))
        .collect();

    for y in 0..src.height() as usize {
        for px in src.row(y).chunks_exact(nchan) {
            let alpha = alpha_index.map(|i| unit(px[i]));
            for (c, plane) in planes.iter_mut().enumerate() {
                let v = unit(px[c]);
                let value = match (layout.channel_role(c), alpha) {
                    (ChannelRole::Alpha | ChannelRole::Other, _) => v,
                    (ChannelRole::Color, None) => colorspace.decode(v),
                    (ChannelRole::Color, Some(a)) if !premultiplied => colorspace.decode(v) * a,
                    (ChannelRole::Color, Some(_)) if colorspace == Colorspace::Srgb => v,
                    (ChannelRole::Color, Some(a)) if a > 0.0 => colorspace.decode((v / a).min(1.0)) * a,
                    (ChannelRole::Color, Some(_)) => 0.0,
                };
                plane.data.push(value);
            }
        }
    }
    planes
}

fn merge_planes(planes: &[Plane], dst: &mut Image<'_>, layout: ResampleLayout, colorspace: Colorspace) {
    let nchan = layout.channel_count();
    let alpha_index = layout.alpha_index();
    let premultiplied = layout.is_premultiplied();
    let width = dst.width() as usize;

    for y in 0..dst.height() as usize {
        for (x, px) in dst.row_mut(y).chunks_exact_mut(nchan).enumerate() {
            let idx = y * width + x;
            let alpha = alpha_index.map(|i| planes[i].data[idx].clamp(0.0, 1.0));
            for (c, out) in px.iter_mut().enumerate() {
                let v = planes[c].data[idx];
                *out = match (layout.channel_role(c), alpha) {
                    (ChannelRole::Alpha | ChannelRole::Other, _) => to_byte(v),
                    (ChannelRole::Color, None) => to_byte(colorspace.encode(v.clamp(0.0, 1.0))),
                    (ChannelRole::Color, Some(a)) => {
                        let straight = if a > 0.0 { (v / a).clamp(0.0, 1.0) } else { 0.0 };
                        match (premultiplied, colorspace) {
                            (true, Colorspace::Srgb) => to_byte(v.clamp(0.0, a)),
                            (true, Colorspace::Linear) => to_byte(colorspace.encode(straight) * a),
                            (false, _) => to_byte(colorspace.encode(straight)),
                        }
                    }
                };
            }
        }
    }
}
