//! Arbitrary-angle rotation into a caller-sized destination.
//!
//! The destination's dimensions are the caller's choice. Before doing any
//! interpolation, [`rotate`] looks for a cheaper exact path:
//!
//! | Angle (mod 360)        | Destination        | Path            |
//! |------------------------|--------------------|-----------------|
//! | exactly 0              | same as source     | row copy        |
//! | 90 or -270             | transposed         | exact clockwise |
//! | -90 or 270             | transposed         | exact counter   |
//! | 180 or -180            | same as source     | exact half turn |
//! | anything else          | any                | bilinear        |
//!
//! "Near" means within [`RotateParams::snap_threshold_degrees`].
//!
//! # Algorithm
//!
//! The bilinear path uses inverse mapping: each destination pixel is taken
//! relative to the destination centre, rotated back by the angle, and
//! re-centred on the source. Positive angles rotate clockwise in image
//! coordinates (y down):
//!
//! ```text
//! src_x =  x_rel * cos(a) + y_rel * sin(a) + (src_w - 1) / 2
//! src_y = -x_rel * sin(a) + y_rel * cos(a) + (src_h - 1) / 2
//! ```
//!
//! Samples outside the source become all-zero pixels. Weights are Q16 fixed
//! point so every platform produces the same bytes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::composite::copy_image;
use crate::error::{RasterError, Result};
use crate::image::Image;

use super::orient::{rotate_exact_into, QuarterTurn};

/// Default tolerance for snapping to an exact quarter turn.
pub const DEFAULT_SNAP_THRESHOLD_DEGREES: f64 = 0.01;

const ONE: i64 = 1 << 16;
const HALF: i64 = 1 << 15;

/// Interpolation filter for the non-exact path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RotateFilter {
    /// 2x2 neighbourhood, fixed-point weights.
    #[default]
    Bilinear,
}

/// Tuning for [`rotate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotateParams {
    pub filter: RotateFilter,
    /// How close (in degrees) an angle must be to a quarter turn to take
    /// the exact path.
    pub snap_threshold_degrees: f64,
}

impl Default for RotateParams {
    fn default() -> Self {
        Self {
            filter: RotateFilter::Bilinear,
            snap_threshold_degrees: DEFAULT_SNAP_THRESHOLD_DEGREES,
        }
    }
}

/// Which path [`rotate`] took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationClass {
    /// Straight copy.
    Identity,
    /// Exact 90 degrees clockwise.
    Discrete90,
    /// Exact half turn.
    Discrete180,
    /// Exact 90 degrees counter-clockwise.
    Discrete270,
    /// Interpolated.
    Bilinear,
}

/// Decide which path a rotation takes without touching any pixels.
pub fn classify(
    src_dims: (u32, u32),
    dst_dims: (u32, u32),
    angle_radians: f64,
    params: &RotateParams,
) -> RotationClass {
    let same = src_dims == dst_dims;
    if angle_radians == 0.0 && same {
        return RotationClass::Identity;
    }

    let transposed = src_dims == (dst_dims.1, dst_dims.0);
    match snapped_quarter_turns(angle_radians, params.snap_threshold_degrees) {
        Some(1) if transposed => RotationClass::Discrete90,
        Some(3) if transposed => RotationClass::Discrete270,
        Some(2) if same => RotationClass::Discrete180,
        _ => RotationClass::Bilinear,
    }
}

/// Clockwise quarter turns (`0..4`) that `angle_radians` lies within
/// `threshold_degrees` of, after reducing it to one revolution.
fn snapped_quarter_turns(angle_radians: f64, threshold_degrees: f64) -> Option<u8> {
    let degrees = angle_radians.to_degrees().rem_euclid(360.0);
    let turns = (degrees / 90.0).round();
    ((degrees - turns * 90.0).abs() < threshold_degrees).then(|| turns as u8 % 4)
}

/// Rotate `src` about its centre into `dst`.
///
/// Every destination pixel is written. `params` of `None` uses
/// [`RotateParams::default`].
///
/// # Arguments
///
/// * `src` - Source image
/// * `dst` - Destination; its dimensions select the path (see module docs)
/// * `angle_radians` - Rotation angle (positive = clockwise)
///
/// # Returns
///
/// The [`RotationClass`] that produced the output.
///
/// # Errors
///
/// [`RasterError::ChannelMismatch`] if the channel counts differ; `dst` is
/// left untouched.
pub fn rotate(
    src: &Image<'_>,
    dst: &mut Image<'_>,
    angle_radians: f64,
    params: Option<&RotateParams>,
) -> Result<RotationClass> {
    if src.channel_count() != dst.channel_count() {
        return Err(RasterError::ChannelMismatch {
            src: src.channel_count(),
            dst: dst.channel_count(),
        });
    }

    let params = params.copied().unwrap_or_default();
    let class = classify(src.dimensions(), dst.dimensions(), angle_radians, &params);
    debug!(
        ?class,
        angle_degrees = angle_radians.to_degrees(),
        src_width = src.width(),
        src_height = src.height(),
        dst_width = dst.width(),
        dst_height = dst.height(),
        "rotate"
    );

    match class {
        RotationClass::Identity => copy_image(dst, src, 0, 0)?,
        RotationClass::Discrete90 => rotate_exact_into(src, dst, QuarterTurn::Clockwise),
        RotationClass::Discrete180 => rotate_exact_into(src, dst, QuarterTurn::Half),
        RotationClass::Discrete270 => rotate_exact_into(src, dst, QuarterTurn::CounterClockwise),
        RotationClass::Bilinear => match params.filter {
            RotateFilter::Bilinear => rotate_bilinear(src, dst, angle_radians),
        },
    }
    Ok(class)
}

fn rotate_bilinear(src: &Image<'_>, dst: &mut Image<'_>, angle_radians: f64) {
    let nchan = src.channel_count();
    let (sin, cos) = angle_radians.sin_cos();
    let src_cx = (f64::from(src.width()) - 1.0) / 2.0;
    let src_cy = (f64::from(src.height()) - 1.0) / 2.0;
    let dst_cx = (f64::from(dst.width()) - 1.0) / 2.0;
    let dst_cy = (f64::from(dst.height()) - 1.0) / 2.0;

    for y in 0..dst.height() as usize {
        let y_rel = y as f64 - dst_cy;
        for (x, out) in dst.row_mut(y).chunks_exact_mut(nchan).enumerate() {
            let x_rel = x as f64 - dst_cx;
            let sx = x_rel * cos + y_rel * sin + src_cx;
            let sy = -x_rel * sin + y_rel * cos + src_cy;
            sample_bilinear(src, sx, sy, out);
        }
    }
}

/// Interpolate the 2x2 neighbourhood around `(x, y)` into `out`.
///
/// Coordinates outside `[0, w) x [0, h)` (or NaN) give zero. On the last
/// column or row the missing neighbour is the edge pixel itself.
fn sample_bilinear(src: &Image<'_>, x: f64, y: f64, out: &mut [u8]) {
    let w = src.width() as usize;
    let h = src.height() as usize;
    let inside = x >= 0.0 && x < w as f64 && y >= 0.0 && y < h as f64;
    if !inside {
        out.fill(0);
        return;
    }

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);

    let fx = ((x - x0 as f64) * ONE as f64) as i64;
    let fy = ((y - y0 as f64) * ONE as f64) as i64;
    let w00 = ((ONE - fx) * (ONE - fy)) >> 16;
    let w10 = (fx * (ONE - fy)) >> 16;
    let w01 = ((ONE - fx) * fy) >> 16;
    let w11 = (fx * fy) >> 16;

    let p00 = src.pixel(x0, y0);
    let p10 = src.pixel(x1, y0);
    let p01 = src.pixel(x0, y1);
    let p11 = src.pixel(x1, y1);

    for (c, v) in out.iter_mut().enumerate() {
        let sum = i64::from(p00[c]) * w00
            + i64::from(p10[c]) * w10
            + i64::from(p01[c]) * w01
            + i64::from(p11[c]) * w11;
        *v = ((sum + HALF) >> 16).clamp(0, 255) as u8;
    }
}

/// Smallest `(width, height)` canvas that holds a `width x height` image
/// rotated by `angle_radians` without cropping a corner.
///
/// Angles that [`classify`] would snap to a quarter turn (with the default
/// threshold) give the exact swapped or unchanged size, so passing the result
/// straight to [`rotate`] takes the lossless path. Each side is at least 1.
pub fn rotated_bounds(width: u32, height: u32, angle_radians: f64) -> (u32, u32) {
    match snapped_quarter_turns(angle_radians, DEFAULT_SNAP_THRESHOLD_DEGREES) {
        Some(0 | 2) => return (width, height),
        Some(_) => return (height, width),
        None => {}
    }

    let (sin, cos) = angle_radians.sin_cos();
    let (w, h) = (f64::from(width), f64::from(height));
    let span = |along: f64, across: f64| {
        ((along * cos.abs() + across * sin.abs()).round() as u32).max(1)
    };
    (span(w, h), span(h, w))
}
