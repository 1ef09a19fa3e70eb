//! The resampling kernel seam.
//!
//! Filter math is not implemented here. [`Resampler`] takes one channel at a
//! time as an `f32` plane and returns it at the new size; [`ImageResampler`]
//! does that with `image::imageops::resize`.

use image::imageops::FilterType;
use image::{ImageBuffer, Luma};
use serde::{Deserialize, Serialize};

use crate::error::{RasterError, Result};

/// Resampling filter kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResampleFilter {
    /// Nearest neighbour (fastest, blocky).
    Nearest,
    /// Linear tent.
    Triangle,
    /// Cubic with B=0, C=0.5 (sharp).
    CatmullRom,
    /// Cubic in the Mitchell-Netravali family.
    #[default]
    Mitchell,
    /// Gaussian (soft).
    Gaussian,
    /// Lanczos with a = 3 (sharpest, may ring).
    Lanczos3,
}

impl ResampleFilter {
    /// Convert to the image crate's FilterType.
    ///
    /// The image crate ships one cubic kernel, so `Mitchell` shares
    /// `CatmullRom`.
    pub fn to_image_filter(self) -> FilterType {
        match self {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom | ResampleFilter::Mitchell => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// What the kernel reads outside the source.
///
/// The mode is passed through to the [`Resampler`] unchanged. The bundled
/// [`ImageResampler`] only implements `Clamp` and fails with
/// [`RasterError::Resample`] for the others (see
/// [`ImageResampler::supports_edge`]); plug in another kernel through
/// [`resize_with`](super::resize_with) to use them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EdgeMode {
    /// Repeat the edge pixel.
    #[default]
    Clamp,
    /// Mirror about the edge.
    Reflect,
    /// Tile.
    Wrap,
    /// Treat as zero.
    Zero,
}

/// One channel of an image as normalised floats, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f32>,
}

impl Plane {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: Vec::with_capacity(width as usize * height as usize),
        }
    }
}

/// A resampling kernel.
pub trait Resampler {
    /// Resample `plane` to `width x height`.
    ///
    /// # Errors
    ///
    /// [`RasterError::Resample`] when the kernel cannot honour the request.
    fn resample(
        &self,
        plane: &Plane,
        width: u32,
        height: u32,
        filter: ResampleFilter,
        edge: EdgeMode,
    ) -> Result<Plane>;
}

/// [`Resampler`] backed by `image::imageops::resize`.
///
/// The image crate always clamps at the border, so only [`EdgeMode::Clamp`]
/// is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageResampler;

impl ImageResampler {
    /// Whether [`Resampler::resample`] accepts `edge`.
    pub fn supports_edge(edge: EdgeMode) -> bool {
        edge == EdgeMode::Clamp
    }
}

impl Resampler for ImageResampler {
    fn resample(
        &self,
        plane: &Plane,
        width: u32,
        height: u32,
        filter: ResampleFilter,
        edge: EdgeMode,
    ) -> Result<Plane> {
        if !Self::supports_edge(edge) {
            return Err(RasterError::Resample(format!(
                "edge mode {edge:?} is not supported by the image crate"
            )));
        }

        let buffer: ImageBuffer<Luma<f32>, Vec<f32>> =
            ImageBuffer::from_raw(plane.width, plane.height, plane.data.clone()).ok_or_else(|| {
                RasterError::Resample(format!(
                    "plane of {} samples does not cover {}x{}",
                    plane.data.len(),
                    plane.width,
                    plane.height
                ))
            })?;

        let resized = image::imageops::resize(&buffer, width, height, filter.to_image_filter());
        Ok(Plane {
            width,
            height,
            data: resized.into_raw(),
        })
    }
}
