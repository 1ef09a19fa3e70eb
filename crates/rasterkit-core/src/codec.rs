//! Thin adapters over external codecs.
//!
//! Pixel decoding and encoding are done by the `image` crate and EXIF
//! parsing by `kamadak-exif`. This module only moves bytes between their
//! types and [`Image`].

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, GrayImage, ImageEncoder, ImageReader, RgbImage, RgbaImage};
use tracing::debug;

use crate::composite::{to_rgba, unpremultiply};
use crate::error::{RasterError, Result};
use crate::format::PixelFormat;
use crate::image::Image;
use crate::transform::unrotate_exif;

impl Image<'static> {
    /// Take over a decoded `image` crate buffer.
    ///
    /// 8-bit gray, RGB and RGBA move without copying. Anything else is
    /// converted: to RGBA if it has alpha, gray if it has no colour,
    /// otherwise RGB.
    pub fn from_dynamic(img: DynamicImage) -> Result<Self> {
        let (width, height) = (img.width(), img.height());
        let (format, pixels) = match img {
            DynamicImage::ImageLuma8(buf) => (PixelFormat::Gray, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (PixelFormat::Rgb, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (PixelFormat::Rgba, buf.into_raw()),
            other if other.color().has_alpha() => (PixelFormat::Rgba, other.into_rgba8().into_raw()),
            other if !other.color().has_color() => (PixelFormat::Gray, other.into_luma8().into_raw()),
            other => (PixelFormat::Rgb, other.into_rgb8().into_raw()),
        };
        Image::from_vec(width, height, format, pixels)
    }
}

impl Image<'_> {
    /// Copy into an `image` crate buffer.
    ///
    /// Gray and RGB keep their layout. Alpha formats become straight RGBA
    /// (premultiplied colour is divided back out). Other colour formats
    /// are reordered into RGB.
    ///
    /// # Errors
    ///
    /// [`RasterError::UnsupportedFormat`] for CMYK.
    pub fn to_dynamic(&self) -> Result<DynamicImage> {
        let (width, height) = self.dimensions();
        let format = self.format();
        let short = || RasterError::Codec(format!("pixel buffer does not cover {width}x{height}"));

        let dynamic = match format {
            PixelFormat::Gray => GrayImage::from_raw(width, height, self.clone_owned().into_vec())
                .map(DynamicImage::ImageLuma8),
            PixelFormat::Rgb => RgbImage::from_raw(width, height, self.clone_owned().into_vec())
                .map(DynamicImage::ImageRgb8),
            PixelFormat::Cmyk => {
                return Err(RasterError::UnsupportedFormat {
                    format,
                    operation: "to_dynamic",
                })
            }
            _ => {
                let mut rgba = to_rgba(self, 255)?;
                unpremultiply(&mut rgba);
                let rgba = RgbaImage::from_raw(width, height, rgba.into_vec()).ok_or_else(short)?;
                if format.has_alpha() {
                    Some(DynamicImage::ImageRgba8(rgba))
                } else {
                    Some(DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba).into_rgb8()))
                }
            }
        };
        dynamic.ok_or_else(short)
    }
}

/// Decode PNG, JPEG or TIFF bytes without applying EXIF orientation.
///
/// # Errors
///
/// [`RasterError::Codec`] if the bytes are not a supported image.
pub fn decode(bytes: &[u8]) -> Result<Image<'static>> {
    let img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| RasterError::Codec(e.to_string()))?
        .decode()
        .map_err(|e| RasterError::Codec(e.to_string()))?;

    debug!(
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "decoded image"
    );
    Image::from_dynamic(img)
}

/// Decode and rotate upright according to EXIF orientation 3, 6 or 8.
///
/// Other orientation codes (including mirrored ones) are left as stored.
pub fn decode_upright(bytes: &[u8]) -> Result<Image<'static>> {
    let image = decode(bytes)?;
    match read_orientation(bytes) {
        orientation @ (3 | 6 | 8) => {
            debug!(orientation, "undoing EXIF rotation");
            unrotate_exif(orientation, &image)
        }
        _ => Ok(image),
    }
}

/// Extract the EXIF orientation code from image bytes.
///
/// Returns 0 when there is no EXIF block, no orientation tag, or the tag
/// holds a value outside 1-8.
pub fn read_orientation(bytes: &[u8]) -> u16 {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .filter(|value| (1..=8).contains(value))
            .map_or(0, |value| value as u16),
        Err(_) => 0,
    }
}

/// Encode to baseline JPEG.
///
/// Gray is written as single-channel JPEG; every other format goes
/// through [`Image::to_dynamic`] and is written as RGB, so alpha is
/// dropped.
///
/// # Arguments
///
/// * `img` - Image to encode
/// * `quality` - JPEG quality (clamped to 1-100)
///
/// # Errors
///
/// - [`RasterError::InvalidDimensions`] for an empty image
/// - [`RasterError::UnsupportedFormat`] for CMYK
/// - [`RasterError::Codec`] if the encoder fails
pub fn encode_jpeg(img: &Image<'_>, quality: u8) -> Result<Vec<u8>> {
    if img.is_empty() {
        return Err(RasterError::InvalidDimensions {
            width: img.width(),
            height: img.height(),
        });
    }

    let (pixels, color) = match img.format() {
        PixelFormat::Gray => (img.clone_owned().into_vec(), ExtendedColorType::L8),
        _ => (img.to_dynamic()?.into_rgb8().into_raw(), ExtendedColorType::Rgb8),
    };

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(&pixels, img.width(), img.height(), color)
        .map_err(|e| RasterError::Codec(e.to_string()))?;
    Ok(buffer.into_inner())
}
