//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core
//! rasterkit types, handling the conversion between Rust and JavaScript
//! data representations.

use std::fmt::Display;

use rasterkit_core::{Image, PixelFormat, ResampleFilter};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

/// An image wrapper for JavaScript.
///
/// Holds an owned, tightly packed core [`Image`]. The pixel format is
/// exchanged as its numeric code:
///
/// | code | format | code | format |
/// |------|--------|------|--------|
/// | 0    | RGB    | 6    | GRAY   |
/// | 1    | BGR    | 7    | RGBA   |
/// | 2    | RGBX   | 8    | BGRA   |
/// | 3    | BGRX   | 9    | ABGR   |
/// | 4    | XBGR   | 10   | ARGB   |
/// | 5    | XRGB   | 11   | CMYK   |
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy
/// is made to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsImage {
    inner: Image<'static>,
}

#[wasm_bindgen]
impl JsImage {
    /// Create an image from tightly packed pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `format` - Pixel format code (see type docs)
    /// * `pixels` - Row-major pixel bytes
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, format: u8, pixels: Vec<u8>) -> Result<JsImage, JsValue> {
        let format = PixelFormat::try_from(format).map_err(js_error)?;
        Image::from_vec(width, height, format, pixels)
            .map(JsImage::from_image)
            .map_err(js_error)
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Pixel format code
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> u8 {
        self.inner.format().code()
    }

    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> usize {
        self.inner.channel_count()
    }

    /// Whether colour channels are premultiplied by alpha
    #[wasm_bindgen(getter)]
    pub fn premultiplied(&self) -> bool {
        self.inner.is_premultiplied()
    }

    #[wasm_bindgen(setter)]
    pub fn set_premultiplied(&mut self, premultiplied: bool) {
        self.inner.set_premultiplied(premultiplied);
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels().len()
    }

    /// Returns pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }
}

impl JsImage {
    pub(crate) fn from_image(image: Image<'static>) -> Self {
        Self { inner: image }
    }

    pub(crate) fn image(&self) -> &Image<'static> {
        &self.inner
    }

    pub(crate) fn image_mut(&mut self) -> &mut Image<'static> {
        &mut self.inner
    }

    /// A zeroed image with this one's format and premultiplied flag.
    ///
    /// Throws if `width x height` pixels do not fit in memory.
    pub(crate) fn blank_like(&self, width: u32, height: u32) -> Result<Image<'static>, JsValue> {
        Image::new(width, height, self.inner.format())
            .map(|img| img.with_premultiplied(self.inner.is_premultiplied()))
            .map_err(js_error)
    }
}

/// Convert a core error into a JavaScript `Error`.
pub(crate) fn js_error(err: impl Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Deserialize a params object, using defaults for `undefined` or `null`.
pub(crate) fn params_from_js<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(js_error)
}

/// Convert a u8 filter value to the core ResampleFilter enum.
///
/// Values:
/// - 0 = Nearest
/// - 1 = Triangle
/// - 2 = CatmullRom
/// - 3 = Mitchell
/// - 4 = Gaussian
/// - 5 = Lanczos3
///
/// Any other value defaults to Mitchell.
pub(crate) fn filter_from_u8(value: u8) -> ResampleFilter {
    match value {
        0 => ResampleFilter::Nearest,
        1 => ResampleFilter::Triangle,
        2 => ResampleFilter::CatmullRom,
        4 => ResampleFilter::Gaussian,
        5 => ResampleFilter::Lanczos3,
        _ => ResampleFilter::Mitchell,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_image_creation() {
        let img = JsImage::new(100, 50, 7, vec![0u8; 100 * 50 * 4]).unwrap();
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.format(), 7);
        assert_eq!(img.channels(), 4);
        assert_eq!(img.byte_length(), 20000);
        assert!(!img.premultiplied());
    }

    #[test]
    fn test_js_image_pixels() {
        let pixels = vec![255u8, 128, 64, 32, 16, 8];
        let img = JsImage::new(2, 1, 1, pixels.clone()).unwrap();
        assert_eq!(img.pixels(), pixels);
        assert_eq!(img.image().format(), PixelFormat::Bgr);
    }

    #[test]
    fn test_set_premultiplied() {
        let mut img = JsImage::new(1, 1, 8, vec![1, 2, 3, 4]).unwrap();
        img.set_premultiplied(true);
        assert!(img.premultiplied());
        assert!(img.blank_like(3, 3).unwrap().is_premultiplied());
    }

    #[test]
    fn test_blank_like() {
        let img = JsImage::new(1, 1, 6, vec![9]).unwrap();
        let blank = img.blank_like(4, 2).unwrap();
        assert_eq!(blank.dimensions(), (4, 2));
        assert_eq!(blank.format(), PixelFormat::Gray);
        assert!(blank.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_filter_from_u8() {
        assert_eq!(filter_from_u8(0), ResampleFilter::Nearest);
        assert_eq!(filter_from_u8(1), ResampleFilter::Triangle);
        assert_eq!(filter_from_u8(3), ResampleFilter::Mitchell);
        assert_eq!(filter_from_u8(5), ResampleFilter::Lanczos3);
        // Unknown values default to Mitchell
        assert_eq!(filter_from_u8(6), ResampleFilter::Mitchell);
        assert_eq!(filter_from_u8(255), ResampleFilter::Mitchell);
    }
}
