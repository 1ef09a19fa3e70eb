//! WASM bindings for the compositing primitives.
//!
//! In-place operations take `&mut JsImage`; conversions return a new image.

use crate::types::{js_error, JsImage};
use rasterkit_core::{composite, Rect};
use wasm_bindgen::prelude::*;

/// Copy `src`'s `(x, y, width, height)` region into `dst` at
/// `(dst_x, dst_y)`, clipped to both images.
///
/// Throws if the channel counts differ.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn copy_rect(
    dst: &mut JsImage,
    src: &JsImage,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    dst_x: i32,
    dst_y: i32,
) -> Result<(), JsValue> {
    composite::copy_rect(
        dst.image_mut(),
        src.image(),
        Rect::new(x, y, width, height),
        dst_x,
        dst_y,
    )
    .map_err(js_error)
}

/// Convert to 3-channel RGB. Throws for CMYK.
#[wasm_bindgen]
pub fn to_rgb(image: &JsImage) -> Result<JsImage, JsValue> {
    composite::to_rgb(image.image())
        .map(JsImage::from_image)
        .map_err(js_error)
}

/// Convert to 1-channel gray. Throws for CMYK.
#[wasm_bindgen]
pub fn to_gray(image: &JsImage) -> Result<JsImage, JsValue> {
    composite::to_gray(image.image())
        .map(JsImage::from_image)
        .map_err(js_error)
}

/// Convert to RGBA, filling alpha with `alpha` where the source has none.
#[wasm_bindgen]
pub fn to_rgba(image: &JsImage, alpha: u8) -> Result<JsImage, JsValue> {
    composite::to_rgba(image.image(), alpha)
        .map(JsImage::from_image)
        .map_err(js_error)
}

/// Blend onto a solid background in place; alpha becomes opaque.
#[wasm_bindgen]
pub fn matte(image: &mut JsImage, r: u8, g: u8, b: u8) -> Result<(), JsValue> {
    composite::matte(image.image_mut(), r, g, b).map_err(js_error)
}

#[wasm_bindgen]
pub fn premultiply(image: &mut JsImage) {
    composite::premultiply(image.image_mut());
}

#[wasm_bindgen]
pub fn unpremultiply(image: &mut JsImage) {
    composite::unpremultiply(image.image_mut());
}

/// Per-channel mean of all pixels.
#[wasm_bindgen]
pub fn avg_color(image: &JsImage) -> Vec<u8> {
    composite::avg_color(image.image())
}
