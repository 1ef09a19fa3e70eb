//! WASM bindings for resizing.
//!
//! # Example
//!
//! ```typescript
//! import { resize, fit_within } from '@rasterkit/wasm';
//!
//! const [w, h] = fit_within(image.width, image.height, 256);
//! const thumb = resize(image, w, h, 1, true); // Triangle, cheap sRGB
//! ```

use crate::types::{filter_from_u8, js_error, params_from_js, JsImage};
use rasterkit_core::resize::{self as core_resize, ResizeParams};
use wasm_bindgen::prelude::*;

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - Source image
/// * `width`, `height` - Target size (both non-zero)
/// * `filter` - 0=Nearest, 1=Triangle, 2=CatmullRom, 3=Mitchell,
///   4=Gaussian, 5=Lanczos3
/// * `cheap_srgb` - Filter sRGB bytes directly instead of linear light
#[wasm_bindgen]
pub fn resize(
    image: &JsImage,
    width: u32,
    height: u32,
    filter: u8,
    cheap_srgb: bool,
) -> Result<JsImage, JsValue> {
    let params = ResizeParams {
        filter: filter_from_u8(filter),
        cheap_srgb_filter: cheap_srgb,
        ..ResizeParams::default()
    };
    resize_impl(image, width, height, &params)
}

/// [`resize`] with a params object, e.g.
/// `{ filter: "Lanczos3", edge: "Clamp", cheap_srgb_filter: false }`.
#[wasm_bindgen]
pub fn resize_with_params(
    image: &JsImage,
    width: u32,
    height: u32,
    params: JsValue,
) -> Result<JsImage, JsValue> {
    let params: ResizeParams = params_from_js(params)?;
    resize_impl(image, width, height, &params)
}

fn resize_impl(image: &JsImage, width: u32, height: u32, params: &ResizeParams) -> Result<JsImage, JsValue> {
    let mut dst = image.blank_like(width, height)?;
    core_resize::resize(image.image(), &mut dst, Some(params)).map_err(js_error)?;
    Ok(JsImage::from_image(dst))
}

/// Aspect-preserving `[width, height]` that fits within `max_edge`.
#[wasm_bindgen]
pub fn fit_within(width: u32, height: u32, max_edge: u32) -> Vec<u32> {
    let (w, h) = core_resize::fit_within(width, height, max_edge);
    vec![w, h]
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_resize_zero_target_throws() {
        let img = JsImage::new(2, 2, 6, vec![0; 4]).unwrap();
        assert!(resize(&img, 0, 2, 3, false).is_err());
    }

    #[wasm_bindgen_test]
    fn test_resize_oversized_target_throws() {
        let img = JsImage::new(1, 1, 7, vec![0; 4]).unwrap();
        assert!(resize(&img, u32::MAX, u32::MAX, 1, false).is_err());
    }

    #[wasm_bindgen_test]
    fn test_resize_with_params_wrap_edge_throws() {
        let img = JsImage::new(2, 2, 6, vec![0; 4]).unwrap();
        let obj = js_sys::Object::new();
        js_sys::Reflect::set(&obj, &"edge".into(), &"Wrap".into()).unwrap();
        assert!(resize_with_params(&img, 4, 4, obj.into()).is_err());
    }

    #[wasm_bindgen_test]
    fn test_resize_with_params_undefined() {
        let img = JsImage::new(2, 2, 6, vec![50; 4]).unwrap();
        let out = resize_with_params(&img, 1, 1, JsValue::UNDEFINED).unwrap();
        assert_eq!(out.pixels(), vec![50]);
    }
}
