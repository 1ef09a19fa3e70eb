//! WASM bindings for rotation and EXIF orientation.

use crate::types::{js_error, params_from_js, JsImage};
use rasterkit_core::transform::{self, RotateParams};
use wasm_bindgen::prelude::*;

/// Rotate an image about its centre into a `dst_width x dst_height` canvas.
///
/// Quarter turns into a transposed canvas (and half turns into a same-size
/// one) are exact; other angles are interpolated bilinearly with zero fill.
///
/// # Arguments
///
/// * `image` - Source image
/// * `dst_width`, `dst_height` - Output canvas size
/// * `angle_radians` - Rotation angle (positive = clockwise)
///
/// # Example (TypeScript)
///
/// ```typescript
/// const [w, h] = rotated_bounds(img.width, img.height, angle);
/// const rotated = rotate(img, w, h, angle);
/// ```
#[wasm_bindgen]
pub fn rotate(
    image: &JsImage,
    dst_width: u32,
    dst_height: u32,
    angle_radians: f64,
) -> Result<JsImage, JsValue> {
    rotate_impl(image, dst_width, dst_height, angle_radians, &RotateParams::default())
}

/// [`rotate`] with a params object, e.g. `{ snap_threshold_degrees: 0.5 }`.
///
/// Missing fields take their defaults; `undefined` means all defaults.
#[wasm_bindgen]
pub fn rotate_with_params(
    image: &JsImage,
    dst_width: u32,
    dst_height: u32,
    angle_radians: f64,
    params: JsValue,
) -> Result<JsImage, JsValue> {
    let params: RotateParams = params_from_js(params)?;
    rotate_impl(image, dst_width, dst_height, angle_radians, &params)
}

fn rotate_impl(
    image: &JsImage,
    dst_width: u32,
    dst_height: u32,
    angle_radians: f64,
    params: &RotateParams,
) -> Result<JsImage, JsValue> {
    let mut dst = image.blank_like(dst_width, dst_height)?;
    transform::rotate(image.image(), &mut dst, angle_radians, Some(params)).map_err(js_error)?;
    Ok(JsImage::from_image(dst))
}

/// Bounding box `[width, height]` of an image rotated by `angle_radians`.
#[wasm_bindgen]
pub fn rotated_bounds(width: u32, height: u32, angle_radians: f64) -> Vec<u32> {
    let (w, h) = transform::rotated_bounds(width, height, angle_radians);
    vec![w, h]
}

/// Rewrite pixels so EXIF orientation 3, 6 or 8 becomes upright.
///
/// Other codes throw.
#[wasm_bindgen]
pub fn unrotate_exif(image: &JsImage, orientation: u16) -> Result<JsImage, JsValue> {
    transform::unrotate_exif(orientation, image.image())
        .map(JsImage::from_image)
        .map_err(js_error)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_unrotate_exif_rejects_mirrored() {
        let img = JsImage::new(1, 1, 6, vec![0]).unwrap();
        assert!(unrotate_exif(&img, 2).is_err());
    }

    #[wasm_bindgen_test]
    fn test_rotate_oversized_canvas_throws() {
        let img = JsImage::new(1, 1, 6, vec![0]).unwrap();
        assert!(rotate(&img, u32::MAX, u32::MAX, 0.5).is_err());
    }

    #[wasm_bindgen_test]
    fn test_rotate_with_params_object() {
        let img = JsImage::new(3, 2, 6, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let obj = js_sys::Object::new();
        js_sys::Reflect::set(&obj, &"snap_threshold_degrees".into(), &JsValue::from_f64(1.0)).unwrap();
        // 90.5 degrees snaps with a 1 degree threshold
        let rotated = rotate_with_params(&img, 2, 3, 90.5f64.to_radians(), obj.into()).unwrap();
        assert_eq!(rotated.pixels(), vec![4, 1, 5, 2, 6, 3]);
    }
}
