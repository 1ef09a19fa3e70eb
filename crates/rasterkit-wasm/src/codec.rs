//! Image decoding and encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_upright(bytes);
//! const jpeg = encode_jpeg(image, 90);
//! ```

use crate::types::{js_error, JsImage};
use rasterkit_core::codec;
use wasm_bindgen::prelude::*;

/// Decode PNG, JPEG or TIFF bytes as stored (EXIF orientation ignored).
#[wasm_bindgen]
pub fn decode(bytes: &[u8]) -> Result<JsImage, JsValue> {
    codec::decode(bytes).map(JsImage::from_image).map_err(js_error)
}

/// Decode and rotate upright for EXIF orientation 3, 6 or 8.
#[wasm_bindgen]
pub fn decode_upright(bytes: &[u8]) -> Result<JsImage, JsValue> {
    codec::decode_upright(bytes)
        .map(JsImage::from_image)
        .map_err(js_error)
}

/// EXIF orientation code (1-8), or 0 when absent.
#[wasm_bindgen]
pub fn read_orientation(bytes: &[u8]) -> u16 {
    codec::read_orientation(bytes)
}

/// Encode to JPEG bytes.
///
/// # Arguments
///
/// * `image` - Image to encode; alpha is dropped
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 80-90: Good quality, recommended for most uses
/// * 60-80: Medium quality, acceptable for web/social media
/// * Below 60: Low quality, visible artifacts
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    codec::encode_jpeg(image.image(), quality).map_err(js_error)
}
