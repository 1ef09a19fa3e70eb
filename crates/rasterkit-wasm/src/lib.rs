//! Rasterkit WASM - WebAssembly bindings for rasterkit
//!
//! This crate exposes the rasterkit-core engine to JavaScript/TypeScript
//! applications. Every binding forwards to a core operation; errors surface
//! as thrown JavaScript `Error`s.
//!
//! # Module Structure
//!
//! - `types` - [`JsImage`], the JS-facing image wrapper
//! - `composite` - copy, format conversion, alpha, average colour
//! - `transform` - rotation and EXIF orientation
//! - `resize` - resampling and fit-within sizing
//! - `codec` - JPEG/PNG/TIFF decode and JPEG encode
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_upright, rotate, rotated_bounds } from '@rasterkit/wasm';
//!
//! await init();
//!
//! const image = decode_upright(new Uint8Array(await file.arrayBuffer()));
//! const angle = 5 * Math.PI / 180;
//! const [w, h] = rotated_bounds(image.width, image.height, angle);
//! const straightened = rotate(image, w, h, angle);
//! ```

use wasm_bindgen::prelude::*;

mod codec;
mod composite;
mod resize;
mod transform;
mod types;

pub use codec::{decode, decode_upright, encode_jpeg, read_orientation};
pub use composite::{
    avg_color, copy_rect, matte, premultiply, to_gray, to_rgb, to_rgba, unpremultiply,
};
pub use resize::{fit_within, resize, resize_with_params};
pub use transform::{rotate, rotate_with_params, rotated_bounds, unrotate_exif};
pub use types::JsImage;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
