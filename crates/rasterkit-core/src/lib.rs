//! Rasterkit Core - 8-bit raster image engine
//!
//! This crate provides in-memory pixel operations on interleaved 8-bit
//! images: region copy, format conversion, alpha compositing, rotation with
//! exact quarter-turn fast paths, EXIF orientation undo, and resize
//! dispatch onto a pluggable resampling kernel.
//!
//! Images either own their bytes or wrap a caller's buffer without copying;
//! see [`Image`]. Operations never allocate behind the caller's back except
//! where they return a new image.

pub mod codec;
pub mod composite;
pub mod error;
pub mod format;
pub mod image;
pub mod resize;
pub mod transform;

pub use composite::{
    avg_color, copy_image, copy_rect, matte, premultiply, to_gray, to_rgb, to_rgba, unpremultiply,
};
pub use error::{RasterError, Result};
pub use format::PixelFormat;
pub use image::{required_len, Image, PixelBuf, Rect};
pub use resize::{
    fit_within, resize, resize_new, resize_with, EdgeMode, ResampleFilter, ResizeParams,
};
pub use transform::{
    rotate, rotated_bounds, unrotate_exif, Orientation, RotateParams, RotationClass,
};
