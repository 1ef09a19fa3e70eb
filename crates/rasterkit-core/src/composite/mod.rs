//! Pixel compositing primitives.
//!
//! - [`copy_rect`] / [`copy_image`]: clipped rectangular copy
//! - [`to_rgb`], [`to_gray`], [`to_rgba`]: channel-format conversion
//! - [`matte`], [`premultiply`], [`unpremultiply`]: alpha handling
//! - [`avg_color`]: per-channel mean
//!
//! Every primitive walks rows independently and honours row stride, so
//! padded and wrapped buffers work the same as packed ones.

mod alpha;
mod convert;
mod copy;
mod stats;

pub use alpha::{matte, premultiply, unpremultiply};
pub use convert::{to_gray, to_rgb, to_rgba};
pub use copy::{copy_image, copy_rect};
pub use stats::{avg_color, AVG_COLOR_MAX_CHANNELS};
