//! Geometric transforms: rotation and EXIF orientation.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downward
//! - Rotation angles are in radians, positive = clockwise
//! - The centre of a `w x h` image is `((w - 1) / 2, (h - 1) / 2)`

mod orient;
mod rotation;

pub use orient::{rotate180, rotate90_ccw, rotate90_cw, unrotate_exif, Orientation};
pub use rotation::{
    classify, rotate, rotated_bounds, RotateFilter, RotateParams, RotationClass,
    DEFAULT_SNAP_THRESHOLD_DEGREES,
};
