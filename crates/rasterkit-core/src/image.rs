//! The raster image entity.
//!
//! An [`Image`] is a rectangle of 8-bit pixels described by width, height,
//! row stride and [`PixelFormat`]. Its bytes either belong to the image
//! ([`PixelBuf::Owned`]) or to the caller ([`PixelBuf::Borrowed`]); the
//! lifetime parameter ties a borrowed image to the storage it wraps, so a
//! view can never outlive its owner.
//!
//! # Memory Layout
//!
//! ```text
//! pixels[y * stride + x * channel_count + c]
//! ```
//!
//! `stride >= width * channel_count`; any bytes past the end of a row are
//! padding and are never read or written by the engine.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::error::{RasterError, Result};
use crate::format::PixelFormat;

/// Backing storage of an [`Image`].
pub enum PixelBuf<'a> {
    /// Bytes allocated and owned by the image.
    Owned(Vec<u8>),
    /// Caller-supplied bytes. The engine never resizes these.
    Borrowed(&'a mut [u8]),
}

impl Deref for PixelBuf<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            PixelBuf::Owned(v) => v,
            PixelBuf::Borrowed(s) => s,
        }
    }
}

impl DerefMut for PixelBuf<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        match self {
            PixelBuf::Owned(v) => v,
            PixelBuf::Borrowed(s) => s,
        }
    }
}

/// Axis-aligned pixel rectangle.
///
/// The origin is signed so callers can describe regions that hang off the
/// top or left edge of an image; every operation clips before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The full extent of an image.
    pub fn of(image: &Image<'_>) -> Self {
        Self::new(0, 0, image.width(), image.height())
    }

    /// Intersect with `[0, width) x [0, height)`.
    ///
    /// Returns `(x, y, w, h)` of the overlap, or `None` if it is empty.
    pub fn clip(&self, width: u32, height: u32) -> Option<(usize, usize, usize, usize)> {
        let x1 = i64::from(self.x).max(0);
        let y1 = i64::from(self.y).max(0);
        let x2 = (i64::from(self.x) + i64::from(self.width)).min(i64::from(width));
        let y2 = (i64::from(self.y) + i64::from(self.height)).min(i64::from(height));
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some((
            x1 as usize,
            y1 as usize,
            (x2 - x1) as usize,
            (y2 - y1) as usize,
        ))
    }
}

/// Minimum number of bytes a buffer needs to hold an image.
///
/// The last row only has to reach the end of its final pixel, which is what
/// lets a cropped view share its parent's stride. `None` when the size does
/// not fit in `usize`.
pub fn required_len(width: u32, height: u32, stride: usize, channel_count: usize) -> Option<usize> {
    if width == 0 || height == 0 {
        return Some(0);
    }
    let last_row = (width as usize).checked_mul(channel_count)?;
    stride
        .checked_mul(height as usize - 1)?
        .checked_add(last_row)
}

/// Stride and total length of a tightly packed image.
fn packed_size(width: u32, height: u32, format: PixelFormat) -> Result<(usize, usize)> {
    (width as usize)
        .checked_mul(format.channel_count())
        .and_then(|stride| Some((stride, stride.checked_mul(height as usize)?)))
        .ok_or(RasterError::InvalidDimensions { width, height })
}

/// An 8-bit raster image over owned or borrowed bytes.
pub struct Image<'a> {
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    premultiplied: bool,
    buf: PixelBuf<'a>,
}

impl Image<'static> {
    /// Allocate a zeroed, tightly packed image.
    ///
    /// # Errors
    ///
    /// [`RasterError::InvalidDimensions`] if the byte size overflows `usize`.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let (stride, len) = packed_size(width, height, format)?;
        Ok(Self {
            width,
            height,
            stride,
            format,
            premultiplied: false,
            buf: PixelBuf::Owned(vec![0u8; len]),
        })
    }

    /// Take ownership of tightly packed pixel bytes.
    pub fn from_vec(width: u32, height: u32, format: PixelFormat, pixels: Vec<u8>) -> Result<Self> {
        let (stride, needed) = packed_size(width, height, format)?;
        if pixels.len() < needed {
            return Err(RasterError::BufferTooSmall {
                needed,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            stride,
            format,
            premultiplied: false,
            buf: PixelBuf::Owned(pixels),
        })
    }
}

impl<'a> Image<'a> {
    /// Wrap caller bytes as a tightly packed image without copying.
    pub fn wrap(width: u32, height: u32, format: PixelFormat, pixels: &'a mut [u8]) -> Result<Self> {
        let (stride, _) = packed_size(width, height, format)?;
        Self::wrap_strided(width, height, format, pixels, stride)
    }

    /// Wrap caller bytes with an explicit row stride, without copying.
    pub fn wrap_strided(
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: &'a mut [u8],
        stride: usize,
    ) -> Result<Self> {
        let nchan = format.channel_count();
        let overflow = || RasterError::InvalidDimensions { width, height };
        let min = (width as usize).checked_mul(nchan).ok_or_else(overflow)?;
        if stride < min {
            return Err(RasterError::InvalidStride { stride, min });
        }
        let needed = required_len(width, height, stride, nchan).ok_or_else(overflow)?;
        if pixels.len() < needed {
            return Err(RasterError::BufferTooSmall {
                needed,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            stride,
            format,
            premultiplied: false,
            buf: PixelBuf::Borrowed(pixels),
        })
    }

    /// Mark the colour channels as (not) premultiplied by alpha.
    ///
    /// Builder form of [`set_premultiplied`](Self::set_premultiplied).
    pub fn with_premultiplied(mut self, premultiplied: bool) -> Self {
        self.premultiplied = premultiplied;
        self
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row, including padding.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub fn channel_count(&self) -> usize {
        self.format.channel_count()
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn is_premultiplied(&self) -> bool {
        self.premultiplied
    }

    /// Record whether the colour channels are premultiplied.
    ///
    /// The engine trusts this flag; it is the caller's job to keep it true.
    pub fn set_premultiplied(&mut self, premultiplied: bool) {
        self.premultiplied = premultiplied;
    }

    /// Whether the bytes belong to this image rather than a caller.
    pub fn is_owned(&self) -> bool {
        matches!(self.buf, PixelBuf::Owned(_))
    }

    /// Number of pixels (`width * height`).
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Bytes covered by one row of pixels, without padding.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channel_count()
    }

    /// The whole backing buffer, padding included.
    pub fn pixels(&self) -> &[u8] {
        &self.buf
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// Pixel bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.buf[start..start + self.row_len()]
    }

    /// Mutable pixel bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        let len = self.row_len();
        &mut self.buf[start..start + len]
    }

    /// Channel bytes of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the image.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let nchan = self.channel_count();
        let start = y * self.stride + x * nchan;
        &self.buf[start..start + nchan]
    }

    /// A borrowed view of `rect` (clipped to this image) that shares storage.
    ///
    /// Writes through the view land in this image's buffer. An empty
    /// intersection yields a 0x0 view.
    pub fn sub_image_mut(&mut self, rect: Rect) -> Image<'_> {
        let nchan = self.channel_count();
        let (x, y, w, h) = rect.clip(self.width, self.height).unwrap_or((0, 0, 0, 0));
        let start = y * self.stride + x * nchan;
        // Bounded by the parent's buffer, which was size-checked on creation.
        let len = if w == 0 || h == 0 { 0 } else { (h - 1) * self.stride + w * nchan };
        Image {
            width: w as u32,
            height: h as u32,
            stride: self.stride,
            format: self.format,
            premultiplied: self.premultiplied,
            buf: PixelBuf::Borrowed(&mut self.buf[start..start + len]),
        }
    }

    /// Deep copy into a new, tightly packed, owned image.
    pub fn clone_owned(&self) -> Image<'static> {
        let row_len = self.row_len();
        Image {
            width: self.width,
            height: self.height,
            stride: row_len,
            format: self.format,
            premultiplied: self.premultiplied,
            buf: PixelBuf::Owned(pack_rows(&self.buf, self.stride, row_len, self.height as usize)),
        }
    }

    /// Consume the image, returning tightly packed pixel bytes.
    ///
    /// Owned, unpadded buffers are returned without copying.
    pub fn into_vec(self) -> Vec<u8> {
        let row_len = self.row_len();
        let len = row_len * self.height as usize;
        match self.buf {
            PixelBuf::Owned(mut v) if self.stride == row_len => {
                v.truncate(len);
                v
            }
            PixelBuf::Owned(v) => pack_rows(&v, self.stride, row_len, self.height as usize),
            PixelBuf::Borrowed(s) => pack_rows(s, self.stride, row_len, self.height as usize),
        }
    }
}

fn pack_rows(buf: &[u8], stride: usize, row_len: usize, height: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(row_len * height);
    for y in 0..height {
        let start = y * stride;
        out.extend_from_slice(&buf[start..start + row_len]);
    }
    out
}

impl Clone for Image<'_> {
    fn clone(&self) -> Self {
        self.clone_owned()
    }
}

impl fmt::Debug for Image<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("format", &self.format)
            .field("premultiplied", &self.premultiplied)
            .field("owned", &self.is_owned())
            .field("len", &self.buf.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: u32, height: u32, format: PixelFormat) -> Image<'static> {
        let len = width as usize * height as usize * format.channel_count();
        let pixels = (0..len).map(|i| (i % 251) as u8).collect();
        Image::from_vec(width, height, format, pixels).unwrap()
    }

    #[test]
    fn test_new_is_zeroed_and_packed() {
        let img = Image::new(4, 3, PixelFormat::Rgba).unwrap();
        assert_eq!(img.stride(), 16);
        assert_eq!(img.pixels().len(), 48);
        assert!(img.pixels().iter().all(|&b| b == 0));
        assert!(img.is_owned());
        assert!(!img.is_premultiplied());
    }

    #[test]
    fn test_from_vec_too_small() {
        let err = Image::from_vec(4, 4, PixelFormat::Rgb, vec![0; 47]).unwrap_err();
        assert_eq!(
            err,
            RasterError::BufferTooSmall {
                needed: 48,
                actual: 47
            }
        );
    }

    #[test]
    fn test_wrap_does_not_copy() {
        let mut bytes = vec![0u8; 12];
        {
            let mut img = Image::wrap(2, 2, PixelFormat::Rgb, &mut bytes).unwrap();
            assert!(!img.is_owned());
            img.row_mut(1)[0] = 99;
        }
        assert_eq!(bytes[6], 99);
    }

    #[test]
    fn test_wrap_strided_validation() {
        let mut bytes = vec![0u8; 64];
        let err = Image::wrap_strided(4, 2, PixelFormat::Rgb, &mut bytes, 11).unwrap_err();
        assert_eq!(err, RasterError::InvalidStride { stride: 11, min: 12 });

        let mut short = vec![0u8; 20];
        let err = Image::wrap_strided(4, 2, PixelFormat::Rgb, &mut short, 16).unwrap_err();
        assert_eq!(
            err,
            RasterError::BufferTooSmall {
                needed: 28,
                actual: 20
            }
        );
    }

    #[test]
    fn test_row_skips_padding() {
        let mut bytes: Vec<u8> = (0..20).collect();
        let img = Image::wrap_strided(2, 2, PixelFormat::Rgb, &mut bytes, 10).unwrap();
        assert_eq!(img.row(0), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(img.row(1), &[10, 11, 12, 13, 14, 15]);
        assert_eq!(img.pixel(1, 1), &[13, 14, 15]);
    }

    #[test]
    fn test_clone_owned_is_deep_and_packed() {
        let mut bytes: Vec<u8> = (0..20).collect();
        let img = Image::wrap_strided(2, 2, PixelFormat::Rgb, &mut bytes, 10)
            .unwrap()
            .with_premultiplied(true);
        let copy = img.clone_owned();
        assert!(copy.is_owned());
        assert!(copy.is_premultiplied());
        assert_eq!(copy.stride(), 6);
        assert_eq!(copy.pixels(), &[0, 1, 2, 3, 4, 5, 10, 11, 12, 13, 14, 15]);
    }

    #[test]
    fn test_sub_image_shares_storage() {
        let mut img = Image::new(4, 4, PixelFormat::Gray).unwrap();
        {
            let mut view = img.sub_image_mut(Rect::new(1, 2, 2, 2));
            assert_eq!(view.dimensions(), (2, 2));
            assert_eq!(view.stride(), 4);
            view.row_mut(0).fill(7);
            view.row_mut(1).fill(9);
        }
        assert_eq!(img.row(2), &[0, 7, 7, 0]);
        assert_eq!(img.row(3), &[0, 9, 9, 0]);
    }

    #[test]
    fn test_sub_image_clips() {
        let mut img = Image::new(4, 4, PixelFormat::Rgb).unwrap();
        let view = img.sub_image_mut(Rect::new(-2, 3, 10, 10));
        assert_eq!(view.dimensions(), (4, 1));

        let empty = img.sub_image_mut(Rect::new(10, 10, 2, 2));
        assert!(empty.is_empty());
    }

    #[test]
    fn test_into_vec_packs_rows() {
        let mut bytes: Vec<u8> = (0..8).collect();
        let img = Image::wrap_strided(3, 2, PixelFormat::Gray, &mut bytes, 4).unwrap();
        assert_eq!(img.into_vec(), vec![0, 1, 2, 4, 5, 6]);

        let owned = numbered(2, 2, PixelFormat::Rgba);
        let expected = owned.pixels().to_vec();
        assert_eq!(owned.into_vec(), expected);
    }

    #[test]
    fn test_rect_clip() {
        assert_eq!(Rect::new(-1, -1, 3, 3).clip(4, 4), Some((0, 0, 2, 2)));
        assert_eq!(Rect::new(3, 3, 3, 3).clip(4, 4), Some((3, 3, 1, 1)));
        assert_eq!(Rect::new(4, 0, 3, 3).clip(4, 4), None);
        assert_eq!(Rect::new(-5, 0, 5, 3).clip(4, 4), None);
    }

    #[test]
    fn test_required_len() {
        assert_eq!(required_len(0, 5, 12, 3), Some(0));
        assert_eq!(required_len(4, 1, 16, 3), Some(12));
        assert_eq!(required_len(4, 3, 16, 3), Some(44));
        assert_eq!(required_len(2, u32::MAX, usize::MAX / 2, 4), None);
    }

    #[test]
    fn test_oversized_dimensions_are_rejected() {
        let huge = RasterError::InvalidDimensions {
            width: u32::MAX,
            height: u32::MAX,
        };
        // u32::MAX^2 * 4 bytes does not fit in a 64-bit usize either
        assert_eq!(Image::new(u32::MAX, u32::MAX, PixelFormat::Rgba).unwrap_err(), huge);
        assert_eq!(
            Image::from_vec(u32::MAX, u32::MAX, PixelFormat::Rgba, vec![]).unwrap_err(),
            huge
        );

        let mut bytes = vec![0u8; 16];
        assert_eq!(
            Image::wrap(u32::MAX, u32::MAX, PixelFormat::Rgba, &mut bytes).unwrap_err(),
            huge
        );
        let err = Image::wrap_strided(1, u32::MAX, PixelFormat::Gray, &mut bytes, usize::MAX / 2)
            .unwrap_err();
        assert_eq!(
            err,
            RasterError::InvalidDimensions {
                width: 1,
                height: u32::MAX
            }
        );
    }
}
