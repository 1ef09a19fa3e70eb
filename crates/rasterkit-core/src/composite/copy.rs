//! Clipped rectangular copy between images.

use tracing::trace;

use crate::error::{RasterError, Result};
use crate::image::{Image, Rect};

/// Copy `src_rect` of `src` into `dst` with its top-left corner at
/// `(dst_x, dst_y)`.
///
/// Clipping rules:
/// - `src_rect` is intersected with the source bounds
/// - the destination origin is clamped to `[0, dst.width] x [0, dst.height]`
/// - the copied extent is the smaller of the clipped source extent and the
///   room left in the destination
///
/// An empty overlap is a successful no-op.
///
/// Rows are copied byte for byte. Formats only need the same channel
/// count, so copying RGB into BGR swaps red and blue; reordering is the
/// caller's business.
///
/// # Errors
///
/// [`RasterError::ChannelMismatch`] if the channel counts differ. Nothing is
/// written in that case.
pub fn copy_rect(
    dst: &mut Image<'_>,
    src: &Image<'_>,
    src_rect: Rect,
    dst_x: i32,
    dst_y: i32,
) -> Result<()> {
    let nchan = src.channel_count();
    if nchan != dst.channel_count() {
        return Err(RasterError::ChannelMismatch {
            src: nchan,
            dst: dst.channel_count(),
        });
    }

    let src_x1 = i64::from(src_rect.x).max(0);
    let src_y1 = i64::from(src_rect.y).max(0);
    let src_x2 = (i64::from(src_rect.x) + i64::from(src_rect.width)).min(i64::from(src.width()));
    let src_y2 = (i64::from(src_rect.y) + i64::from(src_rect.height)).min(i64::from(src.height()));
    let dst_x1 = i64::from(dst_x).clamp(0, i64::from(dst.width()));
    let dst_y1 = i64::from(dst_y).clamp(0, i64::from(dst.height()));

    let w = (src_x2 - src_x1).min(i64::from(dst.width()) - dst_x1);
    let h = (src_y2 - src_y1).min(i64::from(dst.height()) - dst_y1);
    if w <= 0 || h <= 0 {
        trace!(?src_rect, dst_x, dst_y, "copy_rect: empty overlap");
        return Ok(());
    }

    let bytes = w as usize * nchan;
    let src_offset = src_x1 as usize * nchan;
    let dst_offset = dst_x1 as usize * nchan;
    for row in 0..h as usize {
        let from = &src.row(src_y1 as usize + row)[src_offset..src_offset + bytes];
        dst.row_mut(dst_y1 as usize + row)[dst_offset..dst_offset + bytes].copy_from_slice(from);
    }
    Ok(())
}

/// Copy all of `src` into `dst` at `(dst_x, dst_y)`, clipped.
pub fn copy_image(dst: &mut Image<'_>, src: &Image<'_>, dst_x: i32, dst_y: i32) -> Result<()> {
    copy_rect(dst, src, Rect::of(src), dst_x, dst_y)
}
