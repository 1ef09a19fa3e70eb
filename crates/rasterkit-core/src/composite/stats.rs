//! Whole-image reductions.

use crate::image::Image;

/// Largest channel count [`avg_color`] accumulates.
pub const AVG_COLOR_MAX_CHANNELS: usize = 8;

/// Per-channel mean of every pixel, truncated to 8 bits.
///
/// Averages raw encoded bytes (sRGB, not linear light). Sums are kept in
/// `u64`, so no realistic image can overflow them. An empty image yields
/// zeros.
pub fn avg_color(img: &Image<'_>) -> Vec<u8> {
    let nchan = img.channel_count();
    debug_assert!(nchan <= AVG_COLOR_MAX_CHANNELS);

    let mut sums = [0u64; AVG_COLOR_MAX_CHANNELS];
    for y in 0..img.height() as usize {
        for px in img.row(y).chunks_exact(nchan) {
            for (sum, &v) in sums.iter_mut().zip(px) {
                *sum += u64::from(v);
            }
        }
    }

    let count = img.pixel_count();
    if count == 0 {
        return vec![0; nchan];
    }
    sums[..nchan].iter().map(|&sum| (sum / count) as u8).collect()
}
