//! How a pixel format looks to the resampler.

use crate::format::PixelFormat;

/// Pixel layout as the resampler needs to know it.
///
/// Alpha formats come in straight and premultiplied flavours because the
/// two need different handling around the filter. Getting this wrong does
/// not fail; it produces dark or coloured fringes along alpha edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResampleLayout {
    Gray,
    Rgb,
    Bgr,
    Rgbx,
    Bgrx,
    Xbgr,
    Xrgb,
    Cmyk,
    Rgba,
    RgbaPremultiplied,
    Bgra,
    BgraPremultiplied,
    Abgr,
    AbgrPremultiplied,
    Argb,
    ArgbPremultiplied,
}

/// What a channel carries, which decides its treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelRole {
    /// sRGB-encoded colour; linearised in linear-light mode.
    Color,
    /// Coverage; always filtered as a plain value.
    Alpha,
    /// Padding or ink; filtered as a plain value.
    Other,
}

impl ResampleLayout {
    /// Layout for a format and its premultiplied flag.
    ///
    /// The flag only matters for formats with alpha.
    pub fn for_image(format: PixelFormat, premultiplied: bool) -> Self {
        use ResampleLayout as L;
        match (format, premultiplied) {
            (PixelFormat::Gray, _) => L::Gray,
            (PixelFormat::Rgb, _) => L::Rgb,
            (PixelFormat::Bgr, _) => L::Bgr,
            (PixelFormat::Rgbx, _) => L::Rgbx,
            (PixelFormat::Bgrx, _) => L::Bgrx,
            (PixelFormat::Xbgr, _) => L::Xbgr,
            (PixelFormat::Xrgb, _) => L::Xrgb,
            (PixelFormat::Cmyk, _) => L::Cmyk,
            (PixelFormat::Rgba, false) => L::Rgba,
            (PixelFormat::Rgba, true) => L::RgbaPremultiplied,
            (PixelFormat::Bgra, false) => L::Bgra,
            (PixelFormat::Bgra, true) => L::BgraPremultiplied,
            (PixelFormat::Abgr, false) => L::Abgr,
            (PixelFormat::Abgr, true) => L::AbgrPremultiplied,
            (PixelFormat::Argb, false) => L::Argb,
            (PixelFormat::Argb, true) => L::ArgbPremultiplied,
        }
    }

    pub fn channel_count(self) -> usize {
        match self {
            ResampleLayout::Gray => 1,
            ResampleLayout::Rgb | ResampleLayout::Bgr => 3,
            _ => 4,
        }
    }

    /// Index of the alpha channel, if the layout has one.
    pub fn alpha_index(self) -> Option<usize> {
        use ResampleLayout as L;
        match self {
            L::Rgba | L::RgbaPremultiplied | L::Bgra | L::BgraPremultiplied => Some(3),
            L::Abgr | L::AbgrPremultiplied | L::Argb | L::ArgbPremultiplied => Some(0),
            _ => None,
        }
    }

    pub fn is_premultiplied(self) -> bool {
        use ResampleLayout as L;
        matches!(
            self,
            L::RgbaPremultiplied | L::BgraPremultiplied | L::AbgrPremultiplied | L::ArgbPremultiplied
        )
    }

    /// Role of channel `index` within a pixel.
    pub fn channel_role(self, index: usize) -> ChannelRole {
        use ResampleLayout as L;
        if self.alpha_index() == Some(index) {
            return ChannelRole::Alpha;
        }
        match (self, index) {
            (L::Cmyk, _) => ChannelRole::Other,
            (L::Rgbx | L::Bgrx, 3) => ChannelRole::Other,
            (L::Xbgr | L::Xrgb, 0) => ChannelRole::Other,
            _ => ChannelRole::Color,
        }
    }
}
