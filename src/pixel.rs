/// Image container formats this crate knows about.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Windows bitmap.
    Bmp,
}

impl ImageFormat {
    /// Sniff the format from leading magic bytes.
    pub fn detect(data: &[u8]) -> Option<Self> {
        match data {
            [b'B', b'M', ..] => Some(Self::Bmp),
            _ => None,
        }
    }

    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Bmp => "bmp",
        }
    }
}

/// Pixel memory layout of a decoded buffer.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// 3 channels, 8-bit BGR (24-bit BMP).
    Bgr8,
    /// 4 channels, 8-bit BGRA (32-bit BMP).
    Bgra8,
}

impl PixelLayout {
    /// Layout for a BMP bit depth, if supported.
    pub fn from_bit_count(bit_count: u16) -> Option<Self> {
        match bit_count {
            24 => Some(Self::Bgr8),
            32 => Some(Self::Bgra8),
            _ => None,
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Bgr8 => 3,
            Self::Bgra8 => 4,
        }
    }

    pub fn bit_count(&self) -> u16 {
        self.bytes_per_pixel() as u16 * 8
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::Bgra8)
    }
}

/// Vertical order of the stored rows, encoded by the sign of the BMP height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Positive height: first stored row is the bottom scanline.
    BottomUp,
    /// Negative height: first stored row is the top scanline.
    TopDown,
}

impl Orientation {
    pub fn from_height(height: i32) -> Self {
        if height < 0 {
            Self::TopDown
        } else {
            Self::BottomUp
        }
    }
}

/// A fill color in BMP channel order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bgra {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    /// Ignored when the target has no alpha channel.
    pub a: u8,
}

impl Bgra {
    pub const fn new(b: u8, g: u8, r: u8, a: u8) -> Self {
        Self { b, g, r, a }
    }

    pub const fn opaque(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r, a: 255 }
    }

    pub(crate) fn channels(&self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }
}

/// Typed pixels that can view a decoded buffer.
#[cfg(feature = "rgb")]
pub trait BmpPixel: Copy + sealed::Sealed {
    fn layout() -> PixelLayout;
}

#[cfg(feature = "rgb")]
mod sealed {
    pub trait Sealed {}
    impl Sealed for rgb::alt::BGR8 {}
    impl Sealed for rgb::alt::BGRA8 {}
}

#[cfg(feature = "rgb")]
impl BmpPixel for rgb::alt::BGR8 {
    fn layout() -> PixelLayout {
        PixelLayout::Bgr8
    }
}

#[cfg(feature = "rgb")]
impl BmpPixel for rgb::alt::BGRA8 {
    fn layout() -> PixelLayout {
        PixelLayout::Bgra8
    }
}
