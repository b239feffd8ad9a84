use enough::StopReason;

/// Errors from BMP decoding, encoding and editing.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid BMP structure: {0}")]
    Format(#[from] FormatError),

    #[error("unsupported format variant: {0}")]
    UnsupportedFormat(String),

    #[error(
        "region does not fit in the image: {x},{y} {width}x{height} exceeds {image_width}x{image_height}"
    )]
    Bounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: crate::PixelLayout,
        actual: crate::PixelLayout,
    },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}

/// Structural problems found while validating BMP headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error("unrecognized file format: magic is {found:#06x}, expected \"BM\"")]
    BadMagic { found: u16 },

    #[error("32-bit image is missing bit mask information (info header size {info_size})")]
    MissingBitMasks { info_size: u32 },

    #[error(
        "unexpected color mask format {red:#010x}/{green:#010x}/{blue:#010x}/{alpha:#010x}, expected BGRA"
    )]
    ColorMaskMismatch {
        red: u32,
        green: u32,
        blue: u32,
        alpha: u32,
    },

    #[error("unexpected color space type {found:#010x}, expected sRGB")]
    ColorSpaceMismatch { found: u32 },

    #[error("info header size {size} is smaller than BITMAPINFOHEADER")]
    BadInfoSize { size: u32 },

    #[error("pixel data offset {offset} overlaps the headers")]
    BadDataOffset { offset: u32 },

    #[error("planes field is {0}, expected 1")]
    BadPlanes(u16),

    #[error("invalid dimensions {width}x{height}")]
    BadDimensions { width: i32, height: i32 },
}
