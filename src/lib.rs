//! # zenbmp
//!
//! Reader and writer for uncompressed Windows BMP images, with an owned
//! pixel buffer you can inspect, build from scratch and fill region by
//! region.
//!
//! ## Supported Formats
//!
//! - 24-bit BGR, `BI_RGB` or `BI_BITFIELDS`
//! - 32-bit BGRA with canonical bit masks in the sRGB color space
//! - Bottom-up (positive height) and top-down (negative height) row order
//!
//! Decoding drops any extra metadata between the headers and the pixel
//! array; encoding always writes the minimal header layout.
//!
//! ## Non-Goals
//!
//! - RLE, embedded JPEG/PNG, palettes, bit depths other than 24 and 32
//! - ICC profiles or any color space other than sRGB
//! - Image transformations beyond flat-region fill
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmp::{Bgra, Bitmap, Region};
//!
//! // Read an image from disk and write it back
//! let bmp = Bitmap::open("shapes.bmp")?;
//! bmp.save("shapes_copy.bmp")?;
//!
//! // Create an image in memory, modify it, save it
//! let mut canvas = Bitmap::new(800, 600, true)?;
//! canvas.fill_region(Region::new(50, 20, 100, 200), Bgra::new(0, 0, 255, 255))?;
//! canvas.save("canvas.bmp")?;
//! # Ok::<(), zenbmp::BmpError>(())
//! ```

#![forbid(unsafe_code)]

mod error;
mod info;
mod limits;
mod pixel;

pub mod bmp;

mod decode;

// Re-exports
pub use bmp::{Bitmap, ColorHeader, FileHeader, InfoHeader, Region};
pub use decode::DecodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::{BmpError, FormatError};
pub use info::BmpInfo;
pub use limits::Limits;
#[cfg(feature = "rgb")]
pub use pixel::BmpPixel;
pub use pixel::{Bgra, ImageFormat, Orientation, PixelLayout};

/// Decode a BMP held in memory.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<Bitmap, BmpError> {
    DecodeRequest::new().decode_bytes(data, stop)
}

/// Encode to a new byte vector.
pub fn encode_bmp(bitmap: &Bitmap, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
    let mut out = Vec::with_capacity(bmp::encode::encoded_len(bitmap));
    bmp::encode::encode_bitmap(bitmap, &mut out, &stop)?;
    Ok(out)
}

/// Read dimensions and layout without decoding pixels.
pub fn probe_bmp(data: &[u8]) -> Result<BmpInfo, BmpError> {
    BmpInfo::from_bytes(data)
}
