use std::io::Cursor;

use crate::bmp::decode::read_headers;
use crate::error::BmpError;
use crate::pixel::{ImageFormat, Orientation, PixelLayout};

/// Image metadata read from the headers alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BmpInfo {
    pub format: ImageFormat,
    pub width: u32,
    /// Signed height as stored; the sign gives the row order.
    pub height: i32,
    pub orientation: Orientation,
    pub layout: PixelLayout,
}

impl BmpInfo {
    /// Probe headers without decoding pixels. Runs the same validation as a
    /// full decode.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BmpError> {
        let headers = read_headers(&mut Cursor::new(data), "<probe>")?;
        Ok(Self {
            format: ImageFormat::Bmp,
            width: headers.info.width as u32,
            height: headers.info.height,
            orientation: Orientation::from_height(headers.info.height),
            layout: headers.layout,
        })
    }

    /// Number of pixel rows.
    pub fn rows(&self) -> u32 {
        self.height.unsigned_abs()
    }
}
