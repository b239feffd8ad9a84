//! Uncompressed 24-bit and 32-bit BMP: header model, decoder, encoder and
//! region editing over an owned pixel buffer.

pub(crate) mod decode;
mod edit;
pub(crate) mod encode;
pub mod header;

pub use edit::Region;
pub use header::{ColorHeader, FileHeader, InfoHeader};

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use enough::{Stop, Unstoppable};

use crate::decode::DecodeRequest;
use crate::error::BmpError;
use crate::pixel::{Orientation, PixelLayout};
use header::{
    COMPRESSION_BITFIELDS, COMPRESSION_RGB, aligned_stride, canonical_file_size,
    canonical_info_size, canonical_offset, row_stride,
};

/// An uncompressed BMP image held in memory.
///
/// Pixels are stored in BMP channel order (BGR or BGRA), one stored row
/// after another with no padding. Row 0 is the first row in the file: the
/// bottom scanline when [`Bitmap::orientation`] is
/// [`Orientation::BottomUp`], the top one otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    file_header: FileHeader,
    info_header: InfoHeader,
    color_header: Option<ColorHeader>,
    pixels: Vec<u8>,
    row_stride: usize,
}

impl Bitmap {
    /// Create a zero-filled (black, transparent) image.
    ///
    /// With `has_alpha` the image is 32-bit BGRA with bit masks, otherwise
    /// 24-bit BGR. Rows are bottom-up.
    pub fn new(width: i32, height: i32, has_alpha: bool) -> Result<Self, BmpError> {
        if width <= 0 || height <= 0 {
            return Err(BmpError::InvalidArgument(format!(
                "image width and height must be positive, got {width}x{height}"
            )));
        }
        let layout = if has_alpha {
            PixelLayout::Bgra8
        } else {
            PixelLayout::Bgr8
        };
        let info_header = InfoHeader {
            width,
            height,
            bit_count: layout.bit_count(),
            compression: if has_alpha {
                COMPRESSION_BITFIELDS
            } else {
                COMPRESSION_RGB
            },
            ..InfoHeader::default()
        };
        let (w, h) = (width as u32, height as u32);
        if canonical_file_size(w, h, layout.bit_count()).is_none() {
            return Err(BmpError::DimensionsTooLarge {
                width: w,
                height: h,
            });
        }
        let len = row_stride(w, layout.bytes_per_pixel()) * h as usize;
        Self::from_parts(
            FileHeader::default(),
            info_header,
            has_alpha.then(ColorHeader::default),
            vec![0u8; len],
        )
    }

    /// Assemble an image from validated headers and a buffer of exactly
    /// `width * rows * bytes_per_pixel` bytes, normalizing derived fields.
    pub(crate) fn from_parts(
        file_header: FileHeader,
        info_header: InfoHeader,
        color_header: Option<ColorHeader>,
        pixels: Vec<u8>,
    ) -> Result<Self, BmpError> {
        let mut bitmap = Self {
            file_header,
            info_header,
            color_header,
            pixels,
            row_stride: 0,
        };
        bitmap.row_stride = row_stride(bitmap.width(), bitmap.bytes_per_pixel());
        let (file_header, info_header) = bitmap.wire_headers()?;
        bitmap.file_header = file_header;
        bitmap.info_header = info_header;
        Ok(bitmap)
    }

    /// Read and decode a BMP file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BmpError> {
        let path = path.as_ref();
        let name = path.display().to_string();
        DecodeRequest::new().with_name(&name).open(path, Unstoppable)
    }

    /// Decode a BMP stream with default settings.
    pub fn decode<R: Read + Seek>(reader: R, stop: impl Stop) -> Result<Self, BmpError> {
        DecodeRequest::new().decode(reader, stop)
    }

    /// Encode and write to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BmpError> {
        let mut out = BufWriter::new(File::create(path)?);
        self.encode_to(&mut out, Unstoppable)?;
        out.flush()?;
        Ok(())
    }

    /// Encode into any byte sink.
    pub fn encode_to<W: Write>(&self, mut out: W, stop: impl Stop) -> Result<(), BmpError> {
        encode::encode_bitmap(self, &mut out, &stop)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.info_header.width.unsigned_abs()
    }

    /// Signed height as stored in the info header.
    pub fn height(&self) -> i32 {
        self.info_header.height
    }

    /// Number of pixel rows.
    pub fn rows(&self) -> u32 {
        self.info_header.rows()
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from_height(self.info_header.height)
    }

    pub fn layout(&self) -> PixelLayout {
        if self.info_header.bit_count == 32 {
            PixelLayout::Bgra8
        } else {
            PixelLayout::Bgr8
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.info_header.bytes_per_pixel()
    }

    pub fn has_alpha(&self) -> bool {
        self.layout().has_alpha()
    }

    /// Bytes per stored row in memory (no padding).
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Bytes per row in the encoded file.
    pub fn aligned_stride(&self) -> usize {
        aligned_stride(self.width(), self.bytes_per_pixel())
    }

    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    pub fn info_header(&self) -> &InfoHeader {
        &self.info_header
    }

    /// Present only for 32-bit images.
    pub fn color_header(&self) -> Option<&ColorHeader> {
        self.color_header.as_ref()
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Stored row `y`.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.rows() {
            return None;
        }
        let start = y as usize * self.row_stride;
        self.pixels.get(start..start + self.row_stride)
    }

    /// Channels of the pixel at column `x` of stored row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width() {
            return None;
        }
        let bpp = self.bytes_per_pixel();
        let start = x as usize * bpp;
        self.row(y).map(|row| &row[start..start + bpp])
    }

    /// Bytes occupied by the pixel array on disk, padding included.
    pub(crate) fn pixel_array_size(&self) -> usize {
        self.aligned_stride() * self.rows() as usize
    }

    /// Headers as they go on the wire: header size and data offset at their
    /// canonical minimum, file size matching the padded pixel array.
    pub(crate) fn wire_headers(&self) -> Result<(FileHeader, InfoHeader), BmpError> {
        let bit_count = self.info_header.bit_count;
        let file_size = canonical_file_size(self.width(), self.rows(), bit_count).ok_or(
            BmpError::DimensionsTooLarge {
                width: self.width(),
                height: self.rows(),
            },
        )?;
        let offset_data = canonical_offset(bit_count);
        let file_header = FileHeader {
            file_size,
            offset_data,
            reserved1: 0,
            reserved2: 0,
            ..self.file_header
        };
        let info_header = InfoHeader {
            size: canonical_info_size(bit_count),
            ..self.info_header
        };
        Ok((file_header, info_header))
    }

    /// Typed view of the pixels.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::BmpPixel>(&self) -> Result<&[P], BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        use rgb::AsPixels as _;
        if self.layout() != P::layout() {
            return Err(BmpError::LayoutMismatch {
                expected: P::layout(),
                actual: self.layout(),
            });
        }
        Ok(self.pixels.as_pixels())
    }

    /// Borrowed 2D view in stored row order.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::BmpPixel>(&self) -> Result<imgref::ImgRef<'_, P>, BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width() as usize,
            self.rows() as usize,
        ))
    }

    /// Owned 2D copy in top-down order, whatever the stored orientation.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::BmpPixel>(&self) -> Result<imgref::ImgVec<P>, BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        let w = self.width() as usize;
        let mut out = Vec::with_capacity(pixels.len());
        match self.orientation() {
            Orientation::TopDown => out.extend_from_slice(pixels),
            Orientation::BottomUp => {
                for row in pixels.chunks_exact(w).rev() {
                    out.extend_from_slice(row);
                }
            }
        }
        Ok(imgref::ImgVec::new(out, w, self.rows() as usize))
    }
}

/// Open `path` and decode it with `request`. The file handle is dropped on
/// every return path.
pub(crate) fn open_with(
    request: &DecodeRequest<'_>,
    path: &Path,
    stop: &dyn Stop,
) -> Result<Bitmap, BmpError> {
    let mut reader = BufReader::new(File::open(path)?);
    decode::decode_bitmap(&mut reader, request, stop)
}
