//! Fixed-layout BMP header records.
//!
//! Every record is encoded field by field in little-endian order with no
//! padding between fields, so the in-memory struct layout never leaks onto
//! the wire.

use std::io::Read;

use crate::error::{BmpError, FormatError};

/// `"BM"` read as a little-endian `u16`.
pub const BMP_MAGIC: u16 = 0x4D42;

/// `"sRGB"` color space tag.
pub const LCS_SRGB: u32 = 0x7352_4742;

/// `BI_RGB`: uncompressed.
pub const COMPRESSION_RGB: u32 = 0;

/// `BI_BITFIELDS`: uncompressed with channel masks.
pub const COMPRESSION_BITFIELDS: u32 = 3;

/// Rows on disk are padded to this many bytes.
pub const ROW_ALIGN: usize = 4;

/// Bytes per row of pixel data, without padding.
pub fn row_stride(width: u32, bytes_per_pixel: usize) -> usize {
    width as usize * bytes_per_pixel
}

/// Bytes per row on disk: [`row_stride`] rounded up to a multiple of 4.
pub fn aligned_stride(width: u32, bytes_per_pixel: usize) -> usize {
    (row_stride(width, bytes_per_pixel) + (ROW_ALIGN - 1)) & !(ROW_ALIGN - 1)
}

fn u16_at(b: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([b[off], b[off + 1]])
}

fn u32_at(b: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}

fn i32_at(b: &[u8], off: usize) -> i32 {
    i32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}

fn put(out: &mut [u8], off: usize, bytes: &[u8]) {
    out[off..off + bytes.len()].copy_from_slice(bytes);
}

// ── File header ─────────────────────────────────────────────────────

/// `BITMAPFILEHEADER`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub file_type: u16,
    /// Total size of the file in bytes.
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Offset from the start of the file to the pixel array.
    pub offset_data: u32,
}

impl Default for FileHeader {
    fn default() -> Self {
        Self {
            file_type: BMP_MAGIC,
            file_size: 0,
            reserved1: 0,
            reserved2: 0,
            offset_data: 0,
        }
    }
}

impl FileHeader {
    pub const SIZE: usize = 14;

    pub fn from_bytes(b: &[u8; Self::SIZE]) -> Self {
        Self {
            file_type: u16_at(b, 0),
            file_size: u32_at(b, 2),
            reserved1: u16_at(b, 6),
            reserved2: u16_at(b, 8),
            offset_data: u32_at(b, 10),
        }
    }

    pub fn read_from<R: Read + ?Sized>(r: &mut R) -> Result<Self, BmpError> {
        let mut b = [0u8; Self::SIZE];
        r.read_exact(&mut b)?;
        Ok(Self::from_bytes(&b))
    }

    /// Encode; reserved fields are always written as zero.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        put(&mut out, 0, &self.file_type.to_le_bytes());
        put(&mut out, 2, &self.file_size.to_le_bytes());
        put(&mut out, 10, &self.offset_data.to_le_bytes());
        out
    }

    pub(crate) fn check_magic(&self) -> Result<(), FormatError> {
        if self.file_type != BMP_MAGIC {
            return Err(FormatError::BadMagic {
                found: self.file_type,
            });
        }
        Ok(())
    }
}

// ── Info header ─────────────────────────────────────────────────────

/// `BITMAPINFOHEADER`.
///
/// A positive `height` means rows are stored bottom-to-top; a negative one
/// means top-to-bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    /// Size of this header plus any header extension that follows it.
    pub size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    pub size_image: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl Default for InfoHeader {
    fn default() -> Self {
        Self {
            size: 0,
            width: 0,
            height: 0,
            planes: 1,
            bit_count: 0,
            compression: COMPRESSION_RGB,
            size_image: 0,
            x_pixels_per_meter: 0,
            y_pixels_per_meter: 0,
            colors_used: 0,
            colors_important: 0,
        }
    }
}

impl InfoHeader {
    pub const SIZE: usize = 40;

    pub fn from_bytes(b: &[u8; Self::SIZE]) -> Self {
        Self {
            size: u32_at(b, 0),
            width: i32_at(b, 4),
            height: i32_at(b, 8),
            planes: u16_at(b, 12),
            bit_count: u16_at(b, 14),
            compression: u32_at(b, 16),
            size_image: u32_at(b, 20),
            x_pixels_per_meter: i32_at(b, 24),
            y_pixels_per_meter: i32_at(b, 28),
            colors_used: u32_at(b, 32),
            colors_important: u32_at(b, 36),
        }
    }

    pub fn read_from<R: Read + ?Sized>(r: &mut R) -> Result<Self, BmpError> {
        let mut b = [0u8; Self::SIZE];
        r.read_exact(&mut b)?;
        Ok(Self::from_bytes(&b))
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        put(&mut out, 0, &self.size.to_le_bytes());
        put(&mut out, 4, &self.width.to_le_bytes());
        put(&mut out, 8, &self.height.to_le_bytes());
        put(&mut out, 12, &self.planes.to_le_bytes());
        put(&mut out, 14, &self.bit_count.to_le_bytes());
        put(&mut out, 16, &self.compression.to_le_bytes());
        put(&mut out, 20, &self.size_image.to_le_bytes());
        put(&mut out, 24, &self.x_pixels_per_meter.to_le_bytes());
        put(&mut out, 28, &self.y_pixels_per_meter.to_le_bytes());
        put(&mut out, 32, &self.colors_used.to_le_bytes());
        put(&mut out, 36, &self.colors_important.to_le_bytes());
        out
    }

    /// Bytes per pixel implied by `bit_count`.
    pub fn bytes_per_pixel(&self) -> usize {
        usize::from(self.bit_count / 8)
    }

    /// Number of pixel rows, regardless of orientation.
    pub fn rows(&self) -> u32 {
        self.height.unsigned_abs()
    }
}

// ── Color header ────────────────────────────────────────────────────

/// Channel masks and color space that follow the info header in 32-bit
/// images, making the pair a `BITMAPV5HEADER`.
///
/// [`ColorHeader::default`] is the only layout accepted: BGRA byte order in
/// the sRGB color space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorHeader {
    pub red_mask: u32,
    pub green_mask: u32,
    pub blue_mask: u32,
    pub alpha_mask: u32,
    pub color_space_type: u32,
    /// Endpoints, gamma, intent and profile fields; unused for sRGB.
    pub reserved: [u8; 64],
}

impl Default for ColorHeader {
    fn default() -> Self {
        Self {
            red_mask: 0x00FF_0000,
            green_mask: 0x0000_FF00,
            blue_mask: 0x0000_00FF,
            alpha_mask: 0xFF00_0000,
            color_space_type: LCS_SRGB,
            reserved: [0; 64],
        }
    }
}

impl ColorHeader {
    pub const SIZE: usize = 84;

    pub fn from_bytes(b: &[u8; Self::SIZE]) -> Self {
        let mut reserved = [0u8; 64];
        reserved.copy_from_slice(&b[20..]);
        Self {
            red_mask: u32_at(b, 0),
            green_mask: u32_at(b, 4),
            blue_mask: u32_at(b, 8),
            alpha_mask: u32_at(b, 12),
            color_space_type: u32_at(b, 16),
            reserved,
        }
    }

    pub fn read_from<R: Read + ?Sized>(r: &mut R) -> Result<Self, BmpError> {
        let mut b = [0u8; Self::SIZE];
        r.read_exact(&mut b)?;
        Ok(Self::from_bytes(&b))
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        put(&mut out, 0, &self.red_mask.to_le_bytes());
        put(&mut out, 4, &self.green_mask.to_le_bytes());
        put(&mut out, 8, &self.blue_mask.to_le_bytes());
        put(&mut out, 12, &self.alpha_mask.to_le_bytes());
        put(&mut out, 16, &self.color_space_type.to_le_bytes());
        put(&mut out, 20, &self.reserved);
        out
    }

    /// Check masks and color space against the canonical values.
    pub fn validate(&self) -> Result<(), FormatError> {
        let expected = Self::default();
        if self.red_mask != expected.red_mask
            || self.green_mask != expected.green_mask
            || self.blue_mask != expected.blue_mask
            || self.alpha_mask != expected.alpha_mask
        {
            return Err(FormatError::ColorMaskMismatch {
                red: self.red_mask,
                green: self.green_mask,
                blue: self.blue_mask,
                alpha: self.alpha_mask,
            });
        }
        if self.color_space_type != expected.color_space_type {
            return Err(FormatError::ColorSpaceMismatch {
                found: self.color_space_type,
            });
        }
        Ok(())
    }
}

/// Canonical `info.size` for a bit depth: the color header only rides along
/// with 32-bit images.
pub(crate) fn canonical_info_size(bit_count: u16) -> u32 {
    if bit_count == 32 {
        (InfoHeader::SIZE + ColorHeader::SIZE) as u32
    } else {
        InfoHeader::SIZE as u32
    }
}

/// Canonical pixel array offset for a bit depth.
pub(crate) fn canonical_offset(bit_count: u16) -> u32 {
    FileHeader::SIZE as u32 + canonical_info_size(bit_count)
}

/// Size of the canonical file for an image, or `None` if it would not fit
/// the 32-bit `file_size` field.
pub(crate) fn canonical_file_size(width: u32, rows: u32, bit_count: u16) -> Option<u32> {
    let bpp = u64::from(bit_count / 8);
    let align = ROW_ALIGN as u64;
    let stride = (u64::from(width) * bpp + (align - 1)) & !(align - 1);
    let total = stride
        .checked_mul(u64::from(rows))?
        .checked_add(u64::from(canonical_offset(bit_count)))?;
    u32::try_from(total).ok()
}
