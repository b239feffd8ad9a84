//! BMP decoder for uncompressed 24-bit BGR and 32-bit BGRA images.

use std::io::{Read, Seek, SeekFrom};

use enough::Stop;

use super::Bitmap;
use super::header::{
    COMPRESSION_BITFIELDS, COMPRESSION_RGB, ColorHeader, FileHeader, InfoHeader, ROW_ALIGN,
    aligned_stride, canonical_file_size, canonical_info_size, canonical_offset, row_stride,
};
use crate::decode::DecodeRequest;
use crate::error::{BmpError, FormatError};
use crate::pixel::PixelLayout;

/// Headers read and validated, before any pixel data.
pub(crate) struct ParsedHeaders {
    pub file: FileHeader,
    pub info: InfoHeader,
    pub color: Option<ColorHeader>,
    pub layout: PixelLayout,
}

/// Read and validate the file, info and (for 32-bit) color headers.
///
/// The reader is left just past the last header read.
pub(crate) fn read_headers<R: Read + ?Sized>(
    reader: &mut R,
    name: &str,
) -> Result<ParsedHeaders, BmpError> {
    let file = FileHeader::read_from(reader)?;
    file.check_magic()?;

    let info = InfoHeader::read_from(reader)?;

    let color = if info.bit_count == 32 {
        let needed = (InfoHeader::SIZE + ColorHeader::SIZE) as u32;
        if info.size < needed {
            log::warn!("\"{name}\" does not seem to contain bit mask information");
            return Err(FormatError::MissingBitMasks {
                info_size: info.size,
            }
            .into());
        }
        let color = ColorHeader::read_from(reader)?;
        color.validate()?;
        Some(color)
    } else {
        None
    };

    let layout = PixelLayout::from_bit_count(info.bit_count).ok_or_else(|| {
        BmpError::UnsupportedFormat(format!(
            "BMP bit depth {} unsupported, expected 24 or 32",
            info.bit_count
        ))
    })?;

    if !matches!(info.compression, COMPRESSION_RGB | COMPRESSION_BITFIELDS) {
        return Err(BmpError::UnsupportedFormat(format!(
            "BMP compression {} unsupported, only uncompressed images",
            info.compression
        )));
    }
    if info.size < InfoHeader::SIZE as u32 {
        return Err(FormatError::BadInfoSize { size: info.size }.into());
    }
    if info.planes != 1 {
        return Err(FormatError::BadPlanes(info.planes).into());
    }
    if info.width <= 0 || info.height == 0 {
        return Err(FormatError::BadDimensions {
            width: info.width,
            height: info.height,
        }
        .into());
    }
    let headers_end = FileHeader::SIZE as u32
        + InfoHeader::SIZE as u32
        + if color.is_some() {
            ColorHeader::SIZE as u32
        } else {
            0
        };
    if file.offset_data < headers_end {
        return Err(FormatError::BadDataOffset {
            offset: file.offset_data,
        }
        .into());
    }

    log::trace!(
        "\"{name}\": {}x{} {}-bit, compression {}, info size {}, data at {}",
        info.width,
        info.height,
        info.bit_count,
        info.compression,
        info.size,
        file.offset_data
    );

    Ok(ParsedHeaders {
        file,
        info,
        color,
        layout,
    })
}

/// Decode a full image.
pub(crate) fn decode_bitmap<R: Read + Seek + ?Sized>(
    reader: &mut R,
    request: &DecodeRequest<'_>,
    stop: &dyn Stop,
) -> Result<Bitmap, BmpError> {
    let name = request.name();
    let ParsedHeaders {
        mut file,
        mut info,
        color,
        layout,
    } = read_headers(reader, name)?;

    // Skip anything an editor put between the headers and the pixels.
    reader.seek(SeekFrom::Start(u64::from(file.offset_data)))?;

    let canonical = canonical_offset(info.bit_count);
    if file.offset_data != canonical || info.size != canonical_info_size(info.bit_count) {
        log::debug!(
            "\"{name}\": dropping {} bytes of extra header data",
            file.offset_data.saturating_sub(canonical)
        );
    }
    info.size = canonical_info_size(info.bit_count);
    file.offset_data = canonical;

    let width = info.width as u32;
    let rows = info.rows();
    if canonical_file_size(width, rows, info.bit_count).is_none() {
        return Err(BmpError::DimensionsTooLarge {
            width,
            height: rows,
        });
    }
    let bpp = layout.bytes_per_pixel();
    let stride = row_stride(width, bpp);
    let len = stride * rows as usize;
    if let Some(limits) = request.limits() {
        limits.check(width, rows, len)?;
    }

    // A truncated stream must not cost a full-size allocation.
    let expected = aligned_stride(width, bpp) as u64 * u64::from(rows);
    let available = remaining_len(reader)?;
    if available < expected {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("\"{name}\": pixel data needs {expected} bytes, {available} left"),
        )
        .into());
    }
    stop.check()?;

    let mut pixels = vec![0u8; len];
    if width % 4 == 0 {
        // Every row is already 4-byte aligned.
        reader.read_exact(&mut pixels)?;
    } else {
        let mut padding = [0u8; ROW_ALIGN];
        let pad = aligned_stride(width, bpp) - stride;
        for (y, row) in pixels.chunks_exact_mut(stride).enumerate() {
            if y % 16 == 0 {
                stop.check()?;
            }
            reader.read_exact(row)?;
            reader.read_exact(&mut padding[..pad])?;
        }
    }

    Bitmap::from_parts(file, info, color, pixels)
}

/// Bytes left between the current position and the end of the stream.
fn remaining_len<R: Seek + ?Sized>(reader: &mut R) -> std::io::Result<u64> {
    let pos = reader.stream_position()?;
    let end = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(pos))?;
    Ok(end.saturating_sub(pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn header_bytes(bit_count: u16, info_size: u32, offset: u32) -> Vec<u8> {
        let file = FileHeader {
            offset_data: offset,
            ..FileHeader::default()
        };
        let info = InfoHeader {
            size: info_size,
            width: 1,
            height: 1,
            bit_count,
            ..InfoHeader::default()
        };
        let mut out = file.to_bytes().to_vec();
        out.extend_from_slice(&info.to_bytes());
        out
    }

    #[test]
    fn rejects_short_info_size_for_32_bit() {
        let data = header_bytes(32, 40, 54);
        let err = read_headers(&mut Cursor::new(&data), "short.bmp").err().unwrap();
        assert!(matches!(
            err,
            BmpError::Format(FormatError::MissingBitMasks { info_size: 40 })
        ));
    }

    #[test]
    fn rejects_offset_inside_headers() {
        let data = header_bytes(24, 40, 20);
        let err = read_headers(&mut Cursor::new(&data), "").err().unwrap();
        assert!(matches!(
            err,
            BmpError::Format(FormatError::BadDataOffset { offset: 20 })
        ));
    }

    #[test]
    fn rejects_rle() {
        let mut data = header_bytes(24, 40, 54);
        data[30] = 1;
        let err = read_headers(&mut Cursor::new(&data), "").err().unwrap();
        assert!(matches!(err, BmpError::UnsupportedFormat(_)));
    }

    #[test]
    fn truncated_header_is_io_error() {
        let data = header_bytes(24, 40, 54);
        let err = read_headers(&mut Cursor::new(&data[..30]), "")
            .err()
            .unwrap();
        match err {
            BmpError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
            other => panic!("expected Io, got {other:?}"),
        }
    }
}
