//! BMP encoder: uncompressed 24-bit and 32-bit BMP.

use std::io::Write;

use enough::Stop;

use super::Bitmap;
use super::header::{ColorHeader, ROW_ALIGN};
use crate::error::BmpError;

/// Serialize `bitmap`. Identical bitmaps always produce identical bytes.
pub(crate) fn encode_bitmap<W: Write + ?Sized>(
    bitmap: &Bitmap,
    out: &mut W,
    stop: &dyn Stop,
) -> Result<(), BmpError> {
    let bit_count = bitmap.info_header().bit_count;
    if bit_count != 24 && bit_count != 32 {
        return Err(BmpError::UnsupportedFormat(format!(
            "can only encode 24 or 32 bits per pixel, got {bit_count}"
        )));
    }
    let (file_header, info_header) = bitmap.wire_headers()?;

    stop.check()?;
    out.write_all(&file_header.to_bytes())?;
    out.write_all(&info_header.to_bytes())?;
    if bit_count == 32 {
        let color = bitmap.color_header().copied().unwrap_or_default();
        out.write_all(&color.to_bytes())?;
    }

    if bit_count == 32 || bitmap.width() % 4 == 0 {
        // Rows are already 4-byte aligned.
        out.write_all(bitmap.pixels())?;
        return Ok(());
    }

    let stride = bitmap.row_stride();
    let padding = [0u8; ROW_ALIGN];
    let pad = bitmap.aligned_stride() - stride;
    for (y, row) in bitmap.pixels().chunks_exact(stride).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        out.write_all(row)?;
        out.write_all(&padding[..pad])?;
    }
    Ok(())
}

/// Total encoded size of `bitmap` in bytes.
pub(crate) fn encoded_len(bitmap: &Bitmap) -> usize {
    let color = if bitmap.info_header().bit_count == 32 {
        ColorHeader::SIZE
    } else {
        0
    };
    super::FileHeader::SIZE + super::InfoHeader::SIZE + color + bitmap.pixel_array_size()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Bgra;
    use crate::Region;
    use enough::Unstoppable;

    fn encode(bitmap: &Bitmap) -> Vec<u8> {
        let mut out = Vec::new();
        encode_bitmap(bitmap, &mut out, &Unstoppable).unwrap();
        out
    }

    #[test]
    fn padded_24_bit_layout() {
        let mut bmp = Bitmap::new(1, 2, false).unwrap();
        bmp.fill_region(Region::new(0, 1, 1, 1), Bgra::opaque(1, 2, 3))
            .unwrap();
        let out = encode(&bmp);
        assert_eq!(out.len(), 54 + 2 * 4);
        assert_eq!(out.len(), encoded_len(&bmp));
        assert_eq!(u32::from_le_bytes(out[2..6].try_into().unwrap()), 62);
        assert_eq!(&out[54..62], &[0, 0, 0, 0, 1, 2, 3, 0]);
    }

    #[test]
    fn bgra_layout_has_masks() {
        let bmp = Bitmap::new(3, 1, true).unwrap();
        let out = encode(&bmp);
        assert_eq!(out.len(), 138 + 12);
        assert_eq!(out.len(), encoded_len(&bmp));
        assert_eq!(u32::from_le_bytes(out[10..14].try_into().unwrap()), 138);
        assert_eq!(u32::from_le_bytes(out[14..18].try_into().unwrap()), 124);
        assert_eq!(u16::from_le_bytes([out[28], out[29]]), 32);
        assert_eq!(u32::from_le_bytes(out[30..34].try_into().unwrap()), 3);
        assert_eq!(&out[54..58], &[0x00, 0x00, 0xFF, 0x00]);
        assert_eq!(&out[70..74], b"BGRs");
    }

    #[test]
    fn encoding_is_deterministic() {
        let mut bmp = Bitmap::new(7, 5, false).unwrap();
        bmp.fill_region(Region::new(2, 1, 3, 3), Bgra::opaque(9, 8, 7))
            .unwrap();
        assert_eq!(encode(&bmp), encode(&bmp.clone()));
    }
}
