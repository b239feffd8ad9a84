use super::Bitmap;
use crate::error::BmpError;
use crate::pixel::Bgra;

/// Axis-aligned rectangle `[x, x + width) x [y, y + height)` in stored row
/// coordinates (row 0 is the first row in the file).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn fits(&self, image_width: u32, image_rows: u32) -> bool {
        let right = self.x.checked_add(self.width);
        let bottom = self.y.checked_add(self.height);
        right.is_some_and(|r| r <= image_width) && bottom.is_some_and(|b| b <= image_rows)
    }
}

impl Bitmap {
    /// Paint every pixel of `region` with `color`.
    ///
    /// Alpha is only written to 32-bit images. Nothing is written when the
    /// region does not fit.
    pub fn fill_region(&mut self, region: Region, color: Bgra) -> Result<(), BmpError> {
        let (image_width, image_rows) = (self.width(), self.rows());
        if !region.fits(image_width, image_rows) {
            return Err(BmpError::Bounds {
                x: region.x,
                y: region.y,
                width: region.width,
                height: region.height,
                image_width,
                image_height: image_rows,
            });
        }

        let bpp = self.bytes_per_pixel();
        let channels = color.channels();
        let color = &channels[..bpp];
        let stride = self.row_stride;
        let x0 = region.x as usize * bpp;
        let x1 = x0 + region.width as usize * bpp;
        for y in region.y..region.y + region.height {
            let row = y as usize * stride;
            for px in self.pixels[row + x0..row + x1].chunks_exact_mut(bpp) {
                px.copy_from_slice(color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_writes_only_inside() {
        let mut bmp = Bitmap::new(4, 3, false).unwrap();
        bmp.fill_region(Region::new(1, 1, 2, 1), Bgra::new(10, 20, 30, 40))
            .unwrap();
        assert_eq!(bmp.pixel(1, 1), Some(&[10, 20, 30][..]));
        assert_eq!(bmp.pixel(2, 1), Some(&[10, 20, 30][..]));
        assert_eq!(bmp.pixel(0, 1), Some(&[0, 0, 0][..]));
        assert_eq!(bmp.pixel(3, 1), Some(&[0, 0, 0][..]));
        assert!(bmp.row(0).unwrap().iter().all(|&b| b == 0));
        assert!(bmp.row(2).unwrap().iter().all(|&b| b == 0));
    }

    #[test]
    fn fill_writes_alpha_for_bgra() {
        let mut bmp = Bitmap::new(2, 2, true).unwrap();
        bmp.fill_region(Region::new(0, 0, 2, 2), Bgra::new(0, 0, 255, 128))
            .unwrap();
        assert!(bmp.pixels().chunks_exact(4).all(|p| p == [0, 0, 255, 128]));
    }

    #[test]
    fn empty_region_is_noop() {
        let mut bmp = Bitmap::new(2, 2, false).unwrap();
        bmp.fill_region(Region::new(2, 2, 0, 0), Bgra::opaque(1, 1, 1))
            .unwrap();
        assert!(bmp.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn overflowing_region_is_rejected() {
        let mut bmp = Bitmap::new(2, 2, false).unwrap();
        let err = bmp
            .fill_region(Region::new(u32::MAX, 0, 2, 1), Bgra::default())
            .unwrap_err();
        assert!(matches!(err, BmpError::Bounds { .. }));
    }
}
