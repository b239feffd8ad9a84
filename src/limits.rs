use crate::BmpError;

/// Resource limits applied while decoding, before the pixel buffer is
/// allocated.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * rows).
    pub max_pixels: Option<u64>,
    /// Maximum size in bytes of the decoded pixel buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// No restrictions.
    pub fn none() -> Self {
        Self::default()
    }

    /// Cap the pixel count.
    pub fn with_max_pixels(mut self, max_pixels: u64) -> Self {
        self.max_pixels = Some(max_pixels);
        self
    }

    /// Cap the decoded buffer size.
    pub fn with_max_memory(mut self, bytes: u64) -> Self {
        self.max_memory_bytes = Some(bytes);
        self
    }

    /// Check an image of `width` x `rows` pixels whose buffer needs
    /// `buffer_bytes` bytes.
    pub(crate) fn check(&self, width: u32, rows: u32, buffer_bytes: usize) -> Result<(), BmpError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(BmpError::LimitExceeded(format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(rows) > max_h {
                return Err(BmpError::LimitExceeded(format!(
                    "height {rows} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(rows);
            if pixels > max_px {
                return Err(BmpError::LimitExceeded(format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        if let Some(max_mem) = self.max_memory_bytes {
            if buffer_bytes as u64 > max_mem {
                return Err(BmpError::LimitExceeded(format!(
                    "allocation {buffer_bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}
