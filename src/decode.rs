use std::io::{Cursor, Read, Seek};
use std::path::Path;

use enough::Stop;

use crate::bmp::{self, Bitmap};
use crate::error::BmpError;
use crate::limits::Limits;

/// Decode settings: a source name for diagnostics and optional resource
/// limits.
///
/// ```no_run
/// use zenbmp::{DecodeRequest, Limits, Unstoppable};
///
/// let limits = Limits::none().with_max_pixels(4096 * 4096);
/// let bitmap = DecodeRequest::new()
///     .with_limits(&limits)
///     .open("input.bmp", Unstoppable)?;
/// # Ok::<(), zenbmp::BmpError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct DecodeRequest<'a> {
    name: Option<&'a str>,
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the source, used in log messages.
    pub fn with_name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub(crate) fn name(&self) -> &str {
        self.name.unwrap_or("<stream>")
    }

    pub(crate) fn limits(&self) -> Option<&Limits> {
        self.limits
    }

    /// Decode from a seekable stream.
    pub fn decode<R: Read + Seek>(&self, mut reader: R, stop: impl Stop) -> Result<Bitmap, BmpError> {
        bmp::decode::decode_bitmap(&mut reader, self, &stop)
    }

    /// Decode from an in-memory buffer.
    pub fn decode_bytes(&self, data: &[u8], stop: impl Stop) -> Result<Bitmap, BmpError> {
        self.decode(Cursor::new(data), stop)
    }

    /// Open and decode a file.
    pub fn open(&self, path: impl AsRef<Path>, stop: impl Stop) -> Result<Bitmap, BmpError> {
        bmp::open_with(self, path.as_ref(), &stop)
    }
}
