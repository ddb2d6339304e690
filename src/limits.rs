use crate::error::BmpFxError;
use crate::pixel::Bgr8;

/// Caps applied to a BMP header before any pixel memory is allocated.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the decoded pixel buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check decoded dimensions, including the size of the buffer they need.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), BmpFxError> {
        let (w, h) = (u64::from(width), u64::from(height));
        exceeds(self.max_width, w, "width")?;
        exceeds(self.max_height, h, "height")?;
        let pixels = w * h;
        exceeds(self.max_pixels, pixels, "pixel count")?;
        exceeds(
            self.max_memory_bytes,
            pixels.saturating_mul(std::mem::size_of::<Bgr8>() as u64),
            "pixel buffer bytes",
        )
    }
}

fn exceeds(limit: Option<u64>, value: u64, what: &str) -> Result<(), BmpFxError> {
    match limit {
        Some(max) if value > max => Err(BmpFxError::LimitExceeded(format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
