use crate::error::BmpFxError;

/// `BM`, the first two bytes of every BMP file.
pub const SIGNATURE: [u8; 2] = *b"BM";
/// BITMAPFILEHEADER size.
pub const FILE_HEADER_SIZE: u32 = 14;
/// BITMAPINFOHEADER size.
pub const INFO_HEADER_SIZE: u32 = 40;
/// Offset of the pixel data in files written by this crate.
pub const HEADER_SIZE: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
/// 72 DPI expressed in pixels per meter.
pub const DEFAULT_PIXELS_PER_METER: i32 = 2835;
/// The only bit depth this crate reads or writes.
pub const BITS_PER_PIXEL: u16 = 24;
/// BI_RGB.
pub const COMPRESSION_NONE: u32 = 0;

/// File header plus BITMAPINFOHEADER fields of a 24-bit BMP.
///
/// The signature is not stored; a parsed header always had `BM`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    pub file_size: u32,
    pub reserved: u32,
    pub data_offset: u32,
    pub info_size: u32,
    pub width: i32,
    /// Positive for bottom-up rows, negative for top-down.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub important_colors: u32,
}

impl BmpHeader {
    /// Parse and validate the headers at the start of `data`.
    ///
    /// Fails with a format error for a bad signature or truncated/inconsistent
    /// fields, and with [`BmpFxError::UnsupportedFormat`] when the bit depth is
    /// not 24 or the data is compressed.
    pub fn parse(data: &[u8]) -> Result<Self, BmpFxError> {
        super::decode::parse_header(data)
    }

    /// Header for a `width` x `height` image written bottom-up.
    pub(crate) fn for_image(width: usize, height: usize) -> Result<Self, BmpFxError> {
        let too_large = || BmpFxError::DimensionsTooLarge {
            width: width as u64,
            height: height as u64,
        };
        let w = i32::try_from(width).map_err(|_| too_large())?;
        let h = i32::try_from(height).map_err(|_| too_large())?;
        let image_size = row_stride(width)
            .and_then(|stride| stride.checked_mul(height))
            .and_then(|size| u32::try_from(size).ok())
            .ok_or_else(too_large)?;
        let file_size = image_size.checked_add(HEADER_SIZE).ok_or_else(too_large)?;

        Ok(Self {
            file_size,
            reserved: 0,
            data_offset: HEADER_SIZE,
            info_size: INFO_HEADER_SIZE,
            width: w,
            height: h,
            planes: 1,
            bits_per_pixel: BITS_PER_PIXEL,
            compression: COMPRESSION_NONE,
            image_size,
            x_pixels_per_meter: DEFAULT_PIXELS_PER_METER,
            y_pixels_per_meter: DEFAULT_PIXELS_PER_METER,
            colors_used: 0,
            important_colors: 0,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width.unsigned_abs() as usize
    }

    /// Image height in pixels, regardless of row order.
    pub fn height(&self) -> usize {
        self.height.unsigned_abs() as usize
    }

    /// True when rows are stored top row first (negative height).
    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }

    /// Append the 54 header bytes. `info_size` is written as stored, but the
    /// layout is always the 40-byte BITMAPINFOHEADER.
    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        // File header (14 bytes)
        out.extend_from_slice(&SIGNATURE);
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&self.reserved.to_le_bytes());
        out.extend_from_slice(&self.data_offset.to_le_bytes());

        // BITMAPINFOHEADER (40 bytes)
        out.extend_from_slice(&self.info_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&self.image_size.to_le_bytes());
        out.extend_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.colors_used.to_le_bytes());
        out.extend_from_slice(&self.important_colors.to_le_bytes());
    }
}

/// Bytes per stored row: three per pixel, zero-padded to a multiple of 4.
pub(crate) fn row_stride(width: usize) -> Option<usize> {
    width
        .checked_mul(3)
        .and_then(|r| r.checked_add(3))
        .map(|r| r & !3)
}
