//! 24-bit uncompressed BMP decoder.

use enough::Stop;

use super::header::{
    BITS_PER_PIXEL, BmpHeader, COMPRESSION_NONE, FILE_HEADER_SIZE, SIGNATURE, row_stride,
};
use crate::error::BmpFxError;
use crate::image::Image;
use crate::limits::Limits;
use crate::pixel::Bgr8;

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BmpFxError> {
        let end = self.pos.checked_add(N).ok_or(BmpFxError::UnexpectedEof)?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(BmpFxError::UnexpectedEof)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        self.pos = end;
        Ok(buf)
    }

    fn get_u16_le(&mut self) -> Result<u16, BmpFxError> {
        self.read_fixed_bytes().map(u16::from_le_bytes)
    }

    fn get_u32_le(&mut self) -> Result<u32, BmpFxError> {
        self.read_fixed_bytes().map(u32::from_le_bytes)
    }

    fn get_i32_le(&mut self) -> Result<i32, BmpFxError> {
        self.read_fixed_bytes().map(i32::from_le_bytes)
    }
}

// ── Header parsing ──────────────────────────────────────────────────

/// Read and validate the file header and BITMAPINFOHEADER.
pub(crate) fn parse_header(data: &[u8]) -> Result<BmpHeader, BmpFxError> {
    let mut cur = Cursor::new(data);

    if cur.read_fixed_bytes::<2>()? != SIGNATURE {
        return Err(BmpFxError::UnrecognizedFormat);
    }
    let file_size = cur.get_u32_le()?;
    let reserved = cur.get_u32_le()?;
    let data_offset = cur.get_u32_le()?;

    let info_size = cur.get_u32_le()?;
    match info_size {
        // BITMAPINFOHEADER and the V2..V5 headers that extend it
        40 | 52 | 56 | 108 | 124 => {}
        // OS/2 core headers use a different field layout
        12 | 16 | 64 => {
            return Err(BmpFxError::UnsupportedFormat(format!(
                "OS/2 BMP info header ({info_size} bytes)"
            )));
        }
        _ => {
            return Err(BmpFxError::InvalidHeader(format!(
                "unknown BMP info header size: {info_size}"
            )));
        }
    }

    let header = BmpHeader {
        file_size,
        reserved,
        data_offset,
        info_size,
        width: cur.get_i32_le()?,
        height: cur.get_i32_le()?,
        planes: cur.get_u16_le()?,
        bits_per_pixel: cur.get_u16_le()?,
        compression: cur.get_u32_le()?,
        image_size: cur.get_u32_le()?,
        x_pixels_per_meter: cur.get_i32_le()?,
        y_pixels_per_meter: cur.get_i32_le()?,
        colors_used: cur.get_u32_le()?,
        important_colors: cur.get_u32_le()?,
    };

    if header.bits_per_pixel != BITS_PER_PIXEL {
        return Err(BmpFxError::UnsupportedFormat(format!(
            "{} bits per pixel (only 24 is supported)",
            header.bits_per_pixel
        )));
    }
    if header.compression != COMPRESSION_NONE {
        return Err(BmpFxError::UnsupportedFormat(format!(
            "compression method {} (only uncompressed is supported)",
            header.compression
        )));
    }
    if header.width < 0 {
        return Err(BmpFxError::InvalidHeader(format!(
            "negative BMP width ({})",
            header.width
        )));
    }
    if header.planes != 1 {
        return Err(BmpFxError::InvalidHeader(format!(
            "BMP planes field is {}, expected 1",
            header.planes
        )));
    }
    if u64::from(header.data_offset) < u64::from(FILE_HEADER_SIZE) + u64::from(info_size) {
        return Err(BmpFxError::InvalidHeader(format!(
            "pixel data offset {} overlaps the headers",
            header.data_offset
        )));
    }

    Ok(header)
}

// ── Pixel rows ──────────────────────────────────────────────────────

/// Decode a whole 24-bit BMP into a top-row-first [`Image`].
pub(crate) fn decode_bmp(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, BmpFxError> {
    let header = parse_header(data)?;
    let (w, h) = (header.width(), header.height());
    if let Some(limits) = limits {
        limits.check(w as u32, h as u32)?;
    }
    tracing::debug!(
        width = w,
        height = h,
        top_down = header.is_top_down(),
        "decoding bmp"
    );

    let too_large = || BmpFxError::DimensionsTooLarge {
        width: w as u64,
        height: h as u64,
    };
    let stride = row_stride(w).ok_or_else(too_large)?;
    let row_bytes = w * 3;
    let pixel_count = w.checked_mul(h).ok_or_else(too_large)?;
    let offset = header.data_offset as usize;

    if pixel_count == 0 {
        return Ok(Image::new(w, h));
    }

    // Every row's pixel bytes must be present; only the last row may lack padding.
    let needed = stride
        .checked_mul(h - 1)
        .and_then(|n| n.checked_add(row_bytes))
        .and_then(|n| n.checked_add(offset))
        .ok_or(BmpFxError::UnexpectedEof)?;
    if needed > data.len() {
        return Err(BmpFxError::UnexpectedEof);
    }

    stop.check()?;

    let mut pixels = Vec::with_capacity(pixel_count);
    for y in 0..h {
        if y % 16 == 0 {
            stop.check()?;
        }
        // Image row y is stored at file row y (top-down) or h - 1 - y (bottom-up).
        let file_row = if header.is_top_down() { y } else { h - 1 - y };
        let start = offset + file_row * stride;
        let row = &data[start..start + row_bytes];
        pixels.extend(
            row.chunks_exact(3)
                .map(|c| Bgr8::from_bytes([c[0], c[1], c[2]])),
        );
    }

    Image::from_pixels(w, h, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;

    /// Hand-built 2x2 bottom-up file: stride 8 (6 pixel bytes + 2 padding).
    fn two_by_two() -> Vec<u8> {
        let mut out = Vec::new();
        BmpHeader::for_image(2, 2).unwrap().write_to(&mut out);
        // bottom row: blue, white
        out.extend_from_slice(&[255, 0, 0, 255, 255, 255, 0, 0]);
        // top row: red, green
        out.extend_from_slice(&[0, 0, 255, 0, 255, 0, 0, 0]);
        out
    }

    #[test]
    fn rows_are_flipped_and_padding_skipped() {
        let img = decode_bmp(&two_by_two(), None, &Unstoppable).unwrap();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(
            img.pixels(),
            &[
                Bgr8::new(255, 0, 0),
                Bgr8::new(0, 255, 0),
                Bgr8::new(0, 0, 255),
                Bgr8::WHITE,
            ]
        );
    }

    #[test]
    fn top_down_rows() {
        let mut data = two_by_two();
        data[22..26].copy_from_slice(&(-2i32).to_le_bytes());
        let img = decode_bmp(&data, None, &Unstoppable).unwrap();
        assert_eq!(img.row(0), &[Bgr8::new(0, 0, 255), Bgr8::WHITE]);
    }

    #[test]
    fn missing_final_padding_is_tolerated() {
        let mut data = two_by_two();
        data.truncate(data.len() - 2);
        assert!(decode_bmp(&data, None, &Unstoppable).is_ok());
        data.truncate(data.len() - 1);
        assert!(matches!(
            decode_bmp(&data, None, &Unstoppable),
            Err(BmpFxError::UnexpectedEof)
        ));
    }

    #[test]
    fn honours_data_offset() {
        let base = two_by_two();
        let mut data = base[..54].to_vec();
        data[10..14].copy_from_slice(&58u32.to_le_bytes());
        data.extend_from_slice(&[0xAA; 4]);
        data.extend_from_slice(&base[54..]);
        let shifted = decode_bmp(&data, None, &Unstoppable).unwrap();
        assert_eq!(shifted, decode_bmp(&base, None, &Unstoppable).unwrap());
    }

    #[test]
    fn header_errors() {
        let data = two_by_two();

        assert!(matches!(parse_header(&[]), Err(BmpFxError::UnexpectedEof)));
        assert!(matches!(
            parse_header(&data[..30]),
            Err(BmpFxError::UnexpectedEof)
        ));

        let mut bad = data.clone();
        bad[14..18].copy_from_slice(&12u32.to_le_bytes());
        assert!(matches!(
            parse_header(&bad),
            Err(BmpFxError::UnsupportedFormat(_))
        ));

        let mut bad = data.clone();
        bad[18..22].copy_from_slice(&(-1i32).to_le_bytes());
        assert!(matches!(parse_header(&bad), Err(BmpFxError::InvalidHeader(_))));

        let mut bad = data.clone();
        bad[10..14].copy_from_slice(&20u32.to_le_bytes());
        assert!(matches!(parse_header(&bad), Err(BmpFxError::InvalidHeader(_))));

        let mut bad = data;
        bad[30..34].copy_from_slice(&1u32.to_le_bytes());
        assert!(matches!(
            parse_header(&bad),
            Err(BmpFxError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn huge_dimensions_on_tiny_file() {
        let mut data = two_by_two();
        data[18..22].copy_from_slice(&100_000i32.to_le_bytes());
        data[22..26].copy_from_slice(&100_000i32.to_le_bytes());
        assert!(matches!(
            decode_bmp(&data, None, &Unstoppable),
            Err(BmpFxError::UnexpectedEof)
        ));
    }

    #[test]
    fn limits_checked_before_rows() {
        let limits = Limits {
            max_pixels: Some(3),
            ..Default::default()
        };
        assert!(matches!(
            decode_bmp(&two_by_two(), Some(&limits), &Unstoppable),
            Err(BmpFxError::LimitExceeded(_))
        ));
    }
}
