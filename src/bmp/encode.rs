//! BMP encoder: uncompressed 24-bit, bottom-up rows.

use enough::Stop;

use super::header::{BmpHeader, row_stride};
use crate::error::BmpFxError;
use crate::image::Image;

/// Encode `image` as a 24-bit BMP with a 54-byte header.
pub(crate) fn encode_bmp(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, BmpFxError> {
    let (w, h) = image.dimensions();
    if h == 0 {
        return Err(BmpFxError::EmptyImage);
    }

    // Padding is derived from the current width, which crops and block
    // padding may have changed since decode.
    let header = BmpHeader::for_image(w, h)?;
    let pad_bytes = row_stride(w).map_or(0, |stride| stride - w * 3);
    tracing::debug!(width = w, height = h, pad_bytes, "encoding bmp");

    stop.check()?;

    let mut out = Vec::with_capacity(header.file_size as usize);
    header.write_to(&mut out);

    for y in (0..h).rev() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for px in image.row(y) {
            out.extend_from_slice(&px.to_bytes());
        }
        out.extend(std::iter::repeat_n(0u8, pad_bytes));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Bgr8;
    use enough::Unstoppable;

    #[test]
    fn rows_written_bottom_up_with_padding() {
        let img = Image::from_fn(1, 2, |_, y| if y == 0 { Bgr8::new(1, 2, 3) } else { Bgr8::WHITE });
        let out = encode_bmp(&img, &Unstoppable).unwrap();
        assert_eq!(out.len(), 54 + 2 * 4);
        assert_eq!(&out[54..58], &[255, 255, 255, 0]);
        assert_eq!(&out[58..62], &[3, 2, 1, 0]);
    }

    #[test]
    fn header_fields() {
        let img = Image::new(3, 5);
        let out = encode_bmp(&img, &Unstoppable).unwrap();
        let le32 = |at: usize| u32::from_le_bytes([out[at], out[at + 1], out[at + 2], out[at + 3]]);
        assert_eq!(&out[0..2], b"BM");
        assert_eq!(le32(2) as usize, out.len());
        assert_eq!(le32(6), 0);
        assert_eq!(le32(10), 54);
        assert_eq!(le32(14), 40);
        assert_eq!(le32(18), 3);
        assert_eq!(le32(22), 5);
        assert_eq!(u16::from_le_bytes([out[26], out[27]]), 1);
        assert_eq!(u16::from_le_bytes([out[28], out[29]]), 24);
        assert_eq!(le32(30), 0);
        assert_eq!(le32(34), 12 * 5);
        assert_eq!(le32(38), 2835);
        assert_eq!(le32(42), 2835);
        assert_eq!(le32(46), 0);
        assert_eq!(le32(50), 0);
    }

    #[test]
    fn zero_height_is_rejected() {
        assert!(matches!(
            encode_bmp(&Image::new(4, 0), &Unstoppable),
            Err(BmpFxError::EmptyImage)
        ));
    }

    #[test]
    fn zero_width_writes_header_only() {
        let out = encode_bmp(&Image::new(0, 3), &Unstoppable).unwrap();
        assert_eq!(out.len(), 54);
    }
}
