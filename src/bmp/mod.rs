//! 24-bit uncompressed BMP decoder and encoder.
//!
//! Files are a 14-byte file header, a 40-byte BITMAPINFOHEADER (later header
//! versions are accepted on decode), then rows of blue-green-red triples
//! padded with zeros to a multiple of 4 bytes. Rows are stored bottom-up
//! unless the height field is negative.

mod decode;
mod encode;
mod header;

pub use header::{
    BITS_PER_PIXEL, BmpHeader, COMPRESSION_NONE, DEFAULT_PIXELS_PER_METER, FILE_HEADER_SIZE,
    HEADER_SIZE, INFO_HEADER_SIZE, SIGNATURE,
};

use crate::error::BmpFxError;
use crate::image::Image;
use crate::limits::Limits;
use enough::Stop;

/// Decode a 24-bit BMP into a top-row-first [`Image`].
///
/// Bad signatures and truncated or inconsistent headers are format errors
/// ([`BmpFxError::is_format_error`]); other bit depths and compressed data are
/// [`BmpFxError::UnsupportedFormat`].
pub fn decode(data: &[u8], stop: impl Stop) -> Result<Image, BmpFxError> {
    decode::decode_bmp(data, None, &stop)
}

/// [`decode`], rejecting images that exceed `limits` before allocating.
pub fn decode_with_limits(
    data: &[u8],
    limits: &Limits,
    stop: impl Stop,
) -> Result<Image, BmpFxError> {
    decode::decode_bmp(data, Some(limits), &stop)
}

/// Encode `image` as an uncompressed 24-bit bottom-up BMP.
///
/// Returns [`BmpFxError::EmptyImage`] for a zero-height image.
pub fn encode(image: &Image, stop: impl Stop) -> Result<Vec<u8>, BmpFxError> {
    encode::encode_bmp(image, &stop)
}

pub(crate) fn decode_dyn(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, BmpFxError> {
    decode::decode_bmp(data, limits, stop)
}

pub(crate) fn encode_dyn(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, BmpFxError> {
    encode::encode_bmp(image, stop)
}
