//! Block-average pixelation.

use super::for_each_chunk;
use crate::error::BmpFxError;
use crate::image::Image;
use crate::pixel::Bgr8;

/// Pixelate into `block_size` x `block_size` cells.
///
/// The canvas grows to the next multiple of `block_size` on each axis. Each
/// cell's channels are averaged (integer division) over the pixels that lie
/// inside the original bounds, and the whole cell, grown area included, is
/// filled with that average.
///
/// Fails with [`BmpFxError::InvalidParameter`] when `block_size` is 0 or
/// exceeds both sides of a non-empty image. The canvas is therefore at most
/// `(2 * side - 1)²` pixels, with `side` the longer image side.
pub fn image_split(image: &Image, block_size: usize) -> Result<Image, BmpFxError> {
    if block_size == 0 {
        return Err(BmpFxError::InvalidParameter(
            "image_split block size must be positive".into(),
        ));
    }
    let (w, h) = image.dimensions();
    if !image.is_empty() && block_size > w.max(h) {
        return Err(BmpFxError::InvalidParameter(format!(
            "image_split block size {block_size} exceeds the {w}x{h} image"
        )));
    }
    let (new_w, new_h) = padded_dimensions(w, h, block_size).ok_or(
        BmpFxError::DimensionsTooLarge {
            width: w as u64,
            height: h as u64,
        },
    )?;
    let stripe_len = new_w * block_size;
    tracing::trace!(block_size, new_w, new_h, "image split");

    let mut out = Image::new(new_w, new_h);
    // One stripe is a full-width band of `block_size` output rows.
    for_each_chunk(out.pixels_mut(), stripe_len, |stripe, band| {
        let y0 = stripe * block_size;
        let y1 = (y0 + block_size).min(h);
        for x0 in (0..new_w).step_by(block_size) {
            let x1 = (x0 + block_size).min(w);
            let avg = block_average(image, x0..x1, y0..y1);
            for row in band.chunks_mut(new_w) {
                row[x0..x0 + block_size].fill(avg);
            }
        }
    });
    Ok(out)
}

/// Canvas size after padding each side up to a multiple of `block_size`, or
/// `None` on overflow.
pub(crate) fn padded_dimensions(
    width: usize,
    height: usize,
    block_size: usize,
) -> Option<(usize, usize)> {
    let new_w = width.div_ceil(block_size).checked_mul(block_size)?;
    let new_h = height.div_ceil(block_size).checked_mul(block_size)?;
    new_w.checked_mul(new_h)?;
    new_w.checked_mul(block_size)?;
    Some((new_w, new_h))
}

/// Per-channel truncating mean over a non-empty region.
fn block_average(image: &Image, xs: std::ops::Range<usize>, ys: std::ops::Range<usize>) -> Bgr8 {
    let (mut sum_r, mut sum_g, mut sum_b) = (0u64, 0u64, 0u64);
    for y in ys.clone() {
        for p in &image.row(y)[xs.clone()] {
            sum_r += u64::from(p.r);
            sum_g += u64::from(p.g);
            sum_b += u64::from(p.b);
        }
    }
    let count = (xs.len() * ys.len()) as u64;
    Bgr8::new(
        (sum_r / count) as u8,
        (sum_g / count) as u8,
        (sum_b / count) as u8,
    )
}
