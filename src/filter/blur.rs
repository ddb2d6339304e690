//! Gaussian and circular (disc) blurs.

use super::for_each_chunk;
use super::kernel::{DiscKernel, GaussianKernel};
use crate::error::BmpFxError;
use crate::image::Image;
use crate::pixel::Bgr8;

/// Separable Gaussian blur.
///
/// A horizontal pass (samples clamped at the row ends) produces an 8-bit
/// intermediate image, then a vertical pass (clamped at the column ends)
/// produces the result. Both passes accumulate in `f32`, clamp to
/// `[0, 255]` and truncate. Normalized weights rarely sum to exactly 1, so a
/// flat region may lose one level.
///
/// Fails with [`BmpFxError::InvalidParameter`] unless `sigma` is finite and
/// positive.
pub fn gaussian_blur(image: &Image, sigma: f64) -> Result<Image, BmpFxError> {
    let kernel = GaussianKernel::new(sigma)?;
    tracing::trace!(sigma, radius = kernel.radius(), "gaussian kernel");

    let (w, h) = image.dimensions();
    let radius = kernel.radius() as isize;
    let weights = kernel.weights();

    let mut temp = Image::new(w, h);
    for_each_chunk(temp.pixels_mut(), w, |y, row| {
        let y = y as isize;
        for (x, dst) in row.iter_mut().enumerate() {
            let x = x as isize;
            *dst = accumulate(weights, |k| image.clamped(x + k - radius, y));
        }
    });

    let mut out = Image::new(w, h);
    for_each_chunk(out.pixels_mut(), w, |y, row| {
        let y = y as isize;
        for (x, dst) in row.iter_mut().enumerate() {
            let x = x as isize;
            *dst = accumulate(weights, |k| temp.clamped(x, y + k - radius));
        }
    });
    Ok(out)
}

/// Weighted sum of `sample(k)` for each kernel tap `k`, in tap order.
#[inline]
fn accumulate(weights: &[f32], sample: impl Fn(isize) -> Bgr8) -> Bgr8 {
    let (mut sum_r, mut sum_g, mut sum_b) = (0.0f32, 0.0f32, 0.0f32);
    for (k, &weight) in weights.iter().enumerate() {
        let p = sample(k as isize);
        sum_r += f32::from(p.r) * weight;
        sum_g += f32::from(p.g) * weight;
        sum_b += f32::from(p.b) * weight;
    }
    Bgr8::new(clamp_f32(sum_r), clamp_f32(sum_g), clamp_f32(sum_b))
}

#[inline]
fn clamp_f32(v: f32) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

/// Average over a disc of `radius`, applied only where the whole disc fits.
///
/// Pixels closer than `radius` to any border keep their values. Sums are
/// truncated to integers and clamped, so a flat region may come out one
/// level darker. Radius 0 is the identity, and a radius
/// whose window is as large as the image leaves it unchanged.
pub fn circular_blur(image: Image, radius: usize) -> Image {
    let (w, h) = image.dimensions();
    if radius == 0 || w <= 2 * radius || h <= 2 * radius {
        return image;
    }

    let kernel = DiscKernel::new(radius);
    tracing::trace!(radius, cells = kernel.offsets().len(), "disc kernel");
    let weight = kernel.weight();

    let mut out = image.clone();
    for_each_chunk(out.pixels_mut(), w, |y, row| {
        if y < radius || y >= h - radius {
            return;
        }
        for x in radius..w - radius {
            let (mut sum_r, mut sum_g, mut sum_b) = (0.0f32, 0.0f32, 0.0f32);
            for &(dx, dy) in kernel.offsets() {
                let sx = (x as isize + dx) as usize;
                let sy = (y as isize + dy) as usize;
                let p = image.pixels()[sy * w + sx];
                sum_r += f32::from(p.r) * weight;
                sum_g += f32::from(p.g) * weight;
                sum_b += f32::from(p.b) * weight;
            }
            row[x] = Bgr8::new(trunc_channel(sum_r), trunc_channel(sum_g), trunc_channel(sum_b));
        }
    });
    out
}

#[inline]
fn trunc_channel(v: f32) -> u8 {
    (v as i32).clamp(0, 255) as u8
}
