//! Integer kernel convolution with edge-clamped sampling.

use super::kernel::IntKernel;
use super::{color, for_each_chunk};
use crate::image::Image;
use crate::pixel::Bgr8;

/// Convolve `image` with `kernel`.
///
/// Samples outside the image repeat the nearest edge pixel. Each channel's
/// sum is clamped into `[0, 255]`.
pub fn convolve(image: &Image, kernel: &IntKernel) -> Image {
    let (w, h) = image.dimensions();
    let mut out = Image::new(w, h);
    let half = kernel.radius() as isize;
    let size = kernel.size();

    for_each_chunk(out.pixels_mut(), w, |y, row| {
        let y = y as isize;
        for (x, dst) in row.iter_mut().enumerate() {
            let x = x as isize;
            let (mut sum_r, mut sum_g, mut sum_b) = (0i32, 0i32, 0i32);
            for (i, &k) in kernel.weights().iter().enumerate() {
                if k == 0 {
                    continue;
                }
                let kx = (i % size) as isize;
                let ky = (i / size) as isize;
                let p = image.clamped(x - half + kx, y - half + ky);
                sum_r += i32::from(p.r) * k;
                sum_g += i32::from(p.g) * k;
                sum_b += i32::from(p.b) * k;
            }
            *dst = Bgr8::new(clamp_channel(sum_r), clamp_channel(sum_g), clamp_channel(sum_b));
        }
    });
    out
}

/// Sharpen with `[[0,-1,0],[-1,5,-1],[0,-1,0]]`.
pub fn sharpen(image: &Image) -> Image {
    convolve(image, &IntKernel::sharpen())
}

/// Grayscale, Laplacian `[[0,-1,0],[-1,4,-1],[0,-1,0]]`, then
/// [`threshold`](color::threshold) on the red channel.
pub fn edge_detect(image: Image, threshold: f64) -> Image {
    let gray = color::grayscale(image);
    let edges = convolve(&gray, &IntKernel::laplacian());
    color::threshold(edges, threshold)
}

#[inline]
fn clamp_channel(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}
