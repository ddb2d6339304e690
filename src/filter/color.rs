//! Per-pixel filters.

use super::map_pixels;
use crate::image::Image;
use crate::pixel::Bgr8;

/// Replace every pixel with its luma on all three channels.
///
/// See [`Bgr8::luma`]. Idempotent: a gray pixel maps to itself.
pub fn grayscale(image: Image) -> Image {
    map_pixels(image, |p| Bgr8::gray(p.luma()))
}

/// Invert every channel (`255 - c`). Applying it twice is the identity.
pub fn negative(image: Image) -> Image {
    map_pixels(image, Bgr8::inverted)
}

/// Binarize on the red channel: black where `r / 255 < threshold`, white
/// otherwise. Meant for grayscale input, where every channel is equal.
///
/// `threshold` is not range-checked; values above 1 give an all-black image
/// and values at or below 0 an all-white one.
pub fn threshold(image: Image, threshold: f64) -> Image {
    map_pixels(image, |p| {
        if f64::from(p.r) / 255.0 < threshold {
            Bgr8::BLACK
        } else {
            Bgr8::WHITE
        }
    })
}
