//! Pixel and neighborhood filters over [`Image`].
//!
//! Every filter takes the image by value and returns its replacement, so a
//! pipeline can chain them without aliasing. Convolution-style filters clamp
//! each channel into `[0, 255]` independently before storing it.
//!
//! | Filter | Function |
//! |---|---|
//! | [`Filter::Crop`] | [`crop`] |
//! | [`Filter::Grayscale`] | [`grayscale`] |
//! | [`Filter::Negative`] | [`negative`] |
//! | [`Filter::Sharpen`] | [`sharpen`] |
//! | [`Filter::EdgeDetect`] | [`edge_detect`] |
//! | [`Filter::GaussianBlur`] | [`gaussian_blur`] |
//! | [`Filter::CircularBlur`] | [`circular_blur`] |
//! | [`Filter::ImageSplit`] | [`image_split`] |
//!
//! With the `parallel` feature the row loops run on the rayon pool. Each
//! output row reads only the untouched input, so results are identical.

mod blur;
mod color;
mod convolve;
mod crop;
pub mod kernel;
mod pixelate;

pub use blur::{circular_blur, gaussian_blur};
pub use color::{grayscale, negative, threshold};
pub use convolve::{convolve, edge_detect, sharpen};
pub use crop::crop;
pub use pixelate::image_split;

use std::fmt;

use crate::error::BmpFxError;
use crate::image::Image;
use crate::pixel::Bgr8;

/// One step of a filter pipeline, with its parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum Filter {
    /// Keep the top-left `min(width, W) x min(height, H)` region.
    Crop { width: u32, height: u32 },
    /// Set every channel to the pixel's luma.
    Grayscale,
    /// Invert every channel.
    Negative,
    /// 3x3 sharpen kernel, edge-clamped.
    Sharpen,
    /// Grayscale, Laplacian, then black/white by `red / 255 < threshold`.
    EdgeDetect { threshold: f64 },
    /// Separable Gaussian blur with radius `ceil(3 sigma)`.
    GaussianBlur { sigma: f64 },
    /// Disc average; leaves a `radius`-pixel border untouched.
    CircularBlur { radius: u32 },
    /// Block-average pixelation, padding the canvas to whole blocks.
    ImageSplit { block_size: u32 },
}

impl Filter {
    /// Short name used on the command line (without the leading `-`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Crop { .. } => "crop",
            Self::Grayscale => "gs",
            Self::Negative => "neg",
            Self::Sharpen => "sharp",
            Self::EdgeDetect { .. } => "edge",
            Self::GaussianBlur { .. } => "blur",
            Self::CircularBlur { .. } => "circular_blur",
            Self::ImageSplit { .. } => "image_split",
        }
    }

    /// Reject parameters that have no meaningful result.
    pub fn validate(&self) -> Result<(), BmpFxError> {
        match *self {
            Self::GaussianBlur { sigma } => kernel::GaussianKernel::check_sigma(sigma),
            Self::ImageSplit { block_size: 0 } => Err(BmpFxError::InvalidParameter(
                "image_split block size must be positive".into(),
            )),
            _ => Ok(()),
        }
    }

    /// Size of the image this filter produces from a `width` x `height` input,
    /// or `None` when it would overflow `usize`.
    pub fn output_dimensions(&self, width: usize, height: usize) -> Option<(usize, usize)> {
        match *self {
            Self::Crop {
                width: cw,
                height: ch,
            } => Some((width.min(cw as usize), height.min(ch as usize))),
            Self::ImageSplit { block_size: 0 } => Some((width, height)),
            Self::ImageSplit { block_size } => {
                pixelate::padded_dimensions(width, height, block_size as usize)
            }
            _ => Some((width, height)),
        }
    }

    /// Run this filter, consuming `image` and returning the result.
    pub fn apply(&self, image: Image) -> Result<Image, BmpFxError> {
        tracing::trace!(filter = %self, width = image.width(), height = image.height(), "apply");
        Ok(match *self {
            Self::Crop { width, height } => crop(image, width as usize, height as usize),
            Self::Grayscale => grayscale(image),
            Self::Negative => negative(image),
            Self::Sharpen => sharpen(&image),
            Self::EdgeDetect { threshold } => edge_detect(image, threshold),
            Self::GaussianBlur { sigma } => gaussian_blur(&image, sigma)?,
            Self::CircularBlur { radius } => circular_blur(image, radius as usize),
            Self::ImageSplit { block_size } => image_split(&image, block_size as usize)?,
        })
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Crop { width, height } => write!(f, "-crop {width} {height}"),
            Self::EdgeDetect { threshold } => write!(f, "-edge {threshold}"),
            Self::GaussianBlur { sigma } => write!(f, "-blur {sigma}"),
            Self::CircularBlur { radius } => write!(f, "-circular_blur {radius}"),
            Self::ImageSplit { block_size } => write!(f, "-image_split {block_size}"),
            _ => write!(f, "-{}", self.name()),
        }
    }
}

/// Call `f(index, chunk)` for consecutive `chunk_len`-pixel chunks of `buf`.
///
/// Used with `chunk_len = width` to produce one output row per call.
pub(crate) fn for_each_chunk<F>(buf: &mut [Bgr8], chunk_len: usize, f: F)
where
    F: Fn(usize, &mut [Bgr8]) + Send + Sync,
{
    if chunk_len == 0 {
        return;
    }
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        buf.par_chunks_mut(chunk_len)
            .enumerate()
            .for_each(|(i, chunk)| f(i, chunk));
    }
    #[cfg(not(feature = "parallel"))]
    {
        buf.chunks_mut(chunk_len)
            .enumerate()
            .for_each(|(i, chunk)| f(i, chunk));
    }
}

/// Replace every pixel `p` with `f(p)`.
pub(crate) fn map_pixels<F>(mut image: Image, f: F) -> Image
where
    F: Fn(Bgr8) -> Bgr8 + Send + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        image.pixels_mut().par_iter_mut().for_each(|p| *p = f(*p));
    }
    #[cfg(not(feature = "parallel"))]
    {
        image.pixels_mut().iter_mut().for_each(|p| *p = f(*p));
    }
    image
}
