//! # zenbmpfx
//!
//! 24-bit BMP decoder and encoder with a set of classic image filters.
//!
//! ## Supported Formats
//!
//! - **BMP**, uncompressed, 24 bits per pixel, BITMAPINFOHEADER or later
//!   header versions. Bottom-up and top-down row order on decode; the encoder
//!   always writes bottom-up with a 40-byte info header.
//!
//! ## Filters
//!
//! | Argument | Filter |
//! |---|---|
//! | `-crop W H` | keep the top-left `W x H` region |
//! | `-gs` | grayscale (luma) |
//! | `-neg` | negative |
//! | `-sharp` | 3x3 sharpen |
//! | `-edge T` | grayscale, Laplacian, threshold |
//! | `-blur S` | separable Gaussian blur |
//! | `-circular_blur R` | disc average |
//! | `-image_split B` | block-average pixelation |
//!
//! See [`filter`] for exact semantics.
//!
//! ## Non-Goals
//!
//! - Compressed, palette or non-24-bit bitmaps
//! - Color management
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmpfx::{Filter, Pipeline, Unstoppable, decode_bmp, encode_bmp};
//!
//! let data = std::fs::read("in.bmp")?;
//!
//! // One-shot
//! let out = Pipeline::new()
//!     .filter(Filter::Grayscale)
//!     .filter(Filter::GaussianBlur { sigma: 1.5 })
//!     .run(&data, Unstoppable)?;
//! std::fs::write("out.bmp", out)?;
//!
//! // Or step by step
//! let image = decode_bmp(&data, Unstoppable)?;
//! let image = Filter::Negative.apply(image)?;
//! let bytes = encode_bmp(&image, Unstoppable)?;
//! # let _ = bytes;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

mod error;
mod image;
mod limits;
mod pixel;

pub mod bmp;
pub mod filter;
pub mod pipeline;

// Re-exports
pub use bmp::{decode as decode_bmp, decode_with_limits, encode as encode_bmp};
pub use enough::{Stop, Unstoppable};
pub use error::BmpFxError;
pub use filter::Filter;
pub use image::Image;
pub use limits::Limits;
pub use pipeline::{ParsedArgs, Pipeline, parse_filter_args};
pub use pixel::Bgr8;
