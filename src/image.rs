//! Flat row-major pixel buffer.

use crate::error::BmpFxError;
use crate::pixel::Bgr8;

/// A rectangular grid of [`Bgr8`] pixels, top row first.
///
/// Pixel `(x, y)` lives at index `y * width + x`. The buffer always holds
/// exactly `width * height` pixels; operations that change the size build a
/// new `Image`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Bgr8>,
}

impl Image {
    /// A black image of the given size.
    ///
    /// # Panics
    ///
    /// If `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Bgr8::BLACK)
    }

    /// An image with every pixel set to `pixel`.
    ///
    /// # Panics
    ///
    /// If `width * height` overflows `usize`.
    pub fn filled(width: usize, height: usize, pixel: Bgr8) -> Self {
        let len = width
            .checked_mul(height)
            .unwrap_or_else(|| panic!("image size {width}x{height} overflows usize"));
        Self {
            width,
            height,
            pixels: vec![pixel; len],
        }
    }

    /// Wrap an existing pixel vector. Its length must equal `width * height`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Bgr8>) -> Result<Self, BmpFxError> {
        let expected = width.checked_mul(height).ok_or(BmpFxError::DimensionsTooLarge {
            width: width as u64,
            height: height as u64,
        })?;
        if pixels.len() != expected {
            return Err(BmpFxError::InvalidParameter(format!(
                "{} pixels given for a {width}x{height} image",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Crate-internal constructor for buffers whose length is already right.
    pub(crate) fn from_vec(width: usize, height: usize, pixels: Vec<Bgr8>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Bgr8) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// True when the image holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn pixels(&self) -> &[Bgr8] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Bgr8] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<Bgr8> {
        self.pixels
    }

    /// Row `y`, left to right.
    ///
    /// # Panics
    ///
    /// If `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &[Bgr8] {
        assert!(y < self.height, "row {y} out of bounds (height {})", self.height);
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// Mutable row `y`.
    ///
    /// # Panics
    ///
    /// If `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [Bgr8] {
        assert!(y < self.height, "row {y} out of bounds (height {})", self.height);
        &mut self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// Rows top to bottom. Yields nothing for a zero-width image.
    pub fn rows(&self) -> impl Iterator<Item = &[Bgr8]> {
        self.pixels.chunks_exact(self.width.max(1))
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Bgr8> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Overwrite pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// If `(x, y)` is outside the image.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, pixel: Bgr8) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.pixels[y * self.width + x] = pixel;
    }

    /// Pixel at `(x, y)` with coordinates clamped into the image, so samples
    /// past an edge repeat the nearest edge pixel.
    ///
    /// # Panics
    ///
    /// If the image is empty.
    #[inline]
    pub fn clamped(&self, x: isize, y: isize) -> Bgr8 {
        let cx = x.clamp(0, self.width as isize - 1) as usize;
        let cy = y.clamp(0, self.height as isize - 1) as usize;
        self.pixels[cy * self.width + cx]
    }

    /// Borrow as an [`imgref::ImgRef`] (stride equals width).
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, Bgr8> {
        imgref::ImgRef::new(&self.pixels, self.width, self.height)
    }

    /// Convert into an [`imgref::ImgVec`] without copying.
    #[cfg(feature = "imgref")]
    pub fn into_imgvec(self) -> imgref::ImgVec<Bgr8> {
        imgref::ImgVec::new(self.pixels, self.width, self.height)
    }
}

#[cfg(feature = "imgref")]
impl<P: Copy + Into<Bgr8>> From<imgref::ImgRef<'_, P>> for Image {
    fn from(img: imgref::ImgRef<'_, P>) -> Self {
        let mut pixels = Vec::with_capacity(img.width() * img.height());
        for row in img.rows() {
            pixels.extend(row.iter().map(|&p| p.into()));
        }
        Self {
            width: img.width(),
            height: img.height(),
            pixels,
        }
    }
}
