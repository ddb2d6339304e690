//! Convolution kernels.
//!
//! - [`IntKernel`]: square odd-sized integer weights (sharpen, Laplacian)
//! - [`GaussianKernel`]: normalized 1-D weights for the separable blur
//! - [`DiscKernel`]: uniform weights over a disc for the circular blur
//!
//! Kernels are built per filter call and dropped when it returns.

use crate::error::BmpFxError;

/// Square integer kernel with odd side length, weights row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntKernel {
    size: usize,
    weights: Vec<i32>,
}

impl IntKernel {
    /// Creates a kernel from `size * size` row-major weights.
    ///
    /// `size` must be odd.
    pub fn new(size: usize, weights: Vec<i32>) -> Result<Self, BmpFxError> {
        if size % 2 == 0 {
            return Err(BmpFxError::InvalidParameter(format!(
                "kernel size {size} must be odd"
            )));
        }
        if size.checked_mul(size) != Some(weights.len()) {
            return Err(BmpFxError::InvalidParameter(format!(
                "kernel data size {} doesn't match {size}x{size}",
                weights.len()
            )));
        }
        Ok(Self { size, weights })
    }

    /// `[[0,-1,0],[-1,5,-1],[0,-1,0]]`.
    pub fn sharpen() -> Self {
        Self {
            size: 3,
            weights: vec![
                0, -1, 0,
                -1, 5, -1,
                0, -1, 0,
            ],
        }
    }

    /// `[[0,-1,0],[-1,4,-1],[0,-1,0]]`.
    pub fn laplacian() -> Self {
        Self {
            size: 3,
            weights: vec![
                0, -1, 0,
                -1, 4, -1,
                0, -1, 0,
            ],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Half the side length.
    #[inline]
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    #[inline]
    pub fn weights(&self) -> &[i32] {
        &self.weights
    }
}

/// Normalized 1-D Gaussian weights over `[-radius, radius]`.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianKernel {
    radius: usize,
    weights: Vec<f32>,
}

impl GaussianKernel {
    /// Builds the kernel for standard deviation `sigma`.
    ///
    /// Radius is `ceil(3 sigma)`. Each weight is
    /// `exp(-x² / (2σ²)) / sqrt(2πσ²)` evaluated in `f64`, stored as `f32`,
    /// then divided by the `f32` sum of all weights.
    pub fn new(sigma: f64) -> Result<Self, BmpFxError> {
        Self::check_sigma(sigma)?;
        let radius = (3.0 * sigma).ceil() as usize;
        let two_sigma_sq = 2.0 * sigma * sigma;
        let norm = (2.0 * std::f64::consts::PI * sigma * sigma).sqrt();

        let mut weights = Vec::with_capacity(2 * radius + 1);
        let mut sum = 0.0f32;
        let r = radius as i64;
        for x in -r..=r {
            let w = ((-((x * x) as f64) / two_sigma_sq).exp() / norm) as f32;
            weights.push(w);
            sum += w;
        }
        for w in &mut weights {
            *w /= sum;
        }
        Ok(Self { radius, weights })
    }

    /// Largest accepted sigma (kernel radius 30 000).
    pub const MAX_SIGMA: f64 = 10_000.0;

    pub(crate) fn check_sigma(sigma: f64) -> Result<(), BmpFxError> {
        if sigma.is_finite() && sigma > 0.0 && sigma <= Self::MAX_SIGMA {
            Ok(())
        } else {
            Err(BmpFxError::InvalidParameter(format!(
                "gaussian sigma must be in (0, {}], got {sigma}",
                Self::MAX_SIGMA
            )))
        }
    }

    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Weights for offsets `-radius..=radius`.
    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

/// Offsets of a disc of radius `r` (`dx² + dy² <= r²`), all weighted
/// `1 / count`.
#[derive(Clone, Debug, PartialEq)]
pub struct DiscKernel {
    radius: usize,
    offsets: Vec<(isize, isize)>,
    weight: f32,
}

impl DiscKernel {
    pub fn new(radius: usize) -> Self {
        let r = radius as isize;
        let r_sq = r * r;
        let mut offsets = Vec::new();
        // Row-major over the (2r+1)² window, the order samples are summed in.
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r_sq {
                    offsets.push((dx, dy));
                }
            }
        }
        let weight = 1.0f32 / offsets.len() as f32;
        Self {
            radius,
            offsets,
            weight,
        }
    }

    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// `(dx, dy)` pairs inside the disc.
    #[inline]
    pub fn offsets(&self) -> &[(isize, isize)] {
        &self.offsets
    }

    /// Weight of each in-disc cell.
    #[inline]
    pub fn weight(&self) -> f32 {
        self.weight
    }
}
