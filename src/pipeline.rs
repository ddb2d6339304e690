//! Decode, filter, encode.

use std::fs;
use std::path::{Path, PathBuf};

use enough::Stop;

use crate::bmp;
use crate::error::BmpFxError;
use crate::filter::Filter;
use crate::image::Image;
use crate::limits::Limits;

/// An ordered list of filters applied between a BMP decode and encode.
///
/// ```
/// use zenbmpfx::{Bgr8, Filter, Image, Pipeline, Unstoppable};
///
/// let pipeline = Pipeline::new()
///     .filter(Filter::Negative)
///     .filter(Filter::Crop { width: 2, height: 2 });
/// let out = pipeline
///     .apply(Image::filled(4, 4, Bgr8::gray(10)), Unstoppable)
///     .unwrap();
/// assert_eq!(out.dimensions(), (2, 2));
/// assert_eq!(out.pixels()[0], Bgr8::gray(245));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    filters: Vec<Filter>,
    limits: Option<Limits>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject decoded images, and filter outputs, larger than `limits`.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Append a filter (builder form of [`push`](Self::push)).
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn push(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn limits(&self) -> Option<&Limits> {
        self.limits.as_ref()
    }

    /// Run every filter in order.
    ///
    /// All filter parameters are checked before the first one runs, so a bad
    /// parameter late in the list fails without doing any work. `stop` is
    /// polled between stages.
    pub fn apply(&self, image: Image, stop: impl Stop) -> Result<Image, BmpFxError> {
        self.apply_dyn(image, &stop)
    }

    fn apply_dyn(&self, mut image: Image, stop: &dyn Stop) -> Result<Image, BmpFxError> {
        for filter in &self.filters {
            filter.validate()?;
        }
        for (stage, filter) in self.filters.iter().enumerate() {
            stop.check()?;
            if let Some(limits) = &self.limits {
                check_output(limits, filter, &image)?;
            }
            image = filter.apply(image)?;
            tracing::debug!(
                stage,
                filter = %filter,
                width = image.width(),
                height = image.height(),
                "filter applied"
            );
        }
        Ok(image)
    }

    /// Decode `data`, run the filters, and encode the result.
    pub fn run(&self, data: &[u8], stop: impl Stop) -> Result<Vec<u8>, BmpFxError> {
        let image = bmp::decode_dyn(data, self.limits.as_ref(), &stop)?;
        let image = self.apply_dyn(image, &stop)?;
        stop.check()?;
        bmp::encode_dyn(&image, &stop)
    }

    /// [`run`](Self::run) from `input` to `output`.
    ///
    /// The result is written to a temporary file beside `output` and renamed
    /// into place once complete. On any failure `output` is left as it was.
    pub fn run_file(
        &self,
        input: &Path,
        output: &Path,
        stop: impl Stop,
    ) -> Result<(), BmpFxError> {
        let data = fs::read(input)?;
        tracing::info!(path = %input.display(), bytes = data.len(), "read input");
        let encoded = self.run(&data, stop)?;

        let tmp = temp_path(output);
        if let Err(e) = fs::write(&tmp, &encoded).and_then(|()| fs::rename(&tmp, output)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        tracing::info!(path = %output.display(), bytes = encoded.len(), "wrote output");
        Ok(())
    }
}

/// Hold a stage's output to the same limits as the decoded input.
fn check_output(limits: &Limits, filter: &Filter, image: &Image) -> Result<(), BmpFxError> {
    let too_large = || BmpFxError::DimensionsTooLarge {
        width: image.width() as u64,
        height: image.height() as u64,
    };
    let (w, h) = filter
        .output_dimensions(image.width(), image.height())
        .ok_or_else(too_large)?;
    let w = u32::try_from(w).map_err(|_| too_large())?;
    let h = u32::try_from(h).map_err(|_| too_large())?;
    limits.check(w, h)
}

fn temp_path(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out.bmp".to_string());
    output.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}

/// Filters parsed from an argument list, plus any names that were not
/// recognized.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedArgs {
    pub filters: Vec<Filter>,
    pub unknown: Vec<String>,
}

impl ParsedArgs {
    pub fn into_pipeline(self) -> Pipeline {
        Pipeline {
            filters: self.filters,
            limits: None,
        }
    }
}

/// Parse `-crop W H -gs -neg -sharp -edge T -blur S -circular_blur R
/// -image_split B` into filters, preserving order.
///
/// Unrecognized tokens are collected in [`ParsedArgs::unknown`] rather than
/// failing. A missing or unparsable parameter, a negative size or sigma, or a
/// non-finite threshold is [`BmpFxError::InvalidParameter`]. The edge
/// threshold is otherwise taken as given.
///
/// ```
/// use zenbmpfx::{Filter, parse_filter_args};
///
/// let parsed = parse_filter_args(["-crop", "8", "4", "-gs", "-wobble"]).unwrap();
/// assert_eq!(
///     parsed.filters,
///     [Filter::Crop { width: 8, height: 4 }, Filter::Grayscale]
/// );
/// assert_eq!(parsed.unknown, ["-wobble"]);
/// ```
pub fn parse_filter_args<I, S>(args: I) -> Result<ParsedArgs, BmpFxError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<S> = args.into_iter().collect();
    let mut tokens = args.iter().map(S::as_ref);
    let mut parsed = ParsedArgs::default();

    while let Some(token) = tokens.next() {
        let filter = match token {
            "-crop" => Filter::Crop {
                width: param(&mut tokens, "-crop", "width")?,
                height: param(&mut tokens, "-crop", "height")?,
            },
            "-gs" => Filter::Grayscale,
            "-neg" => Filter::Negative,
            "-sharp" => Filter::Sharpen,
            "-edge" => Filter::EdgeDetect {
                threshold: finite(param(&mut tokens, "-edge", "threshold")?, "-edge")?,
            },
            "-blur" => Filter::GaussianBlur {
                sigma: non_negative(param(&mut tokens, "-blur", "sigma")?, "-blur")?,
            },
            "-circular_blur" => Filter::CircularBlur {
                radius: param(&mut tokens, "-circular_blur", "radius")?,
            },
            "-image_split" => Filter::ImageSplit {
                block_size: param(&mut tokens, "-image_split", "block size")?,
            },
            other => {
                tracing::warn!(arg = other, "unknown filter argument");
                parsed.unknown.push(other.to_string());
                continue;
            }
        };
        tracing::trace!(filter = %filter, "parsed filter");
        parsed.filters.push(filter);
    }
    Ok(parsed)
}

fn param<'a, T: std::str::FromStr>(
    tokens: &mut impl Iterator<Item = &'a str>,
    flag: &str,
    what: &str,
) -> Result<T, BmpFxError> {
    let raw = tokens
        .next()
        .ok_or_else(|| BmpFxError::InvalidParameter(format!("{flag}: missing {what}")))?;
    raw.parse()
        .map_err(|_| BmpFxError::InvalidParameter(format!("{flag}: bad {what} {raw:?}")))
}

fn finite(v: f64, flag: &str) -> Result<f64, BmpFxError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(BmpFxError::InvalidParameter(format!(
            "{flag}: expected a finite number, got {v}"
        )))
    }
}

fn non_negative(v: f64, flag: &str) -> Result<f64, BmpFxError> {
    if v.is_finite() && v >= 0.0 {
        Ok(v)
    } else {
        Err(BmpFxError::InvalidParameter(format!(
            "{flag}: expected a non-negative number, got {v}"
        )))
    }
}
