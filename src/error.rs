use enough::StopReason;

/// Errors from BMP decoding, encoding and filtering.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpFxError {
    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u64, height: u64 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("cannot encode an image with zero height")]
    EmptyImage,

    #[error("operation cancelled")]
    Cancelled(StopReason),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl BmpFxError {
    /// Whether this is a malformed-container error: bad signature, broken
    /// header fields, or truncated data.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedFormat | Self::InvalidHeader(_) | Self::UnexpectedEof
        )
    }

    /// Whether the container is well formed but uses a variant this crate
    /// does not decode (bit depth other than 24, compression).
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedFormat(_))
    }
}

impl From<StopReason> for BmpFxError {
    fn from(r: StopReason) -> Self {
        BmpFxError::Cancelled(r)
    }
}
