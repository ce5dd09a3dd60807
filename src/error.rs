//! Error types for panosweep

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Panosweep error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport error (device unreachable, auth rejected, bad status)
    #[error("HTTP error: {0}")]
    Http(#[from] Box<ureq::Error>),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file parse error (including missing required keys)
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Vertical CV calibration is deliberately unimplemented
    #[error(
        "Vertical CV calibration is not supported; use brute-force calibration for the vertical axis"
    )]
    VerticalCvUnsupported,

    /// Comparator produced output that is not a correlation value
    #[error("Comparator error: {0}")]
    Comparator(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        Error::Http(Box::new(err))
    }
}
