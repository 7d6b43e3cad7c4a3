use thiserror::Error;

/// Failures raised while loading or slicing a [`crate::StatSource`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatSourceError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("source `{name}` contains no records")]
    EmptyInput { name: String },
    #[error("range starting at {base} with {count} records exceeds the {len} records available")]
    RangeOutOfBounds {
        base: usize,
        count: usize,
        len: usize,
    },
}

impl StatSourceError {
    /// Returns a stable identifier for the failure.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "STAT_SOURCE_IO",
            Self::Csv(_) => "STAT_SOURCE_CSV",
            Self::EmptyInput { .. } => "STAT_SOURCE_EMPTY_INPUT",
            Self::RangeOutOfBounds { .. } => "STAT_SOURCE_RANGE_OUT_OF_BOUNDS",
        }
    }
}
