use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the API boundary of the buffer engine.
///
/// Annotator computations never fail; only malformed ranges, bad
/// mutation targets and dictionary/config loading can.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid range: start {start} is after end {end}")]
    InvertedRange { start: usize, end: usize },

    #[error("offset {offset} out of bounds for text of length {len}")]
    OutOfBounds { offset: usize, len: usize },

    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },

    #[error("ranges for tag '{tag}' overlap at offset {offset}")]
    OverlappingRanges { tag: String, offset: usize },

    #[error("invalid ignore pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("dictionary error: {0}")]
    Dictionary(#[from] fst::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
