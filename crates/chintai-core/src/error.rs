//! Error types for the chintai-core library.

use thiserror::Error;

/// Main error type for the chintai library.
#[derive(Error, Debug)]
pub enum ChintaiError {
    /// A field could not be parsed outside of a pipeline stage.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A pipeline stage failed; the whole file is rejected.
    #[error("stage '{stage}' failed: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: ParseError,
    },

    /// A raw file failed to preprocess.
    #[error("failed to preprocess {}: {source}", .path.display())]
    File {
        path: std::path::PathBuf,
        #[source]
        source: Box<ChintaiError>,
    },

    /// Reading or writing a CSV file failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The load directory pattern was malformed.
    #[error("invalid path pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No raw files were found in the load directory.
    #[error("no raw listing files found in {0}")]
    NoInput(String),
}

/// Errors raised while normalizing listing fields.
///
/// Expected gaps in the data (no commute info, a `-` fee, ...) never end up
/// here; parsers map them to sentinels instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The architecture label is not one of the four known categories.
    #[error("unknown architecture label: {0:?}")]
    UnknownArchitecture(String),

    /// A column required by a stage is absent from the table.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// Row has a different number of cells than the table has columns.
    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// Result type for the chintai library.
pub type Result<T> = std::result::Result<T, ChintaiError>;
