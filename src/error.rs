//! Error types shared across the crate.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PlotError>;

/// Errors raised by axes, figures, and their collaborators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlotError {
    /// Two sequences that must be co-indexed have different lengths.
    #[error("length mismatch for {what}: expected {expected}, found {found}")]
    LengthMismatch {
        /// What was being compared.
        what: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        found: usize,
    },

    /// Array shape does not match its index arrays.
    #[error("shape mismatch: values are {rows}x{cols}, expected {expected_rows}x{expected_cols}")]
    ShapeMismatch {
        /// Number of rows found.
        rows: usize,
        /// Number of columns found.
        cols: usize,
        /// Number of rows expected.
        expected_rows: usize,
        /// Number of columns expected.
        expected_cols: usize,
    },

    /// Epoch access on an axis that does not use a GPS scale.
    #[error("the current {axis} scale ({scale:?}) is not a GPS scale")]
    NotGpsScale {
        /// Axis name (`x` or `y`).
        axis: &'static str,
        /// Name of the active scale.
        scale: String,
    },

    /// Input could not be interpreted as a GPS time.
    #[error("cannot convert {input:?} to a GPS time")]
    InvalidGpsTime {
        /// The offending input.
        input: String,
    },

    /// An axis limit could not be interpreted as a number.
    #[error("invalid axis limit {value:?}")]
    InvalidLimit {
        /// The offending limit.
        value: String,
    },

    /// Unknown axis scale name.
    #[error("unknown axis scale {0:?}")]
    UnknownScale(String),

    /// Unknown projection name.
    #[error("unknown projection {0:?}")]
    UnknownProjection(String),

    /// Unknown normalization name.
    #[error("unrecognised value for norm {0:?}")]
    InvalidNorm(String),

    /// Unknown colormap name.
    #[error("unknown colormap {0:?}")]
    UnknownColormap(String),

    /// Invalid positional arguments to a plotting call.
    #[error("invalid plot arguments: {0}")]
    InvalidPlotArgs(String),

    /// A colorbar was requested but no mappable artist exists.
    #[error("no mappable was found to use for colorbar creation")]
    NoMappable,

    /// The referenced artist does not exist or is not mappable.
    #[error("artist {0} is not a mappable")]
    NotMappable(usize),

    /// The referenced axes index does not exist.
    #[error("no axes at index {0}")]
    NoSuchAxes(usize),

    /// The renderer rejected a render list.
    #[error("render failed: {0}")]
    Render(String),

    /// Runtime configuration could not be loaded.
    #[error("invalid rc configuration: {0}")]
    Config(String),
}
