use thiserror::Error;

/// Result type alias using the crate's [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Matrix shape as `(rows, cols)`
pub type Shape = (usize, usize);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A header or data line could not be parsed.
    ///
    /// `line` is 1-based and counts lines of the trimmed input.
    #[error("invalid entry at line {line}: {text:?} ({reason})")]
    Format {
        line: usize,
        text: String,
        reason: String,
    },

    #[error("cannot {op} matrices of shape {lhs:?} and {rhs:?}")]
    DimensionMismatch {
        op: &'static str,
        lhs: Shape,
        rhs: Shape,
    },

    #[error("integer overflow during {op} at ({row}, {col})")]
    Overflow {
        op: &'static str,
        row: usize,
        col: usize,
    },

    #[error("entry ({row}, {col}) is outside a {rows}x{cols} matrix")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

impl Error {
    pub(crate) fn format(line: usize, text: &str, reason: impl Into<String>) -> Self {
        Self::Format {
            line,
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}
