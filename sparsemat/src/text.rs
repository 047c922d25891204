//! Line-oriented text codec.
//!
//! ```text
//! rows=<rows>
//! cols=<cols>
//! (<row>, <col>, <value>)
//! ...
//! ```
//!
//! Parentheses around entries are optional when parsing and always written.
//! Entries are written in row-major order.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::matrix::SparseMatrix;

fn parse_header(line_no: usize, line: Option<&str>, key: &str) -> Result<usize> {
    let line = line.ok_or_else(|| Error::format(line_no, "", format!("missing `{key}=` header")))?;

    let value = match line.split_once('=') {
        Some((k, v)) if k.trim() == key => v.trim(),
        _ => return Err(Error::format(line_no, line, format!("expected `{key}=<integer>`"))),
    };

    value.parse::<usize>().map_err(|_| {
        let reason = match value.parse::<i64>() {
            Ok(_) => format!("`{key}` must not be negative"),
            Err(_) => format!("`{key}` is not an integer"),
        };
        Error::format(line_no, line, reason)
    })
}

fn parse_entry(line_no: usize, line: &str) -> Result<(usize, usize, i64)> {
    let stripped: String = line.chars().filter(|c| !matches!(c, '(' | ')')).collect();
    let fields: Vec<&str> = stripped.split(',').map(str::trim).collect();

    let [row, col, value] = fields[..] else {
        return Err(Error::format(
            line_no,
            line,
            format!("expected 3 comma-separated integers, found {} field(s)", fields.len()),
        ));
    };

    let index = |field: &str, name: &str| {
        field
            .parse::<usize>()
            .map_err(|_| Error::format(line_no, line, format!("{name} index {field:?} is not a non-negative integer")))
    };
    let row = index(row, "row")?;
    let col = index(col, "column")?;
    let value = value
        .parse::<i64>()
        .map_err(|_| Error::format(line_no, line, format!("value {value:?} is not an integer")))?;

    Ok((row, col, value))
}

impl SparseMatrix {
    /// Parses the text form of a matrix.
    ///
    /// Fails with [`Error::Format`] on a malformed header or data line, and on
    /// an entry whose coordinates fall outside the declared dimensions.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.trim().lines().map(str::trim);

        let rows = parse_header(1, lines.next(), "rows")?;
        let cols = parse_header(2, lines.next(), "cols")?;

        let mut m = SparseMatrix::new(rows, cols);
        for (i, line) in lines.enumerate() {
            let line_no = i + 3;
            let (row, col, value) = parse_entry(line_no, line)?;
            if !m.contains(row, col) {
                return Err(Error::format(
                    line_no,
                    line,
                    format!("({row}, {col}) is outside a {rows}x{cols} matrix"),
                ));
            }
            m.set(row, col, value);
        }
        Ok(m)
    }

    /// Serializes the matrix; identical to its [`Display`](fmt::Display) output.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SparseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rows={}", self.rows())?;
        writeln!(f, "cols={}", self.cols())?;
        for e in self.entries() {
            writeln!(f, "({}, {}, {})", e.row, e.col, e.value)?;
        }
        Ok(())
    }
}

impl FromStr for SparseMatrix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
