use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::matrix::SparseMatrix;

fn check_same_shape(op: &'static str, a: &SparseMatrix, b: &SparseMatrix) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(Error::DimensionMismatch {
            op,
            lhs: a.shape(),
            rhs: b.shape(),
        });
    }
    Ok(())
}

/// Copies `a`, then folds every stored cell of `b` into the copy with `combine`.
fn merge<F>(op: &'static str, a: &SparseMatrix, b: &SparseMatrix, combine: F) -> Result<SparseMatrix>
where
    F: Fn(i64, i64) -> Option<i64>,
{
    check_same_shape(op, a, b)?;

    let mut result = SparseMatrix::new(a.rows(), a.cols());
    for e in a.entries() {
        result.set(e.row, e.col, e.value);
    }
    for e in b.entries() {
        let value = combine(result.get(e.row, e.col), e.value).ok_or(Error::Overflow {
            op,
            row: e.row,
            col: e.col,
        })?;
        result.set(e.row, e.col, value);
    }
    Ok(result)
}

/// Element-wise `a + b`. Cells that cancel to zero are not stored.
pub fn add(a: &SparseMatrix, b: &SparseMatrix) -> Result<SparseMatrix> {
    merge("add", a, b, i64::checked_add)
}

/// Element-wise `a - b`.
pub fn subtract(a: &SparseMatrix, b: &SparseMatrix) -> Result<SparseMatrix> {
    merge("subtract", a, b, i64::checked_sub)
}

/// Matrix product `a * b`, shaped `a.rows() x b.cols()`.
///
/// Each stored cell `(row, col)` of `a` is multiplied against the stored
/// cells of row `col` in `b`, so the work is bounded by `nnz(a) * cols(b)`.
pub fn multiply(a: &SparseMatrix, b: &SparseMatrix) -> Result<SparseMatrix> {
    if a.cols() != b.rows() {
        return Err(Error::DimensionMismatch {
            op: "multiply",
            lhs: a.shape(),
            rhs: b.shape(),
        });
    }

    let mut result = SparseMatrix::new(a.rows(), b.cols());
    for a_entry in a.entries() {
        for (k, b_val) in b.row_entries(a_entry.col) {
            let overflow = Error::Overflow {
                op: "multiply",
                row: a_entry.row,
                col: k,
            };
            let value = a_entry
                .value
                .checked_mul(b_val)
                .and_then(|product| result.get(a_entry.row, k).checked_add(product))
                .ok_or(overflow)?;
            result.set(a_entry.row, k, value);
        }
    }
    Ok(result)
}

/// Multiplies every cell by `factor`. A zero factor yields an empty matrix.
pub fn scale(m: &SparseMatrix, factor: i64) -> Result<SparseMatrix> {
    let mut result = SparseMatrix::new(m.rows(), m.cols());
    for e in m.entries() {
        let value = e.value.checked_mul(factor).ok_or(Error::Overflow {
            op: "scale",
            row: e.row,
            col: e.col,
        })?;
        result.set(e.row, e.col, value);
    }
    Ok(result)
}

impl SparseMatrix {
    pub fn add(&self, other: &SparseMatrix) -> Result<SparseMatrix> {
        add(self, other)
    }

    pub fn subtract(&self, other: &SparseMatrix) -> Result<SparseMatrix> {
        subtract(self, other)
    }

    pub fn multiply(&self, other: &SparseMatrix) -> Result<SparseMatrix> {
        multiply(self, other)
    }

    pub fn scale(&self, factor: i64) -> Result<SparseMatrix> {
        scale(self, factor)
    }
}

/// A binary operation selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
}

impl Operation {
    pub fn apply(self, a: &SparseMatrix, b: &SparseMatrix) -> Result<SparseMatrix> {
        match self {
            Self::Add => add(a, b),
            Self::Subtract => subtract(a, b),
            Self::Multiply => multiply(a, b),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Subtract => write!(f, "subtract"),
            Self::Multiply => write!(f, "multiply"),
        }
    }
}

impl FromStr for Operation {
    type Err = String;

    /// Accepts the full names, `sub`/`mul`, and the menu digits `1`..`3`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "add" => Ok(Self::Add),
            "2" | "sub" | "subtract" => Ok(Self::Subtract),
            "3" | "mul" | "multiply" => Ok(Self::Multiply),
            other => Err(format!(
                "unknown operation {other:?}, expected add, subtract or multiply"
            )),
        }
    }
}
