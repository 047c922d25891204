use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entry::MatrixEntry;
use crate::error::{Error, Result};

/// An integer matrix storing only its non-zero cells.
///
/// Cells are keyed by `(row, col)`; the map ordering makes iteration
/// row-major. A stored value is never zero: [`SparseMatrix::set`] removes
/// the key instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SparseMatrixData", try_from = "SparseMatrixData")]
pub struct SparseMatrix {
    rows: usize,
    cols: usize,
    values: BTreeMap<(usize, usize), i64>,
}

impl SparseMatrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: BTreeMap::new(),
        }
    }

    /// Builds a matrix by applying [`SparseMatrix::set`] to every `(row, col, value)`
    /// in order.
    ///
    /// Zero values are dropped and a repeated coordinate keeps the last value.
    /// Coordinates are not checked against `rows`/`cols`.
    pub fn from_entries<I>(rows: usize, cols: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, i64)>,
    {
        entries
            .into_iter()
            .fold(Self::new(rows, cols), |mut m, (r, c, v)| {
                m.set(r, c, v);
                m
            })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of stored (non-zero) cells.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Stores `value` at `(row, col)`, or removes the cell when `value` is zero.
    pub fn set(&mut self, row: usize, col: usize, value: i64) {
        if value == 0 {
            self.values.remove(&(row, col));
        } else {
            self.values.insert((row, col), value);
        }
    }

    /// Returns the value at `(row, col)`, `0` for any cell that is not stored.
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.values.get(&(row, col)).copied().unwrap_or(0)
    }

    /// Stored cells in row-major order.
    pub fn entries(&self) -> impl Iterator<Item = MatrixEntry> + '_ {
        self.values
            .iter()
            .map(|(&(row, col), &value)| MatrixEntry { row, col, value })
    }

    /// Stored cells of a single row, ascending by column.
    pub(crate) fn row_entries(&self, row: usize) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.values
            .range((row, 0)..=(row, usize::MAX))
            .map(|(&(_, col), &value)| (col, value))
    }

    pub(crate) fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }
}

/// Serialized form of a [`SparseMatrix`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparseMatrixData {
    rows: usize,
    cols: usize,
    entries: Vec<MatrixEntry>,
}

impl From<SparseMatrix> for SparseMatrixData {
    fn from(m: SparseMatrix) -> Self {
        Self {
            rows: m.rows,
            cols: m.cols,
            entries: m.entries().collect(),
        }
    }
}

impl TryFrom<SparseMatrixData> for SparseMatrix {
    type Error = Error;

    fn try_from(data: SparseMatrixData) -> Result<Self> {
        let mut m = Self::new(data.rows, data.cols);
        for e in data.entries {
            if !m.contains(e.row, e.col) {
                return Err(Error::OutOfBounds {
                    row: e.row,
                    col: e.col,
                    rows: m.rows,
                    cols: m.cols,
                });
            }
            m.set(e.row, e.col, e.value);
        }
        Ok(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_zero_removes_entry() {
        let mut m = SparseMatrix::new(3, 3);
        m.set(1, 2, 7);
        assert_eq!(m.get(1, 2), 7);
        assert_eq!(m.nnz(), 1);

        m.set(1, 2, 0);
        assert_eq!(m.get(1, 2), 0);
        assert!(m.is_empty());
    }

    #[test]
    fn test_set_overwrites() {
        let mut m = SparseMatrix::new(2, 2);
        m.set(0, 0, 1);
        m.set(0, 0, -4);
        assert_eq!(m.get(0, 0), -4);
        assert_eq!(m.nnz(), 1);
    }

    #[test]
    fn test_setter_accepts_out_of_range() {
        let mut m = SparseMatrix::new(1, 1);
        m.set(5, 9, 2);
        assert_eq!(m.get(5, 9), 2);
        assert_eq!(m.shape(), (1, 1));
    }

    #[test]
    fn test_entries_are_row_major() {
        let m = SparseMatrix::from_entries(3, 3, [(2, 0, 1), (0, 2, 2), (1, 1, 3), (0, 0, 4)]);
        let coords: Vec<_> = m.entries().map(|e| (e.row, e.col)).collect();
        assert_eq!(coords, vec![(0, 0), (0, 2), (1, 1), (2, 0)]);
    }

    #[test]
    fn test_from_entries_drops_zeros_and_keeps_last() {
        let m = SparseMatrix::from_entries(2, 2, [(0, 0, 0), (1, 1, 3), (1, 1, 9)]);
        assert_eq!(m.nnz(), 1);
        assert_eq!(m.get(1, 1), 9);
        assert_eq!(m.get(0, 0), 0);
    }

    #[test]
    fn test_row_entries() {
        let m = SparseMatrix::from_entries(3, 4, [(1, 3, 5), (0, 1, 1), (1, 0, 2), (2, 2, 8)]);
        let row: Vec<_> = m.row_entries(1).collect();
        assert_eq!(row, vec![(0, 2), (3, 5)]);
        assert_eq!(m.row_entries(7).count(), 0);
    }

    #[test]
    fn test_json_shape() -> anyhow::Result<()> {
        let m = SparseMatrix::from_entries(2, 3, [(1, 2, -1), (0, 0, 4)]);
        let json = serde_json::to_value(&m)?;
        assert_eq!(
            json,
            serde_json::json!({
                "rows": 2,
                "cols": 3,
                "entries": [
                    { "row": 0, "col": 0, "value": 4 },
                    { "row": 1, "col": 2, "value": -1 },
                ],
            })
        );

        let back: SparseMatrix = serde_json::from_value(json)?;
        assert_eq!(back, m);
        Ok(())
    }

    #[test]
    fn test_json_rejects_out_of_bounds() {
        let json = r#"{ "rows": 2, "cols": 2, "entries": [{ "row": 2, "col": 0, "value": 1 }] }"#;
        let err = serde_json::from_str::<SparseMatrix>(json).unwrap_err();
        assert!(err.to_string().contains("outside a 2x2 matrix"));
    }

    #[test]
    fn test_json_drops_zero_values() -> anyhow::Result<()> {
        let json = r#"{ "rows": 1, "cols": 2, "entries": [{ "row": 0, "col": 1, "value": 0 }] }"#;
        let m: SparseMatrix = serde_json::from_str(json)?;
        assert!(m.is_empty());
        Ok(())
    }
}
