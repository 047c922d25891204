use serde::{Deserialize, Serialize};

/// A single stored (non-zero) cell of a [`SparseMatrix`](crate::SparseMatrix).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatrixEntry {
    pub row: usize,
    pub col: usize,
    pub value: i64,
}
