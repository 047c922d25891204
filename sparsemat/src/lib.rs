//! Integer sparse matrices: a text codec plus addition, subtraction and
//! multiplication over coordinate-keyed storage.
//!
//! ```
//! use sparsemat::SparseMatrix;
//!
//! let a: SparseMatrix = "rows=2\ncols=2\n(0, 0, 3)\n(1, 1, 5)".parse().unwrap();
//! let b: SparseMatrix = "rows=2\ncols=2\n(0, 0, -3)\n(0, 1, 2)".parse().unwrap();
//!
//! let sum = a.add(&b).unwrap();
//! assert_eq!(sum.to_text(), "rows=2\ncols=2\n(0, 1, 2)\n(1, 1, 5)\n");
//! ```

mod entry;
mod error;
mod matrix;
mod ops;
mod text;

pub use entry::MatrixEntry;
pub use error::{Error, Result, Shape};
pub use matrix::SparseMatrix;
pub use ops::{add, multiply, scale, subtract, Operation};
