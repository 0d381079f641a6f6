//! Definitions and constructors for COO (Coordinate) sparse matrices.
//
// COO is the build format: loaders and generators append triplets one at
// a time, then the driver converts to CSR once before benchmarking.

use crate::error::FormatError;
use crate::scalar::Scalar;

/// COO (Coordinate) matrix: parallel lists of row indices, column
/// indices, and values.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Coo<T, I = i64> {
    pub num_rows: usize,
    pub num_cols: usize,
    pub row: Vec<I>,
    pub col: Vec<I>,
    pub values: Vec<T>,
}

impl<T, I> Coo<T, I> {
    /// Returns the number of nonzero elements (nnz).
    #[inline]
    #[must_use]
    pub const fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns the shape of the matrix as (`num_rows`, `num_cols`).
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.num_rows, self.num_cols)
    }
}

impl<T: Scalar> Coo<T, i64> {
    /// Creates an empty matrix with room for `cap` triplets.
    #[must_use]
    pub fn with_capacity(num_rows: usize, num_cols: usize, cap: usize) -> Self {
        Self {
            num_rows,
            num_cols,
            row: Vec::with_capacity(cap),
            col: Vec::with_capacity(cap),
            values: Vec::with_capacity(cap),
        }
    }

    /// Appends one triplet. Bounds are debug-asserted; loaders validate
    /// their own input before pushing.
    #[inline]
    pub fn push(&mut self, row: usize, col: usize, value: T) {
        debug_assert!(row < self.num_rows && col < self.num_cols);
        #[allow(clippy::cast_possible_wrap)]
        {
            self.row.push(row as i64);
            self.col.push(col as i64);
        }
        self.values.push(value);
    }

    /// Constructs a `Coo` from parts, with optional bounds checking.
    pub fn from_parts(
        num_rows: usize,
        num_cols: usize,
        row: Vec<i64>,
        col: Vec<i64>,
        values: Vec<T>,
        check: bool,
    ) -> Result<Self, FormatError> {
        if row.len() != values.len() || col.len() != values.len() {
            return Err(FormatError::TripletLengthMismatch);
        }
        if check {
            for k in 0..values.len() {
                let i = row[k];
                let j = col[k];
                let ok_i = usize::try_from(i).is_ok_and(|ii| ii < num_rows);
                let ok_j = usize::try_from(j).is_ok_and(|jj| jj < num_cols);
                if !ok_i || !ok_j {
                    return Err(FormatError::TripletOutOfBounds {
                        row: i,
                        col: j,
                        num_rows,
                        num_cols,
                    });
                }
            }
        }
        Ok(Self {
            num_rows,
            num_cols,
            row,
            col,
            values,
        })
    }
}
