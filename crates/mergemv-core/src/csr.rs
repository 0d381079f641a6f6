//! Definitions and constructors for CSR (Compressed Sparse Row) matrices.
//!
//! This file provides:
//! - The owned `Csr` container produced by loaders and conversion.
//! - The borrowed `CsrView` consumed by the kernels.
//! - Constructors, validation, and utility methods.
//!
//! CSR format is row-oriented: each row stores its nonzero column indices
//! and values in a contiguous block, with `row_offsets` marking row
//! boundaries.

use crate::error::FormatError;
use crate::scalar::Scalar;

/// CSR (Compressed Sparse Row) matrix, owned.
///
/// - `row_offsets`: row pointers (length = `num_rows + 1`)
///   - `row_offsets[i]` = start index in `col_indices`/`values` for row i
///   - `row_offsets[num_rows]` = nnz
/// - `col_indices`: column indices in row order (length = nnz)
/// - `values`: nonzero values in row order (length = nnz)
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Csr<T, I = i64> {
    pub num_rows: usize,
    pub num_cols: usize,
    pub row_offsets: Vec<I>,
    pub col_indices: Vec<I>,
    pub values: Vec<T>,
}

impl<T, I> Csr<T, I> {
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

impl<T: Scalar> Csr<T, i64> {
    /// Constructs a `Csr` from parts, with optional full format checking.
    ///
    /// # Arguments
    /// * `num_rows` - Number of rows in the matrix
    /// * `num_cols` - Number of columns in the matrix
    /// * `row_offsets` - Row pointers (length = `num_rows + 1`)
    /// * `col_indices` - Column indices in row order (length = nnz)
    /// * `values` - Nonzero values in row order (length = nnz)
    /// * `check` - If true, validate every per-row invariant
    ///
    /// The cheap structural checks (array lengths, offset endpoints) run
    /// unconditionally; `check` adds the O(nnz) passes.
    pub fn from_parts(
        num_rows: usize,
        num_cols: usize,
        row_offsets: Vec<i64>,
        col_indices: Vec<i64>,
        values: Vec<T>,
        check: bool,
    ) -> Result<Self, FormatError> {
        let Some(expected_len) = num_rows.checked_add(1) else {
            return Err(FormatError::RowOffsetsLength);
        };
        if row_offsets.len() != expected_len {
            return Err(FormatError::RowOffsetsLength);
        }
        if col_indices.len() != values.len() {
            return Err(FormatError::LengthMismatch);
        }
        let nnz = col_indices.len();
        if row_offsets.first().copied().unwrap_or(0) != 0 {
            return Err(FormatError::FirstOffsetNonzero);
        }
        if usize::try_from(row_offsets.last().copied().unwrap_or(0)).ok() != Some(nnz) {
            return Err(FormatError::LastOffsetMismatch);
        }
        if check {
            for (prev, next) in row_offsets.iter().zip(row_offsets.iter().skip(1)) {
                if prev > next {
                    return Err(FormatError::OffsetsDecreasing);
                }
                if *prev < 0 || *next < 0 {
                    return Err(FormatError::OffsetOutOfRange);
                }
            }
            for (row, (&start_i, &end_i)) in row_offsets
                .iter()
                .zip(row_offsets.iter().skip(1))
                .enumerate()
                .take(num_rows)
            {
                let Ok(start) = usize::try_from(start_i) else {
                    return Err(FormatError::OffsetOutOfRange);
                };
                let Ok(end) = usize::try_from(end_i) else {
                    return Err(FormatError::OffsetOutOfRange);
                };
                if start > nnz || end > nnz {
                    return Err(FormatError::OffsetOutOfRange);
                }
                let Some(row_indices) = col_indices.get(start..end) else {
                    return Err(FormatError::OffsetOutOfRange);
                };
                let mut prev_col = -1_i64;
                for &j in row_indices {
                    let out_of_bounds = usize::try_from(j).map_or(true, |col| col >= num_cols);
                    if j < 0 || out_of_bounds {
                        return Err(FormatError::ColumnOutOfBounds {
                            row,
                            index: j,
                            num_cols,
                        });
                    }
                    if j <= prev_col {
                        return Err(FormatError::ColumnsUnsorted { row });
                    }
                    prev_col = j;
                }
            }
        }
        Ok(Self {
            num_rows,
            num_cols,
            row_offsets,
            col_indices,
            values,
        })
    }

    /// Constructs a `Csr` from parts without any checks.
    ///
    /// Caller must ensure:
    /// - `row_offsets.len() == num_rows + 1`
    /// - `col_indices.len() == values.len() == nnz`
    /// - `row_offsets[0] == 0` and `row_offsets[num_rows] == nnz`
    /// - `row_offsets` is non-decreasing
    /// - every column index is within `[0, num_cols)`
    #[inline]
    #[must_use]
    pub const fn from_parts_unchecked(
        num_rows: usize,
        num_cols: usize,
        row_offsets: Vec<i64>,
        col_indices: Vec<i64>,
        values: Vec<T>,
    ) -> Self {
        Self {
            num_rows,
            num_cols,
            row_offsets,
            col_indices,
            values,
        }
    }

    /// Borrows the matrix as the read-only view the kernels consume.
    #[inline]
    #[must_use]
    pub fn view(&self) -> CsrView<'_, T> {
        CsrView {
            num_rows: self.num_rows,
            num_cols: self.num_cols,
            row_offsets: &self.row_offsets,
            col_indices: &self.col_indices,
            values: &self.values,
        }
    }
}

/// Borrowed, read-only description of a CSR matrix.
///
/// The view is `Copy` and lives only for the duration of a kernel call;
/// the arrays belong to an owning [`Csr`] (or to the caller directly).
#[derive(Debug, Clone, Copy)]
pub struct CsrView<'a, T> {
    pub num_rows: usize,
    pub num_cols: usize,
    pub row_offsets: &'a [i64],
    pub col_indices: &'a [i64],
    pub values: &'a [T],
}

impl<T> CsrView<'_, T> {
    /// Returns the number of nonzero elements (nnz).
    #[inline]
    #[must_use]
    pub const fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Row *end* offsets: `row_offsets[1..=num_rows]`. This is list A of
    /// the merge-path formulation.
    #[inline]
    #[must_use]
    pub fn row_end_offsets(&self) -> &[i64] {
        &self.row_offsets[1..]
    }
}
