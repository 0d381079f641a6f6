//! Validation errors for sparse matrix construction.

use thiserror::Error;

/// Structural violations detected when building a matrix from raw parts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("row_offsets length must be num_rows + 1")]
    RowOffsetsLength,

    #[error("col_indices and values must have equal length")]
    LengthMismatch,

    #[error("row_offsets first element must be 0")]
    FirstOffsetNonzero,

    #[error("row_offsets last element must equal nnz")]
    LastOffsetMismatch,

    #[error("row_offsets must be non-decreasing")]
    OffsetsDecreasing,

    #[error("row_offsets elements must be within [0, nnz]")]
    OffsetOutOfRange,

    #[error("column index {index} out of bounds for {num_cols} columns in row {row}")]
    ColumnOutOfBounds {
        row: usize,
        index: i64,
        num_cols: usize,
    },

    #[error("column indices must be strictly increasing within row {row}")]
    ColumnsUnsorted { row: usize },

    #[error("triplet arrays must have equal length")]
    TripletLengthMismatch,

    #[error("triplet index ({row}, {col}) out of bounds for {num_rows} x {num_cols}")]
    TripletOutOfBounds {
        row: i64,
        col: i64,
        num_rows: usize,
        num_cols: usize,
    },
}
