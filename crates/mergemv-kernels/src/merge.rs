//! Merge-path decomposition of the CSR SpMV iteration space.
//!
//! SpMV over a CSR matrix can be reformulated as merging two sorted
//! lists: list A holds the row end offsets `row_offsets[1..=num_rows]`
//! and list B is the counting sequence `0, 1, .., nnz-1` of nonzero
//! indices. The merge path is the staircase through the (A, B) grid that
//! a serial merge would walk; it has length `num_rows + nnz` and crosses
//! each diagonal `i + j = d` in exactly one lattice point. Cutting the
//! path at equally spaced diagonals hands every worker the same number of
//! merge items no matter how the nonzeros are distributed over rows.
//!
//! List B is virtual: `B[j] = j`, so a plain integer stands in for it and
//! nothing is materialized.

use crate::util::{i64_to_usize, usize_to_i64};
use mergemv_core::CsrView;
use rayon::prelude::*;

/// A lattice point on the merge path: `x` counts consumed rows, `y`
/// counts consumed nonzeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeCoord {
    pub x: i64,
    pub y: i64,
}

/// Locates the merge-path coordinate crossing `diagonal`.
///
/// `row_end_offsets` is list A (`row_offsets[1..]`); list B is the
/// counting sequence of length `num_nonzeros`. Binary search over the
/// clamped pivot interval; on ties the search advances along A, so
/// zero-length rows are fully consumed before the nonzeros that follow
/// them.
///
/// Cost is O(log min(diagonal, `num_rows`)) and the result satisfies
/// `x + y == diagonal`.
#[must_use]
pub fn merge_path_search(
    diagonal: i64,
    row_end_offsets: &[i64],
    num_rows: i64,
    num_nonzeros: i64,
) -> MergeCoord {
    let mut x_min = (diagonal - num_nonzeros).max(0);
    let mut x_max = diagonal.min(num_rows);

    while x_min < x_max {
        let pivot = (x_min + x_max) >> 1;
        if row_end_offsets[i64_to_usize(pivot)] <= diagonal - pivot - 1 {
            // Contract range up A (down B)
            x_min = pivot + 1;
        } else {
            // Contract range down A (up B)
            x_max = pivot;
        }
    }

    MergeCoord {
        x: x_min.min(num_rows),
        y: diagonal - x_min,
    }
}

/// Per-worker merge-path segments for one matrix.
///
/// Produced once per (matrix, width) pair and reused across repeated SpMV
/// calls; the O(width · log(num_rows + nnz)) search cost amortizes over
/// the timing loop.
#[derive(Debug, Clone)]
pub struct MergePartition {
    pub starts: Vec<MergeCoord>,
    pub ends: Vec<MergeCoord>,
}

impl MergePartition {
    /// Number of path segments (worker slots).
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.starts.len()
    }
}

/// Carves the merge path of `a` into `width` equal diagonal segments.
///
/// Every segment spans exactly `ceil((num_rows + nnz) / width)` merge
/// items except possibly the last, so per-worker load is bounded by that
/// quantum regardless of the row-length distribution. Segment boundaries
/// are found with two independent searches per worker, run in parallel.
///
/// Preconditions (asserted): `width >= 1`, `a.num_rows >= 1`, and
/// `a.row_offsets.len() == a.num_rows + 1`.
#[must_use]
pub fn partition_merge_path<T>(a: CsrView<'_, T>, width: usize) -> MergePartition {
    assert!(width >= 1, "partition width must be at least 1");
    assert!(a.num_rows >= 1, "matrix must have at least one row");
    assert_eq!(
        a.row_offsets.len(),
        a.num_rows + 1,
        "row_offsets length must be num_rows + 1"
    );

    let num_rows = usize_to_i64(a.num_rows);
    let num_nonzeros = usize_to_i64(a.nnz());
    let num_merge_items = num_rows + num_nonzeros;
    let items_per_thread = (num_merge_items + usize_to_i64(width) - 1) / usize_to_i64(width);
    let row_end_offsets = a.row_end_offsets();

    let (starts, ends) = (0..width)
        .into_par_iter()
        .map(|tid| {
            let start_diagonal = (items_per_thread * usize_to_i64(tid)).min(num_merge_items);
            let end_diagonal = (start_diagonal + items_per_thread).min(num_merge_items);
            (
                merge_path_search(start_diagonal, row_end_offsets, num_rows, num_nonzeros),
                merge_path_search(end_diagonal, row_end_offsets, num_rows, num_nonzeros),
            )
        })
        .unzip();

    MergePartition { starts, ends }
}
