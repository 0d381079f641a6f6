//! CSR SpMV kernels: serial reference, row-parallel, and merge-path.
//!
//! The row-parallel kernel splits rows into ranges of roughly equal
//! nonzero count; a single long row still lands in one range, so skewed
//! matrices defeat it. The merge-path kernel walks precomputed path
//! segments instead and is insensitive to row shape.

use crate::merge::MergePartition;
use crate::util::{i64_to_usize, usize_to_i64, PAR_NNZ_TARGET, SMALL_NNZ_LIMIT};
use mergemv_core::{CsrView, Scalar};
use rayon::prelude::*;

/// Dot product of one row slice against `x`, 4-wide unrolled.
///
/// The fma chain keeps accumulation order sequential in `t`. Callers
/// guarantee column indices are within `[0, x.len())`.
#[inline]
fn dot_row<T: Scalar>(col_indices: &[i64], values: &[T], x: &[T]) -> T {
    debug_assert_eq!(col_indices.len(), values.len());
    let len = values.len();
    let mut acc = T::ZERO;
    let mut t = 0usize;

    unsafe {
        let limit4 = len & !3;
        while t < limit4 {
            let j0 = i64_to_usize(*col_indices.get_unchecked(t));
            let j1 = i64_to_usize(*col_indices.get_unchecked(t + 1));
            let j2 = i64_to_usize(*col_indices.get_unchecked(t + 2));
            let j3 = i64_to_usize(*col_indices.get_unchecked(t + 3));

            acc = (*values.get_unchecked(t)).mul_add(*x.get_unchecked(j0), acc);
            acc = (*values.get_unchecked(t + 1)).mul_add(*x.get_unchecked(j1), acc);
            acc = (*values.get_unchecked(t + 2)).mul_add(*x.get_unchecked(j2), acc);
            acc = (*values.get_unchecked(t + 3)).mul_add(*x.get_unchecked(j3), acc);

            t += 4;
        }

        while t < len {
            let j = i64_to_usize(*col_indices.get_unchecked(t));
            acc = (*values.get_unchecked(t)).mul_add(*x.get_unchecked(j), acc);
            t += 1;
        }
    }

    acc
}

/// Serial reference `y = A @ x`, one row at a time.
pub fn spmv_reference<T: Scalar>(a: CsrView<'_, T>, x: &[T], y: &mut [T]) {
    assert_eq!(x.len(), a.num_cols, "x length must equal num_cols");
    assert_eq!(y.len(), a.num_rows, "y length must equal num_rows");

    for (row, yi) in y.iter_mut().enumerate() {
        let start = i64_to_usize(a.row_offsets[row]);
        let end = i64_to_usize(a.row_offsets[row + 1]);
        let mut partial = T::ZERO;
        for p in start..end {
            partial += a.values[p] * x[i64_to_usize(a.col_indices[p])];
        }
        *yi = partial;
    }
}

/// Merge-path parallel `y = A @ x` over a precomputed partition.
///
/// Each segment consumes its coordinate range: rows it finishes are
/// written directly, and the partial sum of the segment's unfinished last
/// row is returned as a `(row, value)` carry-out. Segments write disjoint
/// row ranges, so the parallel phase needs no synchronization beyond the
/// final join; a serial pass in ascending segment order then adds each
/// carry into the row that straddled the boundary, which makes the
/// floating-point order of split-row sums deterministic for a fixed
/// partition width.
pub fn spmv_merge<T: Scalar>(a: CsrView<'_, T>, partition: &MergePartition, x: &[T], y: &mut [T]) {
    assert_eq!(x.len(), a.num_cols, "x length must equal num_cols");
    assert_eq!(y.len(), a.num_rows, "y length must equal num_rows");
    let width = partition.width();
    assert!(width >= 1, "partition must have at least one segment");
    assert_eq!(partition.ends.len(), width);

    let y_addr = y.as_mut_ptr() as usize;
    let carries: Vec<(i64, T)> = (0..width)
        .into_par_iter()
        .map(|tid| {
            let y_ptr = y_addr as *mut T;
            let mut coord = partition.starts[tid];
            let coord_end = partition.ends[tid];

            // Consume whole rows
            while coord.x < coord_end.x {
                let row = i64_to_usize(coord.x);
                let row_end = i64_to_usize(a.row_offsets[row + 1]);
                let cur = i64_to_usize(coord.y);
                let total = dot_row(&a.col_indices[cur..row_end], &a.values[cur..row_end], x);
                unsafe {
                    *y_ptr.add(row) = total;
                }
                coord.y = a.row_offsets[row + 1];
                coord.x += 1;
            }

            // Consume the partial portion of the segment's last row
            let cur = i64_to_usize(coord.y);
            let tail = i64_to_usize(coord_end.y);
            let total = dot_row(&a.col_indices[cur..tail], &a.values[cur..tail], x);

            (coord_end.x, total)
        })
        .collect();

    // Carry-out fix-up for rows spanning multiple segments. The final
    // segment's carry lands at row == num_rows and is dropped by the
    // bound check, never by the loop range alone.
    let num_rows = usize_to_i64(a.num_rows);
    for &(carry_row, carry_value) in &carries[..width - 1] {
        if carry_row < num_rows {
            y[i64_to_usize(carry_row)] += carry_value;
        }
    }
}

/// Row-parallel `y = A @ x`.
///
/// Rows are grouped into ranges holding about [`PAR_NNZ_TARGET`] nonzeros
/// each and the ranges are dispatched to the pool; each row is written by
/// exactly one range. Small problems skip the pool.
pub fn spmv_row_parallel<T: Scalar>(a: CsrView<'_, T>, x: &[T], y: &mut [T]) {
    assert_eq!(x.len(), a.num_cols, "x length must equal num_cols");
    assert_eq!(y.len(), a.num_rows, "y length must equal num_rows");

    if a.nnz() <= SMALL_NNZ_LIMIT {
        for (row, yi) in y.iter_mut().enumerate() {
            let s = i64_to_usize(a.row_offsets[row]);
            let e = i64_to_usize(a.row_offsets[row + 1]);
            *yi = dot_row(&a.col_indices[s..e], &a.values[s..e], x);
        }
        return;
    }

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    let mut acc = 0usize;
    let mut r0 = 0usize;
    for row in 0..a.num_rows {
        let s = i64_to_usize(a.row_offsets[row]);
        let e = i64_to_usize(a.row_offsets[row + 1]);
        if acc == 0 {
            r0 = row;
        }
        acc += e - s;
        if acc >= PAR_NNZ_TARGET {
            ranges.push((r0, row + 1));
            acc = 0;
        }
    }
    if acc > 0 {
        ranges.push((r0, a.num_rows));
    }

    let y_addr = y.as_mut_ptr() as usize;
    ranges.into_par_iter().for_each(|(r0, r1)| {
        let y_ptr = y_addr as *mut T;
        for row in r0..r1 {
            let s = i64_to_usize(a.row_offsets[row]);
            let e = i64_to_usize(a.row_offsets[row + 1]);
            let val = dot_row(&a.col_indices[s..e], &a.values[s..e], x);
            unsafe {
                *y_ptr.add(row) = val;
            }
        }
    });
}
