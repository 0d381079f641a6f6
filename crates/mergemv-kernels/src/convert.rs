//! COO → CSR conversion.

use crate::util::{i64_to_usize, usize_to_i64};
use mergemv_core::{Coo, Csr, Scalar};

/// Converts COO to CSR, sorting columns within rows and summing duplicate
/// coordinates.
#[must_use]
pub fn coo_to_csr<T: Scalar>(a: &Coo<T>) -> Csr<T> {
    let num_rows = a.num_rows;
    let num_cols = a.num_cols;
    let nnz = a.nnz();

    // Gather triples and sort by (row, col)
    let mut triples: Vec<(i64, i64, T)> =
        (0..nnz).map(|k| (a.row[k], a.col[k], a.values[k])).collect();
    triples.sort_unstable_by(|x, y| x.0.cmp(&y.0).then(x.1.cmp(&y.1)));

    let mut row_offsets = vec![0i64; num_rows + 1];
    let mut col_indices: Vec<i64> = Vec::with_capacity(nnz);
    let mut values: Vec<T> = Vec::with_capacity(nnz);

    let mut cur_row: i64 = -1;
    let mut last_col: i64 = -1;
    let mut acc = T::ZERO;

    for (r, c, v) in triples {
        if r != cur_row {
            // flush previous entry
            if cur_row >= 0 && last_col >= 0 {
                col_indices.push(last_col);
                values.push(acc);
            }
            // advance row_offsets up to the current row
            let r_us = i64_to_usize(r);
            let prev_us = i64_to_usize((cur_row + 1).max(0));
            let len = usize_to_i64(col_indices.len());
            for ptr in row_offsets.iter_mut().take(r_us + 1).skip(prev_us) {
                *ptr = len;
            }
            cur_row = r;
            last_col = c;
            acc = v;
            continue;
        }
        // same row
        if c == last_col {
            acc += v; // duplicate coordinate
        } else {
            col_indices.push(last_col);
            values.push(acc);
            last_col = c;
            acc = v;
        }
    }
    // flush final entry
    if cur_row >= 0 && last_col >= 0 {
        col_indices.push(last_col);
        values.push(acc);
    }
    // fill remaining row_offsets
    let start_row = if cur_row < 0 {
        0
    } else {
        i64_to_usize(cur_row + 1)
    };
    let len = usize_to_i64(col_indices.len());
    for ptr in row_offsets.iter_mut().take(num_rows + 1).skip(start_row) {
        *ptr = len;
    }

    Csr::from_parts_unchecked(num_rows, num_cols, row_offsets, col_indices, values)
}
