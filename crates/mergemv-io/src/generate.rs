//! Synthetic matrix generators.
//!
//! All generators emit unit values; the benchmark exercises structure,
//! not numerics. Triplets come out in row order, so COO→CSR conversion
//! never has to coalesce.

use mergemv_core::{Coo, Scalar};

/// Fully dense `num_rows x num_cols` matrix stored sparsely.
#[must_use]
pub fn dense<T: Scalar>(num_rows: usize, num_cols: usize) -> Coo<T> {
    let mut coo = Coo::with_capacity(num_rows, num_cols, num_rows * num_cols);
    for i in 0..num_rows {
        for j in 0..num_cols {
            coo.push(i, j, T::ONE);
        }
    }
    coo
}

/// 5-point stencil on a `width x width` lattice: each vertex couples to
/// itself and its 4 orthogonal neighbors. Dimension is `width²`.
#[must_use]
pub fn grid2d<T: Scalar>(width: usize) -> Coo<T> {
    let n = width * width;
    let mut coo = Coo::with_capacity(n, n, n * 5);
    for i in 0..width {
        for j in 0..width {
            let me = i * width + j;
            if i > 0 {
                coo.push(me, me - width, T::ONE);
            }
            if j > 0 {
                coo.push(me, me - 1, T::ONE);
            }
            coo.push(me, me, T::ONE);
            if j + 1 < width {
                coo.push(me, me + 1, T::ONE);
            }
            if i + 1 < width {
                coo.push(me, me + width, T::ONE);
            }
        }
    }
    coo
}

/// 7-point stencil on a `width x width x width` lattice. Dimension is
/// `width³`.
#[must_use]
pub fn grid3d<T: Scalar>(width: usize) -> Coo<T> {
    let plane = width * width;
    let n = plane * width;
    let mut coo = Coo::with_capacity(n, n, n * 7);
    for i in 0..width {
        for j in 0..width {
            for k in 0..width {
                let me = i * plane + j * width + k;
                if i > 0 {
                    coo.push(me, me - plane, T::ONE);
                }
                if j > 0 {
                    coo.push(me, me - width, T::ONE);
                }
                if k > 0 {
                    coo.push(me, me - 1, T::ONE);
                }
                coo.push(me, me, T::ONE);
                if k + 1 < width {
                    coo.push(me, me + 1, T::ONE);
                }
                if j + 1 < width {
                    coo.push(me, me + width, T::ONE);
                }
                if i + 1 < width {
                    coo.push(me, me + plane, T::ONE);
                }
            }
        }
    }
    coo
}

/// Wheel graph on `spokes + 1` vertices: the hub row holds one entry per
/// spoke and every spoke row holds a single entry back to the hub. The
/// hub row dominates the nonzero count, producing the row-length skew the
/// merge-path kernel exists for.
#[must_use]
pub fn wheel<T: Scalar>(spokes: usize) -> Coo<T> {
    let n = spokes + 1;
    let mut coo = Coo::with_capacity(n, n, spokes * 2);
    for s in 1..=spokes {
        coo.push(0, s, T::ONE);
    }
    for s in 1..=spokes {
        coo.push(s, 0, T::ONE);
    }
    coo
}
