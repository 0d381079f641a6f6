use mergemv_core::{Coo, Csr, Scalar};
use mergemv_io::generate;
use mergemv_kernels::{
    coo_to_csr, partition_merge_path, spmv_merge, spmv_reference, spmv_row_parallel,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn approx<T: Scalar>(got: T, want: T) -> bool {
    (got - want).abs().to_f64() <= T::REL_TOL * (1.0 + want.abs().to_f64())
}

fn run_merge<T: Scalar>(a: &Csr<T>, x: &[T], width: usize) -> Vec<T> {
    let part = partition_merge_path(a.view(), width);
    let mut y = vec![T::from_f64(-1.0); a.num_rows];
    spmv_merge(a.view(), &part, x, &mut y);
    y
}

fn run_reference<T: Scalar>(a: &Csr<T>, x: &[T]) -> Vec<T> {
    let mut y = vec![T::ZERO; a.num_rows];
    spmv_reference(a.view(), x, &mut y);
    y
}

fn assert_matches_reference<T: Scalar>(a: &Csr<T>, x: &[T], width: usize) {
    let want = run_reference(a, x);
    let got = run_merge(a, x, width);
    for (row, (&g, &w)) in got.iter().zip(want.iter()).enumerate() {
        assert!(approx(g, w), "row {row} at width {width}: got {g:?}, want {w:?}");
    }
}

/// Power-law matrix: row lengths drawn from an inverse-square (Zipf-like)
/// distribution, values uniform in [-1, 1].
fn power_law(num_rows: usize, num_cols: usize, max_len: usize, seed: u64) -> Csr<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut coo: Coo<f64> = Coo::with_capacity(num_rows, num_cols, num_rows * 4);
    for i in 0..num_rows {
        let u: f64 = rng.gen_range(f64::EPSILON..1.0);
        let len = ((1.0 / u) as usize).min(max_len);
        for _ in 0..len {
            let j = rng.gen_range(0..num_cols);
            coo.push(i, j, rng.gen_range(-1.0..1.0));
        }
    }
    coo_to_csr(&coo)
}

#[test]
fn identity_4x4_any_width() {
    let a = Csr::from_parts(
        4,
        4,
        vec![0i64, 1, 2, 3, 4],
        vec![0i64, 1, 2, 3],
        vec![1.0f64; 4],
        true,
    )
    .unwrap();
    let x = vec![10.0, 20.0, 30.0, 40.0];
    for width in [1, 2, 4] {
        assert_eq!(run_merge(&a, &x, width), x);
    }
}

#[test]
fn single_fat_row_straddles_three_segments() {
    // Row 1 holds all six nonzeros; with width 3 every segment touches it
    // and the fix-up re-assembles the sum.
    let a = Csr::from_parts(
        4,
        6,
        vec![0i64, 0, 6, 6, 6],
        vec![0i64, 1, 2, 3, 4, 5],
        vec![1.0f64; 6],
        true,
    )
    .unwrap();
    let x = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let y = run_merge(&a, &x, 3);
    assert_eq!(y, vec![0.0, 21.0, 0.0, 0.0]);
}

#[test]
fn diagonal_1000() {
    let n = 1000usize;
    let row_offsets: Vec<i64> = (0..=n as i64).collect();
    let col_indices: Vec<i64> = (0..n as i64).collect();
    let values: Vec<f64> = (0..n).map(|i| (i + 1) as f64).collect();
    let a = Csr::from_parts(n, n, row_offsets, col_indices, values, true).unwrap();
    let x = vec![1.0f64; n];
    let y = run_merge(&a, &x, 16);
    for (i, &yi) in y.iter().enumerate() {
        assert_eq!(yi, (i + 1) as f64);
    }
}

#[test]
fn dense_row_skew() {
    // All 10000 nonzeros sit in row 50; width 8 must still spread the work.
    let m = 100usize;
    let ncols = 10_000usize;
    let mut row_offsets = vec![0i64; m + 1];
    for r in 51..=m {
        row_offsets[r] = ncols as i64;
    }
    let col_indices: Vec<i64> = (0..ncols as i64).collect();
    let a = Csr::from_parts(m, ncols, row_offsets, col_indices, vec![1.0f64; ncols], true).unwrap();
    let x = vec![1.0f64; ncols];
    let y = run_merge(&a, &x, 8);
    for (i, &yi) in y.iter().enumerate() {
        if i == 50 {
            assert_eq!(yi, 10_000.0);
        } else {
            assert_eq!(yi.to_bits(), 0.0f64.to_bits());
        }
    }
}

#[test]
fn grid2d_stencil_matches_reference() {
    let a: Csr<f64> = coo_to_csr(&generate::grid2d(32));
    let x: Vec<f64> = (0..a.num_cols).map(|i| (i % 7) as f64 * 0.5 - 1.0).collect();
    for width in [1, 8] {
        assert_matches_reference(&a, &x, width);
    }
}

#[test]
fn power_law_matches_reference() {
    let a = power_law(10_000, 10_000, 2_000, 42);
    let mut rng = StdRng::seed_from_u64(7);
    let x: Vec<f64> = (0..a.num_cols).map(|_| rng.gen_range(-1.0..1.0)).collect();
    assert_matches_reference(&a, &x, 32);
}

#[test]
fn output_invariant_under_width() {
    let a = power_law(1_000, 500, 300, 3);
    let x: Vec<f64> = (0..a.num_cols).map(|i| ((i * 13 + 5) % 100) as f64 / 25.0).collect();
    let want = run_reference(&a, &x);
    for width in [1, 2, 4, 8, 17, 64] {
        let got = run_merge(&a, &x, width);
        for (row, (&g, &w)) in got.iter().zip(want.iter()).enumerate() {
            assert!(approx(g, w), "row {row} diverges at width {width}");
        }
    }
}

#[test]
fn repeated_calls_are_bitwise_identical() {
    let a = power_law(2_000, 800, 400, 11);
    let x: Vec<f64> = (0..a.num_cols).map(|i| (i as f64).sin()).collect();
    let part = partition_merge_path(a.view(), 8);
    let mut y1 = vec![0.0f64; a.num_rows];
    let mut y2 = vec![0.0f64; a.num_rows];
    spmv_merge(a.view(), &part, &x, &mut y1);
    spmv_merge(a.view(), &part, &x, &mut y2);
    for (first, second) in y1.iter().zip(y2.iter()) {
        assert_eq!(first.to_bits(), second.to_bits());
    }
}

#[test]
fn empty_rows_are_exactly_zero() {
    let a = Csr::from_parts(
        6,
        4,
        vec![0i64, 0, 2, 2, 2, 3, 3],
        vec![0i64, 3, 1],
        vec![2.0f64, 4.0, -1.0],
        true,
    )
    .unwrap();
    let x = vec![1.0, 1.0, 1.0, 1.0];
    for width in [1, 3, 5] {
        let y = run_merge(&a, &x, width);
        for &row in &[0usize, 2, 3, 5] {
            assert_eq!(y[row].to_bits(), 0.0f64.to_bits());
        }
    }
}

#[test]
fn linearity() {
    let a = power_law(500, 400, 200, 23);
    let mut rng = StdRng::seed_from_u64(29);
    let x: Vec<f64> = (0..a.num_cols).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let z: Vec<f64> = (0..a.num_cols).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let (alpha, beta) = (0.5f64, -2.0f64);

    let combined: Vec<f64> = x
        .iter()
        .zip(z.iter())
        .map(|(&xi, &zi)| alpha * xi + beta * zi)
        .collect();
    let y_combined = run_merge(&a, &combined, 8);
    let y_x = run_merge(&a, &x, 8);
    let y_z = run_merge(&a, &z, 8);
    for row in 0..a.num_rows {
        let want = alpha * y_x[row] + beta * y_z[row];
        assert!(
            (y_combined[row] - want).abs() <= 1e-9 * (1.0 + want.abs()),
            "row {row}: {} vs {want}",
            y_combined[row]
        );
    }
}

#[test]
fn matrix_without_nonzeros_yields_zero() {
    let a: Csr<f64> =
        Csr::from_parts(3, 4, vec![0i64, 0, 0, 0], vec![], vec![], true).unwrap();
    let x = vec![5.0, 6.0, 7.0, 8.0];
    let y = run_merge(&a, &x, 4);
    assert_eq!(y, vec![0.0, 0.0, 0.0]);
}

#[test]
fn fp32_within_tolerance() {
    let n = 1000usize;
    let row_offsets: Vec<i64> = (0..=n as i64).collect();
    let col_indices: Vec<i64> = (0..n as i64).collect();
    let values: Vec<f32> = (0..n).map(|i| (i + 1) as f32).collect();
    let a = Csr::from_parts(n, n, row_offsets, col_indices, values, true).unwrap();
    let x = vec![1.0f32; n];
    assert_matches_reference(&a, &x, 8);
}

#[test]
fn row_parallel_matches_reference() {
    let a = power_law(3_000, 1_000, 500, 17);
    let x: Vec<f64> = (0..a.num_cols).map(|i| ((i % 11) as f64) - 5.0).collect();
    let want = run_reference(&a, &x);
    let mut got = vec![0.0f64; a.num_rows];
    spmv_row_parallel(a.view(), &x, &mut got);
    for (row, (&g, &w)) in got.iter().zip(want.iter()).enumerate() {
        assert!(approx(g, w), "row {row}: got {g}, want {w}");
    }
}
