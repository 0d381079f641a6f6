use mergemv_core::Coo;
use mergemv_kernels::coo_to_csr;

#[test]
fn sorts_rows_and_columns() {
    let coo = Coo::from_parts(
        3,
        3,
        vec![2i64, 0, 1, 0],
        vec![1i64, 2, 0, 0],
        vec![4.0f64, 2.0, 3.0, 1.0],
        true,
    )
    .unwrap();
    let csr = coo_to_csr(&coo);
    assert_eq!(csr.row_offsets, vec![0i64, 2, 3, 4]);
    assert_eq!(csr.col_indices, vec![0i64, 2, 0, 1]);
    assert_eq!(csr.values, vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn coalesces_duplicate_coordinates() {
    let coo = Coo::from_parts(
        2,
        2,
        vec![0i64, 0, 0, 1],
        vec![1i64, 1, 0, 0],
        vec![2.0f64, 3.0, 1.0, 7.0],
        true,
    )
    .unwrap();
    let csr = coo_to_csr(&coo);
    assert_eq!(csr.nnz(), 3);
    assert_eq!(csr.row_offsets, vec![0i64, 2, 3]);
    assert_eq!(csr.col_indices, vec![0i64, 1, 0]);
    assert_eq!(csr.values, vec![1.0, 5.0, 7.0]);
}

#[test]
fn empty_rows_front_middle_back() {
    let mut coo: Coo<f64> = Coo::with_capacity(5, 4, 2);
    coo.push(1, 3, 1.5);
    coo.push(3, 0, -2.5);
    let csr = coo_to_csr(&coo);
    assert_eq!(csr.row_offsets, vec![0i64, 0, 1, 1, 2, 2]);
    assert_eq!(csr.col_indices, vec![3i64, 0]);
    assert_eq!(csr.values, vec![1.5, -2.5]);
}

#[test]
fn empty_matrix() {
    let coo: Coo<f64> = Coo::with_capacity(3, 3, 0);
    let csr = coo_to_csr(&coo);
    assert_eq!(csr.row_offsets, vec![0i64, 0, 0, 0]);
    assert_eq!(csr.nnz(), 0);
}
