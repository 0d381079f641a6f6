use mergemv_io::generate;

#[test]
fn dense_has_every_entry() {
    let coo = generate::dense::<f64>(2, 3);
    assert_eq!(coo.shape(), (2, 3));
    assert_eq!(coo.nnz(), 6);
}

#[test]
fn grid2d_stencil_counts() {
    // 3x3 lattice: 4 corners with 3 entries, 4 edges with 4, 1 center with 5.
    let coo = generate::grid2d::<f64>(3);
    assert_eq!(coo.shape(), (9, 9));
    assert_eq!(coo.nnz(), 4 * 3 + 4 * 4 + 5);
}

#[test]
fn grid3d_stencil_counts() {
    // 2x2x2 lattice: every vertex is a corner with 3 neighbors + self.
    let coo = generate::grid3d::<f64>(2);
    assert_eq!(coo.shape(), (8, 8));
    assert_eq!(coo.nnz(), 8 * 4);
}

#[test]
fn wheel_is_hub_heavy() {
    let coo = generate::wheel::<f64>(4);
    assert_eq!(coo.shape(), (5, 5));
    assert_eq!(coo.nnz(), 8);
    let hub_entries = coo.row.iter().filter(|&&r| r == 0).count();
    assert_eq!(hub_entries, 4);
}
