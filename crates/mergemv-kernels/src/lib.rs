//! SpMV kernels for mergemv (merge-path partitioned, row-parallel, and
//! serial reference), plus COO→CSR conversion.
#![allow(
    clippy::many_single_char_names,
    reason = "Math kernels conventionally use i/j/k/p to denote indices and pointers"
)]

pub mod convert;
pub mod merge;
pub mod spmv;
mod util;

pub use convert::coo_to_csr;
pub use merge::{merge_path_search, partition_merge_path, MergeCoord, MergePartition};
pub use spmv::{spmv_merge, spmv_reference, spmv_row_parallel};
