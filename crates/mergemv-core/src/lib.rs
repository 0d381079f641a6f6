//! Core data structures for mergemv: sparse matrix containers and the
//! scalar element trait shared by all kernels.

pub mod coo;
pub mod csr;
pub mod error;
pub mod scalar;

pub use coo::Coo;
pub use csr::{Csr, CsrView};
pub use error::FormatError;
pub use scalar::Scalar;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
