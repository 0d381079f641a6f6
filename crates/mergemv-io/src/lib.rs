//! Matrix loaders for mergemv: Matrix Market files and synthetic
//! generators. Everything here produces COO; the driver converts to CSR
//! once before benchmarking.

pub mod generate;
pub mod market;

pub use market::{parse_matrix_market, read_matrix_market};

use thiserror::Error;

/// Errors surfaced while loading a matrix from disk.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{source_name}:{line}: {message}")]
    Parse {
        source_name: String,
        line: usize,
        message: String,
    },

    #[error("unsupported Matrix Market header: {0}")]
    UnsupportedFormat(String),
}
