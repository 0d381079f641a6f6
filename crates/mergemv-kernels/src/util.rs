/// Row ranges for the row-parallel kernel aim for this many nonzeros each.
pub const PAR_NNZ_TARGET: usize = 128 * 1024;
/// Below this nnz the row-parallel kernel skips the pool entirely.
pub const SMALL_NNZ_LIMIT: usize = 32 * 1024;

#[inline]
pub fn i64_to_usize(x: i64) -> usize {
    debug_assert!(x >= 0);
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    {
        x as usize
    }
}

#[inline]
pub fn usize_to_i64(x: usize) -> i64 {
    debug_assert!(i64::try_from(x).is_ok());
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    {
        x as i64
    }
}
