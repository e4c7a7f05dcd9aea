use rayon::prelude::*;

use super::matmul::matmul_blocked_band;

/// Blocked multiplication with output row-blocks spread over the current
/// rayon pool.
///
/// Every task owns a disjoint `bs * n` chunk of `c` and reads `a` and `b`
/// through shared references, so no synchronisation is needed beyond the
/// implicit join at the end of `for_each_init`.
pub fn matmul_blocked_parallel(
    a: &[f64],
    b: &[f64],
    c: &mut [f64],
    m: usize,
    k: usize,
    n: usize,
    bs: usize,
) {
    if m == 0 || n == 0 || k == 0 {
        return;
    }
    c.par_chunks_mut(bs.saturating_mul(n)).enumerate().for_each_init(
        || Vec::with_capacity(bs.min(k) * bs.min(n)),
        |pack, (block, c_band)| {
            log::trace!("row-block {} ({} rows)", block, c_band.len() / n);
            matmul_blocked_band(a, b, c_band, block * bs, k, n, bs, pack);
        },
    );
}
