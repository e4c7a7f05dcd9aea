//! Matmul loop nests.
//!
//! All routines take row-major `a` [m, k] and `b` [k, n] and write into a
//! row-major output that the caller has zero-filled.

/// Reference i-j-k triple loop.
pub fn matmul_naive(a: &[f64], b: &[f64], c: &mut [f64], m: usize, k: usize, n: usize) {
    for i in 0..m {
        for j in 0..n {
            let mut sum = 0.0f64;
            for p in 0..k {
                sum += a[i * k + p] * b[p * n + j];
            }
            c[i * n + j] = sum;
        }
    }
}

/// Blocked multiplication of one horizontal band of the output.
///
/// `c_band` holds output rows `row_start..row_start + c_band.len() / n`. The
/// band is walked in `bs x bs` tiles of C; for every tile the shared
/// dimension is swept in `bs`-wide slabs. Each slab of B is first copied,
/// transposed, into `pack` so that both operands of the innermost dot
/// product are unit-stride. The dot product accumulates in a register and is
/// stored once per output cell per slab.
///
/// `pack` is scratch space; it is resized as needed.
#[allow(clippy::too_many_arguments)]
pub fn matmul_blocked_band(
    a: &[f64],
    b: &[f64],
    c_band: &mut [f64],
    row_start: usize,
    k: usize,
    n: usize,
    bs: usize,
    pack: &mut Vec<f64>,
) {
    debug_assert!(bs > 0);
    if n == 0 || k == 0 {
        return;
    }
    let band_rows = c_band.len() / n;

    for jj in (0..n).step_by(bs) {
        let j_end = (jj + bs).min(n);
        let nb = j_end - jj;

        for kk in (0..k).step_by(bs) {
            let k_end = (kk + bs).min(k);
            let kb = k_end - kk;

            pack_b_transposed(b, n, kk, kb, jj, nb, pack);

            for i in 0..band_rows {
                let a_base = (row_start + i) * k;
                let a_row = &a[a_base + kk..a_base + k_end];
                let c_row = &mut c_band[i * n + jj..i * n + j_end];

                for (jl, c_ij) in c_row.iter_mut().enumerate() {
                    let b_col = &pack[jl * kb..(jl + 1) * kb];
                    let mut sum = 0.0f64;
                    for (x, y) in a_row.iter().zip(b_col) {
                        sum += x * y;
                    }
                    *c_ij += sum;
                }
            }
        }
    }
}

/// Serial blocked multiplication over the whole output, one row-block at a
/// time.
pub fn matmul_blocked(
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
    let mut pack = Vec::with_capacity(bs.min(k) * bs.min(n));
    for (block, c_band) in c.chunks_mut(bs.saturating_mul(n)).enumerate() {
        matmul_blocked_band(a, b, c_band, block * bs, k, n, bs, &mut pack);
    }
}

/// Copy the `kb x nb` slab of B starting at `(kk, jj)` into `pack`, column
/// by column, so `pack[jl * kb + p]` is `b[kk + p][jj + jl]`.
fn pack_b_transposed(
    b: &[f64],
    n: usize,
    kk: usize,
    kb: usize,
    jj: usize,
    nb: usize,
    pack: &mut Vec<f64>,
) {
    pack.clear();
    pack.resize(kb * nb, 0.0);
    for p in 0..kb {
        let b_row = &b[(kk + p) * n + jj..(kk + p) * n + jj + nb];
        for (jl, &v) in b_row.iter().enumerate() {
            pack[jl * kb + p] = v;
        }
    }
}
