//! Extended Euclidean solver for the key equation.
//!
//! Given the top coefficients of the super polynomial N and of the
//! syndrome polynomial A (lower coefficients of both are conceptually
//! present but never touched), [`solve`] computes cofactors P and Q with
//! `P·N = Q·A` along the shared least common multiple and gcd(P, Q) = 1.
//! For a Reed-Solomon syndrome input, Q is the error locator and P the
//! error evaluator.

use crate::field::{GfExp, GfTables, GfVec};
use crate::poly;
use log::trace;
use std::mem;

/// Working storage for [`solve`]: two remainder streams, the quotient,
/// and the two cofactor stream pairs, each in its own buffer.
#[derive(Clone, Debug)]
pub struct KeyEquationScratch {
    tq: Vec<GfExp>,
    r1: Vec<GfExp>,
    r2: Vec<GfExp>,
    c: Vec<GfExp>,
    c1: Vec<GfExp>,
    c2: Vec<GfExp>,
    d: Vec<GfExp>,
    d1: Vec<GfExp>,
    d2: Vec<GfExp>,
    window: Vec<GfVec>,
}

impl KeyEquationScratch {
    /// Allocates streams for inputs of degree up to `max_deg`.
    pub fn new(max_deg: usize) -> Self {
        let len = max_deg + 3;
        Self {
            tq: vec![GfExp::ZERO; len],
            r1: vec![GfExp::ZERO; len],
            r2: vec![GfExp::ZERO; len],
            c: vec![GfExp::ZERO; len],
            c1: vec![GfExp::ZERO; len],
            c2: vec![GfExp::ZERO; len],
            d: vec![GfExp::ZERO; len],
            d1: vec![GfExp::ZERO; len],
            d2: vec![GfExp::ZERO; len],
            window: vec![GfVec::ZERO; len],
        }
    }
}

/// One division step over top-coefficient windows: divides the active
/// window of `num` by the divisor window `b` for exactly `ntq + 1`
/// quotient steps, writing the quotient into `tq` and the remainder back
/// into the top of `num`. Returns the remainder's top index relative to
/// the shifted window (−1 when the window is exhausted).
///
/// Coefficients below the windows are unknown by construction and never
/// read; if the known window runs dry before the step count is reached,
/// the remaining quotient coefficients are zero.
fn div_partial(
    gf: &GfTables,
    num: &mut [GfExp],
    b: &[GfExp],
    tq: &mut [GfExp],
    ntq: usize,
    w: &mut [GfVec],
) -> isize {
    let na = num.len() - 1;
    let nb = b.len() - 1;
    debug_assert!(na >= nb);
    debug_assert!(!b[nb].is_zero());

    let off = na - nb;
    let bl = b[nb];

    // The window is XOR-heavy; work in vector form.
    for i in 0..=nb {
        w[i] = gf.exp_to_vec(num[off + i]);
    }

    let mut nr: isize = nb as isize;
    for iq in (0..=ntq).rev() {
        if nr < 0 {
            tq[iq] = GfExp::ZERO;
            continue;
        }
        let r = gf.vec_to_exp(w[nr as usize]);
        nr -= 1;
        if r.is_zero() {
            tq[iq] = GfExp::ZERO;
            continue;
        }
        let q = gf.div_nonzero(r, bl);
        tq[iq] = q;

        let mut ib = nb;
        let mut ir = nr;
        while ir >= 0 {
            ib -= 1;
            w[ir as usize] += gf.exp_to_vec(gf.mul_by_nonzero(b[ib], q));
            ir -= 1;
        }
    }

    if nr >= 0 {
        for i in 0..=nr as usize {
            num[off + i] = gf.vec_to_exp(w[i]);
        }
    }
    nr
}

/// Runs the extended Euclidean algorithm on the top-coefficient windows
/// of N (degree `n_top.len() − 1`) and A (degree `a.len() − 1`, leading
/// coefficient nonzero), with `expected_q_deg` the degree difference of
/// the underlying full polynomials. Writes P into `p` and Q into `q` and
/// returns their actual degrees.
pub fn solve(
    gf: &GfTables,
    n_top: &[GfExp],
    a: &[GfExp],
    p: &mut [GfExp],
    q: &mut [GfExp],
    expected_q_deg: isize,
    ws: &mut KeyEquationScratch,
) -> (isize, isize) {
    let nn = (n_top.len() - 1) as isize;
    let na = (a.len() - 1) as isize;
    debug_assert!(nn >= na);
    debug_assert!(!a[na as usize].is_zero());
    debug_assert!(expected_q_deg >= 0);

    let KeyEquationScratch {
        tq,
        r1,
        r2,
        c,
        c1,
        c2,
        d,
        d1,
        d2,
        window,
    } = ws;

    r1[..=na as usize].copy_from_slice(a);
    r2[..=nn as usize].copy_from_slice(n_top);
    let mut nr1 = na;
    let mut nr2 = nn;
    let mut off1 = 0usize;
    let mut off2 = 0usize;

    c1[0] = GfExp::ZERO;
    c2[0] = GfExp::ONE;
    d1[0] = GfExp::ONE;
    d2[0] = GfExp::ZERO;
    let mut nc1: isize = -1;
    let mut nc2: isize = 0;
    let mut nd1: isize = 0;
    let mut nd2: isize = -1;

    let mut ntq = expected_q_deg as usize;
    loop {
        let shift = (nr2 - nr1) as usize;
        let mut nr = div_partial(
            gf,
            &mut r2[off2..=off2 + nr2 as usize],
            &r1[off1..=off1 + nr1 as usize],
            tq,
            ntq,
            window,
        );
        off2 += shift;

        // D = D1·TQ + D2, then rotate the stream.
        let nd_new = poly::mul(gf, d1, nd1, tq, ntq as isize, d);
        let nd_new = poly::add_assign(gf, d, nd_new, d2, nd2);
        mem::swap(d1, d2);
        mem::swap(d1, d);
        nd2 = nd1;
        nd1 = nd_new;

        let nc_new = poly::mul(gf, c1, nc1, tq, ntq as isize, c);
        let nc_new = poly::add_assign(gf, c, nc_new, c2, nc2);
        mem::swap(c1, c2);
        mem::swap(c1, c);
        nc2 = nc1;
        nc1 = nc_new;

        // Leading zeros of the remainder raise the next quotient's degree.
        ntq = 1;
        while nr >= 0 && r2[off2 + nr as usize].is_zero() {
            nr -= 1;
            ntq += 1;
        }
        trace!("key equation: remainder degree {nr}, next quotient degree {ntq}");
        if nr < 0 {
            break;
        }

        // Old divisor becomes the numerator, the remainder the divisor.
        mem::swap(r1, r2);
        mem::swap(&mut off1, &mut off2);
        let t = nr1;
        nr1 = nr;
        nr2 = t;
    }

    if nc1 >= 0 {
        p[..=nc1 as usize].copy_from_slice(&c1[..=nc1 as usize]);
    }
    if nd1 >= 0 {
        q[..=nd1 as usize].copy_from_slice(&d1[..=nd1 as usize]);
    }
    (nc1, nd1)
}
