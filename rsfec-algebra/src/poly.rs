//! Polynomial arithmetic over GF(2^m).
//!
//! Polynomials are slices of exponent-form coefficients, `a[i]` holding the
//! coefficient of X^i. Routines take the slice together with a degree
//! bound and return the actual degree of the result, with −1 standing for
//! the zero polynomial. Degree-bound arguments are upper bounds unless a
//! routine documents that it needs the exact degree.

use crate::field::{GfExp, GfTables, GfVec};

/// Actual degree of `a`, scanning down from the bound `max`; −1 if zero.
pub fn degree(a: &[GfExp], max: isize) -> isize {
    let mut i = max;
    while i >= 0 && a[i as usize].is_zero() {
        i -= 1;
    }
    i
}

/// Actual degree of a vector-form polynomial; −1 if zero.
pub fn degree_vec(a: &[GfVec], max: isize) -> isize {
    let mut i = max;
    while i >= 0 && a[i as usize].is_zero() {
        i -= 1;
    }
    i
}

/// S = A + B. Output must not alias either input; use [`add_assign`] for
/// the accumulating form. Returns the actual degree of S.
pub fn add(
    gf: &GfTables,
    a: &[GfExp],
    na: isize,
    b: &[GfExp],
    nb: isize,
    s: &mut [GfExp],
) -> isize {
    let (short, ns, long, nl) = if na > nb { (b, nb, a, na) } else { (a, na, b, nb) };

    let mut deg = -1;
    let mut i: isize = 0;
    while i <= ns {
        let iu = i as usize;
        s[iu] = gf.add(short[iu], long[iu]);
        if !s[iu].is_zero() {
            deg = i;
        }
        i += 1;
    }
    while i <= nl {
        let iu = i as usize;
        s[iu] = long[iu];
        if !s[iu].is_zero() {
            deg = i;
        }
        i += 1;
    }
    deg
}

/// S += B in place. Returns the actual degree of the sum.
pub fn add_assign(gf: &GfTables, s: &mut [GfExp], ns: isize, b: &[GfExp], nb: isize) -> isize {
    let common = ns.min(nb);
    let top = ns.max(nb);

    let mut deg = -1;
    let mut i = 0;
    while i <= top {
        let iu = i as usize;
        if i <= common {
            s[iu] = gf.add(s[iu], b[iu]);
        } else if i <= nb {
            s[iu] = b[iu];
        }
        if !s[iu].is_zero() {
            deg = i;
        }
        i += 1;
    }
    deg
}

/// C = A · B by schoolbook convolution. `na` and `nb` must be the actual
/// degrees, and `c` must not alias `a` or `b`. Returns na + nb, the
/// claimed degree of the product (equal to the actual degree whenever
/// both inputs are nonzero).
pub fn mul(
    gf: &GfTables,
    a: &[GfExp],
    na: isize,
    b: &[GfExp],
    nb: isize,
    c: &mut [GfExp],
) -> isize {
    debug_assert!(na < 0 || !a[na as usize].is_zero());
    debug_assert!(nb < 0 || !b[nb as usize].is_zero());

    let nc = na + nb;
    if nc >= 0 {
        c[..=nc as usize].fill(GfExp::ZERO);
    }
    if na < 0 || nb < 0 {
        return nc;
    }
    for ia in 0..=na as usize {
        let av = a[ia];
        if av.is_zero() {
            continue;
        }
        for ib in 0..=nb as usize {
            let x = gf.mul_by_nonzero(b[ib], av);
            c[ia + ib] = gf.add(c[ia + ib], x);
        }
    }
    nc
}

/// Evaluates A at `x` by the Horner scheme.
pub fn eval(gf: &GfTables, a: &[GfExp], na: isize, x: GfExp) -> GfExp {
    if na < 0 {
        return GfExp::ZERO;
    }
    let mut r = a[na as usize];
    for i in (0..na as usize).rev() {
        r = gf.mul(r, x);
        r = gf.add(r, a[i]);
    }
    r
}

/// Evaluates A at the point sequence x, x·α, x·α^2, …, x·α^nY where
/// nY = `yv.len() − 1`, storing `yv[nY − l] = A(x · α^l)` in vector form.
///
/// This is the DFT/Chien-search kernel: each coefficient walks its own
/// geometric progression and XOR-accumulates into every output. The
/// α-power shortcut used for the per-coefficient step limits `na` to
/// 2^m − 2; `x` must be nonzero.
pub fn eval_seq(gf: &GfTables, a: &[GfExp], na: usize, yv: &mut [GfVec], x: GfExp) {
    debug_assert!(na <= gf.order() - 2);
    debug_assert!(!x.is_zero());
    debug_assert!(a.len() > na && !yv.is_empty());

    let ny = yv.len() - 1;
    yv.fill(gf.exp_to_vec(a[0]));

    let mut xi = x;
    for ia in 1..=na {
        let zi = GfExp(ia as u16 + 1); // α^ia, in range because ia ≤ 2^m − 2
        let ai = a[ia];
        if !ai.is_zero() {
            let mut v = gf.mul_nonzero(ai, xi);
            for iy in (1..=ny).rev() {
                yv[iy] += gf.exp_to_vec(v);
                v = gf.mul_nonzero(v, zi);
            }
            yv[0] += gf.exp_to_vec(v);
        }
        xi = gf.mul_nonzero(xi, x);
    }
}

/// Evaluates the formal derivative A′ at `x` (nonzero).
///
/// In characteristic 2 only the odd-index coefficients survive, so the
/// Horner scheme runs over x^2.
pub fn eval_deriv(gf: &GfTables, a: &[GfExp], na: isize, x: GfExp) -> GfExp {
    debug_assert!(!x.is_zero());

    let mut i = na;
    if i % 2 == 0 {
        i -= 1;
    }
    if i < 0 {
        return GfExp::ZERO;
    }
    let x2 = gf.mul_nonzero(x, x);
    let mut i = i as usize;
    let mut r = a[i];
    while i >= 3 {
        i -= 2;
        r = gf.mul_by_nonzero(r, x2);
        r = gf.add(r, a[i]);
    }
    r
}

/// Remainder of A against a normalized divisor B: `b[nb] = 1` and every
/// coefficient of B nonzero, with `b.len() = nb + 1` the exact degree.
///
/// `rv` must hold `nb + 1` slots: slot 0 is working scratch (the position
/// "below" the remainder that the sliding window shifts through), and the
/// remainder lands in `rv[1..=nb]` in vector form, `rv[1 + i]` holding the
/// coefficient of X^i.
pub fn rem_normalized(gf: &GfTables, a: &[GfExp], na: usize, b: &[GfExp], rv: &mut [GfVec]) {
    let nb = b.len() - 1;
    debug_assert!(na >= nb && a.len() > na);
    debug_assert!(rv.len() == nb + 1);
    debug_assert!(b[nb] == GfExp::ONE);
    debug_assert!(b.iter().all(|c| !c.is_zero()));

    // Upper coefficients of the numerator seed the remainder window.
    for i in 0..nb {
        rv[i + 1] = gf.exp_to_vec(a[na - nb + 1 + i]);
    }

    for iq in (0..=na - nb).rev() {
        rv[0] = gf.exp_to_vec(a[iq]);
        let qv = rv[nb];
        if qv.is_zero() {
            for ir in (1..=nb).rev() {
                rv[ir] = rv[ir - 1];
            }
            continue;
        }
        let q = gf.vec_to_exp(qv);
        for ir in (1..=nb).rev() {
            rv[ir] = rv[ir - 1] + gf.exp_to_vec(gf.mul_nonzero(q, b[ir - 1]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn random_poly(rng: &mut ChaCha20Rng, order: u16, len: usize) -> Vec<GfExp> {
        (0..len).map(|_| GfExp(rng.gen_range(0..order))).collect()
    }

    #[test]
    fn degree_scans_past_zeros() {
        let p = [GfExp(3), GfExp::ZERO, GfExp(7), GfExp::ZERO, GfExp::ZERO];
        assert_eq!(degree(&p, 4), 2);
        assert_eq!(degree(&[GfExp::ZERO; 4], 3), -1);
    }

    #[test]
    fn add_matches_field_addition_per_coefficient() {
        let gf = GfTables::new(4).unwrap();
        let a = [GfExp(5), GfExp(9), GfExp(2)];
        let b = [GfExp(5), GfExp(1)];
        let mut s = [GfExp::ZERO; 3];
        let ns = add(&gf, &a, 2, &b, 1, &mut s);
        assert_eq!(ns, 2);
        assert_eq!(s[0], GfExp::ZERO); // equal coefficients cancel
        assert_eq!(s[1], gf.add(GfExp(9), GfExp(1)));
        assert_eq!(s[2], GfExp(2));
    }

    #[test]
    fn add_assign_agrees_with_add() {
        let gf = GfTables::new(8).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..200 {
            let na = rng.gen_range(0..12usize);
            let nb = rng.gen_range(0..12usize);
            let a = random_poly(&mut rng, 256, na + 1);
            let b = random_poly(&mut rng, 256, nb + 1);
            let mut s = vec![GfExp::ZERO; na.max(nb) + 1];
            let ns = add(&gf, &a, na as isize, &b, nb as isize, &mut s);

            let mut acc = a.clone();
            acc.resize(na.max(nb) + 1, GfExp::ZERO);
            let ns2 = add_assign(&gf, &mut acc, na as isize, &b, nb as isize);
            assert_eq!(ns, ns2);
            assert_eq!(&s[..], &acc[..]);
        }
    }

    #[test]
    fn mul_evaluates_pointwise() {
        let gf = GfTables::new(8).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        for _ in 0..200 {
            let na = rng.gen_range(0..8usize);
            let nb = rng.gen_range(0..8usize);
            let mut a = random_poly(&mut rng, 256, na + 1);
            let mut b = random_poly(&mut rng, 256, nb + 1);
            a[na] = GfExp(rng.gen_range(1..256));
            b[nb] = GfExp(rng.gen_range(1..256));

            let mut c = vec![GfExp::ZERO; na + nb + 1];
            let nc = mul(&gf, &a, na as isize, &b, nb as isize, &mut c);
            assert_eq!(nc, (na + nb) as isize);

            let x = GfExp(rng.gen_range(0..256));
            assert_eq!(
                eval(&gf, &c, nc, x),
                gf.mul(
                    eval(&gf, &a, na as isize, x),
                    eval(&gf, &b, nb as isize, x)
                )
            );
        }
    }

    #[test]
    fn eval_seq_matches_pointwise_eval() {
        let gf = GfTables::new(4).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for _ in 0..500 {
            let na = rng.gen_range(0..=14usize); // ≤ 2^m − 2
            let ny = rng.gen_range(0..=15usize);
            let a = random_poly(&mut rng, 16, na + 1);
            let mut yv = vec![GfVec::ZERO; ny + 1];
            let x = gf.alpha_pow(1);
            eval_seq(&gf, &a, na, &mut yv, x);
            for l in 0..=ny {
                let point = gf.alpha_pow(1 + l);
                assert_eq!(
                    gf.vec_to_exp(yv[ny - l]),
                    eval(&gf, &a, na as isize, point),
                    "na={na} ny={ny} l={l}"
                );
            }
        }
    }

    #[test]
    fn eval_deriv_keeps_odd_coefficients() {
        let gf = GfTables::new(4).unwrap();
        let a = [GfExp(6), GfExp(3), GfExp(9), GfExp(12)];
        for xv in 1..16u16 {
            let x = GfExp(xv);
            // A′ = a1 + a3·x^2 in characteristic 2
            let expect = gf.add(a[1], gf.mul(a[3], gf.mul_nonzero(x, x)));
            assert_eq!(eval_deriv(&gf, &a, 3, x), expect);
        }
    }

    #[test]
    fn derivative_of_a_square_vanishes() {
        let gf = GfTables::new(8).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(19);
        for _ in 0..100 {
            let na = rng.gen_range(0..6usize);
            let mut a = random_poly(&mut rng, 256, na + 1);
            a[na] = GfExp(rng.gen_range(1..256));
            let mut sq = vec![GfExp::ZERO; 2 * na + 1];
            let nsq = mul(&gf, &a, na as isize, &a, na as isize, &mut sq);
            let x = GfExp(rng.gen_range(1..256));
            assert_eq!(eval_deriv(&gf, &sq, nsq, x), GfExp::ZERO);
        }
    }

    #[test]
    fn rem_normalized_recovers_remainder() {
        let gf = GfTables::new(8).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(23);
        for _ in 0..300 {
            let nb = rng.gen_range(1..8usize);
            // Monic divisor with all coefficients nonzero.
            let mut b: Vec<GfExp> = (0..nb).map(|_| GfExp(rng.gen_range(1..256))).collect();
            b.push(GfExp::ONE);

            let nq = rng.gen_range(0..8usize);
            let mut q = random_poly(&mut rng, 256, nq + 1);
            q[nq] = GfExp(rng.gen_range(1..256));
            let r = random_poly(&mut rng, 256, nb); // deg < nb

            // A = B·Q + R
            let na = nb + nq;
            let mut a = vec![GfExp::ZERO; na + 1];
            mul(&gf, &b, nb as isize, &q, nq as isize, &mut a);
            add_assign(&gf, &mut a, na as isize, &r, nb as isize - 1);

            let mut rv = vec![GfVec::ZERO; nb + 1];
            rem_normalized(&gf, &a, na, &b, &mut rv);
            for i in 0..nb {
                assert_eq!(gf.vec_to_exp(rv[i + 1]), r[i], "nb={nb} nq={nq} i={i}");
            }
        }
    }

    proptest! {
        #[test]
        fn prop_add_commutes(coeffs_a in prop::collection::vec(0u16..256, 1..10),
                             coeffs_b in prop::collection::vec(0u16..256, 1..10)) {
            let gf = GfTables::new(8).unwrap();
            let a: Vec<GfExp> = coeffs_a.iter().copied().map(GfExp).collect();
            let b: Vec<GfExp> = coeffs_b.iter().copied().map(GfExp).collect();
            let na = a.len() as isize - 1;
            let nb = b.len() as isize - 1;
            let len = a.len().max(b.len());
            let mut s1 = vec![GfExp::ZERO; len];
            let mut s2 = vec![GfExp::ZERO; len];
            let n1 = add(&gf, &a, na, &b, nb, &mut s1);
            let n2 = add(&gf, &b, nb, &a, na, &mut s2);
            prop_assert_eq!(n1, n2);
            prop_assert_eq!(s1, s2);
        }
    }
}
