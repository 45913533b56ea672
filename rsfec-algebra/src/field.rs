//! GF(2^m) scalar arithmetic, m in [2, 16].
//!
//! Elements carry one of two representations:
//!
//! - [`GfExp`], the exponent form: 0 encodes the zero element, and `i + 1`
//!   encodes α^i for a fixed primitive element α. Multiplication and
//!   division are modular index arithmetic in this form.
//! - [`GfVec`], the vector form: the bit pattern of the element over a
//!   fixed GF(2)-basis. Addition and subtraction are XOR in this form.
//!
//! Conversions between the two go through the lookup tables of a
//! [`GfTables`] instance, which fixes m and the primitive polynomial.

use rsfec_core::{Result, RsFecError};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Field element in exponent representation: 0, or `i + 1` for α^i.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GfExp(pub u16);

/// Field element in vector (bit-pattern) representation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GfVec(pub u16);

impl GfExp {
    pub const ZERO: Self = GfExp(0);
    /// α^0, the multiplicative identity.
    pub const ONE: Self = GfExp(1);

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl GfVec {
    pub const ZERO: Self = GfVec(0);

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for GfVec {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        GfVec(self.0 ^ rhs.0)
    }
}

impl AddAssign for GfVec {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

/// Low m bits of the primitive polynomial of degree m, indexed by m.
const PRIMITIVE_POLYS: [u16; 17] = [
    0, 0,   // m = 0, 1 unsupported
    0x0003, // x^2 + x + 1
    0x0003, // x^3 + x + 1
    0x0003, // x^4 + x + 1
    0x0005, // x^5 + x^2 + 1
    0x0003, // x^6 + x + 1
    0x0011, // x^7 + x^4 + 1
    0x001d, // x^8 + x^4 + x^3 + x^2 + 1
    0x0011, // x^9 + x^4 + 1
    0x0009, // x^10 + x^3 + 1
    0x0005, // x^11 + x^2 + 1
    0x0053, // x^12 + x^6 + x^4 + x + 1
    0x001b, // x^13 + x^4 + x^3 + x + 1
    0x002b, // x^14 + x^5 + x^3 + x + 1
    0x0003, // x^15 + x + 1
    0x002d, // x^16 + x^5 + x^3 + x^2 + 1
];

/// Lookup tables for one GF(2^m) instance.
///
/// The tables are read-only after construction; sharing them across
/// threads is sound, but the methods take `&self` and never lock.
#[derive(Clone, Debug)]
pub struct GfTables {
    m: u32,
    order: usize,
    /// 2^m − 1, the order of the multiplicative group.
    max: u16,
    e2v: Vec<GfVec>,
    v2e: Vec<GfExp>,
}

impl GfTables {
    /// Builds the exponent/vector tables for GF(2^m).
    ///
    /// Fails with a configuration error when m lies outside [2, 16].
    pub fn new(m: usize) -> Result<Self> {
        if !(2..=16).contains(&m) {
            return Err(RsFecError::Config(format!(
                "symbol width m must lie in 2..=16, got {m}"
            )));
        }

        let order = 1usize << m;
        let mask = (order - 1) as u32;
        let poly = u32::from(PRIMITIVE_POLYS[m]);

        let mut e2v = vec![GfVec::ZERO; order];
        let mut v2e = vec![GfExp::ZERO; order];

        // Repeated multiplication by x, reduced by the primitive
        // polynomial whenever the top bit falls out.
        let mut v: u32 = 1 << (m - 1);
        for e in 0..order - 1 {
            v <<= 1;
            if v & (1 << m) != 0 {
                v = (v & mask) ^ poly;
            }
            e2v[e + 1] = GfVec(v as u16);
            v2e[v as usize] = GfExp((e + 1) as u16);
        }

        Ok(Self {
            m: m as u32,
            order,
            max: (order - 1) as u16,
            e2v,
            v2e,
        })
    }

    /// Symbol width m.
    #[inline]
    pub fn bits(&self) -> u32 {
        self.m
    }

    /// Field size 2^m.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// α^i for any i, reduced modulo 2^m − 1.
    #[inline]
    pub fn alpha_pow(&self, i: usize) -> GfExp {
        GfExp((i % self.max as usize) as u16 + 1)
    }

    #[inline]
    pub fn exp_to_vec(&self, e: GfExp) -> GfVec {
        self.e2v[e.0 as usize]
    }

    #[inline]
    pub fn vec_to_exp(&self, v: GfVec) -> GfExp {
        self.v2e[v.0 as usize]
    }

    /// Field addition. Works through the vector form, where adding is XOR.
    #[inline]
    pub fn add(&self, a: GfExp, b: GfExp) -> GfExp {
        self.v2e[(self.e2v[a.0 as usize].0 ^ self.e2v[b.0 as usize].0) as usize]
    }

    /// Field subtraction; identical to addition in characteristic 2.
    #[inline]
    pub fn sub(&self, a: GfExp, b: GfExp) -> GfExp {
        self.add(a, b)
    }

    /// Full multiplication, handling zero operands.
    #[inline]
    pub fn mul(&self, a: GfExp, b: GfExp) -> GfExp {
        if a.is_zero() || b.is_zero() {
            GfExp::ZERO
        } else {
            self.mul_nonzero(a, b)
        }
    }

    /// Multiplication fast path: both operands must be nonzero.
    #[inline]
    pub fn mul_nonzero(&self, a: GfExp, b: GfExp) -> GfExp {
        debug_assert!(!a.is_zero() && !b.is_zero());
        let t = u32::from(a.0) + u32::from(b.0) - 1;
        let max = u32::from(self.max);
        GfExp(if t > max { (t - max) as u16 } else { t as u16 })
    }

    /// Multiplication where only `b` is known to be nonzero.
    #[inline]
    pub fn mul_by_nonzero(&self, a: GfExp, b: GfExp) -> GfExp {
        debug_assert!(!b.is_zero());
        if a.is_zero() {
            GfExp::ZERO
        } else {
            self.mul_nonzero(a, b)
        }
    }

    /// Division a / b; `b` must be nonzero.
    #[inline]
    pub fn div(&self, a: GfExp, b: GfExp) -> GfExp {
        debug_assert!(!b.is_zero());
        if a.is_zero() {
            GfExp::ZERO
        } else {
            self.div_nonzero(a, b)
        }
    }

    /// Division fast path: both operands must be nonzero.
    #[inline]
    pub fn div_nonzero(&self, a: GfExp, b: GfExp) -> GfExp {
        debug_assert!(!a.is_zero() && !b.is_zero());
        let t = i32::from(a.0) - i32::from(b.0) + 1;
        GfExp(if t <= 0 {
            (t + i32::from(self.max)) as u16
        } else {
            t as u16
        })
    }

    /// Multiplicative inverse; `a` must be nonzero.
    #[inline]
    pub fn inv(&self, a: GfExp) -> GfExp {
        debug_assert!(!a.is_zero());
        if a.0 == 1 {
            GfExp::ONE
        } else {
            GfExp(self.max + 2 - a.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn tables_round_trip_for_all_widths() {
        for m in 2..=16 {
            let gf = GfTables::new(m).unwrap();
            assert_eq!(gf.exp_to_vec(GfExp::ZERO), GfVec::ZERO);
            assert_eq!(gf.vec_to_exp(GfVec::ZERO), GfExp::ZERO);
            for e in 0..gf.order() {
                let e = GfExp(e as u16);
                assert_eq!(gf.vec_to_exp(gf.exp_to_vec(e)), e, "m={m} e={e:?}");
            }
        }
    }

    #[test]
    fn unsupported_widths_rejected() {
        assert!(GfTables::new(0).is_err());
        assert!(GfTables::new(1).is_err());
        assert!(GfTables::new(17).is_err());
    }

    #[test]
    fn field_laws_exhaustive_gf16() {
        let gf = GfTables::new(4).unwrap();
        let all: Vec<GfExp> = (0..16).map(GfExp).collect();
        for &a in &all {
            for &b in &all {
                assert_eq!(gf.add(a, b), gf.add(b, a));
                assert_eq!(gf.mul(a, b), gf.mul(b, a));
                for &c in &all {
                    assert_eq!(gf.add(a, gf.add(b, c)), gf.add(gf.add(a, b), c));
                    assert_eq!(gf.mul(a, gf.mul(b, c)), gf.mul(gf.mul(a, b), c));
                    assert_eq!(
                        gf.add(gf.mul(a, c), gf.mul(b, c)),
                        gf.mul(gf.add(a, b), c)
                    );
                }
                if !a.is_zero() {
                    assert_eq!(gf.mul(a, gf.div(b, a)), b);
                }
            }
        }
    }

    #[test]
    fn field_laws_sampled_gf256() {
        let gf = GfTables::new(8).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        for _ in 0..2000 {
            let a = GfExp(rng.gen_range(0..256));
            let b = GfExp(rng.gen_range(0..256));
            let c = GfExp(rng.gen_range(0..256));
            assert_eq!(gf.mul(a, gf.mul(b, c)), gf.mul(gf.mul(a, b), c));
            assert_eq!(gf.add(gf.mul(a, c), gf.mul(b, c)), gf.mul(gf.add(a, b), c));
            if !a.is_zero() {
                assert_eq!(gf.mul(a, gf.div(b, a)), b);
                assert_eq!(gf.mul_nonzero(a, gf.inv(a)), GfExp::ONE);
            }
        }
    }

    #[test]
    fn addition_is_self_inverse() {
        let gf = GfTables::new(8).unwrap();
        for v in 0..256u16 {
            let a = GfExp(v);
            assert_eq!(gf.add(a, a), GfExp::ZERO);
            assert_eq!(gf.sub(a, a), GfExp::ZERO);
        }
    }

    #[test]
    fn alpha_pow_wraps() {
        let gf = GfTables::new(4).unwrap();
        assert_eq!(gf.alpha_pow(0), GfExp::ONE);
        assert_eq!(gf.alpha_pow(1), GfExp(2));
        assert_eq!(gf.alpha_pow(14), GfExp(15));
        assert_eq!(gf.alpha_pow(15), GfExp::ONE);
        assert_eq!(gf.alpha_pow(16), GfExp(2));
    }

    #[test]
    fn inverse_matches_division() {
        let gf = GfTables::new(6).unwrap();
        for v in 1..64u16 {
            let a = GfExp(v);
            assert_eq!(gf.inv(a), gf.div(GfExp::ONE, a));
            assert_eq!(gf.mul(a, gf.inv(a)), GfExp::ONE);
        }
    }
}
