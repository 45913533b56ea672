//! Encoder and decoder for one configured Reed-Solomon code.

use crate::params::CodeParams;
use log::{debug, trace};
use rsfec_algebra::euclid::{self, KeyEquationScratch};
use rsfec_algebra::{poly, GfExp, GfTables, GfVec};
use rsfec_core::{Result, RsFecError};
use std::mem;

/// A configured Reed-Solomon codec.
///
/// Codewords are systematic: positions `0..r` hold parity, positions
/// `r..n` hold the information word (coefficient of X^i at index i).
/// The field tables and the generator are immutable after construction;
/// encode/decode scratch lives inside the instance, so the methods take
/// `&mut self` and one instance serves one thread at a time. Clone the
/// codec to use the same configuration from several threads.
#[derive(Clone, Debug)]
pub struct ReedSolomon {
    params: CodeParams,
    gf: GfTables,
    /// Generator ∏_{i=1..r}(X − α^i), monic, every coefficient nonzero.
    gen: Vec<GfExp>,
    /// Top r coefficients of the super polynomial X^(2^m − 1) − 1.
    sup_top: Vec<GfExp>,
    // per-call scratch, preallocated
    parity: Vec<GfVec>,
    synd: Vec<GfVec>,
    s_exp: Vec<GfExp>,
    p: Vec<GfExp>,
    q: Vec<GfExp>,
    chien: Vec<GfVec>,
    eea: KeyEquationScratch,
}

impl ReedSolomon {
    /// Builds a codec for the (n, n − r) code over GF(2^m).
    pub fn new(m: usize, n: usize, r: usize) -> Result<Self> {
        Self::with_params(CodeParams::new(m, n, r)?)
    }

    pub fn with_params(params: CodeParams) -> Result<Self> {
        let gf = GfTables::new(params.m)?;
        let r = params.r;

        // G grows one root at a time: G := G · (X − α^i), i = 1..r.
        let mut d1 = vec![GfExp::ZERO; r + 1];
        let mut d2 = vec![GfExp::ZERO; r + 1];
        let mut nd1: isize = 0;
        d1[0] = GfExp::ONE;
        let mut root = [gf.alpha_pow(1), GfExp::ONE];
        for _ in 1..=r {
            let nd2 = poly::mul(&gf, &d1, nd1, &root, 1, &mut d2);
            root[0] = GfExp(root[0].0 + 1);
            mem::swap(&mut d1, &mut d2);
            nd1 = nd2;
        }
        debug_assert_eq!(nd1 as usize, r);

        // The fast encoder division requires every generator coefficient
        // to be nonzero.
        if d1.iter().any(|c| c.is_zero()) {
            return Err(RsFecError::Config(format!(
                "generator polynomial for (m = {}, r = {}) has a zero coefficient",
                params.m, r
            )));
        }
        let gen = d1;

        let mut sup_top = vec![GfExp::ZERO; r];
        sup_top[r - 1] = GfExp::ONE;

        debug!(
            "configured ({}, {}) Reed-Solomon code over GF(2^{}), correcting {} errors",
            params.n,
            params.k,
            params.m,
            params.correctable_errors()
        );

        Ok(Self {
            gf,
            gen,
            sup_top,
            parity: vec![GfVec::ZERO; r + 1],
            synd: vec![GfVec::ZERO; r],
            s_exp: vec![GfExp::ZERO; r],
            p: vec![GfExp::ZERO; r + 2],
            q: vec![GfExp::ZERO; r + 2],
            chien: vec![GfVec::ZERO; params.k],
            eea: KeyEquationScratch::new(r - 1),
            params,
        })
    }

    pub fn params(&self) -> CodeParams {
        self.params
    }

    /// The field the codec computes in.
    pub fn field(&self) -> &GfTables {
        &self.gf
    }

    /// Generator polynomial coefficients, constant term first.
    pub fn generator(&self) -> &[GfExp] {
        &self.gen
    }

    /// Information part of a codeword.
    pub fn info_of<'a>(&self, codeword: &'a [GfExp]) -> &'a [GfExp] {
        &codeword[self.params.r..]
    }

    /// Parity part of a codeword.
    pub fn parity_of<'a>(&self, codeword: &'a [GfExp]) -> &'a [GfExp] {
        &codeword[..self.params.r]
    }

    /// Encodes `info` (length k) into `codeword` (length n): the
    /// information word is copied to the high positions and the parity
    /// R(X) = (X^r · A(X)) mod G(X) fills the low positions.
    pub fn encode_into(&mut self, info: &[GfExp], codeword: &mut [GfExp]) -> Result<()> {
        let CodeParams { n, k, r, .. } = self.params;
        if info.len() != k {
            return Err(RsFecError::InvalidParameter(format!(
                "information word length {} does not match k = {k}",
                info.len()
            )));
        }
        if codeword.len() != n {
            return Err(RsFecError::InvalidParameter(format!(
                "codeword length {} does not match n = {n}",
                codeword.len()
            )));
        }

        codeword[r..].copy_from_slice(info);
        codeword[..r].fill(GfExp::ZERO);
        poly::rem_normalized(&self.gf, codeword, n - 1, &self.gen, &mut self.parity);
        for i in 0..r {
            codeword[i] = self.gf.vec_to_exp(self.parity[i + 1]);
        }
        Ok(())
    }

    /// Allocating convenience wrapper around [`encode_into`].
    ///
    /// [`encode_into`]: Self::encode_into
    pub fn encode(&mut self, info: &[GfExp]) -> Result<Vec<GfExp>> {
        let mut codeword = vec![GfExp::ZERO; self.params.n];
        self.encode_into(info, &mut codeword)?;
        Ok(codeword)
    }

    /// Decodes `codeword` in place, correcting up to ⌊r/2⌋ symbol errors.
    ///
    /// On return the high k positions hold the recovered information
    /// word. With more than ⌊r/2⌋ errors the result is unspecified (the
    /// word may be miscorrected or left as is) and no diagnostic is
    /// raised; callers that need a corruption signal can use
    /// [`decode_checked`] or an outer integrity check.
    ///
    /// Root search runs over the information positions only: a corrupted
    /// parity symbol never prevents recovery of the information word,
    /// but is not itself repaired.
    ///
    /// [`decode_checked`]: Self::decode_checked
    pub fn decode(&mut self, codeword: &mut [GfExp]) -> Result<()> {
        let CodeParams { n, r, .. } = self.params;
        if codeword.len() != n {
            return Err(RsFecError::InvalidParameter(format!(
                "codeword length {} does not match n = {n}",
                codeword.len()
            )));
        }

        // Syndromes S_i = C(α^i), i = 1..r, by sequence evaluation.
        poly::eval_seq(&self.gf, codeword, n - 1, &mut self.synd, self.gf.alpha_pow(1));
        let ns = poly::degree_vec(&self.synd, r as isize - 1);
        if ns < 0 {
            trace!("syndrome clean, nothing to correct");
            return Ok(());
        }
        trace!("syndrome degree {ns}");

        for i in 0..=ns as usize {
            self.s_exp[i] = self.gf.vec_to_exp(self.synd[i]);
        }
        let (np, nq) = euclid::solve(
            &self.gf,
            &self.sup_top,
            &self.s_exp[..=ns as usize],
            &mut self.p,
            &mut self.q,
            r as isize - ns,
            &mut self.eea,
        );
        // A locator that degenerated (possible only past the correction
        // radius) cannot be searched; leave the word untouched.
        if nq < 1 || nq as usize > self.gf.order() - 2 {
            return Ok(());
        }

        // Roots of Q among α^r .. α^(n−1) mark errors at the matching
        // information positions.
        poly::eval_seq(
            &self.gf,
            &self.q[..=nq as usize],
            nq as usize,
            &mut self.chien,
            self.gf.alpha_pow(r),
        );

        let gf = &self.gf;
        let mut iv = 0;
        for i in (r..n).rev() {
            if self.chien[iv].is_zero() {
                let x = gf.alpha_pow(i);
                let px = poly::eval(gf, &self.p, np, x);
                let qx = poly::eval_deriv(gf, &self.q, nq, x);
                // e = P(x) · N′(x) / Q′(x), and N′(x) = x^(2^m − 2) = 1/x.
                // P(x) or Q′(x) can vanish only past the radius; skip then.
                if !px.is_zero() && !qx.is_zero() {
                    let e = gf.div_nonzero(gf.mul_nonzero(px, gf.inv(x)), qx);
                    codeword[i] = gf.sub(codeword[i], e);
                    trace!("corrected symbol at position {i}");
                }
            }
            iv += 1;
        }
        Ok(())
    }

    /// Decodes like [`decode`] and then reports whether the result is a
    /// valid codeword (all syndromes zero). `false` means the error
    /// pattern exceeded the correction capability.
    ///
    /// [`decode`]: Self::decode
    pub fn decode_checked(&mut self, codeword: &mut [GfExp]) -> Result<bool> {
        self.decode(codeword)?;
        poly::eval_seq(
            &self.gf,
            codeword,
            self.params.n - 1,
            &mut self.synd,
            self.gf.alpha_pow(1),
        );
        Ok(poly::degree_vec(&self.synd, self.params.r as isize - 1) < 0)
    }
}
