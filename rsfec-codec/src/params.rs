use rsfec_core::{Result, RsFecError};
use serde::{Deserialize, Serialize};

/// Code dimensions, fixed for the lifetime of a codec instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeParams {
    /// Symbol width in bits.
    pub m: usize,
    /// Codeword length in symbols.
    pub n: usize,
    /// Information symbols per codeword.
    pub k: usize,
    /// Parity symbols per codeword.
    pub r: usize,
}

impl CodeParams {
    /// Validates (m, n, r) and derives k = n − r.
    pub fn new(m: usize, n: usize, r: usize) -> Result<Self> {
        if !(2..=16).contains(&m) {
            return Err(RsFecError::Config(format!(
                "symbol width m must lie in 2..=16, got {m}"
            )));
        }
        let max_n = (1usize << m) - 1;
        if n < 2 || n > max_n {
            return Err(RsFecError::Config(format!(
                "codeword length n must lie in 2..={max_n} for m = {m}, got {n}"
            )));
        }
        if r < 1 || r >= n {
            return Err(RsFecError::Config(format!(
                "parity count r must lie in 1..{n}, got {r}"
            )));
        }
        Ok(Self { m, n, k: n - r, r })
    }

    /// Guaranteed correction capability: ⌊r/2⌋ symbol errors.
    pub fn correctable_errors(&self) -> usize {
        self.r / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_classic_codes() {
        let p = CodeParams::new(4, 15, 4).unwrap();
        assert_eq!(p.k, 11);
        assert_eq!(p.correctable_errors(), 2);

        let p = CodeParams::new(8, 255, 32).unwrap();
        assert_eq!(p.k, 223);
        assert_eq!(p.correctable_errors(), 16);
    }

    #[test]
    fn accepts_shortened_codes() {
        let p = CodeParams::new(8, 100, 10).unwrap();
        assert_eq!(p.k, 90);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(CodeParams::new(1, 3, 1).is_err());
        assert!(CodeParams::new(17, 100, 4).is_err());
        assert!(CodeParams::new(4, 16, 4).is_err()); // n > 2^m − 1
        assert!(CodeParams::new(4, 15, 0).is_err());
        assert!(CodeParams::new(4, 15, 15).is_err()); // no information symbols
        assert!(CodeParams::new(4, 1, 1).is_err());
    }
}
