//! Systematic Reed-Solomon forward error correction over GF(2^m).
//!
//! A [`ReedSolomon`] instance is configured once with (m, n, r) and then
//! encodes length-k information words into length-n codewords and decodes
//! possibly corrupted codewords in place, correcting up to ⌊r/2⌋ symbol
//! errors. Symbols cross the API boundary in exponent form
//! ([`rsfec_algebra::GfExp`]).

pub mod codec;
pub mod params;

pub use codec::ReedSolomon;
pub use params::CodeParams;
