//! Round-trip exerciser for the Reed-Solomon codec.
//!
//! Each round draws a random information word, encodes it, injects the
//! requested number of symbol errors anywhere in the codeword, decodes,
//! and compares the recovered information word against the original.
//! Exits 0 when every round matches, 1 otherwise.

use anyhow::{bail, Result};
use clap::{ArgAction, Parser};
use log::{debug, info};
use rsfec_algebra::GfExp;
use rsfec_codec::ReedSolomon;
use rsfec_random::QuickRand;

mod logging;

#[derive(Parser, Debug)]
#[command(name = "rsfec")]
#[command(about = "Reed-Solomon encode/corrupt/decode exerciser")]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Symbol width in bits (2..=16)
    m: usize,

    /// Codeword length in symbols
    n: usize,

    /// Parity symbols per codeword
    r: usize,

    /// Number of encode/decode rounds
    runs: usize,

    /// Errors injected per round; -1 draws a count in [0, r/2] each round
    errs: i64,

    /// PRNG seed
    seed: u32,

    /// Encode repetitions per round (speed testing)
    #[arg(default_value_t = 1)]
    enc_reps: usize,

    /// Decode repetitions per round (speed testing)
    #[arg(default_value_t = 1)]
    dec_reps: usize,

    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logger(args.verbose);

    let mut codec = ReedSolomon::new(args.m, args.n, args.r)?;
    let params = codec.params();
    let mut rng = QuickRand::new(args.seed);
    info!(
        "({}, {}) code over GF(2^{}), {} runs, seed {}",
        params.n, params.k, params.m, args.runs, args.seed
    );

    if args.errs > params.n as i64 {
        bail!(
            "cannot place {} distinct errors in {}-symbol codewords",
            args.errs,
            params.n
        );
    }

    let max_errs = params.correctable_errors() as u32;
    let mut info_word = vec![GfExp::ZERO; params.k];
    let mut clean = vec![GfExp::ZERO; params.n];
    let mut errors = vec![GfExp::ZERO; params.n];
    let mut received = vec![GfExp::ZERO; params.n];

    for run in 0..args.runs {
        rng.fill_poly(params.m, &mut info_word);
        for _ in 0..args.enc_reps.max(1) {
            codec.encode_into(&info_word, &mut clean)?;
        }

        let n_errs = if args.errs < 0 {
            rng.int_in(0, max_errs)
        } else {
            args.errs as u32
        };
        errors.fill(GfExp::ZERO);
        for _ in 0..n_errs {
            let loc = loop {
                let loc = rng.int_in(0, params.n as u32 - 1) as usize;
                if errors[loc].is_zero() {
                    break loc;
                }
            };
            errors[loc] = rng.nonzero_element(params.m);
        }
        debug!("run {run}: {n_errs} errors injected");

        for _ in 0..args.dec_reps.max(1) {
            // Restore the corrupted word before each repetition.
            let gf = codec.field();
            for i in 0..params.n {
                received[i] = gf.add(clean[i], errors[i]);
            }
            codec.decode(&mut received)?;
        }

        if codec.info_of(&received) != &info_word[..] {
            bail!("run {run}: recovered information word does not match");
        }
    }

    info!("all {} runs round-tripped", args.runs);
    Ok(())
}
