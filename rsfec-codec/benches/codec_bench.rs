use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rsfec_algebra::GfExp;
use rsfec_codec::ReedSolomon;
use rsfec_random::QuickRand;

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("rs_255_223");

    let mut codec = ReedSolomon::new(8, 255, 32).unwrap();
    let mut rng = QuickRand::new(1);
    let mut info = vec![GfExp::ZERO; 223];
    rng.fill_poly(8, &mut info);
    let clean = codec.encode(&info).unwrap();

    let mut corrupted = clean.clone();
    {
        let gf = codec.field();
        for i in 0..16 {
            let pos = 3 + i * 15;
            corrupted[pos] = gf.add(corrupted[pos], GfExp((i as u16 % 255) + 1));
        }
    }

    let mut codeword = clean.clone();
    group.bench_function("encode", |bench| {
        bench.iter(|| {
            codec.encode_into(black_box(&info), &mut codeword).unwrap();
        });
    });

    let mut work = clean.clone();
    group.bench_function("decode_clean", |bench| {
        bench.iter(|| {
            work.copy_from_slice(&clean);
            codec.decode(black_box(&mut work)).unwrap();
        });
    });

    group.bench_function("decode_16_errors", |bench| {
        bench.iter(|| {
            work.copy_from_slice(&corrupted);
            codec.decode(black_box(&mut work)).unwrap();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
