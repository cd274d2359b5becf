use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, SamplingMode};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use verimix::context::{Context, RistrettoCtx as Ctx};
use verimix::proof::{FiatShamirProver, FiatShamirVerifier};
use verimix::traits::{CryptoGroup, GroupElement};
use verimix::zkp::pair_shuffle::{self, PAIR_SHUFFLE_LABEL};
use verimix::zkp::sato;

type G = <Ctx as Context>::G;
type Element = <Ctx as Context>::Element;

fn pairs(k: usize, h: &Element, rng: &mut ChaCha20Rng) -> (Vec<Element>, Vec<Element>) {
    let g = Ctx::generator();
    let mut x = Vec::with_capacity(k);
    let mut y = Vec::with_capacity(k);
    for _ in 0..k {
        let r = G::random_scalar(rng);
        let m = G::random_element(rng);
        x.push(g.exp(&r));
        y.push(h.exp(&r).mul(&m));
    }
    (x, y)
}

fn neff_shuffle(n: usize) -> bool {
    let mut rng = ChaCha20Rng::seed_from_u64(n as u64);
    let g = Ctx::generator();
    let h = G::random_element(&mut rng);
    let (x, y) = pairs(n, &h, &mut rng);

    let (x_bar, y_bar, prover) = pair_shuffle::shuffle::<Ctx, _>(&g, &h, &x, &y, &mut rng).unwrap();
    let mut ctx = FiatShamirProver::<Ctx, _>::new(PAIR_SHUFFLE_LABEL, &mut rng);
    prover.prove(&mut ctx).unwrap();
    let proof = ctx.into_proof();

    let verifier = pair_shuffle::verifier::<Ctx>(&g, &h, &x, &y, &x_bar, &y_bar).unwrap();
    let mut ctx = FiatShamirVerifier::<Ctx>::new(PAIR_SHUFFLE_LABEL, &proof);
    let ok = verifier.verify(&mut ctx).is_ok();

    assert!(ok);

    ok
}

fn sato_rounds(n: usize, rounds: usize) -> bool {
    let mut rng = ChaCha20Rng::seed_from_u64(n as u64);
    let g = Ctx::generator();
    let h = G::random_element(&mut rng);
    let (a, b) = pairs(n, &h, &mut rng);

    let (s, t, prover) = sato::shuffle::<Ctx, _>(&g, &h, &a, &b, &mut rng).unwrap();
    let proofs = sato::prove_rounds(&prover, rounds, &mut rng).unwrap();

    let verifier = sato::verifier::<Ctx>(&g, &h, &a, &b, &s, &t).unwrap();
    let ok = sato::verify_rounds(&verifier, &proofs).is_ok();

    assert!(ok);

    ok
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("shuffle");
    group
        .sample_size(10)
        .measurement_time(Duration::from_secs(30))
        .sampling_mode(SamplingMode::Flat);

    for size in [10, 100].iter() {
        group.bench_with_input(BenchmarkId::new("neff_ristretto", size), size, |b, &size| {
            b.iter(|| neff_shuffle(size));
        });
    }

    for size in [10].iter() {
        group.bench_with_input(
            BenchmarkId::new("sato_80_rounds_ristretto", size),
            size,
            |b, &size| {
                b.iter(|| sato_rounds(size, 80));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
