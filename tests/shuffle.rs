use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use verimix::context::{Context, RistrettoCtx as Ctx};
use verimix::cryptosystem::elgamal::{self, Ciphertext};
use verimix::proof::{FiatShamirProver, FiatShamirVerifier};
use verimix::traits::GroupElement;
use verimix::utils::Error;
use verimix::zkp::pair_shuffle::{self, PAIR_SHUFFLE_LABEL};
use verimix::zkp::sato::{self, SATO_LABEL};

type Element = <Ctx as Context>::Element;

// the all-zero seed ending in 0x01
fn stream() -> ChaCha20Rng {
    let mut seed = [0u8; 32];
    seed[31] = 1;
    ChaCha20Rng::from_seed(seed)
}

fn pad(msg: &str) -> [u8; 30] {
    let mut ret = [0u8; 30];
    ret[..msg.len()].copy_from_slice(msg.as_bytes());
    ret
}

struct Fixture {
    keypair: elgamal::KeyPair<Ctx>,
    g: Element,
    messages: Vec<[u8; 30]>,
    a: Vec<Element>,
    b: Vec<Element>,
}

fn fixture(rng: &mut ChaCha20Rng) -> Fixture {
    let keypair = elgamal::KeyPair::<Ctx>::from_secret(7u32.into());
    let g = Ctx::generator();

    let messages: Vec<[u8; 30]> = ["apple", "banana", "cherry"]
        .iter()
        .map(|m| pad(m))
        .collect();
    let ciphertexts: Vec<Ciphertext<Ctx>> = messages
        .iter()
        .map(|m| keypair.encrypt(m, rng).unwrap())
        .collect();

    let a = ciphertexts.iter().map(|c| c.alpha.clone()).collect();
    let b = ciphertexts.iter().map(|c| c.beta.clone()).collect();

    Fixture {
        keypair,
        g,
        messages,
        a,
        b,
    }
}

fn decrypt_all(keypair: &elgamal::KeyPair<Ctx>, s: &[Element], t: &[Element]) -> Vec<[u8; 30]> {
    s.iter()
        .zip(t.iter())
        .map(|(alpha, beta)| {
            let ct = Ciphertext::<Ctx>::new(alpha.clone(), beta.clone());
            keypair.decrypt(&ct).unwrap()
        })
        .collect()
}

// Shuffling the empty or singleton vector is rejected.
#[test]
fn shuffle_rejects_degenerate_sizes() {
    let mut rng = stream();
    let g = Ctx::generator();
    let h = g.exp(&7u32.into());

    let empty: Vec<Element> = vec![];
    let one = vec![Ctx::random_element()];

    assert!(matches!(
        pair_shuffle::shuffle::<Ctx, _>(&g, &h, &empty, &empty, &mut rng),
        Err(Error::SizeMismatch)
    ));
    assert!(matches!(
        pair_shuffle::shuffle::<Ctx, _>(&g, &h, &one, &one, &mut rng),
        Err(Error::SizeMismatch)
    ));
    assert!(matches!(
        sato::shuffle::<Ctx, _>(&g, &h, &one, &one, &mut rng),
        Err(Error::SizeMismatch)
    ));
}

// Neff shuffle end to end: prove, verify, and recover the plaintext
// multiset from the shuffled pairs.
#[test]
fn neff_shuffle_roundtrip() {
    let mut rng = stream();
    let f = fixture(&mut rng);

    let (s, t, prover) =
        pair_shuffle::shuffle::<Ctx, _>(&f.g, &f.keypair.pkey, &f.a, &f.b, &mut rng).unwrap();

    let mut ctx = FiatShamirProver::<Ctx, _>::new(PAIR_SHUFFLE_LABEL, &mut rng);
    prover.prove(&mut ctx).unwrap();
    let proof = ctx.into_proof();

    let verifier =
        pair_shuffle::verifier::<Ctx>(&f.g, &f.keypair.pkey, &f.a, &f.b, &s, &t).unwrap();
    let mut ctx = FiatShamirVerifier::<Ctx>::new(PAIR_SHUFFLE_LABEL, &proof);
    verifier.verify(&mut ctx).unwrap();
    ctx.finish().unwrap();

    // the decrypted outputs are the input plaintexts, as a multiset
    let mut decrypted = decrypt_all(&f.keypair, &s, &t);
    let mut expected = f.messages.clone();
    decrypted.sort();
    expected.sort();
    assert_eq!(decrypted, expected);
}

// Swapping two shuffled pairs after proving invalidates the proof.
#[test]
fn neff_shuffle_tampered_output() {
    let mut rng = stream();
    let f = fixture(&mut rng);

    let (s, mut t, prover) =
        pair_shuffle::shuffle::<Ctx, _>(&f.g, &f.keypair.pkey, &f.a, &f.b, &mut rng).unwrap();

    let mut ctx = FiatShamirProver::<Ctx, _>::new(PAIR_SHUFFLE_LABEL, &mut rng);
    prover.prove(&mut ctx).unwrap();
    let proof = ctx.into_proof();

    t.swap(0, 1);

    let verifier =
        pair_shuffle::verifier::<Ctx>(&f.g, &f.keypair.pkey, &f.a, &f.b, &s, &t).unwrap();
    let mut ctx = FiatShamirVerifier::<Ctx>::new(PAIR_SHUFFLE_LABEL, &proof);
    assert!(matches!(
        verifier.verify(&mut ctx),
        Err(Error::InvalidProof)
    ));
}

// Sato-Kilian end to end: a single round and the full 80-round batch.
#[test]
fn sato_shuffle_roundtrip() {
    let mut rng = stream();
    let f = fixture(&mut rng);

    let (s, t, prover) =
        sato::shuffle::<Ctx, _>(&f.g, &f.keypair.pkey, &f.a, &f.b, &mut rng).unwrap();

    // single round
    let mut pri_rng = ChaCha20Rng::from_seed([2u8; 32]);
    let mut ctx = FiatShamirProver::<Ctx, _>::new(SATO_LABEL, &mut pri_rng);
    prover.prove(&mut ctx, &mut rng).unwrap();
    let proof = ctx.into_proof();

    let verifier = sato::verifier::<Ctx>(&f.g, &f.keypair.pkey, &f.a, &f.b, &s, &t).unwrap();
    let mut ctx = FiatShamirVerifier::<Ctx>::new(SATO_LABEL, &proof);
    verifier.verify(&mut ctx).unwrap();
    ctx.finish().unwrap();

    // 80 independent rounds, all accepted
    let proofs = sato::prove_rounds(&prover, sato::DEFAULT_ROUNDS, &mut rng).unwrap();
    sato::verify_rounds(&verifier, &proofs).unwrap();

    let mut decrypted = decrypt_all(&f.keypair, &s, &t);
    let mut expected = f.messages.clone();
    decrypted.sort();
    expected.sort();
    assert_eq!(decrypted, expected);
}

// A statement that is not a re-encryption of the inputs survives single
// rounds only by luck; over 80 rounds at least one opening must fail.
#[test]
fn sato_shuffle_soundness() {
    let mut rng = stream();
    let f = fixture(&mut rng);

    let (s, mut t, prover) =
        sato::shuffle::<Ctx, _>(&f.g, &f.keypair.pkey, &f.a, &f.b, &mut rng).unwrap();
    let proofs = sato::prove_rounds(&prover, sato::DEFAULT_ROUNDS, &mut rng).unwrap();

    t.swap(0, 1);

    let verifier = sato::verifier::<Ctx>(&f.g, &f.keypair.pkey, &f.a, &f.b, &s, &t).unwrap();
    assert!(matches!(
        sato::verify_rounds(&verifier, &proofs),
        Err(Error::InvalidProof)
    ));
}

// Identical seeded streams produce byte-identical proofs.
#[test]
fn proofs_are_deterministic() {
    let run = || {
        let mut rng = stream();
        let f = fixture(&mut rng);
        let (s, t, prover) =
            pair_shuffle::shuffle::<Ctx, _>(&f.g, &f.keypair.pkey, &f.a, &f.b, &mut rng).unwrap();
        let mut ctx = FiatShamirProver::<Ctx, _>::new(PAIR_SHUFFLE_LABEL, &mut rng);
        prover.prove(&mut ctx).unwrap();
        (s, t, ctx.into_proof())
    };

    let (s1, t1, p1) = run();
    let (s2, t2, p2) = run();

    assert_eq!(s1, s2);
    assert_eq!(t1, t2);
    assert_eq!(p1, p2);
}
