//! Sato-Kilian cut-and-choose shuffle argument. Each round commits to an
//! independent re-encrypted permutation (U, V) of the inputs and opens it
//! against either the inputs or the shuffled outputs, depending on a
//! single challenge bit. One round has soundness error 1/2; callers
//! amplify with [`prove_rounds`] / [`verify_rounds`].

use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;

use crate::context::Context;
use crate::cryptosystem::elgamal::{self, Permutation};
use crate::proof::{FiatShamirProver, FiatShamirVerifier, ProverContext, VerifierContext};
use crate::traits::element::GroupElement;
use crate::traits::scalar::GroupScalar;
use crate::utils::rng::CRng;
use crate::utils::serialization::VSerializable;
use crate::utils::Error;
use vser_derive::VSerializable;

/// Protocol-purpose label for Fiat-Shamir contexts running this protocol.
pub const SATO_LABEL: &[u8] = b"SK";

/// Rounds needed for a 2^-80 soundness target.
pub const DEFAULT_ROUNDS: usize = 80;

// P step 1: commitment pairs
#[derive(Debug, VSerializable)]
pub struct SatoCommit<C: Context> {
    pub u: Vec<C::Element>,
    pub v: Vec<C::Element>,
}

// P step 3: the opening of the branch selected by the challenge bit
#[derive(Debug, VSerializable)]
pub struct SatoOpen<C: Context> {
    pub lambda: Permutation,
    pub gamma: Vec<C::Scalar>,
}

pub struct SatoShuffle<C: Context> {
    k: usize,
    _marker: std::marker::PhantomData<C>,
}

// The challenge bit: low bit of the first byte of the canonical scalar
// encoding. Prover and verifier derive it from the same absorbed
// transcript, so any canonical encoding works; the first byte keeps the
// bit unbiased on both backends.
fn challenge_bit<C: Context>(mask: &C::Scalar) -> u8 {
    mask.ser()[0] & 1
}

impl<C: Context> SatoShuffle<C> {
    pub fn new(k: usize) -> Result<Self, Error> {
        if k <= 1 {
            return Err(Error::SizeMismatch);
        }
        Ok(Self {
            k,
            _marker: std::marker::PhantomData,
        })
    }

    /// One cut-and-choose round. `pi` and `beta` are the witness of the
    /// real shuffle (A, B) -> (S, T); the commitment re-shuffle draws its
    /// own fresh randomness from `rng`.
    #[allow(clippy::too_many_arguments)]
    pub fn prove<P: ProverContext<C>, R: CRng>(
        &self,
        pi: &Permutation,
        g: &C::Element,
        h: &C::Element,
        beta: &[C::Scalar],
        a: &[C::Element],
        b: &[C::Element],
        rng: &mut R,
        ctx: &mut P,
    ) -> Result<(), Error> {
        let k = self.k;
        if k != pi.len() || k != beta.len() || k != a.len() || k != b.len() {
            return Err(Error::SizeMismatch);
        }

        // P step 1: commitment shuffle with independent randomness
        let (u, v, pi_prime, beta_prime) = elgamal::permute::<C, R>(g, h, a, b, rng)?;
        let p1 = SatoCommit::<C> { u, v };
        ctx.put(&p1)?;

        // V step 2
        let mask = ctx.pub_rand_scalar();
        let bit = challenge_bit::<C>(&mask);

        // P step 3: open the branch selected by the bit
        let p3 = if bit == 0 {
            // (U, V) is a re-encrypted permutation of (A, B) by construction
            SatoOpen::<C> {
                lambda: pi_prime,
                gamma: beta_prime,
            }
        } else {
            // Open (U, V) against (S, T). From
            //   U_i = g^{beta'_{pi'[i]}} * A_{pi'[i]}
            //   A_j = S_{piinv[j]} * g^{-beta_j}
            // the opening permutation is lambda[i] = piinv[pi'[i]] with
            // blinding gamma[lambda[i]] = beta'_{pi'[i]} - beta_{pi'[i]}.
            let pinv = pi.inverse_slice();
            let pp = pi_prime.as_slice();
            let mut lambda = vec![0usize; k];
            let mut gamma = vec![C::Scalar::zero(); k];
            for i in 0..k {
                let j = pinv[pp[i]];
                lambda[i] = j;
                gamma[j] = beta_prime[pp[i]].sub(&beta[pp[i]]);
            }
            SatoOpen::<C> {
                lambda: Permutation::from_table(lambda)
                    .expect("impossible, composition of bijections"),
                gamma,
            }
        };
        ctx.put(&p3)?;

        Ok(())
    }

    pub fn verify<V: VerifierContext<C>>(
        &self,
        g: &C::Element,
        h: &C::Element,
        a: &[C::Element],
        b: &[C::Element],
        s: &[C::Element],
        t: &[C::Element],
        ctx: &mut V,
    ) -> Result<(), Error> {
        let k = self.k;
        if k != a.len() || k != b.len() || k != s.len() || k != t.len() {
            return Err(Error::SizeMismatch);
        }

        // P step 1
        let p1: SatoCommit<C> = ctx.get()?;
        if p1.u.len() != k || p1.v.len() != k {
            return Err(Error::MalformedProof);
        }

        // V step 2
        let mask = ctx.pub_rand_scalar();
        let bit = challenge_bit::<C>(&mask);

        // P step 3
        let p3: SatoOpen<C> = ctx.get()?;
        if p3.lambda.len() != k || p3.gamma.len() != k {
            return Err(Error::MalformedProof);
        }

        let (c, d) = if bit == 0 { (a, b) } else { (s, t) };
        let lambda = p3.lambda.as_slice();
        for i in 0..k {
            let blind = &p3.gamma[lambda[i]];
            if !g.exp(blind).mul(&c[lambda[i]]).equals(&p1.u[i]) {
                return Err(Error::InvalidProof);
            }
            if !h.exp(blind).mul(&d[lambda[i]]).equals(&p1.v[i]) {
                return Err(Error::InvalidProof);
            }
        }

        Ok(())
    }
}

/// Single-use prover handle returned by [`shuffle`].
pub struct SatoProver<C: Context> {
    ps: SatoShuffle<C>,
    g: C::Element,
    h: C::Element,
    a: Vec<C::Element>,
    b: Vec<C::Element>,
    pi: Permutation,
    beta: Vec<C::Scalar>,
}

impl<C: Context> SatoProver<C> {
    pub fn prove<P: ProverContext<C>, R: CRng>(
        &self,
        ctx: &mut P,
        rng: &mut R,
    ) -> Result<(), Error> {
        self.ps.prove(
            &self.pi, &self.g, &self.h, &self.beta, &self.a, &self.b, rng, ctx,
        )
    }
}

/// Single-use verifier handle returned by [`verifier`].
pub struct SatoVerifier<C: Context> {
    ps: SatoShuffle<C>,
    g: C::Element,
    h: C::Element,
    a: Vec<C::Element>,
    b: Vec<C::Element>,
    s: Vec<C::Element>,
    t: Vec<C::Element>,
}

impl<C: Context> SatoVerifier<C> {
    pub fn verify<V: VerifierContext<C>>(&self, ctx: &mut V) -> Result<(), Error> {
        self.ps.verify(
            &self.g, &self.h, &self.a, &self.b, &self.s, &self.t, ctx,
        )
    }
}

/// Re-encrypts and permutes the pair vectors (a, b) and returns the
/// shuffled output together with a cut-and-choose prover for it.
pub fn shuffle<C: Context, R: CRng>(
    g: &C::Element,
    h: &C::Element,
    a: &[C::Element],
    b: &[C::Element],
    rng: &mut R,
) -> Result<(Vec<C::Element>, Vec<C::Element>, SatoProver<C>), Error> {
    let ps = SatoShuffle::new(a.len())?;

    let (s, t, pi, beta) = elgamal::permute::<C, R>(g, h, a, b, rng)?;

    let prover = SatoProver {
        ps,
        g: g.clone(),
        h: h.clone(),
        a: a.to_vec(),
        b: b.to_vec(),
        pi,
        beta,
    };

    Ok((s, t, prover))
}

/// Builds a verifier for the claim that (s, t) is a re-encrypted
/// permutation of (a, b).
#[allow(clippy::too_many_arguments)]
pub fn verifier<C: Context>(
    g: &C::Element,
    h: &C::Element,
    a: &[C::Element],
    b: &[C::Element],
    s: &[C::Element],
    t: &[C::Element],
) -> Result<SatoVerifier<C>, Error> {
    if a.len() != b.len() || a.len() != s.len() || a.len() != t.len() {
        return Err(Error::SizeMismatch);
    }
    let ps = SatoShuffle::new(a.len())?;

    Ok(SatoVerifier {
        ps,
        g: g.clone(),
        h: h.clone(),
        a: a.to_vec(),
        b: b.to_vec(),
        s: s.to_vec(),
        t: t.to_vec(),
    })
}

fn round_label(round: usize) -> Vec<u8> {
    let mut label = SATO_LABEL.to_vec();
    label.extend_from_slice(&(round as u32).to_be_bytes());
    label
}

/// Runs `rounds` independent cut-and-choose rounds in parallel. Each
/// round forks its own streams from the caller's stream, so the output
/// is deterministic for a seeded caller stream and rounds stay
/// independent of each other.
pub fn prove_rounds<C: Context, R: CRng>(
    prover: &SatoProver<C>,
    rounds: usize,
    rng: &mut R,
) -> Result<Vec<Vec<u8>>, Error> {
    let mut seeds = Vec::with_capacity(2 * rounds);
    for _ in 0..2 * rounds {
        let mut seed = [0u8; 32];
        rng.fill_bytes(&mut seed);
        seeds.push(seed);
    }
    debug!("proving {} cut-and-choose rounds", rounds);

    seeds
        .par_chunks(2)
        .enumerate()
        .map(|(round, pair)| {
            let mut permute_rng = ChaCha20Rng::from_seed(pair[0]);
            let mut pri_rng = ChaCha20Rng::from_seed(pair[1]);
            let label = round_label(round);
            let mut ctx = FiatShamirProver::<C, _>::new(&label, &mut pri_rng);
            prover.prove(&mut ctx, &mut permute_rng)?;
            Ok(ctx.into_proof())
        })
        .collect()
}

/// Verifies a batch of round proofs in parallel; accepts iff every round
/// accepts.
pub fn verify_rounds<C: Context>(
    verifier: &SatoVerifier<C>,
    proofs: &[Vec<u8>],
) -> Result<(), Error> {
    debug!("verifying {} cut-and-choose rounds", proofs.len());

    proofs
        .par_iter()
        .enumerate()
        .map(|(round, proof)| {
            let label = round_label(round);
            let mut ctx = FiatShamirVerifier::<C>::new(&label, proof);
            verifier.verify(&mut ctx)?;
            ctx.finish()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::P256Ctx as PCtx;
    use crate::context::RistrettoCtx as RCtx;
    use crate::traits::group::CryptoGroup;

    fn pairs<Ctx: Context>(
        k: usize,
        h: &Ctx::Element,
        rng: &mut ChaCha20Rng,
    ) -> (Vec<Ctx::Element>, Vec<Ctx::Element>) {
        let g = Ctx::generator();
        let mut a = Vec::with_capacity(k);
        let mut b = Vec::with_capacity(k);
        for _ in 0..k {
            let r = Ctx::G::random_scalar(rng);
            let m = Ctx::G::random_element(rng);
            a.push(g.exp(&r));
            b.push(h.exp(&r).mul(&m));
        }
        (a, b)
    }

    #[test]
    fn test_sato_single_rounds_ristretto() {
        test_sato_single_rounds::<RCtx>();
    }

    #[test]
    fn test_sato_single_rounds_p256() {
        test_sato_single_rounds::<PCtx>();
    }

    // Runs many single rounds with distinct seeds so both challenge
    // branches get exercised.
    fn test_sato_single_rounds<Ctx: Context>() {
        for seed in 0..8u64 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let g = Ctx::generator();
            let h = Ctx::G::random_element(&mut rng);
            let (a, b) = pairs::<Ctx>(4, &h, &mut rng);

            let (s, t, prover) = shuffle::<Ctx, _>(&g, &h, &a, &b, &mut rng).unwrap();

            let mut pri_rng = ChaCha20Rng::seed_from_u64(seed + 1000);
            let mut ctx = FiatShamirProver::<Ctx, _>::new(SATO_LABEL, &mut pri_rng);
            prover.prove(&mut ctx, &mut rng).unwrap();
            let proof = ctx.into_proof();

            let sv = verifier::<Ctx>(&g, &h, &a, &b, &s, &t).unwrap();
            let mut ctx = FiatShamirVerifier::<Ctx>::new(SATO_LABEL, &proof);
            sv.verify(&mut ctx).unwrap();
            ctx.finish().unwrap();
        }
    }

    #[test]
    fn test_sato_eighty_rounds_ristretto() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let g = RCtx::generator();
        let h = <RCtx as Context>::G::random_element(&mut rng);
        let (a, b) = pairs::<RCtx>(3, &h, &mut rng);

        let (s, t, prover) = shuffle::<RCtx, _>(&g, &h, &a, &b, &mut rng).unwrap();
        let proofs = prove_rounds(&prover, DEFAULT_ROUNDS, &mut rng).unwrap();
        assert_eq!(proofs.len(), DEFAULT_ROUNDS);

        let sv = verifier::<RCtx>(&g, &h, &a, &b, &s, &t).unwrap();
        verify_rounds(&sv, &proofs).unwrap();
    }

    // A dishonest statement: (S, T) is tampered after proving, so the
    // openings against (S, T) must fail for at least one of the rounds.
    #[test]
    fn test_sato_soundness_ristretto() {
        let mut rng = ChaCha20Rng::seed_from_u64(43);
        let g = RCtx::generator();
        let h = <RCtx as Context>::G::random_element(&mut rng);
        let (a, b) = pairs::<RCtx>(3, &h, &mut rng);

        let (s, mut t, prover) = shuffle::<RCtx, _>(&g, &h, &a, &b, &mut rng).unwrap();
        let proofs = prove_rounds(&prover, DEFAULT_ROUNDS, &mut rng).unwrap();

        t.swap(0, 1);

        let sv = verifier::<RCtx>(&g, &h, &a, &b, &s, &t).unwrap();
        assert!(matches!(
            verify_rounds(&sv, &proofs),
            Err(Error::InvalidProof)
        ));
    }

    #[test]
    fn test_sato_rejects_small_k() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let g = RCtx::generator();
        let h = RCtx::random_element();
        let one = vec![RCtx::random_element()];

        assert!(matches!(
            shuffle::<RCtx, _>(&g, &h, &one, &one, &mut rng),
            Err(Error::SizeMismatch)
        ));
    }
}
