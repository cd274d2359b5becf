//! Neff's simple k-shuffle: the prover knows scalar vectors x, y and a
//! scalar gamma with x_i = gamma * y_{pi(i)} for some permutation pi.
//! Public are the commitments X_i = g^{x_i}, Y_i = g^{y_i} and
//! Gamma = g^gamma. This is the inner protocol the pair shuffle reduces
//! to; it is also usable on its own.

use crate::context::Context;
use crate::proof::{ProverContext, VerifierContext};
use crate::traits::element::GroupElement;
use crate::traits::scalar::GroupScalar;
use crate::utils::Error;
use vser_derive::VSerializable;

// P step 0: public inputs
#[derive(Debug, VSerializable)]
pub struct SimplePublic<C: Context> {
    pub x: Vec<C::Element>,
    pub y: Vec<C::Element>,
}

// P step 2: Theta commitment vector
#[derive(Debug, VSerializable)]
pub struct SimpleCommit<C: Context> {
    pub theta: Vec<C::Element>,
}

// P step 4: alpha response vector
#[derive(Debug, VSerializable)]
pub struct SimpleResponse<C: Context> {
    pub alpha: Vec<C::Scalar>,
}

pub struct SimpleShuffle<C: Context> {
    k: usize,
    _marker: std::marker::PhantomData<C>,
}

// Computes g^{ab - cd} for the Theta vector. The four operand slots
// mirror the four shapes the protocol needs: absent factors drop their
// product term (a == None) or leave it unmultiplied (d == None).
fn thenc<C: Context>(
    g: &C::Element,
    a: Option<&C::Scalar>,
    b: Option<&C::Scalar>,
    c: Option<&C::Scalar>,
    d: Option<&C::Scalar>,
) -> C::Element {
    let ab = match (a, b) {
        (Some(a), Some(b)) => a.mul(b),
        _ => C::Scalar::zero(),
    };
    let cd = match (c, d) {
        (Some(c), Some(d)) => c.mul(d),
        (Some(c), None) => c.clone(),
        _ => C::Scalar::zero(),
    };

    g.exp(&ab.sub(&cd))
}

// Verifies one Theta element: A^a * B^{-b} == T.
fn thver<C: Context>(
    a_point: &C::Element,
    b_point: &C::Element,
    t: &C::Element,
    a: &C::Scalar,
    b: &C::Scalar,
) -> bool {
    a_point.exp(a).mul(&b_point.exp(&b.neg())).equals(t)
}

impl<C: Context> SimpleShuffle<C> {
    pub fn new(k: usize) -> Result<Self, Error> {
        if k <= 1 {
            return Err(Error::SizeMismatch);
        }
        Ok(Self {
            k,
            _marker: std::marker::PhantomData,
        })
    }

    pub fn prove<P: ProverContext<C>>(
        &self,
        g: &C::Element,
        gamma: &C::Scalar,
        x: &[C::Scalar],
        y: &[C::Scalar],
        ctx: &mut P,
    ) -> Result<(), Error> {
        let k = self.k;
        if k != x.len() || k != y.len() {
            return Err(Error::SizeMismatch);
        }

        // Step 0: commitments to the witness scalars
        let p0 = SimplePublic::<C> {
            x: x.iter().map(|xi| g.exp(xi)).collect(),
            y: y.iter().map(|yi| g.exp(yi)).collect(),
        };
        ctx.put(&p0)?;

        // V step 1
        let t = ctx.pub_rand_scalar();

        // P step 2
        let gamma_t = gamma.mul(&t);
        let xhat: Vec<C::Scalar> = x.iter().map(|xi| xi.sub(&t)).collect();
        let yhat: Vec<C::Scalar> = y.iter().map(|yi| yi.sub(&gamma_t)).collect();

        let thlen = 2 * k - 1;
        let theta = ctx.pri_rand_scalars(thlen);

        let mut big_theta = Vec::with_capacity(thlen + 1);
        big_theta.push(thenc::<C>(g, None, None, Some(&theta[0]), Some(&yhat[0])));
        for i in 1..k {
            big_theta.push(thenc::<C>(
                g,
                Some(&theta[i - 1]),
                Some(&xhat[i]),
                Some(&theta[i]),
                Some(&yhat[i]),
            ));
        }
        for i in k..thlen {
            big_theta.push(thenc::<C>(
                g,
                Some(&theta[i - 1]),
                Some(gamma),
                Some(&theta[i]),
                None,
            ));
        }
        big_theta.push(thenc::<C>(g, Some(&theta[thlen - 1]), Some(gamma), None, None));

        let p2 = SimpleCommit::<C> { theta: big_theta };
        ctx.put(&p2)?;

        // V step 3
        let c = ctx.pub_rand_scalar();

        // P step 4
        let mut alpha: Vec<C::Scalar> = Vec::with_capacity(thlen);
        let mut runprod = c.clone();
        for i in 0..k {
            runprod = runprod.mul(&xhat[i]);
            runprod = runprod.mul(&yhat[i].inv().ok_or(Error::RandomnessFailure)?);
            alpha.push(theta[i].add(&runprod));
        }
        for i in k..thlen {
            alpha.push(theta[i].clone());
        }
        let gamma_inv = gamma.inv().ok_or(Error::RandomnessFailure)?;
        let mut rungamma = c.clone();
        for i in 1..k {
            rungamma = rungamma.mul(&gamma_inv);
            alpha[thlen - i] = theta[thlen - i].add(&rungamma);
        }

        let p4 = SimpleResponse::<C> { alpha };
        ctx.put(&p4)?;

        Ok(())
    }

    pub fn verify<V: VerifierContext<C>>(
        &self,
        g: &C::Element,
        big_gamma: &C::Element,
        ctx: &mut V,
    ) -> Result<(), Error> {
        let k = self.k;
        let thlen = 2 * k - 1;

        // replay the transcript, re-deriving the challenges
        let p0: SimplePublic<C> = ctx.get()?;
        let t = ctx.pub_rand_scalar();
        let p2: SimpleCommit<C> = ctx.get()?;
        let c = ctx.pub_rand_scalar();
        let p4: SimpleResponse<C> = ctx.get()?;

        let x = &p0.x;
        let y = &p0.y;
        let big_theta = &p2.theta;
        let alpha = &p4.alpha;

        if x.len() != k || y.len() != k || big_theta.len() != thlen + 1 || alpha.len() != thlen {
            return Err(Error::MalformedProof);
        }

        // Verifier step 5
        let neg_t = t.neg();
        let u = g.exp(&neg_t);
        let w = big_gamma.exp(&neg_t);
        let xhat: Vec<C::Element> = x.iter().map(|xi| xi.mul(&u)).collect();
        let yhat: Vec<C::Element> = y.iter().map(|yi| yi.mul(&w)).collect();

        let mut good = thver::<C>(&xhat[0], &yhat[0], &big_theta[0], &c, &alpha[0]);
        for i in 1..k {
            good = good && thver::<C>(&xhat[i], &yhat[i], &big_theta[i], &alpha[i - 1], &alpha[i]);
        }
        for i in k..thlen {
            good = good && thver::<C>(big_gamma, g, &big_theta[i], &alpha[i - 1], &alpha[i]);
        }
        good = good && thver::<C>(big_gamma, g, &big_theta[thlen], &alpha[thlen - 1], &c);

        if !good {
            return Err(Error::InvalidProof);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::P256Ctx as PCtx;
    use crate::context::RistrettoCtx as RCtx;
    use crate::cryptosystem::elgamal::Permutation;
    use crate::proof::{FiatShamirProver, FiatShamirVerifier};
    use crate::traits::group::CryptoGroup;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn witness<Ctx: Context>(
        k: usize,
        rng: &mut ChaCha20Rng,
    ) -> (Ctx::Scalar, Vec<Ctx::Scalar>, Vec<Ctx::Scalar>) {
        let gamma = Ctx::G::random_scalar(rng);
        let y: Vec<Ctx::Scalar> = (0..k).map(|_| Ctx::G::random_scalar(rng)).collect();
        let pi = Permutation::generate(k, rng);
        let x: Vec<Ctx::Scalar> = (0..k).map(|i| gamma.mul(&y[pi.as_slice()[i]])).collect();

        (gamma, x, y)
    }

    #[test]
    fn test_simple_shuffle_ristretto() {
        test_simple_shuffle::<RCtx>();
    }

    #[test]
    fn test_simple_shuffle_p256() {
        test_simple_shuffle::<PCtx>();
    }

    #[test]
    fn test_simple_shuffle_tampered_ristretto() {
        test_simple_shuffle_tampered::<RCtx>();
    }

    #[test]
    fn test_simple_shuffle_rejects_k1() {
        assert!(matches!(
            SimpleShuffle::<RCtx>::new(1),
            Err(Error::SizeMismatch)
        ));
    }

    fn test_simple_shuffle<Ctx: Context>() {
        let mut rng = ChaCha20Rng::seed_from_u64(17);
        for k in [2, 3, 7] {
            let g = Ctx::generator();
            let (gamma, x, y) = witness::<Ctx>(k, &mut rng);
            let big_gamma = g.exp(&gamma);

            let ss = SimpleShuffle::<Ctx>::new(k).unwrap();
            let mut prover = FiatShamirProver::<Ctx, _>::new(b"SS", &mut rng);
            ss.prove(&g, &gamma, &x, &y, &mut prover).unwrap();
            let proof = prover.into_proof();

            let mut verifier = FiatShamirVerifier::<Ctx>::new(b"SS", &proof);
            ss.verify(&g, &big_gamma, &mut verifier).unwrap();
            verifier.finish().unwrap();
        }
    }

    fn test_simple_shuffle_tampered<Ctx: Context>() {
        let mut rng = ChaCha20Rng::seed_from_u64(23);
        let k = 4;
        let g = Ctx::generator();
        let (gamma, x, y) = witness::<Ctx>(k, &mut rng);
        let big_gamma = g.exp(&gamma);

        let ss = SimpleShuffle::<Ctx>::new(k).unwrap();
        let mut prover = FiatShamirProver::<Ctx, _>::new(b"SS", &mut rng);
        ss.prove(&g, &gamma, &x, &y, &mut prover).unwrap();
        let proof = prover.into_proof();

        // flipping a bit anywhere in the body must kill the proof
        let mut tampered = proof.clone();
        let last = tampered.len() - 1;
        tampered[last] ^= 0x01;
        let mut verifier = FiatShamirVerifier::<Ctx>::new(b"SS", &tampered);
        let ret = ss.verify(&g, &big_gamma, &mut verifier);
        assert!(matches!(
            ret,
            Err(Error::InvalidProof) | Err(Error::MalformedProof)
        ));
    }
}
