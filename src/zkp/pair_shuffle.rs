//! Neff's verifiable shuffle of ElGamal pairs: given (X, Y) and
//! (Xbar, Ybar), the prover shows knowledge of a permutation pi and
//! blinding factors beta with
//!
//!   Xbar_i = g^{beta_{pi[i]}} * X_{pi[i]},
//!   Ybar_i = h^{beta_{pi[i]}} * Y_{pi[i]}
//!
//! without revealing either. Six moves; the last two embed the simple
//! k-shuffle over the committed exponents (r, s) under Gamma.

use log::debug;

use crate::context::Context;
use crate::cryptosystem::elgamal::{self, Permutation};
use crate::proof::{ProverContext, VerifierContext};
use crate::traits::element::GroupElement;
use crate::traits::scalar::GroupScalar;
use crate::utils::rng::CRng;
use crate::utils::Error;
use vser_derive::VSerializable;

/// Protocol-purpose label for Fiat-Shamir contexts running this protocol.
pub const PAIR_SHUFFLE_LABEL: &[u8] = b"PS";

// P step 1: public commitments
#[derive(Debug, VSerializable)]
pub struct PairCommit<C: Context> {
    pub big_gamma: C::Element,
    pub a: Vec<C::Element>,
    pub c: Vec<C::Element>,
    pub u: Vec<C::Element>,
    pub w: Vec<C::Element>,
    pub lambda_1: C::Element,
    pub lambda_2: C::Element,
}

// P step 3: D vector
#[derive(Debug, VSerializable)]
pub struct PairCommitD<C: Context> {
    pub d: Vec<C::Element>,
}

// P step 5: sigma vector and tau
#[derive(Debug, VSerializable)]
pub struct PairResponse<C: Context> {
    pub sigma: Vec<C::Scalar>,
    pub tau: C::Scalar,
}

pub struct PairShuffle<C: Context> {
    k: usize,
    inner: super::simple_shuffle::SimpleShuffle<C>,
}

impl<C: Context> PairShuffle<C> {
    pub fn new(k: usize) -> Result<Self, Error> {
        let inner = super::simple_shuffle::SimpleShuffle::new(k)?;
        Ok(Self { k, inner })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn prove<P: ProverContext<C>>(
        &self,
        pi: &Permutation,
        g: &C::Element,
        h: &C::Element,
        beta: &[C::Scalar],
        x: &[C::Element],
        y: &[C::Element],
        ctx: &mut P,
    ) -> Result<(), Error> {
        let k = self.k;
        if k != pi.len() || k != beta.len() || k != x.len() || k != y.len() {
            return Err(Error::SizeMismatch);
        }
        let p = pi.as_slice();
        let pinv = pi.inverse_slice();

        // P step 1: pick secrets
        let u = ctx.pri_rand_scalars(k);
        let w = ctx.pri_rand_scalars(k);
        let a = ctx.pri_rand_scalars(k);
        let tau_0 = ctx.pri_rand_scalar();
        let gamma = ctx.pri_rand_scalar();

        // public commits
        let big_gamma = g.exp(&gamma);
        let mut wbetasum = tau_0.clone();
        let mut lambda_1 = C::Element::one();
        let mut lambda_2 = C::Element::one();
        let mut big_a = Vec::with_capacity(k);
        let mut big_c = Vec::with_capacity(k);
        let mut big_u = Vec::with_capacity(k);
        let mut big_w = Vec::with_capacity(k);
        for i in 0..k {
            big_a.push(g.exp(&a[i]));
            big_c.push(g.exp(&gamma.mul(&a[p[i]])));
            big_u.push(g.exp(&u[i]));
            big_w.push(g.exp(&gamma.mul(&w[i])));
            wbetasum = wbetasum.add(&w[i].mul(&beta[p[i]]));
            let wu = w[pinv[i]].sub(&u[i]);
            lambda_1 = lambda_1.mul(&x[i].exp(&wu));
            lambda_2 = lambda_2.mul(&y[i].exp(&wu));
        }
        lambda_1 = lambda_1.mul(&g.exp(&wbetasum));
        lambda_2 = lambda_2.mul(&h.exp(&wbetasum));

        let p1 = PairCommit::<C> {
            big_gamma,
            a: big_a,
            c: big_c,
            u: big_u,
            w: big_w,
            lambda_1,
            lambda_2,
        };
        ctx.put(&p1)?;

        // V step 2
        let rho = ctx.pub_rand_scalars(k);

        // P step 3
        let b: Vec<C::Scalar> = (0..k).map(|i| rho[i].sub(&u[i])).collect();
        let d: Vec<C::Scalar> = (0..k).map(|i| gamma.mul(&b[p[i]])).collect();
        let p3 = PairCommitD::<C> {
            d: d.iter().map(|di| g.exp(di)).collect(),
        };
        ctx.put(&p3)?;

        // V step 4
        let lambda = ctx.pub_rand_scalar();

        // P step 5
        let r: Vec<C::Scalar> = (0..k).map(|i| a[i].add(&lambda.mul(&b[i]))).collect();
        let s: Vec<C::Scalar> = (0..k).map(|i| gamma.mul(&r[p[i]])).collect();
        let mut tau = tau_0.neg();
        let mut sigma = Vec::with_capacity(k);
        for i in 0..k {
            sigma.push(w[i].add(&b[p[i]]));
            tau = tau.add(&b[i].mul(&beta[i]));
        }
        let p5 = PairResponse::<C> { sigma, tau };
        ctx.put(&p5)?;

        // P,V step 6: embedded simple k-shuffle proof
        self.inner.prove(g, &gamma, &r, &s, ctx)
    }

    pub fn verify<V: VerifierContext<C>>(
        &self,
        g: &C::Element,
        h: &C::Element,
        x: &[C::Element],
        y: &[C::Element],
        x_bar: &[C::Element],
        y_bar: &[C::Element],
        ctx: &mut V,
    ) -> Result<(), Error> {
        let k = self.k;
        if k != x.len() || k != y.len() || k != x_bar.len() || k != y_bar.len() {
            return Err(Error::SizeMismatch);
        }

        // P step 1
        let p1: PairCommit<C> = ctx.get()?;
        if p1.a.len() != k || p1.c.len() != k || p1.u.len() != k || p1.w.len() != k {
            return Err(Error::MalformedProof);
        }

        // V step 2
        let rho = ctx.pub_rand_scalars(k);

        // P step 3
        let p3: PairCommitD<C> = ctx.get()?;
        if p3.d.len() != k {
            return Err(Error::MalformedProof);
        }

        // V step 4
        let _lambda = ctx.pub_rand_scalar();

        // P step 5
        let p5: PairResponse<C> = ctx.get()?;
        if p5.sigma.len() != k {
            return Err(Error::MalformedProof);
        }

        // P,V step 6: embedded simple k-shuffle
        self.inner.verify(g, &p1.big_gamma, ctx)?;

        // V step 7
        let mut phi_1 = C::Element::one();
        let mut phi_2 = C::Element::one();
        for i in 0..k {
            phi_1 = phi_1.mul(&x_bar[i].exp(&p5.sigma[i]));
            phi_1 = phi_1.mul(&x[i].exp(&rho[i]).inv());
            phi_2 = phi_2.mul(&y_bar[i].exp(&p5.sigma[i]));
            phi_2 = phi_2.mul(&y[i].exp(&rho[i]).inv());
            if !p1.big_gamma
                .exp(&p5.sigma[i])
                .equals(&p1.w[i].mul(&p3.d[i]))
            {
                return Err(Error::InvalidProof);
            }
        }

        if !p1.lambda_1.mul(&g.exp(&p5.tau)).equals(&phi_1)
            || !p1.lambda_2.mul(&h.exp(&p5.tau)).equals(&phi_2)
        {
            return Err(Error::InvalidProof);
        }

        Ok(())
    }
}

/// Single-use prover handle returned by [`shuffle`]: it owns the shuffle
/// witness and emits the proof into a prover context.
pub struct ShuffleProver<C: Context> {
    ps: PairShuffle<C>,
    g: C::Element,
    h: C::Element,
    x: Vec<C::Element>,
    y: Vec<C::Element>,
    pi: Permutation,
    beta: Vec<C::Scalar>,
}

impl<C: Context> ShuffleProver<C> {
    pub fn prove<P: ProverContext<C>>(&self, ctx: &mut P) -> Result<(), Error> {
        self.ps
            .prove(&self.pi, &self.g, &self.h, &self.beta, &self.x, &self.y, ctx)
    }
}

/// Single-use verifier handle returned by [`verifier`].
pub struct ShuffleVerifier<C: Context> {
    ps: PairShuffle<C>,
    g: C::Element,
    h: C::Element,
    x: Vec<C::Element>,
    y: Vec<C::Element>,
    x_bar: Vec<C::Element>,
    y_bar: Vec<C::Element>,
}

impl<C: Context> ShuffleVerifier<C> {
    pub fn verify<V: VerifierContext<C>>(&self, ctx: &mut V) -> Result<(), Error> {
        self.ps.verify(
            &self.g, &self.h, &self.x, &self.y, &self.x_bar, &self.y_bar, ctx,
        )
    }
}

/// Re-encrypts and permutes the pair vectors (x, y) and returns the
/// shuffled output together with a prover for it.
pub fn shuffle<C: Context, R: CRng>(
    g: &C::Element,
    h: &C::Element,
    x: &[C::Element],
    y: &[C::Element],
    rng: &mut R,
) -> Result<(Vec<C::Element>, Vec<C::Element>, ShuffleProver<C>), Error> {
    let k = x.len();
    let ps = PairShuffle::new(k)?;

    let (x_bar, y_bar, pi, beta) = elgamal::permute::<C, R>(g, h, x, y, rng)?;
    debug!("shuffled {} ElGamal pairs", k);

    let prover = ShuffleProver {
        ps,
        g: g.clone(),
        h: h.clone(),
        x: x.to_vec(),
        y: y.to_vec(),
        pi,
        beta,
    };

    Ok((x_bar, y_bar, prover))
}

/// Builds a verifier for the claim that (x_bar, y_bar) is a re-encrypted
/// permutation of (x, y).
pub fn verifier<C: Context>(
    g: &C::Element,
    h: &C::Element,
    x: &[C::Element],
    y: &[C::Element],
    x_bar: &[C::Element],
    y_bar: &[C::Element],
) -> Result<ShuffleVerifier<C>, Error> {
    if x.len() != y.len() || x.len() != x_bar.len() || x.len() != y_bar.len() {
        return Err(Error::SizeMismatch);
    }
    let ps = PairShuffle::new(x.len())?;

    Ok(ShuffleVerifier {
        ps,
        g: g.clone(),
        h: h.clone(),
        x: x.to_vec(),
        y: y.to_vec(),
        x_bar: x_bar.to_vec(),
        y_bar: y_bar.to_vec(),
    })
}
