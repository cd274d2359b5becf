pub mod fiat_shamir;

pub use fiat_shamir::{FiatShamirProver, FiatShamirVerifier};

use crate::context::Context;
use crate::utils::serialization::{VDeserializable, VSerializable};
use crate::utils::Error;

/// Prover side of the transcript oracle. `put` appends a prover message
/// to the transcript, `pub_rand_*` derive public challenges from
/// everything absorbed so far, `pri_rand_*` draw secret randomness that
/// is never absorbed.
pub trait ProverContext<C: Context> {
    fn put<M: VSerializable>(&mut self, message: &M) -> Result<(), Error>;

    fn pub_rand_scalar(&mut self) -> C::Scalar;
    fn pub_rand_scalars(&mut self, count: usize) -> Vec<C::Scalar>;

    fn pri_rand_scalar(&mut self) -> C::Scalar;
    fn pri_rand_scalars(&mut self, count: usize) -> Vec<C::Scalar>;
}

/// Verifier side of the transcript oracle. `get` reads and absorbs the
/// next expected prover message; `pub_rand_*` recompute the same
/// challenges the prover saw.
pub trait VerifierContext<C: Context> {
    fn get<M: VDeserializable + VSerializable>(&mut self) -> Result<M, Error>;

    fn pub_rand_scalar(&mut self) -> C::Scalar;
    fn pub_rand_scalars(&mut self, count: usize) -> Vec<C::Scalar>;
}
