use rand::rngs::OsRng;

use crate::groups::{P256Group, Ristretto255Group};
use crate::traits::{CryptoGroup, GroupElement, GroupScalar};
use crate::utils::hash::Hasher;
use crate::utils::rng::Rng;
use crate::utils::serialization::{FSer, VSer};

/// Compile-time selection of the group backend, challenge hasher and
/// system randomness a protocol instance runs with. Shuffle provers,
/// verifiers and transcript contexts are generic over a `Context`;
/// picking one of the implementations below fixes every cryptographic
/// choice at once. Sealed: protocol soundness depends on the element,
/// scalar and hasher types moving together.
pub trait Context:
    private::Sealed + std::fmt::Debug + PartialEq + 'static + Clone + Send + Sync
{
    type Element: GroupElement<Scalar = Self::Scalar> + FSer + VSer + Clone + Send + Sync + Eq;
    type Scalar: GroupScalar + FSer + VSer + Clone + Send + Sync + From<u32>;
    type Hasher: Hasher;
    type R: Rng;

    type G: CryptoGroup<Element = Self::Element, Scalar = Self::Scalar, Hasher = Self::Hasher>;

    fn get_rng() -> Self::R {
        Self::R::rng()
    }

    fn get_hasher() -> Self::Hasher {
        Self::Hasher::hasher()
    }

    fn generator() -> Self::Element {
        Self::G::generator()
    }

    fn random_element() -> Self::Element {
        Self::G::random_element(&mut Self::get_rng())
    }

    fn random_scalar() -> Self::Scalar {
        Self::G::random_scalar(&mut Self::get_rng())
    }
}

/// ristretto255 with SHA3-512 challenge derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RistrettoCtx;

impl Context for RistrettoCtx {
    type Element = <Self::G as CryptoGroup>::Element;
    type Scalar = <Self::G as CryptoGroup>::Scalar;
    type Hasher = <Self::G as CryptoGroup>::Hasher;
    type R = OsRng;

    type G = Ristretto255Group;
}

/// NIST P-256 with SHA3-256 challenge derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct P256Ctx;

impl Context for P256Ctx {
    type Element = <Self::G as CryptoGroup>::Element;
    type Scalar = <Self::G as CryptoGroup>::Scalar;
    type Hasher = <Self::G as CryptoGroup>::Hasher;
    type R = OsRng;

    type G = P256Group;
}

mod private {
    pub trait Sealed {}
}
impl private::Sealed for RistrettoCtx {}
impl private::Sealed for P256Ctx {}
