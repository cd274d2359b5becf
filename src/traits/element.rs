use crate::traits::scalar::GroupScalar;
use crate::utils::rng;
use std::fmt::Debug;

pub trait GroupElement: Sized + Debug + PartialEq {
    type Scalar: GroupScalar;

    fn one() -> Self;
    fn mul(&self, other: &Self) -> Self;
    fn inv(&self) -> Self;
    fn exp(&self, scalar: &Self::Scalar) -> Self;
    fn equals(&self, other: &Self) -> bool;

    fn random<R: rng::CRng>(rng: &mut R) -> Self;
}
