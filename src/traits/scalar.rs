use crate::utils::rng;
use std::fmt::Debug;

pub trait GroupScalar: Sized + Debug + PartialEq {
    fn zero() -> Self;
    fn one() -> Self;
    fn add(&self, other: &Self) -> Self;
    fn sub(&self, other: &Self) -> Self;
    fn mul(&self, other: &Self) -> Self;
    fn neg(&self) -> Self;
    fn inv(&self) -> Option<Self>;
    fn equals(&self, other: &Self) -> bool;

    fn random<R: rng::CRng>(rng: &mut R) -> Self;
}
