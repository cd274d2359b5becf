pub mod element;
pub mod scalar;

pub use element::P256Element;
pub use scalar::P256Scalar;

use crate::traits::group::CryptoGroup;
use crate::utils::rng;
use crate::utils::Error;

use crate::traits::element::GroupElement;
use crate::traits::scalar::GroupScalar;
use p256::elliptic_curve::hash2curve::{ExpandMsgXmd, GroupDigest};
use p256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use p256::elliptic_curve::subtle::CtOption;
use p256::NistP256;
use p256::{EncodedPoint, ProjectivePoint};

use crate::utils::hash;

#[derive(Debug, Clone)]
pub struct P256Group;

impl CryptoGroup for P256Group {
    type Element = P256Element;
    type Scalar = P256Scalar;
    type Hasher = hash::Hasher256;
    type Plaintext = [u8; 30];

    fn generator() -> Self::Element {
        P256Element::new(ProjectivePoint::GENERATOR)
    }

    fn hash_to_scalar(input_slices: &[&[u8]], ds_tags: &[&[u8]]) -> Self::Scalar {
        let ret = NistP256::hash_to_scalar::<ExpandMsgXmd<Self::Hasher>>(input_slices, ds_tags);

        P256Scalar(ret.expect("expand_message failed for fixed-width inputs"))
    }

    fn random_element<R: rng::CRng>(rng: &mut R) -> Self::Element {
        Self::Element::random(rng)
    }

    fn random_scalar<R: rng::CRng>(rng: &mut R) -> Self::Scalar {
        Self::Scalar::random(rng)
    }

    // The 30 data bytes sit in x-coordinate bytes 1..31; the low byte is a
    // counter searched until x lands on the curve. Each candidate succeeds
    // with probability ~1/2.
    fn encode(input: &Self::Plaintext) -> Result<Self::Element, Error> {
        let mut bytes = [0u8; 33];
        bytes[0] = 0x02;
        bytes[2..2 + input.len()].copy_from_slice(input);
        for j in 0..=255u8 {
            bytes[32] = j;
            let Ok(encoded) = EncodedPoint::from_bytes(bytes) else {
                continue;
            };
            let point: CtOption<P256Element> =
                ProjectivePoint::from_encoded_point(&encoded).map(P256Element);
            if point.is_some().into() {
                return Ok(point.expect("impossible"));
            }
        }
        Err(Error::EncodingError(
            "Failed to encode into P-256 point".to_string(),
        ))
    }

    fn decode(message: &Self::Element) -> Result<Self::Plaintext, Error> {
        let encoded = message.0.to_affine().to_encoded_point(true);
        let x = encoded.x().ok_or(Error::EncodingError(
            "The identity encodes no data".to_string(),
        ))?;
        // the 30 bytes of data are placed in the range 1-30 of x
        let slice = &x.as_slice()[1..31];
        let ret: Self::Plaintext = slice
            .try_into()
            .expect("impossible, passed slice is size 30");

        Ok(ret)
    }
}

#[cfg(test)]
mod tests;
