use super::*;
use crate::context::Context;
use crate::context::P256Ctx as Ctx;
use crate::traits::{element::GroupElement, group::CryptoGroup, scalar::GroupScalar};
use crate::utils::serialization::{VDeserializable, VSerializable};

#[test]
fn test_p256_scalar_negation() {
    let s1 = Ctx::random_scalar();
    let s_neg = s1.neg();

    assert_eq!(
        s_neg.add(&s1),
        P256Scalar::zero(),
        "Negation property s + (-s) = 0 failed"
    );
}

#[test]
fn test_p256_scalar_inversion() {
    let s = Ctx::random_scalar();

    if s != P256Scalar::zero() {
        let s_inv = s.inv().expect("Scalar inversion failed");
        let product = s.mul(&s_inv);
        assert_eq!(product, P256Scalar::one(), "s * s_inv = 1 property failed");
    }

    let zero = P256Scalar::zero();
    assert!(zero.inv().is_none(), "Inversion of zero must be None");
}

#[test]
fn test_p256_power_product() {
    let s1 = Ctx::random_scalar();
    let s2 = Ctx::random_scalar();
    let g = Ctx::generator();

    let e1 = g.exp(&s1);
    let e2 = g.exp(&s2);
    let e3_sum = e1.mul(&e2);

    let s_sum = s1.add(&s2);
    let e3_expected = g.exp(&s_sum);

    assert_eq!(
        e3_sum, e3_expected,
        "Element addition failed: e1+e2 != (s1+s2)*G"
    );
}

#[test]
fn test_p256_element_inv() {
    let s = Ctx::random_scalar();
    let g = Ctx::generator();
    let e = g.exp(&s);

    let e_neg = e.inv();
    let e_plus_e_neg = e.mul(&e_neg);

    assert_eq!(
        e_plus_e_neg,
        P256Element::one(),
        "Element negation failed: e + (-e) != Id"
    );
}

#[test]
fn test_p256_power_power() {
    let s1 = Ctx::random_scalar();
    let s2 = Ctx::random_scalar();
    let g = Ctx::generator();

    let e1 = g.exp(&s1);
    let e2 = e1.exp(&s2);

    let s_prod = s1.mul(&s2);
    let e_expected = g.exp(&s_prod);

    assert_eq!(e2, e_expected, "Element scalar multiplication failed");
}

#[test]
fn test_p256_group_hash_to_scalar() {
    let input1 = b"some input data";
    let input2 = b"other input data";
    let ds_tag = b"ds tag";

    let s1 = P256Group::hash_to_scalar(&[input1], &[ds_tag]);
    let s2 = P256Group::hash_to_scalar(&[input1], &[ds_tag]);
    let s3 = P256Group::hash_to_scalar(&[input2], &[ds_tag]);

    assert_eq!(s1, s2, "Hash to scalar not equal for equal input");
    assert_ne!(
        s1, s3,
        "Hash to scalar produces same output for different inputs"
    );
}

#[test]
fn test_p256_element_serialization() {
    let s = Ctx::random_scalar();
    let g = Ctx::generator();
    let e_orig = g.exp(&s);

    let serialized_e = e_orig.ser();
    assert_eq!(serialized_e.len(), 33, "Serialized element length mismatch");

    let e_deserialized = P256Element::deser(&serialized_e).expect("Element deserialization failed");
    assert_eq!(
        e_orig, e_deserialized,
        "Original and deserialized elements do not match"
    );

    // Test identity
    let e_id = P256Element::one();
    let ser_id = e_id.ser();
    let des_id = P256Element::deser(&ser_id).unwrap();
    assert_eq!(e_id, des_id);
}

#[test]
fn test_p256_scalar_serialization() {
    let s_orig = Ctx::random_scalar();

    let serialized_s = s_orig.ser();
    assert_eq!(serialized_s.len(), 32, "Serialized scalar length mismatch");

    let s_deserialized = P256Scalar::deser(&serialized_s).expect("Scalar deserialization failed");
    assert_eq!(
        s_orig, s_deserialized,
        "Original and deserialized scalars do not match"
    );
}

#[test]
fn test_p256_encoding_roundtrip() {
    let mut data = [0u8; 30];
    data[..5].copy_from_slice(b"hello");

    let encoded = P256Group::encode(&data).expect("Encoding failed");
    let decoded = P256Group::decode(&encoded).expect("Decoding failed");

    assert_eq!(data, decoded, "Encoded data does not round trip");
}
