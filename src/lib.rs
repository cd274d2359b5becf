#![allow(dead_code)]
#![doc = include_str!("../README.md")]

// enable these once documentation achieves decency
//
// #![deny(missing_docs)]
// #![deny(rustdoc::missing_crate_level_docs)]
// #![deny(rustdoc::broken_intra_doc_links)]

/// Defines implementation choices for key cryptographic functionalities.
pub mod context;
/// ElGamal encryption and the re-encrypt-and-permute primitive.
pub mod cryptosystem;
/// Concrete implementations of curve arithmetic.
pub mod groups;
/// Transcript oracle contracts and their Fiat-Shamir realization.
pub mod proof;
/// Abstractions for curve arithmetic, groups, elements and scalars.
pub mod traits;
/// Utilities such as random number generation, hashing and serialization.
pub mod utils;
/// Zero-knowledge shuffle arguments (generic).
pub mod zkp;
