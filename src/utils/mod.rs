pub mod hash;
pub mod rng;
pub mod serialization;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    DeserializationError(String),
    #[error("{0}")]
    SerializationError(String),
    #[error("{0}")]
    EncodingError(String),
    #[error("Try from slice error: {0}")]
    SliceError(#[from] std::array::TryFromSliceError),
    #[error("mismatched vector lengths")]
    SizeMismatch,
    #[error("malformed proof transcript")]
    MalformedProof,
    #[error("proof verification failed")]
    InvalidProof,
    #[error("plaintext decoding failed")]
    DecodeError,
    #[error("degenerate randomness")]
    RandomnessFailure,
}
