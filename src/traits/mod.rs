pub mod element;
pub mod group;
pub mod scalar;

pub use element::GroupElement;
pub use group::CryptoGroup;
pub use scalar::GroupScalar;
