pub mod p256;
pub mod ristretto255;

pub use p256::P256Group;
pub use ristretto255::Ristretto255Group;
