use rand::rngs::OsRng;
use rand_chacha::ChaCha20Rng;

pub trait CRng: rand::RngCore + rand::CryptoRng {}
impl CRng for OsRng {}
// Seeded streams for reproducible protocol transcripts.
impl CRng for ChaCha20Rng {}

pub trait Rng: CRng {
    fn rng() -> Self;
}

impl Rng for OsRng {
    fn rng() -> OsRng {
        rand::rngs::OsRng
    }
}
