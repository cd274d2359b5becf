use crate::context::{Context, RistrettoCtx};
use crate::cryptosystem::elgamal;
use crate::cryptosystem::elgamal::Permutation;
use crate::utils::serialization::{VDeserializable, VSerializable};
use serde::{self, de::Error, Deserializer, Serializer};

// elgamal::PublicKey
impl<'de, C: Context> serde::Deserialize<'de> for elgamal::PublicKey<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes: Vec<u8> = serde::Deserialize::deserialize(deserializer)?;
        Self::deser(&bytes).map_err(D::Error::custom)
    }
}

impl<C: Context> serde::Serialize for elgamal::PublicKey<C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.ser())
    }
}

// elgamal::KeyPair
impl<'de, C: Context> serde::Deserialize<'de> for elgamal::KeyPair<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes: Vec<u8> = serde::Deserialize::deserialize(deserializer)?;
        Self::deser(&bytes).map_err(D::Error::custom)
    }
}

impl<C: Context> serde::Serialize for elgamal::KeyPair<C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.ser())
    }
}

// elgamal::Ciphertext
impl<'de, C: Context> serde::Deserialize<'de> for elgamal::Ciphertext<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes: Vec<u8> = serde::Deserialize::deserialize(deserializer)?;
        Self::deser(&bytes).map_err(D::Error::custom)
    }
}

impl<C: Context> serde::Serialize for elgamal::Ciphertext<C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.ser())
    }
}

// elgamal::Permutation
impl<'de> serde::Deserialize<'de> for Permutation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes: Vec<u8> = serde::Deserialize::deserialize(deserializer)?;
        Self::deser(&bytes).map_err(D::Error::custom)
    }
}

impl serde::Serialize for Permutation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.ser())
    }
}

// RistrettoCtx
impl<'de> serde::Deserialize<'de> for RistrettoCtx {
    fn deserialize<D>(_deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(RistrettoCtx)
    }
}

impl serde::Serialize for RistrettoCtx {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&[])
    }
}

#[cfg(test)]
mod tests {
    use crate::context::{Context, P256Ctx};
    use crate::cryptosystem::elgamal;
    use crate::cryptosystem::elgamal::Permutation;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_serde_elgamal_public_key() {
        let pk = elgamal::PublicKey::from_keypair(&elgamal::KeyPair::<P256Ctx>::generate());
        let serialized = bincode::serde::encode_to_vec(&pk, bincode::config::standard()).unwrap();
        let (deserialized, _): (elgamal::PublicKey<P256Ctx>, _) =
            bincode::serde::decode_from_slice(&serialized, bincode::config::standard()).unwrap();
        assert_eq!(pk, deserialized);
    }

    #[test]
    fn test_serde_elgamal_key_pair() {
        let kp = elgamal::KeyPair::<P256Ctx>::generate();
        let serialized = bincode::serde::encode_to_vec(&kp, bincode::config::standard()).unwrap();
        let (deserialized, _): (elgamal::KeyPair<P256Ctx>, _) =
            bincode::serde::decode_from_slice(&serialized, bincode::config::standard()).unwrap();
        assert_eq!(kp, deserialized);
    }

    #[test]
    fn test_serde_elgamal_ciphertext() {
        let ct = elgamal::Ciphertext::<P256Ctx>::new(
            P256Ctx::random_element(),
            P256Ctx::random_element(),
        );

        let serialized = bincode::serde::encode_to_vec(&ct, bincode::config::standard()).unwrap();
        let (deserialized, _): (elgamal::Ciphertext<P256Ctx>, _) =
            bincode::serde::decode_from_slice(&serialized, bincode::config::standard()).unwrap();
        assert_eq!(ct, deserialized);
    }

    #[test]
    fn test_serde_permutation() {
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let pi = Permutation::generate(9, &mut rng);

        let serialized = bincode::serde::encode_to_vec(&pi, bincode::config::standard()).unwrap();
        let (deserialized, _): (Permutation, _) =
            bincode::serde::decode_from_slice(&serialized, bincode::config::standard()).unwrap();
        assert_eq!(pi, deserialized);
    }
}
