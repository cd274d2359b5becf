use crate::context::Context;
use crate::traits::element::GroupElement;
use crate::traits::group::CryptoGroup;
use crate::traits::scalar::GroupScalar;
use crate::utils::rng::CRng;
use crate::utils::serialization::{VDeserializable, VSerializable};
use crate::utils::Error;
use vser_derive::VSerializable;

pub type Plaintext<C> = <<C as Context>::G as CryptoGroup>::Plaintext;

#[derive(Debug, PartialEq, VSerializable)]
pub struct KeyPair<C: Context> {
    pub skey: C::Scalar,
    pub pkey: C::Element,
}

impl<C: Context> KeyPair<C> {
    pub fn new(skey: C::Scalar, pkey: C::Element) -> KeyPair<C> {
        KeyPair { skey, pkey }
    }

    pub fn generate() -> Self {
        let mut rng = C::get_rng();
        Self::generate_with_rng(&mut rng)
    }

    pub fn generate_with_rng<R: CRng>(rng: &mut R) -> Self {
        let skey = C::G::random_scalar(rng);
        Self::from_secret(skey)
    }

    pub fn from_secret(skey: C::Scalar) -> Self {
        let pkey = C::generator().exp(&skey);
        KeyPair { skey, pkey }
    }

    pub fn encrypt<R: CRng>(
        &self,
        message: &Plaintext<C>,
        rng: &mut R,
    ) -> Result<Ciphertext<C>, Error> {
        encrypt::<C, R>(&self.pkey, message, rng)
    }

    pub fn decrypt(&self, ciphertext: &Ciphertext<C>) -> Result<Plaintext<C>, Error> {
        decrypt::<C>(&self.skey, ciphertext)
    }
}

#[derive(Debug, PartialEq, Clone, VSerializable)]
pub struct Ciphertext<C: Context> {
    pub alpha: C::Element,
    pub beta: C::Element,
}

impl<C: Context> Ciphertext<C> {
    pub fn new(alpha: C::Element, beta: C::Element) -> Self {
        Ciphertext { alpha, beta }
    }

    pub fn re_encrypt(&self, r: &C::Scalar, pk: &C::Element) -> Self {
        let g = C::generator();
        Ciphertext {
            alpha: self.alpha.mul(&g.exp(r)),
            beta: self.beta.mul(&pk.exp(r)),
        }
    }
}

#[derive(Debug, PartialEq, VSerializable)]
pub struct PublicKey<C: Context> {
    pub y: C::Element,
}

impl<C: Context> PublicKey<C> {
    pub fn new(y: C::Element) -> Self {
        Self { y }
    }
    pub fn from_keypair(keypair: &KeyPair<C>) -> Self {
        Self {
            y: keypair.pkey.clone(),
        }
    }
    pub fn encrypt<R: CRng>(
        &self,
        message: &Plaintext<C>,
        rng: &mut R,
    ) -> Result<Ciphertext<C>, Error> {
        encrypt::<C, R>(&self.y, message, rng)
    }
}

/// Canonical ElGamal encryption of a byte plaintext: the plaintext is
/// encoded into a group element m, and the ciphertext is (g^y, pk^y * m)
/// for a fresh random y.
pub fn encrypt<C: Context, R: CRng>(
    public: &C::Element,
    message: &Plaintext<C>,
    rng: &mut R,
) -> Result<Ciphertext<C>, Error> {
    let m = C::G::encode(message)?;
    let y = C::G::random_scalar(rng);

    let alpha = C::generator().exp(&y);
    let beta = public.exp(&y).mul(&m);

    Ok(Ciphertext { alpha, beta })
}

/// Canonical ElGamal decryption: m = beta * alpha^{-skey}, decoded back
/// into the plaintext bytes.
pub fn decrypt<C: Context>(
    secret: &C::Scalar,
    ciphertext: &Ciphertext<C>,
) -> Result<Plaintext<C>, Error> {
    let shared = ciphertext.alpha.exp(&secret.neg());
    let m = ciphertext.beta.mul(&shared);

    C::G::decode(&m).map_err(|_| Error::DecodeError)
}

/// A bijection on [0, k), held together with its inverse.
#[derive(Debug, PartialEq, Clone)]
pub struct Permutation {
    permutation: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    /// Uniform permutation via Fisher-Yates, drawing j in [0, i] as a
    /// 64-bit word reduced mod i+1. The reduction bias is negligible for
    /// k far below 2^64.
    pub fn generate<R: CRng>(k: usize, rng: &mut R) -> Self {
        let mut permutation: Vec<usize> = (0..k).collect();

        for i in (1..k).rev() {
            let j = (rng.next_u64() % (i as u64 + 1)) as usize;
            permutation.swap(i, j);
        }

        Self::from_table(permutation).expect("impossible, Fisher-Yates preserves bijectivity")
    }

    pub fn from_table(permutation: Vec<usize>) -> Result<Self, Error> {
        let k = permutation.len();
        let mut inverse = vec![usize::MAX; k];

        for (i, v) in permutation.iter().enumerate() {
            if *v >= k || inverse[*v] != usize::MAX {
                return Err(Error::DeserializationError(
                    "Index table is not a permutation".to_string(),
                ));
            }
            inverse[*v] = i;
        }

        Ok(Self {
            permutation,
            inverse,
        })
    }

    pub fn len(&self) -> usize {
        self.permutation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permutation.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.permutation
    }

    pub fn inverse_slice(&self) -> &[usize] {
        &self.inverse
    }
}

impl VSerializable for Permutation {
    fn ser(&self) -> Vec<u8> {
        let mut ret = Vec::with_capacity(4 * self.permutation.len());
        for v in &self.permutation {
            let v: u32 = (*v).try_into().expect("Length conversion failed");
            ret.extend_from_slice(&v.to_be_bytes());
        }

        ret
    }
}

impl VDeserializable for Permutation {
    fn deser(buffer: &[u8]) -> Result<Self, Error> {
        if buffer.len() % 4 != 0 {
            return Err(Error::DeserializationError(
                "Unexpected byte length for Permutation".to_string(),
            ));
        }
        let table: Vec<usize> = buffer
            .chunks_exact(4)
            .map(|c| u32::from_be_bytes(c.try_into().expect("impossible")) as usize)
            .collect();

        Self::from_table(table)
    }
}

/// Re-encrypt and permute a vector of ElGamal pairs: the core shuffle
/// operation. Returns the shuffled pairs (S, T) together with the secret
/// witness (pi, beta) satisfying
///
///   S_i = g^{beta_{pi[i]}} * A_{pi[i]},  T_i = h^{beta_{pi[i]}} * B_{pi[i]}
pub fn permute<C: Context, R: CRng>(
    g: &C::Element,
    h: &C::Element,
    a: &[C::Element],
    b: &[C::Element],
    rng: &mut R,
) -> Result<PermuteOutput<C>, Error> {
    let k = a.len();
    if k != b.len() || k <= 1 {
        return Err(Error::SizeMismatch);
    }

    let pi = Permutation::generate(k, rng);
    let beta: Vec<C::Scalar> = (0..k).map(|_| C::G::random_scalar(rng)).collect();

    let p = pi.as_slice();
    let mut s = Vec::with_capacity(k);
    let mut t = Vec::with_capacity(k);
    for i in 0..k {
        s.push(g.exp(&beta[p[i]]).mul(&a[p[i]]));
        t.push(h.exp(&beta[p[i]]).mul(&b[p[i]]));
    }

    Ok((s, t, pi, beta))
}

pub type PermuteOutput<C> = (
    Vec<<C as Context>::Element>,
    Vec<<C as Context>::Element>,
    Permutation,
    Vec<<C as Context>::Scalar>,
);
