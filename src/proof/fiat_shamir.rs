use sha3::Digest;

use crate::context::Context;
use crate::proof::{ProverContext, VerifierContext};
use crate::traits::group::CryptoGroup;
use crate::utils::hash;
use crate::utils::rng::CRng;
use crate::utils::serialization::variable::{LengthU, LENGTH_BYTES};
use crate::utils::serialization::{VDeserializable, VSerializable};
use crate::utils::Error;

const DS_TAGS_TRANSCRIPT: [&[u8]; 3] = [b"protocol_label", b"transcript", b"challenge_counter"];
const DS_TAGS_CHALLENGE: [&[u8]; 2] = [b"transcript_digest", b"challenge_index"];

// Two-stage challenge derivation: the transcript is digested once per
// challenge round, then each scalar of the round is derived from the
// digest and its index. Prover and verifier run this identical code over
// identical absorbed bytes.
fn derive_challenges<C: Context>(
    label: &[u8],
    transcript: &[u8],
    counter: u64,
    count: usize,
) -> Vec<C::Scalar> {
    let mut hasher = C::get_hasher();
    hash::update_hasher(
        &mut hasher,
        &[label, transcript, &counter.to_be_bytes()],
        &DS_TAGS_TRANSCRIPT,
    );
    let digest = hasher.finalize();

    (0..count)
        .map(|i| {
            let inputs: &[&[u8]] = &[digest.as_slice(), &(i as u64).to_be_bytes()];
            C::G::hash_to_scalar(inputs, &DS_TAGS_CHALLENGE)
        })
        .collect()
}

fn frame(bytes: &[u8]) -> Vec<u8> {
    let len: LengthU = bytes.len().try_into().expect("Length conversion failed");
    let mut ret = len.to_be_bytes().to_vec();
    ret.extend_from_slice(bytes);
    ret
}

/// Fiat-Shamir prover context: accumulates the framed prover messages as
/// the proof byte string and derives challenges from the absorbed
/// transcript, keyed by a protocol-purpose label. Private randomness
/// comes from the caller-owned stream.
pub struct FiatShamirProver<'a, C: Context, R: CRng> {
    label: Vec<u8>,
    transcript: Vec<u8>,
    proof: Vec<u8>,
    counter: u64,
    rng: &'a mut R,
    _marker: std::marker::PhantomData<C>,
}

impl<'a, C: Context, R: CRng> FiatShamirProver<'a, C, R> {
    pub fn new(label: &[u8], rng: &'a mut R) -> Self {
        Self {
            label: label.to_vec(),
            transcript: vec![],
            proof: vec![],
            counter: 0,
            rng,
            _marker: std::marker::PhantomData,
        }
    }

    /// The accumulated proof: the concatenation of the framed prover
    /// messages, in transcript order.
    pub fn into_proof(self) -> Vec<u8> {
        self.proof
    }
}

impl<C: Context, R: CRng> ProverContext<C> for FiatShamirProver<'_, C, R> {
    fn put<M: VSerializable>(&mut self, message: &M) -> Result<(), Error> {
        let framed = frame(&message.ser());
        self.transcript.extend_from_slice(&framed);
        self.proof.extend_from_slice(&framed);
        Ok(())
    }

    fn pub_rand_scalar(&mut self) -> C::Scalar {
        self.pub_rand_scalars(1).remove(0)
    }

    fn pub_rand_scalars(&mut self, count: usize) -> Vec<C::Scalar> {
        let ret = derive_challenges::<C>(&self.label, &self.transcript, self.counter, count);
        self.counter += 1;
        ret
    }

    fn pri_rand_scalar(&mut self) -> C::Scalar {
        C::G::random_scalar(self.rng)
    }

    fn pri_rand_scalars(&mut self, count: usize) -> Vec<C::Scalar> {
        (0..count).map(|_| C::G::random_scalar(self.rng)).collect()
    }
}

/// Fiat-Shamir verifier context: replays a proof byte string, absorbing
/// each framed message and re-deriving the same challenges.
pub struct FiatShamirVerifier<'a, C: Context> {
    label: Vec<u8>,
    transcript: Vec<u8>,
    proof: &'a [u8],
    cursor: usize,
    counter: u64,
    _marker: std::marker::PhantomData<C>,
}

impl<'a, C: Context> FiatShamirVerifier<'a, C> {
    pub fn new(label: &[u8], proof: &'a [u8]) -> Self {
        Self {
            label: label.to_vec(),
            transcript: vec![],
            proof,
            cursor: 0,
            counter: 0,
            _marker: std::marker::PhantomData,
        }
    }

    /// Rejects proofs with trailing bytes beyond the replayed messages.
    pub fn finish(self) -> Result<(), Error> {
        if self.cursor != self.proof.len() {
            return Err(Error::MalformedProof);
        }
        Ok(())
    }
}

impl<C: Context> VerifierContext<C> for FiatShamirVerifier<'_, C> {
    fn get<M: VDeserializable + VSerializable>(&mut self) -> Result<M, Error> {
        let remaining = &self.proof[self.cursor..];
        if remaining.len() < LENGTH_BYTES {
            return Err(Error::MalformedProof);
        }
        let len_bytes: [u8; LENGTH_BYTES] = remaining[0..LENGTH_BYTES]
            .try_into()
            .map_err(|_| Error::MalformedProof)?;
        let len: usize = LengthU::from_be_bytes(len_bytes)
            .try_into()
            .expect("Length conversion failed");
        if remaining.len() < LENGTH_BYTES + len {
            return Err(Error::MalformedProof);
        }

        let message_bytes = &remaining[LENGTH_BYTES..LENGTH_BYTES + len];
        let message = M::deser(message_bytes).map_err(|_| Error::MalformedProof)?;

        self.transcript
            .extend_from_slice(&remaining[0..LENGTH_BYTES + len]);
        self.cursor += LENGTH_BYTES + len;

        Ok(message)
    }

    fn pub_rand_scalar(&mut self) -> C::Scalar {
        self.pub_rand_scalars(1).remove(0)
    }

    fn pub_rand_scalars(&mut self, count: usize) -> Vec<C::Scalar> {
        let ret = derive_challenges::<C>(&self.label, &self.transcript, self.counter, count);
        self.counter += 1;
        ret
    }
}
