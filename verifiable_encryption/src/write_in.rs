//! Proof of knowledge of the randomness `r` of a ciphertext `(u, v) = (gh^r, y^r * m)`, which is a
//! Schnorr proof of a preimage of `u` under `r -> gh^r`. The second part `v` of the ciphertext is
//! bound to the proof through the label.

use crate::{elgamal::PublicKey, error::EncryptionError};
use arithm::{ExpHom, PGroupElement, PRingElement};
use ark_std::{rand::RngCore, vec, vec::Vec};
use crypto_utils::ByteTree;
use digest::Digest;
use schnorr_pok::{schnorr::SchnorrCommitment, SchnorrProof, SigmaError, ZKPoK};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZKPoKWriteIn {
    sp: SchnorrProof<ExpHom>,
}

impl ZKPoKWriteIn {
    pub fn new(public_key: &PublicKey) -> Result<Self, EncryptionError> {
        let domain = public_key.message_group().pring();
        Ok(Self {
            sp: SchnorrProof::new(ExpHom::new(domain, public_key.gh().clone())?),
        })
    }

    /// `Node[label, v]` for a ciphertext `(u, v)`.
    fn make_label(label: &ByteTree, ciphertext: &PGroupElement) -> Result<ByteTree, SigmaError> {
        Ok(ByteTree::Node(vec![
            label.clone(),
            ciphertext.project(1)?.to_byte_tree(),
        ]))
    }
}

impl ZKPoK for ZKPoKWriteIn {
    /// The ciphertext
    type Instance = PGroupElement;
    /// The encryption randomness
    type Witness = PRingElement;
    type Precomputed = SchnorrCommitment;

    fn randomness_byte_length(&self, stat_dist: u32) -> usize {
        self.sp.randomness_byte_length(stat_dist)
    }

    fn precompute<R: RngCore>(
        &self,
        rng: &mut R,
        stat_dist: u32,
    ) -> Result<Self::Precomputed, SigmaError> {
        self.sp.precompute(rng, stat_dist)
    }

    fn complete_proof<D: Digest, R: RngCore>(
        &self,
        precomputed: Self::Precomputed,
        label: &ByteTree,
        instance: &Self::Instance,
        witness: &Self::Witness,
        rng: &mut R,
        stat_dist: u32,
    ) -> Result<Vec<u8>, SigmaError> {
        let label = Self::make_label(label, instance)?;
        self.sp.complete_proof::<D, R>(
            precomputed,
            &label,
            instance.project(0)?,
            witness,
            rng,
            stat_dist,
        )
    }

    fn verify<D: Digest>(&self, label: &ByteTree, instance: &Self::Instance, proof: &[u8]) -> bool {
        match (Self::make_label(label, instance), instance.project(0)) {
            (Ok(label), Ok(u)) => self.sp.verify::<D>(&label, u, proof),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elgamal::ElGamal;
    use ark_std::rand::{rngs::StdRng, SeedableRng};
    use sha2::Sha256;
    use test_utils::{test_groups, STAT_DIST};

    #[test]
    fn proves_knowledge_of_randomness() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let label = ByteTree::leaf(b"write-in".to_vec());
        for group in test_groups() {
            for standard in [true, false] {
                let eg = ElGamal::new(standard, group.clone(), STAT_DIST);
                let (pk, _) = eg.gen(&mut rng).unwrap();
                let zkpok = ZKPoKWriteIn::new(&pk).unwrap();
                let m = group.random_element(&mut rng, STAT_DIST);
                let randomness = eg.precompute_encrypt(&pk, &mut rng).unwrap();
                let c = eg.complete_encrypt(&pk, &randomness, &m).unwrap();

                let proof = zkpok
                    .prove::<Sha256, _>(&label, &c, randomness.r(), &mut rng, STAT_DIST)
                    .unwrap();
                assert!(zkpok.verify::<Sha256>(&label, &c, &proof));

                // The second part of the ciphertext is bound through the label
                let other = eg
                    .complete_encrypt(&pk, &randomness, &group.generator())
                    .unwrap();
                assert!(!zkpok.verify::<Sha256>(&label, &other, &proof));
                assert!(!zkpok.verify::<Sha256>(&label, &m, &proof));
            }
        }
    }
}
