//! ElGamal ciphertexts carrying a proof of knowledge bound to a label.
//!
//! A ciphertext is the byte tree `Node[c, leaf(proof)]` where `c` is the byte tree of the ElGamal
//! ciphertext and `proof` a proof, for the instance `c`, of the protocol chosen by the
//! [`ElGamalZKPoKAdapter`]. Decryption returns nothing unless the ciphertext is well formed and the
//! proof verifies under the same label.

use crate::{
    elgamal::{ElGamal, EncryptionRandomness, PublicKey, SecretKey},
    error::EncryptionError,
    write_in::ZKPoKWriteIn,
};
use arithm::{PGroup, PGroupElement, PRingElement};
use ark_std::{end_timer, marker::PhantomData, rand::RngCore, start_timer, vec};
use crypto_utils::ByteTree;
use digest::Digest;
use schnorr_pok::ZKPoK;

/// Chooses the proof attached to ciphertexts under a public key.
pub trait ElGamalZKPoKAdapter {
    type Proof: ZKPoK<Instance = PGroupElement, Witness = PRingElement>;

    fn zkpok(&self, public_key: &PublicKey) -> Result<Self::Proof, EncryptionError>;
}

/// Attaches a proof of knowledge of the encryption randomness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ZKPoKWriteInAdapter;

impl ElGamalZKPoKAdapter for ZKPoKWriteInAdapter {
    type Proof = ZKPoKWriteIn;

    fn zkpok(&self, public_key: &PublicKey) -> Result<Self::Proof, EncryptionError> {
        ZKPoKWriteIn::new(public_key)
    }
}

#[derive(Clone, Debug)]
pub struct ElGamalZKPoK<A: ElGamalZKPoKAdapter, D: Digest> {
    eg: ElGamal,
    adapter: A,
    _digest: PhantomData<D>,
}

/// ElGamal with proofs of knowledge of the randomness, the ciphertexts of which can not be
/// modified into ciphertexts of related messages.
pub type ElGamalZKPoKWriteIn<D> = ElGamalZKPoK<ZKPoKWriteInAdapter, D>;

/// Everything of an encryption that does not depend on the message or the label.
pub struct EncryptionPrecomputed<A: ElGamalZKPoKAdapter> {
    pub randomness: EncryptionRandomness,
    pub proof: <A::Proof as ZKPoK>::Precomputed,
}

impl<A: ElGamalZKPoKAdapter, D: Digest> ElGamalZKPoK<A, D> {
    pub fn new(standard: bool, group: PGroup, adapter: A, stat_dist: u32) -> Self {
        Self {
            eg: ElGamal::new(standard, group, stat_dist),
            adapter,
            _digest: PhantomData,
        }
    }

    pub fn elgamal(&self) -> &ElGamal {
        &self.eg
    }

    pub fn gen<R: RngCore>(&self, rng: &mut R) -> Result<(PublicKey, SecretKey), EncryptionError> {
        self.eg.gen(rng)
    }

    pub fn precompute_encrypt<R: RngCore>(
        &self,
        public_key: &PublicKey,
        rng: &mut R,
    ) -> Result<EncryptionPrecomputed<A>, EncryptionError> {
        let randomness = self.eg.precompute_encrypt(public_key, rng)?;
        let proof = self
            .adapter
            .zkpok(public_key)?
            .precompute(rng, self.eg.stat_dist())?;
        Ok(EncryptionPrecomputed { randomness, proof })
    }

    pub fn complete_encrypt<R: RngCore>(
        &self,
        label: &[u8],
        public_key: &PublicKey,
        precomputed: EncryptionPrecomputed<A>,
        message: &PGroupElement,
        rng: &mut R,
    ) -> Result<ByteTree, EncryptionError> {
        let EncryptionPrecomputed { randomness, proof } = precomputed;
        let ciphertext = self
            .eg
            .complete_encrypt(public_key, &randomness, message)?;
        let proof = self.adapter.zkpok(public_key)?.complete_proof::<D, R>(
            proof,
            &ByteTree::leaf(label),
            &ciphertext,
            randomness.r(),
            rng,
            self.eg.stat_dist(),
        )?;
        Ok(ByteTree::Node(vec![
            ciphertext.to_byte_tree(),
            ByteTree::Leaf(proof),
        ]))
    }

    pub fn encrypt<R: RngCore>(
        &self,
        label: &[u8],
        public_key: &PublicKey,
        message: &PGroupElement,
        rng: &mut R,
    ) -> Result<ByteTree, EncryptionError> {
        let encrypt_time = start_timer!(|| "Verifiable encryption");
        let precomputed = self.precompute_encrypt(public_key, rng)?;
        let ciphertext = self.complete_encrypt(label, public_key, precomputed, message, rng);
        end_timer!(encrypt_time);
        ciphertext
    }

    /// The message, if `ciphertext` is a node of an ElGamal ciphertext and a proof leaf and the
    /// proof verifies under `label`.
    pub fn decrypt(
        &self,
        label: &[u8],
        public_key: &PublicKey,
        secret_key: &SecretKey,
        ciphertext: &ByteTree,
    ) -> Option<PGroupElement> {
        let decrypt_time = start_timer!(|| "Verifiable decryption");
        let children = ciphertext.as_node_of_width(2).ok()?;
        let proof = children[1].as_leaf().ok()?;
        let element: PGroupElement = public_key.group().to_element(&children[0]).ok()?.into();
        let verified = self.adapter.zkpok(public_key).ok()?.verify::<D>(
            &ByteTree::leaf(label),
            &element,
            proof,
        );
        let message = if verified {
            self.eg.decrypt(secret_key, &element).ok()
        } else {
            None
        };
        end_timer!(decrypt_time);
        message
    }

    pub fn wide_public_key(
        &self,
        public_key: &PublicKey,
        width: usize,
    ) -> Result<PublicKey, EncryptionError> {
        self.eg.wide_public_key(public_key, width)
    }

    pub fn wide_private_key(
        &self,
        secret_key: &SecretKey,
        width: usize,
    ) -> Result<SecretKey, EncryptionError> {
        self.eg.wide_private_key(secret_key, width)
    }
}

impl<D: Digest> ElGamalZKPoK<ZKPoKWriteInAdapter, D> {
    pub fn write_in(standard: bool, group: PGroup, stat_dist: u32) -> Self {
        Self::new(standard, group, ZKPoKWriteInAdapter, stat_dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_std::rand::{rngs::StdRng, SeedableRng};
    use blake2::Blake2b512;
    use sha2::Sha256;
    use std::time::Instant;
    use test_utils::{bit_flips, test_groups, STAT_DIST};

    #[test]
    fn encrypt_decrypt_with_proof() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let label = b"election-1";
        for group in test_groups() {
            for standard in [true, false] {
                let eg = ElGamalZKPoKWriteIn::<Sha256>::write_in(standard, group.clone(), STAT_DIST);
                let (pk, sk) = eg.gen(&mut rng).unwrap();
                for width in 1..4 {
                    println!(
                        "\n# group = {}, standard = {}, width = {}",
                        group, standard, width
                    );
                    let wpk = eg.wide_public_key(&pk, width).unwrap();
                    let wsk = eg.wide_private_key(&sk, width).unwrap();
                    let m = wpk.message_group().random_element(&mut rng, STAT_DIST);

                    let start = Instant::now();
                    let c = eg.encrypt(label, &wpk, &m, &mut rng).unwrap();
                    println!("Encrypted in: {:?}", start.elapsed());
                    println!("Ciphertext size: {}", c.size());

                    let start = Instant::now();
                    assert_eq!(eg.decrypt(label, &wpk, &wsk, &c), Some(m.clone()));
                    println!("Decrypted in: {:?}", start.elapsed());

                    // Proofs are bound to the label
                    assert_eq!(eg.decrypt(b"election-2", &wpk, &wsk, &c), None);

                    // Serialized and read back
                    let c = ByteTree::from_bytes(&c.to_bytes()).unwrap();
                    assert_eq!(eg.decrypt(label, &wpk, &wsk, &c), Some(m));
                }
            }
        }
    }

    #[test]
    fn encrypted_messages() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let groups = test_groups();
        let group = &groups[1];
        let eg = ElGamalZKPoKWriteIn::<Blake2b512>::write_in(false, group.clone(), STAT_DIST);
        let (pk, sk) = eg.gen(&mut rng).unwrap();
        let m = group.encode(b"write-in candidate").unwrap();

        let pre = eg.precompute_encrypt(&pk, &mut rng).unwrap();
        let c = eg
            .complete_encrypt(b"label", &pk, pre, &m, &mut rng)
            .unwrap();
        let decrypted = eg.decrypt(b"label", &pk, &sk, &c).unwrap();
        assert_eq!(decrypted.decode().unwrap(), b"write-in candidate".to_vec());
    }

    #[test]
    fn rejects_malformed_ciphertexts() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let label = b"label";
        let groups = test_groups();
        let group = &groups[0];
        let eg = ElGamalZKPoKWriteIn::<Sha256>::write_in(true, group.clone(), STAT_DIST);
        let (pk, sk) = eg.gen(&mut rng).unwrap();
        let m = group.random_element(&mut rng, STAT_DIST);
        let c = eg.encrypt(label, &pk, &m, &mut rng).unwrap();
        let children = c.as_node().unwrap().to_vec();

        assert_eq!(eg.decrypt(label, &pk, &sk, &children[0]), None);
        assert_eq!(eg.decrypt(label, &pk, &sk, &children[1]), None);
        let three = ByteTree::Node(vec![
            children[0].clone(),
            children[1].clone(),
            children[1].clone(),
        ]);
        assert_eq!(eg.decrypt(label, &pk, &sk, &three), None);
        let node_proof = ByteTree::Node(vec![
            children[0].clone(),
            ByteTree::Node(vec![children[1].clone()]),
        ]);
        assert_eq!(eg.decrypt(label, &pk, &sk, &node_proof), None);
        let bad_element = ByteTree::Node(vec![ByteTree::leaf(vec![1, 2, 3]), children[1].clone()]);
        assert_eq!(eg.decrypt(label, &pk, &sk, &bad_element), None);

        // A ciphertext mixed with the proof of another one
        let other = eg.encrypt(label, &pk, &m, &mut rng).unwrap();
        let mixed = ByteTree::Node(vec![
            children[0].clone(),
            other.as_node().unwrap()[1].clone(),
        ]);
        assert_eq!(eg.decrypt(label, &pk, &sk, &mixed), None);

        // Every single bit flip of the serialized ciphertext is rejected
        for flipped in bit_flips(&c.to_bytes()) {
            if let Ok(tree) = ByteTree::from_bytes(&flipped) {
                assert_eq!(eg.decrypt(label, &pk, &sk, &tree), None);
            }
        }
    }
}
