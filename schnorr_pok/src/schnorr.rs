//! Schnorr protocol for proving knowledge of a preimage `w` of a public `y = H(w)` under a
//! homomorphism `H` from a ring of exponents into a group.
//!
//! 1. Prover picks a random `a` from the domain of `H` and sends `A = H(a)`
//! 2. Verifier sends a challenge `v` from the field of the domain.
//! 3. Prover replies with `k = w * v + a`.
//! 4. Verifier checks `y^v * A = H(k)`.
//!
//! With `H = ExpHom(ring, g)` this is the classic proof of knowledge of a discrete log of `y` in
//! base `g`, and with a product ring and product group it proves knowledge of several discrete
//! logs at once.

use crate::{compute_random_oracle_challenge, error::SigmaError, SigmaProof, ZKPoK};
use arithm::{Homomorphism, PField, PFieldElement, PGroupElement, PRingElement};
use ark_std::{rand::RngCore, vec::Vec};
use crypto_utils::ByteTree;
use digest::Digest;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchnorrProof<H: Homomorphism> {
    pub homomorphism: H,
}

/// Randomness chosen by the prover and the commitment to it.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SchnorrCommitment {
    blinding: PRingElement,
    #[zeroize(skip)]
    pub t: PGroupElement,
}

impl<H: Homomorphism> SchnorrProof<H> {
    pub fn new(homomorphism: H) -> Self {
        Self { homomorphism }
    }

    fn scalar(challenge: &PFieldElement) -> PRingElement {
        PRingElement::Field(challenge.clone())
    }
}

impl<H: Homomorphism> ZKPoK for SchnorrProof<H> {
    type Instance = PGroupElement;
    type Witness = PRingElement;
    type Precomputed = SchnorrCommitment;

    fn randomness_byte_length(&self, stat_dist: u32) -> usize {
        self.homomorphism
            .domain()
            .random_element_byte_length(stat_dist)
    }

    fn precompute<R: RngCore>(
        &self,
        rng: &mut R,
        stat_dist: u32,
    ) -> Result<Self::Precomputed, SigmaError> {
        let blinding = self.homomorphism.domain().random_element(rng, stat_dist);
        let t = self.homomorphism.eva(&blinding)?;
        Ok(SchnorrCommitment { blinding, t })
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
        self.fiat_shamir_proof::<D, R>(precomputed, label, instance, witness, rng, stat_dist)
    }

    fn verify<D: Digest>(&self, label: &ByteTree, instance: &Self::Instance, proof: &[u8]) -> bool {
        self.fiat_shamir_verify::<D>(label, instance, proof)
    }
}

impl<H: Homomorphism> SigmaProof for SchnorrProof<H> {
    type Commitment = PGroupElement;
    type Challenge = PFieldElement;
    type Reply = PRingElement;

    fn instance_to_byte_tree(&self, instance: &Self::Instance) -> ByteTree {
        instance.to_byte_tree()
    }

    fn commit<R: RngCore>(
        &self,
        precomputed: Self::Precomputed,
        _instance: &Self::Instance,
        _witness: &Self::Witness,
        _rng: &mut R,
        _stat_dist: u32,
    ) -> Result<(Self::Precomputed, Self::Commitment), SigmaError> {
        let t = precomputed.t.clone();
        Ok((precomputed, t))
    }

    fn commitment_to_byte_tree(&self, commitment: &Self::Commitment) -> ByteTree {
        commitment.to_byte_tree()
    }

    fn byte_tree_to_commitment(&self, tree: &ByteTree) -> Result<Self::Commitment, SigmaError> {
        Ok(self.homomorphism.range().to_element(tree)?)
    }

    fn challenge_space(&self) -> &PField {
        self.homomorphism.domain().pfield()
    }

    fn random_challenge<R: RngCore>(&self, rng: &mut R, stat_dist: u32) -> Self::Challenge {
        self.challenge_space().random_element(rng, stat_dist)
    }

    fn challenge<D: Digest>(&self, tree: &ByteTree) -> Self::Challenge {
        compute_random_oracle_challenge::<D>(self.challenge_space(), tree)
    }

    fn reply(
        &self,
        precomputed: Self::Precomputed,
        witness: &Self::Witness,
        challenge: &Self::Challenge,
    ) -> Result<Self::Reply, SigmaError> {
        Ok(witness
            .mul(&Self::scalar(challenge))?
            .add(&precomputed.blinding)?)
    }

    fn reply_to_byte_tree(&self, reply: &Self::Reply) -> ByteTree {
        reply.to_byte_tree()
    }

    fn byte_tree_to_reply(&self, tree: &ByteTree) -> Result<Self::Reply, SigmaError> {
        Ok(self.homomorphism.domain().to_element(tree)?)
    }

    fn check(
        &self,
        instance: &Self::Instance,
        commitment: &Self::Commitment,
        challenge: &Self::Challenge,
        reply: &Self::Reply,
    ) -> bool {
        let lhs = instance
            .exp(&Self::scalar(challenge))
            .and_then(|y| y.mul(commitment));
        let rhs = self.homomorphism.eva(reply);
        match (lhs, rhs) {
            (Ok(l), Ok(r)) => l == r,
            _ => false,
        }
    }

    fn simulate<R: RngCore>(
        &self,
        instance: &Self::Instance,
        challenge: &Self::Challenge,
        rng: &mut R,
        stat_dist: u32,
    ) -> Result<(Self::Commitment, Self::Reply), SigmaError> {
        let k = self.homomorphism.domain().random_element(rng, stat_dist);
        let t = self
            .homomorphism
            .eva(&k)?
            .mul(&instance.exp(&Self::scalar(challenge))?.inv())?;
        Ok((t, k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arithm::{ExpHom, PGroup, PPRing, PRing};
    use ark_std::rand::{rngs::StdRng, SeedableRng};
    use blake2::Blake2b512;
    use sha2::Sha256;
    use test_utils::{bit_flips, test_groups, test_serialization, STAT_DIST};

    fn instance_and_witness<R: RngCore>(
        proof: &SchnorrProof<ExpHom>,
        rng: &mut R,
    ) -> (PGroupElement, PRingElement) {
        let w = proof.homomorphism.domain().random_element(rng, STAT_DIST);
        (proof.homomorphism.eva(&w).unwrap(), w)
    }

    fn discrete_log(group: &PGroup) -> SchnorrProof<ExpHom> {
        SchnorrProof::new(ExpHom::new(group.pring(), group.generator()).unwrap())
    }

    #[test]
    fn schnorr_discrete_log() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let label = ByteTree::leaf(b"label".to_vec());
        for group in test_groups() {
            let proof = discrete_log(&group);
            let (y, w) = instance_and_witness(&proof, &mut rng);

            let bytes = proof
                .prove::<Sha256, _>(&label, &y, &w, &mut rng, STAT_DIST)
                .unwrap();
            assert!(proof.verify::<Sha256>(&label, &y, &bytes));

            // Bound to the label, the instance and the hash function
            assert!(!proof.verify::<Sha256>(&ByteTree::leaf(b"other".to_vec()), &y, &bytes));
            assert!(!proof.verify::<Sha256>(&label, &y.mul(&group.generator()).unwrap(), &bytes));
            assert!(!proof.verify::<Blake2b512>(&label, &y, &bytes));

            let bytes = proof
                .prove::<Blake2b512, _>(&label, &y, &w, &mut rng, STAT_DIST)
                .unwrap();
            assert!(proof.verify::<Blake2b512>(&label, &y, &bytes));
        }
    }

    #[test]
    fn schnorr_multiple_discrete_logs() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let label = ByteTree::leaf(b"label".to_vec());
        let groups = test_groups();
        let group = &groups[0];
        let wide = PGroup::wide(group, 3).unwrap();
        let basis = wide.random_element(&mut rng, STAT_DIST);
        let domain = PRing::Product(PPRing::repeated(group.pring(), 3).unwrap());
        let proof = SchnorrProof::new(ExpHom::new(domain, basis).unwrap());
        let (y, w) = instance_and_witness(&proof, &mut rng);

        let bytes = proof
            .prove::<Sha256, _>(&label, &y, &w, &mut rng, STAT_DIST)
            .unwrap();
        assert!(proof.verify::<Sha256>(&label, &y, &bytes));

        // A witness for another instance does not give a valid proof
        let (y2, _) = instance_and_witness(&proof, &mut rng);
        let bytes = proof
            .prove::<Sha256, _>(&label, &y2, &w, &mut rng, STAT_DIST)
            .unwrap();
        assert!(!proof.verify::<Sha256>(&label, &y2, &bytes));
    }

    #[test]
    fn schnorr_rejects_modified_proofs() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let label = ByteTree::leaf(b"label".to_vec());
        let proof = discrete_log(&test_groups()[0]);
        let (y, w) = instance_and_witness(&proof, &mut rng);
        let bytes = proof
            .prove::<Sha256, _>(&label, &y, &w, &mut rng, STAT_DIST)
            .unwrap();
        for flipped in bit_flips(&bytes) {
            assert!(!proof.verify::<Sha256>(&label, &y, &flipped));
        }
        assert!(!proof.verify::<Sha256>(&label, &y, &bytes[..bytes.len() - 1]));
        assert!(!proof.verify::<Sha256>(&label, &y, &[]));
    }

    #[test]
    fn schnorr_interactive_and_simulated() {
        let mut rng = StdRng::seed_from_u64(0u64);
        for group in test_groups() {
            let proof = discrete_log(&group);
            let (y, w) = instance_and_witness(&proof, &mut rng);

            let pre = proof.precompute(&mut rng, STAT_DIST).unwrap();
            let (pre, commitment) = proof.commit(pre, &y, &w, &mut rng, STAT_DIST).unwrap();
            let challenge = proof.random_challenge(&mut rng, STAT_DIST);
            let reply = proof.reply(pre, &w, &challenge).unwrap();
            assert!(proof.check(&y, &commitment, &challenge, &reply));
            let other = challenge.add(&proof.challenge_space().one()).unwrap();
            assert!(!proof.check(&y, &commitment, &other, &reply));

            // Simulated transcripts verify without the witness
            let (commitment, reply) = proof.simulate(&y, &challenge, &mut rng, STAT_DIST).unwrap();
            assert!(proof.check(&y, &commitment, &challenge, &reply));

            assert_eq!(
                proof.randomness_byte_length(STAT_DIST),
                group.pring().random_element_byte_length(STAT_DIST)
            );
        }
    }

    #[test]
    fn commitment_and_reply_byte_trees() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let proof = discrete_log(&test_groups()[1]);
        let (y, w) = instance_and_witness(&proof, &mut rng);
        let pre = proof.precompute(&mut rng, STAT_DIST).unwrap();
        let (pre, commitment) = proof.commit(pre, &y, &w, &mut rng, STAT_DIST).unwrap();
        let reply = proof
            .reply(pre, &w, &proof.random_challenge(&mut rng, STAT_DIST))
            .unwrap();
        test_serialization!(commitment, |t| proof.byte_tree_to_commitment(t));
        test_serialization!(reply, |t| proof.byte_tree_to_reply(t));
        assert!(proof.byte_tree_to_reply(&commitment.to_byte_tree()).is_err());
    }

    #[test]
    fn challenge_is_digest_reduced_into_field() {
        for group in test_groups() {
            let proof = discrete_log(&group);
            let tree = ByteTree::Node(vec![
                ByteTree::leaf(b"label".to_vec()),
                group.generator().to_byte_tree(),
            ]);
            let expected = proof
                .challenge_space()
                .from_bytes_mod_order(&Sha256::digest(tree.to_bytes()));
            assert_eq!(proof.challenge::<Sha256>(&tree), expected);
            assert_eq!(
                compute_random_oracle_challenge::<Sha256>(proof.challenge_space(), &tree),
                expected
            );
            assert_ne!(proof.challenge::<Blake2b512>(&tree), expected);
        }
    }
}
