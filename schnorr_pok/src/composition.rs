//! Sigma protocols run side by side.
//!
//! [`SigmaProofPara`] answers a separate challenge per component, [`SigmaProofAnd`] answers one
//! challenge in every component and so proves knowledge of witnesses for all instances. Instances,
//! witnesses, commitments and replies are vectors with one entry per component and serialize to
//! byte tree nodes with one child per component.

use crate::{error::SigmaError, SigmaProof, ZKPoK};
use arithm::PField;
use ark_std::{cfg_into_iter, cfg_iter, iter, rand::RngCore, vec::Vec};
use crypto_utils::ByteTree;
use digest::Digest;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigmaProofPara<P: SigmaProof> {
    proofs: Vec<P>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigmaProofAnd<P: SigmaProof> {
    para: SigmaProofPara<P>,
}

impl<P: SigmaProof> SigmaProofPara<P> {
    /// The components must share their challenge space.
    pub fn new(proofs: Vec<P>) -> Result<Self, SigmaError> {
        if proofs.is_empty() {
            return Err(SigmaError::EmptyComposition);
        }
        let space = proofs[0].challenge_space();
        if proofs.iter().any(|p| p.challenge_space() != space) {
            return Err(SigmaError::DistinctChallengeSpaces);
        }
        Ok(Self { proofs })
    }

    /// `copies` instances of the same protocol.
    pub fn repeated(proof: P, copies: usize) -> Result<Self, SigmaError>
    where
        P: Clone,
    {
        Self::new(iter::repeat(proof).take(copies).collect())
    }

    pub fn proofs(&self) -> &[P] {
        &self.proofs
    }

    pub fn width(&self) -> usize {
        self.proofs.len()
    }

    fn check_arity(&self, len: usize) -> Result<(), SigmaError> {
        if len != self.width() {
            return Err(SigmaError::ArityMismatch(self.width(), len));
        }
        Ok(())
    }

    /// Reads a node with one child per component using `read` on each child.
    fn read_components<T, F>(&self, tree: &ByteTree, read: F) -> Result<Vec<T>, SigmaError>
    where
        F: Fn(&P, &ByteTree) -> Result<T, SigmaError>,
    {
        tree.as_node_of_width(self.width())?
            .iter()
            .zip(self.proofs.iter())
            .map(|(t, p)| read(p, t))
            .collect()
    }

    /// Replies to the challenge `challenges[i]` in component `i`.
    pub fn reply_to_each(
        &self,
        precomputed: Vec<P::Precomputed>,
        witness: &[P::Witness],
        challenges: &[P::Challenge],
    ) -> Result<Vec<P::Reply>, SigmaError> {
        self.check_arity(precomputed.len())?;
        self.check_arity(witness.len())?;
        self.check_arity(challenges.len())?;
        cfg_into_iter!(precomputed)
            .zip(cfg_iter!(self.proofs))
            .zip(cfg_iter!(witness))
            .zip(cfg_iter!(challenges))
            .map(|(((pre, p), w), c)| p.reply(pre, w, c))
            .collect()
    }

    /// Checks component `i` against `challenges[i]`.
    pub fn check_each(
        &self,
        instance: &[P::Instance],
        commitment: &[P::Commitment],
        challenges: &[P::Challenge],
        reply: &[P::Reply],
    ) -> bool {
        let n = self.width();
        if instance.len() != n
            || commitment.len() != n
            || challenges.len() != n
            || reply.len() != n
        {
            return false;
        }
        cfg_iter!(self.proofs)
            .zip(cfg_iter!(instance))
            .zip(cfg_iter!(commitment))
            .zip(cfg_iter!(challenges))
            .zip(cfg_iter!(reply))
            .all(|((((p, x), a), c), r)| p.check(x, a, c, r))
    }

    /// Simulates component `i` for the challenge `challenges[i]`.
    pub fn simulate_each<R: RngCore>(
        &self,
        instance: &[P::Instance],
        challenges: &[P::Challenge],
        rng: &mut R,
        stat_dist: u32,
    ) -> Result<(Vec<P::Commitment>, Vec<P::Reply>), SigmaError> {
        self.check_arity(instance.len())?;
        self.check_arity(challenges.len())?;
        let mut commitments = Vec::with_capacity(self.width());
        let mut replies = Vec::with_capacity(self.width());
        for ((p, x), c) in self.proofs.iter().zip(instance).zip(challenges) {
            let (a, r) = p.simulate(x, c, rng, stat_dist)?;
            commitments.push(a);
            replies.push(r);
        }
        Ok((commitments, replies))
    }
}

impl<P: SigmaProof> ZKPoK for SigmaProofPara<P> {
    type Instance = Vec<P::Instance>;
    type Witness = Vec<P::Witness>;
    type Precomputed = Vec<P::Precomputed>;

    fn randomness_byte_length(&self, stat_dist: u32) -> usize {
        self.proofs
            .iter()
            .map(|p| p.randomness_byte_length(stat_dist))
            .sum()
    }

    fn precompute<R: RngCore>(
        &self,
        rng: &mut R,
        stat_dist: u32,
    ) -> Result<Self::Precomputed, SigmaError> {
        if self.precompute_requires_instance() {
            return Err(SigmaError::PrecomputeRequiresInstance);
        }
        self.proofs
            .iter()
            .map(|p| p.precompute(rng, stat_dist))
            .collect()
    }

    fn precompute_requires_instance(&self) -> bool {
        self.proofs.iter().any(|p| p.precompute_requires_instance())
    }

    fn precompute_with_instance<R: RngCore>(
        &self,
        instance: &Self::Instance,
        rng: &mut R,
        stat_dist: u32,
    ) -> Result<Self::Precomputed, SigmaError> {
        self.check_arity(instance.len())?;
        self.proofs
            .iter()
            .zip(instance)
            .map(|(p, x)| p.precompute_with_instance(x, rng, stat_dist))
            .collect()
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

impl<P: SigmaProof> SigmaProof for SigmaProofPara<P> {
    type Commitment = Vec<P::Commitment>;
    type Challenge = Vec<P::Challenge>;
    type Reply = Vec<P::Reply>;

    fn instance_to_byte_tree(&self, instance: &Self::Instance) -> ByteTree {
        ByteTree::Node(
            self.proofs
                .iter()
                .zip(instance)
                .map(|(p, x)| p.instance_to_byte_tree(x))
                .collect(),
        )
    }

    fn commit<R: RngCore>(
        &self,
        precomputed: Self::Precomputed,
        instance: &Self::Instance,
        witness: &Self::Witness,
        rng: &mut R,
        stat_dist: u32,
    ) -> Result<(Self::Precomputed, Self::Commitment), SigmaError> {
        self.check_arity(precomputed.len())?;
        self.check_arity(instance.len())?;
        self.check_arity(witness.len())?;
        let mut states = Vec::with_capacity(self.width());
        let mut commitments = Vec::with_capacity(self.width());
        for (((p, pre), x), w) in self
            .proofs
            .iter()
            .zip(precomputed)
            .zip(instance)
            .zip(witness)
        {
            let (pre, a) = p.commit(pre, x, w, rng, stat_dist)?;
            states.push(pre);
            commitments.push(a);
        }
        Ok((states, commitments))
    }

    fn commitment_to_byte_tree(&self, commitment: &Self::Commitment) -> ByteTree {
        ByteTree::Node(
            self.proofs
                .iter()
                .zip(commitment)
                .map(|(p, a)| p.commitment_to_byte_tree(a))
                .collect(),
        )
    }

    fn byte_tree_to_commitment(&self, tree: &ByteTree) -> Result<Self::Commitment, SigmaError> {
        self.read_components(tree, |p, t| p.byte_tree_to_commitment(t))
    }

    fn challenge_space(&self) -> &PField {
        self.proofs[0].challenge_space()
    }

    fn random_challenge<R: RngCore>(&self, rng: &mut R, stat_dist: u32) -> Self::Challenge {
        self.proofs
            .iter()
            .map(|p| p.random_challenge(rng, stat_dist))
            .collect()
    }

    /// The challenge derived by the first component, given to every component.
    fn challenge<D: Digest>(&self, tree: &ByteTree) -> Self::Challenge {
        iter::repeat(self.proofs[0].challenge::<D>(tree))
            .take(self.width())
            .collect()
    }

    fn reply(
        &self,
        precomputed: Self::Precomputed,
        witness: &Self::Witness,
        challenge: &Self::Challenge,
    ) -> Result<Self::Reply, SigmaError> {
        self.reply_to_each(precomputed, witness, challenge)
    }

    fn reply_to_byte_tree(&self, reply: &Self::Reply) -> ByteTree {
        ByteTree::Node(
            self.proofs
                .iter()
                .zip(reply)
                .map(|(p, r)| p.reply_to_byte_tree(r))
                .collect(),
        )
    }

    fn byte_tree_to_reply(&self, tree: &ByteTree) -> Result<Self::Reply, SigmaError> {
        self.read_components(tree, |p, t| p.byte_tree_to_reply(t))
    }

    fn check(
        &self,
        instance: &Self::Instance,
        commitment: &Self::Commitment,
        challenge: &Self::Challenge,
        reply: &Self::Reply,
    ) -> bool {
        self.check_each(instance, commitment, challenge, reply)
    }

    fn simulate<R: RngCore>(
        &self,
        instance: &Self::Instance,
        challenge: &Self::Challenge,
        rng: &mut R,
        stat_dist: u32,
    ) -> Result<(Self::Commitment, Self::Reply), SigmaError> {
        self.simulate_each(instance, challenge, rng, stat_dist)
    }
}

impl<P: SigmaProof> SigmaProofAnd<P> {
    pub fn new(proofs: Vec<P>) -> Result<Self, SigmaError> {
        Ok(Self {
            para: SigmaProofPara::new(proofs)?,
        })
    }

    pub fn repeated(proof: P, copies: usize) -> Result<Self, SigmaError>
    where
        P: Clone,
    {
        Ok(Self {
            para: SigmaProofPara::repeated(proof, copies)?,
        })
    }

    pub fn proofs(&self) -> &[P] {
        self.para.proofs()
    }

    pub fn width(&self) -> usize {
        self.para.width()
    }

    fn broadcast(&self, challenge: &P::Challenge) -> Vec<P::Challenge> {
        iter::repeat(challenge.clone()).take(self.width()).collect()
    }
}

impl<P: SigmaProof> ZKPoK for SigmaProofAnd<P> {
    type Instance = Vec<P::Instance>;
    type Witness = Vec<P::Witness>;
    type Precomputed = Vec<P::Precomputed>;

    fn randomness_byte_length(&self, stat_dist: u32) -> usize {
        self.para.randomness_byte_length(stat_dist)
    }

    fn precompute<R: RngCore>(
        &self,
        rng: &mut R,
        stat_dist: u32,
    ) -> Result<Self::Precomputed, SigmaError> {
        self.para.precompute(rng, stat_dist)
    }

    fn precompute_requires_instance(&self) -> bool {
        self.para.precompute_requires_instance()
    }

    fn precompute_with_instance<R: RngCore>(
        &self,
        instance: &Self::Instance,
        rng: &mut R,
        stat_dist: u32,
    ) -> Result<Self::Precomputed, SigmaError> {
        self.para.precompute_with_instance(instance, rng, stat_dist)
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

impl<P: SigmaProof> SigmaProof for SigmaProofAnd<P> {
    type Commitment = Vec<P::Commitment>;
    type Challenge = P::Challenge;
    type Reply = Vec<P::Reply>;

    fn instance_to_byte_tree(&self, instance: &Self::Instance) -> ByteTree {
        self.para.instance_to_byte_tree(instance)
    }

    fn commit<R: RngCore>(
        &self,
        precomputed: Self::Precomputed,
        instance: &Self::Instance,
        witness: &Self::Witness,
        rng: &mut R,
        stat_dist: u32,
    ) -> Result<(Self::Precomputed, Self::Commitment), SigmaError> {
        self.para
            .commit(precomputed, instance, witness, rng, stat_dist)
    }

    fn commitment_to_byte_tree(&self, commitment: &Self::Commitment) -> ByteTree {
        self.para.commitment_to_byte_tree(commitment)
    }

    fn byte_tree_to_commitment(&self, tree: &ByteTree) -> Result<Self::Commitment, SigmaError> {
        self.para.byte_tree_to_commitment(tree)
    }

    fn challenge_space(&self) -> &PField {
        self.para.challenge_space()
    }

    fn random_challenge<R: RngCore>(&self, rng: &mut R, stat_dist: u32) -> Self::Challenge {
        self.para.proofs[0].random_challenge(rng, stat_dist)
    }

    fn challenge<D: Digest>(&self, tree: &ByteTree) -> Self::Challenge {
        self.para.proofs[0].challenge::<D>(tree)
    }

    fn reply(
        &self,
        precomputed: Self::Precomputed,
        witness: &Self::Witness,
        challenge: &Self::Challenge,
    ) -> Result<Self::Reply, SigmaError> {
        self.para
            .reply_to_each(precomputed, witness, &self.broadcast(challenge))
    }

    fn reply_to_byte_tree(&self, reply: &Self::Reply) -> ByteTree {
        self.para.reply_to_byte_tree(reply)
    }

    fn byte_tree_to_reply(&self, tree: &ByteTree) -> Result<Self::Reply, SigmaError> {
        self.para.byte_tree_to_reply(tree)
    }

    fn check(
        &self,
        instance: &Self::Instance,
        commitment: &Self::Commitment,
        challenge: &Self::Challenge,
        reply: &Self::Reply,
    ) -> bool {
        self.para
            .check_each(instance, commitment, &self.broadcast(challenge), reply)
    }

    fn simulate<R: RngCore>(
        &self,
        instance: &Self::Instance,
        challenge: &Self::Challenge,
        rng: &mut R,
        stat_dist: u32,
    ) -> Result<(Self::Commitment, Self::Reply), SigmaError> {
        self.para
            .simulate_each(instance, &self.broadcast(challenge), rng, stat_dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schnorr::SchnorrProof;
    use arithm::{ExpHom, Homomorphism, PGroup, PGroupElement, PRingElement};
    use ark_std::rand::{rngs::StdRng, SeedableRng};
    use sha2::Sha256;
    use test_utils::{bit_flips, test_groups, STAT_DIST};

    fn schnorr_proofs<R: RngCore>(
        group: &PGroup,
        n: usize,
        rng: &mut R,
    ) -> (
        Vec<SchnorrProof<ExpHom>>,
        Vec<PGroupElement>,
        Vec<PRingElement>,
    ) {
        let proofs = (0..n)
            .map(|_| {
                SchnorrProof::new(ExpHom::new(
                    group.pring(),
                    group.random_element(rng, STAT_DIST),
                )
                .unwrap())
            })
            .collect::<Vec<_>>();
        let witnesses = (0..n)
            .map(|_| group.pring().random_element(rng, STAT_DIST))
            .collect::<Vec<_>>();
        let instances = proofs
            .iter()
            .zip(&witnesses)
            .map(|(p, w)| p.homomorphism.eva(w).unwrap())
            .collect();
        (proofs, instances, witnesses)
    }

    #[test]
    fn and_proof() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let label = ByteTree::leaf(b"and".to_vec());
        for group in test_groups() {
            let (proofs, instances, witnesses) = schnorr_proofs(&group, 3, &mut rng);
            let and = SigmaProofAnd::new(proofs).unwrap();
            assert_eq!(and.width(), 3);

            let proof = and
                .prove::<Sha256, _>(&label, &instances, &witnesses, &mut rng, STAT_DIST)
                .unwrap();
            assert!(and.verify::<Sha256>(&label, &instances, &proof));

            // Every witness is needed
            let mut wrong = witnesses.clone();
            wrong[2] = group.pring().random_element(&mut rng, STAT_DIST);
            let proof = and
                .prove::<Sha256, _>(&label, &instances, &wrong, &mut rng, STAT_DIST)
                .unwrap();
            assert!(!and.verify::<Sha256>(&label, &instances, &proof));

            assert!(matches!(
                and.prove::<Sha256, _>(&label, &instances[..2].to_vec(), &witnesses, &mut rng, STAT_DIST),
                Err(SigmaError::ArityMismatch(3, 2))
            ));
            assert!(!and.verify::<Sha256>(&label, &instances[..2].to_vec(), &proof));
        }
    }

    #[test]
    fn and_proof_bit_flips() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let label = ByteTree::leaf(b"and".to_vec());
        let (proofs, instances, witnesses) = schnorr_proofs(&test_groups()[0], 2, &mut rng);
        let and = SigmaProofAnd::new(proofs).unwrap();
        let proof = and
            .prove::<Sha256, _>(&label, &instances, &witnesses, &mut rng, STAT_DIST)
            .unwrap();
        for flipped in bit_flips(&proof) {
            assert!(!and.verify::<Sha256>(&label, &instances, &flipped));
        }
    }

    #[test]
    fn para_with_separate_challenges() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let (proofs, instances, witnesses) = schnorr_proofs(&test_groups()[1], 3, &mut rng);
        let para = SigmaProofPara::new(proofs).unwrap();
        assert_eq!(
            para.randomness_byte_length(STAT_DIST),
            3 * test_groups()[1]
                .pring()
                .random_element_byte_length(STAT_DIST)
        );

        let pre = para.precompute(&mut rng, STAT_DIST).unwrap();
        let (pre, commitment) = para
            .commit(pre, &instances, &witnesses, &mut rng, STAT_DIST)
            .unwrap();
        let challenges = para.random_challenge(&mut rng, STAT_DIST);
        let reply = para.reply(pre, &witnesses, &challenges).unwrap();
        assert!(para.check(&instances, &commitment, &challenges, &reply));

        let mut swapped = challenges.clone();
        swapped.swap(0, 1);
        assert!(!para.check(&instances, &commitment, &swapped, &reply));

        let (commitment, reply) = para
            .simulate(&instances, &challenges, &mut rng, STAT_DIST)
            .unwrap();
        assert!(para.check(&instances, &commitment, &challenges, &reply));

        let tree = para.commitment_to_byte_tree(&commitment);
        assert_eq!(para.byte_tree_to_commitment(&tree).unwrap(), commitment);
        let short = ByteTree::Node(tree.as_node().unwrap()[..2].to_vec());
        assert!(para.byte_tree_to_commitment(&short).is_err());
        assert!(para.byte_tree_to_reply(&ByteTree::leaf(vec![1])).is_err());

        // Non-interactive use shares the first component's challenge
        let label = ByteTree::leaf(b"para".to_vec());
        let proof = para
            .prove::<Sha256, _>(&label, &instances, &witnesses, &mut rng, STAT_DIST)
            .unwrap();
        assert!(para.verify::<Sha256>(&label, &instances, &proof));
    }

    #[test]
    fn composition_requires_common_challenge_space() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let groups = test_groups();
        let (mut proofs, _, _) = schnorr_proofs(&groups[0], 1, &mut rng);
        let (other, _, _) = schnorr_proofs(&groups[1], 1, &mut rng);
        proofs.extend(other);
        assert_eq!(
            SigmaProofAnd::new(proofs).unwrap_err(),
            SigmaError::DistinctChallengeSpaces
        );
        assert_eq!(
            SigmaProofPara::<SchnorrProof<ExpHom>>::new(vec![]).unwrap_err(),
            SigmaError::EmptyComposition
        );
    }

    #[test]
    fn para_proof_rejects_modified_proofs() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let label = ByteTree::leaf(b"para".to_vec());
        let groups = test_groups();
        let (proofs, instances, witnesses) = schnorr_proofs(&groups[0], 2, &mut rng);
        let para = SigmaProofPara::new(proofs).unwrap();
        let proof = para
            .prove::<Sha256, _>(&label, &instances, &witnesses, &mut rng, STAT_DIST)
            .unwrap();
        assert!(para.verify::<Sha256>(&label, &instances, &proof));
        assert!(!para.verify::<Sha256>(&ByteTree::leaf(b"and".to_vec()), &instances, &proof));

        let mut swapped = instances.clone();
        swapped.swap(0, 1);
        assert!(!para.verify::<Sha256>(&label, &swapped, &proof));

        for flipped in bit_flips(&proof) {
            assert!(!para.verify::<Sha256>(&label, &instances, &flipped));
        }
    }
}
