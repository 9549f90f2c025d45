//! OR composition of Sigma protocols, proving knowledge of a witness for one of several instances
//! without revealing which one.
//!
//! The prover simulates every branch except the true one `i` with challenges of its choice. Given
//! the challenge `c` it sets `c_i = c - sum_{j != i} c_j` and answers `c_i` honestly in branch `i`.
//! The verifier checks that the branch challenges sum to `c` and that every branch verifies.
//!
//! A reply is serialized as `Node[Node[c_0, .., c_{n-1}], Node[r_0, .., r_{n-1}]]`.

use crate::{composition::SigmaProofPara, error::SigmaError, SigmaProof, ZKPoK};
use arithm::{field, PField, PFieldElement};
use ark_std::{rand::RngCore, vec, vec::Vec};
use crypto_utils::ByteTree;
use digest::Digest;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigmaProofOr<P: SigmaProof> {
    para: SigmaProofPara<P>,
    /// Branches are copies of one protocol, so the honest branch can be prepared before the
    /// witness index is known.
    uniform: bool,
}

/// Simulated transcripts of all branches and the state of the honest branch.
pub struct OrPrecomputed<P: SigmaProof> {
    commitments: Vec<P::Commitment>,
    challenges: Vec<PFieldElement>,
    replies: Vec<P::Reply>,
    honest: Option<P::Precomputed>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrReply<R> {
    pub challenges: Vec<PFieldElement>,
    pub replies: Vec<R>,
}

impl<P: SigmaProof<Challenge = PFieldElement>> SigmaProofOr<P> {
    pub fn new(proofs: Vec<P>) -> Result<Self, SigmaError> {
        Ok(Self {
            para: SigmaProofPara::new(proofs)?,
            uniform: false,
        })
    }

    /// `copies` branches of the same protocol.
    pub fn repeated(proof: P, copies: usize) -> Result<Self, SigmaError>
    where
        P: Clone,
    {
        Ok(Self {
            para: SigmaProofPara::repeated(proof, copies)?,
            uniform: true,
        })
    }

    pub fn proofs(&self) -> &[P] {
        self.para.proofs()
    }

    pub fn width(&self) -> usize {
        self.para.width()
    }

    fn check_instances(&self, instance: &[P::Instance]) -> Result<(), SigmaError> {
        if instance.len() != self.width() {
            return Err(SigmaError::ArityMismatch(self.width(), instance.len()));
        }
        let trees = self
            .proofs()
            .iter()
            .zip(instance)
            .map(|(p, x)| p.instance_to_byte_tree(x))
            .collect::<Vec<_>>();
        if trees.iter().any(|t| !t.has_same_shape(&trees[0])) {
            return Err(SigmaError::NonUniformInstances);
        }
        Ok(())
    }

    fn branch(&self, index: usize) -> Result<&P, SigmaError> {
        self.proofs()
            .get(index)
            .ok_or(SigmaError::BranchIndexOutOfBounds(index, self.width()))
    }
}

impl<P: SigmaProof<Challenge = PFieldElement>> ZKPoK for SigmaProofOr<P> {
    type Instance = Vec<P::Instance>;
    /// Witness of the true branch and its index.
    type Witness = (P::Witness, usize);
    type Precomputed = OrPrecomputed<P>;

    /// Randomness of simulating every branch, choosing their challenges and preparing the honest
    /// branch.
    fn randomness_byte_length(&self, stat_dist: u32) -> usize {
        let simulations = self.para.randomness_byte_length(stat_dist);
        let challenges =
            self.width() * self.challenge_space().random_element_byte_length(stat_dist);
        simulations + challenges + self.proofs()[0].randomness_byte_length(stat_dist)
    }

    fn precompute<R: RngCore>(
        &self,
        _rng: &mut R,
        _stat_dist: u32,
    ) -> Result<Self::Precomputed, SigmaError> {
        Err(SigmaError::PrecomputeRequiresInstance)
    }

    fn precompute_requires_instance(&self) -> bool {
        true
    }

    fn precompute_with_instance<R: RngCore>(
        &self,
        instance: &Self::Instance,
        rng: &mut R,
        stat_dist: u32,
    ) -> Result<Self::Precomputed, SigmaError> {
        self.check_instances(instance)?;
        let challenges = self
            .proofs()
            .iter()
            .map(|_| self.proofs()[0].random_challenge(rng, stat_dist))
            .collect::<Vec<_>>();
        let (commitments, replies) =
            self.para
                .simulate_each(instance, &challenges, rng, stat_dist)?;
        let first = &self.proofs()[0];
        let honest = if self.uniform && !first.precompute_requires_instance() {
            Some(first.precompute(rng, stat_dist)?)
        } else {
            None
        };
        Ok(OrPrecomputed {
            commitments,
            challenges,
            replies,
            honest,
        })
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

impl<P: SigmaProof<Challenge = PFieldElement>> SigmaProof for SigmaProofOr<P> {
    type Commitment = Vec<P::Commitment>;
    type Challenge = PFieldElement;
    type Reply = OrReply<P::Reply>;

    fn instance_to_byte_tree(&self, instance: &Self::Instance) -> ByteTree {
        self.para.instance_to_byte_tree(instance)
    }

    /// Replaces the simulated commitment of the true branch by an honest one.
    fn commit<R: RngCore>(
        &self,
        mut precomputed: Self::Precomputed,
        instance: &Self::Instance,
        witness: &Self::Witness,
        rng: &mut R,
        stat_dist: u32,
    ) -> Result<(Self::Precomputed, Self::Commitment), SigmaError> {
        self.check_instances(instance)?;
        let (w, i) = (&witness.0, witness.1);
        let branch = self.branch(i)?;
        let honest = match precomputed.honest.take() {
            Some(pre) => pre,
            None => branch.precompute_with_instance(&instance[i], rng, stat_dist)?,
        };
        let (honest, commitment) = branch.commit(honest, &instance[i], w, rng, stat_dist)?;
        precomputed.commitments[i] = commitment;
        precomputed.honest = Some(honest);
        let commitments = precomputed.commitments.clone();
        Ok((precomputed, commitments))
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
        self.challenge_space().random_element(rng, stat_dist)
    }

    fn challenge<D: Digest>(&self, tree: &ByteTree) -> Self::Challenge {
        self.proofs()[0].challenge::<D>(tree)
    }

    fn reply(
        &self,
        precomputed: Self::Precomputed,
        witness: &Self::Witness,
        challenge: &Self::Challenge,
    ) -> Result<Self::Reply, SigmaError> {
        let (w, i) = (&witness.0, witness.1);
        let branch = self.branch(i)?;
        let OrPrecomputed {
            mut challenges,
            mut replies,
            honest,
            ..
        } = precomputed;
        let honest = honest.ok_or(SigmaError::PrecomputeRequiresInstance)?;
        let others = field::sum(self.challenge_space(), &challenges)?.sub(&challenges[i])?;
        challenges[i] = challenge.sub(&others)?;
        replies[i] = branch.reply(honest, w, &challenges[i])?;
        Ok(OrReply {
            challenges,
            replies,
        })
    }

    fn reply_to_byte_tree(&self, reply: &Self::Reply) -> ByteTree {
        ByteTree::Node(vec![
            ByteTree::Node(reply.challenges.iter().map(|c| c.to_byte_tree()).collect()),
            self.para.reply_to_byte_tree(&reply.replies),
        ])
    }

    fn byte_tree_to_reply(&self, tree: &ByteTree) -> Result<Self::Reply, SigmaError> {
        let children = tree.as_node_of_width(2)?;
        let challenges = children[0]
            .as_node_of_width(self.width())?
            .iter()
            .map(|c| Ok(self.challenge_space().to_element(c)?))
            .collect::<Result<Vec<_>, SigmaError>>()?;
        let replies = self.para.byte_tree_to_reply(&children[1])?;
        Ok(OrReply {
            challenges,
            replies,
        })
    }

    fn check(
        &self,
        instance: &Self::Instance,
        commitment: &Self::Commitment,
        challenge: &Self::Challenge,
        reply: &Self::Reply,
    ) -> bool {
        if reply.challenges.len() != self.width() {
            return false;
        }
        match field::sum(self.challenge_space(), &reply.challenges) {
            Ok(sum) if sum == *challenge => self.para.check_each(
                instance,
                commitment,
                &reply.challenges,
                &reply.replies,
            ),
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
        let mut challenges = (1..self.width())
            .map(|_| self.proofs()[0].random_challenge(rng, stat_dist))
            .collect::<Vec<_>>();
        let sum = field::sum(self.challenge_space(), &challenges)?;
        challenges.push(challenge.sub(&sum)?);
        let (commitments, replies) = self
            .para
            .simulate_each(instance, &challenges, rng, stat_dist)?;
        Ok((
            commitments,
            OrReply {
                challenges,
                replies,
            },
        ))
    }
}
