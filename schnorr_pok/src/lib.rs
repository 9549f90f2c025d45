#![cfg_attr(not(feature = "std"), no_std)]

//! Sigma protocols over the groups of the `arithm` crate, and their non-interactive versions
//! through the Fiat-Shamir heuristic.
//!
//! A Sigma protocol proves knowledge of a witness for a public instance in three moves: the
//! prover sends a commitment, the verifier a random challenge, and the prover a reply which the
//! verifier checks against the instance, the commitment and the challenge. Here the challenge is
//! instead derived by hashing the byte tree `Node[label, instance, commitment]`, and a proof is
//! the serialized byte tree `Node[commitment, reply]`.
//!
//! - [`schnorr::SchnorrProof`] proves knowledge of a preimage under a [`arithm::Homomorphism`].
//! - [`composition::SigmaProofPara`] runs protocols side by side with a challenge per component,
//!   [`composition::SigmaProofAnd`] with one shared challenge.
//! - [`or::SigmaProofOr`] proves knowledge of a witness for one of several instances without
//!   revealing which.
//!
//! Protocols which are not Sigma protocols can still be used wherever a non-interactive proof is
//! expected by implementing [`ZKPoK`] directly.

use arithm::PField;
use ark_std::{end_timer, rand::RngCore, start_timer, vec, vec::Vec};
use crypto_utils::{hashing_utils::hash_byte_tree, ByteTree};
use digest::Digest;

pub mod composition;
pub mod error;
pub mod or;
pub mod schnorr;

pub use composition::{SigmaProofAnd, SigmaProofPara};
pub use error::SigmaError;
pub use or::SigmaProofOr;
pub use schnorr::SchnorrProof;

/// Non-interactive zero-knowledge proof of knowledge bound to a label.
pub trait ZKPoK {
    type Instance: Send + Sync;
    type Witness: Send + Sync;
    type Precomputed: Send;

    /// Number of random bytes consumed by [`Self::precompute`].
    fn randomness_byte_length(&self, stat_dist: u32) -> usize;

    /// Work that does not depend on the instance or the witness.
    fn precompute<R: RngCore>(
        &self,
        rng: &mut R,
        stat_dist: u32,
    ) -> Result<Self::Precomputed, SigmaError>;

    fn precompute_requires_instance(&self) -> bool {
        false
    }

    fn precompute_with_instance<R: RngCore>(
        &self,
        _instance: &Self::Instance,
        rng: &mut R,
        stat_dist: u32,
    ) -> Result<Self::Precomputed, SigmaError> {
        self.precompute(rng, stat_dist)
    }

    /// Serialized proof of knowledge of `witness` for `instance`.
    fn complete_proof<D: Digest, R: RngCore>(
        &self,
        precomputed: Self::Precomputed,
        label: &ByteTree,
        instance: &Self::Instance,
        witness: &Self::Witness,
        rng: &mut R,
        stat_dist: u32,
    ) -> Result<Vec<u8>, SigmaError>;

    /// Never fails, malformed proofs are rejected.
    fn verify<D: Digest>(&self, label: &ByteTree, instance: &Self::Instance, proof: &[u8]) -> bool;

    fn prove<D: Digest, R: RngCore>(
        &self,
        label: &ByteTree,
        instance: &Self::Instance,
        witness: &Self::Witness,
        rng: &mut R,
        stat_dist: u32,
    ) -> Result<Vec<u8>, SigmaError> {
        let precomputed = if self.precompute_requires_instance() {
            self.precompute_with_instance(instance, rng, stat_dist)?
        } else {
            self.precompute(rng, stat_dist)?
        };
        self.complete_proof::<D, R>(precomputed, label, instance, witness, rng, stat_dist)
    }
}

/// The moves of a Sigma protocol. Implementors usually implement [`ZKPoK::complete_proof`] and
/// [`ZKPoK::verify`] with [`Self::fiat_shamir_proof`] and [`Self::fiat_shamir_verify`].
pub trait SigmaProof: ZKPoK + Sync {
    type Commitment: Clone + Send + Sync;
    type Challenge: Clone + Send + Sync;
    type Reply: Clone + Send + Sync;

    fn instance_to_byte_tree(&self, instance: &Self::Instance) -> ByteTree;

    /// Returns the state needed by [`Self::reply`] along with the commitment.
    fn commit<R: RngCore>(
        &self,
        precomputed: Self::Precomputed,
        instance: &Self::Instance,
        witness: &Self::Witness,
        rng: &mut R,
        stat_dist: u32,
    ) -> Result<(Self::Precomputed, Self::Commitment), SigmaError>;

    fn commitment_to_byte_tree(&self, commitment: &Self::Commitment) -> ByteTree;

    fn byte_tree_to_commitment(&self, tree: &ByteTree) -> Result<Self::Commitment, SigmaError>;

    /// Field the challenges are drawn from.
    fn challenge_space(&self) -> &PField;

    /// Challenge of the interactive protocol.
    fn random_challenge<R: RngCore>(&self, rng: &mut R, stat_dist: u32) -> Self::Challenge;

    /// Challenge derived from the digest of `tree`.
    fn challenge<D: Digest>(&self, tree: &ByteTree) -> Self::Challenge;

    fn reply(
        &self,
        precomputed: Self::Precomputed,
        witness: &Self::Witness,
        challenge: &Self::Challenge,
    ) -> Result<Self::Reply, SigmaError>;

    fn reply_to_byte_tree(&self, reply: &Self::Reply) -> ByteTree;

    fn byte_tree_to_reply(&self, tree: &ByteTree) -> Result<Self::Reply, SigmaError>;

    fn check(
        &self,
        instance: &Self::Instance,
        commitment: &Self::Commitment,
        challenge: &Self::Challenge,
        reply: &Self::Reply,
    ) -> bool;

    /// Commitment and reply distributed as in an honest run for the given challenge.
    fn simulate<R: RngCore>(
        &self,
        instance: &Self::Instance,
        challenge: &Self::Challenge,
        rng: &mut R,
        stat_dist: u32,
    ) -> Result<(Self::Commitment, Self::Reply), SigmaError>;

    /// Proof bytes `Node[commitment, reply]` where the challenge is derived from
    /// `Node[label, instance, commitment]`.
    fn fiat_shamir_proof<D: Digest, R: RngCore>(
        &self,
        precomputed: Self::Precomputed,
        label: &ByteTree,
        instance: &Self::Instance,
        witness: &Self::Witness,
        rng: &mut R,
        stat_dist: u32,
    ) -> Result<Vec<u8>, SigmaError> {
        let prove_time = start_timer!(|| "Sigma proof");
        let (precomputed, commitment) =
            self.commit(precomputed, instance, witness, rng, stat_dist)?;
        let commitment_tree = self.commitment_to_byte_tree(&commitment);
        let challenge = self.challenge::<D>(&ByteTree::Node(vec![
            label.clone(),
            self.instance_to_byte_tree(instance),
            commitment_tree.clone(),
        ]));
        let reply = self.reply(precomputed, witness, &challenge)?;
        let proof = ByteTree::Node(vec![commitment_tree, self.reply_to_byte_tree(&reply)]);
        end_timer!(prove_time);
        Ok(proof.to_bytes())
    }

    fn fiat_shamir_verify<D: Digest>(
        &self,
        label: &ByteTree,
        instance: &Self::Instance,
        proof: &[u8],
    ) -> bool {
        let verify_time = start_timer!(|| "Sigma proof verification");
        let result = parse_and_check::<Self, D>(self, label, instance, proof);
        end_timer!(verify_time);
        matches!(result, Ok(true))
    }
}

/// Challenge in `field` from the digest of `tree`.
pub fn compute_random_oracle_challenge<D: Digest>(
    field: &PField,
    tree: &ByteTree,
) -> arithm::PFieldElement {
    field.from_bytes_mod_order(&hash_byte_tree::<D>(tree))
}

fn parse_and_check<S: SigmaProof + ?Sized, D: Digest>(
    protocol: &S,
    label: &ByteTree,
    instance: &S::Instance,
    proof: &[u8],
) -> Result<bool, SigmaError> {
    let proof = ByteTree::from_bytes(proof)?;
    let children = proof.as_node_of_width(2)?;
    let commitment = protocol.byte_tree_to_commitment(&children[0])?;
    let challenge = protocol.challenge::<D>(&ByteTree::Node(vec![
        label.clone(),
        protocol.instance_to_byte_tree(instance),
        children[0].clone(),
    ]));
    let reply = protocol.byte_tree_to_reply(&children[1])?;
    Ok(protocol.check(instance, &commitment, &challenge, &reply))
}
