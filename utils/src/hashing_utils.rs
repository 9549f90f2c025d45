use crate::byte_tree::ByteTree;
use ark_std::vec::Vec;
use digest::Digest;

/// Digest of the serialized byte tree.
pub fn hash_byte_tree<D: Digest>(tree: &ByteTree) -> Vec<u8> {
    let mut hasher = D::new();
    hasher.update(tree.to_bytes());
    hasher.finalize().to_vec()
}
