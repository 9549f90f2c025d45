use arithm::{modp_group::ModPGroup, PGroup};
use ark_std::rand::{rngs::StdRng, SeedableRng};
use num::BigUint;

pub use crypto_utils::ByteTree;
pub use serde_json;

#[macro_use]
pub mod serialization;

pub const STAT_DIST: u32 = crypto_utils::DEFAULT_STAT_DIST;

/// Subgroup of quadratic residues modulo the 128-bit safe prime `p = 2q + 1`, small enough for
/// exhaustive tests.
pub fn modp_group() -> PGroup {
    let p = BigUint::parse_bytes(b"a5480dcdc419be4e5518f18e17e93107", 16).unwrap();
    let q = (&p - 1u32) >> 1;
    PGroup::ModP(ModPGroup::new(p, q, BigUint::from(4u32), 1).unwrap())
}

pub fn ec_group() -> PGroup {
    PGroup::named("P-192").unwrap()
}

/// One group of each kind.
pub fn test_groups() -> Vec<PGroup> {
    vec![modp_group(), ec_group()]
}

/// Standard groups of realistic sizes.
pub fn bench_groups() -> Vec<PGroup> {
    ["modp2048", "P-256"]
        .iter()
        .map(|n| PGroup::named(n).unwrap())
        .collect()
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(0u64)
}

/// Every copy of `bytes` with exactly one bit flipped.
pub fn bit_flips(bytes: &[u8]) -> impl Iterator<Item = Vec<u8>> + '_ {
    (0..bytes.len() * 8).map(move |i| {
        let mut flipped = bytes.to_vec();
        flipped[i / 8] ^= 1 << (i % 8);
        flipped
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_each_bit_once() {
        let bytes = [0u8, 0xff];
        let flips = bit_flips(&bytes).collect::<Vec<_>>();
        assert_eq!(flips.len(), 16);
        assert_eq!(flips[0], vec![1, 0xff]);
        assert_eq!(flips[15], vec![0, 0x7f]);
        assert!(flips.iter().all(|f| f.as_slice() != bytes));
    }

    #[test]
    fn groups_are_available() {
        assert_eq!(test_groups().len(), 2);
        assert_eq!(modp_group().element_order().bits(), 127);
        assert!(bench_groups().iter().all(|g| g.encode_length() > 0));
    }
}
