//! Subgroups of prime order `q` of the multiplicative group modulo a safe prime `p = 2q + 1`,
//! i.e. the quadratic residues modulo `p`.

use crate::{
    error::ArithmError,
    field::PField,
    fix_mod_pow::FixModPow,
    integer::{
        from_twos_complement_bytes, legendre, min_representative, random_bits, read_u32,
        to_fixed_bytes, to_hex, to_twos_complement_bytes, twos_complement_length,
    },
    named_params::MODP_GROUPS,
};
use ark_std::{fmt, rand::RngCore, string::ToString, sync::Arc, vec, vec::Vec};
use crypto_utils::{byte_tree::HEADER_SIZE, ByteTree};
use num::{BigUint, One, Zero};

/// Encoding of arbitrary bytes as quadratic residues which needs `p` to be a safe prime
pub const SAFE_PRIME_ENCODING: u32 = 1;

#[derive(Debug)]
struct ModPParams {
    modulus: BigUint,
    generator: BigUint,
    encoding: u32,
    pfield: PField,
    modulus_byte_length: usize,
    encode_length: usize,
}

#[derive(Clone, Debug)]
pub struct ModPGroup(Arc<ModPParams>);

#[derive(Clone, Debug)]
pub struct ModPGroupElement {
    group: ModPGroup,
    value: BigUint,
    /// Set by [`ModPGroupElement::fixed`] to speed up repeated exponentiations of this element
    fixed: Option<Arc<FixModPow>>,
}

impl ModPGroup {
    /// Group of order `order` modulo `modulus` generated by `generator`. Only the safe prime
    /// encoding is supported, so `modulus` must be `2 * order + 1`.
    pub fn new(
        modulus: BigUint,
        order: BigUint,
        generator: BigUint,
        encoding: u32,
    ) -> Result<Self, ArithmError> {
        if encoding != SAFE_PRIME_ENCODING {
            return Err(ArithmError::UnsupportedEncoding(encoding));
        }
        if modulus.bits() < 50 || (&order << 1u32) + 1u32 != modulus {
            return Err(ArithmError::InvalidGroupDescription);
        }
        if generator <= BigUint::one()
            || generator >= modulus
            || !generator.modpow(&order, &modulus).is_one()
        {
            return Err(ArithmError::NotInSubgroup);
        }
        let modulus_byte_length = twos_complement_length(&modulus);
        let encode_length = ((modulus.bits() - 2) / 8) as usize - 4;
        Ok(Self(Arc::new(ModPParams {
            pfield: PField::new(order)?,
            modulus,
            generator,
            encoding,
            modulus_byte_length,
            encode_length,
        })))
    }

    /// One of the standard groups `modp768`, .., `modp8192`.
    pub fn named(name: &str) -> Result<Self, ArithmError> {
        let params = MODP_GROUPS
            .iter()
            .find(|g| g.name == name)
            .ok_or_else(|| ArithmError::UnknownGroupName(name.to_string()))?;
        let modulus = crate::integer::from_hex(params.modulus)?;
        let order = (&modulus - 1u32) >> 1;
        let generator = crate::integer::from_hex(params.generator)?;
        Self::new(modulus, order, generator, SAFE_PRIME_ENCODING)
    }

    pub fn names() -> Vec<&'static str> {
        MODP_GROUPS.iter().map(|g| g.name).collect()
    }

    pub fn modulus(&self) -> &BigUint {
        &self.0.modulus
    }

    pub fn element_order(&self) -> &BigUint {
        self.0.pfield.order()
    }

    pub fn pfield(&self) -> &PField {
        &self.0.pfield
    }

    pub fn encoding(&self) -> u32 {
        self.0.encoding
    }

    /// Length of the leaf of an element
    pub fn modulus_byte_length(&self) -> usize {
        self.0.modulus_byte_length
    }

    /// Size of the serialized byte tree of an element
    pub fn byte_length(&self) -> usize {
        HEADER_SIZE + self.0.modulus_byte_length
    }

    pub fn encode_length(&self) -> usize {
        self.0.encode_length
    }

    pub fn generator(&self) -> ModPGroupElement {
        self.element(self.0.generator.clone())
    }

    pub fn one(&self) -> ModPGroupElement {
        self.element(BigUint::one())
    }

    fn element(&self, value: BigUint) -> ModPGroupElement {
        ModPGroupElement {
            group: self.clone(),
            value,
            fixed: None,
        }
    }

    /// Squares a random non-zero residue, giving a uniformly random element up to `stat_dist`.
    pub fn random_element<R: RngCore>(&self, rng: &mut R, stat_dist: u32) -> ModPGroupElement {
        let p = &self.0.modulus;
        loop {
            let r = random_bits(rng, p.bits() + stat_dist as u64) % p;
            if !r.is_zero() {
                return self.element((&r * &r) % p);
            }
        }
    }

    /// Reads a leaf of [`Self::modulus_byte_length`] bytes holding a canonical member of the group.
    pub fn to_element(&self, tree: &ByteTree) -> Result<ModPGroupElement, ArithmError> {
        let bytes = tree.as_leaf_of_len(self.0.modulus_byte_length)?;
        let value = BigUint::from_bytes_be(bytes);
        if value >= self.0.modulus {
            return Err(ArithmError::NotReduced);
        }
        if value.is_zero() || !value.modpow(self.element_order(), &self.0.modulus).is_one() {
            return Err(ArithmError::NotInSubgroup);
        }
        Ok(self.element(value))
    }

    /// Encodes at most [`Self::encode_length`] bytes as a group element. The bytes are prefixed by
    /// their length and padded, and the resulting integer is negated modulo `p` when it is not a
    /// quadratic residue.
    pub fn encode(&self, bytes: &[u8]) -> Result<ModPGroupElement, ArithmError> {
        let elen = self.0.encode_length;
        if bytes.len() > elen {
            return Err(ArithmError::InputTooLong(elen, bytes.len()));
        }
        let mut buf = vec![0u8; elen + 4];
        buf[..4].copy_from_slice(&(bytes.len() as u32).to_be_bytes());
        buf[4..4 + bytes.len()].copy_from_slice(bytes);
        // Keeps the value non-zero, ignored when decoding due to the zero length
        if bytes.is_empty() {
            buf[5] = 1;
        }
        let mut value = BigUint::from_bytes_be(&buf);
        if legendre(&value, &self.0.modulus) != 1 {
            value = &self.0.modulus - value;
        }
        Ok(self.element(value))
    }

    /// Description `Node[p, q, g, encoding]` with integers in two's complement.
    pub fn to_byte_tree(&self) -> ByteTree {
        ByteTree::Node(vec![
            ByteTree::Leaf(to_twos_complement_bytes(&self.0.modulus)),
            ByteTree::Leaf(to_twos_complement_bytes(self.element_order())),
            ByteTree::Leaf(to_twos_complement_bytes(&self.0.generator)),
            ByteTree::from_u32(self.0.encoding),
        ])
    }

    pub fn from_byte_tree(tree: &ByteTree) -> Result<Self, ArithmError> {
        let children = tree.as_node_of_width(4)?;
        let modulus = from_twos_complement_bytes(children[0].as_leaf()?)?;
        let order = from_twos_complement_bytes(children[1].as_leaf()?)?;
        let generator = from_twos_complement_bytes(children[2].as_leaf()?)?;
        let encoding = children[3].to_u32()?;
        Self::new(modulus, order, generator, encoding)
    }
}

impl PartialEq for ModPGroup {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.modulus == other.0.modulus
                && self.0.generator == other.0.generator
                && self.0.encoding == other.0.encoding)
    }
}

impl Eq for ModPGroup {}

impl fmt::Display for ModPGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:encoding({})",
            to_hex(&self.0.modulus),
            to_hex(self.element_order()),
            to_hex(&self.0.generator),
            self.0.encoding
        )
    }
}

impl ModPGroupElement {
    pub fn group(&self) -> &ModPGroup {
        &self.group
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    fn with_value(&self, value: BigUint) -> Self {
        self.group.element(value)
    }

    pub fn mul(&self, other: &Self) -> Result<Self, ArithmError> {
        if self.group != other.group {
            return Err(ArithmError::DistinctGroups);
        }
        Ok(self.with_value((&self.value * &other.value) % self.group.modulus()))
    }

    pub fn exp(&self, exponent: &BigUint) -> Result<Self, ArithmError> {
        let value = match &self.fixed {
            Some(fixed) => fixed.mod_pow(exponent)?,
            None => self.value.modpow(exponent, self.group.modulus()),
        };
        Ok(self.with_value(value))
    }

    pub fn inv(&self) -> Self {
        let p = self.group.modulus();
        self.with_value(self.value.modpow(&(p - 2u32), p))
    }

    /// Copy of this element which uses fixed-base exponentiation tuned for about `size`
    /// exponentiations.
    pub fn fixed(&self, size: usize) -> Result<Self, ArithmError> {
        let fixed = FixModPow::new(&self.value, self.group.modulus(), size, None)?;
        Ok(Self {
            group: self.group.clone(),
            value: self.value.clone(),
            fixed: Some(Arc::new(fixed)),
        })
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed.is_some()
    }

    pub fn to_byte_tree(&self) -> ByteTree {
        ByteTree::Leaf(to_fixed_bytes(&self.value, self.group.modulus_byte_length()))
    }

    /// Recovers the bytes given to [`ModPGroup::encode`].
    pub fn decode(&self) -> Result<Vec<u8>, ArithmError> {
        let elen = self.group.encode_length();
        let v = min_representative(&self.value, self.group.modulus());
        let bytes = to_fixed_bytes(&v, elen + 4);
        let len = read_u32(&bytes, 0) as usize;
        if len > elen {
            return Err(ArithmError::IllegalEncodedLength(len));
        }
        Ok(bytes[4..4 + len].to_vec())
    }
}

impl PartialEq for ModPGroupElement {
    fn eq(&self, other: &Self) -> bool {
        self.group == other.group && self.value == other.value
    }
}

impl Eq for ModPGroupElement {}

impl fmt::Display for ModPGroupElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", to_hex(&self.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_groups::modp_group;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn parameters() {
        let g = modp_group();
        assert_eq!(g.modulus_byte_length(), 17);
        assert_eq!(g.byte_length(), 22);
        assert_eq!(g.encode_length(), 11);
        assert_eq!(g.byte_length(), g.one().to_byte_tree().size());

        let p = g.modulus().clone();
        let q = g.element_order().clone();
        assert_eq!(
            ModPGroup::new(p.clone(), q.clone(), BigUint::from(4u32), 0),
            Err(ArithmError::UnsupportedEncoding(0))
        );
        assert_eq!(
            ModPGroup::new(p.clone(), &q - 2u32, BigUint::from(4u32), 1),
            Err(ArithmError::InvalidGroupDescription)
        );
        // A non-residue does not generate the subgroup
        assert_eq!(
            ModPGroup::new(p.clone(), q.clone(), &p - 4u32, 1),
            Err(ArithmError::NotInSubgroup)
        );
        assert_eq!(
            ModPGroup::new(p, q, BigUint::one(), 1),
            Err(ArithmError::NotInSubgroup)
        );
    }

    #[test]
    fn named_groups() {
        let names = ModPGroup::names();
        assert_eq!(names.len(), 8);
        assert_eq!(names[0], "modp768");
        let g = ModPGroup::named("modp768").unwrap();
        assert_eq!(g.modulus().bits(), 768);
        assert_eq!(g.encode_length(), 91);
        assert_eq!(g.generator().value(), &BigUint::from(2u32));
        assert_eq!(
            ModPGroup::named("modp123"),
            Err(ArithmError::UnknownGroupName("modp123".to_string()))
        );
    }

    #[test]
    fn group_laws() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let group = modp_group();
        let q = group.element_order().clone();
        let g = group.generator();
        assert!(g.exp(&q).unwrap() == group.one());

        for _ in 0..10 {
            let a = group.random_element(&mut rng, 50);
            let b = group.random_element(&mut rng, 50);
            assert!(a.exp(&q).unwrap() == group.one());
            assert_eq!(a.mul(&b).unwrap(), b.mul(&a).unwrap());
            assert_eq!(a.mul(&a.inv()).unwrap(), group.one());
            assert_eq!(a.mul(&group.one()).unwrap(), a);

            let x = random_bits(&mut rng, 128) % &q;
            let y = random_bits(&mut rng, 128) % &q;
            assert_eq!(
                a.exp(&x).unwrap().mul(&a.exp(&y).unwrap()).unwrap(),
                a.exp(&((&x + &y) % &q)).unwrap()
            );
        }
    }

    #[test]
    fn fixed_base_matches() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let group = modp_group();
        let a = group.random_element(&mut rng, 50);
        let f = a.fixed(20).unwrap();
        assert!(f.is_fixed());
        assert_eq!(f, a);
        for _ in 0..20 {
            let e = random_bits(&mut rng, 127);
            assert_eq!(f.exp(&e).unwrap(), a.exp(&e).unwrap());
        }
    }

    #[test]
    fn element_byte_trees() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let group = modp_group();
        let a = group.random_element(&mut rng, 50);
        let bt = a.to_byte_tree();
        assert_eq!(group.to_element(&bt).unwrap(), a);

        // p itself and a non-residue are rejected
        let p_bytes = to_fixed_bytes(group.modulus(), 17);
        assert_eq!(
            group.to_element(&ByteTree::Leaf(p_bytes)),
            Err(ArithmError::NotReduced)
        );
        let non_residue = group.modulus() - a.value();
        assert_eq!(
            group.to_element(&ByteTree::Leaf(to_fixed_bytes(&non_residue, 17))),
            Err(ArithmError::NotInSubgroup)
        );
        assert!(group.to_element(&ByteTree::Leaf(vec![0u8; 17])).is_err());
        assert!(group.to_element(&ByteTree::Leaf(vec![1u8; 16])).is_err());
    }

    #[test]
    fn encode_decode() {
        let group = modp_group();
        for msg in [
            vec![],
            vec![0u8],
            vec![0xffu8; 11],
            b"hello".to_vec(),
            vec![0u8, 0, 7],
        ] {
            let e = group.encode(&msg).unwrap();
            assert!(e.value().modpow(group.element_order(), group.modulus()).is_one());
            assert_eq!(e.decode().unwrap(), msg);
        }
        assert_eq!(
            group.encode(&[0u8; 12]),
            Err(ArithmError::InputTooLong(11, 12))
        );
        // The generator was not produced by encoding and carries no valid length
        assert!(group.generator().exp(&BigUint::from(12345u32)).unwrap().decode().is_err());
    }

    #[test]
    fn descriptions() {
        let group = modp_group();
        let bt = group.to_byte_tree();
        assert_eq!(ModPGroup::from_byte_tree(&bt).unwrap(), group);

        let named = ModPGroup::named("modp1024").unwrap();
        assert_eq!(
            ModPGroup::from_byte_tree(&named.to_byte_tree()).unwrap(),
            named
        );
        assert_ne!(named, group);

        let mut children = bt.as_node().unwrap().to_vec();
        children[0] = ByteTree::Leaf(vec![0x80]);
        assert_eq!(
            ModPGroup::from_byte_tree(&ByteTree::Node(children)),
            Err(ArithmError::NegativeInteger)
        );
        assert!(ModPGroup::from_byte_tree(&ByteTree::Leaf(vec![1])).is_err());
    }
}
