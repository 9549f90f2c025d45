//! Prime order fields `Z/qZ`, the exponent rings of prime order groups.

use crate::{
    error::ArithmError,
    integer::{byte_length_random, mod_inv, mod_neg, mod_sub, random_bits, to_fixed_bytes, to_hex},
};
use ark_std::{fmt, rand::RngCore, sync::Arc, vec, vec::Vec};
use crypto_utils::ByteTree;
use num::{BigUint, One, Zero};
use zeroize::Zeroize;

#[derive(Debug)]
struct FieldParams {
    order: BigUint,
    bit_length: u64,
    byte_length: usize,
    encode_length: usize,
}

/// Field of prime order. Cloning shares the parameters.
#[derive(Clone, Debug)]
pub struct PField(Arc<FieldParams>);

#[derive(Clone, Debug)]
pub struct PFieldElement {
    field: PField,
    value: BigUint,
}

impl PField {
    /// Primality of `order` is not checked.
    pub fn new(order: BigUint) -> Result<Self, ArithmError> {
        if order <= BigUint::one() {
            return Err(ArithmError::InvalidOrder);
        }
        let bit_length = order.bits();
        Ok(Self(Arc::new(FieldParams {
            byte_length: (bit_length / 8) as usize + 1,
            encode_length: ((bit_length - 1) / 8) as usize,
            bit_length,
            order,
        })))
    }

    pub fn order(&self) -> &BigUint {
        &self.0.order
    }

    pub fn bit_length(&self) -> u64 {
        self.0.bit_length
    }

    /// Number of bytes in the byte tree leaf of an element
    pub fn byte_length(&self) -> usize {
        self.0.byte_length
    }

    /// Number of bytes that can be injectively encoded in an element
    pub fn encode_length(&self) -> usize {
        self.0.encode_length
    }

    pub fn zero(&self) -> PFieldElement {
        self.element(BigUint::zero())
    }

    pub fn one(&self) -> PFieldElement {
        self.element(BigUint::one())
    }

    pub fn random_element_byte_length(&self, stat_dist: u32) -> usize {
        byte_length_random(self.0.bit_length + stat_dist as u64)
    }

    /// Element with distance at most `2^-stat_dist` from uniform.
    pub fn random_element<R: RngCore>(&self, rng: &mut R, stat_dist: u32) -> PFieldElement {
        let r = random_bits(rng, self.0.bit_length + stat_dist as u64);
        self.element(r)
    }

    /// Reads a leaf of exactly [`Self::byte_length`] bytes holding a reduced value.
    pub fn to_element(&self, tree: &ByteTree) -> Result<PFieldElement, ArithmError> {
        let bytes = tree.as_leaf_of_len(self.0.byte_length)?;
        let value = BigUint::from_bytes_be(bytes);
        if value >= self.0.order {
            return Err(ArithmError::NotReduced);
        }
        Ok(PFieldElement {
            field: self.clone(),
            value,
        })
    }

    /// Interprets arbitrary bytes, like a digest, as an integer and reduces it.
    pub fn from_bytes_mod_order(&self, bytes: &[u8]) -> PFieldElement {
        self.element(BigUint::from_bytes_be(bytes))
    }

    /// Element of the residue class of `value`.
    pub fn element(&self, value: BigUint) -> PFieldElement {
        PFieldElement {
            value: value % &self.0.order,
            field: self.clone(),
        }
    }

    pub fn from_u64(&self, value: u64) -> PFieldElement {
        self.element(BigUint::from(value))
    }
}

impl PartialEq for PField {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.order == other.0.order
    }
}

impl Eq for PField {}

impl fmt::Display for PField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", to_hex(&self.0.order))
    }
}

impl PFieldElement {
    pub fn field(&self) -> &PField {
        &self.field
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    fn check_field(&self, other: &Self) -> Result<(), ArithmError> {
        if self.field == other.field {
            Ok(())
        } else {
            Err(ArithmError::DistinctRings)
        }
    }

    fn with_value(&self, value: BigUint) -> Self {
        Self {
            field: self.field.clone(),
            value,
        }
    }

    pub fn add(&self, other: &Self) -> Result<Self, ArithmError> {
        self.check_field(other)?;
        Ok(self.with_value((&self.value + &other.value) % self.field.order()))
    }

    pub fn sub(&self, other: &Self) -> Result<Self, ArithmError> {
        self.check_field(other)?;
        Ok(self.with_value(mod_sub(&self.value, &other.value, self.field.order())))
    }

    pub fn mul(&self, other: &Self) -> Result<Self, ArithmError> {
        self.check_field(other)?;
        Ok(self.with_value((&self.value * &other.value) % self.field.order()))
    }

    pub fn neg(&self) -> Self {
        self.with_value(mod_neg(&self.value, self.field.order()))
    }

    pub fn inv(&self) -> Result<Self, ArithmError> {
        Ok(self.with_value(mod_inv(&self.value, self.field.order())?))
    }

    /// Leaf of [`PField::byte_length`] bytes, big-endian and zero padded.
    pub fn to_byte_tree(&self) -> ByteTree {
        ByteTree::Leaf(to_fixed_bytes(&self.value, self.field.byte_length()))
    }
}

impl PartialEq for PFieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.value == other.value
    }
}

impl Eq for PFieldElement {}

impl fmt::Display for PFieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", to_hex(&self.value))
    }
}

impl Zeroize for PFieldElement {
    fn zeroize(&mut self) {
        // Overwrite the digits in place before dropping them
        let words = self.value.iter_u32_digits().len();
        self.value.assign_from_slice(&vec![0u32; words]);
        self.value = BigUint::zero();
    }
}

/// Sum of the given elements, zero of `field` for an empty slice.
pub fn sum(field: &PField, elements: &[PFieldElement]) -> Result<PFieldElement, ArithmError> {
    elements.iter().try_fold(field.zero(), |acc, e| acc.add(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    fn field() -> PField {
        // 2^127 - 1
        PField::new((BigUint::one() << 127u32) - 1u32).unwrap()
    }

    #[test]
    fn lengths() {
        let f = field();
        assert_eq!(f.bit_length(), 127);
        assert_eq!(f.byte_length(), 16);
        assert_eq!(f.encode_length(), 15);
        assert_eq!(f.random_element_byte_length(50), 23);

        let g = PField::new(BigUint::from(0x80u32 + 3)).unwrap();
        assert_eq!(g.byte_length(), 2);
        assert_eq!(g.one().to_byte_tree().as_leaf().unwrap().len(), 2);
        assert!(PField::new(BigUint::one()).is_err());
    }

    #[test]
    fn field_laws() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let f = field();
        for _ in 0..20 {
            let a = f.random_element(&mut rng, 50);
            let b = f.random_element(&mut rng, 50);
            let c = f.random_element(&mut rng, 50);
            assert!(a.value() < f.order());

            assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
            assert_eq!(a.mul(&b).unwrap(), b.mul(&a).unwrap());
            assert_eq!(
                a.mul(&b.add(&c).unwrap()).unwrap(),
                a.mul(&b).unwrap().add(&a.mul(&c).unwrap()).unwrap()
            );
            assert_eq!(a.add(&a.neg()).unwrap(), f.zero());
            assert_eq!(a.sub(&b).unwrap().add(&b).unwrap(), a);
            if !a.is_zero() {
                assert_eq!(a.mul(&a.inv().unwrap()).unwrap(), f.one());
            }
            assert_eq!(a.mul(&f.one()).unwrap(), a);
        }
        assert_eq!(f.zero().inv(), Err(ArithmError::NotInvertible));
        assert_eq!(f.zero().neg(), f.zero());
    }

    #[test]
    fn byte_trees() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let f = field();
        let a = f.random_element(&mut rng, 50);
        let bt = a.to_byte_tree();
        assert_eq!(bt.as_leaf().unwrap().len(), f.byte_length());
        assert_eq!(f.to_element(&bt).unwrap(), a);

        assert_eq!(
            f.to_element(&ByteTree::Leaf(to_fixed_bytes(f.order(), 16))),
            Err(ArithmError::NotReduced)
        );
        assert!(f.to_element(&ByteTree::Leaf(vec![0u8; 15])).is_err());
        assert!(f.to_element(&ByteTree::Node(vec![bt])).is_err());

        let digest = [0xffu8; 32];
        let d = f.from_bytes_mod_order(&digest);
        assert_eq!(d.value(), &(BigUint::from_bytes_be(&digest) % f.order()));
    }

    #[test]
    fn distinct_fields() {
        let f = field();
        let g = PField::new(BigUint::from(101u32)).unwrap();
        assert_ne!(f, g);
        assert_eq!(f, PField::new(f.order().clone()).unwrap());
        assert_eq!(f.one().add(&g.one()), Err(ArithmError::DistinctRings));
        assert_eq!(f.one().mul(&g.one()), Err(ArithmError::DistinctRings));
    }

    #[test]
    fn sums_and_zeroize() {
        let g = PField::new(BigUint::from(101u32)).unwrap();
        let elems = vec![g.from_u64(50), g.from_u64(60), g.from_u64(1)];
        assert_eq!(sum(&g, &elems).unwrap(), g.from_u64(10));
        assert_eq!(sum(&g, &[]).unwrap(), g.zero());

        let mut e = g.from_u64(77);
        e.zeroize();
        assert!(e.is_zero());
    }
}
