//! Rings of exponents: a prime order field or a product of rings, possibly nested.

use crate::{
    error::ArithmError,
    field::{PField, PFieldElement},
};
use ark_std::{cfg_iter, fmt, rand::RngCore, sync::Arc, vec::Vec};
use crypto_utils::{byte_tree::HEADER_SIZE, ByteTree};
use zeroize::Zeroize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PRing {
    Field(PField),
    Product(PPRing),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PRingElement {
    Field(PFieldElement),
    Product(PPRingElement),
}

#[derive(Debug)]
struct ProductRingParams {
    rings: Vec<PRing>,
    byte_length: usize,
}

/// Product of rings. Elements are tuples and operations act component-wise.
#[derive(Clone, Debug)]
pub struct PPRing(Arc<ProductRingParams>);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PPRingElement {
    ring: PPRing,
    values: Vec<PRingElement>,
}

impl PRing {
    pub fn zero(&self) -> PRingElement {
        match self {
            Self::Field(f) => PRingElement::Field(f.zero()),
            Self::Product(r) => PRingElement::Product(r.zero()),
        }
    }

    pub fn one(&self) -> PRingElement {
        match self {
            Self::Field(f) => PRingElement::Field(f.one()),
            Self::Product(r) => PRingElement::Product(r.one()),
        }
    }

    pub fn random_element<R: RngCore>(&self, rng: &mut R, stat_dist: u32) -> PRingElement {
        match self {
            Self::Field(f) => PRingElement::Field(f.random_element(rng, stat_dist)),
            Self::Product(r) => PRingElement::Product(r.random_element(rng, stat_dist)),
        }
    }

    pub fn random_element_byte_length(&self, stat_dist: u32) -> usize {
        match self {
            Self::Field(f) => f.random_element_byte_length(stat_dist),
            Self::Product(r) => r.random_element_byte_length(stat_dist),
        }
    }

    pub fn to_element(&self, tree: &ByteTree) -> Result<PRingElement, ArithmError> {
        Ok(match self {
            Self::Field(f) => PRingElement::Field(f.to_element(tree)?),
            Self::Product(r) => PRingElement::Product(r.to_element(tree)?),
        })
    }

    /// For a field the length of an element's leaf data, for a product the size of the serialized
    /// byte tree of an element.
    pub fn byte_length(&self) -> usize {
        match self {
            Self::Field(f) => f.byte_length(),
            Self::Product(r) => r.byte_length(),
        }
    }

    pub fn encode_length(&self) -> usize {
        match self {
            Self::Field(f) => f.encode_length(),
            Self::Product(r) => r.encode_length(),
        }
    }

    /// The field underlying this ring, for a product that of its first component.
    pub fn pfield(&self) -> &PField {
        match self {
            Self::Field(f) => f,
            Self::Product(r) => r.pfield(),
        }
    }

    /// Number of components, 1 for a field.
    pub fn width(&self) -> usize {
        match self {
            Self::Field(_) => 1,
            Self::Product(r) => r.width(),
        }
    }

    fn tree_size(&self) -> usize {
        match self {
            Self::Field(f) => HEADER_SIZE + f.byte_length(),
            Self::Product(r) => r.byte_length(),
        }
    }
}

impl From<PField> for PRing {
    fn from(f: PField) -> Self {
        Self::Field(f)
    }
}

impl From<PPRing> for PRing {
    fn from(r: PPRing) -> Self {
        Self::Product(r)
    }
}

impl fmt::Display for PRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => write!(f, "{}", field),
            Self::Product(r) => write!(f, "{}", r),
        }
    }
}

impl PPRing {
    pub fn new(rings: Vec<PRing>) -> Result<Self, ArithmError> {
        if rings.is_empty() {
            return Err(ArithmError::EmptyProduct);
        }
        let byte_length = HEADER_SIZE + rings.iter().map(|r| r.tree_size()).sum::<usize>();
        Ok(Self(Arc::new(ProductRingParams { rings, byte_length })))
    }

    /// Product of `width` copies of `ring`.
    pub fn repeated(ring: PRing, width: usize) -> Result<Self, ArithmError> {
        if width == 0 {
            return Err(ArithmError::InvalidWidth(width));
        }
        Self::new(ark_std::iter::repeat(ring).take(width).collect())
    }

    pub fn rings(&self) -> &[PRing] {
        &self.0.rings
    }

    pub fn width(&self) -> usize {
        self.0.rings.len()
    }

    pub fn project(&self, i: usize) -> Result<&PRing, ArithmError> {
        self.0
            .rings
            .get(i)
            .ok_or(ArithmError::IndexOutOfBounds(i, self.width()))
    }

    pub fn pfield(&self) -> &PField {
        self.0.rings[0].pfield()
    }

    pub fn byte_length(&self) -> usize {
        self.0.byte_length
    }

    pub fn encode_length(&self) -> usize {
        self.0.rings.iter().map(|r| r.encode_length()).sum()
    }

    pub fn random_element_byte_length(&self, stat_dist: u32) -> usize {
        self.0
            .rings
            .iter()
            .map(|r| r.random_element_byte_length(stat_dist))
            .sum()
    }

    pub fn zero(&self) -> PPRingElement {
        self.element(self.0.rings.iter().map(|r| r.zero()).collect())
    }

    pub fn one(&self) -> PPRingElement {
        self.element(self.0.rings.iter().map(|r| r.one()).collect())
    }

    pub fn random_element<R: RngCore>(&self, rng: &mut R, stat_dist: u32) -> PPRingElement {
        self.element(
            self.0
                .rings
                .iter()
                .map(|r| r.random_element(rng, stat_dist))
                .collect(),
        )
    }

    /// Reads a node with one child per component.
    pub fn to_element(&self, tree: &ByteTree) -> Result<PPRingElement, ArithmError> {
        let children = tree.as_node_of_width(self.width())?;
        let values = self
            .0
            .rings
            .iter()
            .zip(children)
            .map(|(r, c)| r.to_element(c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.element(values))
    }

    /// Forms the element with the given components. Each must belong to the ring at its position.
    pub fn prod(&self, values: Vec<PRingElement>) -> Result<PPRingElement, ArithmError> {
        if values.len() != self.width() {
            return Err(ArithmError::ArityMismatch(self.width(), values.len()));
        }
        for (i, (v, r)) in values.iter().zip(self.rings()).enumerate() {
            if v.ring() != *r {
                return Err(ArithmError::WrongSubring(i));
            }
        }
        Ok(self.element(values))
    }

    /// Forms the element with `value` in every position.
    pub fn prod_repeated(&self, value: &PRingElement) -> Result<PPRingElement, ArithmError> {
        self.prod(ark_std::iter::repeat(value.clone()).take(self.width()).collect())
    }

    fn element(&self, values: Vec<PRingElement>) -> PPRingElement {
        PPRingElement {
            ring: self.clone(),
            values,
        }
    }
}

impl PartialEq for PPRing {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.rings == other.0.rings
    }
}

impl Eq for PPRing {}

impl fmt::Display for PPRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, r) in self.0.rings.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", r)?;
        }
        write!(f, ")")
    }
}

impl PRingElement {
    pub fn ring(&self) -> PRing {
        match self {
            Self::Field(e) => PRing::Field(e.field().clone()),
            Self::Product(e) => PRing::Product(e.ring.clone()),
        }
    }

    pub fn as_field(&self) -> Result<&PFieldElement, ArithmError> {
        match self {
            Self::Field(e) => Ok(e),
            Self::Product(_) => Err(ArithmError::DistinctRings),
        }
    }

    pub fn as_product(&self) -> Result<&PPRingElement, ArithmError> {
        match self {
            Self::Product(e) => Ok(e),
            Self::Field(_) => Err(ArithmError::DistinctRings),
        }
    }

    pub fn project(&self, i: usize) -> Result<&PRingElement, ArithmError> {
        self.as_product()?.project(i)
    }

    pub fn add(&self, other: &Self) -> Result<Self, ArithmError> {
        match (self, other) {
            (Self::Field(a), Self::Field(b)) => Ok(Self::Field(a.add(b)?)),
            (Self::Product(a), Self::Product(b)) => Ok(Self::Product(a.add(b)?)),
            _ => Err(ArithmError::DistinctRings),
        }
    }

    pub fn sub(&self, other: &Self) -> Result<Self, ArithmError> {
        match (self, other) {
            (Self::Field(a), Self::Field(b)) => Ok(Self::Field(a.sub(b)?)),
            (Self::Product(a), Self::Product(b)) => Ok(Self::Product(a.sub(b)?)),
            _ => Err(ArithmError::DistinctRings),
        }
    }

    /// Product with an element of the same ring, or for a product ring with an element of a
    /// sub-ring which is then multiplied into every component.
    pub fn mul(&self, other: &Self) -> Result<Self, ArithmError> {
        match (self, other) {
            (Self::Field(a), Self::Field(b)) => Ok(Self::Field(a.mul(b)?)),
            (Self::Product(a), b) => Ok(Self::Product(a.mul(b)?)),
            (Self::Field(_), Self::Product(_)) => Err(ArithmError::DistinctRings),
        }
    }

    pub fn neg(&self) -> Self {
        match self {
            Self::Field(a) => Self::Field(a.neg()),
            Self::Product(a) => Self::Product(a.neg()),
        }
    }

    pub fn inv(&self) -> Result<Self, ArithmError> {
        Ok(match self {
            Self::Field(a) => Self::Field(a.inv()?),
            Self::Product(a) => Self::Product(a.inv()?),
        })
    }

    pub fn to_byte_tree(&self) -> ByteTree {
        match self {
            Self::Field(a) => a.to_byte_tree(),
            Self::Product(a) => a.to_byte_tree(),
        }
    }
}

impl From<PFieldElement> for PRingElement {
    fn from(e: PFieldElement) -> Self {
        Self::Field(e)
    }
}

impl From<PPRingElement> for PRingElement {
    fn from(e: PPRingElement) -> Self {
        Self::Product(e)
    }
}

impl fmt::Display for PRingElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(a) => write!(f, "{}", a),
            Self::Product(a) => write!(f, "{}", a),
        }
    }
}

impl Zeroize for PRingElement {
    fn zeroize(&mut self) {
        match self {
            Self::Field(a) => a.zeroize(),
            Self::Product(a) => a.values.iter_mut().for_each(|v| v.zeroize()),
        }
    }
}

impl PPRingElement {
    pub fn ring(&self) -> &PPRing {
        &self.ring
    }

    pub fn values(&self) -> &[PRingElement] {
        &self.values
    }

    pub fn project(&self, i: usize) -> Result<&PRingElement, ArithmError> {
        self.values
            .get(i)
            .ok_or(ArithmError::IndexOutOfBounds(i, self.values.len()))
    }

    fn check_ring(&self, other: &Self) -> Result<(), ArithmError> {
        if self.ring == other.ring {
            Ok(())
        } else {
            Err(ArithmError::DistinctRings)
        }
    }

    fn with_values(&self, values: Vec<PRingElement>) -> Self {
        Self {
            ring: self.ring.clone(),
            values,
        }
    }

    pub fn add(&self, other: &Self) -> Result<Self, ArithmError> {
        self.check_ring(other)?;
        let values = cfg_iter!(self.values)
            .zip(&other.values)
            .map(|(a, b)| a.add(b))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.with_values(values))
    }

    pub fn sub(&self, other: &Self) -> Result<Self, ArithmError> {
        self.check_ring(other)?;
        let values = cfg_iter!(self.values)
            .zip(&other.values)
            .map(|(a, b)| a.sub(b))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.with_values(values))
    }

    pub fn mul(&self, other: &PRingElement) -> Result<Self, ArithmError> {
        let values = match other {
            PRingElement::Product(o) if o.ring == self.ring => cfg_iter!(self.values)
                .zip(&o.values)
                .map(|(a, b)| a.mul(b))
                .collect::<Result<Vec<_>, _>>()?,
            _ => cfg_iter!(self.values)
                .map(|a| a.mul(other))
                .collect::<Result<Vec<_>, _>>()?,
        };
        Ok(self.with_values(values))
    }

    pub fn neg(&self) -> Self {
        self.with_values(cfg_iter!(self.values).map(|a| a.neg()).collect())
    }

    pub fn inv(&self) -> Result<Self, ArithmError> {
        let values = cfg_iter!(self.values)
            .map(|a| a.inv())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.with_values(values))
    }

    pub fn to_byte_tree(&self) -> ByteTree {
        ByteTree::Node(self.values.iter().map(|v| v.to_byte_tree()).collect())
    }
}

impl fmt::Display for PPRingElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, ")")
    }
}
