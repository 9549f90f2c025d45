//! Products of groups of the same prime order. The exponent ring is the product of the exponent
//! rings of the components, and nesting is preserved.

use crate::{
    error::ArithmError,
    group::{PGroup, PGroupElement},
    ring::{PPRing, PRingElement},
};
use ark_std::{cfg_iter, fmt, rand::RngCore, sync::Arc, vec, vec::Vec};
use crypto_utils::ByteTree;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug)]
struct ProductGroupParams {
    groups: Vec<PGroup>,
    pring: PPRing,
    byte_length: usize,
    encode_length: usize,
}

#[derive(Clone, Debug)]
pub struct PPGroup(Arc<ProductGroupParams>);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PPGroupElement {
    group: PPGroup,
    values: Vec<PGroupElement>,
}

impl PPGroup {
    pub fn new(groups: Vec<PGroup>) -> Result<Self, ArithmError> {
        if groups.is_empty() {
            return Err(ArithmError::EmptyProduct);
        }
        let order = groups[0].element_order();
        if groups.iter().any(|g| g.element_order() != order) {
            return Err(ArithmError::DistinctGroups);
        }
        let pring = PPRing::new(groups.iter().map(|g| g.pring()).collect())?;
        let byte_length = crypto_utils::byte_tree::HEADER_SIZE
            + groups.iter().map(|g| g.byte_length()).sum::<usize>();
        let encode_length = groups.iter().map(|g| g.encode_length()).sum();
        Ok(Self(Arc::new(ProductGroupParams {
            groups,
            pring,
            byte_length,
            encode_length,
        })))
    }

    /// Product of `width` copies of `group`.
    pub fn repeated(group: PGroup, width: usize) -> Result<Self, ArithmError> {
        if width == 0 {
            return Err(ArithmError::InvalidWidth(width));
        }
        Self::new(ark_std::iter::repeat(group).take(width).collect())
    }

    pub fn groups(&self) -> &[PGroup] {
        &self.0.groups
    }

    pub fn width(&self) -> usize {
        self.0.groups.len()
    }

    pub fn project(&self, i: usize) -> Result<&PGroup, ArithmError> {
        self.0
            .groups
            .get(i)
            .ok_or(ArithmError::IndexOutOfBounds(i, self.width()))
    }

    pub fn pring(&self) -> &PPRing {
        &self.0.pring
    }

    pub fn element_order(&self) -> &num::BigUint {
        self.0.groups[0].element_order()
    }

    pub fn byte_length(&self) -> usize {
        self.0.byte_length
    }

    pub fn encode_length(&self) -> usize {
        self.0.encode_length
    }

    fn element(&self, values: Vec<PGroupElement>) -> PPGroupElement {
        PPGroupElement {
            group: self.clone(),
            values,
        }
    }

    pub fn generator(&self) -> PPGroupElement {
        self.element(self.0.groups.iter().map(|g| g.generator()).collect())
    }

    pub fn one(&self) -> PPGroupElement {
        self.element(self.0.groups.iter().map(|g| g.one()).collect())
    }

    pub fn random_element<R: RngCore>(&self, rng: &mut R, stat_dist: u32) -> PPGroupElement {
        self.element(
            self.0
                .groups
                .iter()
                .map(|g| g.random_element(rng, stat_dist))
                .collect(),
        )
    }

    /// Forms the element with the given components. Each must belong to the group at its position.
    pub fn prod(&self, values: Vec<PGroupElement>) -> Result<PPGroupElement, ArithmError> {
        if values.len() != self.width() {
            return Err(ArithmError::ArityMismatch(self.width(), values.len()));
        }
        for (i, (v, g)) in values.iter().zip(self.groups()).enumerate() {
            if v.group() != *g {
                return Err(ArithmError::WrongSubgroup(i));
            }
        }
        Ok(self.element(values))
    }

    /// Forms the element with `value` in every position.
    pub fn prod_repeated(&self, value: &PGroupElement) -> Result<PPGroupElement, ArithmError> {
        self.prod(ark_std::iter::repeat(value.clone()).take(self.width()).collect())
    }

    /// Reads a node with one child per component.
    pub fn to_element(&self, tree: &ByteTree) -> Result<PPGroupElement, ArithmError> {
        let children = tree.as_node_of_width(self.width())?;
        let values = cfg_iter!(self.0.groups)
            .zip(children)
            .map(|(g, c)| g.to_element(c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.element(values))
    }

    /// Splits the bytes over the components, filling each up to its encode length in order.
    pub fn encode(&self, bytes: &[u8]) -> Result<PPGroupElement, ArithmError> {
        if bytes.len() > self.0.encode_length {
            return Err(ArithmError::InputTooLong(self.0.encode_length, bytes.len()));
        }
        let mut rest = bytes;
        let mut values = Vec::with_capacity(self.width());
        for g in self.0.groups.iter() {
            let len = rest.len().min(g.encode_length());
            values.push(g.encode(&rest[..len])?);
            rest = &rest[len..];
        }
        Ok(self.element(values))
    }

    /// Description `Node[Node[marshalled atomic groups], structure]` where the structure mirrors the
    /// nesting of the product with leaves holding `u32` indices into the list of atomic groups.
    pub fn to_byte_tree(&self) -> ByteTree {
        let mut atomic = Vec::new();
        let structure = self.structure(&mut atomic);
        ByteTree::Node(vec![
            ByteTree::Node(atomic.iter().map(|g| g.marshal()).collect()),
            structure,
        ])
    }

    fn structure(&self, atomic: &mut Vec<PGroup>) -> ByteTree {
        ByteTree::Node(
            self.0
                .groups
                .iter()
                .map(|g| match g {
                    PGroup::Product(pp) => pp.structure(atomic),
                    _ => {
                        let index = match atomic.iter().position(|a| a == g) {
                            Some(i) => i,
                            None => {
                                atomic.push(g.clone());
                                atomic.len() - 1
                            }
                        };
                        ByteTree::from_u32(index as u32)
                    }
                })
                .collect(),
        )
    }

    pub fn from_byte_tree(tree: &ByteTree) -> Result<Self, ArithmError> {
        let children = tree.as_node_of_width(2)?;
        let atomic = children[0]
            .as_node()?
            .iter()
            .map(PGroup::unmarshal)
            .collect::<Result<Vec<_>, _>>()?;
        match Self::from_structure(&children[1], &atomic)? {
            PGroup::Product(pp) => Ok(pp),
            _ => Err(ArithmError::InvalidGroupDescription),
        }
    }

    fn from_structure(tree: &ByteTree, atomic: &[PGroup]) -> Result<PGroup, ArithmError> {
        match tree {
            ByteTree::Leaf(_) => {
                let index = tree.to_u32()? as usize;
                atomic
                    .get(index)
                    .cloned()
                    .ok_or(ArithmError::IndexOutOfBounds(index, atomic.len()))
            }
            ByteTree::Node(children) => {
                let groups = children
                    .iter()
                    .map(|c| Self::from_structure(c, atomic))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(PGroup::Product(Self::new(groups)?))
            }
        }
    }
}

impl PartialEq for PPGroup {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.groups == other.0.groups
    }
}

impl Eq for PPGroup {}

impl fmt::Display for PPGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, g) in self.0.groups.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", g)?;
        }
        write!(f, ")")
    }
}

impl PPGroupElement {
    pub fn group(&self) -> &PPGroup {
        &self.group
    }

    pub fn values(&self) -> &[PGroupElement] {
        &self.values
    }

    pub fn project(&self, i: usize) -> Result<&PGroupElement, ArithmError> {
        self.values
            .get(i)
            .ok_or(ArithmError::IndexOutOfBounds(i, self.values.len()))
    }

    fn with_values(&self, values: Vec<PGroupElement>) -> Self {
        self.group.element(values)
    }

    pub fn mul(&self, other: &Self) -> Result<Self, ArithmError> {
        if self.group != other.group {
            return Err(ArithmError::DistinctGroups);
        }
        let values = cfg_iter!(self.values)
            .zip(&other.values)
            .map(|(a, b)| a.mul(b))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.with_values(values))
    }

    /// Exponentiation by an element of the exponent ring acts component-wise, any other exponent
    /// is passed to every component.
    pub fn exp(&self, exponent: &PRingElement) -> Result<Self, ArithmError> {
        let values = match exponent {
            PRingElement::Product(e) if e.ring() == self.group.pring() => cfg_iter!(self.values)
                .zip(e.values())
                .map(|(a, x)| a.exp(x))
                .collect::<Result<Vec<_>, _>>()?,
            _ => cfg_iter!(self.values)
                .map(|a| a.exp(exponent))
                .collect::<Result<Vec<_>, _>>()?,
        };
        Ok(self.with_values(values))
    }

    pub fn inv(&self) -> Self {
        self.with_values(cfg_iter!(self.values).map(|a| a.inv()).collect())
    }

    pub fn fixed(&self, size: usize) -> Result<Self, ArithmError> {
        let values = cfg_iter!(self.values)
            .map(|a| a.fixed(size))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.with_values(values))
    }

    pub fn to_byte_tree(&self) -> ByteTree {
        ByteTree::Node(self.values.iter().map(|v| v.to_byte_tree()).collect())
    }

    /// Concatenation of the bytes decoded from the components.
    pub fn decode(&self) -> Result<Vec<u8>, ArithmError> {
        let mut out = Vec::new();
        for v in self.values.iter() {
            out.extend_from_slice(&v.decode()?);
        }
        Ok(out)
    }
}

impl fmt::Display for PPGroupElement {
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
