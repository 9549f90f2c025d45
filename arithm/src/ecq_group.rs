//! Groups of points of prime order on standard elliptic curves.

use crate::{
    ec::{Curve, JacobianPoint},
    error::ArithmError,
    field::PField,
    integer::{
        from_hex, legendre, min_representative, mod_sqrt, random_bits, to_fixed_bytes, to_hex,
        twos_complement_length,
    },
    named_params::{NamedCurve, CURVES},
};
use ark_std::{fmt, rand::RngCore, string::ToString, sync::Arc, vec, vec::Vec};
use crypto_utils::{byte_tree::HEADER_SIZE, ByteTree};
use num::BigUint;

#[derive(Debug)]
struct ECqParams {
    name: &'static str,
    curve: Curve,
    generator: (BigUint, BigUint),
    pfield: PField,
    modulus_byte_length: usize,
    encode_length: usize,
}

#[derive(Clone, Debug)]
pub struct ECqPGroup(Arc<ECqParams>);

/// Point in affine coordinates, `None` being the point at infinity.
#[derive(Clone, Debug)]
pub struct ECqPGroupElement {
    group: ECqPGroup,
    point: Option<(BigUint, BigUint)>,
}

impl ECqPGroup {
    /// One of the curves listed by [`Self::names`].
    pub fn named(name: &str) -> Result<Self, ArithmError> {
        let params = CURVES
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ArithmError::UnknownGroupName(name.to_string()))?;
        Self::from_params(params)
    }

    fn from_params(params: &NamedCurve) -> Result<Self, ArithmError> {
        let curve = Curve {
            p: from_hex(params.p)?,
            a: from_hex(params.a)?,
            b: from_hex(params.b)?,
        };
        let generator = (from_hex(params.gx)?, from_hex(params.gy)?);
        if !curve.is_on_curve(&generator.0, &generator.1) {
            return Err(ArithmError::NotOnCurve);
        }
        let modulus_byte_length = twos_complement_length(&curve.p);
        let encode_length = ((curve.p.bits() - 1) / 8) as usize - 3;
        Ok(Self(Arc::new(ECqParams {
            name: params.name,
            pfield: PField::new(from_hex(params.n)?)?,
            curve,
            generator,
            modulus_byte_length,
            encode_length,
        })))
    }

    pub fn names() -> Vec<&'static str> {
        CURVES.iter().map(|c| c.name).collect()
    }

    pub fn name(&self) -> &'static str {
        self.0.name
    }

    pub fn curve(&self) -> &Curve {
        &self.0.curve
    }

    pub fn element_order(&self) -> &BigUint {
        self.0.pfield.order()
    }

    pub fn pfield(&self) -> &PField {
        &self.0.pfield
    }

    /// Length of each coordinate leaf
    pub fn modulus_byte_length(&self) -> usize {
        self.0.modulus_byte_length
    }

    /// Size of the serialized byte tree of an element
    pub fn byte_length(&self) -> usize {
        HEADER_SIZE + 2 * (HEADER_SIZE + self.0.modulus_byte_length)
    }

    pub fn encode_length(&self) -> usize {
        self.0.encode_length
    }

    pub fn generator(&self) -> ECqPGroupElement {
        self.element(Some(self.0.generator.clone()))
    }

    pub fn one(&self) -> ECqPGroupElement {
        self.element(None)
    }

    fn element(&self, point: Option<(BigUint, BigUint)>) -> ECqPGroupElement {
        ECqPGroupElement {
            group: self.clone(),
            point,
        }
    }

    /// Point with the given `x` and the smaller of the two roots as `y`, if `f(x)` is a non-zero
    /// square.
    fn lift_x(&self, x: BigUint) -> Option<ECqPGroupElement> {
        let curve = &self.0.curve;
        let fx = curve.f(&x);
        if legendre(&fx, &curve.p) != 1 {
            return None;
        }
        let y = mod_sqrt(&fx, &curve.p)?;
        let y = min_representative(&y, &curve.p);
        Some(self.element(Some((x, y))))
    }

    pub fn random_element<R: RngCore>(&self, rng: &mut R, stat_dist: u32) -> ECqPGroupElement {
        let p = &self.0.curve.p;
        loop {
            let x = random_bits(rng, p.bits() + stat_dist as u64) % p;
            if let Some(e) = self.lift_x(x) {
                return e;
            }
        }
    }

    /// Reads a node of two coordinate leaves. Both coordinates all `0xFF` is the point at infinity.
    pub fn to_element(&self, tree: &ByteTree) -> Result<ECqPGroupElement, ArithmError> {
        let children = tree.as_node_of_width(2)?;
        let len = self.0.modulus_byte_length;
        let xa = children[0].as_leaf_of_len(len)?;
        let ya = children[1].as_leaf_of_len(len)?;
        if xa.iter().chain(ya.iter()).all(|b| *b == 0xFF) {
            return Ok(self.one());
        }
        let x = BigUint::from_bytes_be(xa);
        let y = BigUint::from_bytes_be(ya);
        let p = &self.0.curve.p;
        if &x >= p || &y >= p {
            return Err(ArithmError::NotReduced);
        }
        if !self.0.curve.is_on_curve(&x, &y) {
            return Err(ArithmError::NotOnCurve);
        }
        Ok(self.element(Some((x, y))))
    }

    /// Encodes at most [`Self::encode_length`] bytes in the x-coordinate. The data is followed by
    /// its length as a `u16` and a byte that is incremented until the x-coordinate is on the curve.
    pub fn encode(&self, bytes: &[u8]) -> Result<ECqPGroupElement, ArithmError> {
        let elen = self.0.encode_length;
        if bytes.len() > elen {
            return Err(ArithmError::InputTooLong(elen, bytes.len()));
        }
        let mut buf = vec![0u8; elen + 3];
        buf[elen - bytes.len()..elen].copy_from_slice(bytes);
        buf[elen..elen + 2].copy_from_slice(&(bytes.len() as u16).to_be_bytes());
        let mut x = BigUint::from_bytes_be(&buf);
        loop {
            if let Some(e) = self.lift_x(x.clone()) {
                return Ok(e);
            }
            x += 1u32;
        }
    }

    /// Description, the name of the curve.
    pub fn to_byte_tree(&self) -> ByteTree {
        ByteTree::from_ascii(self.0.name)
    }

    pub fn from_byte_tree(tree: &ByteTree) -> Result<Self, ArithmError> {
        let name = ark_std::str::from_utf8(tree.as_leaf()?)
            .map_err(|_| ArithmError::InvalidGroupDescription)?;
        Self::named(name)
    }
}

impl PartialEq for ECqPGroup {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.curve == other.0.curve && self.0.generator == other.0.generator)
    }
}

impl Eq for ECqPGroup {}

impl fmt::Display for ECqPGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:({},{})",
            to_hex(&self.0.curve.p),
            to_hex(self.element_order()),
            to_hex(&self.0.generator.0),
            to_hex(&self.0.generator.1)
        )
    }
}

impl ECqPGroupElement {
    pub fn group(&self) -> &ECqPGroup {
        &self.group
    }

    /// Affine coordinates, `None` for the point at infinity.
    pub fn coordinates(&self) -> Option<&(BigUint, BigUint)> {
        self.point.as_ref()
    }

    fn jacobian(&self) -> JacobianPoint {
        match &self.point {
            Some((x, y)) => JacobianPoint::from_affine(x.clone(), y.clone()),
            None => JacobianPoint::infinity(),
        }
    }

    fn from_jacobian(&self, q: &JacobianPoint) -> Self {
        self.group.element(self.group.curve().to_affine(q))
    }

    pub fn mul(&self, other: &Self) -> Result<Self, ArithmError> {
        if self.group != other.group {
            return Err(ArithmError::DistinctGroups);
        }
        let curve = self.group.curve();
        Ok(self.from_jacobian(&curve.add(&self.jacobian(), &other.jacobian())))
    }

    pub fn exp(&self, exponent: &BigUint) -> Result<Self, ArithmError> {
        let curve = self.group.curve();
        Ok(self.from_jacobian(&curve.mul(&self.jacobian(), exponent)))
    }

    pub fn inv(&self) -> Self {
        let p = &self.group.curve().p;
        self.group.element(
            self.point
                .as_ref()
                .map(|(x, y)| (x.clone(), crate::integer::mod_neg(y, p))),
        )
    }

    pub fn to_byte_tree(&self) -> ByteTree {
        let len = self.group.modulus_byte_length();
        match &self.point {
            Some((x, y)) => ByteTree::Node(vec![
                ByteTree::Leaf(to_fixed_bytes(x, len)),
                ByteTree::Leaf(to_fixed_bytes(y, len)),
            ]),
            None => ByteTree::Node(vec![
                ByteTree::Leaf(vec![0xFF; len]),
                ByteTree::Leaf(vec![0xFF; len]),
            ]),
        }
    }

    /// Recovers the bytes given to [`ECqPGroup::encode`]. The point at infinity holds no bytes.
    pub fn decode(&self) -> Result<Vec<u8>, ArithmError> {
        let (x, _) = match &self.point {
            Some(p) => p,
            None => return Ok(Vec::new()),
        };
        let elen = self.group.encode_length();
        let bytes = to_fixed_bytes(x, elen + 3);
        let len = u16::from_be_bytes([bytes[elen], bytes[elen + 1]]) as usize;
        if len > elen {
            return Err(ArithmError::IllegalEncodedLength(len));
        }
        Ok(bytes[elen - len..elen].to_vec())
    }
}

impl PartialEq for ECqPGroupElement {
    fn eq(&self, other: &Self) -> bool {
        self.group == other.group && self.point == other.point
    }
}

impl Eq for ECqPGroupElement {}

impl fmt::Display for ECqPGroupElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.point {
            Some((x, y)) => write!(f, "({},{})", to_hex(x), to_hex(y)),
            None => write!(f, "(O)"),
        }
    }
}
