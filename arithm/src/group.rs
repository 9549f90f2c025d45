//! Prime order groups: safe-prime subgroups, elliptic curve groups and products of these.

use crate::{
    ecq_group::{ECqPGroup, ECqPGroupElement},
    error::ArithmError,
    field::PField,
    modp_group::{ModPGroup, ModPGroupElement},
    product_group::{PPGroup, PPGroupElement},
    ring::{PRing, PRingElement},
};
use ark_std::{fmt, rand::RngCore, string::ToString, vec, vec::Vec};
use crypto_utils::ByteTree;
use num::BigUint;

/// Type names used when marshalling a group description
pub const MODP_GROUP_TYPE: &str = "com.verificatum.arithm.ModPGroup";
pub const ECQ_GROUP_TYPE: &str = "com.verificatum.arithm.ECqPGroup";
pub const PP_GROUP_TYPE: &str = "com.verificatum.arithm.PPGroup";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PGroup {
    ModP(ModPGroup),
    ECq(ECqPGroup),
    Product(PPGroup),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PGroupElement {
    ModP(ModPGroupElement),
    ECq(ECqPGroupElement),
    Product(PPGroupElement),
}

impl PGroup {
    /// Standard group by name, safe-prime groups are searched before curves.
    pub fn named(name: &str) -> Result<Self, ArithmError> {
        if ModPGroup::names().contains(&name) {
            return Ok(Self::ModP(ModPGroup::named(name)?));
        }
        if ECqPGroup::names().contains(&name) {
            return Ok(Self::ECq(ECqPGroup::named(name)?));
        }
        Err(ArithmError::UnknownGroupName(name.to_string()))
    }

    /// Names accepted by [`Self::named`].
    pub fn named_groups() -> Vec<&'static str> {
        let mut names = ModPGroup::names();
        names.extend(ECqPGroup::names());
        names
    }

    /// `width` copies of `group` as a product group, or `group` itself for a width of 1.
    pub fn wide(group: &PGroup, width: usize) -> Result<Self, ArithmError> {
        match width {
            0 => Err(ArithmError::InvalidWidth(width)),
            1 => Ok(group.clone()),
            _ => Ok(Self::Product(PPGroup::repeated(group.clone(), width)?)),
        }
    }

    /// Ring of exponents.
    pub fn pring(&self) -> PRing {
        match self {
            Self::ModP(g) => PRing::Field(g.pfield().clone()),
            Self::ECq(g) => PRing::Field(g.pfield().clone()),
            Self::Product(g) => PRing::Product(g.pring().clone()),
        }
    }

    /// Field of the element order.
    pub fn pfield(&self) -> PField {
        self.pring().pfield().clone()
    }

    pub fn element_order(&self) -> &BigUint {
        match self {
            Self::ModP(g) => g.element_order(),
            Self::ECq(g) => g.element_order(),
            Self::Product(g) => g.element_order(),
        }
    }

    pub fn generator(&self) -> PGroupElement {
        match self {
            Self::ModP(g) => PGroupElement::ModP(g.generator()),
            Self::ECq(g) => PGroupElement::ECq(g.generator()),
            Self::Product(g) => PGroupElement::Product(g.generator()),
        }
    }

    pub fn one(&self) -> PGroupElement {
        match self {
            Self::ModP(g) => PGroupElement::ModP(g.one()),
            Self::ECq(g) => PGroupElement::ECq(g.one()),
            Self::Product(g) => PGroupElement::Product(g.one()),
        }
    }

    pub fn random_element<R: RngCore>(&self, rng: &mut R, stat_dist: u32) -> PGroupElement {
        match self {
            Self::ModP(g) => PGroupElement::ModP(g.random_element(rng, stat_dist)),
            Self::ECq(g) => PGroupElement::ECq(g.random_element(rng, stat_dist)),
            Self::Product(g) => PGroupElement::Product(g.random_element(rng, stat_dist)),
        }
    }

    pub fn to_element(&self, tree: &ByteTree) -> Result<PGroupElement, ArithmError> {
        Ok(match self {
            Self::ModP(g) => PGroupElement::ModP(g.to_element(tree)?),
            Self::ECq(g) => PGroupElement::ECq(g.to_element(tree)?),
            Self::Product(g) => PGroupElement::Product(g.to_element(tree)?),
        })
    }

    /// Size of the serialized byte tree of an element.
    pub fn byte_length(&self) -> usize {
        match self {
            Self::ModP(g) => g.byte_length(),
            Self::ECq(g) => g.byte_length(),
            Self::Product(g) => g.byte_length(),
        }
    }

    /// Maximal number of bytes [`Self::encode`] accepts.
    pub fn encode_length(&self) -> usize {
        match self {
            Self::ModP(g) => g.encode_length(),
            Self::ECq(g) => g.encode_length(),
            Self::Product(g) => g.encode_length(),
        }
    }

    /// Injective encoding of bytes as an element, inverted by [`PGroupElement::decode`].
    pub fn encode(&self, bytes: &[u8]) -> Result<PGroupElement, ArithmError> {
        Ok(match self {
            Self::ModP(g) => PGroupElement::ModP(g.encode(bytes)?),
            Self::ECq(g) => PGroupElement::ECq(g.encode(bytes)?),
            Self::Product(g) => PGroupElement::Product(g.encode(bytes)?),
        })
    }

    pub fn as_product(&self) -> Result<&PPGroup, ArithmError> {
        match self {
            Self::Product(g) => Ok(g),
            _ => Err(ArithmError::DistinctGroups),
        }
    }

    /// Component `i` of a product group.
    pub fn project(&self, i: usize) -> Result<&PGroup, ArithmError> {
        self.as_product()?.project(i)
    }

    /// Number of components, 1 for an atomic group.
    pub fn width(&self) -> usize {
        match self {
            Self::Product(g) => g.width(),
            _ => 1,
        }
    }

    /// Description of the group without its type.
    pub fn to_byte_tree(&self) -> ByteTree {
        match self {
            Self::ModP(g) => g.to_byte_tree(),
            Self::ECq(g) => g.to_byte_tree(),
            Self::Product(g) => g.to_byte_tree(),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Self::ModP(_) => MODP_GROUP_TYPE,
            Self::ECq(_) => ECQ_GROUP_TYPE,
            Self::Product(_) => PP_GROUP_TYPE,
        }
    }

    /// Description of the group prefixed by its type, `Node[leaf(type name), description]`.
    pub fn marshal(&self) -> ByteTree {
        ByteTree::Node(vec![
            ByteTree::from_ascii(self.type_name()),
            self.to_byte_tree(),
        ])
    }

    /// Inverse of [`Self::marshal`].
    pub fn unmarshal(tree: &ByteTree) -> Result<Self, ArithmError> {
        let children = tree.as_node_of_width(2)?;
        let name = children[0].as_leaf()?;
        if name == MODP_GROUP_TYPE.as_bytes() {
            Ok(Self::ModP(ModPGroup::from_byte_tree(&children[1])?))
        } else if name == ECQ_GROUP_TYPE.as_bytes() {
            Ok(Self::ECq(ECqPGroup::from_byte_tree(&children[1])?))
        } else if name == PP_GROUP_TYPE.as_bytes() {
            Ok(Self::Product(PPGroup::from_byte_tree(&children[1])?))
        } else {
            Err(ArithmError::InvalidGroupDescription)
        }
    }
}

impl From<ModPGroup> for PGroup {
    fn from(g: ModPGroup) -> Self {
        Self::ModP(g)
    }
}

impl From<ECqPGroup> for PGroup {
    fn from(g: ECqPGroup) -> Self {
        Self::ECq(g)
    }
}

impl From<PPGroup> for PGroup {
    fn from(g: PPGroup) -> Self {
        Self::Product(g)
    }
}

impl fmt::Display for PGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModP(g) => write!(f, "{}", g),
            Self::ECq(g) => write!(f, "{}", g),
            Self::Product(g) => write!(f, "{}", g),
        }
    }
}

/// The integer an element of `field` carries, for exponentiating an atomic group.
fn field_exponent<'a>(field: &PField, e: &'a PRingElement) -> Result<&'a BigUint, ArithmError> {
    match e {
        PRingElement::Field(x) if x.field() == field => Ok(x.value()),
        _ => Err(ArithmError::DistinctRings),
    }
}

impl PGroupElement {
    pub fn group(&self) -> PGroup {
        match self {
            Self::ModP(e) => PGroup::ModP(e.group().clone()),
            Self::ECq(e) => PGroup::ECq(e.group().clone()),
            Self::Product(e) => PGroup::Product(e.group().clone()),
        }
    }

    pub fn mul(&self, other: &Self) -> Result<Self, ArithmError> {
        match (self, other) {
            (Self::ModP(a), Self::ModP(b)) => Ok(Self::ModP(a.mul(b)?)),
            (Self::ECq(a), Self::ECq(b)) => Ok(Self::ECq(a.mul(b)?)),
            (Self::Product(a), Self::Product(b)) => Ok(Self::Product(a.mul(b)?)),
            _ => Err(ArithmError::DistinctGroups),
        }
    }

    /// Exponentiation by an element of the exponent ring. A product element also accepts an
    /// exponent from the ring of a component which is then applied to every component.
    pub fn exp(&self, exponent: &PRingElement) -> Result<Self, ArithmError> {
        match self {
            Self::ModP(a) => Ok(Self::ModP(
                a.exp(field_exponent(a.group().pfield(), exponent)?)?,
            )),
            Self::ECq(a) => Ok(Self::ECq(
                a.exp(field_exponent(a.group().pfield(), exponent)?)?,
            )),
            Self::Product(a) => Ok(Self::Product(a.exp(exponent)?)),
        }
    }

    pub fn inv(&self) -> Self {
        match self {
            Self::ModP(a) => Self::ModP(a.inv()),
            Self::ECq(a) => Self::ECq(a.inv()),
            Self::Product(a) => Self::Product(a.inv()),
        }
    }

    /// Copy of this element prepared for about `size` exponentiations with the same base. Only
    /// elements of safe-prime groups gain from this, curve points are returned as they are.
    pub fn fixed(&self, size: usize) -> Result<Self, ArithmError> {
        Ok(match self {
            Self::ModP(a) => Self::ModP(a.fixed(size)?),
            Self::ECq(_) => self.clone(),
            Self::Product(a) => Self::Product(a.fixed(size)?),
        })
    }

    pub fn to_byte_tree(&self) -> ByteTree {
        match self {
            Self::ModP(a) => a.to_byte_tree(),
            Self::ECq(a) => a.to_byte_tree(),
            Self::Product(a) => a.to_byte_tree(),
        }
    }

    /// Bytes encoded in this element by [`PGroup::encode`].
    pub fn decode(&self) -> Result<Vec<u8>, ArithmError> {
        match self {
            Self::ModP(a) => a.decode(),
            Self::ECq(a) => a.decode(),
            Self::Product(a) => a.decode(),
        }
    }

    pub fn as_product(&self) -> Result<&PPGroupElement, ArithmError> {
        match self {
            Self::Product(a) => Ok(a),
            _ => Err(ArithmError::DistinctGroups),
        }
    }

    /// Component `i` of an element of a product group.
    pub fn project(&self, i: usize) -> Result<&PGroupElement, ArithmError> {
        self.as_product()?.project(i)
    }
}

impl From<ModPGroupElement> for PGroupElement {
    fn from(e: ModPGroupElement) -> Self {
        Self::ModP(e)
    }
}

impl From<ECqPGroupElement> for PGroupElement {
    fn from(e: ECqPGroupElement) -> Self {
        Self::ECq(e)
    }
}

impl From<PPGroupElement> for PGroupElement {
    fn from(e: PPGroupElement) -> Self {
        Self::Product(e)
    }
}

impl fmt::Display for PGroupElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModP(a) => write!(f, "{}", a),
            Self::ECq(a) => write!(f, "{}", a),
            Self::Product(a) => write!(f, "{}", a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_groups::{ec_group, modp_group};
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn named_lookup() {
        let names = PGroup::named_groups();
        assert_eq!(names.len(), 33);
        assert!(matches!(PGroup::named("modp2048").unwrap(), PGroup::ModP(_)));
        assert!(matches!(PGroup::named("secp256k1").unwrap(), PGroup::ECq(_)));
        assert_eq!(
            PGroup::named("nope"),
            Err(ArithmError::UnknownGroupName("nope".to_string()))
        );
    }

    #[test]
    fn wide_groups() {
        let g = PGroup::ECq(ec_group());
        assert_eq!(PGroup::wide(&g, 1).unwrap(), g);
        let w = PGroup::wide(&g, 4).unwrap();
        assert_eq!(w.width(), 4);
        assert_eq!(w.project(3).unwrap(), &g);
        assert!(PGroup::wide(&g, 0).is_err());
        assert!(g.project(0).is_err());
    }

    #[test]
    fn marshalling() {
        let modp = PGroup::ModP(modp_group());
        let ec = PGroup::ECq(ec_group());
        let nested = PGroup::Product(
            PPGroup::new(vec![PGroup::wide(&modp, 2).unwrap(), modp.clone()]).unwrap(),
        );
        for g in [modp, ec, nested] {
            let bt = g.marshal();
            assert_eq!(PGroup::unmarshal(&bt).unwrap(), g);
            let bytes = bt.to_bytes();
            assert_eq!(
                PGroup::unmarshal(&ByteTree::from_bytes(&bytes).unwrap()).unwrap(),
                g
            );
        }
        let unknown = ByteTree::Node(vec![
            ByteTree::from_ascii("com.verificatum.arithm.Unknown"),
            ByteTree::Leaf(vec![0]),
        ]);
        assert_eq!(
            PGroup::unmarshal(&unknown),
            Err(ArithmError::InvalidGroupDescription)
        );
    }

    #[test]
    fn element_dispatch() {
        let mut rng = StdRng::seed_from_u64(0u64);
        for g in [PGroup::ModP(modp_group()), PGroup::ECq(ec_group())] {
            let a = g.random_element(&mut rng, 50);
            let x = g.pring().random_element(&mut rng, 50);
            let y = g.pring().random_element(&mut rng, 50);
            assert_eq!(a.group(), g);
            assert_eq!(
                a.exp(&x).unwrap().exp(&y).unwrap(),
                a.exp(&x.mul(&y).unwrap()).unwrap()
            );
            assert_eq!(g.to_element(&a.to_byte_tree()).unwrap(), a);
            assert_eq!(a.fixed(5).unwrap().exp(&x).unwrap(), a.exp(&x).unwrap());

            let msg = b"message";
            assert_eq!(g.encode(msg).unwrap().decode().unwrap(), msg.to_vec());
        }

        let modp = PGroup::ModP(modp_group());
        let ec = PGroup::ECq(ec_group());
        assert_eq!(
            modp.generator().mul(&ec.generator()),
            Err(ArithmError::DistinctGroups)
        );
        assert_eq!(
            modp.generator().exp(&ec.pring().one()),
            Err(ArithmError::DistinctRings)
        );
        assert!(modp.generator().project(0).is_err());
    }
}
