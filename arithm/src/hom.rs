//! Homomorphisms from a ring of exponents into a group, the relations proved by Schnorr proofs.

use crate::{
    error::ArithmError,
    group::{PGroup, PGroupElement},
    ring::{PRing, PRingElement},
};

pub trait Homomorphism: Send + Sync {
    fn domain(&self) -> &PRing;

    fn range(&self) -> &PGroup;

    /// Image of `value`, which must belong to [`Self::domain`].
    fn eva(&self, value: &PRingElement) -> Result<PGroupElement, ArithmError>;
}

/// `x -> basis^x`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpHom {
    domain: PRing,
    range: PGroup,
    basis: PGroupElement,
}

impl ExpHom {
    /// The domain must be the ring of exponents of the basis group or, for a product group, a
    /// ring accepted by every component.
    pub fn new(domain: PRing, basis: PGroupElement) -> Result<Self, ArithmError> {
        let range = basis.group();
        if !accepts_exponents(&range, &domain) {
            return Err(ArithmError::DistinctRings);
        }
        Ok(Self {
            domain,
            range,
            basis,
        })
    }

    pub fn basis(&self) -> &PGroupElement {
        &self.basis
    }
}

fn accepts_exponents(group: &PGroup, ring: &PRing) -> bool {
    if &group.pring() == ring {
        return true;
    }
    match group {
        PGroup::Product(g) => g.groups().iter().all(|c| accepts_exponents(c, ring)),
        _ => false,
    }
}

impl Homomorphism for ExpHom {
    fn domain(&self) -> &PRing {
        &self.domain
    }

    fn range(&self) -> &PGroup {
        &self.range
    }

    fn eva(&self, value: &PRingElement) -> Result<PGroupElement, ArithmError> {
        if value.ring() != self.domain {
            return Err(ArithmError::DistinctRings);
        }
        self.basis.exp(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{product_group::PPGroup, test_groups::modp_group};
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn exp_hom_is_homomorphic() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let group = PGroup::ModP(modp_group());
        let hom = ExpHom::new(group.pring(), group.generator()).unwrap();
        assert_eq!(hom.range(), &group);

        let x = hom.domain().random_element(&mut rng, 50);
        let y = hom.domain().random_element(&mut rng, 50);
        assert_eq!(
            hom.eva(&x.add(&y).unwrap()).unwrap(),
            hom.eva(&x).unwrap().mul(&hom.eva(&y).unwrap()).unwrap()
        );
        assert_eq!(hom.eva(&hom.domain().zero()).unwrap(), group.one());
    }

    #[test]
    fn wide_domain_into_product() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let atomic = PGroup::ModP(modp_group());
        let wide = PGroup::Product(PPGroup::repeated(atomic.clone(), 3).unwrap());
        let basis = wide.random_element(&mut rng, 50);
        let hom = ExpHom::new(wide.pring(), basis.clone()).unwrap();

        let x = wide.pring().random_element(&mut rng, 50);
        let image = hom.eva(&x).unwrap();
        for i in 0..3 {
            let xi = x.project(i).unwrap();
            assert_eq!(
                image.project(i).unwrap(),
                &basis.project(i).unwrap().exp(xi).unwrap()
            );
        }
        // Exponents outside the domain are rejected
        let scalar = atomic.pring().one();
        assert_eq!(hom.eva(&scalar), Err(ArithmError::DistinctRings));
    }

    #[test]
    fn domain_must_match_basis() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let atomic = PGroup::ModP(modp_group());
        let wide = PGroup::Product(PPGroup::repeated(atomic.clone(), 2).unwrap());
        let basis = wide.random_element(&mut rng, 50);

        // A component ring is applied to every component
        let hom = ExpHom::new(atomic.pring(), basis.clone()).unwrap();
        let x = atomic.pring().random_element(&mut rng, 50);
        assert_eq!(hom.eva(&x).unwrap(), basis.exp(&x).unwrap());

        assert_eq!(
            ExpHom::new(wide.pring(), atomic.generator()),
            Err(ArithmError::DistinctRings)
        );
        let curve = PGroup::ECq(crate::test_groups::ec_group());
        assert_eq!(
            ExpHom::new(curve.pring(), atomic.generator()),
            Err(ArithmError::DistinctRings)
        );
        assert_eq!(
            ExpHom::new(curve.pring(), basis),
            Err(ArithmError::DistinctRings)
        );
    }
}
