use arithm::{ExpHom, Homomorphism, PGroup, PGroupElement, PRingElement};
use ark_std::rand::RngCore;
use schnorr_pok::SchnorrProof;
use test_utils::STAT_DIST;

/// Widths of the product groups the benchmarks run over.
pub const WIDTHS: [usize; 4] = [1, 2, 4, 8];

/// Schnorr proof of knowledge of `w` with `basis^w = y` for a random `basis` of the product of
/// `width` copies of `group`, with a random instance `y` and its witness.
pub fn discrete_log_instance<R: RngCore>(
    group: &PGroup,
    width: usize,
    rng: &mut R,
) -> (SchnorrProof<ExpHom>, PGroupElement, PRingElement) {
    let wide = PGroup::wide(group, width).unwrap();
    let basis = wide.random_element(rng, STAT_DIST);
    let hom = ExpHom::new(wide.pring(), basis).unwrap();
    let witness = hom.domain().random_element(rng, STAT_DIST);
    let instance = hom.eva(&witness).unwrap();
    (SchnorrProof::new(hom), instance, witness)
}
