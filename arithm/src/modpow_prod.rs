//! Simultaneous exponentiation: `b_0^e_0 * .. * b_{k-1}^e_{k-1} mod m` in a single pass of
//! square-and-multiply using a table of all products of subsets of the bases.

use crate::error::ArithmError;
use ark_std::{end_timer, start_timer, vec, vec::Vec};
use num::{BigUint, One};

/// Largest number of bases, the table holds `2^width` products.
pub const MAX_WIDTH: usize = 24;

#[derive(Clone, Debug)]
pub struct ModPowProd {
    width: usize,
    modulus: BigUint,
    /// `table[mask]` is the product of the bases whose index bit is set in `mask`
    table: Vec<BigUint>,
}

impl ModPowProd {
    /// Fails with [`ArithmError::InvalidWidth`] for more than [`MAX_WIDTH`] bases.
    pub fn new(bases: &[BigUint], modulus: &BigUint) -> Result<Self, ArithmError> {
        if bases.len() > MAX_WIDTH {
            return Err(ArithmError::InvalidWidth(bases.len()));
        }
        let t = start_timer!(|| format!("Power product table for {} bases", bases.len()));
        let size = 1usize << bases.len();
        let mut table = vec![BigUint::one(); size];
        for mask in 1..size {
            let low = mask & mask.wrapping_neg();
            let i = low.trailing_zeros() as usize;
            table[mask] = (&table[mask ^ low] * &bases[i]) % modulus;
        }
        end_timer!(t);
        Ok(Self {
            width: bases.len(),
            modulus: modulus.clone(),
            table,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Product of the bases raised to the given exponents. There must be one exponent per base.
    pub fn mod_pow_prod(&self, exponents: &[BigUint]) -> Result<BigUint, ArithmError> {
        if exponents.len() != self.width {
            return Err(ArithmError::ArityMismatch(self.width, exponents.len()));
        }
        let max_bits = exponents.iter().map(|e| e.bits()).max().unwrap_or(0);
        let mut res = BigUint::one() % &self.modulus;
        for i in (0..max_bits).rev() {
            res = (&res * &res) % &self.modulus;
            let mut mask = 0usize;
            for (j, e) in exponents.iter().enumerate() {
                if e.bit(i) {
                    mask |= 1 << j;
                }
            }
            if mask != 0 {
                res = (&res * &self.table[mask]) % &self.modulus;
            }
        }
        Ok(res)
    }

    /// Reference implementation by separate exponentiations.
    pub fn naive(
        bases: &[BigUint],
        exponents: &[BigUint],
        modulus: &BigUint,
    ) -> Result<BigUint, ArithmError> {
        if exponents.len() != bases.len() {
            return Err(ArithmError::ArityMismatch(bases.len(), exponents.len()));
        }
        Ok(bases
            .iter()
            .zip(exponents)
            .fold(BigUint::one() % modulus, |acc, (b, e)| {
                (acc * b.modpow(e, modulus)) % modulus
            }))
    }
}
