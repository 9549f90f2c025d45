//! Fixed-base exponentiation. The exponent is cut into `width` slices of bits and the powers
//! `b^(2^(i * slice_size))` are combined with a single simultaneous exponentiation.

use crate::{
    error::ArithmError,
    modpow_prod::{ModPowProd, MAX_WIDTH},
};
use ark_std::{end_timer, start_timer, vec::Vec};
use num::{BigUint, One, Zero};

#[derive(Clone, Debug)]
pub struct FixModPow {
    slice_size: u64,
    mpp: ModPowProd,
}

impl FixModPow {
    /// Prepares exponentiation of `basis` modulo `modulus`, expecting about `size`
    /// exponentiations. The table width is chosen by [`Self::optimal_width`] unless given.
    pub fn new(
        basis: &BigUint,
        modulus: &BigUint,
        size: usize,
        width: Option<usize>,
    ) -> Result<Self, ArithmError> {
        let bit_length = modulus.bits();
        let width = width.unwrap_or_else(|| Self::optimal_width(bit_length, size));
        if width == 0 || width > MAX_WIDTH {
            return Err(ArithmError::InvalidWidth(width));
        }
        let t = start_timer!(|| format!("Fixed base table of width {}", width));

        let slice_size = (bit_length + width as u64 - 1) / width as u64;
        let radix = BigUint::one() << slice_size;

        let mut bases = Vec::with_capacity(width);
        bases.push(basis % modulus);
        for i in 1..width {
            let next = bases[i - 1].modpow(&radix, modulus);
            bases.push(next);
        }
        let mpp = ModPowProd::new(&bases, modulus)?;
        end_timer!(t);
        Ok(Self { slice_size, mpp })
    }

    /// Width minimizing the amortized cost of table construction and exponentiation for
    /// exponents of `bit_length` bits over `size` exponentiations, reduced by one for overhead.
    pub fn optimal_width(bit_length: u64, size: usize) -> usize {
        let bits = bit_length as f64;
        let size = size.max(1) as f64;
        let mut width = 2usize;
        let mut cost = 1.5 * bits;
        loop {
            let old_cost = cost;
            let t = ((1u64 << width) as f64 - width as f64 + bits) / size;
            let m = bits / width as f64;
            cost = t + m;
            width += 1;
            if !(width <= 16 && cost < old_cost) {
                break;
            }
        }
        width - 1
    }

    pub fn width(&self) -> usize {
        self.mpp.width()
    }

    /// Cuts the exponent into `width` slices. The last non-zero slice takes all remaining bits and
    /// slices past the bit length are zero.
    pub fn slice(&self, exponent: &BigUint) -> Vec<BigUint> {
        let width = self.mpp.width();
        let bit_length = exponent.bits();
        let mut slices = Vec::with_capacity(width);
        let mut offset = 0u64;

        while slices.len() < width - 1 && offset < bit_length {
            slices.push(bit_slice(exponent, offset, offset + self.slice_size));
            offset += self.slice_size;
        }
        if offset < bit_length {
            slices.push(bit_slice(exponent, offset, bit_length));
        }
        while slices.len() < width {
            slices.push(BigUint::zero());
        }
        slices
    }

    pub fn mod_pow(&self, exponent: &BigUint) -> Result<BigUint, ArithmError> {
        self.mpp.mod_pow_prod(&self.slice(exponent))
    }
}

/// Bits `start..end` of `v` as an integer.
fn bit_slice(v: &BigUint, start: u64, end: u64) -> BigUint {
    let shifted = v >> start;
    let mask = (BigUint::one() << (end - start)) - 1u32;
    shifted & mask
}
