//! Conversions and number theoretic helpers on `BigUint` shared by the fields and groups.

use crate::error::ArithmError;
use ark_std::{rand::RngCore, vec, vec::Vec};
use num::{BigUint, One, Zero};

/// Number of bytes of the minimal big-endian two's complement representation, i.e. one more than
/// the number of bytes needed for the bits so that the top bit is always clear.
pub fn twos_complement_length(v: &BigUint) -> usize {
    (v.bits() / 8) as usize + 1
}

/// Minimal big-endian two's complement bytes of a non-negative integer.
pub fn to_twos_complement_bytes(v: &BigUint) -> Vec<u8> {
    let mut bytes = v.to_bytes_be();
    if bytes[0] & 0x80 != 0 {
        bytes.insert(0, 0);
    }
    bytes
}

/// Reads a two's complement integer, rejecting empty input and negative values.
pub fn from_twos_complement_bytes(bytes: &[u8]) -> Result<BigUint, ArithmError> {
    match bytes.first() {
        None => Err(ArithmError::InvalidGroupDescription),
        Some(b) if b & 0x80 != 0 => Err(ArithmError::NegativeInteger),
        Some(_) => Ok(BigUint::from_bytes_be(bytes)),
    }
}

/// Big-endian bytes of `v` resized to exactly `len` bytes. Leading zeros are added, or the most
/// significant bytes are dropped.
pub fn to_fixed_bytes(v: &BigUint, len: usize) -> Vec<u8> {
    let bytes = v.to_bytes_be();
    if bytes.len() >= len {
        bytes[bytes.len() - len..].to_vec()
    } else {
        let mut out = vec![0u8; len - bytes.len()];
        out.extend_from_slice(&bytes);
        out
    }
}

/// Number of random bytes consumed by [`random_bits`].
pub fn byte_length_random(bits: u64) -> usize {
    ((bits + 7) / 8) as usize
}

/// Uniformly random integer of at most `bits` bits. The first byte read from `rng` is the most
/// significant one and has its surplus top bits cleared.
pub fn random_bits<R: RngCore>(rng: &mut R, bits: u64) -> BigUint {
    let mut bytes = vec![0u8; byte_length_random(bits)];
    rng.fill_bytes(&mut bytes);
    if let Some(first) = bytes.first_mut() {
        *first &= 0xFF >> ((8 - bits % 8) % 8);
    }
    BigUint::from_bytes_be(&bytes)
}

pub fn mod_sub(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    ((a % p) + p - (b % p)) % p
}

pub fn mod_neg(a: &BigUint, p: &BigUint) -> BigUint {
    (p - (a % p)) % p
}

pub fn mod_inv(a: &BigUint, p: &BigUint) -> Result<BigUint, ArithmError> {
    if (a % p).is_zero() {
        return Err(ArithmError::NotInvertible);
    }
    a.modinv(p).ok_or(ArithmError::NotInvertible)
}

/// Legendre symbol `(a | p)` for an odd prime `p` by Euler's criterion.
pub fn legendre(a: &BigUint, p: &BigUint) -> i8 {
    let a = a % p;
    if a.is_zero() {
        return 0;
    }
    let e = (p - 1u32) >> 1;
    if a.modpow(&e, p).is_one() {
        1
    } else {
        -1
    }
}

/// Square root of `a` modulo an odd prime `p` by Tonelli-Shanks, `None` if `a` is not a square.
pub fn mod_sqrt(a: &BigUint, p: &BigUint) -> Option<BigUint> {
    let a = a % p;
    if a.is_zero() {
        return Some(a);
    }
    if legendre(&a, p) != 1 {
        return None;
    }
    let p_minus_one = p - 1u32;
    let s = p_minus_one.trailing_zeros()?;
    let q = &p_minus_one >> s;

    if s == 1 {
        return Some(a.modpow(&((p + 1u32) >> 2), p));
    }

    let mut z = BigUint::from(2u32);
    while legendre(&z, p) != -1 {
        z += 1u32;
    }

    let mut m = s;
    let mut c = z.modpow(&q, p);
    let mut t = a.modpow(&q, p);
    let mut r = a.modpow(&((&q + 1u32) >> 1), p);

    while !t.is_one() {
        let mut i = 0u64;
        let mut t2 = t.clone();
        while !t2.is_one() {
            t2 = (&t2 * &t2) % p;
            i += 1;
            if i == m {
                return None;
            }
        }
        let mut b = c.clone();
        for _ in 0..(m - i - 1) {
            b = (&b * &b) % p;
        }
        m = i;
        c = (&b * &b) % p;
        t = (t * &c) % p;
        r = (r * &b) % p;
    }
    Some(r)
}

/// The smaller of the two integer representatives `v` and `p - v`.
pub fn min_representative(v: &BigUint, p: &BigUint) -> BigUint {
    let neg = p - v;
    if neg < *v {
        neg
    } else {
        v.clone()
    }
}

pub fn to_hex(v: &BigUint) -> ark_std::string::String {
    v.to_str_radix(16)
}

pub fn from_hex(s: &str) -> Result<BigUint, ArithmError> {
    BigUint::parse_bytes(s.as_bytes(), 16).ok_or(ArithmError::InvalidGroupDescription)
}

/// Reads a big-endian `u32` at `offset`.
pub fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    let mut b = [0u8; 4];
    b.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_be_bytes(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn byte_conversions() {
        let v = BigUint::from(0x80u32);
        assert_eq!(twos_complement_length(&v), 2);
        assert_eq!(to_twos_complement_bytes(&v), vec![0, 0x80]);
        assert_eq!(to_twos_complement_bytes(&BigUint::zero()), vec![0]);
        assert_eq!(to_twos_complement_bytes(&BigUint::from(0x7fu32)), vec![0x7f]);
        assert_eq!(twos_complement_length(&BigUint::from(0x7fu32)), 1);

        assert_eq!(from_twos_complement_bytes(&[0, 0x80]).unwrap(), v);
        assert_eq!(
            from_twos_complement_bytes(&[0x80]),
            Err(ArithmError::NegativeInteger)
        );
        assert!(from_twos_complement_bytes(&[]).is_err());

        let w = BigUint::from(0x010203u32);
        assert_eq!(to_fixed_bytes(&w, 5), vec![0, 0, 1, 2, 3]);
        assert_eq!(to_fixed_bytes(&w, 2), vec![2, 3]);
    }

    #[test]
    fn random_bits_respects_bound() {
        let mut rng = StdRng::seed_from_u64(0u64);
        for bits in [1u64, 7, 8, 9, 63, 130] {
            for _ in 0..20 {
                assert!(random_bits(&mut rng, bits).bits() <= bits);
            }
        }
        assert_eq!(byte_length_random(9), 2);
    }

    #[test]
    fn square_roots() {
        // p = 3 mod 4, p = 1 mod 4 with large 2-adic valuation, and a safe prime
        for p in [7u64, 1000000007, 998244353, 0xfffffffb] {
            let p = BigUint::from(p);
            for a in 1u32..60 {
                let a = BigUint::from(a);
                match mod_sqrt(&a, &p) {
                    Some(r) => {
                        assert_eq!(legendre(&a, &p), 1);
                        assert_eq!((&r * &r) % &p, &a % &p);
                    }
                    None => assert_eq!(legendre(&a, &p), -1),
                }
            }
        }
        let p = BigUint::from(13u32);
        assert_eq!(legendre(&BigUint::zero(), &p), 0);
        assert_eq!(mod_sqrt(&BigUint::zero(), &p), Some(BigUint::zero()));
    }

    #[test]
    fn modular_helpers() {
        let p = BigUint::from(11u32);
        assert_eq!(mod_sub(&BigUint::from(3u32), &BigUint::from(5u32), &p), BigUint::from(9u32));
        assert_eq!(mod_neg(&BigUint::zero(), &p), BigUint::zero());
        assert_eq!(mod_inv(&BigUint::from(3u32), &p).unwrap(), BigUint::from(4u32));
        assert_eq!(mod_inv(&BigUint::from(22u32), &p), Err(ArithmError::NotInvertible));
        assert_eq!(min_representative(&BigUint::from(9u32), &p), BigUint::from(2u32));
    }
}
