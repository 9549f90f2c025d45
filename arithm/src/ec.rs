//! Short Weierstrass curves `y^2 = x^3 + ax + b` over a prime field in Jacobian coordinates.
//! The point `(X, Y, Z)` with `Z != 0` represents `(X/Z^2, Y/Z^3)` and `Z = 0` is the point at
//! infinity.

use crate::integer::{mod_neg, mod_sub};
use num::{BigUint, One, Zero};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Curve {
    pub p: BigUint,
    pub a: BigUint,
    pub b: BigUint,
}

#[derive(Clone, Debug)]
pub struct JacobianPoint {
    pub x: BigUint,
    pub y: BigUint,
    pub z: BigUint,
}

impl JacobianPoint {
    pub fn infinity() -> Self {
        Self {
            x: BigUint::zero(),
            y: BigUint::one(),
            z: BigUint::zero(),
        }
    }

    pub fn from_affine(x: BigUint, y: BigUint) -> Self {
        Self {
            x,
            y,
            z: BigUint::one(),
        }
    }

    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }
}

impl Curve {
    fn mul_mod(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.p
    }

    fn add_mod(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.p
    }

    fn sub_mod(&self, a: &BigUint, b: &BigUint) -> BigUint {
        mod_sub(a, b, &self.p)
    }

    /// `x^3 + ax + b mod p`
    pub fn f(&self, x: &BigUint) -> BigUint {
        let x2 = self.mul_mod(x, x);
        let x3 = self.mul_mod(&x2, x);
        let ax = self.mul_mod(&self.a, x);
        (x3 + ax + &self.b) % &self.p
    }

    pub fn is_on_curve(&self, x: &BigUint, y: &BigUint) -> bool {
        self.f(x) == self.mul_mod(y, y)
    }

    pub fn double(&self, q: &JacobianPoint) -> JacobianPoint {
        if q.is_infinity() || q.y.is_zero() {
            return JacobianPoint::infinity();
        }
        let xx = self.mul_mod(&q.x, &q.x);
        let yy = self.mul_mod(&q.y, &q.y);
        let yyyy = self.mul_mod(&yy, &yy);
        let zz = self.mul_mod(&q.z, &q.z);

        // S = 4 X Y^2, M = 3 X^2 + a Z^4
        let s = self.mul_mod(&(&q.x << 2u32), &yy);
        let m = self.add_mod(&(xx * 3u32), &self.mul_mod(&self.a, &self.mul_mod(&zz, &zz)));

        let x3 = self.sub_mod(&self.mul_mod(&m, &m), &(&s << 1u32));
        let y3 = self.sub_mod(&self.mul_mod(&m, &self.sub_mod(&s, &x3)), &(yyyy << 3u32));
        let z3 = self.mul_mod(&(&q.y << 1u32), &q.z);
        JacobianPoint {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    pub fn add(&self, p1: &JacobianPoint, p2: &JacobianPoint) -> JacobianPoint {
        if p1.is_infinity() {
            return p2.clone();
        }
        if p2.is_infinity() {
            return p1.clone();
        }
        let z1z1 = self.mul_mod(&p1.z, &p1.z);
        let z2z2 = self.mul_mod(&p2.z, &p2.z);
        let u1 = self.mul_mod(&p1.x, &z2z2);
        let u2 = self.mul_mod(&p2.x, &z1z1);
        let s1 = self.mul_mod(&p1.y, &self.mul_mod(&p2.z, &z2z2));
        let s2 = self.mul_mod(&p2.y, &self.mul_mod(&p1.z, &z1z1));

        if u1 == u2 {
            return if s1 == s2 {
                self.double(p1)
            } else {
                JacobianPoint::infinity()
            };
        }

        let h = self.sub_mod(&u2, &u1);
        let r = self.sub_mod(&s2, &s1);
        let hh = self.mul_mod(&h, &h);
        let hhh = self.mul_mod(&h, &hh);
        let v = self.mul_mod(&u1, &hh);

        let x3 = self.sub_mod(
            &self.sub_mod(&self.mul_mod(&r, &r), &hhh),
            &((&v << 1u32) % &self.p),
        );
        let y3 = self.sub_mod(
            &self.mul_mod(&r, &self.sub_mod(&v, &x3)),
            &self.mul_mod(&s1, &hhh),
        );
        let z3 = self.mul_mod(&self.mul_mod(&p1.z, &p2.z), &h);
        JacobianPoint {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    pub fn neg(&self, q: &JacobianPoint) -> JacobianPoint {
        JacobianPoint {
            x: q.x.clone(),
            y: mod_neg(&q.y, &self.p),
            z: q.z.clone(),
        }
    }

    /// Left-to-right double-and-add.
    pub fn mul(&self, q: &JacobianPoint, e: &BigUint) -> JacobianPoint {
        let mut res = JacobianPoint::infinity();
        for i in (0..e.bits()).rev() {
            res = self.double(&res);
            if e.bit(i) {
                res = self.add(&res, q);
            }
        }
        res
    }

    /// Affine coordinates, `None` for the point at infinity.
    pub fn to_affine(&self, q: &JacobianPoint) -> Option<(BigUint, BigUint)> {
        if q.is_infinity() {
            return None;
        }
        // p is prime so z^(p-2) is the inverse of z
        let zinv = q.z.modpow(&(&self.p - 2u32), &self.p);
        let zinv2 = self.mul_mod(&zinv, &zinv);
        let x = self.mul_mod(&q.x, &zinv2);
        let y = self.mul_mod(&q.y, &self.mul_mod(&zinv2, &zinv));
        Some((x, y))
    }
}
