//! G1: points of y² = x³ + 3 over Fq, in Jacobian coordinates.
//!
//! Addition and doubling use the add-2007-bl and dbl-2009-l formulas
//! (affine x = X/Z², y = Y/Z³); adding a point to itself dispatches to
//! doubling, and the point at infinity is any triple with Z = 0,
//! canonically (0, 1, 0).

use num_bigint::BigUint;
use num_traits::Zero;
use serde::de::Error as _;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PinocchioError;
use crate::field::PrimeField;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A Jacobian G1 point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct G1Point {
    pub x: BigUint,
    pub y: BigUint,
    pub z: BigUint,
}

impl G1Point {
    pub fn new(x: BigUint, y: BigUint, z: BigUint) -> Self {
        Self { x, y, z }
    }
}

// Persisted as a Jacobian triple of decimal strings.
impl Serialize for G1Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.x.to_str_radix(10))?;
        tuple.serialize_element(&self.y.to_str_radix(10))?;
        tuple.serialize_element(&self.z.to_str_radix(10))?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for G1Point {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [x, y, z] = <[String; 3]>::deserialize(deserializer)?;
        let parse = |s: &str| {
            BigUint::parse_bytes(s.as_bytes(), 10)
                .ok_or_else(|| D::Error::custom("coordinate is not a decimal integer"))
        };
        Ok(Self::new(parse(&x)?, parse(&y)?, parse(&z)?))
    }
}

/// The G1 group context: base field, curve coefficient and generator.
#[derive(Clone, Debug)]
pub struct G1 {
    pub fp: PrimeField,
    b: BigUint,
    generator: G1Point,
}

impl G1 {
    /// Builds the group over `fp` with coefficient b = 3 and generator
    /// (1, 2).
    pub fn new(fp: PrimeField) -> Self {
        let generator = G1Point::new(fp.one(), fp.element(2), fp.one());
        let b = fp.element(3);
        Self { fp, b, generator }
    }

    pub fn generator(&self) -> G1Point {
        self.generator.clone()
    }

    /// The canonical point at infinity (0, 1, 0).
    pub fn infinity(&self) -> G1Point {
        G1Point::new(self.fp.zero(), self.fp.one(), self.fp.zero())
    }

    pub fn is_infinity(&self, p: &G1Point) -> bool {
        p.z.is_zero()
    }

    pub fn neg(&self, p: &G1Point) -> G1Point {
        G1Point::new(p.x.clone(), self.fp.neg(&p.y), p.z.clone())
    }

    /// dbl-2009-l.
    pub fn double(&self, p: &G1Point) -> G1Point {
        if self.is_infinity(p) {
            return self.infinity();
        }
        let f = &self.fp;
        let a = f.square(&p.x);
        let b = f.square(&p.y);
        let c = f.square(&b);
        let mut d = f.sub(&f.sub(&f.square(&f.add(&p.x, &b)), &a), &c);
        d = f.add(&d, &d);
        let e = f.add(&f.add(&a, &a), &a);
        let ff = f.square(&e);
        let x3 = f.sub(&ff, &f.add(&d, &d));
        let c8 = {
            let c2 = f.add(&c, &c);
            let c4 = f.add(&c2, &c2);
            f.add(&c4, &c4)
        };
        let y3 = f.sub(&f.mul(&e, &f.sub(&d, &x3)), &c8);
        let yz = f.mul(&p.y, &p.z);
        G1Point::new(x3, y3, f.add(&yz, &yz))
    }

    /// add-2007-bl, with dispatch to doubling for equal points and the
    /// identity rules for infinity.
    pub fn add(&self, p: &G1Point, q: &G1Point) -> G1Point {
        if self.is_infinity(p) {
            return q.clone();
        }
        if self.is_infinity(q) {
            return p.clone();
        }
        let f = &self.fp;
        let z1z1 = f.square(&p.z);
        let z2z2 = f.square(&q.z);
        let u1 = f.mul(&p.x, &z2z2);
        let u2 = f.mul(&q.x, &z1z1);
        let s1 = f.mul(&f.mul(&p.y, &q.z), &z2z2);
        let s2 = f.mul(&f.mul(&q.y, &p.z), &z1z1);
        if u1 == u2 {
            if s1 != s2 {
                return self.infinity();
            }
            return self.double(p);
        }
        let h = f.sub(&u2, &u1);
        let i = {
            let h2 = f.add(&h, &h);
            f.square(&h2)
        };
        let j = f.mul(&h, &i);
        let r = {
            let d = f.sub(&s2, &s1);
            f.add(&d, &d)
        };
        let v = f.mul(&u1, &i);
        let x3 = f.sub(&f.sub(&f.square(&r), &j), &f.add(&v, &v));
        let s1j = f.mul(&s1, &j);
        let y3 = f.sub(&f.mul(&r, &f.sub(&v, &x3)), &f.add(&s1j, &s1j));
        let z3 = f.mul(
            &f.sub(&f.sub(&f.square(&f.add(&p.z, &q.z)), &z1z1), &z2z2),
            &h,
        );
        G1Point::new(x3, y3, z3)
    }

    /// Left-to-right double-and-add over the binary expansion of the
    /// scalar. Variable-time.
    pub fn mul_scalar(&self, p: &G1Point, k: &BigUint) -> G1Point {
        let mut res = self.infinity();
        for i in (0..k.bits()).rev() {
            res = self.double(&res);
            if k.bit(i) {
                res = self.add(&res, p);
            }
        }
        res
    }

    /// Multi-scalar multiplication Σ kᵢ·Pᵢ.
    ///
    /// With the `parallel` feature the products are computed on the rayon
    /// pool and summed afterwards; the result is identical either way.
    pub fn msm(&self, bases: &[G1Point], scalars: &[BigUint]) -> Result<G1Point, PinocchioError> {
        if bases.len() != scalars.len() {
            return Err(PinocchioError::InvalidArgument(
                "msm bases and scalars differ in length",
            ));
        }
        #[cfg(feature = "parallel")]
        {
            let parts: Vec<G1Point> = bases
                .par_iter()
                .zip(scalars.par_iter())
                .map(|(p, k)| self.mul_scalar(p, k))
                .collect();
            Ok(parts
                .into_iter()
                .fold(self.infinity(), |acc, p| self.add(&acc, &p)))
        }
        #[cfg(not(feature = "parallel"))]
        {
            Ok(bases
                .iter()
                .zip(scalars)
                .fold(self.infinity(), |acc, (p, k)| {
                    self.add(&acc, &self.mul_scalar(p, k))
                }))
        }
    }

    /// Normalizes to Z = 1 (or the canonical infinity). Costs one field
    /// inversion; used at equality, serialization and pairing entry.
    pub fn to_affine(&self, p: &G1Point) -> G1Point {
        if self.is_infinity(p) {
            return self.infinity();
        }
        let z_inv = self
            .fp
            .inverse(&p.z)
            .expect("nonzero Z coordinate is invertible");
        let z_inv2 = self.fp.square(&z_inv);
        let z_inv3 = self.fp.mul(&z_inv2, &z_inv);
        G1Point::new(
            self.fp.mul(&p.x, &z_inv2),
            self.fp.mul(&p.y, &z_inv3),
            self.fp.one(),
        )
    }

    /// Equality of the underlying affine points.
    pub fn eq(&self, p: &G1Point, q: &G1Point) -> bool {
        match (self.is_infinity(p), self.is_infinity(q)) {
            (true, true) => true,
            (true, false) | (false, true) => false,
            (false, false) => self.to_affine(p) == self.to_affine(q),
        }
    }

    /// Whether the normalized point satisfies y² = x³ + 3. Infinity is on
    /// the curve by convention.
    pub fn is_on_curve(&self, p: &G1Point) -> bool {
        if self.is_infinity(p) {
            return true;
        }
        let a = self.to_affine(p);
        let lhs = self.fp.square(&a.y);
        let rhs = self
            .fp
            .add(&self.fp.mul(&self.fp.square(&a.x), &a.x), &self.b);
        lhs == rhs
    }
}
