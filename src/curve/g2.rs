//! G2: points of the D-type twist y² = x³ + 3/ξ over Fq², in Jacobian
//! coordinates. Mirrors the G1 formulas with every base-field operation
//! replaced by its Fq² counterpart.

use num_bigint::BigUint;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PinocchioError;
use crate::field::{Fq2, Fq2Elem};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A Jacobian G2 point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct G2Point {
    pub x: Fq2Elem,
    pub y: Fq2Elem,
    pub z: Fq2Elem,
}

impl G2Point {
    pub fn new(x: Fq2Elem, y: Fq2Elem, z: Fq2Elem) -> Self {
        Self { x, y, z }
    }
}

// Persisted as a Jacobian triple of coordinate pairs.
impl Serialize for G2Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.x)?;
        tuple.serialize_element(&self.y)?;
        tuple.serialize_element(&self.z)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for G2Point {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [x, y, z] = <[Fq2Elem; 3]>::deserialize(deserializer)?;
        Ok(Self::new(x, y, z))
    }
}

/// The G2 group context: coordinate field, twist coefficient, generator.
#[derive(Clone, Debug)]
pub struct G2 {
    pub fq2: Fq2,
    b: Fq2Elem,
    generator: G2Point,
}

impl G2 {
    /// Builds the group over `fq2` with the given twist coefficient
    /// b′ = 3/ξ and generator.
    pub fn new(fq2: Fq2, b: Fq2Elem, generator: G2Point) -> Self {
        Self { fq2, b, generator }
    }

    pub fn generator(&self) -> G2Point {
        self.generator.clone()
    }

    /// The twist coefficient b′.
    pub fn coeff_b(&self) -> &Fq2Elem {
        &self.b
    }

    /// The canonical point at infinity.
    pub fn infinity(&self) -> G2Point {
        G2Point::new(self.fq2.zero(), self.fq2.one(), self.fq2.zero())
    }

    pub fn is_infinity(&self, p: &G2Point) -> bool {
        self.fq2.is_zero(&p.z)
    }

    pub fn neg(&self, p: &G2Point) -> G2Point {
        G2Point::new(p.x.clone(), self.fq2.neg(&p.y), p.z.clone())
    }

    /// dbl-2009-l over Fq².
    pub fn double(&self, p: &G2Point) -> G2Point {
        if self.is_infinity(p) {
            return self.infinity();
        }
        let f = &self.fq2;
        let a = f.square(&p.x);
        let b = f.square(&p.y);
        let c = f.square(&b);
        let d = f.double(&f.sub(&f.sub(&f.square(&f.add(&p.x, &b)), &a), &c));
        let e = f.add(&f.double(&a), &a);
        let ff = f.square(&e);
        let x3 = f.sub(&ff, &f.double(&d));
        let c8 = f.double(&f.double(&f.double(&c)));
        let y3 = f.sub(&f.mul(&e, &f.sub(&d, &x3)), &c8);
        let z3 = f.double(&f.mul(&p.y, &p.z));
        G2Point::new(x3, y3, z3)
    }

    /// add-2007-bl over Fq².
    pub fn add(&self, p: &G2Point, q: &G2Point) -> G2Point {
        if self.is_infinity(p) {
            return q.clone();
        }
        if self.is_infinity(q) {
            return p.clone();
        }
        let f = &self.fq2;
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
        let i = f.square(&f.double(&h));
        let j = f.mul(&h, &i);
        let r = f.double(&f.sub(&s2, &s1));
        let v = f.mul(&u1, &i);
        let x3 = f.sub(&f.sub(&f.square(&r), &j), &f.double(&v));
        let s1j = f.mul(&s1, &j);
        let y3 = f.sub(&f.mul(&r, &f.sub(&v, &x3)), &f.double(&s1j));
        let z3 = f.mul(
            &f.sub(&f.sub(&f.square(&f.add(&p.z, &q.z)), &z1z1), &z2z2),
            &h,
        );
        G2Point::new(x3, y3, z3)
    }

    /// Left-to-right double-and-add. Variable-time.
    pub fn mul_scalar(&self, p: &G2Point, k: &BigUint) -> G2Point {
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
    pub fn msm(&self, bases: &[G2Point], scalars: &[BigUint]) -> Result<G2Point, PinocchioError> {
        if bases.len() != scalars.len() {
            return Err(PinocchioError::InvalidArgument(
                "msm bases and scalars differ in length",
            ));
        }
        #[cfg(feature = "parallel")]
        {
            let parts: Vec<G2Point> = bases
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

    /// Normalizes to Z = 1 (or the canonical infinity); one Fq² inversion.
    pub fn to_affine(&self, p: &G2Point) -> G2Point {
        if self.is_infinity(p) {
            return self.infinity();
        }
        let z_inv = self
            .fq2
            .inverse(&p.z)
            .expect("nonzero Z coordinate is invertible");
        let z_inv2 = self.fq2.square(&z_inv);
        let z_inv3 = self.fq2.mul(&z_inv2, &z_inv);
        G2Point::new(
            self.fq2.mul(&p.x, &z_inv2),
            self.fq2.mul(&p.y, &z_inv3),
            self.fq2.one(),
        )
    }

    /// Equality of the underlying affine points.
    pub fn eq(&self, p: &G2Point, q: &G2Point) -> bool {
        match (self.is_infinity(p), self.is_infinity(q)) {
            (true, true) => true,
            (true, false) | (false, true) => false,
            (false, false) => self.to_affine(p) == self.to_affine(q),
        }
    }

    /// Whether the normalized point satisfies y² = x³ + b′.
    pub fn is_on_curve(&self, p: &G2Point) -> bool {
        if self.is_infinity(p) {
            return true;
        }
        let a = self.to_affine(p);
        let lhs = self.fq2.square(&a.y);
        let x3 = self.fq2.mul(&self.fq2.square(&a.x), &a.x);
        lhs == self.fq2.add(&x3, &self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::Bn254;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn setup() -> (Bn254, ChaCha20Rng) {
        (Bn254::new().unwrap(), ChaCha20Rng::seed_from_u64(19))
    }

    #[test]
    fn generator_on_curve() {
        let (bn, _) = setup();
        assert!(bn.g2.is_on_curve(&bn.g2.generator()));
    }

    #[test]
    fn scalar_mul_distributes() {
        let (bn, mut rng) = setup();
        let g = bn.g2.generator();
        let a = bn.fr.rand(&mut rng).unwrap();
        let b = bn.fr.rand(&mut rng).unwrap();
        let lhs = bn.g2.mul_scalar(&g, &bn.fr.add(&a, &b));
        let rhs = bn.g2.add(&bn.g2.mul_scalar(&g, &a), &bn.g2.mul_scalar(&g, &b));
        assert!(bn.g2.eq(&lhs, &rhs));
    }

    #[test]
    fn add_inverse_is_infinity() {
        let (bn, mut rng) = setup();
        let p = bn.g2.mul_scalar(&bn.g2.generator(), &bn.fr.rand(&mut rng).unwrap());
        assert!(bn.g2.is_infinity(&bn.g2.add(&p, &bn.g2.neg(&p))));
    }

    #[test]
    fn affine_roundtrip() {
        let (bn, mut rng) = setup();
        let p = bn.g2.mul_scalar(&bn.g2.generator(), &bn.fr.rand(&mut rng).unwrap());
        let a = bn.g2.to_affine(&p);
        assert!(bn.g2.eq(&a, &p));
        assert!(bn.g2.is_on_curve(&p));
    }
}
