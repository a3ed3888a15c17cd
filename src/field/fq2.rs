//! Quadratic extension Fq² = Fq[u] / (u² − β).
//!
//! For BN254 the non-residue is β = −1, but the context keeps β explicit
//! so the tower stays parameterized.

use num_bigint::BigUint;
use num_traits::Zero;
use serde::de::Error as _;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::PrimeField;
use crate::error::PinocchioError;

/// An element a + b·u, both coordinates reduced in the base field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fq2Elem {
    pub c0: BigUint,
    pub c1: BigUint,
}

impl Fq2Elem {
    /// Builds an element from already-reduced coordinates.
    pub fn new(c0: BigUint, c1: BigUint) -> Self {
        Self { c0, c1 }
    }
}

// Persisted as a pair of decimal strings, matching the on-disk convention
// for all field coordinates.
impl Serialize for Fq2Elem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.c0.to_str_radix(10))?;
        tuple.serialize_element(&self.c1.to_str_radix(10))?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Fq2Elem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [c0, c1] = <[String; 2]>::deserialize(deserializer)?;
        let parse = |s: &str| {
            BigUint::parse_bytes(s.as_bytes(), 10)
                .ok_or_else(|| D::Error::custom("coordinate is not a decimal integer"))
        };
        Ok(Self::new(parse(&c0)?, parse(&c1)?))
    }
}

/// The Fq² arithmetic context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fq2 {
    pub fp: PrimeField,
    non_residue: BigUint,
}

impl Fq2 {
    /// Builds the context over `fp` with u² = `non_residue`.
    pub fn new(fp: PrimeField, non_residue: BigUint) -> Self {
        Self { fp, non_residue }
    }

    pub fn zero(&self) -> Fq2Elem {
        Fq2Elem::new(BigUint::zero(), BigUint::zero())
    }

    pub fn one(&self) -> Fq2Elem {
        Fq2Elem::new(self.fp.one(), BigUint::zero())
    }

    pub fn is_zero(&self, a: &Fq2Elem) -> bool {
        a.c0.is_zero() && a.c1.is_zero()
    }

    pub fn add(&self, a: &Fq2Elem, b: &Fq2Elem) -> Fq2Elem {
        Fq2Elem::new(self.fp.add(&a.c0, &b.c0), self.fp.add(&a.c1, &b.c1))
    }

    pub fn double(&self, a: &Fq2Elem) -> Fq2Elem {
        self.add(a, a)
    }

    pub fn sub(&self, a: &Fq2Elem, b: &Fq2Elem) -> Fq2Elem {
        Fq2Elem::new(self.fp.sub(&a.c0, &b.c0), self.fp.sub(&a.c1, &b.c1))
    }

    pub fn neg(&self, a: &Fq2Elem) -> Fq2Elem {
        Fq2Elem::new(self.fp.neg(&a.c0), self.fp.neg(&a.c1))
    }

    /// Karatsuba multiplication: three base-field products.
    pub fn mul(&self, a: &Fq2Elem, b: &Fq2Elem) -> Fq2Elem {
        let v0 = self.fp.mul(&a.c0, &b.c0);
        let v1 = self.fp.mul(&a.c1, &b.c1);
        let sum = self.fp.mul(
            &self.fp.add(&a.c0, &a.c1),
            &self.fp.add(&b.c0, &b.c1),
        );
        let c0 = self.fp.add(&v0, &self.fp.mul(&self.non_residue, &v1));
        let c1 = self.fp.sub(&self.fp.sub(&sum, &v0), &v1);
        Fq2Elem::new(c0, c1)
    }

    pub fn square(&self, a: &Fq2Elem) -> Fq2Elem {
        let v0 = self.fp.square(&a.c0);
        let v1 = self.fp.square(&a.c1);
        let c0 = self.fp.add(&v0, &self.fp.mul(&self.non_residue, &v1));
        let cross = self.fp.mul(&a.c0, &a.c1);
        Fq2Elem::new(c0, self.fp.add(&cross, &cross))
    }

    /// Multiplies by a base-field scalar.
    pub fn mul_by_fp(&self, a: &Fq2Elem, b: &BigUint) -> Fq2Elem {
        Fq2Elem::new(self.fp.mul(&a.c0, b), self.fp.mul(&a.c1, b))
    }

    /// Conjugation a + b·u ↦ a − b·u.
    pub fn conjugate(&self, a: &Fq2Elem) -> Fq2Elem {
        Fq2Elem::new(a.c0.clone(), self.fp.neg(&a.c1))
    }

    /// The Frobenius endomorphism x ↦ x^(q^power).
    ///
    /// Since q ≡ 3 (mod 4), odd powers act as conjugation and even powers
    /// as the identity.
    pub fn frobenius_map(&self, a: &Fq2Elem, power: usize) -> Fq2Elem {
        if power % 2 == 0 {
            a.clone()
        } else {
            self.conjugate(a)
        }
    }

    /// Inverse via the norm: (a + bu)⁻¹ = (a − bu) / (a² − β·b²).
    pub fn inverse(&self, a: &Fq2Elem) -> Result<Fq2Elem, PinocchioError> {
        let norm = self.fp.sub(
            &self.fp.square(&a.c0),
            &self.fp.mul(&self.non_residue, &self.fp.square(&a.c1)),
        );
        let norm_inv = self.fp.inverse(&norm)?;
        Ok(Fq2Elem::new(
            self.fp.mul(&a.c0, &norm_inv),
            self.fp.neg(&self.fp.mul(&a.c1, &norm_inv)),
        ))
    }

    /// Square-and-multiply exponentiation by a big-integer exponent.
    pub fn exp(&self, a: &Fq2Elem, e: &BigUint) -> Fq2Elem {
        let mut res = self.one();
        for i in (0..e.bits()).rev() {
            res = self.square(&res);
            if e.bit(i) {
                res = self.mul(&res, a);
            }
        }
        res
    }
}
