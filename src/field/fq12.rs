//! Quadratic extension Fq¹² = Fq⁶[w] / (w² − v), the pairing target field.
//!
//! Besides plain tower arithmetic this module carries the operations the
//! final exponentiation relies on: conjugation (which inverts unitary
//! elements), Granger–Scott cyclotomic squaring, and the Frobenius maps
//! π, π², π³.

use num_bigint::BigUint;
use num_traits::{One, Pow, Zero};

use super::fq2::Fq2Elem;
use super::fq6::{Fq6, Fq6Elem};
use crate::error::PinocchioError;

/// An element a + b·w.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fq12Elem {
    pub c0: Fq6Elem,
    pub c1: Fq6Elem,
}

impl Fq12Elem {
    pub fn new(c0: Fq6Elem, c1: Fq6Elem) -> Self {
        Self { c0, c1 }
    }
}

/// The Fq¹² arithmetic context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fq12 {
    pub fq6: Fq6,
    frobenius_c1: [Fq2Elem; 3],
}

impl Fq12 {
    /// Builds the context over `fq6`, deriving the Frobenius constants
    /// ξ^((q^p−1)/6) for p = 1..3 from the modulus.
    pub fn new(fq6: Fq6) -> Result<Self, PinocchioError> {
        let q = fq6.fq2.fp.modulus().clone();
        let six = BigUint::from(6u32);
        let mut c1 = Vec::with_capacity(3);
        for power in 1u32..=3 {
            let qp = Pow::pow(&q, power) - BigUint::one();
            if !(&qp % &six).is_zero() {
                return Err(PinocchioError::ArithmeticFailure(
                    "modulus does not support a sextic twist",
                ));
            }
            c1.push(fq6.fq2.exp(fq6.non_residue(), &(&qp / &six)));
        }
        Ok(Self {
            fq6,
            frobenius_c1: [c1[0].clone(), c1[1].clone(), c1[2].clone()],
        })
    }

    pub fn one(&self) -> Fq12Elem {
        Fq12Elem::new(self.fq6.one(), self.fq6.zero())
    }

    pub fn is_one(&self, a: &Fq12Elem) -> bool {
        *a == self.one()
    }

    pub fn mul(&self, a: &Fq12Elem, b: &Fq12Elem) -> Fq12Elem {
        let v0 = self.fq6.mul(&a.c0, &b.c0);
        let v1 = self.fq6.mul(&a.c1, &b.c1);
        let sum = self.fq6.mul(
            &self.fq6.add(&a.c0, &a.c1),
            &self.fq6.add(&b.c0, &b.c1),
        );
        Fq12Elem::new(
            self.fq6.add(&v0, &self.fq6.mul_by_v(&v1)),
            self.fq6.sub(&self.fq6.sub(&sum, &v0), &v1),
        )
    }

    pub fn square(&self, a: &Fq12Elem) -> Fq12Elem {
        let t0 = self.fq6.square(&a.c0);
        let t1 = self.fq6.square(&a.c1);
        let sum = self.fq6.square(&self.fq6.add(&a.c0, &a.c1));
        Fq12Elem::new(
            self.fq6.add(&t0, &self.fq6.mul_by_v(&t1)),
            self.fq6.sub(&self.fq6.sub(&sum, &t0), &t1),
        )
    }

    /// Conjugation a + b·w ↦ a − b·w; inverts elements of norm one.
    pub fn conjugate(&self, a: &Fq12Elem) -> Fq12Elem {
        Fq12Elem::new(a.c0.clone(), self.fq6.neg(&a.c1))
    }

    pub fn inverse(&self, a: &Fq12Elem) -> Result<Fq12Elem, PinocchioError> {
        let norm = self.fq6.sub(
            &self.fq6.square(&a.c0),
            &self.fq6.mul_by_v(&self.fq6.square(&a.c1)),
        );
        let norm_inv = self.fq6.inverse(&norm)?;
        Ok(Fq12Elem::new(
            self.fq6.mul(&a.c0, &norm_inv),
            self.fq6.neg(&self.fq6.mul(&a.c1, &norm_inv)),
        ))
    }

    /// The Frobenius endomorphism for powers 1..3.
    pub fn frobenius_map(&self, a: &Fq12Elem, power: usize) -> Fq12Elem {
        debug_assert!((1..=3).contains(&power));
        let c0 = self.fq6.frobenius_map(&a.c0, power);
        let c1 = self.fq6.frobenius_map(&a.c1, power);
        Fq12Elem::new(
            c0,
            self.fq6.mul_by_fq2(&c1, &self.frobenius_c1[power - 1]),
        )
    }

    /// Square-and-multiply exponentiation by a big-integer exponent.
    pub fn exp(&self, a: &Fq12Elem, e: &BigUint) -> Fq12Elem {
        let mut res = self.one();
        for i in (0..e.bits()).rev() {
            res = self.square(&res);
            if e.bit(i) {
                res = self.mul(&res, a);
            }
        }
        res
    }

    /// Sparse multiplication by c0 + (c3 + c4·v)·w, the shape produced by
    /// the Miller loop line evaluations on a D-type twist.
    pub fn mul_by_034(&self, f: &Fq12Elem, c0: &Fq2Elem, c3: &Fq2Elem, c4: &Fq2Elem) -> Fq12Elem {
        let a = Fq6Elem::new(
            self.fq6.fq2.mul(&f.c0.c0, c0),
            self.fq6.fq2.mul(&f.c0.c1, c0),
            self.fq6.fq2.mul(&f.c0.c2, c0),
        );
        let b = self.fq6.mul_by_01(&f.c1, c3, c4);
        let e = self.fq6.mul_by_01(
            &self.fq6.add(&f.c0, &f.c1),
            &self.fq6.fq2.add(c0, c3),
            c4,
        );
        Fq12Elem::new(
            self.fq6.add(&self.fq6.mul_by_v(&b), &a),
            self.fq6.sub(&e, &self.fq6.add(&a, &b)),
        )
    }

    /// Granger–Scott squaring, valid for unitary elements (those fixed by
    /// conjugate-inverse, as produced by the easy part of the final
    /// exponentiation).
    pub fn cyclotomic_square(&self, f: &Fq12Elem) -> Fq12Elem {
        let fq2 = &self.fq6.fq2;
        let r0 = &f.c0.c0;
        let r4 = &f.c0.c1;
        let r3 = &f.c0.c2;
        let r2 = &f.c1.c0;
        let r1 = &f.c1.c1;
        let r5 = &f.c1.c2;

        // One Fq⁴ squaring per coordinate pair.
        let sq = |a: &Fq2Elem, b: &Fq2Elem| -> (Fq2Elem, Fq2Elem) {
            let t0 = fq2.mul(a, b);
            let t1 = fq2.sub(
                &fq2.sub(
                    &fq2.mul(
                        &fq2.add(a, b),
                        &fq2.add(&self.fq6.mul_fq2_by_nonresidue(b), a),
                    ),
                    &t0,
                ),
                &self.fq6.mul_fq2_by_nonresidue(&t0),
            );
            (t1, fq2.double(&t0))
        };
        let (t0, t1) = sq(r0, r1);
        let (t2, t3) = sq(r2, r3);
        let (t4, t5) = sq(r4, r5);

        let z0 = {
            let d = fq2.sub(&t0, r0);
            fq2.add(&fq2.double(&d), &t0)
        };
        let z1 = {
            let d = fq2.add(&t1, r1);
            fq2.add(&fq2.double(&d), &t1)
        };
        let z2 = {
            let tmp = self.fq6.mul_fq2_by_nonresidue(&t5);
            let d = fq2.add(r2, &tmp);
            fq2.add(&fq2.double(&d), &tmp)
        };
        let z3 = {
            let d = fq2.sub(&t4, r3);
            fq2.add(&fq2.double(&d), &t4)
        };
        let z4 = {
            let d = fq2.sub(&t2, r4);
            fq2.add(&fq2.double(&d), &t2)
        };
        let z5 = {
            let d = fq2.add(&t3, r5);
            fq2.add(&fq2.double(&d), &t3)
        };

        Fq12Elem::new(Fq6Elem::new(z0, z4, z3), Fq6Elem::new(z2, z1, z5))
    }

    /// Exponentiation by a machine-word exponent using cyclotomic squaring;
    /// the base must be unitary.
    pub fn cyclotomic_exp(&self, a: &Fq12Elem, mut e: u64) -> Fq12Elem {
        let mut res = self.one();
        let mut base = a.clone();
        while e > 0 {
            if e & 1 == 1 {
                res = self.mul(&res, &base);
            }
            base = self.cyclotomic_square(&base);
            e >>= 1;
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::Bn254;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn setup() -> (Fq12, ChaCha20Rng) {
        (Bn254::new().unwrap().fq12, ChaCha20Rng::seed_from_u64(13))
    }

    fn rand_elem(f: &Fq12, rng: &mut ChaCha20Rng) -> Fq12Elem {
        let fp = &f.fq6.fq2.fp;
        let mut fq2 = || Fq2Elem::new(fp.rand(rng).unwrap(), fp.rand(rng).unwrap());
        let c0 = Fq6Elem::new(fq2(), fq2(), fq2());
        let c1 = Fq6Elem::new(fq2(), fq2(), fq2());
        Fq12Elem::new(c0, c1)
    }

    /// Maps an arbitrary nonzero element into the cyclotomic subgroup by
    /// applying the easy part of the final exponentiation.
    fn unitary(f: &Fq12, a: &Fq12Elem) -> Fq12Elem {
        let u = f.mul(&f.conjugate(a), &f.inverse(a).unwrap());
        f.mul(&f.frobenius_map(&u, 2), &u)
    }

    #[test]
    fn inverse_roundtrip() {
        let (f, mut rng) = setup();
        let a = rand_elem(&f, &mut rng);
        assert_eq!(f.mul(&a, &f.inverse(&a).unwrap()), f.one());
    }

    #[test]
    fn square_matches_mul() {
        let (f, mut rng) = setup();
        let a = rand_elem(&f, &mut rng);
        assert_eq!(f.square(&a), f.mul(&a, &a));
    }

    #[test]
    fn frobenius_composes() {
        let (f, mut rng) = setup();
        let a = rand_elem(&f, &mut rng);
        let twice = f.frobenius_map(&f.frobenius_map(&a, 1), 1);
        assert_eq!(twice, f.frobenius_map(&a, 2));
        let thrice = f.frobenius_map(&f.frobenius_map(&a, 2), 1);
        assert_eq!(thrice, f.frobenius_map(&a, 3));
    }

    #[test]
    fn sparse_mul_matches_full() {
        let (f, mut rng) = setup();
        let a = rand_elem(&f, &mut rng);
        let b = rand_elem(&f, &mut rng);
        let c0 = b.c0.c0.clone();
        let c3 = b.c1.c0.clone();
        let c4 = b.c1.c1.clone();
        let sparse = Fq12Elem::new(
            Fq6Elem::new(c0.clone(), f.fq6.fq2.zero(), f.fq6.fq2.zero()),
            Fq6Elem::new(c3.clone(), c4.clone(), f.fq6.fq2.zero()),
        );
        assert_eq!(f.mul_by_034(&a, &c0, &c3, &c4), f.mul(&a, &sparse));
    }

    #[test]
    fn cyclotomic_square_on_unitary_elements() {
        let (f, mut rng) = setup();
        let a = unitary(&f, &rand_elem(&f, &mut rng));
        assert_eq!(f.cyclotomic_square(&a), f.square(&a));
        assert_eq!(f.conjugate(&a), f.inverse(&a).unwrap());
        assert_eq!(f.cyclotomic_exp(&a, 7), f.exp(&a, &BigUint::from(7u32)));
    }
}
