//! Cubic extension Fq⁶ = Fq²[v] / (v³ − ξ), with ξ = 9 + u for BN254.

use num_bigint::BigUint;
use num_traits::{One, Pow};

use super::fq2::{Fq2, Fq2Elem};
use crate::error::PinocchioError;

/// An element a + b·v + c·v².
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fq6Elem {
    pub c0: Fq2Elem,
    pub c1: Fq2Elem,
    pub c2: Fq2Elem,
}

impl Fq6Elem {
    pub fn new(c0: Fq2Elem, c1: Fq2Elem, c2: Fq2Elem) -> Self {
        Self { c0, c1, c2 }
    }
}

/// The Fq⁶ arithmetic context.
///
/// Holds the cubic non-residue ξ and the Frobenius constants
/// ξ^((q^p−1)/3) and ξ^(2(q^p−1)/3) for p = 1..3, which are derived from
/// the modulus at construction time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fq6 {
    pub fq2: Fq2,
    non_residue: Fq2Elem,
    frobenius_c1: [Fq2Elem; 3],
    frobenius_c2: [Fq2Elem; 3],
}

impl Fq6 {
    /// Builds the context over `fq2` with v³ = `non_residue`.
    ///
    /// Fails if 3 does not divide q^p − 1, which cannot happen for a
    /// pairing-friendly modulus.
    pub fn new(fq2: Fq2, non_residue: Fq2Elem) -> Result<Self, PinocchioError> {
        let q = fq2.fp.modulus().clone();
        let three = BigUint::from(3u32);
        let mut c1 = Vec::with_capacity(3);
        let mut c2 = Vec::with_capacity(3);
        for power in 1u32..=3 {
            let qp = Pow::pow(&q, power) - BigUint::one();
            if (&qp % &three) != BigUint::from(0u32) {
                return Err(PinocchioError::ArithmeticFailure(
                    "modulus does not support a cubic twist",
                ));
            }
            let e1 = fq2.exp(&non_residue, &(&qp / &three));
            let e2 = fq2.square(&e1);
            c1.push(e1);
            c2.push(e2);
        }
        Ok(Self {
            fq2,
            non_residue,
            frobenius_c1: [c1[0].clone(), c1[1].clone(), c1[2].clone()],
            frobenius_c2: [c2[0].clone(), c2[1].clone(), c2[2].clone()],
        })
    }

    /// The cubic non-residue ξ.
    pub fn non_residue(&self) -> &Fq2Elem {
        &self.non_residue
    }

    pub fn zero(&self) -> Fq6Elem {
        Fq6Elem::new(self.fq2.zero(), self.fq2.zero(), self.fq2.zero())
    }

    pub fn one(&self) -> Fq6Elem {
        Fq6Elem::new(self.fq2.one(), self.fq2.zero(), self.fq2.zero())
    }

    pub fn add(&self, a: &Fq6Elem, b: &Fq6Elem) -> Fq6Elem {
        Fq6Elem::new(
            self.fq2.add(&a.c0, &b.c0),
            self.fq2.add(&a.c1, &b.c1),
            self.fq2.add(&a.c2, &b.c2),
        )
    }

    pub fn sub(&self, a: &Fq6Elem, b: &Fq6Elem) -> Fq6Elem {
        Fq6Elem::new(
            self.fq2.sub(&a.c0, &b.c0),
            self.fq2.sub(&a.c1, &b.c1),
            self.fq2.sub(&a.c2, &b.c2),
        )
    }

    pub fn neg(&self, a: &Fq6Elem) -> Fq6Elem {
        Fq6Elem::new(
            self.fq2.neg(&a.c0),
            self.fq2.neg(&a.c1),
            self.fq2.neg(&a.c2),
        )
    }

    /// Multiplies an Fq² coordinate by ξ.
    pub fn mul_fq2_by_nonresidue(&self, a: &Fq2Elem) -> Fq2Elem {
        self.fq2.mul(a, &self.non_residue)
    }

    /// Toom-Cook-style interpolation multiplication (six Fq² products).
    pub fn mul(&self, a: &Fq6Elem, b: &Fq6Elem) -> Fq6Elem {
        let f = &self.fq2;
        let ad = f.mul(&a.c0, &b.c0);
        let be = f.mul(&a.c1, &b.c1);
        let cf = f.mul(&a.c2, &b.c2);

        let x = f.sub(
            &f.sub(
                &f.mul(&f.add(&a.c1, &a.c2), &f.add(&b.c1, &b.c2)),
                &be,
            ),
            &cf,
        );
        let y = f.sub(
            &f.sub(
                &f.mul(&f.add(&a.c0, &a.c1), &f.add(&b.c0, &b.c1)),
                &ad,
            ),
            &be,
        );
        let z = f.sub(
            &f.add(
                &f.sub(
                    &f.mul(&f.add(&a.c0, &a.c2), &f.add(&b.c0, &b.c2)),
                    &ad,
                ),
                &be,
            ),
            &cf,
        );

        Fq6Elem::new(
            f.add(&ad, &self.mul_fq2_by_nonresidue(&x)),
            f.add(&y, &self.mul_fq2_by_nonresidue(&cf)),
            z,
        )
    }

    /// CH-SQR2 squaring from Devegili et al.
    pub fn square(&self, a: &Fq6Elem) -> Fq6Elem {
        let f = &self.fq2;
        let s0 = f.square(&a.c0);
        let ab = f.mul(&a.c0, &a.c1);
        let s1 = f.add(&ab, &ab);
        let s2 = f.square(&f.add(&f.sub(&a.c0, &a.c1), &a.c2));
        let bc = f.mul(&a.c1, &a.c2);
        let s3 = f.add(&bc, &bc);
        let s4 = f.square(&a.c2);

        Fq6Elem::new(
            f.add(&s0, &self.mul_fq2_by_nonresidue(&s3)),
            f.add(&s1, &self.mul_fq2_by_nonresidue(&s4)),
            f.sub(&f.sub(&f.add(&f.add(&s1, &s2), &s3), &s0), &s4),
        )
    }

    /// Multiplies by the sparse element c0 + c1·v.
    pub fn mul_by_01(&self, a: &Fq6Elem, c0: &Fq2Elem, c1: &Fq2Elem) -> Fq6Elem {
        let f = &self.fq2;
        let a_a = f.mul(&a.c0, c0);
        let b_b = f.mul(&a.c1, c1);

        let t1 = f.add(
            &self.mul_fq2_by_nonresidue(&f.sub(
                &f.mul(c1, &f.add(&a.c1, &a.c2)),
                &b_b,
            )),
            &a_a,
        );
        let t3 = f.add(
            &f.sub(&f.mul(c0, &f.add(&a.c0, &a.c2)), &a_a),
            &b_b,
        );
        let t2 = f.sub(
            &f.sub(
                &f.mul(&f.add(c0, c1), &f.add(&a.c0, &a.c1)),
                &a_a,
            ),
            &b_b,
        );
        Fq6Elem::new(t1, t2, t3)
    }

    /// Multiplies every coordinate by an Fq² scalar.
    pub fn mul_by_fq2(&self, a: &Fq6Elem, c: &Fq2Elem) -> Fq6Elem {
        Fq6Elem::new(
            self.fq2.mul(&a.c0, c),
            self.fq2.mul(&a.c1, c),
            self.fq2.mul(&a.c2, c),
        )
    }

    /// Multiplication by v: (a, b, c) ↦ (ξ·c, a, b).
    pub fn mul_by_v(&self, a: &Fq6Elem) -> Fq6Elem {
        Fq6Elem::new(
            self.mul_fq2_by_nonresidue(&a.c2),
            a.c0.clone(),
            a.c1.clone(),
        )
    }

    /// The Frobenius endomorphism for powers 1..3.
    pub fn frobenius_map(&self, a: &Fq6Elem, power: usize) -> Fq6Elem {
        debug_assert!((1..=3).contains(&power));
        let c0 = self.fq2.frobenius_map(&a.c0, power);
        let c1 = self.fq2.frobenius_map(&a.c1, power);
        let c2 = self.fq2.frobenius_map(&a.c2, power);
        Fq6Elem::new(
            c0,
            self.fq2.mul(&c1, &self.frobenius_c1[power - 1]),
            self.fq2.mul(&c2, &self.frobenius_c2[power - 1]),
        )
    }

    /// Inverse by the standard cubic-extension formulas.
    pub fn inverse(&self, a: &Fq6Elem) -> Result<Fq6Elem, PinocchioError> {
        let f = &self.fq2;
        let t0 = f.sub(
            &f.square(&a.c0),
            &self.mul_fq2_by_nonresidue(&f.mul(&a.c1, &a.c2)),
        );
        let t1 = f.sub(
            &self.mul_fq2_by_nonresidue(&f.square(&a.c2)),
            &f.mul(&a.c0, &a.c1),
        );
        let t2 = f.sub(&f.square(&a.c1), &f.mul(&a.c0, &a.c2));
        let norm = f.add(
            &f.add(
                &f.mul(&a.c0, &t0),
                &self.mul_fq2_by_nonresidue(&f.mul(&a.c2, &t1)),
            ),
            &self.mul_fq2_by_nonresidue(&f.mul(&a.c1, &t2)),
        );
        let norm_inv = f.inverse(&norm)?;
        Ok(Fq6Elem::new(
            f.mul(&t0, &norm_inv),
            f.mul(&t1, &norm_inv),
            f.mul(&t2, &norm_inv),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::Bn254;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn setup() -> (Fq6, ChaCha20Rng) {
        (Bn254::new().unwrap().fq6, ChaCha20Rng::seed_from_u64(11))
    }

    fn rand_elem(f: &Fq6, rng: &mut ChaCha20Rng) -> Fq6Elem {
        let fp = &f.fq2.fp;
        Fq6Elem::new(
            Fq2Elem::new(fp.rand(rng).unwrap(), fp.rand(rng).unwrap()),
            Fq2Elem::new(fp.rand(rng).unwrap(), fp.rand(rng).unwrap()),
            Fq2Elem::new(fp.rand(rng).unwrap(), fp.rand(rng).unwrap()),
        )
    }

    #[test]
    fn square_matches_mul() {
        let (f, mut rng) = setup();
        for _ in 0..5 {
            let a = rand_elem(&f, &mut rng);
            assert_eq!(f.square(&a), f.mul(&a, &a));
        }
    }

    #[test]
    fn inverse_roundtrip() {
        let (f, mut rng) = setup();
        let a = rand_elem(&f, &mut rng);
        assert_eq!(f.mul(&a, &f.inverse(&a).unwrap()), f.one());
    }

    #[test]
    fn sparse_mul_matches_full() {
        let (f, mut rng) = setup();
        let a = rand_elem(&f, &mut rng);
        let b = rand_elem(&f, &mut rng);
        let sparse = Fq6Elem::new(b.c0.clone(), b.c1.clone(), f.fq2.zero());
        assert_eq!(f.mul_by_01(&a, &b.c0, &b.c1), f.mul(&a, &sparse));
    }

    #[test]
    fn mul_by_v_is_shift() {
        let (f, mut rng) = setup();
        let a = rand_elem(&f, &mut rng);
        let v = Fq6Elem::new(f.fq2.zero(), f.fq2.one(), f.fq2.zero());
        assert_eq!(f.mul_by_v(&a), f.mul(&a, &v));
    }

    #[test]
    fn frobenius_composes() {
        let (f, mut rng) = setup();
        let a = rand_elem(&f, &mut rng);
        let twice = f.frobenius_map(&f.frobenius_map(&a, 1), 1);
        assert_eq!(twice, f.frobenius_map(&a, 2));
    }
}
