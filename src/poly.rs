//! Dense univariate polynomials over Fr.
//!
//! A polynomial is a coefficient vector, index i holding the coefficient
//! of xⁱ; the zero polynomial is the empty vector and the leading
//! coefficient of a nonzero polynomial is never zero (every operation
//! strips trailing zeros). Schoolbook multiplication and long division
//! are deliberate: QAP sizes keep them cheap.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::PinocchioError;
use crate::field::PrimeField;

/// Coefficient vector, little-endian by degree.
pub type Polynomial = Vec<BigUint>;

/// Polynomial arithmetic context over a prime field.
#[derive(Clone, Debug)]
pub struct PolynomialField {
    pub fp: PrimeField,
}

impl PolynomialField {
    pub fn new(fp: PrimeField) -> Self {
        Self { fp }
    }

    /// The zero polynomial.
    pub fn zero(&self) -> Polynomial {
        Vec::new()
    }

    fn normalize(&self, mut p: Polynomial) -> Polynomial {
        while p.last().map_or(false, |c| c.is_zero()) {
            p.pop();
        }
        p
    }

    pub fn add(&self, a: &[BigUint], b: &[BigUint]) -> Polynomial {
        let mut out = vec![BigUint::zero(); a.len().max(b.len())];
        for (i, c) in a.iter().enumerate() {
            out[i] = c.clone();
        }
        for (i, c) in b.iter().enumerate() {
            out[i] = self.fp.add(&out[i], c);
        }
        self.normalize(out)
    }

    pub fn sub(&self, a: &[BigUint], b: &[BigUint]) -> Polynomial {
        let mut out = vec![BigUint::zero(); a.len().max(b.len())];
        for (i, c) in a.iter().enumerate() {
            out[i] = c.clone();
        }
        for (i, c) in b.iter().enumerate() {
            out[i] = self.fp.sub(&out[i], c);
        }
        self.normalize(out)
    }

    /// Schoolbook product, O(n·m).
    pub fn mul(&self, a: &[BigUint], b: &[BigUint]) -> Polynomial {
        if a.is_empty() || b.is_empty() {
            return self.zero();
        }
        let mut out = vec![BigUint::zero(); a.len() + b.len() - 1];
        for (i, x) in a.iter().enumerate() {
            if x.is_zero() {
                continue;
            }
            for (j, y) in b.iter().enumerate() {
                out[i + j] = self.fp.add(&out[i + j], &self.fp.mul(x, y));
            }
        }
        self.normalize(out)
    }

    /// Scales every coefficient by `k`.
    pub fn scalar_mul(&self, a: &[BigUint], k: &BigUint) -> Polynomial {
        self.normalize(a.iter().map(|c| self.fp.mul(c, k)).collect())
    }

    /// Multiplies by the linear factor (x − k).
    pub fn mul_by_linear(&self, a: &[BigUint], k: &BigUint) -> Polynomial {
        self.mul(a, &[self.fp.neg(k), self.fp.one()])
    }

    /// Horner evaluation at `x`.
    pub fn eval(&self, p: &[BigUint], x: &BigUint) -> BigUint {
        let mut acc = BigUint::zero();
        for c in p.iter().rev() {
            acc = self.fp.add(&self.fp.mul(&acc, x), c);
        }
        acc
    }

    /// Long division, returning (quotient, remainder).
    ///
    /// Fails on a zero divisor.
    pub fn div(
        &self,
        a: &[BigUint],
        b: &[BigUint],
    ) -> Result<(Polynomial, Polynomial), PinocchioError> {
        if b.is_empty() {
            return Err(PinocchioError::ArithmeticFailure(
                "polynomial division by zero",
            ));
        }
        if a.len() < b.len() {
            return Ok((self.zero(), self.normalize(a.to_vec())));
        }
        let mut rem: Polynomial = a.to_vec();
        let mut quot = vec![BigUint::zero(); a.len() - b.len() + 1];
        let lead_inv = self.fp.inverse(&b[b.len() - 1])?;
        for i in (0..quot.len()).rev() {
            let c = self.fp.mul(&rem[i + b.len() - 1], &lead_inv);
            if c.is_zero() {
                continue;
            }
            quot[i] = c.clone();
            for (j, y) in b.iter().enumerate() {
                rem[i + j] = self.fp.sub(&rem[i + j], &self.fp.mul(&c, y));
            }
        }
        Ok((self.normalize(quot), self.normalize(rem)))
    }

    /// The exact quotient h = p / z.
    ///
    /// A nonzero remainder means p was not a multiple of z, which in the
    /// QAP setting signals an unsatisfying witness; surfaced as
    /// [`PinocchioError::InvalidArgument`] here and mapped by the prover.
    pub fn divisor_polynomial(
        &self,
        p: &[BigUint],
        z: &[BigUint],
    ) -> Result<Polynomial, PinocchioError> {
        let (quot, rem) = self.div(p, z)?;
        if !rem.is_empty() {
            return Err(PinocchioError::InvalidArgument(
                "polynomial division left a remainder",
            ));
        }
        Ok(quot)
    }

    /// Lagrange interpolation through (xᵢ, yᵢ); the xᵢ must be pairwise
    /// distinct.
    pub fn lagrange_interpolation(
        &self,
        xs: &[BigUint],
        ys: &[BigUint],
    ) -> Result<Polynomial, PinocchioError> {
        if xs.len() != ys.len() {
            return Err(PinocchioError::InvalidArgument(
                "interpolation point lists differ in length",
            ));
        }
        let mut acc = self.zero();
        for (i, (xi, yi)) in xs.iter().zip(ys).enumerate() {
            if yi.is_zero() {
                continue;
            }
            let mut basis: Polynomial = vec![self.fp.one()];
            let mut denom = self.fp.one();
            for (j, xj) in xs.iter().enumerate() {
                if i == j {
                    continue;
                }
                basis = self.mul_by_linear(&basis, xj);
                denom = self.fp.mul(&denom, &self.fp.sub(xi, xj));
            }
            let scale = self.fp.mul(yi, &self.fp.inverse(&denom)?);
            acc = self.add(&acc, &self.scalar_mul(&basis, &scale));
        }
        Ok(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::Bn254;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn setup() -> (PolynomialField, ChaCha20Rng) {
        (
            PolynomialField::new(Bn254::new().unwrap().fr),
            ChaCha20Rng::seed_from_u64(29),
        )
    }

    fn rand_poly(pf: &PolynomialField, rng: &mut ChaCha20Rng, deg: usize) -> Polynomial {
        let mut p: Polynomial = (0..=deg).map(|_| pf.fp.rand(rng).unwrap()).collect();
        if p.last().map_or(false, |c| c.is_zero()) {
            let last = p.len() - 1;
            p[last] = pf.fp.one();
        }
        p
    }

    #[test]
    fn product_divides_exactly() {
        let (pf, mut rng) = setup();
        let p = rand_poly(&pf, &mut rng, 7);
        let q = rand_poly(&pf, &mut rng, 3);
        let prod = pf.mul(&p, &q);
        let (quot, rem) = pf.div(&prod, &q).unwrap();
        assert_eq!(quot, p);
        assert!(rem.is_empty());
        assert_eq!(pf.divisor_polynomial(&prod, &q).unwrap(), p);
    }

    #[test]
    fn division_with_remainder() {
        let (pf, mut rng) = setup();
        let p = rand_poly(&pf, &mut rng, 6);
        let q = rand_poly(&pf, &mut rng, 2);
        let (quot, rem) = pf.div(&p, &q).unwrap();
        assert!(rem.len() < q.len());
        let recomposed = pf.add(&pf.mul(&quot, &q), &rem);
        assert_eq!(recomposed, p);
        assert!(pf.div(&p, &pf.zero()).is_err());
    }

    #[test]
    fn remainder_is_surfaced() {
        let (pf, _) = setup();
        // x² + 1 is not a multiple of x + 1 over Fr.
        let p = vec![pf.fp.one(), pf.fp.zero(), pf.fp.one()];
        let z = vec![pf.fp.one(), pf.fp.one()];
        assert!(matches!(
            pf.divisor_polynomial(&p, &z),
            Err(PinocchioError::InvalidArgument(_))
        ));
    }

    #[test]
    fn lagrange_reproduces_points() {
        let (pf, mut rng) = setup();
        let xs: Vec<BigUint> = (1u64..=6).map(BigUint::from).collect();
        let ys: Vec<BigUint> = (0..6).map(|_| pf.fp.rand(&mut rng).unwrap()).collect();
        let p = pf.lagrange_interpolation(&xs, &ys).unwrap();
        assert!(p.len() <= xs.len());
        for (x, y) in xs.iter().zip(&ys) {
            assert_eq!(pf.eval(&p, x), *y);
        }
    }

    #[test]
    fn eval_by_horner() {
        let (pf, _) = setup();
        // 3 + 2x + x², at x = 5 → 38.
        let p = vec![pf.fp.element(3), pf.fp.element(2), pf.fp.one()];
        assert_eq!(pf.eval(&p, &pf.fp.element(5)), pf.fp.element(38));
        assert_eq!(pf.eval(&pf.zero(), &pf.fp.element(5)), pf.fp.zero());
    }

    #[test]
    fn normalization_strips_trailing_zeros() {
        let (pf, _) = setup();
        let a = vec![pf.fp.one(), pf.fp.one()];
        let b = vec![pf.fp.zero(), pf.fp.one()];
        let diff = pf.sub(&a, &b);
        assert_eq!(diff, vec![pf.fp.one()]);
        let zero = pf.sub(&a, &a);
        assert!(zero.is_empty());
    }
}
