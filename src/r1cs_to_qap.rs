//! Reduction of an R1CS instance to a Quadratic Arithmetic Program.
//!
//! Each matrix column j is interpolated through the points (i, M[i-1][j])
//! for i = 1..m, yielding one polynomial of degree < m per signal; the
//! target polynomial Z(x) = ∏_{i=1..m}(x − i) vanishes on every
//! evaluation point, so a witness satisfies the R1CS exactly when Z
//! divides p(x) = A(x)·B(x) − C(x).

use num_bigint::BigUint;

use crate::circuit::R1cs;
use crate::error::PinocchioError;
use crate::poly::{Polynomial, PolynomialField};

/// The QAP instance: one polynomial triple per signal plus the target
/// polynomial.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Qap {
    pub alphas: Vec<Polynomial>,
    pub betas: Vec<Polynomial>,
    pub gammas: Vec<Polynomial>,
    pub z: Polynomial,
}

impl Qap {
    /// Number of signal slots covered by the instance.
    pub fn num_signals(&self) -> usize {
        self.alphas.len()
    }

    /// Degree of the target polynomial, i.e. the constraint count.
    pub fn degree(&self) -> usize {
        self.z.len().saturating_sub(1)
    }
}

/// Reduces the constraint matrices to a QAP.
pub fn r1cs_to_qap(pf: &PolynomialField, r1cs: &R1cs) -> Result<Qap, PinocchioError> {
    let (m, n) = r1cs.shape()?;
    let xs: Vec<BigUint> = (1..=m as u64).map(|i| pf.fp.element(i)).collect();

    let interpolate_columns =
        |matrix: &Vec<Vec<BigUint>>| -> Result<Vec<Polynomial>, PinocchioError> {
            (0..n)
                .map(|j| {
                    let column: Vec<BigUint> = matrix.iter().map(|row| row[j].clone()).collect();
                    let poly = pf.lagrange_interpolation(&xs, &column)?;
                    debug_assert!(poly.len() <= m);
                    Ok(poly)
                })
                .collect()
        };

    let alphas = interpolate_columns(&r1cs.a)?;
    let betas = interpolate_columns(&r1cs.b)?;
    let gammas = interpolate_columns(&r1cs.c)?;

    let mut z: Polynomial = vec![pf.fp.one()];
    for x in &xs {
        z = pf.mul_by_linear(&z, x);
    }

    Ok(Qap {
        alphas,
        betas,
        gammas,
        z,
    })
}

/// Combines a witness with the QAP polynomials:
/// A(x) = Σ wⱼαⱼ(x), likewise B and C, and p(x) = A(x)·B(x) − C(x).
///
/// Returns (A, B, C, p). If the witness satisfies the R1CS, Z divides p
/// and the quotient has degree < m − 1.
pub fn combine_polynomials(
    pf: &PolynomialField,
    witness: &[BigUint],
    qap: &Qap,
) -> Result<(Polynomial, Polynomial, Polynomial, Polynomial), PinocchioError> {
    if witness.len() != qap.num_signals() {
        return Err(PinocchioError::InvalidArgument(
            "witness length does not match the QAP",
        ));
    }
    let mut ax = pf.zero();
    let mut bx = pf.zero();
    let mut cx = pf.zero();
    for (((w, alpha), beta), gamma) in witness
        .iter()
        .zip(&qap.alphas)
        .zip(&qap.betas)
        .zip(&qap.gammas)
    {
        ax = pf.add(&ax, &pf.scalar_mul(alpha, w));
        bx = pf.add(&bx, &pf.scalar_mul(beta, w));
        cx = pf.add(&cx, &pf.scalar_mul(gamma, w));
    }
    let px = pf.sub(&pf.mul(&ax, &bx), &cx);
    Ok((ax, bx, cx, px))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Circuit;
    use crate::field::PrimeField;
    use crate::pairing::Bn254;
    use num_traits::Zero;

    // out = in³ with signals (one, out, in, sq).
    fn cubing_circuit(fr: &PrimeField) -> (Circuit, Vec<BigUint>) {
        let zero = fr.zero();
        let one = fr.one();
        let row = |idx: usize| {
            let mut v = vec![zero.clone(); 4];
            v[idx] = one.clone();
            v
        };
        let r1cs = R1cs {
            a: vec![row(2), row(3)],
            b: vec![row(2), row(2)],
            c: vec![row(3), row(1)],
        };
        let circuit = Circuit {
            n_signals: 4,
            n_public: 1,
            n_vars: 4,
            r1cs,
        };
        let witness = vec![fr.one(), fr.element(27), fr.element(3), fr.element(9)];
        (circuit, witness)
    }

    #[test]
    fn satisfying_witness_divides() {
        let bn = Bn254::new().unwrap();
        let pf = PolynomialField::new(bn.fr.clone());
        let (circuit, witness) = cubing_circuit(&bn.fr);
        assert!(circuit.is_satisfied(&bn.fr, &witness).unwrap());

        let qap = r1cs_to_qap(&pf, &circuit.r1cs).unwrap();
        assert_eq!(qap.num_signals(), 4);
        assert_eq!(qap.degree(), 2);

        let (_, _, _, px) = combine_polynomials(&pf, &witness, &qap).unwrap();
        let h = pf.divisor_polynomial(&px, &qap.z).unwrap();
        assert!(h.len() <= qap.degree());
    }

    #[test]
    fn qap_interpolates_matrix_entries() {
        let bn = Bn254::new().unwrap();
        let pf = PolynomialField::new(bn.fr.clone());
        let (circuit, _) = cubing_circuit(&bn.fr);
        let qap = r1cs_to_qap(&pf, &circuit.r1cs).unwrap();
        for (i, row) in circuit.r1cs.a.iter().enumerate() {
            let x = pf.fp.element(i as u64 + 1);
            for (j, entry) in row.iter().enumerate() {
                assert_eq!(pf.eval(&qap.alphas[j], &x), *entry);
            }
        }
        // Z vanishes on every evaluation point.
        for i in 1..=circuit.r1cs.a.len() as u64 {
            assert!(pf.eval(&qap.z, &pf.fp.element(i)).is_zero());
        }
    }

    #[test]
    fn unsatisfying_witness_leaves_remainder() {
        let bn = Bn254::new().unwrap();
        let pf = PolynomialField::new(bn.fr.clone());
        let (circuit, mut witness) = cubing_circuit(&bn.fr);
        witness[3] = bn.fr.element(10);
        let qap = r1cs_to_qap(&pf, &circuit.r1cs).unwrap();
        let (_, _, _, px) = combine_polynomials(&pf, &witness, &qap).unwrap();
        assert!(pf.divisor_polynomial(&px, &qap.z).is_err());
    }
}
