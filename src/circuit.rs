//! The compiled-circuit description consumed by setup, prover and
//! verifier.
//!
//! The circuit compiler is an external collaborator; this module only
//! defines the summary it hands over: signal counts and the three R1CS
//! matrices. Witness layout convention: index 0 is the constant one,
//! indices 1..=n_public are the public signals, the rest are internal.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::error::PinocchioError;
use crate::field::PrimeField;

/// Rank-1 constraint system: matrices A, B, C of identical shape, one row
/// per constraint, one column per signal. A witness w satisfies the
/// system iff (A·w) ⊙ (B·w) = C·w.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct R1cs {
    #[serde(with = "crate::data_structures::decimal::matrix")]
    pub a: Vec<Vec<BigUint>>,
    #[serde(with = "crate::data_structures::decimal::matrix")]
    pub b: Vec<Vec<BigUint>>,
    #[serde(with = "crate::data_structures::decimal::matrix")]
    pub c: Vec<Vec<BigUint>>,
}

impl R1cs {
    /// Validates rectangularity and returns (constraints, signals).
    pub fn shape(&self) -> Result<(usize, usize), PinocchioError> {
        let m = self.a.len();
        if self.b.len() != m || self.c.len() != m {
            return Err(PinocchioError::InvalidArgument(
                "constraint matrices differ in row count",
            ));
        }
        if m == 0 {
            return Err(PinocchioError::InvalidArgument(
                "constraint system is empty",
            ));
        }
        let n = self.a[0].len();
        for row in self.a.iter().chain(&self.b).chain(&self.c) {
            if row.len() != n {
                return Err(PinocchioError::InvalidArgument(
                    "constraint matrices are not rectangular",
                ));
            }
        }
        Ok((m, n))
    }
}

/// Summary of a compiled circuit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    /// Total number of signals.
    pub n_signals: usize,
    /// Number of public signals; witness indices 0..=n_public hold the
    /// constant one and the public inputs/outputs.
    pub n_public: usize,
    /// Length of the full assignment vector.
    pub n_vars: usize,
    /// The constraint matrices.
    pub r1cs: R1cs,
}

impl Circuit {
    /// Checks that `witness` satisfies every constraint.
    ///
    /// Shape mismatches are errors; an unsatisfied constraint yields
    /// `Ok(false)`.
    pub fn is_satisfied(
        &self,
        fr: &PrimeField,
        witness: &[BigUint],
    ) -> Result<bool, PinocchioError> {
        let (_, n) = self.r1cs.shape()?;
        if witness.len() != n || witness.len() != self.n_vars {
            return Err(PinocchioError::InvalidArgument(
                "witness length does not match the constraint system",
            ));
        }
        let dot = |row: &[BigUint]| {
            row.iter()
                .zip(witness)
                .fold(fr.zero(), |acc, (coeff, w)| {
                    fr.add(&acc, &fr.mul(coeff, w))
                })
        };
        for ((a, b), c) in self
            .r1cs
            .a
            .iter()
            .zip(&self.r1cs.b)
            .zip(&self.r1cs.c)
        {
            if fr.mul(&dot(a), &dot(b)) != dot(c) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
