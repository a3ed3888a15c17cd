//! An implementation of the [`Pinocchio`] zkSNARK over BN254.
//!
//! [`Pinocchio`]: https://eprint.iacr.org/2013/279.pdf
//!
//! Given a circuit expressed as a Rank-1 Constraint System together with
//! a witness, the pipeline produces a constant-size eight-point proof of
//! a satisfying assignment, verifiable from the public inputs and a
//! one-time trusted setup:
//!
//! ```text
//! R1CS → QAP → (pk, vk) → proof → accept/reject
//! ```
//!
//! The whole stack is self-contained: the Fq/Fq²/Fq⁶/Fq¹² tower, the
//! G1/G2 groups, the optimal-ate pairing and the polynomial layer live
//! in this crate and hang off a single immutable [`Bn254`] engine value.
//!
//! BN254 is chosen for clarity, not strength: it offers roughly 100-bit
//! security after recent tower-NFS advances, proof points are not
//! subgroup-checked (a known soundness gap; add explicit r·P = O checks
//! before relying on this for anything real), and the caller is
//! responsible for destroying the toxic scalars after setup. Do not use
//! this crate in production.

#![warn(unused, future_incompatible, nonstandard_style, rust_2018_idioms)]
#![allow(clippy::many_single_char_names, clippy::op_ref)]
#![forbid(unsafe_code)]

/// Compiled-circuit description and R1CS satisfaction checking.
pub mod circuit;

/// The G1 and G2 groups in Jacobian coordinates.
pub mod curve;

/// Data structures used by the prover, verifier, and generator.
pub mod data_structures;

/// Error kinds for the whole pipeline.
pub mod error;

/// The prime fields and the extension tower.
pub mod field;

/// Generate the trusted setup for the Pinocchio zkSNARK construction.
pub mod generator;

/// The BN254 engine and the optimal-ate pairing.
pub mod pairing;

/// Dense polynomials over the scalar field.
pub mod poly;

/// Reduce an R1CS instance to a *Quadratic Arithmetic Program* instance.
pub mod r1cs_to_qap;

/// Create proofs for the Pinocchio zkSNARK construction.
pub mod prover;

/// Verify proofs for the Pinocchio zkSNARK construction.
pub mod verifier;

#[cfg(test)]
mod test;

pub use self::circuit::{Circuit, R1cs};
pub use self::data_structures::{Proof, ProvingKey, ToxicWaste, VerifyingKey};
pub use self::error::PinocchioError;
pub use self::pairing::Bn254;
pub use self::r1cs_to_qap::{combine_polynomials, r1cs_to_qap, Qap};
pub use self::{generator::*, prover::*, verifier::*};

use num_bigint::BigUint;
use rand::RngCore;

use crate::poly::PolynomialField;

/// The Pinocchio SNARK, as a one-stop façade over the generator, prover
/// and verifier.
pub struct Pinocchio;

impl Pinocchio {
    /// Reduces the circuit's constraint system to a QAP.
    pub fn reduce(engine: &Bn254, circuit: &Circuit) -> Result<Qap, PinocchioError> {
        let pf = PolynomialField::new(engine.fr.clone());
        r1cs_to_qap(&pf, &circuit.r1cs)
    }

    /// Runs the trusted setup; the second component is the toxic block
    /// the caller must destroy.
    pub fn setup<R: RngCore + ?Sized>(
        engine: &Bn254,
        circuit: &Circuit,
        qap: &Qap,
        rng: &mut R,
    ) -> Result<(ProvingKey, ToxicWaste), PinocchioError> {
        generator::generate_random_parameters(engine, circuit, qap, rng)
    }

    /// Combines the witness with the QAP and creates a proof.
    pub fn prove(
        engine: &Bn254,
        circuit: &Circuit,
        qap: &Qap,
        pk: &ProvingKey,
        witness: &[BigUint],
    ) -> Result<Proof, PinocchioError> {
        let pf = PolynomialField::new(engine.fr.clone());
        let (_, _, _, px) = combine_polynomials(&pf, witness, qap)?;
        prover::create_proof(engine, circuit, pk, witness, &px)
    }

    /// Verifies a proof against the public signals.
    pub fn verify(
        engine: &Bn254,
        vk: &VerifyingKey,
        proof: &Proof,
        public_signals: &[BigUint],
    ) -> Result<bool, PinocchioError> {
        verifier::verify_proof(engine, vk, proof, public_signals)
    }
}
