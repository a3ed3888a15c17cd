//! Proof verification: the public-input combination and the five pairing
//! checks.
//!
//! Checks 1–3 bind each shifted commitment to a linear combination of
//! the corresponding proving-key column (knowledge of exponent), check 4
//! is the QAP divisibility test, and check 5 binds the A, B and C
//! commitments to one witness. An invalid proof is `Ok(false)`; only
//! structurally malformed inputs error.

use num_bigint::BigUint;
use tracing::debug;

use crate::curve::G1Point;
use crate::data_structures::{Proof, VerifyingKey};
use crate::error::PinocchioError;
use crate::pairing::Bn254;

/// Rebuilds the public part of the A linear combination:
/// Vkx = IC[0] + Σ publicSignals[i]·IC[i+1].
///
/// Fails when the signal count does not match the key.
pub fn prepare_inputs(
    engine: &Bn254,
    vk: &VerifyingKey,
    public_signals: &[BigUint],
) -> Result<G1Point, PinocchioError> {
    if public_signals.len() + 1 != vk.ic.len() {
        return Err(PinocchioError::InvalidArgument(
            "public signal count does not match the verification key",
        ));
    }
    let g1 = &engine.g1;
    let mut vkx = vk.ic[0].clone();
    for (signal, ic) in public_signals.iter().zip(vk.ic.iter().skip(1)) {
        vkx = g1.add(&vkx, &g1.mul_scalar(ic, signal));
    }
    Ok(vkx)
}

/// e(πA, Vka) = e(π′A, G2).
fn check_knowledge_a(
    engine: &Bn254,
    vk: &VerifyingKey,
    proof: &Proof,
) -> Result<bool, PinocchioError> {
    let lhs = engine.pairing(&proof.pi_a, &vk.vk_a)?;
    let rhs = engine.pairing(&proof.pi_ap, &engine.g2.generator())?;
    Ok(lhs == rhs)
}

/// e(Vkb, πB) = e(π′B, G2).
fn check_knowledge_b(
    engine: &Bn254,
    vk: &VerifyingKey,
    proof: &Proof,
) -> Result<bool, PinocchioError> {
    let lhs = engine.pairing(&vk.vk_b, &proof.pi_b)?;
    let rhs = engine.pairing(&proof.pi_bp, &engine.g2.generator())?;
    Ok(lhs == rhs)
}

/// e(πC, Vkc) = e(π′C, G2).
fn check_knowledge_c(
    engine: &Bn254,
    vk: &VerifyingKey,
    proof: &Proof,
) -> Result<bool, PinocchioError> {
    let lhs = engine.pairing(&proof.pi_c, &vk.vk_c)?;
    let rhs = engine.pairing(&proof.pi_cp, &engine.g2.generator())?;
    Ok(lhs == rhs)
}

/// e(Vkx + πA, πB) = e(πH, Vkz) · e(πC, G2).
fn check_divisibility(
    engine: &Bn254,
    vk: &VerifyingKey,
    proof: &Proof,
    vkx: &G1Point,
) -> Result<bool, PinocchioError> {
    let lhs = engine.pairing(&engine.g1.add(vkx, &proof.pi_a), &proof.pi_b)?;
    let rhs = engine.fq12.mul(
        &engine.pairing(&proof.pi_h, &vk.vk_z)?,
        &engine.pairing(&proof.pi_c, &engine.g2.generator())?,
    );
    Ok(lhs == rhs)
}

/// e(Vkx + πA + πC, G2Kbg) · e(G1Kbg, πB) = e(πK, G2Kg).
fn check_same_witness(
    engine: &Bn254,
    vk: &VerifyingKey,
    proof: &Proof,
    vkx: &G1Point,
) -> Result<bool, PinocchioError> {
    let g1 = &engine.g1;
    let combined = g1.add(&g1.add(vkx, &proof.pi_a), &proof.pi_c);
    let lhs = engine.fq12.mul(
        &engine.pairing(&combined, &vk.g2_kbg)?,
        &engine.pairing(&vk.g1_kbg, &proof.pi_b)?,
    );
    let rhs = engine.pairing(&proof.pi_k, &vk.g2_kg)?;
    Ok(lhs == rhs)
}

/// Evaluates all five checks; used by tests to pin each check to the
/// proof component it guards.
pub(crate) fn pairing_checks(
    engine: &Bn254,
    vk: &VerifyingKey,
    proof: &Proof,
    public_signals: &[BigUint],
) -> Result<[bool; 5], PinocchioError> {
    let vkx = prepare_inputs(engine, vk, public_signals)?;
    Ok([
        check_knowledge_a(engine, vk, proof)?,
        check_knowledge_b(engine, vk, proof)?,
        check_knowledge_c(engine, vk, proof)?,
        check_divisibility(engine, vk, proof, &vkx)?,
        check_same_witness(engine, vk, proof, &vkx)?,
    ])
}

/// Verifies a proof against the public signals.
///
/// Returns `Ok(false)` as soon as one check fails.
pub fn verify_proof(
    engine: &Bn254,
    vk: &VerifyingKey,
    proof: &Proof,
    public_signals: &[BigUint],
) -> Result<bool, PinocchioError> {
    let vkx = prepare_inputs(engine, vk, public_signals)?;
    if !check_knowledge_a(engine, vk, proof)? {
        debug!("proof rejected: A knowledge check");
        return Ok(false);
    }
    if !check_knowledge_b(engine, vk, proof)? {
        debug!("proof rejected: B knowledge check");
        return Ok(false);
    }
    if !check_knowledge_c(engine, vk, proof)? {
        debug!("proof rejected: C knowledge check");
        return Ok(false);
    }
    if !check_divisibility(engine, vk, proof, &vkx)? {
        debug!("proof rejected: QAP divisibility check");
        return Ok(false);
    }
    if !check_same_witness(engine, vk, proof, &vkx)? {
        debug!("proof rejected: same-witness check");
        return Ok(false);
    }
    Ok(true)
}
