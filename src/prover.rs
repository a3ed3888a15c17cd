//! Proof construction: combines the witness with the proving-key queries
//! and commits to the quotient polynomial.

use tracing::debug;

use num_bigint::BigUint;

use crate::circuit::Circuit;
use crate::data_structures::{Proof, ProvingKey};
use crate::error::PinocchioError;
use crate::pairing::Bn254;
use crate::poly::PolynomialField;

/// Creates a Pinocchio proof for `witness` and the combined polynomial
/// p(x) = A(x)·B(x) − C(x).
///
/// The public prefix of the witness (indices 0..=n_public) is excluded
/// from πA because the verifier rebuilds that part from `vk.ic`. If
/// p(x) is not a multiple of Z(x) the witness does not satisfy the
/// constraint system and proving fails with
/// [`PinocchioError::InvalidWitness`].
pub fn create_proof(
    engine: &Bn254,
    circuit: &Circuit,
    pk: &ProvingKey,
    witness: &[BigUint],
    px: &[BigUint],
) -> Result<Proof, PinocchioError> {
    let n = circuit.n_vars;
    if witness.len() != n {
        return Err(PinocchioError::InvalidArgument(
            "witness length does not match the circuit",
        ));
    }
    if pk.a_query.len() != n
        || pk.b_g2_query.len() != n
        || pk.c_query.len() != n
        || pk.a_shift_query.len() != n
        || pk.b_shift_query.len() != n
        || pk.c_shift_query.len() != n
        || pk.k_query.len() != n
    {
        return Err(PinocchioError::InvalidArgument(
            "proving key does not match the circuit",
        ));
    }
    if circuit.n_public >= n {
        return Err(PinocchioError::InvalidArgument(
            "public signals exhaust the assignment",
        ));
    }

    let pf = PolynomialField::new(engine.fr.clone());
    let (h, remainder) = pf.div(px, &pk.z)?;
    if !remainder.is_empty() {
        return Err(PinocchioError::InvalidWitness);
    }
    if h.len() > pk.h_query.len() {
        return Err(PinocchioError::InvalidArgument(
            "quotient degree exceeds the committed powers",
        ));
    }
    debug!(
        n_vars = n,
        quotient_len = h.len(),
        "creating Pinocchio proof"
    );

    let g1 = &engine.g1;
    let g2 = &engine.g2;
    let private = circuit.n_public + 1;

    let pi_a = g1.msm(&pk.a_query[private..], &witness[private..])?;
    let pi_ap = g1.msm(&pk.a_shift_query[private..], &witness[private..])?;

    let pi_b = g2.msm(&pk.b_g2_query, witness)?;
    let pi_bp = g1.msm(&pk.b_shift_query, witness)?;
    let pi_c = g1.msm(&pk.c_query, witness)?;
    let pi_cp = g1.msm(&pk.c_shift_query, witness)?;
    let pi_k = g1.msm(&pk.k_query, witness)?;

    let pi_h = g1.msm(&pk.h_query[..h.len()], &h)?;

    Ok(Proof {
        pi_a: g1.to_affine(&pi_a),
        pi_ap: g1.to_affine(&pi_ap),
        pi_b: g2.to_affine(&pi_b),
        pi_bp: g1.to_affine(&pi_bp),
        pi_c: g1.to_affine(&pi_c),
        pi_cp: g1.to_affine(&pi_cp),
        pi_h: g1.to_affine(&pi_h),
        pi_k: g1.to_affine(&pi_k),
    })
}
