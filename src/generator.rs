//! Trusted setup: turns a circuit and its QAP into a proving key, a
//! verification key and the toxic scalars.
//!
//! The toxic block is returned through its own value, never colocated
//! with the keys; whoever runs the ceremony must destroy it. Every point
//! placed in the keys is affine-normalized.

use num_bigint::BigUint;
use rand::RngCore;
use tracing::debug;

use crate::circuit::Circuit;
use crate::data_structures::{ProvingKey, ToxicWaste, VerifyingKey};
use crate::error::PinocchioError;
use crate::pairing::Bn254;
use crate::poly::PolynomialField;
use crate::r1cs_to_qap::Qap;

/// Samples the eight secret scalars and derives ρC = ρA·ρB.
fn sample_toxic_waste<R: RngCore + ?Sized>(
    engine: &Bn254,
    rng: &mut R,
) -> Result<ToxicWaste, PinocchioError> {
    let fr = &engine.fr;
    let rho_a = fr.rand(rng)?;
    let rho_b = fr.rand(rng)?;
    let rho_c = fr.mul(&rho_a, &rho_b);
    Ok(ToxicWaste {
        t: fr.rand(rng)?,
        k_a: fr.rand(rng)?,
        k_b: fr.rand(rng)?,
        k_c: fr.rand(rng)?,
        k_beta: fr.rand(rng)?,
        k_gamma: fr.rand(rng)?,
        rho_a,
        rho_b,
        rho_c,
    })
}

/// Runs the setup with freshly sampled randomness.
///
/// Returns the proving key (which embeds the verification key) together
/// with the toxic block. With identically seeded randomness two
/// invocations produce identical keys.
pub fn generate_random_parameters<R: RngCore + ?Sized>(
    engine: &Bn254,
    circuit: &Circuit,
    qap: &Qap,
    rng: &mut R,
) -> Result<(ProvingKey, ToxicWaste), PinocchioError> {
    let toxic = sample_toxic_waste(engine, rng)?;
    let pk = generate_parameters(engine, circuit, qap, &toxic)?;
    Ok((pk, toxic))
}

/// Runs the setup for the given toxic scalars.
pub fn generate_parameters(
    engine: &Bn254,
    circuit: &Circuit,
    qap: &Qap,
    toxic: &ToxicWaste,
) -> Result<ProvingKey, PinocchioError> {
    if qap.num_signals() != circuit.n_vars
        || qap.betas.len() != circuit.n_vars
        || qap.gammas.len() != circuit.n_vars
    {
        return Err(PinocchioError::InvalidArgument(
            "QAP does not cover the circuit signals",
        ));
    }
    if circuit.n_public >= circuit.n_vars {
        return Err(PinocchioError::InvalidArgument(
            "public signals exhaust the assignment",
        ));
    }
    let fr = &engine.fr;
    if toxic.rho_c != fr.mul(&toxic.rho_a, &toxic.rho_b) {
        return Err(PinocchioError::InvalidArgument(
            "toxic block has inconsistent rho_c",
        ));
    }
    debug!(
        n_vars = circuit.n_vars,
        n_public = circuit.n_public,
        constraints = qap.degree(),
        "generating Pinocchio parameters"
    );

    let pf = PolynomialField::new(fr.clone());
    let g1 = &engine.g1;
    let g2 = &engine.g2;
    let g1_gen = g1.generator();
    let g2_gen = g2.generator();
    let k_beta_gamma = fr.mul(&toxic.k_beta, &toxic.k_gamma);

    let mut vk = VerifyingKey {
        vk_a: g2.to_affine(&g2.mul_scalar(&g2_gen, &toxic.k_a)),
        vk_b: g1.to_affine(&g1.mul_scalar(&g1_gen, &toxic.k_b)),
        vk_c: g2.to_affine(&g2.mul_scalar(&g2_gen, &toxic.k_c)),
        g1_kbg: g1.to_affine(&g1.mul_scalar(&g1_gen, &k_beta_gamma)),
        g2_kbg: g2.to_affine(&g2.mul_scalar(&g2_gen, &k_beta_gamma)),
        g2_kg: g2.to_affine(&g2.mul_scalar(&g2_gen, &toxic.k_gamma)),
        vk_z: g2.infinity(),
        ic: Vec::with_capacity(circuit.n_public + 1),
    };

    let n = circuit.n_vars;
    let mut a_query = Vec::with_capacity(n);
    let mut b_g2_query = Vec::with_capacity(n);
    let mut c_query = Vec::with_capacity(n);
    let mut a_shift_query = Vec::with_capacity(n);
    let mut b_shift_query = Vec::with_capacity(n);
    let mut c_shift_query = Vec::with_capacity(n);
    let mut k_query = Vec::with_capacity(n);

    for i in 0..n {
        let alpha_t = fr.mul(&toxic.rho_a, &pf.eval(&qap.alphas[i], &toxic.t));
        let beta_t = fr.mul(&toxic.rho_b, &pf.eval(&qap.betas[i], &toxic.t));
        let gamma_t = fr.mul(&toxic.rho_c, &pf.eval(&qap.gammas[i], &toxic.t));

        let a = g1.to_affine(&g1.mul_scalar(&g1_gen, &alpha_t));
        let b_g1 = g1.to_affine(&g1.mul_scalar(&g1_gen, &beta_t));
        let b_g2 = g2.to_affine(&g2.mul_scalar(&g2_gen, &beta_t));
        let c = g1.to_affine(&g1.mul_scalar(&g1_gen, &gamma_t));

        if i <= circuit.n_public {
            vk.ic.push(a.clone());
        }

        // The combined query must agree with the sum of the separate
        // queries; a mismatch means the evaluations are inconsistent.
        let k_t = fr.add(&fr.add(&alpha_t, &beta_t), &gamma_t);
        let k = g1.mul_scalar(&g1_gen, &k_t);
        let k_sum = g1.add(&g1.add(&a, &b_g1), &c);
        if !g1.eq(&k, &k_sum) {
            return Err(PinocchioError::ArithmeticFailure(
                "setup consistency check failed",
            ));
        }

        a_shift_query.push(g1.to_affine(&g1.mul_scalar(&a, &toxic.k_a)));
        b_shift_query.push(g1.to_affine(&g1.mul_scalar(&b_g1, &toxic.k_b)));
        c_shift_query.push(g1.to_affine(&g1.mul_scalar(&c, &toxic.k_c)));
        k_query.push(g1.to_affine(&g1.mul_scalar(&k, &toxic.k_beta)));

        a_query.push(a);
        b_g2_query.push(b_g2);
        c_query.push(c);
    }

    let z_t = pf.eval(&qap.z, &toxic.t);
    vk.vk_z = g2.to_affine(&g2.mul_scalar(&g2_gen, &fr.mul(&toxic.rho_c, &z_t)));

    // tᵏ·G1 for k = 0..deg Z, enough to commit to any valid h(x).
    let mut h_query = Vec::with_capacity(qap.z.len());
    let mut t_power: BigUint = fr.one();
    for _ in 0..qap.z.len() {
        h_query.push(g1.to_affine(&g1.mul_scalar(&g1_gen, &t_power)));
        t_power = fr.mul(&t_power, &toxic.t);
    }

    debug!(
        queries = a_query.len(),
        h_powers = h_query.len(),
        "parameter generation finished"
    );

    Ok(ProvingKey {
        vk,
        a_query,
        b_g2_query,
        c_query,
        a_shift_query,
        b_shift_query,
        c_shift_query,
        k_query,
        h_query,
        z: qap.z.clone(),
    })
}
