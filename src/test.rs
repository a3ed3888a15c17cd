//! Protocol-level tests on a small hand-written circuit, including the
//! binding between each pairing check and the proof component it guards.

use num_bigint::BigUint;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::circuit::{Circuit, R1cs};
use crate::data_structures::{Proof, ProvingKey, ToxicWaste};
use crate::field::PrimeField;
use crate::pairing::Bn254;
use crate::verifier::pairing_checks;
use crate::Pinocchio;

/// The cube circuit `out = s0³ + s0 + 5` flattened to six constraints
/// over eight signals (one, out, s0, s0², s0³, s0³+s0, s0³+s0+5, unit
/// output wire).
fn cube_circuit(fr: &PrimeField) -> Circuit {
    let row = |entries: &[(usize, u64)]| {
        let mut v = vec![fr.zero(); 8];
        for (idx, coeff) in entries {
            v[*idx] = fr.element(*coeff);
        }
        v
    };
    let r1cs = R1cs {
        a: vec![
            row(&[(2, 1)]),
            row(&[(3, 1)]),
            row(&[(4, 1), (2, 1)]),
            row(&[(5, 1), (0, 5)]),
            row(&[(1, 1)]),
            row(&[(0, 1)]),
        ],
        b: vec![
            row(&[(2, 1)]),
            row(&[(2, 1)]),
            row(&[(0, 1)]),
            row(&[(0, 1)]),
            row(&[(0, 1)]),
            row(&[(0, 1)]),
        ],
        c: vec![
            row(&[(3, 1)]),
            row(&[(4, 1)]),
            row(&[(5, 1)]),
            row(&[(6, 1)]),
            row(&[(6, 1)]),
            row(&[(7, 1)]),
        ],
    };
    Circuit {
        n_signals: 8,
        n_public: 1,
        n_vars: 8,
        r1cs,
    }
}

/// The assignment for private s0 = 3, public out = 35.
fn cube_witness(fr: &PrimeField) -> Vec<BigUint> {
    [1u64, 35, 3, 9, 27, 30, 35, 1]
        .iter()
        .map(|v| fr.element(*v))
        .collect()
}

fn prove_cube(bn: &Bn254) -> (Circuit, ProvingKey, ToxicWaste, Proof) {
    let circuit = cube_circuit(&bn.fr);
    let witness = cube_witness(&bn.fr);
    assert!(circuit.is_satisfied(&bn.fr, &witness).unwrap());

    let qap = Pinocchio::reduce(bn, &circuit).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let (pk, toxic) = Pinocchio::setup(bn, &circuit, &qap, &mut rng).unwrap();
    let proof = Pinocchio::prove(bn, &circuit, &qap, &pk, &witness).unwrap();
    (circuit, pk, toxic, proof)
}

#[test]
fn all_checks_pass_on_honest_proof() {
    let bn = Bn254::new().unwrap();
    let (_, pk, toxic, proof) = prove_cube(&bn);
    let public = [bn.fr.element(35)];
    let checks = pairing_checks(&bn, &pk.vk, &proof, &public).unwrap();
    assert_eq!(checks, [true; 5]);

    // The derived toxic scalar keeps its defining relation.
    assert_eq!(toxic.rho_c, bn.fr.mul(&toxic.rho_a, &toxic.rho_b));
}

#[test]
fn each_check_guards_its_component() {
    let bn = Bn254::new().unwrap();
    let (_, pk, _, proof) = prove_cube(&bn);
    let public = [bn.fr.element(35)];
    let zero_g1 = bn.g1.infinity();

    // Zeroing one component flips exactly the check bound to it.
    let cases: [(&dyn Fn(&mut Proof), [bool; 5]); 5] = [
        (&|p| p.pi_h = zero_g1.clone(), [true, true, true, false, true]),
        (&|p| p.pi_k = zero_g1.clone(), [true, true, true, true, false]),
        (&|p| p.pi_ap = zero_g1.clone(), [false, true, true, true, true]),
        (&|p| p.pi_bp = zero_g1.clone(), [true, false, true, true, true]),
        (&|p| p.pi_cp = zero_g1.clone(), [true, true, false, true, true]),
    ];
    for (tamper, expected) in &cases {
        let mut tampered = proof.clone();
        tamper(&mut tampered);
        let checks = pairing_checks(&bn, &pk.vk, &tampered, &public).unwrap();
        assert_eq!(checks, *expected);
        assert!(!Pinocchio::verify(&bn, &pk.vk, &tampered, &public).unwrap());
    }
}

#[test]
fn mismatched_public_signal_count_is_an_error() {
    let bn = Bn254::new().unwrap();
    let (_, pk, _, proof) = prove_cube(&bn);
    let too_many = [bn.fr.element(35), bn.fr.element(1)];
    assert!(Pinocchio::verify(&bn, &pk.vk, &proof, &too_many).is_err());
    assert!(Pinocchio::verify(&bn, &pk.vk, &proof, &[]).is_err());
}

#[test]
fn setup_rejects_mismatched_qap() {
    let bn = Bn254::new().unwrap();
    let circuit = cube_circuit(&bn.fr);
    let mut qap = Pinocchio::reduce(&bn, &circuit).unwrap();
    qap.alphas.pop();
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    assert!(Pinocchio::setup(&bn, &circuit, &qap, &mut rng).is_err());
}
