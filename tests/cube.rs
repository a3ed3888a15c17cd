//! End-to-end scenarios on the cube circuit `out = s0³ + s0 + 5`:
//! setup → prove → verify, rejection of wrong public inputs, tampered
//! witnesses and malleated proofs, determinism of setup under a fixed
//! seed, and artifact persistence.

use num_bigint::BigUint;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use pinocchio_snark::circuit::{Circuit, R1cs};
use pinocchio_snark::field::PrimeField;
use pinocchio_snark::{Bn254, Pinocchio, PinocchioError, Proof, ProvingKey, ToxicWaste};

/// Six constraints over eight signals:
///   s0·s0 = s3,  s3·s0 = s4,  (s4 + s0)·1 = s5,
///   (s5 + 5)·1 = s6,  s1·1 = s6,  1·1 = s7.
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

fn cube_witness(fr: &PrimeField) -> Vec<BigUint> {
    [1u64, 35, 3, 9, 27, 30, 35, 1]
        .iter()
        .map(|v| fr.element(*v))
        .collect()
}

fn setup_and_prove(bn: &Bn254, seed: u64) -> (Circuit, ProvingKey, ToxicWaste, Proof) {
    let circuit = cube_circuit(&bn.fr);
    let witness = cube_witness(&bn.fr);
    let qap = Pinocchio::reduce(bn, &circuit).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let (pk, toxic) = Pinocchio::setup(bn, &circuit, &qap, &mut rng).unwrap();
    let proof = Pinocchio::prove(bn, &circuit, &qap, &pk, &witness).unwrap();
    (circuit, pk, toxic, proof)
}

#[test]
fn prove_and_verify() {
    let bn = Bn254::new().unwrap();
    let (circuit, pk, _, proof) = setup_and_prove(&bn, 1);

    let witness = cube_witness(&bn.fr);
    assert!(circuit.is_satisfied(&bn.fr, &witness).unwrap());

    // Public output 35 verifies; 36 does not.
    assert!(Pinocchio::verify(&bn, &pk.vk, &proof, &[bn.fr.element(35)]).unwrap());
    assert!(!Pinocchio::verify(&bn, &pk.vk, &proof, &[bn.fr.element(36)]).unwrap());
}

#[test]
fn tampered_witness_is_rejected_by_the_prover() {
    let bn = Bn254::new().unwrap();
    let circuit = cube_circuit(&bn.fr);
    let qap = Pinocchio::reduce(&bn, &circuit).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(2);
    let (pk, _) = Pinocchio::setup(&bn, &circuit, &qap, &mut rng).unwrap();

    let mut witness = cube_witness(&bn.fr);
    witness[3] = bn.fr.element(10);
    assert!(!circuit.is_satisfied(&bn.fr, &witness).unwrap());
    assert_eq!(
        Pinocchio::prove(&bn, &circuit, &qap, &pk, &witness),
        Err(PinocchioError::InvalidWitness)
    );
}

#[test]
fn setup_is_deterministic_under_a_fixed_seed() {
    let bn = Bn254::new().unwrap();
    let circuit = cube_circuit(&bn.fr);
    let qap = Pinocchio::reduce(&bn, &circuit).unwrap();

    let mut rng_a = ChaCha20Rng::seed_from_u64(99);
    let mut rng_b = ChaCha20Rng::seed_from_u64(99);
    let (pk_a, toxic_a) = Pinocchio::setup(&bn, &circuit, &qap, &mut rng_a).unwrap();
    let (pk_b, toxic_b) = Pinocchio::setup(&bn, &circuit, &qap, &mut rng_b).unwrap();
    assert_eq!(pk_a, pk_b);
    assert_eq!(pk_a.vk, pk_b.vk);
    assert_eq!(toxic_a, toxic_b);
}

#[test]
fn single_coordinate_malleation_invalidates_the_proof() {
    let bn = Bn254::new().unwrap();
    let (_, pk, _, proof) = setup_and_prove(&bn, 3);
    let public = [bn.fr.element(35)];
    let bump = |c: &BigUint| bn.fq.add(c, &bn.fq.one());

    let mut tampered = proof.clone();
    tampered.pi_a.x = bump(&tampered.pi_a.x);
    assert!(!Pinocchio::verify(&bn, &pk.vk, &tampered, &public).unwrap());

    let mut tampered = proof.clone();
    tampered.pi_b.x.c0 = bump(&tampered.pi_b.x.c0);
    assert!(!Pinocchio::verify(&bn, &pk.vk, &tampered, &public).unwrap());

    let mut tampered = proof.clone();
    tampered.pi_c.y = bump(&tampered.pi_c.y);
    assert!(!Pinocchio::verify(&bn, &pk.vk, &tampered, &public).unwrap());
}

#[test]
fn substituted_public_input_is_rejected() {
    let bn = Bn254::new().unwrap();
    let (_, pk, _, proof) = setup_and_prove(&bn, 4);
    assert!(!Pinocchio::verify(&bn, &pk.vk, &proof, &[bn.fr.zero()]).unwrap());
}

#[test]
fn artifacts_roundtrip_through_json() {
    let bn = Bn254::new().unwrap();
    let (_, pk, toxic, proof) = setup_and_prove(&bn, 5);

    let proof_json = serde_json::to_string(&proof).unwrap();
    let proof_back: Proof = serde_json::from_str(&proof_json).unwrap();
    assert_eq!(proof_back, proof);
    assert!(Pinocchio::verify(&bn, &pk.vk, &proof_back, &[bn.fr.element(35)]).unwrap());

    let pk_json = serde_json::to_string(&pk).unwrap();
    let pk_back: ProvingKey = serde_json::from_str(&pk_json).unwrap();
    assert_eq!(pk_back, pk);

    // The toxic block serializes separately and never rides along with
    // the keys.
    let toxic_json = serde_json::to_string(&toxic).unwrap();
    let toxic_back: ToxicWaste = serde_json::from_str(&toxic_json).unwrap();
    assert_eq!(toxic_back, toxic);
    assert!(!pk_json.contains(&toxic.t.to_str_radix(10)));
}
