// For benchmarks, run:
//     cargo bench -- --nocapture
// Timings cover the three pipeline stages on the cube seed circuit.

use std::time::Instant;

use num_bigint::BigUint;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use pinocchio_snark::circuit::{Circuit, R1cs};
use pinocchio_snark::field::PrimeField;
use pinocchio_snark::{Bn254, Pinocchio};

const NUM_PROVE_REPETITIONS: u32 = 5;
const NUM_VERIFY_REPETITIONS: u32 = 5;

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

fn main() {
    let bn = Bn254::new().unwrap();
    let circuit = cube_circuit(&bn.fr);
    let witness = cube_witness(&bn.fr);
    let qap = Pinocchio::reduce(&bn, &circuit).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(0);

    let start = Instant::now();
    let (pk, _toxic) = Pinocchio::setup(&bn, &circuit, &qap, &mut rng).unwrap();
    println!("setup time: {} ms", start.elapsed().as_millis());

    let start = Instant::now();
    let mut proof = Pinocchio::prove(&bn, &circuit, &qap, &pk, &witness).unwrap();
    for _ in 1..NUM_PROVE_REPETITIONS {
        proof = Pinocchio::prove(&bn, &circuit, &qap, &pk, &witness).unwrap();
    }
    println!(
        "proving time: {} ms",
        start.elapsed().as_millis() / NUM_PROVE_REPETITIONS as u128
    );

    let public = [bn.fr.element(35)];
    let start = Instant::now();
    for _ in 0..NUM_VERIFY_REPETITIONS {
        assert!(Pinocchio::verify(&bn, &pk.vk, &proof, &public).unwrap());
    }
    println!(
        "verifying time: {} ms",
        start.elapsed().as_millis() / NUM_VERIFY_REPETITIONS as u128
    );
}
