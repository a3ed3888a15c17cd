//! Data structures produced by the generator, prover and verifier, and
//! their persistence encoding.
//!
//! Artifacts serialize as structured records of big-integer coordinates
//! in canonical base-10 decimal; curve points are stored as Jacobian
//! triples. The toxic block is a separate record on purpose: it must
//! never travel with the keys, and the caller is responsible for
//! destroying it after setup.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::curve::{G1Point, G2Point};
use crate::poly::Polynomial;

/// Serde helpers rendering big integers as decimal strings.
pub(crate) mod decimal {
    use num_bigint::BigUint;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&v.to_str_radix(10))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let s = String::deserialize(deserializer)?;
        BigUint::parse_bytes(s.as_bytes(), 10)
            .ok_or_else(|| D::Error::custom("value is not a decimal integer"))
    }

    pub mod seq {
        use super::*;

        pub fn serialize<S: Serializer>(
            v: &Vec<BigUint>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(v.iter().map(|c| c.to_str_radix(10)))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<BigUint>, D::Error> {
            let strings = Vec::<String>::deserialize(deserializer)?;
            strings
                .iter()
                .map(|s| {
                    BigUint::parse_bytes(s.as_bytes(), 10)
                        .ok_or_else(|| D::Error::custom("value is not a decimal integer"))
                })
                .collect()
        }
    }

    pub mod matrix {
        use super::*;

        pub fn serialize<S: Serializer>(
            v: &Vec<Vec<BigUint>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(
                v.iter()
                    .map(|row| row.iter().map(|c| c.to_str_radix(10)).collect::<Vec<_>>()),
            )
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<Vec<BigUint>>, D::Error> {
            let rows = Vec::<Vec<String>>::deserialize(deserializer)?;
            rows.iter()
                .map(|row| {
                    row.iter()
                        .map(|s| {
                            BigUint::parse_bytes(s.as_bytes(), 10)
                                .ok_or_else(|| D::Error::custom("value is not a decimal integer"))
                        })
                        .collect()
                })
                .collect()
        }
    }
}

/// A proof in the Pinocchio SNARK: eight curve points.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// Commitment to the private part of the A linear combination.
    pub pi_a: G1Point,
    /// kA-shifted copy of `pi_a` (knowledge-of-exponent companion).
    pub pi_ap: G1Point,
    /// Commitment to the B linear combination, in G2.
    pub pi_b: G2Point,
    /// kB-shifted copy of `pi_b`, in G1.
    pub pi_bp: G1Point,
    /// Commitment to the C linear combination.
    pub pi_c: G1Point,
    /// kC-shifted copy of `pi_c`.
    pub pi_cp: G1Point,
    /// Commitment to the quotient h(x) = p(x)/Z(x).
    pub pi_h: G1Point,
    /// kβ-combined commitment binding A, B and C to one witness.
    pub pi_k: G1Point,
}

/// A verification key in the Pinocchio SNARK.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyingKey {
    /// kA·G2.
    pub vk_a: G2Point,
    /// kB·G1.
    pub vk_b: G1Point,
    /// kC·G2.
    pub vk_c: G2Point,
    /// kβkγ·G1.
    pub g1_kbg: G1Point,
    /// kβkγ·G2.
    pub g2_kbg: G2Point,
    /// kγ·G2.
    pub g2_kg: G2Point,
    /// ρC·Z(t)·G2.
    pub vk_z: G2Point,
    /// The public prefix of the A query: entries 0..=n_public, used by the
    /// verifier to rebuild the public linear combination.
    pub ic: Vec<G1Point>,
}

/// The proving key for the Pinocchio SNARK.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvingKey {
    /// The underlying verification key.
    pub vk: VerifyingKey,
    /// ρA·αᵢ(t)·G1 per signal.
    pub a_query: Vec<G1Point>,
    /// ρB·βᵢ(t)·G2 per signal.
    pub b_g2_query: Vec<G2Point>,
    /// ρC·γᵢ(t)·G1 per signal.
    pub c_query: Vec<G1Point>,
    /// kA-shifted A query.
    pub a_shift_query: Vec<G1Point>,
    /// kB-shifted B query, in G1.
    pub b_shift_query: Vec<G1Point>,
    /// kC-shifted C query.
    pub c_shift_query: Vec<G1Point>,
    /// kβ·(ρA·αᵢ(t) + ρB·βᵢ(t) + ρC·γᵢ(t))·G1 per signal.
    pub k_query: Vec<G1Point>,
    /// Powers of the secret point: tᵏ·G1 for k = 0..deg Z, used to commit
    /// to h(x).
    pub h_query: Vec<G1Point>,
    /// The target polynomial Z.
    #[serde(with = "decimal::seq")]
    pub z: Polynomial,
}

/// The secret scalars sampled by setup.
///
/// Anyone holding these can forge proofs; the caller must destroy this
/// record once setup returns, and it is serialized separately from the
/// keys for exactly that reason.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToxicWaste {
    /// The secret evaluation point.
    #[serde(with = "decimal")]
    pub t: BigUint,
    #[serde(with = "decimal")]
    pub k_a: BigUint,
    #[serde(with = "decimal")]
    pub k_b: BigUint,
    #[serde(with = "decimal")]
    pub k_c: BigUint,
    #[serde(with = "decimal")]
    pub k_beta: BigUint,
    #[serde(with = "decimal")]
    pub k_gamma: BigUint,
    #[serde(with = "decimal")]
    pub rho_a: BigUint,
    #[serde(with = "decimal")]
    pub rho_b: BigUint,
    /// Derived as ρA·ρB.
    #[serde(with = "decimal")]
    pub rho_c: BigUint,
}
