//! Finite-field arithmetic: the base prime field and the
//! Fq² / Fq⁶ / Fq¹² extension tower.
//!
//! Fields are explicit context values rather than types with a baked-in
//! modulus: a [`PrimeField`] carries its modulus and operates on plain
//! [`BigUint`] elements, which keeps the whole stack parameterized on the
//! curve constants. Elements are always stored fully reduced.

pub mod fq12;
pub mod fq2;
pub mod fq6;

pub use fq12::{Fq12, Fq12Elem};
pub use fq2::{Fq2, Fq2Elem};
pub use fq6::{Fq6, Fq6Elem};

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rand::RngCore;

use crate::error::PinocchioError;

/// Retry budget for rejection sampling of uniform field elements.
const SAMPLING_RETRIES: usize = 256;

/// A prime field of odd characteristic, held as an explicit context.
///
/// Both Fq (curve coordinates) and Fr (scalars) are instances of this
/// type; every operation reduces its result into `[0, modulus)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeField {
    modulus: BigUint,
}

impl PrimeField {
    /// Creates the field context for the given modulus.
    pub fn new(modulus: BigUint) -> Self {
        Self { modulus }
    }

    /// The field modulus.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// The additive identity.
    pub fn zero(&self) -> BigUint {
        BigUint::zero()
    }

    /// The multiplicative identity.
    pub fn one(&self) -> BigUint {
        BigUint::one()
    }

    /// Embeds a small integer as a reduced field element.
    pub fn element(&self, value: u64) -> BigUint {
        BigUint::from(value) % &self.modulus
    }

    /// Reduces an arbitrary nonnegative integer into the field.
    pub fn reduce(&self, value: &BigUint) -> BigUint {
        value % &self.modulus
    }

    /// Reduces an arbitrary signed integer into the field.
    pub fn reduce_signed(&self, value: &BigInt) -> BigUint {
        let m = BigInt::from(self.modulus.clone());
        let r = value.mod_floor(&m);
        r.to_biguint().expect("mod_floor of a positive modulus is nonnegative")
    }

    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.modulus
    }

    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + &self.modulus - b) % &self.modulus
    }

    pub fn neg(&self, a: &BigUint) -> BigUint {
        if a.is_zero() {
            BigUint::zero()
        } else {
            &self.modulus - a
        }
    }

    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    pub fn square(&self, a: &BigUint) -> BigUint {
        (a * a) % &self.modulus
    }

    /// Raises `a` to an arbitrary big-integer exponent.
    pub fn exp(&self, a: &BigUint, e: &BigUint) -> BigUint {
        a.modpow(e, &self.modulus)
    }

    /// Multiplicative inverse via the extended Euclidean algorithm.
    ///
    /// Fails with [`PinocchioError::ArithmeticFailure`] on zero.
    pub fn inverse(&self, a: &BigUint) -> Result<BigUint, PinocchioError> {
        if a.is_zero() {
            return Err(PinocchioError::ArithmeticFailure("inverse of zero"));
        }
        let a = BigInt::from(a.clone());
        let m = BigInt::from(self.modulus.clone());
        let egcd = a.extended_gcd(&m);
        if !egcd.gcd.is_one() {
            return Err(PinocchioError::ArithmeticFailure(
                "element is not invertible",
            ));
        }
        let x = egcd.x.mod_floor(&m);
        debug_assert!(!x.is_negative());
        Ok(x.to_biguint()
            .expect("mod_floor of a positive modulus is nonnegative"))
    }

    /// Field division; fails on a zero divisor.
    pub fn div(&self, a: &BigUint, b: &BigUint) -> Result<BigUint, PinocchioError> {
        Ok(self.mul(a, &self.inverse(b)?))
    }

    /// Samples a uniform field element by rejection.
    ///
    /// Candidates are drawn with exactly as many bits as the modulus and
    /// rejected until one lands below it, so the result is uniform over
    /// the whole field. Exhausting the retry budget (cryptographically
    /// impossible with an honest generator) is an arithmetic failure.
    pub fn rand<R: RngCore + ?Sized>(&self, rng: &mut R) -> Result<BigUint, PinocchioError> {
        let bits = self.modulus.bits();
        let nbytes = ((bits + 7) / 8) as usize;
        let top_mask: u8 = if bits % 8 == 0 {
            0xff
        } else {
            (1u8 << (bits % 8)) - 1
        };
        let mut buf = vec![0u8; nbytes];
        for _ in 0..SAMPLING_RETRIES {
            rng.fill_bytes(&mut buf);
            buf[0] &= top_mask;
            let candidate = BigUint::from_bytes_be(&buf);
            if candidate < self.modulus {
                return Ok(candidate);
            }
        }
        Err(PinocchioError::ArithmeticFailure(
            "uniform sampling exhausted its retries",
        ))
    }
}
