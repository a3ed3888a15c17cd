//! The BN254 engine: every field and group context plus the optimal-ate
//! pairing e: G1 × G2 → Fq¹².
//!
//! The Miller loop runs over a signed-digit expansion of 6u+2 (u being
//! the BN seed), accumulating line evaluations against a homogeneous
//! projective G2 accumulator, followed by the two Frobenius correction
//! lines at Q1 = π(Q) and Q2 = −π²(Q). The final exponentiation splits
//! (q¹²−1)/r into the easy part f^((q⁶−1)(q²+1)) and the hard part along
//! the Fuentes–Castañeda addition chain in u.
//!
//! All derived constants (Frobenius coefficients, twist coefficient,
//! untwist constants) are computed from q, ξ and u at construction, so
//! swapping the curve means swapping the literal constants below.

use num_bigint::BigUint;

use crate::curve::{G1Point, G2Point, G1, G2};
use crate::error::PinocchioError;
use crate::field::{Fq12, Fq12Elem, Fq2, Fq2Elem, Fq6, PrimeField};

/// Base-field modulus q.
pub const FQ_MODULUS: &str =
    "21888242871839275222246405745257275088696311157297823662689037894645226208583";
/// Scalar-field modulus r.
pub const FR_MODULUS: &str =
    "21888242871839275222246405745257275088548364400416034343698204186575808495617";
/// The BN seed u; the Miller loop parameter is 6u+2.
pub const BN_SEED: u64 = 4_965_661_367_192_848_881;

const G2_GENERATOR_X: [&str; 2] = [
    "10857046999023057135944570762232829481370756359578518086990519993285655852781",
    "11559732032986387107991004021392285783925812861821192530917403151452391805634",
];
const G2_GENERATOR_Y: [&str; 2] = [
    "8495653923123431417604973247489272438418190587263600148770280649306958101930",
    "4082367875863433681332203403145435568316851327593401208105741076214120093531",
];

/// Signed digits of 6u+2, least significant first. The leading digit is
/// implicit in the loop (the accumulator starts at Q).
const ATE_LOOP_COUNT: [i8; 65] = [
    0, 0, 0, 1, 0, 1, 0, -1, 0, 0, 1, -1, 0, 0, 1, 0, 0, 1, 1, 0, -1, 0, 0, 1, 0, -1, 0, 0, 0, 0,
    1, 1, 1, 0, 0, -1, 0, 0, 1, 0, 0, 0, 0, 0, -1, 0, 0, 1, 1, 0, 0, -1, 0, 0, 0, 1, 1, 0, -1, 0,
    0, 1, 0, 1, 1,
];

/// Coefficients of one Miller-loop line, to be scaled by the G1 argument.
type EllCoeffs = (Fq2Elem, Fq2Elem, Fq2Elem);

/// The engine value holding every context of the BN254 stack.
///
/// Constructed once at program start and passed by reference wherever
/// field or curve arithmetic is needed; it is immutable and cheap to
/// share.
#[derive(Clone, Debug)]
pub struct Bn254 {
    pub fq: PrimeField,
    pub fr: PrimeField,
    pub fq2: Fq2,
    pub fq6: Fq6,
    pub fq12: Fq12,
    pub g1: G1,
    pub g2: G2,
    two_inv: BigUint,
    twist_mul_by_q_x: Fq2Elem,
    twist_mul_by_q_y: Fq2Elem,
}

fn parse_decimal(s: &str) -> BigUint {
    BigUint::parse_bytes(s.as_bytes(), 10).expect("curve constant is a decimal literal")
}

impl Bn254 {
    /// Builds the full engine, deriving every non-literal constant.
    pub fn new() -> Result<Self, PinocchioError> {
        let q = parse_decimal(FQ_MODULUS);
        let r = parse_decimal(FR_MODULUS);
        let fq = PrimeField::new(q.clone());
        let fr = PrimeField::new(r);

        // u² = −1; v³ = ξ = 9 + u.
        let fq2 = Fq2::new(fq.clone(), fq.neg(&fq.one()));
        let xi = Fq2Elem::new(fq.element(9), fq.one());
        let fq6 = Fq6::new(fq2.clone(), xi.clone())?;
        let fq12 = Fq12::new(fq6.clone())?;

        let g1 = G1::new(fq.clone());
        let twist_b = fq2.mul_by_fp(&fq2.inverse(&xi)?, &fq.element(3));
        let g2_generator = G2Point::new(
            Fq2Elem::new(
                parse_decimal(G2_GENERATOR_X[0]),
                parse_decimal(G2_GENERATOR_X[1]),
            ),
            Fq2Elem::new(
                parse_decimal(G2_GENERATOR_Y[0]),
                parse_decimal(G2_GENERATOR_Y[1]),
            ),
            fq2.one(),
        );
        let g2 = G2::new(fq2.clone(), twist_b, g2_generator);

        let two_inv = fq.inverse(&fq.element(2))?;
        let q_minus_one = &q - 1u32;
        let twist_mul_by_q_x = fq2.exp(&xi, &(&q_minus_one / 3u32));
        let twist_mul_by_q_y = fq2.exp(&xi, &(&q_minus_one / 2u32));

        Ok(Self {
            fq,
            fr,
            fq2,
            fq6,
            fq12,
            g1,
            g2,
            two_inv,
            twist_mul_by_q_x,
            twist_mul_by_q_y,
        })
    }

    /// The optimal-ate pairing.
    ///
    /// Returns the identity when either argument is at infinity; for
    /// non-trivial arguments on the curve the result lies in μᵣ and the
    /// map is bilinear. Points are normalized to affine on entry.
    pub fn pairing(&self, p: &G1Point, q: &G2Point) -> Result<Fq12Elem, PinocchioError> {
        if self.g1.is_infinity(p) || self.g2.is_infinity(q) {
            return Ok(self.fq12.one());
        }
        let p_affine = self.g1.to_affine(p);
        let q_affine = self.g2.to_affine(q);
        let f = self.miller_loop(&p_affine, &q_affine);
        self.final_exponentiation(&f)
    }

    /// Evaluates a prepared line at the G1 argument and folds it into `f`.
    fn ell(&self, f: &Fq12Elem, coeffs: &EllCoeffs, px: &BigUint, py: &BigUint) -> Fq12Elem {
        let c0 = self.fq2.mul_by_fp(&coeffs.0, py);
        let c3 = self.fq2.mul_by_fp(&coeffs.1, px);
        self.fq12.mul_by_034(f, &c0, &c3, &coeffs.2)
    }

    /// ψ(Q): untwist, apply Frobenius, twist back.
    fn mul_by_char(&self, x: &Fq2Elem, y: &Fq2Elem) -> (Fq2Elem, Fq2Elem) {
        (
            self.fq2
                .mul(&self.fq2.conjugate(x), &self.twist_mul_by_q_x),
            self.fq2
                .mul(&self.fq2.conjugate(y), &self.twist_mul_by_q_y),
        )
    }

    /// Line coefficients for all steps of the loop against affine `q`.
    fn prepare_g2(&self, q: &G2Point) -> Vec<EllCoeffs> {
        let neg_qy = self.fq2.neg(&q.y);
        let mut r = G2HomProjective {
            x: q.x.clone(),
            y: q.y.clone(),
            z: self.fq2.one(),
        };
        let mut coeffs = Vec::with_capacity(ATE_LOOP_COUNT.len() * 2);
        for bit in ATE_LOOP_COUNT.iter().rev().skip(1) {
            coeffs.push(self.doubling_step(&mut r));
            match bit {
                1 => coeffs.push(self.addition_step(&mut r, &q.x, &q.y)),
                -1 => coeffs.push(self.addition_step(&mut r, &q.x, &neg_qy)),
                _ => {}
            }
        }
        let (q1x, q1y) = self.mul_by_char(&q.x, &q.y);
        let (q2x, q2y) = self.mul_by_char(&q1x, &q1y);
        let q2y = self.fq2.neg(&q2y);
        coeffs.push(self.addition_step(&mut r, &q1x, &q1y));
        coeffs.push(self.addition_step(&mut r, &q2x, &q2y));
        coeffs
    }

    /// The Miller loop for affine, non-infinity arguments.
    fn miller_loop(&self, p: &G1Point, q: &G2Point) -> Fq12Elem {
        let coeffs = self.prepare_g2(q);
        let mut f = self.fq12.one();
        let mut idx = 0;
        let n = ATE_LOOP_COUNT.len();
        for i in (1..n).rev() {
            if i != n - 1 {
                f = self.fq12.square(&f);
            }
            f = self.ell(&f, &coeffs[idx], &p.x, &p.y);
            idx += 1;
            let bit = ATE_LOOP_COUNT[i - 1];
            if bit == 1 || bit == -1 {
                f = self.ell(&f, &coeffs[idx], &p.x, &p.y);
                idx += 1;
            }
        }
        // Frobenius correction lines.
        f = self.ell(&f, &coeffs[idx], &p.x, &p.y);
        f = self.ell(&f, &coeffs[idx + 1], &p.x, &p.y);
        f
    }

    /// f ↦ f^(-u) on the cyclotomic subgroup (u is positive for BN254, so
    /// exponentiate then conjugate).
    fn exp_by_neg_x(&self, f: &Fq12Elem) -> Fq12Elem {
        self.fq12.conjugate(&self.fq12.cyclotomic_exp(f, BN_SEED))
    }

    /// Raises the Miller value to (q¹²−1)/r.
    fn final_exponentiation(&self, f: &Fq12Elem) -> Result<Fq12Elem, PinocchioError> {
        let t = &self.fq12;
        // Easy part: f^((q⁶−1)(q²+1)).
        let f_conj = t.conjugate(f);
        let f_inv = t.inverse(f)?;
        let mut r = t.mul(&f_conj, &f_inv);
        let f2 = r.clone();
        r = t.mul(&t.frobenius_map(&r, 2), &f2);

        // Hard part, Fuentes–Castañeda.
        let y0 = self.exp_by_neg_x(&r);
        let y1 = t.cyclotomic_square(&y0);
        let y2 = t.cyclotomic_square(&y1);
        let mut y3 = t.mul(&y2, &y1);
        let y4 = self.exp_by_neg_x(&y3);
        let y5 = t.cyclotomic_square(&y4);
        let mut y6 = self.exp_by_neg_x(&y5);
        y3 = t.conjugate(&y3);
        y6 = t.conjugate(&y6);
        let y7 = t.mul(&y6, &y4);
        let mut y8 = t.mul(&y7, &y3);
        let y9 = t.mul(&y8, &y1);
        let y10 = t.mul(&y8, &y4);
        let y11 = t.mul(&y10, &r);
        let y12 = t.frobenius_map(&y9, 1);
        let y13 = t.mul(&y12, &y11);
        y8 = t.frobenius_map(&y8, 2);
        let y14 = t.mul(&y8, &y13);
        r = t.conjugate(&r);
        let y15 = t.frobenius_map(&t.mul(&r, &y9), 3);
        Ok(t.mul(&y15, &y14))
    }

    fn doubling_step(&self, r: &mut G2HomProjective) -> EllCoeffs {
        let f = &self.fq2;
        let a = f.mul_by_fp(&f.mul(&r.x, &r.y), &self.two_inv);
        let b = f.square(&r.y);
        let c = f.square(&r.z);
        let e = f.mul(&f.add(&f.double(&c), &c), self.g2.coeff_b());
        let ff = f.add(&f.double(&e), &e);
        let g = f.mul_by_fp(&f.add(&b, &ff), &self.two_inv);
        let h = f.sub(&f.square(&f.add(&r.y, &r.z)), &f.add(&b, &c));
        let i = f.sub(&e, &b);
        let j = f.square(&r.x);
        let e2 = f.square(&e);

        r.x = f.mul(&a, &f.sub(&b, &ff));
        r.y = f.sub(&f.square(&g), &f.add(&f.double(&e2), &e2));
        r.z = f.mul(&b, &h);
        (f.neg(&h), f.add(&f.double(&j), &j), i)
    }

    fn addition_step(&self, r: &mut G2HomProjective, qx: &Fq2Elem, qy: &Fq2Elem) -> EllCoeffs {
        let f = &self.fq2;
        let theta = f.sub(&r.y, &f.mul(qy, &r.z));
        let lambda = f.sub(&r.x, &f.mul(qx, &r.z));
        let c = f.square(&theta);
        let d = f.square(&lambda);
        let e = f.mul(&lambda, &d);
        let ff = f.mul(&r.z, &c);
        let g = f.mul(&r.x, &d);
        let h = f.sub(&f.add(&e, &ff), &f.double(&g));

        r.x = f.mul(&lambda, &h);
        r.y = f.sub(&f.mul(&theta, &f.sub(&g, &h)), &f.mul(&e, &r.y));
        r.z = f.mul(&r.z, &e);
        let j = f.sub(&f.mul(&theta, qx), &f.mul(&lambda, qy));
        (lambda, f.neg(&theta), j)
    }
}

/// Homogeneous projective accumulator for the Miller loop.
struct G2HomProjective {
    x: Fq2Elem,
    y: Fq2Elem,
    z: Fq2Elem,
}
