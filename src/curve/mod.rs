//! The curve groups G1 ⊂ E(Fq) and G2 ⊂ E′(Fq²) in Jacobian coordinates.

pub mod g1;
pub mod g2;

pub use g1::{G1Point, G1};
pub use g2::{G2Point, G2};
