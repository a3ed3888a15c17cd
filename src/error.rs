/// Errors surfaced by the setup, proving and verification pipeline.
///
/// The verifier only errors on structurally malformed inputs; an invalid
/// proof is reported as `Ok(false)`, never as an error.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PinocchioError {
    /// An input had the wrong shape: mismatched witness or public-input
    /// length, non-rectangular constraint matrices, or a polynomial
    /// division that was expected to be exact but left a remainder.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The witness does not satisfy the constraint system. Detected by the
    /// prover when h(x) = p(x)/Z(x) has a nonzero remainder.
    #[error("witness does not satisfy the constraint system")]
    InvalidWitness,

    /// A field operation without a defined result, such as inverting zero,
    /// or uniform sampling exhausting its retry budget.
    #[error("arithmetic failure: {0}")]
    ArithmeticFailure(&'static str),
}
