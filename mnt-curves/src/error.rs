//! Hand-rolled error type, matching the teacher's own convention
//! (`halo2_proofs::plonk::Error`): a plain enum with a `Display` impl,
//! no `thiserror`/`anyhow`.

use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A byte buffer did not contain the expected number of limbs or
    /// points for the value being decoded.
    Truncated { expected: usize, found: usize },

    /// A decoded field element's canonical limbs were not less than the
    /// field's modulus.
    NotCanonical,

    /// A decoded curve point failed its `y^2 = x^3 + A*x + B` check.
    NotOnCurve,

    /// The process-wide thread pool could not be constructed.
    PoolInit(String),

    /// `Kernel::init`/`Kernel::init_with_threads` was called a second
    /// time in this process. Re-initialization is forbidden; callers
    /// that need another handle to the same pool should clone an
    /// existing `Kernel`.
    AlreadyInitialized,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Truncated { expected, found } => {
                write!(f, "truncated input: expected {expected} limbs, found {found}")
            }
            Error::NotCanonical => write!(f, "field element is not in canonical form"),
            Error::NotOnCurve => write!(f, "point is not on the curve"),
            Error::PoolInit(msg) => write!(f, "failed to initialize thread pool: {msg}"),
            Error::AlreadyInitialized => write!(f, "the process-wide kernel is already initialized"),
        }
    }
}

impl std::error::Error for Error {}
