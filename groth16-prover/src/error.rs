//! Hand-rolled error type, teacher convention (no `thiserror`), wrapping
//! the lower crates' own errors at the stage boundary where they surface
//! (`spec.md` §7: errors are attributed to the stage that raised them).

use core::fmt;

/// Which stage of [`crate::pipeline::prove`] an error occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LoadProvingKey,
    LoadWitness,
    WitnessMsms,
    HComputation,
    FinalMsm,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::LoadProvingKey => "loading the proving key",
            Stage::LoadWitness => "loading the witness",
            Stage::WitnessMsms => "witness multi-scalar multiplications",
            Stage::HComputation => "quotient polynomial computation",
            Stage::FinalMsm => "final multi-scalar multiplication",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Curve(mnt_curves::Error),
    Poly(mnt_poly::Error),
    Msm(mnt_msm::Error),
    /// A proving key and witness were loaded but their sizes don't agree
    /// (e.g. `witness.w.len() != proving_key.m + 1`).
    SizeMismatch { stage: Stage, expected: usize, found: usize },
    /// `CancelToken::cancel` was called before a stage boundary.
    Cancelled,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Curve(e) => write!(f, "curve/field error: {e}"),
            Error::Poly(e) => write!(f, "polynomial error: {e}"),
            Error::Msm(e) => write!(f, "multi-scalar multiplication error: {e}"),
            Error::SizeMismatch { stage, expected, found } => write!(
                f,
                "during {stage}: expected size {expected}, found {found}"
            ),
            Error::Cancelled => write!(f, "proof generation was cancelled"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
impl From<mnt_curves::Error> for Error {
    fn from(e: mnt_curves::Error) -> Self {
        Error::Curve(e)
    }
}
impl From<mnt_poly::Error> for Error {
    fn from(e: mnt_poly::Error) -> Self {
        Error::Poly(e)
    }
}
impl From<mnt_msm::Error> for Error {
    fn from(e: mnt_msm::Error) -> Self {
        Error::Msm(e)
    }
}
