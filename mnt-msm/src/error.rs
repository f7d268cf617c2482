//! Hand-rolled error type, teacher convention (no `thiserror`).

use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The number of bases did not match the number of scalars.
    LengthMismatch { bases: usize, scalars: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::LengthMismatch { bases, scalars } => write!(
                f,
                "multi-scalar multiplication needs equal-length inputs: {bases} bases vs {scalars} scalars"
            ),
        }
    }
}

impl std::error::Error for Error {}
