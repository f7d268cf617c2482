//! Hand-rolled error type, teacher convention (no `thiserror`).

use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The domain size `m` requested is not a power of two, or exceeds
    /// the field's two-adicity (`2^S >= m` must hold).
    UnsupportedSize { requested: usize, max_two_adic: u64 },

    /// A polynomial's coefficient count did not match the domain size an
    /// operation expected.
    SizeMismatch { expected: usize, found: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedSize { requested, max_two_adic } => write!(
                f,
                "domain size {requested} is not a power of two no greater than 2^{max_two_adic}"
            ),
            Error::SizeMismatch { expected, found } => {
                write!(f, "expected a polynomial of length {expected}, found {found}")
            }
        }
    }
}

impl std::error::Error for Error {}
