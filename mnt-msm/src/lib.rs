//! Pippenger windowed multi-scalar multiplication over the MNT4-753/
//! MNT6-753 curve cycle, plus the knowledge-commitment variant used for
//! Groth16's paired (B1, B2) commitment.

pub mod error;
pub mod pippenger;

pub use error::Error;
pub use pippenger::{kc_msm, msm, msm_mixed};
