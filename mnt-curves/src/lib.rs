//! Field and curve arithmetic kernel for the MNT4-753/MNT6-753
//! pairing-friendly curve cycle.
//!
//! This crate is the bottom layer of the workspace: 12-limb Montgomery
//! field arithmetic (`Fp`), its quadratic/cubic tower extensions
//! (`Fq2Ext`, `Fq3Ext`), and the short-Weierstrass group law built on
//! top of either (`Projective`/`Affine`). `mnt-poly` and `mnt-msm` build
//! on these types; `groth16-prover` wires all three together.

pub mod curves;
pub mod error;
pub mod fields;
pub mod kernel;
pub mod limbs;
pub mod serde;

pub use error::Error;
pub use kernel::Kernel;

pub use curves::mnt4::{G1MNT4, G1MNT4Affine, G2MNT4, G2MNT4Affine};
pub use curves::mnt6::{G1MNT6, G1MNT6Affine, G2MNT6, G2MNT6Affine};
pub use fields::{Fq4Field, Fq4Quadratic, Fq6Cubic, Fq6Field, ScalarField};
