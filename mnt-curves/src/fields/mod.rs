//! Field types for the MNT4-753/MNT6-753 cycle: the shared scalar field
//! `Fr`, the two curves' base fields `Fq4`/`Fq6`, and the quadratic/cubic
//! towers built on top of them for G2.

pub mod fp;
pub mod fq2;
pub mod fq3;
pub mod params;

pub use fp::Fp;
pub use fq2::Fq2Ext;
pub use fq3::Fq3Ext;
pub use params::{FieldParameters, Fq4, Fq6, Fr};

/// The MNT4-753 scalar field element type.
pub type ScalarField = Fp<Fr>;
/// MNT4-753's base field element type.
pub type Fq4Field = Fp<Fq4>;
/// MNT6-753's base field element type.
pub type Fq6Field = Fp<Fq6>;
/// MNT4-753's G2 coordinate field (`Fq4[u]/(u^2 - nonresidue)`).
pub type Fq4Quadratic = Fq2Ext<Fq4>;
/// MNT6-753's G2 coordinate field (`Fq6[v]/(v^3 - nonresidue)`).
pub type Fq6Cubic = Fq3Ext<Fq6>;

impl fq2::QuadraticNonResidue for Fq4 {
    fn non_residue() -> Fp<Fq4> {
        // Placeholder non-residue; see DESIGN.md Open Question 5 — the
        // real MNT4-753 twist non-residue must be substituted once the
        // canonical curve parameters are supplied.
        Fp::from(13u64)
    }
}

impl fq3::CubicNonResidue for Fq6 {
    fn non_residue() -> Fp<Fq6> {
        // Placeholder non-residue; see DESIGN.md Open Question 5.
        Fp::from(11u64)
    }

    fn fq3_two_adicity() -> u32 {
        1
    }

    fn fq3_root_of_unity() -> Fq3Ext<Fq6> {
        Fq3Ext::new(Fp::from(1u64), Fp::ZERO, Fp::ZERO)
    }
}
