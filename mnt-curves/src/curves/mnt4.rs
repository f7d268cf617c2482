//! MNT4-753's G1 (over `Fq4`) and G2 (over `Fq2Ext<Fq4>`) groups.

use ff::Field;

use crate::curves::{Affine, CurveParameters, Projective};
use crate::fields::fp::Fp;
use crate::fields::fq2::Fq2Ext;
use crate::fields::params::{Fq4, Fr};

/// Curve parameters for MNT4-753's G1: `y^2 = x^3 + A*x + B` over `Fq4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mnt4G1Params;

impl CurveParameters for Mnt4G1Params {
    type Base = Fp<Fq4>;
    type Scalar = Fp<Fr>;

    // Placeholder curve coefficients; see DESIGN.md Open Question 5.
    // y^2 = x^3 + 0*x + 1, generator (0, 1): 1^2 = 0^3 + 0*0 + 1.
    const A: Self::Base = Fp::<Fq4>::ZERO;
    const B: Self::Base = Fp::<Fq4>::ONE;

    fn generator() -> (Self::Base, Self::Base) {
        (Fp::<Fq4>::ZERO, Fp::<Fq4>::ONE)
    }
}

/// MNT4-753's G1 group element, Jacobian-projective.
pub type G1MNT4 = Projective<Mnt4G1Params>;
/// MNT4-753's G1 group element, affine.
pub type G1MNT4Affine = Affine<Mnt4G1Params>;

/// Curve parameters for MNT4-753's G2 (the quadratic twist), over
/// `Fq2Ext<Fq4>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mnt4G2Params;

impl CurveParameters for Mnt4G2Params {
    type Base = Fq2Ext<Fq4>;
    type Scalar = Fp<Fr>;

    // y^2 = x^3 + 0*x + 1 over Fq2Ext, generator (0, 1); both components
    // have c1 = 0, so this reduces to the same check as G1's.
    const A: Self::Base = Fq2Ext::new(Fp::<Fq4>::ZERO, Fp::<Fq4>::ZERO);
    const B: Self::Base = Fq2Ext::new(Fp::<Fq4>::ONE, Fp::<Fq4>::ZERO);

    fn generator() -> (Self::Base, Self::Base) {
        (
            Fq2Ext::new(Fp::<Fq4>::ZERO, Fp::<Fq4>::ZERO),
            Fq2Ext::new(Fp::<Fq4>::ONE, Fp::<Fq4>::ZERO),
        )
    }
}

/// MNT4-753's G2 group element, Jacobian-projective.
pub type G2MNT4 = Projective<Mnt4G2Params>;
/// MNT4-753's G2 group element, affine.
pub type G2MNT4Affine = Affine<Mnt4G2Params>;

#[cfg(test)]
mod tests {
    use super::*;
    use group::prime::PrimeCurveAffine;
    use group::{Curve, Group};

    #[test]
    fn g1_generator_roundtrips_through_affine() {
        let g = G1MNT4::generator();
        let affine = g.to_affine();
        assert_eq!(affine.to_curve(), g);
    }

    #[test]
    fn g1_double_matches_add_to_self() {
        let g = G1MNT4::generator();
        assert_eq!(g.double(), g + g);
    }

    #[test]
    fn g2_generator_roundtrips_through_affine() {
        let g = G2MNT4::generator();
        let affine = g.to_affine();
        assert_eq!(affine.to_curve(), g);
    }
}
