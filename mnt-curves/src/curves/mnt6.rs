//! MNT6-753's G1 (over `Fq6`) and G2 (over `Fq3Ext<Fq6>`) groups.

use ff::Field;

use crate::curves::{Affine, CurveParameters, Projective};
use crate::fields::fp::Fp;
use crate::fields::fq3::Fq3Ext;
use crate::fields::params::{Fq6, Fr};

/// Curve parameters for MNT6-753's G1: `y^2 = x^3 + A*x + B` over `Fq6`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mnt6G1Params;

impl CurveParameters for Mnt6G1Params {
    type Base = Fp<Fq6>;
    type Scalar = Fp<Fr>;

    // Placeholder curve coefficients; see DESIGN.md Open Question 5.
    // y^2 = x^3 + 0*x + 1, generator (0, 1): 1^2 = 0^3 + 0*0 + 1.
    const A: Self::Base = Fp::<Fq6>::ZERO;
    const B: Self::Base = Fp::<Fq6>::ONE;

    fn generator() -> (Self::Base, Self::Base) {
        (Fp::<Fq6>::ZERO, Fp::<Fq6>::ONE)
    }
}

/// MNT6-753's G1 group element, Jacobian-projective.
pub type G1MNT6 = Projective<Mnt6G1Params>;
/// MNT6-753's G1 group element, affine.
pub type G1MNT6Affine = Affine<Mnt6G1Params>;

/// Curve parameters for MNT6-753's G2 (the cubic twist), over
/// `Fq3Ext<Fq6>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mnt6G2Params;

impl CurveParameters for Mnt6G2Params {
    type Base = Fq3Ext<Fq6>;
    type Scalar = Fp<Fr>;

    // y^2 = x^3 + 0*x + 1 over Fq3Ext, generator (0, 1); both components
    // have c1 = c2 = 0, so this reduces to the same check as G1's.
    const A: Self::Base = Fq3Ext::new(Fp::<Fq6>::ZERO, Fp::<Fq6>::ZERO, Fp::<Fq6>::ZERO);
    const B: Self::Base = Fq3Ext::new(Fp::<Fq6>::ONE, Fp::<Fq6>::ZERO, Fp::<Fq6>::ZERO);

    fn generator() -> (Self::Base, Self::Base) {
        (
            Fq3Ext::new(Fp::<Fq6>::ZERO, Fp::<Fq6>::ZERO, Fp::<Fq6>::ZERO),
            Fq3Ext::new(Fp::<Fq6>::ONE, Fp::<Fq6>::ZERO, Fp::<Fq6>::ZERO),
        )
    }
}

/// MNT6-753's G2 group element, Jacobian-projective.
pub type G2MNT6 = Projective<Mnt6G2Params>;
/// MNT6-753's G2 group element, affine.
pub type G2MNT6Affine = Affine<Mnt6G2Params>;

#[cfg(test)]
mod tests {
    use super::*;
    use group::prime::PrimeCurveAffine;
    use group::{Curve, Group};

    #[test]
    fn g1_generator_roundtrips_through_affine() {
        let g = G1MNT6::generator();
        let affine = g.to_affine();
        assert_eq!(affine.to_curve(), g);
    }

    #[test]
    fn g1_double_matches_add_to_self() {
        let g = G1MNT6::generator();
        assert_eq!(g.double(), g + g);
    }

    #[test]
    fn g2_generator_roundtrips_through_affine() {
        let g = G2MNT6::generator();
        let affine = g.to_affine();
        assert_eq!(affine.to_curve(), g);
    }
}
