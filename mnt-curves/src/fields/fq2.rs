//! Quadratic extension tower field `Fq2 = Fq4[u] / (u^2 - NONRESIDUE)`,
//! used as MNT4-753's G2 coordinate field.
//!
//! No single teacher file survived retrieval for a tower extension field
//! (the teacher's own pairing code operates over `bn256`'s `Fq2`/`Fq6`/
//! `Fq12` towers, not retrieved verbatim into this pack), so the
//! multiplication/squaring formulas here are the standard Karatsuba-style
//! ones used throughout pairing-curve implementations — the same
//! identities the teacher's (unretrieved) `bn256::fq2` module would use,
//! built on top of this crate's own [`Fp`] rather than copied code.

use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use ff::Field;
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use crate::fields::fp::Fp;
use crate::fields::params::FieldParameters;

/// A base-field parameterization that additionally names a quadratic
/// non-residue, making `Fq2Ext<Self>` well-defined.
pub trait QuadraticNonResidue: FieldParameters {
    /// A non-residue in `Fp<Self>`, i.e. `NONRESIDUE` has no square root
    /// in the base field, so `u^2 = NONRESIDUE` defines a degree-2
    /// extension.
    fn non_residue() -> Fp<Self>;
}

/// An element `c0 + c1*u` of `Fq2 = Fp[u]/(u^2 - NONRESIDUE)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fq2Ext<P: QuadraticNonResidue> {
    pub c0: Fp<P>,
    pub c1: Fp<P>,
}

impl<P: QuadraticNonResidue> Fq2Ext<P> {
    pub const fn new(c0: Fp<P>, c1: Fp<P>) -> Self {
        Fq2Ext { c0, c1 }
    }

    /// Conjugate: `c0 - c1*u`, the nontrivial Galois automorphism fixing
    /// the base field.
    pub fn conjugate(&self) -> Self {
        Fq2Ext {
            c0: self.c0,
            c1: -self.c1,
        }
    }

    /// The field norm down to `Fp<P>`: `c0^2 - NONRESIDUE * c1^2`.
    pub fn norm(&self) -> Fp<P> {
        self.c0.square() - P::non_residue() * self.c1.square()
    }
}

impl<P: QuadraticNonResidue> ConstantTimeEq for Fq2Ext<P> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

impl<P: QuadraticNonResidue> ConditionallySelectable for Fq2Ext<P> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fq2Ext {
            c0: Fp::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl<P: QuadraticNonResidue> Default for Fq2Ext<P> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<P: QuadraticNonResidue> Neg for Fq2Ext<P> {
    type Output = Self;
    fn neg(self) -> Self {
        Fq2Ext {
            c0: -self.c0,
            c1: -self.c1,
        }
    }
}

impl<P: QuadraticNonResidue> Add for Fq2Ext<P> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Fq2Ext {
            c0: self.c0 + rhs.c0,
            c1: self.c1 + rhs.c1,
        }
    }
}
impl<'a, P: QuadraticNonResidue> Add<&'a Fq2Ext<P>> for Fq2Ext<P> {
    type Output = Self;
    fn add(self, rhs: &'a Self) -> Self {
        self + *rhs
    }
}
impl<P: QuadraticNonResidue> AddAssign for Fq2Ext<P> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
impl<'a, P: QuadraticNonResidue> AddAssign<&'a Fq2Ext<P>> for Fq2Ext<P> {
    fn add_assign(&mut self, rhs: &'a Self) {
        *self = *self + *rhs;
    }
}

impl<P: QuadraticNonResidue> Sub for Fq2Ext<P> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Fq2Ext {
            c0: self.c0 - rhs.c0,
            c1: self.c1 - rhs.c1,
        }
    }
}
impl<'a, P: QuadraticNonResidue> Sub<&'a Fq2Ext<P>> for Fq2Ext<P> {
    type Output = Self;
    fn sub(self, rhs: &'a Self) -> Self {
        self - *rhs
    }
}
impl<P: QuadraticNonResidue> SubAssign for Fq2Ext<P> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}
impl<'a, P: QuadraticNonResidue> SubAssign<&'a Fq2Ext<P>> for Fq2Ext<P> {
    fn sub_assign(&mut self, rhs: &'a Self) {
        *self = *self - *rhs;
    }
}

impl<P: QuadraticNonResidue> Mul for Fq2Ext<P> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        // Karatsuba: one fewer base-field multiplication than the naive
        // 4-multiply schoolbook expansion.
        let v0 = self.c0 * rhs.c0;
        let v1 = self.c1 * rhs.c1;
        let c0 = v0 + P::non_residue() * v1;
        let c1 = (self.c0 + self.c1) * (rhs.c0 + rhs.c1) - v0 - v1;
        Fq2Ext { c0, c1 }
    }
}
impl<'a, P: QuadraticNonResidue> Mul<&'a Fq2Ext<P>> for Fq2Ext<P> {
    type Output = Self;
    fn mul(self, rhs: &'a Self) -> Self {
        self * *rhs
    }
}
impl<P: QuadraticNonResidue> MulAssign for Fq2Ext<P> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}
impl<'a, P: QuadraticNonResidue> MulAssign<&'a Fq2Ext<P>> for Fq2Ext<P> {
    fn mul_assign(&mut self, rhs: &'a Self) {
        *self = *self * *rhs;
    }
}

impl<P: QuadraticNonResidue> Sum for Fq2Ext<P> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
impl<'a, P: QuadraticNonResidue> Sum<&'a Fq2Ext<P>> for Fq2Ext<P> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |a, b| a + *b)
    }
}
impl<P: QuadraticNonResidue> Product for Fq2Ext<P> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, Mul::mul)
    }
}
impl<'a, P: QuadraticNonResidue> Product<&'a Fq2Ext<P>> for Fq2Ext<P> {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |a, b| a * *b)
    }
}

impl<P: QuadraticNonResidue> Field for Fq2Ext<P> {
    const ZERO: Self = Fq2Ext {
        c0: Fp::ZERO,
        c1: Fp::ZERO,
    };
    const ONE: Self = Fq2Ext {
        c0: Fp::ONE,
        c1: Fp::ZERO,
    };

    fn random(mut rng: impl RngCore) -> Self {
        Fq2Ext {
            c0: Fp::random(&mut rng),
            c1: Fp::random(&mut rng),
        }
    }

    fn square(&self) -> Self {
        // (c0 + c1*u)^2 = (c0^2 + NONRESIDUE*c1^2) + 2*c0*c1*u
        let ab = self.c0 * self.c1;
        let c0 = (self.c0 + self.c1) * (self.c0 + P::non_residue() * self.c1) - ab
            - P::non_residue() * ab;
        Fq2Ext {
            c0,
            c1: ab.double(),
        }
    }

    fn double(&self) -> Self {
        *self + *self
    }

    fn invert(&self) -> CtOption<Self> {
        let norm = self.norm();
        norm.invert().map(|norm_inv| Fq2Ext {
            c0: self.c0 * norm_inv,
            c1: -(self.c1 * norm_inv),
        })
    }

    fn sqrt_ratio(num: &Self, div: &Self) -> (Choice, Self) {
        let inv = div.invert();
        let candidate = *num * inv.unwrap_or(Self::ZERO);
        let (is_square, root) = candidate.sqrt_complex_method();
        (is_square & inv.is_some(), root)
    }

    fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero()
    }
}

impl<P: QuadraticNonResidue> Fq2Ext<P> {
    /// Square root via the "complex method" (Scott, *Implementing
    /// Cryptographic Pairings*, section on Fp2 square roots): reduces an
    /// Fq2 square root to one base-field norm, one base-field sqrt, and
    /// a second base-field sqrt, rather than a full Fq2 Tonelli-Shanks.
    /// Delegates to `Fp`'s own (non-recursive) Tonelli-Shanks for both
    /// base-field square roots.
    fn sqrt_complex_method(&self) -> (Choice, Self) {
        if bool::from(self.is_zero()) {
            return (Choice::from(1), Self::ZERO);
        }

        let alpha = self.norm();
        let delta = match alpha.sqrt().into_option() {
            Some(d) => d,
            None => return (Choice::from(0), Self::ZERO),
        };

        let two_inv = Fp::<P>::ONE.double().invert().unwrap();
        for candidate_delta in [delta, -delta] {
            let x0_sq = (self.c0 + candidate_delta) * two_inv;
            if let Some(x0) = x0_sq.sqrt().into_option() {
                if bool::from(x0.is_zero()) {
                    continue;
                }
                let x1 = self.c1 * (x0.double().invert().unwrap());
                let root = Fq2Ext { c0: x0, c1: x1 };
                return (root.square().ct_eq(self), root);
            }
        }
        (Choice::from(0), Self::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::params::Fq4;

    type TestFq2 = Fq2Ext<Fq4>;

    #[test]
    fn mul_matches_schoolbook() {
        let a = TestFq2::new(Fp::from(3u64), Fp::from(5u64));
        let b = TestFq2::new(Fp::from(7u64), Fp::from(11u64));
        let nr = Fq4::non_residue();

        let schoolbook_c0 = a.c0 * b.c0 + nr * (a.c1 * b.c1);
        let schoolbook_c1 = a.c0 * b.c1 + a.c1 * b.c0;

        let product = a * b;
        assert_eq!(product.c0, schoolbook_c0);
        assert_eq!(product.c1, schoolbook_c1);
    }

    #[test]
    fn square_matches_mul_by_self() {
        let a = TestFq2::new(Fp::from(9u64), Fp::from(4u64));
        assert_eq!(a.square(), a * a);
    }

    #[test]
    fn invert_roundtrip() {
        let a = TestFq2::new(Fp::from(17u64), Fp::from(23u64));
        let inv = a.invert().unwrap();
        assert_eq!(a * inv, TestFq2::ONE);
    }
}
