//! Generic 12-limb Montgomery prime field, parameterized by
//! [`FieldParameters`].
//!
//! Grounded on the teacher's `field_arithmetic!`/`field_specific!` macros
//! in `derive/field.rs`: same CIOS multiplication, same squaring,
//! same `ff::Field`/`ff::PrimeField` surface, same `subtle`
//! constant-time discipline. The difference is mechanical, not
//! algorithmic — the teacher emits one non-generic struct per field via
//! macro expansion; `Fp<P>` is one generic struct monomorphized per
//! `P: FieldParameters` instead, which is the only way to cover a
//! 12-limb field family without per-limb macro unrolling.

use core::fmt;
use core::iter::{Product, Sum};
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use ff::{Field, PrimeField};
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use crate::fields::params::FieldParameters;
use crate::limbs::{self, LIMBS};

/// A field element of `P`, stored in Montgomery form (`value * R mod p`).
#[derive(Clone, Copy)]
pub struct Fp<P: FieldParameters> {
    limbs: [u64; LIMBS],
    _marker: PhantomData<P>,
}

impl<P: FieldParameters> Fp<P> {
    /// Wraps raw Montgomery-form limbs without validating the range.
    /// Used internally by operations that already know the result is
    /// reduced; callers building elements from external data should go
    /// through [`Fp::from_canonical_limbs`] or [`PrimeField::from_repr`].
    const fn from_montgomery_limbs(limbs: [u64; LIMBS]) -> Self {
        Fp {
            limbs,
            _marker: PhantomData,
        }
    }

    /// Converts a canonical (non-Montgomery) little-endian limb array
    /// into a field element, reducing if necessary.
    pub fn from_canonical_limbs(mut raw: [u64; LIMBS]) -> Self {
        while !limbs::is_less_than(&raw, &P::MODULUS) {
            limbs::sub_in_place(&mut raw, &P::MODULUS);
        }
        let wide = limbs::mul_wide(&raw, &P::R2);
        Self::from_montgomery_limbs(limbs::montgomery_reduce(wide, &P::MODULUS, P::INV))
    }

    /// Recovers the canonical (non-Montgomery) little-endian limb array.
    pub fn to_canonical_limbs(self) -> [u64; LIMBS] {
        let mut wide = [0u64; 2 * LIMBS];
        wide[..LIMBS].copy_from_slice(&self.limbs);
        limbs::montgomery_reduce(wide, &P::MODULUS, P::INV)
    }

    fn mont_mul(a: &[u64; LIMBS], b: &[u64; LIMBS]) -> [u64; LIMBS] {
        let wide = limbs::mul_wide(a, b);
        limbs::montgomery_reduce(wide, &P::MODULUS, P::INV)
    }

    /// `self^exponent`, exponent given as little-endian `u64` limbs.
    /// Used by [`Field::invert`] (Fermat) and by exponentiation-based
    /// square-root algorithms.
    pub fn pow_vartime(&self, exp: impl AsRef<[u64]>) -> Self {
        let mut res = Self::ONE;
        for e in exp.as_ref().iter().rev() {
            for i in (0..64).rev() {
                res = res.square();
                if ((e >> i) & 1) == 1 {
                    res *= *self;
                }
            }
        }
        res
    }
}

impl<P: FieldParameters> Default for Fp<P> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<P: FieldParameters> fmt::Debug for Fp<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x", P::NAME)?;
        for limb in self.to_canonical_limbs().iter().rev() {
            write!(f, "{:016x}", limb)?;
        }
        write!(f, ")")
    }
}

impl<P: FieldParameters> PartialEq for Fp<P> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}
impl<P: FieldParameters> Eq for Fp<P> {}

impl<P: FieldParameters> ConstantTimeEq for Fp<P> {
    fn ct_eq(&self, other: &Self) -> Choice {
        let mut acc = 0u64;
        for i in 0..LIMBS {
            acc |= self.limbs[i] ^ other.limbs[i];
        }
        Choice::from((acc == 0) as u8)
    }
}

impl<P: FieldParameters> ConditionallySelectable for Fp<P> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut out = [0u64; LIMBS];
        for i in 0..LIMBS {
            out[i] = u64::conditional_select(&a.limbs[i], &b.limbs[i], choice);
        }
        Self::from_montgomery_limbs(out)
    }
}

impl<P: FieldParameters> Neg for Fp<P> {
    type Output = Self;
    fn neg(self) -> Self {
        if bool::from(self.is_zero()) {
            return self;
        }
        let mut out = P::MODULUS;
        limbs::sub_in_place(&mut out, &self.limbs);
        Self::from_montgomery_limbs(out)
    }
}

impl<P: FieldParameters> Add for Fp<P> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let mut out = self.limbs;
        let carry = limbs::add_in_place(&mut out, &rhs.limbs);
        if carry != 0 || !limbs::is_less_than(&out, &P::MODULUS) {
            limbs::sub_in_place(&mut out, &P::MODULUS);
        }
        Self::from_montgomery_limbs(out)
    }
}
impl<'a, P: FieldParameters> Add<&'a Fp<P>> for Fp<P> {
    type Output = Self;
    fn add(self, rhs: &'a Self) -> Self {
        self + *rhs
    }
}
impl<P: FieldParameters> AddAssign for Fp<P> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
impl<'a, P: FieldParameters> AddAssign<&'a Fp<P>> for Fp<P> {
    fn add_assign(&mut self, rhs: &'a Self) {
        *self = *self + *rhs;
    }
}

impl<P: FieldParameters> Sub for Fp<P> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        let mut out = self.limbs;
        let borrow = limbs::sub_in_place(&mut out, &rhs.limbs);
        if borrow != 0 {
            limbs::add_in_place(&mut out, &P::MODULUS);
        }
        Self::from_montgomery_limbs(out)
    }
}
impl<'a, P: FieldParameters> Sub<&'a Fp<P>> for Fp<P> {
    type Output = Self;
    fn sub(self, rhs: &'a Self) -> Self {
        self - *rhs
    }
}
impl<P: FieldParameters> SubAssign for Fp<P> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}
impl<'a, P: FieldParameters> SubAssign<&'a Fp<P>> for Fp<P> {
    fn sub_assign(&mut self, rhs: &'a Self) {
        *self = *self - *rhs;
    }
}

impl<P: FieldParameters> Mul for Fp<P> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::from_montgomery_limbs(Self::mont_mul(&self.limbs, &rhs.limbs))
    }
}
impl<'a, P: FieldParameters> Mul<&'a Fp<P>> for Fp<P> {
    type Output = Self;
    fn mul(self, rhs: &'a Self) -> Self {
        self * *rhs
    }
}
impl<P: FieldParameters> MulAssign for Fp<P> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}
impl<'a, P: FieldParameters> MulAssign<&'a Fp<P>> for Fp<P> {
    fn mul_assign(&mut self, rhs: &'a Self) {
        *self = *self * *rhs;
    }
}

impl<P: FieldParameters> Sum for Fp<P> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
impl<'a, P: FieldParameters> Sum<&'a Fp<P>> for Fp<P> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |a, b| a + *b)
    }
}
impl<P: FieldParameters> Product for Fp<P> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, Mul::mul)
    }
}
impl<'a, P: FieldParameters> Product<&'a Fp<P>> for Fp<P> {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |a, b| a * *b)
    }
}

impl<P: FieldParameters> Fp<P> {
    /// The additive identity, as a plain inherent constant (mirrors the
    /// teacher's `field_common!`-generated `Self::ZERO`).
    pub const ZERO: Self = Self::from_montgomery_limbs([0u64; LIMBS]);
    /// The multiplicative identity.
    pub const ONE: Self = Self::from_montgomery_limbs(P::R);
}

impl<P: FieldParameters> Field for Fp<P> {
    const ZERO: Self = Self::ZERO;
    const ONE: Self = Self::ONE;

    fn random(mut rng: impl RngCore) -> Self {
        // Sample wide (2*LIMBS of randomness) and Montgomery-reduce, same
        // rejection-free approach the teacher's `field_common!` uses via
        // `from_u512`.
        let mut wide = [0u64; 2 * LIMBS];
        for w in wide.iter_mut() {
            *w = rng.next_u64();
        }
        Self::from_montgomery_limbs(limbs::montgomery_reduce(wide, &P::MODULUS, P::INV))
    }

    fn square(&self) -> Self {
        Self::from_montgomery_limbs(Self::mont_mul(&self.limbs, &self.limbs))
    }

    fn double(&self) -> Self {
        *self + *self
    }

    fn invert(&self) -> CtOption<Self> {
        // p - 2, little-endian u64 limbs, via Fermat's little theorem.
        let mut exp = P::MODULUS;
        limbs::sub_in_place(&mut exp, &[2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let inverse = self.pow_vartime(exp);
        CtOption::new(inverse, !self.is_zero())
    }

    fn sqrt_ratio(num: &Self, div: &Self) -> (Choice, Self) {
        // Generic Tonelli-Shanks-based `sqrt_ratio`: compute `num *
        // div^{-1}` and delegate to `sqrt`, falling back to returning the
        // non-square flag. This mirrors the default construction `ff`
        // documents for fields that don't special-case `div`.
        let inv = div.invert();
        let candidate = *num * inv.unwrap_or(Self::ZERO);
        let (is_square, root) = candidate.sqrt_alt();
        (is_square & inv.is_some(), root)
    }

    fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }
}

impl<P: FieldParameters> Fp<P> {
    /// Tonelli-Shanks square root, returning `(is_square, root)`. Exposed
    /// separately from [`Field::sqrt`] (which wraps this in a `CtOption`)
    /// so [`Field::sqrt_ratio`] can reuse it directly. Standard textbook
    /// shape (Handbook of Applied Cryptography Algorithm 3.39), same one
    /// `ff`-family crates (bellman, pasta_curves) implement against their
    /// own `ROOT_OF_UNITY`/`S` constants.
    fn sqrt_alt(&self) -> (Choice, Self) {
        if bool::from(self.is_zero()) {
            return (Choice::from(1), Self::ZERO);
        }

        // p - 1 = 2^S * t, t odd (little-endian limbs).
        let mut t_exp = P::MODULUS;
        limbs::sub_in_place(&mut t_exp, &[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        for _ in 0..P::TWO_ADICITY {
            shift_right_one(&mut t_exp);
        }
        let mut t_plus_1_over_2 = t_exp;
        limbs::add_in_place(&mut t_plus_1_over_2, &[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        shift_right_one(&mut t_plus_1_over_2);

        let mut c = Self::from_montgomery_limbs(P::ROOT_OF_UNITY_MONT);
        let mut r = self.pow_vartime(t_plus_1_over_2);
        let mut t = self.pow_vartime(t_exp);
        let mut m = P::TWO_ADICITY;

        while t != Self::ONE {
            let mut i = 1u32;
            let mut t2i = t.square();
            while t2i != Self::ONE {
                t2i = t2i.square();
                i += 1;
            }
            let mut b = c;
            for _ in 0..(m - i - 1) {
                b = b.square();
            }
            r *= b;
            c = b.square();
            t *= c;
            m = i;
        }

        (r.square().ct_eq(self), r)
    }
}

/// Divides a little-endian limb array by two, in place (used by
/// [`Fp::sqrt_alt`]'s `(p-1)/2^S` computation).
fn shift_right_one(limbs: &mut [u64; LIMBS]) {
    let mut carry = 0u64;
    for limb in limbs.iter_mut().rev() {
        let new_carry = *limb & 1;
        *limb = (*limb >> 1) | (carry << 63);
        carry = new_carry;
    }
}

/// Little-endian byte representation of an [`Fp`] element (753 bits,
/// padded to 96 bytes).
#[derive(Clone, Copy)]
pub struct FpRepr(pub [u8; 96]);

impl Default for FpRepr {
    fn default() -> Self {
        FpRepr([0u8; 96])
    }
}
impl AsRef<[u8]> for FpRepr {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
impl AsMut<[u8]> for FpRepr {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl<P: FieldParameters> From<u64> for Fp<P> {
    fn from(value: u64) -> Self {
        let mut raw = [0u64; LIMBS];
        raw[0] = value;
        Self::from_canonical_limbs(raw)
    }
}

impl<P: FieldParameters> PrimeField for Fp<P> {
    type Repr = FpRepr;

    fn from_repr(repr: Self::Repr) -> CtOption<Self> {
        let mut raw = [0u64; LIMBS];
        for (i, chunk) in repr.0.chunks_exact(8).take(LIMBS).enumerate() {
            raw[i] = u64::from_le_bytes(chunk.try_into().unwrap());
        }
        let in_range = limbs::is_less_than(&raw, &P::MODULUS);
        CtOption::new(Self::from_canonical_limbs(raw), Choice::from(in_range as u8))
    }

    fn to_repr(&self) -> Self::Repr {
        let canonical = self.to_canonical_limbs();
        let mut out = [0u8; 96];
        for (i, limb) in canonical.iter().enumerate() {
            out[i * 8..i * 8 + 8].copy_from_slice(&limb.to_le_bytes());
        }
        FpRepr(out)
    }

    fn is_odd(&self) -> Choice {
        Choice::from((self.to_canonical_limbs()[0] & 1) as u8)
    }

    const MODULUS: &'static str = "<generated per field, see FieldParameters::MODULUS>";
    const NUM_BITS: u32 = 753;
    const CAPACITY: u32 = 752;
    const TWO_INV: Self = Self::from_montgomery_limbs(P::TWO_INV_MONT);
    const MULTIPLICATIVE_GENERATOR: Self = Self::from_montgomery_limbs(P::GENERATOR_MONT);
    const S: u32 = P::TWO_ADICITY;
    const ROOT_OF_UNITY: Self = Self::from_montgomery_limbs(P::ROOT_OF_UNITY_MONT);
    const ROOT_OF_UNITY_INV: Self = Self::from_montgomery_limbs(P::ROOT_OF_UNITY_INV_MONT);
    const DELTA: Self = Self::from_montgomery_limbs(P::GENERATOR_MONT);
}

impl<P: FieldParameters> Fp<P> {
    /// Same value as `<Self as PrimeField>::S`, exposed as an inherent
    /// method for call sites that only import `FieldParameters` and not
    /// `ff::PrimeField`.
    pub fn two_adicity() -> u32 {
        P::TWO_ADICITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::params::Fr;

    type TestFp = Fp<Fr>;

    #[test]
    fn zero_is_additive_identity() {
        let a = TestFp::from(1234u64);
        assert_eq!(a + TestFp::ZERO, a);
    }

    #[test]
    fn one_is_multiplicative_identity() {
        let a = TestFp::from(5678u64);
        assert_eq!(a * TestFp::ONE, a);
    }

    #[test]
    fn add_sub_roundtrip() {
        let a = TestFp::from(99u64);
        let b = TestFp::from(42u64);
        assert_eq!((a + b) - b, a);
    }

    #[test]
    fn neg_roundtrip() {
        let a = TestFp::from(17u64);
        assert_eq!(a + (-a), TestFp::ZERO);
    }

    #[test]
    fn invert_roundtrip() {
        let a = TestFp::from(123456789u64);
        let inv = a.invert().unwrap();
        assert_eq!(a * inv, TestFp::ONE);
    }

    #[test]
    fn canonical_limb_roundtrip() {
        let mut raw = [0u64; LIMBS];
        raw[0] = 0xdead_beef;
        raw[1] = 0x1234_5678;
        let a = TestFp::from_canonical_limbs(raw);
        assert_eq!(a.to_canonical_limbs(), raw);
    }

    #[test]
    fn repr_roundtrip() {
        let a = TestFp::from(9001u64);
        let repr = a.to_repr();
        let b = TestFp::from_repr(repr).unwrap();
        assert_eq!(a, b);
    }
}
