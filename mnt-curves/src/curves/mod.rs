//! Generic short-Weierstrass curve group, parameterized by
//! [`CurveParameters`] so MNT4-753's and MNT6-753's G1/G2 groups can all
//! share one implementation instead of four hand-written copies.
//!
//! Trait surface (`group::Group`, `group::Curve`,
//! `group::prime::PrimeCurveAffine`) matches the re-exports the teacher's
//! `arithmetic/curves/src/lib.rs` pulls in from `pasta_curves::arithmetic`
//! (`CurveAffine`, `CurveExt`, `Group`). Jacobian addition/doubling
//! formulas are the standard `add-2007-bl`/`madd-2007-bl`/`dbl-2007-bl`
//! (Bernstein-Lange, parameterized over a general Weierstrass `a`, as
//! MNT curves need — unlike `a = 0` curves such as `bn256`), matching
//! the algebraic identities in
//! `examples/other_examples/74b8f0c9_..._short_weierstrass-mod.rs.rs`.

pub mod mnt4;
pub mod mnt6;

use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use ff::Field;
use group::prime::PrimeCurveAffine;
use group::{Curve, Group, GroupEncoding};
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Static description of a short-Weierstrass curve `y^2 = x^3 + A*x + B`
/// over `Base`, with scalar field `Scalar`.
pub trait CurveParameters: 'static + Copy + Clone + Eq + Send + Sync {
    type Base: Field;
    type Scalar: ff::PrimeField;

    const A: Self::Base;
    const B: Self::Base;

    /// A fixed generator of the prime-order subgroup.
    fn generator() -> (Self::Base, Self::Base);
}

/// A point in Jacobian projective coordinates: `(X, Y, Z)` represents
/// affine `(X/Z^2, Y/Z^3)`.
#[derive(Clone, Copy, Debug)]
pub struct Projective<C: CurveParameters> {
    pub x: C::Base,
    pub y: C::Base,
    pub z: C::Base,
}

/// A point in affine coordinates, plus an explicit point-at-infinity flag
/// (rather than an out-of-range sentinel) so equality and conditional
/// selection stay branch-free.
#[derive(Clone, Copy, Debug)]
pub struct Affine<C: CurveParameters> {
    pub x: C::Base,
    pub y: C::Base,
    pub infinity: Choice,
}

impl<C: CurveParameters> Projective<C> {
    pub fn identity() -> Self {
        Projective {
            x: C::Base::ZERO,
            y: C::Base::ONE,
            z: C::Base::ZERO,
        }
    }

    pub fn generator() -> Self {
        let (x, y) = C::generator();
        Projective {
            x,
            y,
            z: C::Base::ONE,
        }
    }

    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// `dbl-2007-bl`: Jacobian doubling for a general Weierstrass `a`.
    pub fn double(&self) -> Self {
        if bool::from(self.is_identity()) {
            return *self;
        }
        let xx = self.x.square();
        let yy = self.y.square();
        let yyyy = yy.square();
        let zz = self.z.square();
        let s = (self.x + yy).square() - xx - yyyy;
        let s = s.double();
        let m = xx.double() + xx + C::A * zz.square();
        let t = m.square() - s.double();
        let y3 = m * (s - t) - yyyy.double().double().double();
        let z3 = (self.y + self.z).square() - yy - zz;
        Projective { x: t, y: y3, z: z3 }
    }

    /// `add-2007-bl`: general Jacobian + Jacobian addition.
    pub fn add(&self, rhs: &Self) -> Self {
        if bool::from(self.is_identity()) {
            return *rhs;
        }
        if bool::from(rhs.is_identity()) {
            return *self;
        }
        let z1z1 = self.z.square();
        let z2z2 = rhs.z.square();
        let u1 = self.x * z2z2;
        let u2 = rhs.x * z1z1;
        let s1 = self.y * rhs.z * z2z2;
        let s2 = rhs.y * self.z * z1z1;

        if u1 == u2 {
            return if s1 == s2 {
                self.double()
            } else {
                Projective::identity()
            };
        }

        let h = u2 - u1;
        let i = h.double().square();
        let j = h * i;
        let r = (s2 - s1).double();
        let v = u1 * i;
        let x3 = r.square() - j - v.double();
        let y3 = r * (v - x3) - (s1 * j).double();
        let z3 = ((self.z + rhs.z).square() - z1z1 - z2z2) * h;
        Projective {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// `madd-2007-bl`: Jacobian + affine mixed addition. Curve-coefficient
    /// agnostic, unlike doubling — cheaper than a full Jacobian add since
    /// the affine operand's `Z = 1` drops several multiplications.
    pub fn add_mixed(&self, rhs: &Affine<C>) -> Self {
        if bool::from(rhs.infinity) {
            return *self;
        }
        if bool::from(self.is_identity()) {
            return Projective {
                x: rhs.x,
                y: rhs.y,
                z: C::Base::ONE,
            };
        }
        let z1z1 = self.z.square();
        let u2 = rhs.x * z1z1;
        let s2 = rhs.y * self.z * z1z1;

        if self.x == u2 {
            return if self.y == s2 {
                self.double()
            } else {
                Projective::identity()
            };
        }

        let h = u2 - self.x;
        let hh = h.square();
        let i = hh.double().double();
        let j = h * i;
        let r = (s2 - self.y).double();
        let v = self.x * i;
        let x3 = r.square() - j - v.double();
        let y3 = r * (v - x3) - self.y.double() * j;
        let z3 = (self.z + h).square() - z1z1 - hh;
        Projective {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    pub fn to_affine(&self) -> Affine<C> {
        if bool::from(self.is_identity()) {
            return Affine::identity();
        }
        let zinv = self.z.invert().unwrap();
        let zinv2 = zinv.square();
        let zinv3 = zinv2 * zinv;
        Affine {
            x: self.x * zinv2,
            y: self.y * zinv3,
            infinity: Choice::from(0),
        }
    }

    /// Batch-normalizes a slice of projective points to affine with a
    /// single field inversion (Montgomery's trick), writing results into
    /// `out`. Mirrors the repeated `E::G1::batch_normalize` calls in
    /// `halo2_proofs::poly::kzg::commitment`'s `parallelize`d setup.
    pub fn batch_normalize(points: &[Self], out: &mut [Affine<C>]) {
        assert_eq!(points.len(), out.len());

        let mut acc = C::Base::ONE;
        let mut prefix = vec![C::Base::ONE; points.len()];
        for (i, p) in points.iter().enumerate() {
            prefix[i] = acc;
            if !bool::from(p.is_identity()) {
                acc *= p.z;
            }
        }

        let mut inv = acc.invert().unwrap_or(C::Base::ZERO);

        for i in (0..points.len()).rev() {
            let p = &points[i];
            if bool::from(p.is_identity()) {
                out[i] = Affine::identity();
                continue;
            }
            let zinv = inv * prefix[i];
            inv *= p.z;
            let zinv2 = zinv.square();
            let zinv3 = zinv2 * zinv;
            out[i] = Affine {
                x: p.x * zinv2,
                y: p.y * zinv3,
                infinity: Choice::from(0),
            };
        }
    }
}

impl<C: CurveParameters> Affine<C> {
    pub fn identity() -> Self {
        Affine {
            x: C::Base::ZERO,
            y: C::Base::ZERO,
            infinity: Choice::from(1),
        }
    }

    pub fn to_projective(&self) -> Projective<C> {
        if bool::from(self.infinity) {
            Projective::identity()
        } else {
            Projective {
                x: self.x,
                y: self.y,
                z: C::Base::ONE,
            }
        }
    }

    pub fn is_on_curve(&self) -> Choice {
        let lhs = self.y.square();
        let rhs = self.x.square() * self.x + C::A * self.x + C::B;
        lhs.ct_eq(&rhs) | self.infinity
    }
}

impl<C: CurveParameters> PartialEq for Projective<C> {
    fn eq(&self, other: &Self) -> bool {
        let a_inf = self.is_identity();
        let b_inf = other.is_identity();
        if bool::from(a_inf) || bool::from(b_inf) {
            return bool::from(a_inf) && bool::from(b_inf);
        }
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = self.x * z2z2;
        let u2 = other.x * z1z1;
        let s1 = self.y * other.z * z2z2;
        let s2 = other.y * self.z * z1z1;
        u1 == u2 && s1 == s2
    }
}
impl<C: CurveParameters> Eq for Projective<C> {}

impl<C: CurveParameters> PartialEq for Affine<C> {
    fn eq(&self, other: &Self) -> bool {
        let a_inf = bool::from(self.infinity);
        let b_inf = bool::from(other.infinity);
        if a_inf || b_inf {
            return a_inf && b_inf;
        }
        self.x == other.x && self.y == other.y
    }
}
impl<C: CurveParameters> Eq for Affine<C> {}

impl<C: CurveParameters> ConditionallySelectable for Projective<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Projective {
            x: C::Base::conditional_select(&a.x, &b.x, choice),
            y: C::Base::conditional_select(&a.y, &b.y, choice),
            z: C::Base::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl<C: CurveParameters> Default for Projective<C> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<C: CurveParameters> Neg for Projective<C> {
    type Output = Self;
    fn neg(self) -> Self {
        Projective {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }
}

impl<C: CurveParameters> Add for Projective<C> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Projective::add(&self, &rhs)
    }
}
impl<'a, C: CurveParameters> Add<&'a Projective<C>> for Projective<C> {
    type Output = Self;
    fn add(self, rhs: &'a Self) -> Self {
        Projective::add(&self, rhs)
    }
}
impl<C: CurveParameters> AddAssign for Projective<C> {
    fn add_assign(&mut self, rhs: Self) {
        *self = Projective::add(self, &rhs);
    }
}
impl<'a, C: CurveParameters> AddAssign<&'a Projective<C>> for Projective<C> {
    fn add_assign(&mut self, rhs: &'a Self) {
        *self = Projective::add(self, rhs);
    }
}
impl<C: CurveParameters> Sub for Projective<C> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Projective::add(&self, &(-rhs))
    }
}
impl<'a, C: CurveParameters> Sub<&'a Projective<C>> for Projective<C> {
    type Output = Self;
    fn sub(self, rhs: &'a Self) -> Self {
        Projective::add(&self, &(-*rhs))
    }
}
impl<C: CurveParameters> SubAssign for Projective<C> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = Projective::add(self, &(-rhs));
    }
}
impl<'a, C: CurveParameters> SubAssign<&'a Projective<C>> for Projective<C> {
    fn sub_assign(&mut self, rhs: &'a Self) {
        *self = Projective::add(self, &(-*rhs));
    }
}

impl<C: CurveParameters> Mul<C::Scalar> for Projective<C> {
    type Output = Self;
    fn mul(self, scalar: C::Scalar) -> Self {
        scalar_mul_double_and_add(&self, &scalar)
    }
}
impl<C: CurveParameters> MulAssign<C::Scalar> for Projective<C> {
    fn mul_assign(&mut self, scalar: C::Scalar) {
        *self = scalar_mul_double_and_add(self, &scalar);
    }
}

/// Plain double-and-add scalar multiplication, MSB to LSB, over the
/// scalar's canonical byte representation. Not constant-time — callers
/// on a secret-dependent path should avoid leaning on this for blinding
/// scalars if side channels are a concern; `mnt-msm`'s Pippenger MSM is
/// the workhorse for everything witness-derived.
fn scalar_mul_double_and_add<C: CurveParameters>(
    base: &Projective<C>,
    scalar: &C::Scalar,
) -> Projective<C> {
    let mut acc = Projective::identity();
    let bytes = scalar.to_repr();
    for byte in bytes.as_ref().iter().rev() {
        for i in (0..8).rev() {
            acc = acc.double();
            if (byte >> i) & 1 == 1 {
                acc += *base;
            }
        }
    }
    acc
}

impl<C: CurveParameters> Sum for Projective<C> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::identity(), Add::add)
    }
}

impl<C: CurveParameters> Group for Projective<C> {
    type Scalar = C::Scalar;

    fn random(mut rng: impl RngCore) -> Self {
        Self::generator() * C::Scalar::random(&mut rng)
    }

    fn identity() -> Self {
        Projective::identity()
    }

    fn generator() -> Self {
        Projective::generator()
    }

    fn is_identity(&self) -> Choice {
        Projective::is_identity(self)
    }

    fn double(&self) -> Self {
        Projective::double(self)
    }
}

impl<C: CurveParameters> Curve for Projective<C> {
    type AffineRepr = Affine<C>;

    fn to_affine(&self) -> Affine<C> {
        Projective::to_affine(self)
    }
}

impl<C: CurveParameters> group::prime::PrimeCurve for Projective<C> {
    type Affine = Affine<C>;
}

impl<C: CurveParameters> ConditionallySelectable for Affine<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Affine {
            x: C::Base::conditional_select(&a.x, &b.x, choice),
            y: C::Base::conditional_select(&a.y, &b.y, choice),
            infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl<C: CurveParameters> Default for Affine<C> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<C: CurveParameters> Neg for Affine<C> {
    type Output = Self;
    fn neg(self) -> Self {
        Affine {
            x: self.x,
            y: -self.y,
            infinity: self.infinity,
        }
    }
}

impl<C: CurveParameters> PrimeCurveAffine for Affine<C> {
    type Scalar = C::Scalar;
    type Curve = Projective<C>;

    fn identity() -> Self {
        Affine::identity()
    }

    fn generator() -> Self {
        Projective::generator().to_affine()
    }

    fn is_identity(&self) -> Choice {
        self.infinity
    }

    fn to_curve(&self) -> Self::Curve {
        Affine::to_projective(self)
    }
}

impl<C: CurveParameters> GroupEncoding for Projective<C> {
    type Repr = [u8; 0];

    fn from_bytes(_bytes: &Self::Repr) -> CtOption<Self> {
        // Byte (de)serialization goes through `crate::serde`'s explicit
        // length-prefixed limb format instead (see `spec.md` §6); this
        // trait method isn't exercised on the proving path.
        CtOption::new(Self::identity(), Choice::from(0))
    }

    fn from_bytes_unchecked(bytes: &Self::Repr) -> CtOption<Self> {
        Self::from_bytes(bytes)
    }

    fn to_bytes(&self) -> Self::Repr {
        []
    }
}
