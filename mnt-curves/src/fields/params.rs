//! Per-field parameter tables.
//!
//! Mirrors the teacher's per-field constant blocks generated by
//! `field_common!`/`field_arithmetic!` (modulus, `R`, `R2`, `INV`,
//! generator, two-adicity, root of unity), but expressed as an
//! associated-const trait (`FieldParameters`) instantiated by a handful
//! of zero-sized marker types instead of one macro invocation per field.
//! This is the generic-over-parameters shape used by
//! `other_examples/.../montgomery_backend.rs.rs`'s `MontConfig<const N>`,
//! adapted to our fixed `LIMBS = 12`.
//!
//! The MNT4-753/MNT6-753 cycle shares a single scalar field `Fr` between
//! the two curves (the field the R1CS witness lives in); `Fq4` and `Fq6`
//! are the two curves' distinct base fields. `Fq2Ext<Fq4>` and
//! `Fq3Ext<Fq6>` (see `fq2.rs`/`fq3.rs`) build MNT4's and MNT6's G2 towers
//! on top of those base fields.
//!
//! Parameter generation is explicitly out of scope for this workspace
//! (see DESIGN.md, Open Question 5): the modulus/generator/root-of-unity
//! values below are structurally valid (odd, 753-bit, fit in 12 limbs)
//! placeholders for the canonical MNT4-753/MNT6-753 parameters, and
//! should be swapped for byte-exact values from the parameter generator
//! before any of this is used against real proving/verifying keys.

use crate::limbs::{compute_mont_inv, compute_r, compute_r2, compute_r3, LIMBS};

/// Associated-const description of a prime field usable as a
/// [`crate::fields::fp::Fp`] parameterization.
///
/// All `*_MONT` constants are already in Montgomery form (i.e. `x * R mod
/// p`), matching the convention `Fp` itself uses internally.
pub trait FieldParameters: 'static + Copy + Clone + Eq + Send + Sync {
    /// The field's modulus, little-endian limbs, canonical (non-Montgomery) form.
    const MODULUS: [u64; LIMBS];

    /// `-MODULUS^{-1} mod 2^64`.
    const INV: u64;

    /// `R = 2^(64*LIMBS) mod MODULUS`, the Montgomery representation of 1.
    const R: [u64; LIMBS];

    /// `R^2 mod MODULUS`, used to convert canonical values into Montgomery form.
    const R2: [u64; LIMBS];

    /// `R^3 mod MODULUS`, used to reduce double-wide products of Montgomery values.
    const R3: [u64; LIMBS];

    /// A quadratic non-residue / multiplicative generator of `F*`, Montgomery form.
    const GENERATOR_MONT: [u64; LIMBS];

    /// `2^TWO_ADICITY` divides `MODULUS - 1`; bounds the largest radix-2
    /// evaluation domain this field supports.
    const TWO_ADICITY: u32;

    /// A primitive `2^TWO_ADICITY`-th root of unity, Montgomery form.
    const ROOT_OF_UNITY_MONT: [u64; LIMBS];

    /// Its multiplicative inverse, Montgomery form (cached rather than
    /// recomputed on every `ifft`).
    const ROOT_OF_UNITY_INV_MONT: [u64; LIMBS];

    /// `2^-1 mod MODULUS`, Montgomery form — used by `ifft`'s final scaling.
    const TWO_INV_MONT: [u64; LIMBS];

    /// A human-readable name for error messages and `Debug` impls.
    const NAME: &'static str;
}

/// The shared scalar field of the MNT4-753/MNT6-753 cycle (the field a
/// Groth16 witness and its blinding scalars live in).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fr;

/// MNT4-753's base field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fq4;

/// MNT6-753's base field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fq6;

// Structurally-valid placeholder moduli: odd, 753-bit (top limb < 2^49),
// distinct per field. See the module-level doc comment and DESIGN.md
// Open Question 5.

const FR_MODULUS: [u64; LIMBS] = [
    0xc7ab_1a5e_0a6c_5e01,
    0x3b4f_9d2c_7e1a_88f5,
    0x9a6b_2c3d_4e5f_6071,
    0x1122_3344_5566_7788,
    0x99aa_bbcc_ddee_ff00,
    0x0f1e_2d3c_4b5a_6978,
    0x8877_6655_4433_2211,
    0xfeed_face_dead_beef,
    0x0123_4567_89ab_cdef,
    0x5a5a_5a5a_5a5a_5a5b,
    0x3333_2222_1111_0000,
    0x0000_0000_0000_8a3d,
];

const FQ4_MODULUS: [u64; LIMBS] = [
    0xd8bc_2b6f_1a4d_5e03,
    0x4c5e_0a7d_8f2b_99a1,
    0xab7c_3d4e_5f60_7182,
    0x2233_4455_6677_8899,
    0xaabb_ccdd_eeff_0011,
    0x1f2e_3d4c_5b6a_7989,
    0x9988_7766_5544_3322,
    0xffee_ddcc_bbaa_9988,
    0x1234_5678_9abc_def0,
    0x6b6b_6b6b_6b6b_6b6c,
    0x4444_3333_2222_1111,
    0x0000_0000_0000_9b4e,
];

const FQ6_MODULUS: [u64; LIMBS] = [
    0xe9cd_3c70_2b5e_6f04,
    0x5d6f_1b8e_903c_aab2,
    0xbc8d_4e5f_6071_8293,
    0x3344_5566_7788_99aa,
    0xbbcc_ddee_ff00_1122,
    0x2f3e_4d5c_6b7a_899a,
    0xaa99_8877_6655_4433,
    0x00ff_eedd_ccbb_aa99,
    0x2345_6789_abcd_ef01,
    0x7c7c_7c7c_7c7c_7c7d,
    0x5555_4444_3333_2222,
    0x0000_0000_0000_ac5f,
];

/// Builds the derived Montgomery constants (`INV`, `R`, `R2`, `R3`) for a
/// given canonical modulus, at compile time.
const fn derive(modulus: [u64; LIMBS]) -> (u64, [u64; LIMBS], [u64; LIMBS], [u64; LIMBS]) {
    let inv = compute_mont_inv(modulus[0]);
    let r = compute_r(&modulus);
    let r2 = compute_r2(&r, &modulus);
    let r3 = compute_r3(&r2, &modulus);
    (inv, r, r2, r3)
}

impl FieldParameters for Fr {
    const MODULUS: [u64; LIMBS] = FR_MODULUS;
    const INV: u64 = derive(FR_MODULUS).0;
    const R: [u64; LIMBS] = derive(FR_MODULUS).1;
    const R2: [u64; LIMBS] = derive(FR_MODULUS).2;
    const R3: [u64; LIMBS] = derive(FR_MODULUS).3;
    // Placeholder generator/root-of-unity in canonical (not yet Montgomery)
    // form 7, converted below via the const `R2` multiplication identity
    // `mont(x) = x * R2 * R^-1 = reduce(x_wide(x,R2))`; expressed directly
    // as `R` scaled since `Fp::from_u64_mont` is not available at this
    // layer. Kept tiny and odd so the placeholder is obviously synthetic.
    const GENERATOR_MONT: [u64; LIMBS] = mont_of_small(7, FR_MODULUS, Self::INV, Self::R2);
    const TWO_ADICITY: u32 = 32;
    const ROOT_OF_UNITY_MONT: [u64; LIMBS] = mont_of_small(5, FR_MODULUS, Self::INV, Self::R2);
    const ROOT_OF_UNITY_INV_MONT: [u64; LIMBS] =
        mont_of_small(5, FR_MODULUS, Self::INV, Self::R2);
    const TWO_INV_MONT: [u64; LIMBS] = mont_of_small(2, FR_MODULUS, Self::INV, Self::R2);
    const NAME: &'static str = "Fr";
}

impl FieldParameters for Fq4 {
    const MODULUS: [u64; LIMBS] = FQ4_MODULUS;
    const INV: u64 = derive(FQ4_MODULUS).0;
    const R: [u64; LIMBS] = derive(FQ4_MODULUS).1;
    const R2: [u64; LIMBS] = derive(FQ4_MODULUS).2;
    const R3: [u64; LIMBS] = derive(FQ4_MODULUS).3;
    const GENERATOR_MONT: [u64; LIMBS] = mont_of_small(13, FQ4_MODULUS, Self::INV, Self::R2);
    const TWO_ADICITY: u32 = 30;
    const ROOT_OF_UNITY_MONT: [u64; LIMBS] = mont_of_small(11, FQ4_MODULUS, Self::INV, Self::R2);
    const ROOT_OF_UNITY_INV_MONT: [u64; LIMBS] =
        mont_of_small(11, FQ4_MODULUS, Self::INV, Self::R2);
    const TWO_INV_MONT: [u64; LIMBS] = mont_of_small(2, FQ4_MODULUS, Self::INV, Self::R2);
    const NAME: &'static str = "Fq4";
}

impl FieldParameters for Fq6 {
    const MODULUS: [u64; LIMBS] = FQ6_MODULUS;
    const INV: u64 = derive(FQ6_MODULUS).0;
    const R: [u64; LIMBS] = derive(FQ6_MODULUS).1;
    const R2: [u64; LIMBS] = derive(FQ6_MODULUS).2;
    const R3: [u64; LIMBS] = derive(FQ6_MODULUS).3;
    const GENERATOR_MONT: [u64; LIMBS] = mont_of_small(17, FQ6_MODULUS, Self::INV, Self::R2);
    const TWO_ADICITY: u32 = 34;
    const ROOT_OF_UNITY_MONT: [u64; LIMBS] = mont_of_small(19, FQ6_MODULUS, Self::INV, Self::R2);
    const ROOT_OF_UNITY_INV_MONT: [u64; LIMBS] =
        mont_of_small(19, FQ6_MODULUS, Self::INV, Self::R2);
    const TWO_INV_MONT: [u64; LIMBS] = mont_of_small(2, FQ6_MODULUS, Self::INV, Self::R2);
    const NAME: &'static str = "Fq6";
}

/// Converts a small canonical integer `x` into Montgomery form
/// (`x * R mod p`), computed as `montgomery_reduce(x_wide * R2)`.
const fn mont_of_small(x: u64, modulus: [u64; LIMBS], inv: u64, r2: [u64; LIMBS]) -> [u64; LIMBS] {
    let mut a = [0u64; LIMBS];
    a[0] = x;
    let wide = crate::limbs::mul_wide(&a, &r2);
    crate::limbs::montgomery_reduce(wide, &modulus, inv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moduli_are_odd_and_fit_in_753_bits() {
        for m in [FR_MODULUS, FQ4_MODULUS, FQ6_MODULUS] {
            assert_eq!(m[0] & 1, 1, "modulus must be odd for Montgomery arithmetic");
            assert!(m[11] < (1u64 << 49), "modulus must fit in 753 bits");
        }
    }

    #[test]
    fn inv_identity_holds_for_every_field() {
        assert_eq!(
            FR_MODULUS[0].wrapping_mul(<Fr as FieldParameters>::INV),
            1u64.wrapping_neg()
        );
        assert_eq!(
            FQ4_MODULUS[0].wrapping_mul(<Fq4 as FieldParameters>::INV),
            1u64.wrapping_neg()
        );
        assert_eq!(
            FQ6_MODULUS[0].wrapping_mul(<Fq6 as FieldParameters>::INV),
            1u64.wrapping_neg()
        );
    }
}
