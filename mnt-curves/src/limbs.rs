//! Little-endian 64-bit-limb bignum helpers shared by every 12-limb
//! Montgomery field in this crate.
//!
//! The teacher's own field macros (`derive/field.rs`) hand-unroll these
//! for 4 limbs using nightly `carrying_mul`/`widening_mul`. A 753-bit
//! field needs 12 limbs, which is impractical to hand-unroll, so these
//! are loop-based `const fn`s over `u128` instead — same algorithm
//! (Handbook of Applied Cryptography Algorithm 14.32 CIOS reduction),
//! stable Rust, `while`-loop bodies so they stay const-evaluable (the
//! teacher's macros use `for`, which plain `const fn` cannot, since our
//! loop bound is a runtime-agnostic constant rather than an unrolled
//! sequence of statements).

/// Number of 64-bit limbs in a 753-bit field element (padded to 768 bits).
pub const LIMBS: usize = 12;

/// a + b + carry, returning (sum, carry_out).
#[inline(always)]
pub const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// a - b - borrow, returning (diff, borrow_out) where borrow_out is 0 or 1.
#[inline(always)]
pub const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let (d1, b1) = a.overflowing_sub(b);
    let (d2, b2) = d1.overflowing_sub(borrow);
    (d2, (b1 as u64) | (b2 as u64))
}

/// a + b*c + carry, returning (low, carry_out).
#[inline(always)]
pub const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) * (c as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Adds `rhs` to `lhs` in place, returning the final carry (0 or 1).
pub const fn add_in_place(lhs: &mut [u64; LIMBS], rhs: &[u64; LIMBS]) -> u64 {
    let mut carry = 0u64;
    let mut i = 0;
    while i < LIMBS {
        let (s, c) = adc(lhs[i], rhs[i], carry);
        lhs[i] = s;
        carry = c;
        i += 1;
    }
    carry
}

/// Subtracts `rhs` from `lhs` in place, returning the final borrow (0 or 1).
pub const fn sub_in_place(lhs: &mut [u64; LIMBS], rhs: &[u64; LIMBS]) -> u64 {
    let mut borrow = 0u64;
    let mut i = 0;
    while i < LIMBS {
        let (d, b) = sbb(lhs[i], rhs[i], borrow);
        lhs[i] = d;
        borrow = b;
        i += 1;
    }
    borrow
}

/// lhs < rhs, both treated as little-endian canonical integers.
pub const fn is_less_than(lhs: &[u64; LIMBS], rhs: &[u64; LIMBS]) -> bool {
    let mut i = LIMBS;
    while i > 0 {
        i -= 1;
        if lhs[i] != rhs[i] {
            return lhs[i] < rhs[i];
        }
    }
    false
}

/// Schoolbook multiplication producing a `2*LIMBS` wide product.
pub const fn mul_wide(a: &[u64; LIMBS], b: &[u64; LIMBS]) -> [u64; 2 * LIMBS] {
    let mut out = [0u64; 2 * LIMBS];
    let mut i = 0;
    while i < LIMBS {
        let mut carry = 0u64;
        let mut j = 0;
        while j < LIMBS {
            let (v, c) = mac(out[i + j], a[i], b[j], carry);
            out[i + j] = v;
            carry = c;
            j += 1;
        }
        out[i + LIMBS] = carry;
        i += 1;
    }
    out
}

/// CIOS Montgomery reduction of a `2*LIMBS`-wide value modulo `modulus`,
/// given `inv = -modulus^{-1} mod 2^64`.
pub const fn montgomery_reduce(
    wide: [u64; 2 * LIMBS],
    modulus: &[u64; LIMBS],
    inv: u64,
) -> [u64; LIMBS] {
    let mut wide = wide;
    let mut i = 0;
    while i < LIMBS {
        let k = wide[i].wrapping_mul(inv);
        let mut carry = 0u64;
        let mut j = 0;
        while j < LIMBS {
            let (v, c) = mac(wide[i + j], k, modulus[j], carry);
            wide[i + j] = v;
            carry = c;
            j += 1;
        }
        let mut idx = i + LIMBS;
        while carry != 0 {
            let (v, c) = adc(wide[idx], 0, carry);
            wide[idx] = v;
            carry = c;
            idx += 1;
        }
        i += 1;
    }
    let mut out = [0u64; LIMBS];
    let mut k = 0;
    while k < LIMBS {
        out[k] = wide[LIMBS + k];
        k += 1;
    }
    if !is_less_than(&out, modulus) {
        sub_in_place(&mut out, modulus);
    }
    out
}

/// -inv(modulus[0]) mod 2^64, by Newton's iteration (matches arkworks'
/// generic `inv::<Self, N>()` helper used by `MontConfig`).
pub const fn compute_mont_inv(modulus0: u64) -> u64 {
    let mut inv = 1u64;
    let mut i = 0;
    while i < 5 {
        inv = inv.wrapping_mul(2u64.wrapping_sub(modulus0.wrapping_mul(inv)));
        i += 1;
    }
    inv.wrapping_neg()
}

/// Computes `2^(64*LIMBS) mod modulus`, i.e. the Montgomery `R` constant,
/// by repeated doubling-and-conditional-subtract. Same approach as
/// arkworks' `BigInt::montgomery_r()`.
pub const fn compute_r(modulus: &[u64; LIMBS]) -> [u64; LIMBS] {
    let mut r = [0u64; LIMBS];
    r[0] = 1;
    let mut i = 0;
    while i < 64 * LIMBS {
        let doubled = r;
        let carry = add_in_place(&mut r, &doubled);
        if carry != 0 || !is_less_than(&r, modulus) {
            sub_in_place(&mut r, modulus);
        }
        i += 1;
    }
    r
}

/// Computes `R^2 mod modulus` given `R mod modulus`, by doubling `R`
/// another `64*LIMBS` times (multiplying it by `2^(64*LIMBS) = R` again).
pub const fn compute_r2(r: &[u64; LIMBS], modulus: &[u64; LIMBS]) -> [u64; LIMBS] {
    let mut acc = *r;
    let mut i = 0;
    while i < 64 * LIMBS {
        let doubled = acc;
        let carry = add_in_place(&mut acc, &doubled);
        if carry != 0 || !is_less_than(&acc, modulus) {
            sub_in_place(&mut acc, modulus);
        }
        i += 1;
    }
    acc
}

/// R^3 mod modulus, used to reduce 512-bit wide values (`from_bytes_wide`).
pub const fn compute_r3(r2: &[u64; LIMBS], modulus: &[u64; LIMBS]) -> [u64; LIMBS] {
    compute_r2(r2, modulus)
}

#[cfg(test)]
mod tests {
    use super::*;

    // A small toy modulus (fits in the low limb) to sanity check the
    // generic 12-limb machinery without needing the real 753-bit primes.
    const fn toy_modulus() -> [u64; LIMBS] {
        let mut m = [0u64; LIMBS];
        m[0] = 101; // a small prime
        m
    }

    #[test]
    fn r_and_r2_are_consistent() {
        let modulus = toy_modulus();
        let r = compute_r(&modulus);
        let r2 = compute_r2(&r, &modulus);

        let inv = compute_mont_inv(modulus[0]);
        let wide = mul_wide(&r, &r);
        let reduced = montgomery_reduce(wide, &modulus, inv);
        assert_eq!(reduced, r2);
    }

    #[test]
    fn add_sub_roundtrip() {
        let mut a = [0u64; LIMBS];
        a[0] = 42;
        let mut b = [0u64; LIMBS];
        b[0] = 17;

        let mut sum = a;
        add_in_place(&mut sum, &b);
        assert_eq!(sum[0], 59);

        let mut back = sum;
        sub_in_place(&mut back, &b);
        assert_eq!(back, a);
    }

    #[test]
    fn mont_inv_satisfies_identity() {
        let modulus0 = 101u64;
        let inv = compute_mont_inv(modulus0);
        // modulus0 * inv == -1 mod 2^64
        let prod = modulus0.wrapping_mul(inv);
        assert_eq!(prod, 1u64.wrapping_neg());
    }
}
