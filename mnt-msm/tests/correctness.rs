//! Integration tests for Pippenger MSM/KC-MSM correctness: naive-
//! accumulation agreement, chunk-count invariance, and the
//! knowledge-commitment decomposition, built from the real MNT4-753
//! `G1MNT4`/`G2MNT4` types (scenarios S2 and S3).

use std::sync::OnceLock;

use group::prime::PrimeCurveAffine;
use group::{Curve, Group};

use mnt_curves::curves::mnt4::{G1MNT4, G1MNT4Affine, G2MNT4, G2MNT4Affine};
use mnt_curves::fields::fp::Fp;
use mnt_curves::fields::params::Fr;
use mnt_curves::Kernel;
use mnt_msm::{kc_msm, msm, msm_mixed};

type Scalar = Fp<Fr>;

/// `Kernel::init` may only succeed once per process; every test in this
/// file shares a single handle instead of each calling `init`.
fn test_kernel() -> Kernel {
    static KERNEL: OnceLock<Kernel> = OnceLock::new();
    KERNEL
        .get_or_init(|| Kernel::init().expect("first kernel init in this test binary"))
        .clone()
}

fn naive_msm(bases: &[G1MNT4Affine], scalars: &[Scalar]) -> G1MNT4 {
    bases
        .iter()
        .zip(scalars)
        .fold(G1MNT4::identity(), |acc, (b, s)| acc + b.to_curve() * *s)
}

/// Property 4: MSM matches naive accumulation (scenario S2, `n = 3`).
#[test]
fn msm_matches_naive_accumulation_n3() {
    let kernel = test_kernel();
    let g = G1MNT4::generator();
    let bases: Vec<G1MNT4Affine> = (1..=3u64).map(|i| (g * Scalar::from(i)).to_affine()).collect();
    let scalars: Vec<Scalar> = (1..=3u64).map(Scalar::from).collect();

    let expected = naive_msm(&bases, &scalars);
    let actual = msm(&kernel, &bases, &scalars, 1).unwrap();
    assert_eq!(actual, expected);
}

#[test]
fn msm_matches_naive_accumulation_n10() {
    let kernel = test_kernel();
    let g = G1MNT4::generator();
    let bases: Vec<G1MNT4Affine> = (1..=10u64).map(|i| (g * Scalar::from(i)).to_affine()).collect();
    let scalars: Vec<Scalar> = (1..=10u64).map(Scalar::from).collect();

    let expected = naive_msm(&bases, &scalars);
    let actual = msm(&kernel, &bases, &scalars, 4).unwrap();
    assert_eq!(actual, expected);
}

#[test]
fn msm_rejects_length_mismatch() {
    let kernel = test_kernel();
    let bases = vec![G1MNT4Affine::identity(); 3];
    let scalars = vec![Scalar::from(1u64); 2];
    assert!(msm(&kernel, &bases, &scalars, 1).is_err());
}

/// Property 5: chunk invariance — `chunks = 1` and `chunks = 8` must
/// agree, for a base count that doesn't divide evenly into 8 chunks.
#[test]
fn msm_result_is_independent_of_chunk_count() {
    let kernel = test_kernel();
    let g = G1MNT4::generator();
    let bases: Vec<G1MNT4Affine> = (1..=37u64).map(|i| (g * Scalar::from(i)).to_affine()).collect();
    let scalars: Vec<Scalar> = (1..=37u64).map(|i| Scalar::from(i * i)).collect();

    let one_chunk = msm(&kernel, &bases, &scalars, 1).unwrap();
    let eight_chunks = msm(&kernel, &bases, &scalars, 8).unwrap();
    assert_eq!(one_chunk, eight_chunks);
}

#[test]
fn msm_mixed_result_is_independent_of_chunk_count() {
    let kernel = test_kernel();
    let g = G1MNT4::generator();
    let bases: Vec<G1MNT4Affine> = (1..=20u64).map(|i| (g * Scalar::from(i)).to_affine()).collect();
    let scalars: Vec<Scalar> = (1..=20u64).map(Scalar::from).collect();

    let one_chunk = msm_mixed(&kernel, &bases, &scalars, 1).unwrap();
    let many_chunks = msm_mixed(&kernel, &bases, &scalars, 8).unwrap();
    assert_eq!(one_chunk, many_chunks);
}

/// Property 6 / scenario S3: `kc_msm` decomposes into the same result as
/// two independent MSMs over the same scalar sequence (`n = 2`).
#[test]
fn kc_msm_matches_two_separate_msms_n2() {
    let kernel = test_kernel();
    let g1 = G1MNT4::generator();
    let g2 = G2MNT4::generator();
    let scalars: Vec<Scalar> = (1..=2u64).map(Scalar::from).collect();
    let bases1: Vec<G1MNT4Affine> = scalars.iter().map(|s| (g1 * *s).to_affine()).collect();
    let bases2: Vec<G2MNT4Affine> = scalars.iter().map(|s| (g2 * *s).to_affine()).collect();

    let (r1, r2) = kc_msm(&kernel, &bases1, &bases2, &scalars, 1).unwrap();
    assert_eq!(r1, msm(&kernel, &bases1, &scalars, 1).unwrap());
    assert_eq!(r2, msm(&kernel, &bases2, &scalars, 1).unwrap());
}

#[test]
fn kc_msm_result_is_independent_of_chunk_count() {
    let kernel = test_kernel();
    let g1 = G1MNT4::generator();
    let g2 = G2MNT4::generator();
    let scalars: Vec<Scalar> = (1..=15u64).map(Scalar::from).collect();
    let bases1: Vec<G1MNT4Affine> = scalars.iter().map(|s| (g1 * *s).to_affine()).collect();
    let bases2: Vec<G2MNT4Affine> = scalars.iter().map(|s| (g2 * *s).to_affine()).collect();

    let (r1_one, r2_one) = kc_msm(&kernel, &bases1, &bases2, &scalars, 1).unwrap();
    let (r1_many, r2_many) = kc_msm(&kernel, &bases1, &bases2, &scalars, 8).unwrap();
    assert_eq!(r1_one, r1_many);
    assert_eq!(r2_one, r2_many);
}
