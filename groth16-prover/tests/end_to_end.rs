//! End-to-end pipeline test: a hand-built tiny QAP (`d = 3`, `m = 4`)
//! run through the full [`groth16_prover::prove`] entry point, checking
//! determinism and that the resulting proof's points are well-formed.
//!
//! Grounded on `examples/original_source/reference-07-groth16-prover/libsnark/main.cpp`'s
//! own smoke-test shape (load a key/witness, run the prover, check the
//! output is usable) but built from an in-memory fixture instead of a
//! file, since key/witness generation is explicitly out of scope.

use std::sync::OnceLock;

use group::prime::PrimeCurveAffine;

use mnt_curves::curves::mnt4::{G1MNT4, G1MNT4Affine, G2MNT4, G2MNT4Affine};
use mnt_curves::Kernel;
use mnt_poly::{Coeff, EvaluationDomain, Polynomial};

use groth16_prover::proving_key::Scalar;
use groth16_prover::{prove, CancelToken, ProvingKey, Witness};

/// `Kernel::init` may only succeed once per process; every test in this
/// file shares a single handle instead of each calling `init`.
fn test_kernel() -> Kernel {
    static KERNEL: OnceLock<Kernel> = OnceLock::new();
    KERNEL
        .get_or_init(|| Kernel::init().expect("first kernel init in this test binary"))
        .clone()
}

/// Builds a proving key for a `d = 3`, `m = 4` toy instance: `ca`/`cb`/
/// `cc` have `d + 1 = 4` entries (the domain `next_power_of_two(d + 1)`
/// rounds to exactly 4), `a_query`/`b1_query`/`b2_query` have `m + 1 = 5`
/// entries, `l_query` has `m - 1 = 3`, and `t_query` has `d = 3`.
fn tiny_proving_key(kernel: &Kernel) -> ProvingKey {
    let d = 3usize;
    let m = 4usize;
    let domain_size = 4usize; // next_power_of_two(d + 1)

    // A(x) = 1 + 2x, B(x) = 3 + x^2, both degree < domain_size.
    let a_coeff = vec![Scalar::from(1u64), Scalar::from(2u64), Scalar::ZERO, Scalar::ZERO];
    let b_coeff = vec![Scalar::from(3u64), Scalar::ZERO, Scalar::from(1u64), Scalar::ZERO];

    let mut product = vec![Scalar::ZERO; 2 * domain_size - 1];
    for (i, x) in a_coeff.iter().enumerate() {
        for (j, y) in b_coeff.iter().enumerate() {
            product[i + j] += *x * y;
        }
    }
    // Fold the degree >= domain_size terms back in (x^domain_size = 1 on
    // the domain's vanishing polynomial), giving C(x)'s coefficients.
    let mut c_coeff = product[0..domain_size].to_vec();
    for k in 0..(domain_size - 1) {
        c_coeff[k] += product[k + domain_size];
    }

    let domain = EvaluationDomain::<Scalar>::new(domain_size).unwrap();
    let ca = domain
        .fft(kernel, Polynomial::<Scalar, Coeff>::from_vec(a_coeff))
        .into_vec();
    let cb = domain
        .fft(kernel, Polynomial::<Scalar, Coeff>::from_vec(b_coeff))
        .into_vec();
    let cc = domain
        .fft(kernel, Polynomial::<Scalar, Coeff>::from_vec(c_coeff))
        .into_vec();

    let g1 = G1MNT4::generator();
    let g2 = G2MNT4::generator();
    let g1_query = |n: usize| -> Vec<G1MNT4Affine> {
        (1..=n as u64).map(|i| (g1 * Scalar::from(i)).to_affine()).collect()
    };

    ProvingKey {
        d,
        m,
        ca,
        cb,
        cc,
        a_query: g1_query(m + 1),
        b1_query: g1_query(m + 1),
        b2_query: (1..=(m + 1) as u64)
            .map(|i| (g2 * Scalar::from(i)).to_affine())
            .collect(),
        l_query: g1_query(m - 1),
        t_query: g1_query(d),
    }
}

fn tiny_witness(r: u64) -> Witness {
    Witness {
        w: (1..=5u64).map(Scalar::from).collect(),
        r: Scalar::from(r),
    }
}

#[test]
fn prove_is_deterministic_for_a_fixed_witness() {
    let kernel = test_kernel();
    let pk = tiny_proving_key(&kernel);
    let witness = tiny_witness(9);
    let cancel = CancelToken::new();

    let first = prove(&kernel, &pk, &witness, &cancel).unwrap();
    let second = prove(&kernel, &pk, &witness, &cancel).unwrap();

    assert_eq!(first, second);
}

#[test]
fn prove_produces_well_formed_points() {
    let kernel = test_kernel();
    let pk = tiny_proving_key(&kernel);
    let witness = tiny_witness(3);
    let cancel = CancelToken::new();

    let proof = prove(&kernel, &pk, &witness, &cancel).unwrap();

    assert!(bool::from(proof.pi_a.is_on_curve()));
    assert!(bool::from(proof.pi_b1.is_on_curve()));
    assert!(bool::from(proof.pi_b2.is_on_curve()));
    assert!(bool::from(proof.pi_l.is_on_curve()));
    assert!(bool::from(proof.pi_h.is_on_curve()));
    assert!(!bool::from(proof.pi_a.is_identity()));
}

#[test]
fn prove_rejects_mismatched_witness_length() {
    let kernel = test_kernel();
    let pk = tiny_proving_key(&kernel);
    let witness = Witness {
        w: vec![Scalar::ONE; 4],
        r: Scalar::ZERO,
    };
    let cancel = CancelToken::new();

    assert!(prove(&kernel, &pk, &witness, &cancel).is_err());
}

#[test]
fn cancellation_is_observed_before_any_work() {
    let kernel = test_kernel();
    let pk = tiny_proving_key(&kernel);
    let witness = tiny_witness(0);
    let cancel = CancelToken::new();
    cancel.cancel();

    assert!(prove(&kernel, &pk, &witness, &cancel).is_err());
}
