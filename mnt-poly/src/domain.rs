//! Radix-2 evaluation domain: FFT, inverse FFT, coset (shifted) FFT, and
//! the vanishing-polynomial helpers a Groth16 QAP-to-polynomial pipeline
//! needs (`add_poly_z`, `divide_by_z_on_coset`).
//!
//! The iterative Cooley-Tukey butterfly network and its `rayon`
//! parallelization are grounded on the teacher's referenced-but-not-
//! retrieved `halo2_proofs::poly::domain`/`arithmetic::best_fft`
//! (imported into `plonk.rs` as `EvaluationDomain`) and its `parallelize`
//! idiom in `halo2_proofs::poly::kzg::commitment`. The five named
//! operations (`iFFT`, `add_poly_Z`, `cosetFFT`, `divide_by_Z_on_coset`,
//! `icosetFFT`) are literally the ones
//! `examples/original_source/reference-07-groth16-prover/libsnark/main.cpp`
//! calls on its own `evaluation_domain`, in the same order. The
//! `EvaluationDomain` struct shape (coeffs/omega/omega_inv/...) also
//! follows `examples/other_examples/50c6027a_arkworks-rs-snark__algebra-src-fft-domain.rs.rs`.

use core::marker::PhantomData;

use ff::{Field, PrimeField};
use tracing::instrument;

use crate::error::Error;

/// Marker for coefficient-form polynomials.
#[derive(Clone, Copy, Debug)]
pub struct Coeff;
/// Marker for polynomials given as evaluations over the domain's own
/// `m`-th roots of unity.
#[derive(Clone, Copy, Debug)]
pub struct Evaluation;
/// Marker for polynomials given as evaluations over a coset of the
/// domain (`g * omega^i` rather than `omega^i`).
#[derive(Clone, Copy, Debug)]
pub struct CosetEvaluation;

/// A polynomial, phantom-tagged by which basis its coefficients/values
/// are expressed in — mirrors `halo2_proofs::poly::Polynomial<F, B>`'s
/// `Coeff`/`LagrangeCoeff`/`ExtendedLagrangeCoeff` tagging, so a
/// coefficient-form buffer and an evaluation-form buffer of the same
/// length can't be passed to the wrong function by accident.
#[derive(Clone, Debug)]
pub struct Polynomial<F, B> {
    values: Vec<F>,
    _basis: PhantomData<B>,
}

impl<F: Field, B> Polynomial<F, B> {
    pub fn from_vec(values: Vec<F>) -> Self {
        Polynomial {
            values,
            _basis: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[F] {
        &self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [F] {
        &mut self.values
    }

    pub fn into_vec(self) -> Vec<F> {
        self.values
    }

    /// Re-tags the buffer as a different basis without touching its
    /// contents. Only used internally by the domain's transform methods,
    /// which are the only code that knows when a re-tag is actually
    /// valid.
    fn retag<B2>(self) -> Polynomial<F, B2> {
        Polynomial {
            values: self.values,
            _basis: PhantomData,
        }
    }
}

/// A fixed radix-2 evaluation domain of size `m = 2^log_m`, for a
/// specific scalar field `F`.
#[derive(Clone, Debug)]
pub struct EvaluationDomain<F: PrimeField> {
    m: usize,
    log_m: u32,
    omega: F,
    omega_inv: F,
    m_inv: F,
    /// Multiplicative generator used to shift into the coset domain.
    g: F,
    g_inv: F,
    /// `(g^m - 1)^{-1}`, the constant every coset evaluation is
    /// multiplied by in `divide_by_z_on_coset` (the vanishing polynomial
    /// is constant across a coset, so this is computed once rather than
    /// per point).
    z_on_coset_inv: F,
}

impl<F: PrimeField> EvaluationDomain<F> {
    /// Builds a domain of size `m`, which must be a power of two no
    /// larger than `2^F::S`.
    pub fn new(m: usize) -> Result<Self, Error> {
        if m == 0 || !m.is_power_of_two() {
            return Err(Error::UnsupportedSize {
                requested: m,
                max_two_adic: F::S as u64,
            });
        }
        let log_m = m.trailing_zeros();
        if log_m > F::S {
            return Err(Error::UnsupportedSize {
                requested: m,
                max_two_adic: F::S as u64,
            });
        }

        // omega = ROOT_OF_UNITY^(2^(S - log_m)), a primitive m-th root of unity.
        let mut omega = F::ROOT_OF_UNITY;
        for _ in log_m..F::S {
            omega = omega.square();
        }
        let omega_inv = omega.invert().expect("omega is nonzero");
        let m_inv = F::from(m as u64).invert().expect("m is invertible in a prime field of larger characteristic");

        let g = F::MULTIPLICATIVE_GENERATOR;
        let g_inv = g.invert().expect("generator is nonzero");
        let g_pow_m = g.pow_vartime([m as u64]);
        let z_on_coset_inv = (g_pow_m - F::ONE)
            .invert()
            .expect("coset generator avoids the domain's own roots of unity");

        Ok(EvaluationDomain {
            m,
            log_m,
            omega,
            omega_inv,
            m_inv,
            g,
            g_inv,
            z_on_coset_inv,
        })
    }

    pub fn size(&self) -> usize {
        self.m
    }

    /// In-place iterative Cooley-Tukey radix-2 NTT: bit-reverses `values`
    /// then runs `log_m` butterfly stages, each stage's independent
    /// butterfly groups spread across the kernel's thread pool.
    fn butterfly_network(values: &mut [F], omega: F, kernel: &mnt_curves::Kernel) {
        let n = values.len();
        let log_n = n.trailing_zeros();

        bit_reverse_permute(values);

        // Precompute twiddle factors for the largest stage; smaller
        // stages reuse a strided prefix of the same table.
        let mut twiddles = vec![F::ONE; n / 2];
        {
            let mut w = F::ONE;
            for t in twiddles.iter_mut() {
                *t = w;
                w *= omega;
            }
        }

        for stage in 0..log_n {
            let half = 1usize << stage;
            let width = half * 2;
            let stride = n / width;

            kernel.install(|| {
                use rayon::prelude::*;
                values.par_chunks_mut(width).for_each(|chunk| {
                    for k in 0..half {
                        let w = twiddles[k * stride];
                        let lo = chunk[k];
                        let hi = chunk[k + half] * w;
                        chunk[k] = lo + hi;
                        chunk[k + half] = lo - hi;
                    }
                });
            });
        }
    }

    /// Forward FFT: coefficients -> evaluations over the domain's `m`-th
    /// roots of unity.
    #[instrument(skip_all, fields(size = self.m))]
    pub fn fft(
        &self,
        kernel: &mnt_curves::Kernel,
        mut poly: Polynomial<F, Coeff>,
    ) -> Polynomial<F, Evaluation> {
        poly.values.resize(self.m, F::ZERO);
        Self::butterfly_network(&mut poly.values, self.omega, kernel);
        poly.retag()
    }

    /// Inverse FFT: evaluations -> coefficients, scaling by `m^{-1}`.
    #[instrument(skip_all, fields(size = self.m))]
    pub fn ifft(
        &self,
        kernel: &mnt_curves::Kernel,
        mut poly: Polynomial<F, Evaluation>,
    ) -> Polynomial<F, Coeff> {
        assert_eq!(poly.values.len(), self.m);
        Self::butterfly_network(&mut poly.values, self.omega_inv, kernel);
        for v in poly.values.iter_mut() {
            *v *= self.m_inv;
        }
        poly.retag()
    }

    /// Coset FFT: shifts every coefficient by `g^i` before running the
    /// forward transform, evaluating the polynomial over `g *
    /// <m-th roots of unity>` instead of the roots themselves.
    #[instrument(skip_all, fields(size = self.m))]
    pub fn coset_fft(
        &self,
        kernel: &mnt_curves::Kernel,
        mut poly: Polynomial<F, Coeff>,
    ) -> Polynomial<F, CosetEvaluation> {
        distribute_powers(&mut poly.values, self.g);
        poly.values.resize(self.m, F::ZERO);
        Self::butterfly_network(&mut poly.values, self.omega, kernel);
        poly.retag()
    }

    /// Inverse coset FFT: inverse transform followed by un-shifting by
    /// `g^{-i}`.
    #[instrument(skip_all, fields(size = self.m))]
    pub fn icoset_fft(
        &self,
        kernel: &mnt_curves::Kernel,
        mut poly: Polynomial<F, CosetEvaluation>,
    ) -> Polynomial<F, Coeff> {
        assert_eq!(poly.values.len(), self.m);
        Self::butterfly_network(&mut poly.values, self.omega_inv, kernel);
        for v in poly.values.iter_mut() {
            *v *= self.m_inv;
        }
        distribute_powers(&mut poly.values, self.g_inv);
        poly.retag()
    }

    /// Adds `coeff * Z(x)` to `poly`, where `Z(x) = x^m - 1` is this
    /// domain's vanishing polynomial. `poly` must have room for a degree-
    /// `m` term (length `>= m + 1`); shorter buffers are grown with
    /// zeros.
    pub fn add_poly_z(&self, coeff: F, poly: &mut Polynomial<F, Coeff>) {
        if poly.values.len() < self.m + 1 {
            poly.values.resize(self.m + 1, F::ZERO);
        }
        poly.values[0] -= coeff;
        poly.values[self.m] += coeff;
    }

    /// Divides every value of a coset-evaluation-form polynomial by
    /// `Z(x)` evaluated at that coset point. `Z` is constant
    /// (`g^m - 1`) across the whole coset, so this is one multiplication
    /// per entry by a precomputed inverse rather than a per-point
    /// division.
    pub fn divide_by_z_on_coset(&self, poly: &mut Polynomial<F, CosetEvaluation>) {
        for v in poly.values.iter_mut() {
            *v *= self.z_on_coset_inv;
        }
    }
}

/// Reverses the low `n.trailing_zeros()` bits of each index and
/// permutes `values` accordingly, in place.
fn bit_reverse_permute<F>(values: &mut [F]) {
    let n = values.len();
    let log_n = n.trailing_zeros();
    for i in 0..n {
        let j = (i as u32).reverse_bits() >> (32 - log_n);
        let j = j as usize;
        if i < j {
            values.swap(i, j);
        }
    }
}

/// Multiplies `values[i]` by `base^i` in place (the coset shift used by
/// `coset_fft`/`icoset_fft`).
fn distribute_powers<F: Field>(values: &mut [F], base: F) {
    let mut power = F::ONE;
    for v in values.iter_mut() {
        *v *= power;
        power *= base;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use super::*;
    use mnt_curves::fields::params::Fr;
    use mnt_curves::Kernel;

    type TestField = mnt_curves::fields::fp::Fp<Fr>;

    /// `Kernel::init` may only succeed once per process; tests in this
    /// module share a single handle instead of each calling `init`.
    fn test_kernel() -> Kernel {
        static KERNEL: OnceLock<Kernel> = OnceLock::new();
        KERNEL
            .get_or_init(|| Kernel::init().expect("first kernel init in this test binary"))
            .clone()
    }

    #[test]
    fn fft_then_ifft_is_identity() {
        let kernel = test_kernel();
        let domain = EvaluationDomain::<TestField>::new(8).unwrap();
        let coeffs: Vec<TestField> = (0..8u64).map(TestField::from).collect();
        let poly = Polynomial::<TestField, Coeff>::from_vec(coeffs.clone());

        let evals = domain.fft(&kernel, poly);
        let back = domain.ifft(&kernel, evals);

        assert_eq!(back.into_vec(), coeffs);
    }

    #[test]
    fn coset_fft_then_icoset_fft_is_identity() {
        let kernel = test_kernel();
        let domain = EvaluationDomain::<TestField>::new(8).unwrap();
        let coeffs: Vec<TestField> = (0..8u64).map(|x| TestField::from(x * 3 + 1)).collect();
        let poly = Polynomial::<TestField, Coeff>::from_vec(coeffs.clone());

        let evals = domain.coset_fft(&kernel, poly);
        let back = domain.icoset_fft(&kernel, evals);

        assert_eq!(back.into_vec(), coeffs);
    }

    #[test]
    fn add_poly_z_sets_endpoints() {
        let domain = EvaluationDomain::<TestField>::new(4).unwrap();
        let mut poly = Polynomial::<TestField, Coeff>::from_vec(vec![TestField::ZERO; 4]);
        domain.add_poly_z(TestField::from(7u64), &mut poly);
        assert_eq!(poly.as_slice()[0], -TestField::from(7u64));
        assert_eq!(poly.as_slice()[4], TestField::from(7u64));
    }

    #[test]
    fn rejects_non_power_of_two_size() {
        assert!(EvaluationDomain::<TestField>::new(3).is_err());
    }
}
