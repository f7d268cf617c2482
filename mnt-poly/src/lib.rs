//! Radix-2 evaluation domain and polynomial arithmetic for the Groth16
//! QAP-to-polynomial pipeline: forward/inverse FFT, coset FFT, and the
//! vanishing-polynomial helpers used to compute the quotient polynomial
//! `H(x) = (A(x)*B(x) - C(x)) / Z(x)`.

pub mod domain;
pub mod error;

pub use domain::{Coeff, CosetEvaluation, Evaluation, EvaluationDomain, Polynomial};
pub use error::Error;
