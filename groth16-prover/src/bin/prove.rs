//! Command-line entry point: reads a proving key and witness from disk,
//! runs the proving pipeline, and writes the resulting proof.
//!
//! `clap`'s derive API is the pack's own idiom for a small binary's
//! argument parsing (see `examples/other_examples` for comparable
//! `#[derive(Parser)]` CLIs); the teacher itself has no CLI surface to
//! draw on since `sha/src/main.rs` only drives a circuit-layout drawing
//! routine.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use groth16_prover::{prove, CancelToken, ProvingKey, Witness};

/// Generate a Groth16 proof for a fixed circuit instance.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the proving key, in `ProvingKey::read`'s binary format.
    #[arg(long)]
    proving_key: PathBuf,

    /// Path to the witness assignment and blinding scalar.
    #[arg(long)]
    witness: PathBuf,

    /// Where to write the resulting proof.
    #[arg(long)]
    out: PathBuf,

    /// Number of worker threads for the MSM/FFT kernel. Defaults to the
    /// number of logical CPUs.
    #[arg(long)]
    threads: Option<usize>,
}

fn run(args: Args) -> Result<(), groth16_prover::Error> {
    let kernel = match args.threads {
        Some(threads) => mnt_curves::Kernel::init_with_threads(threads)?,
        None => mnt_curves::Kernel::init()?,
    };

    let pk = ProvingKey::read(&mut BufReader::new(File::open(&args.proving_key)?))?;
    let witness = Witness::read(&mut BufReader::new(File::open(&args.witness)?))?;

    let cancel = CancelToken::new();
    let proof = prove(&kernel, &pk, &witness, &cancel)?;

    let mut out = BufWriter::new(File::create(&args.out)?);
    mnt_curves::serde::write_affine(&mut out, &proof.pi_a)?;
    mnt_curves::serde::write_affine(&mut out, &proof.pi_b1)?;
    mnt_curves::serde::write_affine(&mut out, &proof.pi_b2)?;
    mnt_curves::serde::write_affine(&mut out, &proof.pi_l)?;
    mnt_curves::serde::write_affine(&mut out, &proof.pi_h)?;

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "proof generation failed");
            ExitCode::FAILURE
        }
    }
}
