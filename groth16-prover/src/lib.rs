//! Groth16 proof generation over the MNT4-753/MNT6-753 curve cycle:
//! loads a proving key and witness, runs the proving pipeline, and
//! produces a proof.

pub mod cancel;
pub mod error;
pub mod pipeline;
pub mod proving_key;
pub mod witness;

pub use cancel::CancelToken;
pub use error::{Error, Stage};
pub use pipeline::{prove, Proof};
pub use proving_key::ProvingKey;
pub use witness::Witness;
