//! Witness structure and loader.
//!
//! Field order follows the reference prover's `main()`: witness vector
//! `w` (including the constant `1` at index 0), then a single blinding
//! scalar `r`. DESIGN.md Open Question 2 pins the single-sampled-scalar
//! convention: the reference's `d1`/`d2`/`d3` Groth16 blinding terms are
//! all the same value here, so only one scalar is read rather than
//! three.

use std::io::{Read, Write};

use crate::error::Error;
use crate::proving_key::Scalar;
use mnt_curves::serde::{read_fp, read_vec, write_fp, write_vec};

/// A witness assignment plus its blinding scalar.
#[derive(Clone)]
pub struct Witness {
    /// The full variable assignment, `w[0] == 1` by R1CS convention.
    pub w: Vec<Scalar>,
    /// The single blinding scalar shared by all of Groth16's
    /// zero-knowledge re-randomization terms in this pipeline's
    /// convention.
    pub r: Scalar,
}

impl Witness {
    pub fn read<R: Read>(reader: &mut R) -> Result<Self, Error> {
        let w = read_vec(reader, |r| read_fp(r)).map_err(Error::from)?;
        let r = read_fp(reader).map_err(Error::from)?;
        Ok(Witness { w, r })
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        write_vec(writer, &self.w, |w, v| write_fp(w, v))?;
        write_fp(writer, &self.r)?;
        Ok(())
    }
}
