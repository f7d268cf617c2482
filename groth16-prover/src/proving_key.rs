//! Proving key structure and loader.
//!
//! Field order and grouping follow
//! `examples/original_source/reference-07-groth16-prover/libsnark/main.cpp`'s
//! own `main()` exactly: `d`, `m`, `ca`, `cb`, `cc`, then the group-element
//! tables `A`, `B1`, `B2`, `L`, `T` — ten fields, no more. The blinding
//! correction folds algebraically into the final MSM
//! ([`crate::pipeline::final_msm`]) the way `main.cpp` does it, rather
//! than through a separately stored `delta` point.
//! Byte-level (de)serialization is `mnt_curves::serde`'s length-prefixed
//! little-endian format, the same shape as
//! `halo2_proofs::poly::kzg::commitment::{write_custom, read_custom}`.

use std::io::{Read, Write};

use mnt_curves::curves::mnt4::{G1MNT4Affine, G2MNT4Affine};
use mnt_curves::fields::fp::Fp;
use mnt_curves::fields::params::Fr;
use mnt_curves::serde::{read_affine, read_fp, read_vec, write_affine, write_fp, write_vec};

use crate::error::{Error, Stage};

pub type Scalar = Fp<Fr>;

/// A loaded Groth16 proving key for a fixed circuit instance.
#[derive(Clone)]
pub struct ProvingKey {
    /// QAP degree bound: `ca`/`cb`/`cc` each have `d + 1` coefficients,
    /// and `t_query` has `d` entries (one per power of `x` up to the
    /// quotient's degree).
    pub d: usize,
    /// Number of witness variables beyond the constant `1` wire; the
    /// witness vector itself has `m + 1` entries, `a_query`/`b1_query`/
    /// `b2_query` each have `m + 1` entries, and `l_query` has `m - 1`
    /// entries (every variable except the constant wire and the public
    /// input/output pair consumed directly by `A`/`B`).
    pub m: usize,

    /// `A(x)`, `B(x)`, `C(x)` of the QAP's fixed instance, in coefficient
    /// form, each of length `d + 1`.
    pub ca: Vec<Scalar>,
    pub cb: Vec<Scalar>,
    pub cc: Vec<Scalar>,

    /// Per-variable G1 query table for the `A` commitment, length `m + 1`.
    pub a_query: Vec<G1MNT4Affine>,
    /// Per-variable G1 query table for the `B` commitment (the G1 half
    /// of the paired knowledge commitment), length `m + 1`.
    pub b1_query: Vec<G1MNT4Affine>,
    /// Per-variable G2 query table for the `B` commitment, length `m + 1`.
    pub b2_query: Vec<G2MNT4Affine>,
    /// Per-variable G1 query table for the `C` commitment's linear part,
    /// length `m - 1`.
    pub l_query: Vec<G1MNT4Affine>,
    /// Per-power-of-`x` G1 query table for the `C` commitment's
    /// quotient-polynomial part (`delta^{-1} * Z(x) * x^i`), length `d`.
    pub t_query: Vec<G1MNT4Affine>,
}

impl ProvingKey {
    /// Reads a proving key from `reader`, in the field order described
    /// above.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self, Error> {
        let mut buf8 = [0u8; 8];
        reader.read_exact(&mut buf8)?;
        let d = u64::from_le_bytes(buf8) as usize;
        reader.read_exact(&mut buf8)?;
        let m = u64::from_le_bytes(buf8) as usize;

        let ca = read_vec(reader, |r| read_fp(r)).map_err(Error::from)?;
        let cb = read_vec(reader, |r| read_fp(r)).map_err(Error::from)?;
        let cc = read_vec(reader, |r| read_fp(r)).map_err(Error::from)?;

        let a_query = read_vec(reader, |r| read_affine(r)).map_err(Error::from)?;
        let b1_query = read_vec(reader, |r| read_affine(r)).map_err(Error::from)?;
        let b2_query = read_vec(reader, |r| read_affine(r)).map_err(Error::from)?;
        let l_query = read_vec(reader, |r| read_affine(r)).map_err(Error::from)?;
        let t_query = read_vec(reader, |r| read_affine(r)).map_err(Error::from)?;

        let key = ProvingKey {
            d,
            m,
            ca,
            cb,
            cc,
            a_query,
            b1_query,
            b2_query,
            l_query,
            t_query,
        };
        key.validate()?;
        Ok(key)
    }

    /// Writes a proving key in the same format [`ProvingKey::read`]
    /// expects, for use by test fixtures and offline key-generation
    /// tooling.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        writer.write_all(&(self.d as u64).to_le_bytes())?;
        writer.write_all(&(self.m as u64).to_le_bytes())?;

        write_vec(writer, &self.ca, |w, v| write_fp(w, v))?;
        write_vec(writer, &self.cb, |w, v| write_fp(w, v))?;
        write_vec(writer, &self.cc, |w, v| write_fp(w, v))?;

        write_vec(writer, &self.a_query, |w, v| write_affine(w, v))?;
        write_vec(writer, &self.b1_query, |w, v| write_affine(w, v))?;
        write_vec(writer, &self.b2_query, |w, v| write_affine(w, v))?;
        write_vec(writer, &self.l_query, |w, v| write_affine(w, v))?;
        write_vec(writer, &self.t_query, |w, v| write_affine(w, v))?;
        Ok(())
    }

    /// Checks each table against its own spec-mandated length: `ca`/`cb`/
    /// `cc` against `d + 1`, `a_query`/`b1_query`/`b2_query` against
    /// `m + 1`, `l_query` against `m - 1`, `t_query` against `d`. A
    /// uniform check against a single length would silently accept a
    /// malformed key whose tables don't actually agree with each other.
    fn validate(&self) -> Result<(), Error> {
        let checks: [(&str, usize, usize); 8] = [
            ("ca", self.ca.len(), self.d + 1),
            ("cb", self.cb.len(), self.d + 1),
            ("cc", self.cc.len(), self.d + 1),
            ("a_query", self.a_query.len(), self.m + 1),
            ("b1_query", self.b1_query.len(), self.m + 1),
            ("b2_query", self.b2_query.len(), self.m + 1),
            ("l_query", self.l_query.len(), self.m.saturating_sub(1)),
            ("t_query", self.t_query.len(), self.d),
        ];
        for (name, found, expected) in checks {
            if found != expected {
                tracing::warn!(field = name, found, expected, "proving key table size mismatch");
                return Err(Error::SizeMismatch {
                    stage: Stage::LoadProvingKey,
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }
}
