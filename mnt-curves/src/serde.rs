//! Raw little-endian limb (de)serialization, matching the wire format
//! `spec.md` §6 pins: 64-bit limbs, least-significant first, `u64`
//! length prefixes ahead of every variable-length vector of points or
//! scalars.
//!
//! Grounded on `halo2curves`'s `SerdeObject` trait (`field_common!`'s
//! `from_raw_bytes_unchecked`/`read_raw`/`write_raw`) for the
//! per-element shape, and on
//! `halo2_proofs::poly::kzg::commitment::{write_custom, read_custom}`
//! for the length-prefix-then-sequential-elements container shape.

use std::io::{self, Read, Write};

use crate::curves::{Affine, CurveParameters};
use crate::error::Error;
use crate::fields::fp::Fp;
use crate::fields::params::FieldParameters;
use crate::limbs::{self, LIMBS};

/// Writes a field element's canonical limbs, little-endian, 8 bytes per
/// limb (96 bytes total for a 753-bit field).
pub fn write_fp<P: FieldParameters, W: Write>(w: &mut W, value: &Fp<P>) -> io::Result<()> {
    for limb in value.to_canonical_limbs() {
        w.write_all(&limb.to_le_bytes())?;
    }
    Ok(())
}

/// Reads a field element, rejecting non-canonical (`>= MODULUS`) limb
/// sequences rather than silently reducing them — the loaders need to
/// know a proving/witness file is well-formed, not just parseable.
pub fn read_fp<P: FieldParameters, R: Read>(r: &mut R) -> Result<Fp<P>, Error> {
    let mut raw = [0u64; LIMBS];
    for limb in raw.iter_mut() {
        let mut buf = [0u8; 8];
        r.read_exact(&mut buf)
            .map_err(|_| Error::Truncated { expected: LIMBS, found: 0 })?;
        *limb = u64::from_le_bytes(buf);
    }
    if !limbs::is_less_than(&raw, &P::MODULUS) {
        return Err(Error::NotCanonical);
    }
    Ok(Fp::from_canonical_limbs(raw))
}

/// Writes an affine point as the literal pair `(x, y)` — no infinity
/// flag. The point at infinity has no valid `(x, y)` representation in
/// this format and must not reach this function.
pub fn write_affine<C, W>(w: &mut W, point: &Affine<C>) -> io::Result<()>
where
    C: CurveParameters,
    C::Base: WriteBase,
{
    C::Base::write(w, &point.x)?;
    C::Base::write(w, &point.y)?;
    Ok(())
}

/// Reads an affine point written by [`write_affine`], validating it lies
/// on the curve.
pub fn read_affine<C, R>(r: &mut R) -> Result<Affine<C>, Error>
where
    C: CurveParameters,
    C::Base: WriteBase,
{
    let x = C::Base::read(r)?;
    let y = C::Base::read(r)?;
    let point = Affine {
        x,
        y,
        infinity: subtle::Choice::from(0),
    };
    if !bool::from(point.is_on_curve()) {
        return Err(Error::NotOnCurve);
    }
    Ok(point)
}

/// Writes `u64` length prefix followed by each element via `write_one`.
pub fn write_vec<T, W: Write>(
    w: &mut W,
    items: &[T],
    mut write_one: impl FnMut(&mut W, &T) -> io::Result<()>,
) -> io::Result<()> {
    w.write_all(&(items.len() as u64).to_le_bytes())?;
    for item in items {
        write_one(w, item)?;
    }
    Ok(())
}

/// Reads a `u64` length prefix followed by that many elements via
/// `read_one`.
pub fn read_vec<T, R: Read>(
    r: &mut R,
    mut read_one: impl FnMut(&mut R) -> Result<T, Error>,
) -> Result<Vec<T>, Error> {
    let mut len_bytes = [0u8; 8];
    r.read_exact(&mut len_bytes)
        .map_err(|_| Error::Truncated { expected: 8, found: 0 })?;
    let len = u64::from_le_bytes(len_bytes) as usize;
    let mut out = Vec::with_capacity(len.min(1 << 20));
    for _ in 0..len {
        out.push(read_one(r)?);
    }
    Ok(out)
}

/// Abstracts "how to read/write a curve's base field" so
/// `write_affine`/`read_affine` work for both the plain-`Fp` base fields
/// (`G1MNT4`/`G1MNT6`) and the tower-extension base fields
/// (`G2MNT4`/`G2MNT6`) with one implementation each.
pub trait WriteBase: Sized {
    fn write<W: Write>(w: &mut W, value: &Self) -> io::Result<()>;
    fn read<R: Read>(r: &mut R) -> Result<Self, Error>;
}

impl<P: FieldParameters> WriteBase for Fp<P> {
    fn write<W: Write>(w: &mut W, value: &Self) -> io::Result<()> {
        write_fp(w, value)
    }
    fn read<R: Read>(r: &mut R) -> Result<Self, Error> {
        read_fp(r)
    }
}

impl<P: crate::fields::fq2::QuadraticNonResidue> WriteBase for crate::fields::fq2::Fq2Ext<P> {
    fn write<W: Write>(w: &mut W, value: &Self) -> io::Result<()> {
        write_fp(w, &value.c0)?;
        write_fp(w, &value.c1)
    }
    fn read<R: Read>(r: &mut R) -> Result<Self, Error> {
        Ok(crate::fields::fq2::Fq2Ext::new(read_fp(r)?, read_fp(r)?))
    }
}

impl<P: crate::fields::fq3::CubicNonResidue> WriteBase for crate::fields::fq3::Fq3Ext<P> {
    fn write<W: Write>(w: &mut W, value: &Self) -> io::Result<()> {
        write_fp(w, &value.c0)?;
        write_fp(w, &value.c1)?;
        write_fp(w, &value.c2)
    }
    fn read<R: Read>(r: &mut R) -> Result<Self, Error> {
        Ok(crate::fields::fq3::Fq3Ext::new(
            read_fp(r)?,
            read_fp(r)?,
            read_fp(r)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::params::Fr;

    #[test]
    fn fp_roundtrips_through_bytes() {
        let value = Fp::<Fr>::from(123456789u64);
        let mut buf = Vec::new();
        write_fp(&mut buf, &value).unwrap();
        assert_eq!(buf.len(), LIMBS * 8);
        let mut cursor = &buf[..];
        let decoded: Fp<Fr> = read_fp(&mut cursor).unwrap();
        assert_eq!(value, decoded);
    }

    #[test]
    fn vec_roundtrips_with_length_prefix() {
        let values: Vec<Fp<Fr>> = (0..5u64).map(Fp::<Fr>::from).collect();
        let mut buf = Vec::new();
        write_vec(&mut buf, &values, |w, v| write_fp(w, v)).unwrap();
        assert_eq!(buf.len(), 8 + 5 * LIMBS * 8);
        let mut cursor = &buf[..];
        let decoded = read_vec(&mut cursor, |r| read_fp(r)).unwrap();
        assert_eq!(values, decoded);
    }
}
