//! Compact-size integers and fixed-width big-endian fields over `io::Read` / `io::Write`.
//!
//! Compact-size layout (prefix byte selects the width):
//!
//! | value range            | bytes                      |
//! |------------------------|----------------------------|
//! | `< 0xFD`               | value                      |
//! | `<= 0xFFFF`            | `0xFD` then BE16           |
//! | `<= 0xFFFF_FFFF`       | `0xFE` then BE32           |
//! | otherwise              | `0xFF` then BE64           |
//!
//! Decoding accepts any prefix form whose value fits its width; canonicality
//! is left to the protocol layer.

use std::io::{self, Read, Write};

use tracing::debug;

use crate::errors::CodecError;

const PREFIX_U16: u8 = 0xFD;
const PREFIX_U32: u8 = 0xFE;
const PREFIX_U64: u8 = 0xFF;

#[inline]
#[must_use]
pub const fn be64(x: u64) -> [u8; 8] {
    x.to_be_bytes()
}

#[inline]
#[must_use]
pub const fn be32(x: u32) -> [u8; 4] {
    x.to_be_bytes()
}

/// Read exactly `N` raw bytes.
///
/// # Errors
/// `UnexpectedEof` if the source ends first.
pub fn read_array<const N: usize, R: Read + ?Sized>(r: &mut R) -> io::Result<[u8; N]> {
    let mut out = [0u8; N];
    r.read_exact(&mut out)?;
    Ok(out)
}

/// # Errors
/// `UnexpectedEof` on a short source.
pub fn read_u16_be<R: Read + ?Sized>(r: &mut R) -> io::Result<u16> {
    Ok(u16::from_be_bytes(read_array::<2, R>(r)?))
}

/// # Errors
/// `UnexpectedEof` on a short source.
pub fn read_u32_be<R: Read + ?Sized>(r: &mut R) -> io::Result<u32> {
    Ok(u32::from_be_bytes(read_array::<4, R>(r)?))
}

/// # Errors
/// `UnexpectedEof` on a short source.
pub fn read_u64_be<R: Read + ?Sized>(r: &mut R) -> io::Result<u64> {
    Ok(u64::from_be_bytes(read_array::<8, R>(r)?))
}

/// # Errors
/// `UnexpectedEof` on a short source.
pub fn read_i64_be<R: Read + ?Sized>(r: &mut R) -> io::Result<i64> {
    Ok(i64::from_be_bytes(read_array::<8, R>(r)?))
}

/// # Errors
/// `WriteZero` or any other error from the sink.
pub fn write_u32_be<W: Write + ?Sized>(w: &mut W, x: u32) -> io::Result<()> {
    w.write_all(&be32(x))
}

/// # Errors
/// `WriteZero` or any other error from the sink.
pub fn write_u64_be<W: Write + ?Sized>(w: &mut W, x: u64) -> io::Result<()> {
    w.write_all(&be64(x))
}

/// # Errors
/// `WriteZero` or any other error from the sink.
pub fn write_i64_be<W: Write + ?Sized>(w: &mut W, x: i64) -> io::Result<()> {
    w.write_all(&x.to_be_bytes())
}

/// Read a compact-size integer.
///
/// # Errors
/// `UnexpectedEof` if the prefix or its payload is cut short.
pub fn read_var_int<R: Read + ?Sized>(r: &mut R) -> io::Result<u64> {
    let [prefix] = read_array::<1, R>(r)?;
    match prefix {
        PREFIX_U64 => read_u64_be(r),
        PREFIX_U32 => Ok(u64::from(read_u32_be(r)?)),
        PREFIX_U16 => Ok(u64::from(read_u16_be(r)?)),
        small => Ok(u64::from(small)),
    }
}

/// Write a compact-size integer in its shortest form.
///
/// # Errors
/// Propagates sink errors.
pub fn write_var_int<W: Write + ?Sized>(w: &mut W, x: u64) -> io::Result<()> {
    if let Ok(small) = u8::try_from(x) {
        if small < PREFIX_U16 {
            return w.write_all(&[small]);
        }
    }
    if let Ok(v) = u16::try_from(x) {
        let b = v.to_be_bytes();
        return w.write_all(&[PREFIX_U16, b[0], b[1]]);
    }
    if let Ok(v) = u32::try_from(x) {
        let mut buf = [PREFIX_U32, 0, 0, 0, 0];
        buf[1..].copy_from_slice(&be32(v));
        return w.write_all(&buf);
    }
    let mut buf = [PREFIX_U64, 0, 0, 0, 0, 0, 0, 0, 0];
    buf[1..].copy_from_slice(&be64(x));
    w.write_all(&buf)
}

/// Number of bytes `write_var_int` emits for `x`.
#[must_use]
pub const fn var_int_serialize_size(x: u64) -> usize {
    if x < 0xFD {
        1
    } else if x <= 0xFFFF {
        3
    } else if x <= 0xFFFF_FFFF {
        5
    } else {
        9
    }
}

/// Read a varint length, reject it if it exceeds `max`, then read that many bytes.
///
/// The limit is checked before any allocation, so a hostile length prefix
/// costs at most the prefix itself.
///
/// # Errors
/// `CodecError::TooLong` for an oversize declared length, `CodecError::Io`
/// when the source runs out first.
pub fn read_var_bytes<R: Read + ?Sized>(
    r: &mut R,
    max: usize,
    op: &'static str,
) -> Result<Vec<u8>, CodecError> {
    let declared = read_var_int(r)?;
    let len = match usize::try_from(declared) {
        Ok(len) if len <= max => len,
        _ => {
            debug!(op, declared, max, "declared length exceeds limit");
            return Err(CodecError::TooLong { op, declared, max });
        }
    };
    let mut out = vec![0u8; len];
    r.read_exact(&mut out)?;
    Ok(out)
}

/// Varint length prefix followed by the raw bytes.
///
/// # Errors
/// Propagates sink errors.
pub fn write_var_bytes<W: Write + ?Sized>(w: &mut W, b: &[u8]) -> io::Result<()> {
    write_var_int(w, b.len() as u64)?;
    w.write_all(b)
}
