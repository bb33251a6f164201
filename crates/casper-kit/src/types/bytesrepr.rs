//! Binary representation primitives shared by every wire type.
//!
//! Most of the network's binary layout coincides with borsh: fixed-width
//! little-endian integers, `u32`-length-prefixed strings and byte vectors,
//! `0`/`1`-tagged options and `u8`-tagged enums. Structural types therefore
//! derive `BorshSerialize`/`BorshDeserialize`, and the helpers here translate
//! borsh's `io::Error`s into the typed [`Error`] callers match on.
//!
//! The pieces borsh does not cover live here too: the variable-width encoding
//! of 128/256/512-bit unsigned integers and BLAKE2b-256 hashing.

use std::io::{self, Read, Write};

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest as _};
use borsh::{BorshDeserialize, BorshSerialize};

pub use crate::error::BytesReprError as Error;

/// Serialized length of a tag byte.
pub const U8_SERIALIZED_LENGTH: usize = 1;
/// Serialized length of a `u32`.
pub const U32_SERIALIZED_LENGTH: usize = 4;
/// Serialized length of a `u64`.
pub const U64_SERIALIZED_LENGTH: usize = 8;
/// Length of a BLAKE2b-256 digest.
pub const BLAKE2B_DIGEST_LENGTH: usize = 32;

/// Message borsh substitutes for `UnexpectedEof` when reading integers.
const BORSH_UNEXPECTED_LENGTH: &str = "Unexpected length of input";
/// Prefix of the message derived enum decoders emit for an unknown tag.
const BORSH_UNEXPECTED_VARIANT: &str = "Unexpected variant tag: ";

/// Hashes `data` with BLAKE2b using a 32-byte digest.
pub fn blake2b(data: impl AsRef<[u8]>) -> [u8; BLAKE2B_DIGEST_LENGTH] {
    let mut hasher = Blake2b::<U32>::new();
    hasher.update(data.as_ref());
    let mut out = [0u8; BLAKE2B_DIGEST_LENGTH];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Serializes a value to its wire bytes.
pub fn to_bytes<T: BorshSerialize + ?Sized>(value: &T) -> Vec<u8> {
    borsh::to_vec(value).expect("serializing into a Vec should never fail")
}

/// Deserializes a value from the front of `bytes`, returning the remainder.
pub fn from_bytes<T: BorshDeserialize>(bytes: &[u8]) -> Result<(T, &[u8]), Error> {
    let mut remainder = bytes;
    let value = T::deserialize_reader(&mut remainder)?;
    Ok((value, remainder))
}

/// Deserializes a value that must span all of `bytes`.
pub fn from_bytes_exact<T: BorshDeserialize>(bytes: &[u8]) -> Result<T, Error> {
    let (value, remainder) = from_bytes(bytes)?;
    if !remainder.is_empty() {
        return Err(Error::LeftOverBytes);
    }
    Ok(value)
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        if let Some(inner) = error.get_ref().and_then(|e| e.downcast_ref::<Error>()) {
            return *inner;
        }
        match error.kind() {
            io::ErrorKind::UnexpectedEof => Error::EarlyEndOfStream,
            io::ErrorKind::InvalidData => {
                let message = error.to_string();
                if message == BORSH_UNEXPECTED_LENGTH {
                    return Error::EarlyEndOfStream;
                }
                message
                    .strip_prefix(BORSH_UNEXPECTED_VARIANT)
                    .and_then(|tag| tag.parse::<u8>().ok())
                    .map_or(Error::Formatting, Error::UnknownValue)
            }
            _ => Error::Formatting,
        }
    }
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        let kind = match error {
            Error::EarlyEndOfStream => io::ErrorKind::UnexpectedEof,
            _ => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, error)
    }
}

// ============================================================================
// Reader helpers
// ============================================================================

/// Reads exactly `N` bytes.
pub(crate) fn read_array<R: Read, const N: usize>(reader: &mut R) -> Result<[u8; N], Error> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf).map_err(|_| Error::EarlyEndOfStream)?;
    Ok(buf)
}

/// Reads exactly `len` bytes into a new vector.
pub(crate) fn read_vec<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    let read = reader
        .take(len as u64)
        .read_to_end(&mut buf)
        .map_err(|_| Error::EarlyEndOfStream)?;
    if read != len {
        return Err(Error::EarlyEndOfStream);
    }
    Ok(buf)
}

pub(crate) fn read_u8<R: Read>(reader: &mut R) -> Result<u8, Error> {
    Ok(read_array::<R, 1>(reader)?[0])
}

pub(crate) fn read_u32<R: Read>(reader: &mut R) -> Result<u32, Error> {
    Ok(u32::from_le_bytes(read_array(reader)?))
}

pub(crate) fn read_u64<R: Read>(reader: &mut R) -> Result<u64, Error> {
    Ok(u64::from_le_bytes(read_array(reader)?))
}

/// Reads a `u32`-length-prefixed byte vector.
pub(crate) fn read_bytes<R: Read>(reader: &mut R) -> Result<Vec<u8>, Error> {
    let len = read_u32(reader)? as usize;
    read_vec(reader, len)
}

/// Reads a `u32`-length-prefixed UTF-8 string.
pub(crate) fn read_string<R: Read>(reader: &mut R) -> Result<String, Error> {
    String::from_utf8(read_bytes(reader)?).map_err(|_| Error::Formatting)
}

/// Writes a `u32`-length-prefixed byte slice.
pub(crate) fn write_bytes<W: Write>(writer: &mut W, bytes: &[u8]) -> io::Result<()> {
    let len = u32::try_from(bytes.len()).map_err(|_| Error::NotRepresentable)?;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(bytes)
}

// ============================================================================
// Variable-width unsigned integers (U128 / U256 / U512)
// ============================================================================

/// Writes a little-endian unsigned magnitude as `[len, bytes...]`, trimming
/// high zero bytes. Zero encodes as the single byte `0x00`.
pub(crate) fn write_big_uint<W: Write>(writer: &mut W, le_bytes: &[u8]) -> io::Result<()> {
    let len = le_bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    writer.write_all(&[len as u8])?;
    writer.write_all(&le_bytes[..len])
}

/// Reads a `[len, bytes...]` magnitude of at most `max_len` bytes and returns
/// it zero-extended to `max_len` little-endian bytes.
pub(crate) fn read_big_uint<R: Read>(reader: &mut R, max_len: usize) -> Result<Vec<u8>, Error> {
    let len = read_u8(reader)? as usize;
    if len > max_len {
        return Err(Error::Formatting);
    }
    let mut bytes = read_vec(reader, len)?;
    bytes.resize(max_len, 0);
    Ok(bytes)
}

macro_rules! impl_big_uint_codec {
    ($write:ident, $read:ident, $ty:ty, $len:expr) => {
        pub(crate) fn $write<W: Write>(writer: &mut W, value: &$ty) -> io::Result<()> {
            let mut le = [0u8; $len];
            value.to_little_endian(&mut le);
            write_big_uint(writer, &le)
        }

        pub(crate) fn $read<R: Read>(reader: &mut R) -> Result<$ty, Error> {
            let le = read_big_uint(reader, $len)?;
            Ok(<$ty>::from_little_endian(&le))
        }
    };
}

impl_big_uint_codec!(write_u128, read_u128, primitive_types::U128, 16);
impl_big_uint_codec!(write_u256, read_u256, primitive_types::U256, 32);
impl_big_uint_codec!(write_u512, read_u512, primitive_types::U512, 64);
