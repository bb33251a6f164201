//! CLValue, a typed value in the network's ABI.
//!
//! The binary form of a value is NOT self-describing: decoding needs the
//! [`CLType`] supplied by the surrounding context. The JSON form carries both:
//!
//! ```json
//! { "cl_type": "U512", "bytes": "0400f90295", "parsed": "2500000000" }
//! ```
//!
//! `parsed` is a readable rendering for humans. It is never read back; values
//! are always rebuilt from `bytes`.
//!
//! # Example
//!
//! ```rust
//! use casper_kit::{CLType, CLValue, U512};
//!
//! let amount = CLValue::from(U512::from(2_500_000_000u64));
//! assert_eq!(amount.cl_type(), CLType::U512);
//! assert_eq!(hex::encode(amount.to_bytes()), "0400f90295");
//!
//! let decoded = CLValue::from_bytes_exact(&CLType::U512, &amount.to_bytes()).unwrap();
//! assert_eq!(decoded, amount);
//! ```

use std::collections::BTreeMap;
use std::io::{Read, Write};

use primitive_types::{U128, U256, U512};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Value, json};
use serde_with::serde_as;

use super::bytesrepr::{self, Error};
use super::cl_type::{CLType, CLTyped};
use super::global_key::{AccountHash, Key};
use super::key::PublicKey;
use super::uref::URef;
use crate::error::CLValueError;

/// Upper bound on elements preallocated for a decoded list or map.
const MAX_PREALLOCATION: usize = 1024;

/// A value together with enough type information to encode it.
///
/// The compound variants can be built directly, in which case nothing checks
/// that their elements match the declared types. Prefer the checked
/// constructors ([`CLValue::option`], [`CLValue::list`], [`CLValue::map`]) or
/// call [`CLValue::validate`]; deploy and transaction builders reject
/// arguments that fail it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CLValue {
    Bool(bool),
    I32(i32),
    I64(i64),
    U8(u8),
    U32(u32),
    U64(u64),
    U128(U128),
    U256(U256),
    U512(U512),
    Unit,
    String(String),
    Key(Key),
    URef(URef),
    PublicKey(PublicKey),
    Option {
        inner_type: CLType,
        value: Option<Box<CLValue>>,
    },
    List {
        element_type: CLType,
        values: Vec<CLValue>,
    },
    ByteArray(Vec<u8>),
    Result {
        ok_type: CLType,
        err_type: CLType,
        value: Result<Box<CLValue>, Box<CLValue>>,
    },
    Map {
        key_type: CLType,
        value_type: CLType,
        entries: Vec<(CLValue, CLValue)>,
    },
    Tuple1(Box<CLValue>),
    Tuple2(Box<CLValue>, Box<CLValue>),
    Tuple3(Box<CLValue>, Box<CLValue>, Box<CLValue>),
    Any(Vec<u8>),
}

fn expect_type(expected: &CLType, value: &CLValue) -> Result<(), CLValueError> {
    let found = value.cl_type();
    if &found != expected {
        return Err(CLValueError::TypeMismatch {
            expected: expected.clone(),
            found,
        });
    }
    Ok(())
}

impl CLValue {
    // ========================================================================
    // Checked constructors for compound values
    // ========================================================================

    /// `Some(value)` or `None` of `inner_type`.
    pub fn option(inner_type: CLType, value: Option<CLValue>) -> Result<Self, CLValueError> {
        if let Some(v) = &value {
            expect_type(&inner_type, v)?;
        }
        Ok(CLValue::Option {
            inner_type,
            value: value.map(Box::new),
        })
    }

    /// A list whose elements must all be of `element_type`.
    pub fn list(element_type: CLType, values: Vec<CLValue>) -> Result<Self, CLValueError> {
        for v in &values {
            expect_type(&element_type, v)?;
        }
        Ok(CLValue::List {
            element_type,
            values,
        })
    }

    /// A map whose entries keep the given order on the wire.
    pub fn map(
        key_type: CLType,
        value_type: CLType,
        entries: Vec<(CLValue, CLValue)>,
    ) -> Result<Self, CLValueError> {
        for (k, v) in &entries {
            expect_type(&key_type, k)?;
            expect_type(&value_type, v)?;
        }
        Ok(CLValue::Map {
            key_type,
            value_type,
            entries,
        })
    }

    pub fn result_ok(value: CLValue, err_type: CLType) -> Self {
        CLValue::Result {
            ok_type: value.cl_type(),
            err_type,
            value: Ok(Box::new(value)),
        }
    }

    pub fn result_err(ok_type: CLType, error: CLValue) -> Self {
        CLValue::Result {
            ok_type,
            err_type: error.cl_type(),
            value: Err(Box::new(error)),
        }
    }

    pub fn byte_array(bytes: impl Into<Vec<u8>>) -> Self {
        CLValue::ByteArray(bytes.into())
    }

    pub fn tuple1(t1: CLValue) -> Self {
        CLValue::Tuple1(Box::new(t1))
    }

    pub fn tuple2(t1: CLValue, t2: CLValue) -> Self {
        CLValue::Tuple2(Box::new(t1), Box::new(t2))
    }

    pub fn tuple3(t1: CLValue, t2: CLValue, t3: CLValue) -> Self {
        CLValue::Tuple3(Box::new(t1), Box::new(t2), Box::new(t3))
    }

    pub fn any(bytes: impl Into<Vec<u8>>) -> Self {
        CLValue::Any(bytes.into())
    }

    /// Parse a decimal number as a value of the given numeric type,
    /// rejecting text that does not fit the type's range.
    pub fn number_from_str(cl_type: &CLType, s: &str) -> Result<Self, CLValueError> {
        let invalid = || CLValueError::InvalidNumber(s.to_string(), cl_type.clone());
        let value = match cl_type {
            CLType::I32 => CLValue::I32(s.parse().map_err(|_| invalid())?),
            CLType::I64 => CLValue::I64(s.parse().map_err(|_| invalid())?),
            CLType::U8 => CLValue::U8(s.parse().map_err(|_| invalid())?),
            CLType::U32 => CLValue::U32(s.parse().map_err(|_| invalid())?),
            CLType::U64 => CLValue::U64(s.parse().map_err(|_| invalid())?),
            CLType::U128 => CLValue::U128(U128::from_dec_str(s).map_err(|_| invalid())?),
            CLType::U256 => CLValue::U256(U256::from_dec_str(s).map_err(|_| invalid())?),
            CLType::U512 => CLValue::U512(U512::from_dec_str(s).map_err(|_| invalid())?),
            _ => return Err(invalid()),
        };
        Ok(value)
    }

    /// Check that every element of a compound value has its declared type.
    pub fn validate(&self) -> Result<(), CLValueError> {
        match self {
            CLValue::Option {
                inner_type,
                value: Some(inner),
            } => {
                expect_type(inner_type, inner)?;
                inner.validate()
            }
            CLValue::List {
                element_type,
                values,
            } => values.iter().try_for_each(|v| {
                expect_type(element_type, v)?;
                v.validate()
            }),
            CLValue::Result {
                ok_type,
                err_type,
                value,
            } => match value {
                Ok(ok) => {
                    expect_type(ok_type, ok)?;
                    ok.validate()
                }
                Err(err) => {
                    expect_type(err_type, err)?;
                    err.validate()
                }
            },
            CLValue::Map {
                key_type,
                value_type,
                entries,
            } => entries.iter().try_for_each(|(k, v)| {
                expect_type(key_type, k)?;
                expect_type(value_type, v)?;
                k.validate()?;
                v.validate()
            }),
            CLValue::Tuple1(t1) => t1.validate(),
            CLValue::Tuple2(t1, t2) => {
                t1.validate()?;
                t2.validate()
            }
            CLValue::Tuple3(t1, t2, t3) => {
                t1.validate()?;
                t2.validate()?;
                t3.validate()
            }
            _ => Ok(()),
        }
    }

    // ========================================================================
    // Type and accessors
    // ========================================================================

    /// The type of this value.
    pub fn cl_type(&self) -> CLType {
        match self {
            CLValue::Bool(_) => CLType::Bool,
            CLValue::I32(_) => CLType::I32,
            CLValue::I64(_) => CLType::I64,
            CLValue::U8(_) => CLType::U8,
            CLValue::U32(_) => CLType::U32,
            CLValue::U64(_) => CLType::U64,
            CLValue::U128(_) => CLType::U128,
            CLValue::U256(_) => CLType::U256,
            CLValue::U512(_) => CLType::U512,
            CLValue::Unit => CLType::Unit,
            CLValue::String(_) => CLType::String,
            CLValue::Key(_) => CLType::Key,
            CLValue::URef(_) => CLType::URef,
            CLValue::PublicKey(_) => CLType::PublicKey,
            CLValue::Option { inner_type, .. } => CLType::option(inner_type.clone()),
            CLValue::List { element_type, .. } => CLType::list(element_type.clone()),
            CLValue::ByteArray(bytes) => CLType::ByteArray(bytes.len() as u32),
            CLValue::Result {
                ok_type, err_type, ..
            } => CLType::result(ok_type.clone(), err_type.clone()),
            CLValue::Map {
                key_type,
                value_type,
                ..
            } => CLType::map(key_type.clone(), value_type.clone()),
            CLValue::Tuple1(t1) => CLType::tuple1(t1.cl_type()),
            CLValue::Tuple2(t1, t2) => CLType::tuple2(t1.cl_type(), t2.cl_type()),
            CLValue::Tuple3(t1, t2, t3) => {
                CLType::tuple3(t1.cl_type(), t2.cl_type(), t3.cl_type())
            }
            CLValue::Any(_) => CLType::Any,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CLValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> Option<u8> {
        match self {
            CLValue::U8(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            CLValue::U32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            CLValue::U64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u512(&self) -> Option<U512> {
        match self {
            CLValue::U512(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CLValue::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_key(&self) -> Option<&Key> {
        match self {
            CLValue::Key(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_uref(&self) -> Option<&URef> {
        match self {
            CLValue::URef(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_public_key(&self) -> Option<&PublicKey> {
        match self {
            CLValue::PublicKey(v) => Some(v),
            _ => None,
        }
    }

    /// Raw bytes of a `ByteArray` or `Any` value.
    pub fn as_byte_array(&self) -> Option<&[u8]> {
        match self {
            CLValue::ByteArray(v) | CLValue::Any(v) => Some(v),
            _ => None,
        }
    }

    // ========================================================================
    // Binary codec
    // ========================================================================

    /// The value's bytes, without any type information.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_bytes(&mut out)
            .expect("writing into a Vec should never fail");
        out
    }

    /// Length of [`CLValue::to_bytes`].
    pub fn serialized_length(&self) -> usize {
        self.to_bytes().len()
    }

    pub(crate) fn write_bytes<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        match self {
            CLValue::Bool(v) => writer.write_all(&[*v as u8]),
            CLValue::I32(v) => writer.write_all(&v.to_le_bytes()),
            CLValue::I64(v) => writer.write_all(&v.to_le_bytes()),
            CLValue::U8(v) => writer.write_all(&[*v]),
            CLValue::U32(v) => writer.write_all(&v.to_le_bytes()),
            CLValue::U64(v) => writer.write_all(&v.to_le_bytes()),
            CLValue::U128(v) => bytesrepr::write_u128(writer, v),
            CLValue::U256(v) => bytesrepr::write_u256(writer, v),
            CLValue::U512(v) => bytesrepr::write_u512(writer, v),
            CLValue::Unit => Ok(()),
            CLValue::String(v) => bytesrepr::write_bytes(writer, v.as_bytes()),
            CLValue::Key(v) => borsh::BorshSerialize::serialize(v, writer),
            CLValue::URef(v) => borsh::BorshSerialize::serialize(v, writer),
            CLValue::PublicKey(v) => borsh::BorshSerialize::serialize(v, writer),
            CLValue::Option { value, .. } => match value {
                None => writer.write_all(&[0]),
                Some(inner) => {
                    writer.write_all(&[1])?;
                    inner.write_bytes(writer)
                }
            },
            CLValue::List { values, .. } => {
                let count = u32::try_from(values.len()).map_err(|_| Error::NotRepresentable)?;
                writer.write_all(&count.to_le_bytes())?;
                values.iter().try_for_each(|v| v.write_bytes(writer))
            }
            CLValue::ByteArray(v) | CLValue::Any(v) => writer.write_all(v),
            CLValue::Result { value, .. } => match value {
                Ok(ok) => {
                    writer.write_all(&[1])?;
                    ok.write_bytes(writer)
                }
                Err(err) => {
                    writer.write_all(&[0])?;
                    err.write_bytes(writer)
                }
            },
            CLValue::Map { entries, .. } => {
                let count = u32::try_from(entries.len()).map_err(|_| Error::NotRepresentable)?;
                writer.write_all(&count.to_le_bytes())?;
                for (k, v) in entries {
                    k.write_bytes(writer)?;
                    v.write_bytes(writer)?;
                }
                Ok(())
            }
            CLValue::Tuple1(t1) => t1.write_bytes(writer),
            CLValue::Tuple2(t1, t2) => {
                t1.write_bytes(writer)?;
                t2.write_bytes(writer)
            }
            CLValue::Tuple3(t1, t2, t3) => {
                t1.write_bytes(writer)?;
                t2.write_bytes(writer)?;
                t3.write_bytes(writer)
            }
        }
    }

    /// Decode a value of `cl_type` from the front of `bytes`, returning the
    /// unconsumed remainder.
    pub fn from_bytes<'a>(cl_type: &CLType, bytes: &'a [u8]) -> Result<(Self, &'a [u8]), Error> {
        let mut remainder = bytes;
        let value = Self::read(cl_type, &mut remainder)?;
        Ok((value, remainder))
    }

    /// Decode a value of `cl_type` that must span all of `bytes`.
    pub fn from_bytes_exact(cl_type: &CLType, bytes: &[u8]) -> Result<Self, Error> {
        let (value, remainder) = Self::from_bytes(cl_type, bytes)?;
        if !remainder.is_empty() {
            return Err(Error::LeftOverBytes);
        }
        Ok(value)
    }

    pub(crate) fn read<R: Read>(cl_type: &CLType, reader: &mut R) -> Result<Self, Error> {
        let value = match cl_type {
            CLType::Bool => match bytesrepr::read_u8(reader)? {
                0 => CLValue::Bool(false),
                1 => CLValue::Bool(true),
                _ => return Err(Error::Formatting),
            },
            CLType::I32 => CLValue::I32(i32::from_le_bytes(bytesrepr::read_array(reader)?)),
            CLType::I64 => CLValue::I64(i64::from_le_bytes(bytesrepr::read_array(reader)?)),
            CLType::U8 => CLValue::U8(bytesrepr::read_u8(reader)?),
            CLType::U32 => CLValue::U32(bytesrepr::read_u32(reader)?),
            CLType::U64 => CLValue::U64(bytesrepr::read_u64(reader)?),
            CLType::U128 => CLValue::U128(bytesrepr::read_u128(reader)?),
            CLType::U256 => CLValue::U256(bytesrepr::read_u256(reader)?),
            CLType::U512 => CLValue::U512(bytesrepr::read_u512(reader)?),
            CLType::Unit => CLValue::Unit,
            CLType::String => CLValue::String(bytesrepr::read_string(reader)?),
            CLType::Key => CLValue::Key(borsh::BorshDeserialize::deserialize_reader(reader)?),
            CLType::URef => CLValue::URef(borsh::BorshDeserialize::deserialize_reader(reader)?),
            CLType::PublicKey => {
                CLValue::PublicKey(borsh::BorshDeserialize::deserialize_reader(reader)?)
            }
            CLType::Option(inner) => {
                let value = match bytesrepr::read_u8(reader)? {
                    0 => None,
                    1 => Some(Box::new(Self::read(inner, reader)?)),
                    _ => return Err(Error::Formatting),
                };
                CLValue::Option {
                    inner_type: (**inner).clone(),
                    value,
                }
            }
            CLType::List(element) => {
                let count = bytesrepr::read_u32(reader)? as usize;
                let mut values = Vec::with_capacity(count.min(MAX_PREALLOCATION));
                for _ in 0..count {
                    values.push(Self::read(element, reader)?);
                }
                CLValue::List {
                    element_type: (**element).clone(),
                    values,
                }
            }
            CLType::ByteArray(len) => {
                CLValue::ByteArray(bytesrepr::read_vec(reader, *len as usize)?)
            }
            CLType::Result { ok, err } => {
                let value = match bytesrepr::read_u8(reader)? {
                    0 => Err(Box::new(Self::read(err, reader)?)),
                    1 => Ok(Box::new(Self::read(ok, reader)?)),
                    _ => return Err(Error::Formatting),
                };
                CLValue::Result {
                    ok_type: (**ok).clone(),
                    err_type: (**err).clone(),
                    value,
                }
            }
            CLType::Map { key, value } => {
                let count = bytesrepr::read_u32(reader)? as usize;
                let mut entries = Vec::with_capacity(count.min(MAX_PREALLOCATION));
                for _ in 0..count {
                    let k = Self::read(key, reader)?;
                    let v = Self::read(value, reader)?;
                    entries.push((k, v));
                }
                CLValue::Map {
                    key_type: (**key).clone(),
                    value_type: (**value).clone(),
                    entries,
                }
            }
            CLType::Tuple1([t1]) => CLValue::tuple1(Self::read(t1, reader)?),
            CLType::Tuple2([t1, t2]) => {
                CLValue::tuple2(Self::read(t1, reader)?, Self::read(t2, reader)?)
            }
            CLType::Tuple3([t1, t2, t3]) => CLValue::tuple3(
                Self::read(t1, reader)?,
                Self::read(t2, reader)?,
                Self::read(t3, reader)?,
            ),
            CLType::Any => {
                let mut rest = Vec::new();
                reader
                    .read_to_end(&mut rest)
                    .map_err(|_| Error::EarlyEndOfStream)?;
                CLValue::Any(rest)
            }
        };
        Ok(value)
    }

    // ========================================================================
    // JSON
    // ========================================================================

    /// Human-readable rendering used for the `parsed` JSON field.
    pub fn parsed(&self) -> Value {
        match self {
            CLValue::Bool(v) => json!(v),
            CLValue::I32(v) => json!(v),
            CLValue::I64(v) => json!(v),
            CLValue::U8(v) => json!(v),
            CLValue::U32(v) => json!(v),
            CLValue::U64(v) => json!(v),
            CLValue::U128(v) => json!(v.to_string()),
            CLValue::U256(v) => json!(v.to_string()),
            CLValue::U512(v) => json!(v.to_string()),
            CLValue::Unit | CLValue::Any(_) => Value::Null,
            CLValue::String(v) => json!(v),
            CLValue::Key(v) => json!(v.to_formatted_string()),
            CLValue::URef(v) => json!(v.to_formatted_string()),
            CLValue::PublicKey(v) => json!(v.to_hex()),
            CLValue::Option { value, .. } => value.as_ref().map_or(Value::Null, |v| v.parsed()),
            CLValue::List { values, .. } => Value::Array(values.iter().map(|v| v.parsed()).collect()),
            CLValue::ByteArray(v) => json!(hex::encode(v)),
            CLValue::Result { value, .. } => match value {
                Ok(ok) => json!({ "Ok": ok.parsed() }),
                Err(err) => json!({ "Err": err.parsed() }),
            },
            CLValue::Map { entries, .. } => Value::Array(
                entries
                    .iter()
                    .map(|(k, v)| json!({ "key": k.parsed(), "value": v.parsed() }))
                    .collect(),
            ),
            CLValue::Tuple1(t1) => json!([t1.parsed()]),
            CLValue::Tuple2(t1, t2) => json!([t1.parsed(), t2.parsed()]),
            CLValue::Tuple3(t1, t2, t3) => json!([t1.parsed(), t2.parsed(), t3.parsed()]),
        }
    }
}

#[serde_as]
#[derive(Serialize, Deserialize)]
struct CLValueJson {
    cl_type: CLType,
    #[serde_as(as = "serde_with::hex::Hex")]
    bytes: Vec<u8>,
    #[serde(default)]
    parsed: Value,
}

impl Serialize for CLValue {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        CLValueJson {
            cl_type: self.cl_type(),
            bytes: self.to_bytes(),
            parsed: self.parsed(),
        }
        .serialize(s)
    }
}

impl<'de> Deserialize<'de> for CLValue {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let json = CLValueJson::deserialize(d)?;
        CLValue::from_bytes_exact(&json.cl_type, &json.bytes).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Conversions
// ============================================================================

macro_rules! impl_from_simple {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for CLValue {
                fn from(v: $ty) -> Self {
                    CLValue::$variant(v)
                }
            }
        )*
    };
}

impl_from_simple! {
    bool => Bool,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u32 => U32,
    u64 => U64,
    U128 => U128,
    U256 => U256,
    U512 => U512,
    String => String,
    Key => Key,
    URef => URef,
    PublicKey => PublicKey,
}

impl From<()> for CLValue {
    fn from(_: ()) -> Self {
        CLValue::Unit
    }
}

impl From<&str> for CLValue {
    fn from(v: &str) -> Self {
        CLValue::String(v.to_string())
    }
}

/// Account hashes travel as their raw 32 bytes.
impl From<AccountHash> for CLValue {
    fn from(v: AccountHash) -> Self {
        CLValue::ByteArray(v.value().to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for CLValue {
    fn from(v: [u8; N]) -> Self {
        CLValue::ByteArray(v.to_vec())
    }
}

impl<T: CLTyped + Into<CLValue>> From<Option<T>> for CLValue {
    fn from(v: Option<T>) -> Self {
        CLValue::Option {
            inner_type: T::cl_type(),
            value: v.map(|inner| Box::new(inner.into())),
        }
    }
}

impl<T: CLTyped + Into<CLValue>> From<Vec<T>> for CLValue {
    fn from(v: Vec<T>) -> Self {
        CLValue::List {
            element_type: T::cl_type(),
            values: v.into_iter().map(Into::into).collect(),
        }
    }
}

impl<T, E> From<Result<T, E>> for CLValue
where
    T: CLTyped + Into<CLValue>,
    E: CLTyped + Into<CLValue>,
{
    fn from(v: Result<T, E>) -> Self {
        CLValue::Result {
            ok_type: T::cl_type(),
            err_type: E::cl_type(),
            value: v.map(|ok| Box::new(ok.into())).map_err(|err| Box::new(err.into())),
        }
    }
}

impl<K, V> From<BTreeMap<K, V>> for CLValue
where
    K: CLTyped + Into<CLValue>,
    V: CLTyped + Into<CLValue>,
{
    fn from(v: BTreeMap<K, V>) -> Self {
        CLValue::Map {
            key_type: K::cl_type(),
            value_type: V::cl_type(),
            entries: v.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<T1: Into<CLValue>> From<(T1,)> for CLValue {
    fn from(v: (T1,)) -> Self {
        CLValue::tuple1(v.0.into())
    }
}

impl<T1: Into<CLValue>, T2: Into<CLValue>> From<(T1, T2)> for CLValue {
    fn from(v: (T1, T2)) -> Self {
        CLValue::tuple2(v.0.into(), v.1.into())
    }
}

impl<T1: Into<CLValue>, T2: Into<CLValue>, T3: Into<CLValue>> From<(T1, T2, T3)> for CLValue {
    fn from(v: (T1, T2, T3)) -> Self {
        CLValue::tuple3(v.0.into(), v.1.into(), v.2.into())
    }
}
