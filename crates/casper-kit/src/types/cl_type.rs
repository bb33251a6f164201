//! CLType, the type descriptor of a [`CLValue`](super::CLValue).
//!
//! On the wire a type is its tag byte followed by any nested types; a
//! `ByteArray` also carries its `u32` length. In JSON, simple types are bare
//! strings (`"U512"`) and compound types are single-key objects
//! (`{"Option": "U64"}`, `{"Map": {"key": "String", "value": "U512"}}`).

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::io::Read;

use borsh::{BorshDeserialize, BorshSerialize};
use primitive_types::{U128, U256, U512};
use serde::{Deserialize, Serialize};

use super::bytesrepr::{self, Error};
use super::global_key::Key;
use super::key::PublicKey;
use super::uref::URef;

/// Maximum nesting depth accepted when decoding a CLType from bytes.
pub const CL_TYPE_RECURSION_DEPTH: u8 = 50;

const CL_TYPE_TAG_BOOL: u8 = 0;
const CL_TYPE_TAG_I32: u8 = 1;
const CL_TYPE_TAG_I64: u8 = 2;
const CL_TYPE_TAG_U8: u8 = 3;
const CL_TYPE_TAG_U32: u8 = 4;
const CL_TYPE_TAG_U64: u8 = 5;
const CL_TYPE_TAG_U128: u8 = 6;
const CL_TYPE_TAG_U256: u8 = 7;
const CL_TYPE_TAG_U512: u8 = 8;
const CL_TYPE_TAG_UNIT: u8 = 9;
const CL_TYPE_TAG_STRING: u8 = 10;
const CL_TYPE_TAG_KEY: u8 = 11;
const CL_TYPE_TAG_UREF: u8 = 12;
const CL_TYPE_TAG_OPTION: u8 = 13;
const CL_TYPE_TAG_LIST: u8 = 14;
const CL_TYPE_TAG_BYTE_ARRAY: u8 = 15;
const CL_TYPE_TAG_RESULT: u8 = 16;
const CL_TYPE_TAG_MAP: u8 = 17;
const CL_TYPE_TAG_TUPLE1: u8 = 18;
const CL_TYPE_TAG_TUPLE2: u8 = 19;
const CL_TYPE_TAG_TUPLE3: u8 = 20;
const CL_TYPE_TAG_ANY: u8 = 21;
const CL_TYPE_TAG_PUBLIC_KEY: u8 = 22;

/// Type descriptor for values passed to and stored by contracts.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CLType {
    Bool,
    I32,
    I64,
    U8,
    U32,
    U64,
    U128,
    U256,
    U512,
    Unit,
    String,
    Key,
    URef,
    PublicKey,
    Option(Box<CLType>),
    List(Box<CLType>),
    /// Fixed-length byte array; the length is part of the type.
    ByteArray(u32),
    Result {
        ok: Box<CLType>,
        err: Box<CLType>,
    },
    Map {
        key: Box<CLType>,
        value: Box<CLType>,
    },
    Tuple1([Box<CLType>; 1]),
    Tuple2([Box<CLType>; 2]),
    Tuple3([Box<CLType>; 3]),
    /// Opaque bytes; consumes the rest of the input when decoded.
    Any,
}

impl CLType {
    pub fn option(inner: CLType) -> Self {
        CLType::Option(Box::new(inner))
    }

    pub fn list(element: CLType) -> Self {
        CLType::List(Box::new(element))
    }

    pub fn result(ok: CLType, err: CLType) -> Self {
        CLType::Result {
            ok: Box::new(ok),
            err: Box::new(err),
        }
    }

    pub fn map(key: CLType, value: CLType) -> Self {
        CLType::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn tuple1(t1: CLType) -> Self {
        CLType::Tuple1([Box::new(t1)])
    }

    pub fn tuple2(t1: CLType, t2: CLType) -> Self {
        CLType::Tuple2([Box::new(t1), Box::new(t2)])
    }

    pub fn tuple3(t1: CLType, t2: CLType, t3: CLType) -> Self {
        CLType::Tuple3([Box::new(t1), Box::new(t2), Box::new(t3)])
    }

    /// The wire tag of this type.
    pub fn tag(&self) -> u8 {
        match self {
            CLType::Bool => CL_TYPE_TAG_BOOL,
            CLType::I32 => CL_TYPE_TAG_I32,
            CLType::I64 => CL_TYPE_TAG_I64,
            CLType::U8 => CL_TYPE_TAG_U8,
            CLType::U32 => CL_TYPE_TAG_U32,
            CLType::U64 => CL_TYPE_TAG_U64,
            CLType::U128 => CL_TYPE_TAG_U128,
            CLType::U256 => CL_TYPE_TAG_U256,
            CLType::U512 => CL_TYPE_TAG_U512,
            CLType::Unit => CL_TYPE_TAG_UNIT,
            CLType::String => CL_TYPE_TAG_STRING,
            CLType::Key => CL_TYPE_TAG_KEY,
            CLType::URef => CL_TYPE_TAG_UREF,
            CLType::PublicKey => CL_TYPE_TAG_PUBLIC_KEY,
            CLType::Option(_) => CL_TYPE_TAG_OPTION,
            CLType::List(_) => CL_TYPE_TAG_LIST,
            CLType::ByteArray(_) => CL_TYPE_TAG_BYTE_ARRAY,
            CLType::Result { .. } => CL_TYPE_TAG_RESULT,
            CLType::Map { .. } => CL_TYPE_TAG_MAP,
            CLType::Tuple1(_) => CL_TYPE_TAG_TUPLE1,
            CLType::Tuple2(_) => CL_TYPE_TAG_TUPLE2,
            CLType::Tuple3(_) => CL_TYPE_TAG_TUPLE3,
            CLType::Any => CL_TYPE_TAG_ANY,
        }
    }

    /// Serialized type bytes, as appended to each runtime argument.
    pub fn to_bytes(&self) -> Vec<u8> {
        bytesrepr::to_bytes(self)
    }

    fn write<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&[self.tag()])?;
        match self {
            CLType::Option(inner) | CLType::List(inner) => inner.write(writer),
            CLType::ByteArray(len) => writer.write_all(&len.to_le_bytes()),
            CLType::Result { ok, err } => {
                ok.write(writer)?;
                err.write(writer)
            }
            CLType::Map { key, value } => {
                key.write(writer)?;
                value.write(writer)
            }
            CLType::Tuple1(types) => types.iter().try_for_each(|t| t.write(writer)),
            CLType::Tuple2(types) => types.iter().try_for_each(|t| t.write(writer)),
            CLType::Tuple3(types) => types.iter().try_for_each(|t| t.write(writer)),
            _ => Ok(()),
        }
    }

    fn read_with_depth<R: Read>(reader: &mut R, depth: u8) -> Result<Self, Error> {
        if depth >= CL_TYPE_RECURSION_DEPTH {
            return Err(Error::ExceededRecursionDepth);
        }
        let next = |reader: &mut R| Self::read_with_depth(reader, depth + 1).map(Box::new);

        let cl_type = match bytesrepr::read_u8(reader)? {
            CL_TYPE_TAG_BOOL => CLType::Bool,
            CL_TYPE_TAG_I32 => CLType::I32,
            CL_TYPE_TAG_I64 => CLType::I64,
            CL_TYPE_TAG_U8 => CLType::U8,
            CL_TYPE_TAG_U32 => CLType::U32,
            CL_TYPE_TAG_U64 => CLType::U64,
            CL_TYPE_TAG_U128 => CLType::U128,
            CL_TYPE_TAG_U256 => CLType::U256,
            CL_TYPE_TAG_U512 => CLType::U512,
            CL_TYPE_TAG_UNIT => CLType::Unit,
            CL_TYPE_TAG_STRING => CLType::String,
            CL_TYPE_TAG_KEY => CLType::Key,
            CL_TYPE_TAG_UREF => CLType::URef,
            CL_TYPE_TAG_PUBLIC_KEY => CLType::PublicKey,
            CL_TYPE_TAG_OPTION => CLType::Option(next(reader)?),
            CL_TYPE_TAG_LIST => CLType::List(next(reader)?),
            CL_TYPE_TAG_BYTE_ARRAY => CLType::ByteArray(bytesrepr::read_u32(reader)?),
            CL_TYPE_TAG_RESULT => CLType::Result {
                ok: next(reader)?,
                err: next(reader)?,
            },
            CL_TYPE_TAG_MAP => CLType::Map {
                key: next(reader)?,
                value: next(reader)?,
            },
            CL_TYPE_TAG_TUPLE1 => CLType::Tuple1([next(reader)?]),
            CL_TYPE_TAG_TUPLE2 => CLType::Tuple2([next(reader)?, next(reader)?]),
            CL_TYPE_TAG_TUPLE3 => CLType::Tuple3([next(reader)?, next(reader)?, next(reader)?]),
            CL_TYPE_TAG_ANY => CLType::Any,
            other => return Err(Error::UnknownValue(other)),
        };
        Ok(cl_type)
    }
}

impl BorshSerialize for CLType {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.write(writer)
    }
}

impl BorshDeserialize for CLType {
    fn deserialize_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        Ok(Self::read_with_depth(reader, 0)?)
    }
}

impl Display for CLType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CLType::Option(inner) => write!(f, "Option({})", inner),
            CLType::List(inner) => write!(f, "List({})", inner),
            CLType::ByteArray(len) => write!(f, "ByteArray({})", len),
            CLType::Result { ok, err } => write!(f, "Result({}, {})", ok, err),
            CLType::Map { key, value } => write!(f, "Map({}, {})", key, value),
            CLType::Tuple1([t1]) => write!(f, "Tuple1({})", t1),
            CLType::Tuple2([t1, t2]) => write!(f, "Tuple2({}, {})", t1, t2),
            CLType::Tuple3([t1, t2, t3]) => write!(f, "Tuple3({}, {}, {})", t1, t2, t3),
            simple => write!(f, "{:?}", simple),
        }
    }
}

// ============================================================================
// CLTyped
// ============================================================================

/// Rust types with a fixed CLType.
pub trait CLTyped {
    fn cl_type() -> CLType;
}

macro_rules! impl_cl_typed {
    ($($ty:ty => $cl:expr),* $(,)?) => {
        $(
            impl CLTyped for $ty {
                fn cl_type() -> CLType {
                    $cl
                }
            }
        )*
    };
}

impl_cl_typed! {
    bool => CLType::Bool,
    i32 => CLType::I32,
    i64 => CLType::I64,
    u8 => CLType::U8,
    u32 => CLType::U32,
    u64 => CLType::U64,
    U128 => CLType::U128,
    U256 => CLType::U256,
    U512 => CLType::U512,
    () => CLType::Unit,
    String => CLType::String,
    &str => CLType::String,
    Key => CLType::Key,
    URef => CLType::URef,
    PublicKey => CLType::PublicKey,
}

impl<T: CLTyped> CLTyped for Option<T> {
    fn cl_type() -> CLType {
        CLType::option(T::cl_type())
    }
}

impl<T: CLTyped> CLTyped for Vec<T> {
    fn cl_type() -> CLType {
        CLType::list(T::cl_type())
    }
}

impl<const N: usize> CLTyped for [u8; N] {
    fn cl_type() -> CLType {
        CLType::ByteArray(N as u32)
    }
}

impl<T: CLTyped, E: CLTyped> CLTyped for Result<T, E> {
    fn cl_type() -> CLType {
        CLType::result(T::cl_type(), E::cl_type())
    }
}

impl<K: CLTyped, V: CLTyped> CLTyped for BTreeMap<K, V> {
    fn cl_type() -> CLType {
        CLType::map(K::cl_type(), V::cl_type())
    }
}

impl<T1: CLTyped> CLTyped for (T1,) {
    fn cl_type() -> CLType {
        CLType::tuple1(T1::cl_type())
    }
}

impl<T1: CLTyped, T2: CLTyped> CLTyped for (T1, T2) {
    fn cl_type() -> CLType {
        CLType::tuple2(T1::cl_type(), T2::cl_type())
    }
}

impl<T1: CLTyped, T2: CLTyped, T3: CLTyped> CLTyped for (T1, T2, T3) {
    fn cl_type() -> CLType {
        CLType::tuple3(T1::cl_type(), T2::cl_type(), T3::cl_type())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_simple_tags() {
        assert_eq!(CLType::Bool.to_bytes(), vec![0]);
        assert_eq!(CLType::U512.to_bytes(), vec![8]);
        assert_eq!(CLType::String.to_bytes(), vec![10]);
        assert_eq!(CLType::Any.to_bytes(), vec![21]);
        assert_eq!(CLType::PublicKey.to_bytes(), vec![22]);
    }

    #[test]
    fn test_compound_bytes() {
        assert_eq!(CLType::option(CLType::U64).to_bytes(), vec![13, 5]);
        assert_eq!(CLType::ByteArray(32).to_bytes(), vec![15, 32, 0, 0, 0]);
        assert_eq!(
            CLType::map(CLType::String, CLType::list(CLType::U8)).to_bytes(),
            vec![17, 10, 14, 3]
        );
        assert_eq!(
            CLType::tuple3(CLType::Bool, CLType::Unit, CLType::Key).to_bytes(),
            vec![20, 0, 9, 11]
        );
        assert_eq!(CLType::result(CLType::U8, CLType::String).to_bytes(), vec![16, 3, 10]);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let types = [
            CLType::option(CLType::list(CLType::ByteArray(7))),
            CLType::map(CLType::Key, CLType::tuple2(CLType::URef, CLType::PublicKey)),
            CLType::result(CLType::Unit, CLType::I64),
            CLType::tuple1(CLType::U256),
        ];
        for cl_type in types {
            let bytes = cl_type.to_bytes();
            assert_eq!(bytesrepr::from_bytes_exact::<CLType>(&bytes).unwrap(), cl_type);
        }
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(
            bytesrepr::from_bytes_exact::<CLType>(&[23]).unwrap_err(),
            Error::UnknownValue(23)
        );
        assert_eq!(
            bytesrepr::from_bytes_exact::<CLType>(&[13]).unwrap_err(),
            Error::EarlyEndOfStream
        );
    }

    #[test]
    fn test_recursion_limit() {
        let mut ok = vec![CL_TYPE_TAG_OPTION; 49];
        ok.push(CL_TYPE_TAG_BOOL);
        assert!(bytesrepr::from_bytes_exact::<CLType>(&ok).is_ok());

        let mut too_deep = vec![CL_TYPE_TAG_OPTION; 50];
        too_deep.push(CL_TYPE_TAG_BOOL);
        assert_eq!(
            bytesrepr::from_bytes_exact::<CLType>(&too_deep).unwrap_err(),
            Error::ExceededRecursionDepth
        );
    }

    #[test]
    fn test_json_form() {
        assert_eq!(serde_json::to_value(CLType::U512).unwrap(), json!("U512"));
        assert_eq!(
            serde_json::to_value(CLType::option(CLType::U64)).unwrap(),
            json!({"Option": "U64"})
        );
        assert_eq!(
            serde_json::to_value(CLType::ByteArray(32)).unwrap(),
            json!({"ByteArray": 32})
        );
        assert_eq!(
            serde_json::to_value(CLType::map(CLType::String, CLType::U512)).unwrap(),
            json!({"Map": {"key": "String", "value": "U512"}})
        );
        assert_eq!(
            serde_json::to_value(CLType::result(CLType::Bool, CLType::String)).unwrap(),
            json!({"Result": {"ok": "Bool", "err": "String"}})
        );
        assert_eq!(
            serde_json::to_value(CLType::tuple2(CLType::U8, CLType::Key)).unwrap(),
            json!({"Tuple2": ["U8", "Key"]})
        );

        let parsed: CLType = serde_json::from_value(json!({"List": {"Option": "URef"}})).unwrap();
        assert_eq!(parsed, CLType::list(CLType::option(CLType::URef)));
    }

    #[test]
    fn test_cl_typed() {
        assert_eq!(<Vec<u8>>::cl_type(), CLType::list(CLType::U8));
        assert_eq!(<[u8; 32]>::cl_type(), CLType::ByteArray(32));
        assert_eq!(
            <BTreeMap<String, U512>>::cl_type(),
            CLType::map(CLType::String, CLType::U512)
        );
        assert_eq!(
            <(u8, Option<String>)>::cl_type(),
            CLType::tuple2(CLType::U8, CLType::option(CLType::String))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(CLType::U512.to_string(), "U512");
        assert_eq!(
            CLType::map(CLType::String, CLType::option(CLType::U8)).to_string(),
            "Map(String, Option(U8))"
        );
    }
}
