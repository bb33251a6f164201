//! Named call arguments.

use std::io::{Read, Write};

use borsh::{BorshDeserialize, BorshSerialize};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::bytesrepr;
use super::cl_type::CLType;
use super::cl_value::CLValue;
use crate::error::CLValueError;

/// One named argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedArg {
    name: String,
    value: CLValue,
}

impl NamedArg {
    pub fn new(name: impl Into<String>, value: CLValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &CLValue {
        &self.value
    }
}

impl BorshSerialize for NamedArg {
    /// `name`, then the value's bytes length-prefixed, then its CLType.
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        bytesrepr::write_bytes(writer, self.name.as_bytes())?;
        bytesrepr::write_bytes(writer, &self.value.to_bytes())?;
        BorshSerialize::serialize(&self.value.cl_type(), writer)
    }
}

impl BorshDeserialize for NamedArg {
    fn deserialize_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let name = bytesrepr::read_string(reader)?;
        let value_bytes = bytesrepr::read_bytes(reader)?;
        let cl_type = CLType::deserialize_reader(reader)?;
        let value = CLValue::from_bytes_exact(&cl_type, &value_bytes)?;
        Ok(Self { name, value })
    }
}

/// Ordered name → value arguments for payment and session code.
///
/// Order is part of the wire form. Inserting an existing name replaces its
/// value in place, so the argument keeps its original position.
///
/// # Example
///
/// ```rust
/// use casper_kit::{runtime_args, RuntimeArgs, U512};
///
/// let args = runtime_args! {
///     "amount" => U512::from(2_500_000_000u64),
///     "id" => Some(7u64),
/// };
/// assert_eq!(args.len(), 2);
/// assert_eq!(args.get("amount").and_then(|v| v.as_u512()), Some(U512::from(2_500_000_000u64)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuntimeArgs(Vec<NamedArg>);

impl RuntimeArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an argument, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<CLValue>) -> Option<CLValue> {
        self.insert_cl_value(name, value.into())
    }

    pub fn insert_cl_value(&mut self, name: impl Into<String>, value: CLValue) -> Option<CLValue> {
        let name = name.into();
        match self.0.iter_mut().find(|arg| arg.name == name) {
            Some(existing) => Some(std::mem::replace(&mut existing.value, value)),
            None => {
                self.0.push(NamedArg { name, value });
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&CLValue> {
        self.0.iter().find(|arg| arg.name == name).map(|arg| &arg.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove an argument; later arguments shift up one place.
    pub fn remove(&mut self, name: &str) -> Option<CLValue> {
        let index = self.0.iter().position(|arg| arg.name == name)?;
        Some(self.0.remove(index).value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedArg> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|arg| arg.name.as_str())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        bytesrepr::to_bytes(self)
    }

    /// [`CLValue::validate`] every argument.
    pub fn validate(&self) -> Result<(), CLValueError> {
        self.0.iter().try_for_each(|arg| arg.value.validate())
    }
}

impl FromIterator<NamedArg> for RuntimeArgs {
    fn from_iter<I: IntoIterator<Item = NamedArg>>(iter: I) -> Self {
        let mut args = RuntimeArgs::new();
        for arg in iter {
            args.insert_cl_value(arg.name, arg.value);
        }
        args
    }
}

impl BorshSerialize for RuntimeArgs {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let count = u32::try_from(self.0.len()).map_err(|_| bytesrepr::Error::NotRepresentable)?;
        writer.write_all(&count.to_le_bytes())?;
        self.0.iter().try_for_each(|arg| BorshSerialize::serialize(arg, writer))
    }
}

impl BorshDeserialize for RuntimeArgs {
    /// Decoded arguments are kept exactly as sent, so re-encoding reproduces
    /// the original bytes.
    fn deserialize_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let count = bytesrepr::read_u32(reader)?;
        let mut args = Vec::new();
        for _ in 0..count {
            args.push(NamedArg::deserialize_reader(reader)?);
        }
        Ok(Self(args))
    }
}

/// JSON form: `[["amount", {"cl_type": …, "bytes": …, "parsed": …}], …]`.
impl Serialize for RuntimeArgs {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(self.0.len()))?;
        for arg in &self.0 {
            seq.serialize_element(&(&arg.name, &arg.value))?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for RuntimeArgs {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let pairs: Vec<(String, CLValue)> = Deserialize::deserialize(d)?;
        Ok(Self(
            pairs
                .into_iter()
                .map(|(name, value)| NamedArg { name, value })
                .collect(),
        ))
    }
}

/// Build [`RuntimeArgs`] from `name => value` pairs, in order.
#[macro_export]
macro_rules! runtime_args {
    () => {
        $crate::RuntimeArgs::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut args = $crate::RuntimeArgs::new();
        $( args.insert($name, $value); )+
        args
    }};
}

#[cfg(test)]
mod tests {
    use primitive_types::U512;

    use super::*;

    #[test]
    fn test_named_arg_bytes() {
        let mut args = RuntimeArgs::new();
        args.insert("a", 7u8);
        assert_eq!(
            args.to_bytes(),
            vec![
                1, 0, 0, 0, // count
                1, 0, 0, 0, b'a', // name
                1, 0, 0, 0, 7, // value bytes
                3, // CLType::U8
            ]
        );
    }

    #[test]
    fn test_amount_arg_bytes() {
        let mut args = RuntimeArgs::new();
        args.insert("amount", U512::from(24_500_000_000u64));
        assert_eq!(
            hex::encode(args.to_bytes()),
            "0100000006000000616d6f756e740600000005005550b40508"
        );
    }

    #[test]
    fn test_insert_duplicate_keeps_position() {
        let mut args = RuntimeArgs::new();
        args.insert("first", 1u8);
        args.insert("second", 2u8);
        let previous = args.insert("first", 10u8);

        assert_eq!(previous, Some(CLValue::U8(1)));
        assert_eq!(args.names().collect::<Vec<_>>(), vec!["first", "second"]);
        assert_eq!(args.get("first"), Some(&CLValue::U8(10)));
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut args = crate::runtime_args! { "a" => 1u8, "b" => 2u8, "c" => 3u8 };
        assert_eq!(args.remove("b"), Some(CLValue::U8(2)));
        assert_eq!(args.remove("b"), None);
        assert_eq!(args.names().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let args = crate::runtime_args! {
            "amount" => U512::from(5u64),
            "target" => [1u8; 32],
            "id" => Some(9u64),
            "memo" => "hi",
        };
        let bytes = args.to_bytes();
        assert_eq!(bytesrepr::from_bytes_exact::<RuntimeArgs>(&bytes).unwrap(), args);
    }

    #[test]
    fn test_value_length_must_match_type() {
        // Value bytes say 2 bytes but the type is U8.
        let bytes = [1, 0, 0, 0, 1, 0, 0, 0, b'a', 2, 0, 0, 0, 7, 7, 3];
        assert_eq!(
            bytesrepr::from_bytes_exact::<RuntimeArgs>(&bytes).unwrap_err(),
            bytesrepr::Error::LeftOverBytes
        );
    }

    #[test]
    fn test_json_shape() {
        let args = crate::runtime_args! { "amount" => U512::from(5u64) };
        let json = serde_json::to_value(&args).unwrap();
        assert_eq!(
            json,
            serde_json::json!([["amount", {"cl_type": "U512", "bytes": "0105", "parsed": "5"}]])
        );
        assert_eq!(serde_json::from_value::<RuntimeArgs>(json).unwrap(), args);
    }
}
