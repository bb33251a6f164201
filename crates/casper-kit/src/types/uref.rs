//! Unforgeable references.

use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::bytesrepr;
use crate::error::KeyFromStrError;

const UREF_PREFIX: &str = "uref-";

/// Access rights bitmask carried by a [`URef`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AccessRights(u8);

impl AccessRights {
    pub const NONE: Self = Self(0);
    pub const READ: Self = Self(0b001);
    pub const WRITE: Self = Self(0b010);
    pub const ADD: Self = Self(0b100);
    pub const READ_ADD: Self = Self(0b101);
    pub const READ_WRITE: Self = Self(0b011);
    pub const ADD_WRITE: Self = Self(0b110);
    pub const READ_ADD_WRITE: Self = Self(0b111);

    /// Build from raw bits; `None` if any bit above `ADD` is set.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits > Self::READ_ADD_WRITE.0 {
            None
        } else {
            Some(Self(bits))
        }
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_readable(&self) -> bool {
        self.contains(Self::READ)
    }

    pub fn is_writeable(&self) -> bool {
        self.contains(Self::WRITE)
    }

    pub fn is_addable(&self) -> bool {
        self.contains(Self::ADD)
    }
}

impl std::ops::BitOr for AccessRights {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl Debug for AccessRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [(Self::READ, "READ"), (Self::ADD, "ADD"), (Self::WRITE, "WRITE")]
            .into_iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
            .collect();
        if names.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", names.join("_"))
        }
    }
}

/// A 32-byte address into global state plus the rights the holder has on it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct URef {
    addr: [u8; 32],
    access_rights: AccessRights,
}

impl URef {
    /// Length of the wire form: address plus rights byte.
    pub const SERIALIZED_LENGTH: usize = 33;

    pub const fn new(addr: [u8; 32], access_rights: AccessRights) -> Self {
        Self {
            addr,
            access_rights,
        }
    }

    pub const fn addr(&self) -> [u8; 32] {
        self.addr
    }

    pub const fn access_rights(&self) -> AccessRights {
        self.access_rights
    }

    /// Same address with different rights.
    pub const fn with_access_rights(self, access_rights: AccessRights) -> Self {
        Self::new(self.addr, access_rights)
    }

    /// `uref-<hex addr>-<rights as three octal digits>`, e.g. `uref-…-007`.
    pub fn to_formatted_string(&self) -> String {
        format!(
            "{}{}-{:03o}",
            UREF_PREFIX,
            hex::encode(self.addr),
            self.access_rights.bits()
        )
    }

    /// Parse the form produced by [`URef::to_formatted_string`].
    pub fn from_formatted_str(input: &str) -> Result<Self, KeyFromStrError> {
        let rest = input
            .strip_prefix(UREF_PREFIX)
            .ok_or_else(|| KeyFromStrError::UnknownPrefix(input.to_string()))?;
        let (addr_hex, rights) = rest
            .rsplit_once('-')
            .ok_or_else(|| KeyFromStrError::InvalidAccessRights(input.to_string()))?;
        let addr = super::global_key::decode_hash32(addr_hex, input)?;
        let access_rights = u8::from_str_radix(rights, 8)
            .ok()
            .and_then(AccessRights::from_bits)
            .ok_or_else(|| KeyFromStrError::InvalidAccessRights(input.to_string()))?;
        Ok(Self::new(addr, access_rights))
    }
}

impl Display for URef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_formatted_string())
    }
}

impl Debug for URef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "URef({})", self)
    }
}

impl FromStr for URef {
    type Err = KeyFromStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_formatted_str(s)
    }
}

impl Serialize for URef {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_formatted_string())
    }
}

impl<'de> Deserialize<'de> for URef {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = serde::Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl BorshSerialize for URef {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.addr)?;
        writer.write_all(&[self.access_rights.bits()])
    }
}

impl BorshDeserialize for URef {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let addr = bytesrepr::read_array(reader)?;
        let bits = bytesrepr::read_u8(reader)?;
        let access_rights = AccessRights::from_bits(bits).ok_or(bytesrepr::Error::Formatting)?;
        Ok(Self::new(addr, access_rights))
    }
}
