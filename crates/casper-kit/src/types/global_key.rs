//! Global state keys.
//!
//! A [`Key`] addresses one entry of global state. On the wire it is a tag byte
//! followed by a tag-specific payload; as text it is a prefixed formatted
//! string such as `account-hash-<hex>` or `uref-<hex>-007`.
//!
//! | Tag | Variant                | Payload                         | Prefix                     |
//! |-----|------------------------|---------------------------------|----------------------------|
//! | 0   | `Account`              | 32-byte account hash            | `account-hash-`            |
//! | 1   | `Hash`                 | 32 bytes                        | `hash-`                    |
//! | 2   | `URef`                 | 32 bytes + access rights        | `uref-`                    |
//! | 3   | `Transfer`             | 32 bytes                        | `transfer-`                |
//! | 4   | `DeployInfo`           | 32-byte deploy hash             | `deploy-`                  |
//! | 5   | `EraInfo`              | `u64` era id                    | `era-`                     |
//! | 6   | `Balance`              | 32-byte purse address           | `balance-`                 |
//! | 7   | `Bid`                  | 32-byte account hash            | `bid-`                     |
//! | 8   | `Withdraw`             | 32-byte account hash            | `withdraw-`                |
//! | 9   | `Dictionary`           | 32 bytes                        | `dictionary-`              |
//! | 10  | `SystemEntityRegistry` | 32 bytes, zero padded           | `system-entity-registry-`  |
//! | 11  | `EraSummary`           | 32 bytes, zero padded           | `era-summary-`             |
//! | 12  | `Unbond`               | 32-byte account hash            | `unbond-`                  |
//! | 13  | `ChainspecRegistry`    | 32 bytes, zero padded           | `chainspec-registry-`      |
//! | 14  | `ChecksumRegistry`     | 32 bytes, zero padded           | `checksum-registry-`       |
//! | 15  | `BidAddr`              | [`BidAddr`] (tag + 32/40/64)    | `bid-addr-`                |
//! | 16  | `Package`              | 32 bytes                        | `package-`                 |
//! | 17  | `AddressableEntity`    | [`EntityAddr`] (kind + 32)      | `entity-{system,account,contract}-` |
//! | 18  | `ByteCode`             | [`ByteCodeAddr`] (kind [+ 32])  | `byte-code-`               |
//! | 19  | `Message`              | [`MessageAddr`]                 | `message-`                 |

use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use super::bytesrepr;
use super::key::PublicKey;
use super::uref::URef;
use crate::error::KeyFromStrError;

/// Decodes exactly 32 bytes of hex; `input` is the full string for errors.
pub(crate) fn decode_hash32(hex_str: &str, input: &str) -> Result<[u8; 32], KeyFromStrError> {
    let bytes = hex::decode(hex_str).map_err(|_| KeyFromStrError::InvalidHex(input.to_string()))?;
    <[u8; 32]>::try_from(bytes.as_slice()).map_err(|_| KeyFromStrError::InvalidLength {
        expected: 32,
        actual: bytes.len(),
    })
}

// ============================================================================
// AccountHash
// ============================================================================

const ACCOUNT_HASH_PREFIX: &str = "account-hash-";

/// BLAKE2b hash identifying an account, derived from its main public key.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, BorshSerialize, BorshDeserialize,
)]
pub struct AccountHash([u8; 32]);

impl AccountHash {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// `blake2b(lowercase algorithm name ++ 0x00 ++ raw key bytes)`.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let name = public_key.algorithm().as_str().as_bytes();
        let raw = public_key.as_bytes();
        let mut preimage = Vec::with_capacity(name.len() + 1 + raw.len());
        preimage.extend_from_slice(name);
        preimage.push(0);
        preimage.extend_from_slice(raw);
        Self(bytesrepr::blake2b(preimage))
    }

    pub const fn value(&self) -> [u8; 32] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// `account-hash-<hex>`.
    pub fn to_formatted_string(&self) -> String {
        format!("{}{}", ACCOUNT_HASH_PREFIX, self.to_hex())
    }

    pub fn from_formatted_str(input: &str) -> Result<Self, KeyFromStrError> {
        let hex_str = input
            .strip_prefix(ACCOUNT_HASH_PREFIX)
            .ok_or_else(|| KeyFromStrError::UnknownPrefix(input.to_string()))?;
        decode_hash32(hex_str, input).map(Self)
    }
}

impl From<&PublicKey> for AccountHash {
    fn from(public_key: &PublicKey) -> Self {
        Self::from_public_key(public_key)
    }
}

impl Display for AccountHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_formatted_string())
    }
}

impl Debug for AccountHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountHash({})", self.to_hex())
    }
}

impl FromStr for AccountHash {
    type Err = KeyFromStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_formatted_str(s)
    }
}

impl Serialize for AccountHash {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_formatted_string())
    }
}

impl<'de> Deserialize<'de> for AccountHash {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = serde::Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// EntityAddr
// ============================================================================

/// Address of an addressable entity, qualified by its kind.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize, BorshDeserialize)]
pub enum EntityAddr {
    System([u8; 32]),
    Account([u8; 32]),
    SmartContract([u8; 32]),
}

impl EntityAddr {
    const SYSTEM_PREFIX: &'static str = "entity-system-";
    const ACCOUNT_PREFIX: &'static str = "entity-account-";
    const CONTRACT_PREFIX: &'static str = "entity-contract-";

    pub fn value(&self) -> [u8; 32] {
        match self {
            EntityAddr::System(v) | EntityAddr::Account(v) | EntityAddr::SmartContract(v) => *v,
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            EntityAddr::System(_) => Self::SYSTEM_PREFIX,
            EntityAddr::Account(_) => Self::ACCOUNT_PREFIX,
            EntityAddr::SmartContract(_) => Self::CONTRACT_PREFIX,
        }
    }

    pub fn to_formatted_string(&self) -> String {
        format!("{}{}", self.prefix(), hex::encode(self.value()))
    }

    pub fn from_formatted_str(input: &str) -> Result<Self, KeyFromStrError> {
        if let Some(hex_str) = input.strip_prefix(Self::SYSTEM_PREFIX) {
            return decode_hash32(hex_str, input).map(EntityAddr::System);
        }
        if let Some(hex_str) = input.strip_prefix(Self::ACCOUNT_PREFIX) {
            return decode_hash32(hex_str, input).map(EntityAddr::Account);
        }
        if let Some(hex_str) = input.strip_prefix(Self::CONTRACT_PREFIX) {
            return decode_hash32(hex_str, input).map(EntityAddr::SmartContract);
        }
        Err(KeyFromStrError::UnknownPrefix(input.to_string()))
    }
}

impl Display for EntityAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_formatted_string())
    }
}

impl Debug for EntityAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityAddr({})", self)
    }
}

impl FromStr for EntityAddr {
    type Err = KeyFromStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_formatted_str(s)
    }
}

impl Serialize for EntityAddr {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_formatted_string())
    }
}

impl<'de> Deserialize<'de> for EntityAddr {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = serde::Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// BidAddr
// ============================================================================

/// Address of a bid record. Tag 3 is reserved and never produced.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum BidAddr {
    /// Pre-1.5 unified bid, keyed by validator.
    Unified(AccountHash),
    /// Validator bid.
    Validator(AccountHash),
    /// Delegator bid under a validator.
    Delegator {
        validator: AccountHash,
        delegator: AccountHash,
    },
    /// Validator credit for an era.
    Credit { validator: AccountHash, era_id: u64 },
}

impl BidAddr {
    pub const UNIFIED_TAG: u8 = 0;
    pub const VALIDATOR_TAG: u8 = 1;
    pub const DELEGATOR_TAG: u8 = 2;
    pub const CREDIT_TAG: u8 = 4;

    pub fn tag(&self) -> u8 {
        match self {
            BidAddr::Unified(_) => Self::UNIFIED_TAG,
            BidAddr::Validator(_) => Self::VALIDATOR_TAG,
            BidAddr::Delegator { .. } => Self::DELEGATOR_TAG,
            BidAddr::Credit { .. } => Self::CREDIT_TAG,
        }
    }

    /// The validator this bid belongs to.
    pub fn validator_account_hash(&self) -> AccountHash {
        match self {
            BidAddr::Unified(v) | BidAddr::Validator(v) => *v,
            BidAddr::Delegator { validator, .. } | BidAddr::Credit { validator, .. } => *validator,
        }
    }
}

impl BorshSerialize for BidAddr {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&[self.tag()])?;
        match self {
            BidAddr::Unified(hash) | BidAddr::Validator(hash) => writer.write_all(hash.as_bytes()),
            BidAddr::Delegator {
                validator,
                delegator,
            } => {
                writer.write_all(validator.as_bytes())?;
                writer.write_all(delegator.as_bytes())
            }
            BidAddr::Credit { validator, era_id } => {
                writer.write_all(validator.as_bytes())?;
                writer.write_all(&era_id.to_le_bytes())
            }
        }
    }
}

impl BorshDeserialize for BidAddr {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let tag = bytesrepr::read_u8(reader)?;
        let validator = AccountHash(bytesrepr::read_array(reader)?);
        let addr = match tag {
            Self::UNIFIED_TAG => BidAddr::Unified(validator),
            Self::VALIDATOR_TAG => BidAddr::Validator(validator),
            Self::DELEGATOR_TAG => BidAddr::Delegator {
                validator,
                delegator: AccountHash(bytesrepr::read_array(reader)?),
            },
            Self::CREDIT_TAG => BidAddr::Credit {
                validator,
                era_id: bytesrepr::read_u64(reader)?,
            },
            other => return Err(bytesrepr::Error::UnknownValue(other).into()),
        };
        Ok(addr)
    }
}

// ============================================================================
// ByteCodeAddr
// ============================================================================

/// Address of stored contract byte code, qualified by its kind.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum ByteCodeAddr {
    /// The empty byte code record. Carries no address on the wire.
    Empty,
    V1CasperWasm([u8; 32]),
    V2CasperWasm([u8; 32]),
}

impl ByteCodeAddr {
    pub const EMPTY_TAG: u8 = 0;
    pub const V1_CASPER_WASM_TAG: u8 = 1;
    pub const V2_CASPER_WASM_TAG: u8 = 2;

    const PREFIX: &'static str = "byte-code-";
    const EMPTY: &'static str = "empty";
    const V1_WASM_PREFIX: &'static str = "v1-wasm-";
    const V2_WASM_PREFIX: &'static str = "v2-wasm-";

    pub fn tag(&self) -> u8 {
        match self {
            ByteCodeAddr::Empty => Self::EMPTY_TAG,
            ByteCodeAddr::V1CasperWasm(_) => Self::V1_CASPER_WASM_TAG,
            ByteCodeAddr::V2CasperWasm(_) => Self::V2_CASPER_WASM_TAG,
        }
    }

    /// `byte-code-empty`, `byte-code-v1-wasm-<hex>` or `byte-code-v2-wasm-<hex>`.
    pub fn to_formatted_string(&self) -> String {
        match self {
            ByteCodeAddr::Empty => format!("{}{}", Self::PREFIX, Self::EMPTY),
            ByteCodeAddr::V1CasperWasm(v) => {
                format!("{}{}{}", Self::PREFIX, Self::V1_WASM_PREFIX, hex::encode(v))
            }
            ByteCodeAddr::V2CasperWasm(v) => {
                format!("{}{}{}", Self::PREFIX, Self::V2_WASM_PREFIX, hex::encode(v))
            }
        }
    }

    pub fn from_formatted_str(input: &str) -> Result<Self, KeyFromStrError> {
        let rest = input
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| KeyFromStrError::UnknownPrefix(input.to_string()))?;
        if rest == Self::EMPTY {
            return Ok(ByteCodeAddr::Empty);
        }
        if let Some(hex_str) = rest.strip_prefix(Self::V1_WASM_PREFIX) {
            return decode_hash32(hex_str, input).map(ByteCodeAddr::V1CasperWasm);
        }
        if let Some(hex_str) = rest.strip_prefix(Self::V2_WASM_PREFIX) {
            return decode_hash32(hex_str, input).map(ByteCodeAddr::V2CasperWasm);
        }
        Err(KeyFromStrError::UnknownPrefix(input.to_string()))
    }
}

impl Display for ByteCodeAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_formatted_string())
    }
}

impl BorshSerialize for ByteCodeAddr {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&[self.tag()])?;
        match self {
            ByteCodeAddr::Empty => Ok(()),
            ByteCodeAddr::V1CasperWasm(v) | ByteCodeAddr::V2CasperWasm(v) => writer.write_all(v),
        }
    }
}

impl BorshDeserialize for ByteCodeAddr {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let addr = match bytesrepr::read_u8(reader)? {
            Self::EMPTY_TAG => ByteCodeAddr::Empty,
            Self::V1_CASPER_WASM_TAG => ByteCodeAddr::V1CasperWasm(bytesrepr::read_array(reader)?),
            Self::V2_CASPER_WASM_TAG => ByteCodeAddr::V2CasperWasm(bytesrepr::read_array(reader)?),
            other => return Err(bytesrepr::Error::UnknownValue(other).into()),
        };
        Ok(addr)
    }
}

// ============================================================================
// MessageAddr
// ============================================================================

/// Address of a contract message topic, or of one message within it.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, BorshSerialize, BorshDeserialize,
)]
pub struct MessageAddr {
    pub entity_addr: EntityAddr,
    /// BLAKE2b hash of the topic name.
    pub topic_name_hash: [u8; 32],
    /// `None` addresses the topic itself.
    pub message_index: Option<u32>,
}

impl MessageAddr {
    const PREFIX: &'static str = "message-";
    const TOPIC_PREFIX: &'static str = "topic-";

    pub fn new_topic_addr(entity_addr: EntityAddr, topic_name_hash: [u8; 32]) -> Self {
        Self {
            entity_addr,
            topic_name_hash,
            message_index: None,
        }
    }

    pub fn new_message_addr(
        entity_addr: EntityAddr,
        topic_name_hash: [u8; 32],
        message_index: u32,
    ) -> Self {
        Self {
            entity_addr,
            topic_name_hash,
            message_index: Some(message_index),
        }
    }

    /// `message-topic-<entity>-<topic hash>` for a topic and
    /// `message-<entity>-<topic hash>-<index as hex>` for a message.
    pub fn to_formatted_string(&self) -> String {
        let topic = hex::encode(self.topic_name_hash);
        match self.message_index {
            Some(index) => format!("{}{}-{}-{:x}", Self::PREFIX, self.entity_addr, topic, index),
            None => format!(
                "{}{}{}-{}",
                Self::PREFIX,
                Self::TOPIC_PREFIX,
                self.entity_addr,
                topic
            ),
        }
    }

    pub fn from_formatted_str(input: &str) -> Result<Self, KeyFromStrError> {
        let rest = input
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| KeyFromStrError::UnknownPrefix(input.to_string()))?;
        let invalid = || KeyFromStrError::InvalidHex(input.to_string());

        let (rest, message_index) = match rest.strip_prefix(Self::TOPIC_PREFIX) {
            Some(topic) => (topic, None),
            None => {
                let (rest, index) = rest.rsplit_once('-').ok_or_else(invalid)?;
                let index = u32::from_str_radix(index, 16).map_err(|_| invalid())?;
                (rest, Some(index))
            }
        };
        let (entity, topic) = rest.rsplit_once('-').ok_or_else(invalid)?;
        Ok(Self {
            entity_addr: EntityAddr::from_formatted_str(entity)?,
            topic_name_hash: decode_hash32(topic, input)?,
            message_index,
        })
    }
}

impl Display for MessageAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_formatted_string())
    }
}

// ============================================================================
// KeyTag
// ============================================================================

/// Wire tag of each [`Key`] variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum KeyTag {
    Account = 0,
    Hash = 1,
    URef = 2,
    Transfer = 3,
    DeployInfo = 4,
    EraInfo = 5,
    Balance = 6,
    Bid = 7,
    Withdraw = 8,
    Dictionary = 9,
    SystemEntityRegistry = 10,
    EraSummary = 11,
    Unbond = 12,
    ChainspecRegistry = 13,
    ChecksumRegistry = 14,
    BidAddr = 15,
    Package = 16,
    AddressableEntity = 17,
    ByteCode = 18,
    Message = 19,
}

impl TryFrom<u8> for KeyTag {
    type Error = bytesrepr::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let tag = match value {
            0 => KeyTag::Account,
            1 => KeyTag::Hash,
            2 => KeyTag::URef,
            3 => KeyTag::Transfer,
            4 => KeyTag::DeployInfo,
            5 => KeyTag::EraInfo,
            6 => KeyTag::Balance,
            7 => KeyTag::Bid,
            8 => KeyTag::Withdraw,
            9 => KeyTag::Dictionary,
            10 => KeyTag::SystemEntityRegistry,
            11 => KeyTag::EraSummary,
            12 => KeyTag::Unbond,
            13 => KeyTag::ChainspecRegistry,
            14 => KeyTag::ChecksumRegistry,
            15 => KeyTag::BidAddr,
            16 => KeyTag::Package,
            17 => KeyTag::AddressableEntity,
            18 => KeyTag::ByteCode,
            19 => KeyTag::Message,
            other => return Err(bytesrepr::Error::UnknownValue(other)),
        };
        Ok(tag)
    }
}

// ============================================================================
// Key
// ============================================================================

const HASH_PREFIX: &str = "hash-";
const TRANSFER_PREFIX: &str = "transfer-";
const DEPLOY_INFO_PREFIX: &str = "deploy-";
const ERA_INFO_PREFIX: &str = "era-";
const BALANCE_PREFIX: &str = "balance-";
const BID_PREFIX: &str = "bid-";
const WITHDRAW_PREFIX: &str = "withdraw-";
const DICTIONARY_PREFIX: &str = "dictionary-";
const SYSTEM_ENTITY_REGISTRY_PREFIX: &str = "system-entity-registry-";
const ERA_SUMMARY_PREFIX: &str = "era-summary-";
const UNBOND_PREFIX: &str = "unbond-";
const CHAINSPEC_REGISTRY_PREFIX: &str = "chainspec-registry-";
const CHECKSUM_REGISTRY_PREFIX: &str = "checksum-registry-";
const BID_ADDR_PREFIX: &str = "bid-addr-";
const PACKAGE_PREFIX: &str = "package-";
const ENTITY_PREFIX: &str = "entity-";
const BYTE_CODE_PREFIX: &str = "byte-code-";
const MESSAGE_PREFIX: &str = "message-";

/// Copies `bytes` into a 32-byte registry payload, zero padding short input.
///
/// Input longer than 32 bytes is truncated, which drops data.
fn registry_payload(bytes: &[u8]) -> [u8; 32] {
    let mut payload = [0u8; 32];
    let len = bytes.len().min(32);
    if bytes.len() > 32 {
        warn!(len = bytes.len(), "registry key payload truncated to 32 bytes");
    }
    payload[..len].copy_from_slice(&bytes[..len]);
    payload
}

/// A key into global state.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Account(AccountHash),
    Hash([u8; 32]),
    URef(URef),
    Transfer([u8; 32]),
    DeployInfo([u8; 32]),
    EraInfo(u64),
    Balance([u8; 32]),
    Bid(AccountHash),
    Withdraw(AccountHash),
    Dictionary([u8; 32]),
    SystemEntityRegistry([u8; 32]),
    EraSummary([u8; 32]),
    Unbond(AccountHash),
    ChainspecRegistry([u8; 32]),
    ChecksumRegistry([u8; 32]),
    BidAddr(BidAddr),
    Package([u8; 32]),
    AddressableEntity(EntityAddr),
    ByteCode(ByteCodeAddr),
    Message(MessageAddr),
}

impl Key {
    /// The account key for a public key.
    pub fn account(public_key: &PublicKey) -> Self {
        Key::Account(public_key.to_account_hash())
    }

    /// System entity registry key; `bytes` is padded or truncated to 32.
    pub fn system_entity_registry(bytes: &[u8]) -> Self {
        Key::SystemEntityRegistry(registry_payload(bytes))
    }

    /// Era summary key; `bytes` is padded or truncated to 32.
    pub fn era_summary(bytes: &[u8]) -> Self {
        Key::EraSummary(registry_payload(bytes))
    }

    /// Chainspec registry key; `bytes` is padded or truncated to 32.
    pub fn chainspec_registry(bytes: &[u8]) -> Self {
        Key::ChainspecRegistry(registry_payload(bytes))
    }

    /// Checksum registry key; `bytes` is padded or truncated to 32.
    pub fn checksum_registry(bytes: &[u8]) -> Self {
        Key::ChecksumRegistry(registry_payload(bytes))
    }

    pub fn tag(&self) -> KeyTag {
        match self {
            Key::Account(_) => KeyTag::Account,
            Key::Hash(_) => KeyTag::Hash,
            Key::URef(_) => KeyTag::URef,
            Key::Transfer(_) => KeyTag::Transfer,
            Key::DeployInfo(_) => KeyTag::DeployInfo,
            Key::EraInfo(_) => KeyTag::EraInfo,
            Key::Balance(_) => KeyTag::Balance,
            Key::Bid(_) => KeyTag::Bid,
            Key::Withdraw(_) => KeyTag::Withdraw,
            Key::Dictionary(_) => KeyTag::Dictionary,
            Key::SystemEntityRegistry(_) => KeyTag::SystemEntityRegistry,
            Key::EraSummary(_) => KeyTag::EraSummary,
            Key::Unbond(_) => KeyTag::Unbond,
            Key::ChainspecRegistry(_) => KeyTag::ChainspecRegistry,
            Key::ChecksumRegistry(_) => KeyTag::ChecksumRegistry,
            Key::BidAddr(_) => KeyTag::BidAddr,
            Key::Package(_) => KeyTag::Package,
            Key::AddressableEntity(_) => KeyTag::AddressableEntity,
            Key::ByteCode(_) => KeyTag::ByteCode,
            Key::Message(_) => KeyTag::Message,
        }
    }

    pub fn as_account(&self) -> Option<&AccountHash> {
        match self {
            Key::Account(hash) => Some(hash),
            _ => None,
        }
    }

    pub fn as_uref(&self) -> Option<&URef> {
        match self {
            Key::URef(uref) => Some(uref),
            _ => None,
        }
    }

    pub fn to_formatted_string(&self) -> String {
        match self {
            Key::Account(hash) => hash.to_formatted_string(),
            Key::Hash(v) => format!("{}{}", HASH_PREFIX, hex::encode(v)),
            Key::URef(uref) => uref.to_formatted_string(),
            Key::Transfer(v) => format!("{}{}", TRANSFER_PREFIX, hex::encode(v)),
            Key::DeployInfo(v) => format!("{}{}", DEPLOY_INFO_PREFIX, hex::encode(v)),
            Key::EraInfo(era) => format!("{}{}", ERA_INFO_PREFIX, era),
            Key::Balance(v) => format!("{}{}", BALANCE_PREFIX, hex::encode(v)),
            Key::Bid(hash) => format!("{}{}", BID_PREFIX, hash.to_hex()),
            Key::Withdraw(hash) => format!("{}{}", WITHDRAW_PREFIX, hash.to_hex()),
            Key::Dictionary(v) => format!("{}{}", DICTIONARY_PREFIX, hex::encode(v)),
            Key::SystemEntityRegistry(v) => {
                format!("{}{}", SYSTEM_ENTITY_REGISTRY_PREFIX, hex::encode(v))
            }
            Key::EraSummary(v) => format!("{}{}", ERA_SUMMARY_PREFIX, hex::encode(v)),
            Key::Unbond(hash) => format!("{}{}", UNBOND_PREFIX, hash.to_hex()),
            Key::ChainspecRegistry(v) => {
                format!("{}{}", CHAINSPEC_REGISTRY_PREFIX, hex::encode(v))
            }
            Key::ChecksumRegistry(v) => format!("{}{}", CHECKSUM_REGISTRY_PREFIX, hex::encode(v)),
            Key::BidAddr(addr) => {
                format!("{}{}", BID_ADDR_PREFIX, hex::encode(bytesrepr::to_bytes(addr)))
            }
            Key::Package(v) => format!("{}{}", PACKAGE_PREFIX, hex::encode(v)),
            Key::AddressableEntity(addr) => addr.to_formatted_string(),
            Key::ByteCode(addr) => addr.to_formatted_string(),
            Key::Message(addr) => addr.to_formatted_string(),
        }
    }

    /// Parse a formatted string. More specific prefixes are tried before the
    /// prefixes they extend (`era-summary-` before `era-`, `bid-addr-` before
    /// `bid-`).
    pub fn from_formatted_str(input: &str) -> Result<Self, KeyFromStrError> {
        let hash32 = |prefix: &str| -> Option<Result<[u8; 32], KeyFromStrError>> {
            input
                .strip_prefix(prefix)
                .map(|hex_str| decode_hash32(hex_str, input))
        };

        if input.starts_with(ACCOUNT_HASH_PREFIX) {
            return AccountHash::from_formatted_str(input).map(Key::Account);
        }
        if let Some(v) = hash32(HASH_PREFIX) {
            return v.map(Key::Hash);
        }
        if input.starts_with("uref-") {
            return URef::from_formatted_str(input).map(Key::URef);
        }
        if let Some(v) = hash32(TRANSFER_PREFIX) {
            return v.map(Key::Transfer);
        }
        if let Some(v) = hash32(DEPLOY_INFO_PREFIX) {
            return v.map(Key::DeployInfo);
        }
        if let Some(v) = hash32(ERA_SUMMARY_PREFIX) {
            return v.map(Key::EraSummary);
        }
        if let Some(era) = input.strip_prefix(ERA_INFO_PREFIX) {
            return era
                .parse::<u64>()
                .map(Key::EraInfo)
                .map_err(|_| KeyFromStrError::InvalidEraId(input.to_string()));
        }
        if let Some(v) = hash32(BALANCE_PREFIX) {
            return v.map(Key::Balance);
        }
        if let Some(hex_str) = input.strip_prefix(BID_ADDR_PREFIX) {
            let bytes =
                hex::decode(hex_str).map_err(|_| KeyFromStrError::InvalidHex(input.to_string()))?;
            return bytesrepr::from_bytes_exact::<BidAddr>(&bytes)
                .map(Key::BidAddr)
                .map_err(KeyFromStrError::InvalidBidAddr);
        }
        if let Some(v) = hash32(BID_PREFIX) {
            return v.map(|h| Key::Bid(AccountHash(h)));
        }
        if let Some(v) = hash32(WITHDRAW_PREFIX) {
            return v.map(|h| Key::Withdraw(AccountHash(h)));
        }
        if let Some(v) = hash32(DICTIONARY_PREFIX) {
            return v.map(Key::Dictionary);
        }
        if let Some(v) = hash32(SYSTEM_ENTITY_REGISTRY_PREFIX) {
            return v.map(Key::SystemEntityRegistry);
        }
        if let Some(v) = hash32(UNBOND_PREFIX) {
            return v.map(|h| Key::Unbond(AccountHash(h)));
        }
        if let Some(v) = hash32(CHAINSPEC_REGISTRY_PREFIX) {
            return v.map(Key::ChainspecRegistry);
        }
        if let Some(v) = hash32(CHECKSUM_REGISTRY_PREFIX) {
            return v.map(Key::ChecksumRegistry);
        }
        if let Some(v) = hash32(PACKAGE_PREFIX) {
            return v.map(Key::Package);
        }
        if input.starts_with(ENTITY_PREFIX) {
            return EntityAddr::from_formatted_str(input).map(Key::AddressableEntity);
        }
        if input.starts_with(BYTE_CODE_PREFIX) {
            return ByteCodeAddr::from_formatted_str(input).map(Key::ByteCode);
        }
        if input.starts_with(MESSAGE_PREFIX) {
            return MessageAddr::from_formatted_str(input).map(Key::Message);
        }
        Err(KeyFromStrError::UnknownPrefix(input.to_string()))
    }
}

impl From<AccountHash> for Key {
    fn from(hash: AccountHash) -> Self {
        Key::Account(hash)
    }
}

impl From<URef> for Key {
    fn from(uref: URef) -> Self {
        Key::URef(uref)
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_formatted_string())
    }
}

impl Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self)
    }
}

impl FromStr for Key {
    type Err = KeyFromStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_formatted_str(s)
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_formatted_string())
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = serde::Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl BorshSerialize for Key {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&[self.tag() as u8])?;
        match self {
            Key::Account(hash) | Key::Bid(hash) | Key::Withdraw(hash) | Key::Unbond(hash) => {
                writer.write_all(hash.as_bytes())
            }
            Key::Hash(v)
            | Key::Transfer(v)
            | Key::DeployInfo(v)
            | Key::Balance(v)
            | Key::Dictionary(v)
            | Key::SystemEntityRegistry(v)
            | Key::EraSummary(v)
            | Key::ChainspecRegistry(v)
            | Key::ChecksumRegistry(v)
            | Key::Package(v) => writer.write_all(v),
            Key::URef(uref) => BorshSerialize::serialize(uref, writer),
            Key::EraInfo(era) => writer.write_all(&era.to_le_bytes()),
            Key::BidAddr(addr) => BorshSerialize::serialize(addr, writer),
            Key::AddressableEntity(addr) => BorshSerialize::serialize(addr, writer),
            Key::ByteCode(addr) => BorshSerialize::serialize(addr, writer),
            Key::Message(addr) => BorshSerialize::serialize(addr, writer),
        }
    }
}

impl BorshDeserialize for Key {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let tag = KeyTag::try_from(bytesrepr::read_u8(reader)?)?;
        let key = match tag {
            KeyTag::Account => Key::Account(AccountHash(bytesrepr::read_array(reader)?)),
            KeyTag::Hash => Key::Hash(bytesrepr::read_array(reader)?),
            KeyTag::URef => Key::URef(URef::deserialize_reader(reader)?),
            KeyTag::Transfer => Key::Transfer(bytesrepr::read_array(reader)?),
            KeyTag::DeployInfo => Key::DeployInfo(bytesrepr::read_array(reader)?),
            KeyTag::EraInfo => Key::EraInfo(bytesrepr::read_u64(reader)?),
            KeyTag::Balance => Key::Balance(bytesrepr::read_array(reader)?),
            KeyTag::Bid => Key::Bid(AccountHash(bytesrepr::read_array(reader)?)),
            KeyTag::Withdraw => Key::Withdraw(AccountHash(bytesrepr::read_array(reader)?)),
            KeyTag::Dictionary => Key::Dictionary(bytesrepr::read_array(reader)?),
            KeyTag::SystemEntityRegistry => {
                Key::SystemEntityRegistry(bytesrepr::read_array(reader)?)
            }
            KeyTag::EraSummary => Key::EraSummary(bytesrepr::read_array(reader)?),
            KeyTag::Unbond => Key::Unbond(AccountHash(bytesrepr::read_array(reader)?)),
            KeyTag::ChainspecRegistry => Key::ChainspecRegistry(bytesrepr::read_array(reader)?),
            KeyTag::ChecksumRegistry => Key::ChecksumRegistry(bytesrepr::read_array(reader)?),
            KeyTag::BidAddr => Key::BidAddr(BidAddr::deserialize_reader(reader)?),
            KeyTag::Package => Key::Package(bytesrepr::read_array(reader)?),
            KeyTag::AddressableEntity => {
                Key::AddressableEntity(EntityAddr::deserialize_reader(reader)?)
            }
            KeyTag::ByteCode => Key::ByteCode(ByteCodeAddr::deserialize_reader(reader)?),
            KeyTag::Message => Key::Message(MessageAddr::deserialize_reader(reader)?),
        };
        Ok(key)
    }
}
