//! Tagged unions carried by a [`TransactionV1`](super::TransactionV1).
//!
//! Every union encodes as a `u8` tag followed by the variant's fields. The
//! tags are the declaration order of each enum:
//!
//! | Union                         | Tags |
//! |-------------------------------|------|
//! | [`PricingMode`]               | Classic 0, Fixed 1, Reserved 2 |
//! | [`InitiatorAddr`]             | PublicKey 0, AccountHash 1 |
//! | [`TransactionTarget`]         | Native 0, Stored 1, Session 2 |
//! | [`TransactionInvocationTarget`] | ByHash 0, ByName 1, ByPackageHash 2, ByPackageName 3 |
//! | [`TransactionRuntime`]        | VmCasperV1 0, VmCasperV2 1 |
//! | [`TransactionEntryPoint`]     | Call 0, Custom 1, Transfer 2 … CancelReservations 11 |
//! | [`TransactionScheduling`]     | Standard 0, FutureEra 1, FutureTimestamp 2 |

use std::fmt::{self, Display};

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use serde_with::hex::Hex;
use serde_with::serde_as;

use super::global_key::AccountHash;
use super::key::PublicKey;
use super::time::Timestamp;

/// Gas price tolerance used when none is given.
pub const DEFAULT_GAS_PRICE_TOLERANCE: u8 = 5;

// ============================================================================
// PricingMode
// ============================================================================

/// How a transaction pays for execution.
#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
#[serde(deny_unknown_fields)]
pub enum PricingMode {
    /// Explicit payment amount, like a deploy's standard payment.
    Classic {
        payment_amount: u64,
        gas_price_tolerance: u8,
        standard_payment: bool,
    },
    /// Cost fixed by the chainspec for the transaction's lane.
    Fixed { gas_price_tolerance: u8 },
    /// Paid from a prior reservation.
    Reserved { receipt: String },
}

impl PricingMode {
    pub fn tag(&self) -> u8 {
        match self {
            PricingMode::Classic { .. } => 0,
            PricingMode::Fixed { .. } => 1,
            PricingMode::Reserved { .. } => 2,
        }
    }
}

impl Default for PricingMode {
    fn default() -> Self {
        PricingMode::Fixed {
            gas_price_tolerance: DEFAULT_GAS_PRICE_TOLERANCE,
        }
    }
}

// ============================================================================
// InitiatorAddr
// ============================================================================

/// The account that created a transaction.
#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub enum InitiatorAddr {
    PublicKey(PublicKey),
    AccountHash(AccountHash),
}

impl InitiatorAddr {
    pub fn account_hash(&self) -> AccountHash {
        match self {
            InitiatorAddr::PublicKey(public_key) => public_key.to_account_hash(),
            InitiatorAddr::AccountHash(account_hash) => *account_hash,
        }
    }
}

impl From<PublicKey> for InitiatorAddr {
    fn from(public_key: PublicKey) -> Self {
        InitiatorAddr::PublicKey(public_key)
    }
}

impl From<AccountHash> for InitiatorAddr {
    fn from(account_hash: AccountHash) -> Self {
        InitiatorAddr::AccountHash(account_hash)
    }
}

// ============================================================================
// TransactionTarget
// ============================================================================

/// Execution engine for stored or session code.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize,
    BorshDeserialize,
)]
pub enum TransactionRuntime {
    #[default]
    VmCasperV1,
    VmCasperV2,
}

/// Stored code a transaction calls into.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
#[serde(deny_unknown_fields)]
pub enum TransactionInvocationTarget {
    /// Contract by its entity address.
    ByHash(#[serde_as(as = "Hex")] [u8; 32]),
    /// Contract by a named key of the caller.
    ByName(String),
    /// Package by hash; `None` calls the latest version.
    ByPackageHash {
        #[serde_as(as = "Hex")]
        addr: [u8; 32],
        version: Option<u32>,
    },
    /// Package by a named key of the caller.
    ByPackageName { name: String, version: Option<u32> },
}

/// What a transaction executes.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
#[serde(deny_unknown_fields)]
pub enum TransactionTarget {
    /// A native system operation selected by the entry point.
    Native,
    /// Previously stored code.
    Stored {
        id: TransactionInvocationTarget,
        runtime: TransactionRuntime,
    },
    /// Wasm shipped with the transaction.
    Session {
        #[serde_as(as = "Hex")]
        module_bytes: Vec<u8>,
        runtime: TransactionRuntime,
    },
}

impl TransactionTarget {
    pub fn stored(id: TransactionInvocationTarget) -> Self {
        TransactionTarget::Stored {
            id,
            runtime: TransactionRuntime::default(),
        }
    }

    pub fn session(module_bytes: impl Into<Vec<u8>>) -> Self {
        TransactionTarget::Session {
            module_bytes: module_bytes.into(),
            runtime: TransactionRuntime::default(),
        }
    }

    pub fn tag(&self) -> u8 {
        match self {
            TransactionTarget::Native => 0,
            TransactionTarget::Stored { .. } => 1,
            TransactionTarget::Session { .. } => 2,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, TransactionTarget::Native)
    }
}

// ============================================================================
// TransactionEntryPoint
// ============================================================================

/// The entry point a transaction invokes.
///
/// Every variant except `Call` and `Custom` names a native system
/// operation and pairs with [`TransactionTarget::Native`].
#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub enum TransactionEntryPoint {
    /// The `call` export of session Wasm.
    Call,
    /// A named entry point of stored code.
    Custom(String),
    Transfer,
    AddBid,
    WithdrawBid,
    Delegate,
    Undelegate,
    Redelegate,
    ActivateBid,
    ChangeBidPublicKey,
    AddReservations,
    CancelReservations,
}

impl TransactionEntryPoint {
    pub fn custom(name: impl Into<String>) -> Self {
        TransactionEntryPoint::Custom(name.into())
    }

    pub fn tag(&self) -> u8 {
        match self {
            TransactionEntryPoint::Call => 0,
            TransactionEntryPoint::Custom(_) => 1,
            TransactionEntryPoint::Transfer => 2,
            TransactionEntryPoint::AddBid => 3,
            TransactionEntryPoint::WithdrawBid => 4,
            TransactionEntryPoint::Delegate => 5,
            TransactionEntryPoint::Undelegate => 6,
            TransactionEntryPoint::Redelegate => 7,
            TransactionEntryPoint::ActivateBid => 8,
            TransactionEntryPoint::ChangeBidPublicKey => 9,
            TransactionEntryPoint::AddReservations => 10,
            TransactionEntryPoint::CancelReservations => 11,
        }
    }

    pub fn is_native(&self) -> bool {
        !matches!(
            self,
            TransactionEntryPoint::Call | TransactionEntryPoint::Custom(_)
        )
    }
}

impl Display for TransactionEntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionEntryPoint::Call => write!(f, "call"),
            TransactionEntryPoint::Custom(name) => write!(f, "custom({})", name),
            TransactionEntryPoint::Transfer => write!(f, "transfer"),
            TransactionEntryPoint::AddBid => write!(f, "add_bid"),
            TransactionEntryPoint::WithdrawBid => write!(f, "withdraw_bid"),
            TransactionEntryPoint::Delegate => write!(f, "delegate"),
            TransactionEntryPoint::Undelegate => write!(f, "undelegate"),
            TransactionEntryPoint::Redelegate => write!(f, "redelegate"),
            TransactionEntryPoint::ActivateBid => write!(f, "activate_bid"),
            TransactionEntryPoint::ChangeBidPublicKey => write!(f, "change_bid_public_key"),
            TransactionEntryPoint::AddReservations => write!(f, "add_reservations"),
            TransactionEntryPoint::CancelReservations => write!(f, "cancel_reservations"),
        }
    }
}

// ============================================================================
// TransactionScheduling
// ============================================================================

/// When a transaction becomes eligible for execution.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize,
    BorshDeserialize,
)]
pub enum TransactionScheduling {
    /// As soon as possible.
    #[default]
    Standard,
    /// From the start of the given era.
    FutureEra(u64),
    /// From the given time.
    FutureTimestamp(Timestamp),
}

impl TransactionScheduling {
    pub fn tag(&self) -> u8 {
        match self {
            TransactionScheduling::Standard => 0,
            TransactionScheduling::FutureEra(_) => 1,
            TransactionScheduling::FutureTimestamp(_) => 2,
        }
    }
}
