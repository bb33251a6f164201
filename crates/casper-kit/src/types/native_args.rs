//! Runtime arguments for native transaction entry points.
//!
//! Native operations ([`TransactionTarget::Native`](super::TransactionTarget))
//! read their inputs from the transaction's runtime args by name. Each
//! function here builds the argument set one entry point expects, in the
//! order the node's own builders use.

use primitive_types::U512;

use super::executable::TransferTarget;
use super::key::PublicKey;
use super::runtime_args::RuntimeArgs;
use super::uref::URef;

pub const ARG_AMOUNT: &str = "amount";
pub const ARG_SOURCE: &str = "source";
pub const ARG_TARGET: &str = "target";
pub const ARG_ID: &str = "id";
pub const ARG_PUBLIC_KEY: &str = "public_key";
pub const ARG_NEW_PUBLIC_KEY: &str = "new_public_key";
pub const ARG_DELEGATION_RATE: &str = "delegation_rate";
pub const ARG_MINIMUM_DELEGATION_AMOUNT: &str = "minimum_delegation_amount";
pub const ARG_MAXIMUM_DELEGATION_AMOUNT: &str = "maximum_delegation_amount";
pub const ARG_RESERVED_SLOTS: &str = "reserved_slots";
pub const ARG_DELEGATOR: &str = "delegator";
pub const ARG_VALIDATOR: &str = "validator";
pub const ARG_NEW_VALIDATOR: &str = "new_validator";

/// `transfer`: `source` (when given), `target`, `amount`, `id` (when given).
pub fn transfer_args(
    source: Option<URef>,
    target: TransferTarget,
    amount: impl Into<U512>,
    id: Option<u64>,
) -> RuntimeArgs {
    let mut args = RuntimeArgs::new();
    if let Some(source) = source {
        args.insert(ARG_SOURCE, source);
    }
    args.insert_cl_value(ARG_TARGET, target.into());
    args.insert(ARG_AMOUNT, amount.into());
    if let Some(id) = id {
        args.insert(ARG_ID, Some(id));
    }
    args
}

/// Optional limits a validator can set on its delegators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DelegationLimits {
    pub minimum_delegation_amount: Option<u64>,
    pub maximum_delegation_amount: Option<u64>,
    pub reserved_slots: Option<u32>,
}

/// `add_bid`: `public_key`, `delegation_rate`, `amount`, then any limits set.
pub fn add_bid_args(
    public_key: PublicKey,
    delegation_rate: u8,
    amount: impl Into<U512>,
    limits: DelegationLimits,
) -> RuntimeArgs {
    let mut args = RuntimeArgs::new();
    args.insert(ARG_PUBLIC_KEY, public_key);
    args.insert(ARG_DELEGATION_RATE, delegation_rate);
    args.insert(ARG_AMOUNT, amount.into());
    if let Some(minimum) = limits.minimum_delegation_amount {
        args.insert(ARG_MINIMUM_DELEGATION_AMOUNT, minimum);
    }
    if let Some(maximum) = limits.maximum_delegation_amount {
        args.insert(ARG_MAXIMUM_DELEGATION_AMOUNT, maximum);
    }
    if let Some(slots) = limits.reserved_slots {
        args.insert(ARG_RESERVED_SLOTS, slots);
    }
    args
}

/// `withdraw_bid`: `public_key`, `amount`.
pub fn withdraw_bid_args(public_key: PublicKey, amount: impl Into<U512>) -> RuntimeArgs {
    let mut args = RuntimeArgs::new();
    args.insert(ARG_PUBLIC_KEY, public_key);
    args.insert(ARG_AMOUNT, amount.into());
    args
}

/// `delegate`: `delegator`, `validator`, `amount`.
pub fn delegate_args(
    delegator: PublicKey,
    validator: PublicKey,
    amount: impl Into<U512>,
) -> RuntimeArgs {
    let mut args = RuntimeArgs::new();
    args.insert(ARG_DELEGATOR, delegator);
    args.insert(ARG_VALIDATOR, validator);
    args.insert(ARG_AMOUNT, amount.into());
    args
}

/// `undelegate`: same arguments as `delegate`.
pub fn undelegate_args(
    delegator: PublicKey,
    validator: PublicKey,
    amount: impl Into<U512>,
) -> RuntimeArgs {
    delegate_args(delegator, validator, amount)
}

/// `redelegate`: `delegator`, `validator`, `amount`, `new_validator`.
pub fn redelegate_args(
    delegator: PublicKey,
    validator: PublicKey,
    amount: impl Into<U512>,
    new_validator: PublicKey,
) -> RuntimeArgs {
    let mut args = delegate_args(delegator, validator, amount);
    args.insert(ARG_NEW_VALIDATOR, new_validator);
    args
}

/// `activate_bid`: `validator`.
pub fn activate_bid_args(validator: PublicKey) -> RuntimeArgs {
    let mut args = RuntimeArgs::new();
    args.insert(ARG_VALIDATOR, validator);
    args
}

/// `change_bid_public_key`: `public_key`, `new_public_key`.
pub fn change_bid_public_key_args(public_key: PublicKey, new_public_key: PublicKey) -> RuntimeArgs {
    let mut args = RuntimeArgs::new();
    args.insert(ARG_PUBLIC_KEY, public_key);
    args.insert(ARG_NEW_PUBLIC_KEY, new_public_key);
    args
}
