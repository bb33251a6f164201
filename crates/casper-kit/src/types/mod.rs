//! Core wire types for the Casper network.
//!
//! Every type here has a binary form (the bytes that get hashed and signed)
//! and a JSON form (what a node's RPC endpoint accepts and returns). Both are
//! exact: a value decoded from either form re-encodes to the same bytes.

mod approval;
pub mod bytesrepr;
mod cl_type;
mod cl_value;
mod deploy;
mod executable;
mod global_key;
mod hash;
mod key;
pub mod native_args;
pub mod rpc;
mod runtime_args;
mod time;
mod transaction;
mod transaction_target;
mod uref;

pub use primitive_types::{U128, U256, U512};

pub use approval::Approval;
pub use cl_type::{CL_TYPE_RECURSION_DEPTH, CLType, CLTyped};
pub use cl_value::CLValue;
pub use deploy::{
    DEFAULT_GAS_PRICE, DEFAULT_TTL, Deploy, DeployHeader, DeployParams, MAX_SERIALIZED_SIZE,
};
pub use executable::{DEFAULT_ENTRY_POINT_NAME, ExecutableDeployItem, TransferTarget};
pub use global_key::{AccountHash, BidAddr, ByteCodeAddr, EntityAddr, Key, KeyTag, MessageAddr};
pub use hash::Digest;
pub use key::{KeyAlgorithm, KeyPair, PublicKey, SecretKey, Signature};
pub use native_args::DelegationLimits;
pub use rpc::{
    GlobalStateIdentifier, JsonRpcRequest, PurseIdentifier, PutDeployResult, PutTransactionResult,
    QueryBalanceResult, TransactionHash,
};
pub use runtime_args::{NamedArg, RuntimeArgs};
pub use time::{TimeDiff, Timestamp, dehumanize_ttl, humanize_ttl};
pub use transaction::{
    Transaction, TransactionV1, TransactionV1Body, TransactionV1Header, TransactionV1Params,
};
pub use transaction_target::{
    DEFAULT_GAS_PRICE_TOLERANCE, InitiatorAddr, PricingMode, TransactionEntryPoint,
    TransactionInvocationTarget, TransactionRuntime, TransactionScheduling, TransactionTarget,
};
pub use uref::{AccessRights, URef};
