//! Build, encode, hash and sign Casper deploys and transactions.
//!
//! **casper-kit** covers everything a client needs before talking to a node:
//! typed CL values, the canonical byte encoding the network hashes, deploy
//! and transaction assembly, approvals, and the JSON forms a node accepts.
//!
//! # Quick Start
//!
//! ```rust
//! use casper_kit::*;
//!
//! fn main() -> Result<(), casper_kit::Error> {
//!     let signer = InMemorySigner::new(
//!         "010101010101010101010101010101010101010101010101010101010101010101",
//!     )?;
//!
//!     let deploy = NetworkConfig::TESTNET
//!         .deploy(signer.public_key().clone())
//!         .call_by_name("counter", "counter_inc", runtime_args! { "step" => 1u32 })
//!         .standard_payment(2_500_000_000u64)
//!         .sign_with(signer)
//!         .build()?;
//!
//!     // JSON body ready to POST to a node.
//!     let body = NetworkConfig::TESTNET.rpc().put_deploy(&deploy)?;
//!     println!("{}", body);
//!
//!     // What a node does on receipt.
//!     let received = Deploy::from_json(&deploy.to_json()?)?;
//!     assert_eq!(received.hash(), deploy.hash());
//!     Ok(())
//! }
//! ```
//!
//! # Core Types
//!
//! - [`CLValue`], [`CLType`] - Typed values and their type descriptors
//! - [`Key`], [`URef`], [`AccountHash`] - Global state addresses
//! - [`RuntimeArgs`] - Ordered named arguments
//! - [`Deploy`], [`TransactionV1`], [`Transaction`] - Signed units of work
//! - [`PublicKey`], [`SecretKey`], [`Signature`] - Ed25519 and Secp256k1 keys
//! - [`Digest`] - 32-byte BLAKE2b hash
//!
//! # Binary Encoding
//!
//! A [`CLValue`] encodes without type information; the type comes from
//! context. Every other wire type implements `BorshSerialize` and
//! `BorshDeserialize` with the network's layout, and [`bytesrepr`] wraps
//! those with exact-length decoding:
//!
//! ```
//! use casper_kit::{CLType, CLValue, RuntimeArgs, U512, bytesrepr, runtime_args};
//!
//! let value = CLValue::from(U512::from(24_500_000_000u64));
//! assert_eq!(hex::encode(value.to_bytes()), "05005550b405");
//! assert_eq!(CLValue::from_bytes_exact(&CLType::U512, &value.to_bytes()).unwrap(), value);
//!
//! let args = runtime_args! { "amount" => U512::from(24_500_000_000u64) };
//! let bytes = bytesrepr::to_bytes(&args);
//! assert_eq!(hex::encode(&bytes), "0100000006000000616d6f756e740600000005005550b40508");
//! assert_eq!(bytesrepr::from_bytes_exact::<RuntimeArgs>(&bytes).unwrap(), args);
//! ```

pub mod client;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{
    BytesReprError, CLValueError, Error, KeyFromStrError, ParseHashError, ParseKeyError,
    RpcError, SignerError, TimeError, ValidationError,
};
pub use types::*;

// Re-export client types
pub use client::{
    DeployBuilder, InMemorySigner, MAINNET, NetworkConfig, RpcClient, Signer, SigningKey, TESTNET,
    TransactionV1Builder, sign_deploy, sign_transaction, sign_transaction_v1,
};
