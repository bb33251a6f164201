//! Builders, signers and network presets.
//!
//! - [`DeployBuilder`] — Fluent builder for legacy deploys
//! - [`TransactionV1Builder`] — Fluent builder for version 1 transactions
//! - [`NetworkConfig`] — Chain name and RPC URL for a network
//! - [`RpcClient`] — Renders JSON-RPC request bodies and parses replies
//!
//! # Signers
//!
//! | Signer | Use Case |
//! |--------|----------|
//! | [`InMemorySigner`] | A secret key held in memory, from hex or PEM |
//! | your own [`Signer`] | Keys held elsewhere (HSM, remote service) |

mod rpc;
mod signer;
mod transaction;

pub use rpc::{MAINNET, NetworkConfig, RpcClient, TESTNET};
pub use signer::{
    InMemorySigner, Signer, SigningKey, sign_deploy, sign_transaction, sign_transaction_v1,
};
pub use transaction::{DeployBuilder, TransactionV1Builder};
