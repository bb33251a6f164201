//! Network presets and a transport-free JSON-RPC request builder.
//!
//! [`RpcClient`] never opens a connection: it numbers requests, renders the
//! JSON bodies a Casper node expects and parses the node's replies. Sending
//! the body is left to whatever HTTP stack the caller already runs.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, RpcError};
use crate::types::rpc::{self, JsonRpcRequest};
use crate::types::{
    Deploy, GlobalStateIdentifier, InitiatorAddr, PublicKey, PurseIdentifier, PutDeployResult,
    PutTransactionResult, QueryBalanceResult, Transaction,
};

use super::transaction::{DeployBuilder, TransactionV1Builder};

/// Network configuration presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetworkConfig {
    /// The chain name every deploy and transaction must carry.
    pub chain_name: &'static str,
    /// The RPC URL for this network.
    pub rpc_url: &'static str,
}

/// Mainnet configuration.
pub const MAINNET: NetworkConfig = NetworkConfig {
    chain_name: "casper",
    rpc_url: "https://rpc.mainnet.casperlabs.io/rpc",
};

/// Testnet configuration.
pub const TESTNET: NetworkConfig = NetworkConfig {
    chain_name: "casper-test",
    rpc_url: "https://rpc.testnet.casperlabs.io/rpc",
};

impl NetworkConfig {
    pub const MAINNET: NetworkConfig = MAINNET;
    pub const TESTNET: NetworkConfig = TESTNET;

    /// Start a deploy on this network.
    pub fn deploy(&self, account: PublicKey) -> DeployBuilder {
        DeployBuilder::new(account, self.chain_name)
    }

    /// Start a version 1 transaction on this network.
    pub fn transaction(&self, initiator: impl Into<InitiatorAddr>) -> TransactionV1Builder {
        TransactionV1Builder::new(initiator, self.chain_name)
    }

    /// A request builder pointed at this network's RPC URL.
    pub fn rpc(&self) -> RpcClient {
        RpcClient::new(self.rpc_url)
    }
}

/// Builds numbered JSON-RPC requests for one node and parses its replies.
pub struct RpcClient {
    url: String,
    request_id: AtomicU64,
}

impl RpcClient {
    /// Create a new RPC client with the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            request_id: AtomicU64::new(0),
        }
    }

    /// Get the RPC URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    fn render<P: Serialize>(&self, request: JsonRpcRequest<P>) -> Result<String, Error> {
        let body = request.to_json()?;
        debug!(
            url = %self.url,
            id = request.id(),
            method = request.method(),
            bytes = body.len(),
            "built rpc request"
        );
        Ok(body)
    }

    /// Body of an `account_put_deploy` request. Fails for deploys over the
    /// size limit.
    pub fn put_deploy(&self, deploy: &Deploy) -> Result<String, Error> {
        self.render(rpc::put_deploy_request(self.next_id(), deploy)?)
    }

    /// Body of an `account_put_transaction` request.
    pub fn put_transaction(&self, transaction: &Transaction) -> Result<String, Error> {
        self.render(rpc::put_transaction_request(self.next_id(), transaction)?)
    }

    /// Body of a `query_balance` request against the latest state, or the
    /// state named by `state_identifier`.
    pub fn query_balance(
        &self,
        purse: impl Into<PurseIdentifier>,
        state_identifier: Option<GlobalStateIdentifier>,
    ) -> Result<String, Error> {
        self.render(rpc::query_balance_request(
            self.next_id(),
            purse,
            state_identifier,
        ))
    }

    /// Parse the reply to [`RpcClient::put_deploy`].
    pub fn parse_put_deploy(&self, body: &str) -> Result<PutDeployResult, RpcError> {
        self.parse(body)
    }

    /// Parse the reply to [`RpcClient::put_transaction`].
    pub fn parse_put_transaction(&self, body: &str) -> Result<PutTransactionResult, RpcError> {
        self.parse(body)
    }

    /// Parse the reply to [`RpcClient::query_balance`].
    pub fn parse_query_balance(&self, body: &str) -> Result<QueryBalanceResult, RpcError> {
        self.parse(body)
    }

    fn parse<T: DeserializeOwned>(&self, body: &str) -> Result<T, RpcError> {
        rpc::parse_response(body).inspect_err(|e| {
            debug!(url = %self.url, error = %e, "rpc call failed");
        })
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient").field("url", &self.url).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExecutableDeployItem, RuntimeArgs, SecretKey, U512};

    fn signed_deploy() -> Deploy {
        let secret_key = SecretKey::ed25519_from_bytes([1; 32]);
        TESTNET
            .deploy(secret_key.public_key())
            .session(ExecutableDeployItem::new_module_bytes(
                vec![0u8; 8],
                RuntimeArgs::new(),
            ))
            .standard_payment(1_000_000u64)
            .build()
            .unwrap()
            .sign(&secret_key)
    }

    #[test]
    fn test_network_presets() {
        assert_eq!(MAINNET.chain_name, "casper");
        assert_eq!(TESTNET.chain_name, "casper-test");
        assert_eq!(NetworkConfig::TESTNET, TESTNET);
        assert_eq!(TESTNET.rpc().url(), TESTNET.rpc_url);
    }

    #[test]
    fn test_request_ids_increment() {
        let client = RpcClient::new("http://localhost:7777/rpc");
        let deploy = signed_deploy();

        let first: serde_json::Value =
            serde_json::from_str(&client.put_deploy(&deploy).unwrap()).unwrap();
        let second: serde_json::Value =
            serde_json::from_str(&client.put_deploy(&deploy).unwrap()).unwrap();

        assert_eq!(first["id"], 0);
        assert_eq!(second["id"], 1);
        assert_eq!(first["jsonrpc"], "2.0");
        assert_eq!(first["method"], "account_put_deploy");
        assert_eq!(
            first["params"]["deploy"]["hash"],
            deploy.hash().to_string()
        );
    }

    #[test]
    fn test_put_transaction_body() {
        let client = TESTNET.rpc();
        let transaction = Transaction::from(signed_deploy());
        let body: serde_json::Value =
            serde_json::from_str(&client.put_transaction(&transaction).unwrap()).unwrap();
        assert_eq!(body["method"], "account_put_transaction");
        assert!(body["params"]["transaction"]["Deploy"].is_object());
    }

    #[test]
    fn test_query_balance_body() {
        let client = TESTNET.rpc();
        let public_key = SecretKey::ed25519_from_bytes([1; 32]).public_key();
        let body: serde_json::Value =
            serde_json::from_str(&client.query_balance(public_key.clone(), None).unwrap()).unwrap();
        assert_eq!(body["method"], "query_balance");
        assert_eq!(
            body["params"]["purse_identifier"]["main_purse_under_public_key"],
            public_key.to_hex()
        );
        assert!(body["params"].get("state_identifier").is_none());

        let body: serde_json::Value = serde_json::from_str(
            &client
                .query_balance(public_key, Some(GlobalStateIdentifier::BlockHeight(10)))
                .unwrap(),
        )
        .unwrap();
        assert_eq!(body["params"]["state_identifier"]["BlockHeight"], 10);
    }

    #[test]
    fn test_parse_replies() {
        let client = TESTNET.rpc();
        let ok = r#"{"jsonrpc":"2.0","id":0,"result":{"api_version":"2.0.0","balance":"123456789"}}"#;
        let result = client.parse_query_balance(ok).unwrap();
        assert_eq!(result.balance, U512::from(123_456_789u64));

        let err = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32008,"message":"Invalid Deploy"}}"#;
        match client.parse_put_deploy(err).unwrap_err() {
            RpcError::Rpc { code, message, .. } => {
                assert_eq!(code, -32008);
                assert_eq!(message, "Invalid Deploy");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
