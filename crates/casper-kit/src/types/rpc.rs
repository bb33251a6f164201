//! JSON-RPC request and response types for a node's RPC endpoint.
//!
//! Only the payload shapes live here; sending them is up to the caller's
//! HTTP stack.

use primitive_types::U512;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use super::deploy::Deploy;
use super::global_key::{AccountHash, EntityAddr};
use super::hash::Digest;
use super::key::PublicKey;
use super::transaction::Transaction;
use super::uref::URef;
use crate::error::{Error, RpcError};

pub const JSON_RPC_VERSION: &str = "2.0";

pub const ACCOUNT_PUT_DEPLOY: &str = "account_put_deploy";
pub const ACCOUNT_PUT_TRANSACTION: &str = "account_put_transaction";
pub const QUERY_BALANCE: &str = "query_balance";

// ============================================================================
// Requests
// ============================================================================

/// JSON-RPC 2.0 request envelope.
#[derive(Clone, Debug, Serialize)]
pub struct JsonRpcRequest<P: Serialize> {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: P,
}

impl<P: Serialize> JsonRpcRequest<P> {
    pub fn new(id: u64, method: &'static str, params: P) -> Self {
        Self {
            jsonrpc: JSON_RPC_VERSION,
            id,
            method,
            params,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    pub fn params(&self) -> &P {
        &self.params
    }

    /// The request body to post.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Params of `account_put_deploy`.
#[derive(Clone, Debug, Serialize)]
pub struct PutDeployParams<'a> {
    pub deploy: &'a Deploy,
}

/// Params of `account_put_transaction`.
#[derive(Clone, Debug, Serialize)]
pub struct PutTransactionParams<'a> {
    pub transaction: &'a Transaction,
}

/// Build an `account_put_deploy` request, refusing deploys over the size limit.
pub fn put_deploy_request(id: u64, deploy: &Deploy) -> Result<JsonRpcRequest<PutDeployParams<'_>>, Error> {
    deploy.check_size()?;
    Ok(JsonRpcRequest::new(id, ACCOUNT_PUT_DEPLOY, PutDeployParams { deploy }))
}

/// Build an `account_put_transaction` request, refusing transactions over the
/// size limit.
pub fn put_transaction_request(
    id: u64,
    transaction: &Transaction,
) -> Result<JsonRpcRequest<PutTransactionParams<'_>>, Error> {
    transaction.check_size()?;
    Ok(JsonRpcRequest::new(
        id,
        ACCOUNT_PUT_TRANSACTION,
        PutTransactionParams { transaction },
    ))
}

/// Which purse to read a balance from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurseIdentifier {
    MainPurseUnderPublicKey(PublicKey),
    MainPurseUnderAccountHash(AccountHash),
    MainPurseUnderEntityAddr(EntityAddr),
    PurseUref(URef),
}

impl From<PublicKey> for PurseIdentifier {
    fn from(public_key: PublicKey) -> Self {
        PurseIdentifier::MainPurseUnderPublicKey(public_key)
    }
}

impl From<AccountHash> for PurseIdentifier {
    fn from(account_hash: AccountHash) -> Self {
        PurseIdentifier::MainPurseUnderAccountHash(account_hash)
    }
}

impl From<URef> for PurseIdentifier {
    fn from(uref: URef) -> Self {
        PurseIdentifier::PurseUref(uref)
    }
}

/// Which global state to query; the latest block when omitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlobalStateIdentifier {
    BlockHash(Digest),
    BlockHeight(u64),
    StateRootHash(Digest),
}

/// Params of `query_balance`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueryBalanceParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_identifier: Option<GlobalStateIdentifier>,
    pub purse_identifier: PurseIdentifier,
}

pub fn query_balance_request(
    id: u64,
    purse_identifier: impl Into<PurseIdentifier>,
    state_identifier: Option<GlobalStateIdentifier>,
) -> JsonRpcRequest<QueryBalanceParams> {
    JsonRpcRequest::new(
        id,
        QUERY_BALANCE,
        QueryBalanceParams {
            state_identifier,
            purse_identifier: purse_identifier.into(),
        },
    )
}

// ============================================================================
// Responses
// ============================================================================

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse<T> {
    #[allow(dead_code)]
    jsonrpc: String,
    #[serde(default)]
    pub id: serde_json::Value,
    result: Option<T>,
    error: Option<JsonRpcError>,
}

/// The `error` member of a failed response.
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

impl<T> JsonRpcResponse<T> {
    pub fn into_result(self) -> Result<T, RpcError> {
        if let Some(error) = self.error {
            return Err(RpcError::Rpc {
                code: error.code,
                message: error.message,
                data: error.data,
            });
        }
        self.result
            .ok_or_else(|| RpcError::InvalidResponse("Missing result in response".to_string()))
    }
}

/// Parse a response body into its `result`, or the node's error.
pub fn parse_response<T: DeserializeOwned>(body: &str) -> Result<T, RpcError> {
    let response: JsonRpcResponse<T> = serde_json::from_str(body)?;
    response.into_result()
}

/// Result of `account_put_deploy`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PutDeployResult {
    pub api_version: String,
    pub deploy_hash: Digest,
}

/// Hash of either transaction format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionHash {
    Deploy(Digest),
    Version1(Digest),
}

impl TransactionHash {
    pub fn digest(&self) -> &Digest {
        match self {
            TransactionHash::Deploy(digest) | TransactionHash::Version1(digest) => digest,
        }
    }
}

/// Result of `account_put_transaction`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PutTransactionResult {
    pub api_version: String,
    pub transaction_hash: TransactionHash,
}

/// Result of `query_balance`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct QueryBalanceResult {
    pub api_version: String,
    #[serde(deserialize_with = "u512_from_decimal")]
    pub balance: U512,
}

/// Motes travel as decimal strings.
fn u512_from_decimal<'de, D: Deserializer<'de>>(d: D) -> Result<U512, D::Error> {
    let s = String::deserialize(d)?;
    U512::from_dec_str(&s).map_err(serde::de::Error::custom)
}
