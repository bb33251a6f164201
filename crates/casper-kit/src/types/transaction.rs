//! TransactionV1 and the [`Transaction`] wrapper.
//!
//! A `TransactionV1` follows the same two-stage hashing as a
//! [`Deploy`]: the body hash is `blake2b(body)` and is stored in the
//! header, the transaction hash is `blake2b(header)` and is what approvals
//! sign.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::approval::{Approval, verify_approvals};
use super::bytesrepr;
use super::deploy::{DEFAULT_TTL, Deploy, MAX_SERIALIZED_SIZE};
use super::hash::Digest;
use super::key::{PublicKey, SecretKey, Signature};
use super::runtime_args::RuntimeArgs;
use super::time::{TimeDiff, Timestamp};
use super::transaction_target::{
    InitiatorAddr, PricingMode, TransactionEntryPoint, TransactionInvocationTarget,
    TransactionScheduling, TransactionTarget,
};
use crate::error::{Error, SignerError, ValidationError};

// ============================================================================
// TransactionV1Params
// ============================================================================

/// Header template for [`TransactionV1::new`].
///
/// Defaults: TTL of 30 minutes, fixed pricing with a gas price tolerance
/// of 5, timestamp taken when the params are created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionV1Params {
    initiator_addr: InitiatorAddr,
    chain_name: String,
    timestamp: Timestamp,
    ttl: TimeDiff,
    pricing_mode: PricingMode,
}

impl TransactionV1Params {
    pub fn new(initiator_addr: impl Into<InitiatorAddr>, chain_name: impl Into<String>) -> Self {
        Self {
            initiator_addr: initiator_addr.into(),
            chain_name: chain_name.into(),
            timestamp: Timestamp::now(),
            ttl: DEFAULT_TTL,
            pricing_mode: PricingMode::default(),
        }
    }

    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn ttl(mut self, ttl: TimeDiff) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn pricing_mode(mut self, pricing_mode: PricingMode) -> Self {
        self.pricing_mode = pricing_mode;
        self
    }
}

// ============================================================================
// Header and body
// ============================================================================

/// The hashed part of a transaction. Field order is the wire order.
#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
#[serde(deny_unknown_fields)]
pub struct TransactionV1Header {
    chain_name: String,
    timestamp: Timestamp,
    ttl: TimeDiff,
    body_hash: Digest,
    pricing_mode: PricingMode,
    initiator_addr: InitiatorAddr,
}

impl TransactionV1Header {
    pub fn chain_name(&self) -> &str {
        &self.chain_name
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn ttl(&self) -> TimeDiff {
        self.ttl
    }

    pub fn body_hash(&self) -> &Digest {
        &self.body_hash
    }

    pub fn pricing_mode(&self) -> &PricingMode {
        &self.pricing_mode
    }

    pub fn initiator_addr(&self) -> &InitiatorAddr {
        &self.initiator_addr
    }

    pub fn compute_hash(&self) -> Digest {
        Digest::hash(bytesrepr::to_bytes(self))
    }
}

/// What a transaction does: arguments, target, entry point and scheduling.
#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
#[serde(deny_unknown_fields)]
pub struct TransactionV1Body {
    args: RuntimeArgs,
    target: TransactionTarget,
    entry_point: TransactionEntryPoint,
    scheduling: TransactionScheduling,
}

impl TransactionV1Body {
    pub fn new(
        args: RuntimeArgs,
        target: TransactionTarget,
        entry_point: TransactionEntryPoint,
        scheduling: TransactionScheduling,
    ) -> Self {
        Self {
            args,
            target,
            entry_point,
            scheduling,
        }
    }

    /// A native system operation, scheduled immediately.
    pub fn native(entry_point: TransactionEntryPoint, args: RuntimeArgs) -> Self {
        Self::new(
            args,
            TransactionTarget::Native,
            entry_point,
            TransactionScheduling::Standard,
        )
    }

    /// Call `entry_point` on stored code.
    pub fn stored(
        id: TransactionInvocationTarget,
        entry_point: impl Into<String>,
        args: RuntimeArgs,
    ) -> Self {
        Self::new(
            args,
            TransactionTarget::stored(id),
            TransactionEntryPoint::custom(entry_point),
            TransactionScheduling::Standard,
        )
    }

    /// Run Wasm shipped with the transaction.
    pub fn session(module_bytes: impl Into<Vec<u8>>, args: RuntimeArgs) -> Self {
        Self::new(
            args,
            TransactionTarget::session(module_bytes),
            TransactionEntryPoint::Call,
            TransactionScheduling::Standard,
        )
    }

    pub fn with_scheduling(mut self, scheduling: TransactionScheduling) -> Self {
        self.scheduling = scheduling;
        self
    }

    pub fn args(&self) -> &RuntimeArgs {
        &self.args
    }

    pub fn target(&self) -> &TransactionTarget {
        &self.target
    }

    pub fn entry_point(&self) -> &TransactionEntryPoint {
        &self.entry_point
    }

    pub fn scheduling(&self) -> &TransactionScheduling {
        &self.scheduling
    }

    pub fn compute_hash(&self) -> Digest {
        Digest::hash(bytesrepr::to_bytes(self))
    }
}

// ============================================================================
// TransactionV1
// ============================================================================

/// A version 1 transaction with its hash, header, body and approvals.
///
/// Field order is the wire order. JSON input always goes through
/// [`TransactionV1::validate`].
#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
#[serde(try_from = "UncheckedTransactionV1")]
pub struct TransactionV1 {
    hash: Digest,
    header: TransactionV1Header,
    body: TransactionV1Body,
    approvals: Vec<Approval>,
}

impl TransactionV1 {
    /// Assemble an unsigned transaction, computing the body hash and the hash.
    pub fn new(params: TransactionV1Params, body: TransactionV1Body) -> Self {
        let body_hash = body.compute_hash();
        let header = TransactionV1Header {
            chain_name: params.chain_name,
            timestamp: params.timestamp,
            ttl: params.ttl,
            body_hash,
            pricing_mode: params.pricing_mode,
            initiator_addr: params.initiator_addr,
        };
        let hash = header.compute_hash();
        let transaction = Self {
            hash,
            header,
            body,
            approvals: Vec::new(),
        };
        debug!(
            hash = %transaction.hash,
            body_hash = %body_hash,
            size = transaction.size_in_bytes(),
            entry_point = %transaction.body.entry_point,
            "built transaction"
        );
        transaction
    }

    pub fn hash(&self) -> &Digest {
        &self.hash
    }

    pub fn header(&self) -> &TransactionV1Header {
        &self.header
    }

    pub fn body(&self) -> &TransactionV1Body {
        &self.body
    }

    pub fn approvals(&self) -> &[Approval] {
        &self.approvals
    }

    pub fn is_signed(&self) -> bool {
        !self.approvals.is_empty()
    }

    pub fn sign(mut self, secret_key: &SecretKey) -> Self {
        self.push_approval(Approval::create(&self.hash, secret_key));
        self
    }

    /// Append a signature produced elsewhere, after checking it verifies
    /// under `signer`.
    pub fn set_signature(mut self, signature: Signature, signer: PublicKey) -> Result<Self, Error> {
        if !signature.verify(self.hash.as_bytes(), &signer) {
            return Err(SignerError::KeyMismatch(signer).into());
        }
        self.push_approval(Approval::new(signer, signature));
        Ok(self)
    }

    pub fn push_approval(&mut self, approval: Approval) {
        debug!(
            hash = %self.hash,
            signer = %approval.signer(),
            approvals = self.approvals.len() + 1,
            "appended transaction approval"
        );
        self.approvals.push(approval);
    }

    /// Recompute both hashes and verify every approval.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let computed = self.body.compute_hash();
        if computed != self.header.body_hash {
            warn!(hash = %self.hash, stored = %self.header.body_hash, %computed, "transaction body hash mismatch");
            return Err(ValidationError::BodyHashMismatch {
                stored: self.header.body_hash,
                computed,
            });
        }

        let computed = self.header.compute_hash();
        if computed != self.hash {
            warn!(stored = %self.hash, %computed, "transaction hash mismatch");
            return Err(ValidationError::HashMismatch {
                stored: self.hash,
                computed,
            });
        }

        verify_approvals(&self.hash, &self.approvals)
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        let unchecked: UncheckedTransactionV1 = serde_json::from_str(json)?;
        Ok(TransactionV1::try_from(unchecked)?)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    /// Binary form: hash, header, body, approvals.
    pub fn to_bytes(&self) -> Vec<u8> {
        bytesrepr::to_bytes(self)
    }

    /// Decode and validate a transaction from its binary form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let transaction: TransactionV1 = bytesrepr::from_bytes_exact(bytes)?;
        transaction.validate()?;
        Ok(transaction)
    }

    pub fn size_in_bytes(&self) -> usize {
        self.to_bytes().len()
    }

    pub fn check_size(&self) -> Result<(), Error> {
        let size = self.size_in_bytes();
        if size > MAX_SERIALIZED_SIZE {
            return Err(Error::DeployTooLarge(size));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UncheckedTransactionV1 {
    hash: Digest,
    header: TransactionV1Header,
    body: TransactionV1Body,
    approvals: Vec<Approval>,
}

impl TryFrom<UncheckedTransactionV1> for TransactionV1 {
    type Error = ValidationError;

    fn try_from(unchecked: UncheckedTransactionV1) -> Result<Self, Self::Error> {
        let transaction = TransactionV1 {
            hash: unchecked.hash,
            header: unchecked.header,
            body: unchecked.body,
            approvals: unchecked.approvals,
        };
        transaction.validate()?;
        Ok(transaction)
    }
}

// ============================================================================
// Transaction
// ============================================================================

/// Either transaction format, as accepted by `account_put_transaction`.
///
/// JSON form: `{"Deploy": {...}}` or `{"Version1": {...}}`.
#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub enum Transaction {
    Deploy(Deploy),
    #[serde(rename = "Version1")]
    V1(TransactionV1),
}

impl Transaction {
    pub fn hash(&self) -> &Digest {
        match self {
            Transaction::Deploy(deploy) => deploy.hash(),
            Transaction::V1(transaction) => transaction.hash(),
        }
    }

    pub fn approvals(&self) -> &[Approval] {
        match self {
            Transaction::Deploy(deploy) => deploy.approvals(),
            Transaction::V1(transaction) => transaction.approvals(),
        }
    }

    pub fn sign(self, secret_key: &SecretKey) -> Self {
        match self {
            Transaction::Deploy(deploy) => Transaction::Deploy(deploy.sign(secret_key)),
            Transaction::V1(transaction) => Transaction::V1(transaction.sign(secret_key)),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Transaction::Deploy(deploy) => deploy.validate(),
            Transaction::V1(transaction) => transaction.validate(),
        }
    }

    pub fn size_in_bytes(&self) -> usize {
        match self {
            Transaction::Deploy(deploy) => deploy.size_in_bytes(),
            Transaction::V1(transaction) => transaction.size_in_bytes(),
        }
    }

    pub fn check_size(&self) -> Result<(), Error> {
        match self {
            Transaction::Deploy(deploy) => deploy.check_size(),
            Transaction::V1(transaction) => transaction.check_size(),
        }
    }
}

impl From<Deploy> for Transaction {
    fn from(deploy: Deploy) -> Self {
        Transaction::Deploy(deploy)
    }
}

impl From<TransactionV1> for Transaction {
    fn from(transaction: TransactionV1) -> Self {
        Transaction::V1(transaction)
    }
}
