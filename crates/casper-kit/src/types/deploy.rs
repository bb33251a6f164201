//! Deploy, the legacy transaction format.
//!
//! A deploy is hashed in two stages. The body hash covers the payment and
//! session items, `blake2b(payment ++ session)`, and is stored in the header.
//! The deploy hash is `blake2b(header)`, and that hash is what approvals sign.
//! Any change to payment, session or header therefore yields a new deploy.
//!
//! # Example
//!
//! ```rust
//! use casper_kit::{Deploy, DeployParams, ExecutableDeployItem, SecretKey, TransferTarget, U512};
//!
//! let secret_key = SecretKey::ed25519_from_bytes([1; 32]);
//! let target = SecretKey::ed25519_from_bytes([2; 32]).public_key();
//!
//! let params = DeployParams::new(secret_key.public_key(), "casper-test");
//! let session = ExecutableDeployItem::new_transfer(
//!     U512::from(2_500_000_000u64),
//!     None,
//!     TransferTarget::PublicKey(target),
//!     1,
//! );
//! let payment = ExecutableDeployItem::standard_payment(U512::from(100_000_000u64));
//!
//! let deploy = Deploy::new(params, session, payment).sign(&secret_key);
//! assert!(deploy.validate().is_ok());
//! ```

use std::io::{Read, Write};

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::approval::{Approval, verify_approvals};
use super::bytesrepr;
use super::cl_value::CLValue;
use super::executable::ExecutableDeployItem;
use super::hash::Digest;
use super::key::{PublicKey, SecretKey, Signature};
use super::time::{TimeDiff, Timestamp};
use crate::error::{Error, SignerError, ValidationError};

/// Largest serialized deploy or transaction a node accepts, in bytes.
pub const MAX_SERIALIZED_SIZE: usize = 1_048_576;

/// Default time to live: 30 minutes.
pub const DEFAULT_TTL: TimeDiff = TimeDiff::from_minutes(30);

/// Default gas price multiplier.
pub const DEFAULT_GAS_PRICE: u64 = 1;

// ============================================================================
// DeployParams
// ============================================================================

/// Header template for [`Deploy::new`].
///
/// Defaults: TTL of 30 minutes, gas price 1, timestamp taken when the
/// params are created, no dependencies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployParams {
    account: PublicKey,
    chain_name: String,
    gas_price: u64,
    ttl: TimeDiff,
    timestamp: Timestamp,
    dependencies: Vec<Digest>,
}

impl DeployParams {
    pub fn new(account: PublicKey, chain_name: impl Into<String>) -> Self {
        Self {
            account,
            chain_name: chain_name.into(),
            gas_price: DEFAULT_GAS_PRICE,
            ttl: DEFAULT_TTL,
            timestamp: Timestamp::now(),
            dependencies: Vec::new(),
        }
    }

    pub fn gas_price(mut self, gas_price: u64) -> Self {
        self.gas_price = gas_price;
        self
    }

    pub fn ttl(mut self, ttl: TimeDiff) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Deploys that must execute before this one.
    pub fn dependencies(mut self, dependencies: impl IntoIterator<Item = Digest>) -> Self {
        self.dependencies = dependencies.into_iter().collect();
        self
    }

    pub fn account(&self) -> &PublicKey {
        &self.account
    }

    pub fn chain_name(&self) -> &str {
        &self.chain_name
    }
}

// ============================================================================
// DeployHeader
// ============================================================================

/// The hashed part of a deploy. Field order is the wire order.
#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
#[serde(deny_unknown_fields)]
pub struct DeployHeader {
    account: PublicKey,
    timestamp: Timestamp,
    ttl: TimeDiff,
    gas_price: u64,
    body_hash: Digest,
    dependencies: Vec<Digest>,
    chain_name: String,
}

impl DeployHeader {
    pub fn account(&self) -> &PublicKey {
        &self.account
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn ttl(&self) -> TimeDiff {
        self.ttl
    }

    pub fn gas_price(&self) -> u64 {
        self.gas_price
    }

    pub fn body_hash(&self) -> &Digest {
        &self.body_hash
    }

    pub fn dependencies(&self) -> &[Digest] {
        &self.dependencies
    }

    pub fn chain_name(&self) -> &str {
        &self.chain_name
    }

    /// When the deploy stops being accepted.
    pub fn expires(&self) -> Timestamp {
        Timestamp::from_millis(self.timestamp.millis().saturating_add(self.ttl.millis()))
    }

    /// BLAKE2b-256 of the header bytes.
    pub fn compute_hash(&self) -> Digest {
        Digest::hash(bytesrepr::to_bytes(self))
    }

    fn to_params(&self) -> DeployParams {
        DeployParams {
            account: self.account.clone(),
            chain_name: self.chain_name.clone(),
            gas_price: self.gas_price,
            ttl: self.ttl,
            timestamp: self.timestamp,
            dependencies: self.dependencies.clone(),
        }
    }
}

// ============================================================================
// Deploy
// ============================================================================

/// A deploy with its hash, header, payment, session and approvals.
///
/// Built unsigned by [`Deploy::new`]; once the first approval is attached
/// the payment and session can no longer change. JSON input always goes
/// through [`Deploy::validate`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedDeploy")]
pub struct Deploy {
    hash: Digest,
    header: DeployHeader,
    payment: ExecutableDeployItem,
    session: ExecutableDeployItem,
    approvals: Vec<Approval>,
}

impl Deploy {
    /// Assemble an unsigned deploy, computing the body hash and the deploy hash.
    pub fn new(
        params: DeployParams,
        session: ExecutableDeployItem,
        payment: ExecutableDeployItem,
    ) -> Self {
        let body_hash = compute_body_hash(&payment, &session);
        let header = DeployHeader {
            account: params.account,
            timestamp: params.timestamp,
            ttl: params.ttl,
            gas_price: params.gas_price,
            body_hash,
            dependencies: params.dependencies,
            chain_name: params.chain_name,
        };
        let hash = header.compute_hash();
        let deploy = Self {
            hash,
            header,
            payment,
            session,
            approvals: Vec::new(),
        };
        debug!(
            hash = %deploy.hash,
            body_hash = %body_hash,
            size = deploy.size_in_bytes(),
            chain_name = %deploy.header.chain_name,
            "built deploy"
        );
        deploy
    }

    pub fn hash(&self) -> &Digest {
        &self.hash
    }

    pub fn header(&self) -> &DeployHeader {
        &self.header
    }

    pub fn payment(&self) -> &ExecutableDeployItem {
        &self.payment
    }

    pub fn session(&self) -> &ExecutableDeployItem {
        &self.session
    }

    pub fn approvals(&self) -> &[Approval] {
        &self.approvals
    }

    pub fn is_signed(&self) -> bool {
        !self.approvals.is_empty()
    }

    pub fn is_transfer(&self) -> bool {
        self.session.is_transfer()
    }

    /// A copy of this deploy with one more session argument, rehashed.
    ///
    /// Fails with [`Error::AlreadySigned`] once any approval is attached;
    /// `self` is never modified.
    pub fn with_arg(&self, name: impl Into<String>, value: impl Into<CLValue>) -> Result<Self, Error> {
        if self.is_signed() {
            return Err(Error::AlreadySigned);
        }
        let value = value.into();
        value.validate()?;
        let mut session = self.session.clone();
        session.args_mut().insert_cl_value(name, value);
        Ok(Deploy::new(self.header.to_params(), session, self.payment.clone()))
    }

    /// Sign the deploy hash and append the approval.
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

    /// Append an approval without checking it; [`Deploy::validate`] will.
    pub fn push_approval(&mut self, approval: Approval) {
        debug!(
            hash = %self.hash,
            signer = %approval.signer(),
            approvals = self.approvals.len() + 1,
            "appended deploy approval"
        );
        self.approvals.push(approval);
    }

    /// Recompute both hashes and verify every approval.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let computed = compute_body_hash(&self.payment, &self.session);
        if computed != self.header.body_hash {
            warn!(hash = %self.hash, stored = %self.header.body_hash, %computed, "deploy body hash mismatch");
            return Err(ValidationError::BodyHashMismatch {
                stored: self.header.body_hash,
                computed,
            });
        }

        let computed = self.header.compute_hash();
        if computed != self.hash {
            warn!(stored = %self.hash, %computed, "deploy hash mismatch");
            return Err(ValidationError::HashMismatch {
                stored: self.hash,
                computed,
            });
        }

        verify_approvals(&self.hash, &self.approvals)
    }

    /// Parse and validate a deploy from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let unchecked: UncheckedDeploy = serde_json::from_str(json)?;
        Ok(Deploy::try_from(unchecked)?)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    /// Binary form: header, hash, payment, session, approvals.
    pub fn to_bytes(&self) -> Vec<u8> {
        bytesrepr::to_bytes(self)
    }

    /// Decode and validate a deploy from its binary form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let deploy: Deploy = bytesrepr::from_bytes_exact(bytes)?;
        deploy.validate()?;
        Ok(deploy)
    }

    pub fn size_in_bytes(&self) -> usize {
        self.to_bytes().len()
    }

    /// Fails with [`Error::DeployTooLarge`] above [`MAX_SERIALIZED_SIZE`].
    pub fn check_size(&self) -> Result<(), Error> {
        let size = self.size_in_bytes();
        if size > MAX_SERIALIZED_SIZE {
            return Err(Error::DeployTooLarge(size));
        }
        Ok(())
    }
}

fn compute_body_hash(payment: &ExecutableDeployItem, session: &ExecutableDeployItem) -> Digest {
    let mut bytes = payment.to_bytes();
    bytes.extend(session.to_bytes());
    Digest::hash(bytes)
}

impl BorshSerialize for Deploy {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        BorshSerialize::serialize(&self.header, writer)?;
        BorshSerialize::serialize(&self.hash, writer)?;
        BorshSerialize::serialize(&self.payment, writer)?;
        BorshSerialize::serialize(&self.session, writer)?;
        BorshSerialize::serialize(&self.approvals, writer)
    }
}

impl BorshDeserialize for Deploy {
    fn deserialize_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let header = DeployHeader::deserialize_reader(reader)?;
        let hash = Digest::deserialize_reader(reader)?;
        let payment = ExecutableDeployItem::deserialize_reader(reader)?;
        let session = ExecutableDeployItem::deserialize_reader(reader)?;
        let approvals = Vec::<Approval>::deserialize_reader(reader)?;
        Ok(Self {
            hash,
            header,
            payment,
            session,
            approvals,
        })
    }
}

/// JSON as received, before hashes and approvals are checked.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UncheckedDeploy {
    hash: Digest,
    header: DeployHeader,
    payment: ExecutableDeployItem,
    session: ExecutableDeployItem,
    approvals: Vec<Approval>,
}

impl TryFrom<UncheckedDeploy> for Deploy {
    type Error = ValidationError;

    fn try_from(unchecked: UncheckedDeploy) -> Result<Self, Self::Error> {
        let deploy = Deploy {
            hash: unchecked.hash,
            header: unchecked.header,
            payment: unchecked.payment,
            session: unchecked.session,
            approvals: unchecked.approvals,
        };
        deploy.validate()?;
        Ok(deploy)
    }
}

#[cfg(test)]
mod tests {
    use primitive_types::U512;

    use super::*;
    use crate::types::executable::TransferTarget;

    fn test_deploy() -> Deploy {
        let secret_key = SecretKey::ed25519_from_bytes([1; 32]);
        let params = DeployParams::new(secret_key.public_key(), "casper-test")
            .timestamp(Timestamp::from_millis(1_605_573_564_072))
            .gas_price(1);
        let session = ExecutableDeployItem::new_transfer(
            U512::from(2_500_000_000u64),
            None,
            TransferTarget::AccountHash(crate::types::global_key::AccountHash::new([1; 32])),
            7,
        );
        Deploy::new(params, session, ExecutableDeployItem::standard_payment(100_000_000u64))
    }

    #[test]
    fn test_params_defaults() {
        let params = DeployParams::new(PublicKey::system(), "casper");
        assert_eq!(params.ttl, TimeDiff::from_millis(1_800_000));
        assert_eq!(params.gas_price, 1);
        assert!(params.dependencies.is_empty());
        assert_eq!(params.chain_name(), "casper");
    }

    #[test]
    fn test_hashes_are_consistent() {
        let deploy = test_deploy();
        let mut body = deploy.payment.to_bytes();
        body.extend(deploy.session.to_bytes());
        assert_eq!(deploy.header.body_hash, Digest::hash(&body));
        assert_eq!(deploy.hash, Digest::hash(bytesrepr::to_bytes(&deploy.header)));
        assert!(deploy.validate().is_ok());
    }

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(test_deploy().hash(), test_deploy().hash());
    }

    #[test]
    fn test_sign_keeps_hash() {
        let deploy = test_deploy();
        let hash = *deploy.hash();
        let body_hash = *deploy.header().body_hash();
        let signed = deploy.sign(&SecretKey::ed25519_from_bytes([1; 32]));

        assert_eq!(signed.hash(), &hash);
        assert_eq!(signed.header().body_hash(), &body_hash);
        assert_eq!(signed.approvals().len(), 1);
        assert!(signed.validate().is_ok());
    }

    #[test]
    fn test_multiple_signers_in_order() {
        let first = SecretKey::ed25519_from_bytes([1; 32]);
        let second = SecretKey::secp256k1_from_bytes([1; 32]).unwrap();
        let deploy = test_deploy().sign(&first).sign(&second);
        let signers: Vec<_> = deploy.approvals().iter().map(|a| a.signer().clone()).collect();
        assert_eq!(signers, vec![first.public_key(), second.public_key()]);
        assert!(deploy.validate().is_ok());
    }

    #[test]
    fn test_with_arg_rehashes() {
        let deploy = test_deploy();
        let updated = deploy.with_arg("memo", "hello").unwrap();
        assert_ne!(updated.hash(), deploy.hash());
        assert_ne!(updated.header().body_hash(), deploy.header().body_hash());
        assert_eq!(updated.session().args().get("memo"), Some(&CLValue::from("hello")));
        assert_eq!(updated.header().timestamp(), deploy.header().timestamp());
        assert!(updated.validate().is_ok());
    }

    #[test]
    fn test_with_arg_after_signing_fails() {
        let signed = test_deploy().sign(&SecretKey::ed25519_from_bytes([1; 32]));
        let before = signed.clone();
        let err = signed.with_arg("memo", "hello").unwrap_err();
        assert!(matches!(err, Error::AlreadySigned));
        assert_eq!(err.to_string(), "Can not add argument to already signed deploy.");
        assert_eq!(signed, before);
    }

    #[test]
    fn test_set_signature() {
        let secret_key = SecretKey::ed25519_from_bytes([1; 32]);
        let deploy = test_deploy();
        let signature = secret_key.sign(deploy.hash().as_bytes());

        let signed = deploy
            .clone()
            .set_signature(signature.clone(), secret_key.public_key())
            .unwrap();
        assert!(signed.validate().is_ok());

        let other = SecretKey::ed25519_from_bytes([2; 32]).public_key();
        let err = deploy.set_signature(signature, other).unwrap_err();
        assert!(matches!(err, Error::Signing(SignerError::KeyMismatch(_))));
    }

    #[test]
    fn test_invalid_approval_detected() {
        let mut deploy = test_deploy();
        let stranger = SecretKey::ed25519_from_bytes([9; 32]);
        let bogus = Approval::new(
            SecretKey::ed25519_from_bytes([1; 32]).public_key(),
            stranger.sign(deploy.hash().as_bytes()),
        );
        deploy.push_approval(bogus);
        let err = deploy.validate().unwrap_err();
        assert!(err.is_signature_invalid());
        assert!(matches!(err, ValidationError::InvalidSignature { index: 0, .. }));
    }

    #[test]
    fn test_bytes_roundtrip() {
        let deploy = test_deploy().sign(&SecretKey::ed25519_from_bytes([1; 32]));
        let bytes = deploy.to_bytes();
        assert_eq!(hex::encode(&bytes[..33]), deploy.header().account().to_hex());
        assert_eq!(Deploy::from_bytes(&bytes).unwrap(), deploy);
        assert_eq!(deploy.size_in_bytes(), bytes.len());
    }

    #[test]
    fn test_from_bytes_rejects_tampering() {
        let deploy = test_deploy();
        let mut bytes = deploy.to_bytes();
        // Gas price sits after account (33), timestamp (8) and ttl (8).
        bytes[49] ^= 0xff;
        let err = Deploy::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::HashMismatch { .. })));
    }

    #[test]
    fn test_json_roundtrip() {
        let deploy = test_deploy().sign(&SecretKey::ed25519_from_bytes([1; 32]));
        let json = deploy.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["header"]["ttl"], "30m");
        assert_eq!(value["header"]["timestamp"], "2020-11-17T00:39:24.072Z");
        assert_eq!(value["header"]["chain_name"], "casper-test");
        assert_eq!(value["hash"], deploy.hash().to_hex());
        assert_eq!(Deploy::from_json(&json).unwrap(), deploy);
    }

    #[test]
    fn test_json_tampered_hash_rejected() {
        let deploy = test_deploy();
        let mut value = serde_json::to_value(&deploy).unwrap();
        value["hash"] = serde_json::Value::String(Digest::ZERO.to_hex());
        let err = Deploy::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::HashMismatch { .. })));

        // The derived Deserialize validates as well.
        assert!(serde_json::from_value::<Deploy>(value).is_err());
    }

    #[test]
    fn test_check_size() {
        assert!(test_deploy().check_size().is_ok());
    }

    #[test]
    fn test_expires() {
        let deploy = test_deploy();
        assert_eq!(deploy.header().expires().millis(), 1_605_573_564_072 + 1_800_000);
    }
}
