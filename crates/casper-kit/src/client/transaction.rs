//! Fluent builders for deploys and version 1 transactions.
//!
//! Each builder collects the header parameters, the executable part and any
//! signers, then assembles, hashes and signs in one `build()` call.
//!
//! # Example
//!
//! ```rust
//! # use casper_kit::*;
//! # fn example() -> Result<(), casper_kit::Error> {
//! let signer = InMemorySigner::from_secret_key(SecretKey::ed25519_from_bytes([1; 32]));
//! let recipient = SecretKey::ed25519_from_bytes([2; 32]).public_key();
//!
//! let deploy = NetworkConfig::TESTNET
//!     .deploy(signer.public_key().clone())
//!     .ttl(TimeDiff::from_minutes(60))
//!     .transfer(U512::from(2_500_000_000u64), recipient, 7)
//!     .standard_payment(100_000_000u64)
//!     .sign_with(signer)
//!     .build()?;
//!
//! assert!(deploy.is_transfer());
//! assert!(deploy.validate().is_ok());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::error::Error;
use crate::types::native_args::{self, DelegationLimits};
use crate::types::{
    CLValue, Deploy, DeployParams, Digest, ExecutableDeployItem, InitiatorAddr, PricingMode,
    PublicKey, RuntimeArgs, TimeDiff, Timestamp, TransactionEntryPoint,
    TransactionInvocationTarget, TransactionRuntime, TransactionScheduling, TransactionTarget,
    TransactionV1, TransactionV1Body, TransactionV1Params, TransferTarget, U512, URef,
};

use super::signer::{Signer, sign_deploy, sign_transaction_v1};

// ============================================================================
// DeployBuilder
// ============================================================================

/// Builder for a [`Deploy`].
///
/// Both a session and a payment item are required; `build()` reports which
/// one is missing.
///
/// # Example
///
/// ```rust
/// # use casper_kit::*;
/// # fn example() -> Result<(), casper_kit::Error> {
/// let account = SecretKey::ed25519_from_bytes([1; 32]).public_key();
/// let deploy = DeployBuilder::new(account, "casper-test")
///     .call_by_name("counter", "counter_inc", RuntimeArgs::new())
///     .arg("step", 2u32)
///     .standard_payment(2_500_000_000u64)
///     .build()?;
///
/// assert_eq!(deploy.session().entry_point_name(), "counter_inc");
/// assert!(!deploy.is_signed());
/// # Ok(())
/// # }
/// ```
pub struct DeployBuilder {
    params: DeployParams,
    session: Option<ExecutableDeployItem>,
    payment: Option<ExecutableDeployItem>,
    extra_args: RuntimeArgs,
    signers: Vec<Arc<dyn Signer>>,
}

impl DeployBuilder {
    pub fn new(account: PublicKey, chain_name: impl Into<String>) -> Self {
        Self {
            params: DeployParams::new(account, chain_name),
            session: None,
            payment: None,
            extra_args: RuntimeArgs::new(),
            signers: Vec::new(),
        }
    }

    // ========================================================================
    // Header
    // ========================================================================

    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.params = self.params.timestamp(timestamp);
        self
    }

    pub fn ttl(mut self, ttl: TimeDiff) -> Self {
        self.params = self.params.ttl(ttl);
        self
    }

    pub fn gas_price(mut self, gas_price: u64) -> Self {
        self.params = self.params.gas_price(gas_price);
        self
    }

    /// Deploys that must execute before this one.
    pub fn dependencies(mut self, dependencies: impl IntoIterator<Item = Digest>) -> Self {
        self.params = self.params.dependencies(dependencies);
        self
    }

    // ========================================================================
    // Session
    // ========================================================================

    /// Use a prebuilt session item, replacing any set earlier.
    pub fn session(mut self, session: ExecutableDeployItem) -> Self {
        self.session = Some(session);
        self
    }

    /// Run Wasm shipped with the deploy.
    pub fn module_bytes(self, module_bytes: impl Into<Vec<u8>>, args: RuntimeArgs) -> Self {
        self.session(ExecutableDeployItem::new_module_bytes(module_bytes, args))
    }

    /// Call a contract stored under a named key of the sending account.
    pub fn call_by_name(
        self,
        name: impl Into<String>,
        entry_point: impl Into<String>,
        args: RuntimeArgs,
    ) -> Self {
        self.session(ExecutableDeployItem::new_stored_contract_by_name(
            name,
            entry_point,
            args,
        ))
    }

    /// Call a contract by its hash.
    pub fn call_by_hash(
        self,
        hash: [u8; 32],
        entry_point: impl Into<String>,
        args: RuntimeArgs,
    ) -> Self {
        self.session(ExecutableDeployItem::new_stored_contract_by_hash(
            hash,
            entry_point,
            args,
        ))
    }

    /// Native transfer from the account's main purse.
    pub fn transfer(
        self,
        amount: impl Into<U512>,
        target: impl Into<TransferTarget>,
        transfer_id: u64,
    ) -> Self {
        self.session(ExecutableDeployItem::new_transfer(
            amount,
            None,
            target.into(),
            transfer_id,
        ))
    }

    /// Native transfer from a specific purse of the account.
    pub fn transfer_from_purse(
        self,
        source: URef,
        amount: impl Into<U512>,
        target: impl Into<TransferTarget>,
        transfer_id: u64,
    ) -> Self {
        self.session(ExecutableDeployItem::new_transfer(
            amount,
            Some(source),
            target.into(),
            transfer_id,
        ))
    }

    /// Add a session argument. Arguments added here are applied after the
    /// session item's own, replacing any with the same name.
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<CLValue>) -> Self {
        self.extra_args.insert(name, value);
        self
    }

    // ========================================================================
    // Payment
    // ========================================================================

    /// Use a prebuilt payment item.
    pub fn payment(mut self, payment: ExecutableDeployItem) -> Self {
        self.payment = Some(payment);
        self
    }

    /// Pay `amount` motes with the system's standard payment code.
    pub fn standard_payment(self, amount: impl Into<U512>) -> Self {
        self.payment(ExecutableDeployItem::standard_payment(amount))
    }

    // ========================================================================
    // Signing
    // ========================================================================

    /// Add a signer. Signers are applied in the order they were added.
    pub fn sign_with(mut self, signer: impl Signer + 'static) -> Self {
        self.signers.push(Arc::new(signer));
        self
    }

    /// Assemble, hash and sign the deploy.
    pub fn build(self) -> Result<Deploy, Error> {
        let mut session = self
            .session
            .ok_or_else(|| Error::InvalidTransaction("deploy has no session".to_string()))?;
        let payment = self
            .payment
            .ok_or_else(|| Error::InvalidTransaction("deploy has no payment".to_string()))?;
        for arg in self.extra_args.iter() {
            session
                .args_mut()
                .insert_cl_value(arg.name(), arg.value().clone());
        }
        session.args().validate()?;
        payment.args().validate()?;

        let mut deploy = Deploy::new(self.params, session, payment);
        for signer in &self.signers {
            deploy = sign_deploy(deploy, signer)?;
        }
        deploy.check_size()?;
        debug!(
            hash = %deploy.hash(),
            approvals = deploy.approvals().len(),
            "built deploy"
        );
        Ok(deploy)
    }
}

// ============================================================================
// TransactionV1Builder
// ============================================================================

/// Builder for a [`TransactionV1`].
///
/// # Example
///
/// ```rust
/// # use casper_kit::*;
/// # fn example() -> Result<(), casper_kit::Error> {
/// let delegator = SecretKey::ed25519_from_bytes([1; 32]);
/// let validator = SecretKey::ed25519_from_bytes([2; 32]).public_key();
///
/// let transaction = TransactionV1Builder::new(delegator.public_key(), "casper-test")
///     .delegate(delegator.public_key(), validator, U512::from(500_000_000_000u64))
///     .pricing_mode(PricingMode::Fixed { gas_price_tolerance: 3 })
///     .sign_with(InMemorySigner::from_secret_key(delegator))
///     .build()?;
///
/// assert_eq!(transaction.body().entry_point(), &TransactionEntryPoint::Delegate);
/// # Ok(())
/// # }
/// ```
pub struct TransactionV1Builder {
    params: TransactionV1Params,
    target: Option<(TransactionTarget, TransactionEntryPoint)>,
    args: RuntimeArgs,
    scheduling: TransactionScheduling,
    signers: Vec<Arc<dyn Signer>>,
}

impl TransactionV1Builder {
    pub fn new(initiator: impl Into<InitiatorAddr>, chain_name: impl Into<String>) -> Self {
        Self {
            params: TransactionV1Params::new(initiator, chain_name),
            target: None,
            args: RuntimeArgs::new(),
            scheduling: TransactionScheduling::Standard,
            signers: Vec::new(),
        }
    }

    // ========================================================================
    // Header
    // ========================================================================

    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.params = self.params.timestamp(timestamp);
        self
    }

    pub fn ttl(mut self, ttl: TimeDiff) -> Self {
        self.params = self.params.ttl(ttl);
        self
    }

    pub fn pricing_mode(mut self, pricing_mode: PricingMode) -> Self {
        self.params = self.params.pricing_mode(pricing_mode);
        self
    }

    pub fn scheduling(mut self, scheduling: TransactionScheduling) -> Self {
        self.scheduling = scheduling;
        self
    }

    // ========================================================================
    // Target
    // ========================================================================

    fn native(mut self, entry_point: TransactionEntryPoint, args: RuntimeArgs) -> Self {
        self.target = Some((TransactionTarget::Native, entry_point));
        self.args = args;
        self
    }

    /// Native transfer from the initiator's main purse.
    pub fn transfer(
        self,
        target: impl Into<TransferTarget>,
        amount: impl Into<U512>,
        id: Option<u64>,
    ) -> Self {
        let args = native_args::transfer_args(None, target.into(), amount, id);
        self.native(TransactionEntryPoint::Transfer, args)
    }

    /// Native transfer from a specific purse.
    pub fn transfer_from_purse(
        self,
        source: URef,
        target: impl Into<TransferTarget>,
        amount: impl Into<U512>,
        id: Option<u64>,
    ) -> Self {
        let args = native_args::transfer_args(Some(source), target.into(), amount, id);
        self.native(TransactionEntryPoint::Transfer, args)
    }

    pub fn add_bid(
        self,
        public_key: PublicKey,
        delegation_rate: u8,
        amount: impl Into<U512>,
        limits: DelegationLimits,
    ) -> Self {
        let args = native_args::add_bid_args(public_key, delegation_rate, amount, limits);
        self.native(TransactionEntryPoint::AddBid, args)
    }

    pub fn withdraw_bid(self, public_key: PublicKey, amount: impl Into<U512>) -> Self {
        let args = native_args::withdraw_bid_args(public_key, amount);
        self.native(TransactionEntryPoint::WithdrawBid, args)
    }

    pub fn delegate(
        self,
        delegator: PublicKey,
        validator: PublicKey,
        amount: impl Into<U512>,
    ) -> Self {
        let args = native_args::delegate_args(delegator, validator, amount);
        self.native(TransactionEntryPoint::Delegate, args)
    }

    pub fn undelegate(
        self,
        delegator: PublicKey,
        validator: PublicKey,
        amount: impl Into<U512>,
    ) -> Self {
        let args = native_args::undelegate_args(delegator, validator, amount);
        self.native(TransactionEntryPoint::Undelegate, args)
    }

    pub fn redelegate(
        self,
        delegator: PublicKey,
        validator: PublicKey,
        amount: impl Into<U512>,
        new_validator: PublicKey,
    ) -> Self {
        let args = native_args::redelegate_args(delegator, validator, amount, new_validator);
        self.native(TransactionEntryPoint::Redelegate, args)
    }

    pub fn activate_bid(self, validator: PublicKey) -> Self {
        self.native(
            TransactionEntryPoint::ActivateBid,
            native_args::activate_bid_args(validator),
        )
    }

    pub fn change_bid_public_key(self, public_key: PublicKey, new_public_key: PublicKey) -> Self {
        let args = native_args::change_bid_public_key_args(public_key, new_public_key);
        self.native(TransactionEntryPoint::ChangeBidPublicKey, args)
    }

    /// Call `entry_point` on stored code. Add arguments with [`Self::arg`].
    pub fn call(mut self, id: TransactionInvocationTarget, entry_point: impl Into<String>) -> Self {
        self.target = Some((
            TransactionTarget::stored(id),
            TransactionEntryPoint::custom(entry_point),
        ));
        self
    }

    /// Run Wasm shipped with the transaction.
    pub fn session(mut self, module_bytes: impl Into<Vec<u8>>) -> Self {
        self.target = Some((
            TransactionTarget::session(module_bytes),
            TransactionEntryPoint::Call,
        ));
        self
    }

    /// Run Wasm shipped with the transaction on a chosen runtime.
    pub fn session_with_runtime(
        mut self,
        module_bytes: impl Into<Vec<u8>>,
        runtime: TransactionRuntime,
    ) -> Self {
        self.target = Some((
            TransactionTarget::Session {
                module_bytes: module_bytes.into(),
                runtime,
            },
            TransactionEntryPoint::Call,
        ));
        self
    }

    /// Add or replace an argument.
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<CLValue>) -> Self {
        self.args.insert(name, value);
        self
    }

    // ========================================================================
    // Signing
    // ========================================================================

    /// Add a signer. Signers are applied in the order they were added.
    pub fn sign_with(mut self, signer: impl Signer + 'static) -> Self {
        self.signers.push(Arc::new(signer));
        self
    }

    /// Assemble, hash and sign the transaction.
    pub fn build(self) -> Result<TransactionV1, Error> {
        let (target, entry_point) = self
            .target
            .ok_or_else(|| Error::InvalidTransaction("transaction has no target".to_string()))?;
        self.args.validate()?;
        let body = TransactionV1Body::new(self.args, target, entry_point, self.scheduling);

        let mut transaction = TransactionV1::new(self.params, body);
        for signer in &self.signers {
            transaction = sign_transaction_v1(transaction, signer)?;
        }
        transaction.check_size()?;
        debug!(
            hash = %transaction.hash(),
            approvals = transaction.approvals().len(),
            "built transaction"
        );
        Ok(transaction)
    }
}
