//! Signer trait and implementations.
//!
//! A `Signer` knows which public key it signs as and hands out a
//! [`SigningKey`] that can produce signatures over deploy and transaction
//! hashes. A signer whose key does not match the public key it claims is
//! rejected before anything is appended, and every signature is checked by
//! [`Deploy::set_signature`] before it becomes an approval.
//!
//! # Example
//!
//! ```rust
//! use casper_kit::{Deploy, DeployParams, ExecutableDeployItem, InMemorySigner, Signer, sign_deploy};
//!
//! # fn example() -> Result<(), casper_kit::Error> {
//! let signer = InMemorySigner::new(
//!     "010101010101010101010101010101010101010101010101010101010101010101",
//! )?;
//!
//! let deploy = Deploy::new(
//!     DeployParams::new(signer.public_key().clone(), "casper-test"),
//!     ExecutableDeployItem::new_stored_contract_by_name("faucet", "call_faucet", Default::default()),
//!     ExecutableDeployItem::standard_payment(2_500_000_000u64),
//! );
//! let deploy = sign_deploy(deploy, &signer)?;
//! assert!(deploy.validate().is_ok());
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{Error, SignerError};
use crate::types::{Approval, Deploy, Digest, PublicKey, SecretKey, Signature, Transaction, TransactionV1};

// ============================================================================
// Signer Trait
// ============================================================================

/// Trait for signing deploys and transactions.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use casper_kit::{PublicKey, SecretKey, Signer, SigningKey};
///
/// struct MyCustomSigner {
///     public_key: PublicKey,
///     secret_key: SecretKey,
/// }
///
/// impl Signer for MyCustomSigner {
///     fn public_key(&self) -> &PublicKey {
///         &self.public_key
///     }
///
///     fn key(&self) -> SigningKey {
///         SigningKey::new(self.secret_key.clone())
///     }
/// }
/// ```
pub trait Signer: Send + Sync {
    /// The public key approvals from this signer are made under.
    fn public_key(&self) -> &PublicKey;

    /// Get a key for signing.
    fn key(&self) -> SigningKey;
}

impl Signer for Arc<dyn Signer> {
    fn public_key(&self) -> &PublicKey {
        (**self).public_key()
    }

    fn key(&self) -> SigningKey {
        (**self).key()
    }
}

// ============================================================================
// SigningKey
// ============================================================================

/// A public key bundled with the ability to sign under it.
///
/// # Example
///
/// ```rust
/// use casper_kit::{Digest, InMemorySigner, Signer};
///
/// # fn example() -> Result<(), casper_kit::Error> {
/// let signer = InMemorySigner::new(
///     "010101010101010101010101010101010101010101010101010101010101010101",
/// )?;
///
/// let key = signer.key();
/// let approval = key.approve(&Digest::hash(b"deploy"));
/// assert_eq!(approval.signer(), key.public_key());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SigningKey {
    public_key: PublicKey,
    secret_key: Arc<SecretKey>,
}

impl SigningKey {
    /// Create a new signing key from a secret key.
    pub fn new(secret_key: SecretKey) -> Self {
        Self {
            public_key: secret_key.public_key(),
            secret_key: Arc::new(secret_key),
        }
    }

    /// Get the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Sign an arbitrary message.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.secret_key.sign(message)
    }

    /// Sign a deploy or transaction hash, producing an approval.
    pub fn approve(&self, hash: &Digest) -> Approval {
        Approval::new(self.public_key.clone(), self.sign(hash.as_bytes()))
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// InMemorySigner
// ============================================================================

/// A signer holding a single secret key in memory.
#[derive(Clone)]
pub struct InMemorySigner {
    public_key: PublicKey,
    secret_key: SecretKey,
}

impl InMemorySigner {
    /// Create a signer from a tagged hex secret key (`01` Ed25519, `02` Secp256k1).
    pub fn new(secret_key: impl AsRef<str>) -> Result<Self, Error> {
        let secret_key: SecretKey = secret_key.as_ref().parse()?;
        Ok(Self::from_secret_key(secret_key))
    }

    /// Create a signer from a `SecretKey`.
    pub fn from_secret_key(secret_key: SecretKey) -> Self {
        let public_key = secret_key.public_key();
        Self {
            public_key,
            secret_key,
        }
    }

    /// Create a signer from a PEM encoded secret key.
    pub fn from_pem(pem: impl AsRef<str>) -> Result<Self, SignerError> {
        Ok(Self::from_secret_key(SecretKey::from_pem(pem)?))
    }

    /// Load a PEM secret key file, as written by `casper-client keygen`.
    pub fn from_pem_file(path: impl AsRef<Path>) -> Result<Self, SignerError> {
        let path = path.as_ref();
        let pem = std::fs::read_to_string(path)
            .map_err(|e| SignerError::Io(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "loaded secret key file");
        Self::from_pem(pem)
    }

    /// Get the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

impl std::fmt::Debug for InMemorySigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySigner")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

impl Signer for InMemorySigner {
    fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    fn key(&self) -> SigningKey {
        SigningKey::new(self.secret_key.clone())
    }
}

// ============================================================================
// Signing helpers
// ============================================================================

/// The signer's key, provided it signs as the public key the signer claims.
fn matching_key(signer: &dyn Signer) -> Result<SigningKey, SignerError> {
    let key = signer.key();
    if key.public_key() != signer.public_key() {
        warn!(
            claimed = %signer.public_key(),
            actual = %key.public_key(),
            "signer key does not match its public key"
        );
        return Err(SignerError::KeyMismatch(signer.public_key().clone()));
    }
    Ok(key)
}

/// Sign a deploy with `signer`, verifying the signature before attaching it.
pub fn sign_deploy(deploy: Deploy, signer: &dyn Signer) -> Result<Deploy, Error> {
    let key = matching_key(signer)?;
    let signature = key.sign(deploy.hash().as_bytes());
    deploy.set_signature(signature, key.public_key().clone())
}

/// Sign a version 1 transaction with `signer`.
pub fn sign_transaction_v1(
    transaction: TransactionV1,
    signer: &dyn Signer,
) -> Result<TransactionV1, Error> {
    let key = matching_key(signer)?;
    let signature = key.sign(transaction.hash().as_bytes());
    transaction.set_signature(signature, key.public_key().clone())
}

/// Sign either transaction kind with `signer`.
pub fn sign_transaction(transaction: Transaction, signer: &dyn Signer) -> Result<Transaction, Error> {
    match transaction {
        Transaction::Deploy(deploy) => sign_deploy(deploy, signer).map(Transaction::Deploy),
        Transaction::V1(v1) => sign_transaction_v1(v1, signer).map(Transaction::V1),
    }
}
