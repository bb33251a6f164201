//! Signatures authorizing a deploy or transaction.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::hash::Digest;
use super::key::{PublicKey, SecretKey, Signature};
use crate::error::ValidationError;

/// A signer's public key and their signature over a deploy or transaction hash.
#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
#[serde(deny_unknown_fields)]
pub struct Approval {
    signer: PublicKey,
    signature: Signature,
}

impl Approval {
    /// Sign `hash` with `secret_key`.
    pub fn create(hash: &Digest, secret_key: &SecretKey) -> Self {
        Self {
            signer: secret_key.public_key(),
            signature: secret_key.sign(hash.as_bytes()),
        }
    }

    pub fn new(signer: PublicKey, signature: Signature) -> Self {
        Self { signer, signature }
    }

    pub fn signer(&self) -> &PublicKey {
        &self.signer
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Whether the signature verifies against `hash` under the signer's key.
    pub fn verify(&self, hash: &Digest) -> bool {
        self.signature.verify(hash.as_bytes(), &self.signer)
    }
}

/// Check every approval against `hash`, reporting the first that fails.
pub(crate) fn verify_approvals(hash: &Digest, approvals: &[Approval]) -> Result<(), ValidationError> {
    for (index, approval) in approvals.iter().enumerate() {
        if !approval.verify(hash) {
            warn!(%hash, index, signer = %approval.signer, "invalid approval");
            return Err(ValidationError::InvalidSignature {
                index,
                signer: approval.signer.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_verify() {
        let secret_key = SecretKey::ed25519_from_bytes([1; 32]);
        let hash = Digest::hash(b"deploy");
        let approval = Approval::create(&hash, &secret_key);

        assert_eq!(approval.signer(), &secret_key.public_key());
        assert!(approval.verify(&hash));
        assert!(!approval.verify(&Digest::hash(b"other")));
    }

    #[test]
    fn test_secp256k1_approval() {
        let secret_key = SecretKey::secp256k1_from_bytes([1; 32]).unwrap();
        let hash = Digest::hash(b"deploy");
        let approval = Approval::create(&hash, &secret_key);
        assert_eq!(approval.signature().as_bytes().len(), 64);
        assert!(approval.verify(&hash));
    }

    #[test]
    fn test_json_shape() {
        let secret_key = SecretKey::ed25519_from_bytes([1; 32]);
        let approval = Approval::create(&Digest::ZERO, &secret_key);
        let json = serde_json::to_value(&approval).unwrap();
        assert_eq!(
            json["signer"],
            "018a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c"
        );
        assert!(json["signature"].as_str().unwrap().starts_with("01"));
        assert_eq!(serde_json::from_value::<Approval>(json).unwrap(), approval);
    }

    #[test]
    fn test_verify_approvals_reports_index() {
        let hash = Digest::hash(b"deploy");
        let good = Approval::create(&hash, &SecretKey::ed25519_from_bytes([1; 32]));
        let bad = Approval::create(&Digest::ZERO, &SecretKey::ed25519_from_bytes([2; 32]));
        assert!(verify_approvals(&hash, &[good.clone()]).is_ok());
        assert_eq!(
            verify_approvals(&hash, &[good, bad.clone()]).unwrap_err(),
            ValidationError::InvalidSignature {
                index: 1,
                signer: bad.signer().clone(),
            }
        );
    }

    #[test]
    fn test_bytes_layout() {
        let secret_key = SecretKey::ed25519_from_bytes([1; 32]);
        let approval = Approval::create(&Digest::ZERO, &secret_key);
        let bytes = crate::types::bytesrepr::to_bytes(&approval);
        assert_eq!(bytes.len(), 33 + 65);
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[33], 1);
    }
}
