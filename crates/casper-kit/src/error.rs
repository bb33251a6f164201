//! Error types for casper-kit.
//!
//! This module provides the error types for all casper-kit operations.
//!
//! # Error Hierarchy
//!
//! - [`Error`](enum@Error) — Main error type, returned by most operations
//!   - [`BytesReprError`] — Malformed or truncated binary input
//!   - [`ParseKeyError`] — Invalid public key, secret key or signature text
//!   - [`ParseHashError`] — Invalid hex digest
//!   - [`KeyFromStrError`] — Invalid formatted-string global state key
//!   - [`CLValueError`] — Ill-typed CLValue construction or JSON
//!   - [`SignerError`] — Signing and key loading failures
//!   - [`TimeError`] — Invalid TTL or timestamp text
//!   - [`ValidationError`] — A deploy or transaction failed its integrity checks
//!   - [`RpcError`] — Error object returned by a node
//!
//! Binary decoding never panics: every parse boundary returns a
//! [`BytesReprError`] so untrusted bytes can be fed to it directly.
//!
//! # Example
//!
//! ```rust
//! use casper_kit::{Deploy, Error, ValidationError};
//!
//! fn check(json: &str) {
//!     match Deploy::from_json(json) {
//!         Ok(deploy) => println!("valid deploy {}", deploy.hash()),
//!         Err(Error::Validation(ValidationError::InvalidSignature { index, .. })) => {
//!             println!("approval #{} does not verify", index);
//!         }
//!         Err(Error::Validation(err)) => println!("hash mismatch: {}", err),
//!         Err(err) => println!("malformed deploy: {}", err),
//!     }
//! }
//! ```

use thiserror::Error;

use crate::types::{CLType, Digest, PublicKey};

/// Error decoding the binary representation of a wire type.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum BytesReprError {
    #[error("Early end of stream while deserializing")]
    EarlyEndOfStream,

    #[error("Formatting error while deserializing")]
    Formatting,

    #[error("Not all input bytes were consumed")]
    LeftOverBytes,

    #[error("Unknown tag value: {0}")]
    UnknownValue(u8),

    #[error("Value is not representable in the target width")]
    NotRepresentable,

    #[error("Exceeded recursion depth while deserializing a CLType")]
    ExceededRecursionDepth,
}

/// Error parsing a public key, secret key or signature.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseKeyError {
    #[error("Invalid key format: expected a hex string prefixed with an algorithm tag")]
    InvalidFormat,

    #[error("Unknown key algorithm: '{0}'")]
    UnknownAlgorithm(String),

    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),

    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid curve point: key bytes do not represent a valid point on the curve")]
    InvalidCurvePoint,
}

/// Error parsing a digest.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseHashError {
    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),

    #[error("Invalid hash length: expected 32 bytes, got {0}")]
    InvalidLength(usize),
}

/// Error parsing a global state key from its formatted string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyFromStrError {
    #[error("Unknown key prefix in '{0}'")]
    UnknownPrefix(String),

    #[error("Invalid hex in '{0}'")]
    InvalidHex(String),

    #[error("Invalid payload length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid access rights in '{0}'")]
    InvalidAccessRights(String),

    #[error("Invalid era id in '{0}'")]
    InvalidEraId(String),

    #[error("Invalid bid address: {0}")]
    InvalidBidAddr(BytesReprError),
}

/// Error building or parsing a CLValue.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CLValueError {
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: CLType, found: CLType },

    #[error("Invalid CLValue bytes: {0}")]
    Bytes(#[from] BytesReprError),

    #[error("Invalid number '{0}' for {1}")]
    InvalidNumber(String, CLType),
}

/// Error during signing operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignerError {
    #[error("Invalid PEM: {0}")]
    InvalidPem(String),

    #[error("Invalid secret key: {0}")]
    InvalidSecretKey(String),

    #[error("Public key {0} does not match the signature")]
    KeyMismatch(PublicKey),

    #[error("IO error: {0}")]
    Io(String),
}

/// Error parsing a TTL or timestamp.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimeError {
    #[error("Invalid TTL '{0}': {1}")]
    InvalidTtl(String, String),

    #[error("Invalid timestamp '{0}': {1}")]
    InvalidTimestamp(String, String),

    #[error("Duration overflows a u64 millisecond count")]
    Overflow,

    #[error("Timestamp {0} ms is past the year 9999 and has no RFC 3339 form")]
    OutOfRange(u64),
}

/// A deploy or transaction does not match its own hashes or approvals.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid body hash: stored {stored}, computed {computed}")]
    BodyHashMismatch { stored: Digest, computed: Digest },

    #[error("Invalid hash: stored {stored}, computed {computed}")]
    HashMismatch { stored: Digest, computed: Digest },

    #[error("Invalid approval at index {index}: signature by {signer} does not verify")]
    InvalidSignature { index: usize, signer: PublicKey },
}

impl ValidationError {
    /// Returns true if the body hash or the top-level hash did not match.
    pub fn is_hash_mismatch(&self) -> bool {
        matches!(
            self,
            ValidationError::BodyHashMismatch { .. } | ValidationError::HashMismatch { .. }
        )
    }

    /// Returns true if an approval signature failed to verify.
    pub fn is_signature_invalid(&self) -> bool {
        matches!(self, ValidationError::InvalidSignature { .. })
    }
}

// ============================================================================
// RPC Errors
// ============================================================================

/// Error object returned by a node's JSON-RPC endpoint.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("RPC error: {message} (code: {code})")]
    Rpc {
        code: i64,
        message: String,
        data: Option<serde_json::Value>,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RpcError {
    /// Returns true if the node rejected the payload as invalid.
    pub fn is_invalid_params(&self) -> bool {
        matches!(self, RpcError::Rpc { code: -32602, .. })
    }
}

// ============================================================================
// Main Error Type
// ============================================================================

/// Main error type for casper-kit operations.
#[derive(Debug, Error)]
pub enum Error {
    // ─── Parsing ───
    #[error(transparent)]
    Bytes(#[from] BytesReprError),

    #[error(transparent)]
    ParseKey(#[from] ParseKeyError),

    #[error(transparent)]
    ParseHash(#[from] ParseHashError),

    #[error(transparent)]
    KeyFromStr(#[from] KeyFromStrError),

    #[error(transparent)]
    CLValue(#[from] CLValueError),

    #[error(transparent)]
    Time(#[from] TimeError),

    // ─── Deploy / Transaction ───
    #[error("Can not add argument to already signed deploy.")]
    AlreadySigned,

    #[error(
        "Deploy can not be send, because it's too large: {0} bytes. Max size is 1 megabyte."
    )]
    DeployTooLarge(usize),

    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    // ─── Signing ───
    #[error("Signing failed: {0}")]
    Signing(#[from] SignerError),

    // ─── RPC ───
    #[error(transparent)]
    Rpc(#[from] RpcError),

    // ─── Serialization ───
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
