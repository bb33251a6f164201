//! Deploy encoding, hashing, size limits and tamper detection.

use casper_kit::*;

use crate::init_tracing;

const ACCOUNT_HEX: &str = "018a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c";
const RECIPIENT_HEX: &str = "018139770ea87d175f56a35466c34c7ecccb8d8a91b4ee37a25df60f5b8fc9b394";

const PAYMENT_HEX: &str = "00000000000100000006000000616d6f756e74050000000400e1f50508";
const SESSION_HEX: &str = "050300000006000000616d6f756e74050000000400f90295080600000074617267657421000000018139770ea87d175f56a35466c34c7ecccb8d8a91b4ee37a25df60f5b8fc9b39416020000006964090000000101000000000000000d05";
const HEADER_HEX: &str = "018a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5ca856a4d37501000040771b000000000001000000000000008fbf475111fa206aeb84657b5638c285e1142e80fd06d0cba3eff0f5f9fa4315000000000b0000006361737065722d74657374";
const BODY_HASH_HEX: &str = "8fbf475111fa206aeb84657b5638c285e1142e80fd06d0cba3eff0f5f9fa4315";
const DEPLOY_HASH_HEX: &str = "c474d63592fd1999033a53d44e932e4961dadf1422c38ce2dff930d8355ba063";
const SIGNATURE_HEX: &str = "01247713a9931fd18ccec53291c787d1be3fa3dd0d66c66e04dca96a3bd5ecfdd4708fac0751900f0144c958821d673171913dde29da93e276e29f151e0dbb5605";

fn sender() -> SecretKey {
    SecretKey::ed25519_from_bytes([1; 32])
}

fn recipient() -> PublicKey {
    SecretKey::ed25519_from_bytes([2; 32]).public_key()
}

fn params() -> DeployParams {
    DeployParams::new(sender().public_key(), "casper-test")
        .timestamp(Timestamp::from_millis(1_605_573_564_072))
}

/// Transfer of 2.5 CSPR to [`recipient`] with id 1, paying 0.1 CSPR.
fn transfer_deploy() -> Deploy {
    Deploy::new(
        params(),
        ExecutableDeployItem::new_transfer(
            2_500_000_000u64,
            None,
            TransferTarget::PublicKey(recipient()),
            1,
        ),
        ExecutableDeployItem::standard_payment(100_000_000u64),
    )
}

// =============================================================================
// Golden vectors
// =============================================================================

#[test]
fn test_golden_keys() {
    assert_eq!(sender().public_key().to_hex(), ACCOUNT_HEX);
    assert_eq!(recipient().to_hex(), RECIPIENT_HEX);
}

#[test]
fn test_golden_items() {
    let deploy = transfer_deploy();
    assert_eq!(hex::encode(deploy.payment().to_bytes()), PAYMENT_HEX);
    assert_eq!(hex::encode(deploy.session().to_bytes()), SESSION_HEX);
}

#[test]
fn test_golden_hashes() {
    let deploy = transfer_deploy();
    assert_eq!(hex::encode(bytesrepr::to_bytes(deploy.header())), HEADER_HEX);
    assert_eq!(deploy.header().body_hash().to_hex(), BODY_HASH_HEX);
    assert_eq!(deploy.hash().to_hex(), DEPLOY_HASH_HEX);
}

#[test]
fn test_golden_unsigned_bytes() {
    let deploy = transfer_deploy();
    let expected = format!(
        "{}{}{}{}00000000",
        HEADER_HEX, DEPLOY_HASH_HEX, PAYMENT_HEX, SESSION_HEX
    );
    assert_eq!(hex::encode(deploy.to_bytes()), expected);
    assert_eq!(deploy.size_in_bytes(), 267);
}

#[test]
fn test_golden_signed_bytes() {
    let deploy = transfer_deploy().sign(&sender());
    assert_eq!(deploy.approvals()[0].signature().to_hex(), SIGNATURE_HEX);

    let expected = format!(
        "{}{}{}{}01000000{}{}",
        HEADER_HEX, DEPLOY_HASH_HEX, PAYMENT_HEX, SESSION_HEX, ACCOUNT_HEX, SIGNATURE_HEX
    );
    let bytes = deploy.to_bytes();
    assert_eq!(hex::encode(&bytes), expected);
    assert_eq!(bytes.len(), 365);

    let decoded = Deploy::from_bytes(&bytes).unwrap();
    assert_eq!(decoded, deploy);
}

#[test]
fn test_golden_json_shape() {
    let deploy = transfer_deploy().sign(&sender());
    let json: serde_json::Value = serde_json::from_str(&deploy.to_json().unwrap()).unwrap();

    assert_eq!(json["hash"], DEPLOY_HASH_HEX);
    assert_eq!(json["header"]["account"], ACCOUNT_HEX);
    assert_eq!(json["header"]["timestamp"], "2020-11-17T00:39:24.072Z");
    assert_eq!(json["header"]["ttl"], "30m");
    assert_eq!(json["header"]["gas_price"], 1);
    assert_eq!(json["header"]["body_hash"], BODY_HASH_HEX);
    assert_eq!(json["header"]["dependencies"], serde_json::json!([]));
    assert_eq!(json["header"]["chain_name"], "casper-test");
    assert_eq!(json["approvals"][0]["signer"], ACCOUNT_HEX);
    assert_eq!(json["approvals"][0]["signature"], SIGNATURE_HEX);
    assert!(json["session"]["Transfer"]["args"].is_array());
    assert_eq!(json["payment"]["ModuleBytes"]["module_bytes"], "");
}

// =============================================================================
// Mainnet transfer with a dependency
// =============================================================================

const MAINNET_SESSION_HEX: &str = "050300000006000000616d6f756e740600000005005550b40508060000007461726765742000000001010101010101010101010101010101010101010101010101010101010101010f20000000020000006964090000000101000000000000000d05";
const MAINNET_HEADER_HEX: &str = "018a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5ca856a4d37501000040771b000000000002000000000000001bfc188cfd2ff8fd01e497f8e51da29f4702adcdc4b09d9f0842e6b24d6a45e6010000000202020202020202020202020202020202020202020202020202020202020202070000006d61696e6e6574";
const MAINNET_BODY_HASH_HEX: &str = "1bfc188cfd2ff8fd01e497f8e51da29f4702adcdc4b09d9f0842e6b24d6a45e6";
const MAINNET_HASH_HEX: &str = "44560da684ad15776e970813753a06864c346b71397869b5cab7f6aac039dff0";
const MAINNET_SIGNATURE_HEX: &str = "01d436e5b8e8a8447807daf4f40e5d20543caf85552dc3779f26b373d27db142a84a2e5827719e38e6b9ec3ae85b704a8342bdb4c3bba701dd01111c1343802205";

/// 245 CSPR to account hash 32×`0x01` on mainnet, gas price 2, one dependency.
fn mainnet_transfer_deploy() -> Deploy {
    Deploy::new(
        DeployParams::new(sender().public_key(), "mainnet")
            .timestamp(Timestamp::from_millis(1_605_573_564_072))
            .ttl(TimeDiff::from_minutes(30))
            .gas_price(2)
            .dependencies([Digest::from_bytes([2; 32])]),
        ExecutableDeployItem::new_transfer(
            24_500_000_000u64,
            None,
            TransferTarget::AccountHash(AccountHash::new([1; 32])),
            1,
        ),
        ExecutableDeployItem::standard_payment(100_000_000u64),
    )
}

#[test]
fn test_golden_mainnet_transfer() {
    init_tracing();
    let deploy = mainnet_transfer_deploy();
    assert_eq!(hex::encode(deploy.session().to_bytes()), MAINNET_SESSION_HEX);
    assert_eq!(hex::encode(bytesrepr::to_bytes(deploy.header())), MAINNET_HEADER_HEX);
    assert_eq!(deploy.header().body_hash().to_hex(), MAINNET_BODY_HASH_HEX);
    assert_eq!(deploy.hash().to_hex(), MAINNET_HASH_HEX);

    let unsigned = format!(
        "{}{}{}{}00000000",
        MAINNET_HEADER_HEX, MAINNET_HASH_HEX, PAYMENT_HEX, MAINNET_SESSION_HEX
    );
    assert_eq!(hex::encode(deploy.to_bytes()), unsigned);
    assert_eq!(deploy.size_in_bytes(), 299);

    let signed = deploy.sign(&sender());
    let expected = format!(
        "{}{}{}{}01000000{}{}",
        MAINNET_HEADER_HEX,
        MAINNET_HASH_HEX,
        PAYMENT_HEX,
        MAINNET_SESSION_HEX,
        ACCOUNT_HEX,
        MAINNET_SIGNATURE_HEX
    );
    let bytes = signed.to_bytes();
    assert_eq!(hex::encode(&bytes), expected);
    assert_eq!(bytes.len(), 397);
    assert_eq!(Deploy::from_bytes(&bytes).unwrap(), signed);
}

#[test]
fn test_mainnet_transfer_json_dependencies() {
    init_tracing();
    let deploy = mainnet_transfer_deploy().sign(&sender());
    let json: serde_json::Value = serde_json::from_str(&deploy.to_json().unwrap()).unwrap();

    assert_eq!(json["header"]["gas_price"], 2);
    assert_eq!(json["header"]["chain_name"], "mainnet");
    assert_eq!(json["header"]["dependencies"], serde_json::json!(["02".repeat(32)]));
    assert_eq!(Deploy::from_json(&json.to_string()).unwrap(), deploy);
}

// =============================================================================
// Timestamps without an RFC 3339 form
// =============================================================================

#[test]
fn test_far_future_timestamp_json_is_error() {
    init_tracing();
    let deploy = Deploy::new(
        params().timestamp(Timestamp::from_millis(300_000_000_000_000)),
        ExecutableDeployItem::new_module_bytes(vec![0u8; 4], RuntimeArgs::new()),
        ExecutableDeployItem::standard_payment(1_000u64),
    );

    // Bytes and hashing only need the millisecond count.
    assert!(Deploy::from_bytes(&deploy.to_bytes()).is_ok());
    assert!(matches!(deploy.to_json(), Err(Error::Json(_))));
    assert_eq!(deploy.header().timestamp().to_string(), "300000000000000ms");
}

// =============================================================================
// Size limit
// =============================================================================

fn deploy_with_module_bytes(len: usize) -> Deploy {
    Deploy::new(
        params(),
        ExecutableDeployItem::new_module_bytes(vec![0u8; len], RuntimeArgs::new()),
        ExecutableDeployItem::standard_payment(100_000_000u64),
    )
}

#[test]
fn test_size_limit_boundary() {
    init_tracing();
    let base = deploy_with_module_bytes(0).size_in_bytes();

    let at_limit = deploy_with_module_bytes(MAX_SERIALIZED_SIZE - base);
    assert_eq!(at_limit.size_in_bytes(), 1_048_576);
    assert!(at_limit.check_size().is_ok());
    assert!(RpcClient::new("http://localhost:7777/rpc").put_deploy(&at_limit).is_ok());

    let over_limit = deploy_with_module_bytes(MAX_SERIALIZED_SIZE - base + 1);
    assert_eq!(over_limit.size_in_bytes(), 1_048_577);
    let err = over_limit.check_size().unwrap_err();
    assert!(matches!(err, Error::DeployTooLarge(1_048_577)));
    assert!(err.to_string().contains("1048577 bytes"));

    let err = RpcClient::new("http://localhost:7777/rpc")
        .put_deploy(&over_limit)
        .unwrap_err();
    assert!(matches!(err, Error::DeployTooLarge(_)));
}

// =============================================================================
// Mutation and tampering
// =============================================================================

#[test]
fn test_with_arg_before_and_after_signing() {
    let deploy = transfer_deploy();
    let extended = deploy.with_arg("memo", "rent").unwrap();
    assert_ne!(extended.hash(), deploy.hash());
    assert_eq!(extended.session().args().len(), 4);
    assert!(extended.validate().is_ok());

    let signed = deploy.sign(&sender());
    let err = signed.with_arg("memo", "rent").unwrap_err();
    assert!(matches!(err, Error::AlreadySigned));
    assert_eq!(err.to_string(), "Can not add argument to already signed deploy.");
    assert_eq!(signed.hash().to_hex(), DEPLOY_HASH_HEX);
}

#[test]
fn test_json_tampered_body_hash() {
    let deploy = transfer_deploy().sign(&sender());
    let mut json: serde_json::Value = serde_json::from_str(&deploy.to_json().unwrap()).unwrap();
    json["header"]["body_hash"] = serde_json::Value::String(Digest::ZERO.to_hex());

    let err = Deploy::from_json(&json.to_string()).unwrap_err();
    match err {
        Error::Validation(ValidationError::BodyHashMismatch { stored, computed }) => {
            assert_eq!(stored, Digest::ZERO);
            assert_eq!(computed.to_hex(), BODY_HASH_HEX);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_json_tampered_hash() {
    let deploy = transfer_deploy().sign(&sender());
    let mut json: serde_json::Value = serde_json::from_str(&deploy.to_json().unwrap()).unwrap();
    json["hash"] = serde_json::Value::String(Digest::hash(b"other").to_hex());

    let err = Deploy::from_json(&json.to_string()).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::HashMismatch { .. })
    ));
}

#[test]
fn test_json_tampered_header_field() {
    let deploy = transfer_deploy().sign(&sender());
    let mut value: serde_json::Value = serde_json::from_str(&deploy.to_json().unwrap()).unwrap();
    value["header"]["gas_price"] = serde_json::json!(2);
    let err = Deploy::from_json(&value.to_string()).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::HashMismatch { .. })
    ));
}

#[test]
fn test_json_foreign_signature() {
    let deploy = transfer_deploy().sign(&sender());
    let mut json: serde_json::Value = serde_json::from_str(&deploy.to_json().unwrap()).unwrap();
    json["approvals"][0]["signer"] = serde_json::Value::String(RECIPIENT_HEX.to_string());

    let err = Deploy::from_json(&json.to_string()).unwrap_err();
    match err {
        Error::Validation(ValidationError::InvalidSignature { index, signer }) => {
            assert_eq!(index, 0);
            assert_eq!(signer, recipient());
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_bytes_truncated_or_padded() {
    let bytes = transfer_deploy().to_bytes();
    assert!(matches!(
        Deploy::from_bytes(&bytes[..bytes.len() - 1]),
        Err(Error::Bytes(BytesReprError::EarlyEndOfStream))
    ));

    let mut padded = bytes.clone();
    padded.push(0);
    assert!(matches!(
        Deploy::from_bytes(&padded),
        Err(Error::Bytes(BytesReprError::LeftOverBytes))
    ));
}
