//! Version 1 transactions and the `Transaction` wrapper.

use casper_kit::*;

use crate::init_tracing;

fn initiator() -> SecretKey {
    SecretKey::ed25519_from_bytes([1; 32])
}

fn validator() -> PublicKey {
    SecretKey::ed25519_from_bytes([3; 32]).public_key()
}

fn delegation() -> TransactionV1 {
    TransactionV1Builder::new(initiator().public_key(), "casper-test")
        .timestamp(Timestamp::from_millis(1_605_573_564_072))
        .ttl(TimeDiff::from_minutes(60))
        .delegate(
            initiator().public_key(),
            validator(),
            U512::from(500_000_000_000u64),
        )
        .sign_with(InMemorySigner::from_secret_key(initiator()))
        .build()
        .unwrap()
}

#[test]
fn test_v1_bytes_roundtrip() {
    init_tracing();
    let transaction = delegation();
    let bytes = transaction.to_bytes();

    assert_eq!(&bytes[..32], transaction.hash().as_bytes());
    assert_eq!(bytes.len(), transaction.size_in_bytes());

    let decoded = TransactionV1::from_bytes(&bytes).unwrap();
    assert_eq!(decoded, transaction);
    assert_eq!(decoded.to_bytes(), bytes);
}

#[test]
fn test_v1_json_roundtrip() {
    let transaction = delegation();
    let json = transaction.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["hash"], transaction.hash().to_hex());
    assert_eq!(value["header"]["chain_name"], "casper-test");
    assert_eq!(value["header"]["ttl"], "1h");
    assert_eq!(
        value["header"]["pricing_mode"]["Fixed"]["gas_price_tolerance"],
        5
    );
    assert_eq!(
        value["header"]["initiator_addr"]["PublicKey"],
        initiator().public_key().to_hex()
    );
    assert_eq!(value["body"]["target"], "Native");
    assert_eq!(value["body"]["entry_point"], "Delegate");
    assert_eq!(value["body"]["scheduling"], "Standard");

    let decoded = TransactionV1::from_json(&json).unwrap();
    assert_eq!(decoded, transaction);
}

#[test]
fn test_v1_tampered_body_rejected() {
    let transaction = delegation();
    let mut value: serde_json::Value = serde_json::from_str(&transaction.to_json().unwrap()).unwrap();
    value["body"]["entry_point"] = serde_json::json!("Undelegate");

    let err = TransactionV1::from_json(&value.to_string()).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::BodyHashMismatch { .. })
    ));
}

#[test]
fn test_v1_header_changes_hash_only() {
    let a = delegation();
    let b = TransactionV1::new(
        TransactionV1Params::new(initiator().public_key(), "casper-test")
            .timestamp(Timestamp::from_millis(1_605_573_564_073))
            .ttl(TimeDiff::from_minutes(60)),
        a.body().clone(),
    );
    assert_eq!(a.header().body_hash(), b.header().body_hash());
    assert_ne!(a.hash(), b.hash());
}

#[test]
fn test_transaction_wrapper_json() {
    let deploy = Deploy::new(
        DeployParams::new(initiator().public_key(), "casper-test"),
        ExecutableDeployItem::new_module_bytes(vec![0u8; 4], RuntimeArgs::new()),
        ExecutableDeployItem::standard_payment(1_000u64),
    )
    .sign(&initiator());
    let wrapped = Transaction::from(deploy.clone());
    let json = serde_json::to_value(&wrapped).unwrap();
    assert_eq!(json["Deploy"]["hash"], deploy.hash().to_hex());

    let wrapped = Transaction::from(delegation());
    let json = serde_json::to_value(&wrapped).unwrap();
    assert!(json["Version1"].is_object());
    let decoded: Transaction = serde_json::from_value(json).unwrap();
    assert_eq!(decoded.hash(), wrapped.hash());
    assert!(decoded.validate().is_ok());
}

#[test]
fn test_put_transaction_reply() {
    let client = NetworkConfig::TESTNET.rpc();
    let transaction = Transaction::from(delegation());
    let body: serde_json::Value =
        serde_json::from_str(&client.put_transaction(&transaction).unwrap()).unwrap();
    assert_eq!(body["params"]["transaction"]["Version1"]["hash"], transaction.hash().to_hex());

    let reply = format!(
        r#"{{"jsonrpc":"2.0","id":0,"result":{{"api_version":"2.0.0","transaction_hash":{{"Version1":"{}"}}}}}}"#,
        transaction.hash()
    );
    let result = client.parse_put_transaction(&reply).unwrap();
    assert_eq!(result.transaction_hash.digest(), transaction.hash());
}
