//! Payment and session code of a deploy.

use borsh::{BorshDeserialize, BorshSerialize};
use primitive_types::U512;
use serde::{Deserialize, Serialize};
use serde_with::hex::Hex;
use serde_with::serde_as;

use super::bytesrepr;
use super::cl_value::CLValue;
use super::global_key::AccountHash;
use super::key::PublicKey;
use super::runtime_args::RuntimeArgs;
use super::uref::URef;

/// Entry point invoked for module bytes and native transfers.
pub const DEFAULT_ENTRY_POINT_NAME: &str = "call";

pub const ARG_AMOUNT: &str = "amount";
pub const TRANSFER_ARG_SOURCE: &str = "source";
pub const TRANSFER_ARG_TARGET: &str = "target";
pub const TRANSFER_ARG_ID: &str = "id";

/// The recipient of a native transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransferTarget {
    PublicKey(PublicKey),
    AccountHash(AccountHash),
    URef(URef),
}

impl From<TransferTarget> for CLValue {
    fn from(target: TransferTarget) -> Self {
        match target {
            TransferTarget::PublicKey(public_key) => CLValue::from(public_key),
            TransferTarget::AccountHash(account_hash) => CLValue::from(account_hash),
            TransferTarget::URef(uref) => CLValue::from(uref),
        }
    }
}

impl From<PublicKey> for TransferTarget {
    fn from(public_key: PublicKey) -> Self {
        TransferTarget::PublicKey(public_key)
    }
}

impl From<AccountHash> for TransferTarget {
    fn from(account_hash: AccountHash) -> Self {
        TransferTarget::AccountHash(account_hash)
    }
}

impl From<URef> for TransferTarget {
    fn from(uref: URef) -> Self {
        TransferTarget::URef(uref)
    }
}

/// Executable payload of a deploy. The variant order is the wire tag.
///
/// The JSON form is externally tagged, e.g.
/// `{"ModuleBytes": {"module_bytes": "<hex>", "args": [...]}}`.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
#[serde(deny_unknown_fields)]
pub enum ExecutableDeployItem {
    /// Raw Wasm with a `call` export.
    ModuleBytes {
        #[serde_as(as = "Hex")]
        module_bytes: Vec<u8>,
        args: RuntimeArgs,
    },
    /// Stored contract referenced by hash.
    StoredContractByHash {
        #[serde_as(as = "Hex")]
        hash: [u8; 32],
        entry_point: String,
        args: RuntimeArgs,
    },
    /// Stored contract referenced by a named key of the caller.
    StoredContractByName {
        name: String,
        entry_point: String,
        args: RuntimeArgs,
    },
    /// Stored contract package referenced by hash; `None` calls the latest version.
    StoredVersionedContractByHash {
        #[serde_as(as = "Hex")]
        hash: [u8; 32],
        version: Option<u32>,
        entry_point: String,
        args: RuntimeArgs,
    },
    /// Stored contract package referenced by a named key of the caller.
    StoredVersionedContractByName {
        name: String,
        version: Option<u32>,
        entry_point: String,
        args: RuntimeArgs,
    },
    /// Native transfer.
    Transfer { args: RuntimeArgs },
}

impl ExecutableDeployItem {
    pub const MODULE_BYTES_TAG: u8 = 0;
    pub const STORED_CONTRACT_BY_HASH_TAG: u8 = 1;
    pub const STORED_CONTRACT_BY_NAME_TAG: u8 = 2;
    pub const STORED_VERSIONED_CONTRACT_BY_HASH_TAG: u8 = 3;
    pub const STORED_VERSIONED_CONTRACT_BY_NAME_TAG: u8 = 4;
    pub const TRANSFER_TAG: u8 = 5;

    pub fn new_module_bytes(module_bytes: impl Into<Vec<u8>>, args: RuntimeArgs) -> Self {
        ExecutableDeployItem::ModuleBytes {
            module_bytes: module_bytes.into(),
            args,
        }
    }

    /// Empty module bytes with a single `amount` argument, which nodes run as
    /// the built-in payment logic.
    pub fn standard_payment(amount: impl Into<U512>) -> Self {
        let mut args = RuntimeArgs::new();
        args.insert(ARG_AMOUNT, amount.into());
        ExecutableDeployItem::ModuleBytes {
            module_bytes: Vec::new(),
            args,
        }
    }

    pub fn new_stored_contract_by_hash(
        hash: [u8; 32],
        entry_point: impl Into<String>,
        args: RuntimeArgs,
    ) -> Self {
        ExecutableDeployItem::StoredContractByHash {
            hash,
            entry_point: entry_point.into(),
            args,
        }
    }

    pub fn new_stored_contract_by_name(
        name: impl Into<String>,
        entry_point: impl Into<String>,
        args: RuntimeArgs,
    ) -> Self {
        ExecutableDeployItem::StoredContractByName {
            name: name.into(),
            entry_point: entry_point.into(),
            args,
        }
    }

    pub fn new_stored_versioned_contract_by_hash(
        hash: [u8; 32],
        version: Option<u32>,
        entry_point: impl Into<String>,
        args: RuntimeArgs,
    ) -> Self {
        ExecutableDeployItem::StoredVersionedContractByHash {
            hash,
            version,
            entry_point: entry_point.into(),
            args,
        }
    }

    pub fn new_stored_versioned_contract_by_name(
        name: impl Into<String>,
        version: Option<u32>,
        entry_point: impl Into<String>,
        args: RuntimeArgs,
    ) -> Self {
        ExecutableDeployItem::StoredVersionedContractByName {
            name: name.into(),
            version,
            entry_point: entry_point.into(),
            args,
        }
    }

    /// Native transfer session code.
    ///
    /// Arguments are inserted as `amount`, `source` (when given), `target`
    /// and `id`. The transfer id is required by the network and is sent as
    /// `Option<u64>`.
    pub fn new_transfer(
        amount: impl Into<U512>,
        source: Option<URef>,
        target: TransferTarget,
        transfer_id: u64,
    ) -> Self {
        let mut args = RuntimeArgs::new();
        args.insert(ARG_AMOUNT, amount.into());
        if let Some(source) = source {
            args.insert(TRANSFER_ARG_SOURCE, source);
        }
        args.insert_cl_value(TRANSFER_ARG_TARGET, target.into());
        args.insert(TRANSFER_ARG_ID, Some(transfer_id));
        ExecutableDeployItem::Transfer { args }
    }

    /// The wire tag of this item.
    pub fn tag(&self) -> u8 {
        match self {
            ExecutableDeployItem::ModuleBytes { .. } => Self::MODULE_BYTES_TAG,
            ExecutableDeployItem::StoredContractByHash { .. } => Self::STORED_CONTRACT_BY_HASH_TAG,
            ExecutableDeployItem::StoredContractByName { .. } => Self::STORED_CONTRACT_BY_NAME_TAG,
            ExecutableDeployItem::StoredVersionedContractByHash { .. } => {
                Self::STORED_VERSIONED_CONTRACT_BY_HASH_TAG
            }
            ExecutableDeployItem::StoredVersionedContractByName { .. } => {
                Self::STORED_VERSIONED_CONTRACT_BY_NAME_TAG
            }
            ExecutableDeployItem::Transfer { .. } => Self::TRANSFER_TAG,
        }
    }

    pub fn args(&self) -> &RuntimeArgs {
        match self {
            ExecutableDeployItem::ModuleBytes { args, .. }
            | ExecutableDeployItem::StoredContractByHash { args, .. }
            | ExecutableDeployItem::StoredContractByName { args, .. }
            | ExecutableDeployItem::StoredVersionedContractByHash { args, .. }
            | ExecutableDeployItem::StoredVersionedContractByName { args, .. }
            | ExecutableDeployItem::Transfer { args } => args,
        }
    }

    pub(crate) fn args_mut(&mut self) -> &mut RuntimeArgs {
        match self {
            ExecutableDeployItem::ModuleBytes { args, .. }
            | ExecutableDeployItem::StoredContractByHash { args, .. }
            | ExecutableDeployItem::StoredContractByName { args, .. }
            | ExecutableDeployItem::StoredVersionedContractByHash { args, .. }
            | ExecutableDeployItem::StoredVersionedContractByName { args, .. }
            | ExecutableDeployItem::Transfer { args } => args,
        }
    }

    /// Entry point name; `call` for module bytes and transfers.
    pub fn entry_point_name(&self) -> &str {
        match self {
            ExecutableDeployItem::ModuleBytes { .. } | ExecutableDeployItem::Transfer { .. } => {
                DEFAULT_ENTRY_POINT_NAME
            }
            ExecutableDeployItem::StoredContractByHash { entry_point, .. }
            | ExecutableDeployItem::StoredContractByName { entry_point, .. }
            | ExecutableDeployItem::StoredVersionedContractByHash { entry_point, .. }
            | ExecutableDeployItem::StoredVersionedContractByName { entry_point, .. } => {
                entry_point
            }
        }
    }

    pub fn is_transfer(&self) -> bool {
        matches!(self, ExecutableDeployItem::Transfer { .. })
    }

    pub fn is_module_bytes(&self) -> bool {
        matches!(self, ExecutableDeployItem::ModuleBytes { .. })
    }

    /// Module bytes with no code: the built-in payment.
    pub fn is_standard_payment(&self) -> bool {
        matches!(self, ExecutableDeployItem::ModuleBytes { module_bytes, .. } if module_bytes.is_empty())
    }

    /// The `amount` argument, if present and a `U512`.
    pub fn payment_amount(&self) -> Option<U512> {
        self.args().get(ARG_AMOUNT).and_then(CLValue::as_u512)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        bytesrepr::to_bytes(self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::cl_type::CLType;

    #[test]
    fn test_standard_payment_bytes() {
        let payment = ExecutableDeployItem::standard_payment(U512::from(24_500_000_000u64));
        assert!(payment.is_standard_payment());
        assert_eq!(
            hex::encode(payment.to_bytes()),
            "00000000000100000006000000616d6f756e740600000005005550b40508"
        );
        assert_eq!(payment.payment_amount(), Some(U512::from(24_500_000_000u64)));
    }

    #[test]
    fn test_transfer_arg_order_and_types() {
        let transfer = ExecutableDeployItem::new_transfer(
            10u64,
            None,
            TransferTarget::AccountHash(AccountHash::new([1; 32])),
            42,
        );
        assert!(transfer.is_transfer());
        assert_eq!(transfer.tag(), 5);
        let args = transfer.args();
        assert_eq!(args.names().collect::<Vec<_>>(), vec!["amount", "target", "id"]);
        assert_eq!(args.get("target").unwrap().cl_type(), CLType::ByteArray(32));
        assert_eq!(args.get("id").unwrap(), &CLValue::from(Some(42u64)));
        assert_eq!(transfer.entry_point_name(), "call");
    }

    #[test]
    fn test_transfer_with_source() {
        let source = URef::new([3; 32], crate::types::uref::AccessRights::READ_ADD_WRITE);
        let transfer = ExecutableDeployItem::new_transfer(
            1u64,
            Some(source),
            TransferTarget::URef(source),
            0,
        );
        assert_eq!(
            transfer.args().names().collect::<Vec<_>>(),
            vec!["amount", "source", "target", "id"]
        );
    }

    #[test]
    fn test_bytes_roundtrip_every_variant() {
        let args = crate::runtime_args! { "x" => 1u32 };
        let items = [
            ExecutableDeployItem::new_module_bytes(vec![0, 97, 115, 109], args.clone()),
            ExecutableDeployItem::new_stored_contract_by_hash([7; 32], "transfer", args.clone()),
            ExecutableDeployItem::new_stored_contract_by_name("erc20", "mint", args.clone()),
            ExecutableDeployItem::new_stored_versioned_contract_by_hash(
                [8; 32],
                Some(2),
                "run",
                args.clone(),
            ),
            ExecutableDeployItem::new_stored_versioned_contract_by_name(
                "pkg",
                None,
                "run",
                args.clone(),
            ),
            ExecutableDeployItem::Transfer { args },
        ];
        for (tag, item) in items.iter().enumerate() {
            let bytes = item.to_bytes();
            assert_eq!(bytes[0] as usize, tag);
            assert_eq!(item.tag() as usize, tag);
            assert_eq!(
                &bytesrepr::from_bytes_exact::<ExecutableDeployItem>(&bytes).unwrap(),
                item
            );
        }
    }

    #[test]
    fn test_versioned_by_hash_layout() {
        let item = ExecutableDeployItem::new_stored_versioned_contract_by_hash(
            [0xaa; 32],
            Some(1),
            "go",
            RuntimeArgs::new(),
        );
        let bytes = item.to_bytes();
        assert_eq!(bytes[0], 3);
        assert_eq!(&bytes[1..33], &[0xaa; 32]);
        assert_eq!(&bytes[33..38], &[1, 1, 0, 0, 0]);
        assert_eq!(&bytes[38..44], &[2, 0, 0, 0, b'g', b'o']);
        assert_eq!(&bytes[44..], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(
            bytesrepr::from_bytes_exact::<ExecutableDeployItem>(&[6, 0, 0, 0, 0]).unwrap_err(),
            bytesrepr::Error::UnknownValue(6)
        );
    }

    #[test]
    fn test_json_shape() {
        let item = ExecutableDeployItem::new_stored_contract_by_name(
            "faucet",
            "call_faucet",
            RuntimeArgs::new(),
        );
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"StoredContractByName": {"name": "faucet", "entry_point": "call_faucet", "args": []}})
        );

        let module = ExecutableDeployItem::new_module_bytes(vec![0xde, 0xad], RuntimeArgs::new());
        let json = serde_json::to_value(&module).unwrap();
        assert_eq!(json, json!({"ModuleBytes": {"module_bytes": "dead", "args": []}}));
        assert_eq!(serde_json::from_value::<ExecutableDeployItem>(json).unwrap(), module);
    }
}
