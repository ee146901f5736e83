//! On-chain account types for Metaplex Core collections.
//!
//! A collection account is a borsh-encoded [`CollectionV1`] record,
//! optionally followed by a plugin header and registry. Plugin bodies are
//! opaque to this crate; only the registry descriptors are decoded.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use crate::error::CollectionError;
use crate::MPL_CORE_PROGRAM_ID;

/// One-byte discriminant identifying what a Metaplex Core account holds.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Uninitialized,
    AssetV1,
    HashedAssetV1,
    PluginHeaderV1,
    PluginRegistryV1,
    CollectionV1,
}

/// Base record of a collection account, as stored on chain.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct CollectionV1 {
    pub key: Key,
    pub update_authority: Pubkey,
    pub name: String,
    pub uri: String,
    /// Count of assets ever minted into the collection.
    pub num_minted: u32,
    /// Count of assets currently in the collection.
    pub current_size: u32,
}

/// Who may mutate an asset or collection.
///
/// On the wire this is a one-byte variant tag (0 = Address,
/// 1 = Collection) followed by the 32-byte key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAuthority {
    /// A plain signing address.
    Address(Pubkey),
    /// Authority delegated to a collection account.
    Collection(Pubkey),
}

impl UpdateAuthority {
    pub fn key(&self) -> &Pubkey {
        match self {
            UpdateAuthority::Address(key) | UpdateAuthority::Collection(key) => key,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            UpdateAuthority::Address(_) => "Address",
            UpdateAuthority::Collection(_) => "Collection",
        }
    }
}

/// One-byte identifier for a plugin attached to an asset or collection.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginType {
    Royalties,
    FreezeDelegate,
    BurnDelegate,
    TransferDelegate,
    UpdateDelegate,
    PermanentFreezeDelegate,
    Attributes,
    PermanentTransferDelegate,
    PermanentBurnDelegate,
    Edition,
    MasterEdition,
    AddBlocker,
    ImmutableMetadata,
    VerifiedCreators,
    Autograph,
}

/// Authority attached to a plugin registry record.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginAuthority {
    None,
    Owner,
    UpdateAuthority,
    Address { address: Pubkey },
}

impl PluginAuthority {
    pub fn kind(&self) -> &'static str {
        match self {
            PluginAuthority::None => "None",
            PluginAuthority::Owner => "Owner",
            PluginAuthority::UpdateAuthority => "UpdateAuthority",
            PluginAuthority::Address { .. } => "Address",
        }
    }

    pub fn address(&self) -> Option<&Pubkey> {
        match self {
            PluginAuthority::Address { address } => Some(address),
            _ => None,
        }
    }
}

/// Header stored right after the base record when plugins are present.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct PluginHeaderV1 {
    pub key: Key,
    /// Offset of the plugin registry, measured from the start of the
    /// account data.
    pub plugin_registry_offset: u64,
}

/// One entry in the plugin registry. The plugin body itself stays opaque.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct RegistryRecord {
    pub plugin_type: PluginType,
    pub authority: PluginAuthority,
    pub offset: u64,
}

/// Fully decoded collection account: base record plus plugin descriptors.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionAccount {
    pub address: Pubkey,
    pub collection: CollectionV1,
    pub plugins: Vec<RegistryRecord>,
}

impl CollectionAccount {
    /// Decode a collection account from raw account data.
    ///
    /// `owner` must be the Metaplex Core program and the leading key byte
    /// must identify a CollectionV1 record; anything else is a fetch error
    /// naming what was found instead.
    pub fn decode(
        address: Pubkey,
        owner: &Pubkey,
        data: &[u8],
    ) -> Result<Self, CollectionError> {
        if owner != &MPL_CORE_PROGRAM_ID {
            return Err(CollectionError::Fetch(format!(
                "account {address} is owned by {owner}, not the Metaplex Core program"
            )));
        }

        let mut rest = data;
        let collection = CollectionV1::deserialize(&mut rest).map_err(|e| {
            CollectionError::Fetch(format!("malformed collection account {address}: {e}"))
        })?;
        if collection.key != Key::CollectionV1 {
            return Err(CollectionError::Fetch(format!(
                "account {address} holds a {:?} record, not CollectionV1",
                collection.key
            )));
        }

        let plugins = if rest.is_empty() {
            Vec::new()
        } else {
            decode_plugin_registry(data, data.len() - rest.len())?
        };

        Ok(Self {
            address,
            collection,
            plugins,
        })
    }

    /// The collection's update authority, with its variant kind resolved.
    /// A collection's own authority is always a plain address.
    pub fn update_authority(&self) -> UpdateAuthority {
        UpdateAuthority::Address(self.collection.update_authority)
    }
}

/// Walk the plugin header at `header_offset` to the registry and decode its
/// records. Bytes past the internal registry belong to the external plugin
/// registry and are ignored.
fn decode_plugin_registry(
    data: &[u8],
    header_offset: usize,
) -> Result<Vec<RegistryRecord>, CollectionError> {
    let malformed = |detail: String| CollectionError::Fetch(format!("malformed plugin data: {detail}"));

    let mut header_bytes = &data[header_offset..];
    let header = PluginHeaderV1::deserialize(&mut header_bytes)
        .map_err(|e| malformed(e.to_string()))?;
    if header.key != Key::PluginHeaderV1 {
        return Err(malformed(format!(
            "expected a PluginHeaderV1 record, found {:?}",
            header.key
        )));
    }

    let registry_offset = header.plugin_registry_offset as usize;
    let mut registry_bytes = data
        .get(registry_offset..)
        .ok_or_else(|| malformed(format!("registry offset {registry_offset} out of bounds")))?;

    let key = Key::deserialize(&mut registry_bytes).map_err(|e| malformed(e.to_string()))?;
    if key != Key::PluginRegistryV1 {
        return Err(malformed(format!(
            "expected a PluginRegistryV1 record, found {key:?}"
        )));
    }

    Vec::<RegistryRecord>::deserialize(&mut registry_bytes).map_err(|e| malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_collection() -> CollectionV1 {
        CollectionV1 {
            key: Key::CollectionV1,
            update_authority: Pubkey::new_unique(),
            name: "Sample Collection".into(),
            uri: "https://example.org/collection.json".into(),
            num_minted: 12,
            current_size: 10,
        }
    }

    /// Serialize a base record, filler plugin bodies, a registry, and a
    /// header pointing at the registry, in on-chain order.
    fn account_bytes_with_plugins(
        collection: &CollectionV1,
        records: &[RegistryRecord],
    ) -> Vec<u8> {
        let mut data = borsh::to_vec(collection).unwrap();
        let header_offset = data.len();

        let mut registry = borsh::to_vec(&Key::PluginRegistryV1).unwrap();
        registry.extend(borsh::to_vec(&records.to_vec()).unwrap());

        let header_len = borsh::to_vec(&PluginHeaderV1 {
            key: Key::PluginHeaderV1,
            plugin_registry_offset: 0,
        })
        .unwrap()
        .len();
        let body = vec![0xAB; 7]; // opaque plugin bodies between header and registry
        let registry_offset = header_offset + header_len + body.len();

        data.extend(
            borsh::to_vec(&PluginHeaderV1 {
                key: Key::PluginHeaderV1,
                plugin_registry_offset: registry_offset as u64,
            })
            .unwrap(),
        );
        data.extend(body);
        data.extend(registry);
        data
    }

    #[test]
    fn decode_plain_collection() {
        let collection = sample_collection();
        let data = borsh::to_vec(&collection).unwrap();
        let address = Pubkey::new_unique();

        let account = CollectionAccount::decode(address, &MPL_CORE_PROGRAM_ID, &data).unwrap();
        assert_eq!(account.collection, collection);
        assert!(account.plugins.is_empty());
        assert_eq!(
            account.update_authority(),
            UpdateAuthority::Address(collection.update_authority)
        );
        assert_eq!(account.update_authority().kind(), "Address");
    }

    #[test]
    fn decode_collection_with_plugin_registry() {
        let collection = sample_collection();
        let records = vec![
            RegistryRecord {
                plugin_type: PluginType::Royalties,
                authority: PluginAuthority::UpdateAuthority,
                offset: 100,
            },
            RegistryRecord {
                plugin_type: PluginType::PermanentFreezeDelegate,
                authority: PluginAuthority::Address {
                    address: Pubkey::new_unique(),
                },
                offset: 140,
            },
        ];
        let data = account_bytes_with_plugins(&collection, &records);

        let account =
            CollectionAccount::decode(Pubkey::new_unique(), &MPL_CORE_PROGRAM_ID, &data).unwrap();
        assert_eq!(account.plugins, records);
        assert_eq!(account.plugins[0].authority.kind(), "UpdateAuthority");
        assert_eq!(account.plugins[1].authority.kind(), "Address");
        assert!(account.plugins[1].authority.address().is_some());
    }

    #[test]
    fn wrong_owner_is_a_fetch_error() {
        let data = borsh::to_vec(&sample_collection()).unwrap();
        let err =
            CollectionAccount::decode(Pubkey::new_unique(), &Pubkey::new_unique(), &data)
                .unwrap_err();
        assert!(matches!(err, CollectionError::Fetch(_)), "{err}");
    }

    #[test]
    fn wrong_key_byte_is_a_fetch_error() {
        let mut collection = sample_collection();
        collection.key = Key::AssetV1;
        let data = borsh::to_vec(&collection).unwrap();
        let err = CollectionAccount::decode(Pubkey::new_unique(), &MPL_CORE_PROGRAM_ID, &data)
            .unwrap_err();
        match err {
            CollectionError::Fetch(detail) => assert!(detail.contains("AssetV1"), "{detail}"),
            other => panic!("expected fetch error, got {other}"),
        }
    }

    #[test]
    fn truncated_account_is_a_fetch_error() {
        let data = borsh::to_vec(&sample_collection()).unwrap();
        let err = CollectionAccount::decode(
            Pubkey::new_unique(),
            &MPL_CORE_PROGRAM_ID,
            &data[..data.len() - 3],
        )
        .unwrap_err();
        assert!(matches!(err, CollectionError::Fetch(_)), "{err}");
    }

    #[test]
    fn registry_offset_out_of_bounds_is_rejected() {
        let collection = sample_collection();
        let mut data = borsh::to_vec(&collection).unwrap();
        data.extend(
            borsh::to_vec(&PluginHeaderV1 {
                key: Key::PluginHeaderV1,
                plugin_registry_offset: u64::MAX,
            })
            .unwrap(),
        );
        let err = CollectionAccount::decode(Pubkey::new_unique(), &MPL_CORE_PROGRAM_ID, &data)
            .unwrap_err();
        assert!(matches!(err, CollectionError::Fetch(_)), "{err}");
    }
}
