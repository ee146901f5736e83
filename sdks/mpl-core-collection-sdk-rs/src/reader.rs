//! Read path: fetch and decode collection accounts over RPC.

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::error::CollectionError;
use crate::state::CollectionAccount;

/// Thin reader over a Solana RPC node for Metaplex Core collection
/// accounts. State is always re-fetched, never cached; the ledger owns it.
pub struct CollectionReader {
    rpc: RpcClient,
}

impl CollectionReader {
    pub fn new(rpc_endpoint: &str) -> Self {
        Self::with_commitment(rpc_endpoint, CommitmentConfig::confirmed())
    }

    pub fn with_commitment(rpc_endpoint: &str, commitment: CommitmentConfig) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(rpc_endpoint.to_string(), commitment),
        }
    }

    /// Fetch the collection account and decode it, plugins included.
    pub async fn fetch_collection(
        &self,
        address: &Pubkey,
    ) -> Result<CollectionAccount, CollectionError> {
        debug!(%address, "fetching collection account");
        let response = self
            .rpc
            .get_account_with_commitment(address, self.rpc.commitment())
            .await
            .map_err(|e| CollectionError::Fetch(format!("rpc error fetching {address}: {e}")))?;
        let account = response
            .value
            .ok_or_else(|| CollectionError::Fetch(format!("collection {address} not found")))?;

        let decoded = CollectionAccount::decode(*address, &account.owner, &account.data)?;
        debug!(
            name = %decoded.collection.name,
            plugins = decoded.plugins.len(),
            "decoded collection"
        );
        Ok(decoded)
    }
}
