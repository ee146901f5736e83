//! Operation configuration.

use std::path::PathBuf;

use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;

/// Everything an authority transfer needs, passed explicitly. Nothing in
/// this crate reads configuration from globals or hardcoded constants.
#[derive(Debug, Clone)]
pub struct TransferConfig {
    pub collection_address: Pubkey,
    pub rpc_endpoint: String,
    /// Keypair file of the on-chain update authority. It authorizes the
    /// transfer and pays nothing.
    pub current_authority_key_path: PathBuf,
    /// Keypair file of the authority being installed. It signs as fee payer.
    pub new_authority_key_path: PathBuf,
    /// Optional extra co-signer some collection setups require.
    pub mint_authority_key_path: Option<PathBuf>,
    pub commitment: CommitmentConfig,
}

impl TransferConfig {
    pub fn new(
        collection_address: Pubkey,
        rpc_endpoint: impl Into<String>,
        current_authority_key_path: impl Into<PathBuf>,
        new_authority_key_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            collection_address,
            rpc_endpoint: rpc_endpoint.into(),
            current_authority_key_path: current_authority_key_path.into(),
            new_authority_key_path: new_authority_key_path.into(),
            mint_authority_key_path: None,
            commitment: CommitmentConfig::confirmed(),
        }
    }
}
