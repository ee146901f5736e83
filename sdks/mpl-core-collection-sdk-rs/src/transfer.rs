//! Write path: transfer a collection's update authority.
//!
//! One contract, one instruction: an UpdateV1 setting
//! `new_update_authority = Address(new)`, signed by the current authority
//! and fee-paid by the new one. The fee-payer split matters because the
//! current authority may be a PDA-style wallet holding no lamports.

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcSendTransactionConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use solana_sdk::transaction::Transaction;
use tracing::{debug, info};

use crate::config::TransferConfig;
use crate::error::CollectionError;
use crate::instruction::transfer_authority_ix;
use crate::signer::load_keypair;

/// Times the RPC node may re-deliver the transaction before giving up.
const MAX_SEND_RETRIES: usize = 3;

/// Outcome of a confirmed authority transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub signature: Signature,
    pub collection: Pubkey,
    pub previous_authority: Pubkey,
    pub new_authority: Pubkey,
}

/// Signers resolved from the keypair files a [`TransferConfig`] names.
pub struct TransferSigners {
    pub current_authority: Keypair,
    pub new_authority: Keypair,
    pub mint_authority: Option<Keypair>,
}

impl TransferSigners {
    /// Load every keypair file the config names. File problems all surface
    /// here, before any network traffic.
    pub fn load(config: &TransferConfig) -> Result<Self, CollectionError> {
        Ok(Self {
            current_authority: load_keypair(&config.current_authority_key_path)?,
            new_authority: load_keypair(&config.new_authority_key_path)?,
            mint_authority: config
                .mint_authority_key_path
                .as_deref()
                .map(load_keypair)
                .transpose()?,
        })
    }
}

/// Submit one UpdateV1 instruction moving the collection's update authority
/// to the new-authority keypair, and await confirmation.
///
/// Transfers are not idempotent: after a confirmed success the old
/// authority no longer matches on chain, and a re-run is rejected by the
/// program like any other unauthorized attempt.
pub async fn transfer_update_authority(
    config: &TransferConfig,
    signers: &TransferSigners,
) -> Result<TransferReceipt, CollectionError> {
    let current = signers.current_authority.pubkey();
    let new = signers.new_authority.pubkey();
    let co_signer = signers.mint_authority.as_ref().map(|k| k.pubkey());

    let ix = transfer_authority_ix(&config.collection_address, &current, &new, co_signer.as_ref())?;

    let mut signing: Vec<&Keypair> = vec![&signers.new_authority, &signers.current_authority];
    if let Some(extra) = signers.mint_authority.as_ref() {
        signing.push(extra);
    }

    let rpc = RpcClient::new_with_commitment(config.rpc_endpoint.clone(), config.commitment);
    let blockhash = rpc
        .get_latest_blockhash()
        .await
        .map_err(|e| CollectionError::Fetch(format!("rpc error fetching recent blockhash: {e}")))?;

    let mut tx = Transaction::new_with_payer(&[ix], Some(&new));
    tx.try_sign(&signing, blockhash)
        .map_err(|e| CollectionError::Precondition(format!("signing failed: {e}")))?;

    debug!(
        collection = %config.collection_address,
        %current,
        %new,
        "submitting UpdateV1"
    );
    let signature = rpc
        .send_transaction_with_config(
            &tx,
            RpcSendTransactionConfig {
                preflight_commitment: Some(config.commitment.commitment),
                max_retries: Some(MAX_SEND_RETRIES),
                ..Default::default()
            },
        )
        .await
        .map_err(CollectionError::from_send_error)?;

    rpc.confirm_transaction_with_spinner(&signature, &blockhash, config.commitment)
        .await
        .map_err(CollectionError::from_send_error)?;
    info!(%signature, "authority transfer confirmed");

    Ok(TransferReceipt {
        signature,
        collection: config.collection_address,
        previous_authority: current,
        new_authority: new,
    })
}
