//! Metaplex Core collection tools – Rust SDK (client-side helpers)
//!
//! This crate provides:
//! - Borsh decoding of collection accounts, plugin registry included
//! - The UpdateV1 instruction's exact byte layout (encode and decode)
//! - A reader for fetching collection state over RPC
//! - A one-shot authority-transfer operation with typed errors
//!
//! Signer key material comes from JSON keypair files on disk. Submission
//! happens at `confirmed` commitment with bounded delivery retries; the new
//! authority pays the fee so the current authority never needs lamports.

pub mod config;
pub mod error;
pub mod instruction;
pub mod reader;
pub mod signer;
pub mod state;
pub mod transfer;

use solana_sdk::pubkey::Pubkey;

/// The deployed Metaplex Core program.
pub const MPL_CORE_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("CoREENxT6tW1HoK8ypY1SxRMZTcVPm7R94rH4PZNhX7d");

pub use config::TransferConfig;
pub use error::CollectionError;
pub use instruction::{
    transfer_authority_ix, update_v1_ix, UpdateV1Args, UPDATE_V1_DISCRIMINATOR,
};
pub use reader::CollectionReader;
pub use signer::load_keypair;
pub use state::{
    CollectionAccount, CollectionV1, Key, PluginAuthority, PluginType, RegistryRecord,
    UpdateAuthority,
};
pub use transfer::{transfer_update_authority, TransferReceipt, TransferSigners};
