use anyhow::Context as _;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use mpl_core_collection_sdk::{
    transfer_update_authority, CollectionError, CollectionReader, TransferConfig, TransferSigners,
};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use tracing_subscriber::EnvFilter;

fn parse_pubkey(s: &str) -> anyhow::Result<Pubkey> {
    Pubkey::from_str(s).with_context(|| format!("invalid base58 address: {s}"))
}

#[derive(Parser, Debug)]
#[command(
    name = "core-collection",
    version,
    about = "Metaplex Core collection CLI",
    long_about = "Command-line interface for inspecting Metaplex Core collections and transferring their update authority.\nJSON is always printed to stdout; logs/status to stderr."
)]
struct Cli {
    /// RPC endpoint URL
    #[arg(
        default_value = "https://api.mainnet-beta.solana.com",
        env = "SOLANA_RPC",
        global = true,
        long
    )]
    rpc: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show collection metadata, authority, counters, and plugins
    #[command(
        alias = "inspect",
        alias = "info",
        about = "Show collection metadata, authority, counters, and plugins"
    )]
    Show {
        /// Collection address (base58)
        #[arg(long)]
        collection: String,
    },

    /// Transfer the collection's update authority
    #[command(
        alias = "transfer",
        about = "Transfer update authority; the new authority signs as fee payer"
    )]
    TransferAuthority {
        /// Collection address (base58)
        #[arg(long)]
        collection: String,

        /// Keypair file of the current update authority (authorizes, pays nothing)
        #[arg(long)]
        current_authority_keypair: PathBuf,

        /// Keypair file of the new update authority (signs and pays the fee)
        #[arg(long)]
        new_authority_keypair: PathBuf,

        /// Optional co-signer keypair file for collections that require one
        #[arg(long)]
        mint_authority_keypair: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let args = Cli::parse();

    match args.command {
        Commands::Show { collection } => {
            let address = parse_pubkey(&collection)?;
            let reader = CollectionReader::new(&args.rpc);

            // Diagnostic read: report errors without a failure exit status.
            match reader.fetch_collection(&address).await {
                Ok(account) => {
                    let authority = account.update_authority();
                    eprintln!(
                        "show: {} minted={} size={} plugins={}",
                        account.collection.name,
                        account.collection.num_minted,
                        account.collection.current_size,
                        account.plugins.len()
                    );
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&serde_json::json!({
                            "address": account.address.to_string(),
                            "name": account.collection.name,
                            "uri": account.collection.uri,
                            "update_authority": {
                                "kind": authority.kind(),
                                "address": authority.key().to_string(),
                            },
                            "num_minted": account.collection.num_minted,
                            "current_size": account.collection.current_size,
                            "plugins": account
                                .plugins
                                .iter()
                                .map(|p| serde_json::json!({
                                    "plugin_type": format!("{:?}", p.plugin_type),
                                    "authority": {
                                        "kind": p.authority.kind(),
                                        "address": p.authority.address().map(|a| a.to_string()),
                                    },
                                    "offset": p.offset,
                                }))
                                .collect::<Vec<_>>(),
                        }))?
                    );
                }
                Err(err) => {
                    eprintln!("show: {err}");
                }
            }
        }

        Commands::TransferAuthority {
            collection,
            current_authority_keypair,
            new_authority_keypair,
            mint_authority_keypair,
        } => {
            let config = TransferConfig {
                collection_address: parse_pubkey(&collection)?,
                rpc_endpoint: args.rpc.clone(),
                current_authority_key_path: current_authority_keypair,
                new_authority_key_path: new_authority_keypair,
                mint_authority_key_path: mint_authority_keypair,
                commitment: CommitmentConfig::confirmed(),
            };

            let signers = TransferSigners::load(&config)?;
            use solana_sdk::signer::Signer as _;
            eprintln!("transfer-authority: collection={}", config.collection_address);
            eprintln!(
                "transfer-authority: current authority={}",
                signers.current_authority.pubkey()
            );
            eprintln!(
                "transfer-authority: new authority (fee payer)={}",
                signers.new_authority.pubkey()
            );
            if let Some(extra) = signers.mint_authority.as_ref() {
                eprintln!("transfer-authority: co-signer={}", extra.pubkey());
            }

            match transfer_update_authority(&config, &signers).await {
                Ok(receipt) => {
                    eprintln!(
                        "transfer-authority: confirmed signature={}",
                        receipt.signature
                    );
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&serde_json::json!({
                            "signature": receipt.signature.to_string(),
                            "collection": receipt.collection.to_string(),
                            "previous_authority": receipt.previous_authority.to_string(),
                            "new_authority": receipt.new_authority.to_string(),
                            "explorer": format!(
                                "https://solscan.io/tx/{}",
                                receipt.signature
                            ),
                        }))?
                    );
                }
                Err(err) => {
                    eprintln!("transfer-authority: {err}");
                    if let CollectionError::TransactionRejected { logs, .. } = &err {
                        if !logs.is_empty() {
                            eprintln!("program logs:");
                            for line in logs {
                                eprintln!("  {line}");
                            }
                        }
                    }
                    return Err(err.into());
                }
            }
        }
    }

    Ok(())
}
