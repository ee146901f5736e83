//! Error types

use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::rpc_request::{RpcError, RpcResponseErrorData};
use thiserror::Error;

/// Errors surfaced by collection operations.
///
/// Failures split into exactly three kinds: local preconditions checked
/// before any network call, read-path failures, and write-path rejections
/// that may carry program log lines.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// A local precondition failed; no network call was made.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// The collection account could not be fetched or decoded.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The network rejected the transaction.
    #[error("transaction rejected: {message}")]
    TransactionRejected {
        message: String,
        /// Program log lines, when the RPC node returned them.
        logs: Vec<String>,
    },
}

impl CollectionError {
    /// Map a client error from the submission path, pulling program logs out
    /// of a preflight simulation failure when the node returned them.
    pub(crate) fn from_send_error(err: ClientError) -> Self {
        let logs = match err.kind() {
            ClientErrorKind::RpcError(RpcError::RpcResponseError {
                data: RpcResponseErrorData::SendTransactionPreflightFailure(sim),
                ..
            }) => sim.logs.clone().unwrap_or_default(),
            _ => Vec::new(),
        };
        CollectionError::TransactionRejected {
            message: err.to_string(),
            logs,
        }
    }

    /// Program log lines attached to this error, if any.
    pub fn logs(&self) -> &[String] {
        match self {
            CollectionError::TransactionRejected { logs, .. } => logs,
            _ => &[],
        }
    }
}
