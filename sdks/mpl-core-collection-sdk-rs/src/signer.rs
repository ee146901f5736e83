//! Keypair files on disk.

use std::path::Path;

use solana_sdk::signature::Keypair;

use crate::error::CollectionError;

/// Byte length of the secret-key array in a keypair file.
pub const KEYPAIR_BYTES: usize = 64;

/// Load a keypair from a JSON file holding the raw secret-key byte array
/// (the format `solana-keygen` writes).
///
/// Every failure mode is a precondition error: keypair files are checked
/// before any network call is made.
pub fn load_keypair(path: &Path) -> Result<Keypair, CollectionError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        CollectionError::Precondition(format!("keypair file {}: {e}", path.display()))
    })?;
    let bytes: Vec<u8> = serde_json::from_str(&raw).map_err(|e| {
        CollectionError::Precondition(format!(
            "keypair file {} is not a JSON byte array: {e}",
            path.display()
        ))
    })?;
    if bytes.len() != KEYPAIR_BYTES {
        return Err(CollectionError::Precondition(format!(
            "keypair file {} holds {} bytes, expected {KEYPAIR_BYTES}",
            path.display(),
            bytes.len()
        )));
    }
    Keypair::try_from(bytes.as_slice()).map_err(|e| {
        CollectionError::Precondition(format!(
            "keypair file {} holds invalid key material: {e}",
            path.display()
        ))
    })
}
