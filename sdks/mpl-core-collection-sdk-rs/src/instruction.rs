//! UpdateV1 instruction: wire layout and builder.
//!
//! This is the one place where byte-exact framing matters. The program will
//! reject, or worse misinterpret, a malformed payload, so the encoding lives
//! here as a pure function with a decoder to round-trip against.

use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;

use crate::error::CollectionError;
use crate::state::UpdateAuthority;
use crate::MPL_CORE_PROGRAM_ID;

/// Discriminator prefix selecting the UpdateV1 handler.
pub const UPDATE_V1_DISCRIMINATOR: [u8; 8] = [0x32, 0xC2, 0x9A, 0x1E, 0x7B, 0x4F, 0x1E, 0x3A];

/// Arguments of an UpdateV1 instruction. Each field occupies an independent
/// optional slot on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateV1Args {
    pub new_name: Option<String>,
    pub new_uri: Option<String>,
    pub new_update_authority: Option<UpdateAuthority>,
}

impl UpdateV1Args {
    pub fn is_empty(&self) -> bool {
        self.new_name.is_none() && self.new_uri.is_none() && self.new_update_authority.is_none()
    }

    /// Pack into the exact byte layout the program expects: the 8-byte
    /// discriminator, then one presence byte per slot (0 absent,
    /// 1 present) followed by the slot's payload. Strings carry a u32
    /// little-endian length prefix; the authority slot nests a variant tag
    /// (0 = Address, 1 = Collection) before the 32-byte key.
    ///
    /// Fails only when a string is too long for its u32 length prefix.
    pub fn pack(&self) -> Result<Vec<u8>, CollectionError> {
        let mut data = Vec::with_capacity(8 + 3 + 34);
        data.extend_from_slice(&UPDATE_V1_DISCRIMINATOR);
        pack_string_slot(&mut data, self.new_name.as_deref())?;
        pack_string_slot(&mut data, self.new_uri.as_deref())?;
        match &self.new_update_authority {
            None => data.push(0),
            Some(authority) => {
                data.push(1);
                let (tag, key) = match authority {
                    UpdateAuthority::Address(key) => (0, key),
                    UpdateAuthority::Collection(key) => (1, key),
                };
                data.push(tag);
                data.extend_from_slice(key.as_ref());
            }
        }
        Ok(data)
    }

    /// Exact inverse of [`pack`](Self::pack). Rejects an unknown
    /// discriminator, bad presence bytes, bad variant tags, truncation, and
    /// trailing bytes.
    pub fn unpack(input: &[u8]) -> Result<Self, CollectionError> {
        let mut rest = input;
        let discriminator = take(&mut rest, 8)?;
        if discriminator != UPDATE_V1_DISCRIMINATOR {
            return Err(malformed("unknown instruction discriminator"));
        }

        let new_name = unpack_string_slot(&mut rest)?;
        let new_uri = unpack_string_slot(&mut rest)?;
        let new_update_authority = match take_byte(&mut rest)? {
            0 => None,
            1 => {
                let tag = take_byte(&mut rest)?;
                let bytes: [u8; 32] = take(&mut rest, 32)?
                    .try_into()
                    .map_err(|_| malformed("truncated authority key"))?;
                let key = Pubkey::new_from_array(bytes);
                match tag {
                    0 => Some(UpdateAuthority::Address(key)),
                    1 => Some(UpdateAuthority::Collection(key)),
                    other => {
                        return Err(malformed(&format!("invalid authority variant tag {other}")))
                    }
                }
            }
            other => return Err(malformed(&format!("invalid presence byte {other}"))),
        };

        if !rest.is_empty() {
            return Err(malformed("trailing bytes after UpdateV1 payload"));
        }

        Ok(Self {
            new_name,
            new_uri,
            new_update_authority,
        })
    }
}

/// Build an UpdateV1 instruction against the Metaplex Core program.
///
/// Accounts (strict order):
/// - collection (writable)
/// - current update authority (readonly, signer)
/// - payer (writable, signer)
///
/// An update with every slot absent is rejected client-side: the program
/// would accept it, charge the fee, and change nothing.
pub fn update_v1_ix(
    collection: &Pubkey,
    current_authority: &Pubkey,
    payer: &Pubkey,
    args: UpdateV1Args,
) -> Result<Instruction, CollectionError> {
    if args.is_empty() {
        return Err(CollectionError::Precondition(
            "UpdateV1 needs at least one field to set".into(),
        ));
    }

    Ok(Instruction {
        program_id: MPL_CORE_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*collection, false),
            AccountMeta::new_readonly(*current_authority, true),
            AccountMeta::new(*payer, true),
        ],
        data: args.pack()?,
    })
}

/// Build the full authority-transfer instruction: an UpdateV1 setting
/// `new_update_authority = Address(new_authority)`, with the new authority
/// as payer. A configured co-signer rides along as a trailing readonly
/// signer account, so the message carries its signature without disturbing
/// the accounts the program reads by position.
pub fn transfer_authority_ix(
    collection: &Pubkey,
    current_authority: &Pubkey,
    new_authority: &Pubkey,
    co_signer: Option<&Pubkey>,
) -> Result<Instruction, CollectionError> {
    let mut ix = update_v1_ix(
        collection,
        current_authority,
        new_authority,
        UpdateV1Args {
            new_update_authority: Some(UpdateAuthority::Address(*new_authority)),
            ..Default::default()
        },
    )?;
    if let Some(extra) = co_signer {
        ix.accounts.push(AccountMeta::new_readonly(*extra, true));
    }
    Ok(ix)
}

fn malformed(detail: &str) -> CollectionError {
    CollectionError::Precondition(format!("malformed UpdateV1 payload: {detail}"))
}

fn string_len_prefix(len: usize) -> Result<[u8; 4], CollectionError> {
    let len =
        u32::try_from(len).map_err(|_| malformed("string too long for its u32 length prefix"))?;
    Ok(len.to_le_bytes())
}

fn pack_string_slot(out: &mut Vec<u8>, value: Option<&str>) -> Result<(), CollectionError> {
    match value {
        None => out.push(0),
        Some(s) => {
            out.push(1);
            out.extend_from_slice(&string_len_prefix(s.len())?);
            out.extend_from_slice(s.as_bytes());
        }
    }
    Ok(())
}

fn unpack_string_slot(input: &mut &[u8]) -> Result<Option<String>, CollectionError> {
    match take_byte(input)? {
        0 => Ok(None),
        1 => {
            let len_bytes: [u8; 4] = take(input, 4)?
                .try_into()
                .map_err(|_| malformed("truncated string length"))?;
            let len = u32::from_le_bytes(len_bytes) as usize;
            let bytes = take(input, len)?;
            let value = String::from_utf8(bytes.to_vec())
                .map_err(|_| malformed("string is not valid UTF-8"))?;
            Ok(Some(value))
        }
        other => Err(malformed(&format!("invalid presence byte {other}"))),
    }
}

fn take<'a>(input: &mut &'a [u8], n: usize) -> Result<&'a [u8], CollectionError> {
    if input.len() < n {
        return Err(malformed("payload truncated"));
    }
    let (head, rest) = input.split_at(n);
    *input = rest;
    Ok(head)
}

fn take_byte(input: &mut &[u8]) -> Result<u8, CollectionError> {
    Ok(take(input, 1)?[0])
}
