//! Byte-exact layout checks for the UpdateV1 payload.

use mpl_core_collection_sdk::{UpdateAuthority, UpdateV1Args, UPDATE_V1_DISCRIMINATOR};
use solana_sdk::pubkey::Pubkey;

#[test]
fn authority_only_update_matches_golden_layout() {
    let new_authority = Pubkey::new_unique();
    let data = UpdateV1Args {
        new_update_authority: Some(UpdateAuthority::Address(new_authority)),
        ..Default::default()
    }
    .pack()
    .unwrap();

    // discriminator, name absent, uri absent, authority present,
    // Address variant, then the 32-byte key
    let mut expected = Vec::from(UPDATE_V1_DISCRIMINATOR);
    expected.extend_from_slice(&[0, 0, 1, 0]);
    expected.extend_from_slice(new_authority.as_ref());
    assert_eq!(data, expected);
    assert_eq!(data.len(), 8 + 4 + 32);
}

#[test]
fn collection_variant_uses_tag_one() {
    let delegate = Pubkey::new_unique();
    let data = UpdateV1Args {
        new_update_authority: Some(UpdateAuthority::Collection(delegate)),
        ..Default::default()
    }
    .pack()
    .unwrap();
    assert_eq!(&data[8..12], &[0, 0, 1, 1]);
    assert_eq!(&data[12..], delegate.as_ref());
}

#[test]
fn string_slots_carry_length_prefixes() {
    let data = UpdateV1Args {
        new_name: Some("Renamed".into()),
        new_uri: Some("https://example.org/new.json".into()),
        new_update_authority: None,
    }
    .pack()
    .unwrap();

    let mut expected = Vec::from(UPDATE_V1_DISCRIMINATOR);
    expected.push(1);
    expected.extend_from_slice(&7u32.to_le_bytes());
    expected.extend_from_slice(b"Renamed");
    expected.push(1);
    expected.extend_from_slice(&28u32.to_le_bytes());
    expected.extend_from_slice(b"https://example.org/new.json");
    expected.push(0);
    assert_eq!(data, expected);
}

#[test]
fn pack_unpack_round_trips_every_slot_combination() {
    let key = Pubkey::new_unique();
    let names = [None, Some("Name".to_string())];
    let uris = [None, Some("https://example.org/c.json".to_string())];
    let authorities = [
        None,
        Some(UpdateAuthority::Address(key)),
        Some(UpdateAuthority::Collection(key)),
    ];

    for name in &names {
        for uri in &uris {
            for authority in &authorities {
                let args = UpdateV1Args {
                    new_name: name.clone(),
                    new_uri: uri.clone(),
                    new_update_authority: *authority,
                };
                if args.is_empty() {
                    continue;
                }
                let decoded = UpdateV1Args::unpack(&args.pack().unwrap()).unwrap();
                assert_eq!(decoded, args);
            }
        }
    }
}
