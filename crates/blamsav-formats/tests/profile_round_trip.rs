#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for saving and loading profile records on disk
//!
//! Each test works on a record file in a temporary directory and checks
//! both the decoded model and the raw bytes the engine would see.

use blamsav_crypto::ProfileChecksum;
use blamsav_formats::profile::layout::{SCALAR_FIELDS, spec};
use blamsav_formats::profile::{
    Action, Button, CHECKSUM_OFFSET, ChecksumPolicy, CodecOptions, Colour, Connection, Field,
    ProfileCodec, ProfileError, ProfileRecord, RECORD_LEN, UNBOUND,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn spartan() -> ProfileRecord {
    let mut record = ProfileRecord::new();
    record.details.name = "Spartan".to_string();
    record.details.colour = Colour::Red;
    record.video.resolution.width = 1920;
    record.video.resolution.height = 1080;
    record.network.port.server = 2302;
    record
}

/// Record file filled with `fill`, as an older tool might have left it
fn seeded_file(dir: &TempDir, fill: u8) -> PathBuf {
    let path = dir.path().join("blam.sav");
    fs::write(&path, vec![fill; RECORD_LEN]).unwrap();
    path
}

// --- Round trip ---

#[test]
fn save_then_load_returns_same_record() {
    let dir = TempDir::new().unwrap();
    let path = seeded_file(&dir, 0);

    let mut record = spartan();
    record.mouse.invert_vertical_axis = true;
    record.audio.volume.music = 0;
    record.audio.eax = true;
    record.video.effects.decals = false;
    record.network.connection = Connection::DialUp;
    record.input.bind(Action::Jump, Button::A);
    record.input.bind(Action::Reload, Button::X);
    record.input.bind(Action::LookLeft, Button::RSL);
    record.input.bind(Action::Flashlight, Button::DPU);

    record.save(&path).unwrap();
    let loaded = ProfileRecord::load(&path).unwrap();

    assert_eq!(loaded, record);
}

#[test]
fn spartan_identity_video_and_network_survive() {
    let dir = TempDir::new().unwrap();
    let path = seeded_file(&dir, 0);
    let record = spartan();

    let checksum = record.save(&path).unwrap();
    let loaded = ProfileRecord::load(&path).unwrap();
    assert_eq!(loaded.details, record.details);
    assert_eq!(loaded.video, record.video);
    assert_eq!(loaded.network, record.network);

    let mut renamed = record.clone();
    renamed.details.name = "Spartanx".to_string();
    let renamed_checksum = renamed.save(&path).unwrap();
    assert_ne!(checksum, renamed_checksum);
}

#[test]
fn created_record_loads_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fresh.sav");

    ProfileCodec::default()
        .create(&ProfileRecord::new(), &path)
        .unwrap();
    assert_eq!(fs::metadata(&path).unwrap().len(), RECORD_LEN as u64);
    assert_eq!(ProfileRecord::load(&path).unwrap(), ProfileRecord::new());
}

// --- On-disk shape ---

#[test]
fn saved_file_is_signed_and_fixed_length() {
    let dir = TempDir::new().unwrap();
    let path = seeded_file(&dir, 0x5A);

    let checksum = spartan().save(&path).unwrap();
    let bytes = fs::read(&path).unwrap();

    assert_eq!(bytes.len(), RECORD_LEN);
    assert_eq!(checksum, ProfileChecksum::compute(&bytes[..CHECKSUM_OFFSET]));
    assert_eq!(&bytes[CHECKSUM_OFFSET..], checksum.as_bytes());

    let report = ProfileCodec::default().verify(&path).unwrap();
    assert!(report.is_valid());
    assert_eq!(report.stored, checksum);
}

#[test]
fn unmodelled_bytes_are_preserved() {
    let dir = TempDir::new().unwrap();
    let path = seeded_file(&dir, 0x5A);
    let before = fs::read(&path).unwrap();

    let mut record = spartan();
    record.input.bind(Action::Crouch, Button::LB);
    record.save(&path).unwrap();
    let after = fs::read(&path).unwrap();

    let mut touched = vec![false; RECORD_LEN];
    touched[0x02..0x02 + 22].fill(true);
    for entry in SCALAR_FIELDS {
        touched[entry.stored_range()].fill(true);
    }
    for button in Button::ALL {
        touched[usize::from(button.offset())] = true;
    }
    touched[CHECKSUM_OFFSET..].fill(true);

    for (offset, (old, new)) in before.iter().zip(&after).enumerate() {
        if !touched[offset] {
            assert_eq!(old, new, "byte {offset:#06x} changed");
        }
    }
}

#[test]
fn short_file_is_zero_extended_on_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blam.sav");
    fs::write(&path, [0xAB; 0x100]).unwrap();

    spartan().save(&path).unwrap();
    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes.len(), RECORD_LEN);
    assert_eq!(bytes[0x0000], 0xAB);
    assert_eq!(bytes[0x0FFF], 0x00);
}

// --- Input mapping ---

#[test]
fn empty_mapping_clears_every_slot() {
    let dir = TempDir::new().unwrap();
    let path = seeded_file(&dir, 0);

    let mut bound = ProfileRecord::new();
    for (action, button) in Action::ALL.into_iter().zip(Button::ALL) {
        bound.input.bind(action, button);
    }
    bound.save(&path).unwrap();

    ProfileRecord::new().save(&path).unwrap();
    let bytes = fs::read(&path).unwrap();
    for button in Button::ALL {
        assert_eq!(bytes[usize::from(button.offset())], UNBOUND, "{button}");
    }
    assert!(ProfileRecord::load(&path).unwrap().input.is_empty());
}

#[test]
fn lower_offset_slot_wins_for_duplicate_codes() {
    let dir = TempDir::new().unwrap();
    let path = seeded_file(&dir, 0);
    ProfileRecord::new().save(&path).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    let fire = Action::FireWeapon.default_code();
    bytes[usize::from(Button::RT.offset())] = fire;
    bytes[usize::from(Button::LB.offset())] = fire;
    fs::write(&path, &bytes).unwrap();

    let loaded = ProfileRecord::load(&path).unwrap();
    assert_eq!(loaded.input.get(Action::FireWeapon), Some(Button::LB));
}

// --- Load edge cases ---

#[test]
fn colour_sentinel_loads_as_default() {
    let dir = TempDir::new().unwrap();
    let path = seeded_file(&dir, 0);
    spartan().save(&path).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    bytes[usize::from(spec(Field::ProfileColour).offset)] = 0xFF;
    fs::write(&path, &bytes).unwrap();

    assert_eq!(
        ProfileRecord::load(&path).unwrap().details.colour,
        Colour::White
    );
}

#[test]
fn missing_and_short_files_are_rejected() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.sav");
    assert!(matches!(
        ProfileRecord::load(&missing),
        Err(ProfileError::NotFound(p)) if p == missing
    ));
    assert!(matches!(
        ProfileRecord::new().save(&missing),
        Err(ProfileError::NotFound(_))
    ));

    let short = dir.path().join("short.sav");
    fs::write(&short, [0u8; 100]).unwrap();
    assert!(matches!(
        ProfileRecord::load(&short),
        Err(ProfileError::UnexpectedLength {
            expected: RECORD_LEN,
            actual: 100
        })
    ));
}

#[test]
fn oversized_file_is_neither_loaded_nor_saved() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blam.sav");
    fs::write(&path, vec![0u8; RECORD_LEN + 4]).unwrap();

    assert!(matches!(
        ProfileRecord::load(&path),
        Err(ProfileError::UnexpectedLength {
            expected: RECORD_LEN,
            actual: 8196
        })
    ));
    assert!(matches!(
        ProfileRecord::new().save(&path),
        Err(ProfileError::UnexpectedLength { actual: 8196, .. })
    ));
    assert_eq!(fs::read(&path).unwrap(), vec![0u8; RECORD_LEN + 4]);
}

#[test]
fn strict_checksum_rejects_tampered_record() {
    let dir = TempDir::new().unwrap();
    let path = seeded_file(&dir, 0);
    spartan().save(&path).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    bytes[0x1500] ^= 0x80;
    fs::write(&path, &bytes).unwrap();

    let strict = ProfileCodec::new(CodecOptions::new().with_checksum(ChecksumPolicy::Reject));
    assert!(matches!(
        strict.load(&path),
        Err(ProfileError::ChecksumMismatch { .. })
    ));
    assert!(!strict.verify(&path).unwrap().is_valid());
    assert!(ProfileRecord::load(&path).is_ok());
}
