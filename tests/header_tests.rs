//! tests/header_tests.rs
//! Header layout checked against independently built vaults

mod common;
use common::{stretch, VaultBuilder, SENTINEL, TEST_PASSWORD};

use psafe3::consts::{HEADER_SIZE, TAG_SIZE};
use psafe3::{read_tag, Container, Header};
use sha2::{Digest, Sha256};
use std::io::Cursor;

#[test]
fn header_fields_land_where_the_writer_put_them() {
    let salt: [u8; 32] = core::array::from_fn(|i| (i * 5) as u8);
    let built = VaultBuilder::new()
        .salt(salt)
        .iterations(4096)
        .field(SENTINEL, b"")
        .build();

    let header = Header::read_from(Cursor::new(&built.bytes)).unwrap();
    assert_eq!(header.salt, salt);
    assert_eq!(header.iterations, 4096);

    let expected: [u8; 32] = Sha256::digest(stretch(TEST_PASSWORD, &salt, 4096)).into();
    assert_eq!(header.verifier, expected);
    assert_eq!(header.iv, [0x1f; 16]);

    let parsed = Header::parse(&built.bytes[TAG_SIZE..TAG_SIZE + HEADER_SIZE]).unwrap();
    assert_eq!(parsed, header);
    assert_eq!(Container::from_bytes(built.bytes).unwrap().header(), &header);
}

#[test]
fn prologue_is_hex_of_each_field() {
    let built = VaultBuilder::new().field(SENTINEL, b"").build();
    let header = Header::read_from(Cursor::new(&built.bytes)).unwrap();
    let prologue = header.prologue();

    assert_eq!(prologue[0], ("SALT".to_string(), "5a".repeat(32)));
    assert_eq!(prologue[1].1, common::TEST_ITERATIONS.to_string());
    assert_eq!(prologue[7], ("IV".to_string(), "1f".repeat(16)));
    for (label, value) in &prologue[3..7] {
        assert!(label.starts_with('B'));
        assert_eq!(value.len(), 32);
    }
}

#[test]
fn read_tag_rejects_other_formats() {
    let magics: [&[u8]; 4] = [b"PWS2", b"PWS4", b"pws3", b"PW"];
    for magic in magics {
        assert!(read_tag(Cursor::new(magic)).is_err(), "{magic:?}");
    }
}
