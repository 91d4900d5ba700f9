//! tests/file_ops_tests.rs
//! Path-based entry points against vaults written to a temp directory

mod common;
use common::{VaultBuilder, SENTINEL, TEST_PASSWORD};

use psafe3::{open, read_tag, Container, ErrorKind};
use std::fs::{self, File};
use tempfile::TempDir;

fn write_vault(dir: &TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn open_decrypts_from_disk() {
    let dir = TempDir::new().unwrap();
    let built = VaultBuilder::new()
        .field(0x09, b"Work")
        .field(SENTINEL, b"")
        .field(0x03, b"vpn")
        .field(SENTINEL, b"")
        .build();
    let path = write_vault(&dir, "work.psafe3", &built.bytes);

    let vault = open(&path, TEST_PASSWORD).unwrap();
    assert_eq!(vault.report().computed_tag, built.tag);
    assert_eq!(vault.entries()[0].title(), Some("vpn"));
}

#[test]
fn container_open_matches_from_bytes() {
    let dir = TempDir::new().unwrap();
    let built = VaultBuilder::new().field(SENTINEL, b"").build();
    let path = write_vault(&dir, "a.psafe3", &built.bytes);

    let from_disk = Container::open(&path).unwrap();
    let in_memory = Container::from_bytes(built.bytes.clone()).unwrap();
    assert_eq!(from_disk.header(), in_memory.header());
    assert_eq!(from_disk.body(), in_memory.body());
    assert_eq!(from_disk.len(), built.bytes.len());
}

#[test]
fn read_tag_on_real_files() {
    let dir = TempDir::new().unwrap();
    let built = VaultBuilder::new().field(SENTINEL, b"").build();
    let good = write_vault(&dir, "good.psafe3", &built.bytes);
    let bad = write_vault(&dir, "bad.psafe3", b"PWS2\x00");

    assert!(read_tag(File::open(good).unwrap()).is_ok());
    let err = read_tag(File::open(bad).unwrap()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn missing_and_truncated_files() {
    let dir = TempDir::new().unwrap();
    let err = open(dir.path().join("absent.psafe3"), TEST_PASSWORD).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);

    let stub = write_vault(&dir, "stub.psafe3", b"PWS3");
    let err = open(&stub, TEST_PASSWORD).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}
