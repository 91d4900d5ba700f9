// src/decryptor/mod.rs

//! High-level decryption facade.
//!
//! Core API: `decrypt_vault(&container, passphrase, &options, &primitives)?`.
//! Stage helpers (`extract_secret_material`, `decrypt_body`, `decode_fields`,
//! `verify_trailer`) are public for custom flows and tests.

pub(crate) mod decrypt;
pub(crate) mod records;
pub(crate) mod session;
pub(crate) mod stream;

pub use decrypt::{decrypt_vault, open};
pub use records::decode_fields;
pub use session::{extract_secret_material, unwrap_key, SecretMaterial};
pub use stream::{decrypt_body, verify_eof_marker, verify_trailer};
