//! Low-level crypto: the primitive provider seam and key derivation.
//!
//! HMAC and key types are defined in `aliases.rs`.

pub mod kdf;
pub mod provider;

pub use provider::{BlockDecryptor, KeyedDigest, Primitives, RustCrypto};
