// src/lib.rs

//! Reader for Password Safe v3 (`.psafe3`) vaults.
//!
//! ```no_run
//! let vault = psafe3::open("passwords.psafe3", b"correct horse")?;
//! for entry in vault.entries() {
//!     println!("{}", entry.title().unwrap_or("(untitled)"));
//! }
//! # Ok::<(), psafe3::Psafe3Error>(())
//! ```

pub mod aliases;
pub mod builders;
pub mod consts;
pub mod container;
pub mod crypto;
pub mod decryptor;
pub mod error;
pub mod fields;
pub mod header;
pub mod secure;
pub mod utils;
pub mod vault;

// High-level API
pub use decryptor::{decrypt_vault, open};
pub use error::{ErrorKind, Psafe3Error};
pub use vault::{DecryptedVault, IntegrityReport};

pub use builders::{DecryptOptions, DecryptOptionsBuilder, ShortReadPolicy};
pub use container::Container;
pub use crypto::{BlockDecryptor, KeyedDigest, Primitives, RustCrypto};
pub use fields::{Entry, Field, FieldValue, Interpretation, ParseState};
pub use header::{read_tag, Header};

// Key derivation, public for custom flows
pub use crypto::kdf::stretch::{derive_stretched_key, stretch_and_verify, verify_stretched_key};
