//! # Key Derivation
//!
//! Password Safe v3 stretches the passphrase with iterated SHA-256 and keeps
//! a hash of the result in the header so a wrong passphrase is caught before
//! any content key is touched.
//!
//! ## Modules
//!
//! - [`stretch`] - key stretching and verifier check
//!
//! Most callers never need these directly; [`decrypt_vault`](crate::decrypt_vault)
//! runs them as the first stage.

pub mod stretch;
