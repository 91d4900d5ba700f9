//! # Builders
//!
//! Fluent configuration for the decryption pipeline.
//!
//! ## Modules
//!
//! - [`options_builder`] - [`DecryptOptions`] and its builder
//!
//! Every setting has a safe default, so `DecryptOptions::default()` is what
//! most callers want.

pub mod options_builder;

pub use options_builder::{DecryptOptions, DecryptOptionsBuilder, ShortReadPolicy};
