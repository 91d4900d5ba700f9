//! # Error Types
//!
//! This module defines the error types used throughout the library.
//! All operations return [`Result<T, Psafe3Error>`](Psafe3Error).
//!
//! The four decryption failure classes are kept apart on purpose: a caller
//! must be able to tell "wrong passphrase" from "corrupt file" from
//! "tampered file". [`Psafe3Error::kind`] gives a fieldless discriminant for
//! exit-code mapping.

use thiserror::Error;

/// The error type for all vault operations.
#[derive(Error, Debug)]
pub enum Psafe3Error {
    /// I/O error while acquiring the container bytes.
    ///
    /// Wraps [`std::io::Error`] (file not found, permission denied, ...).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stretched passphrase does not hash to the stored verifier.
    ///
    /// Nothing past key derivation is attempted when this is returned.
    #[error("Invalid passphrase")]
    InvalidPassphrase,

    /// A primitive refused to initialize (bad key length and the like).
    ///
    /// Indicates an environment or programming error, never bad user input.
    #[error("Primitive setup error: {0}")]
    PrimitiveSetup(String),

    /// The container is not well-formed:
    /// - bad `PWS3` tag
    /// - truncated header
    /// - body length not a positive multiple of the block size
    /// - body source exhausted early (under the strict short-read policy)
    /// - field overrunning the plaintext
    /// - EOF marker mismatch
    #[error("Format error: {0}")]
    Format(String),

    /// The content-authentication tag did not match after a structurally
    /// successful decrypt. Both tags are carried for diagnostics.
    #[error("Integrity failure: authentication tag mismatch")]
    IntegrityFailure {
        /// Tag computed over the decrypted field payloads.
        computed: [u8; 32],
        /// Tag stored at the end of the container.
        stored: [u8; 32],
    },
}

/// Fieldless discriminant of [`Psafe3Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Io,
    InvalidPassphrase,
    PrimitiveSetup,
    Format,
    IntegrityFailure,
}

impl Psafe3Error {
    /// Classify this error without inspecting its payload.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::InvalidPassphrase => ErrorKind::InvalidPassphrase,
            Self::PrimitiveSetup(_) => ErrorKind::PrimitiveSetup,
            Self::Format(_) => ErrorKind::Format,
            Self::IntegrityFailure { .. } => ErrorKind::IntegrityFailure,
        }
    }
}

impl From<&'static str> for Psafe3Error {
    fn from(msg: &'static str) -> Self {
        Psafe3Error::Format(msg.to_string())
    }
}
