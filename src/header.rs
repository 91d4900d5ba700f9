//! # Header Parsing
//!
//! The cleartext header sits right after the 4-byte `PWS3` tag:
//!
//! | offset | size | field                                  |
//! |--------|------|----------------------------------------|
//! | 0      | 32   | salt                                   |
//! | 32     | 4    | iteration count (little-endian)        |
//! | 36     | 32   | H(P'), SHA-256 of the stretched key    |
//! | 68     | 64   | B0..B3, wrapped content keys           |
//! | 132    | 16   | IV for the body                        |

use crate::aliases::{Digest32, Iv16, Salt32};
use crate::consts::{BLOCK_SIZE, HEADER_SIZE, KEY_SIZE, PWS3_TAG, SALT_SIZE, TAG_SIZE};
use crate::error::Psafe3Error;
use std::io::Read;

/// Parsed, immutable vault header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub salt: Salt32,
    pub iterations: u32,
    /// Stored SHA-256 of the stretched key.
    pub verifier: Digest32,
    /// Wrapped key blocks: {0,1} content-encryption key, {2,3} content-authentication key.
    pub wrapped: [[u8; BLOCK_SIZE]; 4],
    pub iv: Iv16,
}

impl Header {
    /// Parse the fixed header structure (without the leading tag).
    ///
    /// # Errors
    ///
    /// - [`Psafe3Error::Format`] - fewer than [`HEADER_SIZE`] bytes available
    pub fn parse(bytes: &[u8]) -> Result<Self, Psafe3Error> {
        let bytes: &[u8; HEADER_SIZE] = bytes
            .get(..HEADER_SIZE)
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| {
                Psafe3Error::Format(format!(
                    "truncated header: need {HEADER_SIZE} bytes, have {}",
                    bytes.len()
                ))
            })?;

        let (salt_bytes, rest) = bytes.split_at(SALT_SIZE);
        let (iter_bytes, rest) = rest.split_at(4);
        let (verifier_bytes, rest) = rest.split_at(KEY_SIZE);
        let (wrapped_bytes, iv_bytes) = rest.split_at(4 * BLOCK_SIZE);

        let mut salt = [0u8; SALT_SIZE];
        salt.copy_from_slice(salt_bytes);

        let mut iter_le = [0u8; 4];
        iter_le.copy_from_slice(iter_bytes);
        let iterations = u32::from_le_bytes(iter_le);

        let mut verifier = [0u8; KEY_SIZE];
        verifier.copy_from_slice(verifier_bytes);

        let mut wrapped = [[0u8; BLOCK_SIZE]; 4];
        for (block, chunk) in wrapped.iter_mut().zip(wrapped_bytes.chunks_exact(BLOCK_SIZE)) {
            block.copy_from_slice(chunk);
        }

        let mut iv = [0u8; BLOCK_SIZE];
        iv.copy_from_slice(iv_bytes);

        Ok(Self {
            salt,
            iterations,
            verifier,
            wrapped,
            iv,
        })
    }

    /// Read tag and header from a stream.
    ///
    /// # Errors
    ///
    /// - [`Psafe3Error::Format`] - wrong tag or short header
    /// - [`Psafe3Error::Io`] - any other read failure
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self, Psafe3Error> {
        read_tag(&mut reader)?;
        let mut buf = [0u8; HEADER_SIZE];
        reader.read_exact(&mut buf).map_err(eof_as_format)?;
        Self::parse(&buf)
    }

    /// Hex diagnostic lines: `SALT`, `ITER`, `H(P')`, `B0`..`B3`, `IV`.
    #[must_use]
    pub fn prologue(&self) -> Vec<(String, String)> {
        let mut lines = vec![
            ("SALT".to_string(), hex::encode(self.salt)),
            ("ITER".to_string(), self.iterations.to_string()),
            ("H(P')".to_string(), hex::encode(self.verifier)),
        ];
        for (i, block) in self.wrapped.iter().enumerate() {
            lines.push((format!("B{i}"), hex::encode(block)));
        }
        lines.push(("IV".to_string(), hex::encode(self.iv)));
        lines
    }
}

/// Read and validate the 4-byte `PWS3` container tag.
///
/// # Example
///
/// ```
/// use psafe3::read_tag;
/// use std::io::Cursor;
///
/// assert!(read_tag(Cursor::new(b"PWS3")).is_ok());
/// assert!(read_tag(Cursor::new(b"PWS2")).is_err());
/// ```
pub fn read_tag<R: Read>(mut reader: R) -> Result<(), Psafe3Error> {
    let mut tag = [0u8; TAG_SIZE];
    reader.read_exact(&mut tag).map_err(eof_as_format)?;
    if &tag != PWS3_TAG {
        return Err(Psafe3Error::Format(
            "Not a Password Safe v3 file: invalid tag".into(),
        ));
    }
    Ok(())
}

fn eof_as_format(err: std::io::Error) -> Psafe3Error {
    if err.kind() == std::io::ErrorKind::UnexpectedEof {
        "truncated header".into()
    } else {
        Psafe3Error::Io(err)
    }
}
