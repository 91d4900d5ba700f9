//! src/decryptor/stream/mod.rs
//! Body decryption (Twofish-CBC) and trailer verification

pub(crate) mod context;
pub(crate) mod trailer;

use crate::aliases::Iv16;
use crate::builders::ShortReadPolicy;
use crate::consts::BLOCK_SIZE;
use crate::crypto::provider::Primitives;
use crate::error::Psafe3Error;
use crate::secure::SecureBuffer;
use context::{fill_block, DecryptionContext};
use std::io::Read;

pub use trailer::{verify_eof_marker, verify_trailer};

/// Decrypt `expected_len` bytes of CBC ciphertext pulled from `source`.
///
/// The result lands in a locked, self-wiping buffer of the same length.
/// If `source` runs out before `expected_len` bytes, `policy` decides between
/// a format error and a plaintext cut down to the whole blocks produced.
///
/// # Errors
///
/// - [`Psafe3Error::Format`] - `expected_len` is zero or not block-aligned, or
///   the source was exhausted early under [`ShortReadPolicy::Reject`]
/// - [`Psafe3Error::PrimitiveSetup`] - cipher rejected `key`
/// - [`Psafe3Error::Io`] - the source failed
pub fn decrypt_body<R, P>(
    primitives: &P,
    key: &[u8],
    iv: &Iv16,
    mut source: R,
    expected_len: usize,
    policy: ShortReadPolicy,
) -> Result<SecureBuffer, Psafe3Error>
where
    R: Read,
    P: Primitives,
{
    if expected_len == 0 || expected_len % BLOCK_SIZE != 0 {
        return Err(Psafe3Error::Format(format!(
            "body length {expected_len} is not a positive multiple of {BLOCK_SIZE}"
        )));
    }

    let cipher = primitives.block_cipher(key)?;
    let mut plaintext = SecureBuffer::zeroed(expected_len);
    let mut ctx = DecryptionContext::new_with_iv(iv);
    let mut ciphertext = [0u8; BLOCK_SIZE];

    let total = expected_len / BLOCK_SIZE;
    let mut produced = 0;
    for out in plaintext.as_mut_slice().chunks_exact_mut(BLOCK_SIZE) {
        if fill_block(&mut source, &mut ciphertext)? < BLOCK_SIZE {
            break;
        }
        ctx.decrypt_block(&cipher, &ciphertext, out);
        produced += 1;
    }

    if produced < total {
        match policy {
            ShortReadPolicy::Reject => {
                return Err(Psafe3Error::Format(format!(
                    "body source exhausted after {produced} of {total} blocks"
                )));
            }
            ShortReadPolicy::Truncate => {
                tracing::warn!(produced, total, "body truncated by short read");
                plaintext.truncate(produced * BLOCK_SIZE);
            }
        }
    }

    tracing::debug!(blocks = produced, "decrypted body");
    Ok(plaintext)
}
