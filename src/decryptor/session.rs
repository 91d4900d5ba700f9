//! Content key unwrapping.
//!
//! The header carries two 32-byte keys, each stored as two Twofish blocks
//! encrypted independently (ECB, no IV) under the stretched passphrase key:
//! B0‖B1 is the content-encryption key, B2‖B3 the content-authentication key.

use core::fmt;

use crate::aliases::{Block16, Key32};
use crate::consts::{BLOCK_SIZE, KEY_SIZE};
use crate::crypto::provider::{BlockDecryptor, Primitives};
use crate::error::Psafe3Error;
use crate::header::Header;
use crate::secure::SecureBuffer;

const STRETCHED: usize = 0;
const ENCRYPTION: usize = KEY_SIZE;
const AUTHENTICATION: usize = 2 * KEY_SIZE;

/// Stretched key plus the two unwrapped content keys.
///
/// All three live in one page-locked [`SecureBuffer`] that is wiped on drop,
/// so every exit path (including `?` returns) releases them.
pub struct SecretMaterial {
    slots: SecureBuffer,
}

impl SecretMaterial {
    fn with_stretched(stretched: &Key32) -> Self {
        let mut slots = SecureBuffer::zeroed(3 * KEY_SIZE);
        slots.as_mut_slice()[STRETCHED..STRETCHED + KEY_SIZE].copy_from_slice(&stretched[..]);
        Self { slots }
    }

    fn slot(&self, offset: usize) -> &[u8] {
        &self.slots.as_slice()[offset..offset + KEY_SIZE]
    }

    fn slot_mut(&mut self, offset: usize) -> &mut [u8] {
        &mut self.slots.as_mut_slice()[offset..offset + KEY_SIZE]
    }

    /// The verified stretched passphrase key (P').
    #[must_use]
    pub fn stretched_key(&self) -> &[u8] {
        self.slot(STRETCHED)
    }

    /// Key for the Twofish-CBC body.
    #[must_use]
    pub fn encryption_key(&self) -> &[u8] {
        self.slot(ENCRYPTION)
    }

    /// Key for the HMAC over field payloads.
    #[must_use]
    pub fn authentication_key(&self) -> &[u8] {
        self.slot(AUTHENTICATION)
    }
}

impl fmt::Debug for SecretMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretMaterial([REDACTED])")
    }
}

/// Decrypt two independently encrypted blocks into a 32-byte key.
#[inline(always)]
pub fn unwrap_key<C: BlockDecryptor>(
    cipher: &C,
    first: &[u8; BLOCK_SIZE],
    second: &[u8; BLOCK_SIZE],
    out: &mut [u8],
) {
    for (half, wrapped) in out.chunks_exact_mut(BLOCK_SIZE).zip([first, second]) {
        let mut block = Block16::new(*wrapped);
        cipher.decrypt_in_place(&mut block);
        half.copy_from_slice(&block[..]);
    }
}

/// Unwrap both content keys from the header with an already verified stretched key.
///
/// # Errors
///
/// [`Psafe3Error::PrimitiveSetup`] if the cipher rejects the stretched key.
pub fn extract_secret_material<P: Primitives>(
    primitives: &P,
    header: &Header,
    stretched: &Key32,
) -> Result<SecretMaterial, Psafe3Error> {
    let mut secrets = SecretMaterial::with_stretched(stretched);
    let cipher = primitives.block_cipher(&stretched[..])?;

    let [b0, b1, b2, b3] = &header.wrapped;
    unwrap_key(&cipher, b0, b1, secrets.slot_mut(ENCRYPTION));
    unwrap_key(&cipher, b2, b3, secrets.slot_mut(AUTHENTICATION));

    Ok(secrets)
}
