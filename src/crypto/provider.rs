//! Primitive provider seam.
//!
//! The pipeline never names a concrete hash, MAC or cipher. It is handed a
//! [`Primitives`] value and asks it for each capability, so tests can swap
//! in a deterministic stand-in and nothing depends on global library state.

use hmac::Mac;
use sha2::{Digest, Sha256};
use twofish::cipher::generic_array::GenericArray;
use twofish::cipher::{BlockDecrypt, KeyInit};
use twofish::Twofish;
use zeroize::Zeroizing;

use crate::aliases::{HmacSha256, Key32};
use crate::consts::{BLOCK_SIZE, KEY_SIZE};
use crate::error::Psafe3Error;

/// A keyed block cipher that decrypts one 16-byte block in place (ECB step).
pub trait BlockDecryptor {
    fn decrypt_in_place(&self, block: &mut [u8; BLOCK_SIZE]);
}

/// An incremental keyed digest producing a 32-byte tag.
pub trait KeyedDigest {
    fn absorb(&mut self, data: &[u8]);
    fn finish(self) -> [u8; KEY_SIZE];
}

/// Capability bundle for the whole pipeline.
pub trait Primitives {
    type Cipher: BlockDecryptor;
    type Mac: KeyedDigest;

    /// One-shot hash over the concatenation of `parts`.
    fn hash(&self, parts: &[&[u8]]) -> Key32;

    /// Key a block cipher.
    ///
    /// # Errors
    ///
    /// [`Psafe3Error::PrimitiveSetup`] if the key is rejected.
    fn block_cipher(&self, key: &[u8]) -> Result<Self::Cipher, Psafe3Error>;

    /// Key a MAC.
    ///
    /// # Errors
    ///
    /// [`Psafe3Error::PrimitiveSetup`] if the key is rejected.
    fn keyed_digest(&self, key: &[u8]) -> Result<Self::Mac, Psafe3Error>;
}

/// SHA-256, HMAC-SHA256 and Twofish from the RustCrypto crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCrypto;

impl BlockDecryptor for Twofish {
    #[inline(always)]
    fn decrypt_in_place(&self, block: &mut [u8; BLOCK_SIZE]) {
        BlockDecrypt::decrypt_block(self, GenericArray::from_mut_slice(block));
    }
}

impl KeyedDigest for HmacSha256 {
    #[inline(always)]
    fn absorb(&mut self, data: &[u8]) {
        Mac::update(self, data);
    }

    fn finish(self) -> [u8; KEY_SIZE] {
        Mac::finalize(self).into_bytes().into()
    }
}

impl Primitives for RustCrypto {
    type Cipher = Twofish;
    type Mac = HmacSha256;

    fn hash(&self, parts: &[&[u8]]) -> Key32 {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        Zeroizing::new(hasher.finalize().into())
    }

    fn block_cipher(&self, key: &[u8]) -> Result<Twofish, Psafe3Error> {
        Twofish::new_from_slice(key)
            .map_err(|e| Psafe3Error::PrimitiveSetup(format!("Twofish key setup failed: {e}")))
    }

    fn keyed_digest(&self, key: &[u8]) -> Result<HmacSha256, Psafe3Error> {
        <HmacSha256 as Mac>::new_from_slice(key)
            .map_err(|e| Psafe3Error::PrimitiveSetup(format!("HMAC key setup failed: {e}")))
    }
}
