//! Passphrase stretching and verification.
//!
//! `K0 = H(passphrase || salt)`, then `K = H(K)` for `iterations` more rounds.
//! The vault stores `H(K)`; a passphrase is accepted only if the stretched
//! key hashes to exactly that value.

use subtle::ConstantTimeEq;

use crate::aliases::{Digest32, Key32, Salt32};
use crate::crypto::provider::Primitives;
use crate::error::Psafe3Error;

/// Stretch `passphrase` into a 32-byte key.
///
/// Runs `iterations` hash rounds after the salted first round, each round
/// seeing only the previous 32-byte digest. Every intermediate digest is
/// wiped when replaced.
#[inline]
pub fn derive_stretched_key<P: Primitives>(
    primitives: &P,
    passphrase: &[u8],
    salt: &Salt32,
    iterations: u32,
) -> Key32 {
    let mut key = primitives.hash(&[passphrase, &salt[..]]);
    for _ in 0..iterations {
        key = primitives.hash(&[&key[..]]);
    }
    key
}

/// Check a stretched key against the stored verifier digest.
///
/// Compares all 32 bytes in constant time.
///
/// # Errors
///
/// [`Psafe3Error::InvalidPassphrase`] on any mismatch.
pub fn verify_stretched_key<P: Primitives>(
    primitives: &P,
    stretched: &Key32,
    verifier: &Digest32,
) -> Result<(), Psafe3Error> {
    let digest = primitives.hash(&[&stretched[..]]);
    if bool::from(digest[..].ct_eq(&verifier[..])) {
        Ok(())
    } else {
        Err(Psafe3Error::InvalidPassphrase)
    }
}

/// Stretch and verify in one step; the key is returned only when it checks out.
///
/// # Errors
///
/// [`Psafe3Error::InvalidPassphrase`] if the verifier does not match.
pub fn stretch_and_verify<P: Primitives>(
    primitives: &P,
    passphrase: &[u8],
    salt: &Salt32,
    iterations: u32,
    verifier: &Digest32,
) -> Result<Key32, Psafe3Error> {
    let stretched = derive_stretched_key(primitives, passphrase, salt, iterations);
    verify_stretched_key(primitives, &stretched, verifier)?;
    tracing::debug!(iterations, "passphrase verified");
    Ok(stretched)
}
