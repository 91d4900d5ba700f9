//! src/decryptor/decrypt.rs
//! Password Safe v3 decryption pipeline

use std::path::Path;

use crate::builders::DecryptOptions;
use crate::consts::RECOMMENDED_MIN_ITERATIONS;
use crate::container::Container;
use crate::crypto::kdf::stretch::stretch_and_verify;
use crate::crypto::provider::{KeyedDigest, Primitives, RustCrypto};
use crate::decryptor::records::decode_fields;
use crate::decryptor::session::extract_secret_material;
use crate::decryptor::stream::{decrypt_body, verify_trailer};
use crate::error::Psafe3Error;
use crate::vault::{DecryptedVault, IntegrityReport};

/// Decrypt and verify a vault.
///
/// Stages run strictly in order and stop at the first failure:
/// stretch + verify passphrase, unwrap content keys, CBC-decrypt the body,
/// walk the fields while computing the HMAC, then check marker and tag.
/// Keys and plaintext are wiped on every exit path.
///
/// # Errors
///
/// - [`Psafe3Error::Format`] - iteration count above the configured cap,
///   bad body length, short body (strict policy), field overrun, EOF marker
/// - [`Psafe3Error::InvalidPassphrase`] - verifier mismatch
/// - [`Psafe3Error::PrimitiveSetup`] - a primitive refused its key
/// - [`Psafe3Error::IntegrityFailure`] - HMAC mismatch
pub fn decrypt_vault<P: Primitives>(
    container: &Container,
    passphrase: &[u8],
    options: &DecryptOptions,
    primitives: &P,
) -> Result<DecryptedVault, Psafe3Error> {
    let header = container.header();
    if header.iterations > options.max_iterations() {
        return Err(Psafe3Error::Format(format!(
            "iteration count {} exceeds limit {}",
            header.iterations,
            options.max_iterations()
        )));
    }
    if header.iterations < RECOMMENDED_MIN_ITERATIONS {
        tracing::warn!(
            iterations = header.iterations,
            recommended = RECOMMENDED_MIN_ITERATIONS,
            "weak key stretching"
        );
    }

    let stretched = stretch_and_verify(
        primitives,
        passphrase,
        &header.salt,
        header.iterations,
        &header.verifier,
    )?;
    let secrets = extract_secret_material(primitives, header, &stretched)?;

    let body = container.body();
    let plaintext = decrypt_body(
        primitives,
        secrets.encryption_key(),
        &header.iv,
        body,
        body.len(),
        options.short_read(),
    )?;

    let mut mac = primitives.keyed_digest(secrets.authentication_key())?;
    let spans = decode_fields(plaintext.as_slice(), &mut mac)?;
    let computed_tag = mac.finish();

    let stored_tag = container.stored_tag();
    verify_trailer(container.eof_marker(), &computed_tag, &stored_tag)?;
    tracing::debug!(fields = spans.len(), "vault verified");

    let report = IntegrityReport {
        derived_key: stretched,
        expected_verifier: header.verifier,
        computed_tag,
        stored_tag,
    };
    Ok(DecryptedVault::new(header.clone(), plaintext, spans, report))
}

/// Read, decrypt and verify the vault at `path` with default options.
///
/// # Errors
///
/// [`Psafe3Error::Io`] if the file cannot be read; otherwise as [`decrypt_vault`].
pub fn open<P: AsRef<Path>>(path: P, passphrase: &[u8]) -> Result<DecryptedVault, Psafe3Error> {
    let container = Container::open(path)?;
    decrypt_vault(&container, passphrase, &DecryptOptions::default(), &RustCrypto)
}
