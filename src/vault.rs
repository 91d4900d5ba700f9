//! Decrypted vault and its integrity report.

use core::fmt;

use crate::aliases::{Digest32, Key32};
use crate::fields::{group_entries, Entry, Field, FieldSpan, ParseState};
use crate::header::Header;
use crate::secure::SecureBuffer;

/// The values compared during verification, kept for diagnostics.
///
/// Only produced for a vault that passed every check, so the two tags are
/// always equal here; [`Psafe3Error::IntegrityFailure`](crate::Psafe3Error::IntegrityFailure)
/// carries them for the failing case.
pub struct IntegrityReport {
    /// The stretched passphrase key (P'). Secret.
    pub derived_key: Key32,
    /// H(P') as stored in the header.
    pub expected_verifier: Digest32,
    /// HMAC computed over the field payloads.
    pub computed_tag: [u8; 32],
    /// HMAC stored at the end of the container.
    pub stored_tag: [u8; 32],
}

impl IntegrityReport {
    /// Hex diagnostic lines: `KEY`, `H(KEY)`, `HMAC'`, `HMAC`.
    #[must_use]
    pub fn lines(&self) -> Vec<(String, String)> {
        vec![
            ("KEY".to_string(), hex::encode(*self.derived_key)),
            ("H(KEY)".to_string(), hex::encode(self.expected_verifier)),
            ("HMAC'".to_string(), hex::encode(self.computed_tag)),
            ("HMAC".to_string(), hex::encode(self.stored_tag)),
        ]
    }
}

impl fmt::Debug for IntegrityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntegrityReport")
            .field("derived_key", &"[REDACTED]")
            .field("expected_verifier", &hex::encode(self.expected_verifier))
            .field("computed_tag", &hex::encode(self.computed_tag))
            .field("stored_tag", &hex::encode(self.stored_tag))
            .finish()
    }
}

/// A fully verified vault.
///
/// Owns the plaintext in a locked, self-wiping buffer; every [`Field`] and
/// [`Entry`] handed out borrows from it.
#[derive(Debug)]
pub struct DecryptedVault {
    header: Header,
    plaintext: SecureBuffer,
    spans: Vec<FieldSpan>,
    report: IntegrityReport,
}

impl DecryptedVault {
    pub(crate) fn new(
        header: Header,
        plaintext: SecureBuffer,
        spans: Vec<FieldSpan>,
        report: IntegrityReport,
    ) -> Self {
        Self {
            header,
            plaintext,
            spans,
            report,
        }
    }

    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    #[must_use]
    pub fn report(&self) -> &IntegrityReport {
        &self.report
    }

    /// Every field in file order, both phases.
    pub fn fields(&self) -> impl Iterator<Item = Field<'_>> + '_ {
        let plaintext = self.plaintext.as_slice();
        self.spans.iter().map(move |span| span.view(plaintext))
    }

    /// Fields up to and including the first `0xff`.
    pub fn header_fields(&self) -> impl Iterator<Item = Field<'_>> + '_ {
        self.fields()
            .filter(|f| f.phase == ParseState::HeaderPhase)
    }

    /// Fields after the first `0xff`.
    pub fn record_fields(&self) -> impl Iterator<Item = Field<'_>> + '_ {
        self.fields()
            .filter(|f| f.phase == ParseState::RecordPhase)
    }

    /// Record fields grouped into password entries.
    #[must_use]
    pub fn entries(&self) -> Vec<Entry<'_>> {
        group_entries(self.fields())
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        self.spans.len()
    }

    /// Decrypted body length in bytes, padding included.
    #[must_use]
    pub fn plaintext_len(&self) -> usize {
        self.plaintext.len()
    }
}
