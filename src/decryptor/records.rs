//! src/decryptor/records.rs
//! Field walk over the decrypted body, feeding the content MAC

use crate::consts::FIELD_PREFIX_SIZE;
use crate::crypto::provider::KeyedDigest;
use crate::error::Psafe3Error;
use crate::fields::{FieldSpan, ParseState};
use crate::utils::{load_le32, padded_field_len};

/// Walk `plaintext` field by field and return where each one sits.
///
/// Every non-empty payload is absorbed into `mac` in file order. Prefix
/// bytes, padding and zero-length fields never reach it. The phase moves to
/// [`ParseState::RecordPhase`] after the first `0xff` field.
///
/// # Errors
///
/// [`Psafe3Error::Format`] if a field's padded footprint runs past the end
/// of `plaintext`.
pub fn decode_fields<M: KeyedDigest>(
    plaintext: &[u8],
    mac: &mut M,
) -> Result<Vec<FieldSpan>, Psafe3Error> {
    let mut spans = Vec::new();
    let mut state = ParseState::HeaderPhase;
    let mut cursor = 0;

    while cursor < plaintext.len() {
        let rest = &plaintext[cursor..];
        let (len, tag) = match (load_le32(rest), rest.get(FIELD_PREFIX_SIZE - 1)) {
            (Some(len), Some(&tag)) => (len as usize, tag),
            _ => {
                return Err(Psafe3Error::Format(format!(
                    "truncated field prefix at offset {cursor}"
                )))
            }
        };

        let footprint = padded_field_len(len)
            .filter(|&n| n <= rest.len())
            .ok_or_else(|| {
                Psafe3Error::Format(format!(
                    "field at offset {cursor} (len={len}, type={tag:#04x}) overruns the body"
                ))
            })?;

        let offset = cursor + FIELD_PREFIX_SIZE;
        if len > 0 {
            mac.absorb(&plaintext[offset..offset + len]);
        }
        spans.push(FieldSpan {
            offset,
            len,
            tag,
            phase: state,
        });

        let next = state.advance(tag);
        if next != state {
            tracing::debug!(offset = cursor, header_fields = spans.len(), "end of header fields");
        }
        state = next;
        cursor += footprint;
    }

    tracing::debug!(fields = spans.len(), "decoded body fields");
    Ok(spans)
}
