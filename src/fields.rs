//! # Field Model
//!
//! The decrypted body is a run of fields:
//!
//! ```text
//! [ len: u32 LE ][ type: u8 ][ payload: len bytes ][ padding to 16 ]
//! ```
//!
//! The meaning of a type byte depends on where the field sits. Fields before
//! the first `0xff` describe the database as a whole ([`ParseState::HeaderPhase`]);
//! everything after it belongs to password entries ([`ParseState::RecordPhase`]),
//! where `0xff` closes each entry.
//!
//! Classification is table-driven: each phase has a static list of
//! `(tag range, interpretation)` rows, and a tag missing from the table is
//! [`FieldValue::Unknown`].

use core::fmt;
use core::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::consts::END_OF_ENTRY;
use crate::utils::load_le32;

/// Record-phase tag carrying the entry UUID.
pub const RECORD_UUID: u8 = 0x01;
/// Record-phase tag carrying the entry group path.
pub const RECORD_GROUP: u8 = 0x02;
/// Record-phase tag carrying the entry title.
pub const RECORD_TITLE: u8 = 0x03;
/// Record-phase tag carrying the user name.
pub const RECORD_USERNAME: u8 = 0x04;
/// Record-phase tag carrying the password.
pub const RECORD_PASSWORD: u8 = 0x06;

/// How a payload is to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interpretation {
    /// UTF-8 text.
    Text,
    /// 16 raw UUID bytes.
    Uuid,
    /// 4-byte little-endian Unix time.
    Timestamp,
    /// Binary, not interpreted.
    Opaque,
}

type Table = [(RangeInclusive<u8>, Interpretation)];

static HEADER_TABLE: [(RangeInclusive<u8>, Interpretation); 5] = [
    (0x01..=0x01, Interpretation::Uuid),
    (0x02..=0x03, Interpretation::Text),
    (0x04..=0x04, Interpretation::Timestamp),
    (0x05..=0x0b, Interpretation::Text),
    (0x0f..=0x11, Interpretation::Text),
];

static RECORD_TABLE: [(RangeInclusive<u8>, Interpretation); 7] = [
    (0x01..=0x01, Interpretation::Uuid),
    (0x02..=0x06, Interpretation::Text),
    (0x07..=0x0a, Interpretation::Timestamp),
    (0x0c..=0x0c, Interpretation::Timestamp),
    (0x0d..=0x10, Interpretation::Text),
    (0x14..=0x14, Interpretation::Text),
    (0x16..=0x16, Interpretation::Text),
];

/// Decoder phase. Starts in `HeaderPhase` and moves to `RecordPhase` on the
/// first `0xff` field, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseState {
    #[default]
    HeaderPhase,
    RecordPhase,
}

impl ParseState {
    /// State after a field with `tag` has been processed.
    #[inline]
    #[must_use]
    pub const fn advance(self, tag: u8) -> Self {
        match self {
            Self::HeaderPhase if tag == END_OF_ENTRY => Self::RecordPhase,
            state => state,
        }
    }

    fn table(self) -> &'static Table {
        match self {
            Self::HeaderPhase => &HEADER_TABLE,
            Self::RecordPhase => &RECORD_TABLE,
        }
    }

    /// Look `tag` up in this phase's table.
    #[must_use]
    pub fn classify(self, tag: u8) -> Option<Interpretation> {
        self.table()
            .iter()
            .find(|(range, _)| range.contains(&tag))
            .map(|(_, interpretation)| *interpretation)
    }
}

/// Byte position of one field inside the plaintext, independent of any borrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpan {
    /// Start of the payload (just past the 5-byte prefix).
    pub offset: usize,
    pub len: usize,
    pub tag: u8,
    /// Phase in force when the field was read.
    pub phase: ParseState,
}

impl FieldSpan {
    /// Borrow the field out of the plaintext it was decoded from.
    ///
    /// # Panics
    ///
    /// If `plaintext` is not the buffer the span was produced from and is too short.
    #[must_use]
    pub fn view<'a>(&self, plaintext: &'a [u8]) -> Field<'a> {
        Field {
            tag: self.tag,
            phase: self.phase,
            payload: &plaintext[self.offset..self.offset + self.len],
        }
    }
}

/// One field, borrowed from the plaintext buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub tag: u8,
    pub phase: ParseState,
    pub payload: &'a [u8],
}

impl<'a> Field<'a> {
    /// Payload length in bytes (may be zero).
    #[must_use]
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    #[must_use]
    pub fn is_end_of_entry(&self) -> bool {
        self.tag == END_OF_ENTRY
    }

    #[must_use]
    pub fn interpretation(&self) -> Option<Interpretation> {
        self.phase.classify(self.tag)
    }

    /// Decode the payload according to its phase table.
    ///
    /// A typed payload that does not fit its type (wrong size, bad UTF-8)
    /// comes back as [`FieldValue::Opaque`].
    #[must_use]
    pub fn value(&self) -> FieldValue<'a> {
        let payload = self.payload;
        let Some(interpretation) = self.interpretation() else {
            return FieldValue::Unknown(payload);
        };
        let decoded = match interpretation {
            Interpretation::Text => core::str::from_utf8(payload).ok().map(FieldValue::Text),
            Interpretation::Uuid => Uuid::from_slice(payload).ok().map(FieldValue::Uuid),
            Interpretation::Timestamp if payload.len() == 4 => {
                load_le32(payload).map(FieldValue::Timestamp)
            }
            Interpretation::Timestamp => None,
            Interpretation::Opaque => Some(FieldValue::Opaque(payload)),
        };
        decoded.unwrap_or_else(|| {
            tracing::warn!(
                tag = self.tag,
                len = payload.len(),
                expected = ?interpretation,
                "malformed field payload, treating as opaque"
            );
            FieldValue::Opaque(payload)
        })
    }
}

/// A decoded payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Uuid(Uuid),
    /// Seconds since the Unix epoch.
    Timestamp(u32),
    Opaque(&'a [u8]),
    /// Tag not listed for the current phase.
    Unknown(&'a [u8]),
}

impl FieldValue<'_> {
    /// UTC time for [`FieldValue::Timestamp`], `None` for everything else.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(secs) => DateTime::from_timestamp(i64::from(*secs), 0),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(*text),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Uuid(uuid) => write!(f, "{}", uuid.hyphenated()),
            Self::Timestamp(secs) => match self.to_datetime() {
                Some(at) => write!(f, "{}", at.format("%Y-%m-%d %H:%M:%S")),
                None => write!(f, "{secs}"),
            },
            Self::Opaque(bytes) | Self::Unknown(bytes) => f.write_str(&hex::encode(bytes)),
        }
    }
}

/// Record-phase fields between two `0xff` terminators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry<'a> {
    fields: Vec<Field<'a>>,
}

impl<'a> Entry<'a> {
    #[must_use]
    pub fn fields(&self) -> &[Field<'a>] {
        &self.fields
    }

    /// Value of the first field with `tag`.
    #[must_use]
    pub fn get(&self, tag: u8) -> Option<FieldValue<'a>> {
        self.fields.iter().find(|f| f.tag == tag).map(Field::value)
    }

    #[must_use]
    pub fn uuid(&self) -> Option<Uuid> {
        match self.get(RECORD_UUID)? {
            FieldValue::Uuid(uuid) => Some(uuid),
            _ => None,
        }
    }

    #[must_use]
    pub fn title(&self) -> Option<&'a str> {
        match self.get(RECORD_TITLE)? {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Split record-phase fields into entries on each `0xff`.
///
/// Header-phase fields are skipped. Terminators are not kept, and a trailing
/// run without a terminator still forms a final entry.
pub fn group_entries<'a, I>(fields: I) -> Vec<Entry<'a>>
where
    I: IntoIterator<Item = Field<'a>>,
{
    let mut entries = Vec::new();
    let mut current = Entry::default();
    for field in fields
        .into_iter()
        .filter(|f| f.phase == ParseState::RecordPhase)
    {
        if field.is_end_of_entry() {
            entries.push(core::mem::take(&mut current));
        } else {
            current.fields.push(field);
        }
    }
    if !current.fields.is_empty() {
        entries.push(current);
    }
    entries
}
