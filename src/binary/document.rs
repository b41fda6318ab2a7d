use super::{DecodeError, EventRecord, FORMAT_VERSION, HEADER_LEN, MAGIC, RECORD_LEN};
use crate::file::Timing;

#[doc = r#"
An owned, validated `MBIN` buffer.

Documents come from [`BinaryEncoder`](super::BinaryEncoder) or from
[`BinaryDocument::from_bytes`], which checks the header, the length and every
kind byte once so record access afterwards cannot fail.

```rust
# use midibin::prelude::*;
let bytes = vec![
    b'M', b'B', b'I', b'N', 1, 0, 0xE0, 0x01, 1, 0, 0, 0, 0, 0, 0, 0,
    0x20, 0xA1, 0x07, 0, 0, 0, 0, 0, 1, 2, 60, 100, 0, 0, 0, 0,
];
let document = BinaryDocument::from_bytes(bytes).unwrap();
let record = document.record(0).unwrap();
assert_eq!(record.micros().us(), 500_000);
assert_eq!(record.kind(), EventKind::NoteOn);
assert_eq!(record.channel(), 2);
```
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryDocument {
    bytes: Vec<u8>,
}

impl BinaryDocument {
    pub(crate) fn from_encoded(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Validate a buffer as a document.
    ///
    /// # Errors
    /// Any [`DecodeError`].
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, DecodeError> {
        let bytes = bytes.into();
        let &[m0, m1, m2, m3, v0, v1, _, _, c0, c1, c2, c3, ..] = bytes.as_slice() else {
            return Err(DecodeError::Truncated(bytes.len()));
        };
        if bytes.len() < HEADER_LEN {
            return Err(DecodeError::Truncated(bytes.len()));
        }
        let magic = [m0, m1, m2, m3];
        if magic != MAGIC {
            return Err(DecodeError::BadMagic(magic));
        }
        let version = u16::from_le_bytes([v0, v1]);
        if version != FORMAT_VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }

        let count = u32::from_le_bytes([c0, c1, c2, c3]);
        let expected = HEADER_LEN as u64 + u64::from(count) * RECORD_LEN as u64;
        if expected != bytes.len() as u64 {
            return Err(DecodeError::LengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        for (index, record) in bytes[HEADER_LEN..].chunks_exact(RECORD_LEN).enumerate() {
            if let Ok(record) = <&[u8; RECORD_LEN]>::try_from(record) {
                EventRecord::from_bytes(index, record)?;
            }
        }

        Ok(Self { bytes })
    }

    /// The layout version
    pub fn format_version(&self) -> u16 {
        self.u16_at(4)
    }

    /// The division word of the source file
    pub fn division(&self) -> u16 {
        self.u16_at(6)
    }

    /// Ticks per quarter note, or `None` for an SMPTE source
    pub fn ticks_per_quarter_note(&self) -> Option<u16> {
        self.timing().and_then(|timing| timing.ticks_per_quarter_note())
    }

    /// The timing of the source file, if the division word is a valid one
    pub fn timing(&self) -> Option<Timing> {
        Timing::from_division(self.division().to_be_bytes()).ok()
    }

    /// Number of records
    pub fn event_count(&self) -> u32 {
        let mut count = [0; 4];
        count.copy_from_slice(&self.bytes[8..12]);
        u32::from_le_bytes(count)
    }

    /// The record at `index`
    pub fn record(&self, index: usize) -> Option<EventRecord> {
        let start = index.checked_mul(RECORD_LEN)?.checked_add(HEADER_LEN)?;
        let bytes = self.bytes.get(start..start.checked_add(RECORD_LEN)?)?;
        EventRecord::from_bytes(index, bytes.try_into().ok()?).ok()
    }

    /// Every record, in order
    pub fn records(&self) -> impl Iterator<Item = EventRecord> + '_ {
        (0..self.event_count() as usize).filter_map(|index| self.record(index))
    }

    /// The encoded bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the document, returning its bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    fn u16_at(&self, offset: usize) -> u16 {
        u16::from_le_bytes([self.bytes[offset], self.bytes[offset + 1]])
    }
}

#[cfg(test)]
fn header(version: u16, count: u32) -> Vec<u8> {
    let mut bytes = Vec::from(MAGIC);
    bytes.extend_from_slice(&version.to_le_bytes());
    bytes.extend_from_slice(&480_u16.to_le_bytes());
    bytes.extend_from_slice(&count.to_le_bytes());
    bytes.extend_from_slice(&[0; 4]);
    bytes
}

#[test]
fn rejects_malformed_buffers() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        BinaryDocument::from_bytes(b"MBIN".to_vec()),
        Err(DecodeError::Truncated(4))
    );

    let mut wrong_magic = header(1, 0);
    wrong_magic[0] = b'X';
    assert_eq!(
        BinaryDocument::from_bytes(wrong_magic),
        Err(DecodeError::BadMagic(*b"XBIN"))
    );

    assert_eq!(
        BinaryDocument::from_bytes(header(2, 0)),
        Err(DecodeError::UnsupportedVersion(2))
    );

    let mut short = header(1, 2);
    short.extend_from_slice(&[0; RECORD_LEN]);
    assert_eq!(
        BinaryDocument::from_bytes(short),
        Err(DecodeError::LengthMismatch {
            expected: 48,
            actual: 32
        })
    );

    let mut bad_kind = header(1, 1);
    bad_kind.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 0, 0xAA, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(
        BinaryDocument::from_bytes(bad_kind),
        Err(DecodeError::UnknownKind {
            index: 0,
            kind: 0xAA
        })
    );
}

#[test]
fn record_out_of_range() {
    let document = BinaryDocument::from_bytes(header(1, 0)).unwrap();
    assert_eq!(document.format_version(), 1);
    assert_eq!(document.ticks_per_quarter_note(), Some(480));
    assert!(document.record(0).is_none());
    assert!(document.record(usize::MAX).is_none());
    assert_eq!(document.records().count(), 0);
}
