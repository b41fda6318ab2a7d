#![doc = r#"
The `MBIN` container

A fixed layout meant to be played back without parsing: one 16 byte header
followed by one 16 byte record per event. Every integer is little-endian.

```text
header   0..4    magic "MBIN"
         4..6    format version (1)
         6..8    division word of the source file
         8..12   event count
        12..16   reserved, zero

record   0..8    microseconds since the start of the file
         8       event kind
         9       channel
        10..12   data bytes
        12..16   reserved, zero
```

Record `i` starts at `16 + 16 × i`, so a player can seek to any event directly.
"#]

mod document;
pub use document::*;

mod encoder;
pub use encoder::*;

mod error;
pub use error::*;

use crate::{
    UMicros,
    timeline::{EventKind, MergedEvent},
};

/// The first four bytes of every document
pub const MAGIC: [u8; 4] = *b"MBIN";

/// The only layout version this crate writes and reads
pub const FORMAT_VERSION: u16 = 1;

/// Size of the document header
pub const HEADER_LEN: usize = 16;

/// Size of one event record
pub const RECORD_LEN: usize = 16;

/// One event as stored in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRecord {
    micros: UMicros,
    kind: EventKind,
    channel: u8,
    data: [u8; 2],
}

impl EventRecord {
    /// Create a new record
    pub const fn new(micros: UMicros, kind: EventKind, channel: u8, data: [u8; 2]) -> Self {
        Self {
            micros,
            kind,
            channel,
            data,
        }
    }

    /// Time since the start of the file
    pub const fn micros(&self) -> UMicros {
        self.micros
    }

    /// The event kind
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// Zero-based channel
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// The two payload bytes
    pub const fn data(&self) -> [u8; 2] {
        self.data
    }

    /// The record's on-disk bytes
    pub fn to_bytes(&self) -> [u8; RECORD_LEN] {
        let mut bytes = [0; RECORD_LEN];
        bytes[0..8].copy_from_slice(&self.micros.us().to_le_bytes());
        bytes[8] = self.kind.into();
        bytes[9] = self.channel;
        bytes[10..12].copy_from_slice(&self.data);
        bytes
    }

    /// Decode the record at `index` from its bytes.
    ///
    /// Reserved bytes are not checked.
    pub fn from_bytes(index: usize, bytes: &[u8; RECORD_LEN]) -> Result<Self, DecodeError> {
        let [m0, m1, m2, m3, m4, m5, m6, m7, kind, channel, d0, d1, ..] = *bytes;
        let kind = EventKind::try_from(kind).map_err(|_| DecodeError::UnknownKind { index, kind })?;
        Ok(Self {
            micros: UMicros::new(u64::from_le_bytes([m0, m1, m2, m3, m4, m5, m6, m7])),
            kind,
            channel,
            data: [d0, d1],
        })
    }
}

impl From<&MergedEvent> for EventRecord {
    fn from(event: &MergedEvent) -> Self {
        Self::new(event.micros(), event.kind(), event.channel(), event.data())
    }
}

#[test]
fn record_layout() {
    use pretty_assertions::assert_eq;
    let record = EventRecord::new(UMicros::new(0x0102_0304), EventKind::PitchBend, 3, [0x00, 0x40]);
    let bytes = record.to_bytes();
    assert_eq!(
        bytes,
        [0x04, 0x03, 0x02, 0x01, 0, 0, 0, 0, 6, 3, 0x00, 0x40, 0, 0, 0, 0]
    );
    assert_eq!(EventRecord::from_bytes(0, &bytes), Ok(record));
}

#[test]
fn unknown_kind_is_rejected() {
    let mut bytes = [0; RECORD_LEN];
    bytes[8] = 9;
    assert_eq!(
        EventRecord::from_bytes(7, &bytes),
        Err(DecodeError::UnknownKind { index: 7, kind: 9 })
    );
}
