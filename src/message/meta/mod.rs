#![doc = r#"
Meta events found in track chunks

Only `Set Tempo` changes how later events are timed. Every other meta type,
`End of Track` included, is carried through as its type byte and payload.
"#]

mod tempo;
pub use tempo::*;

/// Meta type of the `Set Tempo` event
pub const META_TEMPO: u8 = 0x51;
/// Meta type of the `End of Track` event
pub const META_END_OF_TRACK: u8 = 0x2F;

#[doc = r#"
A meta event: `FF <type> <len> <payload>`.

Only the tempo is interpreted; every other type is carried as raw bytes.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaMessage<'a> {
    kind: u8,
    data: &'a [u8],
}

impl<'a> MetaMessage<'a> {
    /// Create a meta message from its type byte and payload
    pub const fn new(kind: u8, data: &'a [u8]) -> Self {
        Self { kind, data }
    }

    /// The meta type byte
    pub const fn kind(&self) -> u8 {
        self.kind
    }

    /// The payload, excluding the length prefix
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// The tempo, if this is a well-formed `Set Tempo` event
    pub fn tempo(&self) -> Option<Tempo> {
        if self.kind != META_TEMPO {
            return None;
        }
        Tempo::from_bytes(self.data)
    }

    /// True for the `End of Track` marker
    pub const fn is_end_of_track(&self) -> bool {
        self.kind == META_END_OF_TRACK
    }
}
