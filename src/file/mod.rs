#![doc = r#"
Rusty representation of a [`MidiFile`]
"#]

/// Contains the [`MidiFileBuilder`](builder::MidiFileBuilder) and the
/// chunk types it consumes.
pub mod builder;

mod format;
pub use format::*;

mod header;
pub use header::*;

mod track;
pub use track::*;

mod timing;
pub use timing::*;

use crate::{
    file::builder::{MidiFileBuilder, chunk::RawTrackChunk},
    reader::{ReadResult, Reader, ReaderError},
};

#[doc = r#"
A MIDI file split into its chunks.

Parsing a `MidiFile` only walks the chunk structure. Track payloads stay
borrowed and undecoded until [`MidiFile::parse_tracks`] or
[`RawTrackChunk::events`] is called.

# Example
```rust
# use midibin::prelude::*;
let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0,
    b'M', b'T', b'r', b'k', 0, 0, 0, 8,
    0x00, 0x90, 60, 100,
    0x00, 0xFF, 0x2F, 0x00,
];
let file = MidiFile::parse(&bytes).unwrap();
assert_eq!(file.format_type(), FormatType::SingleMultiChannel);
assert_eq!(file.timing().ticks_per_quarter_note(), Some(480));

let tracks = file.parse_tracks().unwrap();
assert_eq!(tracks[0].events().len(), 2);
```
"#]
#[derive(Clone, Debug, PartialEq)]
pub struct MidiFile<'a> {
    header: MidiFileHeader,
    tracks: Vec<RawTrackChunk<'a>>,
    skipped_chunks: usize,
}

impl<'a> MidiFile<'a> {
    /// Walk the chunks of a set of bytes
    pub fn parse(bytes: &'a [u8]) -> ReadResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        let mut builder = MidiFileBuilder::default();

        while let Some(chunk) = reader.read_chunk()? {
            builder
                .handle_chunk(chunk)
                .map_err(|k| ReaderError::new(reader.buffer_position(), k))?;
        }

        builder
            .build()
            .map_err(|k| ReaderError::new(reader.buffer_position(), k))
    }

    /// Returns header info
    pub fn header(&self) -> &MidiFileHeader {
        &self.header
    }

    /// Returns timing info
    pub fn timing(&self) -> Timing {
        *self.header.timing()
    }

    /// Returns the format type for the file.
    pub fn format_type(&self) -> FormatType {
        self.header.format().format_type()
    }

    /// The undecoded track chunks, in file order
    pub fn track_chunks(&self) -> &[RawTrackChunk<'a>] {
        &self.tracks
    }

    /// How many chunks with an unrecognized tag were skipped
    pub fn skipped_chunks(&self) -> usize {
        self.skipped_chunks
    }

    /// Decode every track, stopping at the first malformed one
    pub fn parse_tracks(&self) -> ReadResult<Vec<Track<'a>>> {
        self.tracks
            .iter()
            .map(|chunk| chunk.events().collect::<ReadResult<Vec<_>>>().map(Track::new))
            .collect()
    }
}
