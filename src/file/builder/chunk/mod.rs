#![doc = r#"
The chunks a MIDI file is made of

Every chunk is a 4 byte ASCII tag, a 32 bit big-endian length and that many
payload bytes:

```text
MThd  6   format, track count, division      -> RawHeaderChunk
MTrk  n   delta-timed events                  -> RawTrackChunk
????  n   anything else (XF, vendor data, ..) -> UnknownChunk
```

The header must come first and appear once. Its payload may be longer than
6 bytes; the excess is skipped. Track payloads are borrowed and only decoded when
[`RawTrackChunk::events`] is iterated. Unknown chunks are skipped and counted.
"#]

mod unknown_chunk;
pub use unknown_chunk::*;

mod header;
pub use header::*;

mod track;
pub use track::*;

/// One chunk of a MIDI file, as yielded by [`Reader::read_chunk`](crate::reader::Reader::read_chunk).
#[derive(Debug, Clone, PartialEq)]
pub enum Chunk<'a> {
    /// The `MThd` chunk
    Header(RawHeaderChunk),
    /// An `MTrk` chunk
    Track(RawTrackChunk<'a>),
    /// Any other tag
    Unknown(UnknownChunk<'a>),
}
