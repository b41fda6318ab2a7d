#![doc = r#"
Cursor over an immutable MIDI byte buffer

A [`Reader`] is nothing more than the pair `(bytes, position)`. It never copies or
mutates the buffer, so several readers may walk the same file (one for the chunk
structure, one per track payload) at once.

The chunk level entry point is [`Reader::read_chunk`]:

```rust
# use midibin::prelude::*;
let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 1, 0x00, 0x60,
    b'M', b'T', b'r', b'k', 0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00,
];
let mut reader = Reader::from_byte_slice(&bytes);
assert!(matches!(reader.read_chunk().unwrap(), Some(Chunk::Header(_))));
assert!(matches!(reader.read_chunk().unwrap(), Some(Chunk::Track(_))));
assert!(reader.read_chunk().unwrap().is_none());
```
"#]

mod error;
pub use error::*;

mod varlen;
pub use varlen::*;

use crate::{
    FormatError, HeaderError,
    file::builder::chunk::{Chunk, RawHeaderChunk, RawTrackChunk, UnknownChunk},
};

/// Size of the `MThd` chunk every file must begin with, tag and length included.
pub const HEADER_CHUNK_LEN: usize = 14;

/// Size of a chunk's tag and length fields.
pub const CHUNK_PREAMBLE_LEN: usize = 8;

/// A cursor into a borrowed byte buffer.
#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader positioned at the start of `bytes`
    pub const fn from_byte_slice(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// The offset of the next byte to be read
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Bytes left after the cursor
    pub const fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// True once every byte has been consumed
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Look at the next byte without consuming it
    pub fn peek_u8(&self) -> Option<u8> {
        self.bytes.get(self.position).copied()
    }

    /// Consume one byte
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let byte = self
            .peek_u8()
            .ok_or(ReaderError::oob(self.position, 1, 0))?;
        self.position += 1;
        Ok(byte)
    }

    /// Consume `len` bytes, returning them as a slice of the original buffer
    pub fn read_slice(&mut self, len: usize) -> ReadResult<&'a [u8]> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(ReaderError::oob(self.position, len, remaining));
        }
        let slice = &self.bytes[self.position..self.position + len];
        self.position += len;
        Ok(slice)
    }

    /// Consume exactly `N` bytes
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let slice = self.read_slice(N)?;
        let mut out = [0; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Consume a variable-length quantity
    pub fn read_varlen(&mut self) -> ReadResult<u32> {
        let (value, consumed) = decode_varlen(self.bytes, self.position)?;
        self.position += consumed as usize;
        Ok(value)
    }

    /// Consume the next chunk.
    ///
    /// The first call must find the `MThd` header chunk. Afterwards every call
    /// returns the next chunk in file order, or `None` once the buffer is
    /// exhausted. Fewer than [`CHUNK_PREAMBLE_LEN`] trailing bytes count as
    /// exhausted. The cursor always moves past the complete chunk, whether or not
    /// its tag is understood.
    pub fn read_chunk(&mut self) -> ReadResult<Option<Chunk<'a>>> {
        if self.position == 0 {
            return self.read_header_chunk().map(|h| Some(Chunk::Header(h)));
        }
        if self.is_empty() {
            return Ok(None);
        }
        if self.remaining() < CHUNK_PREAMBLE_LEN {
            tracing::warn!(
                offset = self.position,
                bytes = self.remaining(),
                "ignoring trailing bytes too short for a chunk"
            );
            self.position = self.bytes.len();
            return Ok(None);
        }

        let tag: [u8; 4] = self.read_exact_size()?;
        let len = u32::from_be_bytes(self.read_exact_size()?);
        let offset = self.position;
        let payload = self.read_slice(len as usize)?;

        let chunk = match &tag {
            b"MTrk" => Chunk::Track(RawTrackChunk::new(payload, offset)),
            b"MThd" => {
                return Err(ReaderError::new(
                    offset - CHUNK_PREAMBLE_LEN,
                    HeaderError::Duplicate.into(),
                ));
            }
            _ => Chunk::Unknown(UnknownChunk::new(tag, payload)),
        };
        Ok(Some(chunk))
    }

    fn read_header_chunk(&mut self) -> ReadResult<RawHeaderChunk> {
        let bad = |position, e: HeaderError| ReaderError::new(position, FormatError::BadHeader(e));

        if let &[t0, t1, t2, t3, ..] = self.bytes {
            let tag = [t0, t1, t2, t3];
            if &tag != b"MThd" {
                return Err(bad(0, HeaderError::MissingTag(tag)));
            }
        }
        if self.bytes.len() < HEADER_CHUNK_LEN {
            return Err(bad(0, HeaderError::Truncated(self.bytes.len())));
        }

        self.position = 4;
        let len = u32::from_be_bytes(self.read_exact_size()?);
        if len < 6 {
            return Err(bad(4, HeaderError::Length(len)));
        }
        let payload = self
            .read_slice(len as usize)
            .map_err(|_| bad(4, HeaderError::Truncated(self.bytes.len())))?;

        RawHeaderChunk::parse(payload).map_err(|e| bad(CHUNK_PREAMBLE_LEN, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: [u8; 14] = [
        b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 2, 0x01, 0xE0,
    ];

    fn with_header(rest: &[u8]) -> Vec<u8> {
        let mut bytes = HEADER.to_vec();
        bytes.extend_from_slice(rest);
        bytes
    }

    #[test]
    fn walks_chunks_in_file_order() {
        let bytes = with_header(&[
            b'M', b'T', b'r', b'k', 0, 0, 0, 1, 0xAA, //
            b'X', b'Y', b'Z', b'W', 0, 0, 0, 2, 0xBB, 0xCC, //
            b'M', b'T', b'r', b'k', 0, 0, 0, 0,
        ]);
        let mut reader = Reader::from_byte_slice(&bytes);

        let Some(Chunk::Header(header)) = reader.read_chunk().unwrap() else {
            panic!("expected header");
        };
        assert_eq!(header.timing().ticks_per_quarter_note(), Some(480));
        assert_eq!(reader.buffer_position(), 14);

        let Some(Chunk::Track(track)) = reader.read_chunk().unwrap() else {
            panic!("expected track");
        };
        assert_eq!(track.payload(), &[0xAA]);
        assert_eq!(track.offset(), 22);

        let Some(Chunk::Unknown(unknown)) = reader.read_chunk().unwrap() else {
            panic!("expected unknown chunk");
        };
        assert_eq!(unknown.tag(), *b"XYZW");
        assert_eq!(unknown.payload(), &[0xBB, 0xCC]);

        let Some(Chunk::Track(empty)) = reader.read_chunk().unwrap() else {
            panic!("expected track");
        };
        assert!(empty.payload().is_empty());
        assert!(reader.read_chunk().unwrap().is_none());
    }

    #[test]
    fn rejects_missing_header_tag() {
        let mut bytes = HEADER.to_vec();
        bytes[..4].copy_from_slice(b"RIFF");
        let err = Reader::from_byte_slice(&bytes).read_chunk().unwrap_err();
        assert_eq!(
            err.error_kind(),
            &FormatError::BadHeader(HeaderError::MissingTag(*b"RIFF"))
        );
    }

    #[test]
    fn rejects_short_header() {
        let err = Reader::from_byte_slice(&HEADER[..10])
            .read_chunk()
            .unwrap_err();
        assert_eq!(
            err.error_kind(),
            &FormatError::BadHeader(HeaderError::Truncated(10))
        );
        let err = Reader::from_byte_slice(b"MT").read_chunk().unwrap_err();
        assert_eq!(
            err.error_kind(),
            &FormatError::BadHeader(HeaderError::Truncated(2))
        );
    }

    #[test]
    fn skips_extended_header_payload() {
        let bytes = [
            b'M', b'T', b'h', b'd', 0, 0, 0, 8, 0, 0, 0, 1, 0x00, 0x60, 0xEE, 0xEE, //
            b'M', b'T', b'r', b'k', 0, 0, 0, 0,
        ];
        let mut reader = Reader::from_byte_slice(&bytes);
        reader.read_chunk().unwrap();
        assert_eq!(reader.buffer_position(), 16);
        assert!(matches!(reader.read_chunk().unwrap(), Some(Chunk::Track(_))));
    }

    #[test]
    fn declared_length_past_end_is_end_of_track() {
        let bytes = with_header(&[b'M', b'T', b'r', b'k', 0, 0, 0, 9, 0x00, 0x90]);
        let mut reader = Reader::from_byte_slice(&bytes);
        reader.read_chunk().unwrap();
        let err = reader.read_chunk().unwrap_err();
        assert_eq!(err.error_kind(), &FormatError::eot(9, 2));
    }

    #[test]
    fn trailing_fragment_is_end_of_input() {
        let bytes = with_header(&[b'M', b'T', b'r', b'k', 0, 0, 0, 0, 0, 0]);
        let mut reader = Reader::from_byte_slice(&bytes);
        reader.read_chunk().unwrap();
        assert!(matches!(reader.read_chunk().unwrap(), Some(Chunk::Track(_))));
        assert_eq!(reader.read_chunk().unwrap(), None);
        assert!(reader.is_empty());

        let bytes = with_header(&[b'M', b'T', b'r', b'k', 0, 0, 0]);
        let mut reader = Reader::from_byte_slice(&bytes);
        reader.read_chunk().unwrap();
        assert_eq!(reader.read_chunk().unwrap(), None);
    }

    #[test]
    fn duplicate_header_is_rejected() {
        let bytes = with_header(&HEADER);
        let mut reader = Reader::from_byte_slice(&bytes);
        reader.read_chunk().unwrap();
        let err = reader.read_chunk().unwrap_err();
        assert_eq!(
            err.error_kind(),
            &FormatError::BadHeader(HeaderError::Duplicate)
        );
        assert_eq!(err.position(), 14);
    }
}
