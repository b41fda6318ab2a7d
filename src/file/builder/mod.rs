mod format;
pub use format::*;

pub mod chunk;

use super::{MidiFile, MidiFileHeader};
use crate::{
    FormatError, HeaderError,
    file::{
        FormatType,
        builder::chunk::{Chunk, RawTrackChunk, UnknownChunk},
    },
};

/// A builder used to create a new [`MidiFile`] from the chunks of a
/// [`Reader`](crate::reader::Reader).
#[derive(Default)]
pub struct MidiFileBuilder<'a> {
    header: Option<MidiFileHeader>,
    tracks: Vec<RawTrackChunk<'a>>,
    unknown_chunks: Vec<UnknownChunk<'a>>,
}

impl<'a> MidiFileBuilder<'a> {
    /// Handles a chunk of a midi file.
    pub fn handle_chunk(&mut self, chunk: Chunk<'a>) -> Result<(), FormatError> {
        match chunk {
            Chunk::Header(h) => {
                if self.header.is_some() {
                    return Err(HeaderError::Duplicate.into());
                }
                self.header = Some(h.into());
            }
            Chunk::Track(t) => self.tracks.push(t),
            Chunk::Unknown(u) => {
                tracing::debug!(
                    tag = %String::from_utf8_lossy(&u.tag()),
                    len = u.payload().len(),
                    "skipping unknown chunk"
                );
                self.unknown_chunks.push(u);
            }
        }
        Ok(())
    }

    /// Attempts to finish the midifile from the provided chunks.
    ///
    /// A file without tracks builds fine; the timeline merge is what rejects it.
    pub fn build(self) -> Result<MidiFile<'a>, FormatError> {
        let Some(header) = self.header else {
            return Err(HeaderError::Missing.into());
        };

        let declared = header.format().num_tracks() as usize;
        if declared != self.tracks.len() {
            tracing::warn!(
                declared,
                found = self.tracks.len(),
                "header track count does not match the number of track chunks"
            );
        }
        match header.format().format_type() {
            FormatType::SingleMultiChannel if self.tracks.len() > 1 => {
                tracing::warn!(
                    tracks = self.tracks.len(),
                    "format 0 file holds more than one track, merging all of them"
                );
            }
            FormatType::Unknown(format) => {
                tracing::warn!(format, "unknown file format, treating tracks as simultaneous");
            }
            _ => {}
        }

        Ok(MidiFile {
            header,
            tracks: self.tracks,
            skipped_chunks: self.unknown_chunks.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::Timing;
    use crate::reader::Reader;

    fn header_chunk() -> Chunk<'static> {
        let bytes: &'static [u8] = &[
            b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 1, 0x00, 0x60,
        ];
        Reader::from_byte_slice(bytes).read_chunk().unwrap().unwrap()
    }

    #[test]
    fn counts_unknown_chunks() {
        let mut builder = MidiFileBuilder::default();
        builder.handle_chunk(header_chunk()).unwrap();
        builder
            .handle_chunk(Chunk::Unknown(UnknownChunk::new(*b"XFIH", &[1, 2])))
            .unwrap();
        builder
            .handle_chunk(Chunk::Track(RawTrackChunk::new(&[], 0)))
            .unwrap();
        let file = builder.build().unwrap();
        assert_eq!(file.skipped_chunks(), 1);
        assert_eq!(file.track_chunks().len(), 1);
        assert_eq!(file.timing(), Timing::new_ticks_per_quarter_note(96));
    }

    #[test]
    fn rejects_second_header() {
        let mut builder = MidiFileBuilder::default();
        builder.handle_chunk(header_chunk()).unwrap();
        assert_eq!(
            builder.handle_chunk(header_chunk()),
            Err(FormatError::BadHeader(HeaderError::Duplicate))
        );
    }

    #[test]
    fn requires_a_header() {
        let builder = MidiFileBuilder::default();
        assert_eq!(
            builder.build().unwrap_err(),
            FormatError::BadHeader(HeaderError::Missing)
        );
    }
}
