use crate::prelude::*;

#[doc = r#"
   Information about the format and timing of the MIDI file
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiFileHeader {
    format: RawFormat,
    timing: Timing,
}

impl MidiFileHeader {
    /// Create a new header from format and timing
    pub const fn new(format: RawFormat, timing: Timing) -> Self {
        Self { format, timing }
    }
    /// Get the format and declared track count
    pub const fn format(&self) -> &RawFormat {
        &self.format
    }
    /// Get the timing props
    pub const fn timing(&self) -> &Timing {
        &self.timing
    }
}

impl From<RawHeaderChunk> for MidiFileHeader {
    fn from(chunk: RawHeaderChunk) -> Self {
        Self::new(*chunk.format(), chunk.timing())
    }
}
