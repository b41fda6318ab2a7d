use crate::file::TrackEventIter;

/// The undecoded payload of an `MTrk` chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTrackChunk<'a> {
    payload: &'a [u8],
    offset: usize,
}

impl<'a> RawTrackChunk<'a> {
    pub(crate) const fn new(payload: &'a [u8], offset: usize) -> Self {
        Self { payload, offset }
    }

    /// The track's event bytes
    pub const fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Where the payload starts within the file
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Lazily parse the payload into events.
    ///
    /// Error positions are reported relative to the whole file.
    pub fn events(&self) -> TrackEventIter<'a> {
        TrackEventIter::with_offset(self.payload, self.offset)
    }
}
