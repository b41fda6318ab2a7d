/// A chunk whose tag is neither `MThd` nor `MTrk`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChunk<'a> {
    tag: [u8; 4],
    payload: &'a [u8],
}

impl<'a> UnknownChunk<'a> {
    pub(crate) const fn new(tag: [u8; 4], payload: &'a [u8]) -> Self {
        Self { tag, payload }
    }

    /// The four byte identifier
    pub const fn tag(&self) -> [u8; 4] {
        self.tag
    }

    /// The chunk's bytes, excluding tag and length
    pub const fn payload(&self) -> &'a [u8] {
        self.payload
    }
}
