use crate::FormatError;
use thiserror::Error;

#[doc = r#"
A [`FormatError`] together with the byte offset it was detected at
"#]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Reading at Position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: FormatError,
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, kind: FormatError) -> Self {
        Self { position, kind }
    }

    /// True if the read ran off the end of a track or chunk
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self.kind, FormatError::UnexpectedEndOfTrack { .. })
    }

    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &FormatError {
        &self.kind
    }

    /// Consumes the error, returning its kind.
    pub fn into_kind(self) -> FormatError {
        self.kind
    }

    /// Returns the position where the read error occurred.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Shift the position by `base`.
    ///
    /// Track payloads are parsed with positions relative to the payload;
    /// this maps them back onto the file.
    pub(crate) const fn offset_by(self, base: usize) -> Self {
        Self {
            position: self.position + base,
            kind: self.kind,
        }
    }

    /// Create a new out of bounds error
    pub const fn oob(position: usize, needed: usize, remaining: usize) -> Self {
        Self {
            position,
            kind: FormatError::eot(needed, remaining),
        }
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;
