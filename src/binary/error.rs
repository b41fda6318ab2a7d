use thiserror::Error;

use crate::transcode::status;

/// A timeline that cannot be represented in a document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The header stores the event count in 32 bits
    #[error("{0} events do not fit the 32 bit event count")]
    EventCountOverflow(usize),
}

impl EncodeError {
    /// The boundary status code for this kind
    pub const fn status_code(&self) -> i32 {
        match self {
            Self::EventCountOverflow(_) => status::EVENT_COUNT_OVERFLOW,
        }
    }
}

/// Why a buffer is not a valid document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Fewer bytes than the fixed header
    #[error("Only {0} byte(s) available for the 16 byte header")]
    Truncated(usize),
    /// The buffer does not start with `MBIN`
    #[error("Expected MBIN, found {0:?}")]
    BadMagic([u8; 4]),
    /// A layout version this crate does not read
    #[error("Unsupported format version {0}")]
    UnsupportedVersion(u16),
    /// The buffer length disagrees with the declared event count
    #[error("Expected {expected} bytes for the declared events, found {actual}")]
    LengthMismatch {
        /// Header plus declared records
        expected: u64,
        /// Length of the buffer
        actual: usize,
    },
    /// A record whose kind byte names no [`EventKind`](crate::timeline::EventKind)
    #[error("Record {index} has unknown kind {kind}")]
    UnknownKind {
        /// Index of the record
        index: usize,
        /// The offending byte
        kind: u8,
    },
}
