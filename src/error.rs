use thiserror::Error;

use crate::transcode::status;

#[doc = r#"
The ways a MIDI file can be malformed.

Every kind is fatal to the transcode that hit it. Each maps onto exactly one
[`status`] code through [`FormatError::status_code`].
"#]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The container header is missing or malformed
    #[error("Bad header: {0}")]
    BadHeader(#[from] HeaderError),
    /// A variable-length quantity kept its continuation bit past the fourth byte
    #[error("Variable length quantity is longer than 4 bytes")]
    VarLengthOverflow,
    /// A chunk or event declared more bytes than remain
    #[error("Unexpected end of track: needed {needed} more byte(s), {remaining} remain")]
    UnexpectedEndOfTrack {
        /// Bytes the chunk or event declared
        needed: usize,
        /// Bytes actually left in the span
        remaining: usize,
    },
    /// The file contains no track chunks
    #[error("The file contains no tracks")]
    NoTracks,
    /// A status byte that cannot start an event in a track chunk
    #[error("Invalid status byte {0:#04X}")]
    InvalidStatus(u8),
}

impl FormatError {
    pub(crate) const fn eot(needed: usize, remaining: usize) -> Self {
        Self::UnexpectedEndOfTrack { needed, remaining }
    }

    /// The boundary status code for this kind
    pub const fn status_code(&self) -> i32 {
        match self {
            Self::BadHeader(_) => status::BAD_HEADER,
            Self::VarLengthOverflow => status::VAR_LENGTH_OVERFLOW,
            Self::UnexpectedEndOfTrack { .. } => status::UNEXPECTED_END_OF_TRACK,
            Self::NoTracks => status::NO_TRACKS,
            Self::InvalidStatus(_) => status::INVALID_STATUS,
        }
    }
}

/// Why a header chunk was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// The file does not start with `MThd`
    #[error("Expected MThd, found {0:?}")]
    MissingTag([u8; 4]),
    /// Fewer than the 14 bytes every header needs
    #[error("Only {0} byte(s) available for the 14 byte header")]
    Truncated(usize),
    /// The header chunk declares fewer than 6 payload bytes
    #[error("Header length {0} is shorter than 6")]
    Length(u32),
    /// No `MThd` chunk was seen at all
    #[error("Missing header chunk")]
    Missing,
    /// A second `MThd` chunk
    #[error("Duplicate header chunk")]
    Duplicate,
    /// Ticks per quarter note of zero
    #[error("Ticks per quarter note must be non-zero")]
    ZeroTicksPerQuarterNote,
    /// The SMPTE frame byte is not -24, -25, -29 or -30
    #[error("Invalid SMPTE frame rate {0}")]
    SmpteFrameRate(i8),
    /// SMPTE ticks per frame of zero
    #[error("SMPTE ticks per frame must be non-zero")]
    ZeroTicksPerFrame,
}

#[test]
fn status_codes_are_distinct() {
    use pretty_assertions::assert_eq;
    let kinds = [
        FormatError::BadHeader(HeaderError::Duplicate),
        FormatError::VarLengthOverflow,
        FormatError::eot(3, 1),
        FormatError::NoTracks,
        FormatError::InvalidStatus(0xF4),
    ];
    let codes: Vec<i32> = kinds.iter().map(FormatError::status_code).collect();
    assert_eq!(codes, [2, 3, 4, 5, 8]);
}
