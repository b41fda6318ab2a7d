//! Integer results of [`midi_binarize`](crate::midi_binarize).
//!
//! Every failure category has its own code; none of them is reused.

/// The output file was written
pub const SUCCESS: i32 = 0;
/// The input file is missing or could not be read
pub const INPUT_UNREADABLE: i32 = 1;
/// See [`FormatError::BadHeader`](crate::FormatError::BadHeader)
pub const BAD_HEADER: i32 = 2;
/// See [`FormatError::VarLengthOverflow`](crate::FormatError::VarLengthOverflow)
pub const VAR_LENGTH_OVERFLOW: i32 = 3;
/// See [`FormatError::UnexpectedEndOfTrack`](crate::FormatError::UnexpectedEndOfTrack)
pub const UNEXPECTED_END_OF_TRACK: i32 = 4;
/// See [`FormatError::NoTracks`](crate::FormatError::NoTracks)
pub const NO_TRACKS: i32 = 5;
/// See [`EncodeError::EventCountOverflow`](crate::binary::EncodeError::EventCountOverflow)
pub const EVENT_COUNT_OVERFLOW: i32 = 6;
/// The output file could not be created, written or renamed into place
pub const OUTPUT_UNWRITABLE: i32 = 7;
/// See [`FormatError::InvalidStatus`](crate::FormatError::InvalidStatus)
pub const INVALID_STATUS: i32 = 8;
