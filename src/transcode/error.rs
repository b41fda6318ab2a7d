use std::{io, path::PathBuf};

use thiserror::Error;

use super::status;
use crate::{FormatError, binary::EncodeError, reader::ReaderError};

/// Why a transcode failed
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// The input file is missing or could not be read
    #[error("Cannot read {}: {source}", path.display())]
    InputUnreadable {
        /// The input path
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },
    /// The output could not be written and renamed into place
    #[error("Cannot write {}: {source}", path.display())]
    OutputUnwritable {
        /// The output path
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },
    /// The chunk structure or a track is malformed
    #[error(transparent)]
    Parse(#[from] ReaderError),
    /// The tracks could not be merged
    #[error(transparent)]
    Timeline(#[from] FormatError),
    /// The timeline does not fit the output layout
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl TranscodeError {
    /// The [`status`] code reported for this error
    pub fn status_code(&self) -> i32 {
        match self {
            Self::InputUnreadable { .. } => status::INPUT_UNREADABLE,
            Self::OutputUnwritable { .. } => status::OUTPUT_UNWRITABLE,
            Self::Parse(e) => e.error_kind().status_code(),
            Self::Timeline(e) => e.status_code(),
            Self::Encode(e) => e.status_code(),
        }
    }

    /// The format error behind a parse or merge failure
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            Self::Parse(e) => Some(e.error_kind()),
            Self::Timeline(e) => Some(e),
            _ => None,
        }
    }
}

#[test]
fn codes_are_distinct() {
    use crate::HeaderError;
    use pretty_assertions::assert_eq;

    let io = || io::Error::new(io::ErrorKind::NotFound, "gone");
    let errors = [
        TranscodeError::InputUnreadable {
            path: "in.mid".into(),
            source: io(),
        },
        TranscodeError::Parse(ReaderError::new(0, HeaderError::Missing.into())),
        TranscodeError::Parse(ReaderError::new(3, FormatError::VarLengthOverflow)),
        TranscodeError::Parse(ReaderError::oob(9, 4, 1)),
        TranscodeError::Timeline(FormatError::NoTracks),
        TranscodeError::Encode(EncodeError::EventCountOverflow(usize::MAX)),
        TranscodeError::OutputUnwritable {
            path: "out.mbin".into(),
            source: io(),
        },
        TranscodeError::Parse(ReaderError::new(22, FormatError::InvalidStatus(0xF4))),
    ];
    let codes: Vec<_> = errors.iter().map(TranscodeError::status_code).collect();
    assert_eq!(codes, [1, 2, 3, 4, 5, 6, 7, 8]);
}
