use crate::{HeaderError, file::builder::RawFormat, prelude::Timing};

/// The decoded payload of the `MThd` chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHeaderChunk {
    format: RawFormat,
    timing: Timing,
}

impl RawHeaderChunk {
    /// Decode the first six payload bytes.
    ///
    /// `payload` must hold at least six bytes; the reader guarantees this.
    pub(crate) fn parse(payload: &[u8]) -> Result<Self, HeaderError> {
        let &[f0, f1, n0, n1, d0, d1, ..] = payload else {
            return Err(HeaderError::Length(payload.len() as u32));
        };
        let format = RawFormat::from_bytes(u16::from_be_bytes([f0, f1]), [n0, n1]);
        let timing = Timing::from_division([d0, d1])?;
        Ok(Self { format, timing })
    }

    /// The file format and declared track count
    pub const fn format(&self) -> &RawFormat {
        &self.format
    }

    /// How ticks map onto time
    pub const fn timing(&self) -> Timing {
        self.timing
    }
}
