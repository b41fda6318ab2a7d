mod smpte;
pub use smpte::*;

use crate::HeaderError;

/// The header timing type.
///
/// This is either the number of ticks per quarter note or
/// the alternative SMPTE format. See the [`RawHeaderChunk`](crate::file::builder::chunk::RawHeaderChunk) docs for more information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timing {
    /// The midi file's delta times are defined using a tick rate per quarter note
    TicksPerQuarterNote(TicksPerQuarterNote),

    /// The midi file's delta times are defined using an SMPTE and MIDI Time Code
    Smpte(SmpteHeader),
}

impl Timing {
    /// The tickrate per quarter note defines what a "quarter note" means.
    ///
    /// The leading bit of the u16 is disregarded, so 1-32767
    pub const fn new_ticks_per_quarter_note(tpqn: u16) -> Self {
        let msb = (tpqn >> 8) as u8;
        let lsb = (tpqn & 0x00FF) as u8;
        Self::TicksPerQuarterNote(TicksPerQuarterNote { inner: [msb, lsb] })
    }

    /// Define the timing in terms of fps and ticks per frame
    pub const fn new_smpte(fps: SmpteFps, ticks_per_frame: u8) -> Self {
        Self::Smpte(SmpteHeader {
            fps,
            ticks_per_frame,
        })
    }

    /// Decode the header's division word.
    ///
    /// Rejects divisions no timestamp could be derived from: zero ticks per
    /// quarter note, an unknown SMPTE frame rate, or zero ticks per frame.
    pub fn from_division(bytes: [u8; 2]) -> Result<Self, HeaderError> {
        match bytes[0] >> 7 {
            0 => {
                let tpqn = TicksPerQuarterNote { inner: bytes };
                if tpqn.ticks_per_quarter_note() == 0 {
                    return Err(HeaderError::ZeroTicksPerQuarterNote);
                }
                Ok(Timing::TicksPerQuarterNote(tpqn))
            }
            _ => SmpteHeader::new(bytes).map(Timing::Smpte),
        }
    }

    /// The division word as stored in the header
    pub const fn division(&self) -> u16 {
        match self {
            Self::TicksPerQuarterNote(t) => u16::from_be_bytes(t.inner),
            Self::Smpte(s) => u16::from_be_bytes([s.fps.as_header_byte() as u8, s.ticks_per_frame]),
        }
    }

    /// Returns Some if the midi timing is defined
    /// as ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(t) => Some(t.ticks_per_quarter_note()),
            _ => None,
        }
    }
}

/// A representation of the `tpqn` timing for a MIDI file
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TicksPerQuarterNote {
    pub(crate) inner: [u8; 2],
}
impl TicksPerQuarterNote {
    /// Returns the ticks per quarter note for the file.
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        let v = u16::from_be_bytes(self.inner);
        v & 0x7FFF
    }
}

/// A representation of the `smpte` timing for a MIDI file
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteHeader {
    pub(crate) fps: SmpteFps,
    pub(crate) ticks_per_frame: u8,
}

impl SmpteHeader {
    fn new(bytes: [u8; 2]) -> Result<Self, HeaderError> {
        //first byte is known to be 1 when calling this
        //Bits 14 thru 8 contain one of the four values -24, -25, -29, or -30
        let byte = bytes[0] as i8;

        let fps = match byte {
            -24 => SmpteFps::TwentyFour,
            -25 => SmpteFps::TwentyFive,
            -29 => {
                //drop frame (29.997)
                SmpteFps::TwentyNine
            }
            -30 => SmpteFps::Thirty,
            _ => return Err(HeaderError::SmpteFrameRate(byte)),
        };
        if bytes[1] == 0 {
            return Err(HeaderError::ZeroTicksPerFrame);
        }
        Ok(Self {
            fps,
            ticks_per_frame: bytes[1],
        })
    }

    /// Returns the frames per second
    pub const fn fps(&self) -> SmpteFps {
        self.fps
    }

    /// Returns the ticks per frame
    pub const fn ticks_per_frame(&self) -> u8 {
        self.ticks_per_frame
    }

    /// Ticks in one second of wall-clock time.
    ///
    /// Drop-frame 29.97 uses its nominal division of 30.
    pub const fn ticks_per_second(&self) -> u32 {
        self.fps.as_division() as u32 * self.ticks_per_frame as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn metrical_division() {
        let timing = Timing::from_division([0x01, 0xE0]).unwrap();
        assert_eq!(timing.ticks_per_quarter_note(), Some(480));
        assert_eq!(timing.division(), 480);
        assert_eq!(timing, Timing::new_ticks_per_quarter_note(480));
    }

    #[test]
    fn smpte_division() {
        // -25 fps, 40 ticks per frame
        let timing = Timing::from_division([0xE7, 0x28]).unwrap();
        let Timing::Smpte(smpte) = timing else {
            panic!("expected smpte timing");
        };
        assert_eq!(smpte.fps(), SmpteFps::TwentyFive);
        assert_eq!(smpte.ticks_per_second(), 1_000);
        assert_eq!(timing.division(), 0xE728);
        assert_eq!(timing.ticks_per_quarter_note(), None);
    }

    #[test]
    fn drop_frame_uses_nominal_rate() {
        let timing = Timing::new_smpte(SmpteFps::TwentyNine, 10);
        let Timing::Smpte(smpte) = timing else {
            panic!("expected smpte timing");
        };
        assert_eq!(smpte.ticks_per_second(), 300);
        assert_eq!(timing.division(), 0xE30A);
    }

    #[test]
    fn rejects_unusable_divisions() {
        assert_eq!(
            Timing::from_division([0, 0]),
            Err(HeaderError::ZeroTicksPerQuarterNote)
        );
        assert_eq!(
            Timing::from_division([0xE0, 0x04]),
            Err(HeaderError::SmpteFrameRate(-32))
        );
        assert_eq!(
            Timing::from_division([0xE8, 0x00]),
            Err(HeaderError::ZeroTicksPerFrame)
        );
    }
}
