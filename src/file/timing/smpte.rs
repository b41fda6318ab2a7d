#![doc = r#"
SMPTE frame rates

A file whose division word has its top bit set counts time in frames instead of
quarter notes: the high byte is the negated frame rate and the low byte the ticks
per frame. Ticks then have a fixed length and tempo events no longer move
timestamps.
"#]

/// One of the four frame rates a division word can name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// 24 fps, film
    TwentyFour,
    /// 25 fps, PAL
    TwentyFive,
    /// 29.97 fps, NTSC drop frame
    TwentyNine,
    /// 30 fps
    Thirty,
}

impl SmpteFps {
    /// The nominal frame rate used for timing; drop frame counts as 30.
    ///
    /// # Example
    /// ```rust
    /// # use midibin::prelude::*;
    /// assert_eq!(SmpteFps::TwentyNine.as_division(), 30); // Not 29!
    /// ```
    pub const fn as_division(&self) -> u8 {
        match self {
            Self::TwentyFour => 24,
            Self::TwentyFive => 25,
            Self::TwentyNine => 30,
            Self::Thirty => 30,
        }
    }
    /// The signed frame byte stored in the high half of the header's division word.
    pub const fn as_header_byte(&self) -> i8 {
        match self {
            Self::TwentyFour => -24,
            Self::TwentyFive => -25,
            Self::TwentyNine => -29,
            Self::Thirty => -30,
        }
    }
}
