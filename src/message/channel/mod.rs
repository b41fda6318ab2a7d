#![doc = r#"
Contains all Channel Message types

# Hierarchy
```text
                |-----------------|
                | Channel Message |
                |-----------------|
                 /               \
|-----------------------|   |----------------------|
| Channel Voice Message |   | Channel Mode Message |
|-----------------------|   |----------------------|
```

Mode messages share the `0xBn` status with control changes (controllers
120-127), so both are parsed as [`VoiceEvent::ControlChange`].
"#]

use num_enum::{FromPrimitive, IntoPrimitive};

/// One of the sixteen MIDI channels.
///
/// The discriminant is the low nibble of the status byte, so `Channel::Ten`
/// (the General MIDI percussion channel) is `9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Channel {
    #[num_enum(default)]
    One = 0,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Eleven,
    Twelve,
    Thirteen,
    Fourteen,
    Fifteen,
    Sixteen,
}

impl Channel {
    /// The channel addressed by a channel status byte
    pub fn from_status(status: u8) -> Self {
        Self::from(status & 0x0F)
    }

    /// The zero-based channel index
    pub fn index(self) -> u8 {
        self.into()
    }

    /// True for channel 10, which General MIDI reserves for percussion
    pub fn is_percussion(self) -> bool {
        self == Channel::Ten
    }
}

#[doc = r#"
The body of a channel voice message.

Data bytes are kept as they appear in the file.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoiceEvent {
    /// `0x8n`
    NoteOff {
        /// Key number
        note: u8,
        /// Release velocity
        velocity: u8,
    },
    /// `0x9n`
    NoteOn {
        /// Key number
        note: u8,
        /// Attack velocity; zero is conventionally a note off
        velocity: u8,
    },
    /// `0xAn`, polyphonic key pressure
    Aftertouch {
        /// Key number
        note: u8,
        /// Pressure amount
        velocity: u8,
    },
    /// `0xBn`
    ControlChange {
        /// Controller number
        controller: u8,
        /// New value
        value: u8,
    },
    /// `0xCn`
    ProgramChange {
        /// Program (instrument) number
        program: u8,
    },
    /// `0xDn`
    ChannelPressureAfterTouch {
        /// Pressure amount
        velocity: u8,
    },
    /// `0xEn`
    PitchBend {
        /// Least significant 7 bits
        lsb: u8,
        /// Most significant 7 bits
        msb: u8,
    },
}

impl VoiceEvent {
    /// Data bytes following a channel status byte.
    ///
    /// Returns `None` for bytes that are not channel statuses (`0x80..=0xEF`).
    pub const fn data_len(status: u8) -> Option<usize> {
        match status >> 4 {
            0x8 | 0x9 | 0xA | 0xB | 0xE => Some(2),
            0xC | 0xD => Some(1),
            _ => None,
        }
    }

    /// Build the event for a channel status and its data bytes.
    ///
    /// One-byte messages ignore `data[1]`.
    pub(crate) const fn from_status(status: u8, data: [u8; 2]) -> Self {
        let [a, b] = data;
        match status >> 4 {
            0x8 => Self::NoteOff {
                note: a,
                velocity: b,
            },
            0x9 => Self::NoteOn {
                note: a,
                velocity: b,
            },
            0xA => Self::Aftertouch {
                note: a,
                velocity: b,
            },
            0xB => Self::ControlChange {
                controller: a,
                value: b,
            },
            0xC => Self::ProgramChange { program: a },
            0xD => Self::ChannelPressureAfterTouch { velocity: a },
            _ => Self::PitchBend { lsb: a, msb: b },
        }
    }

    /// The high nibble of the status byte
    pub const fn status_nibble(&self) -> u8 {
        match self {
            Self::NoteOff { .. } => 0x8,
            Self::NoteOn { .. } => 0x9,
            Self::Aftertouch { .. } => 0xA,
            Self::ControlChange { .. } => 0xB,
            Self::ProgramChange { .. } => 0xC,
            Self::ChannelPressureAfterTouch { .. } => 0xD,
            Self::PitchBend { .. } => 0xE,
        }
    }

    /// The data bytes, zero padded to two
    pub const fn data(&self) -> [u8; 2] {
        match *self {
            Self::NoteOff { note, velocity }
            | Self::NoteOn { note, velocity }
            | Self::Aftertouch { note, velocity } => [note, velocity],
            Self::ControlChange { controller, value } => [controller, value],
            Self::ProgramChange { program } => [program, 0],
            Self::ChannelPressureAfterTouch { velocity } => [velocity, 0],
            Self::PitchBend { lsb, msb } => [lsb, msb],
        }
    }
}

/// A voice event addressed to a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelVoiceMessage {
    channel: Channel,
    event: VoiceEvent,
}

impl ChannelVoiceMessage {
    /// Create a new channel voice message
    pub const fn new(channel: Channel, event: VoiceEvent) -> Self {
        Self { channel, event }
    }

    /// Decode from a channel status byte (`0x80..=0xEF`) and its data.
    ///
    /// The high nibble picks the event; the low nibble is the channel.
    pub fn from_status(status: u8, data: [u8; 2]) -> Self {
        Self::new(
            Channel::from_status(status),
            VoiceEvent::from_status(status, data),
        )
    }

    /// The addressed channel
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// The event body
    pub const fn event(&self) -> &VoiceEvent {
        &self.event
    }

    /// The full status byte
    pub fn status(&self) -> u8 {
        (self.event.status_nibble() << 4) | self.channel.index()
    }
}

#[test]
fn status_round_trips_through_message() {
    use pretty_assertions::assert_eq;
    for status in 0x80..=0xEF_u8 {
        let msg = ChannelVoiceMessage::from_status(status, [0x3C, 0x40]);
        assert_eq!(msg.status(), status);
    }
}

#[test]
fn percussion_channel() {
    assert!(Channel::from_status(0x99).is_percussion());
    assert!(!Channel::from_status(0x98).is_percussion());
}
