#![doc = r#"
The messages a track chunk can carry

```text
status 0x80..=0xEF  channel voice (running status allowed)
status 0xF0, 0xF7   system exclusive, length prefixed
status 0xFF         meta event: type, length, payload
```
"#]

pub mod channel;
pub mod meta;

use channel::ChannelVoiceMessage;
use meta::{MetaMessage, Tempo};

/// A message in a track, borrowing any payload from the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackMessage<'a> {
    /// A note, controller, program, pressure or pitch bend message
    ChannelVoice(ChannelVoiceMessage),
    /// A meta event
    Meta(MetaMessage<'a>),
    /// A system exclusive message or escape sequence
    SystemExclusive(SystemExclusiveMessage<'a>),
}

impl TrackMessage<'_> {
    /// The tempo carried by a well-formed `Set Tempo` meta event
    pub fn tempo(&self) -> Option<Tempo> {
        match self {
            Self::Meta(meta) => meta.tempo(),
            _ => None,
        }
    }
}

/// A length-prefixed system exclusive packet (`0xF0`) or escape (`0xF7`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemExclusiveMessage<'a> {
    status: u8,
    data: &'a [u8],
}

impl<'a> SystemExclusiveMessage<'a> {
    /// Create a new message from its status byte and payload
    pub const fn new(status: u8, data: &'a [u8]) -> Self {
        Self { status, data }
    }

    /// `0xF0` or `0xF7`
    pub const fn status(&self) -> u8 {
        self.status
    }

    /// The payload, excluding the length prefix
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }
}
