use crate::{
    FormatError,
    message::{
        SystemExclusiveMessage, TrackMessage,
        channel::{ChannelVoiceMessage, VoiceEvent},
        meta::{META_TEMPO, MetaMessage},
    },
    reader::{ReadResult, Reader, ReaderError},
};

/// An event in a track, with its delta time in ticks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEvent<'a> {
    delta_ticks: u32,
    message: TrackMessage<'a>,
}

impl<'a> TrackEvent<'a> {
    /// Create a new track event
    pub const fn new(delta_ticks: u32, message: TrackMessage<'a>) -> Self {
        Self {
            delta_ticks,
            message,
        }
    }

    /// Ticks since the previous event of the same track
    pub const fn delta_ticks(&self) -> u32 {
        self.delta_ticks
    }

    /// The message
    pub const fn message(&self) -> &TrackMessage<'a> {
        &self.message
    }

    /// Consumes the event, returning its message
    pub fn into_message(self) -> TrackMessage<'a> {
        self.message
    }
}

/// A fully parsed track
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Track<'a> {
    pub(crate) events: Vec<TrackEvent<'a>>,
}

impl<'a> Track<'a> {
    /// Create a track from its events, in file order
    pub fn new(events: Vec<TrackEvent<'a>>) -> Self {
        Self { events }
    }

    /// Parse every event of a track payload
    pub fn parse(payload: &'a [u8]) -> ReadResult<Self> {
        TrackEventIter::new(payload).collect::<ReadResult<_>>().map(Self::new)
    }

    /// The events, in file order
    pub fn events(&self) -> &[TrackEvent<'a>] {
        &self.events
    }

    /// Consumes the track, returning its events
    pub fn into_events(self) -> Vec<TrackEvent<'a>> {
        self.events
    }

    /// The sum of every delta time
    pub fn duration_ticks(&self) -> u64 {
        self.events
            .iter()
            .map(|e| u64::from(e.delta_ticks()))
            .sum()
    }
}

#[doc = r#"
A single forward pass over a track payload.

Yields one [`TrackEvent`] per event in file order. The first error ends the
iteration: a malformed event leaves the cursor at an unknown place, so nothing
after it can be trusted.

Running status is tracked here and nowhere else, so every track starts fresh.

# Example
```rust
# use midibin::prelude::*;
// note on, then a note off relying on running status (velocity 0)
let payload = [0x00, 0x90, 60, 100, 0x60, 60, 0];
let events = TrackEventIter::new(&payload)
    .collect::<Result<Vec<_>, _>>()
    .unwrap();
assert_eq!(events.len(), 2);
assert_eq!(events[1].delta_ticks(), 96);
```
"#]
pub struct TrackEventIter<'a> {
    reader: Reader<'a>,
    offset: usize,
    running_status: Option<u8>,
    finished: bool,
}

impl<'a> TrackEventIter<'a> {
    /// Iterate over the events of `payload`
    pub fn new(payload: &'a [u8]) -> Self {
        Self::with_offset(payload, 0)
    }

    /// As [`TrackEventIter::new`], reporting error positions shifted by `offset`
    pub fn with_offset(payload: &'a [u8], offset: usize) -> Self {
        Self {
            reader: Reader::from_byte_slice(payload),
            offset,
            running_status: None,
            finished: false,
        }
    }

    fn read_event(&mut self) -> ReadResult<TrackEvent<'a>> {
        let delta_ticks = self.reader.read_varlen()?;

        let position = self.reader.buffer_position();
        let first = self.reader.read_u8()?;

        let message = match first {
            0xFF => {
                let kind = self.reader.read_u8()?;
                let len = self.reader.read_varlen()?;
                let data = self.reader.read_slice(len as usize)?;
                if kind == META_TEMPO && data.len() != 3 {
                    tracing::warn!(
                        position = position + self.offset,
                        len = data.len(),
                        "tempo meta event without a 3 byte payload, keeping it as plain meta"
                    );
                }
                TrackMessage::Meta(MetaMessage::new(kind, data))
            }
            0xF0 | 0xF7 => {
                let len = self.reader.read_varlen()?;
                let data = self.reader.read_slice(len as usize)?;
                TrackMessage::SystemExclusive(SystemExclusiveMessage::new(first, data))
            }
            0x80..=0xEF => {
                self.running_status = Some(first);
                let data = self.read_data(first, None)?;
                TrackMessage::ChannelVoice(ChannelVoiceMessage::from_status(first, data))
            }
            0x00..=0x7F => {
                let Some(status) = self.running_status else {
                    return Err(ReaderError::new(position, FormatError::InvalidStatus(first)));
                };
                let data = self.read_data(status, Some(first))?;
                TrackMessage::ChannelVoice(ChannelVoiceMessage::from_status(status, data))
            }
            _ => return Err(ReaderError::new(position, FormatError::InvalidStatus(first))),
        };

        Ok(TrackEvent::new(delta_ticks, message))
    }

    /// Read the data bytes of a channel message.
    ///
    /// `first` is the byte already consumed when running status applies.
    fn read_data(&mut self, status: u8, first: Option<u8>) -> ReadResult<[u8; 2]> {
        let len = VoiceEvent::data_len(status).unwrap_or(0);
        let mut data = [0; 2];
        let start = match first {
            Some(byte) => {
                data[0] = byte;
                1
            }
            None => 0,
        };
        let rest = self.reader.read_slice(len - start)?;
        data[start..len].copy_from_slice(rest);
        Ok(data)
    }
}

impl<'a> Iterator for TrackEventIter<'a> {
    type Item = ReadResult<TrackEvent<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.reader.is_empty() {
            return None;
        }
        match self.read_event() {
            Ok(event) => Some(Ok(event)),
            Err(e) => {
                self.finished = true;
                Some(Err(e.offset_by(self.offset)))
            }
        }
    }
}

impl core::iter::FusedIterator for TrackEventIter<'_> {}

#[cfg(test)]
fn parse(payload: &[u8]) -> ReadResult<Vec<TrackEvent<'_>>> {
    TrackEventIter::new(payload).collect()
}

#[cfg(test)]
fn voice(event: &TrackEvent<'_>) -> (u8, [u8; 2]) {
    let TrackMessage::ChannelVoice(msg) = event.message() else {
        panic!("expected a channel voice message, got {event:?}");
    };
    (msg.status(), msg.event().data())
}

#[test]
fn parses_every_channel_message_shape() {
    use pretty_assertions::assert_eq;
    let payload = [
        0x00, 0x90, 0x3C, 0x64, // note on
        0x10, 0x80, 0x3C, 0x40, // note off
        0x00, 0xA1, 0x3C, 0x20, // poly pressure
        0x00, 0xB2, 0x40, 0x7F, // sustain pedal
        0x00, 0xC3, 0x05, // program
        0x00, 0xD4, 0x33, // channel pressure
        0x00, 0xE5, 0x00, 0x40, // pitch bend centre
    ];
    let events = parse(&payload).unwrap();
    let decoded: Vec<_> = events.iter().map(voice).collect();
    assert_eq!(
        decoded,
        [
            (0x90, [0x3C, 0x64]),
            (0x80, [0x3C, 0x40]),
            (0xA1, [0x3C, 0x20]),
            (0xB2, [0x40, 0x7F]),
            (0xC3, [0x05, 0x00]),
            (0xD4, [0x33, 0x00]),
            (0xE5, [0x00, 0x40]),
        ]
    );
    assert_eq!(events[1].delta_ticks(), 0x10);
}

#[test]
fn running_status_reuses_previous_channel_status() {
    use pretty_assertions::assert_eq;
    let payload = [
        0x00, 0x91, 0x3C, 0x64, //
        0x00, 0x40, 0x64, // running note on
        0x00, 0xFF, 0x01, 0x01, b'x', // meta does not cancel it
        0x60, 0x3C, 0x00, // running note on, velocity 0
        0x00, 0xC1, 0x07, //
        0x00, 0x08, // running program change, one data byte
    ];
    let events = parse(&payload).unwrap();
    assert_eq!(events.len(), 6);
    assert_eq!(voice(&events[1]), (0x91, [0x40, 0x64]));
    assert_eq!(voice(&events[3]), (0x91, [0x3C, 0x00]));
    assert_eq!(events[3].delta_ticks(), 0x60);
    assert_eq!(voice(&events[5]), (0xC1, [0x08, 0x00]));
}

#[test]
fn parses_meta_and_sysex_payloads() {
    use pretty_assertions::assert_eq;
    let payload = [
        0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, // tempo
        0x00, 0xF0, 0x03, 0x43, 0x12, 0xF7, // sysex
        0x00, 0xFF, 0x03, 0x04, b'L', b'e', b'a', b'd', // track name
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let events = parse(&payload).unwrap();
    assert_eq!(events.len(), 4);

    let TrackMessage::Meta(tempo) = events[0].message() else {
        panic!("expected tempo");
    };
    assert_eq!(tempo.tempo().unwrap().micros_per_quarter_note(), 500_000);

    let TrackMessage::SystemExclusive(sysex) = events[1].message() else {
        panic!("expected sysex");
    };
    assert_eq!(sysex.status(), 0xF0);
    assert_eq!(sysex.data(), &[0x43, 0x12, 0xF7]);

    let TrackMessage::Meta(name) = events[2].message() else {
        panic!("expected track name");
    };
    assert_eq!(name.data(), b"Lead");

    let TrackMessage::Meta(eot) = events[3].message() else {
        panic!("expected end of track");
    };
    assert!(eot.is_end_of_track());
}

#[test]
fn truncated_data_bytes_are_end_of_track() {
    let err = parse(&[0x00, 0x90, 0x3C]).unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), 2);

    let err = parse(&[0x00, 0xFF, 0x03, 0x05, b'a']).unwrap_err();
    assert!(err.is_out_of_bounds());
}

#[test]
fn data_byte_without_running_status_is_invalid() {
    use pretty_assertions::assert_eq;
    let err = parse(&[0x00, 0x3C, 0x64]).unwrap_err();
    assert_eq!(err.error_kind(), &FormatError::InvalidStatus(0x3C));
    assert_eq!(err.position(), 1);
}

#[test]
fn system_common_status_is_invalid() {
    use pretty_assertions::assert_eq;
    let err = parse(&[0x00, 0xF2, 0x00, 0x00]).unwrap_err();
    assert_eq!(err.error_kind(), &FormatError::InvalidStatus(0xF2));
}

#[test]
fn iteration_stops_after_first_error() {
    let mut iter = TrackEventIter::with_offset(&[0x00, 0xF4, 0x00, 0x90, 0x3C, 0x64], 100);
    let err = iter.next().unwrap().unwrap_err();
    assert_eq!(err.position(), 101);
    assert!(iter.next().is_none());
}

#[test]
fn long_delta_times_accumulate_into_duration() {
    use pretty_assertions::assert_eq;
    let track = Track::parse(&[
        0xFF, 0xFF, 0xFF, 0x7F, 0xFF, 0x2F, 0x00, //
        0xFF, 0xFF, 0xFF, 0x7F, 0xFF, 0x2F, 0x00,
    ])
    .unwrap();
    assert_eq!(track.duration_ticks(), 2 * 0x0FFF_FFFF);
}
