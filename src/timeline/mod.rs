#![doc = r#"
One time-ordered timeline for all tracks of a file

[`TimelineMerger::merge`] turns per-track delta times into absolute ticks,
interleaves the tracks, and stamps every event with its wall-clock time from the
[`TempoMap`].
"#]

mod merge;
pub use merge::*;

mod tempo_map;
pub use tempo_map::*;

use crate::{UMicros, file::Timing};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// What a [`MergedEvent`] is.
///
/// The discriminant is the byte stored in an encoded record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum EventKind {
    /// Data: key, release velocity
    NoteOff = 0,
    /// Data: key, velocity
    NoteOn = 1,
    /// Data: key, pressure
    PolyPressure = 2,
    /// Data: controller, value
    Controller = 3,
    /// Data: program
    ProgramChange = 4,
    /// Data: pressure
    ChannelPressure = 5,
    /// Data: lsb, msb
    PitchBend = 6,
    /// Data: `0xF0` or `0xF7`
    SysEx = 7,
    /// Data: meta type
    Meta = 8,
}

/// An event placed on the merged timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergedEvent {
    tick: u64,
    micros: UMicros,
    track: usize,
    kind: EventKind,
    channel: u8,
    data: [u8; 2],
}

impl MergedEvent {
    /// Create a new event
    pub const fn new(
        tick: u64,
        micros: UMicros,
        track: usize,
        kind: EventKind,
        channel: u8,
        data: [u8; 2],
    ) -> Self {
        Self {
            tick,
            micros,
            track,
            kind,
            channel,
            data,
        }
    }

    /// Ticks since the start of the file
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Wall-clock time since the start of the file
    pub const fn micros(&self) -> UMicros {
        self.micros
    }

    /// Index of the track the event came from
    pub const fn track(&self) -> usize {
        self.track
    }

    /// The event kind
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// Zero-based channel; zero for meta and system exclusive events
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// The two payload bytes
    pub const fn data(&self) -> [u8; 2] {
        self.data
    }
}

/// The output of [`TimelineMerger::merge`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    timing: Timing,
    events: Vec<MergedEvent>,
    tempo_map: TempoMap,
    track_count: usize,
    end_tick: u64,
    filtered_events: usize,
}

impl Timeline {
    /// The timing of the source file
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Every kept event, in merge order
    pub fn events(&self) -> &[MergedEvent] {
        &self.events
    }

    /// Consumes the timeline, returning its events
    pub fn into_events(self) -> Vec<MergedEvent> {
        self.events
    }

    /// The global tempo map
    pub fn tempo_map(&self) -> &TempoMap {
        &self.tempo_map
    }

    /// How many tracks were merged
    pub fn track_count(&self) -> usize {
        self.track_count
    }

    /// The absolute tick of the last event of the longest track
    pub fn end_tick(&self) -> u64 {
        self.end_tick
    }

    /// Wall-clock time at [`Timeline::end_tick`]
    pub fn end_micros(&self) -> UMicros {
        self.tempo_map.micros_at(self.end_tick)
    }

    /// Events removed by channel filters
    pub fn filtered_events(&self) -> usize {
        self.filtered_events
    }
}
