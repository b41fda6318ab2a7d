use itertools::Itertools;

use super::{EventKind, MergedEvent, TempoMap, Timeline};
use crate::{
    FormatError,
    file::{Timing, Track, TrackEvent},
    message::{TrackMessage, channel::VoiceEvent},
    transcode::TranscodeOptions,
};

/// A track event with its absolute tick and merge key.
struct Pending<'a> {
    tick: u64,
    track: usize,
    order: usize,
    event: TrackEvent<'a>,
}

impl Pending<'_> {
    fn key(&self) -> (u64, usize, usize) {
        (self.tick, self.track, self.order)
    }
}

#[doc = r#"
Interleaves the tracks of a file into one [`Timeline`].

Events are ordered by absolute tick, then by track index, then by their position
in the track. No two events share that key, so the order is total and the output
is the same on every run.

Tempo events from any track feed a single [`TempoMap`]. Because events arrive in
tick order, each tempo change is recorded before any later event is stamped.

# Example
```rust
# use midibin::prelude::*;
let note = |delta, status, key| TrackEvent::new(
    delta,
    TrackMessage::ChannelVoice(ChannelVoiceMessage::from_status(status, [key, 100])),
);
let melody = Track::new(vec![note(0, 0x90, 72), note(480, 0x80, 72)]);
let bass = Track::new(vec![note(240, 0x91, 36)]);

let timeline = TimelineMerger::default()
    .merge(vec![melody, bass], Timing::new_ticks_per_quarter_note(480))
    .unwrap();
let ticks: Vec<_> = timeline.events().iter().map(|e| e.tick()).collect();
assert_eq!(ticks, [0, 240, 480]);
assert_eq!(timeline.events()[1].micros().us(), 250_000);
```
"#]
#[derive(Debug, Clone, Default)]
pub struct TimelineMerger {
    options: TranscodeOptions,
}

impl TimelineMerger {
    /// A merger applying the given filters
    pub fn new(options: TranscodeOptions) -> Self {
        Self { options }
    }

    /// Merge `tracks`, indexed by their iteration order.
    ///
    /// # Errors
    /// [`FormatError::NoTracks`] if `tracks` is empty.
    pub fn merge<'a, I>(&self, tracks: I, timing: Timing) -> Result<Timeline, FormatError>
    where
        I: IntoIterator<Item = Track<'a>>,
    {
        let streams: Vec<_> = tracks
            .into_iter()
            .enumerate()
            .map(|(track, t)| {
                t.into_events()
                    .into_iter()
                    .enumerate()
                    .scan(0_u64, move |tick, (order, event)| {
                        *tick += u64::from(event.delta_ticks());
                        Some(Pending {
                            tick: *tick,
                            track,
                            order,
                            event,
                        })
                    })
            })
            .collect();

        if streams.is_empty() {
            return Err(FormatError::NoTracks);
        }
        let track_count = streams.len();

        let mut tempo_map = TempoMap::new(timing);
        let mut events = Vec::new();
        let mut end_tick = 0;
        let mut filtered_events = 0;

        for pending in streams.into_iter().kmerge_by(|a, b| a.key() < b.key()) {
            end_tick = pending.tick;
            let message = pending.event.message();

            if let Some(tempo) = message.tempo() {
                tempo_map.push(pending.tick, tempo);
            }

            let Some((kind, channel, data)) = self.classify(message) else {
                filtered_events += 1;
                continue;
            };

            events.push(MergedEvent::new(
                pending.tick,
                tempo_map.micros_at(pending.tick),
                pending.track,
                kind,
                channel,
                data,
            ));
        }

        tracing::debug!(
            tracks = track_count,
            events = events.len(),
            tempo_changes = tempo_map.entries().len(),
            end_tick,
            "merged timeline"
        );
        if filtered_events > 0 {
            tracing::info!(filtered_events, "channel filters removed events");
        }

        Ok(Timeline {
            timing,
            events,
            tempo_map,
            track_count,
            end_tick,
            filtered_events,
        })
    }

    /// The kind, channel and payload of a message, or `None` if a filter drops it.
    fn classify(&self, message: &TrackMessage<'_>) -> Option<(EventKind, u8, [u8; 2])> {
        match message {
            TrackMessage::ChannelVoice(msg) => {
                if !self.options.keeps_channel(msg.channel()) {
                    return None;
                }
                let kind = match msg.event() {
                    VoiceEvent::NoteOn { velocity: 0, .. }
                        if self.options.velocity_zero_note_off =>
                    {
                        EventKind::NoteOff
                    }
                    VoiceEvent::NoteOn { .. } => EventKind::NoteOn,
                    VoiceEvent::NoteOff { .. } => EventKind::NoteOff,
                    VoiceEvent::Aftertouch { .. } => EventKind::PolyPressure,
                    VoiceEvent::ControlChange { .. } => EventKind::Controller,
                    VoiceEvent::ProgramChange { .. } => EventKind::ProgramChange,
                    VoiceEvent::ChannelPressureAfterTouch { .. } => EventKind::ChannelPressure,
                    VoiceEvent::PitchBend { .. } => EventKind::PitchBend,
                };
                Some((kind, msg.channel().index(), msg.event().data()))
            }
            TrackMessage::Meta(meta) => Some((EventKind::Meta, 0, [meta.kind(), 0])),
            TrackMessage::SystemExclusive(sysex) => {
                Some((EventKind::SysEx, 0, [sysex.status(), 0]))
            }
        }
    }
}

#[cfg(test)]
fn note_on(delta_ticks: u32, note: u8, velocity: u8, channel: u8) -> TrackEvent<'static> {
    use crate::message::channel::ChannelVoiceMessage;
    TrackEvent::new(
        delta_ticks,
        TrackMessage::ChannelVoice(ChannelVoiceMessage::from_status(
            0x90 | channel,
            [note, velocity],
        )),
    )
}

#[cfg(test)]
fn note_off(delta_ticks: u32, note: u8, channel: u8) -> TrackEvent<'static> {
    use crate::message::channel::ChannelVoiceMessage;
    TrackEvent::new(
        delta_ticks,
        TrackMessage::ChannelVoice(ChannelVoiceMessage::from_status(0x80 | channel, [note, 0])),
    )
}

#[cfg(test)]
fn tempo_event(delta_ticks: u32, micros_per_quarter: u32) -> TrackEvent<'static> {
    use crate::message::meta::MetaMessage;
    let bytes: &'static [u8] = Box::leak(Box::new([
        (micros_per_quarter >> 16) as u8,
        (micros_per_quarter >> 8) as u8,
        micros_per_quarter as u8,
    ]));
    TrackEvent::new(delta_ticks, TrackMessage::Meta(MetaMessage::new(0x51, bytes)))
}

#[cfg(test)]
fn merge_480(tracks: Vec<Vec<TrackEvent<'static>>>) -> Timeline {
    TimelineMerger::default()
        .merge(
            tracks.into_iter().map(Track::new),
            Timing::new_ticks_per_quarter_note(480),
        )
        .unwrap()
}

#[cfg(test)]
fn stamps(timeline: &Timeline) -> Vec<(u64, u64, EventKind)> {
    timeline
        .events()
        .iter()
        .map(|e| (e.tick(), e.micros().us(), e.kind()))
        .collect()
}

#[test]
fn no_tracks_is_an_error() {
    let result =
        TimelineMerger::default().merge(Vec::new(), Timing::new_ticks_per_quarter_note(480));
    assert_eq!(result.unwrap_err(), FormatError::NoTracks);
}

#[test]
fn default_tempo_quarter_note() {
    use pretty_assertions::assert_eq;
    let timeline = merge_480(vec![vec![note_on(0, 60, 100, 0), note_off(480, 60, 0)]]);
    assert_eq!(
        stamps(&timeline),
        [(0, 0, EventKind::NoteOn), (480, 500_000, EventKind::NoteOff)]
    );
    assert_eq!(timeline.end_tick(), 480);
    assert_eq!(timeline.end_micros().us(), 500_000);
}

#[test]
fn simultaneous_events_keep_track_order() {
    use pretty_assertions::assert_eq;
    let timeline = merge_480(vec![
        vec![note_on(0, 60, 100, 0), note_on(0, 64, 100, 0), note_on(0, 67, 100, 0)],
        vec![note_on(0, 36, 90, 1)],
    ]);
    let keys: Vec<_> = timeline
        .events()
        .iter()
        .map(|e| (e.track(), e.data()[0]))
        .collect();
    assert_eq!(keys, [(0, 60), (0, 64), (0, 67), (1, 36)]);
}

#[test]
fn ties_across_tracks_order_by_track_index() {
    use pretty_assertions::assert_eq;
    let timeline = merge_480(vec![
        vec![note_on(240, 60, 100, 0)],
        vec![note_on(0, 36, 90, 1), note_on(240, 38, 90, 1)],
        vec![note_on(240, 42, 90, 2)],
    ]);
    let keys: Vec<_> = timeline
        .events()
        .iter()
        .map(|e| (e.tick(), e.track()))
        .collect();
    assert_eq!(keys, [(0, 1), (240, 0), (240, 1), (240, 2)]);
}

#[test]
fn tempo_from_one_track_applies_to_all() {
    use pretty_assertions::assert_eq;
    let timeline = merge_480(vec![
        vec![tempo_event(0, 500_000), tempo_event(480, 250_000)],
        vec![note_on(240, 36, 90, 1), note_off(480, 36, 1), note_on(480, 38, 90, 1)],
    ]);
    let notes: Vec<_> = stamps(&timeline)
        .into_iter()
        .filter(|(_, _, kind)| *kind != EventKind::Meta)
        .collect();
    assert_eq!(
        notes,
        [
            (240, 250_000, EventKind::NoteOn),
            (720, 625_000, EventKind::NoteOff),
            (1_200, 875_000, EventKind::NoteOn),
        ]
    );
}

#[test]
fn event_at_tempo_tick_uses_new_tempo() {
    use pretty_assertions::assert_eq;
    // the note shares the tempo event's tick but sorts before it (lower track index)
    let timeline = merge_480(vec![
        vec![note_on(480, 60, 100, 0), note_off(480, 60, 0)],
        vec![tempo_event(480, 1_000_000)],
    ]);
    assert_eq!(
        stamps(&timeline),
        [
            (480, 500_000, EventKind::NoteOn),
            (480, 500_000, EventKind::Meta),
            (960, 1_500_000, EventKind::NoteOff),
        ]
    );
}

#[test]
fn velocity_zero_note_on_becomes_note_off() {
    use pretty_assertions::assert_eq;
    let track = vec![note_on(0, 60, 100, 0), note_on(10, 60, 0, 0)];
    let timeline = merge_480(vec![track.clone()]);
    assert_eq!(timeline.events()[1].kind(), EventKind::NoteOff);

    let raw = TimelineMerger::new(TranscodeOptions::default().with_velocity_zero_note_off(false))
        .merge([Track::new(track)], Timing::new_ticks_per_quarter_note(480))
        .unwrap();
    assert_eq!(raw.events()[1].kind(), EventKind::NoteOn);
}

#[test]
fn filters_count_dropped_events() {
    use pretty_assertions::assert_eq;
    let options = TranscodeOptions::default()
        .with_skip_percussion(true)
        .with_channel_mask(0b0000_0010_0000_0011);
    let timeline = TimelineMerger::new(options)
        .merge(
            [Track::new(vec![
                tempo_event(0, 500_000),
                note_on(0, 60, 100, 0),
                note_on(0, 36, 100, 9),
                note_on(0, 62, 100, 2),
                note_off(960, 60, 0),
            ])],
            Timing::new_ticks_per_quarter_note(480),
        )
        .unwrap();
    assert_eq!(timeline.filtered_events(), 2);
    assert_eq!(timeline.events().len(), 3);
    // filtered events still count towards the length of the timeline
    assert_eq!(timeline.end_tick(), 960);
}

#[test]
fn empty_tracks_are_merged() {
    use pretty_assertions::assert_eq;
    let timeline = merge_480(vec![vec![], vec![note_on(0, 48, 90, 2)], vec![]]);
    assert_eq!(timeline.track_count(), 3);
    assert_eq!(timeline.events().len(), 1);
    assert_eq!(timeline.events()[0].channel(), 2);
    assert_eq!(timeline.events()[0].track(), 1);
}
