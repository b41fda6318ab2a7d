mod common;

use common::{SmfBuilder, records, varlen};
use midibin::prelude::*;
use pretty_assertions::assert_eq;

fn transcode(bytes: &[u8]) -> (BinaryDocument, TranscodeReport) {
    transcode_bytes(bytes, &TranscodeOptions::default()).unwrap()
}

fn micros_of(document: &BinaryDocument, kind: EventKind) -> Vec<u64> {
    records(document)
        .into_iter()
        .filter(|(_, k, _, _)| *k == kind)
        .map(|(us, ..)| us)
        .collect()
}

#[test]
fn tempo_change_only_affects_later_events() {
    // notes every quarter note; tempo doubles at tick 960
    let mut notes = Vec::new();
    for key in 60..66 {
        notes.extend(varlen(if key == 60 { 0 } else { 480 }));
        notes.extend([0x90, key, 100]);
    }
    let mut tempo = varlen(960);
    tempo.extend([0xFF, 0x51, 0x03, 0x03, 0xD0, 0x90]);

    let bytes = SmfBuilder::new(480).track(&tempo).track(&notes).build();
    let (document, _) = transcode(&bytes);

    assert_eq!(
        micros_of(&document, EventKind::NoteOn),
        [0, 500_000, 1_000_000, 1_250_000, 1_500_000, 1_750_000]
    );
}

#[test]
fn simultaneous_events_keep_file_order() {
    let chord = [
        0x00, 0x90, 60, 100, 0x00, 64, 100, 0x00, 67, 100, 0x00, 0xB0, 0x40, 0x7F,
    ];
    let bytes = SmfBuilder::new(480).format(0).track(&chord).build();
    let (document, _) = transcode(&bytes);

    let data: Vec<_> = records(&document)
        .into_iter()
        .map(|(_, kind, _, data)| (kind, data))
        .collect();
    assert_eq!(
        data,
        [
            (EventKind::NoteOn, [60, 100]),
            (EventKind::NoteOn, [64, 100]),
            (EventKind::NoteOn, [67, 100]),
            (EventKind::Controller, [0x40, 0x7F]),
            (EventKind::Meta, [0x2F, 0]),
        ]
    );
}

#[test]
fn ties_across_tracks_follow_track_order() {
    let bytes = SmfBuilder::new(96)
        .track(&[0x60, 0x92, 50, 90])
        .track(&[0x60, 0x91, 40, 90])
        .track(&[0x60, 0x90, 30, 90])
        .build();
    let (document, _) = transcode(&bytes);

    let channels: Vec<_> = records(&document)
        .into_iter()
        .filter(|(_, kind, _, _)| *kind == EventKind::NoteOn)
        .map(|(_, _, channel, _)| channel)
        .collect();
    assert_eq!(channels, [2, 1, 0]);
}

#[test]
fn unknown_chunks_are_skipped_and_counted() {
    let bytes = SmfBuilder::new(480)
        .chunk(b"XFIH", &[0xDE, 0xAD])
        .track(&[0x00, 0x90, 60, 100])
        .chunk(b"XFKM", &[])
        .track(&[0x00, 0xF0, 0x03, 0x7E, 0x09, 0xF7])
        .build();
    let (document, report) = transcode(&bytes);

    assert_eq!(report.skipped_chunks, 2);
    assert_eq!(report.tracks, 2);
    assert_eq!(
        records(&document),
        [
            (0, EventKind::NoteOn, 0, [60, 100]),
            (0, EventKind::Meta, 0, [0x2F, 0]),
            (0, EventKind::SysEx, 0, [0xF0, 0]),
            (0, EventKind::Meta, 0, [0x2F, 0]),
        ]
    );
}

#[test]
fn event_count_matches_input() {
    let bytes = SmfBuilder::new(480)
        .track(&[0x00, 0xFF, 0x03, 0x04, b'l', b'e', b'a', b'd'])
        .track(&[
            0x00, 0xC0, 0x18, 0x00, 0x90, 60, 100, 0x10, 62, 0, 0x00, 0xD0, 0x20, 0x00, 0xE0,
            0x00, 0x40, 0x00, 0xA0, 60, 10,
        ])
        .build();

    let file = MidiFile::parse(&bytes).unwrap();
    let input_events: usize = file
        .parse_tracks()
        .unwrap()
        .iter()
        .map(|t| t.events().len())
        .sum();

    let (document, report) = transcode(&bytes);
    assert_eq!(input_events, 9);
    assert_eq!(document.event_count() as usize, input_events);
    assert_eq!(report.event_count, document.event_count());
    assert_eq!(document.records().count(), input_events);
}

#[test]
fn every_channel_kind_is_recorded() {
    let bytes = SmfBuilder::new(480)
        .format(0)
        .track(&[
            0x00, 0x83, 60, 64, 0x00, 0x93, 60, 100, 0x00, 0xA3, 60, 10, 0x00, 0xB3, 7, 90, 0x00,
            0xC3, 12, 0x00, 0xD3, 30, 0x00, 0xE3, 0x01, 0x40,
        ])
        .build();
    let (document, _) = transcode(&bytes);

    let kinds: Vec<_> = records(&document)
        .into_iter()
        .map(|(_, kind, channel, data)| (u8::from(kind), channel, data))
        .collect();
    assert_eq!(
        kinds,
        [
            (0, 3, [60, 64]),
            (1, 3, [60, 100]),
            (2, 3, [60, 10]),
            (3, 3, [7, 90]),
            (4, 3, [12, 0]),
            (5, 3, [30, 0]),
            (6, 3, [0x01, 0x40]),
            (8, 0, [0x2F, 0]),
        ]
    );
}

#[test]
fn smpte_timing_ignores_tempo() {
    // 25 fps × 40 ticks per frame = 1000 ticks per second
    let mut events = vec![0x00, 0xFF, 0x51, 0x03, 0x0F, 0x42, 0x40];
    events.extend(varlen(1_000));
    events.extend([0x90, 60, 100]);
    events.extend(varlen(250));
    events.extend([0x80, 60, 0]);

    let bytes = SmfBuilder::smpte(SmpteFps::TwentyFive, 40).track(&events).build();
    let (document, report) = transcode(&bytes);

    assert_eq!(document.division(), 0xE728);
    assert_eq!(document.ticks_per_quarter_note(), None);
    assert_eq!(micros_of(&document, EventKind::NoteOn), [1_000_000]);
    assert_eq!(micros_of(&document, EventKind::NoteOff), [1_250_000]);
    assert_eq!(report.end_micros, UMicros::new(1_250_000));
}

#[test]
fn format_2_tracks_share_one_timeline() {
    let bytes = SmfBuilder::new(480)
        .format(2)
        .track(&[0x00, 0x90, 60, 100])
        .track(&[0x00, 0x90, 62, 100])
        .build();
    let (document, report) = transcode(&bytes);
    assert_eq!(report.tracks, 2);
    assert_eq!(micros_of(&document, EventKind::NoteOn), [0, 0]);
}

#[test]
fn reader_errors_carry_file_positions() {
    // header (14) + track preamble (8) + delta (1) puts the bad status at 23
    let bytes = SmfBuilder::new(480).raw_track(&[0x00, 0xF4]).build();
    let err = transcode_bytes(&bytes, &TranscodeOptions::default()).unwrap_err();
    let TranscodeError::Parse(err) = err else {
        panic!("expected a parse error, got {err:?}");
    };
    assert_eq!(err.position(), 23);
    assert_eq!(err.error_kind(), &FormatError::InvalidStatus(0xF4));
}

#[test]
fn short_tempo_payload_is_a_plain_meta_event() {
    let mut events = vec![0x00, 0xFF, 0x51, 0x02, 0x07, 0xA1];
    events.extend(varlen(480));
    events.extend([0x90, 60, 100]);

    let bytes = SmfBuilder::new(480).track(&events).build();
    let (document, _) = transcode(&bytes);

    assert_eq!(
        records(&document),
        [
            (0, EventKind::Meta, 0, [0x51, 0]),
            (500_000, EventKind::NoteOn, 0, [60, 100]),
            (500_000, EventKind::Meta, 0, [0x2F, 0]),
        ]
    );
}

#[test]
fn trailing_padding_is_ignored() {
    let mut bytes = SmfBuilder::new(480).track(&[0x00, 0x90, 60, 100]).build();
    bytes.extend([0, 0]);

    let (document, report) = transcode(&bytes);
    assert_eq!(report.tracks, 1);
    assert_eq!(
        records(&document),
        [
            (0, EventKind::NoteOn, 0, [60, 100]),
            (0, EventKind::Meta, 0, [0x2F, 0]),
        ]
    );
}
