mod common;

use std::fs;

use common::{SmfBuilder, records, varlen};
use midibin::{midi_binarize, prelude::*, status};
use pretty_assertions::assert_eq;

fn c4_quarter_note() -> Vec<u8> {
    let mut events = vec![0x00, 0x90, 0x3C, 0x64];
    events.extend(varlen(480));
    events.extend([0x80, 0x3C, 0x00]);
    SmfBuilder::new(480).format(0).track(&events).build()
}

#[test]
fn quarter_note_at_default_tempo() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("c4.mid");
    let output = dir.path().join("c4.mbin");
    fs::write(&input, c4_quarter_note()).unwrap();

    assert_eq!(midi_binarize(&input, &output), status::SUCCESS);

    let document = BinaryDocument::from_bytes(fs::read(&output).unwrap()).unwrap();
    assert_eq!(document.format_version(), 1);
    assert_eq!(document.ticks_per_quarter_note(), Some(480));
    assert_eq!(
        records(&document),
        [
            (0, EventKind::NoteOn, 0, [0x3C, 0x64]),
            (500_000, EventKind::NoteOff, 0, [0x3C, 0x00]),
            (500_000, EventKind::Meta, 0, [0x2F, 0x00]),
        ]
    );
}

#[test]
fn output_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.mid");
    fs::write(
        &input,
        SmfBuilder::new(96)
            .track(&[0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20])
            .track(&[0x00, 0x90, 60, 100, 0x30, 62, 100, 0x30, 0x80, 60, 0, 0x00, 62, 0])
            .track(&[0x18, 0xC1, 0x05, 0x00, 0xE1, 0x00, 0x40])
            .build(),
    )
    .unwrap();

    let first = dir.path().join("first.mbin");
    let second = dir.path().join("second.mbin");
    assert_eq!(midi_binarize(&input, &first), status::SUCCESS);
    assert_eq!(midi_binarize(&input, &second), status::SUCCESS);
    assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
}

#[test]
fn truncated_track_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("truncated.mid");
    let output = dir.path().join("truncated.mbin");

    let mut bytes = c4_quarter_note();
    bytes.truncate(bytes.len() - 3);
    fs::write(&input, bytes).unwrap();

    assert_eq!(midi_binarize(&input, &output), status::UNEXPECTED_END_OF_TRACK);
    assert!(!output.exists());
    // no temporary file is left behind either
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn missing_header_tag() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("noheader.mid");
    let output = dir.path().join("noheader.mbin");

    let mut bytes = c4_quarter_note();
    bytes[..4].copy_from_slice(b"RIFF");
    fs::write(&input, bytes).unwrap();

    assert_eq!(midi_binarize(&input, &output), status::BAD_HEADER);
    assert!(!output.exists());
}

#[test]
fn failure_leaves_existing_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.mid");
    let output = dir.path().join("existing.mbin");
    fs::write(&output, b"previous contents").unwrap();

    // a delta time with five continuation bytes
    let bytes = SmfBuilder::new(480)
        .raw_track(&[0x81, 0x80, 0x80, 0x80, 0x00, 0x90, 60, 100])
        .build();
    fs::write(&input, bytes).unwrap();

    assert_eq!(midi_binarize(&input, &output), status::VAR_LENGTH_OVERFLOW);
    assert_eq!(fs::read(&output).unwrap(), b"previous contents");
}

#[test]
fn success_replaces_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("c4.mid");
    let output = dir.path().join("c4.mbin");
    fs::write(&input, c4_quarter_note()).unwrap();
    fs::write(&output, b"stale").unwrap();

    assert_eq!(midi_binarize(&input, &output), status::SUCCESS);
    assert_eq!(fs::read(&output).unwrap().len(), HEADER_LEN + 3 * RECORD_LEN);
}

#[test]
fn missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.mbin");
    assert_eq!(
        midi_binarize(dir.path().join("missing.mid"), &output),
        status::INPUT_UNREADABLE
    );
    assert!(!output.exists());
}

#[test]
fn unwritable_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("c4.mid");
    fs::write(&input, c4_quarter_note()).unwrap();

    let output = dir.path().join("no").join("such").join("dir.mbin");
    assert_eq!(midi_binarize(&input, &output), status::OUTPUT_UNWRITABLE);
}

#[test]
fn no_tracks() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.mid");
    let output = dir.path().join("empty.mbin");
    fs::write(&input, SmfBuilder::new(480).chunk(b"XFIH", &[1, 2, 3]).build()).unwrap();

    assert_eq!(midi_binarize(&input, &output), status::NO_TRACKS);
    assert!(!output.exists());
}

#[test]
fn invalid_status_byte() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("status.mid");
    let output = dir.path().join("status.mbin");
    fs::write(&input, SmfBuilder::new(480).track(&[0x00, 0xF4]).build()).unwrap();

    assert_eq!(midi_binarize(&input, &output), status::INVALID_STATUS);
}

#[test]
fn transcoder_reports_and_tracks_stage() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("c4.mid");
    let output = dir.path().join("c4.mbin");
    fs::write(&input, c4_quarter_note()).unwrap();

    let mut transcoder = Transcoder::new();
    let report = transcoder.transcode_file(&input, &output).unwrap();
    assert_eq!(transcoder.stage(), TranscodeStage::Done);
    assert_eq!(report.event_count, 3);
    assert_eq!(report.tracks, 1);
    assert_eq!(report.end_tick, 480);
    assert_eq!(report.end_micros, UMicros::new(500_000));

    let err = transcoder
        .transcode_file(dir.path().join("missing.mid"), &output)
        .unwrap_err();
    assert!(matches!(err, TranscodeError::InputUnreadable { .. }));
    assert_eq!(transcoder.stage(), TranscodeStage::Failed);
}
