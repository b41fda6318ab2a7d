#![doc = r#"
The end-to-end pipeline

A [`Transcoder`] runs one file at a time through

```text
Idle ─▶ Reading ─▶ Parsing ─▶ Merging ─▶ Encoding ─▶ Writing ─▶ Done
          │           │          │           │           │
          └───────────┴──────────┴───────────┴───────────┴──▶ Failed
```

and either replaces the output file with a complete document or leaves it
exactly as it was.
"#]

mod error;
pub use error::*;

mod options;
pub use options::*;

pub mod status;

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use tempfile::NamedTempFile;

use crate::{
    UMicros,
    binary::{BinaryDocument, BinaryEncoder},
    file::MidiFile,
    timeline::TimelineMerger,
};

/// Where a [`Transcoder`] is in its pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TranscodeStage {
    /// Nothing has run yet
    #[default]
    Idle,
    /// Loading the input file
    Reading,
    /// Walking chunks and decoding tracks
    Parsing,
    /// Interleaving tracks and stamping times
    Merging,
    /// Building the output document
    Encoding,
    /// Writing and renaming the output file
    Writing,
    /// The last transcode succeeded
    Done,
    /// The last transcode failed
    Failed,
}

/// A summary of a successful transcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TranscodeReport {
    /// Track chunks merged
    pub tracks: usize,
    /// Records written
    pub event_count: u32,
    /// Chunks with an unrecognized tag
    pub skipped_chunks: usize,
    /// Events removed by [`TranscodeOptions`] filters
    pub filtered_events: usize,
    /// Absolute tick of the last event
    pub end_tick: u64,
    /// Wall-clock time of the last event
    pub end_micros: UMicros,
}

#[doc = r#"
Turns MIDI files into [`BinaryDocument`]s.

A transcoder holds no buffers between calls. Each call owns its input bytes and
output document until it returns, so one transcoder can be reused for any number
of files, and separate transcoders can run on separate threads.

```rust
# use midibin::prelude::*;
let smf: &[u8] = &[
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x00, 0x60,
    b'M', b'T', b'r', b'k', 0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00,
];
let mut transcoder = Transcoder::new();
assert_eq!(transcoder.stage(), TranscodeStage::Idle);

let (document, report) = transcoder.transcode(smf).unwrap();
assert_eq!(transcoder.stage(), TranscodeStage::Done);
assert_eq!(document.event_count(), 1);
assert_eq!(report.tracks, 1);

assert!(transcoder.transcode(&smf[..20]).is_err());
assert_eq!(transcoder.stage(), TranscodeStage::Failed);
```
"#]
#[derive(Debug, Clone, Default)]
pub struct Transcoder {
    options: TranscodeOptions,
    stage: TranscodeStage,
}

impl Transcoder {
    /// A transcoder keeping every event
    pub fn new() -> Self {
        Self::default()
    }

    /// A transcoder applying `options`
    pub fn with_options(options: TranscodeOptions) -> Self {
        Self {
            options,
            stage: TranscodeStage::Idle,
        }
    }

    /// The stage reached by the current or last call
    pub fn stage(&self) -> TranscodeStage {
        self.stage
    }

    /// Transcode a file in memory.
    ///
    /// # Errors
    /// [`TranscodeError::Parse`], [`TranscodeError::Timeline`] or
    /// [`TranscodeError::Encode`].
    pub fn transcode(
        &mut self,
        input: &[u8],
    ) -> Result<(BinaryDocument, TranscodeReport), TranscodeError> {
        let result = self.encode(input);
        self.finish(result)
    }

    /// Transcode `input` into `output`.
    ///
    /// The document is written to a temporary file next to `output`, flushed to
    /// disk and then renamed over `output`. On failure no new file is left
    /// behind and an existing `output` is untouched.
    ///
    /// # Errors
    /// Any [`TranscodeError`].
    pub fn transcode_file(
        &mut self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<TranscodeReport, TranscodeError> {
        let (input, output) = (input.as_ref(), output.as_ref());
        let result = self.transcode_path(input, output);
        self.finish(result)
    }

    fn transcode_path(
        &mut self,
        input: &Path,
        output: &Path,
    ) -> Result<TranscodeReport, TranscodeError> {
        self.enter(TranscodeStage::Reading);
        let bytes = fs::read(input).map_err(|source| TranscodeError::InputUnreadable {
            path: input.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %input.display(), bytes = bytes.len(), "read input");

        let (document, report) = self.encode(&bytes)?;

        self.enter(TranscodeStage::Writing);
        write_atomically(output, document.as_bytes()).map_err(|source| {
            TranscodeError::OutputUnwritable {
                path: output.to_path_buf(),
                source,
            }
        })?;
        tracing::debug!(path = %output.display(), "wrote output");
        Ok(report)
    }

    fn encode(
        &mut self,
        input: &[u8],
    ) -> Result<(BinaryDocument, TranscodeReport), TranscodeError> {
        self.enter(TranscodeStage::Parsing);
        let file = MidiFile::parse(input)?;
        let tracks = file.parse_tracks()?;
        if file.skipped_chunks() > 0 {
            tracing::info!(skipped = file.skipped_chunks(), "skipped unknown chunks");
        }

        self.enter(TranscodeStage::Merging);
        let timeline = TimelineMerger::new(self.options).merge(tracks, file.timing())?;

        self.enter(TranscodeStage::Encoding);
        let document = BinaryEncoder::encode_timeline(&timeline)?;

        let report = TranscodeReport {
            tracks: timeline.track_count(),
            event_count: document.event_count(),
            skipped_chunks: file.skipped_chunks(),
            filtered_events: timeline.filtered_events(),
            end_tick: timeline.end_tick(),
            end_micros: timeline.end_micros(),
        };
        Ok((document, report))
    }

    fn enter(&mut self, stage: TranscodeStage) {
        tracing::debug!(from = ?self.stage, to = ?stage, "transcode stage");
        self.stage = stage;
    }

    fn finish<T>(&mut self, result: Result<T, TranscodeError>) -> Result<T, TranscodeError> {
        match &result {
            Ok(_) => self.enter(TranscodeStage::Done),
            Err(e) => {
                tracing::warn!(
                    stage = ?self.stage,
                    status = e.status_code(),
                    "transcode failed: {e}"
                );
                self.stage = TranscodeStage::Failed;
            }
        }
        result
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Transcode a file in memory with the given options.
///
/// # Errors
/// See [`Transcoder::transcode`].
pub fn transcode_bytes(
    input: &[u8],
    options: &TranscodeOptions,
) -> Result<(BinaryDocument, TranscodeReport), TranscodeError> {
    Transcoder::with_options(*options).transcode(input)
}

/// Transcode the MIDI file at `input` into an `MBIN` file at `output`.
///
/// Returns [`status::SUCCESS`] or the [`status`] code of the failure. A failed
/// call leaves no new file behind and never modifies an existing `output`.
pub fn midi_binarize(input: impl AsRef<Path>, output: impl AsRef<Path>) -> i32 {
    match Transcoder::new().transcode_file(input, output) {
        Ok(report) => {
            tracing::info!(
                events = report.event_count,
                tracks = report.tracks,
                micros = report.end_micros.us(),
                "transcoded"
            );
            status::SUCCESS
        }
        Err(e) => e.status_code(),
    }
}

#[cfg(test)]
fn smf(tracks: &[&[u8]]) -> Vec<u8> {
    let mut bytes = vec![b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1];
    bytes.extend_from_slice(&(tracks.len() as u16).to_be_bytes());
    bytes.extend_from_slice(&[0x01, 0xE0]);
    for track in tracks {
        bytes.extend_from_slice(b"MTrk");
        bytes.extend_from_slice(&(track.len() as u32).to_be_bytes());
        bytes.extend_from_slice(track);
    }
    bytes
}

#[test]
fn stage_follows_the_pipeline() {
    use pretty_assertions::assert_eq;
    let mut transcoder = Transcoder::new();
    let bytes = smf(&[&[0x00, 0x90, 60, 100, 0x00, 0xFF, 0x2F, 0x00]]);

    assert!(transcoder.transcode(&bytes).is_ok());
    assert_eq!(transcoder.stage(), TranscodeStage::Done);

    let err = transcoder.transcode(&bytes[..bytes.len() - 2]).unwrap_err();
    assert_eq!(err.status_code(), status::UNEXPECTED_END_OF_TRACK);
    assert_eq!(transcoder.stage(), TranscodeStage::Failed);

    // a failed transcode does not poison the next one
    assert!(transcoder.transcode(&bytes).is_ok());
    assert_eq!(transcoder.stage(), TranscodeStage::Done);
}

#[test]
fn no_tracks() {
    let err = transcode_bytes(&smf(&[]), &TranscodeOptions::default()).unwrap_err();
    assert_eq!(err.format_error(), Some(&crate::FormatError::NoTracks));
    assert_eq!(err.status_code(), status::NO_TRACKS);
}

#[test]
fn report_counts_filtered_events() {
    use pretty_assertions::assert_eq;
    let bytes = smf(&[
        &[0x00, 0x90, 60, 100, 0x60, 0x80, 60, 0, 0x00, 0xFF, 0x2F, 0x00],
        &[0x00, 0x99, 36, 100, 0x00, 0x89, 36, 0, 0x00, 0xFF, 0x2F, 0x00],
    ]);
    let options = TranscodeOptions::default().with_skip_percussion(true);
    let (document, report) = transcode_bytes(&bytes, &options).unwrap();
    assert_eq!(
        report,
        TranscodeReport {
            tracks: 2,
            event_count: 4,
            skipped_chunks: 0,
            filtered_events: 2,
            end_tick: 96,
            end_micros: UMicros::new(100_000),
        }
    );
    assert_eq!(document.event_count(), 4);
}
