#![warn(missing_docs)]
#![doc = r#"
Transcode Standard MIDI Files into `MBIN`, a compact fixed-layout binary timeline.

The pipeline reads a whole `.mid` file, walks its chunks, parses every track into
[`TrackEvent`](crate::prelude::TrackEvent)s, merges all tracks into one
time-ordered timeline with wall-clock timestamps derived from the tempo map, and
finally writes one fixed 16 byte record per event.

```text
 bytes ─▶ Reader ─▶ MidiFile ─▶ TrackEventIter ─▶ TimelineMerger ─▶ BinaryEncoder ─▶ MBIN
          (chunks)   (tracks)     (per track)       (k-way merge)     (fixed records)
```

# Example
```rust,no_run
let status = midibin::midi_binarize("song.mid", "song.mbin");
assert_eq!(status, midibin::status::SUCCESS);
```

Or, without touching the file system:
```rust
# use midibin::prelude::*;
let smf: &[u8] = &[
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0,
    b'M', b'T', b'r', b'k', 0, 0, 0, 13,
    0x00, 0x90, 60, 100,
    0x83, 0x60, 0x80, 60, 0,
    0x00, 0xFF, 0x2F, 0x00,
];
let (document, report) = transcode_bytes(smf, &TranscodeOptions::default()).unwrap();
assert_eq!(document.event_count(), 3);
assert_eq!(report.end_micros.us(), 500_000);
```
"#]

pub mod binary;

mod error;
pub use error::*;

pub mod file;
pub mod message;

mod micros;
pub use micros::*;

pub mod reader;
pub mod timeline;

pub mod transcode;
pub use transcode::{midi_binarize, status, transcode_bytes};

/// Commonly used types
pub mod prelude {
    pub use crate::{
        binary::*,
        error::*,
        file::{builder::chunk::*, builder::*, *},
        message::{channel::*, meta::*, *},
        micros::*,
        reader::{ReadResult, Reader, ReaderError},
        timeline::*,
        transcode::*,
    };
}
