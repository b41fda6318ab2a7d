use crate::{
    UMicros,
    file::Timing,
    message::meta::Tempo,
};

/// A tempo change at an absolute tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TempoMapEntry {
    tick: u64,
    tempo: Tempo,
    micros: UMicros,
}

impl TempoMapEntry {
    /// Where the tempo takes effect
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// The new tempo
    pub const fn tempo(&self) -> Tempo {
        self.tempo
    }

    /// Wall-clock time at [`TempoMapEntry::tick`]
    pub const fn micros(&self) -> UMicros {
        self.micros
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Clock {
    Metrical { ticks_per_quarter_note: u16 },
    Smpte { ticks_per_second: u32 },
}

#[doc = r#"
A piecewise-linear map from ticks to microseconds.

Until the first entry the default tempo of 500 000 µs per quarter note applies.
Each entry starts a segment that lasts until the next one; time within a segment
advances by `ticks × µs_per_quarter / ticks_per_quarter_note`, rounded down, and
segment start times are accumulated with the same rounding.

Entries are kept sorted by tick. Several entries at the same tick keep their
insertion order and the last one wins.

With SMPTE timing ticks have a fixed length and entries are recorded without
affecting any timestamp.

```rust
# use midibin::prelude::*;
let mut map = TempoMap::new(Timing::new_ticks_per_quarter_note(480));
map.push(960, Tempo::new(1_000_000));

assert_eq!(map.micros_at(480).us(), 500_000);
assert_eq!(map.micros_at(960).us(), 1_000_000);
assert_eq!(map.micros_at(1_440).us(), 2_000_000);
```
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempoMap {
    clock: Clock,
    entries: Vec<TempoMapEntry>,
}

impl TempoMap {
    /// An empty map for a file with the given timing
    pub fn new(timing: Timing) -> Self {
        let clock = match timing {
            Timing::TicksPerQuarterNote(t) => Clock::Metrical {
                ticks_per_quarter_note: t.ticks_per_quarter_note(),
            },
            Timing::Smpte(s) => Clock::Smpte {
                ticks_per_second: s.ticks_per_second(),
            },
        };
        Self {
            clock,
            entries: Vec::new(),
        }
    }

    /// Record a tempo change at `tick`.
    ///
    /// Pushing in tick order (as the merger does) appends; an earlier tick is
    /// inserted in place and the start times of later entries are recomputed.
    pub fn push(&mut self, tick: u64, tempo: Tempo) {
        let index = self.entries.partition_point(|e| e.tick <= tick);
        let micros = self.micros_at(tick);
        self.entries.insert(
            index,
            TempoMapEntry {
                tick,
                tempo,
                micros,
            },
        );
        for i in index + 1..self.entries.len() {
            let prev = self.entries[i - 1];
            let span = self.span(self.entries[i].tick - prev.tick, prev.tempo);
            self.entries[i].micros = prev.micros.saturating_add(span);
        }
    }

    /// The recorded tempo changes, sorted by tick
    pub fn entries(&self) -> &[TempoMapEntry] {
        &self.entries
    }

    /// The tempo in effect at `tick`
    pub fn tempo_at(&self, tick: u64) -> Tempo {
        self.segment(tick).1
    }

    /// Wall-clock time at `tick`
    pub fn micros_at(&self, tick: u64) -> UMicros {
        let (start_tick, tempo, start_micros) = self.segment(tick);
        start_micros.saturating_add(self.span(tick - start_tick, tempo))
    }

    fn segment(&self, tick: u64) -> (u64, Tempo, UMicros) {
        let index = self.entries.partition_point(|e| e.tick <= tick);
        match index.checked_sub(1).map(|i| &self.entries[i]) {
            Some(e) => (e.tick, e.tempo, e.micros),
            None => (0, Tempo::default(), UMicros::ZERO),
        }
    }

    fn span(&self, ticks: u64, tempo: Tempo) -> UMicros {
        match self.clock {
            Clock::Metrical {
                ticks_per_quarter_note,
            } => UMicros::from_ticks(
                ticks,
                tempo.micros_per_quarter_note(),
                ticks_per_quarter_note,
            ),
            Clock::Smpte { ticks_per_second } => {
                UMicros::from_ticks_per_second(ticks, ticks_per_second)
            }
        }
    }
}
