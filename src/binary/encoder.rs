use super::{
    BinaryDocument, EncodeError, EventRecord, FORMAT_VERSION, HEADER_LEN, MAGIC, RECORD_LEN,
};
use crate::{
    file::Timing,
    timeline::{MergedEvent, Timeline},
};

#[doc = r#"
Serializes merged events into an [`MBIN`](crate::binary) document.

The whole document is built in memory. Nothing is written anywhere until the
caller hands [`BinaryDocument::as_bytes`] to a sink.

# Example
```rust
# use midibin::prelude::*;
let events = [MergedEvent::new(0, UMicros::ZERO, 0, EventKind::NoteOn, 0, [60, 100])];
let document = BinaryEncoder::new(Timing::new_ticks_per_quarter_note(480))
    .encode(&events)
    .unwrap();

assert_eq!(document.as_bytes().len(), HEADER_LEN + RECORD_LEN);
assert_eq!(&document.as_bytes()[0..4], b"MBIN");
assert_eq!(document.ticks_per_quarter_note(), Some(480));
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryEncoder {
    division: u16,
}

impl BinaryEncoder {
    /// An encoder stamping documents with the division of `timing`
    pub const fn new(timing: Timing) -> Self {
        Self {
            division: timing.division(),
        }
    }

    /// Encode every event of a timeline
    pub fn encode_timeline(timeline: &Timeline) -> Result<BinaryDocument, EncodeError> {
        Self::new(timeline.timing()).encode(timeline.events())
    }

    /// Encode `events` in the given order.
    ///
    /// # Errors
    /// [`EncodeError::EventCountOverflow`] if there are more than `u32::MAX` events.
    pub fn encode(&self, events: &[MergedEvent]) -> Result<BinaryDocument, EncodeError> {
        let count = event_count(events.len())?;
        let len = events
            .len()
            .checked_mul(RECORD_LEN)
            .and_then(|records| records.checked_add(HEADER_LEN))
            .ok_or(EncodeError::EventCountOverflow(events.len()))?;

        let mut bytes = Vec::with_capacity(len);
        bytes.extend_from_slice(&MAGIC);
        bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        bytes.extend_from_slice(&self.division.to_le_bytes());
        bytes.extend_from_slice(&count.to_le_bytes());
        bytes.extend_from_slice(&[0; 4]);

        for event in events {
            bytes.extend_from_slice(&EventRecord::from(event).to_bytes());
        }

        tracing::debug!(events = count, bytes = bytes.len(), "encoded document");
        Ok(BinaryDocument::from_encoded(bytes))
    }
}

fn event_count(len: usize) -> Result<u32, EncodeError> {
    u32::try_from(len).map_err(|_| EncodeError::EventCountOverflow(len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{UMicros, file::SmpteFps, timeline::EventKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn header_layout() {
        let events = [
            MergedEvent::new(0, UMicros::ZERO, 0, EventKind::NoteOn, 0, [60, 100]),
            MergedEvent::new(480, UMicros::new(500_000), 0, EventKind::NoteOff, 0, [60, 0]),
        ];
        let document = BinaryEncoder::new(Timing::new_ticks_per_quarter_note(480))
            .encode(&events)
            .unwrap();
        let bytes = document.as_bytes();

        assert_eq!(bytes.len(), 48);
        assert_eq!(
            &bytes[..16],
            &[b'M', b'B', b'I', b'N', 1, 0, 0xE0, 0x01, 2, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            &bytes[32..48],
            &[0x20, 0xA1, 0x07, 0, 0, 0, 0, 0, 0, 0, 60, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn empty_timeline() {
        let document = BinaryEncoder::new(Timing::new_ticks_per_quarter_note(96))
            .encode(&[])
            .unwrap();
        assert_eq!(document.as_bytes().len(), HEADER_LEN);
        assert_eq!(document.event_count(), 0);
    }

    #[test]
    fn smpte_division_is_stored_raw() {
        let timing = Timing::new_smpte(SmpteFps::TwentyFive, 40);
        let document = BinaryEncoder::new(timing).encode(&[]).unwrap();
        assert_eq!(document.division(), 0xE728);
        assert_eq!(document.ticks_per_quarter_note(), None);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn event_count_overflow() {
        assert_eq!(event_count(u32::MAX as usize), Ok(u32::MAX));
        assert_eq!(
            event_count(u32::MAX as usize + 1),
            Err(EncodeError::EventCountOverflow(u32::MAX as usize + 1))
        );
    }
}
