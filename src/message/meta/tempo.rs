/// The tempo MIDI assumes until a `Set Tempo` event says otherwise (120 bpm).
pub const DEFAULT_MICROS_PER_QUARTER_NOTE: u32 = 500_000;

/// Microseconds per quarter note, as set by the `FF 51 03 tt tt tt` meta event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo(u32);

impl Default for Tempo {
    fn default() -> Self {
        Self(DEFAULT_MICROS_PER_QUARTER_NOTE)
    }
}

impl Tempo {
    /// Create a tempo from microseconds per quarter note
    pub const fn new(micros_per_quarter_note: u32) -> Self {
        Self(micros_per_quarter_note)
    }

    /// Decode the three big-endian payload bytes.
    ///
    /// Returns `None` unless `bytes` is exactly three long.
    pub const fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match *bytes {
            [a, b, c] => Some(Self(u32::from_be_bytes([0, a, b, c]))),
            _ => None,
        }
    }

    /// Microseconds per quarter note
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.0
    }

    /// Beats per minute, for display
    pub fn bpm(&self) -> f64 {
        60_000_000. / self.0 as f64
    }
}

#[test]
fn decodes_tempo_payload() {
    use pretty_assertions::assert_eq;
    assert_eq!(Tempo::from_bytes(&[0x07, 0xA1, 0x20]), Some(Tempo::new(500_000)));
    assert_eq!(Tempo::from_bytes(&[0x07, 0xA1]), None);
    assert_eq!(Tempo::default().bpm(), 120.);
}
