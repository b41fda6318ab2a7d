/// Unsigned Microseconds
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UMicros(u64);

impl UMicros {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Creates a new instance of microseconds
    #[inline]
    pub const fn new(microseconds: u64) -> Self {
        Self(microseconds)
    }

    /// Returns the microseconds as a u64
    #[inline]
    pub const fn us(&self) -> u64 {
        self.0
    }

    /// The duration of `ticks` at `micros_per_quarter_note`, rounded down.
    ///
    /// The product is formed in 128 bits, so no tick count or tempo can
    /// overflow before the division. Results past `u64::MAX` saturate.
    pub const fn from_ticks(
        ticks: u64,
        micros_per_quarter_note: u32,
        ticks_per_quarter_note: u16,
    ) -> Self {
        let micros =
            ticks as u128 * micros_per_quarter_note as u128 / ticks_per_quarter_note as u128;
        Self::saturating_from_u128(micros)
    }

    /// The duration of `ticks` when one second holds `ticks_per_second` ticks, rounded down.
    pub const fn from_ticks_per_second(ticks: u64, ticks_per_second: u32) -> Self {
        let micros = ticks as u128 * 1_000_000 / ticks_per_second as u128;
        Self::saturating_from_u128(micros)
    }

    const fn saturating_from_u128(micros: u128) -> Self {
        if micros > u64::MAX as u128 {
            Self(u64::MAX)
        } else {
            Self(micros as u64)
        }
    }

    /// Adds, stopping at `u64::MAX`.
    pub const fn saturating_add(&self, other: Self) -> UMicros {
        UMicros(self.0.saturating_add(other.0))
    }
}

impl From<UMicros> for u64 {
    fn from(value: UMicros) -> Self {
        value.0
    }
}

#[test]
fn ticks_to_micros() {
    use pretty_assertions::assert_eq;
    // one quarter note at 120 bpm
    assert_eq!(UMicros::from_ticks(480, 500_000, 480), UMicros::new(500_000));
    // rounds down
    assert_eq!(UMicros::from_ticks(1, 500_000, 480), UMicros::new(1_041));
    // no intermediate overflow
    assert_eq!(
        UMicros::from_ticks(u32::MAX as u64 * 4, 0x00FF_FFFF, 1),
        UMicros::new(u32::MAX as u64 * 4 * 0x00FF_FFFF)
    );
    assert_eq!(UMicros::from_ticks_per_second(1_200, 1_200), UMicros::new(1_000_000));
}
