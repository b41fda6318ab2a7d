/// Every channel enabled.
pub const ALL_CHANNELS: u16 = 0xFFFF;

#[doc = r#"
Knobs for a transcode.

The defaults keep every event of the input. The filters exist for engines that
only drive melodic voices: anything they remove is counted in
[`TranscodeReport::filtered_events`](crate::transcode::TranscodeReport::filtered_events),
never dropped silently.

```rust
# use midibin::prelude::*;
let options = TranscodeOptions::default()
    .with_skip_percussion(true)
    .with_channel_mask(0x00FF);
assert!(!options.keeps_channel(Channel::Ten));
assert!(!options.keeps_channel(Channel::Twelve));
assert!(options.keeps_channel(Channel::One));
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TranscodeOptions {
    /// Bit `n` keeps channel `n` (zero-based)
    pub channel_mask: u16,
    /// Drop channel 10 regardless of the mask
    pub skip_percussion: bool,
    /// Record a note on with velocity zero as a note off
    pub velocity_zero_note_off: bool,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            channel_mask: ALL_CHANNELS,
            skip_percussion: false,
            velocity_zero_note_off: true,
        }
    }
}

impl TranscodeOptions {
    /// Set the channel mask
    pub const fn with_channel_mask(mut self, channel_mask: u16) -> Self {
        self.channel_mask = channel_mask;
        self
    }

    /// Set whether channel 10 is dropped
    pub const fn with_skip_percussion(mut self, skip_percussion: bool) -> Self {
        self.skip_percussion = skip_percussion;
        self
    }

    /// Set whether zero-velocity note ons become note offs
    pub const fn with_velocity_zero_note_off(mut self, velocity_zero_note_off: bool) -> Self {
        self.velocity_zero_note_off = velocity_zero_note_off;
        self
    }

    /// True if channel messages on `channel` survive the filters
    pub fn keeps_channel(&self, channel: crate::message::channel::Channel) -> bool {
        if self.skip_percussion && channel.is_percussion() {
            return false;
        }
        self.channel_mask & (1 << channel.index()) != 0
    }
}
