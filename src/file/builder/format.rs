use crate::file::FormatType;

#[doc = r#"
The format word and declared track count of the header chunk.

```text
format 0: one track holding every channel
format 1: several tracks played simultaneously
format 2: several independent sequences
```

The track count is only what the header *declares*; the builder counts the
`MTrk` chunks it actually sees and logs any mismatch.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawFormat {
    /// Format 0
    SingleMultiChannel,
    /// Format 1
    Simultaneous([u8; 2]),
    /// Format 2
    SequentiallyIndependent([u8; 2]),
    /// A format word outside 0..=2
    Other {
        /// The raw format word
        format: u16,
        /// The declared track count
        tracks: [u8; 2],
    },
}
impl RawFormat {
    pub(crate) const fn from_bytes(format: u16, tracks: [u8; 2]) -> Self {
        match format {
            0 => Self::SingleMultiChannel,
            1 => Self::Simultaneous(tracks),
            2 => Self::SequentiallyIndependent(tracks),
            format => Self::Other { format, tracks },
        }
    }

    /// Returns the number of tracks identified by the format.
    ///
    /// [`RawFormat::SingleMultiChannel`] will always return 1.
    pub const fn num_tracks(&self) -> u16 {
        use RawFormat::*;
        match &self {
            SingleMultiChannel => 1,
            Simultaneous(num) | SequentiallyIndependent(num) | Other { tracks: num, .. } => {
                u16::from_be_bytes(*num)
            }
        }
    }

    /// Returns the format type of the format.
    pub const fn format_type(&self) -> FormatType {
        use RawFormat::*;
        match self {
            SingleMultiChannel => FormatType::SingleMultiChannel,
            Simultaneous(_) => FormatType::Simultaneous,
            SequentiallyIndependent(_) => FormatType::SequentiallyIndependent,
            Other { format, .. } => FormatType::Unknown(*format),
        }
    }
}

#[test]
fn decodes_format_words() {
    use pretty_assertions::assert_eq;
    assert_eq!(RawFormat::from_bytes(0, [0, 3]).num_tracks(), 1);
    assert_eq!(RawFormat::from_bytes(1, [0, 3]).num_tracks(), 3);
    assert_eq!(
        RawFormat::from_bytes(2, [1, 0]).format_type(),
        FormatType::SequentiallyIndependent
    );
    assert_eq!(
        RawFormat::from_bytes(7, [0, 1]).format_type(),
        FormatType::Unknown(7)
    );
}
