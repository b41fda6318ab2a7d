/// How the tracks of a file relate to each other.
///
/// The transcoder merges every track onto one timeline regardless of format;
/// the type is kept for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// Format 0, a single track
    SingleMultiChannel,
    /// Format 1, simultaneous tracks
    Simultaneous,
    /// Format 2, independent sequences
    SequentiallyIndependent,
    /// Any other format word
    Unknown(u16),
}
