#![doc = r#"
Variable-length quantities

Delta times and the lengths of meta and system exclusive payloads are stored as
big-endian groups of 7 bits. Every byte but the last has its top bit set:

```text
0x00        -> 0
0x7F        -> 127
0x81 0x00   -> 128
0xFF 0x7F   -> 16 383
0xFF 0xFF 0xFF 0x7F -> 268 435 455 (the largest representable value)
```
"#]

use super::{ReadResult, ReaderError};
use crate::FormatError;

/// The most bytes a quantity may span.
pub const MAX_VARLEN_BYTES: usize = 4;

/// Decode the quantity starting at `offset`.
///
/// Returns the value and the number of bytes it occupied. `offset` is left to
/// the caller to advance.
///
/// # Errors
/// - [`FormatError::VarLengthOverflow`] if the fourth byte still has its
///   continuation bit set.
/// - [`FormatError::UnexpectedEndOfTrack`] if `bytes` ends first.
///
/// # Example
/// ```rust
/// # use midibin::reader::decode_varlen;
/// assert_eq!(decode_varlen(&[0x00, 0x83, 0x60, 0x90], 1).unwrap(), (480, 2));
/// ```
pub fn decode_varlen(bytes: &[u8], offset: usize) -> ReadResult<(u32, u8)> {
    let mut value: u32 = 0;
    for consumed in 0..MAX_VARLEN_BYTES {
        let position = offset + consumed;
        let Some(&byte) = bytes.get(position) else {
            return Err(ReaderError::oob(
                position,
                1,
                bytes.len().saturating_sub(position),
            ));
        };
        value = (value << 7) | u32::from(byte & 0x7F);
        if byte & 0x80 == 0 {
            return Ok((value, consumed as u8 + 1));
        }
    }
    Err(ReaderError::new(
        offset + MAX_VARLEN_BYTES - 1,
        FormatError::VarLengthOverflow,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_reference_values() {
        let cases: [(&[u8], u32); 8] = [
            (&[0x00], 0),
            (&[0x40], 0x40),
            (&[0x7F], 0x7F),
            (&[0x81, 0x00], 0x80),
            (&[0xC0, 0x00], 0x2000),
            (&[0xFF, 0x7F], 0x3FFF),
            (&[0x81, 0x80, 0x00], 0x4000),
            (&[0xFF, 0xFF, 0xFF, 0x7F], 0x0FFF_FFFF),
        ];
        for (bytes, expected) in cases {
            assert_eq!(
                decode_varlen(bytes, 0).unwrap(),
                (expected, bytes.len() as u8)
            );
        }
    }

    #[test]
    fn stops_at_terminating_byte() {
        // trailing bytes belong to the next field
        let (value, consumed) = decode_varlen(&[0x83, 0x60, 0x90, 0x3C], 0).unwrap();
        assert_eq!(value, 480);
        assert_eq!(consumed, 2);
    }

    #[test]
    fn fifth_continuation_byte_overflows() {
        let err = decode_varlen(&[0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F], 1).unwrap_err();
        assert_eq!(err.error_kind(), &FormatError::VarLengthOverflow);
        assert_eq!(err.position(), 4);
    }

    #[test]
    fn truncated_quantity_is_end_of_track() {
        let err = decode_varlen(&[0x81, 0x80], 0).unwrap_err();
        assert!(err.is_out_of_bounds());
        assert_eq!(err.position(), 2);
    }
}
