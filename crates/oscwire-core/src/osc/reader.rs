//! Cursor-advancing reads for the OSC primitive, string and blob encodings.
//!
//! Every read starts at the cursor position and leaves the cursor on the
//! next 4-byte boundary after the field. Out-of-range reads fail with
//! [`OscError::Truncated`].

use crate::buffer::{ByteView, Cursor};

use super::error::OscError;
use super::layout;

/// Read a big-endian `int32` and advance the cursor by 4.
pub fn read_int32(view: &ByteView<'_>, cursor: &mut Cursor) -> Result<i32, OscError> {
    let value = view.read_i32_be(cursor.position())?;
    cursor.advance(layout::PRIMITIVE_LEN, view.len());
    Ok(value)
}

/// Read a big-endian `float32` and advance the cursor by 4.
pub fn read_float32(view: &ByteView<'_>, cursor: &mut Cursor) -> Result<f32, OscError> {
    let value = view.read_f32_be(cursor.position())?;
    cursor.advance(layout::PRIMITIVE_LEN, view.len());
    Ok(value)
}

/// Read a NUL-terminated OSC string.
///
/// Each byte maps to one `char` of the same code point. A missing terminator
/// is tolerated: the string runs to the end of the buffer. The cursor is
/// then aligned to the next 4-byte boundary either way. At least one byte
/// must remain at the cursor.
///
/// # Examples
/// ```
/// use oscwire_core::{ByteView, Cursor, read_string};
///
/// let data = *b"/foo\0\0\0\0";
/// let view = ByteView::from(&data);
/// let mut cursor = Cursor::new();
/// assert_eq!(read_string(&view, &mut cursor).unwrap(), "/foo");
/// assert_eq!(cursor.position(), 8);
/// ```
pub fn read_string(view: &ByteView<'_>, cursor: &mut Cursor) -> Result<String, OscError> {
    let start = cursor.position();
    if start >= view.len() {
        return Err(OscError::Truncated {
            needed: 1,
            actual: 0,
            offset: start,
        });
    }

    let tail = &view.as_bytes()[start..];
    let (text, consumed) = match tail.iter().position(|&b| b == 0) {
        Some(nul) => (&tail[..nul], nul + 1),
        None => (tail, tail.len()),
    };

    cursor.advance(consumed, view.len());
    cursor.align(view.len());

    Ok(text.iter().map(|&b| char::from(b)).collect())
}

/// Read a size-prefixed blob.
///
/// The returned slice has exactly the declared length and aliases the source
/// buffer. Padding after the payload is skipped without being inspected.
///
/// # Examples
/// ```
/// use oscwire_core::{ByteView, Cursor, read_blob};
///
/// let data = [0u8, 0, 0, 3, 0xaa, 0xbb, 0xcc, 0x00];
/// let view = ByteView::from(&data);
/// let mut cursor = Cursor::new();
/// assert_eq!(read_blob(&view, &mut cursor).unwrap(), &[0xaa, 0xbb, 0xcc]);
/// assert_eq!(cursor.position(), 8);
/// ```
pub fn read_blob<'a>(view: &ByteView<'a>, cursor: &mut Cursor) -> Result<&'a [u8], OscError> {
    let size_offset = cursor.position();
    let length = read_int32(view, cursor)?;
    let len = usize::try_from(length).map_err(|_| OscError::InvalidBlobLength {
        length,
        offset: size_offset,
    })?;

    let blob = view.slice(cursor.position(), len)?;
    cursor.advance(layout::padded_len(len), view.len());
    Ok(blob)
}

#[cfg(test)]
mod tests {
    use super::{read_blob, read_float32, read_int32, read_string};
    use crate::buffer::{ByteView, Cursor};
    use crate::osc::error::OscError;

    #[test]
    fn read_int32_big_endian() {
        let data = [0xffu8, 0xff, 0xff, 0xfe, 0x00, 0x00, 0x01, 0x00];
        let view = ByteView::from(&data);
        let mut cursor = Cursor::new();
        assert_eq!(read_int32(&view, &mut cursor).unwrap(), -2);
        assert_eq!(read_int32(&view, &mut cursor).unwrap(), 256);
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn read_float32_big_endian() {
        let data = 440.0f32.to_be_bytes();
        let view = ByteView::from(&data);
        let mut cursor = Cursor::new();
        assert_eq!(read_float32(&view, &mut cursor).unwrap(), 440.0);
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn read_int32_truncated() {
        let data = [0u8; 6];
        let view = ByteView::from(&data);
        let mut cursor = Cursor::at(4);
        let err = read_int32(&view, &mut cursor).unwrap_err();
        assert!(matches!(err, OscError::Truncated { offset: 4, .. }));
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn read_string_exact_multiple_of_four() {
        // "abc" + NUL fills a single 4-byte block.
        let data = *b"abc\0next";
        let view = ByteView::from(&data);
        let mut cursor = Cursor::new();
        assert_eq!(read_string(&view, &mut cursor).unwrap(), "abc");
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn read_string_four_chars_needs_full_padding_block() {
        let data = *b"abcd\0\0\0\0";
        let view = ByteView::from(&data);
        let mut cursor = Cursor::new();
        assert_eq!(read_string(&view, &mut cursor).unwrap(), "abcd");
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn read_string_without_terminator_runs_to_end() {
        let data = *b"/abcde";
        let view = ByteView::from(&data);
        let mut cursor = Cursor::new();
        assert_eq!(read_string(&view, &mut cursor).unwrap(), "/abcde");
        assert_eq!(cursor.position(), data.len());
    }

    #[test]
    fn read_string_at_end_is_truncated() {
        let data = *b"abc\0";
        let view = ByteView::from(&data);
        let mut cursor = Cursor::at(4);
        let err = read_string(&view, &mut cursor).unwrap_err();
        assert!(matches!(err, OscError::Truncated { offset: 4, .. }));
    }

    #[test]
    fn read_string_maps_bytes_to_chars() {
        let data = [0x2fu8, 0xe9, 0x00, 0x00];
        let view = ByteView::from(&data);
        let mut cursor = Cursor::new();
        assert_eq!(read_string(&view, &mut cursor).unwrap(), "/\u{e9}");
    }

    #[test]
    fn read_blob_skips_padding_without_validation() {
        let data = [0u8, 0, 0, 1, 0x7f, 0xde, 0xad, 0xbe, 0, 0, 0, 9];
        let view = ByteView::from(&data);
        let mut cursor = Cursor::new();
        assert_eq!(read_blob(&view, &mut cursor).unwrap(), &[0x7f]);
        assert_eq!(cursor.position(), 8);
        assert_eq!(read_int32(&view, &mut cursor).unwrap(), 9);
    }

    #[test]
    fn read_blob_negative_length() {
        let data = (-1i32).to_be_bytes();
        let view = ByteView::from(&data);
        let mut cursor = Cursor::new();
        let err = read_blob(&view, &mut cursor).unwrap_err();
        assert_eq!(
            err,
            OscError::InvalidBlobLength {
                length: -1,
                offset: 0
            }
        );
    }

    #[test]
    fn read_blob_length_past_end() {
        let data = [0u8, 0, 0, 8, 1, 2, 3, 4];
        let view = ByteView::from(&data);
        let mut cursor = Cursor::new();
        let err = read_blob(&view, &mut cursor).unwrap_err();
        assert!(matches!(err, OscError::Truncated { needed: 8, actual: 4, offset: 4 }));
    }
}
