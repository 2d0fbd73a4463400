//! Byte view and cursor shared by every OSC read.
//!
//! `ByteView` normalizes any contiguous byte source into one borrowed,
//! bounds-checked view. `Cursor` tracks the read position for a single
//! decode; it is never shared between two decodes running at the same time.

use crate::osc::error::OscError;

/// Read-only, randomly addressable view over contiguous bytes.
///
/// The view borrows the source storage; nothing is copied. Sub-ranges
/// returned by [`ByteView::slice`] alias the same storage.
///
/// # Examples
/// ```
/// use oscwire_core::ByteView;
///
/// let owned = vec![0u8, 0, 0, 42];
/// let view = ByteView::new(&owned);
/// assert_eq!(view.read_i32_be(0).unwrap(), 42);
///
/// let fixed = [1u8, 2, 3, 4];
/// assert_eq!(ByteView::from(&fixed).len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteView<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteView<'a> {
    pub fn new<B>(source: &'a B) -> Self
    where
        B: AsRef<[u8]> + ?Sized,
    {
        Self {
            bytes: source.as_ref(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn require_len(&self, offset: usize, needed: usize) -> Result<(), OscError> {
        let end = offset.checked_add(needed).ok_or(OscError::Truncated {
            needed,
            actual: self.remaining_from(offset),
            offset,
        })?;
        if end > self.bytes.len() {
            return Err(OscError::Truncated {
                needed,
                actual: self.remaining_from(offset),
                offset,
            });
        }
        Ok(())
    }

    pub fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8], OscError> {
        self.require_len(offset, len)?;
        Ok(&self.bytes[offset..offset + len])
    }

    pub fn read_array<const N: usize>(&self, offset: usize) -> Result<[u8; N], OscError> {
        let bytes = self.slice(offset, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_i32_be(&self, offset: usize) -> Result<i32, OscError> {
        self.read_array::<4>(offset).map(i32::from_be_bytes)
    }

    pub fn read_f32_be(&self, offset: usize) -> Result<f32, OscError> {
        self.read_array::<4>(offset).map(f32::from_be_bytes)
    }

    fn remaining_from(&self, offset: usize) -> usize {
        self.bytes.len().saturating_sub(offset)
    }
}

impl<'a> From<&'a [u8]> for ByteView<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for ByteView<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self { bytes }
    }
}

impl<'a> From<&'a Vec<u8>> for ByteView<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl AsRef<[u8]> for ByteView<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

/// Read position for one decode.
///
/// Every read advances the cursor. Padding skips are clamped to the view
/// length, so the position always lies within `[0, view.len()]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    idx: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(idx: usize) -> Self {
        Self { idx }
    }

    pub fn position(&self) -> usize {
        self.idx
    }

    pub(crate) fn advance(&mut self, count: usize, limit: usize) {
        self.idx = self.idx.saturating_add(count).min(limit);
    }

    pub(crate) fn align(&mut self, limit: usize) {
        self.idx = crate::osc::layout::padded_len(self.idx).min(limit);
    }
}

#[cfg(test)]
mod tests {
    use super::{ByteView, Cursor};
    use crate::osc::error::OscError;

    #[test]
    fn view_aliases_source() {
        let data = vec![1u8, 2, 3, 4, 5];
        let view = ByteView::new(&data);
        let sub = view.slice(1, 3).unwrap();
        assert_eq!(sub, &[2, 3, 4]);
        assert_eq!(sub.as_ptr(), data[1..].as_ptr());
    }

    #[test]
    fn read_past_end_is_truncated() {
        let data = [0u8; 3];
        let view = ByteView::from(&data);
        let err = view.read_i32_be(0).unwrap_err();
        assert_eq!(
            err,
            OscError::Truncated {
                needed: 4,
                actual: 3,
                offset: 0
            }
        );
    }

    #[test]
    fn offset_beyond_length_is_truncated() {
        let data = [0u8; 4];
        let view = ByteView::from(&data[..]);
        assert!(matches!(
            view.slice(usize::MAX, 2),
            Err(OscError::Truncated { .. })
        ));
        assert!(matches!(view.slice(4, 1), Err(OscError::Truncated { offset: 4, .. })));
    }

    #[test]
    fn cursor_alignment_is_clamped() {
        let mut cursor = Cursor::at(5);
        cursor.align(6);
        assert_eq!(cursor.position(), 6);

        let mut cursor = Cursor::at(5);
        cursor.align(16);
        assert_eq!(cursor.position(), 8);

        cursor.advance(100, 16);
        assert_eq!(cursor.position(), 16);
    }
}
