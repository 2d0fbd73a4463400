//! Wire encoding for OSC arguments and messages.

use tracing::debug;

use crate::OscValue;

use super::error::OscError;
use super::layout;

/// Write a big-endian `int32` into `target` at `offset` and return `target`.
///
/// # Examples
/// ```
/// use oscwire_core::write_int32;
///
/// let mut target = [0u8; 8];
/// let written = write_int32(-1, &mut target, 4).unwrap();
/// assert_eq!(written, &[0, 0, 0, 0, 0xff, 0xff, 0xff, 0xff]);
/// ```
///
/// # Errors
/// Returns `OscError::BufferTooSmall` when `target` cannot hold 4 bytes at
/// `offset`.
pub fn write_int32(value: i32, target: &mut [u8], offset: usize) -> Result<&[u8], OscError> {
    write_primitive(value.to_be_bytes(), target, offset)
}

/// Write a big-endian `float32` into `target` at `offset` and return `target`.
///
/// # Errors
/// Returns `OscError::BufferTooSmall` when `target` cannot hold 4 bytes at
/// `offset`.
pub fn write_float32(value: f32, target: &mut [u8], offset: usize) -> Result<&[u8], OscError> {
    write_primitive(value.to_be_bytes(), target, offset)
}

fn write_primitive(
    bytes: [u8; layout::PRIMITIVE_LEN],
    target: &mut [u8],
    offset: usize,
) -> Result<&[u8], OscError> {
    let end = offset
        .checked_add(bytes.len())
        .filter(|end| *end <= target.len())
        .ok_or(OscError::BufferTooSmall {
            needed: offset.saturating_add(bytes.len()),
            actual: target.len(),
        })?;
    target[offset..end].copy_from_slice(&bytes);
    Ok(target)
}

pub fn encode_int32(value: i32) -> [u8; 4] {
    value.to_be_bytes()
}

pub fn encode_float32(value: f32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Encode an OSC string: one byte per char, a NUL terminator, then zero
/// padding to the next 4-byte boundary.
///
/// # Examples
/// ```
/// use oscwire_core::encode_string;
///
/// assert_eq!(encode_string("/foo").unwrap(), b"/foo\0\0\0\0");
/// assert_eq!(encode_string("abc").unwrap(), b"abc\0");
/// ```
///
/// # Errors
/// Returns `OscError::UnencodableString` for an embedded NUL or a char above
/// U+00FF, neither of which survives a decode.
pub fn encode_string(value: &str) -> Result<Vec<u8>, OscError> {
    let mut out = Vec::with_capacity(layout::padded_len(value.len() + 1));
    append_string(&mut out, value)?;
    Ok(out)
}

/// Encode a blob: a 4-byte big-endian size, the bytes, then zero padding.
///
/// The size prefix holds the unpadded length so decoding returns exactly
/// the input.
///
/// # Examples
/// ```
/// use oscwire_core::encode_blob;
///
/// let encoded = encode_blob(&[1, 2, 3]).unwrap();
/// assert_eq!(encoded, [0, 0, 0, 3, 1, 2, 3, 0]);
/// ```
///
/// # Errors
/// Returns `OscError::BlobTooLarge` when the length does not fit the signed
/// 32-bit size prefix.
pub fn encode_blob(data: &[u8]) -> Result<Vec<u8>, OscError> {
    let mut out = Vec::with_capacity(layout::SIZE_PREFIX_LEN + layout::padded_len(data.len()));
    append_blob(&mut out, data)?;
    Ok(out)
}

/// Encode a complete OSC message: address, type tag string, arguments.
///
/// # Examples
/// ```
/// use oscwire_core::{OscValue, encode_message};
///
/// let bytes = encode_message("/foo", &[OscValue::Int32(42)]).unwrap();
/// assert_eq!(bytes, b"/foo\0\0\0\0,i\0\0\0\0\0\x2a");
/// ```
///
/// # Errors
/// Returns `OscError::MalformedAddress` when `address` does not start with
/// `/`, `OscError::UnencodableString` for strings that cannot be encoded, or
/// `OscError::BlobTooLarge` for an oversized blob.
pub fn encode_message(address: &str, args: &[OscValue<'_>]) -> Result<Vec<u8>, OscError> {
    if !address.starts_with(layout::ADDRESS_PREFIX) {
        return Err(OscError::MalformedAddress {
            address: address.to_string(),
            offset: 0,
        });
    }

    let type_tags: String = std::iter::once(layout::TYPE_TAG_PREFIX)
        .chain(args.iter().map(|arg| arg.type_tag().as_char()))
        .collect();

    let mut out = Vec::new();
    append_string(&mut out, address)?;
    append_string(&mut out, &type_tags)?;
    for arg in args {
        match arg {
            OscValue::Int32(value) => out.extend_from_slice(&encode_int32(*value)),
            OscValue::Float32(value) => out.extend_from_slice(&encode_float32(*value)),
            OscValue::String(value) | OscValue::Symbol(value) => append_string(&mut out, value)?,
            OscValue::Blob(data) => append_blob(&mut out, data)?,
            OscValue::True | OscValue::False | OscValue::Nil | OscValue::Impulse => {}
        }
    }

    debug!(%address, %type_tags, bytes = out.len(), "encoded OSC message");
    Ok(out)
}

fn append_string(out: &mut Vec<u8>, value: &str) -> Result<(), OscError> {
    for ch in value.chars() {
        let byte = u8::try_from(ch).map_err(|_| OscError::UnencodableString {
            reason: format!("char {ch:?} is outside the single-byte range"),
        })?;
        if byte == 0 {
            return Err(OscError::UnencodableString {
                reason: "embedded NUL byte".to_string(),
            });
        }
        out.push(byte);
    }
    out.push(0);
    pad(out);
    Ok(())
}

fn append_blob(out: &mut Vec<u8>, data: &[u8]) -> Result<(), OscError> {
    let size = i32::try_from(data.len()).map_err(|_| OscError::BlobTooLarge {
        length: data.len(),
    })?;
    out.extend_from_slice(&encode_int32(size));
    out.extend_from_slice(data);
    pad(out);
    Ok(())
}

fn pad(out: &mut Vec<u8>) {
    out.resize(layout::padded_len(out.len()), 0);
}

#[cfg(test)]
mod tests {
    use super::{encode_blob, encode_message, encode_string, write_float32, write_int32};
    use crate::OscValue;
    use crate::osc::error::OscError;

    #[test]
    fn write_int32_at_offset() {
        let mut target = [0xaau8; 6];
        let written = write_int32(0x0102_0304, &mut target, 2).unwrap();
        assert_eq!(written, &[0xaa, 0xaa, 1, 2, 3, 4]);
    }

    #[test]
    fn write_float32_is_big_endian() {
        let mut target = [0u8; 4];
        write_float32(1.0, &mut target, 0).unwrap();
        assert_eq!(target, [0x3f, 0x80, 0x00, 0x00]);
    }

    #[test]
    fn write_past_end_fails() {
        let mut target = [0u8; 4];
        let err = write_int32(1, &mut target, 1).unwrap_err();
        assert_eq!(
            err,
            OscError::BufferTooSmall {
                needed: 5,
                actual: 4
            }
        );
    }

    #[test]
    fn empty_string_is_one_padded_block() {
        assert_eq!(encode_string("").unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn string_with_nul_is_rejected() {
        let err = encode_string("a\0b").unwrap_err();
        assert!(err.to_string().contains("embedded NUL"));
    }

    #[test]
    fn string_with_wide_char_is_rejected() {
        assert!(matches!(
            encode_string("/\u{263a}"),
            Err(OscError::UnencodableString { .. })
        ));
    }

    #[test]
    fn latin1_string_encodes_one_byte_per_char() {
        assert_eq!(encode_string("\u{e9}").unwrap(), vec![0xe9, 0, 0, 0]);
    }

    #[test]
    fn blob_copies_declared_input() {
        let source = [9u8, 8, 7, 6, 5];
        let encoded = encode_blob(&source).unwrap();
        assert_eq!(encoded.len(), 4 + 8);
        assert_eq!(&encoded[..4], &[0, 0, 0, 5]);
        assert_eq!(&encoded[4..9], &source);
        assert_eq!(&encoded[9..], &[0, 0, 0]);
    }

    #[test]
    fn empty_blob_is_size_only() {
        assert_eq!(encode_blob(&[]).unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn message_requires_address_prefix() {
        let err = encode_message("foo", &[]).unwrap_err();
        assert!(matches!(err, OscError::MalformedAddress { .. }));
    }

    #[test]
    fn message_with_literals_has_no_payload() {
        let bytes = encode_message("/x", &[OscValue::True, OscValue::Nil, OscValue::Impulse])
            .unwrap();
        assert_eq!(bytes, b"/x\0\0,TNI\0\0\0\0");
    }
}
