use tracing::{debug, trace};

use crate::buffer::{ByteView, Cursor};
use crate::{Argument, Args, DecodeOptions, Message, TypedValue};

use super::error::OscError;
use super::layout;
use super::reader::read_string;
use super::tag::TypeTag;

/// Decode one OSC message from `data`.
///
/// When `cursor` is `None` decoding starts at offset 0. A caller-supplied
/// cursor is left just past the last argument on success.
///
/// # Examples
/// ```
/// use oscwire_core::{Args, Argument, DecodeOptions, OscValue, decode_message};
///
/// let data = b"/foo\0\0\0\0,i\0\0\0\0\0\x2a";
/// let message = decode_message(data, None, DecodeOptions::default())?;
/// assert_eq!(message.address, "/foo");
/// assert_eq!(message.args, Args::Single(Argument::Bare(OscValue::Int32(42))));
/// # Ok::<(), oscwire_core::OscError>(())
/// ```
///
/// # Errors
/// Returns `OscError` when the address or type tag string is malformed, a
/// type tag is unknown or unsupported, or an argument runs past the end of
/// the buffer.
pub fn decode_message<'a>(
    data: impl Into<ByteView<'a>>,
    cursor: Option<&mut Cursor>,
    options: DecodeOptions,
) -> Result<Message<'a>, OscError> {
    let view = data.into();
    let mut local = Cursor::new();
    let cursor = cursor.unwrap_or(&mut local);
    read_message(&view, cursor, options)
}

/// Decode one OSC message from an existing view at the cursor position.
pub fn read_message<'a>(
    view: &ByteView<'a>,
    cursor: &mut Cursor,
    options: DecodeOptions,
) -> Result<Message<'a>, OscError> {
    let address_offset = cursor.position();
    let address = read_header_field(view, cursor)?;
    if address == layout::BUNDLE_MARKER {
        debug!(offset = address_offset, "rejecting OSC bundle");
        return Err(OscError::Unsupported {
            feature: "OSC bundles",
            offset: address_offset,
        });
    }
    if !address.starts_with(layout::ADDRESS_PREFIX) {
        debug!(offset = address_offset, %address, "malformed OSC address");
        return Err(OscError::MalformedAddress {
            address,
            offset: address_offset,
        });
    }

    let arguments = read_arguments(view, cursor, options.with_metadata)?;
    debug!(
        %address,
        args = arguments.len(),
        end = cursor.position(),
        "decoded OSC message"
    );

    let args = if options.unwrap_single {
        Args::from_vec(arguments)
    } else {
        Args::List(arguments)
    };

    Ok(Message { address, args })
}

/// Address and type tag strings that are absent at the end of the buffer
/// read as empty, so the prefix checks report them as malformed.
fn read_header_field(view: &ByteView<'_>, cursor: &mut Cursor) -> Result<String, OscError> {
    if cursor.position() >= view.len() {
        return Ok(String::new());
    }
    read_string(view, cursor)
}

fn read_arguments<'a>(
    view: &ByteView<'a>,
    cursor: &mut Cursor,
    with_metadata: bool,
) -> Result<Vec<Argument<'a>>, OscError> {
    let tags_offset = cursor.position();
    let type_tags = read_header_field(view, cursor)?;
    let Some(tags) = type_tags.strip_prefix(layout::TYPE_TAG_PREFIX) else {
        debug!(offset = tags_offset, %type_tags, "malformed type tag string");
        return Err(OscError::MalformedTypeTag {
            type_tags,
            offset: tags_offset,
        });
    };

    let mut arguments = Vec::with_capacity(tags.len());
    for (index, tag_char) in tags.chars().enumerate() {
        let Some(tag) = TypeTag::from_char(tag_char) else {
            return Err(OscError::UnknownTypeTag {
                tag: tag_char,
                type_tags: type_tags.clone(),
                // Position of the offending character inside the tag string.
                offset: tags_offset + 1 + index,
            });
        };

        let value = tag.read(view, cursor)?;
        trace!(tag = %tag_char, offset = cursor.position(), "read OSC argument");
        arguments.push(if with_metadata {
            Argument::Typed(TypedValue {
                type_tag: tag_char,
                value,
            })
        } else {
            Argument::Bare(value)
        });
    }

    Ok(arguments)
}
