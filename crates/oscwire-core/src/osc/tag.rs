use crate::OscValue;
use crate::buffer::{ByteView, Cursor};

use super::error::OscError;
use super::layout;
use super::reader::{read_blob, read_float32, read_int32, read_string};

/// Argument type tags understood by the decoder.
///
/// The set is closed: any other character in a type tag string is rejected.
/// `TimeTag` is recognized so it can be reported as unsupported rather than
/// unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Int32,
    Float32,
    String,
    Blob,
    True,
    False,
    Nil,
    Impulse,
    Symbol,
    TimeTag,
}

impl TypeTag {
    pub fn from_char(tag: char) -> Option<Self> {
        match tag {
            layout::TAG_INT32 => Some(Self::Int32),
            layout::TAG_FLOAT32 => Some(Self::Float32),
            layout::TAG_STRING => Some(Self::String),
            layout::TAG_BLOB => Some(Self::Blob),
            layout::TAG_TRUE => Some(Self::True),
            layout::TAG_FALSE => Some(Self::False),
            layout::TAG_NIL => Some(Self::Nil),
            layout::TAG_IMPULSE => Some(Self::Impulse),
            layout::TAG_SYMBOL => Some(Self::Symbol),
            layout::TAG_TIME_TAG => Some(Self::TimeTag),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Int32 => layout::TAG_INT32,
            Self::Float32 => layout::TAG_FLOAT32,
            Self::String => layout::TAG_STRING,
            Self::Blob => layout::TAG_BLOB,
            Self::True => layout::TAG_TRUE,
            Self::False => layout::TAG_FALSE,
            Self::Nil => layout::TAG_NIL,
            Self::Impulse => layout::TAG_IMPULSE,
            Self::Symbol => layout::TAG_SYMBOL,
            Self::TimeTag => layout::TAG_TIME_TAG,
        }
    }

    /// Decode one argument of this type at the cursor.
    ///
    /// `T`, `F`, `N` and `I` carry no payload and leave the cursor untouched.
    pub fn read<'a>(self, view: &ByteView<'a>, cursor: &mut Cursor) -> Result<OscValue<'a>, OscError> {
        match self {
            Self::Int32 => read_int32(view, cursor).map(OscValue::Int32),
            Self::Float32 => read_float32(view, cursor).map(OscValue::Float32),
            Self::String => read_string(view, cursor).map(OscValue::String),
            Self::Symbol => read_string(view, cursor).map(OscValue::Symbol),
            Self::Blob => read_blob(view, cursor).map(OscValue::Blob),
            Self::True => Ok(OscValue::True),
            Self::False => Ok(OscValue::False),
            Self::Nil => Ok(OscValue::Nil),
            Self::Impulse => Ok(OscValue::Impulse),
            Self::TimeTag => Err(OscError::Unsupported {
                feature: "time tag arguments",
                offset: cursor.position(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TypeTag;
    use crate::OscValue;
    use crate::buffer::{ByteView, Cursor};
    use crate::osc::error::OscError;

    #[test]
    fn every_tag_round_trips_through_char() {
        for tag in ['i', 'f', 's', 'b', 'T', 'F', 'N', 'I', 'S', 't'] {
            let parsed = TypeTag::from_char(tag).unwrap();
            assert_eq!(parsed.as_char(), tag);
        }
    }

    #[test]
    fn optional_osc_types_are_not_recognized() {
        for tag in ['h', 'd', 'c', 'r', 'm', 'z', ','] {
            assert_eq!(TypeTag::from_char(tag), None);
        }
    }

    #[test]
    fn literal_tags_consume_no_bytes() {
        let data: [u8; 0] = [];
        let view = ByteView::from(&data);
        let mut cursor = Cursor::new();
        assert_eq!(TypeTag::True.read(&view, &mut cursor).unwrap(), OscValue::True);
        assert_eq!(TypeTag::False.read(&view, &mut cursor).unwrap(), OscValue::False);
        assert_eq!(TypeTag::Nil.read(&view, &mut cursor).unwrap(), OscValue::Nil);
        assert_eq!(
            TypeTag::Impulse.read(&view, &mut cursor).unwrap(),
            OscValue::Impulse
        );
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn symbol_uses_string_rule() {
        let data = *b"sym\0";
        let view = ByteView::from(&data);
        let mut cursor = Cursor::new();
        assert_eq!(
            TypeTag::Symbol.read(&view, &mut cursor).unwrap(),
            OscValue::Symbol("sym".to_string())
        );
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn time_tag_is_rejected_explicitly() {
        let data = [0u8; 8];
        let view = ByteView::from(&data);
        let mut cursor = Cursor::new();
        let err = TypeTag::TimeTag.read(&view, &mut cursor).unwrap_err();
        assert!(matches!(err, OscError::Unsupported { offset: 0, .. }));
    }
}
