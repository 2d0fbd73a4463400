//! oscwire core library: an Open Sound Control (OSC 1.0) message codec.
//!
//! Decoding turns a byte buffer into a [`Message`] (address plus ordered
//! arguments); encoding turns values back into their wire form. The codec is
//! pure and synchronous: no I/O, no shared state. Transport is left to the
//! caller.
//!
//! Invariants:
//! - Every field is 4-byte aligned; numeric fields are big-endian.
//! - Reads never go past the end of the buffer; doing so is
//!   [`OscError::Truncated`].
//! - Blob values borrow from the decoded buffer.
//!
//! # Examples
//! ```
//! use oscwire_core::{DecodeOptions, OscValue, decode_message, encode_message};
//!
//! let bytes = encode_message("/bar", &[OscValue::Int32(1), OscValue::Int32(2)])?;
//! let message = decode_message(&bytes, None, DecodeOptions::default())?;
//! assert_eq!(message.address, "/bar");
//! assert_eq!(message.args.len(), 2);
//! # Ok::<(), oscwire_core::OscError>(())
//! ```

use serde::{Serialize, Serializer};

mod buffer;
mod osc;

pub use buffer::{ByteView, Cursor};
pub use osc::error::OscError;
pub use osc::layout::padded_len;
pub use osc::reader::{read_blob, read_float32, read_int32, read_string};
pub use osc::tag::TypeTag;
pub use osc::writer::{
    encode_blob, encode_float32, encode_int32, encode_message, encode_string, write_float32,
    write_int32,
};
pub use osc::{decode_message, read_message};

/// Decoding knobs.
///
/// The default keeps bare values and collapses a single argument into
/// [`Args::Single`].
///
/// # Examples
/// ```
/// use oscwire_core::DecodeOptions;
///
/// let options = DecodeOptions::default().with_metadata().keep_list();
/// assert!(options.with_metadata);
/// assert!(!options.unwrap_single);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Pair each value with its type tag character.
    pub with_metadata: bool,
    /// Expose a one-argument message as that argument alone.
    pub unwrap_single: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            with_metadata: false,
            unwrap_single: true,
        }
    }
}

impl DecodeOptions {
    pub fn with_metadata(mut self) -> Self {
        self.with_metadata = true;
        self
    }

    pub fn keep_list(mut self) -> Self {
        self.unwrap_single = false;
        self
    }
}

/// A decoded argument value.
///
/// Serializes to the natural JSON form: numbers, strings, byte arrays for
/// blobs, booleans, `null` for nil and `1.0` for impulse.
#[derive(Debug, Clone, PartialEq)]
pub enum OscValue<'a> {
    Int32(i32),
    Float32(f32),
    String(String),
    Symbol(String),
    Blob(&'a [u8]),
    True,
    False,
    Nil,
    Impulse,
}

impl OscValue<'_> {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::Int32(_) => TypeTag::Int32,
            Self::Float32(_) => TypeTag::Float32,
            Self::String(_) => TypeTag::String,
            Self::Symbol(_) => TypeTag::Symbol,
            Self::Blob(_) => TypeTag::Blob,
            Self::True => TypeTag::True,
            Self::False => TypeTag::False,
            Self::Nil => TypeTag::Nil,
            Self::Impulse => TypeTag::Impulse,
        }
    }
}

impl Serialize for OscValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int32(value) => serializer.serialize_i32(*value),
            Self::Float32(value) => serializer.serialize_f32(*value),
            Self::String(value) | Self::Symbol(value) => serializer.serialize_str(value),
            Self::Blob(bytes) => serializer.collect_seq(bytes.iter()),
            Self::True => serializer.serialize_bool(true),
            Self::False => serializer.serialize_bool(false),
            Self::Nil => serializer.serialize_unit(),
            Self::Impulse => serializer.serialize_f64(osc::layout::IMPULSE_VALUE),
        }
    }
}

/// A value paired with the type tag character it was decoded from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypedValue<'a> {
    #[serde(rename = "type")]
    pub type_tag: char,
    pub value: OscValue<'a>,
}

/// One decoded argument, bare or with its type tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Argument<'a> {
    Bare(OscValue<'a>),
    Typed(TypedValue<'a>),
}

impl<'a> Argument<'a> {
    pub fn value(&self) -> &OscValue<'a> {
        match self {
            Self::Bare(value) => value,
            Self::Typed(typed) => &typed.value,
        }
    }
}

/// Message arguments.
///
/// `Single` only appears when [`DecodeOptions::unwrap_single`] is set and
/// the message carries exactly one argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Args<'a> {
    Single(Argument<'a>),
    List(Vec<Argument<'a>>),
}

impl<'a> Args<'a> {
    /// Collapse a one-element list into `Single`.
    pub fn from_vec(mut arguments: Vec<Argument<'a>>) -> Self {
        match arguments.pop() {
            Some(only) if arguments.is_empty() => Self::Single(only),
            Some(last) => {
                arguments.push(last);
                Self::List(arguments)
            }
            None => Self::List(arguments),
        }
    }

    pub fn as_slice(&self) -> &[Argument<'a>] {
        match self {
            Self::Single(argument) => std::slice::from_ref(argument),
            Self::List(arguments) => arguments,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Argument<'a>> {
        self.as_slice().iter()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn to_vec(&self) -> Vec<Argument<'a>> {
        self.as_slice().to_vec()
    }
}

/// A decoded OSC message.
///
/// # Examples
/// ```
/// use oscwire_core::{Args, Message};
///
/// let message = Message {
///     address: "/ping".to_string(),
///     args: Args::List(Vec::new()),
/// };
/// assert!(message.args.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message<'a> {
    /// OSC address; always starts with `/`.
    pub address: String,
    pub args: Args<'a>,
}

impl<'a> Message<'a> {
    /// Argument values without type metadata, in wire order.
    pub fn values(&self) -> impl Iterator<Item = &OscValue<'a>> {
        self.args.iter().map(Argument::value)
    }
}
