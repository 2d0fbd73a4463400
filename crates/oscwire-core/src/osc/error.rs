use thiserror::Error;

/// Errors returned by OSC decoding and encoding.
///
/// Decode errors carry the offending value and the byte offset at which the
/// problem was detected. Any decode error means the buffer is not a valid OSC
/// message; there is no partial result.
///
/// # Examples
/// ```
/// use oscwire_core::OscError;
///
/// let err = OscError::MalformedAddress {
///     address: "osc".to_string(),
///     offset: 4,
/// };
/// assert!(err.to_string().contains("malformed OSC address"));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OscError {
    #[error("malformed OSC address '{address}' at offset {offset}: must start with '/'")]
    MalformedAddress { address: String, offset: usize },
    #[error("malformed type tag string '{type_tags}' at offset {offset}: must start with ','")]
    MalformedTypeTag { type_tags: String, offset: usize },
    #[error("'{tag}' is not a valid OSC type tag (type tag string was '{type_tags}', offset {offset})")]
    UnknownTypeTag {
        tag: char,
        type_tags: String,
        offset: usize,
    },
    #[error("message truncated at offset {offset}: need {needed} bytes, got {actual}")]
    Truncated {
        needed: usize,
        actual: usize,
        offset: usize,
    },
    #[error("invalid blob length {length} at offset {offset}")]
    InvalidBlobLength { length: i32, offset: usize },
    #[error("unsupported OSC feature at offset {offset}: {feature}")]
    Unsupported {
        feature: &'static str,
        offset: usize,
    },
    #[error("target buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },
    #[error("blob of {length} bytes exceeds the 32-bit size prefix")]
    BlobTooLarge { length: usize },
    #[error("string cannot be encoded as an OSC string: {reason}")]
    UnencodableString { reason: String },
}
