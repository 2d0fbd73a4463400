pub const ALIGNMENT: usize = 4;
pub const SIZE_PREFIX_LEN: usize = 4;
pub const PRIMITIVE_LEN: usize = 4;

pub const ADDRESS_PREFIX: char = '/';
pub const TYPE_TAG_PREFIX: char = ',';
pub const BUNDLE_MARKER: &str = "#bundle";

pub const TAG_INT32: char = 'i';
pub const TAG_FLOAT32: char = 'f';
pub const TAG_STRING: char = 's';
pub const TAG_BLOB: char = 'b';
pub const TAG_TRUE: char = 'T';
pub const TAG_FALSE: char = 'F';
pub const TAG_NIL: char = 'N';
pub const TAG_IMPULSE: char = 'I';
pub const TAG_SYMBOL: char = 'S';
pub const TAG_TIME_TAG: char = 't';

/// Value reported for the impulse (`I`) tag.
pub const IMPULSE_VALUE: f64 = 1.0;

/// Round `len` up to the next 4-byte boundary.
pub const fn padded_len(len: usize) -> usize {
    (len + (ALIGNMENT - 1)) & !(ALIGNMENT - 1)
}
