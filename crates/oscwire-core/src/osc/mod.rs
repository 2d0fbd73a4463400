//! OSC 1.0 message decoding and encoding.
//!
//! The codec follows a layered structure:
//! - `layout`: alignment rule, prefixes and type tag characters
//! - `reader`: cursor-advancing reads of primitives, strings and blobs
//! - `tag`: the closed set of argument types and their readers
//! - `parser`: message-level decoding (address, type tags, arguments)
//! - `writer`: argument and message encoding
//! - `error`: explicit, actionable errors
//!
//! Bundles and time tag arguments are recognized and rejected with
//! `OscError::Unsupported`. The optional OSC types (`h`, `d`, `c`, `r`,
//! `m`) are unknown tags.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod tag;
pub mod writer;

pub use parser::{decode_message, read_message};
