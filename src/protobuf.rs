//! Minimal Protocol Buffers decoder for operator registry dumps.
//!
//! Registry dumps are small, so messages are decoded from an in-memory byte
//! slice rather than a streaming reader. Decoders iterate over the fields of
//! a message using [`Fields`], read the fields they care about and ignore the
//! rest. See [`DecodeMessage`] for an example.
//!
//! See <https://protobuf.dev/programming-guides/encoding/> for the wire
//! format.

mod errors;
mod field;
mod message;
pub mod varint;

pub use errors::{ErrorKind, ProtobufError};
pub use field::{Field, FieldValue, Fields};
pub use message::{DecodeMessage, DelimitedMessages};
