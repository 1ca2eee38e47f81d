use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::protobuf::varint::VarintError;

/// Errors parsing Protocol Buffers messages.
#[derive(Debug, PartialEq)]
pub struct ProtobufError {
    kind: ErrorKind,
    context: Option<&'static str>,
    field: Option<u64>,
}

impl ProtobufError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
            field: None,
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Return the message type associated with this error.
    pub fn context(&self) -> Option<&str> {
        self.context
    }

    /// Return the field number associated with this error.
    pub fn field(&self) -> Option<u64> {
        self.field
    }

    /// Associate a message type and/or field number with this error.
    ///
    /// Context that is already set is kept, so the innermost message that
    /// failed is reported.
    pub fn with_context(mut self, context: Option<&'static str>, field: Option<u64>) -> Self {
        if self.context.is_none() {
            self.context = context;
            self.field = field;
        }
        self
    }
}

impl Display for ProtobufError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "error in message {} field {}: {}",
            self.context.unwrap_or_default(),
            self.field.unwrap_or(0),
            self.kind
        )
    }
}

impl Error for ProtobufError {}

impl From<VarintError> for ProtobufError {
    fn from(val: VarintError) -> Self {
        match val {
            VarintError::Eof => Self::new(ErrorKind::Eof),
            VarintError::InvalidVarint => Self::new(ErrorKind::InvalidVarint),
        }
    }
}

/// Enum describing the kind of a [`ProtobufError`] error.
#[derive(Debug, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An invalid varint value was encountered.
    InvalidVarint,

    /// The end of the input was reached in the middle of a field.
    Eof,

    /// Attempted to read a field value of a type that doesn't match the wire
    /// type.
    FieldTypeMismatch,

    /// A field has an invalid or unsupported wire type.
    ///
    /// The deprecated group wire types (3 and 4) are reported as invalid.
    InvalidWireType,

    /// A string field contained invalid UTF-8.
    InvalidUtf8,

    /// An enum field contained a value not defined by the schema.
    InvalidEnumValue(u64),
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidVarint => write!(f, "invalid varint"),
            ErrorKind::Eof => write!(f, "end of file"),
            ErrorKind::FieldTypeMismatch => write!(f, "field type mismatch"),
            ErrorKind::InvalidWireType => write!(f, "invalid wire type"),
            ErrorKind::InvalidUtf8 => write!(f, "invalid UTF-8 in string"),
            ErrorKind::InvalidEnumValue(val) => write!(f, "invalid enum value {}", val),
        }
    }
}
