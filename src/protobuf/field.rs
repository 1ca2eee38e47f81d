use crate::protobuf::errors::{ErrorKind, ProtobufError};
use crate::protobuf::varint::read_varint;

/// Wire-type and associated value of a field.
///
/// See <https://protobuf.dev/programming-guides/encoding/#structure>.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FieldValue<'a> {
    /// Integer value encoded as a varint.
    Varint(u64),

    /// 64-bit fixed-width value.
    I64(u64),

    /// A variable-length value (string, bytes, embedded message or packed
    /// repeated field).
    Len(&'a [u8]),

    /// 32-bit fixed-width value.
    I32(u32),
}

#[cfg(test)]
impl FieldValue<'_> {
    /// Encode a field with the value and wire type of `self` and the given
    /// field number.
    pub fn encode(&self, number: u64) -> Vec<u8> {
        use crate::protobuf::varint::encode_varint;

        let encode_tag = |wire_type| encode_varint(wire_type | (number << 3));

        let mut buf = Vec::new();
        match *self {
            Self::Varint(val) => {
                buf.extend(encode_tag(0));
                buf.extend(encode_varint(val));
            }
            Self::I64(val) => {
                buf.extend(encode_tag(1));
                buf.extend(val.to_le_bytes());
            }
            Self::Len(data) => {
                buf.extend(encode_tag(2));
                buf.extend(encode_varint(data.len() as u64));
                buf.extend_from_slice(data);
            }
            Self::I32(val) => {
                buf.extend(encode_tag(5));
                buf.extend(val.to_le_bytes());
            }
        }
        buf
    }
}

/// A single field of a message.
///
/// `Field`s are produced by iterating over fields of a message using
/// [`Fields::next`]. Variable length values borrow from the message buffer.
#[derive(Debug)]
pub struct Field<'a> {
    number: u64,
    value: FieldValue<'a>,

    /// Debug name of the message type this field belongs to.
    context: Option<&'static str>,
}

impl<'a> Field<'a> {
    /// Return the field number.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Return the field value.
    pub fn value(&self) -> FieldValue<'a> {
        self.value
    }

    /// Return the bytes in this field.
    pub fn read_bytes(&self) -> Result<&'a [u8], ProtobufError> {
        match self.value {
            FieldValue::Len(data) => Ok(data),
            _ => Err(self.error(ErrorKind::FieldTypeMismatch)),
        }
    }

    /// Return the UTF-8 encoded string in this field.
    pub fn read_string(&self) -> Result<&'a str, ProtobufError> {
        let data = self.read_bytes()?;
        std::str::from_utf8(data).map_err(|_| self.error(ErrorKind::InvalidUtf8))
    }

    /// Begin reading the embedded message in this field.
    ///
    /// `context` is the name of the embedded message type. It is used to add
    /// context to any errors encountered.
    pub fn read_message(&self, context: Option<&'static str>) -> Result<Fields<'a>, ProtobufError> {
        let data = self.read_bytes()?;
        Ok(Fields::new(data, context))
    }

    /// Get the value of a varint field with an unsigned schema type.
    pub fn get_uint64(&self) -> Result<u64, ProtobufError> {
        match self.value {
            FieldValue::Varint(val) => Ok(val),
            _ => Err(self.error(ErrorKind::FieldTypeMismatch)),
        }
    }

    /// Get the value of a field with schema type `bool`.
    pub fn get_bool(&self) -> Result<bool, ProtobufError> {
        self.get_uint64().map(|v| v != 0)
    }

    /// Get the value of an enum field and convert it using `from_code`.
    pub fn get_enum<T>(&self, from_code: impl Fn(u64) -> Option<T>) -> Result<T, ProtobufError> {
        let code = self.get_uint64()?;
        from_code(code).ok_or_else(|| self.error(ErrorKind::InvalidEnumValue(code)))
    }

    fn error(&self, kind: ErrorKind) -> ProtobufError {
        ProtobufError::new(kind).with_context(self.context, Some(self.number))
    }
}

/// Iterator over the fields of an encoded message.
pub struct Fields<'a> {
    buf: &'a [u8],
    context: Option<&'static str>,
}

impl<'a> Fields<'a> {
    /// Iterate over the fields in `buf`, which contains exactly one message.
    pub fn new(buf: &'a [u8], context: Option<&'static str>) -> Self {
        Fields { buf, context }
    }

    /// Return the next field in the message, or `None` at the end.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Option<Field<'a>>, ProtobufError> {
        if self.buf.is_empty() {
            return Ok(None);
        }

        let context = self.context;
        let with_context = |err: ProtobufError, field| err.with_context(context, field);

        let (tag, tag_len) =
            read_varint(self.buf).map_err(|err| with_context(err.into(), None))?;
        let number = tag >> 3;
        let wire_type = tag & 0x7;
        let rest = &self.buf[tag_len..];
        let eof = || with_context(ProtobufError::new(ErrorKind::Eof), Some(number));

        let (value, value_len) = match wire_type {
            0 => {
                let (val, len) =
                    read_varint(rest).map_err(|err| with_context(err.into(), Some(number)))?;
                (FieldValue::Varint(val), len)
            }
            1 => {
                let bytes: [u8; 8] = rest
                    .get(..8)
                    .and_then(|b| b.try_into().ok())
                    .ok_or_else(eof)?;
                (FieldValue::I64(u64::from_le_bytes(bytes)), 8)
            }
            2 => {
                let (len, len_len) =
                    read_varint(rest).map_err(|err| with_context(err.into(), Some(number)))?;
                let end = usize::try_from(len)
                    .ok()
                    .and_then(|len| len.checked_add(len_len))
                    .ok_or_else(eof)?;
                let data = rest.get(len_len..end).ok_or_else(eof)?;
                (FieldValue::Len(data), end)
            }
            5 => {
                let bytes: [u8; 4] = rest
                    .get(..4)
                    .and_then(|b| b.try_into().ok())
                    .ok_or_else(eof)?;
                (FieldValue::I32(u32::from_le_bytes(bytes)), 4)
            }
            _ => {
                return Err(with_context(
                    ProtobufError::new(ErrorKind::InvalidWireType),
                    Some(number),
                ))
            }
        };

        self.buf = &rest[value_len..];

        Ok(Some(Field {
            number,
            value,
            context: self.context,
        }))
    }
}
